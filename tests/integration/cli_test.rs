//! Integration tests for the csv-codec binary

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::tempdir;

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_csv-codec"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn csv-codec");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_decode_stdin_to_stdout() {
    let output = run_with_stdin(&["--mode", "decode"], "big,bird,sesame street\n");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "{\"column1\":\"big\",\"column2\":\"bird\",\"column3\":\"sesame street\"}\n"
    );
}

#[test]
fn test_decode_with_flags() {
    let output = run_with_stdin(
        &[
            "--mode",
            "decode",
            "--separator",
            ";",
            "--columns",
            "custom1,custom2,custom3",
            "--skip-empty-columns",
            "--convert",
            "custom3:integer",
        ],
        "val1;;42\n",
    );
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "{\"custom1\":\"val1\",\"custom3\":42}\n"
    );
}

#[test]
fn test_decode_files_reset_header_between_inputs() {
    let temp_dir = tempdir().unwrap();
    let first = temp_dir.path().join("a.csv");
    let second = temp_dir.path().join("b.csv");
    let out = temp_dir.path().join("out.jsonl");
    fs::write(&first, "size,animal\nbig,bird\n").unwrap();
    fs::write(&second, "host,city\nexample.com,berlin\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_csv-codec"))
        .args([
            "--mode",
            "decode",
            "--autodetect-column-names",
            "--output",
            out.to_str().unwrap(),
            first.to_str().unwrap(),
            second.to_str().unwrap(),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "{\"size\":\"big\",\"animal\":\"bird\"}\n{\"host\":\"example.com\",\"city\":\"berlin\"}\n"
    );
}

#[test]
fn test_encode_with_headers() {
    let output = run_with_stdin(
        &["--mode", "encode", "--include-headers"],
        "{\"a\":\"x,y\",\"b\":1}\n{\"a\":\"z\",\"b\":true}\n",
    );
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "a,b\n\"x,y\",1\nz,true\n"
    );
}

#[test]
fn test_stats_printed_to_stderr() {
    let output = run_with_stdin(&["--mode", "decode", "--stats"], "a,b\n\"c\n");
    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("CSV Codec Statistics"));
    assert!(stderr.contains("Parse failures:               1"));
}

#[test]
fn test_invalid_separator_exits_with_config_error() {
    let output = run_with_stdin(&["--mode", "decode", "--separator", "::"], "");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_invalid_json_exits_with_data_error() {
    let output = run_with_stdin(&["--mode", "encode"], "not json\n");
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8(output.stderr).unwrap().contains("Line 1"));
}

#[test]
fn test_missing_input_file() {
    let output = Command::new(env!("CARGO_BIN_EXE_csv-codec"))
        .args(["--mode", "decode", "/nonexistent/input.csv"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
}
