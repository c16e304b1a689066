//! csv-codec - Decode CSV lines into records and encode them back
//!
//! # Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | Configuration/argument error |
//! | 3 | File I/O or input data error |
//! | 4 | Runtime error |

use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use csv_codec::cli::{Args, Mode};
use csv_codec::codec::CsvCodec;
use csv_codec::error::CsvCodecError;
use csv_codec::pipeline::{decode_stream, encode_stream};

/// Exit code for success
const EXIT_SUCCESS: u8 = 0;
/// Exit code for configuration/argument errors
const EXIT_CONFIG_ERROR: u8 = 1;
/// Exit code for file I/O and input data errors
const EXIT_IO_ERROR: u8 = 3;
/// Exit code for runtime errors
const EXIT_RUNTIME_ERROR: u8 = 4;

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = args.validate() {
        eprintln!("Error: Configuration error: {}", e);
        eprintln!("  Hint: Use --help for usage information");
        return ExitCode::from(EXIT_CONFIG_ERROR);
    }

    match run(&args) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(error_to_exit_code(&e))
        }
    }
}

/// Installs a stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(args: &Args) -> Result<(), CsvCodecError> {
    let config = args.to_config()?;
    let mut codec = CsvCodec::new(&config)?;
    debug!(?config, "Codec configured");

    let mut output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match args.mode {
        Mode::Decode => run_decode(&mut codec, &args.inputs, &mut output)?,
        Mode::Encode => run_encode(&mut codec, &args.inputs, &mut output)?,
    }
    output.flush()?;

    if args.stats {
        eprintln!("{}", codec.stats());
    }

    Ok(())
}

/// Decodes each input in turn, resetting the header between inputs so every
/// file can bring its own header line.
fn run_decode(
    codec: &mut CsvCodec,
    inputs: &[PathBuf],
    output: &mut dyn Write,
) -> Result<(), CsvCodecError> {
    if inputs.is_empty() {
        decode_stream(codec, io::stdin().lock(), output)?;
        return Ok(());
    }

    for (i, path) in inputs.iter().enumerate() {
        if i > 0 {
            codec.reset();
        }
        let reader = BufReader::new(File::open(path).map_err(|e| {
            eprintln!("Error: Failed to open input {:?}", path);
            e
        })?);
        let count = decode_stream(codec, reader, output)?;
        debug!(path = %path.display(), records = count, "Decoded input");
    }

    Ok(())
}

fn run_encode(
    codec: &mut CsvCodec,
    inputs: &[PathBuf],
    output: &mut dyn Write,
) -> Result<(), CsvCodecError> {
    if inputs.is_empty() {
        encode_stream(codec, io::stdin().lock(), output)?;
        return Ok(());
    }

    for path in inputs {
        let reader = BufReader::new(File::open(path).map_err(|e| {
            eprintln!("Error: Failed to open input {:?}", path);
            e
        })?);
        let count = encode_stream(codec, reader, output)?;
        debug!(path = %path.display(), lines = count, "Encoded input");
    }

    Ok(())
}

/// Maps an error to the process exit code.
fn error_to_exit_code(error: &CsvCodecError) -> u8 {
    match error {
        CsvCodecError::InvalidConfig(_) => EXIT_CONFIG_ERROR,
        CsvCodecError::Io(_) => EXIT_IO_ERROR,
        CsvCodecError::Json(_) => EXIT_IO_ERROR,
        CsvCodecError::Csv(_) => EXIT_IO_ERROR,
        CsvCodecError::InvalidRecord(_) => EXIT_IO_ERROR,
        CsvCodecError::MalformedInput { .. } => EXIT_RUNTIME_ERROR,
        CsvCodecError::Conversion { .. } => EXIT_RUNTIME_ERROR,
    }
}
