//! Stream drivers
//!
//! Runs a [`CsvCodec`] over whole input streams, standing in for the host
//! pipeline: one decode call per input line, one encode call per record.
//!
//! - Decoding reads raw byte lines and writes one JSON object per record.
//! - Encoding reads one JSON object per line and writes CSV lines.
//!
//! # Example
//!
//! ```rust,ignore
//! use csv_codec::codec::CsvCodec;
//! use csv_codec::pipeline::decode_stream;
//!
//! let mut codec = CsvCodec::default();
//! let mut out = Vec::new();
//! decode_stream(&mut codec, "a,b\nc,d\n".as_bytes(), &mut out)?;
//! ```

use std::io::{BufRead, Write};

use crate::codec::CsvCodec;
use crate::error::CsvCodecError;
use crate::record::Record;

/// Decodes every line of `reader`, writing records as JSON lines.
///
/// Lines are split on `\n`; a trailing `\r\n` or `\n` is stripped before
/// the line reaches the codec. Returns the number of records written.
pub fn decode_stream<R: BufRead, W: Write + ?Sized>(
    codec: &mut CsvCodec,
    mut reader: R,
    writer: &mut W,
) -> Result<u64, CsvCodecError> {
    let mut buf = Vec::new();
    let mut written = 0u64;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        if let Some(record) = codec.decode_bytes(strip_line_end(&buf)) {
            serde_json::to_writer(&mut *writer, &record)?;
            writer.write_all(b"\n")?;
            written += 1;
        }
    }

    Ok(written)
}

/// Encodes every JSON-lines record of `reader`, writing CSV lines.
///
/// Blank lines are skipped. Returns the number of lines written, header
/// line included.
///
/// # Errors
///
/// A line that is not a JSON object of string, number, boolean or array
/// values fails with [`CsvCodecError::InvalidRecord`] naming the line, as
/// does a whole number outside the `i64` range.
pub fn encode_stream<R: BufRead, W: Write + ?Sized>(
    codec: &mut CsvCodec,
    reader: R,
    writer: &mut W,
) -> Result<u64, CsvCodecError> {
    let mut written = 0u64;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record: Record = serde_json::from_str(&line).map_err(|e| {
            CsvCodecError::InvalidRecord(format!("Line {}: {}", index + 1, e))
        })?;

        for output in codec.encode(&record)? {
            writer.write_all(output.as_bytes())?;
            written += 1;
        }
    }

    Ok(written)
}

fn strip_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
