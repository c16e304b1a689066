//! Counters kept by the decoder and encoder.

use std::fmt;

/// Decode-side counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecodeStats {
    /// Lines handed to the decoder.
    pub lines: u64,
    /// Records produced, fallback records included.
    pub records: u64,
    /// Header lines captured.
    pub headers_captured: u64,
    /// Lines that failed to tokenize and produced a fallback record.
    pub parse_failures: u64,
    /// Field values kept as strings because their conversion failed.
    pub conversion_failures: u64,
}

/// Encode-side counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EncodeStats {
    /// Records encoded.
    pub records: u64,
    /// Lines produced, header line included.
    pub lines: u64,
}

/// Combined statistics of a [`CsvCodec`](super::CsvCodec).
///
/// # Example
///
/// ```rust,ignore
/// let stats = codec.stats();
/// eprintln!("{}", stats);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CodecStats {
    pub decode: DecodeStats,
    pub encode: EncodeStats,
}

impl fmt::Display for CodecStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CSV Codec Statistics")?;
        writeln!(f, "====================")?;
        writeln!(f, "Decode:")?;
        writeln!(f, "  Lines:               {:>10}", self.decode.lines)?;
        writeln!(f, "  Records:             {:>10}", self.decode.records)?;
        writeln!(f, "  Headers captured:    {:>10}", self.decode.headers_captured)?;
        writeln!(f, "  Parse failures:      {:>10}", self.decode.parse_failures)?;
        writeln!(f, "  Conversion failures: {:>10}", self.decode.conversion_failures)?;
        writeln!(f, "Encode:")?;
        writeln!(f, "  Records:             {:>10}", self.encode.records)?;
        write!(f, "  Lines:               {:>10}", self.encode.lines)
    }
}
