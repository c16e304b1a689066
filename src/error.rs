//! Error module
//!
//! Defines the error type for the CSV codec using `thiserror`.
//! Decode-time failures (malformed lines, failed conversions) are normally
//! recovered inside the codec and never reach the host; they still have
//! variants here so the lower-level components can report them precisely.

use thiserror::Error;

/// The main error type for the CSV codec.
///
/// # Error Categories
///
/// - **Configuration errors**: invalid separator, quote character, type tag or charset
/// - **Data errors**: malformed lines, failed type conversions, unencodable records
/// - **I/O errors**: reading input or writing output in the CLI host
///
/// # Example
///
/// ```rust,ignore
/// use csv_codec::error::CsvCodecError;
///
/// fn example() -> Result<(), CsvCodecError> {
///     let file = std::fs::File::open("nonexistent.json")?;
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum CsvCodecError {
    /// Invalid codec configuration.
    ///
    /// Raised when the configuration is frozen into a codec, never while
    /// decoding or encoding.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A line that could not be split into fields.
    ///
    /// Carries the original line so the decoder can build its fallback record.
    #[error("Malformed CSV line ({reason}): {line:?}")]
    MalformedInput {
        /// The offending line, as received.
        line: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A field value that could not be coerced to its configured type.
    #[error("Cannot convert field '{field}' value {value:?} to {target}")]
    Conversion {
        /// Name of the field being converted.
        field: String,
        /// The raw value.
        value: String,
        /// The requested target type tag.
        target: String,
    },

    /// A record that cannot be represented as a CSV line.
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// CSV writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// General I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error (configuration files and JSON-lines records).
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
