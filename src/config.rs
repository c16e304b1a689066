//! Codec configuration
//!
//! [`CodecConfig`] is the user-facing option set, loadable from a JSON file
//! where any subset of options may be given:
//!
//! ```json
//! {
//!     "separator": ";",
//!     "quote_char": "'",
//!     "columns": ["host", "country", "city"],
//!     "skip_empty_columns": true,
//!     "convert": { "port": "integer", "active": "boolean" }
//! }
//! ```
//!
//! `"quote_char": null` disables quoting. The options are checked and frozen
//! into [`CodecSettings`] once, when a codec is built; nothing is validated
//! on the decode/encode path.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::charset::{Charset, DEFAULT_CHARSET};
use crate::codec::convert::{ConversionMap, TypeTag};
use crate::error::CsvCodecError;

/// Codec options as written by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    /// Field separator, one ASCII character. Default `,`.
    pub separator: String,

    /// Quote character, one ASCII character, or `None` to disable quoting.
    /// Default `"`.
    pub quote_char: Option<String>,

    /// Column names in the order they appear in the data. Rows with more
    /// fields than names fall back to auto-generated names.
    pub columns: Vec<String>,

    /// Name unnamed fields `column1`, `column2`, ... instead of dropping them.
    /// Default `true`.
    pub autogenerate_column_names: bool,

    /// Omit fields whose raw value is empty. Default `false`.
    pub skip_empty_columns: bool,

    /// Treat the first decoded line as a header, and write a header line
    /// before the first encoded record. Default `false`.
    pub include_headers: bool,

    /// Treat the first decoded line as a header. Default `false`.
    pub autodetect_column_names: bool,

    /// Field name to target type.
    pub convert: BTreeMap<String, TypeTag>,

    /// Character encoding of raw input. Default `UTF-8`.
    pub charset: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            separator: ",".to_string(),
            quote_char: Some("\"".to_string()),
            columns: Vec::new(),
            autogenerate_column_names: true,
            skip_empty_columns: false,
            include_headers: false,
            autodetect_column_names: false,
            convert: BTreeMap::new(),
            charset: DEFAULT_CHARSET.to_string(),
        }
    }
}

impl CodecConfig {
    /// Loads a configuration from a JSON file.
    ///
    /// Options missing from the file keep their defaults; unknown options
    /// and unknown conversion types are rejected.
    pub fn from_json_file(path: &Path) -> Result<Self, CsvCodecError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: CodecConfig = serde_json::from_reader(reader)?;
        Ok(config)
    }

    /// Checks every option without building a codec.
    pub fn validate(&self) -> Result<(), CsvCodecError> {
        CodecSettings::from_config(self).map(|_| ())
    }

    /// True if decoding starts by capturing a header line.
    pub fn captures_header(&self) -> bool {
        self.include_headers || self.autodetect_column_names
    }
}

/// Validated, typed form of a [`CodecConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct CodecSettings {
    pub separator: u8,
    pub quote: Option<u8>,
    pub columns: Vec<String>,
    pub autogenerate_column_names: bool,
    pub skip_empty_columns: bool,
    pub capture_header: bool,
    pub emit_header: bool,
    pub conversions: ConversionMap,
    pub charset: Charset,
}

impl CodecSettings {
    pub fn from_config(config: &CodecConfig) -> Result<Self, CsvCodecError> {
        let separator = single_ascii("separator", &config.separator)?;
        let quote = match &config.quote_char {
            Some(q) => Some(single_ascii("quote_char", q)?),
            None => None,
        };
        if quote == Some(separator) {
            return Err(CsvCodecError::InvalidConfig(format!(
                "quote_char and separator must differ (both are {:?})",
                char::from(separator)
            )));
        }

        Ok(Self {
            separator,
            quote,
            columns: config.columns.clone(),
            autogenerate_column_names: config.autogenerate_column_names,
            skip_empty_columns: config.skip_empty_columns,
            capture_header: config.captures_header(),
            emit_header: config.include_headers,
            conversions: ConversionMap::new(
                config.convert.iter().map(|(name, tag)| (name.clone(), *tag)),
            ),
            charset: Charset::for_label(&config.charset)?,
        })
    }
}

impl Default for CodecSettings {
    fn default() -> Self {
        Self {
            separator: b',',
            quote: Some(b'"'),
            columns: Vec::new(),
            autogenerate_column_names: true,
            skip_empty_columns: false,
            capture_header: false,
            emit_header: false,
            conversions: ConversionMap::default(),
            charset: Charset::default(),
        }
    }
}

/// Parses an option that must be exactly one ASCII character, not a line break.
fn single_ascii(option: &str, value: &str) -> Result<u8, CsvCodecError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() && c != '\r' && c != '\n' => Ok(c as u8),
        (Some(c), None) if c == '\r' || c == '\n' => Err(CsvCodecError::InvalidConfig(format!(
            "{} cannot be a line break",
            option
        ))),
        _ => Err(CsvCodecError::InvalidConfig(format!(
            "{} must be a single ASCII character, got {:?}",
            option, value
        ))),
    }
}
