//! Byte-to-text conversion for raw input lines.
//!
//! Input arrives as bytes in the configured character encoding. Sequences
//! that are invalid in that encoding are replaced with U+FFFD rather than
//! rejected, so one bad byte never drops a whole line.

use encoding_rs::{Encoding, UTF_8};
use std::borrow::Cow;
use tracing::warn;

use crate::error::CsvCodecError;

/// The default charset label.
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// A resolved character encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset {
    encoding: &'static Encoding,
}

impl Charset {
    /// Resolves a WHATWG encoding label such as `"UTF-8"`, `"windows-1252"`
    /// or `"ISO-8859-1"` (case-insensitive).
    pub fn for_label(label: &str) -> Result<Self, CsvCodecError> {
        Encoding::for_label(label.trim().as_bytes())
            .map(|encoding| Self { encoding })
            .ok_or_else(|| CsvCodecError::InvalidConfig(format!("unknown charset '{}'", label)))
    }

    /// Canonical name of the encoding.
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Decodes `bytes` to text.
    ///
    /// Byte order marks are not sniffed; the configured encoding always
    /// applies. Valid UTF-8 input with a UTF-8 charset is borrowed.
    pub fn convert<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        let (text, had_errors) = self.encoding.decode_without_bom_handling(bytes);
        if had_errors {
            warn!(
                charset = self.encoding.name(),
                "Received data with invalid byte sequences; replaced with U+FFFD"
            );
        }
        text
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self { encoding: UTF_8 }
    }
}
