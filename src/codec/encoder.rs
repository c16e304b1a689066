//! Record to line encoding.

use super::stats::EncodeStats;
use super::tokenizer::Tokenizer;
use crate::config::CodecSettings;
use crate::error::CsvCodecError;
use crate::record::{Record, Value};

/// Whether this encoder still owes a header line.
///
/// Headers go out at most once per encoder; unlike the decoder's header
/// state there is no reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderEmission {
    /// Header lines are not written.
    Disabled,
    /// The next encoded record is preceded by a header line.
    Pending,
    /// The header line has been written.
    Emitted,
}

/// Turns records into delimited lines.
#[derive(Debug, Clone)]
pub struct Encoder {
    tokenizer: Tokenizer,
    columns: Vec<String>,
    header: HeaderEmission,
    stats: EncodeStats,
}

impl Encoder {
    pub fn new(settings: &CodecSettings) -> Self {
        Self {
            tokenizer: Tokenizer::new(settings.separator, settings.quote),
            columns: settings.columns.clone(),
            header: if settings.emit_header {
                HeaderEmission::Pending
            } else {
                HeaderEmission::Disabled
            },
            stats: EncodeStats::default(),
        }
    }

    /// Encodes one record into one or two `\n`-terminated lines.
    ///
    /// With configured columns, the record's fields are projected in that
    /// order and columns missing from the record are skipped; otherwise the
    /// record's own field order is used. The first call on an encoder with
    /// headers enabled returns the header line (the resolved column names)
    /// followed by the data line.
    pub fn encode(&mut self, record: &Record) -> Result<Vec<String>, CsvCodecError> {
        let resolved: Vec<(&str, &Value)> = if self.columns.is_empty() {
            record.iter().collect()
        } else {
            self.columns
                .iter()
                .filter_map(|name| record.get(name).map(|value| (name.as_str(), value)))
                .collect()
        };

        let mut lines = Vec::with_capacity(2);
        if self.header == HeaderEmission::Pending {
            lines.push(self.tokenizer.join(resolved.iter().map(|(name, _)| *name))?);
        }
        lines.push(
            self.tokenizer
                .join(resolved.iter().map(|(_, value)| value.to_string()))?,
        );

        if self.header == HeaderEmission::Pending {
            self.header = HeaderEmission::Emitted;
        }
        self.stats.records += 1;
        self.stats.lines += lines.len() as u64;

        Ok(lines)
    }

    pub fn header_emission(&self) -> HeaderEmission {
        self.header
    }

    pub fn stats(&self) -> EncodeStats {
        self.stats
    }
}
