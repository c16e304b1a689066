//! Line to record decoding.

use tracing::{debug, info};

use super::convert::ConversionMap;
use super::header::HeaderState;
use super::namer::ColumnNamer;
use super::stats::DecodeStats;
use super::tokenizer::Tokenizer;
use crate::config::CodecSettings;
use crate::record::{Record, Value};

/// Tag added to the fallback record of a line that failed to parse.
pub const PARSE_FAILURE_TAG: &str = "_csvparsefailure";

/// Field of the fallback record holding the original line.
pub const MESSAGE_FIELD: &str = "message";

/// Turns one line into at most one [`Record`].
///
/// The decoder never fails. A line that cannot be tokenized becomes a
/// fallback record (`message` plus the [`PARSE_FAILURE_TAG`] tag), and a
/// value that cannot be converted keeps its raw string.
#[derive(Debug, Clone)]
pub struct Decoder {
    tokenizer: Tokenizer,
    namer: ColumnNamer,
    header: HeaderState,
    conversions: ConversionMap,
    skip_empty_columns: bool,
    stats: DecodeStats,
}

impl Decoder {
    pub fn new(settings: &CodecSettings) -> Self {
        Self {
            tokenizer: Tokenizer::new(settings.separator, settings.quote),
            namer: ColumnNamer::new(
                settings.columns.clone(),
                settings.autogenerate_column_names,
            ),
            header: HeaderState::new(settings.capture_header),
            conversions: settings.conversions.clone(),
            skip_empty_columns: settings.skip_empty_columns,
            stats: DecodeStats::default(),
        }
    }

    /// Decodes one line.
    ///
    /// Returns `None` when the line was consumed as a header (or was an
    /// empty line while a header is awaited), otherwise exactly one record.
    pub fn decode(&mut self, line: &str) -> Option<Record> {
        self.stats.lines += 1;

        let fields = match self.tokenizer.tokenize(line) {
            Ok(fields) => fields,
            Err(e) => {
                self.stats.parse_failures += 1;
                self.stats.records += 1;
                info!(error = %e, data = line, "CSV parse failure. Falling back to plain-text");
                return Some(fallback_record(line));
            }
        };

        if self.header.is_awaiting() {
            if fields.is_empty() {
                debug!("Skipping empty line while awaiting a header");
                return None;
            }
            self.header.capture(fields);
            self.stats.headers_captured += 1;
            return None;
        }

        let header = self.header.names();
        let mut record = Record::new();
        for (index, raw) in fields.into_iter().enumerate() {
            let name = match self.namer.name_for(index, header) {
                Some(name) => name,
                None => continue,
            };
            if self.skip_empty_columns && raw.is_empty() {
                continue;
            }

            let value = match self.conversions.convert(&name, &raw) {
                Ok(value) => value,
                Err(e) => {
                    self.stats.conversion_failures += 1;
                    debug!(error = %e, "Conversion failed, keeping raw value");
                    Value::String(raw)
                }
            };
            record.insert(name.into_owned(), value);
        }

        self.stats.records += 1;
        Some(record)
    }

    /// Returns to awaiting a header line, if header capture is enabled.
    pub fn reset(&mut self) {
        self.header.reset();
    }

    pub fn header(&self) -> &HeaderState {
        &self.header
    }

    pub fn stats(&self) -> DecodeStats {
        self.stats
    }
}

/// The record emitted in place of a line that failed to parse.
pub fn fallback_record(line: &str) -> Record {
    let mut record = Record::new();
    record.insert(MESSAGE_FIELD, line);
    record.add_tag(PARSE_FAILURE_TAG);
    record
}
