//! Field tokenization for a single line.
//!
//! Splitting is strict: structural problems that a lenient CSV reader would
//! silently paper over (an unclosed quote, a stray quote inside an unquoted
//! field, text after a closing quote) are reported as
//! [`CsvCodecError::MalformedInput`] so the decoder can fall back.
//!
//! Joining goes through the `csv` crate's writer, which quotes only the
//! fields that need it.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::CsvCodecError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// At the start of a field.
    FieldStart,
    /// Inside a field that did not start with a quote.
    Unquoted,
    /// Inside a quoted field.
    Quoted,
    /// Just read a quote inside a quoted field: either an escaped quote or the close.
    QuoteInQuoted,
}

/// Splits lines into raw fields and joins fields back into lines.
///
/// Both the separator and the quote character are single ASCII bytes; the
/// configuration layer rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    separator: u8,
    quote: Option<u8>,
}

impl Tokenizer {
    /// Creates a tokenizer. `quote: None` disables quote interpretation.
    pub fn new(separator: u8, quote: Option<u8>) -> Self {
        Self { separator, quote }
    }

    pub fn separator(&self) -> u8 {
        self.separator
    }

    pub fn quote(&self) -> Option<u8> {
        self.quote
    }

    /// Splits one line into raw fields.
    ///
    /// One trailing `\n`, `\r\n` or `\r` is treated as the line terminator.
    /// An empty line yields no fields; a line consisting of a lone
    /// separator yields two empty fields.
    ///
    /// # Errors
    ///
    /// Returns [`CsvCodecError::MalformedInput`] carrying `line` unchanged when:
    /// - a quoted field is never closed
    /// - a quote character appears inside an unquoted field
    /// - anything but the separator follows a closing quote
    /// - a line break appears outside quotes before the end of the line
    pub fn tokenize(&self, line: &str) -> Result<Vec<String>, CsvCodecError> {
        let body = strip_terminator(line);
        if body.is_empty() {
            return Ok(Vec::new());
        }

        let separator = char::from(self.separator);
        let quote = self.quote.map(char::from);
        let malformed = |reason: &str| CsvCodecError::MalformedInput {
            line: line.to_string(),
            reason: reason.to_string(),
        };

        let mut fields = Vec::new();
        let mut field = String::new();
        let mut state = State::FieldStart;

        for c in body.chars() {
            state = match state {
                State::FieldStart | State::Unquoted => {
                    if c == separator {
                        fields.push(std::mem::take(&mut field));
                        State::FieldStart
                    } else if Some(c) == quote {
                        if state == State::Unquoted {
                            return Err(malformed("illegal quote in unquoted field"));
                        }
                        State::Quoted
                    } else if c == '\r' || c == '\n' {
                        return Err(malformed("unquoted line break"));
                    } else {
                        field.push(c);
                        State::Unquoted
                    }
                }
                State::Quoted => {
                    if Some(c) == quote {
                        State::QuoteInQuoted
                    } else {
                        field.push(c);
                        State::Quoted
                    }
                }
                State::QuoteInQuoted => {
                    if Some(c) == quote {
                        field.push(c);
                        State::Quoted
                    } else if c == separator {
                        fields.push(std::mem::take(&mut field));
                        State::FieldStart
                    } else {
                        return Err(malformed("unexpected character after closing quote"));
                    }
                }
            };
        }

        if state == State::Quoted {
            return Err(malformed("unclosed quoted field"));
        }
        fields.push(field);

        Ok(fields)
    }

    /// Joins fields into one line terminated by `\n`.
    ///
    /// Fields containing the separator, the quote character, or a line
    /// break are quoted, with embedded quotes doubled. With quoting
    /// disabled every field is written verbatim, and a record holding a
    /// single empty field becomes an empty line.
    pub fn join<I, S>(&self, fields: I) -> Result<String, CsvCodecError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let fields: Vec<S> = fields.into_iter().collect();
        let lone_empty = fields.len() == 1 && fields[0].as_ref().is_empty();
        // The csv writer quotes a lone empty field even under QuoteStyle::Never.
        if fields.is_empty() || (lone_empty && self.quote.is_none()) {
            return Ok("\n".to_string());
        }

        let mut builder = WriterBuilder::new();
        builder
            .delimiter(self.separator)
            .terminator(Terminator::Any(b'\n'))
            .has_headers(false);
        match self.quote {
            Some(q) => {
                builder.quote(q).quote_style(QuoteStyle::Necessary);
            }
            None => {
                builder.quote_style(QuoteStyle::Never);
            }
        }

        let mut writer = builder.from_writer(Vec::new());
        writer.write_record(fields)?;
        let bytes = writer
            .into_inner()
            .map_err(|e| CsvCodecError::Io(e.into_error()))?;

        String::from_utf8(bytes).map_err(|e| CsvCodecError::InvalidRecord(e.to_string()))
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(b',', Some(b'"'))
    }
}

fn strip_terminator(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .or_else(|| line.strip_suffix('\r'))
        .unwrap_or(line)
}
