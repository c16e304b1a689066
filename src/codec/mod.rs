//! CSV codec module
//!
//! Decodes delimited text lines into named-field [`Record`]s and encodes
//! records back into lines.
//!
//! # Example
//!
//! ```
//! use csv_codec::codec::CsvCodec;
//! use csv_codec::config::CodecConfig;
//! use csv_codec::record::Value;
//!
//! let config = CodecConfig {
//!     autodetect_column_names: true,
//!     ..Default::default()
//! };
//! let mut codec = CsvCodec::new(&config).unwrap();
//!
//! assert!(codec.decode("size,animal").is_none());
//! let record = codec.decode("big,bird").unwrap();
//! assert_eq!(record.get("animal"), Some(&Value::from("bird")));
//!
//! assert_eq!(codec.encode(&record).unwrap(), vec!["big,bird\n"]);
//! ```

pub mod convert;
pub mod decoder;
pub mod encoder;
pub mod header;
pub mod namer;
pub mod stats;
pub mod tokenizer;

pub use convert::{ConversionMap, TypeTag};
pub use decoder::{Decoder, MESSAGE_FIELD, PARSE_FAILURE_TAG};
pub use encoder::{Encoder, HeaderEmission};
pub use header::HeaderState;
pub use namer::ColumnNamer;
pub use stats::CodecStats;
pub use tokenizer::Tokenizer;

use crate::charset::Charset;
use crate::config::{CodecConfig, CodecSettings};
use crate::error::CsvCodecError;
use crate::record::Record;

/// A configured decoder/encoder pair.
///
/// One instance serves one input or output channel. All operations take
/// `&mut self`, so calls on an instance are serialized by construction.
#[derive(Debug, Clone)]
pub struct CsvCodec {
    charset: Charset,
    decoder: Decoder,
    encoder: Encoder,
}

impl CsvCodec {
    /// Validates `config` and builds a codec from it.
    pub fn new(config: &CodecConfig) -> Result<Self, CsvCodecError> {
        let settings = CodecSettings::from_config(config)?;
        Ok(Self::from_settings(&settings))
    }

    /// Builds a codec from already validated settings.
    pub fn from_settings(settings: &CodecSettings) -> Self {
        Self {
            charset: settings.charset,
            decoder: Decoder::new(settings),
            encoder: Encoder::new(settings),
        }
    }

    /// Decodes one text line. See [`Decoder::decode`].
    pub fn decode(&mut self, line: &str) -> Option<Record> {
        self.decoder.decode(line)
    }

    /// Converts raw bytes with the configured charset, then decodes them.
    pub fn decode_bytes(&mut self, bytes: &[u8]) -> Option<Record> {
        let line = self.charset.convert(bytes);
        self.decoder.decode(&line)
    }

    /// Encodes one record. See [`Encoder::encode`].
    pub fn encode(&mut self, record: &Record) -> Result<Vec<String>, CsvCodecError> {
        self.encoder.encode(record)
    }

    /// Forgets the captured header; the next decoded line defines a new one.
    ///
    /// Has no effect when header capture is disabled, and never affects
    /// encoder header emission.
    pub fn reset(&mut self) {
        self.decoder.reset();
    }

    pub fn header(&self) -> &HeaderState {
        self.decoder.header()
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    pub fn stats(&self) -> CodecStats {
        CodecStats {
            decode: self.decoder.stats(),
            encode: self.encoder.stats(),
        }
    }
}

impl Default for CsvCodec {
    fn default() -> Self {
        Self::from_settings(&CodecSettings::default())
    }
}
