//! CLI argument parsing module
//!
//! Handles command-line argument parsing using `clap` derive macros.
//! Options given on the command line override the ones loaded from
//! `--config`; boolean switches can only turn an option on.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::codec::TypeTag;
use crate::config::CodecConfig;
use crate::error::CsvCodecError;

/// Direction of the conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Read CSV lines, write JSON-lines records
    Decode,
    /// Read JSON-lines records, write CSV lines
    Encode,
}

/// Command-line arguments for the CSV codec.
///
/// # Example
///
/// ```rust,ignore
/// use clap::Parser;
/// use csv_codec::cli::Args;
///
/// let args = Args::parse();
/// args.validate()?;
/// let config = args.to_config()?;
/// ```
#[derive(Parser, Debug)]
#[command(name = "csv-codec")]
#[command(about = "Decode CSV lines into records and encode records back into CSV lines")]
#[command(version)]
pub struct Args {
    /// Operation mode: decode or encode
    #[arg(long, value_enum)]
    pub mode: Mode,

    /// JSON file with codec options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Field separator (one ASCII character)
    #[arg(long)]
    pub separator: Option<String>,

    /// Quote character (one ASCII character)
    #[arg(long)]
    pub quote_char: Option<String>,

    /// Disable quote interpretation
    #[arg(long, default_value = "false")]
    pub no_quote: bool,

    /// Comma-separated column names
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Name unnamed fields column1, column2, ... (true or false)
    #[arg(long)]
    pub autogenerate_column_names: Option<bool>,

    /// Omit fields with empty values
    #[arg(long, default_value = "false")]
    pub skip_empty_columns: bool,

    /// Capture the first decoded line as a header; write a header before the first encoded line
    #[arg(long, default_value = "false")]
    pub include_headers: bool,

    /// Capture the first decoded line as a header
    #[arg(long, default_value = "false")]
    pub autodetect_column_names: bool,

    /// Field conversion as NAME:TYPE, TYPE one of integer, float, boolean, string
    /// (can be specified multiple times)
    #[arg(long = "convert")]
    pub convert: Vec<String>,

    /// Character encoding of the input (decode mode)
    #[arg(long)]
    pub charset: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print codec statistics to stderr when done
    #[arg(long, default_value = "false")]
    pub stats: bool,

    /// Log debug diagnostics to stderr
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Input files (default: stdin). The decoder's header is reset between files.
    pub inputs: Vec<PathBuf>,
}

impl Args {
    /// Validate argument combinations.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the argument combination is valid
    /// - `Err(String)` with a descriptive error message if validation fails
    pub fn validate(&self) -> Result<(), String> {
        if self.no_quote && self.quote_char.is_some() {
            return Err("--no-quote cannot be used with --quote-char".to_string());
        }

        for entry in &self.convert {
            parse_conversion(entry).map_err(|e| e.to_string())?;
        }

        if self.mode == Mode::Encode && self.charset.is_some() {
            return Err("--charset only applies to decode mode".to_string());
        }

        Ok(())
    }

    /// Builds the codec configuration: `--config` file (or defaults) with
    /// command-line overrides applied.
    pub fn to_config(&self) -> Result<CodecConfig, CsvCodecError> {
        let mut config = match &self.config {
            Some(path) => CodecConfig::from_json_file(path)?,
            None => CodecConfig::default(),
        };

        if let Some(separator) = &self.separator {
            config.separator = separator.clone();
        }
        if let Some(quote) = &self.quote_char {
            config.quote_char = Some(quote.clone());
        }
        if self.no_quote {
            config.quote_char = None;
        }
        if !self.columns.is_empty() {
            config.columns = self.columns.clone();
        }
        if let Some(autogenerate) = self.autogenerate_column_names {
            config.autogenerate_column_names = autogenerate;
        }
        config.skip_empty_columns |= self.skip_empty_columns;
        config.include_headers |= self.include_headers;
        config.autodetect_column_names |= self.autodetect_column_names;
        for entry in &self.convert {
            let (name, tag) = parse_conversion(entry)?;
            config.convert.insert(name, tag);
        }
        if let Some(charset) = &self.charset {
            config.charset = charset.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Parses a `NAME:TYPE` conversion argument.
fn parse_conversion(entry: &str) -> Result<(String, TypeTag), CsvCodecError> {
    let (name, tag) = entry.rsplit_once(':').ok_or_else(|| {
        CsvCodecError::InvalidConfig(format!(
            "conversion '{}' must have the form NAME:TYPE",
            entry
        ))
    })?;
    if name.is_empty() {
        return Err(CsvCodecError::InvalidConfig(format!(
            "conversion '{}' has an empty field name",
            entry
        )));
    }
    Ok((name.to_string(), tag.parse()?))
}
