//! Per-field type coercion.
//!
//! A [`ConversionMap`] associates field names with a [`TypeTag`]. Values of
//! fields without an entry, and values that fail to parse, stay strings.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::CsvCodecError;
use crate::record::Value;

/// Target type of a field conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    /// Base-10 signed 64-bit integer.
    Integer,
    /// Decimal floating point number.
    Float,
    /// `true`/`false` and their common spellings, case-insensitive.
    Boolean,
    /// No conversion.
    String,
}

impl TypeTag {
    /// The configuration spelling of this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Integer => "integer",
            TypeTag::Float => "float",
            TypeTag::Boolean => "boolean",
            TypeTag::String => "string",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = CsvCodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "integer" => Ok(TypeTag::Integer),
            "float" => Ok(TypeTag::Float),
            "boolean" => Ok(TypeTag::Boolean),
            "string" => Ok(TypeTag::String),
            other => Err(CsvCodecError::InvalidConfig(format!(
                "unknown conversion type '{}': expected integer, float, boolean or string",
                other
            ))),
        }
    }
}

const TRUE_LITERALS: [&str; 5] = ["true", "t", "yes", "y", "1"];
const FALSE_LITERALS: [&str; 5] = ["false", "f", "no", "n", "0"];

/// Field name to target type associations. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionMap {
    targets: HashMap<String, TypeTag>,
}

impl ConversionMap {
    pub fn new<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, TypeTag)>,
        K: Into<String>,
    {
        Self {
            targets: entries.into_iter().map(|(k, t)| (k.into(), t)).collect(),
        }
    }

    /// The target type configured for `name`.
    pub fn target(&self, name: &str) -> Option<TypeTag> {
        self.targets.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Converts `raw` according to the entry for `name`.
    ///
    /// Fields without an entry come back as [`Value::String`]. A parse
    /// failure is reported as [`CsvCodecError::Conversion`]; the decoder
    /// recovers from it by keeping the raw string.
    pub fn convert(&self, name: &str, raw: &str) -> Result<Value, CsvCodecError> {
        match self.target(name) {
            None | Some(TypeTag::String) => Ok(Value::String(raw.to_string())),
            Some(target) => {
                coerce(raw, target).ok_or_else(|| CsvCodecError::Conversion {
                    field: name.to_string(),
                    value: raw.to_string(),
                    target: target.to_string(),
                })
            }
        }
    }
}

/// Parses `raw` as `target`. Surrounding whitespace is ignored.
fn coerce(raw: &str, target: TypeTag) -> Option<Value> {
    let trimmed = raw.trim();
    match target {
        TypeTag::Integer => trimmed.parse::<i64>().ok().map(Value::Integer),
        TypeTag::Float => trimmed
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite())
            .map(Value::Float),
        TypeTag::Boolean => parse_boolean(trimmed).map(Value::Boolean),
        TypeTag::String => Some(Value::String(raw.to_string())),
    }
}

fn parse_boolean(s: &str) -> Option<bool> {
    let lower = s.to_ascii_lowercase();
    if TRUE_LITERALS.contains(&lower.as_str()) {
        Some(true)
    } else if FALSE_LITERALS.contains(&lower.as_str()) {
        Some(false)
    } else {
        None
    }
}
