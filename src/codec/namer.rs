//! Column name resolution.

use std::borrow::Cow;

/// Prefix of auto-generated column names (`column1`, `column2`, ...).
pub const AUTOGENERATED_PREFIX: &str = "column";

/// Resolves the name of the field at a given column index.
///
/// Resolution order:
/// 1. the captured header, if one is active and covers `index`
/// 2. the configured column list
/// 3. `column<index+1>` when auto-generation is enabled
///
/// `None` means the field is dropped from the record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnNamer {
    configured: Vec<String>,
    autogenerate: bool,
}

impl ColumnNamer {
    pub fn new(configured: Vec<String>, autogenerate: bool) -> Self {
        Self {
            configured,
            autogenerate,
        }
    }

    /// The configured column list.
    pub fn configured(&self) -> &[String] {
        &self.configured
    }

    /// Name for the field at `index`, given the active header (if any).
    pub fn name_for<'a>(
        &'a self,
        index: usize,
        header: Option<&'a [String]>,
    ) -> Option<Cow<'a, str>> {
        if let Some(name) = header.and_then(|h| h.get(index)) {
            return Some(Cow::Borrowed(name));
        }
        if let Some(name) = self.configured.get(index) {
            return Some(Cow::Borrowed(name));
        }
        if self.autogenerate {
            return Some(Cow::Owned(format!("{}{}", AUTOGENERATED_PREFIX, index + 1)));
        }
        None
    }
}
