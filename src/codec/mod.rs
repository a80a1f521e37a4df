//! Import and export codecs
//!
//! Every entity list can be written to and read from JSON or CSV. The
//! encoders live in [`json`] and [`csv`]; [`export`] and [`import`] select
//! one by [`Format`] and wire file I/O, validation and persistence around
//! them.

pub mod csv;
pub mod export;
pub mod import;
pub mod json;

use std::fmt;

use std::str::FromStr;

use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use export::{export_accounts, export_categories, export_entities, export_operations, write_export};
pub use import::{read_source, ImportMode, ImportOptions, ImportReport, ImportService};

/// Serialization format for import and export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Csv,
}

impl Format {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Which entity list an import or export works on
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityKind {
    Accounts,
    Categories,
    Operations,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accounts => write!(f, "accounts"),
            Self::Categories => write!(f, "categories"),
            Self::Operations => write!(f, "operations"),
        }
    }
}

/// Column order of an operations CSV file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvOperationLayout {
    /// Decide from the header row
    #[default]
    Auto,
    /// `id,type,bankAccountId,amount,date,description,categoryId`
    Canonical,
    /// `id,type,bankAccountId,amount,date,categoryId,description`
    Legacy,
}

/// A record that was left out of an import, with where and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    /// CSV line number, or 1-based element index for JSON
    pub line: usize,
    pub reason: String,
}

impl SkippedRecord {
    pub fn new(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SkippedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record {}: {}", self.line, self.reason)
    }
}

/// Decoded records plus the diagnostics for the ones that were dropped
#[derive(Debug, Clone)]
pub struct Parsed<E> {
    pub records: Vec<E>,
    pub skipped: Vec<SkippedRecord>,
}

impl<E> Default for Parsed<E> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Parse imported decimal text without losing digits
///
/// Plain and scientific notation are accepted. A value with more significant
/// digits than a [`Decimal`] can hold is rejected instead of rounded.
pub(crate) fn parse_decimal_exact(text: &str) -> Result<Decimal, String> {
    let text = text.trim();
    let (value, mantissa) = match text.find(['e', 'E']) {
        Some(pos) => {
            let value = Decimal::from_scientific(text)
                .map_err(|_| format!("invalid decimal '{}'", text))?;
            (value, &text[..pos])
        }
        None => {
            let value =
                Decimal::from_str(text).map_err(|_| format!("invalid decimal '{}'", text))?;
            (value, text)
        }
    };

    if significant_digits(mantissa) != significant_digits(&value.to_string()) {
        return Err(format!("decimal '{}' exceeds supported precision", text));
    }
    Ok(value)
}

fn significant_digits(text: &str) -> String {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.trim_matches('0').to_string()
}
