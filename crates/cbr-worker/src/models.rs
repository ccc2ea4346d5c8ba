//! Feed and row shapes for one receive cycle.
//!
//! Everything here is created fresh each cycle and dropped after the writes
//! land; only the persisted rows outlive a cycle.

use chrono::NaiveDate;
use serde::Deserialize;

/// One `Valute` element, exactly as the feed carries it.
///
/// Numeric fields stay as text until the transformers convert them; a
/// missing attribute or child element decodes to the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawEntry {
    #[serde(rename = "@ID", default)]
    pub id: String,

    #[serde(rename = "NumCode", default)]
    pub num_code: String,

    #[serde(rename = "CharCode", default)]
    pub char_code: String,

    #[serde(rename = "Nominal", default)]
    pub nominal: String,

    #[serde(rename = "Name", default)]
    pub name: String,

    #[serde(rename = "Value", default)]
    pub value: String,
}

/// Decoded feed for one cycle: the effective date plus the entries in
/// document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFeed {
    pub date: NaiveDate,
    pub entries: Vec<RawEntry>,
}

/// One observation for the append-only quotes table.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRow {
    pub currency: String,
    pub date: NaiveDate,
    pub value: f64,
}

/// Latest known attributes of one currency, keyed by the feed id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyRow {
    pub id: String,
    pub name_rus: String,
    pub code: String,
    pub nominal: i32,
}
