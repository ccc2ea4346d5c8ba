//! `ValCurs` document parsing.
//!
//! The daily feed is a small XML document: a `ValCurs` root carrying a
//! `Date` attribute and repeated `Valute` children. Decoding is structural
//! only; entry-level values stay as text for the transformers.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{CbrError, Result};
use crate::models::{ParsedFeed, RawEntry};

/// Feed date format, e.g. `11.06.2022`.
const FEED_DATE_FORMAT: &str = "%d.%m.%Y";

#[derive(Debug, Deserialize)]
struct ValCurs {
    #[serde(rename = "@Date")]
    date: Option<String>,

    #[serde(rename = "Valute", default)]
    valutes: Vec<RawEntry>,
}

/// Parse one feed document into the (date, entries) pair every downstream
/// transform consumes.
///
/// An undecodable document, a missing `Date` attribute, or an empty
/// `Valute` list all fail as [`CbrError::FeedStructure`]; a `Date` that is
/// present but malformed fails as a parse error.
pub fn parse(document: &str) -> Result<ParsedFeed> {
    let val_curs: ValCurs =
        quick_xml::de::from_str(document).map_err(|_| CbrError::FeedStructure)?;

    let date = val_curs.date.ok_or(CbrError::FeedStructure)?;
    if val_curs.valutes.is_empty() {
        return Err(CbrError::FeedStructure);
    }

    let date = NaiveDate::parse_from_str(&date, FEED_DATE_FORMAT)
        .map_err(|e| CbrError::Parse(format!("bad feed date {:?}: {}", date, e)))?;

    Ok(ParsedFeed {
        date,
        entries: val_curs.valutes,
    })
}
