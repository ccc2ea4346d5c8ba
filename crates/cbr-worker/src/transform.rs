//! Entry-to-row transforms.
//!
//! Two variants share the parsed feed: quotes keep every entry in document
//! order (the time-series table is append-only), currencies collapse
//! duplicate ids to the last occurrence before numeric conversion.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::{CbrError, Result};
use crate::models::{CurrencyRow, QuoteRow, RawEntry};

/// Map entries to quote rows, one per entry, preserving input order.
///
/// The feed formats decimals with a comma; a value that still fails to
/// parse after substitution aborts the cycle.
pub fn quote_rows(date: NaiveDate, entries: &[RawEntry]) -> Result<Vec<QuoteRow>> {
    entries
        .iter()
        .map(|entry| {
            let value: f64 = entry.value.replace(',', ".").parse().map_err(|e| {
                CbrError::Parse(format!(
                    "bad quote value {:?} for {}: {}",
                    entry.value, entry.id, e
                ))
            })?;

            Ok(QuoteRow {
                currency: entry.id.clone(),
                date,
                value,
            })
        })
        .collect()
}

/// Map entries to currency rows, deduplicated by id.
///
/// When an id repeats within one document the last occurrence wins, but the
/// row keeps the position of the id's first appearance. Numeric conversion
/// runs after deduplication, so only surviving entries can fail it.
pub fn currency_rows(entries: &[RawEntry]) -> Result<Vec<CurrencyRow>> {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut survivors: Vec<&RawEntry> = Vec::new();

    for entry in entries {
        match position.get(entry.id.as_str()) {
            Some(&index) => survivors[index] = entry,
            None => {
                position.insert(entry.id.as_str(), survivors.len());
                survivors.push(entry);
            },
        }
    }

    survivors
        .into_iter()
        .map(|entry| {
            let nominal: i32 = entry.nominal.parse().map_err(|e| {
                CbrError::Parse(format!(
                    "bad nominal {:?} for {}: {}",
                    entry.nominal, entry.id, e
                ))
            })?;

            Ok(CurrencyRow {
                id: entry.id.clone(),
                name_rus: entry.name.clone(),
                code: entry.char_code.clone(),
                nominal,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, code: &str, nominal: &str, name: &str, value: &str) -> RawEntry {
        RawEntry {
            id: id.to_string(),
            num_code: String::new(),
            char_code: code.to_string(),
            nominal: nominal.to_string(),
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 6, 11).unwrap()
    }

    #[test]
    fn test_quote_rows_convert_decimal_commas() {
        let entries = vec![
            entry("R01010", "AUD", "1", "Австралийский доллар", "41,1437"),
            entry("R01020A", "AZN", "1", "Азербайджанский манат", "33,9871"),
        ];

        let rows = quote_rows(sample_date(), &entries).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].currency, "R01010");
        assert_eq!(rows[0].value, 41.1437);
        assert_eq!(rows[1].value, 33.9871);
        assert!(rows.iter().all(|r| r.date == sample_date()));
    }

    #[test]
    fn test_quote_rows_keep_duplicates_in_order() {
        let entries = vec![
            entry("R01010", "AUD", "1", "a", "1,0"),
            entry("R01235", "USD", "1", "b", "2,0"),
            entry("R01010", "AUD", "1", "a", "3,0"),
        ];

        let rows = quote_rows(sample_date(), &entries).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].currency, "R01010");
        assert_eq!(rows[1].currency, "R01235");
        assert_eq!(rows[2].currency, "R01010");
        assert_eq!(rows[2].value, 3.0);
    }

    #[test]
    fn test_quote_rows_fail_on_bad_value() {
        let entries = vec![entry("R01010", "AUD", "1", "a", "not-a-number")];

        assert!(matches!(
            quote_rows(sample_date(), &entries),
            Err(CbrError::Parse(_))
        ));
    }

    #[test]
    fn test_currency_rows_dedup_keeps_last_occurrence_at_first_position() {
        let entries = vec![
            entry("R01010", "AUD", "1", "old name", "1,0"),
            entry("R01235", "USD", "1", "dollar", "2,0"),
            entry("R01010", "AUD", "100", "new name", "3,0"),
        ];

        let rows = currency_rows(&entries).unwrap();

        assert_eq!(rows.len(), 2);
        // Position of first appearance, fields of the last occurrence.
        assert_eq!(rows[0].id, "R01010");
        assert_eq!(rows[0].name_rus, "new name");
        assert_eq!(rows[0].nominal, 100);
        assert_eq!(rows[1].id, "R01235");
    }

    #[test]
    fn test_currency_rows_fail_on_bad_nominal() {
        let entries = vec![entry("R01010", "AUD", "one", "a", "1,0")];

        assert!(matches!(currency_rows(&entries), Err(CbrError::Parse(_))));
    }

    #[test]
    fn test_currency_rows_ignore_bad_nominal_on_superseded_duplicate() {
        // Conversion runs after dedup: an unparsable nominal on an entry
        // that a later duplicate replaces never gets converted.
        let entries = vec![
            entry("R01010", "AUD", "garbage", "a", "1,0"),
            entry("R01010", "AUD", "1", "a", "1,0"),
        ];

        let rows = currency_rows(&entries).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].nominal, 1);
    }
}
