// ABOUTME: Consumption ledger models (entries grouped into per-date buckets)
// ABOUTME: Wire shape matches the foodConsumes document with string decimals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

use super::lenient;
use crate::constants::ledger::DATE_FORMAT;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Calendar date of a ledger bucket, rendered as zero-padded `MM/DD/YYYY`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LedgerDate(NaiveDate);

impl LedgerDate {
    /// Wrap a calendar date
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Underlying calendar date
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for LedgerDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for LedgerDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for LedgerDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map(Self)
    }
}

impl Serialize for LedgerDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LedgerDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid ledger date {raw:?}: {e}")))
    }
}

/// One logged food with its amount
///
/// Numeric fields are kept as decimal strings, the shape the ledger has
/// always been stored in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionEntry {
    /// `usda` or `OFD`
    pub source: String,
    /// fdcId for USDA entries, barcode otherwise
    #[serde(deserialize_with = "lenient::string_or_number")]
    pub id: String,
    /// Product name
    pub title: String,
    /// Energy per 100 g (kcal)
    #[serde(deserialize_with = "lenient::string_or_number")]
    pub kcal_per_100g: String,
    /// Amount eaten in grams
    #[serde(deserialize_with = "lenient::string_or_number")]
    pub grams: String,
}

impl ConsumptionEntry {
    /// Energy of this entry: `kcal_per_100g * grams / 100`
    ///
    /// Unparseable fields count as zero.
    #[must_use]
    pub fn calories(&self) -> f64 {
        parse_decimal_lossy(&self.kcal_per_100g) * parse_decimal_lossy(&self.grams) / 100.0
    }
}

/// All entries logged on one calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyConsumptionBucket {
    /// Bucket date
    pub date: LedgerDate,
    /// Entries in insertion order
    #[serde(default)]
    pub consumes: Vec<ConsumptionEntry>,
}

impl DailyConsumptionBucket {
    /// Create a bucket holding a single entry
    #[must_use]
    pub fn new(date: LedgerDate, entry: ConsumptionEntry) -> Self {
        Self {
            date,
            consumes: vec![entry],
        }
    }
}

/// Parse the longest leading decimal number of `raw`, or 0 when there is none
///
/// `"150g"` parses as 150, `" 2.5e1kcal"` as 25, `"abc"` as 0.
#[must_use]
pub fn parse_decimal_lossy(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
