//! Date keys for the sparse price series.
//!
//! Observations are keyed at two granularities: a full calendar date
//! (`YYYY-MM-DD`) or a month bucket (`YYYY-MM`). A month bucket orders before
//! every full date of the same month, so an ascending scan visits keys in
//! chronological order without relying on string comparison.

use anyhow::{Result, anyhow, bail};
use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateKey {
    /// Month granularity, e.g. `2018-02`.
    MonthBucket { year: i32, month: u32 },
    /// Day granularity, e.g. `2017-12-08`.
    FullDate(NaiveDate),
}

impl DateKey {
    pub fn year(&self) -> i32 {
        match self {
            DateKey::MonthBucket { year, .. } => *year,
            DateKey::FullDate(d) => d.year(),
        }
    }

    pub fn month(&self) -> u32 {
        match self {
            DateKey::MonthBucket { month, .. } => *month,
            DateKey::FullDate(d) => d.month(),
        }
    }

    /// Truncates to month granularity. Month buckets are returned unchanged.
    pub fn month_bucket(&self) -> DateKey {
        DateKey::MonthBucket {
            year: self.year(),
            month: self.month(),
        }
    }

    /// Day-of-month position used when two keys fall in the same month.
    /// A month bucket stands for the first of its month.
    pub fn day_position(&self) -> u32 {
        match self {
            DateKey::MonthBucket { .. } => 1,
            DateKey::FullDate(d) => d.day(),
        }
    }

    /// Whole months from `self` to `other`, calendar-day-insensitive:
    /// the 5th and the 28th of the same month are distance 0 apart.
    pub fn months_until(&self, other: &DateKey) -> i32 {
        (other.year() - self.year()) * 12 + (other.month() as i32 - self.month() as i32)
    }

    /// Calendar date for day-stepped arithmetic; a month bucket maps to the
    /// first of its month. `None` only for a hand-built invalid bucket.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        match self {
            DateKey::MonthBucket { year, month } => NaiveDate::from_ymd_opt(*year, *month, 1),
            DateKey::FullDate(d) => Some(*d),
        }
    }

    fn sort_key(&self) -> (i32, u32, u32) {
        match self {
            DateKey::MonthBucket { year, month } => (*year, *month, 0),
            DateKey::FullDate(d) => (d.year(), d.month(), d.day()),
        }
    }
}

impl Ord for DateKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for DateKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateKey::MonthBucket { year, month } => write!(f, "{year:04}-{month:02}"),
            DateKey::FullDate(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// Checks that a string is exactly `digits` ASCII digits.
fn all_digits(s: &str, digits: usize) -> bool {
    s.len() == digits && s.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for DateKey {
    type Err = anyhow::Error;

    /// Accepts exactly `YYYY-MM-DD` or `YYYY-MM`, zero-padded. Anything else
    /// is rejected before any lookup happens.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        match parts.as_slice() {
            [year, month] if all_digits(year, 4) && all_digits(month, 2) => {
                let year: i32 = year.parse()?;
                let month: u32 = month.parse()?;
                if !(1..=12).contains(&month) {
                    bail!("Invalid month in date '{}'", s);
                }
                Ok(DateKey::MonthBucket { year, month })
            }
            [year, month, day]
                if all_digits(year, 4) && all_digits(month, 2) && all_digits(day, 2) =>
            {
                let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|e| anyhow!("Invalid date '{}': {}", s, e))?;
                Ok(DateKey::FullDate(date))
            }
            _ => Err(anyhow!(
                "Invalid date '{}': expected YYYY-MM-DD or YYYY-MM",
                s
            )),
        }
    }
}
