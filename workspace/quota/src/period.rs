use chrono::{Datelike, NaiveDate};
use std::fmt;
use tracing::{debug, instrument};

use crate::error::{QuotaError, Result};

/// A calendar month that loan requests are counted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoanPeriod {
    pub year: i32,
    /// 1-based month.
    pub month: u32,
}

impl LoanPeriod {
    /// Build a period, rejecting months outside `1..=12` and years chrono
    /// cannot represent.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(QuotaError::InvalidPeriod(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(QuotaError::InvalidPeriod(format!(
                "year {} is out of range",
                year
            )));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Resolve the period requested through the `DateYear` / `DateMonth`
    /// query parameters.
    ///
    /// Missing or blank values fall back to the month containing `today`.
    /// Present values must be integers; anything else is an
    /// [`QuotaError::InvalidPeriod`].
    #[instrument(level = "debug")]
    pub fn resolve(year: Option<&str>, month: Option<&str>, today: NaiveDate) -> Result<Self> {
        let current = Self::containing(today);

        let year = match non_blank(year) {
            Some(raw) => raw.parse::<i32>().map_err(|_| {
                QuotaError::InvalidPeriod(format!("DateYear '{}' is not a number", raw))
            })?,
            None => current.year,
        };

        let month = match non_blank(month) {
            Some(raw) => raw.parse::<u32>().map_err(|_| {
                QuotaError::InvalidPeriod(format!("DateMonth '{}' is not a number", raw))
            })?,
            None => current.month,
        };

        let period = Self::new(year, month)?;
        debug!("Resolved loan period {}", period);
        Ok(period)
    }

    /// Month as stored in the `DateMonth` column, zero padded.
    pub fn month_label(&self) -> String {
        format!("{:02}", self.month)
    }
}

impl fmt::Display for LoanPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}
