use chrono::{DateTime, Datelike, NaiveDate};

use crate::error::{QuotaError, Result};
use crate::period::LoanPeriod;

/// Date fields stored with a loan record, derived from the submitted
/// `tanggal` rather than from the server clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionDate {
    date: NaiveDate,
}

impl SubmissionDate {
    /// Parse a submitted date. Accepts `YYYY-MM-DD` (what an HTML date input
    /// sends) or an RFC 3339 timestamp, in which case the calendar date in
    /// the timestamp's own offset is used.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Ok(Self { date });
        }

        DateTime::parse_from_rfc3339(raw)
            .map(|ts| Self {
                date: ts.date_naive(),
            })
            .map_err(|_| QuotaError::InvalidDate(format!("'{}' is not a valid date", raw)))
    }

    /// `dd-mm-yyyy`, the format kept in the `tanggal` column.
    pub fn full_date(&self) -> String {
        self.date.format("%d-%m-%Y").to_string()
    }

    /// Two-digit month, as stored in `DateMonth`.
    pub fn month_label(&self) -> String {
        format!("{:02}", self.date.month())
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// The quota period this submission falls into.
    pub fn period(&self) -> LoanPeriod {
        LoanPeriod::containing(self.date)
    }
}
