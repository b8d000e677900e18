//! Monthly loan quota rules.
//!
//! A loan request is filed for a calendar month. The cooperative caps the
//! number of requests per month; this crate resolves which month a request
//! targets, derives the stored date fields from a submission, counts what is
//! already on file and decides whether another request fits.

pub mod counter;
pub mod error;
pub mod period;
pub mod policy;
pub mod submission;

pub use counter::{check_quota, count_loans};
pub use error::{QuotaError, Result};
pub use period::LoanPeriod;
pub use policy::{QuotaDecision, QuotaPolicy, QuotaScope, DEFAULT_MONTHLY_LIMIT};
pub use submission::SubmissionDate;
