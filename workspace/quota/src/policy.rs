use std::fmt;
use std::str::FromStr;

use crate::period::LoanPeriod;

/// Requests allowed per month unless configured otherwise.
pub const DEFAULT_MONTHLY_LIMIT: u64 = 3;

/// Which loan records count towards the monthly limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuotaScope {
    /// Every record in the month, whoever filed it.
    #[default]
    Global,
    /// Only the requesting member's records.
    PerMember,
}

impl FromStr for QuotaScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "per-member" | "per_member" | "member" => Ok(Self::PerMember),
            other => Err(format!(
                "unknown quota scope '{}', expected 'global' or 'per-member'",
                other
            )),
        }
    }
}

impl fmt::Display for QuotaScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::PerMember => f.write_str("per-member"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaPolicy {
    pub limit: u64,
    pub scope: QuotaScope,
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self {
            limit: DEFAULT_MONTHLY_LIMIT,
            scope: QuotaScope::Global,
        }
    }
}

/// Outcome of checking a period against the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaDecision {
    Allowed {
        period: LoanPeriod,
        count: u64,
        remaining: u64,
    },
    Blocked {
        period: LoanPeriod,
        count: u64,
        limit: u64,
    },
}

impl QuotaPolicy {
    pub fn new(limit: u64, scope: QuotaScope) -> Self {
        Self { limit, scope }
    }

    /// Blocked once `count` has reached the limit.
    pub fn decide(&self, period: LoanPeriod, count: u64) -> QuotaDecision {
        if count >= self.limit {
            QuotaDecision::Blocked {
                period,
                count,
                limit: self.limit,
            }
        } else {
            QuotaDecision::Allowed {
                period,
                count,
                remaining: self.limit - count,
            }
        }
    }
}

impl QuotaDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    pub fn period(&self) -> LoanPeriod {
        match self {
            Self::Allowed { period, .. } | Self::Blocked { period, .. } => *period,
        }
    }

    pub fn count(&self) -> u64 {
        match self {
            Self::Allowed { count, .. } | Self::Blocked { count, .. } => *count,
        }
    }

    /// Message shown on the dashboard when the month is full.
    pub fn limit_message(&self) -> Option<String> {
        match self {
            Self::Allowed { .. } => None,
            Self::Blocked { period, limit, .. } => Some(format!(
                "Loan requests for month {} of year {} have reached the maximum limit ({} requests).",
                period.month, period.year, limit
            )),
        }
    }
}
