use model::entities::loan;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};
use tracing::{debug, instrument, trace};

use crate::error::Result;
use crate::period::LoanPeriod;
use crate::policy::{QuotaDecision, QuotaPolicy, QuotaScope};

/// Count loan records filed for `period`.
///
/// With [`QuotaScope::Global`] every member's records count; with
/// [`QuotaScope::PerMember`] only those owned by `user_id`. Generic over the
/// connection so the count can run inside a transaction.
#[instrument(skip(db))]
pub async fn count_loans<C>(
    db: &C,
    period: LoanPeriod,
    scope: QuotaScope,
    user_id: i32,
) -> Result<u64>
where
    C: ConnectionTrait,
{
    trace!("Counting loans for {} ({})", period, scope);

    let mut query = loan::Entity::find()
        .filter(loan::Column::DateYear.eq(period.year))
        .filter(loan::Column::DateMonth.eq(period.month_label()));

    if scope == QuotaScope::PerMember {
        query = query.filter(loan::Column::UserId.eq(user_id));
    }

    let count = query.count(db).await?;
    debug!("Found {} loans for {} ({})", count, period, scope);
    Ok(count)
}

/// Count the period and apply the policy.
pub async fn check_quota<C>(
    db: &C,
    policy: &QuotaPolicy,
    period: LoanPeriod,
    user_id: i32,
) -> Result<QuotaDecision>
where
    C: ConnectionTrait,
{
    let count = count_loans(db, period, policy.scope, user_id).await?;
    Ok(policy.decide(period, count))
}
