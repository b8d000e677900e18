use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use chrono::Local;
use quota::{check_quota, LoanPeriod, SubmissionDate};
use rust_decimal::Decimal;
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tower_sessions::Session;
use tracing::{debug, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::AppError;
use crate::extract::{text_or_number, FormOrJson};
use crate::gateway::{self, NewLoan};
use crate::schemas::{AppState, ErrorResponse, PageResponse};
use crate::session;
use crate::views::{LoanContext, PageView, VIEW_LANDING, VIEW_LOAN};

/// Period selection for the loan page
#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PeriodQuery {
    /// Year to check, defaults to the current year
    #[serde(rename = "DateYear")]
    pub date_year: Option<String>,
    /// Month to check (1-12), defaults to the current month
    #[serde(rename = "DateMonth")]
    pub date_month: Option<String>,
}

/// Loan submission, as a form or JSON. Every field is required; JSON
/// clients may send the numeric fields as numbers.
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct LoanForm {
    /// Owning user id
    #[serde(default, deserialize_with = "text_or_number")]
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(default, deserialize_with = "text_or_number")]
    #[validate(length(min = 1))]
    pub nomor_keanggotaan: String,
    #[serde(default, deserialize_with = "text_or_number")]
    #[validate(length(min = 1))]
    pub nama: String,
    #[serde(default, deserialize_with = "text_or_number")]
    #[validate(length(min = 1))]
    pub divisi: String,
    /// Requested amount
    #[serde(default, deserialize_with = "text_or_number")]
    #[validate(length(min = 1))]
    pub pinjaman: String,
    /// Number of installments
    #[serde(default, deserialize_with = "text_or_number")]
    #[validate(length(min = 1))]
    pub cicilan: String,
    /// Amount per installment
    #[serde(default, deserialize_with = "text_or_number")]
    #[validate(length(min = 1))]
    pub cicilan_perbulan: String,
    /// Loan date, `YYYY-MM-DD`
    #[serde(default, deserialize_with = "text_or_number")]
    #[validate(length(min = 1))]
    pub tanggal: String,
}

impl LoanForm {
    fn trimmed(self) -> Self {
        Self {
            id: self.id.trim().to_string(),
            nomor_keanggotaan: self.nomor_keanggotaan.trim().to_string(),
            nama: self.nama.trim().to_string(),
            divisi: self.divisi.trim().to_string(),
            pinjaman: self.pinjaman.trim().to_string(),
            cicilan: self.cicilan.trim().to_string(),
            cicilan_perbulan: self.cicilan_perbulan.trim().to_string(),
            tanggal: self.tanggal.trim().to_string(),
        }
    }

    /// Check completeness, parse the numbers and derive the date fields.
    fn into_new_loan(self) -> Result<(NewLoan, SubmissionDate), AppError> {
        let form = self.trimmed();
        form.validate()?;

        let user_id = form
            .id
            .parse::<i32>()
            .map_err(|_| AppError::IncompleteData(format!("id '{}' is not a number", form.id)))?;
        let pinjaman = parse_amount("pinjaman", &form.pinjaman)?;
        let cicilan_perbulan = parse_amount("cicilan_perbulan", &form.cicilan_perbulan)?;
        let cicilan = form
            .cicilan
            .parse::<i32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                AppError::IncompleteData(format!(
                    "cicilan '{}' is not a positive whole number",
                    form.cicilan
                ))
            })?;

        let date = SubmissionDate::parse(&form.tanggal)?;

        let new_loan = NewLoan {
            user_id,
            nomor_keanggotaan: form.nomor_keanggotaan,
            nama: form.nama,
            divisi: form.divisi,
            pinjaman,
            cicilan,
            cicilan_perbulan,
            tanggal: date.full_date(),
            date_month: date.month_label(),
            date_year: date.year(),
        };
        Ok((new_loan, date))
    }
}

fn parse_amount(field: &str, raw: &str) -> Result<Decimal, AppError> {
    Decimal::from_str(raw)
        .ok()
        .filter(|amount| amount.is_sign_positive() && !amount.is_zero())
        .ok_or_else(|| {
            AppError::IncompleteData(format!("{} '{}' is not a positive amount", field, raw))
        })
}

/// Loan request page, gated by the monthly quota
#[utoipa::path(
    get,
    path = "/peminjaman",
    tag = "loans",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Loan view, or the landing view with a limit message when the month is full", body = PageResponse),
        (status = 303, description = "Not logged in, redirect to /login"),
        (status = 400, description = "Invalid DateYear or DateMonth", body = ErrorResponse),
        (status = 404, description = "Session user no longer exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, session))]
pub async fn loan_page(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PeriodQuery>,
) -> Result<Response, AppError> {
    trace!("Entering loan_page function");

    let Some(user_id) = session::current_user_id(&session).await? else {
        debug!("No session, redirecting to login");
        return Ok(Redirect::to("/login").into_response());
    };

    let period = LoanPeriod::resolve(
        query.date_year.as_deref(),
        query.date_month.as_deref(),
        Local::now().date_naive(),
    )?;

    let user = gateway::require_user(&state.db, user_id).await?;

    let policy = &state.settings.quota;
    let decision = check_quota(&state.db, policy, period, user.id).await?;
    let context = LoanContext::from_decision(&decision, policy.limit);

    let page = match decision.limit_message() {
        Some(message) => {
            info!("Loan quota reached for {} ({} requests)", period, decision.count());
            PageView::new(VIEW_LANDING)
                .with_user(user)
                .with_message(message)
                .with_loan(context)
        }
        None => {
            debug!("Loan quota open for {}: {} remaining", period, context.remaining);
            PageView::new(VIEW_LOAN).with_user(user).with_loan(context)
        }
    };

    Ok(page.render().into_response())
}

/// Store a loan request
///
/// The quota shown on the loan page is not re-checked here unless
/// `enforce_quota_on_submit` is set.
#[utoipa::path(
    post,
    path = "/peminjaman",
    tag = "loans",
    request_body(content = LoanForm, description = "Also accepted as application/json", content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Stored, redirect to /landing?success=true"),
        (status = 400, description = "Incomplete form or invalid date", body = ErrorResponse),
        (status = 409, description = "Month is full (only with enforce_quota_on_submit)", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn submit_loan(
    State(state): State<AppState>,
    FormOrJson(form): FormOrJson<LoanForm>,
) -> Result<Redirect, AppError> {
    trace!("Entering submit_loan function");

    let (new_loan, date) = form.into_new_loan()?;
    debug!(
        "Loan request from user {} dated {}",
        new_loan.user_id, new_loan.tanggal
    );

    let stored = if state.settings.enforce_quota_on_submit {
        let policy = &state.settings.quota;
        let txn = state.db.begin().await?;

        let decision = check_quota(&txn, policy, date.period(), new_loan.user_id).await?;
        if !decision.is_allowed() {
            txn.rollback().await?;
            let message = decision.limit_message().unwrap_or_default();
            warn!("Rejected loan for {}: {}", date.period(), message);
            return Err(AppError::QuotaExceeded(message));
        }

        let stored = gateway::insert_loan(&txn, new_loan).await?;
        txn.commit().await?;
        stored
    } else {
        gateway::insert_loan(&state.db, new_loan).await?
    };

    info!(
        "Loan {} stored for user {} ({}-{})",
        stored.id, stored.user_id, stored.date_year, stored.date_month
    );

    Ok(Redirect::to("/landing?success=true"))
}
