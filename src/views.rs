//! View payloads.
//!
//! Pages are answered as JSON: the view name plus the data its template
//! needs. Rendering HTML from these is left to the front end.

use axum::response::Json;
use model::entities::user;
use quota::QuotaDecision;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::schemas::ApiResponse;

pub const VIEW_INDEX: &str = "index";
pub const VIEW_LOGIN: &str = "login";
pub const VIEW_REGISTER: &str = "daftar";
pub const VIEW_LANDING: &str = "landing";
pub const VIEW_PROFILE: &str = "profil";
pub const VIEW_LOAN: &str = "peminjaman";

/// Public member data. Never carries the password.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MemberProfile {
    pub id: i32,
    pub nomor_keanggotaan: String,
    pub nama: String,
    pub divisi: String,
    /// Public path of the member photo
    pub foto: String,
}

impl From<user::Model> for MemberProfile {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            nomor_keanggotaan: model.nomor_keanggotaan,
            nama: model.nama,
            divisi: model.divisi,
            foto: model.foto,
        }
    }
}

/// Quota state for the month shown on the loan form.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LoanContext {
    pub year: i32,
    pub month: u32,
    /// Month as stored with loan records, e.g. `"01"`
    pub date_month: String,
    /// Requests already on file for the month
    pub count: u64,
    pub limit: u64,
    pub remaining: u64,
}

impl LoanContext {
    pub fn from_decision(decision: &QuotaDecision, limit: u64) -> Self {
        let period = decision.period();
        let count = decision.count();
        Self {
            year: period.year,
            month: period.month,
            date_month: period.month_label(),
            count,
            limit,
            remaining: limit.saturating_sub(count),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PageView {
    /// Template name
    pub view: String,
    pub user: Option<MemberProfile>,
    /// Notice shown on the page, e.g. the quota limit message
    pub message: Option<String>,
    pub loan: Option<LoanContext>,
}

impl PageView {
    pub fn new(view: &str) -> Self {
        Self {
            view: view.to_string(),
            user: None,
            message: None,
            loan: None,
        }
    }

    pub fn with_user(mut self, user: user::Model) -> Self {
        self.user = Some(MemberProfile::from(user));
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_loan(mut self, loan: LoanContext) -> Self {
        self.loan = Some(loan);
        self
    }

    pub fn render(self) -> Json<ApiResponse<PageView>> {
        let message = format!("Rendered {} view", self.view);
        Json(ApiResponse {
            data: self,
            message,
            success: true,
        })
    }
}
