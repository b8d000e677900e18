//! Database access used by the handlers.
//!
//! Every query goes through SeaORM and is parameterized. Failures surface as
//! [`AppError::Storage`]; the `DbErr` itself is only logged.

use model::entities::{loan, user};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, instrument, trace, warn};

use crate::error::AppError;

/// Fields of a member about to be registered.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub nomor_keanggotaan: String,
    pub nama: String,
    pub divisi: String,
    pub password_hash: String,
    pub foto: String,
}

/// A validated loan request ready to be stored.
#[derive(Debug, Clone)]
pub struct NewLoan {
    pub user_id: i32,
    pub nomor_keanggotaan: String,
    pub nama: String,
    pub divisi: String,
    pub pinjaman: Decimal,
    pub cicilan: i32,
    pub cicilan_perbulan: Decimal,
    /// `dd-mm-yyyy`
    pub tanggal: String,
    pub date_month: String,
    pub date_year: i32,
}

#[instrument(skip(db))]
pub async fn find_user<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<Option<user::Model>, AppError> {
    trace!("Looking up user {}", user_id);
    Ok(user::Entity::find_by_id(user_id).one(db).await?)
}

/// Look up the session's user. A session pointing at a missing row is
/// unexpected and answered with 404.
pub async fn require_user<C: ConnectionTrait>(db: &C, user_id: i32) -> Result<user::Model, AppError> {
    match find_user(db, user_id).await? {
        Some(user) => Ok(user),
        None => {
            warn!("Session refers to user {} which does not exist", user_id);
            Err(AppError::UserNotFound(user_id))
        }
    }
}

/// Members registered under `nama`, oldest first. Names are not unique.
#[instrument(skip(db))]
pub async fn find_users_by_name<C: ConnectionTrait>(
    db: &C,
    nama: &str,
) -> Result<Vec<user::Model>, AppError> {
    let users = user::Entity::find()
        .filter(user::Column::Nama.eq(nama))
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?;
    debug!("Found {} users named '{}'", users.len(), nama);
    Ok(users)
}

#[instrument(skip(db, member), fields(nama = %member.nama))]
pub async fn insert_user<C: ConnectionTrait>(db: &C, member: NewMember) -> Result<user::Model, AppError> {
    let created = user::ActiveModel {
        nomor_keanggotaan: Set(member.nomor_keanggotaan),
        nama: Set(member.nama),
        divisi: Set(member.divisi),
        password: Set(member.password_hash),
        foto: Set(member.foto),
        ..Default::default()
    }
    .insert(db)
    .await?;
    debug!("Inserted user {}", created.id);
    Ok(created)
}

#[instrument(skip(db, new_loan), fields(user_id = new_loan.user_id))]
pub async fn insert_loan<C: ConnectionTrait>(db: &C, new_loan: NewLoan) -> Result<loan::Model, AppError> {
    let created = loan::ActiveModel {
        nomor_keanggotaan: Set(new_loan.nomor_keanggotaan),
        nama: Set(new_loan.nama),
        divisi: Set(new_loan.divisi),
        pinjaman: Set(new_loan.pinjaman),
        cicilan: Set(new_loan.cicilan),
        cicilan_perbulan: Set(new_loan.cicilan_perbulan),
        tanggal: Set(new_loan.tanggal),
        date_month: Set(new_loan.date_month),
        date_year: Set(new_loan.date_year),
        user_id: Set(new_loan.user_id),
        ..Default::default()
    }
    .insert(db)
    .await?;
    debug!("Inserted loan {} for {}-{}", created.id, created.date_year, created.date_month);
    Ok(created)
}
