use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::ActiveModelBehavior;

use super::user;

/// A monthly loan request ("peminjaman").
///
/// The member fields are copied from the submitted form rather than joined
/// from `users`, so a record keeps what the member typed at submission time.
/// `date_month` and `date_year` are derived from `tanggal` and are what the
/// quota count filters on.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "peminjaman")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nomor_keanggotaan: String,
    pub nama: String,
    pub divisi: String,
    /// Requested principal.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub pinjaman: Decimal,
    /// Number of installments.
    pub cicilan: i32,
    /// Amount due per installment.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub cicilan_perbulan: Decimal,
    /// Submission date formatted as `dd-mm-yyyy`.
    pub tanggal: String,
    /// Two-digit month, `"01"` to `"12"`.
    #[sea_orm(column_name = "DateMonth")]
    pub date_month: String,
    #[sea_orm(column_name = "DateYear")]
    pub date_year: i32,
    #[sea_orm(column_name = "userID")]
    pub user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "user::Entity",
        from = "Column::UserId",
        to = "user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
