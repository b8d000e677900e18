use sea_orm::entity::prelude::*;

/// A registered cooperative member.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Membership number printed on the member card.
    pub nomor_keanggotaan: String,
    pub nama: String,
    pub divisi: String,
    /// Argon2id PHC string, never the plain password.
    pub password: String,
    /// Public path of the uploaded photo, e.g. `/img/1700000000000_a.png`.
    pub foto: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    // A member can file many loan requests.
    #[sea_orm(has_many = "super::loan::Entity")]
    Loan,
}

impl Related<super::loan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
