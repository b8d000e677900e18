use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Peminjaman::Table)
                    .if_not_exists()
                    .col(pk_auto(Peminjaman::Id))
                    .col(string(Peminjaman::NomorKeanggotaan))
                    .col(string(Peminjaman::Nama))
                    .col(string(Peminjaman::Divisi))
                    .col(decimal_len(Peminjaman::Pinjaman, 16, 4))
                    .col(integer(Peminjaman::Cicilan))
                    .col(decimal_len(Peminjaman::CicilanPerbulan, 16, 4))
                    .col(string(Peminjaman::Tanggal))
                    .col(string_len(Peminjaman::DateMonth, 2))
                    .col(integer(Peminjaman::DateYear))
                    .col(integer(Peminjaman::UserId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_peminjaman_user")
                            .from(Peminjaman::Table, Peminjaman::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // The quota check counts by period, optionally narrowed to one member
        manager
            .create_index(
                Index::create()
                    .name("idx_peminjaman_period")
                    .table(Peminjaman::Table)
                    .col(Peminjaman::DateYear)
                    .col(Peminjaman::DateMonth)
                    .col(Peminjaman::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Peminjaman::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Peminjaman {
    Table,
    Id,
    NomorKeanggotaan,
    Nama,
    Divisi,
    Pinjaman,
    Cicilan,
    CicilanPerbulan,
    Tanggal,
    #[sea_orm(iden = "DateMonth")]
    DateMonth,
    #[sea_orm(iden = "DateYear")]
    DateYear,
    #[sea_orm(iden = "userID")]
    UserId,
}
