//! Create parcels table
//!
//! Each address is stored as a flattened column group.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Parcels::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Parcels::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Parcels::CreatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Parcels::UpdatedBy).big_integer().not_null())
                    .col(ColumnDef::new(Parcels::Weight).float().not_null())
                    .col(ColumnDef::new(Parcels::WeightMetric).string_len(8).not_null())
                    .col(
                        ColumnDef::new(Parcels::Status)
                            .string_len(16)
                            .not_null()
                            .default("PLACED"),
                    )
                    .col(ColumnDef::new(Parcels::FromStreetNumber).integer().not_null())
                    .col(ColumnDef::new(Parcels::FromStreetName).string().not_null())
                    .col(ColumnDef::new(Parcels::FromCity).string().not_null())
                    .col(ColumnDef::new(Parcels::FromState).string().not_null())
                    .col(ColumnDef::new(Parcels::FromCountry).string().not_null())
                    .col(ColumnDef::new(Parcels::FromZipCode).string())
                    .col(ColumnDef::new(Parcels::ToStreetNumber).integer().not_null())
                    .col(ColumnDef::new(Parcels::ToStreetName).string().not_null())
                    .col(ColumnDef::new(Parcels::ToCity).string().not_null())
                    .col(ColumnDef::new(Parcels::ToState).string().not_null())
                    .col(ColumnDef::new(Parcels::ToCountry).string().not_null())
                    .col(ColumnDef::new(Parcels::ToZipCode).string())
                    .col(ColumnDef::new(Parcels::CurrentLocationStreetNumber).integer().not_null())
                    .col(ColumnDef::new(Parcels::CurrentLocationStreetName).string().not_null())
                    .col(ColumnDef::new(Parcels::CurrentLocationCity).string().not_null())
                    .col(ColumnDef::new(Parcels::CurrentLocationState).string().not_null())
                    .col(ColumnDef::new(Parcels::CurrentLocationCountry).string().not_null())
                    .col(ColumnDef::new(Parcels::CurrentLocationZipCode).string())
                    .col(ColumnDef::new(Parcels::SentOn).timestamp_with_time_zone())
                    .col(ColumnDef::new(Parcels::DeliveredOn).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Parcels::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Parcels::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parcels_created_by")
                            .from(Parcels::Table, Parcels::CreatedBy)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parcels_created_by")
                    .table(Parcels::Table)
                    .col(Parcels::CreatedBy)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Parcels::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Parcels {
    Table,
    Id,
    CreatedBy,
    UpdatedBy,
    Weight,
    WeightMetric,
    Status,
    FromStreetNumber,
    FromStreetName,
    FromCity,
    FromState,
    FromCountry,
    FromZipCode,
    ToStreetNumber,
    ToStreetName,
    ToCity,
    ToState,
    ToCountry,
    ToZipCode,
    CurrentLocationStreetNumber,
    CurrentLocationStreetName,
    CurrentLocationCity,
    CurrentLocationState,
    CurrentLocationCountry,
    CurrentLocationZipCode,
    SentOn,
    DeliveredOn,
    CreatedAt,
    UpdatedAt,
}
