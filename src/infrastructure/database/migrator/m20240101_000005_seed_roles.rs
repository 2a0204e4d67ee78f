//! Seed the role reference data

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_roles::Roles;

const ROLE_NAMES: [&str; 2] = ["ROLE_USER", "ROLE_ADMIN"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert.into_table(Roles::Table).columns([Roles::Name]);
        for name in ROLE_NAMES {
            insert.values_panic([name.into()]);
        }

        manager.exec_stmt(insert.to_owned()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(Roles::Table)
            .and_where(Expr::col(Roles::Name).is_in(ROLE_NAMES))
            .to_owned();

        manager.exec_stmt(delete).await
    }
}
