use sea_orm_migration::prelude::*;

use crate::m20250801_000002_create_users_table::Users;
use crate::m20250801_000003_create_organization_units_table::OrganizationUnits;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserOrganizationUnits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserOrganizationUnits::OrganizationUnitId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserOrganizationUnits::UserId)
                            .uuid()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(UserOrganizationUnits::OrganizationUnitId)
                            .col(UserOrganizationUnits::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_organization_units_organization_unit_id")
                            .from(
                                UserOrganizationUnits::Table,
                                UserOrganizationUnits::OrganizationUnitId,
                            )
                            .to(OrganizationUnits::Table, OrganizationUnits::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_organization_units_user_id")
                            .from(UserOrganizationUnits::Table, UserOrganizationUnits::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ユーザー側からの逆引き用
        manager
            .create_index(
                Index::create()
                    .name("idx_user_organization_units_user_id")
                    .table(UserOrganizationUnits::Table)
                    .col(UserOrganizationUnits::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserOrganizationUnits::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserOrganizationUnits {
    Table,
    OrganizationUnitId,
    UserId,
}
