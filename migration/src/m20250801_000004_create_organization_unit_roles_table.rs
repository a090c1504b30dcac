use sea_orm_migration::prelude::*;

use crate::m20250801_000001_create_roles_table::Roles;
use crate::m20250801_000003_create_organization_units_table::OrganizationUnits;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrganizationUnitRoles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrganizationUnitRoles::OrganizationUnitId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OrganizationUnitRoles::RoleId)
                            .uuid()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(OrganizationUnitRoles::OrganizationUnitId)
                            .col(OrganizationUnitRoles::RoleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_organization_unit_roles_organization_unit_id")
                            .from(
                                OrganizationUnitRoles::Table,
                                OrganizationUnitRoles::OrganizationUnitId,
                            )
                            .to(OrganizationUnits::Table, OrganizationUnits::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_organization_unit_roles_role_id")
                            .from(OrganizationUnitRoles::Table, OrganizationUnitRoles::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ロール側からの逆引き用
        manager
            .create_index(
                Index::create()
                    .name("idx_organization_unit_roles_role_id")
                    .table(OrganizationUnitRoles::Table)
                    .col(OrganizationUnitRoles::RoleId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrganizationUnitRoles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum OrganizationUnitRoles {
    Table,
    OrganizationUnitId,
    RoleId,
}
