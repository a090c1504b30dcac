use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OrganizationUnits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OrganizationUnits::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OrganizationUnits::ParentId).uuid().null())
                    .col(ColumnDef::new(OrganizationUnits::Code).string().not_null())
                    .col(
                        ColumnDef::new(OrganizationUnits::DisplayName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OrganizationUnits::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(OrganizationUnits::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // 自己参照の外部キー
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_organization_units_parent_id")
                            .from(OrganizationUnits::Table, OrganizationUnits::ParentId)
                            .to(OrganizationUnits::Table, OrganizationUnits::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 子の検索用
        manager
            .create_index(
                Index::create()
                    .name("idx_organization_units_parent_id")
                    .table(OrganizationUnits::Table)
                    .col(OrganizationUnits::ParentId)
                    .to_owned(),
            )
            .await?;

        // サブツリーの前方一致検索用
        // text_pattern_ops でないと照合順序が C 以外のとき LIKE 'x%' にインデックスが効かない
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE INDEX IF NOT EXISTS idx_organization_units_code
                ON organization_units (code text_pattern_ops)",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_organization_units_display_name")
                    .table(OrganizationUnits::Table)
                    .col(OrganizationUnits::DisplayName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrganizationUnits::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum OrganizationUnits {
    Table,
    Id,
    ParentId,
    Code,
    DisplayName,
    CreatedAt,
    UpdatedAt,
}
