// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// 参照される外部エンティティ
mod m20250801_000001_create_roles_table;
mod m20250801_000002_create_users_table;

// 組織単位関連マイグレーション
mod m20250801_000003_create_organization_units_table;
mod m20250801_000004_create_organization_unit_roles_table;
mod m20250801_000005_create_user_organization_units_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. 基本テーブル作成（依存関係なし）
            Box::new(m20250801_000001_create_roles_table::Migration),
            Box::new(m20250801_000002_create_users_table::Migration),
            Box::new(m20250801_000003_create_organization_units_table::Migration),
            // 2. リンクテーブル作成（上記テーブルに依存）
            Box::new(m20250801_000004_create_organization_unit_roles_table::Migration),
            Box::new(m20250801_000005_create_user_organization_units_table::Migration),
        ]
    }
}
