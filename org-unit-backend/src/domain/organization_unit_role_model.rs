use sea_orm::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 組織単位とロールのリンク（両端のID以外の属性を持たない）
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "organization_unit_roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub organization_unit_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub role_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organization_unit_model::Entity",
        from = "Column::OrganizationUnitId",
        to = "super::organization_unit_model::Column::Id"
    )]
    OrganizationUnit,
    #[sea_orm(
        belongs_to = "super::role_model::Entity",
        from = "Column::RoleId",
        to = "super::role_model::Column::Id"
    )]
    Role,
}

impl Related<super::organization_unit_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrganizationUnit.def()
    }
}

impl Related<super::role_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
