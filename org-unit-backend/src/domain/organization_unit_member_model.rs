use sea_orm::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 組織単位とユーザーのリンク（所属）
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user_organization_units")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub organization_unit_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
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
        belongs_to = "super::user_model::Entity",
        from = "Column::UserId",
        to = "super::user_model::Column::Id"
    )]
    User,
}

impl Related<super::organization_unit_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrganizationUnit.def()
    }
}

impl Related<super::user_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
