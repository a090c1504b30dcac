// src/domain/role_model.rs
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ロールエンティティ
///
/// 管理は外部のサービスが行い、ここでは読み取りのみ。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub name: String,

    pub is_default: bool,

    pub is_public: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::organization_unit_role_model::Entity")]
    OrganizationUnitRoles,
}

impl Related<super::organization_unit_role_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrganizationUnitRoles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 所属する組織単位のIDを付加したロール
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDetails {
    #[serde(flatten)]
    pub role: Model,
    pub organization_unit_ids: Option<Vec<Uuid>>,
}

impl From<Model> for RoleDetails {
    fn from(role: Model) -> Self {
        Self {
            role,
            organization_unit_ids: None,
        }
    }
}
