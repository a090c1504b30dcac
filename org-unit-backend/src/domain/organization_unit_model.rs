// src/domain/organization_unit_model.rs
use super::organization_unit_code;
use chrono::{DateTime, Utc};
use sea_orm::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 組織単位エンティティ
///
/// `code` はマテリアライズドパス。子のコードは親のコードを接頭辞に持つ。
/// この整合性と `display_name` の一意性は書き込み側が保証する。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "organization_units")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(nullable)]
    pub parent_id: Option<Uuid>,
    pub code: String,
    #[sea_orm(unique)]
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::organization_unit_role_model::Entity")]
    OrganizationUnitRoles,
    #[sea_orm(has_many = "super::organization_unit_member_model::Entity")]
    OrganizationUnitMembers,
}

impl Related<super::organization_unit_role_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrganizationUnitRoles.def()
    }
}

impl Related<super::organization_unit_member_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrganizationUnitMembers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// `other` がこの組織単位のサブツリーに含まれる（自身を除く）か
    pub fn is_ancestor_of(&self, other: &Model) -> bool {
        self.id != other.id && organization_unit_code::is_proper_ancestor(&self.code, &other.code)
    }

    pub fn is_ancestor_or_self_of(&self, other: &Model) -> bool {
        organization_unit_code::is_ancestor_or_self(&self.code, &other.code)
    }

    pub fn code_segments(&self, separator: char) -> Vec<&str> {
        organization_unit_code::segments(&self.code, separator)
    }
}

/// 詳細付きの組織単位
///
/// `include_details = false` で読み込んだ場合、リンクは `None`（未読込）になる。
/// 読み込んだ結果リンクが無い場合は `Some(vec![])`。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationUnitDetails {
    #[serde(flatten)]
    pub unit: Model,
    pub roles: Option<Vec<super::organization_unit_role_model::Model>>,
    pub members: Option<Vec<super::organization_unit_member_model::Model>>,
}

impl OrganizationUnitDetails {
    pub fn without_details(unit: Model) -> Self {
        Self {
            unit,
            roles: None,
            members: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.unit.id
    }

    pub fn role_ids(&self) -> Option<Vec<Uuid>> {
        self.roles
            .as_ref()
            .map(|roles| roles.iter().map(|r| r.role_id).collect())
    }

    pub fn member_ids(&self) -> Option<Vec<Uuid>> {
        self.members
            .as_ref()
            .map(|members| members.iter().map(|m| m.user_id).collect())
    }
}

impl From<Model> for OrganizationUnitDetails {
    fn from(unit: Model) -> Self {
        Self::without_details(unit)
    }
}
