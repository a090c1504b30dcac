// src/domain/user_model.rs

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// ユーザーエンティティ
///
/// 管理は外部のサービスが行い、ここではフィルタ・ソートに使う表示項目のみ読む。
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub user_name: String,

    pub email: String,

    #[sea_orm(nullable)]
    pub phone_number: Option<String>,

    #[sea_orm(nullable)]
    pub name: Option<String>,

    #[sea_orm(nullable)]
    pub surname: Option<String>,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::organization_unit_member_model::Entity")]
    OrganizationUnitMembers,
}

impl Related<super::organization_unit_member_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrganizationUnitMembers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 所属する組織単位のIDを付加したユーザー
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDetails {
    #[serde(flatten)]
    pub user: Model,
    pub organization_unit_ids: Option<Vec<Uuid>>,
}

impl From<Model> for MemberDetails {
    fn from(user: Model) -> Self {
        Self {
            user,
            organization_unit_ids: None,
        }
    }
}
