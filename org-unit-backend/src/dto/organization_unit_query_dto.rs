// src/dto/organization_unit_query_dto.rs

use crate::domain::{organization_unit_model, role_model, user_model};
use crate::error::AppError;
use crate::types::{PageRequest, SortField, Sorting};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 組織単位のソート項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationUnitSortField {
    DisplayName,
    Code,
    CreatedAt,
    UpdatedAt,
}

impl SortField for OrganizationUnitSortField {
    type Entity = organization_unit_model::Entity;

    fn default_field() -> Self {
        OrganizationUnitSortField::DisplayName
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "displayname" => Some(OrganizationUnitSortField::DisplayName),
            "code" => Some(OrganizationUnitSortField::Code),
            "createdat" => Some(OrganizationUnitSortField::CreatedAt),
            "updatedat" => Some(OrganizationUnitSortField::UpdatedAt),
            _ => None,
        }
    }

    fn column(self) -> organization_unit_model::Column {
        match self {
            OrganizationUnitSortField::DisplayName => organization_unit_model::Column::DisplayName,
            OrganizationUnitSortField::Code => organization_unit_model::Column::Code,
            OrganizationUnitSortField::CreatedAt => organization_unit_model::Column::CreatedAt,
            OrganizationUnitSortField::UpdatedAt => organization_unit_model::Column::UpdatedAt,
        }
    }

    fn tie_breaker() -> organization_unit_model::Column {
        organization_unit_model::Column::Id
    }
}

/// ロールのソート項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleSortField {
    Name,
    CreatedAt,
}

impl SortField for RoleSortField {
    type Entity = role_model::Entity;

    fn default_field() -> Self {
        RoleSortField::Name
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "name" => Some(RoleSortField::Name),
            "createdat" => Some(RoleSortField::CreatedAt),
            _ => None,
        }
    }

    fn column(self) -> role_model::Column {
        match self {
            RoleSortField::Name => role_model::Column::Name,
            RoleSortField::CreatedAt => role_model::Column::CreatedAt,
        }
    }

    fn tie_breaker() -> role_model::Column {
        role_model::Column::Id
    }
}

/// メンバー（ユーザー）のソート項目
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberSortField {
    UserName,
    Email,
    PhoneNumber,
    CreatedAt,
}

impl SortField for MemberSortField {
    type Entity = user_model::Entity;

    fn default_field() -> Self {
        MemberSortField::UserName
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "username" => Some(MemberSortField::UserName),
            "email" => Some(MemberSortField::Email),
            "phonenumber" => Some(MemberSortField::PhoneNumber),
            "createdat" => Some(MemberSortField::CreatedAt),
            _ => None,
        }
    }

    fn column(self) -> user_model::Column {
        match self {
            MemberSortField::UserName => user_model::Column::UserName,
            MemberSortField::Email => user_model::Column::Email,
            MemberSortField::PhoneNumber => user_model::Column::PhoneNumber,
            MemberSortField::CreatedAt => user_model::Column::CreatedAt,
        }
    }

    fn tie_breaker() -> user_model::Column {
        user_model::Column::Id
    }
}

/// 親単位の子一覧の検索条件
///
/// `Default` はルート直下・フィルタなし・表示名昇順・上限なし。
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OrganizationUnitListQuery {
    pub parent_id: Option<Uuid>,
    pub sorting: Option<String>,
    pub max_result_count: Option<i64>,
    #[serde(default)]
    pub skip_count: i64,
    pub filter: Option<String>,
    #[serde(default)]
    pub include_details: bool,
}

impl OrganizationUnitListQuery {
    pub fn children_of(parent_id: Option<Uuid>) -> Self {
        Self {
            parent_id,
            ..Default::default()
        }
    }

    pub fn sorting(&self) -> Result<Sorting<OrganizationUnitSortField>, AppError> {
        Sorting::parse(self.sorting.as_deref())
    }

    pub fn page(&self) -> Result<PageRequest, AppError> {
        PageRequest::new(self.skip_count, self.max_result_count)
    }
}

/// 組織単位に割り当てられたロールの検索条件
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RoleListQuery {
    pub sorting: Option<String>,
    pub max_result_count: Option<i64>,
    #[serde(default)]
    pub skip_count: i64,
    #[serde(default)]
    pub include_details: bool,
}

impl RoleListQuery {
    pub fn sorting(&self) -> Result<Sorting<RoleSortField>, AppError> {
        Sorting::parse(self.sorting.as_deref())
    }

    pub fn page(&self) -> Result<PageRequest, AppError> {
        PageRequest::new(self.skip_count, self.max_result_count)
    }
}

/// 組織単位のメンバーの検索条件
///
/// `filter` はユーザー名・メール・電話番号の部分一致。
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MemberListQuery {
    pub sorting: Option<String>,
    pub max_result_count: Option<i64>,
    #[serde(default)]
    pub skip_count: i64,
    pub filter: Option<String>,
    #[serde(default)]
    pub include_details: bool,
}

impl MemberListQuery {
    pub fn sorting(&self) -> Result<Sorting<MemberSortField>, AppError> {
        Sorting::parse(self.sorting.as_deref())
    }

    pub fn page(&self) -> Result<PageRequest, AppError> {
        PageRequest::new(self.skip_count, self.max_result_count)
    }
}
