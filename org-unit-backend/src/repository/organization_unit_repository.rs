// src/repository/organization_unit_repository.rs
use crate::domain::organization_unit_member_model::{self, Entity as OrganizationUnitMember};
use crate::domain::organization_unit_model::{
    self, Entity as OrganizationUnit, OrganizationUnitDetails,
};
use crate::domain::organization_unit_role_model::{self, Entity as OrganizationUnitRole};
use crate::dto::OrganizationUnitListQuery;
use crate::error::AppError;
use crate::types::query::{apply_filter, like_contains, like_starts_with, MAX_IN_LIST_LEN};
use crate::utils::run_cancellable;
use sea_orm::sea_query::SimpleExpr;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbConn, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Select,
};
use std::collections::{BTreeSet, HashMap};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// 組織単位の階層ストア
///
/// 子・サブツリーの検索はすべて `parent_id` の一致と `code` の前方一致で行い、
/// 再帰的な親の追跡はしない。
pub struct OrganizationUnitRepository {
    db: DbConn,
}

impl OrganizationUnitRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_id(
        &self,
        id: Uuid,
        include_details: bool,
        token: &CancellationToken,
    ) -> Result<Option<OrganizationUnitDetails>, AppError> {
        run_cancellable(token, async {
            let unit = OrganizationUnit::find_by_id(id).one(&self.db).await?;
            Self::load_single(&self.db, unit, include_details).await
        })
        .await
    }

    /// 存在が前提の呼び出し用。見つからなければ `NotFound`
    pub async fn get_by_id(
        &self,
        id: Uuid,
        include_details: bool,
        token: &CancellationToken,
    ) -> Result<OrganizationUnitDetails, AppError> {
        self.find_by_id(id, include_details, token)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Organization unit {} not found", id)))
    }

    /// `parent_id` が一致する組織単位。`None` はルート直下
    pub async fn get_children(
        &self,
        parent_id: Option<Uuid>,
        include_details: bool,
        token: &CancellationToken,
    ) -> Result<Vec<OrganizationUnitDetails>, AppError> {
        run_cancellable(token, async {
            let units = OrganizationUnit::find()
                .filter(Self::parent_condition(parent_id))
                .order_by_asc(organization_unit_model::Column::Code)
                .order_by_asc(organization_unit_model::Column::Id)
                .all(&self.db)
                .await?;
            Self::load_details(&self.db, units, include_details).await
        })
        .await
    }

    /// `code` を接頭辞に持つすべての組織単位（`exclude_id` の単位を除く）
    ///
    /// 自身の混入を防ぐため `exclude_id` は必須。未指定や空のコードはストレージに
    /// アクセスする前に検証エラーとする。
    pub async fn get_all_children_with_parent_code(
        &self,
        code: &str,
        exclude_id: Option<Uuid>,
        include_details: bool,
        token: &CancellationToken,
    ) -> Result<Vec<OrganizationUnitDetails>, AppError> {
        let exclude_id = exclude_id.ok_or_else(|| {
            AppError::ValidationError(
                "exclude_id is required when querying descendants by code".to_string(),
            )
        })?;
        if code.trim().is_empty() {
            return Err(AppError::ValidationError(
                "code must not be empty when querying descendants".to_string(),
            ));
        }

        run_cancellable(token, async {
            let units = OrganizationUnit::find()
                .filter(organization_unit_model::Column::Code.like(like_starts_with(code)))
                .filter(organization_unit_model::Column::Id.ne(exclude_id))
                .order_by_asc(organization_unit_model::Column::Code)
                .order_by_asc(organization_unit_model::Column::Id)
                .all(&self.db)
                .await?;
            Self::load_details(&self.db, units, include_details).await
        })
        .await
    }

    /// 親単位の子を絞り込み・ソート・ページングして取得する
    pub async fn get_list(
        &self,
        query: &OrganizationUnitListQuery,
        token: &CancellationToken,
    ) -> Result<Vec<OrganizationUnitDetails>, AppError> {
        let sorting = query.sorting()?;
        let page = query.page()?;

        run_cancellable(token, async {
            let select = Self::filtered_children(query.parent_id, query.filter.as_deref());
            let units = page.apply(sorting.apply(select)).all(&self.db).await?;
            Self::load_details(&self.db, units, query.include_details).await
        })
        .await
    }

    /// `get_list` と同じ条件での総件数（ページングなし）
    pub async fn get_count(
        &self,
        parent_id: Option<Uuid>,
        filter: Option<&str>,
        token: &CancellationToken,
    ) -> Result<u64, AppError> {
        run_cancellable(
            token,
            Self::filtered_children(parent_id, filter).count(&self.db),
        )
        .await
    }

    /// IDの集合で検索する。重複したIDは1件にまとまる
    ///
    /// IDは `MAX_IN_LIST_LEN` 件ずつに分けて問い合わせ、結果はコード・ID順（バイト順）に並べる。
    pub async fn get_list_by_ids(
        &self,
        ids: &[Uuid],
        include_details: bool,
        token: &CancellationToken,
    ) -> Result<Vec<OrganizationUnitDetails>, AppError> {
        let ids: Vec<Uuid> = ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        run_cancellable(token, async {
            let mut units = Vec::new();
            for chunk in ids.chunks(MAX_IN_LIST_LEN) {
                let found = OrganizationUnit::find()
                    .filter(organization_unit_model::Column::Id.is_in(chunk.iter().copied()))
                    .all(&self.db)
                    .await?;
                units.extend(found);
            }
            units.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| a.id.cmp(&b.id)));
            Self::load_details(&self.db, units, include_details).await
        })
        .await
    }

    /// 表示名の完全一致（大文字小文字を区別）
    ///
    /// 同名が複数ある場合は主キー順で最初の1件を返す。
    pub async fn find_by_display_name(
        &self,
        display_name: &str,
        include_details: bool,
        token: &CancellationToken,
    ) -> Result<Option<OrganizationUnitDetails>, AppError> {
        run_cancellable(token, async {
            let unit = OrganizationUnit::find()
                .filter(organization_unit_model::Column::DisplayName.eq(display_name))
                .order_by_asc(organization_unit_model::Column::Id)
                .one(&self.db)
                .await?;
            Self::load_single(&self.db, unit, include_details).await
        })
        .await
    }

    fn parent_condition(parent_id: Option<Uuid>) -> SimpleExpr {
        match parent_id {
            Some(parent_id) => organization_unit_model::Column::ParentId.eq(parent_id),
            None => organization_unit_model::Column::ParentId.is_null(),
        }
    }

    fn filtered_children(
        parent_id: Option<Uuid>,
        filter: Option<&str>,
    ) -> Select<organization_unit_model::Entity> {
        let select = OrganizationUnit::find().filter(Self::parent_condition(parent_id));
        apply_filter(select, filter, |filter| {
            Condition::any()
                .add(organization_unit_model::Column::DisplayName.like(like_contains(filter)))
                .add(organization_unit_model::Column::Code.like(like_contains(filter)))
        })
    }

    async fn load_single<C: ConnectionTrait>(
        conn: &C,
        unit: Option<organization_unit_model::Model>,
        include_details: bool,
    ) -> Result<Option<OrganizationUnitDetails>, DbErr> {
        match unit {
            Some(unit) => Ok(Self::load_details(conn, vec![unit], include_details)
                .await?
                .pop()),
            None => Ok(None),
        }
    }

    /// ロール・メンバーのリンクを結果全体に対してまとめて読み込む（N+1を避ける）
    pub(crate) async fn load_details<C: ConnectionTrait>(
        conn: &C,
        units: Vec<organization_unit_model::Model>,
        include_details: bool,
    ) -> Result<Vec<OrganizationUnitDetails>, DbErr> {
        if !include_details {
            return Ok(units
                .into_iter()
                .map(OrganizationUnitDetails::without_details)
                .collect());
        }
        if units.is_empty() {
            return Ok(Vec::new());
        }

        let unit_ids: Vec<Uuid> = units.iter().map(|unit| unit.id).collect();

        let mut roles_by_unit: HashMap<Uuid, Vec<organization_unit_role_model::Model>> =
            HashMap::new();
        let mut members_by_unit: HashMap<Uuid, Vec<organization_unit_member_model::Model>> =
            HashMap::new();

        // 1つの単位のリンクは必ず同じチャンクに入るので、単位ごとの並び順は保たれる
        for chunk in unit_ids.chunks(MAX_IN_LIST_LEN) {
            let roles = OrganizationUnitRole::find()
                .filter(
                    organization_unit_role_model::Column::OrganizationUnitId
                        .is_in(chunk.iter().copied()),
                )
                .order_by_asc(organization_unit_role_model::Column::RoleId)
                .all(conn)
                .await?;
            for role in roles {
                roles_by_unit
                    .entry(role.organization_unit_id)
                    .or_default()
                    .push(role);
            }

            let members = OrganizationUnitMember::find()
                .filter(
                    organization_unit_member_model::Column::OrganizationUnitId
                        .is_in(chunk.iter().copied()),
                )
                .order_by_asc(organization_unit_member_model::Column::UserId)
                .all(conn)
                .await?;
            for member in members {
                members_by_unit
                    .entry(member.organization_unit_id)
                    .or_default()
                    .push(member);
            }
        }

        Ok(units
            .into_iter()
            .map(|unit| {
                let roles = roles_by_unit.remove(&unit.id).unwrap_or_default();
                let members = members_by_unit.remove(&unit.id).unwrap_or_default();
                OrganizationUnitDetails {
                    unit,
                    roles: Some(roles),
                    members: Some(members),
                }
            })
            .collect())
    }
}
