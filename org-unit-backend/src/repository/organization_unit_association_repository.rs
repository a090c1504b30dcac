// src/repository/organization_unit_association_repository.rs
use crate::domain::organization_unit_member_model::{self, Entity as OrganizationUnitMember};
use crate::domain::organization_unit_model;
use crate::domain::organization_unit_role_model::{self, Entity as OrganizationUnitRole};
use crate::domain::role_model::{self, Entity as Role, RoleDetails};
use crate::domain::user_model::{self, Entity as User, MemberDetails};
use crate::dto::{MemberListQuery, RoleListQuery};
use crate::error::AppError;
use crate::log_with_context;
use crate::types::query::{apply_filter, like_contains, MAX_IN_LIST_LEN};
use crate::utils::run_cancellable;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbConn, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Select, TransactionTrait,
};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// 一括削除の対象となるリンクテーブル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkKind {
    Role,
    Member,
}

impl LinkKind {
    fn as_str(self) -> &'static str {
        match self {
            LinkKind::Role => "role",
            LinkKind::Member => "member",
        }
    }

    /// 組織単位のリンクを1文の集合削除で消す
    async fn delete_all<C: ConnectionTrait>(self, conn: &C, unit_id: Uuid) -> Result<u64, DbErr> {
        let result = match self {
            LinkKind::Role => {
                OrganizationUnitRole::delete_many()
                    .filter(organization_unit_role_model::Column::OrganizationUnitId.eq(unit_id))
                    .exec(conn)
                    .await?
            }
            LinkKind::Member => {
                OrganizationUnitMember::delete_many()
                    .filter(organization_unit_member_model::Column::OrganizationUnitId.eq(unit_id))
                    .exec(conn)
                    .await?
            }
        };
        Ok(result.rows_affected)
    }
}

/// 組織単位に紐づくロール・メンバーの検索と一括解除
pub struct OrganizationUnitAssociationRepository {
    db: DbConn,
}

impl OrganizationUnitAssociationRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn get_roles(
        &self,
        unit: &organization_unit_model::Model,
        query: &RoleListQuery,
        token: &CancellationToken,
    ) -> Result<Vec<RoleDetails>, AppError> {
        let sorting = query.sorting()?;
        let page = query.page()?;

        run_cancellable(token, async {
            let roles = page
                .apply(sorting.apply(Self::roles_query(unit.id)))
                .all(&self.db)
                .await?;
            Self::load_role_details(&self.db, roles, query.include_details).await
        })
        .await
    }

    pub async fn get_roles_count(
        &self,
        unit: &organization_unit_model::Model,
        token: &CancellationToken,
    ) -> Result<u64, AppError> {
        run_cancellable(token, Self::roles_query(unit.id).count(&self.db)).await
    }

    pub async fn get_members(
        &self,
        unit: &organization_unit_model::Model,
        query: &MemberListQuery,
        token: &CancellationToken,
    ) -> Result<Vec<MemberDetails>, AppError> {
        let sorting = query.sorting()?;
        let page = query.page()?;

        run_cancellable(token, async {
            let select = Self::members_query(unit.id, query.filter.as_deref());
            let users = page.apply(sorting.apply(select)).all(&self.db).await?;
            Self::load_member_details(&self.db, users, query.include_details).await
        })
        .await
    }

    pub async fn get_members_count(
        &self,
        unit: &organization_unit_model::Model,
        filter: Option<&str>,
        token: &CancellationToken,
    ) -> Result<u64, AppError> {
        run_cancellable(token, Self::members_query(unit.id, filter).count(&self.db)).await
    }

    /// 組織単位のロール割り当てをすべて解除し、削除件数を返す
    ///
    /// 自前のトランザクションでコミットまで行う。他の変更と同じトランザクションに
    /// 含めたい場合は [`Self::remove_all_roles_in`] を使う。
    pub async fn remove_all_roles(
        &self,
        unit: &organization_unit_model::Model,
        token: &CancellationToken,
    ) -> Result<u64, AppError> {
        self.remove_all_links(LinkKind::Role, unit.id, token).await
    }

    /// 組織単位のメンバー所属をすべて解除し、削除件数を返す
    pub async fn remove_all_members(
        &self,
        unit: &organization_unit_model::Model,
        token: &CancellationToken,
    ) -> Result<u64, AppError> {
        self.remove_all_links(LinkKind::Member, unit.id, token).await
    }

    /// 呼び出し側のトランザクション内でロール割り当てを解除する（コミットしない）
    ///
    /// キャンセル・失敗時はトランザクションをロールバックするのは呼び出し側の責務。
    pub async fn remove_all_roles_in<C: ConnectionTrait>(
        conn: &C,
        unit_id: Uuid,
        token: &CancellationToken,
    ) -> Result<u64, AppError> {
        run_cancellable(token, LinkKind::Role.delete_all(conn, unit_id)).await
    }

    /// 呼び出し側のトランザクション内でメンバー所属を解除する（コミットしない）
    pub async fn remove_all_members_in<C: ConnectionTrait>(
        conn: &C,
        unit_id: Uuid,
        token: &CancellationToken,
    ) -> Result<u64, AppError> {
        run_cancellable(token, LinkKind::Member.delete_all(conn, unit_id)).await
    }

    async fn remove_all_links(
        &self,
        kind: LinkKind,
        unit_id: Uuid,
        token: &CancellationToken,
    ) -> Result<u64, AppError> {
        log_with_context!(
            tracing::Level::DEBUG,
            "Removing all organization unit links",
            "link" => kind.as_str(),
            "organization_unit_id" => unit_id,
        );

        // トランザクションを開始
        let txn = run_cancellable(token, self.db.begin()).await?;

        match run_cancellable(token, kind.delete_all(&txn, unit_id)).await {
            Ok(removed) => {
                // トランザクションをコミット
                txn.commit().await?;
                log_with_context!(
                    tracing::Level::DEBUG,
                    "Removed organization unit links",
                    "link" => kind.as_str(),
                    "organization_unit_id" => unit_id,
                    "removed" => removed,
                );
                Ok(removed)
            }
            Err(err) => {
                // 元のエラー（キャンセルを含む）を優先して返す
                if let Err(rollback_err) = txn.rollback().await {
                    log_with_context!(
                        tracing::Level::DEBUG,
                        "Rollback of organization unit link removal failed",
                        "link" => kind.as_str(),
                        "organization_unit_id" => unit_id,
                        "error" => rollback_err,
                    );
                }
                Err(err)
            }
        }
    }

    fn roles_query(unit_id: Uuid) -> Select<role_model::Entity> {
        Role::find()
            .inner_join(OrganizationUnitRole)
            .filter(organization_unit_role_model::Column::OrganizationUnitId.eq(unit_id))
    }

    /// ユーザー名・メール・電話番号の部分一致。電話番号が未登録のユーザーは
    /// 電話番号では一致しない
    fn members_query(unit_id: Uuid, filter: Option<&str>) -> Select<user_model::Entity> {
        let select = User::find()
            .inner_join(OrganizationUnitMember)
            .filter(organization_unit_member_model::Column::OrganizationUnitId.eq(unit_id));

        apply_filter(select, filter, |filter| {
            Condition::any()
                .add(user_model::Column::UserName.like(like_contains(filter)))
                .add(user_model::Column::Email.like(like_contains(filter)))
                .add(
                    Condition::all()
                        .add(user_model::Column::PhoneNumber.is_not_null())
                        .add(user_model::Column::PhoneNumber.like(like_contains(filter))),
                )
        })
    }

    async fn load_role_details<C: ConnectionTrait>(
        conn: &C,
        roles: Vec<role_model::Model>,
        include_details: bool,
    ) -> Result<Vec<RoleDetails>, DbErr> {
        if !include_details {
            return Ok(roles.into_iter().map(RoleDetails::from).collect());
        }
        if roles.is_empty() {
            return Ok(Vec::new());
        }

        let role_ids: Vec<Uuid> = roles.iter().map(|role| role.id).collect();
        let mut units_by_role: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for chunk in role_ids.chunks(MAX_IN_LIST_LEN) {
            let links = OrganizationUnitRole::find()
                .filter(organization_unit_role_model::Column::RoleId.is_in(chunk.iter().copied()))
                .order_by_asc(organization_unit_role_model::Column::OrganizationUnitId)
                .all(conn)
                .await?;
            for link in links {
                units_by_role
                    .entry(link.role_id)
                    .or_default()
                    .push(link.organization_unit_id);
            }
        }

        Ok(roles
            .into_iter()
            .map(|role| {
                let organization_unit_ids = units_by_role.remove(&role.id).unwrap_or_default();
                RoleDetails {
                    role,
                    organization_unit_ids: Some(organization_unit_ids),
                }
            })
            .collect())
    }

    async fn load_member_details<C: ConnectionTrait>(
        conn: &C,
        users: Vec<user_model::Model>,
        include_details: bool,
    ) -> Result<Vec<MemberDetails>, DbErr> {
        if !include_details {
            return Ok(users.into_iter().map(MemberDetails::from).collect());
        }
        if users.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<Uuid> = users.iter().map(|user| user.id).collect();
        let mut units_by_user: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for chunk in user_ids.chunks(MAX_IN_LIST_LEN) {
            let links = OrganizationUnitMember::find()
                .filter(organization_unit_member_model::Column::UserId.is_in(chunk.iter().copied()))
                .order_by_asc(organization_unit_member_model::Column::OrganizationUnitId)
                .all(conn)
                .await?;
            for link in links {
                units_by_user
                    .entry(link.user_id)
                    .or_default()
                    .push(link.organization_unit_id);
            }
        }

        Ok(users
            .into_iter()
            .map(|user| {
                let organization_unit_ids = units_by_user.remove(&user.id).unwrap_or_default();
                MemberDetails {
                    user,
                    organization_unit_ids: Some(organization_unit_ids),
                }
            })
            .collect())
    }
}
