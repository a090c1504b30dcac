// src/types/query.rs
//
// 組織単位・ロール・メンバーの検索で共通に使うフィルタ・ソート・ページング

use crate::error::AppError;
use sea_orm::sea_query::LikeExpr;
use sea_orm::{Condition, EntityTrait, Order, QueryFilter, QueryOrder, QuerySelect, Select};
use serde::{Deserialize, Serialize};

/// OFFSET だけを指定できないバックエンド向けの「上限なし」LIMIT
pub const UNBOUNDED_LIMIT: u64 = i64::MAX as u64;

const LIKE_ESCAPE: char = '\\';

/// `IN (...)` 1回あたりのID数の上限。バックエンドのバインド変数上限を超えないよう分割する
pub const MAX_IN_LIST_LEN: usize = 1_000;

/// 空白のみ・未指定のフィルタは「絞り込みなし」として扱う
///
/// 空白でないフィルタはトリムせずそのまま照合に使う。
pub fn non_blank_filter(filter: Option<&str>) -> Option<&str> {
    filter.filter(|f| !f.trim().is_empty())
}

/// フィルタが指定されている場合だけ条件を追加する
pub fn apply_filter<E, F>(query: Select<E>, filter: Option<&str>, predicate: F) -> Select<E>
where
    E: EntityTrait,
    F: FnOnce(&str) -> Condition,
{
    match non_blank_filter(filter) {
        Some(filter) => query.filter(predicate(filter)),
        None => query,
    }
}

/// LIKE のワイルドカードを無効化する
pub fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// 部分一致（`%value%`）
pub fn like_contains(value: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like(value))).escape(LIKE_ESCAPE)
}

/// 前方一致（`value%`）。サブツリー検索で使う
pub fn like_starts_with(value: &str) -> LikeExpr {
    LikeExpr::new(format!("{}%", escape_like(value))).escape(LIKE_ESCAPE)
}

/// ソート順序
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(AppError::ValidationError(format!(
                "Invalid sort direction: {}",
                other
            ))),
        }
    }
}

impl From<SortOrder> for Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

/// ソートに使える項目の列挙
///
/// 項目名は実行時に解決せず、各エンティティごとに固定の列へ対応付ける。
pub trait SortField: Copy + Sized {
    type Entity: EntityTrait;

    /// ソート指定がない場合の項目
    fn default_field() -> Self;

    /// 正規化済みの項目名（小文字・アンダースコアなし）から解決する
    fn from_key(key: &str) -> Option<Self>;

    fn column(self) -> <Self::Entity as EntityTrait>::Column;

    /// 同値の行の順序を確定させるための列（主キー）
    fn tie_breaker() -> <Self::Entity as EntityTrait>::Column;
}

/// `display_name`, `DisplayName`, `displayName` を同じキーに正規化する
fn normalize_sort_key(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// 解析済みのソート指定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sorting<F> {
    pub field: F,
    pub order: SortOrder,
}

impl<F: SortField> Default for Sorting<F> {
    fn default() -> Self {
        Self {
            field: F::default_field(),
            order: SortOrder::Asc,
        }
    }
}

impl<F: SortField> Sorting<F> {
    /// `"<field> [asc|desc]"` 形式のソート指定を解析する
    ///
    /// 未指定・空文字は既定の項目の昇順。未知の項目名や方向は検証エラー。
    pub fn parse(sorting: Option<&str>) -> Result<Self, AppError> {
        let expr = match sorting.map(str::trim).filter(|s| !s.is_empty()) {
            Some(expr) => expr,
            None => return Ok(Self::default()),
        };

        let mut parts = expr.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let field = F::from_key(&normalize_sort_key(name))
            .ok_or_else(|| AppError::ValidationError(format!("Unknown sort field: {}", name)))?;
        let order = match parts.next() {
            Some(direction) => SortOrder::parse(direction)?,
            None => SortOrder::Asc,
        };

        if parts.next().is_some() {
            return Err(AppError::ValidationError(format!(
                "Invalid sort expression: {}",
                expr
            )));
        }

        Ok(Self { field, order })
    }

    /// 指定項目で並べ、最後に主キーで順序を確定させる
    pub fn apply(self, query: Select<F::Entity>) -> Select<F::Entity> {
        query
            .order_by(self.field.column(), self.order.into())
            .order_by_asc(F::tie_breaker())
    }
}

/// skip-then-take のページ指定
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub skip_count: u64,
    /// `None` は上限なし
    pub max_result_count: Option<u64>,
}

impl PageRequest {
    pub fn new(skip_count: i64, max_result_count: Option<i64>) -> Result<Self, AppError> {
        let skip_count = u64::try_from(skip_count).map_err(|_| {
            AppError::ValidationError(format!("skip_count must be >= 0: {}", skip_count))
        })?;
        let max_result_count = max_result_count
            .map(|take| {
                u64::try_from(take).map_err(|_| {
                    AppError::ValidationError(format!("max_result_count must be >= 0: {}", take))
                })
            })
            .transpose()?;

        Ok(Self {
            skip_count,
            max_result_count,
        })
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn apply<E: EntityTrait>(self, query: Select<E>) -> Select<E> {
        match (self.skip_count, self.max_result_count) {
            (0, None) => query,
            (skip, take) => query
                .offset(skip)
                .limit(take.unwrap_or(UNBOUNDED_LIMIT).min(UNBOUNDED_LIMIT)),
        }
    }
}
