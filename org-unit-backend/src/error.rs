// src/error.rs

use sea_orm::DbErr;
use thiserror::Error;

/// 組織単位ストアの操作で発生するエラー
///
/// 単一エンティティの検索で見つからない場合は `Ok(None)`、一覧検索では空の `Vec` を返す。
/// `NotFound` は存在が必須な呼び出し（`get_by_id` など）でのみ使う。
#[derive(Error, Debug)]
pub enum AppError {
    /// ストレージ層の失敗。再試行せずそのまま呼び出し元へ返す
    #[error("Database error: {0}")]
    DbErr(#[from] DbErr),

    #[error("Item not found: {0}")]
    NotFound(String),

    /// ストレージへのアクセス前に拒否された不正な引数
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 呼び出し元がキャンセルシグナルで操作を取り消した
    #[error("Operation cancelled")]
    Cancelled,
}

impl AppError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AppError::Cancelled)
    }

    pub fn is_storage_failure(&self) -> bool {
        matches!(self, AppError::DbErr(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_err_converts_to_storage_failure() {
        let err: AppError = DbErr::Custom("connection refused".to_string()).into();
        assert!(err.is_storage_failure());
        assert!(!err.is_cancelled());
        assert!(err.to_string().starts_with("Database error:"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_cancelled_is_distinct_from_storage_failure() {
        let err = AppError::Cancelled;
        assert!(err.is_cancelled());
        assert!(!err.is_storage_failure());
    }
}
