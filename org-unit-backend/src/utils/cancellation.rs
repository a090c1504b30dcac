// src/utils/cancellation.rs

use crate::error::AppError;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// ストレージ操作をキャンセルシグナルと競合させて実行する
///
/// 開始時点で既にキャンセルされていればI/Oを行わずに `Cancelled` を返す。
/// キャンセル時は `fut` を破棄する。トランザクション内の操作であれば、
/// 呼び出し側がトランザクションを破棄することでロールバックされる。
pub async fn run_cancellable<T, E, F>(token: &CancellationToken, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<AppError>,
{
    if token.is_cancelled() {
        return Err(AppError::Cancelled);
    }

    tokio::select! {
        biased;
        _ = token.cancelled() => Err(AppError::Cancelled),
        result = fut => result.map_err(Into::into),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_completes_when_not_cancelled() {
        let token = CancellationToken::new();
        let result = run_cancellable(&token, async { Ok::<_, AppError>(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_already_cancelled_token_skips_future() {
        let token = CancellationToken::new();
        token.cancel();

        let mut polled = false;
        let result = run_cancellable(&token, async {
            polled = true;
            Ok::<_, AppError>(())
        })
        .await;

        assert!(matches!(result, Err(AppError::Cancelled)));
        assert!(!polled);
    }

    #[tokio::test]
    async fn test_cancellation_aborts_pending_future() {
        let token = CancellationToken::new();
        let child = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            child.cancel();
        });

        let result = run_cancellable(&token, async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok::<_, AppError>(())
        })
        .await;

        assert!(matches!(result, Err(AppError::Cancelled)));
    }

    #[tokio::test]
    async fn test_error_is_converted() {
        let token = CancellationToken::new();
        let result = run_cancellable(&token, async {
            Err::<(), _>(sea_orm::DbErr::Custom("boom".to_string()))
        })
        .await;
        assert!(matches!(result, Err(AppError::DbErr(_))));
    }
}
