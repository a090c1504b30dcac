// src/config.rs
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 8;
const DEFAULT_LOG_FILTER: &str = "org_unit_backend=info";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Postgresの search_path。未指定ならサーバー既定のスキーマを使う
    pub db_schema: Option<String>,
    pub max_connections: u32,
    pub connect_timeout: Duration,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv().ok(); // .env ファイルを読み込む (存在しなくてもエラーにしない)

        let database_url = env::var("DATABASE_URL")?;
        let db_schema = env::var("DB_SCHEMA").ok().filter(|s| !s.trim().is_empty());
        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let connect_timeout = env::var("DB_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map_or(
                Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
                Duration::from_secs,
            );
        let log_filter = env::var("LOG_FILTER").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        Ok(Config {
            database_url,
            db_schema,
            max_connections,
            connect_timeout,
            log_filter,
        })
    }

    /// 環境変数を介さずに設定を組み立てる（テスト・埋め込み用）
    pub fn new(database_url: impl Into<String>) -> Self {
        Config {
            database_url: database_url.into(),
            db_schema: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}
