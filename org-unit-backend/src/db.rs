// src/db.rs
use crate::config::Config;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Statement,
};

pub type DbPool = DatabaseConnection;

pub fn connect_options(config: &Config) -> ConnectOptions {
    let mut opt = ConnectOptions::new(config.database_url.clone());

    // 接続オプションを設定
    opt.max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(config.connect_timeout)
        .acquire_timeout(config.connect_timeout)
        .sqlx_logging(false);

    // プールの全接続に search_path を設定する
    if let Some(schema) = &config.db_schema {
        opt.set_schema_search_path(schema.clone());
    }

    opt
}

pub async fn create_db_pool(config: &Config) -> Result<DbPool, DbErr> {
    tracing::debug!(
        max_connections = config.max_connections,
        schema = ?config.db_schema,
        "Connecting to database"
    );
    Database::connect(connect_options(config)).await
}

/// 識別子として埋め込めるようにダブルクォートで囲む
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

// スキーマが存在するか確認するヘルパー関数
pub async fn schema_exists<C: ConnectionTrait>(conn: &C, schema: &str) -> Result<bool, DbErr> {
    let result = conn
        .query_one(Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT EXISTS (SELECT 1 FROM information_schema.schemata WHERE schema_name = $1) AS \"exists\"",
            [schema.into()],
        ))
        .await?;

    match result {
        Some(row) => row.try_get("", "exists"),
        None => Ok(false),
    }
}

// スキーマを作成するヘルパー関数
pub async fn create_schema<C: ConnectionTrait>(conn: &C, schema: &str) -> Result<(), DbErr> {
    conn.execute_unprepared(&format!(
        "CREATE SCHEMA IF NOT EXISTS {}",
        quote_identifier(schema)
    ))
    .await?;
    Ok(())
}
