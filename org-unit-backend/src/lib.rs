// src/lib.rs
//! 組織単位の階層（マテリアライズドパス）と、各組織単位に割り当てられた
//! ロール・メンバーの検索を提供するライブラリ。
//!
//! コードの採番と表示名の一意性は呼び出し側のドメインサービスが保証する。
//! トランザクションの境界も呼び出し側が持つ。
pub mod config;
pub mod db;
pub mod domain;
pub mod dto;
pub mod error;
pub mod logging;
pub mod repository;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{AppError, AppResult};
pub use repository::organization_unit_association_repository::OrganizationUnitAssociationRepository;
pub use repository::organization_unit_repository::OrganizationUnitRepository;
pub use tokio_util::sync::CancellationToken;
