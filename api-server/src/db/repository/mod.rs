//! Repository Module
//!
//! Read-only queries against the hosted document store.

pub mod sale;
pub mod shift;

pub use sale::SaleRepository;
pub use shift::ShiftRepository;

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::Client;
use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Store(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Store(msg) => AppError::store(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 字符串
// =============================================================================
//
// 文档库内的 record id 在查询侧用 `<string>id AS id` 投影成字符串，
// 模型层 (shared::models) 因此不依赖 surrealdb 类型。

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Client>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Client>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Client> {
        &self.db
    }
}
