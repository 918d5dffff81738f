//! 文档库模块
//!
//! 托管文档库 (SurrealDB remote) 的查询层。文档库是外部协作方，
//! 这里只消费集合式查询契约 (等值/区间筛选)，不做任何 schema 管理。

pub mod repository;

pub use repository::{RepoError, RepoResult, SaleRepository, ShiftRepository};
