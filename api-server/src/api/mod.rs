//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查 (无需认证)
//! - [`version`] - 版本描述符 `/version.json` (无需认证)
//! - [`sales`] - 销售汇总与最近销售
//! - [`products`] - 商品表现
//! - [`shifts`] - 活跃班次
//! - [`cashiers`] - 收银员表现
//!
//! 所有 `/api` 路由都是只读的；网关不暴露任何写接口。

pub mod cashiers;
pub mod health;
pub mod products;
pub mod sales;
pub mod shifts;
pub mod version;

// Re-export common types for handlers
pub use crate::utils::{AppResult, ok};
