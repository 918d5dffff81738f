//! 健康检查路由
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/health | GET | 存活检查 | 无 |
//!
//! # 响应示例
//!
//! ```json
//! {
//!   "success": true,
//!   "data": { "status": "healthy", "version": "0.1.0", "uptime_seconds": 42 }
//! }
//! ```

use axum::{Json, Router, routing::get};
use serde::Serialize;
use shared::ApiResponse;
use std::time::SystemTime;

use crate::core::ServerState;
use crate::utils::ok;

/// 健康检查路由 - 公共路由 (无需认证)
pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    /// 状态 (healthy)
    status: &'static str,
    /// 版本号
    version: &'static str,
    /// 运行时间 (秒)
    uptime_seconds: u64,
}

// 服务器启动时间 (懒加载静态变量)
static START_TIME: std::sync::OnceLock<SystemTime> = std::sync::OnceLock::new();

fn get_uptime_seconds() -> u64 {
    let start = START_TIME.get_or_init(SystemTime::now);
    SystemTime::now()
        .duration_since(*start)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// 存活检查 - 不触达文档库，永远成功
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: get_uptime_seconds(),
    })
}
