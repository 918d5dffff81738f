//! 版本描述符路由
//!
//! 管理端浏览器定期拉取 `/version.json` 判断是否提示更新。
//! 路径在 `/api` 前缀之外，不需要 API Key (静态文件契约)。

use axum::{Json, Router, extract::State, routing::get};
use shared::VersionDescriptor;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/version.json", get(version_descriptor))
}

/// GET /version.json - 当前发布版本
///
/// 文件缺失或损坏时回退到编译期版本号 (无变更列表)，
/// 轮询端永远拿得到合法的描述符。
pub async fn version_descriptor(State(state): State<ServerState>) -> Json<VersionDescriptor> {
    let descriptor = match tokio::fs::read_to_string(&state.config.version_file).await {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(
                "Invalid version file {}: {}",
                state.config.version_file,
                e
            );
            VersionDescriptor::new(env!("CARGO_PKG_VERSION"))
        }),
        Err(e) => {
            tracing::debug!(
                "Version file {} unreadable ({}), using crate version",
                state.config.version_file,
                e
            );
            VersionDescriptor::new(env!("CARGO_PKG_VERSION"))
        }
    };
    Json(descriptor)
}
