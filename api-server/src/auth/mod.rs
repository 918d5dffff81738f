//! API Key 认证中间件
//!
//! 所有 `/api` 路由都要求 `x-api-key` 头与服务端持有的静态密钥一致。
//! 密钥错误或缺失统一返回 401，不泄露任何细节，也不会产生副作用
//! (处理器和文档库都不会被触达)。
//!
//! # 跳过认证的路径
//!
//! - `OPTIONS *` (CORS 预检)
//! - 非 `/api/` 路径 (让它们正常返回 404，`/version.json` 也在此列)
//! - `/api/health` (存活检查)

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

pub const API_KEY_HEADER: &str = "x-api-key";

/// 常数时间比较，避免密钥逐字节早退
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// 认证中间件 - 校验静态 API Key
pub async fn require_api_key(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    // 存活检查跳过认证
    if path == "/api/health" {
        return Ok(next.run(req).await);
    }

    // 未配置密钥时一律拒绝
    let Some(secret) = state.config.api_key.as_deref() else {
        security_log!("WARN", "api_key_unconfigured", uri = format!("{:?}", req.uri()));
        return Err(AppError::unauthorized());
    };

    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok());

    match provided {
        Some(key) if constant_time_eq(key.as_bytes(), secret.as_bytes()) => {
            Ok(next.run(req).await)
        }
        Some(_) => {
            security_log!("WARN", "api_key_mismatch", uri = format!("{:?}", req.uri()));
            Err(AppError::unauthorized())
        }
        None => {
            security_log!("WARN", "api_key_missing", uri = format!("{:?}", req.uri()));
            Err(AppError::unauthorized())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_time_eq_matches_equal_keys() {
        assert!(constant_time_eq(b"bakery-secret", b"bakery-secret"));
    }

    #[test]
    fn constant_time_eq_rejects_differences() {
        assert!(!constant_time_eq(b"bakery-secret", b"bakery-secreT"));
        assert!(!constant_time_eq(b"short", b"longer-key"));
        assert!(!constant_time_eq(b"", b"x"));
    }
}
