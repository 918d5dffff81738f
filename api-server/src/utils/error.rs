//! 统一错误处理
//!
//! 提供应用级错误类型和响应辅助函数：
//! - [`AppError`] - 应用错误枚举
//! - [`ok`] - 成功响应信封
//!
//! # 错误分类
//!
//! | 错误码 | HTTP | 说明 |
//! |--------|------|------|
//! | unauthorized | 401 | API Key 缺失或错误 |
//! | rate_limited | 429 | 超过来源请求上限 |
//! | not_found | 404 | 资源不存在 |
//! | invalid_request | 400 | 请求参数无效 |
//! | store_error | 500 | 文档库查询失败 (调用方自行重试) |
//! | internal_error | 500 | 内部错误 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::{ApiError as ApiErrorBody, ApiResponse};
use tracing::error;

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 认证/限流 (4xx) ==========
    #[error("Invalid or missing API key")]
    /// API Key 缺失或错误 (401)
    Unauthorized,

    #[error("Too many requests")]
    /// 超过限流上限 (429)
    RateLimited,

    // ========== 业务逻辑错误 (4xx) ==========
    #[error("Resource not found: {0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("Invalid request: {0}")]
    /// 请求无效 (400)
    Invalid(String),

    // ========== 系统错误 (5xx) ==========
    #[error("Document store error: {0}")]
    /// 文档库错误 (500)，对调用方只暴露通用消息
    Store(String),

    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Invalid or missing API key".to_string(),
            ),
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                "Too many requests, please retry later".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, "invalid_request", msg.clone()),
            AppError::Store(msg) => {
                error!(target: "store", error = %msg, "Document store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "store_error",
                    "Document store request failed".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ApiErrorBody::new(code, message));
        (status, body).into_response()
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn rate_limited() -> Self {
        Self::RateLimited
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

// ========== Helper functions ==========

/// Create a successful response envelope
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::new(data))
}
