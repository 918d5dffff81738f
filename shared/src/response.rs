//! API 统一响应结构
//!
//! 所有报表接口的响应信封：
//!
//! ```json
//! { "success": true, "data": { ... } }
//! { "success": false, "error": "unauthorized", "message": "Invalid API key" }
//! ```

use serde::{Deserialize, Serialize};

/// 成功响应信封
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// 固定为 true
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// 错误响应体
///
/// `error` 是稳定的机器可读错误码，`message` 是人类可读描述。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// 固定为 false
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
        }
    }
}
