use std::path::Path;

use serde::Deserialize;

/// 服务器配置 - 报表网关的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | API_KEY | (无) | 静态 API Key，未设置时所有认证路由拒绝 |
/// | CORS_ORIGINS | * | 允许的跨域来源 (逗号分隔) |
/// | RATE_LIMIT_WINDOW_MS | 60000 | 限流窗口 (毫秒) |
/// | RATE_LIMIT_MAX_REQUESTS | 100 | 窗口内每来源请求上限 |
/// | STORE_ENDPOINT | localhost:8000 | 文档库 WebSocket 地址 |
/// | STORE_NAMESPACE | crumb | 文档库命名空间 |
/// | STORE_DATABASE | pos | 文档库数据库名 |
/// | STORE_CREDENTIAL_FILE | (无) | 文档库凭证 JSON 文件路径 |
/// | VERSION_FILE | version.json | 版本描述符文件路径 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// API_KEY=secret HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 静态 API Key (x-api-key 头)
    pub api_key: Option<String>,
    /// 允许的 CORS 来源，`*` 表示全部
    pub cors_origins: Vec<String>,
    /// 限流窗口 (毫秒)
    pub rate_limit_window_ms: u64,
    /// 窗口内每来源请求上限
    pub rate_limit_max_requests: u32,
    /// 文档库地址 (host:port)
    pub store_endpoint: String,
    /// 文档库命名空间
    pub store_namespace: String,
    /// 文档库数据库名
    pub store_database: String,
    /// 文档库凭证文件路径
    pub store_credential_file: Option<String>,
    /// version.json 路径
    pub version_file: String,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            api_key: std::env::var("API_KEY").ok().filter(|k| !k.is_empty()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            rate_limit_window_ms: std::env::var("RATE_LIMIT_WINDOW_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(60_000),
            rate_limit_max_requests: std::env::var("RATE_LIMIT_MAX_REQUESTS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(100),
            store_endpoint: std::env::var("STORE_ENDPOINT")
                .unwrap_or_else(|_| "localhost:8000".into()),
            store_namespace: std::env::var("STORE_NAMESPACE").unwrap_or_else(|_| "crumb".into()),
            store_database: std::env::var("STORE_DATABASE").unwrap_or_else(|_| "pos".into()),
            store_credential_file: std::env::var("STORE_CREDENTIAL_FILE").ok(),
            version_file: std::env::var("VERSION_FILE").unwrap_or_else(|_| "version.json".into()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否允许任意来源 (CORS)
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }

    /// 加载文档库凭证 (如配置了凭证文件)
    pub fn load_store_credential(&self) -> Option<StoreCredential> {
        let path = self.store_credential_file.as_deref()?;
        StoreCredential::from_file(path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// 文档库登录凭证
///
/// 从 JSON 文件加载：`{ "username": "...", "password": "..." }`
#[derive(Debug, Clone, Deserialize)]
pub struct StoreCredential {
    pub username: String,
    pub password: String,
}

impl StoreCredential {
    /// 读取凭证文件，任何失败都返回 None 并记录警告
    pub fn from_file(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to read store credential file {:?}: {}", path, e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(cred) => Some(cred),
            Err(e) => {
                tracing::warn!("Invalid store credential file {:?}: {}", path, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, r#"{"username":"root","password":"secret"}"#).unwrap();

        let cred = StoreCredential::from_file(&path).unwrap();
        assert_eq!(cred.username, "root");
        assert_eq!(cred.password, "secret");
    }

    #[test]
    fn credential_missing_file_is_none() {
        assert!(StoreCredential::from_file("/nonexistent/store.json").is_none());
    }
}
