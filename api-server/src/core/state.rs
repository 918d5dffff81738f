use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;

use crate::core::Config;
use crate::middleware::RateLimiter;
use crate::utils::AppError;

/// 服务器状态 - 持有所有共享服务的引用
///
/// ServerState 是网关的核心数据结构。使用 Arc 实现浅拷贝，
/// 每个请求处理器持有一份克隆，所有权成本极低。
///
/// # 组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Client> | 托管文档库的 WebSocket 客户端 |
/// | rate_limiter | Arc<RateLimiter> | 固定窗口限流器 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 托管文档库客户端 (只读查询)
    pub db: Surreal<Client>,
    /// 按来源地址限流
    pub rate_limiter: Arc<RateLimiter>,
}

impl ServerState {
    /// 使用已有文档库连接构造状态 (测试场景)
    pub fn with_store(config: Config, db: Surreal<Client>) -> Self {
        let rate_limiter = Arc::new(RateLimiter::new(
            config.rate_limit_window_ms,
            config.rate_limit_max_requests,
        ));
        Self {
            config,
            db,
            rate_limiter,
        }
    }

    /// 初始化服务器状态
    ///
    /// 连接托管文档库并选择 namespace/database。文档库是外部协作方，
    /// 这里只消费它的查询契约。
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        if config.api_key.is_none() {
            tracing::warn!(
                "API_KEY is not configured - every authenticated route will be rejected"
            );
        }

        let endpoint = config
            .store_endpoint
            .trim_start_matches("ws://")
            .trim_start_matches("wss://")
            .to_string();

        let db: Surreal<Client> = Surreal::init();
        db.connect::<Ws>(endpoint.as_str())
            .await
            .map_err(|e| AppError::store(format!("Failed to connect to document store: {e}")))?;

        if let Some(cred) = config.load_store_credential() {
            db.signin(Root {
                username: &cred.username,
                password: &cred.password,
            })
            .await
            .map_err(|e| AppError::store(format!("Store authentication failed: {e}")))?;
        }

        db.use_ns(config.store_namespace.clone())
            .use_db(config.store_database.clone())
            .await
            .map_err(|e| AppError::store(format!("Failed to select store database: {e}")))?;

        tracing::info!(
            endpoint = %endpoint,
            namespace = %config.store_namespace,
            database = %config.store_database,
            "Document store connection established"
        );

        Ok(Self::with_store(config.clone(), db))
    }

    /// 获取文档库客户端
    pub fn get_db(&self) -> Surreal<Client> {
        self.db.clone()
    }
}
