//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::net::SocketAddr;

use axum::Router;
use axum::middleware::from_fn_with_state;
use http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

use crate::api;
use crate::middleware::{log_request, rate_limit};
use crate::auth::require_api_key;
use crate::core::{Config, ServerState};
use crate::utils::{AppError, AppResult};

/// 组装所有业务路由 (不含中间件)
pub fn build_app() -> Router<ServerState> {
    Router::new()
        .merge(api::health::router())
        .merge(api::version::router())
        .merge(api::sales::router())
        .merge(api::products::router())
        .merge(api::shifts::router())
        .merge(api::cashiers::router())
}

/// 构建 CORS 层
///
/// `*` 允许任意来源；否则只放行配置中可解析的来源。
fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// 将路由和状态组装成可直接服务的 Router
///
/// axum 的 layer 自底向上包裹，运行时顺序为：
/// 访问日志 → CORS → 限流 → 认证 → 业务处理器。
/// 限流先于认证，被限流的请求不消耗认证逻辑。
pub fn into_service(state: ServerState) -> Router {
    let cors = cors_layer(&state.config);

    build_app()
        .layer(from_fn_with_state(state.clone(), require_api_key))
        .layer(from_fn_with_state(state.clone(), rate_limit))
        .with_state(state)
        .layer(cors)
        .layer(axum::middleware::from_fn(log_request))
}

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// 使用已初始化的状态构造 (测试或预热场景)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> AppResult<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => ServerState::initialize(&self.config).await?,
        };

        let app = into_service(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("🥐 Crumb API gateway starting on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

        Ok(())
    }
}
