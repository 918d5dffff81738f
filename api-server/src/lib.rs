//! Crumb API Server - 烘焙店 POS 报表网关
//!
//! # 架构概述
//!
//! 本模块是报表 API 网关的主入口，提供以下核心功能：
//!
//! - **认证** (`auth`): 静态 API Key 校验 (`x-api-key` 头)
//! - **限流** (`middleware`): 按来源地址的固定窗口限流
//! - **文档库** (`db`): 托管 SurrealDB 文档库的只读查询
//! - **报表** (`reports`): 销售汇总、商品/收银员表现的纯内存聚合
//! - **HTTP API** (`api`): RESTful 只读报表接口
//!
//! # 模块结构
//!
//! ```text
//! api-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # API Key 认证中间件
//! ├── middleware/    # 限流、请求日志
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 文档库客户端与仓储
//! ├── reports/       # 聚合计算 (纯函数)
//! └── utils/         # 错误、日志、时间窗口
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod middleware;
pub mod reports;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   ______                      __
  / ____/______  ______ ___  / /_
 / /   / ___/ / / / __ `__ \/ __ \
/ /___/ /  / /_/ / / / / / / /_/ /
\____/_/   \__,_/_/ /_/ /_/_.___/
    "#
    );
}
