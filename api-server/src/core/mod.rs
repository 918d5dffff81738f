//! Core 模块 - 配置、状态、服务器

pub mod config;
pub mod server;
pub mod state;

pub use config::{Config, StoreCredential};
pub use server::{Server, build_app, into_service};
pub use state::ServerState;
