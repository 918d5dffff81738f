//! Product API 模块 (商品表现)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/products/performance", get(handler::performance))
}
