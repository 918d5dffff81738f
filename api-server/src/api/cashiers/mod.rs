//! Cashier API 模块 (收银员表现)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/cashiers/performance", get(handler::performance))
}
