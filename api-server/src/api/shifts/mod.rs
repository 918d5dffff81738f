//! Shift API 模块 (班次)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/shifts/active", get(handler::active))
}
