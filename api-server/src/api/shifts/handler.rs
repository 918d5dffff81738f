//! Shift API Handlers

use axum::{Json, extract::State};
use shared::ApiResponse;
use shared::models::Shift;

use crate::core::ServerState;
use crate::db::repository::ShiftRepository;
use crate::utils::{AppResult, ok};

/// GET /api/shifts/active - 所有活跃班次
pub async fn active(State(state): State<ServerState>) -> AppResult<Json<ApiResponse<Vec<Shift>>>> {
    let repo = ShiftRepository::new(state.get_db());
    let shifts = repo.find_active().await?;
    Ok(ok(shifts))
}
