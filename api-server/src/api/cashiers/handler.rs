//! Cashier API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::ApiResponse;

use crate::core::ServerState;
use crate::db::repository::SaleRepository;
use crate::reports::{CashierPerformance, cashier_performance};
use crate::utils::{AppResult, ok, resolve_period};

#[derive(Debug, Deserialize)]
pub struct PerformanceQuery {
    pub period: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// GET /api/cashiers/performance - 按收银员聚合的销售表现
pub async fn performance(
    State(state): State<ServerState>,
    Query(query): Query<PerformanceQuery>,
) -> AppResult<Json<ApiResponse<Vec<CashierPerformance>>>> {
    let window = resolve_period(
        query.period.as_deref(),
        query.start.as_deref(),
        query.end.as_deref(),
    );

    let repo = SaleRepository::new(state.get_db());
    let sales = repo.find_in_range(window.start, window.end).await?;

    Ok(ok(cashier_performance(&sales)))
}
