//! Product API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::ApiResponse;

use crate::core::ServerState;
use crate::db::repository::SaleRepository;
use crate::reports::{PerformanceSort, ProductPerformance, product_performance};
use crate::utils::{AppResult, ok, resolve_period};

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
pub struct PerformanceQuery {
    pub period: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub limit: Option<usize>,
    /// revenue (默认) | quantity
    pub sort: Option<String>,
}

/// GET /api/products/performance - 窗口内商品表现排名
pub async fn performance(
    State(state): State<ServerState>,
    Query(query): Query<PerformanceQuery>,
) -> AppResult<Json<ApiResponse<Vec<ProductPerformance>>>> {
    let window = resolve_period(
        query.period.as_deref(),
        query.start.as_deref(),
        query.end.as_deref(),
    );
    let sort = PerformanceSort::parse(query.sort.as_deref());
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let repo = SaleRepository::new(state.get_db());
    let sales = repo.find_in_range(window.start, window.end).await?;

    Ok(ok(product_performance(&sales, sort, limit)))
}
