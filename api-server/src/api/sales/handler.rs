//! Sales API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use shared::ApiResponse;
use shared::models::Sale;

use crate::core::ServerState;
use crate::db::repository::SaleRepository;
use crate::reports::{SalesSummary, sales_summary};
use crate::utils::{AppResult, ok, resolve_period};

/// 最近销售的默认/最大条数
const DEFAULT_RECENT_LIMIT: i64 = 10;
const MAX_RECENT_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub period: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}

/// GET /api/sales/summary - 时间窗口内的销售汇总
pub async fn summary(
    State(state): State<ServerState>,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<ApiResponse<SalesSummary>>> {
    let window = resolve_period(
        query.period.as_deref(),
        query.start.as_deref(),
        query.end.as_deref(),
    );

    tracing::debug!(
        period = %window.label,
        start = window.start,
        end = window.end,
        "Fetching sales summary"
    );

    let repo = SaleRepository::new(state.get_db());
    let sales = repo.find_in_range(window.start, window.end).await?;

    Ok(ok(sales_summary(&sales, &window)))
}

/// GET /api/sales/recent - 最近的销售记录
///
/// limit 缺失取默认值，超上限截断 (策略选择，不报错)。
pub async fn recent(
    State(state): State<ServerState>,
    Query(query): Query<RecentQuery>,
) -> AppResult<Json<ApiResponse<Vec<Sale>>>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT);

    let repo = SaleRepository::new(state.get_db());
    let sales = repo.find_recent(limit).await?;

    Ok(ok(sales))
}
