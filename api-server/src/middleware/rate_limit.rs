//! 固定窗口限流
//!
//! 按来源地址维护独立的请求窗口。超过上限的请求统一返回 429，
//! 与路由无关；下一个窗口自动恢复。

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;
use std::net::SocketAddr;

use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// 单个来源的窗口计数
#[derive(Debug, Clone, Copy)]
struct Bucket {
    window_start: i64,
    count: u32,
}

/// 固定窗口限流器
///
/// 使用 DashMap 实现无锁并发的按来源计数。窗口过期后首个请求
/// 重置计数，不做滑动窗口平滑。
#[derive(Debug)]
pub struct RateLimiter {
    window_ms: u64,
    max_requests: u32,
    buckets: DashMap<String, Bucket>,
}

impl RateLimiter {
    pub fn new(window_ms: u64, max_requests: u32) -> Self {
        Self {
            window_ms,
            max_requests,
            buckets: DashMap::new(),
        }
    }

    /// 记录一次请求并判断是否放行
    pub fn check(&self, source: &str) -> bool {
        self.check_at(source, shared::util::now_millis())
    }

    /// 以显式时间戳记录请求 (测试用)
    pub fn check_at(&self, source: &str, now: i64) -> bool {
        let mut entry = self
            .buckets
            .entry(source.to_string())
            .or_insert(Bucket {
                window_start: now,
                count: 0,
            });

        if now - entry.window_start >= self.window_ms as i64 {
            entry.window_start = now;
            entry.count = 0;
        }

        entry.count += 1;
        entry.count <= self.max_requests
    }
}

/// 从请求提取来源标识
///
/// 优先使用对端地址，其次 `x-forwarded-for` 的首个地址；
/// 两者都缺失时归入共享的 "unknown" 桶。
fn request_source(req: &Request) -> String {
    if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }
    req.headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// 限流中间件
///
/// 作用于所有 `/api` 路由，在认证之前执行，与路由无关。
pub async fn rate_limit(
    State(state): State<ServerState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !req.uri().path().starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    let source = request_source(&req);
    if !state.rate_limiter.check(&source) {
        security_log!(
            "WARN",
            "rate_limited",
            source = source,
            uri = format!("{:?}", req.uri())
        );
        return Err(AppError::rate_limited());
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_within_ceiling_are_allowed() {
        let limiter = RateLimiter::new(1000, 3);
        for _ in 0..3 {
            assert!(limiter.check_at("10.0.0.1", 0));
        }
    }

    #[test]
    fn requests_over_ceiling_are_rejected_until_next_window() {
        let limiter = RateLimiter::new(1000, 2);
        assert!(limiter.check_at("10.0.0.1", 0));
        assert!(limiter.check_at("10.0.0.1", 10));
        // Third request in the same window is rejected
        assert!(!limiter.check_at("10.0.0.1", 20));
        assert!(!limiter.check_at("10.0.0.1", 999));
        // Next window admits again
        assert!(limiter.check_at("10.0.0.1", 1000));
        assert!(limiter.check_at("10.0.0.1", 1001));
        assert!(!limiter.check_at("10.0.0.1", 1002));
    }

    #[test]
    fn sources_are_counted_independently() {
        let limiter = RateLimiter::new(1000, 1);
        assert!(limiter.check_at("10.0.0.1", 0));
        assert!(limiter.check_at("10.0.0.2", 0));
        assert!(!limiter.check_at("10.0.0.1", 1));
    }
}
