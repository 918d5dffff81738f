//! HTTP 中间件 - 限流与请求日志

pub mod logging;
pub mod rate_limit;

pub use logging::log_request;
pub use rate_limit::{RateLimiter, rate_limit};
