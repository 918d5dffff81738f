//! 工具模块 - 错误、日志、时间窗口

pub mod error;
pub mod logger;
pub mod result;
pub mod time;

pub use error::{AppError, ok};
pub use result::AppResult;
pub use time::{PeriodWindow, resolve_period};
