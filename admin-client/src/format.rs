//! 货币与日期格式化

use chrono::{Local, TimeZone};

/// 金额格式化：两位小数 + 货币符号
pub fn format_currency(amount: f64) -> String {
    format!("{amount:.2}€")
}

/// 毫秒时间戳 → 本地日期 (DD/MM/YYYY)
pub fn format_date(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%d/%m/%Y").to_string(),
        None => String::new(),
    }
}

/// 毫秒时间戳 → 本地时间 (HH:MM)
pub fn format_time(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => String::new(),
    }
}

/// 毫秒时间戳 → 本地日期时间
pub fn format_datetime(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        None => String::new(),
    }
}
