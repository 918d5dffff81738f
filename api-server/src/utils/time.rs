//! 时间窗口计算 - 报表周期 (period token) 解析
//!
//! 所有 period → 时间戳转换统一在 API handler 层完成，
//! repository 层只接收 `i64` Unix millis。
//!
//! 支持的 period token：`today` | `week` | `month` | `range`。
//! 无法识别或缺失的 token 回退到 `today` (策略选择，不报错)。

use chrono::{Datelike, Duration, Local, NaiveDate};

/// 解析后的报表时间窗口，`end` 为开区间 (`< end`)
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PeriodWindow {
    /// 实际生效的 token (回退后)
    pub label: String,
    /// Unix millis，含
    pub start: i64,
    /// Unix millis，不含
    pub end: i64,
}

/// 日期 00:00:00 → Unix millis (本地时区)
///
/// DST gap fallback: 如果本地时间不存在 (夏令时跳跃)，fallback 到 UTC。
fn day_start_millis(date: NaiveDate) -> i64 {
    let naive = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    naive
        .and_local_timezone(Local)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// 次日 00:00:00 → Unix millis，用于 `< end` 语义
fn day_end_millis(date: NaiveDate) -> i64 {
    day_start_millis(date.succ_opt().unwrap_or(date))
}

/// 解析日期字符串 (YYYY-MM-DD)
fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// 以显式"今天"解析时间窗口 (测试用)
pub fn resolve_period_at(
    period: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> PeriodWindow {
    let today_window = || PeriodWindow {
        label: "today".to_string(),
        start: day_start_millis(today),
        end: day_end_millis(today),
    };

    match period.unwrap_or("today") {
        "today" => today_window(),
        "week" => {
            let weekday = today.weekday().num_days_from_monday();
            let week_start = today - Duration::days(weekday as i64);
            PeriodWindow {
                label: "week".to_string(),
                start: day_start_millis(week_start),
                end: day_end_millis(today),
            }
        }
        "month" => {
            let month_start = today.with_day(1).unwrap_or(today);
            PeriodWindow {
                label: "month".to_string(),
                start: day_start_millis(month_start),
                end: day_end_millis(today),
            }
        }
        "range" => match (start.and_then(parse_date), end.and_then(parse_date)) {
            (Some(s), Some(e)) if s <= e => PeriodWindow {
                label: "range".to_string(),
                start: day_start_millis(s),
                end: day_end_millis(e),
            },
            // 区间缺失或无效：回退到 today (策略选择，不报错)
            _ => today_window(),
        },
        _ => today_window(),
    }
}

/// 解析时间窗口 (本地时区的当前日期)
pub fn resolve_period(period: Option<&str>, start: Option<&str>, end: Option<&str>) -> PeriodWindow {
    resolve_period_at(period, start, end, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn today_spans_one_day() {
        let w = resolve_period_at(Some("today"), None, None, date(2026, 8, 20));
        assert_eq!(w.label, "today");
        assert_eq!(w.start, day_start_millis(date(2026, 8, 20)));
        assert_eq!(w.end, day_start_millis(date(2026, 8, 21)));
    }

    #[test]
    fn week_starts_on_monday() {
        // 2026-08-20 is a Thursday; week starts 2026-08-17 (Monday)
        let w = resolve_period_at(Some("week"), None, None, date(2026, 8, 20));
        assert_eq!(w.start, day_start_millis(date(2026, 8, 17)));
        assert_eq!(w.end, day_start_millis(date(2026, 8, 21)));
    }

    #[test]
    fn month_starts_on_the_first() {
        let w = resolve_period_at(Some("month"), None, None, date(2026, 8, 20));
        assert_eq!(w.start, day_start_millis(date(2026, 8, 1)));
    }

    #[test]
    fn explicit_range_end_is_exclusive_next_day() {
        let w = resolve_period_at(
            Some("range"),
            Some("2026-08-01"),
            Some("2026-08-03"),
            date(2026, 8, 20),
        );
        assert_eq!(w.label, "range");
        assert_eq!(w.start, day_start_millis(date(2026, 8, 1)));
        assert_eq!(w.end, day_start_millis(date(2026, 8, 4)));
    }

    #[test]
    fn malformed_period_falls_back_to_today() {
        let today = date(2026, 8, 20);
        for period in [Some("fortnight"), Some(""), None] {
            let w = resolve_period_at(period, None, None, today);
            assert_eq!(w.label, "today");
        }
    }

    #[test]
    fn invalid_range_falls_back_to_today() {
        let today = date(2026, 8, 20);
        // Missing end date
        let w = resolve_period_at(Some("range"), Some("2026-08-01"), None, today);
        assert_eq!(w.label, "today");
        // Garbage dates
        let w = resolve_period_at(Some("range"), Some("not-a-date"), Some("also-not"), today);
        assert_eq!(w.label, "today");
        // Inverted range
        let w = resolve_period_at(
            Some("range"),
            Some("2026-08-10"),
            Some("2026-08-01"),
            today,
        );
        assert_eq!(w.label, "today");
    }
}
