//! 通知组件
//!
//! 叠放式瞬时通知。每条通知有独立的自动消失定时器，互不协调；
//! 不限制数量，也不合并重复消息。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// 默认展示时长
pub const DEFAULT_DURATION: Duration = Duration::from_secs(4);

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastLevel::Success => "success",
            ToastLevel::Info => "info",
            ToastLevel::Warning => "warning",
            ToastLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
    pub created_at: i64,
}

/// 通知管理器
///
/// Clone 共享同一份通知列表，定时器任务也持有同一份。
#[derive(Clone, Default)]
pub struct ToastManager {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: AtomicU64,
    toasts: Mutex<Vec<Toast>>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// 显示通知并安排自动消失
    ///
    /// 没有 tokio 运行时可用时 (同步测试场景) 只做手动消失。
    pub fn show(&self, level: ToastLevel, message: impl Into<String>, duration: Duration) -> u64 {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let toast = Toast {
            id,
            level,
            message: message.into(),
            created_at: shared::util::now_millis(),
        };

        if let Ok(mut toasts) = self.inner.toasts.lock() {
            toasts.push(toast);
        }

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let manager = self.clone();
            handle.spawn(async move {
                tokio::time::sleep(duration).await;
                manager.dismiss(id);
            });
        }

        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.show(ToastLevel::Success, message, DEFAULT_DURATION)
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.show(ToastLevel::Info, message, DEFAULT_DURATION)
    }

    pub fn warning(&self, message: impl Into<String>) -> u64 {
        self.show(ToastLevel::Warning, message, DEFAULT_DURATION)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.show(ToastLevel::Error, message, DEFAULT_DURATION)
    }

    /// 手动消除；通知已不存在时返回 false
    pub fn dismiss(&self, id: u64) -> bool {
        let Ok(mut toasts) = self.inner.toasts.lock() else {
            return false;
        };
        let before = toasts.len();
        toasts.retain(|t| t.id != id);
        toasts.len() != before
    }

    /// 当前在屏的通知 (按显示顺序)
    pub fn active(&self) -> Vec<Toast> {
        self.inner
            .toasts
            .lock()
            .map(|t| t.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_stack_in_order() {
        let manager = ToastManager::new();
        manager.success("Product saved");
        manager.error("Store unreachable");

        let active = manager.active();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].level, ToastLevel::Success);
        assert_eq!(active[1].level, ToastLevel::Error);
    }

    #[test]
    fn manual_dismiss_removes_only_target() {
        let manager = ToastManager::new();
        let first = manager.info("one");
        let second = manager.warning("two");

        assert!(manager.dismiss(first));
        assert!(!manager.dismiss(first));

        let active = manager.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, second);
    }

    #[tokio::test(start_paused = true)]
    async fn toast_auto_dismisses_after_duration() {
        let manager = ToastManager::new();
        manager.show(ToastLevel::Success, "saved", Duration::from_secs(4));
        assert_eq!(manager.active().len(), 1);

        tokio::time::sleep(Duration::from_secs(5)).await;
        // Let the spawned timer task run
        tokio::task::yield_now().await;
        assert!(manager.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn timers_are_independent_per_toast() {
        let manager = ToastManager::new();
        manager.show(ToastLevel::Info, "short", Duration::from_secs(1));
        let long = manager.show(ToastLevel::Info, "long", Duration::from_secs(10));

        tokio::time::sleep(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;

        let active = manager.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, long);
    }
}
