//! 模态框控制器
//!
//! 同一时刻只有一个活跃模态框。再次 open 直接替换内容和回调，
//! 不做堆叠。保存回调返回 `false` 表示校验未通过，模态框保持
//! 打开；返回 `true` 或没有回调则关闭。

/// 保存回调：返回 false 保持模态框打开
pub type SaveCallback = Box<dyn FnMut() -> bool + Send>;
pub type CancelCallback = Box<dyn FnMut() + Send>;

/// 模态框配置
pub struct ModalOptions {
    pub title: String,
    pub content: String,
    /// 自定义底栏内容，替换默认的保存/取消按钮
    pub custom_footer: Option<String>,
    pub hide_footer: bool,
    pub save_text: String,
    /// None 时不显示取消按钮
    pub cancel_text: Option<String>,
    pub save_class: String,
    pub width: Option<String>,
    pub on_save: Option<SaveCallback>,
    pub on_cancel: Option<CancelCallback>,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            custom_footer: None,
            hide_footer: false,
            save_text: "Save".into(),
            cancel_text: Some("Cancel".into()),
            save_class: "btn-primary".into(),
            width: None,
            on_save: None,
            on_cancel: None,
        }
    }
}

impl ModalOptions {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn save_text(mut self, text: impl Into<String>) -> Self {
        self.save_text = text.into();
        self
    }

    pub fn cancel_text(mut self, text: Option<String>) -> Self {
        self.cancel_text = text;
        self
    }

    pub fn custom_footer(mut self, footer: impl Into<String>) -> Self {
        self.custom_footer = Some(footer.into());
        self
    }

    pub fn hide_footer(mut self) -> Self {
        self.hide_footer = true;
        self
    }

    pub fn save_class(mut self, class: impl Into<String>) -> Self {
        self.save_class = class.into();
        self
    }

    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.width = Some(width.into());
        self
    }

    pub fn on_save(mut self, cb: impl FnMut() -> bool + Send + 'static) -> Self {
        self.on_save = Some(Box::new(cb));
        self
    }

    pub fn on_cancel(mut self, cb: impl FnMut() + Send + 'static) -> Self {
        self.on_cancel = Some(Box::new(cb));
        self
    }
}

/// 模态框控制器
#[derive(Default)]
pub struct ModalController {
    active: Option<ModalOptions>,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    /// 打开模态框；已打开时替换内容和回调
    pub fn open(&mut self, options: ModalOptions) {
        self.active = Some(options);
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn title(&self) -> Option<&str> {
        self.active.as_ref().map(|m| m.title.as_str())
    }

    pub fn content(&self) -> Option<&str> {
        self.active.as_ref().map(|m| m.content.as_str())
    }

    /// 触发保存
    ///
    /// 回调返回 false 保持打开 (校验约定)；true 或无回调则关闭。
    pub fn save(&mut self) {
        let Some(modal) = self.active.as_mut() else {
            return;
        };

        let keep_open = match modal.on_save.as_mut() {
            Some(cb) => !cb(),
            None => false,
        };

        if !keep_open {
            self.active = None;
        }
    }

    /// 触发取消：执行 on_cancel 后关闭
    pub fn cancel(&mut self) {
        let Some(mut modal) = self.active.take() else {
            return;
        };
        if let Some(cb) = modal.on_cancel.as_mut() {
            cb();
        }
    }

    /// 直接关闭，不触发任何回调
    pub fn close(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    #[test]
    fn save_without_callback_closes() {
        let mut modal = ModalController::new();
        modal.open(ModalOptions::new("Edit product", "..."));
        assert!(modal.is_open());

        modal.save();
        assert!(!modal.is_open());
    }

    #[test]
    fn save_callback_false_keeps_open() {
        let mut modal = ModalController::new();
        modal.open(ModalOptions::new("Edit product", "...").on_save(|| false));

        modal.save();
        assert!(modal.is_open());
    }

    #[test]
    fn save_callback_true_closes() {
        let saved = Arc::new(AtomicBool::new(false));
        let saved_cb = saved.clone();

        let mut modal = ModalController::new();
        modal.open(ModalOptions::new("Edit product", "...").on_save(move || {
            saved_cb.store(true, Ordering::SeqCst);
            true
        }));

        modal.save();
        assert!(saved.load(Ordering::SeqCst));
        assert!(!modal.is_open());
    }

    #[test]
    fn failed_save_can_retry_until_valid() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_cb = attempts.clone();

        let mut modal = ModalController::new();
        modal.open(ModalOptions::new("Edit product", "...").on_save(move || {
            // 第三次才校验通过
            attempts_cb.fetch_add(1, Ordering::SeqCst) >= 2
        }));

        modal.save();
        modal.save();
        assert!(modal.is_open());
        modal.save();
        assert!(!modal.is_open());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn open_while_open_replaces_content() {
        let mut modal = ModalController::new();
        modal.open(ModalOptions::new("First", "a").on_save(|| false));
        modal.open(ModalOptions::new("Second", "b"));

        assert_eq!(modal.title(), Some("Second"));
        // 替换后旧回调失效，无回调保存直接关闭
        modal.save();
        assert!(!modal.is_open());
    }

    #[test]
    fn cancel_runs_callback_and_closes() {
        let cancelled = Arc::new(AtomicBool::new(false));
        let cancelled_cb = cancelled.clone();

        let mut modal = ModalController::new();
        modal.open(
            ModalOptions::new("Edit product", "...")
                .on_cancel(move || cancelled_cb.store(true, Ordering::SeqCst)),
        );

        modal.cancel();
        assert!(cancelled.load(Ordering::SeqCst));
        assert!(!modal.is_open());
    }

    #[test]
    fn cancel_text_none_hides_cancel_action() {
        let options = ModalOptions::new("Notice", "read only").cancel_text(None);
        assert!(options.cancel_text.is_none());
    }
}
