//! 更新提示
//!
//! 定时轮询 `/version.json`，发现比本地记录更新的版本时弹出
//! 阻塞式提示。"稍后" 冷却一段时间不再打扰；"立即更新" 清缓存
//! 并强制刷新。拉取或解析失败一律静默吞掉 (debug 日志)，绝不
//! 打断用户。

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shared::{VersionDescriptor, is_newer_version, util::now_millis};

/// 轮询间隔
pub const CHECK_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// "稍后" 的冷却时长 (毫秒)
pub const SNOOZE_MS: i64 = 60 * 60 * 1000;

/// 持久化的检查状态
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UpdateState {
    /// 最后采纳的本地版本，空串表示从未见过任何版本
    #[serde(default)]
    pub last_version: String,
    #[serde(default)]
    pub last_check_millis: i64,
    /// 此时间点之前不再提示
    #[serde(default)]
    pub snoozed_until: i64,
}

/// 状态持久层
pub trait StateStore {
    fn load(&self) -> Option<UpdateState>;
    fn save(&self, state: &UpdateState);
}

/// JSON 文件持久化；读写失败只记日志
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> Option<UpdateState> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!("Invalid update state file {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn save(&self, state: &UpdateState) {
        let raw = match serde_json::to_string(state) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Failed to serialize update state: {}", e);
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, raw) {
            tracing::warn!("Failed to write update state file {:?}: {}", self.path, e);
        }
    }
}

/// 内存持久化 (测试用)
#[derive(Default)]
pub struct MemoryStateStore {
    inner: Mutex<Option<UpdateState>>,
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> Option<UpdateState> {
        self.inner.lock().ok()?.clone()
    }

    fn save(&self, state: &UpdateState) {
        if let Ok(mut inner) = self.inner.lock() {
            *inner = Some(state.clone());
        }
    }
}

/// 用户对更新提示的选择
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptDecision {
    Later,
    UpdateNow,
}

/// 提示与更新的副作用出口
#[allow(async_fn_in_trait)]
pub trait UpdateActions {
    /// 阻塞式提示，返回用户的选择
    async fn prompt(&mut self, descriptor: &VersionDescriptor) -> PromptDecision;
    /// 清除所有本地缓存
    async fn clear_caches(&mut self);
    /// 强制刷新页面
    async fn reload(&mut self);
}

/// 一次检查对描述符的判定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Evaluation {
    /// 首次见到版本号，静默采纳
    FirstSighting,
    /// 没有更新的版本
    UpToDate,
    /// 有更新但在冷却期内
    Snoozed,
    /// 需要提示用户
    Prompt,
}

fn evaluate(state: &UpdateState, candidate: &str, now: i64) -> Evaluation {
    if state.last_version.is_empty() {
        return Evaluation::FirstSighting;
    }
    if !is_newer_version(candidate, &state.last_version) {
        return Evaluation::UpToDate;
    }
    if now < state.snoozed_until {
        return Evaluation::Snoozed;
    }
    Evaluation::Prompt
}

/// 更新提示器
pub struct UpdateNotifier<S: StateStore, A: UpdateActions> {
    endpoint: String,
    client: reqwest::Client,
    store: S,
    actions: A,
    state: UpdateState,
    check_interval: Duration,
    snooze_ms: i64,
}

impl<S: StateStore, A: UpdateActions> UpdateNotifier<S, A> {
    pub fn new(endpoint: impl Into<String>, store: S, actions: A) -> Self {
        let state = store.load().unwrap_or_default();
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
            store,
            actions,
            state,
            check_interval: CHECK_INTERVAL,
            snooze_ms: SNOOZE_MS,
        }
    }

    pub fn state(&self) -> &UpdateState {
        &self.state
    }

    /// 轮询循环，直到任务被取消
    pub async fn run(&mut self) {
        let mut interval = tokio::time::interval(self.check_interval);
        // 首个 tick 立即触发，启动时即检查一次
        loop {
            interval.tick().await;
            self.check_once().await;
        }
    }

    /// 页面回到前台时的即时检查
    pub async fn on_foreground(&mut self) {
        self.check_once().await;
    }

    /// 单次检查：拉取失败静默返回
    pub async fn check_once(&mut self) {
        let descriptor = match self.fetch_descriptor().await {
            Ok(d) => d,
            Err(e) => {
                tracing::debug!("Version check skipped: {}", e);
                return;
            }
        };
        self.apply(&descriptor, now_millis()).await;
    }

    async fn fetch_descriptor(&self) -> Result<VersionDescriptor, reqwest::Error> {
        self.client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?
            .json::<VersionDescriptor>()
            .await
    }

    /// 对拿到的描述符做判定并执行副作用
    async fn apply(&mut self, descriptor: &VersionDescriptor, now: i64) {
        self.state.last_check_millis = now;

        match evaluate(&self.state, &descriptor.version, now) {
            Evaluation::FirstSighting => {
                self.state.last_version = descriptor.version.clone();
            }
            Evaluation::UpToDate | Evaluation::Snoozed => {}
            Evaluation::Prompt => match self.actions.prompt(descriptor).await {
                PromptDecision::Later => {
                    self.state.snoozed_until = now + self.snooze_ms;
                }
                PromptDecision::UpdateNow => {
                    self.actions.clear_caches().await;
                    self.actions.reload().await;
                    self.state.last_version = descriptor.version.clone();
                    self.state.snoozed_until = 0;
                }
            },
        }

        self.store.save(&self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockActions {
        decision: PromptDecision,
        prompts: Arc<AtomicUsize>,
        cache_clears: Arc<AtomicUsize>,
        reloads: Arc<AtomicUsize>,
    }

    impl MockActions {
        fn new(decision: PromptDecision) -> Self {
            Self {
                decision,
                prompts: Arc::new(AtomicUsize::new(0)),
                cache_clears: Arc::new(AtomicUsize::new(0)),
                reloads: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl UpdateActions for MockActions {
        async fn prompt(&mut self, _descriptor: &VersionDescriptor) -> PromptDecision {
            self.prompts.fetch_add(1, Ordering::SeqCst);
            self.decision
        }

        async fn clear_caches(&mut self) {
            self.cache_clears.fetch_add(1, Ordering::SeqCst);
        }

        async fn reload(&mut self) {
            self.reloads.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn notifier(
        state: UpdateState,
        decision: PromptDecision,
    ) -> UpdateNotifier<MemoryStateStore, MockActions> {
        let store = MemoryStateStore::default();
        store.save(&state);
        UpdateNotifier::new("http://localhost/version.json", store, MockActions::new(decision))
    }

    #[test]
    fn evaluate_first_sighting_adopts_silently() {
        let state = UpdateState::default();
        assert_eq!(evaluate(&state, "1.2.0", 0), Evaluation::FirstSighting);
    }

    #[test]
    fn evaluate_same_or_older_is_up_to_date() {
        let state = UpdateState {
            last_version: "1.2.0".into(),
            ..Default::default()
        };
        assert_eq!(evaluate(&state, "1.2.0", 0), Evaluation::UpToDate);
        assert_eq!(evaluate(&state, "1.1.9", 0), Evaluation::UpToDate);
    }

    #[test]
    fn evaluate_respects_snooze_window() {
        let state = UpdateState {
            last_version: "1.2.0".into(),
            snoozed_until: 1_000,
            ..Default::default()
        };
        assert_eq!(evaluate(&state, "1.3.0", 999), Evaluation::Snoozed);
        assert_eq!(evaluate(&state, "1.3.0", 1_000), Evaluation::Prompt);
    }

    #[tokio::test]
    async fn first_sighting_never_prompts() {
        let mut notifier = notifier(UpdateState::default(), PromptDecision::Later);
        let descriptor = VersionDescriptor::new("1.2.0");

        notifier.apply(&descriptor, 100).await;

        assert_eq!(notifier.actions.prompts.load(Ordering::SeqCst), 0);
        assert_eq!(notifier.state.last_version, "1.2.0");
        assert_eq!(notifier.state.last_check_millis, 100);
    }

    #[tokio::test]
    async fn later_snoozes_for_cooldown() {
        let state = UpdateState {
            last_version: "1.2.0".into(),
            ..Default::default()
        };
        let mut notifier = notifier(state, PromptDecision::Later);
        let descriptor = VersionDescriptor::new("1.3.0");

        notifier.apply(&descriptor, 100).await;
        assert_eq!(notifier.actions.prompts.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.state.snoozed_until, 100 + SNOOZE_MS);
        // 版本未采纳，冷却结束后还会再提示
        assert_eq!(notifier.state.last_version, "1.2.0");

        // 冷却期内不再提示
        notifier.apply(&descriptor, 200).await;
        assert_eq!(notifier.actions.prompts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn update_now_clears_caches_reloads_and_adopts() {
        let state = UpdateState {
            last_version: "1.2.0".into(),
            ..Default::default()
        };
        let mut notifier = notifier(state, PromptDecision::UpdateNow);
        let descriptor = VersionDescriptor::new("2.0.0");

        notifier.apply(&descriptor, 100).await;

        assert_eq!(notifier.actions.cache_clears.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.actions.reloads.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.state.last_version, "2.0.0");

        // 采纳后同版本不再提示
        notifier.apply(&descriptor, 200).await;
        assert_eq!(notifier.actions.prompts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn state_round_trips_through_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("update-state.json");
        let store = FileStateStore::new(&path);

        let state = UpdateState {
            last_version: "1.4.2".into(),
            last_check_millis: 42,
            snoozed_until: 99,
        };
        store.save(&state);
        assert_eq!(store.load(), Some(state));
    }

    #[test]
    fn file_store_missing_or_corrupt_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let missing = FileStateStore::new(dir.path().join("nope.json"));
        assert!(missing.load().is_none());

        let corrupt_path = dir.path().join("corrupt.json");
        std::fs::write(&corrupt_path, "not json").unwrap();
        assert!(FileStateStore::new(&corrupt_path).load().is_none());
    }
}
