//! Crumb Admin Client - 管理端组件库
//!
//! 管理后台直接访问文档库 (绕过报表网关的只读边界)，并提供
//! 界面层的通用组件：
//!
//! - **store**: 商品的查找与写入 (直连文档库)
//! - **ui**: 模态框与通知 (显式注入状态，不依赖环境全局)
//! - **format**: 货币与日期格式化
//! - **update**: 版本轮询与更新提示
//! - **prefill**: ProofMaster 跳转参数的预填桥接

pub mod format;
pub mod prefill;
pub mod store;
pub mod ui;
pub mod update;

pub use store::{AdminStore, StoreError};
pub use ui::modal::{ModalController, ModalOptions};
pub use ui::toast::{Toast, ToastLevel, ToastManager};
pub use update::{PromptDecision, UpdateNotifier, UpdateState};
