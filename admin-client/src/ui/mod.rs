//! 界面组件
//!
//! 状态全部显式注入，组件不读写任何环境全局。

pub mod modal;
pub mod toast;
