//! Shift Model (班次)

use serde::{Deserialize, Serialize};

/// 班次状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShiftStatus {
    Active,
    Closed,
}

/// Shift model — 收银员的工作时段，销售记录通过 reference 归属到班次
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    pub id: String,
    /// Record link to cashier
    pub cashier: String,
    #[serde(default)]
    pub cashier_name: String,
    /// Unix millis
    pub opened_at: i64,
    pub closed_at: Option<i64>,
    pub status: ShiftStatus,
}

impl Shift {
    pub fn is_active(&self) -> bool {
        self.status == ShiftStatus::Active
    }
}
