//! Cashier Model

use serde::{Deserialize, Serialize};

/// Cashier model — 通过 reference 关联班次和销售，不拥有它们
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cashier {
    pub id: String,
    pub name: String,
}
