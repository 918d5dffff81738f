//! Sale Model

use serde::{Deserialize, Serialize};

/// 支付方式
///
/// 文档库中为字符串字段，未识别的值归入 [`PaymentMethod::Other`]，
/// 保证旧数据不会导致反序列化失败。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    Cash,
    Card,
    Mobile,
    #[serde(other)]
    Other,
}

impl PaymentMethod {
    /// 汇总报表中使用的稳定键名
    pub fn as_key(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Mobile => "mobile",
            PaymentMethod::Other => "other",
        }
    }
}

/// 销售单行项 (商品快照)
///
/// `name` 和 `unit_price` 是下单时的快照，商品后续改名/改价不影响历史报表。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    /// Record link to product
    pub product: String,
    pub name: String,
    pub quantity: i32,
    pub unit_price: f64,
    /// 商品分类快照 (用于分类汇总)
    #[serde(default)]
    pub category: String,
}

impl SaleItem {
    /// 行小计
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// Sale model — 一笔已记录的销售，写入后不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    /// Unix millis
    pub timestamp: i64,
    pub items: Vec<SaleItem>,
    pub total: f64,
    pub payment_method: PaymentMethod,
    /// Record link to cashier
    pub cashier: String,
    /// 收银员姓名快照
    #[serde(default)]
    pub cashier_name: String,
    /// Record link to shift
    pub shift: String,
}
