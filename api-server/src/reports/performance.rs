//! 商品与收银员表现

use serde::Serialize;
use shared::models::{Cashier, Sale};
use std::collections::BTreeMap;

/// 商品表现排序依据
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PerformanceSort {
    #[default]
    Revenue,
    Quantity,
}

impl PerformanceSort {
    /// 解析 `sort` 查询参数，未识别的值回退到 revenue
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("quantity") => PerformanceSort::Quantity,
            _ => PerformanceSort::Revenue,
        }
    }
}

/// 单个商品的窗口内表现
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProductPerformance {
    pub product: String,
    pub name: String,
    pub quantity_sold: i64,
    pub revenue: f64,
}

/// 单个收银员的窗口内表现
#[derive(Debug, Clone, Serialize)]
pub struct CashierPerformance {
    pub cashier: Cashier,
    pub transactions: i64,
    pub revenue: f64,
    pub average_transaction: f64,
}

/// 按商品聚合销售行项并排序截断
///
/// 商品名取销售快照；同一商品 reference 的不同名称以最后出现的为准。
pub fn product_performance(
    sales: &[Sale],
    sort: PerformanceSort,
    limit: usize,
) -> Vec<ProductPerformance> {
    let mut by_product: BTreeMap<String, ProductPerformance> = BTreeMap::new();
    for sale in sales {
        for item in &sale.items {
            let entry = by_product
                .entry(item.product.clone())
                .or_insert_with(|| ProductPerformance {
                    product: item.product.clone(),
                    name: item.name.clone(),
                    quantity_sold: 0,
                    revenue: 0.0,
                });
            entry.name = item.name.clone();
            entry.quantity_sold += item.quantity as i64;
            entry.revenue += item.line_total();
        }
    }

    let mut ranked: Vec<ProductPerformance> = by_product.into_values().collect();
    match sort {
        PerformanceSort::Revenue => ranked.sort_by(|a, b| b.revenue.total_cmp(&a.revenue)),
        PerformanceSort::Quantity => ranked.sort_by(|a, b| b.quantity_sold.cmp(&a.quantity_sold)),
    }
    ranked.truncate(limit);
    ranked
}

/// 按收银员 reference 聚合销售总额
pub fn cashier_performance(sales: &[Sale]) -> Vec<CashierPerformance> {
    let mut by_cashier: BTreeMap<String, (String, i64, f64)> = BTreeMap::new();
    for sale in sales {
        let entry = by_cashier
            .entry(sale.cashier.clone())
            .or_insert_with(|| (sale.cashier_name.clone(), 0, 0.0));
        if !sale.cashier_name.is_empty() {
            entry.0 = sale.cashier_name.clone();
        }
        entry.1 += 1;
        entry.2 += sale.total;
    }

    let mut ranked: Vec<CashierPerformance> = by_cashier
        .into_iter()
        .map(|(id, (name, transactions, revenue))| CashierPerformance {
            cashier: Cashier { id, name },
            transactions,
            revenue,
            average_transaction: revenue / transactions as f64,
        })
        .collect();
    ranked.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    ranked
}
