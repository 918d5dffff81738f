//! 销售汇总

use serde::Serialize;
use shared::models::Sale;
use std::collections::BTreeMap;

use crate::utils::PeriodWindow;

/// 汇总里保留的分类条目上限
const MAX_CATEGORIES: usize = 10;

/// 按支付方式的分项
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaymentBreakdown {
    pub method: String,
    pub transactions: i64,
    pub revenue: f64,
}

/// 按分类的营收分项
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: f64,
}

/// 销售汇总响应
#[derive(Debug, Clone, Serialize)]
pub struct SalesSummary {
    pub period: PeriodWindow,
    pub total_revenue: f64,
    pub transaction_count: i64,
    pub average_transaction: f64,
    pub payment_methods: Vec<PaymentBreakdown>,
    pub top_categories: Vec<CategoryRevenue>,
}

/// 聚合时间窗口内的销售记录
pub fn sales_summary(sales: &[Sale], period: &PeriodWindow) -> SalesSummary {
    let total_revenue: f64 = sales.iter().map(|s| s.total).sum();
    let transaction_count = sales.len() as i64;
    let average_transaction = if transaction_count > 0 {
        total_revenue / transaction_count as f64
    } else {
        0.0
    };

    // BTreeMap 保证分项顺序稳定
    let mut payments: BTreeMap<&'static str, (i64, f64)> = BTreeMap::new();
    for sale in sales {
        let entry = payments.entry(sale.payment_method.as_key()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += sale.total;
    }
    let payment_methods = payments
        .into_iter()
        .map(|(method, (transactions, revenue))| PaymentBreakdown {
            method: method.to_string(),
            transactions,
            revenue,
        })
        .collect();

    let mut categories: BTreeMap<String, f64> = BTreeMap::new();
    for sale in sales {
        for item in &sale.items {
            let key = if item.category.is_empty() {
                "uncategorized".to_string()
            } else {
                item.category.clone()
            };
            *categories.entry(key).or_insert(0.0) += item.line_total();
        }
    }
    let mut top_categories: Vec<CategoryRevenue> = categories
        .into_iter()
        .map(|(category, revenue)| CategoryRevenue { category, revenue })
        .collect();
    top_categories.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    top_categories.truncate(MAX_CATEGORIES);

    SalesSummary {
        period: period.clone(),
        total_revenue,
        transaction_count,
        average_transaction,
        payment_methods,
        top_categories,
    }
}
