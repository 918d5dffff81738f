//! 报表聚合 - 纯内存计算
//!
//! Repository 层只负责取回窗口内的原始文档；所有聚合都在进程内完成，
//! 不依赖文档库的聚合能力。每个请求的聚合是 all-or-nothing：
//! 查询失败直接向调用方返回 store_error，不产生部分结果。

pub mod performance;
pub mod summary;

pub use performance::{
    CashierPerformance, PerformanceSort, ProductPerformance, cashier_performance,
    product_performance,
};
pub use summary::{CategoryRevenue, PaymentBreakdown, SalesSummary, sales_summary};
