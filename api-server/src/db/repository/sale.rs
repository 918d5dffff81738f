//! Sale Repository
//!
//! 销售记录只读查询。Sale 写入后不可变，这里没有任何写操作。

use super::{BaseRepository, RepoResult};
use shared::models::Sale;
use surrealdb::Surreal;
use surrealdb::engine::remote::ws::Client;

/// 查询投影：record link 统一转成字符串
const SALE_FIELDS: &str = "<string>id AS id, timestamp, items, total, payment_method, \
     <string>cashier AS cashier, cashier_name, <string>shift AS shift";

#[derive(Clone)]
pub struct SaleRepository {
    base: BaseRepository,
}

impl SaleRepository {
    pub fn new(db: Surreal<Client>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// 查询时间窗口内的全部销售 (end 不含)
    pub async fn find_in_range(&self, start: i64, end: i64) -> RepoResult<Vec<Sale>> {
        let sales: Vec<Sale> = self
            .base
            .db()
            .query(format!(
                "SELECT {SALE_FIELDS} FROM sale \
                 WHERE timestamp >= $start AND timestamp < $end \
                 ORDER BY timestamp"
            ))
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(sales)
    }

    /// 查询最近的销售，按时间倒序
    pub async fn find_recent(&self, limit: i64) -> RepoResult<Vec<Sale>> {
        let sales: Vec<Sale> = self
            .base
            .db()
            .query(format!(
                "SELECT {SALE_FIELDS} FROM sale ORDER BY timestamp DESC LIMIT $limit"
            ))
            .bind(("limit", limit))
            .await?
            .take(0)?;
        Ok(sales)
    }
}
