//! 管理端文档库访问
//!
//! 与报表网关共用同一个文档库，但管理端直接持有客户端做读写，
//! 不经过网关 (网关只暴露只读聚合)。商品编辑没有事务或乐观锁，
//! 文档库层面后写覆盖先写。

use serde::Deserialize;
use shared::models::{Product, ProductCreate, ProductUpdate};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use thiserror::Error;

use crate::prefill::ProductLookup;

const PRODUCT_TABLE: &str = "product";

/// 查询投影：record link 统一转成字符串
const PRODUCT_FIELDS: &str = "<string>id AS id, name, category, price, proof_ref, in_stock";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document store error: {0}")]
    Store(#[from] surrealdb::Error),
    #[error("Invalid record id: {0}")]
    InvalidId(String),
}

/// 写路径的返回记录；id 保持原生 RecordId，转换时再转字符串
#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: RecordId,
    name: String,
    category: String,
    price: f64,
    #[serde(default)]
    proof_ref: Option<String>,
    #[serde(default = "default_true")]
    in_stock: bool,
}

fn default_true() -> bool {
    true
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Product {
            id: record.id.to_string(),
            name: record.name,
            category: record.category,
            price: record.price,
            proof_ref: record.proof_ref,
            in_stock: record.in_stock,
        }
    }
}

/// 管理端文档库客户端
#[derive(Clone, Debug)]
pub struct AdminStore {
    db: Surreal<Client>,
}

impl AdminStore {
    /// 复用已有连接 (测试或共享客户端场景)
    pub fn with_client(db: Surreal<Client>) -> Self {
        Self { db }
    }

    /// 连接文档库并选择 namespace/database
    pub async fn connect(
        endpoint: &str,
        namespace: &str,
        database: &str,
        credential: Option<(&str, &str)>,
    ) -> Result<Self, StoreError> {
        let endpoint = endpoint
            .trim_start_matches("ws://")
            .trim_start_matches("wss://");

        let db: Surreal<Client> = Surreal::init();
        db.connect::<Ws>(endpoint).await?;

        if let Some((username, password)) = credential {
            db.signin(Root { username, password }).await?;
        }

        db.use_ns(namespace).use_db(database).await?;

        tracing::info!(endpoint, namespace, database, "Admin store connected");
        Ok(Self { db })
    }

    /// 按 ProofMaster 引用 ID 查找商品
    pub async fn find_by_proof_ref(&self, proof_ref: &str) -> Result<Option<Product>, StoreError> {
        let mut result = self
            .db
            .query(format!(
                "SELECT {PRODUCT_FIELDS} FROM {PRODUCT_TABLE} \
                 WHERE proof_ref = $proof_ref LIMIT 1"
            ))
            .bind(("proof_ref", proof_ref.to_string()))
            .await?;
        let product: Option<Product> = result.take(0)?;
        Ok(product)
    }

    /// 按名称精确匹配查找商品
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Product>, StoreError> {
        let mut result = self
            .db
            .query(format!(
                "SELECT {PRODUCT_FIELDS} FROM {PRODUCT_TABLE} \
                 WHERE name = $name LIMIT 1"
            ))
            .bind(("name", name.to_string()))
            .await?;
        let product: Option<Product> = result.take(0)?;
        Ok(product)
    }

    /// 列出全部商品，按名称排序
    pub async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let mut result = self
            .db
            .query(format!(
                "SELECT {PRODUCT_FIELDS} FROM {PRODUCT_TABLE} ORDER BY name"
            ))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products)
    }

    /// 新建商品
    pub async fn create(&self, payload: ProductCreate) -> Result<Option<Product>, StoreError> {
        let created: Option<ProductRecord> =
            self.db.create(PRODUCT_TABLE).content(payload).await?;
        Ok(created.map(Product::from))
    }

    /// 部分更新商品 (merge 语义，None 字段不触碰)
    ///
    /// id 接受读路径返回的字符串形式 (`product:xyz`)。
    pub async fn update(
        &self,
        id: &str,
        payload: ProductUpdate,
    ) -> Result<Option<Product>, StoreError> {
        let record_id = parse_record_id(id)?;
        let updated: Option<ProductRecord> =
            self.db.update(record_id).merge(payload).await?;
        Ok(updated.map(Product::from))
    }
}

/// 解析 `table:key` 形式的记录 ID
fn parse_record_id(id: &str) -> Result<RecordId, StoreError> {
    let (table, key) = id
        .split_once(':')
        .ok_or_else(|| StoreError::InvalidId(id.to_string()))?;
    if table.is_empty() || key.is_empty() {
        return Err(StoreError::InvalidId(id.to_string()));
    }
    Ok(RecordId::from_table_key(table, key))
}

impl ProductLookup for AdminStore {
    async fn find_by_proof_ref(&self, proof_ref: &str) -> Result<Option<Product>, StoreError> {
        AdminStore::find_by_proof_ref(self, proof_ref).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, StoreError> {
        AdminStore::find_by_name(self, name).await
    }
}
