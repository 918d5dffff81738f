//! ProofMaster 预填桥接
//!
//! ProofMaster (外部排版/打样工具) 通过 URL 查询参数把商品数据
//! 带进管理后台。落地时先按引用 ID 找已有商品，找不到再按名称
//! 精确匹配；命中走编辑流程，未命中预填新建表单。处理完无论
//! 结果如何都去掉查询串，刷新页面不会重复预填。

use shared::models::Product;
use url::Url;

use crate::store::StoreError;

/// 识别的四个查询参数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrefillParams {
    pub proof_id: Option<String>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
}

impl PrefillParams {
    /// 从落地 URL 提取参数；未识别的参数一律忽略
    pub fn from_url(url: &Url) -> Self {
        let mut params = Self::default();
        for (key, value) in url.query_pairs() {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "proof_id" => params.proof_id = Some(value.to_string()),
                "name" => params.name = Some(value.to_string()),
                "price" => params.price = value.parse().ok(),
                "category" => params.category = Some(value.to_string()),
                _ => {}
            }
        }
        params
    }

    pub fn is_empty(&self) -> bool {
        self.proof_id.is_none()
            && self.name.is_none()
            && self.price.is_none()
            && self.category.is_none()
    }
}

/// 商品查找 (由 AdminStore 或测试替身实现)
#[allow(async_fn_in_trait)]
pub trait ProductLookup {
    async fn find_by_proof_ref(&self, proof_ref: &str) -> Result<Option<Product>, StoreError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, StoreError>;
}

/// 商品表单的副作用出口
pub trait ProductForm {
    /// 打开编辑流程；display_price 覆盖界面显示的价格 (不落库)
    fn open_edit(&mut self, product: &Product, display_price: Option<f64>);
    /// 重置并预填新建表单
    fn reset_create(&mut self, params: &PrefillParams);
}

/// 处理落地 URL 的预填
///
/// 返回去掉查询串后的 URL，调用方用它替换地址栏。参数缺失时
/// 不触发任何副作用，只做清理。
pub async fn run(
    url: &str,
    lookup: &impl ProductLookup,
    form: &mut impl ProductForm,
) -> Result<String, url::ParseError> {
    let mut parsed = Url::parse(url)?;
    let params = PrefillParams::from_url(&parsed);
    parsed.set_query(None);
    let cleaned = parsed.to_string();

    if params.is_empty() {
        return Ok(cleaned);
    }

    let lookup_result = match (&params.proof_id, &params.name) {
        (Some(proof_id), _) => lookup.find_by_proof_ref(proof_id).await,
        (None, Some(name)) => lookup.find_by_name(name).await,
        (None, None) => Ok(None),
    };

    match lookup_result {
        Ok(Some(product)) => form.open_edit(&product, params.price),
        Ok(None) => form.reset_create(&params),
        Err(e) => {
            // 查找失败退化为不查库的原始参数预填
            tracing::warn!("Prefill lookup failed: {}", e);
            form.reset_create(&params);
        }
    }

    Ok(cleaned)
}
