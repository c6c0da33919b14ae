//! 行情标准化与搜索服务
//!
//! 三个市场（A股、港股、美股）共用同一条管道：
//! 拉取原始表（阻塞调用放入阻塞线程池）→ 列名标准化 → 过滤/格式化。
//! 每次请求独立拉取一张表，请求间不共享任何可变状态

pub mod format;
pub mod markets;
pub mod normalize;
pub mod provider;

use std::sync::Arc;

use crate::error::QuoteError;
use crate::models::{QuoteRecord, RawQuoteRow};
use markets::MarketSpec;
use provider::QuoteProvider;

/// 搜索结果上限
const SEARCH_RESULT_LIMIT: usize = 10;

/// 单个市场的行情服务
pub struct QuoteService {
    provider: Arc<dyn QuoteProvider>,
    spec: &'static MarketSpec,
}

impl QuoteService {
    pub fn new(provider: Arc<dyn QuoteProvider>, spec: &'static MarketSpec) -> Self {
        Self { provider, spec }
    }

    /// 拉取并标准化一张行情表
    ///
    /// 提供方接口是同步阻塞的，放到阻塞线程池执行，
    /// 避免卡住其他并发请求
    async fn fetch_table(&self) -> Result<Vec<RawQuoteRow>, QuoteError> {
        let provider = Arc::clone(&self.provider);
        let raw = tokio::task::spawn_blocking(move || provider.fetch_raw_table())
            .await
            .map_err(|e| QuoteError::FetchFailed(e.to_string()))?
            .map_err(|e| QuoteError::FetchFailed(e.to_string()))?;

        log::debug!("获取到 {} 条{}原始数据", raw.len(), self.spec.name);
        Ok(normalize::normalize_columns(raw, self.spec.column_mapping))
    }

    /// 关键词搜索
    ///
    /// 对名称和代码做大小写不敏感的子串匹配（或关系），
    /// 名称/代码缺失的行不参与匹配；按表顺序格式化，
    /// 攒满 10 条即提前终止（之后的匹配行不再格式化）
    pub async fn search(&self, keyword: &str) -> Result<Vec<QuoteRecord>, QuoteError> {
        log::info!("搜索{}: {}", self.spec.name, keyword);

        let table = self.fetch_table().await.map_err(|e| {
            log::error!("搜索{}失败: {}", self.spec.name, e);
            e
        })?;

        let keyword_lower = keyword.to_lowercase();
        let mut results = Vec::new();
        for row in &table {
            if !row_matches(row, &keyword_lower) {
                continue;
            }
            results.push(format::format_search_record(row, self.spec));
            if results.len() >= SEARCH_RESULT_LIMIT {
                break;
            }
        }

        log::info!(
            "{}搜索完成，返回 {} 个匹配项（最多 {} 个）",
            self.spec.name,
            results.len(),
            SEARCH_RESULT_LIMIT
        );
        Ok(results)
    }

    /// 按代码精确查询详情
    ///
    /// 代码做区分大小写的全等匹配；未命中报"未找到"，
    /// 命中多行取第一行（正常的上游数据不会出现重复代码）
    pub async fn get_detail(&self, symbol: &str) -> Result<QuoteRecord, QuoteError> {
        log::info!("获取{}详情: {}", self.spec.name, symbol);

        let table = self.fetch_table().await.map_err(|e| {
            log::error!("获取{}详情失败: {}", self.spec.name, e);
            e
        })?;

        let row = table
            .iter()
            .find(|row| row.text("symbol").as_deref() == Some(symbol))
            .ok_or_else(|| {
                let e = QuoteError::SymbolNotFound(symbol.to_string());
                log::error!("获取{}详情失败: {}", self.spec.name, e);
                e
            })?;

        log::info!("获取{}详情成功: {}", self.spec.name, symbol);
        Ok(format::format_detail_record(row, self.spec))
    }
}

/// 搜索匹配谓词：关键词是名称或代码的子串（不区分大小写）
fn row_matches(row: &RawQuoteRow, keyword_lower: &str) -> bool {
    ["name", "symbol"].iter().any(|field| {
        row.text(field)
            .map(|value| value.to_lowercase().contains(keyword_lower))
            .unwrap_or(false)
    })
}
