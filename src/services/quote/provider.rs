//! 行情数据提供方适配器
//!
//! 对接东方财富行情快照接口（clist），把响应行重新按
//! 中文列名（"代码"、"名称"、"最新价"...）组织成原始行情表。
//! 接口为同步阻塞调用，由服务层放到阻塞线程池中执行

use anyhow::{anyhow, Result};
use serde_json::Value;

use crate::config::ProviderConfig;
use crate::models::RawQuoteRow;

/// 东方财富行情快照 API
const EASTMONEY_CLIST_API: &str = "https://82.push2.eastmoney.com/api/qt/clist/get";
/// 接口固定令牌参数
const EASTMONEY_UT: &str = "bd1d9ddb04089700cf9c27f6f7426281";

/// 单个市场的快照端点描述
pub struct SpotEndpoint {
    /// 市场筛选参数（fs）
    pub fs: &'static str,
    /// 请求的响应字段列表（fields）
    pub fields: &'static str,
    /// 响应字段 → 中文列名
    pub columns: &'static [(&'static str, &'static str)],
    /// 代码是否需要拼接交易所前缀（美股代码形如 105.AAPL）
    pub market_prefixed_symbol: bool,
}

/// A股快照端点（沪深京全部上市个股）
pub static A_SHARE_SPOT: SpotEndpoint = SpotEndpoint {
    fs: "m:0 t:6,m:0 t:80,m:1 t:2,m:1 t:23,m:0 t:81 s:2048",
    fields: "f2,f3,f4,f5,f6,f9,f12,f14,f15,f16,f17,f18,f20",
    columns: &[
        ("f12", "代码"),
        ("f14", "名称"),
        ("f2", "最新价"),
        ("f4", "涨跌额"),
        ("f3", "涨跌幅"),
        ("f17", "今开"),
        ("f15", "最高"),
        ("f16", "最低"),
        ("f18", "昨收"),
        ("f5", "成交量"),
        ("f6", "成交额"),
        ("f20", "总市值"),
        ("f9", "市盈率"),
    ],
    market_prefixed_symbol: false,
};

/// 港股快照端点（无总市值、市盈率列）
pub static HK_SPOT: SpotEndpoint = SpotEndpoint {
    fs: "m:128 t:3,m:128 t:4,m:128 t:1,m:128 t:2",
    fields: "f2,f3,f4,f5,f6,f12,f14,f15,f16,f17,f18",
    columns: &[
        ("f12", "代码"),
        ("f14", "名称"),
        ("f2", "最新价"),
        ("f4", "涨跌额"),
        ("f3", "涨跌幅"),
        ("f17", "今开"),
        ("f15", "最高"),
        ("f16", "最低"),
        ("f18", "昨收"),
        ("f5", "成交量"),
        ("f6", "成交额"),
    ],
    market_prefixed_symbol: false,
};

/// 美股快照端点
pub static US_SPOT: SpotEndpoint = SpotEndpoint {
    fs: "m:105,m:106,m:107",
    fields: "f2,f3,f4,f5,f6,f9,f12,f13,f14,f15,f16,f17,f18,f20",
    columns: &[
        ("f12", "代码"),
        ("f14", "名称"),
        ("f2", "最新价"),
        ("f4", "涨跌额"),
        ("f3", "涨跌幅"),
        ("f17", "今开"),
        ("f15", "最高"),
        ("f16", "最低"),
        ("f18", "昨收"),
        ("f5", "成交量"),
        ("f6", "成交额"),
        ("f20", "总市值"),
        ("f9", "市盈率"),
    ],
    market_prefixed_symbol: true,
};

/// 行情数据提供方
///
/// 同步接口，可能较慢（一次网络往返拉全市场快照）；
/// 调用方负责把它放到阻塞上下文中执行，避免卡住协作式调度
pub trait QuoteProvider: Send + Sync {
    /// 拉取一张完整的原始行情表，每行一只上市标的
    ///
    /// 任何上游错误（网络、状态码、响应结构）直接上抛，
    /// 不重试、不返回部分结果
    fn fetch_raw_table(&self) -> Result<Vec<RawQuoteRow>>;
}

/// 东方财富行情提供方实现
pub struct EastMoneyProvider {
    client: reqwest::blocking::Client,
    endpoint: &'static SpotEndpoint,
}

impl EastMoneyProvider {
    pub fn new(endpoint: &'static SpotEndpoint, config: &ProviderConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .build()?;
        Ok(Self { client, endpoint })
    }

    /// 把一条响应记录转为按中文列名组织的原始行
    fn build_row(&self, item: &Value) -> RawQuoteRow {
        let mut row = RawQuoteRow::new();
        for (field, label) in self.endpoint.columns {
            if let Some(value) = item.get(*field) {
                row.insert(label, value.clone());
            }
        }
        if self.endpoint.market_prefixed_symbol {
            // 美股代码拼接交易所编号前缀，如 105.AAPL
            let code = item.get("f12").and_then(Value::as_str).unwrap_or("");
            if let Some(market_id) = item.get("f13").and_then(Value::as_i64) {
                if !code.is_empty() {
                    row.insert("代码", Value::String(format!("{}.{}", market_id, code)));
                }
            }
        }
        row
    }
}

impl QuoteProvider for EastMoneyProvider {
    fn fetch_raw_table(&self) -> Result<Vec<RawQuoteRow>> {
        let response = self
            .client
            .get(EASTMONEY_CLIST_API)
            .query(&[
                ("pn", "1"),
                ("pz", "50000"),
                ("po", "1"),
                ("np", "1"),
                ("ut", EASTMONEY_UT),
                ("fltt", "2"),
                ("invt", "2"),
                ("fid", "f3"),
                ("fs", self.endpoint.fs),
                ("fields", self.endpoint.fields),
            ])
            .header(
                "User-Agent",
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
            )
            .send()?;

        if !response.status().is_success() {
            return Err(anyhow!("获取行情快照失败: {}", response.status()));
        }

        let payload: Value = response.json()?;
        let diff = payload
            .pointer("/data/diff")
            .and_then(Value::as_array)
            .ok_or_else(|| anyhow!("行情响应缺少 data.diff 字段"))?;

        Ok(diff.iter().map(|item| self.build_row(item)).collect())
    }
}
