//! 行情数据模型
//!
//! 定义原始行情行与标准化后的行情记录

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 市场分类
///
/// A股按代码前缀进一步拆分为沪A/深A，港股、美股为固定分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Market {
    /// 上海主板（代码以 6 开头）
    #[serde(rename = "沪A")]
    ShanghaiA,
    /// 深圳市场（其余 A 股代码）
    #[serde(rename = "深A")]
    ShenzhenA,
    /// 香港市场
    #[serde(rename = "港股")]
    HongKong,
    /// 美国市场
    #[serde(rename = "美股")]
    Us,
}

/// 上游返回的原始行情行
///
/// 以数据源原生列名（中文，如 "代码"、"名称"、"最新价"）为键，
/// 不同市场的列集合不同，且可能随上游接口变化而增减，
/// 因此所有取值都必须容忍缺失和类型不符
#[derive(Debug, Clone, Default)]
pub struct RawQuoteRow(Map<String, Value>);

impl RawQuoteRow {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        self.0.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// 将列名从上游原生标签改写为标准字段名
    ///
    /// 列不存在时静默跳过，返回是否实际发生了改写
    pub fn rename_key(&mut self, from: &str, to: &str) -> bool {
        match self.0.remove(from) {
            Some(value) => {
                self.0.insert(to.to_string(), value);
                true
            }
            None => false,
        }
    }

    /// 以文本形式取值
    ///
    /// 字符串原样返回，数字转为文本（对应上游偶尔把代码列返回为数值的情况），
    /// 其余类型（null、数组等）一律视为缺失
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for RawQuoteRow {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// 标准化后的行情记录
///
/// 所有市场统一输出此结构。symbol/name/market/price 为必有字段；
/// 可选数值字段仅在详情接口（以及个别市场的搜索结果）中填充，
/// 未填充时不参与序列化，填充时缺失值一律回退为 0.0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// 股票代码（数据源原始代码，区分大小写）
    pub symbol: String,
    /// 股票名称（缺失时为空字符串）
    pub name: String,
    /// 市场分类（由代码/市场上下文推导，而非来自上游字段）
    pub market: Market,
    /// 最新价
    pub price: f64,
    /// 涨跌额
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_change: Option<f64>,
    /// 涨跌幅（小数形式，"3.5%" 解析为 0.035）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_change_percent: Option<f64>,
    /// 今开
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,
    /// 最高
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    /// 最低
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    /// 昨收
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_close: Option<f64>,
    /// 成交量
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    /// 成交额
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnover: Option<f64>,
    /// 总市值
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_value: Option<f64>,
    /// 市盈率
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe_ratio: Option<f64>,
}

/// 搜索接口查询参数
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// 搜索关键词（缺省为空串，此时匹配所有名称/代码非缺失的行）
    #[serde(default)]
    pub keyword: String,
}
