//! 各市场的管道配置
//!
//! A股、港股、美股共用同一条 标准化 → 格式化 → 搜索/详情 管道，
//! 市场间的差异全部收敛到这里的静态配置表：
//! 列名映射、市场分类规则、结构性缺失字段、搜索结果附带字段

use crate::models::Market;

/// 单个市场的管道配置
pub struct MarketSpec {
    /// 市场名称，用于日志
    pub name: &'static str,
    /// 列名映射表：(上游原生列名, 标准字段名)
    ///
    /// 仅当原生列名实际存在时才改写，上游新增的未映射列原样透传，
    /// 以容忍上游接口的字段增减
    pub column_mapping: &'static [(&'static str, &'static str)],
    /// 市场分类规则（基于代码推导，不读取上游字段）
    pub classify: fn(&str) -> Market,
    /// 结构性缺失字段
    ///
    /// 该市场的上游数据从不提供这些字段，无论行内容如何都强制输出 0.0，
    /// 保证各市场输出结构一致
    pub absent_fields: &'static [&'static str],
    /// 搜索结果是否附带总市值（详情接口始终输出全部可选字段）
    pub search_with_market_value: bool,
}

fn classify_a_share(symbol: &str) -> Market {
    if symbol.starts_with('6') {
        Market::ShanghaiA
    } else {
        Market::ShenzhenA
    }
}

fn classify_hk(_symbol: &str) -> Market {
    Market::HongKong
}

fn classify_us(_symbol: &str) -> Market {
    Market::Us
}

/// A股市场配置
pub static A_SHARE: MarketSpec = MarketSpec {
    name: "A股",
    column_mapping: &[
        ("代码", "symbol"),
        ("名称", "name"),
        ("最新价", "price"),
        ("涨跌额", "price_change"),
        ("涨跌幅", "price_change_percent"),
        ("今开", "open"),
        ("最高", "high"),
        ("最低", "low"),
        ("昨收", "pre_close"),
        ("成交量", "volume"),
        ("成交额", "turnover"),
        ("总市值", "market_value"),
        ("市盈率", "pe_ratio"),
    ],
    classify: classify_a_share,
    absent_fields: &[],
    search_with_market_value: true,
};

/// 港股市场配置
///
/// 上游港股快照没有总市值和市盈率列
pub static HK: MarketSpec = MarketSpec {
    name: "港股",
    column_mapping: &[
        ("代码", "symbol"),
        ("名称", "name"),
        ("最新价", "price"),
        ("涨跌额", "price_change"),
        ("涨跌幅", "price_change_percent"),
        ("今开", "open"),
        ("最高", "high"),
        ("最低", "low"),
        ("昨收", "pre_close"),
        ("成交量", "volume"),
        ("成交额", "turnover"),
    ],
    classify: classify_hk,
    absent_fields: &["market_value", "pe_ratio"],
    search_with_market_value: false,
};

/// 美股市场配置
///
/// 美股快照的列集合与A股一致（代码形如 105.AAPL，带交易所前缀）
pub static US: MarketSpec = MarketSpec {
    name: "美股",
    column_mapping: &[
        ("代码", "symbol"),
        ("名称", "name"),
        ("最新价", "price"),
        ("涨跌额", "price_change"),
        ("涨跌幅", "price_change_percent"),
        ("今开", "open"),
        ("最高", "high"),
        ("最低", "low"),
        ("昨收", "pre_close"),
        ("成交量", "volume"),
        ("成交额", "turnover"),
        ("总市值", "market_value"),
        ("市盈率", "pe_ratio"),
    ],
    classify: classify_us,
    absent_fields: &[],
    search_with_market_value: true,
};
