//! 行情记录格式化
//!
//! 把一条标准化后的原始行转换为统一的 QuoteRecord。
//! 每个字段都有独立的回退规则：缺失、类型不符、NaN、转换失败
//! 一律回退为默认值（数值 0.0、文本空串），绝不因单个脏字段报错

use serde_json::Value;

use super::markets::MarketSpec;
use crate::models::{QuoteRecord, RawQuoteRow};

/// 数值字段转换
///
/// 数字直接取值，数值文本解析后取值（上游常以 "-" 占位缺失值，
/// 解析失败同样回退），NaN 视为缺失
fn coerce_f64(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().filter(|v| !v.is_nan()).unwrap_or(0.0),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| !v.is_nan())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// 百分比字段转换
///
/// 带 % 后缀的文本去掉后缀再除以 100（"3.5%" → 0.035），
/// 已是数值的按原值使用，缺失/解析失败回退为 0.0
fn coerce_percent(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::String(s)) if s.contains('%') => s
            .trim()
            .trim_matches('%')
            .parse::<f64>()
            .map(|v| v / 100.0)
            .unwrap_or(0.0),
        other => coerce_f64(other),
    }
}

/// 单个可选数值字段的取值规则
///
/// 结构性缺失字段无视行内容强制为 0.0；涨跌幅走百分比解析
fn optional_field(row: &RawQuoteRow, field: &str, spec: &MarketSpec) -> f64 {
    if spec.absent_fields.iter().any(|absent| *absent == field) {
        return 0.0;
    }
    if field == "price_change_percent" {
        coerce_percent(row.get(field))
    } else {
        coerce_f64(row.get(field))
    }
}

/// 构造只含必有字段的基础记录
fn base_record(row: &RawQuoteRow, spec: &MarketSpec) -> QuoteRecord {
    let symbol = row.text("symbol").unwrap_or_default();
    QuoteRecord {
        name: row.text("name").unwrap_or_default(),
        market: (spec.classify)(&symbol),
        price: coerce_f64(row.get("price")),
        symbol,
        price_change: None,
        price_change_percent: None,
        open: None,
        high: None,
        low: None,
        pre_close: None,
        volume: None,
        turnover: None,
        market_value: None,
        pe_ratio: None,
    }
}

/// 格式化搜索结果记录
///
/// 只输出基础字段；附带总市值的市场（A股、美股）额外填充 market_value
pub fn format_search_record(row: &RawQuoteRow, spec: &MarketSpec) -> QuoteRecord {
    let mut record = base_record(row, spec);
    if spec.search_with_market_value {
        record.market_value = Some(optional_field(row, "market_value", spec));
    }
    record
}

/// 格式化详情记录
///
/// 逐一输出全部可选数值字段（搜索结果字段的严格超集）
pub fn format_detail_record(row: &RawQuoteRow, spec: &MarketSpec) -> QuoteRecord {
    let mut record = base_record(row, spec);
    record.price_change = Some(optional_field(row, "price_change", spec));
    record.price_change_percent = Some(optional_field(row, "price_change_percent", spec));
    record.open = Some(optional_field(row, "open", spec));
    record.high = Some(optional_field(row, "high", spec));
    record.low = Some(optional_field(row, "low", spec));
    record.pre_close = Some(optional_field(row, "pre_close", spec));
    record.volume = Some(optional_field(row, "volume", spec));
    record.turnover = Some(optional_field(row, "turnover", spec));
    record.market_value = Some(optional_field(row, "market_value", spec));
    record.pe_ratio = Some(optional_field(row, "pe_ratio", spec));
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Market;
    use crate::services::quote::markets::{A_SHARE, HK};
    use serde_json::json;

    fn row(value: serde_json::Value) -> RawQuoteRow {
        match value {
            serde_json::Value::Object(map) => RawQuoteRow::from(map),
            _ => panic!("测试行必须是 JSON 对象"),
        }
    }

    /// 测试A股市场分类（6 开头为沪A，其余为深A）
    #[test]
    fn test_a_share_market_classification() {
        let sh = format_search_record(&row(json!({"symbol": "600000", "name": "浦发银行"})), &A_SHARE);
        assert_eq!(sh.market, Market::ShanghaiA);

        let sz = format_search_record(&row(json!({"symbol": "000001", "name": "平安银行"})), &A_SHARE);
        assert_eq!(sz.market, Market::ShenzhenA);
    }

    /// 测试百分比解析："3.50%" → 0.035，已是数值的原样使用
    #[test]
    fn test_percent_parsing() {
        let from_string = format_detail_record(
            &row(json!({"symbol": "600000", "price_change_percent": "3.50%"})),
            &A_SHARE,
        );
        assert_eq!(from_string.price_change_percent, Some(0.035));

        let from_number = format_detail_record(
            &row(json!({"symbol": "600000", "price_change_percent": 0.035})),
            &A_SHARE,
        );
        assert_eq!(from_number.price_change_percent, Some(0.035));
    }

    /// 测试坏的百分比文本回退为 0.0
    #[test]
    fn test_percent_parse_failure_defaults() {
        let record = format_detail_record(
            &row(json!({"symbol": "600000", "price_change_percent": "abc%"})),
            &A_SHARE,
        );
        assert_eq!(record.price_change_percent, Some(0.0));
    }

    /// 测试缺失/脏数值字段回退为 0.0，不报错
    #[test]
    fn test_missing_or_dirty_numeric_defaults() {
        let record = format_detail_record(
            &row(json!({"symbol": "600000", "name": "浦发银行", "open": "-", "high": null})),
            &A_SHARE,
        );
        assert_eq!(record.price, 0.0);
        assert_eq!(record.open, Some(0.0));
        assert_eq!(record.high, Some(0.0));
        assert_eq!(record.volume, Some(0.0));
    }

    /// 测试必有字段始终存在：名称缺失输出空串，代码为数值时转为文本
    #[test]
    fn test_required_fields_always_present() {
        let record = format_search_record(&row(json!({"symbol": 600000, "price": 10.05})), &A_SHARE);
        assert_eq!(record.symbol, "600000");
        assert_eq!(record.name, "");
        assert_eq!(record.market, Market::ShanghaiA);
        assert_eq!(record.price, 10.05);
    }

    /// 测试港股结构性缺失字段无视行内容强制为 0.0
    #[test]
    fn test_hk_absent_fields_forced_zero() {
        let record = format_detail_record(
            &row(json!({"symbol": "00700", "name": "腾讯控股", "market_value": 3.2e12, "pe_ratio": 22.5})),
            &HK,
        );
        assert_eq!(record.market, Market::HongKong);
        assert_eq!(record.market_value, Some(0.0));
        assert_eq!(record.pe_ratio, Some(0.0));
    }

    /// 测试港股搜索结果不附带总市值，A股附带（默认 0.0）
    #[test]
    fn test_search_field_sets_per_market() {
        let hk = format_search_record(&row(json!({"symbol": "00700", "name": "腾讯控股"})), &HK);
        assert_eq!(hk.market_value, None);

        let a = format_search_record(&row(json!({"symbol": "600000", "name": "浦发银行"})), &A_SHARE);
        assert_eq!(a.market_value, Some(0.0));
    }

    /// 测试详情字段是搜索字段的严格超集
    #[test]
    fn test_detail_superset_of_search() {
        let data = row(json!({"symbol": "600000", "name": "浦发银行", "price": 10.05}));
        let search = format_search_record(&data, &A_SHARE);
        let detail = format_detail_record(&data, &A_SHARE);

        assert_eq!(search.symbol, detail.symbol);
        assert_eq!(search.price, detail.price);
        assert!(search.open.is_none());
        assert!(detail.open.is_some());
        assert!(detail.price_change.is_some());
        assert!(detail.pe_ratio.is_some());
    }
}
