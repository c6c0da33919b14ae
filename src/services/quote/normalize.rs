//! 表结构标准化
//!
//! 把上游原生列名（中文）改写为标准字段名

use crate::models::RawQuoteRow;

/// 按映射表标准化整张表的列名
///
/// 仅改写当前行里实际存在的列，缺失的映射静默跳过（容忍上游删列），
/// 未出现在映射表中的列原样保留（容忍上游加列）
pub fn normalize_columns(
    mut rows: Vec<RawQuoteRow>,
    mapping: &[(&str, &str)],
) -> Vec<RawQuoteRow> {
    for row in &mut rows {
        for (from, to) in mapping {
            row.rename_key(from, to);
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> RawQuoteRow {
        match value {
            serde_json::Value::Object(map) => RawQuoteRow::from(map),
            _ => panic!("测试行必须是 JSON 对象"),
        }
    }

    const MAPPING: &[(&str, &str)] = &[
        ("代码", "symbol"),
        ("名称", "name"),
        ("最新价", "price"),
        ("总市值", "market_value"),
    ];

    /// 测试存在的列被改写为标准字段名
    #[test]
    fn test_present_columns_renamed() {
        let rows = vec![row(json!({"代码": "600000", "名称": "浦发银行", "最新价": 10.05}))];
        let normalized = normalize_columns(rows, MAPPING);

        assert_eq!(normalized[0].text("symbol").as_deref(), Some("600000"));
        assert_eq!(normalized[0].text("name").as_deref(), Some("浦发银行"));
        assert!(normalized[0].contains_key("price"));
        assert!(!normalized[0].contains_key("代码"));
    }

    /// 测试映射表中缺失的列被静默跳过
    #[test]
    fn test_absent_columns_skipped() {
        let rows = vec![row(json!({"代码": "000001"}))];
        let normalized = normalize_columns(rows, MAPPING);

        assert_eq!(normalized[0].text("symbol").as_deref(), Some("000001"));
        assert!(!normalized[0].contains_key("market_value"));
        assert!(!normalized[0].contains_key("name"));
    }

    /// 测试未映射的上游新增列原样透传
    #[test]
    fn test_unmapped_columns_pass_through() {
        let rows = vec![row(json!({"代码": "000001", "量比": 1.23}))];
        let normalized = normalize_columns(rows, MAPPING);

        assert!(normalized[0].contains_key("量比"));
        assert_eq!(normalized[0].get("量比"), Some(&json!(1.23)));
    }
}
