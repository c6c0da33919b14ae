//! 服务层错误定义

use thiserror::Error;

/// 行情服务错误
///
/// 管道内部的字段级转换失败不会上抛（静默回退为默认值，保证输出
/// 结构统一），对外只暴露两类错误：上游获取失败与代码未找到。
/// 原始错误的细节在服务边界记入日志，不随错误结构透出。
#[derive(Debug, Error)]
pub enum QuoteError {
    /// 上游行情数据获取失败（网络、响应解析、任务调度）
    #[error("获取行情数据失败: {0}")]
    FetchFailed(String),
    /// 精确查询未命中任何股票代码
    #[error("未找到股票代码: {0}")]
    SymbolNotFound(String),
}
