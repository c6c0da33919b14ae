//! 业务逻辑服务模块
//!
//! 封装行情数据的获取、标准化与搜索逻辑

pub mod quote; // 行情标准化与搜索服务

use quote::QuoteService;

/// 三个市场的服务实例集合
///
/// 各实例独立持有自己的提供方和管道配置，互不共享状态
pub struct MarketServices {
    /// A股服务
    pub a_share: QuoteService,
    /// 港股服务
    pub hk: QuoteService,
    /// 美股服务
    pub us: QuoteService,
}
