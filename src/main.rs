//! 行情搜索后端服务
//!
//! 把东方财富的 A股/港股/美股实时行情快照标准化为统一结构，
//! 提供模糊关键词搜索与按代码精确查询的 RESTful API

mod config;   // 配置加载
mod error;    // 服务层错误定义
mod handlers; // HTTP 请求处理器
mod models;   // 数据模型定义
mod services; // 业务逻辑服务

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use crate::config::AppConfig;
use crate::services::quote::markets;
use crate::services::quote::provider::{self, EastMoneyProvider};
use crate::services::quote::QuoteService;
use crate::services::MarketServices;

fn build_services(config: &AppConfig) -> anyhow::Result<MarketServices> {
    let provider_config = &config.provider;
    Ok(MarketServices {
        a_share: QuoteService::new(
            Arc::new(EastMoneyProvider::new(&provider::A_SHARE_SPOT, provider_config)?),
            &markets::A_SHARE,
        ),
        hk: QuoteService::new(
            Arc::new(EastMoneyProvider::new(&provider::HK_SPOT, provider_config)?),
            &markets::HK,
        ),
        us: QuoteService::new(
            Arc::new(EastMoneyProvider::new(&provider::US_SPOT, provider_config)?),
            &markets::US,
        ),
    })
}

/// 应用程序入口
///
/// 加载配置并启动 HTTP 服务器
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::load();

    // 初始化日志系统，默认级别来自配置
    env_logger::init_from_env(Env::default().default_filter_or(&config.log.level));

    log::info!("启动行情搜索后端服务");

    let services = build_services(&config)
        .map(web::Data::new)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let bind_addr = config.bind_addr();
    log::info!("监听地址: {}", bind_addr);

    let workers = config.server.workers;
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())       // 请求日志中间件
            .app_data(services.clone())    // 各市场服务实例
            .configure(handlers::config)   // 配置路由
    });

    if workers > 0 {
        server = server.workers(workers);
    }

    server.bind(bind_addr)?.run().await
}
