use actix_web::{web, HttpResponse, Result};
use serde::Serialize;

use crate::error::QuoteError;
use crate::models::{ApiResponse, QuoteRecord, SearchQuery, SearchResults};
use crate::services::MarketServices;

/// 按错误类型映射 HTTP 状态码：未找到 → 404，其余 → 500
fn error_response<T: Serialize>(error: QuoteError) -> HttpResponse {
    let body = ApiResponse::<T>::error(error.to_string());
    match error {
        QuoteError::SymbolNotFound(_) => HttpResponse::NotFound().json(body),
        QuoteError::FetchFailed(_) => HttpResponse::InternalServerError().json(body),
    }
}

fn respond_search(result: std::result::Result<Vec<QuoteRecord>, QuoteError>) -> Result<HttpResponse> {
    match result {
        Ok(results) => Ok(HttpResponse::Ok().json(ApiResponse::success(SearchResults { results }))),
        Err(e) => Ok(error_response::<SearchResults>(e)),
    }
}

fn respond_detail(result: std::result::Result<QuoteRecord, QuoteError>) -> Result<HttpResponse> {
    match result {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail))),
        Err(e) => Ok(error_response::<QuoteRecord>(e)),
    }
}

pub async fn search_a_stocks(
    services: web::Data<MarketServices>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    respond_search(services.a_share.search(&query.keyword).await)
}

pub async fn get_a_stock_detail(
    services: web::Data<MarketServices>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    respond_detail(services.a_share.get_detail(&path.into_inner()).await)
}

pub async fn search_hk_stocks(
    services: web::Data<MarketServices>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    respond_search(services.hk.search(&query.keyword).await)
}

pub async fn get_hk_stock_detail(
    services: web::Data<MarketServices>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    respond_detail(services.hk.get_detail(&path.into_inner()).await)
}

pub async fn search_us_stocks(
    services: web::Data<MarketServices>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    respond_search(services.us.search(&query.keyword).await)
}

pub async fn get_us_stock_detail(
    services: web::Data<MarketServices>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    respond_detail(services.us.get_detail(&path.into_inner()).await)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/stocks")
            .service(
                web::scope("/a")
                    .route("/search", web::get().to(search_a_stocks))
                    .route("/{symbol}", web::get().to(get_a_stock_detail)),
            )
            .service(
                web::scope("/hk")
                    .route("/search", web::get().to(search_hk_stocks))
                    .route("/{symbol}", web::get().to(get_hk_stock_detail)),
            )
            .service(
                web::scope("/us")
                    .route("/search", web::get().to(search_us_stocks))
                    .route("/{symbol}", web::get().to(get_us_stock_detail)),
            ),
    );
}
