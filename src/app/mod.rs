//! 应用层：路由装配与共享状态

pub mod product;

use std::sync::Arc;

use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::core::{
    error::CoreError,
    middleware::{request_logging_middleware, token_auth_middleware},
    response::HealthResponse,
};
use product::{handler, ProductService};

#[derive(Clone)]
pub struct AppState {
    pub product_service: Arc<dyn ProductService>,
    pub api_token: Arc<str>,
}

impl AppState {
    pub fn new(product_service: Arc<dyn ProductService>, api_token: impl Into<Arc<str>>) -> Self {
        Self {
            product_service,
            api_token: api_token.into(),
        }
    }
}

/// 构建路由：读接口公开，写接口需要令牌
pub fn build_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/products", get(handler::get_all_products))
        .route("/products/search", get(handler::search_product))
        .route("/products/:id", get(handler::get_product_by_id));

    let private = Router::new()
        .route(
            "/products",
            post(handler::create_product).delete(handler::delete_product),
        )
        .route(
            "/products/:id",
            put(handler::update_product).patch(handler::patch_product),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            token_auth_middleware,
        ));

    Router::new()
        .route("/ping", get(ping))
        .route("/health", get(health_check))
        .merge(public)
        .merge(private)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn ping() -> &'static str {
    "pong"
}

async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, CoreError> {
    let products = state
        .product_service
        .count_products()
        .await
        .map_err(CoreError::internal)?;
    Ok(Json(HealthResponse::healthy(products)))
}
