//! 产品处理器

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::info;

use super::model::Product;
use crate::app::AppState;
use crate::core::{error::CoreError, response::MessageResponse};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "priceGt")]
    pub price_gt: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: Option<String>,
}

fn parse_id(raw: &str) -> Result<i64, CoreError> {
    raw.parse()
        .map_err(|_| CoreError::BadRequest(format!("无效的产品 id: {raw}")))
}

/// 请求体按原始字节解析，任何解码失败都返回 400
fn parse_product(body: &[u8]) -> Result<Product, CoreError> {
    serde_json::from_slice(body)
        .map_err(|e| CoreError::BadRequest(format!("请求体格式错误: {e}")))
}

pub async fn get_all_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, CoreError> {
    let products = state
        .product_service
        .get_all_products()
        .await
        .map_err(CoreError::internal)?;
    Ok(Json(products))
}

pub async fn get_product_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, CoreError> {
    let id = parse_id(&id)?;
    let product = state.product_service.get_product_by_id(id).await?;
    Ok(Json(product))
}

pub async fn search_product(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Product>>, CoreError> {
    let raw = query
        .price_gt
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CoreError::BadRequest("缺少查询参数 priceGt".to_string()))?;
    let price_gt: f64 = raw
        .parse()
        .map_err(|_| CoreError::BadRequest(format!("无效的 priceGt: {raw}")))?;

    let products = state
        .product_service
        .search_product(price_gt)
        .await
        .map_err(CoreError::internal)?;
    Ok(Json(products))
}

pub async fn create_product(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, CoreError> {
    let product = parse_product(&body)?;
    let id = state
        .product_service
        .create_product(product)
        .await
        .map_err(CoreError::internal)?;

    info!("创建产品 {}", id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/products/{id}"))],
    ))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, CoreError> {
    let id = parse_id(&id)?;
    let product = parse_product(&body)?;
    state
        .product_service
        .update_product(id, product)
        .await
        .map_err(CoreError::internal)?;
    Ok(StatusCode::OK)
}

pub async fn patch_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, CoreError> {
    let id = parse_id(&id)?;
    let product = parse_product(&body)?;
    state
        .product_service
        .patch_product(id, product)
        .await
        .map_err(CoreError::internal)?;
    Ok(StatusCode::OK)
}

pub async fn delete_product(
    State(state): State<AppState>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<MessageResponse>, CoreError> {
    let id = parse_id(query.id.as_deref().unwrap_or_default())?;
    state
        .product_service
        .delete_product(id)
        .await
        .map_err(CoreError::internal)?;

    info!("删除产品 {}", id);
    Ok(Json(MessageResponse::new("product deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("12").unwrap(), 12);
        assert!(matches!(parse_id("abc"), Err(CoreError::BadRequest(_))));
        assert!(matches!(parse_id(""), Err(CoreError::BadRequest(_))));
        assert!(matches!(parse_id("1.5"), Err(CoreError::BadRequest(_))));
    }

    #[test]
    fn test_parse_product() {
        let product = parse_product(br#"{"name":"Gadget","price":5,"quantity":1}"#).unwrap();
        assert_eq!(product.name, "Gadget");
        assert_eq!(product.price, 5.0);

        assert!(matches!(parse_product(b"{"), Err(CoreError::BadRequest(_))));
        assert!(matches!(parse_product(b""), Err(CoreError::BadRequest(_))));
        assert!(matches!(
            parse_product(br#"{"quantity":"many"}"#),
            Err(CoreError::BadRequest(_))
        ));
    }
}
