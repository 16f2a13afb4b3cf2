use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    Json,
};
use service::product::Product;
use tracing::info;

use crate::dto::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::errors::ApiError;
use crate::state::AppState;
use crate::validation::ValidatedJson;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state.products.list().await?;
    info!(count = products.len(), "list products");
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<ProductResponse>, ApiError> {
    match state.products.get(id).await? {
        Some(p) => Ok(Json(p.into())),
        None => Err(ApiError::NotFound),
    }
}

pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateProductRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<ProductResponse>), ApiError> {
    let created = state.products.add(input.into()).await?;
    let location = format!("/products/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created.into())))
}

/// Full replacement. The path id and body `productID` must agree; an unknown id is a no-op.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(input): ValidatedJson<UpdateProductRequest>,
) -> Result<StatusCode, ApiError> {
    if id != input.product_id {
        return Err(ApiError::IdMismatch);
    }
    state.products.update(Product::from(input)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Idempotent: 204 whether or not the product existed.
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    state.products.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
