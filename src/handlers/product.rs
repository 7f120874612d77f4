// src/handlers/product.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument, warn};

use crate::dtos::product::{ImageUpload, MessageResponse, ProductResponse, ProductUpload};
use crate::error::{AppError, MessageError};
use crate::state::AppState;
use crate::validation::{validate_changes, validate_new_product};

async fn store_image(
    state: &AppState,
    image: Option<ImageUpload>,
) -> Result<Option<String>, AppError> {
    match image {
        Some(image) => {
            let reference = state.file_store.store(&image.bytes, &image.file_name).await?;
            Ok(Some(reference))
        }
        None => Ok(None),
    }
}

// Keeps disk and database in step when the record write does not go through.
async fn discard_image(state: &AppState, image_path: Option<String>) {
    if let Some(path) = image_path {
        warn!(%path, "Removing image of unsaved product");
        state.file_store.remove(&path).await;
    }
}

// POST /create_product - Create new product
#[instrument(skip(state, upload))]
pub async fn create_product(
    State(state): State<AppState>,
    upload: ProductUpload,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let mut new_product = validate_new_product(&upload.form)?;

    new_product.image_path = store_image(&state, upload.image).await?;
    let image_path = new_product.image_path.clone();

    match state.products.create(new_product).await {
        Ok(product) => {
            info!(code = %product.code, "Product created");
            Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
        }
        Err(e) => {
            discard_image(&state, image_path).await;
            Err(e)
        }
    }
}

// GET /products - List all products
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state.products.list_all().await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

// GET /products/search/{code} - Find one product by code
#[instrument(skip(state))]
pub async fn search_product(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state
        .products
        .find_by_code(&code)
        .await?
        .ok_or_else(|| AppError::not_found("No products found with the given code"))?;

    Ok(Json(ProductResponse::from(product)))
}

// GET /getProduct/{product_id} - Get single product; the id is the product code
#[instrument(skip(state))]
pub async fn get_product(
    Path(product_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state
        .products
        .find_by_code(&product_id)
        .await?
        .ok_or_else(|| AppError::not_found("No product found with the given product_id"))?;

    Ok(Json(ProductResponse::from(product)))
}

// PUT /updateProducts/{product_id} - Partial update
#[instrument(skip(state, upload))]
pub async fn update_product(
    Path(product_id): Path<String>,
    State(state): State<AppState>,
    upload: Result<ProductUpload, AppError>,
) -> Result<Json<ProductResponse>, MessageError> {
    if state.products.find_by_code(&product_id).await?.is_none() {
        return Err(AppError::not_found("Product not found").into());
    }

    let upload = upload?;
    let mut changes = validate_changes(&upload.form).map_err(AppError::from)?;

    changes.image_path = store_image(&state, upload.image).await?;
    let image_path = changes.image_path.clone();

    match state.products.update_by_code(&product_id, changes).await {
        Ok(Some(product)) => {
            info!(code = %product.code, "Product updated");
            Ok(Json(ProductResponse::from(product)))
        }
        Ok(None) => {
            // Deleted between the lookup and the update.
            discard_image(&state, image_path).await;
            Err(AppError::not_found("Product not found").into())
        }
        Err(e) => {
            discard_image(&state, image_path).await;
            Err(e.into())
        }
    }
}

// DELETE /deleteProducts/{product_id} - Delete product
#[instrument(skip(state))]
pub async fn delete_product(
    Path(product_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.products.delete_by_code(&product_id).await? {
        return Err(AppError::not_found("Product not found"));
    }

    info!(code = %product_id, "Product deleted");
    Ok(Json(MessageResponse {
        message: "Product deleted successfully".to_string(),
    }))
}
