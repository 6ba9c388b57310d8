use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use catalog_common::UploadedFile;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::product::*;
use crate::state::AppState;

/// Multipart field carrying product images. May repeat.
const IMAGE_FIELD: &str = "images";

pub fn upload_body_limit(max_bytes: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_bytes)
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Products",
    operation_id = "createProduct",
    summary = "Create a new product",
    description = "Creates a product and assigns its attribute values. Image filenames are stored with the upload prefix. The response does not include attribute values.",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Validation error or title in use (VALIDATION_ERROR, DUPLICATE_TITLE)", body = ErrorBody),
        (status = 404, description = "Category not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProductRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_product(&payload)?;

    let product = state.products.create(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Products",
    operation_id = "listProducts",
    summary = "List all products",
    description = "Returns every product with its category and attribute values, ascending by ID.",
    responses(
        (status = 200, description = "All products", body = Vec<ProductDetailResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductDetailResponse>>, AppError> {
    let products = state.products.find_all().await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/nes-tabs",
    tag = "Products",
    operation_id = "listNesTabs",
    summary = "List products newest first",
    description = "Returns every product ordered by descending ID, without category or attribute values.",
    responses(
        (status = 200, description = "Products, newest first", body = Vec<ProductResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_nes_tabs(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state.products.find_nes_tabs().await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    operation_id = "getProduct",
    summary = "Get a product by ID",
    description = "Returns a product with its category and attribute values.",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product details", body = ProductDetailResponse),
        (status = 404, description = "Product not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProductDetailResponse>, AppError> {
    let detail = state
        .products
        .find_one(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".into()))?;
    Ok(Json(detail.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    operation_id = "updateProduct",
    summary = "Update an existing product",
    description = "Partially updates a product: only provided scalar fields are modified, then the submitted attribute values are merged in. `images` is accepted but ignored. The title is not re-checked for uniqueness.",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Product or category not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    validate_update_product(&payload)?;

    let product = state.products.update(id, payload.into()).await?;
    Ok(Json(product.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    operation_id = "deleteProduct",
    summary = "Delete a product by ID",
    description = "Deletes a product together with its attribute values. Deleting a missing product also returns 204.",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    state.products.destroy(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/images",
    tag = "Products",
    operation_id = "uploadProductImages",
    summary = "Upload product images",
    description = "Accepts one or more files in the repeatable `images` multipart field and returns their filenames in upload order. The names are what `images` expects on product creation.",
    request_body(content_type = "multipart/form-data", description = "Image files"),
    responses(
        (status = 200, description = "Uploaded filenames", body = Vec<String>),
        (status = 400, description = "Malformed multipart body (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn upload_images(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<String>>, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }
        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::Validation("Image field must have a filename".into()))?;
        let content_type = field.content_type().map(|s| s.to_string());
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read image: {e}")))?;

        files.push(UploadedFile {
            filename,
            content_type,
            size: data.len() as u64,
        });
    }

    tracing::debug!(count = files.len(), "Images received");
    Ok(Json(state.products.upload_images(files)))
}
