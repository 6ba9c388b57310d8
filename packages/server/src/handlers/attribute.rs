use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use super::name_conflict;
use crate::entity::attribute;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::attribute::*;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Attributes",
    operation_id = "createAttribute",
    summary = "Create an attribute definition",
    description = "Defines an attribute (e.g. Size) that products can carry values for. Values are not typed.",
    request_body = CreateAttributeRequest,
    responses(
        (status = 201, description = "Attribute created", body = AttributeResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Name already in use (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_attribute(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateAttributeRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_attribute(&payload)?;

    let model = attribute::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| name_conflict(e, "Attribute"))?;

    Ok((StatusCode::CREATED, Json(AttributeResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Attributes",
    operation_id = "listAttributes",
    summary = "List all attribute definitions",
    responses(
        (status = 200, description = "All attributes, ascending by ID", body = Vec<AttributeResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_attributes(
    State(state): State<AppState>,
) -> Result<Json<Vec<AttributeResponse>>, AppError> {
    let rows = attribute::Entity::find()
        .order_by_asc(attribute::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
