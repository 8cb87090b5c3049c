//! Client intake handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use core_kernel::ClientId;

use crate::dto::clients::{ClientResponse, RegisterClientRequest};
use crate::{error::ApiError, AppState};

/// Registers a new client
pub async fn register_client(
    State(state): State<AppState>,
    Json(request): Json<RegisterClientRequest>,
) -> Result<(StatusCode, Json<ClientResponse>), ApiError> {
    let client = state.use_case.execute(request.into()).await?;
    Ok((StatusCode::CREATED, Json(ClientResponse::from(&client))))
}

/// Gets a client by ID
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClientResponse>, ApiError> {
    let client = state
        .repository
        .find_by_id(ClientId::from_uuid(id))
        .await
        .map_err(|e| ApiError::Database(e.to_string()))?
        .ok_or_else(|| ApiError::NotFound(format!("Client {id} not found")))?;

    Ok(Json(ClientResponse::from(&client)))
}
