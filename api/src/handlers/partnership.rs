//! Partnership contact handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::domain::entities::PartnershipRequest;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct PartnershipResponse {
    pub ok: bool,
}

/// POST /api/partnership-send
pub async fn send_partnership(
    State(state): State<AppState>,
    Json(request): Json<PartnershipRequest>,
) -> Result<Json<PartnershipResponse>, AppError> {
    state.partnership_service.submit(request).await?;
    Ok(Json(PartnershipResponse { ok: true }))
}
