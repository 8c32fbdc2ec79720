use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn revoke_token(
    State(state): State<AppState>,
    body: Result<Json<AccessTokenData>, JsonRejection>,
) -> Result<ApiSuccess<AccessTokenData>, ApiError> {
    let Json(body) = body?;
    state.auth_service.revoke(&body.access_token).await?;

    Ok(ApiSuccess::new(StatusCode::OK, body))
}

/// `{"access_token": ...}` in both directions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenData {
    pub access_token: String,
}
