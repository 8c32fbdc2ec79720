use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::signup::TokenResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::Credentials;
use crate::inbound::http::router::AppState;

pub async fn signin(
    State(state): State<AppState>,
    body: Result<Json<SigninRequest>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .auth_service
        .signin(Credentials::new(body.email, body.password))
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, TokenResponseData { token }))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SigninRequest {
    email: String,
    password: String,
}
