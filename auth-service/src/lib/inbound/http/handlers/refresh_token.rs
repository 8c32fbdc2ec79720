use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use serde::Deserialize;

use super::revoke_token::AccessTokenData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn refresh_token(
    State(state): State<AppState>,
    form: Result<Form<RefreshTokenForm>, FormRejection>,
) -> Result<ApiSuccess<AccessTokenData>, ApiError> {
    let Form(form) = form?;

    if let Some(grant_type) = form.grant_type.as_deref() {
        if grant_type != "refresh_token" {
            return Err(ApiError::BadRequest(format!(
                "Unsupported grant_type: {}",
                grant_type
            )));
        }
    }

    let access_token = state.auth_service.refresh_access(&form.refresh_token).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AccessTokenData { access_token },
    ))
}

/// OAuth2-style `application/x-www-form-urlencoded` refresh request
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshTokenForm {
    refresh_token: String,
    #[serde(default)]
    grant_type: Option<String>,
}
