use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedSubject;

pub async fn protected(
    Extension(authenticated): Extension<AuthenticatedSubject>,
) -> ApiSuccess<ProtectedResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        ProtectedResponseData {
            message: "This is a protected route".to_string(),
            subject: authenticated.subject,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProtectedResponseData {
    pub message: String,
    pub subject: String,
}
