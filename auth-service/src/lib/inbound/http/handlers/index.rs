use axum::http::StatusCode;

use super::logout::MessageData;
use super::ApiSuccess;

pub async fn index() -> ApiSuccess<MessageData> {
    ApiSuccess::new(
        StatusCode::OK,
        MessageData {
            message: "Hello World".to_string(),
        },
    )
}
