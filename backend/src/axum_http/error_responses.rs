use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Uniform `{ success, data, message }` envelope for every API body.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub fn ok<T: Serialize>(data: T) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            data: Some(data),
            message: None,
        }),
    )
        .into_response()
}

pub fn ok_with_message<T: Serialize>(data: T, message: &str) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse {
            success: true,
            data: Some(data),
            message: Some(message.to_string()),
        }),
    )
        .into_response()
}

pub fn created<T: Serialize>(data: T, message: &str) -> Response {
    (
        StatusCode::CREATED,
        Json(ApiResponse {
            success: true,
            data: Some(data),
            message: Some(message.to_string()),
        }),
    )
        .into_response()
}

pub fn ok_message(message: &str) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse::<()> {
            success: true,
            data: None,
            message: Some(message.to_string()),
        }),
    )
        .into_response()
}

pub fn failure(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            message: Some(message.to_string()),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_body_carries_no_data_field() {
        let envelope = ApiResponse::<()> {
            success: false,
            data: None,
            message: Some("subscription not found".to_string()),
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "message": "subscription not found" })
        );
    }

    #[test]
    fn success_body_skips_absent_message() {
        let envelope = ApiResponse {
            success: true,
            data: Some(serde_json::json!({ "id": 1 })),
            message: None,
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": true, "data": { "id": 1 } })
        );
    }
}
