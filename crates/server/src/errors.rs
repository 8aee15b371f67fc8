use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::{error, warn};

/// Uniform failure envelope: `{success: false, error: <code>, message: <text>}`
/// with one canonical message per status. Detailed causes go to the log, not
/// the client.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, detail: detail.into() }
    }

    fn canonical_message(&self) -> &'static str {
        match self.status {
            StatusCode::BAD_REQUEST => "bad request",
            StatusCode::NOT_FOUND => "resource not found",
            StatusCode::UNPROCESSABLE_ENTITY => "unprocessable",
            _ => "Internal Server Error",
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self { status, detail: e.to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, detail = %self.detail, "request failed");
        } else {
            warn!(status = %self.status, detail = %self.detail, "request rejected");
        }
        let body = serde_json::json!({
            "success": false,
            "error": self.status.as_u16(),
            "message": self.canonical_message(),
        });
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_kinds_map_to_contract_statuses() {
        let cases = [
            (ServiceError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ServiceError::Unprocessable("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (ServiceError::Db("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn canonical_messages_match_the_original_contract() {
        assert_eq!(
            ApiError::from(ServiceError::NotFound("x".into())).canonical_message(),
            "resource not found"
        );
        assert_eq!(
            ApiError::from(ServiceError::Unprocessable("x".into())).canonical_message(),
            "unprocessable"
        );
        assert_eq!(
            ApiError::from(ServiceError::Db("x".into())).canonical_message(),
            "Internal Server Error"
        );
        assert_eq!(ApiError::bad_request("nope").canonical_message(), "bad request");
    }
}
