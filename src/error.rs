//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    extract::rejection::{BytesRejection, JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested transaction was not found.
    ///
    /// For HTTP request handlers, the client should check that the ID is
    /// correct and that the transaction has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The request body could not be parsed as a transaction.
    ///
    /// The string is the parser's message, which names the offending field.
    #[error("invalid request body: {0}")]
    InvalidPayload(String),

    /// The request body was not sent as JSON.
    #[error("expected a JSON request body: {0}")]
    UnsupportedContentType(String),

    /// The request body could not be read, e.g. it is larger than the body limit.
    ///
    /// Carries the status code chosen by the body reader, 413 for oversized bodies.
    #[error("could not read the request body: {1}")]
    UnreadableBody(StatusCode, String),

    /// A path parameter, e.g. the transaction ID, could not be parsed.
    #[error("invalid path parameter: {0}")]
    InvalidPath(String),

    /// The directory for the database file could not be created.
    #[error("could not create the database directory \"{0}\": {1}")]
    DatabaseDirectory(String, String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                Error::UnsupportedContentType(rejection.body_text())
            }
            JsonRejection::BytesRejection(rejection) => rejection.into(),
            rejection => Error::InvalidPayload(rejection.body_text()),
        }
    }
}

impl From<BytesRejection> for Error {
    fn from(rejection: BytesRejection) -> Self {
        Error::UnreadableBody(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidPath(rejection.body_text())
    }
}

/// The message sent to the client when a transaction does not exist.
pub const TRANSACTION_NOT_FOUND: &str = "Transaction not found";

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": TRANSACTION_NOT_FOUND })),
            )
                .into_response(),
            Error::InvalidPayload(message) => validation_error_response(&["body"], &message),
            Error::InvalidPath(message) => {
                validation_error_response(&["path", "transaction_id"], &message)
            }
            Error::UnreadableBody(status, message) => {
                (status, Json(json!({ "detail": message }))).into_response()
            }
            Error::UnsupportedContentType(message) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Json(json!({ "detail": message })),
            )
                .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "Internal Server Error" })),
                )
                    .into_response()
            }
        }
    }
}

fn validation_error_response(location: &[&str], message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "detail": [{
                "loc": location,
                "msg": message,
                "type": "value_error",
            }]
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
    use serde_json::{Value, json};

    use crate::Error;

    async fn into_json(error: Error) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("could not read response body");

        (
            status,
            serde_json::from_slice(&body).expect("response body is not JSON"),
        )
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }

    #[tokio::test]
    async fn not_found_has_fixed_detail() {
        let (status, body) = into_json(Error::NotFound).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "Transaction not found" }));
    }

    #[tokio::test]
    async fn invalid_payload_is_unprocessable() {
        let (status, body) =
            into_json(Error::InvalidPayload("missing field `amount`".to_owned())).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["loc"], json!(["body"]));
        assert_eq!(body["detail"][0]["msg"], "missing field `amount`");
    }

    #[tokio::test]
    async fn unreadable_body_keeps_its_status() {
        let (status, body) = into_json(Error::UnreadableBody(
            StatusCode::PAYLOAD_TOO_LARGE,
            "length limit exceeded".to_owned(),
        ))
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body, json!({ "detail": "length limit exceeded" }));
    }

    #[tokio::test]
    async fn lock_error_is_internal_server_error() {
        let (status, body) = into_json(Error::DatabaseLockError).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "detail": "Internal Server Error" }));
    }
}
