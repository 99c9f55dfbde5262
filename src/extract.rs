//! Request extractors that reject with the app's [Error] instead of axum's plain text rejections.

use axum::{
    extract::FromRequest,
    extract::FromRequestParts,
    response::{IntoResponse, Response},
};

use crate::Error;

/// A JSON body extractor and response type.
///
/// Works like [axum::Json], except that malformed bodies are rejected with a
/// JSON error that names the offending field.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct Json<T>(pub T);

impl<T> IntoResponse for Json<T>
where
    axum::Json<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// A path parameter extractor.
///
/// Works like [axum::extract::Path], except that unparsable parameters are
/// rejected with a JSON error.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct Path<T>(pub T);
