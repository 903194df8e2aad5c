//! Error types for the query API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that
//! can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use warscry_query::{EvalError, QueryError};

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request's query parameters were rejected.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// The query string itself could not be decoded.
    #[error("malformed query string: {0}")]
    MalformedQuery(#[from] QueryRejection),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Filtering failed to complete.
    #[error("internal error: {0}")]
    Eval(#[from] EvalError),
}

impl ApiError {
    /// HTTP status this error maps to.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Query(_) | Self::MalformedQuery(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Eval(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use axum::extract::Query;
    use axum::http::Uri;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn malformed_query_string_is_a_json_bad_request() {
        let uri: Uri = "/fighters?wounds=many".parse().unwrap();
        let rejection = Query::<Vec<(String, u32)>>::try_from_uri(&uri).unwrap_err();

        let response = ApiError::from(rejection).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["status"], 400);
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .starts_with("malformed query string")
        );
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let response = ApiError::NotFound(String::from("warband x")).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "not found: warband x");
    }
}
