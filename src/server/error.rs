use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::index::SearchError;
use crate::server::pages::error_page;

/// Failure of a front-end request, rendered as an HTML error page
#[derive(Debug)]
pub enum PageError {
    /// The query had no words or too many
    InvalidQuery { max: usize },

    /// Nothing matched, or the path does not exist
    NotFound,

    /// Storage failed while answering
    Internal(String),
}

impl From<SearchError> for PageError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidQuery { max, .. } => Self::InvalidQuery { max },
            SearchError::Storage(e) => Self::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::InvalidQuery { max } => (
                StatusCode::BAD_REQUEST,
                format!("Query must contain 1-{} words", max),
            ),
            Self::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            Self::Internal(detail) => {
                tracing::error!("Search request failed: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Html(error_page(&message))).into_response()
    }
}
