use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::index::{parse_query, SearchRanker};
use crate::server::error::PageError;
use crate::server::pages::{results_page, search_page};
use crate::storage::SharedStorage;

/// Shared state of the search front-end
pub struct AppState {
    pub storage: SharedStorage,
    pub ranker: SearchRanker,
}

impl AppState {
    pub fn new(storage: SharedStorage, max_query_words: usize) -> Self {
        Self {
            storage,
            ranker: SearchRanker::new(max_query_words),
        }
    }
}

/// Build the router for the search front-end.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index).post(search).options(no_content))
        .route("/favicon.ico", get(no_content))
        .fallback(not_found)
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(search_page())
}

async fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn not_found() -> PageError {
    PageError::NotFound
}

/// Answers a submitted `query=` form
async fn search(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Html<String>, PageError> {
    let query = form_query(&body);
    let words = parse_query(&query);

    tracing::debug!("Search request {:?} -> {:?}", query, words);

    let storage = Arc::clone(&state.storage);
    let ranker = state.ranker;
    let results = tokio::task::spawn_blocking(move || {
        let storage = storage
            .lock()
            .map_err(|_| PageError::Internal("storage lock poisoned".to_string()))?;
        ranker.search(&*storage, &words).map_err(PageError::from)
    })
    .await
    .map_err(|e| PageError::Internal(e.to_string()))??;

    if results.is_empty() {
        return Err(PageError::NotFound);
    }

    Ok(Html(results_page(&query, &results)))
}

/// Extracts and fully decodes the `query` field of a urlencoded form body
pub fn form_query(body: &str) -> String {
    url::form_urlencoded::parse(body.as_bytes())
        .find(|(key, _)| key == "query")
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}
