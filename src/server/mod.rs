//! HTML search front-end
//!
//! Routes:
//! - `GET /` serves the search form
//! - `POST /` ranks the `query` form field and renders the results
//! - `GET /favicon.ico` and `OPTIONS /` answer 204 with no body
//! - everything else is 404
//!
//! Invalid queries answer 400, queries with no matches answer 404.

mod error;
mod pages;
mod routes;

pub use error::PageError;
pub use pages::escape_html;
pub use routes::{form_query, router, AppState};

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::storage::SharedStorage;
use crate::SpiderError;

/// Serves the front-end until Ctrl-C
pub async fn serve(config: &ServerConfig, storage: SharedStorage) -> Result<(), SpiderError> {
    let state = Arc::new(AppState::new(storage, config.max_query_words));
    let app = router(state);

    let listener = TcpListener::bind(config.bind.as_str()).await?;
    tracing::info!("Search front-end listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Search front-end stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
