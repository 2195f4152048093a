//! API module
//!
//! HTTP request handlers and the route table.

pub mod dna;
pub mod feedback;
pub mod health;
pub mod tasks;
pub mod transcribe;
pub mod utils;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;

/// Upper bound on request bodies (uploaded photos and audio)
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Build the application router
///
/// API routes are registered first; when `static_dir` holds a built
/// frontend it is served for every other path, with `index.html` as the
/// fallback for client-side routes.
pub fn router(state: AppState) -> Router {
    let static_dir = state.config.storage.static_dir.clone();

    let api = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/feedback", post(feedback::submit_feedback))
        .route("/api/feedback/simple", post(feedback::submit_simple_feedback))
        .route("/api/status/:task_id", get(tasks::get_status))
        .route("/api/images/:filename", get(tasks::get_image))
        .route("/api/transcribe", post(transcribe::transcribe))
        .route("/api/dna/update", post(dna::update_dna))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state);

    if has_frontend(&static_dir) {
        tracing::info!("Serving frontend from {}", static_dir.display());
        let index = ServeFile::new(static_dir.join("index.html"));
        api.fallback_service(ServeDir::new(&static_dir).fallback(index))
    } else {
        tracing::info!(
            "No frontend found at {}, serving API only",
            static_dir.display()
        );
        api
    }
}

/// Whether `dir` exists and has at least one entry
fn has_frontend(dir: &Path) -> bool {
    std::fs::read_dir(dir)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_has_frontend() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        assert!(!has_frontend(temp_dir.path()));
        assert!(!has_frontend(&temp_dir.path().join("missing")));

        std::fs::write(temp_dir.path().join("index.html"), "<html></html>").unwrap();
        assert!(has_frontend(temp_dir.path()));
    }
}
