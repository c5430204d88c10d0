//! UI Routes - HTML pages for the stressd-web interface
//!
//! # Structure
//! - **Root Page** (`root`): upload, result, and history surface
//! - **Static Assets** (`static_assets`): CSS/JS file serving

use crate::AppState;
use axum::{routing::get, Router};

mod root;
mod static_assets;

use root::root_page;
use static_assets::{serve_app_js, serve_ui_css};

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_page))
        .route("/static/stressd-ui.css", get(serve_ui_css))
        .route("/static/stressd-app.js", get(serve_app_js))
}
