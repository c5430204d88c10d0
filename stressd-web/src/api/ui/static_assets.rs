//! Static asset handlers for the stressd-web UI
//!
//! Embeds and serves CSS/JS files at compile time

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

const UI_CSS: &str = include_str!("../../../static/stressd-ui.css");
const APP_JS: &str = include_str!("../../../static/stressd-app.js");

/// GET /static/stressd-ui.css
pub async fn serve_ui_css() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "text/css"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        UI_CSS,
    )
        .into_response()
}

/// GET /static/stressd-app.js
pub async fn serve_app_js() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "application/javascript"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        APP_JS,
    )
        .into_response()
}
