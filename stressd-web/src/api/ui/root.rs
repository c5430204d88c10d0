//! Root page handler - Stress Detection surface

use axum::response::{Html, IntoResponse};

/// GET /
///
/// Single-page surface: upload control, result panel, prediction history.
pub async fn root_page() -> impl IntoResponse {
    let build_timestamp = env!("BUILD_TIMESTAMP");
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = env!("GIT_HASH");
    let build_profile = env!("BUILD_PROFILE");

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Stress Detection</title>
    <link rel="stylesheet" href="/static/stressd-ui.css">
</head>
<body>
    <header>
        <div class="header-content">
            <div class="header-left">
                <h1>🎧 Audio-Based Stress Detection</h1>
                <div class="subtitle">Upload your audio file to analyze stress levels!</div>
            </div>
            <div class="header-right">
                <div class="build-info-line">v{version} ({build_profile})</div>
                <div class="build-info-line">{git_hash}</div>
                <div class="build-info-line">{build_timestamp}</div>
            </div>
        </div>
    </header>
    <div class="container">
        <section>
            <h2>Upload</h2>
            <input type="file" id="audio-file" accept=".wav,audio/wav" data-uploader-key="0">
            <audio id="audio-player" controls style="display: none;"></audio>
            <div id="status-line" class="muted"></div>
            <div id="progress-track" class="progress-track">
                <div id="progress-fill" class="progress-fill"></div>
            </div>
            <div id="result-panel" class="result-panel"></div>
            <button id="try-another" class="button">🔄 Try Another File</button>
            <button id="show-previous" class="button">📋 Show Previous States</button>
        </section>
        <section id="history-panel" style="display: none;">
            <h2>Previous Predictions</h2>
            <div id="history-list" class="history-list"></div>
        </section>
    </div>
    <script src="/static/stressd-app.js"></script>
</body>
</html>
"#
    );

    Html(html)
}
