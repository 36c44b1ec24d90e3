//! Browser front end: a one-field research form served with axum.
//!
//! ## Endpoints
//!
//! - `GET /` — the form, with the saved research log
//! - `POST /research` — run a submission (`topic` form field) and show the
//!   current record next to the refreshed log
//! - `GET /health` — liveness probe

use crate::config::AppConfig;
use crate::error::{ResearchError, Result};
use crate::pipeline::Researcher;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use research_sources::LookupSource;
use std::sync::Arc;

#[derive(Debug, serde::Deserialize)]
struct ResearchForm {
    #[serde(default)]
    topic: String,
}

/// Build the router for a shared researcher.
pub fn router<W, S>(researcher: Arc<Researcher<W, S>>) -> Router
where
    W: LookupSource + 'static,
    S: LookupSource + 'static,
{
    Router::new()
        .route("/", get(index::<W, S>))
        .route("/research", post(research::<W, S>))
        .route("/health", get(health))
        .with_state(researcher)
}

/// Bind `config.host:config.port` and serve until the process stops.
pub async fn serve<W, S>(config: &AppConfig, researcher: Researcher<W, S>) -> Result<()>
where
    W: LookupSource + 'static,
    S: LookupSource + 'static,
{
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ResearchError::Server(format!("failed to bind {addr}: {e}")))?;
    let local_addr = listener.local_addr()?;

    let app = router(Arc::new(researcher));

    tracing::info!("research assistant listening on http://{local_addr}");
    axum::serve(listener, app)
        .await
        .map_err(|e| ResearchError::Server(e.to_string()))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok"
    }))
}

async fn index<W, S>(State(researcher): State<Arc<Researcher<W, S>>>) -> Response
where
    W: LookupSource + 'static,
    S: LookupSource + 'static,
{
    match researcher.on_load().await {
        Ok(saved) => Html(render_page("", "", &saved)).into_response(),
        Err(err) => internal_error(&err),
    }
}

async fn research<W, S>(
    State(researcher): State<Arc<Researcher<W, S>>>,
    Form(form): Form<ResearchForm>,
) -> Response
where
    W: LookupSource + 'static,
    S: LookupSource + 'static,
{
    match researcher.on_submit(&form.topic).await {
        Ok(submission) => {
            Html(render_page(&form.topic, &submission.current, &submission.saved)).into_response()
        }
        Err(err) => internal_error(&err),
    }
}

fn internal_error(err: &ResearchError) -> Response {
    tracing::error!(error = %err, "research request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Render the full page. All three values are inserted escaped.
pub fn render_page(topic: &str, current: &str, saved: &str) -> String {
    let mut html = String::with_capacity(2048 + current.len() + saved.len());
    html.push_str(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Offline AI Research Assistant</title>
<style>
body { font-family: sans-serif; margin: 2rem; }
.row { display: flex; gap: 1rem; margin-bottom: 1rem; }
.row > label { flex: 1; display: flex; flex-direction: column; }
textarea { width: 100%; font-family: monospace; }
</style>
</head>
<body>
<h1>Offline AI Research Assistant</h1>
<p>Enter a topic and get a structured research summary using Wikipedia and DuckDuckGo. All previous research is automatically displayed below.</p>
<form method="post" action="/research">
<div class="row">
<label>Enter a topic
<textarea name="topic" rows="4" placeholder="Type your research topic here...">"#,
    );
    html.push_str(&html_escape(topic));
    html.push_str(
        r#"</textarea>
</label>
</div>
<div class="row">
<label>Research Summary
<textarea id="summary-output" rows="15" readonly>"#,
    );
    html.push_str(&html_escape(current));
    html.push_str(
        r#"</textarea>
</label>
<label>All Saved Research
<textarea id="saved-output" rows="15" readonly>"#,
    );
    html.push_str(&html_escape(saved));
    html.push_str(
        r#"</textarea>
</label>
</div>
<button type="submit">Research</button>
</form>
</body>
</html>
"#,
    );
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escape_special_chars() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"quote\""), "&quot;quote&quot;");
        assert_eq!(html_escape("it's"), "it&#x27;s");
    }

    #[test]
    fn page_embeds_escaped_values() {
        let html = render_page("<b>Rust</b>", "Topic: <b>Rust</b>", "Summary: a & b");
        assert!(html.contains("&lt;b&gt;Rust&lt;/b&gt;</textarea>"));
        assert!(html.contains("Topic: &lt;b&gt;Rust&lt;/b&gt;</textarea>"));
        assert!(html.contains("Summary: a &amp; b</textarea>"));
        assert!(!html.contains("<b>Rust</b>"));
    }

    #[test]
    fn empty_page_has_form_and_both_areas() {
        let html = render_page("", "", "");
        assert!(html.contains(r#"<form method="post" action="/research">"#));
        assert!(html.contains(r#"id="summary-output""#));
        assert!(html.contains(r#"id="saved-output""#));
        assert!(html.contains(r#"<button type="submit">Research</button>"#));
    }
}
