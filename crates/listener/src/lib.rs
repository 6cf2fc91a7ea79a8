//! Rostrum inbound HTTP infrastructure.
//!
//! A thin web layer over [`nodes::DebateRunner`]: it accepts a question,
//! invokes the pipeline, and relays the final verdict. No debate logic lives
//! here.
//!
//! ## Routes
//!
//! | Route | Behaviour |
//! |-------|-----------|
//! | `POST /api/chat` | Run the debate pipeline; return the final stage's text |
//! | `GET /api/health` | Static readiness marker |
//! | anything else | Static frontend files, with SPA index fallback |
//!
//! ## Error policy
//!
//! Every pipeline failure maps to a 5xx with a generic message. The real
//! error (including any upstream response body) is logged, never echoed to
//! the client.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use nodes::DebateRunner;
use pipeline::DebateError;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

// ---------------------------------------------------------------------------
// Configuration and state
// ---------------------------------------------------------------------------

/// Server configuration.
pub struct ServerConfig {
    /// TCP port to bind. `0` asks the OS for a free port (used by tests).
    pub port: u16,
    /// Directory of built frontend assets; `None` disables static hosting.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            static_dir: Some(PathBuf::from("static")),
        }
    }
}

/// Shared application state passed to Axum handlers.
#[derive(Clone)]
pub struct AppState {
    runner: Arc<DebateRunner>,
}

impl AppState {
    /// Wraps the runner the handlers delegate to.
    pub fn new(runner: Arc<DebateRunner>) -> Self {
        Self { runner }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChatRequest {
    user_question: String,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    response: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

// ---------------------------------------------------------------------------
// Router and server
// ---------------------------------------------------------------------------

/// Builds the Axum router with all routes.
pub fn build_router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let router = Router::new()
        .route("/api/chat", post(chat_handler))
        .route("/api/health", get(health_handler))
        .with_state(state)
        .layer(CorsLayer::permissive());

    match static_dir {
        Some(dir) => {
            let index = ServeFile::new(dir.join("index.html"));
            router.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => router,
    }
}

/// Binds the listener and starts serving. Returns a handle carrying the
/// bound port; dropping the handle does not stop the server task.
pub async fn start(config: ServerConfig, state: AppState) -> Result<ServerHandle, std::io::Error> {
    let router = build_router(state, config.static_dir);
    let addr = format!("0.0.0.0:{}", config.port);
    let tcp = tokio::net::TcpListener::bind(&addr).await?;
    let local_addr = tcp.local_addr()?;

    tracing::info!(port = local_addr.port(), "rostrum listener started");

    let server = tokio::spawn(async move {
        axum::serve(tcp, router).await.ok();
    });

    Ok(ServerHandle {
        port: local_addr.port(),
        _server: server,
    })
}

/// Handle returned by [`start`] — keeps the serve task alive.
pub struct ServerHandle {
    /// The actually bound port (useful when configured with port `0`).
    pub port: u16,
    _server: tokio::task::JoinHandle<()>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let transcript = state.runner.run(&request.user_question).await?;

    let response = transcript
        .last()
        .map(|entry| entry.text().to_string())
        .unwrap_or_default();

    Ok(Json(ChatResponse { response }))
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

/// Wrapper turning a [`DebateError`] into an HTTP response.
///
/// Upstream failures become 502, everything else 500; the body is always the
/// same generic message so provider error text cannot leak to clients.
struct ApiError(DebateError);

impl From<DebateError> for ApiError {
    fn from(err: DebateError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DebateError::Client(client_err) => {
                tracing::error!(kind = client_err.kind(), error = %client_err, "model call failed");
                StatusCode::BAD_GATEWAY
            }
            other => {
                tracing::error!(error = %other, "debate run failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(serde_json::json!({
            "error": "debate pipeline failed",
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use nodes::PipelineSpec;
    use pipeline::testing::{ScriptedClient, ScriptedReply};
    use pipeline::ClientError;

    use super::*;

    fn scripted_state(client: ScriptedClient) -> AppState {
        let runner = DebateRunner::new(Arc::new(client), PipelineSpec::judged());
        AppState::new(Arc::new(runner))
    }

    async fn start_test_server(client: ScriptedClient) -> ServerHandle {
        let config = ServerConfig {
            port: 0,
            static_dir: None,
        };
        start(config, scripted_state(client)).await.unwrap()
    }

    #[tokio::test]
    async fn chat_returns_final_stage_text() {
        let handle = start_test_server(ScriptedClient::from_texts([
            "pro out",
            "con out",
            "PRO wins. You should require uniforms.",
        ]))
        .await;

        let url = format!("http://127.0.0.1:{}/api/chat", handle.port);
        let resp = reqwest::Client::new()
            .post(&url)
            .json(&serde_json::json!({"user_question": "Should schools require uniforms?"}))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["response"], "PRO wins. You should require uniforms.");
    }

    #[tokio::test]
    async fn health_is_static() {
        let handle = start_test_server(ScriptedClient::from_texts([""])).await;

        let url = format!("http://127.0.0.1:{}/api/health", handle.port);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = resp.json().await.unwrap();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn upstream_failure_maps_to_bad_gateway_without_leaking() {
        let secret = "api key invalid: sk-secret-detail";
        let handle = start_test_server(ScriptedClient::new(vec![ScriptedReply::Fail(
            ClientError::AuthenticationFailed(secret.to_string()),
        )]))
        .await;

        let url = format!("http://127.0.0.1:{}/api/chat", handle.port);
        let resp = reqwest::Client::new()
            .post(&url)
            .json(&serde_json::json!({"user_question": "q"}))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 502);
        let body = resp.text().await.unwrap();
        assert!(body.contains("debate pipeline failed"));
        assert!(!body.contains("sk-secret-detail"));
    }

    #[tokio::test]
    async fn blank_question_maps_to_server_failure() {
        let handle = start_test_server(ScriptedClient::from_texts(["unused"])).await;

        let url = format!("http://127.0.0.1:{}/api/chat", handle.port);
        let resp = reqwest::Client::new()
            .post(&url)
            .json(&serde_json::json!({"user_question": "   "}))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 500);
    }
}
