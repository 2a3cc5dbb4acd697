// 🌐 Interactions endpoint - signed webhook → command reply
// Axum router shared by the server binary and its tests

use crate::commands::Appraiser;
use crate::fetch::PageSource;
use crate::interactions::{Interaction, InteractionResponse, APPLICATION_COMMAND, PING};
use crate::signature::{RequestVerifier, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{warn, Instrument};
use uuid::Uuid;

/// Shared application state
pub struct AppState<S: PageSource> {
    pub verifier: RequestVerifier,
    pub appraiser: Appraiser<S>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

// ============================================================================
// HANDLERS
// ============================================================================

/// GET /api/health - Health check
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// POST /interactions - Verify, then answer pings and commands
async fn interactions<S: PageSource + 'static>(
    State(state): State<Arc<AppState<S>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("interaction", %request_id);

    async move {
        if let Err(e) = state.verifier.verify(
            header(&headers, SIGNATURE_HEADER),
            header(&headers, TIMESTAMP_HEADER),
            &body,
        ) {
            warn!(error = %e, "rejected interaction");
            return (StatusCode::UNAUTHORIZED, "Invalid request signature").into_response();
        }

        let interaction: Interaction = match serde_json::from_slice(&body) {
            Ok(i) => i,
            Err(e) => {
                warn!(error = %e, "unparseable interaction body");
                return (StatusCode::BAD_REQUEST, "Invalid interaction payload").into_response();
            }
        };

        match interaction.kind {
            PING => Json(InteractionResponse::pong()).into_response(),
            APPLICATION_COMMAND => {
                let data = interaction.data.unwrap_or_default();
                let reply = state.appraiser.handle(&data).await;
                Json(InteractionResponse::message(reply)).into_response()
            }
            _ => StatusCode::NOT_FOUND.into_response(),
        }
    }
    .instrument(span)
    .await
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn router<S: PageSource + 'static>(state: AppState<S>) -> Router {
    let api_routes = Router::new().route("/health", get(health));

    Router::new()
        .route("/interactions", post(interactions::<S>))
        .nest("/api", api_routes)
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
}

// ============================================================================
// TESTS
// ============================================================================
