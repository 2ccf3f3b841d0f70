use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use chrono::FixedOffset;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use nudge_core::NudgeConfig;
use nudge_extract::TimeExtractor;
use nudge_scheduler::ReconcilerEngine;
use nudge_store::ReminderStore;

use crate::http;

/// Shared state for all HTTP handlers and the background reconciliation loop.
pub struct AppState {
    pub config: NudgeConfig,
    pub store: ReminderStore,
    pub extractor: TimeExtractor,
    /// The engine's task set is rebuilt on every pass; the lock serialises
    /// passes from the interval loop and the on-demand endpoint.
    pub engine: tokio::sync::Mutex<ReconcilerEngine>,
    /// The single configured zone used to derive "today".
    pub zone: FixedOffset,
}

/// Assemble the HTTP router. Permissive CORS because reminder creation is
/// called directly from a browser client.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(http::health::health_handler))
        .route("/reminders", post(http::reminders::create_handler))
        .route("/reconcile", post(http::reminders::reconcile_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
