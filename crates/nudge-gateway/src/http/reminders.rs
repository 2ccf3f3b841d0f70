//! Reminder endpoints — POST /reminders and POST /reconcile.
//!
//! Creation accepts raw text, runs extraction (which never fails — ambiguous
//! input resolves via the fallback), and persists the tuple. Either the
//! reminder is stored and returned in full, or the request fails with no
//! partial state.
//!
//! Auth: `Authorization: Bearer <token>` header when token mode is configured.
//!
//! Request:  `{"text": "remind me to check the oven in 20 minutes"}`
//! Response: `{"id": "...", "hour": 10, "minute": 20, "message": "..."}`
//! Error:    `{"error": "..."}`

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::app::AppState;

#[derive(Deserialize)]
pub struct CreateRequest {
    /// Free-text reminder request.
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct CreateReply {
    pub id: String,
    pub hour: u8,
    pub minute: u8,
    pub message: String,
}

#[derive(Serialize)]
pub struct ReconcileReply {
    /// Number of reminders processed by the pass.
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

/// POST /reminders — extract a delivery time from free text and persist it.
pub async fn create_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateRequest>,
) -> Result<(StatusCode, Json<CreateReply>), (StatusCode, Json<ApiError>)> {
    if !check_auth(&state, &headers) {
        return Err(unauthorized());
    }

    if req.text.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: "text cannot be empty".to_string(),
            }),
        ));
    }

    let now = chrono::Utc::now().with_timezone(&state.zone);
    let extracted = state.extractor.extract(&req.text, now).await;

    match state
        .store
        .insert(extracted.hour, extracted.minute, &extracted.message)
    {
        Ok(r) => Ok((
            StatusCode::CREATED,
            Json(CreateReply {
                id: r.id.to_string(),
                hour: r.hour,
                minute: r.minute,
                message: r.message,
            }),
        )),
        Err(e) => {
            warn!(error = %e, "POST /reminders failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

/// POST /reconcile — run one reconciliation pass on demand.
pub async fn reconcile_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ReconcileReply>, (StatusCode, Json<ApiError>)> {
    if !check_auth(&state, &headers) {
        return Err(unauthorized());
    }

    let now = chrono::Utc::now().with_timezone(&state.zone);
    let mut engine = state.engine.lock().await;
    match engine.reconcile(now).await {
        Ok(count) => Ok(Json(ReconcileReply { count })),
        Err(e) => {
            warn!(error = %e, "POST /reconcile failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

fn unauthorized() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ApiError {
            error: "Unauthorized. Set 'Authorization: Bearer <your-token>' header.".to_string(),
        }),
    )
}

/// Returns true if the request is authorised under the configured auth mode.
fn check_auth(state: &AppState, headers: &HeaderMap) -> bool {
    use nudge_core::config::AuthMode;

    match &state.config.gateway.auth.mode {
        AuthMode::None => true,
        AuthMode::Token => {
            let expected = match &state.config.gateway.auth.token {
                Some(t) => t.as_str(),
                // Token mode configured but no token value — deny.
                None => return false,
            };
            extract_bearer(headers)
                .map(|t| t == expected)
                .unwrap_or(false)
        }
    }
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::FixedOffset;
    use nudge_core::config::{AuthConfig, AuthMode, GatewayConfig, NudgeConfig};
    use nudge_extract::{CompletionProvider, FunctionSchema, ProviderError, TimeExtractor};
    use nudge_notify::LogNotifier;
    use nudge_scheduler::ReconcilerEngine;
    use nudge_store::ReminderStore;
    use rusqlite::Connection;

    struct OfflineProvider;

    #[async_trait]
    impl CompletionProvider for OfflineProvider {
        fn name(&self) -> &str {
            "offline"
        }
        async fn complete(
            &self,
            _system: &str,
            _user: &str,
            _schema: &FunctionSchema,
        ) -> Result<serde_json::Value, ProviderError> {
            Err(ProviderError::Unavailable("offline".into()))
        }
    }

    fn state_with_auth(auth: AuthConfig) -> Arc<AppState> {
        let config = NudgeConfig {
            gateway: GatewayConfig {
                auth,
                ..GatewayConfig::default()
            },
            ..NudgeConfig::default()
        };
        let store = ReminderStore::new(Connection::open_in_memory().unwrap()).unwrap();
        let engine = ReconcilerEngine::new(store.clone(), Arc::new(LogNotifier), 60);
        Arc::new(AppState {
            config,
            store,
            extractor: TimeExtractor::new(Box::new(OfflineProvider), 10),
            engine: tokio::sync::Mutex::new(engine),
            zone: FixedOffset::east_opt(0).unwrap(),
        })
    }

    fn open_state() -> Arc<AppState> {
        state_with_auth(AuthConfig::default())
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", format!("Bearer {token}").parse().unwrap());
        headers
    }

    fn request(text: &str) -> Json<CreateRequest> {
        Json(CreateRequest {
            text: text.to_string(),
        })
    }

    #[test]
    fn bearer_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer sekrit".parse().unwrap());
        assert_eq!(extract_bearer(&headers), Some("sekrit"));

        let mut bad = HeaderMap::new();
        bad.insert("authorization", "Basic sekrit".parse().unwrap());
        assert_eq!(extract_bearer(&bad), None);

        assert_eq!(extract_bearer(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn empty_text_is_a_bad_request() {
        let state = open_state();
        let err = create_handler(State(state), HeaderMap::new(), request("   "))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_persists_and_returns_the_stored_tuple() {
        let state = open_state();
        let (status, Json(reply)) = create_handler(
            State(Arc::clone(&state)),
            HeaderMap::new(),
            request("remind me to water the plants in 10 minutes"),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert!(reply.message.contains("water the plants"));

        let all = state.store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id.to_string(), reply.id);
        assert_eq!((all[0].hour, all[0].minute), (reply.hour, reply.minute));
    }

    #[tokio::test]
    async fn token_mode_accepts_the_configured_bearer() {
        let state = state_with_auth(AuthConfig {
            mode: AuthMode::Token,
            token: Some("sekrit".to_string()),
        });
        let (status, _) = create_handler(State(state), bearer("sekrit"), request("feed the cat"))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn token_mode_rejects_missing_or_wrong_bearer() {
        let state = state_with_auth(AuthConfig {
            mode: AuthMode::Token,
            token: Some("sekrit".to_string()),
        });

        let err = create_handler(State(Arc::clone(&state)), HeaderMap::new(), request("x"))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::UNAUTHORIZED);

        let err = create_handler(State(state), bearer("wrong"), request("x"))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_mode_without_a_configured_token_denies_everyone() {
        let state = state_with_auth(AuthConfig {
            mode: AuthMode::Token,
            token: None,
        });
        let err = create_handler(State(state), bearer("anything"), request("x"))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn reconcile_reports_the_processed_count() {
        let state = open_state();
        state.store.insert(23, 59, "wind down").unwrap();

        let Json(reply) = reconcile_handler(State(Arc::clone(&state)), HeaderMap::new())
            .await
            .unwrap();
        assert_eq!(reply.count, 1);
    }
}
