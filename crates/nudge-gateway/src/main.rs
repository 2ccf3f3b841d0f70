use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, error, info};

mod app;
mod http;

#[derive(Parser)]
#[command(name = "nudge-gateway", about = "Natural-language reminder gateway")]
struct Args {
    /// Path to nudge.toml (default: ~/.nudge/nudge.toml).
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nudge_gateway=info,tower_http=debug".into()),
        )
        .init();

    let args = Args::parse();
    let config = nudge_core::NudgeConfig::load(args.config.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        nudge_core::NudgeConfig::default()
    });

    let zone = config.scheduler.offset()?;
    let bind = config.gateway.bind.clone();
    let port = config.gateway.port;

    let db_path = &config.database.path;
    ensure_parent_dir(db_path);
    info!(path = %db_path, "opening SQLite database");

    let conn = rusqlite::Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    let store = nudge_store::ReminderStore::new(conn)?;

    let extractor = nudge_extract::TimeExtractor::new(
        build_provider(&config),
        config.extractor.fallback_offset_mins,
    );
    let notifier = build_notifier(&config);
    let engine = nudge_scheduler::ReconcilerEngine::new(
        store.clone(),
        notifier,
        config.scheduler.catch_up_window_secs,
    );

    let interval_secs = config.scheduler.reconcile_interval_secs;
    let state = Arc::new(app::AppState {
        config,
        store,
        extractor,
        engine: tokio::sync::Mutex::new(engine),
        zone,
    });
    let router = app::build_router(Arc::clone(&state));

    // Periodic reconciliation: the store is the source of truth, so the loop
    // simply resyncs the delivery schedule on a fixed cadence. Errors are
    // logged and the loop continues.
    let loop_state = Arc::clone(&state);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(interval_secs));
        loop {
            interval.tick().await;
            let now = chrono::Utc::now().with_timezone(&loop_state.zone);
            let mut engine = loop_state.engine.lock().await;
            match engine.reconcile(now).await {
                Ok(count) => debug!(count, "periodic reconciliation pass"),
                Err(e) => error!("reconciliation pass failed: {e}"),
            }
        }
    });

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    info!("nudge gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

/// Build the completion provider from config, with a GROQ_API_KEY env
/// fallback. With nothing configured a null provider is returned and every
/// timed request resolves via the extractor's deterministic fallback.
fn build_provider(
    config: &nudge_core::NudgeConfig,
) -> Box<dyn nudge_extract::CompletionProvider> {
    if let Some(ref groq) = config.extractor.groq {
        info!(base_url = %groq.base_url, model = %groq.model, "extraction provider: Groq");
        return Box::new(nudge_extract::GroqProvider::new(
            groq.api_key.clone(),
            Some(groq.base_url.clone()),
            groq.model.clone(),
        ));
    }

    if let Ok(key) = std::env::var("GROQ_API_KEY") {
        info!("extraction provider: Groq (key from env)");
        return Box::new(nudge_extract::GroqProvider::new(
            key,
            None,
            nudge_core::config::DEFAULT_GROQ_MODEL.to_string(),
        ));
    }

    tracing::warn!("no extraction provider configured — timed requests will use the fallback");
    Box::new(NullProvider)
}

/// Build the delivery channel from config. Without a webhook URL, fired
/// reminders are logged and dropped.
fn build_notifier(config: &nudge_core::NudgeConfig) -> Arc<dyn nudge_notify::Notifier> {
    match config.notifier.webhook_url {
        Some(ref url) => {
            info!(%url, "notifier: webhook");
            Arc::new(nudge_notify::WebhookNotifier::new(url.clone()))
        }
        None => {
            tracing::warn!("no notifier configured — deliveries will only be logged");
            Arc::new(nudge_notify::LogNotifier)
        }
    }
}

/// Ensure the parent directory for a file path exists.
fn ensure_parent_dir(path: &str) {
    if let Some(parent) = std::path::Path::new(path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
}

/// Placeholder provider when no API key is available.
struct NullProvider;

#[async_trait::async_trait]
impl nudge_extract::CompletionProvider for NullProvider {
    fn name(&self) -> &str {
        "null"
    }
    async fn complete(
        &self,
        _system: &str,
        _user: &str,
        _schema: &nudge_extract::FunctionSchema,
    ) -> Result<serde_json::Value, nudge_extract::ProviderError> {
        Err(nudge_extract::ProviderError::Unavailable(
            "no extraction provider configured — set extractor.groq.api_key in nudge.toml".into(),
        ))
    }
}
