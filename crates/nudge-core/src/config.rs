use chrono::FixedOffset;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 8787;
pub const DEFAULT_BIND: &str = "127.0.0.1";
/// Minutes added to "now" when extraction is skipped or fails.
pub const DEFAULT_FALLBACK_OFFSET_MINS: u64 = 10;
/// Lateness tolerance (seconds) within which a just-missed reminder fires
/// immediately instead of rolling over to the next day.
pub const DEFAULT_CATCH_UP_WINDOW_SECS: u64 = 60;
/// Cadence of the background reconciliation loop.
pub const DEFAULT_RECONCILE_INTERVAL_SECS: u64 = 60;
/// Groq model used when none is configured.
pub const DEFAULT_GROQ_MODEL: &str = "llama3-70b-8192";

/// Top-level config (nudge.toml + NUDGE_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NudgeConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
    #[serde(default)]
    pub notifier: NotifierConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
            auth: AuthConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub mode: AuthMode,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMode {
    Token,
    #[default]
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Natural-language extraction settings.
///
/// When `groq` is absent the gateway runs with a null provider: every input
/// that carries a time signal still resolves via the deterministic fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    pub groq: Option<GroqConfig>,
    /// Minutes added to the reference time when extraction is skipped or fails.
    #[serde(default = "default_fallback_offset")]
    pub fallback_offset_mins: u64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            groq: None,
            fallback_offset_mins: DEFAULT_FALLBACK_OFFSET_MINS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    pub api_key: String,
    #[serde(default = "default_groq_base_url")]
    pub base_url: String,
    #[serde(default = "default_groq_model")]
    pub model: String,
}

/// Outbound delivery transport. With no webhook URL configured, deliveries
/// are logged and dropped.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NotifierConfig {
    pub webhook_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default = "default_catch_up_window")]
    pub catch_up_window_secs: u64,
    #[serde(default = "default_reconcile_interval")]
    pub reconcile_interval_secs: u64,
    /// Fixed UTC offset of the configured zone, e.g. "+05:30" or "-08:00".
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            catch_up_window_secs: DEFAULT_CATCH_UP_WINDOW_SECS,
            reconcile_interval_secs: DEFAULT_RECONCILE_INTERVAL_SECS,
            utc_offset: default_utc_offset(),
        }
    }
}

impl SchedulerConfig {
    /// Parse `utc_offset` into a chrono offset.
    pub fn offset(&self) -> crate::error::Result<FixedOffset> {
        parse_utc_offset(&self.utc_offset).ok_or_else(|| {
            crate::error::NudgeError::Config(format!(
                "invalid scheduler.utc_offset '{}': expected ±HH:MM",
                self.utc_offset
            ))
        })
    }
}

/// Parse a `±HH:MM` offset string into a [`FixedOffset`].
///
/// Returns `None` for anything that is not a sign, two hour digits, a colon,
/// and two minute digits within chrono's valid offset range.
pub fn parse_utc_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1i32, &s[1..]),
        b'-' => (-1i32, &s[1..]),
        _ => return None,
    };
    let (h, m) = rest.split_once(':')?;
    if h.len() != 2 || m.len() != 2 {
        return None;
    }
    let hours: i32 = h.parse().ok()?;
    let minutes: i32 = m.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_db_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.nudge/nudge.db", home)
}
fn default_fallback_offset() -> u64 {
    DEFAULT_FALLBACK_OFFSET_MINS
}
fn default_groq_base_url() -> String {
    "https://api.groq.com/openai".to_string()
}
fn default_groq_model() -> String {
    DEFAULT_GROQ_MODEL.to_string()
}
fn default_catch_up_window() -> u64 {
    DEFAULT_CATCH_UP_WINDOW_SECS
}
fn default_reconcile_interval() -> u64 {
    DEFAULT_RECONCILE_INTERVAL_SECS
}
fn default_utc_offset() -> String {
    "+00:00".to_string()
}

impl NudgeConfig {
    /// Load config from a TOML file with NUDGE_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.nudge/nudge.toml
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);

        let config: NudgeConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("NUDGE_").split("_"))
            .extract()
            .map_err(|e| crate::error::NudgeError::Config(e.to_string()))?;

        Ok(config)
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.nudge/nudge.toml", home)
}
