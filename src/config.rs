use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub ai: AiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Allowed CORS origins. Defaults to localhost dev ports.
    /// Set DOCSTUDY__API__CORS_ALLOWED_ORIGINS in production.
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
    /// Upper bound for a whole upload request body, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_media_root")]
    pub media_root: String,
    #[serde(default = "default_media_url")]
    pub media_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_ai_base_url")]
    pub base_url: String,
    #[serde(default = "default_ai_timeout")]
    pub timeout_secs: u64,
}

fn default_bind() -> String { "0.0.0.0".to_string() }
fn default_api_port() -> u16 { 8000 }
fn default_max_upload_bytes() -> usize { 20 * 1024 * 1024 }
fn default_db_path() -> String { "./docstudy.db".to_string() }
fn default_media_root() -> String { "./media".to_string() }
fn default_media_url() -> String { "/media".to_string() }
fn default_model() -> String { DEFAULT_MODEL.to_string() }
fn default_ai_base_url() -> String { DEFAULT_AI_BASE_URL.to_string() }
fn default_ai_timeout() -> u64 { 60 }
fn default_cors_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
        "http://localhost:8000".to_string(),
    ]
}

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub fn validate(cfg: &Config) -> Result<()> {
    if cfg.ai.model.trim().is_empty() {
        anyhow::bail!("CONFIG ERROR: ai.model must not be empty");
    }

    if cfg.ai.timeout_secs == 0 {
        anyhow::bail!("CONFIG ERROR: ai.timeout_secs must be greater than zero");
    }

    if !(cfg.ai.base_url.starts_with("http://") || cfg.ai.base_url.starts_with("https://")) {
        anyhow::bail!(
            "CONFIG ERROR: ai.base_url must be an http(s) URL (got '{}')",
            cfg.ai.base_url
        );
    }

    if cfg.api.max_upload_bytes == 0 {
        anyhow::bail!("CONFIG ERROR: api.max_upload_bytes must be greater than zero");
    }

    if !cfg.storage.media_url.starts_with('/') || cfg.storage.media_url.trim_end_matches('/').is_empty() {
        anyhow::bail!(
            "CONFIG ERROR: storage.media_url must be an absolute path such as /media (got '{}')",
            cfg.storage.media_url
        );
    }

    // Validate database path directory exists
    if let Some(parent) = std::path::Path::new(&cfg.database.path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            anyhow::bail!(
                "CONFIG ERROR: Database directory does not exist: {}",
                parent.display()
            );
        }
    }

    if cfg.ai.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
        tracing::warn!(
            "GEMINI_API_KEY is not set; summarize, quiz and chat requests will fail until it is configured"
        );
    }

    tracing::info!("Configuration validation passed");
    Ok(())
}

pub fn load() -> Result<Config> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(
            config::Environment::with_prefix("DOCSTUDY")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("api.cors_allowed_origins"),
        )
        .set_default("api.bind", "0.0.0.0")?
        .set_default("api.port", 8000)?
        .set_default("database.path", "./docstudy.db")?
        .set_default("storage.media_root", "./media")?
        .set_default("storage.media_url", "/media")?
        .set_default("ai.base_url", DEFAULT_AI_BASE_URL)?
        .set_default("ai.timeout_secs", 60)?
        .build()?;

    // ai.model has no builder default so an explicit setting can be told apart.
    let model_configured = settings.get_string("ai.model").is_ok();
    let mut cfg: Config = settings.try_deserialize()?;

    apply_gemini_env(
        &mut cfg.ai,
        model_configured,
        std::env::var("GEMINI_API_KEY").ok(),
        std::env::var("GEMINI_MODEL").ok(),
    );

    validate(&cfg)?;

    Ok(cfg)
}

/// The plain `GEMINI_API_KEY` / `GEMINI_MODEL` variables fill in whatever the
/// config file and `DOCSTUDY__AI__*` left unset.
fn apply_gemini_env(
    ai: &mut AiConfig,
    model_configured: bool,
    api_key: Option<String>,
    model: Option<String>,
) {
    if ai.api_key.is_none() {
        ai.api_key = api_key.filter(|k| !k.trim().is_empty());
    }
    if !model_configured {
        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            ai.model = model;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            api: ApiConfig {
                port: 8000,
                bind: "127.0.0.1".to_string(),
                cors_allowed_origins: default_cors_allowed_origins(),
                max_upload_bytes: default_max_upload_bytes(),
            },
            database: DatabaseConfig {
                path: "docstudy.db".to_string(),
            },
            storage: StorageConfig {
                media_root: "./media".to_string(),
                media_url: "/media".to_string(),
            },
            ai: AiConfig {
                api_key: Some("test-key".to_string()),
                model: DEFAULT_MODEL.to_string(),
                base_url: DEFAULT_AI_BASE_URL.to_string(),
                timeout_secs: 60,
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_api_key_is_not_fatal() {
        let mut cfg = valid_config();
        cfg.ai.api_key = None;
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn test_empty_model_rejected() {
        let mut cfg = valid_config();
        cfg.ai.model = "  ".to_string();
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut cfg = valid_config();
        cfg.ai.timeout_secs = 0;
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        let mut cfg = valid_config();
        cfg.ai.base_url = "ftp://example.com".to_string();
        let err = validate(&cfg).unwrap_err().to_string();
        assert!(err.contains("ai.base_url"), "unexpected error: {err}");
    }

    #[test]
    fn test_relative_media_url_rejected() {
        let mut cfg = valid_config();
        cfg.storage.media_url = "media".to_string();
        assert!(validate(&cfg).is_err());
        cfg.storage.media_url = "/".to_string();
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn test_missing_database_directory_rejected() {
        let mut cfg = valid_config();
        cfg.database.path = "/definitely/not/a/real/dir/docstudy.db".to_string();
        let err = validate(&cfg).unwrap_err().to_string();
        assert!(err.contains("Database directory"), "unexpected error: {err}");
    }

    #[test]
    fn test_gemini_env_fills_unset_values() {
        let mut ai = valid_config().ai;
        ai.api_key = None;
        apply_gemini_env(
            &mut ai,
            false,
            Some("env-key".to_string()),
            Some("gemini-2.5-pro".to_string()),
        );
        assert_eq!(ai.api_key.as_deref(), Some("env-key"));
        assert_eq!(ai.model, "gemini-2.5-pro");
    }

    #[test]
    fn test_explicit_settings_win_over_gemini_env() {
        // An explicit model equal to the default must still not be replaced.
        let mut ai = valid_config().ai;
        apply_gemini_env(
            &mut ai,
            true,
            Some("env-key".to_string()),
            Some("gemini-2.5-pro".to_string()),
        );
        assert_eq!(ai.api_key.as_deref(), Some("test-key"));
        assert_eq!(ai.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_blank_gemini_env_ignored() {
        let mut ai = valid_config().ai;
        ai.api_key = None;
        apply_gemini_env(&mut ai, false, Some("  ".to_string()), Some(String::new()));
        assert!(ai.api_key.is_none());
        assert_eq!(ai.model, DEFAULT_MODEL);
    }
}
