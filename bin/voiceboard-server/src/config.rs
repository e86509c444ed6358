//! Server configuration, loaded from environment variables at startup.

/// Runtime configuration for voiceboard-server.
///
/// Every field has a sensible default so the server works out-of-the-box
/// without any environment variables set.
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP address to bind (default: `"0.0.0.0:4000"`).
    pub bind_address: String,

    /// SQLite (or other) database URL (default: `"sqlite://voiceboard.db"`).
    /// The file is created on first start if it does not exist.
    pub database_url: String,

    /// `tracing` filter string, e.g. `"info"` or `"debug,tower_http=warn"`.
    pub log_level: String,

    /// When `true`, emit log records as newline-delimited JSON.
    pub log_json: bool,

    /// Comma-separated allowed CORS origins. Unset means a permissive
    /// wildcard, suitable for development only.
    pub cors_allowed_origins: Option<String>,

    /// Serve Swagger UI at `/swagger-ui` (default: `true`). Disable in
    /// production to avoid exposing the API structure.
    pub enable_swagger: bool,
}

impl Config {
    /// Build [`Config`] from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            bind_address: env_or("VOICEBOARD_BIND", "0.0.0.0:4000"),
            database_url: env_or("VOICEBOARD_DATABASE_URL", "sqlite://voiceboard.db"),
            log_level: env_or("VOICEBOARD_LOG", "info"),
            log_json: std::env::var("VOICEBOARD_LOG_JSON")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            cors_allowed_origins: std::env::var("VOICEBOARD_CORS_ORIGINS").ok(),
            enable_swagger: std::env::var("VOICEBOARD_ENABLE_SWAGGER")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
        }
    }
}

// ── private helpers ──────────────────────────────────────────────────────────

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn env_or_falls_back_to_default() {
        assert_eq!(env_or("VOICEBOARD_TEST_UNSET_KEY", "fallback"), "fallback");
    }
}
