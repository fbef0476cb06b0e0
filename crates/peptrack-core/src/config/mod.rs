use anyhow::Result;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder};
use serde::Deserialize;

/// Conventional flat environment variables honoured on top of the
/// `SECTION__KEY` form, mapped to their configuration keys.
const FLAT_ENV_OVERRIDES: &[(&str, &str)] = &[
    ("DATABASE_URL", "database.url"),
    ("SUPABASE_URL", "identity.url"),
    ("SUPABASE_ANON_KEY", "identity.anon_key"),
    ("SUPABASE_SERVICE_ROLE_KEY", "identity.service_role_key"),
    ("OPENAI_API_KEY", "llm.api_key"),
    ("ENVIRONMENT", "app.environment"),
    ("PORT", "server.port"),
];

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u8,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// ## Summary
    /// Returns the bind address in the format "host:port".
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Managed identity provider used to validate bearer tokens.
#[derive(Clone, Default, Deserialize)]
pub struct IdentityConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub anon_key: Option<String>,
    #[serde(default)]
    pub service_role_key: Option<String>,
}

impl IdentityConfig {
    /// ## Summary
    /// Returns the key used for server-side calls, preferring the service-role
    /// key over the anon key.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.service_role_key
            .as_deref()
            .or(self.anon_key.as_deref())
            .filter(|key| !key.is_empty())
    }

    /// Whether both a URL and a key are present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.url.as_deref().is_some_and(|url| !url.is_empty()) && self.api_key().is_some()
    }
}

// Keys stay out of logs.
impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("url", &self.url)
            .field("anon_key", &self.anon_key.as_ref().map(|_| "<redacted>"))
            .field(
                "service_role_key",
                &self.service_role_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Chat-completion endpoint used for summaries and insights.
#[derive(Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl LlmConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_cors_origins")]
    pub origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: default_cors_origins(),
        }
    }
}

impl CorsConfig {
    /// Whether every origin is allowed.
    #[must_use]
    pub fn allows_any(&self) -> bool {
        self.origins.is_empty() || self.origins.iter().any(|origin| origin == "*")
    }
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

impl Settings {
    /// ## Summary
    /// Returns a configuration builder pre-populated with every default.
    ///
    /// ## Errors
    /// Returns an error if a default cannot be set.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("app.environment", "development")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("database.max_connections", 4)?
            .set_default("database.run_migrations", false)?
            .set_default("logging.level", "info")?
            .set_default("llm.model", "gpt-4o-mini")?
            .set_default("llm.base_url", "https://api.openai.com/v1")?)
    }

    /// ## Summary
    /// Loads configuration from `config.toml`, `SECTION__KEY` environment
    /// variables and the conventional flat variables, in increasing order of
    /// precedence.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        let mut builder = Self::defaults()?
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            // Env
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.origins")
                    .ignore_empty(true)
                    .try_parsing(true),
            );

        for (var, key) in FLAT_ENV_OVERRIDES {
            let value = std::env::var(var).ok().filter(|value| !value.is_empty());
            builder = builder.set_override_option(*key, value)?;
        }

        Ok(builder.build()?.try_deserialize::<Self>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
