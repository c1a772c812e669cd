use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Secret used to sign session cookies outside production when `AUTH_SECRET` is unset.
const DEV_AUTH_SECRET: &str = "poweramazonica-dev-secret";
const LOCAL_DEFAULT_DOMAIN: &str = "localhost";
const DEFAULT_SITE_URL: &str = "https://poweramazonica.com";

const DEFAULT_UPLOAD_MAX_MB: u64 = 8;
const DEFAULT_IMAGE_QUALITY: u8 = 82;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("AUTH_SECRET es obligatorio en produccion")]
    MissingAuthSecret,

    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("{0} debe ser un entero positivo")]
    NotPositive(&'static str),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub tenant: TenantConfig,
    pub uploads: UploadConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub site_url: String,
    pub published_cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub auth_secret: String,
    pub session_ttl_secs: i64,
    pub secure_cookies: bool,
    pub admin_email: Option<String>,
    #[serde(skip_serializing)]
    pub admin_password_hash: Option<String>,
    #[serde(skip_serializing)]
    pub admin_password_plain: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantConfig {
    pub default_domain: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub max_file_mb: u64,
    pub image_quality: u8,
    pub storage_dir: PathBuf,
}

impl UploadConfig {
    pub fn max_bytes(&self) -> u64 {
        self.max_file_mb * 1024 * 1024
    }
}

impl AppConfig {
    /// Build the configuration from the process environment.
    ///
    /// Environment presets are picked from `APP_ENV` and then overridden by
    /// the individual variables. Fails when production has no `AUTH_SECRET`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Database overrides
        if let Some(v) = non_empty_var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // API overrides
        if let Some(port) = env::var("LANDING_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.api.port = port;
        }
        if let Some(v) = non_empty_var("SITE_URL") {
            self.api.site_url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("PUBLISHED_CACHE_TTL_SECONDS") {
            self.api.published_cache_ttl_secs = v.parse().unwrap_or(self.api.published_cache_ttl_secs);
        }

        // Security overrides
        match non_empty_var("AUTH_SECRET") {
            Some(secret) => self.security.auth_secret = secret,
            None if self.environment == Environment::Production => {
                return Err(ConfigError::MissingAuthSecret);
            }
            None => {}
        }
        self.security.session_ttl_secs =
            parse_session_ttl(env::var("SESSION_TTL_SECONDS").ok(), self.security.session_ttl_secs)?;
        self.security.admin_email = non_empty_var("ADMIN_EMAIL").map(|v| v.to_lowercase());
        self.security.admin_password_hash = non_empty_var("ADMIN_PASSWORD_HASH");
        self.security.admin_password_plain = env::var("ADMIN_PASSWORD_PLAIN").ok().filter(|v| !v.is_empty());

        // Tenant overrides
        if let Some(v) = non_empty_var("DEFAULT_TENANT_DOMAIN") {
            self.tenant.default_domain = v.to_lowercase();
        }

        // Upload overrides
        self.uploads.max_file_mb =
            parse_clamped(env::var("UPLOAD_MAX_FILE_MB").ok(), DEFAULT_UPLOAD_MAX_MB, 1, 30);
        self.uploads.image_quality =
            parse_clamped(env::var("UPLOAD_IMAGE_QUALITY").ok(), DEFAULT_IMAGE_QUALITY.into(), 50, 90) as u8;
        if let Some(v) = non_empty_var("UPLOAD_STORAGE_DIR") {
            self.uploads.storage_dir = PathBuf::from(v);
        }

        Ok(self)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database.url.as_deref().ok_or(ConfigError::Missing("DATABASE_URL"))
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            api: ApiConfig {
                port: 3000,
                site_url: DEFAULT_SITE_URL.to_string(),
                published_cache_ttl_secs: 60,
            },
            security: SecurityConfig {
                auth_secret: DEV_AUTH_SECRET.to_string(),
                session_ttl_secs: 60 * 60 * 24 * 7, // 1 week
                secure_cookies: false,
                admin_email: None,
                admin_password_hash: None,
                admin_password_plain: None,
            },
            tenant: TenantConfig {
                default_domain: LOCAL_DEFAULT_DOMAIN.to_string(),
            },
            uploads: UploadConfig {
                max_file_mb: DEFAULT_UPLOAD_MAX_MB,
                image_quality: DEFAULT_IMAGE_QUALITY,
                storage_dir: PathBuf::from(".data").join("uploads"),
            },
        }
    }

    fn staging() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Staging;
        config.database.max_connections = 20;
        config.database.connection_timeout = 10;
        config
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
            },
            api: ApiConfig {
                port: 3000,
                site_url: DEFAULT_SITE_URL.to_string(),
                published_cache_ttl_secs: 60,
            },
            security: SecurityConfig {
                // Replaced by AUTH_SECRET; startup fails when it is missing.
                auth_secret: String::new(),
                session_ttl_secs: 60 * 60 * 24 * 7,
                secure_cookies: true,
                admin_email: None,
                admin_password_hash: None,
                admin_password_plain: None,
            },
            tenant: TenantConfig {
                default_domain: LOCAL_DEFAULT_DOMAIN.to_string(),
            },
            uploads: UploadConfig {
                max_file_mb: DEFAULT_UPLOAD_MAX_MB,
                image_quality: DEFAULT_IMAGE_QUALITY,
                storage_dir: PathBuf::from("..").join("shared").join("uploads"),
            },
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an integer setting, falling back on garbage and clamping into `[min, max]`.
fn parse_clamped(input: Option<String>, fallback: u64, min: u64, max: u64) -> u64 {
    let Some(raw) = input else {
        return fallback;
    };
    match raw.trim().parse::<i64>() {
        Ok(parsed) => parsed.clamp(min as i64, max as i64) as u64,
        Err(_) => fallback,
    }
}

/// Unparseable values keep `fallback`; zero and negative values are rejected.
fn parse_session_ttl(raw: Option<String>, fallback: i64) -> Result<i64, ConfigError> {
    match raw.map(|v| v.trim().parse::<i64>()) {
        None | Some(Err(_)) => Ok(fallback),
        Some(Ok(ttl)) if ttl > 0 => Ok(ttl),
        Some(Ok(_)) => Err(ConfigError::NotPositive("SESSION_TTL_SECONDS")),
    }
}
