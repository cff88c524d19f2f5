use std::env;
use thiserror::Error;

const DEFAULT_ORIGINS: [&str; 2] = ["http://localhost:5173", "https://repair-ranger.web.app"];

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_name: String,
    pub jwt_secret: String,
    pub production: bool,
    pub allowed_origins: Vec<String>,
    pub strict_validation: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any variable source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &'static str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let port_raw = require("PORT")?;
        let port = port_raw
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::Invalid { name: "PORT", value: port_raw.clone() })?;

        let database_url = match get("DATABASE_URL") {
            Some(url) => url,
            None => {
                let user = require("DB_USER")?;
                let pass = require("DB_PASS")?;
                let scheme = get("DB_SCHEME").unwrap_or_else(|| "mongodb+srv".to_string());
                let host = get("DB_HOST").unwrap_or_else(|| "cluster0.mongodb.net".to_string());
                format!(
                    "{}://{}:{}@{}/?retryWrites=true&w=majority",
                    scheme,
                    urlencoding::encode(&user),
                    urlencoding::encode(&pass),
                    host
                )
            }
        };

        let strict_validation = match get("STRICT_VALIDATION") {
            None => false,
            Some(raw) => parse_bool(&raw)
                .ok_or(ConfigError::Invalid { name: "STRICT_VALIDATION", value: raw })?,
        };

        let allowed_origins = match get("CORS_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            None => DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url,
            database_name: get("DB_NAME").unwrap_or_else(|| "repair_rangers_db_2".to_string()),
            jwt_secret: require("JWT_SECRET")?,
            production: get("NODE_ENV").as_deref() == Some("production"),
            allowed_origins,
            strict_validation,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
