use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_UPLOAD_SIZE: u64 = 80 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub database_url: String,
    pub upload_dir: PathBuf,
    pub public_dir: PathBuf,
    pub max_upload_size: u64,
    pub public_url: String,
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            database_url: "sqlite://files.db".to_string(),
            upload_dir: PathBuf::from("uploads"),
            public_dir: PathBuf::from("public"),
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            public_url: format!("http://localhost:{}", DEFAULT_PORT),
            cors_allowed_origins: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source, falling back to
    /// the defaults for unset or blank keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(port) = get("PORT") {
            config.port = parse_number("PORT", &port)?;
        }
        if let Some(bind_address) = get("BIND_ADDRESS") {
            config.bind_address = bind_address;
        }
        if let Some(database_url) = get("DATABASE_URL") {
            config.database_url = database_url;
        }
        if let Some(upload_dir) = get("UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(upload_dir);
        }
        if let Some(public_dir) = get("PUBLIC_DIR") {
            config.public_dir = PathBuf::from(public_dir);
        }
        if let Some(max_upload_size) = get("MAX_UPLOAD_SIZE") {
            config.max_upload_size = parse_number("MAX_UPLOAD_SIZE", &max_upload_size)?;
        }

        config.public_url = match get("PUBLIC_URL") {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://localhost:{}", config.port),
        };

        config.cors_allowed_origins = get("CORS_ALLOWED_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        Ok(config)
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn file_url(&self, file_id: &str) -> String {
        format!("{}/file/{}", self.public_url, file_id)
    }
}

fn parse_number<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
