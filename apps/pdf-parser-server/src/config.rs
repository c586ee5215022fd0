//! Configuration management for the PDF Parser API

use serde::Deserialize;
use std::env;
use thiserror::Error;

/// Default per-file upload ceiling (50 MB)
pub const DEFAULT_MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

/// Origins allowed to call the API from a browser
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] =
    ["http://localhost:3000", "https://repurpose-ai.vercel.app"];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Largest accepted `file` field, in bytes
    pub max_file_size: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("CORS_ALLOWED_ORIGINS is set but contains no origins")]
    NoAllowedOrigins,

    #[error("MAX_FILE_SIZE must be a positive byte count, got '{0}'")]
    InvalidMaxFileSize(String),
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            cors: CorsConfig {
                allowed_origins: DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect(),
            },
            upload: UploadConfig {
                max_file_size: DEFAULT_MAX_FILE_SIZE,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// `from_env` is this over the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(raw) => {
                let origins: Vec<String> = raw
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if origins.is_empty() {
                    return Err(ConfigError::NoAllowedOrigins);
                }
                origins
            }
            None => defaults.cors.allowed_origins,
        };

        let max_file_size = match lookup("MAX_FILE_SIZE") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidMaxFileSize(raw)),
            },
            None => defaults.upload.max_file_size,
        };

        Ok(Config {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or(defaults.server.host),
                port: lookup("PORT")
                    .and_then(|p| p.trim().parse().ok())
                    .unwrap_or(defaults.server.port),
            },
            cors: CorsConfig { allowed_origins },
            upload: UploadConfig { max_file_size },
        })
    }
}
