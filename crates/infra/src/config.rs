//! Configuration loading and representation.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be {expected} (got {value:?})")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// | Env Var                        | Default     |
/// |--------------------------------|-------------|
/// | `STOREFRONT_HOST`              | `0.0.0.0`   |
/// | `STOREFRONT_PORT`              | `8080`      |
/// | `STOREFRONT_STATIC_ROOT`       | `wwwroot`   |
/// | `STOREFRONT_MAX_UPLOAD_BYTES`  | `5242880`   |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    /// Static-asset root; images go to its `img` subdirectory.
    pub static_root: PathBuf,
    /// Request body limit for form submissions.
    pub max_upload_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            static_root: PathBuf::from("wwwroot"),
            max_upload_bytes: 5 * 1024 * 1024,
        }
    }
}

impl Settings {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup (unset keys fall back to defaults).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("STOREFRONT_HOST").unwrap_or(defaults.host);

        let port = match lookup("STOREFRONT_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key: "STOREFRONT_PORT",
                expected: "a valid u16",
                value: raw,
            })?,
            None => defaults.port,
        };

        let static_root = lookup("STOREFRONT_STATIC_ROOT")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_root);

        let max_upload_bytes = match lookup("STOREFRONT_MAX_UPLOAD_BYTES") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "STOREFRONT_MAX_UPLOAD_BYTES",
                        expected: "a positive integer",
                        value: raw,
                    });
                }
            },
            None => defaults.max_upload_bytes,
        };

        Ok(Self {
            host,
            port,
            static_root,
            max_upload_bytes,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn image_dir(&self) -> PathBuf {
        self.static_root.join("img")
    }
}
