//! Server configuration loaded from the environment.

use std::str::FromStr;

use sebit_core::DetailMode;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_UI_ORIGINS: &str = "http://127.0.0.1:4200,http://localhost:4200";

/// Listener, CORS and validation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Origins allowed by CORS.
    pub ui_origins: Vec<String>,
    /// Validation mode for pre-built entries.
    pub detail_mode: DetailMode,
}

impl ServerConfig {
    /// Build config from `SEBIT_*` environment variables.
    #[cfg_attr(test, allow(dead_code))]
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let host = lookup("SEBIT_HOST")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("SEBIT_PORT") {
            Some(raw) => u16::from_str(raw.trim())
                .map_err(|_| format!("SEBIT_PORT must be a u16 number, got '{raw}'"))?,
            None => DEFAULT_PORT,
        };
        let origins = lookup("SEBIT_UI_ORIGINS").unwrap_or_else(|| DEFAULT_UI_ORIGINS.to_string());
        let ui_origins = origins
            .split(',')
            .map(|value| value.trim())
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();
        let detail_mode = match lookup("SEBIT_DETAIL_MODE") {
            Some(raw) => {
                DetailMode::from_str(&raw).map_err(|err| format!("SEBIT_DETAIL_MODE: {err}"))?
            }
            None => DetailMode::default(),
        };
        Ok(Self {
            host,
            port,
            ui_origins,
            detail_mode,
        })
    }
}
