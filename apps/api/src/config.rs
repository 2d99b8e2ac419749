// Service configuration
//
// Settings come from the environment (optionally seeded from a .env
// file). Everything except the API key has a working default.

use std::net::SocketAddr;
use thiserror::Error;

use crate::agents::CrewSettings;
use crate::infrastructure::clients::{duckduckgo_search, gemini_client};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings for the HTTP service and its external clients
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub google_api_key: String,
    pub gemini_model: String,
    pub gemini_temperature: f32,
    pub gemini_base_url: String,
    pub duckduckgo_base_url: String,
    pub duckduckgo_max_results: usize,
    pub crew: CrewSettings,
}

impl Settings {
    /// Reads settings from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let google_api_key = get("GOOGLE_API_KEY").unwrap_or_else(|| {
            tracing::warn!("GOOGLE_API_KEY not set, model calls will be rejected");
            String::new()
        });

        let bind_addr = parse(
            "HEALTHCREW_BIND_ADDR",
            get("HEALTHCREW_BIND_ADDR"),
            SocketAddr::from(([0, 0, 0, 0], 3000)),
        )?;
        let gemini_temperature = parse("GEMINI_TEMPERATURE", get("GEMINI_TEMPERATURE"), 0.5_f32)?;
        let max_iterations = parse("CREW_MAX_ITERATIONS", get("CREW_MAX_ITERATIONS"), 5_usize)?;
        let duckduckgo_max_results = parse(
            "DUCKDUCKGO_MAX_RESULTS",
            get("DUCKDUCKGO_MAX_RESULTS"),
            duckduckgo_search::DEFAULT_MAX_RESULTS,
        )?;
        let verbose = get("CREW_VERBOSE")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        let crew = CrewSettings::new(max_iterations, verbose).map_err(|e| {
            ConfigError::InvalidValue {
                key: "CREW_MAX_ITERATIONS",
                value: max_iterations.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            bind_addr,
            google_api_key,
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| "gemini-pro".to_string()),
            gemini_temperature,
            gemini_base_url: get("GEMINI_BASE_URL")
                .unwrap_or_else(|| gemini_client::DEFAULT_BASE_URL.to_string()),
            duckduckgo_base_url: get("DUCKDUCKGO_BASE_URL")
                .unwrap_or_else(|| duckduckgo_search::DEFAULT_BASE_URL.to_string()),
            duckduckgo_max_results,
            crew,
        })
    }
}

fn parse<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::InvalidValue {
                key,
                reason: e.to_string(),
                value,
            })
        }
    }
}
