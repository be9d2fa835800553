use crate::workflows::outreach::CrafterConfig;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub crafter: CrafterConfig,
    pub llm: LlmConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            crafter: load_crafter()?,
            llm: load_llm()?,
        })
    }
}

fn load_crafter() -> Result<CrafterConfig, ConfigError> {
    let defaults = CrafterConfig::default();

    let quality_threshold = match env::var("CRAFTER_QUALITY_THRESHOLD") {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or(ConfigError::InvalidNumber {
                key: "CRAFTER_QUALITY_THRESHOLD",
            })?,
        Err(_) => defaults.quality_threshold,
    };

    let max_refinement_loops = match env::var("CRAFTER_MAX_REFINEMENT_LOOPS") {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidNumber {
                key: "CRAFTER_MAX_REFINEMENT_LOOPS",
            })?,
        Err(_) => defaults.max_refinement_loops,
    };

    let call_timeout = match env::var("CRAFTER_CALL_TIMEOUT_SECS") {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or(ConfigError::InvalidNumber {
                key: "CRAFTER_CALL_TIMEOUT_SECS",
            })?,
        Err(_) => defaults.call_timeout,
    };

    Ok(CrafterConfig {
        quality_threshold,
        max_refinement_loops,
        call_timeout,
    })
}

fn load_llm() -> Result<LlmConfig, ConfigError> {
    let base_url = env::var("LLM_BASE_URL").unwrap_or_else(|_| DEFAULT_LLM_BASE_URL.to_string());
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl(base_url));
    }

    let api_key = env::var("LLM_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());
    let model = env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string());

    let temperature = match env::var("LLM_TEMPERATURE") {
        Ok(raw) => raw
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|value| (0.0..=2.0).contains(value))
            .ok_or(ConfigError::InvalidNumber {
                key: "LLM_TEMPERATURE",
            })?,
        Err(_) => 0.7,
    };

    let max_tokens = match env::var("LLM_MAX_TOKENS") {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidNumber {
                key: "LLM_MAX_TOKENS",
            })?,
        Err(_) => 1024,
    };

    Ok(LlmConfig {
        base_url,
        api_key,
        model,
        temperature,
        max_tokens,
    })
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Connection settings for the OpenAI-compatible chat completion endpoint.
#[derive(Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str },
    InvalidBaseUrl(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key } => {
                write!(f, "{key} is not a valid value for this setting")
            }
            ConfigError::InvalidBaseUrl(url) => {
                write!(f, "LLM_BASE_URL must be an http(s) URL, got '{url}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidBaseUrl(_) => None,
        }
    }
}
