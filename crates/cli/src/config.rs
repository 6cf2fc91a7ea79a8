//! Environment-supplied runtime configuration.

use std::path::PathBuf;

use anyhow::{bail, Context};
use nodes::PipelineVariant;

/// Environment variable holding the Generative Language API key. Required.
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Environment variable selecting the model identifier.
pub const MODEL_VAR: &str = "GOOGLE_MODEL_CODENAME";

/// Environment variable selecting the debate topology.
pub const PIPELINE_VAR: &str = "ROSTRUM_PIPELINE";

/// Environment variable overriding the listen port.
pub const PORT_VAR: &str = "ROSTRUM_PORT";

/// Environment variable overriding the static assets directory.
pub const STATIC_DIR_VAR: &str = "ROSTRUM_STATIC_DIR";

const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_STATIC_DIR: &str = "static";

/// Validated runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub variant: PipelineVariant,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl Config {
    /// Reads and validates configuration from the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = match std::env::var(API_KEY_VAR) {
            Ok(key) if !key.trim().is_empty() => key,
            _ => bail!("{API_KEY_VAR} must be set to a Generative Language API key"),
        };

        let model = std::env::var(MODEL_VAR).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let variant = match std::env::var(PIPELINE_VAR) {
            Ok(raw) => raw
                .parse::<PipelineVariant>()
                .map_err(|e| anyhow::anyhow!("invalid {PIPELINE_VAR}: {e}"))?,
            Err(_) => PipelineVariant::Judged,
        };

        let port = match std::env::var(PORT_VAR) {
            Ok(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("invalid {PORT_VAR}: '{raw}'"))?,
            Err(_) => DEFAULT_PORT,
        };

        let static_dir = std::env::var(STATIC_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATIC_DIR));

        Ok(Self {
            api_key,
            model,
            variant,
            port,
            static_dir,
        })
    }
}
