//! Configuration loading
//!
//! Layered precedence: CLI flags > environment variables > config file >
//! built-in defaults. The file is TOML (`wasmclip.toml`); environment
//! overrides use the `WASMCLIP_` prefix.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::PipelineSettings;
use crate::error::{WasmclipError, WasmclipResult};
use crate::ports::EngineLoadConfig;

/// Candidate config file locations, checked in order
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["wasmclip.toml", "config/wasmclip.toml"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default tracing filter when no CLI override is given
    pub log_level: String,
    /// Engine bootstrap URLs
    pub engine: EngineLoadConfig,
    /// Knobs applied to pipeline conversion invocations
    pub pipeline: PipelineSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            engine: EngineLoadConfig::default(),
            pipeline: PipelineSettings::default(),
        }
    }
}

impl Config {
    /// Load configuration from `explicit_path`, or the first default
    /// candidate that exists, then apply environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> WasmclipResult<Self> {
        let mut config = match Self::read_file(explicit_path)? {
            Some(content) => {
                toml::from_str(&content).map_err(|e| WasmclipError::Config {
                    message: format!("failed to parse config file: {}", e),
                })?
            }
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn read_file(explicit_path: Option<&Path>) -> WasmclipResult<Option<String>> {
        if let Some(path) = explicit_path {
            return std::fs::read_to_string(path)
                .map(Some)
                .map_err(WasmclipError::from);
        }
        for candidate in DEFAULT_CONFIG_PATHS {
            if Path::new(candidate).exists() {
                return std::fs::read_to_string(candidate)
                    .map(Some)
                    .map_err(WasmclipError::from);
            }
        }
        Ok(None)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("WASMCLIP_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Ok(url) = std::env::var("WASMCLIP_CORE_URL") {
            self.engine.core_url = url;
        }
        if let Ok(url) = std::env::var("WASMCLIP_WASM_URL") {
            self.engine.wasm_url = url;
        }
        if let Ok(threads) = std::env::var("WASMCLIP_THREADS") {
            match threads.parse() {
                Ok(value) => self.pipeline.threads = value,
                Err(_) => warn!("Ignoring non-numeric WASMCLIP_THREADS: {}", threads),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    // Process environment is shared across the test harness's threads
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.pipeline.threads, 4);
        assert!(config.pipeline.strict_experimental);
        assert!(config.engine.core_url.ends_with("ffmpeg-core.js"));
    }

    #[test]
    fn loads_partial_file_over_defaults() {
        let _env = ENV_LOCK.lock().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"debug\"").unwrap();
        writeln!(file, "[pipeline]").unwrap();
        writeln!(file, "threads = 8").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.pipeline.threads, 8);
        // Untouched sections keep their defaults
        assert!(config.pipeline.strict_experimental);
    }

    #[test]
    fn rejects_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = [not toml").unwrap();

        let result = Config::load(Some(file.path()));
        assert!(matches!(result, Err(WasmclipError::Config { .. })));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = Config::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(WasmclipError::Io(_))));
    }

    #[test]
    fn env_overrides_take_precedence_over_defaults() {
        let _env = ENV_LOCK.lock().unwrap();
        std::env::set_var("WASMCLIP_THREADS", "2");
        std::env::set_var("WASMCLIP_CORE_URL", "http://localhost/core.js");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.pipeline.threads, 2);
        assert_eq!(config.engine.core_url, "http://localhost/core.js");

        std::env::remove_var("WASMCLIP_THREADS");
        std::env::remove_var("WASMCLIP_CORE_URL");
    }
}
