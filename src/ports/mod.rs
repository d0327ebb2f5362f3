// Ports - Contract the pipeline drives the external engine through

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Callback invoked for every log line the engine emits.
///
/// Registered once and persistent; delivery is asynchronous with respect
/// to step completion, so consumers must treat it as best-effort.
pub type LogCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Engine bootstrap parameters: where the host serves the engine's core
/// script and wasm binary from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineLoadConfig {
    pub core_url: String,
    pub wasm_url: String,
}

impl Default for EngineLoadConfig {
    fn default() -> Self {
        Self {
            core_url: "https://unpkg.com/@ffmpeg/core@0.12.4/dist/umd/ffmpeg-core.js".to_string(),
            wasm_url: "https://unpkg.com/@ffmpeg/core@0.12.4/dist/umd/ffmpeg-core.wasm"
                .to_string(),
        }
    }
}

/// Port for the WASM processing engine and its virtual filesystem.
///
/// The filesystem is one shared mutable resource; callers must issue one
/// suspending call at a time and await it before the next.
#[async_trait]
pub trait EnginePort: Send + Sync {
    /// Fetch and instantiate the engine. Must complete before any other
    /// call; everything else fails `NotReady` until then.
    async fn load(&self, config: &EngineLoadConfig) -> Result<(), EngineError>;

    /// Stage bytes into the virtual filesystem
    async fn write_file(&self, name: &str, bytes: Vec<u8>) -> Result<(), EngineError>;

    /// Read a staged file; fails if the name is absent
    async fn read_file(&self, name: &str) -> Result<Vec<u8>, EngineError>;

    /// Rename a staged file, overwriting any existing target
    async fn rename_file(&self, from: &str, to: &str) -> Result<(), EngineError>;

    /// Remove a staged file; fails if the name is absent
    async fn delete_file(&self, name: &str) -> Result<(), EngineError>;

    /// Run the engine with a command-line-style argument list, suspending
    /// until process exit
    async fn exec(&self, args: &[String]) -> Result<(), EngineError>;

    /// Register a persistent log listener; fires zero or more times per
    /// exec call
    fn on_log(&self, callback: LogCallback);
}
