//! Error handling module for wasmclip

use thiserror::Error;

use crate::domain::errors::DomainError;
use crate::engine::Phase;

/// Failures surfaced by an engine adapter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Call issued before `load()` completed
    #[error("engine has not finished loading")]
    NotReady,

    /// Named file is absent from the engine's virtual filesystem
    #[error("file not found in engine filesystem: {name}")]
    FileMissing { name: String },

    /// Engine process exited with a non-zero status
    #[error("engine exited with code {code}")]
    ExecFailed { code: i32 },

    /// Transport or worker-boundary failure
    #[error("engine I/O failure: {message}")]
    Io { message: String },
}

/// Main error type for wasmclip operations
#[derive(Error, Debug)]
pub enum WasmclipError {
    /// Pipeline operation invoked before the engine finished loading
    #[error("engine is not ready; call load() first")]
    EngineNotReady,

    /// Engine bootstrap failed
    #[error("engine failed to load: {source}")]
    EngineLoad { source: EngineError },

    /// An engine call failed mid-run; the working file is left at `file`
    #[error("{phase} phase failed with working file at {file}: {source}")]
    PhaseFailed {
        phase: Phase,
        file: String,
        source: EngineError,
    },

    /// A step expected a working file that a prior step should have staged
    #[error("working file {name} missing during {phase} phase")]
    MissingWorkingFile { name: String, phase: Phase },

    /// The metadata probe never yielded a duration log line
    #[error("engine logs did not contain a source duration")]
    DurationUnavailable,

    /// Run aborted by the caller between phases
    #[error("run aborted between phases")]
    Cancelled,

    /// Configuration file or override could not be applied
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Domain validation failure
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl WasmclipError {
    /// Fold an engine failure into the pipeline taxonomy, keeping the
    /// phase and last known working-file state for the caller.
    pub(crate) fn from_engine(phase: Phase, file: &str, source: EngineError) -> Self {
        match source {
            EngineError::NotReady => WasmclipError::EngineNotReady,
            EngineError::FileMissing { name } => WasmclipError::MissingWorkingFile { name, phase },
            source => WasmclipError::PhaseFailed {
                phase,
                file: file.to_string(),
                source,
            },
        }
    }
}

/// Result type alias for wasmclip operations
pub type WasmclipResult<T> = std::result::Result<T, WasmclipError>;
