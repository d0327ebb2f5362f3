//! Wasmclip Video Transformation Library
//!
//! Resolves an ordered list of user-selected video edits (trim, mute,
//! grayscale, format conversion) into a deterministic sequence of
//! invocations against a WASM ffmpeg engine's virtual filesystem, and
//! replays them to produce one final output file.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ports;
pub mod probe;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{
    Codec, Format, SourceMedia, Transformation, TransformationKind, TransformationPlan,
    VideoDuration,
};
pub use engine::{Phase, PipelineSettings, RunOutcome, TransformationPipeline};
pub use error::{WasmclipError, WasmclipResult};
