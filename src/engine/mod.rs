//! Transformation pipeline engine
//!
//! Resolves the user's edit plan into ordered engine invocations against
//! the staged working file.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::model::Format;

pub mod convert;
pub mod grayscale;
pub mod mute;
pub mod pipeline;
pub mod trim;

pub use pipeline::{AbortHandle, TransformationPipeline};

/// Pipeline phases, in canonical execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Metadata probe of the staged source
    Probe,
    Trim,
    Mute,
    Grayscale,
    Convert,
    /// Final read of the working file
    Finalize,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Probe => "probe",
            Phase::Trim => "trim",
            Phase::Mute => "mute",
            Phase::Grayscale => "grayscale",
            Phase::Convert => "convert",
            Phase::Finalize => "finalize",
        };
        write!(f, "{}", name)
    }
}

/// Engine-side knobs applied to conversion invocations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Thread-count hint passed to every re-encoding exec
    pub threads: u32,
    /// Emit `-strict -2` so the engine accepts experimental codecs
    pub strict_experimental: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            threads: 4,
            strict_experimental: true,
        }
    }
}

/// The staged working file each phase reads and replaces.
///
/// Staging follows the `input.<ext>` / `output.<ext>` convention: a phase
/// reads the input name, writes the output name, then renames the output
/// over the input (or, for conversion, writes the new input name directly
/// and deletes the old one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineState {
    pub format: Format,
}

impl PipelineState {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    /// Name of the current working file
    pub fn input_name(&self) -> String {
        format!("input.{}", self.format.extension())
    }

    /// Name a phase writes its result to before renaming over the input
    pub fn output_name(&self) -> String {
        format!("output.{}", self.format.extension())
    }
}

/// Final product of a pipeline run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Bytes of the final output file
    pub bytes: Vec<u8>,
    /// Container format of the output
    pub format: Format,
    /// Presentation hint: the output container has no native browser
    /// playback support and should be offered as a download only
    pub unplayable: bool,
}
