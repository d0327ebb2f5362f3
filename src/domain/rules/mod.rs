// Domain rules - Canonical phase ordering and plan validation

use tracing::warn;

use crate::domain::errors::DomainError;
use crate::domain::model::{
    SourceMedia, Transformation, TransformationKind, TransformationPlan,
};

/// Position of a transformation kind in the canonical phase sequence.
///
/// Trimming and muting are cheap stream-copy operations and run before any
/// lossy recompression; grayscale filters the final pixel content; format
/// conversion runs last so every earlier step works against a known
/// container.
pub fn phase_rank(kind: TransformationKind) -> u8 {
    match kind {
        TransformationKind::Trim => 0,
        TransformationKind::Mute => 1,
        TransformationKind::Grayscale => 2,
        TransformationKind::Convert => 3,
    }
}

/// Resolve the order the pipeline will execute a plan in, independent of
/// the order the user added steps.
///
/// Only the first Convert step is honored; extra ones are dropped with a
/// warning since a plan has exactly one final container.
pub fn execution_order(plan: &TransformationPlan) -> Vec<&Transformation> {
    let mut convert_seen = false;
    let mut steps: Vec<&Transformation> = Vec::with_capacity(plan.len());

    for step in plan.steps() {
        if step.kind() == TransformationKind::Convert {
            if convert_seen {
                warn!("Ignoring extra convert step: {:?}", step);
                continue;
            }
            convert_seen = true;
        }
        steps.push(step);
    }

    // Stable sort keeps same-kind steps in insertion order
    steps.sort_by_key(|step| phase_rank(step.kind()));
    steps
}

/// Validate a transformation against the probed source before it enters
/// the plan, so bad parameters fail at add time rather than mid-run.
pub fn validate_transformation(
    transformation: &Transformation,
    source: &SourceMedia,
) -> Result<(), DomainError> {
    match transformation {
        Transformation::Trim { from, to } => {
            if from.to_seconds() >= to.to_seconds() {
                return Err(DomainError::InvalidTrimRange {
                    start: from.to_timestamp(),
                    end: to.to_timestamp(),
                });
            }
            if to.to_seconds() > source.duration.to_seconds() {
                return Err(DomainError::TrimOutOfBounds {
                    bound: to.to_timestamp(),
                    duration: source.duration.to_timestamp(),
                });
            }
            Ok(())
        }
        Transformation::Convert { to, codec } => {
            if !to.supports_codec(*codec) {
                return Err(DomainError::UnsupportedCodec {
                    codec: codec.to_string(),
                    format: to.to_string(),
                });
            }
            Ok(())
        }
        Transformation::Grayscale | Transformation::Mute => Ok(()),
    }
}

#[cfg(test)]
mod tests;
