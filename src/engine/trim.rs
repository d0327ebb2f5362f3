//! Trim phase - lossless stream-copy cut of the working file

use tracing::debug;

use crate::domain::model::{Format, VideoDuration};
use crate::engine::PipelineState;
use crate::error::EngineError;
use crate::ports::EnginePort;

/// Extra offset the engine's seek applies for some containers, which the
/// length argument must compensate for.
///
/// Webm cuts come out longer than requested by exactly the seek point, so
/// the start is subtracted from the length a second time. Empirically
/// load-bearing for this engine/container pair; see
/// https://trac.ffmpeg.org/wiki/Seeking before changing it.
fn container_seek_compensation(format: Format, start: &VideoDuration) -> VideoDuration {
    match format {
        Format::Webm => *start,
        _ => VideoDuration::zero(),
    }
}

/// Cut the working file down to `[from, to]` without re-encoding
pub(crate) async fn apply(
    engine: &dyn EnginePort,
    state: PipelineState,
    from: &VideoDuration,
    to: &VideoDuration,
) -> Result<PipelineState, EngineError> {
    let start = from.to_timestamp();
    let length = to
        .saturating_sub(from)
        .saturating_sub(&container_seek_compensation(state.format, from))
        .to_timestamp();

    debug!("Trimming {} at {} for {}", state.input_name(), start, length);

    let args = vec![
        "-ss".to_string(),
        start,
        "-i".to_string(),
        state.input_name(),
        "-t".to_string(),
        length,
        "-c".to_string(),
        "copy".to_string(),
        state.output_name(),
    ];
    engine.exec(&args).await?;
    engine
        .rename_file(&state.output_name(), &state.input_name())
        .await?;

    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compensation_applies_only_to_webm() {
        let start = VideoDuration::from_seconds(10.0);

        let webm = container_seek_compensation(Format::Webm, &start);
        assert_eq!(webm.to_seconds(), 10.0);

        for format in [Format::Avi, Format::Mov, Format::Mp4, Format::Wmv] {
            assert!(container_seek_compensation(format, &start).is_zero());
        }
    }
}
