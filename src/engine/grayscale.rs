//! Grayscale phase - force single-channel luma output

use tracing::debug;

use crate::domain::model::{Codec, Format};
use crate::engine::{convert, PipelineSettings, PipelineState};
use crate::error::EngineError;
use crate::ports::EnginePort;

/// Apply the gray pixel-format filter to the working file.
///
/// The webm codecs in the engine build reject this filter path, so webm
/// working files are staged through mp4/h264, filtered there, and
/// transcoded back to webm/vp8 - three engine invocations instead of one.
pub(crate) async fn apply(
    engine: &dyn EnginePort,
    state: PipelineState,
    settings: &PipelineSettings,
) -> Result<PipelineState, EngineError> {
    if state.format == Format::Webm {
        let staged = convert::apply(engine, state, Format::Mp4, Codec::H264, settings).await?;
        filter(engine, &staged).await?;
        engine.delete_file(&staged.input_name()).await?;
        engine
            .rename_file(&staged.output_name(), &staged.input_name())
            .await?;
        convert::apply(engine, staged, Format::Webm, Codec::Vp8, settings).await
    } else {
        filter(engine, &state).await?;
        engine
            .rename_file(&state.output_name(), &state.input_name())
            .await?;
        Ok(state)
    }
}

/// Single filter invocation writing to the staging output name
async fn filter(engine: &dyn EnginePort, state: &PipelineState) -> Result<(), EngineError> {
    debug!("Applying grayscale filter to {}", state.input_name());

    let args = vec![
        "-i".to_string(),
        state.input_name(),
        "-vf".to_string(),
        "format=gray".to_string(),
        state.output_name(),
    ];
    engine.exec(&args).await
}
