//! Mute phase - drop the audio stream, copying video untouched

use tracing::debug;

use crate::engine::PipelineState;
use crate::error::EngineError;
use crate::ports::EnginePort;

/// Strip every audio stream from the working file
pub(crate) async fn apply(
    engine: &dyn EnginePort,
    state: PipelineState,
) -> Result<PipelineState, EngineError> {
    debug!("Muting {}", state.input_name());

    let args = vec![
        "-i".to_string(),
        state.input_name(),
        "-vcodec".to_string(),
        "copy".to_string(),
        "-an".to_string(),
        state.output_name(),
    ];
    engine.exec(&args).await?;
    engine
        .rename_file(&state.output_name(), &state.input_name())
        .await?;

    Ok(state)
}
