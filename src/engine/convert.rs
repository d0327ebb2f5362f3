//! Convert phase - re-encode the working file into a new container

use tracing::debug;

use crate::domain::model::{Codec, Format};
use crate::engine::{PipelineSettings, PipelineState};
use crate::error::EngineError;
use crate::ports::EnginePort;

/// Re-encode the working file as `to`/`codec`. The output is written
/// directly under the new working name and the old working file is
/// deleted, so the returned state is the only live reference.
pub(crate) async fn apply(
    engine: &dyn EnginePort,
    state: PipelineState,
    to: Format,
    codec: Codec,
    settings: &PipelineSettings,
) -> Result<PipelineState, EngineError> {
    let target = PipelineState::new(to);

    debug!(
        "Converting {} to {} ({})",
        state.input_name(),
        target.input_name(),
        codec.engine_lib()
    );

    let mut args = vec![
        "-i".to_string(),
        state.input_name(),
        "-threads".to_string(),
        settings.threads.to_string(),
    ];
    if settings.strict_experimental {
        args.push("-strict".to_string());
        args.push("-2".to_string());
    }
    args.push("-c:v".to_string());
    args.push(codec.engine_lib().to_string());
    args.push(target.input_name());

    engine.exec(&args).await?;
    engine.delete_file(&state.input_name()).await?;

    Ok(target)
}
