//! Transformation pipeline - replays an edit plan against the engine

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::model::{SourceMedia, Transformation, TransformationKind, TransformationPlan};
use crate::domain::rules;
use crate::engine::{
    convert, grayscale, mute, trim, Phase, PipelineSettings, PipelineState, RunOutcome,
};
use crate::error::{WasmclipError, WasmclipResult};
use crate::ports::EnginePort;

/// Drives the engine through one plan at a time.
///
/// The engine's virtual filesystem is a single shared mutable resource, so
/// runs are serialized behind an internal mutex: a `run` issued while
/// another is in flight waits for it to finish. Within a run every engine
/// call is awaited before the next is issued - each step's input is the
/// previous step's output file.
pub struct TransformationPipeline {
    engine: Arc<dyn EnginePort>,
    settings: PipelineSettings,
    run_lock: Mutex<()>,
    abort: Arc<AtomicBool>,
}

/// Requests a best-effort stop of a pipeline run.
///
/// The engine cannot interrupt an exec in flight, so the abort takes
/// effect at the next phase boundary. It is consumed by the run that
/// observes it; later runs proceed normally.
#[derive(Clone)]
pub struct AbortHandle {
    flag: Arc<AtomicBool>,
}

impl AbortHandle {
    pub fn abort(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

impl TransformationPipeline {
    pub fn new(engine: Arc<dyn EnginePort>, settings: PipelineSettings) -> Self {
        Self {
            engine,
            settings,
            run_lock: Mutex::new(()),
            abort: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn abort_handle(&self) -> AbortHandle {
        AbortHandle {
            flag: Arc::clone(&self.abort),
        }
    }

    /// Execute a plan against the staged source and return the final
    /// output file.
    ///
    /// Steps run in canonical phase order (trim, mute, grayscale,
    /// convert), not insertion order. A failing step aborts the run; the
    /// error names the phase and the working file it left behind. No step
    /// is retried - engine operations mutate the working file, so a blind
    /// retry could re-run against already-transformed input.
    pub async fn run(
        &self,
        plan: &TransformationPlan,
        source: &SourceMedia,
    ) -> WasmclipResult<RunOutcome> {
        let _guard = self.run_lock.lock().await;

        let steps = rules::execution_order(plan);
        info!(
            "Running plan: {} step(s) against {} source",
            steps.len(),
            source.format
        );

        let mut state = PipelineState::new(source.format);
        for step in steps {
            if self.abort.swap(false, Ordering::SeqCst) {
                info!("Run aborted before {} phase", step.kind());
                return Err(WasmclipError::Cancelled);
            }
            debug!("Entering {} phase", step.kind());
            state = self.apply_step(step, state).await?;
        }

        let final_name = state.input_name();
        let bytes = self
            .engine
            .read_file(&final_name)
            .await
            .map_err(|e| WasmclipError::from_engine(Phase::Finalize, &final_name, e))?;

        let unplayable = !state.format.is_browser_playable();
        info!(
            "Plan complete: {} ({} bytes, unplayable: {})",
            final_name,
            bytes.len(),
            unplayable
        );

        Ok(RunOutcome {
            bytes,
            format: state.format,
            unplayable,
        })
    }

    async fn apply_step(
        &self,
        step: &Transformation,
        state: PipelineState,
    ) -> WasmclipResult<PipelineState> {
        let phase = phase_of(step.kind());
        let file = state.input_name();

        let result = match step {
            Transformation::Trim { from, to } => {
                trim::apply(self.engine.as_ref(), state, from, to).await
            }
            Transformation::Mute => mute::apply(self.engine.as_ref(), state).await,
            Transformation::Grayscale => {
                grayscale::apply(self.engine.as_ref(), state, &self.settings).await
            }
            Transformation::Convert { to, codec } => {
                convert::apply(self.engine.as_ref(), state, *to, *codec, &self.settings).await
            }
        };

        result.map_err(|e| WasmclipError::from_engine(phase, &file, e))
    }
}

fn phase_of(kind: TransformationKind) -> Phase {
    match kind {
        TransformationKind::Trim => Phase::Trim,
        TransformationKind::Mute => Phase::Mute,
        TransformationKind::Grayscale => Phase::Grayscale,
        TransformationKind::Convert => Phase::Convert,
    }
}
