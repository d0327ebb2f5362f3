// Editor session - Orchestrates plan editing and pipeline runs

use std::sync::Arc;

use tracing::info;

use crate::domain::errors::DomainError;
use crate::domain::model::{
    Format, SourceMedia, Transformation, TransformationKind, TransformationPlan, VideoDuration,
};
use crate::domain::rules;
use crate::engine::{
    AbortHandle, Phase, PipelineSettings, PipelineState, RunOutcome, TransformationPipeline,
};
use crate::error::{WasmclipError, WasmclipResult};
use crate::ports::{EngineLoadConfig, EnginePort, LogCallback};
use crate::probe::DurationProbe;

/// One editing session against one engine instance.
///
/// Owns the edit plan and the probed source description; the UI layer
/// calls `add_transformation`/`remove_transformation` as the user confirms
/// choices and `render` when they apply the plan.
pub struct EditorSession {
    engine: Arc<dyn EnginePort>,
    pipeline: TransformationPipeline,
    probe: DurationProbe,
    plan: TransformationPlan,
    source: Option<SourceMedia>,
}

impl EditorSession {
    pub fn new(engine: Arc<dyn EnginePort>, settings: PipelineSettings) -> Self {
        let pipeline = TransformationPipeline::new(Arc::clone(&engine), settings);
        let probe = DurationProbe::new();
        engine.on_log(probe.listener());

        Self {
            engine,
            pipeline,
            probe,
            plan: TransformationPlan::new(),
            source: None,
        }
    }

    /// Boot the engine; every other operation fails `EngineNotReady`
    /// until this resolves.
    pub async fn boot(&self, config: &EngineLoadConfig) -> WasmclipResult<()> {
        info!("Loading engine from {}", config.core_url);
        self.engine
            .load(config)
            .await
            .map_err(|source| WasmclipError::EngineLoad { source })
    }

    /// Stage the source bytes and probe the engine for their duration.
    ///
    /// The probe is a metadata-only exec: the engine opens the input,
    /// prints its description to the log stream and exits; the duration
    /// is scraped from the DURATION log line.
    pub async fn load_source(
        &mut self,
        bytes: Vec<u8>,
        format: Format,
    ) -> WasmclipResult<SourceMedia> {
        let name = PipelineState::new(format).input_name();

        self.engine
            .write_file(&name, bytes)
            .await
            .map_err(|e| WasmclipError::from_engine(Phase::Probe, &name, e))?;
        self.engine
            .exec(&["-i".to_string(), name.clone()])
            .await
            .map_err(|e| WasmclipError::from_engine(Phase::Probe, &name, e))?;

        let duration = self
            .probe
            .latest()
            .ok_or(WasmclipError::DurationUnavailable)?;
        let source = SourceMedia { format, duration };

        info!(
            "Source staged as {} ({})",
            name,
            duration.to_short_string()
        );
        self.source = Some(source);
        Ok(source)
    }

    /// Validate and append a transformation to the plan.
    ///
    /// Bad parameters are rejected here, at add time, so the user gets
    /// actionable feedback before a run ever starts.
    pub fn add_transformation(&mut self, transformation: Transformation) -> WasmclipResult<()> {
        let source = self.source.ok_or(DomainError::NoSource)?;
        rules::validate_transformation(&transformation, &source)?;
        self.plan.push(transformation);
        Ok(())
    }

    /// Remove every plan entry of the given kind
    pub fn remove_transformation(&mut self, kind: TransformationKind) {
        self.plan.remove_kind(kind);
    }

    pub fn plan(&self) -> &TransformationPlan {
        &self.plan
    }

    pub fn source(&self) -> Option<&SourceMedia> {
        self.source.as_ref()
    }

    /// Map slider percentages onto a validated trim range of the source
    pub fn trim_range_from_percents(
        &self,
        start_percent: f64,
        end_percent: f64,
    ) -> WasmclipResult<(VideoDuration, VideoDuration)> {
        let source = self.source.ok_or(DomainError::NoSource)?;

        let from = source.duration.at_percent(start_percent.clamp(0.0, 100.0));
        let to = source.duration.at_percent(end_percent.clamp(0.0, 100.0));
        if from.to_seconds() >= to.to_seconds() {
            return Err(DomainError::InvalidTrimRange {
                start: from.to_timestamp(),
                end: to.to_timestamp(),
            }
            .into());
        }

        Ok((from, to))
    }

    /// Handle for aborting an in-flight render between phases
    pub fn abort_handle(&self) -> AbortHandle {
        self.pipeline.abort_handle()
    }

    /// Replay the accumulated plan and return the final output file
    pub async fn render(&self) -> WasmclipResult<RunOutcome> {
        let source = self.source.ok_or(DomainError::NoSource)?;
        self.pipeline.run(&self.plan, &source).await
    }

    /// Forward a log listener to the engine (e.g. for a UI log pane)
    pub fn on_engine_log(&self, callback: LogCallback) {
        self.engine.on_log(callback);
    }
}
