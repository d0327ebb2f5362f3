//! Command execution
//!
//! Each command builds its collaborators (memory engine, session) and
//! prints either a human-readable report or JSON.

use std::io::Read;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde_json::json;

use crate::adapters::memory::MemoryEngine;
use crate::app::EditorSession;
use crate::cli::args::{FormatsArgs, PlanArgs, ProbeArgs};
use crate::config::Config;
use crate::domain::model::{
    Codec, Format, Transformation, TransformationPlan, VideoDuration,
};
use crate::domain::rules;
use crate::ports::EnginePort;
use crate::probe::parse_duration_line;

/// Placeholder bytes staged as the dry-run source
fn placeholder_source() -> Vec<u8> {
    b"wasmclip dry-run placeholder".to_vec()
}

/// Execute the plan command: resolve a plan and dry-run it against the
/// memory engine, reporting every invocation it would issue.
pub async fn execute_plan(args: PlanArgs, config: &Config) -> Result<()> {
    let source_format: Format = args.source_format.parse()?;
    let duration = VideoDuration::parse(&args.duration)?;

    let engine = Arc::new(MemoryEngine::new().with_probe_duration(duration));
    let mut session = EditorSession::new(
        Arc::clone(&engine) as Arc<dyn EnginePort>,
        config.pipeline.clone(),
    );

    session.boot(&config.engine).await?;
    session
        .load_source(placeholder_source(), source_format)
        .await?;

    let plan = build_plan(&args)?;
    if plan.is_empty() {
        bail!("empty plan: add --trim-from/--trim-to, --mute, --grayscale or --convert-to");
    }
    for step in plan.steps() {
        session.add_transformation(step.clone())?;
    }

    let outcome = session.render().await?;

    let resolved: Vec<String> = rules::execution_order(session.plan())
        .iter()
        .map(|step| step.kind().to_string())
        .collect();
    let journal = engine.exec_journal();

    if args.json {
        let report = json!({
            "source": {
                "format": source_format.extension(),
                "duration": duration.to_timestamp(),
            },
            "phases": resolved,
            "invocations": journal,
            "output": {
                "file": format!("input.{}", outcome.format.extension()),
                "format": outcome.format.extension(),
                "bytes": outcome.bytes.len(),
                "unplayable": outcome.unplayable,
            },
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Source: input.{} ({})",
            source_format.extension(),
            duration.to_timestamp()
        );
        println!("Execution order: {}", resolved.join(" -> "));
        println!();
        println!("Engine invocations:");
        for invocation in &journal {
            println!("  ffmpeg {}", invocation.join(" "));
        }
        println!();
        println!(
            "Output: input.{} ({} bytes)",
            outcome.format.extension(),
            outcome.bytes.len()
        );
        if outcome.unplayable {
            println!("Note: {} has no native browser playback; offer a download instead of a preview.", outcome.format.display_name());
        }
    }

    Ok(())
}

/// Assemble the plan from a JSON file or from individual flags
fn build_plan(args: &PlanArgs) -> Result<TransformationPlan> {
    if let Some(path) = &args.plan_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read plan file {}", path))?;
        let plan = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse plan file {}", path))?;
        return Ok(plan);
    }

    let mut plan = TransformationPlan::new();

    match (&args.trim_from, &args.trim_to) {
        (Some(from), Some(to)) => plan.push(Transformation::Trim {
            from: VideoDuration::parse(from)?,
            to: VideoDuration::parse(to)?,
        }),
        (None, None) => {}
        _ => bail!("--trim-from and --trim-to must be given together"),
    }
    if args.mute {
        plan.push(Transformation::Mute);
    }
    if args.grayscale {
        plan.push(Transformation::Grayscale);
    }
    if let Some(to) = &args.convert_to {
        let to: Format = to.parse()?;
        let codec = match &args.codec {
            Some(codec) => codec.parse::<Codec>()?,
            None => to.default_codec(),
        };
        plan.push(Transformation::Convert { to, codec });
    } else if args.codec.is_some() {
        bail!("--codec requires --convert-to");
    }

    Ok(plan)
}

/// Execute the formats command: print the container/codec registry
pub fn execute_formats(args: FormatsArgs) -> Result<()> {
    if args.json {
        let formats: Vec<_> = Format::ALL
            .iter()
            .map(|format| {
                json!({
                    "format": format.extension(),
                    "name": format.display_name(),
                    "mime": format.mime_type(),
                    "playable": format.is_browser_playable(),
                    "codecs": format
                        .codecs()
                        .iter()
                        .map(|codec| {
                            json!({
                                "name": codec.display_name(),
                                "lib": codec.engine_lib(),
                                "crf": codec.compression_range(),
                            })
                        })
                        .collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&formats)?);
        return Ok(());
    }

    for format in Format::ALL {
        let playable = if format.is_browser_playable() {
            "browser-playable"
        } else {
            "download only"
        };
        println!(
            "{:<5} {} ({})",
            format.extension(),
            format.display_name(),
            playable
        );
        for codec in format.codecs() {
            let (crf_min, crf_max) = codec.compression_range();
            println!(
                "      {:<20} {} (crf {}-{})",
                codec.display_name(),
                codec.engine_lib(),
                crf_min,
                crf_max
            );
        }
    }
    Ok(())
}

/// Execute the probe command: scan log text for the DURATION field
pub fn execute_probe(args: ProbeArgs) -> Result<()> {
    let text = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read log file {}", path))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            buffer
        }
    };

    let duration = text.lines().filter_map(parse_duration_line).last();
    match duration {
        Some(duration) => {
            println!(
                "{} ({} seconds)",
                duration.to_timestamp(),
                duration.to_seconds()
            );
            Ok(())
        }
        None => bail!("no DURATION line found in the log output"),
    }
}
