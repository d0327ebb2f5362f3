//! Engine log probing
//!
//! A metadata-only exec makes the engine print the source description as
//! free-text log lines. The only field the pipeline needs is DURATION;
//! every other line is ignored, and a line that fails to match is not an
//! error.

use std::sync::{Arc, Mutex, OnceLock};

use regex::Regex;

use crate::domain::model::VideoDuration;
use crate::ports::LogCallback;

static DURATION_PATTERN: OnceLock<Regex> = OnceLock::new();

fn duration_pattern() -> &'static Regex {
    DURATION_PATTERN.get_or_init(|| {
        Regex::new(r"(?i)DURATION\s*:\s*\d+:\d+:\d+\.?\d*").expect("duration pattern compiles")
    })
}

/// Extract a duration from one engine log line.
///
/// The line is cut at the first comma, matched case-insensitively against
/// the `DURATION : H:M:S` shape, then split on `:` into three trimmed
/// fields parsed as integers (fractional seconds truncated). `None` for
/// any line that is not the duration line.
pub fn parse_duration_line(line: &str) -> Option<VideoDuration> {
    let head = line.split(',').next().unwrap_or(line);
    if !duration_pattern().is_match(head) {
        return None;
    }

    let mut fields = head.split(':').skip(1).map(parse_clock_field);
    let hours = fields.next()??;
    let minutes = fields.next()??;
    let seconds = fields.next()??;

    Some(VideoDuration::new(hours, minutes, seconds as f64))
}

/// Integer value of a timestamp field, truncating any fractional part
fn parse_clock_field(field: &str) -> Option<u32> {
    field.trim().split('.').next()?.trim().parse().ok()
}

/// Captures the most recent duration seen on the engine's log stream
#[derive(Clone, Default)]
pub struct DurationProbe {
    latest: Arc<Mutex<Option<VideoDuration>>>,
}

impl DurationProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listener to register with `EnginePort::on_log`
    pub fn listener(&self) -> LogCallback {
        let latest = Arc::clone(&self.latest);
        Arc::new(move |line: &str| {
            if let Some(duration) = parse_duration_line(line) {
                *latest.lock().unwrap() = Some(duration);
            }
        })
    }

    /// Most recent duration observed, if any line matched yet
    pub fn latest(&self) -> Option<VideoDuration> {
        *self.latest.lock().unwrap()
    }
}
