// Memory engine adapter - In-process stand-in for the WASM engine
//
// Backs the dry-run CLI and the test suites: a HashMap virtual
// filesystem, a journal of every exec argv, and scripted probe chatter on
// the log stream. The real engine lives behind a browser worker boundary
// and is out of scope here.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::model::VideoDuration;
use crate::error::EngineError;
use crate::ports::{EngineLoadConfig, EnginePort, LogCallback};

#[derive(Default)]
pub struct MemoryEngine {
    loaded: AtomicBool,
    files: Mutex<HashMap<String, Vec<u8>>>,
    listeners: Mutex<Vec<LogCallback>>,
    journal: Mutex<Vec<Vec<String>>>,
    probe_duration: Mutex<Option<VideoDuration>>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duration the scripted probe chatter reports for staged inputs
    pub fn with_probe_duration(self, duration: VideoDuration) -> Self {
        *self.probe_duration.lock().unwrap() = Some(duration);
        self
    }

    pub fn set_probe_duration(&self, duration: VideoDuration) {
        *self.probe_duration.lock().unwrap() = Some(duration);
    }

    /// Every exec argv issued so far, oldest first
    pub fn exec_journal(&self) -> Vec<Vec<String>> {
        self.journal.lock().unwrap().clone()
    }

    /// Names currently staged in the virtual filesystem, sorted
    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.files.lock().unwrap().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn contains_file(&self, name: &str) -> bool {
        self.files.lock().unwrap().contains_key(name)
    }

    fn ensure_loaded(&self) -> Result<(), EngineError> {
        if self.loaded.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(EngineError::NotReady)
        }
    }

    fn emit(&self, line: &str) {
        let listeners = self.listeners.lock().unwrap().clone();
        for listener in listeners.iter() {
            listener(line);
        }
    }

    /// Metadata chatter the engine prints for each input it opens
    fn emit_probe_chatter(&self, input: &str) {
        self.emit(&format!("Input #0, from '{}':", input));
        self.emit("  Metadata:");
        if let Some(duration) = *self.probe_duration.lock().unwrap() {
            self.emit(&format!(
                "  DURATION        : {}.00, start: 0.000000, bitrate: N/A",
                duration.to_timestamp()
            ));
        }
    }

    /// Input operands of an argv: every value following a `-i` flag
    fn input_operands(args: &[String]) -> Vec<String> {
        args.windows(2)
            .filter(|pair| pair[0] == "-i")
            .map(|pair| pair[1].clone())
            .collect()
    }

    /// Output operand of an argv: a trailing non-flag value that is not
    /// itself an input (a bare probe invocation has none)
    fn output_operand(args: &[String]) -> Option<&String> {
        if args.len() < 2 {
            return None;
        }
        let last = &args[args.len() - 1];
        let before = &args[args.len() - 2];
        if last.starts_with('-') || before == "-i" {
            None
        } else {
            Some(last)
        }
    }
}

#[async_trait]
impl EnginePort for MemoryEngine {
    async fn load(&self, config: &EngineLoadConfig) -> Result<(), EngineError> {
        debug!(
            "Memory engine loaded (core: {}, wasm: {})",
            config.core_url, config.wasm_url
        );
        self.loaded.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn write_file(&self, name: &str, bytes: Vec<u8>) -> Result<(), EngineError> {
        self.ensure_loaded()?;
        self.files.lock().unwrap().insert(name.to_string(), bytes);
        Ok(())
    }

    async fn read_file(&self, name: &str) -> Result<Vec<u8>, EngineError> {
        self.ensure_loaded()?;
        self.files
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| EngineError::FileMissing {
                name: name.to_string(),
            })
    }

    async fn rename_file(&self, from: &str, to: &str) -> Result<(), EngineError> {
        self.ensure_loaded()?;
        let mut files = self.files.lock().unwrap();
        let bytes = files.remove(from).ok_or_else(|| EngineError::FileMissing {
            name: from.to_string(),
        })?;
        files.insert(to.to_string(), bytes);
        Ok(())
    }

    async fn delete_file(&self, name: &str) -> Result<(), EngineError> {
        self.ensure_loaded()?;
        self.files
            .lock()
            .unwrap()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| EngineError::FileMissing {
                name: name.to_string(),
            })
    }

    async fn exec(&self, args: &[String]) -> Result<(), EngineError> {
        self.ensure_loaded()?;
        self.journal.lock().unwrap().push(args.to_vec());

        let inputs = Self::input_operands(args);
        for input in &inputs {
            if !self.contains_file(input) {
                self.emit(&format!("{}: No such file or directory", input));
                return Err(EngineError::ExecFailed { code: 1 });
            }
            self.emit_probe_chatter(input);
        }

        if let Some(output) = Self::output_operand(args) {
            let bytes = inputs
                .first()
                .and_then(|input| self.files.lock().unwrap().get(input).cloned())
                .unwrap_or_default();
            self.files.lock().unwrap().insert(output.clone(), bytes);
        }

        Ok(())
    }

    fn on_log(&self, callback: LogCallback) {
        self.listeners.lock().unwrap().push(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[tokio::test]
    async fn calls_fail_before_load() {
        let engine = MemoryEngine::new();
        let result = engine.write_file("input.mp4", vec![1]).await;
        assert_eq!(result, Err(EngineError::NotReady));

        let result = engine.exec(&args(&["-i", "input.mp4"])).await;
        assert_eq!(result, Err(EngineError::NotReady));
    }

    #[tokio::test]
    async fn rename_moves_bytes() {
        let engine = MemoryEngine::new();
        engine.load(&EngineLoadConfig::default()).await.unwrap();
        engine.write_file("output.mp4", vec![7]).await.unwrap();

        engine.rename_file("output.mp4", "input.mp4").await.unwrap();
        assert!(!engine.contains_file("output.mp4"));
        assert_eq!(engine.read_file("input.mp4").await.unwrap(), vec![7]);
    }

    #[tokio::test]
    async fn exec_requires_staged_inputs() {
        let engine = MemoryEngine::new();
        engine.load(&EngineLoadConfig::default()).await.unwrap();

        let result = engine
            .exec(&args(&["-i", "input.mp4", "output.mp4"]))
            .await;
        assert_eq!(result, Err(EngineError::ExecFailed { code: 1 }));
    }

    #[tokio::test]
    async fn exec_stages_the_output_operand() {
        let engine = MemoryEngine::new();
        engine.load(&EngineLoadConfig::default()).await.unwrap();
        engine.write_file("input.mp4", vec![1, 2, 3]).await.unwrap();

        engine
            .exec(&args(&["-i", "input.mp4", "-vcodec", "copy", "output.mp4"]))
            .await
            .unwrap();
        assert_eq!(engine.read_file("output.mp4").await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn bare_probe_has_no_output_operand() {
        let engine = MemoryEngine::new();
        engine.load(&EngineLoadConfig::default()).await.unwrap();
        engine.write_file("input.webm", vec![1]).await.unwrap();

        engine.exec(&args(&["-i", "input.webm"])).await.unwrap();
        assert_eq!(engine.file_names(), vec!["input.webm".to_string()]);
        assert_eq!(engine.exec_journal().len(), 1);
    }

    #[tokio::test]
    async fn probe_chatter_reports_the_scripted_duration() {
        let engine =
            MemoryEngine::new().with_probe_duration(VideoDuration::from_seconds(120.0));
        engine.load(&EngineLoadConfig::default()).await.unwrap();
        engine.write_file("input.mp4", vec![1]).await.unwrap();

        let probe = crate::probe::DurationProbe::new();
        engine.on_log(probe.listener());

        engine.exec(&args(&["-i", "input.mp4"])).await.unwrap();
        assert_eq!(probe.latest(), Some(VideoDuration::from_seconds(120.0)));
    }
}
