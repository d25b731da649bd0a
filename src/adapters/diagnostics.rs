use crate::domain::ports::{DiagnosticSink, DiagnosticsMode};
use crate::utils::error::{FetchError, FetchErrorKind};
use std::io::Write;
use std::sync::{Arc, Mutex};
use url::Url;

const BANNER: &str = "========= ERROR =========";

/// Formats one failure as a delimiter-framed block.
pub fn render_banner(operation: &str, error: &FetchError) -> String {
    format!(
        "{BANNER}\nFunction: {operation}\nError: {error:?}\nDescription: {error}\n{BANNER}\n"
    )
}

pub fn sink_for(mode: DiagnosticsMode) -> Arc<dyn DiagnosticSink> {
    match mode {
        DiagnosticsMode::Banner => Arc::new(BannerSink::stderr()),
        DiagnosticsMode::Log => Arc::new(TracingSink),
    }
}

/// Writes request URLs and framed error blocks to a writer (stderr by default).
pub struct BannerSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl BannerSink<std::io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }
}

impl<W: Write + Send> BannerSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        match self.writer.into_inner() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_block(&self, block: &str) {
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        // 診斷輸出失敗不影響抓取流程
        let _ = writer.write_all(block.as_bytes());
        let _ = writer.flush();
    }
}

impl<W: Write + Send> DiagnosticSink for BannerSink<W> {
    fn request(&self, _operation: &str, url: &Url) {
        self.write_block(&format!("{url}\n"));
    }

    fn failure(&self, operation: &str, error: &FetchError) {
        self.write_block(&render_banner(operation, error));
    }
}

/// Routes the trace into `tracing` instead of a raw stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn request(&self, operation: &str, url: &Url) {
        tracing::debug!(operation, %url, "Sending request");
    }

    fn failure(&self, operation: &str, error: &FetchError) {
        tracing::error!(
            operation,
            kind = ?error.kind(),
            url = error.url(),
            "Fetch failed: {}",
            error
        );
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn request(&self, _operation: &str, _url: &Url) {}

    fn failure(&self, _operation: &str, _error: &FetchError) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    Request {
        operation: String,
        url: String,
    },
    Failure {
        operation: String,
        kind: FetchErrorKind,
        message: String,
    },
}

/// Keeps every event in memory, for inspection after a run.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn failures(&self) -> Vec<DiagnosticEvent> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, DiagnosticEvent::Failure { .. }))
            .collect()
    }

    fn push(&self, event: DiagnosticEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl DiagnosticSink for MemorySink {
    fn request(&self, operation: &str, url: &Url) {
        self.push(DiagnosticEvent::Request {
            operation: operation.to_string(),
            url: url.to_string(),
        });
    }

    fn failure(&self, operation: &str, error: &FetchError) {
        self.push(DiagnosticEvent::Failure {
            operation: operation.to_string(),
            kind: error.kind(),
            message: error.to_string(),
        });
    }
}
