use crate::domain::ports::Output;
use std::io::Write;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutOutput;

impl Output for StdoutOutput {
    fn write_section(&self, section: &str) {
        // 整段一次寫出，避免不同影片的行互相穿插
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout.write_all(section.as_bytes()).and_then(|_| stdout.flush()) {
            tracing::warn!("Failed to write to stdout: {}", e);
        }
    }
}

/// Collects sections in completion order.
#[derive(Debug, Default)]
pub struct MemoryOutput {
    sections: Mutex<Vec<String>>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sections(&self) -> Vec<String> {
        self.sections.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Output for MemoryOutput {
    fn write_section(&self, section: &str) {
        if let Ok(mut sections) = self.sections.lock() {
            sections.push(section.to_string());
        }
    }
}
