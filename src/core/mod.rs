pub mod orchestrator;

pub use crate::domain::model::{Film, Person, Planet};
pub use crate::domain::ports::{ConfigProvider, DiagnosticSink, DiagnosticsMode, Output, SwapiApi};
pub use crate::utils::error::{FetchError, Result};
