pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{
    BannerSink, MemoryOutput, MemorySink, NullSink, StdoutOutput, SwapiClient, TracingSink,
};
pub use crate::config::{CliConfig, TomlConfig};
pub use crate::core::orchestrator::{Orchestrator, RunReport};
pub use crate::domain::model::{Film, Person, Planet};
pub use crate::domain::ports::{ConfigProvider, DiagnosticSink, DiagnosticsMode, Output, SwapiApi};
pub use crate::utils::error::{AppError, FetchError, FetchErrorKind, Result};
