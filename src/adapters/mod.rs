// Adapters layer: concrete implementations of the domain ports (http, diagnostics, output).

pub mod diagnostics;
pub mod http;
pub mod output;

pub use diagnostics::{BannerSink, MemorySink, NullSink, TracingSink};
pub use http::SwapiClient;
pub use output::{MemoryOutput, StdoutOutput};
