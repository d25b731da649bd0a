use crate::domain::model::{Film, Person, Planet};
use crate::utils::error::FetchError;
use async_trait::async_trait;
use url::Url;

/// Read access to the people / films / planets API.
#[async_trait]
pub trait SwapiApi: Send + Sync {
    async fn fetch_person(&self, id: u32) -> Result<Person, FetchError>;
    /// `url` is an absolute resource reference, as found in `Person::films`.
    async fn fetch_film(&self, url: &str) -> Result<Film, FetchError>;
    async fn fetch_planet(&self, url: &str) -> Result<Planet, FetchError>;
}

/// Receives the diagnostic trace of the API client.
pub trait DiagnosticSink: Send + Sync {
    /// Called with the final URL right before a request goes out.
    fn request(&self, operation: &str, url: &Url);
    /// Called exactly once for every failed fetch.
    fn failure(&self, operation: &str, error: &FetchError);
}

/// Destination of rendered sections. One call is one uninterrupted block.
pub trait Output: Send + Sync {
    fn write_section(&self, section: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticsMode {
    /// Delimiter-framed error blocks on stderr
    #[default]
    Banner,
    /// Structured `tracing` events
    Log,
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn person_id(&self) -> u32;
    fn max_concurrent(&self) -> Option<usize>;
    fn diagnostics(&self) -> DiagnosticsMode;
}
