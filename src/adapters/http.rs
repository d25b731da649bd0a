use crate::domain::model::{Film, Person, Planet};
use crate::domain::ports::{DiagnosticSink, SwapiApi};
use crate::utils::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api/";

/// reqwest-backed API client.
///
/// Each call issues one GET and decodes the body into a fixed shape. Failures
/// are reported once to the diagnostic sink and then handed back as
/// `FetchError`; nothing is retried.
pub struct SwapiClient {
    base_url: String,
    client: Client,
    sink: Arc<dyn DiagnosticSink>,
}

impl SwapiClient {
    pub fn new(base_url: impl Into<String>, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self::with_client(base_url, Client::new(), sink)
    }

    pub fn with_client(
        base_url: impl Into<String>,
        client: Client,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            client,
            sink,
        }
    }

    /// `<base>/people/<id>/`. The base is parsed on every call so a bad base
    /// surfaces as a fetch failure rather than a constructor error.
    pub fn person_url(&self, id: u32) -> Result<Url, FetchError> {
        let mut base =
            Url::parse(&self.base_url).map_err(|e| FetchError::invalid_url(&self.base_url, e))?;

        if base.cannot_be_a_base() {
            return Err(FetchError::invalid_url(
                &self.base_url,
                "base URL cannot carry a path",
            ));
        }

        // join() drops the last segment unless the path ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        if id == 0 {
            return Err(FetchError::invalid_url(
                format!("{}people/0/", base),
                "person id must be a positive integer",
            ));
        }

        base.join(&format!("people/{}/", id))
            .map_err(|e| FetchError::invalid_url(&self.base_url, e))
    }

    async fn fetch_resource<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: Result<Url, FetchError>,
    ) -> Result<T, FetchError> {
        let result = match url {
            Ok(url) => self.get_json(operation, url).await,
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            self.sink.failure(operation, e);
        }
        result
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        url: Url,
    ) -> Result<T, FetchError> {
        // 1 - 發送前先記錄 URL
        self.sink.request(operation, &url);
        tracing::debug!("Making API request to: {}", url);

        // 2 - 連線
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // 3 - 檢查資料
        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
        if body.is_empty() {
            return Err(FetchError::MissingBody {
                url: url.to_string(),
            });
        }

        // 4 - 解析 JSON
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Accepts only absolute http(s) references.
pub fn parse_reference(reference: &str) -> Result<Url, FetchError> {
    let url = Url::parse(reference).map_err(|e| FetchError::invalid_url(reference, e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(FetchError::invalid_url(
            reference,
            format!("Unsupported URL scheme: {}", scheme),
        )),
    }
}

#[async_trait]
impl SwapiApi for SwapiClient {
    async fn fetch_person(&self, id: u32) -> Result<Person, FetchError> {
        self.fetch_resource("fetch_person", self.person_url(id))
            .await
    }

    async fn fetch_film(&self, url: &str) -> Result<Film, FetchError> {
        self.fetch_resource("fetch_film", parse_reference(url)).await
    }

    async fn fetch_planet(&self, url: &str) -> Result<Planet, FetchError> {
        self.fetch_resource("fetch_planet", parse_reference(url))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::diagnostics::{DiagnosticEvent, MemorySink};
    use crate::utils::error::FetchErrorKind;
    use httpmock::prelude::*;

    fn client_with_sink(base_url: &str) -> (SwapiClient, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let client = SwapiClient::new(base_url, sink.clone());
        (client, sink)
    }

    fn han_solo(server: &MockServer) -> serde_json::Value {
        serde_json::json!({
            "name": "Han Solo",
            "birth_year": "29BBY",
            "height": "180",
            "mass": "80",
            "hair_color": "brown",
            "gender": "male",
            "homeworld": server.url("/api/planets/22/"),
            "films": [
                server.url("/api/films/1/"),
                server.url("/api/films/2/"),
                server.url("/api/films/3/")
            ]
        })
    }

    #[test]
    fn test_person_url_joins_base() {
        let (client, _) = client_with_sink(DEFAULT_BASE_URL);
        assert_eq!(
            client.person_url(22).unwrap().as_str(),
            "https://swapi.dev/api/people/22/"
        );
    }

    #[test]
    fn test_person_url_adds_missing_trailing_slash() {
        let (client, _) = client_with_sink("https://swapi.dev/api");
        assert_eq!(
            client.person_url(1).unwrap().as_str(),
            "https://swapi.dev/api/people/1/"
        );
    }

    #[test]
    fn test_person_url_rejects_zero_and_bad_base() {
        let (client, _) = client_with_sink(DEFAULT_BASE_URL);
        let err = client.person_url(0).unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::UrlConstruction);

        let (client, _) = client_with_sink("not a base url");
        let err = client.person_url(1).unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::UrlConstruction);

        let (client, _) = client_with_sink("mailto:someone@example.com");
        assert!(client.person_url(1).is_err());
    }

    #[test]
    fn test_zero_id_error_shows_normalized_url() {
        let (client, _) = client_with_sink("https://swapi.dev/api");
        let err = client.person_url(0).unwrap_err();
        assert_eq!(err.url(), "https://swapi.dev/api/people/0/");
    }

    #[test]
    fn test_parse_reference() {
        assert!(parse_reference("https://swapi.dev/api/films/1/").is_ok());
        assert!(parse_reference("/api/films/1/").is_err());
        assert!(parse_reference("ftp://swapi.dev/api/films/1/").is_err());
        assert!(parse_reference("").is_err());
    }

    #[tokio::test]
    async fn test_fetch_person_success() {
        let server = MockServer::start_async().await;
        let person_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/people/22/");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(han_solo(&server));
            })
            .await;

        let (client, sink) = client_with_sink(&server.url("/api/"));
        let person = client.fetch_person(22).await.unwrap();

        person_mock.assert_async().await;
        assert_eq!(person.name, "Han Solo");
        assert!(!person.birth_year.is_empty());
        assert!(!person.gender.is_empty());
        assert!(!person.height.is_empty());
        assert!(!person.mass.is_empty());
        assert_eq!(person.films.len(), 3);

        // 成功時只有一筆請求紀錄，沒有錯誤
        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0],
            DiagnosticEvent::Request {
                operation: "fetch_person".to_string(),
                url: server.url("/api/people/22/"),
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_person_not_found_emits_one_trace() {
        let server = MockServer::start_async().await;
        let missing_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/people/9999/");
                then.status(404)
                    .json_body(serde_json::json!({"detail": "Not found"}));
            })
            .await;

        let (client, sink) = client_with_sink(&server.url("/api/"));
        let err = client.fetch_person(9999).await.unwrap_err();

        missing_mock.assert_async().await;
        assert!(matches!(err, FetchError::UnexpectedStatus { status: 404, .. }));
        let failures = sink.failures();
        assert_eq!(failures.len(), 1);
        assert!(matches!(
            &failures[0],
            DiagnosticEvent::Failure { operation, kind: FetchErrorKind::Status, .. } if operation == "fetch_person"
        ));
    }

    #[tokio::test]
    async fn test_fetch_person_zero_id_sends_nothing() {
        let server = MockServer::start_async().await;
        let any_mock = server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200);
            })
            .await;

        let (client, sink) = client_with_sink(&server.url("/api/"));
        let err = client.fetch_person(0).await.unwrap_err();

        assert_eq!(err.kind(), FetchErrorKind::UrlConstruction);
        assert_eq!(any_mock.hits_async().await, 0);
        assert_eq!(sink.events().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_film_decode_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/films/1/");
                then.status(200)
                    .json_body(serde_json::json!({"title": "A New Hope"}));
            })
            .await;

        let (client, sink) = client_with_sink(&server.url("/api/"));
        let err = client
            .fetch_film(&server.url("/api/films/1/"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FetchErrorKind::Decode);
        assert_eq!(sink.failures().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_film_null_body_is_decode_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/films/4/");
                then.status(200).body("null");
            })
            .await;

        let (client, _) = client_with_sink(&server.url("/api/"));
        let err = client
            .fetch_film(&server.url("/api/films/4/"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FetchErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_fetch_planet_empty_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/planets/22/");
                then.status(200).body("");
            })
            .await;

        let (client, sink) = client_with_sink(&server.url("/api/"));
        let err = client
            .fetch_planet(&server.url("/api/planets/22/"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FetchErrorKind::MissingBody);
        assert_eq!(sink.failures().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_planet_success() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/planets/22/");
                then.status(200).json_body(serde_json::json!({
                    "name": "Corellia",
                    "population": "3000000000",
                    "terrain": "plains, urban, hills, forests"
                }));
            })
            .await;

        let (client, _) = client_with_sink(&server.url("/api/"));
        let planet = client
            .fetch_planet(&server.url("/api/planets/22/"))
            .await
            .unwrap();

        assert_eq!(planet.name, "Corellia");
        assert_eq!(planet.population, "3000000000");
    }

    #[tokio::test]
    async fn test_malformed_references_yield_error() {
        let (client, sink) = client_with_sink(DEFAULT_BASE_URL);

        let film = client.fetch_film("films/1").await;
        let planet = client.fetch_planet("http://[::1").await;

        assert_eq!(film.unwrap_err().kind(), FetchErrorKind::UrlConstruction);
        assert_eq!(planet.unwrap_err().kind(), FetchErrorKind::UrlConstruction);
        assert_eq!(sink.failures().len(), 2);
        // 沒有送出任何請求
        assert!(sink
            .events()
            .iter()
            .all(|e| matches!(e, DiagnosticEvent::Failure { .. })));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        // port 1 is reserved and nothing listens on it
        let (client, sink) = client_with_sink("http://127.0.0.1:1/api/");
        let err = client.fetch_person(1).await.unwrap_err();

        assert_eq!(err.kind(), FetchErrorKind::Transport);
        assert_eq!(sink.failures().len(), 1);
    }
}
