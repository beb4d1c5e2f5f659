use crate::config::SearchConfig;
use crate::core::{SearchHit, SearchProvider};
use crate::utils::error::{RadarError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

pub const API_KEY_HEADER: &str = "X-API-KEY";

#[derive(Debug, Serialize)]
struct SearchPayload<'a> {
    q: &'a str,
    gl: &'a str,
    hl: &'a str,
}

/// Client for the Serper web-search endpoint.
pub struct SerperClient {
    config: SearchConfig,
    client: Client,
}

impl SerperClient {
    pub fn new(config: SearchConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            config,
            client: builder.build()?,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

#[async_trait]
impl SearchProvider for SerperClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        // 沒有金鑰就不發送請求
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| RadarError::MissingConfigError {
                field: crate::config::API_KEY_ENV.to_string(),
            })?;

        let payload = SearchPayload {
            q: query,
            gl: &self.config.country,
            hl: &self.config.language,
        };

        tracing::debug!("Making search request to: {}", self.config.endpoint);
        let response = self
            .client
            .post(&self.config.endpoint)
            .header(API_KEY_HEADER, api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Search response status: {}", status);

        if status != reqwest::StatusCode::OK {
            return Err(RadarError::ProviderStatusError {
                status: status.as_u16(),
            });
        }

        let body: serde_json::Value = response.json().await?;
        Ok(parse_organic(&body))
    }
}

/// Reads the `organic` array; missing or non-string fields become empty.
pub fn parse_organic(body: &serde_json::Value) -> Vec<SearchHit> {
    let Some(items) = body.get("organic").and_then(|v| v.as_array()) else {
        tracing::warn!("Search response has no organic results");
        return Vec::new();
    };

    let field = |item: &serde_json::Value, name: &str| {
        item.get(name)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };

    items
        .iter()
        .filter(|item| item.is_object())
        .map(|item| SearchHit {
            title: field(item, "title"),
            snippet: field(item, "snippet"),
            link: field(item, "link"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn config(endpoint: String, api_key: Option<&str>) -> SearchConfig {
        SearchConfig {
            endpoint,
            api_key: api_key.map(str::to_string),
            ..SearchConfig::default()
        }
    }

    #[test]
    fn test_parse_organic_defaults_missing_fields() {
        let body = json!({
            "organic": [
                {"title": "Vendedor", "link": "https://www.bne.com.br/vaga/1"},
                {"snippet": "produção", "title": null},
                "not an object",
                {"title": 42, "snippet": "ok", "link": "https://x"}
            ]
        });

        let hits = parse_organic(&body);

        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0], SearchHit::new("Vendedor", "", "https://www.bne.com.br/vaga/1"));
        assert_eq!(hits[1], SearchHit::new("", "produção", ""));
        assert_eq!(hits[2].title, "");
    }

    #[test]
    fn test_parse_organic_missing_array() {
        assert!(parse_organic(&json!({"searchParameters": {}})).is_empty());
    }

    #[tokio::test]
    async fn test_search_sends_key_and_payload() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/search")
                .header("X-API-KEY", "test-key")
                .header("Content-Type", "application/json")
                .json_body(json!({"q": "vagas", "gl": "br", "hl": "pt-BR"}));
            then.status(200).json_body(json!({
                "organic": [{"title": "Vaga em fábrica", "snippet": "produção", "link": "https://a"}]
            }));
        });

        let client = SerperClient::new(config(server.url("/search"), Some("test-key"))).unwrap();
        let hits = client.search("vagas").await.unwrap();

        api_mock.assert();
        assert_eq!(hits, vec![SearchHit::new("Vaga em fábrica", "produção", "https://a")]);
    }

    #[tokio::test]
    async fn test_search_non_200_is_status_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/search");
            then.status(403).body("forbidden");
        });

        let client = SerperClient::new(config(server.url("/search"), Some("bad"))).unwrap();
        let err = client.search("vagas").await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, RadarError::ProviderStatusError { status: 403 }));
    }

    #[tokio::test]
    async fn test_search_without_key_makes_no_request() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/search");
            then.status(200).json_body(json!({"organic": []}));
        });

        let client = SerperClient::new(config(server.url("/search"), None)).unwrap();
        let err = client.search("vagas").await.unwrap_err();

        assert!(matches!(err, RadarError::MissingConfigError { .. }));
        api_mock.assert_hits(0);
    }

    #[tokio::test]
    async fn test_search_invalid_json_is_transport_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/search");
            then.status(200).body("<html>oops</html>");
        });

        let client = SerperClient::new(config(server.url("/search"), Some("k"))).unwrap();
        let err = client.search("vagas").await.unwrap_err();

        assert!(matches!(err, RadarError::ApiError(_)));
    }
}
