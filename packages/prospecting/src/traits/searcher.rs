//! Search provider trait for prospect discovery.
//!
//! Given a query string and a result bound, a provider returns an
//! ordered list of (url, title, snippet) hits. Failures are typed so
//! the retry layer can branch on `RateLimited` without string-sniffing
//! error messages.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{SearchError, SearchResult};
use crate::types::SearchHit;

/// External web search, the only discovery mechanism in the pipeline.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search the web, returning at most `max_results` hits.
    async fn search(&self, query: &str, max_results: usize) -> SearchResult<Vec<SearchHit>>;
}

/// Serper-style SERP API provider.
///
/// POSTs the query as JSON and maps the `organic` result list to hits.
/// HTTP 429 becomes `SearchError::RateLimited` so the caller's backoff
/// kicks in; everything else is a plain HTTP/provider error.
pub struct SerperProvider {
    api_key: String,
    client: reqwest::Client,
    endpoint: String,
}

impl SerperProvider {
    const DEFAULT_ENDPOINT: &'static str = "https://google.serper.dev/search";

    /// Create a provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: reqwest::Client::new(),
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Override the API endpoint (for self-hosted proxies).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl SearchProvider for SerperProvider {
    async fn search(&self, query: &str, max_results: usize) -> SearchResult<Vec<SearchHit>> {
        #[derive(serde::Serialize)]
        struct Request<'a> {
            q: &'a str,
            num: usize,
        }

        #[derive(serde::Deserialize)]
        struct Response {
            #[serde(default)]
            organic: Vec<Organic>,
        }

        #[derive(serde::Deserialize)]
        struct Organic {
            link: String,
            #[serde(default)]
            title: String,
            #[serde(default)]
            snippet: String,
        }

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-API-KEY", &self.api_key)
            .json(&Request {
                q: query,
                num: max_results,
            })
            .send()
            .await
            .map_err(|e| SearchError::Http(Box::new(e)))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SearchError::RateLimited);
        }
        if !response.status().is_success() {
            return Err(SearchError::Provider(format!(
                "search API returned {}",
                response.status()
            )));
        }

        let parsed: Response = response
            .json()
            .await
            .map_err(|e| SearchError::Http(Box::new(e)))?;

        Ok(parsed
            .organic
            .into_iter()
            .take(max_results)
            .map(|o| SearchHit::new(o.link, o.title, o.snippet))
            .collect())
    }
}

/// Scripted search provider for tests.
///
/// Hits are registered per query; unknown queries return empty. Errors
/// can be queued and are consumed (in order) before any hit lookup,
/// which makes retry/backoff paths easy to exercise.
#[derive(Default)]
pub struct MockSearchProvider {
    responses: Mutex<HashMap<String, Vec<SearchHit>>>,
    queued_errors: Mutex<Vec<SearchError>>,
    calls: Mutex<Vec<String>>,
}

impl MockSearchProvider {
    /// Create an empty mock provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register hits for a query.
    pub fn with_hits(self, query: &str, hits: Vec<SearchHit>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(query.to_string(), hits);
        self
    }

    /// Queue an error to be returned by the next call.
    pub fn with_error(self, error: SearchError) -> Self {
        self.queued_errors.lock().unwrap().push(error);
        self
    }

    /// Queue `n` rate-limit errors.
    pub fn with_rate_limits(self, n: usize) -> Self {
        let mut errors = self.queued_errors.lock().unwrap();
        for _ in 0..n {
            errors.push(SearchError::RateLimited);
        }
        drop(errors);
        self
    }

    /// Queries received so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of calls received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    async fn search(&self, query: &str, _max_results: usize) -> SearchResult<Vec<SearchHit>> {
        self.calls.lock().unwrap().push(query.to_string());

        let mut errors = self.queued_errors.lock().unwrap();
        if !errors.is_empty() {
            return Err(errors.remove(0));
        }
        drop(errors);

        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_default())
    }
}
