//! Cookie-session client for the dog API.

use super::types::*;
use super::{DogApi, BREEDS_PATH, DOGS_PATH, LOGIN_PATH, PAGE_SIZE, SEARCH_PATH};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::config::ApiConfig;
use shared::Dog;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Authenticated session against the dog API
///
/// The access token lives in the client's cookie store; it is set by the
/// login response and sent back on every later request. There is no renewal:
/// once the token expires every call fails.
pub struct Session {
    /// HTTP client with cookie store
    client: Client,
    /// Base URL of the API
    base_url: String,
    /// When the login succeeded
    established_at: DateTime<Utc>,
}

impl Session {
    /// Log in and return the resulting session
    ///
    /// Any 2xx response counts as success. No retry is attempted.
    pub async fn login(config: &ApiConfig) -> Result<Self> {
        let client = build_client(config)?;
        let base_url = config.base_url.trim_end_matches('/').to_string();
        let url = format!("{}{}", base_url, LOGIN_PATH);

        info!(url = %url, "Logging in");

        let body = LoginRequest {
            name: &config.login_name,
            email: &config.login_email,
        };

        let response = client
            .post(&url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("POST {} failed", LOGIN_PATH))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Login rejected");
            return Err(anyhow!("POST {} {}: {}", LOGIN_PATH, status, error_text));
        }

        info!("Session established");

        Ok(Self {
            client,
            base_url,
            established_at: Utc::now(),
        })
    }

    /// Time elapsed since login
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.established_at
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode a 2xx JSON body
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, label: &str) -> Result<T> {
        let response = request
            .send()
            .await
            .with_context(|| format!("{} failed", label))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(request = label, status = %status, error = %error_text, "Request failed");
            return Err(anyhow!("{} {}: {}", label, status, error_text));
        }

        let data = response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to decode response of {}", label))?;

        debug!(request = label, "Request successful");
        Ok(data)
    }
}

#[async_trait]
impl DogApi for Session {
    async fn list_breeds(&self) -> Result<Vec<String>> {
        info!("Fetching breeds");
        let request = self.client.get(self.url(BREEDS_PATH));
        self.send(request, "GET /dogs/breeds").await
    }

    async fn search_ids(&self, breed: &str, from: usize) -> Result<Vec<String>> {
        debug!(breed = breed, from = from, "Fetching id page");

        let request = self.client.get(self.url(SEARCH_PATH)).query(&[
            ("breeds", breed.to_string()),
            ("from", from.to_string()),
            ("size", PAGE_SIZE.to_string()),
        ]);

        let response: SearchResponse = self.send(request, "GET /dogs/search").await?;
        Ok(response.result_ids)
    }

    async fn fetch_dogs(&self, ids: &[String]) -> Result<Vec<Dog>> {
        debug!(count = ids.len(), "Hydrating dogs");
        let request = self.client.post(self.url(DOGS_PATH)).json(ids);
        self.send(request, "POST /dogs").await
    }

    fn session_age(&self) -> Option<chrono::Duration> {
        Some(self.age())
    }
}

/// Build the cookie-bearing HTTP client shared by every request of a session
fn build_client(config: &ApiConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("credentials"),
        HeaderValue::from_static("include"),
    );

    let mut builder = Client::builder()
        .cookie_store(true)
        .default_headers(headers)
        .user_agent(concat!("dog-populator/", env!("CARGO_PKG_VERSION")));

    if let Some(seconds) = config.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(seconds));
    }

    builder.build().context("Failed to create HTTP client")
}
