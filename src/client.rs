use std::env;
use std::time::Duration;

use reqwest::RequestBuilder;
use url::Url;

use crate::errors::ApiClientError;
use crate::models::{CitiesResponse, HealthResponse, WeatherForecast};
use crate::response::handle_response;

const BASE_URL_ENV: &str = "WEATHER_API_BASE_URL";
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

pub struct ApiClient {
    base_url: Url,
    http_client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiClientError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(ApiClientError::HttpClientBuildFailed)?;

        let base_url = Url::parse(base_url)?;

        Ok(ApiClient {
            base_url,
            http_client,
        })
    }

    /// Builds a client from the `WEATHER_API_BASE_URL` environment variable,
    /// falling back to the local development server.
    pub fn from_env() -> Result<Self, ApiClientError> {
        let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    pub async fn health(&self) -> Result<HealthResponse, ApiClientError> {
        self.send_request(self.get("/health")?).await
    }

    pub async fn cities(&self) -> Result<CitiesResponse, ApiClientError> {
        self.send_request(self.get("/api/cities")?).await
    }

    pub async fn weather(&self, city: &str) -> Result<WeatherForecast, ApiClientError> {
        let builder = self.get("/api/weather")?.query(&[("city", city)]);
        self.send_request(builder).await
    }

    fn get(&self, endpoint: &str) -> Result<RequestBuilder, ApiClientError> {
        let url = self.build_url(endpoint)?;
        Ok(self.http_client.get(url))
    }

    fn build_url(&self, endpoint: &str) -> Result<Url, ApiClientError> {
        self.base_url
            .join(endpoint)
            .map_err(ApiClientError::BaseUrlInvalid)
    }

    async fn send_request<T: serde::de::DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiClientError> {
        let response = match builder.send().await {
            Ok(res) => res,
            Err(e) => {
                tracing::error!("Failed to send request: {}", e);
                // More specific error for network/request phase issues
                if e.is_connect() || e.is_timeout() {
                    return Err(ApiClientError::NetworkIssue(e));
                }
                return Err(ApiClientError::RequestFailed(e));
            }
        };

        handle_response(response).await
    }
}
