use crate::domain::model::RawDocument;
use crate::domain::ports::HttpFetcher;
use crate::utils::error::NetworkError;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://restcountries.com/v3.1/all?fields=cca2,name,region,subregion,capital,population,area,idd,currencies,languages";

/// REST Countries client. One GET per `fetch`, no retries.
#[derive(Debug, Clone)]
pub struct RestCountriesClient {
    endpoint: String,
    timeout: Duration,
    headers: HashMap<String, String>,
    client: Client,
}

impl RestCountriesClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self::with_headers(endpoint, timeout, HashMap::new())
    }

    pub fn with_headers(
        endpoint: impl Into<String>,
        timeout: Duration,
        headers: HashMap<String, String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
            headers,
            client: Client::new(),
        }
    }

    fn transport_error(&self, source: reqwest::Error) -> NetworkError {
        if source.is_timeout() {
            NetworkError::Timeout {
                url: self.endpoint.clone(),
            }
        } else {
            NetworkError::Transport {
                url: self.endpoint.clone(),
                source,
            }
        }
    }
}

#[async_trait]
impl HttpFetcher for RestCountriesClient {
    async fn fetch(&self) -> Result<RawDocument, NetworkError> {
        let mut request = self
            .client
            .get(&self.endpoint)
            .timeout(self.timeout)
            .header(reqwest::header::ACCEPT, "application/json");

        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(NetworkError::Status {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.transport_error(e))?;
        tracing::debug!("Received {} bytes", body.len());

        serde_json::from_slice(&body).map_err(|e| NetworkError::InvalidBody {
            url: self.endpoint.clone(),
            message: e.to_string(),
        })
    }
}
