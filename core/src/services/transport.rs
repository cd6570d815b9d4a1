//! JSON-over-HTTP transport used by the non-mock branches of the façade

use log::{debug, warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::error::{ApiError, ApiResult};
use crate::logging::API_LOG_TARGET;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const JSON: &str = "application/json";

/// Thin wrapper over a reqwest client bound to one base URL
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    trace: bool,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, trace: bool) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: base_url.into(),
            trace,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> ApiResult<Url> {
        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| ApiError::encode(format!("Invalid URL {}{}: {}", self.base_url, path, e)))
    }

    /// `path` with one extra, percent-encoded segment appended
    fn url_with_segment(&self, path: &str, segment: &str) -> ApiResult<Url> {
        let mut url = self.url(path)?;
        url.path_segments_mut()
            .map_err(|_| ApiError::encode(format!("Base URL cannot take path segments: {}", self.base_url)))?
            .push(segment);
        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path)?;
        let response = self.send(self.client.get(url.clone()), Method::GET, &url).await?;
        Self::decode(response).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        let mut url = self.url(path)?;
        url.query_pairs_mut().extend_pairs(query);
        let response = self.send(self.client.get(url.clone()), Method::GET, &url).await?;
        Self::decode(response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        let request = self.client.post(url.clone()).body(Self::encode(body)?);
        let response = self.send(request, Method::POST, &url).await?;
        Self::decode(response).await
    }

    /// POST whose success shape is empty; the body is ignored
    pub async fn post_unit<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ApiResult<()> {
        let url = self.url(path)?;
        let request = self.client.post(url.clone()).body(Self::encode(body)?);
        self.send(request, Method::POST, &url).await?;
        Ok(())
    }

    pub async fn delete_unit(&self, path: &str, segment: &str) -> ApiResult<()> {
        let url = self.url_with_segment(path, segment)?;
        self.send(self.client.delete(url.clone()), Method::DELETE, &url).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder, method: Method, url: &Url) -> ApiResult<Response> {
        if self.trace {
            debug!(target: API_LOG_TARGET, "{} {}", method, url);
        }

        let response = request
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .send()
            .await
            .map_err(|e| ApiError::network(format!("{} {} failed: {}", method, url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::status(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        Ok(response)
    }

    fn encode<B: Serialize + ?Sized>(body: &B) -> ApiResult<Vec<u8>> {
        serde_json::to_vec(body).map_err(|e| ApiError::encode(e.to_string()))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::network(format!("Failed to read response body: {}", e)))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::decode(e.to_string()))
    }
}
