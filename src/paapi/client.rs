//! HTTP client for the PA-API 5.0 JSON endpoints.

use crate::config::Config;
use crate::paapi::error::{ApiError, ApiException};
use crate::paapi::models::{
    ErrorData, ErrorResponse, GetItemsRequest, GetItemsResponse, SearchItemsRequest,
    SearchItemsResponse,
};
use crate::paapi::signing::{sign_post, SigningParams};
use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use wreq::Client;

const CONTENT_ENCODING: &str = "amz-1.0";
const CONTENT_TYPE: &str = "application/json; charset=utf-8";
const TARGET_PREFIX: &str = "com.amazon.paapi5.v1.ProductAdvertisingAPIv1";

/// Trait for the PA-API operations - enables mocking for tests.
#[async_trait]
pub trait ProductAdvertisingApi: Send + Sync {
    /// Calls `SearchItems`.
    async fn search_items(
        &self,
        request: SearchItemsRequest,
    ) -> Result<SearchItemsResponse, ApiError>;

    /// Calls `GetItems`.
    async fn get_items(&self, request: GetItemsRequest) -> Result<GetItemsResponse, ApiError>;
}

#[async_trait]
impl<T: ProductAdvertisingApi + ?Sized> ProductAdvertisingApi for Arc<T> {
    async fn search_items(
        &self,
        request: SearchItemsRequest,
    ) -> Result<SearchItemsResponse, ApiError> {
        (**self).search_items(request).await
    }

    async fn get_items(&self, request: GetItemsRequest) -> Result<GetItemsResponse, ApiError> {
        (**self).get_items(request).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    SearchItems,
    GetItems,
}

impl Operation {
    fn name(&self) -> &'static str {
        match self {
            Operation::SearchItems => "SearchItems",
            Operation::GetItems => "GetItems",
        }
    }

    fn path(&self) -> &'static str {
        match self {
            Operation::SearchItems => "/paapi5/searchitems",
            Operation::GetItems => "/paapi5/getitems",
        }
    }

    fn target(&self) -> String {
        format!("{}.{}", TARGET_PREFIX, self.name())
    }
}

/// Signed PA-API client over HTTPS.
pub struct DefaultApi {
    client: Client,
    signing: SigningParams,
    host: String,
    base_url: Option<String>,
}

impl DefaultApi {
    /// Creates a client for the host and credentials in `config`.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        Self::with_base_url(config, None)
    }

    /// Creates a client with an optional custom base URL (for testing).
    pub fn with_base_url(config: &Config, base_url: Option<String>) -> Result<Self, ApiError> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url)
                .map_err(|e| ApiError::Transport(format!("Failed to configure proxy: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            signing: SigningParams::new(&config.access_key, &config.secret_key, &config.region),
            host: config.host.clone(),
            base_url,
        })
    }

    /// Returns the base URL (custom for testing, or host-based for production).
    fn base_url(&self) -> String {
        self.base_url
            .clone()
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("https://{}", self.host))
    }

    /// Host header value the request will carry, which is what gets signed.
    fn authority(&self) -> String {
        let base = self.base_url();
        let without_scheme = base.split_once("://").map(|(_, rest)| rest).unwrap_or(&base);
        without_scheme.split('/').next().unwrap_or(without_scheme).to_string()
    }

    async fn call<Req, Resp>(&self, operation: Operation, request: &Req) -> Result<Resp, ApiError>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url(), operation.path());
        let target = operation.target();
        let body = serde_json::to_vec(request).map_err(ApiError::Encode)?;

        let signed = sign_post(
            operation.path(),
            &[("content-encoding", CONTENT_ENCODING), ("x-amz-target", target.as_str())],
            &body,
            &self.signing,
            &self.authority(),
            &Utc::now(),
        );

        debug!("POST {} ({})", url, operation.name());

        let response = self
            .client
            .post(url.as_str())
            .header("content-encoding", CONTENT_ENCODING)
            .header("content-type", CONTENT_TYPE)
            .header("x-amz-date", signed.amz_date.as_str())
            .header("x-amz-target", target.as_str())
            .header("authorization", signed.authorization.as_str())
            .body(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        debug!("Response status: {}", status);

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let decoded = serde_json::from_str::<ErrorResponse>(&text).ok();
            return Err(ApiException {
                status: status.as_u16(),
                message: format!("[{}] Error connecting to the API ({})", status.as_u16(), url),
                body: text,
                response: decoded,
            }
            .into());
        }

        serde_json::from_str(&text)
            .map_err(|source| ApiError::Decode { operation: operation.name(), source })
    }
}

fn log_partial_errors(operation: Operation, errors: Option<&Vec<ErrorData>>) {
    for error in errors.into_iter().flatten() {
        warn!(
            "{} reported {}: {}",
            operation.name(),
            error.code.as_deref().unwrap_or("UnknownError"),
            error.message.as_deref().unwrap_or("")
        );
    }
}

#[async_trait]
impl ProductAdvertisingApi for DefaultApi {
    async fn search_items(
        &self,
        request: SearchItemsRequest,
    ) -> Result<SearchItemsResponse, ApiError> {
        info!(
            "Searching {} for: {}",
            request.search_index.as_deref().unwrap_or("All"),
            request.keywords.as_deref().unwrap_or("")
        );
        let response: SearchItemsResponse = self.call(Operation::SearchItems, &request).await?;
        log_partial_errors(Operation::SearchItems, response.errors.as_ref());
        Ok(response)
    }

    async fn get_items(&self, request: GetItemsRequest) -> Result<GetItemsResponse, ApiError> {
        info!("Fetching items: {}", request.item_ids.as_deref().unwrap_or_default().join(","));
        let response: GetItemsResponse = self.call(Operation::GetItems, &request).await?;
        log_partial_errors(Operation::GetItems, response.errors.as_ref());
        Ok(response)
    }
}
