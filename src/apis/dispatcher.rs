/// Request dispatcher
///
/// Executes one logical request: serves fresh cache hits without I/O,
/// otherwise calls the transport under a timeout, unwraps the envelope and
/// populates the cache on success. Two concurrent reads of the same key both
/// reach the transport; whichever resolves last owns the cache entry.
use super::client::{HttpRequest, Transport};
use super::envelope::ApiEnvelope;
use super::request::{HttpMethod, QueryParams, RequestDescriptor};
use crate::cache::CacheStore;
use crate::config::{ApiConfig, RetryConfig};
use crate::errors::{RequestError, RequestResult, TransportError, ValidationError};
use crate::logger::{self, LogTag};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Invoked for every failed request before the error is returned
pub type ErrorCallback = Arc<dyn Fn(&RequestDescriptor, &RequestError) + Send + Sync>;

#[derive(Clone)]
pub struct RequestDispatcher {
    transport: Arc<dyn Transport>,
    cache: Arc<CacheStore<Value>>,
    base_url: String,
    timeout: Duration,
    retry: RetryConfig,
    on_error: Option<ErrorCallback>,
}

impl RequestDispatcher {
    pub fn new(
        transport: Arc<dyn Transport>,
        cache: Arc<CacheStore<Value>>,
        api: &ApiConfig,
        retry: &RetryConfig,
    ) -> Self {
        Self {
            transport,
            cache,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            timeout: api.timeout(),
            retry: retry.clone(),
            on_error: None,
        }
    }

    pub fn with_error_callback(mut self, callback: ErrorCallback) -> Self {
        self.on_error = Some(callback);
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn cache(&self) -> &Arc<CacheStore<Value>> {
        &self.cache
    }

    /// Drop cached reads after a mutation; `None` clears everything
    pub fn invalidate(&self, prefix: Option<&str>) -> usize {
        let removed = self.cache.invalidate(prefix);
        logger::debug(
            LogTag::Cache,
            &format!(
                "Invalidated {} entries (prefix: {})",
                removed,
                prefix.unwrap_or("*")
            ),
        );
        removed
    }

    /// Execute a request and return the raw `data` payload
    pub async fn dispatch(&self, request: &RequestDescriptor) -> RequestResult<Value> {
        let cache_key = request.caches().then(|| request.cache_key());

        if let Some(key) = &cache_key {
            if let Some(cached) = self.cache.get(key) {
                logger::debug(LogTag::Request, &format!("Cache hit: {}", key));
                return Ok(cached);
            }
        }

        match self.execute_with_retry(request).await {
            Ok(data) => {
                if let Some(key) = cache_key {
                    self.cache.set(key, data.clone());
                }
                Ok(data)
            }
            Err(error) => {
                logger::warning(
                    LogTag::Request,
                    &format!("{} {} failed: {}", request.method, request.path, error),
                );
                if let Some(callback) = &self.on_error {
                    callback(request, &error);
                }
                Err(error)
            }
        }
    }

    /// Execute a request and decode `data` into `T`
    pub async fn request<T: DeserializeOwned>(&self, request: &RequestDescriptor) -> RequestResult<T> {
        let data = self.dispatch(request).await?;
        serde_json::from_value(data).map_err(|e| {
            TransportError::Decode {
                endpoint: request.path.clone(),
                message: e.to_string(),
            }
            .into()
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str, params: QueryParams) -> RequestResult<T> {
        self.request(&RequestDescriptor::get(path).with_params(params))
            .await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> RequestResult<T> {
        self.request(&RequestDescriptor::post(path, encode_body(path, body)?))
            .await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> RequestResult<T> {
        self.request(&RequestDescriptor::put(path, encode_body(path, body)?))
            .await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> RequestResult<T> {
        self.request(&RequestDescriptor::patch(path, encode_body(path, body)?))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> RequestResult<T> {
        self.request(&RequestDescriptor::delete(path)).await
    }

    /// GET reads get `retry.count` extra attempts on retryable transport
    /// failures; mutations run exactly once
    async fn execute_with_retry(&self, request: &RequestDescriptor) -> RequestResult<Value> {
        let max_attempts = if request.method == HttpMethod::Get {
            1 + self.retry.count
        } else {
            1
        };

        let mut attempt = 1;
        loop {
            match self.execute_once(request).await {
                Err(RequestError::Transport(error))
                    if error.is_retryable() && attempt < max_attempts =>
                {
                    logger::debug(
                        LogTag::Request,
                        &format!(
                            "Retrying {} {} after attempt {}: {}",
                            request.method, request.path, attempt, error
                        ),
                    );
                    attempt += 1;
                    tokio::time::sleep(Duration::from_millis(self.retry.delay_ms)).await;
                }
                result => return result,
            }
        }
    }

    async fn execute_once(&self, request: &RequestDescriptor) -> RequestResult<Value> {
        let http_request = HttpRequest {
            method: request.method,
            url: format!("{}{}", self.base_url, request.path_with_query()),
            body: request.body.clone(),
        };

        logger::debug(
            LogTag::Request,
            &format!("{} {}", http_request.method, http_request.url),
        );

        let response = match tokio::time::timeout(self.timeout, self.transport.send(http_request)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(TransportError::Timeout {
                    endpoint: request.path.clone(),
                    timeout_ms: self.timeout.as_millis() as u64,
                }
                .into())
            }
        };

        if !response.is_success() {
            let body = (!response.body.is_empty()).then(|| response.body.clone());
            return Err(TransportError::HttpStatus {
                endpoint: request.path.clone(),
                status: response.status,
                body,
            }
            .into());
        }

        let envelope: ApiEnvelope<Value> =
            serde_json::from_str(&response.body).map_err(|e| TransportError::Decode {
                endpoint: request.path.clone(),
                message: e.to_string(),
            })?;

        Ok(envelope.into_result()?.unwrap_or(Value::Null))
    }
}

/// Bodies that cannot be expressed as JSON never leave the client
fn encode_body<B: Serialize>(path: &str, body: &B) -> RequestResult<Value> {
    serde_json::to_value(body).map_err(|e| {
        ValidationError::InvalidField {
            field: "body".to_string(),
            reason: format!("request body for {} is not valid JSON: {}", path, e),
        }
        .into()
    })
}
