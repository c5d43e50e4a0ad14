use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use url::Url;

use crate::errors::ClientError;

/// Owned description of a request, so it can be rewritten and sent again.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl AsRef<str>) -> Self {
        Self {
            method,
            path: path.as_ref().trim_start_matches('/').to_owned(),
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl AsRef<str>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl AsRef<str>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl AsRef<str>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn json(mut self, body: &impl Serialize) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Whether this request goes to `endpoint`, ignoring leading and trailing slashes.
    pub fn targets(&self, endpoint: &str) -> bool {
        self.path.trim_matches('/') == endpoint.trim_matches('/')
    }

    pub fn has_authorization(&self) -> bool {
        self.headers.contains_key(AUTHORIZATION)
    }

    /// Set (or replace) the bearer authorization header.
    pub fn set_bearer(&mut self, token: &str) -> Result<(), ClientError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        value.set_sensitive(true);
        self.headers.insert(AUTHORIZATION, value);
        Ok(())
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Rewrites every outgoing request. Cannot fail; an interceptor that has
/// nothing to add returns the request unchanged.
#[async_trait::async_trait]
pub trait RequestInterceptor: Send + Sync {
    async fn on_request(&self, request: ApiRequest) -> ApiRequest;
}

/// Sees the outcome of every request sent through [`HttpClient::send`] and may
/// replace it, for example by re-issuing the request with `client.execute`.
#[async_trait::async_trait]
pub trait ResponseInterceptor: Send + Sync {
    async fn on_response(
        &self,
        client: &HttpClient,
        request: &ApiRequest,
        outcome: Result<ApiResponse, ClientError>,
    ) -> Result<ApiResponse, ClientError>;
}

pub struct HttpClientBuilder {
    base_url: Url,
    default_headers: HeaderMap,
    request_interceptors: Vec<Arc<dyn RequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl HttpClientBuilder {
    pub fn default_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    pub fn request_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.request_interceptors.push(interceptor);
        self
    }

    pub fn response_interceptor(mut self, interceptor: Arc<dyn ResponseInterceptor>) -> Self {
        self.response_interceptors.push(interceptor);
        self
    }

    pub fn build(self) -> Result<HttpClient, ClientError> {
        let http = reqwest::Client::builder().build()?;
        Ok(HttpClient {
            base_url: self.base_url,
            http,
            default_headers: Arc::new(RwLock::new(self.default_headers)),
            request_interceptors: Arc::new(self.request_interceptors),
            response_interceptors: Arc::new(self.response_interceptors),
        })
    }
}

/// Cheap to clone; clones share default headers and interceptors.
#[derive(Clone)]
pub struct HttpClient {
    base_url: Url,
    http: reqwest::Client,
    default_headers: Arc<RwLock<HeaderMap>>,
    request_interceptors: Arc<Vec<Arc<dyn RequestInterceptor>>>,
    response_interceptors: Arc<Vec<Arc<dyn ResponseInterceptor>>>,
}

impl HttpClient {
    /// A builder preloaded with the JSON `Content-Type` and `Accept` headers.
    pub fn builder(base_url: Url) -> HttpClientBuilder {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        HttpClientBuilder {
            base_url,
            default_headers,
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Set the default `Authorization: Bearer` header.
    pub async fn set_default_authorization(&self, token: &str) -> Result<(), ClientError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        value.set_sensitive(true);
        self.default_headers.write().await.insert(AUTHORIZATION, value);
        Ok(())
    }

    pub async fn clear_default_authorization(&self) {
        self.default_headers.write().await.remove(AUTHORIZATION);
    }

    pub async fn default_headers(&self) -> HeaderMap {
        self.default_headers.read().await.clone()
    }

    /// Send through the full pipeline. Response interceptors run in
    /// registration order and may replace the outcome.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let request = self.prepare(request).await;
        let mut outcome = self.dispatch(&request).await;
        for interceptor in self.response_interceptors.iter() {
            outcome = interceptor.on_response(self, &request, outcome).await;
        }
        outcome
    }

    /// Like [`send`](Self::send) without the response interceptors. Used to
    /// re-issue a request once.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let request = self.prepare(request).await;
        self.dispatch(&request).await
    }

    pub async fn json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        self.send(request).await?.json()
    }

    pub(crate) async fn prepare(&self, mut request: ApiRequest) -> ApiRequest {
        {
            let defaults = self.default_headers.read().await;
            for (name, value) in defaults.iter() {
                if !request.headers.contains_key(name) {
                    request.headers.insert(name.clone(), value.clone());
                }
            }
        }
        for interceptor in self.request_interceptors.iter() {
            request = interceptor.on_request(request).await;
        }
        request
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = self.base_url.join(&request.path)?;
        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .headers(request.headers.clone());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        log::debug!("{} {}", request.method, request.path);
        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        if !status.is_success() {
            log::debug!("{} {} failed with {}", request.method, request.path, status);
            return Err(ClientError::Http { status, body });
        }

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}
