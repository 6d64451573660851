//! HTTP client factory
//!
//! Manufactures pre-configured `RequestBuilder`s that share one transport,
//! one set of default headers and one mock queue, and remembers the most
//! recently created builder for the paginator.

use super::mock::{MockQueue, MockResponse};
use super::request::{ClientContext, RequestBuilder, CONTENT_TYPE_JSON};
use super::telemetry::Telemetry;
use super::transport::{ReqwestTransport, Transport};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::types::{Method, OrderedParams};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Factory for request builders bound to one API
#[derive(Clone)]
pub struct HttpClient {
    context: Arc<ClientContext>,
    default_headers: OrderedParams<String>,
    last_request: Arc<Mutex<Option<RequestBuilder>>>,
}

impl HttpClient {
    /// Create a client using the default reqwest transport
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout(), &config.user_agent)
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client on top of an injected transport
    pub fn with_transport(config: &ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;

        let mut default_headers = OrderedParams::new();
        for (name, value) in &config.default_headers {
            default_headers.set(name.to_ascii_lowercase(), value.clone());
        }

        let context = ClientContext {
            base_url: config.base_url(),
            transport,
            mocks: MockQueue::new(),
            telemetry: config.telemetry.then(Telemetry::new),
        };

        Ok(Self {
            context: Arc::new(context),
            default_headers,
            last_request: Arc::new(Mutex::new(None)),
        })
    }

    /// Create a builder for the given verb (case-insensitive)
    pub fn method(&self, verb: &str) -> Result<RequestBuilder> {
        Ok(self.request(verb.parse()?))
    }

    /// Create a builder for the given method
    ///
    /// Body-carrying verbs start with `Content-Type: application/json`;
    /// callers may override it.
    pub fn request(&self, method: Method) -> RequestBuilder {
        let mut headers = self.default_headers.clone();
        if method.carries_body() {
            headers.set("content-type", CONTENT_TYPE_JSON.to_string());
        }

        let builder = RequestBuilder::new(method, headers, Arc::clone(&self.context));
        *self.lock_last() = Some(builder.clone());
        builder
    }

    pub fn get(&self) -> RequestBuilder {
        self.request(Method::GET)
    }

    pub fn post(&self) -> RequestBuilder {
        self.request(Method::POST)
    }

    pub fn put(&self) -> RequestBuilder {
        self.request(Method::PUT)
    }

    pub fn patch(&self) -> RequestBuilder {
        self.request(Method::PATCH)
    }

    pub fn delete(&self) -> RequestBuilder {
        self.request(Method::DELETE)
    }

    /// The most recently created builder
    pub fn last_request(&self) -> Option<RequestBuilder> {
        self.lock_last().clone()
    }

    /// Queue a scripted response for the next call
    pub fn mock_response(&self, response: impl Into<MockResponse>) {
        self.context.mocks.push(response.into());
    }

    /// Queue several scripted responses, consumed in order
    pub fn mock_responses<I>(&self, responses: I)
    where
        I: IntoIterator,
        I::Item: Into<MockResponse>,
    {
        self.context
            .mocks
            .extend(responses.into_iter().map(Into::into));
    }

    /// The shared mock queue
    pub fn mocks(&self) -> &MockQueue {
        &self.context.mocks
    }

    /// Scheme, host and base path requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.context.base_url
    }

    fn lock_last(&self) -> MutexGuard<'_, Option<RequestBuilder>> {
        self.last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.context.base_url)
            .field("has_telemetry", &self.context.telemetry.is_some())
            .field("queued_mocks", &self.context.mocks.len())
            .finish_non_exhaustive()
    }
}
