//! Request builder
//!
//! A `RequestBuilder` accumulates the shape of one request (path, headers,
//! query and form parameters, files, body), executes it against the client's
//! transport and remembers exactly what was sent and received.
//!
//! Builders are cheap handles: clones share the same pending request, which
//! is how the client's "last request" and the paginator keep working on the
//! very builder the caller configured.

use super::encoding::{build_form, build_query, MultipartBody};
use super::mock::MockQueue;
use super::telemetry::{Telemetry, TELEMETRY_HEADER};
use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::error::{Error, Result};
use crate::options::RequestOptions;
use crate::types::{JsonValue, Method, OrderedParams, ParamValue};
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Content type for JSON bodies
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Content type for URL-encoded form bodies
pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";

/// Context shared by a client and every builder it creates
pub(crate) struct ClientContext {
    /// Scheme, host and base path, without a trailing slash
    pub base_url: String,
    pub transport: Arc<dyn Transport>,
    pub mocks: MockQueue,
    pub telemetry: Option<Telemetry>,
}

/// The not-yet-sent shape of a request
#[derive(Debug, Clone, Default)]
pub struct PendingRequest {
    pub method: Method,
    pub segments: Vec<String>,
    /// Keyed by lower-cased header name
    pub headers: OrderedParams<String>,
    pub params: OrderedParams<ParamValue>,
    pub form_params: OrderedParams<ParamValue>,
    pub files: OrderedParams<PathBuf>,
    pub body: String,
}

impl PendingRequest {
    /// Joined path plus `?query` when any parameter survives filtering
    pub fn url(&self) -> String {
        let path = self.path();
        let query = build_query(&self.params);

        if query.is_empty() {
            path
        } else {
            format!("{path}?{query}")
        }
    }

    /// Joined path without query string
    pub fn path(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.trim_matches('/'))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[derive(Default)]
struct BuilderState {
    pending: PendingRequest,
    last_request: Option<HttpRequest>,
    last_response: Option<HttpResponse>,
}

/// Fluent builder for a single API call
#[derive(Clone)]
pub struct RequestBuilder {
    state: Arc<Mutex<BuilderState>>,
    context: Arc<ClientContext>,
}

impl RequestBuilder {
    pub(crate) fn new(
        method: Method,
        headers: OrderedParams<String>,
        context: Arc<ClientContext>,
    ) -> Self {
        let pending = PendingRequest {
            method,
            headers,
            ..Default::default()
        };

        Self {
            state: Arc::new(Mutex::new(BuilderState {
                pending,
                ..Default::default()
            })),
            context,
        }
    }

    // ========================================================================
    // Shape
    // ========================================================================

    /// Append one path segment
    #[must_use]
    pub fn add_path(self, segment: impl fmt::Display) -> Self {
        self.lock().pending.segments.push(segment.to_string());
        self
    }

    /// Append several path segments
    #[must_use]
    pub fn add_paths<I>(self, segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        {
            let mut state = self.lock();
            state
                .pending
                .segments
                .extend(segments.into_iter().map(|s| s.to_string()));
        }
        self
    }

    /// Set or override a header
    #[must_use]
    pub fn with_header(self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.set_header(name.as_ref(), value);
        self
    }

    /// Set or override several headers
    #[must_use]
    pub fn with_headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.set_header(name.as_ref(), value);
        }
        self
    }

    /// Set one query parameter
    ///
    /// A null or empty value keeps the key out of the query string.
    #[must_use]
    pub fn with_param(self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set_param(key, value);
        self
    }

    /// Set several query parameters, skipping null values
    #[must_use]
    pub fn with_params<I, K, V>(self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParamValue>,
    {
        {
            let mut state = self.lock();
            for (key, value) in params {
                let value = value.into();
                if !value.is_null() {
                    state.pending.params.set(key, value);
                }
            }
        }
        self
    }

    /// Set one form field
    #[must_use]
    pub fn with_form_param(self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.lock().pending.form_params.set(key, value.into());
        self
    }

    /// Set several form fields, skipping null values
    #[must_use]
    pub fn with_form_params<I, K, V>(self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParamValue>,
    {
        {
            let mut state = self.lock();
            for (key, value) in params {
                let value = value.into();
                if !value.is_null() {
                    state.pending.form_params.set(key, value);
                }
            }
        }
        self
    }

    /// Attach a file; the body becomes multipart
    #[must_use]
    pub fn add_file(self, field: impl Into<String>, path: impl AsRef<Path>) -> Self {
        self.lock()
            .pending
            .files
            .set(field, path.as_ref().to_path_buf());
        self
    }

    /// Set a JSON body
    #[must_use]
    pub fn with_body(self, value: JsonValue) -> Self {
        self.lock().pending.body = value.to_string();
        self
    }

    /// Set a body verbatim, without JSON encoding
    #[must_use]
    pub fn with_raw_body(self, body: impl Into<String>) -> Self {
        self.lock().pending.body = body.into();
        self
    }

    /// Apply field filtering and pagination options as query parameters
    ///
    /// Unset options leave parameters already on the builder untouched.
    #[must_use]
    pub fn with_options(self, options: &RequestOptions) -> Self {
        {
            let mut state = self.lock();
            for (key, value) in options.to_params() {
                if !value.is_null() {
                    state.pending.params.set(key, value);
                }
            }
        }
        self
    }

    pub(crate) fn set_param(&self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.lock().pending.params.set(key, value.into());
    }

    fn set_header(&self, name: &str, value: impl Into<String>) {
        self.lock()
            .pending
            .headers
            .set(name.to_ascii_lowercase(), value.into());
    }

    // ========================================================================
    // Inspection
    // ========================================================================

    /// Relative URL: joined path plus query string
    pub fn get_url(&self) -> String {
        self.lock().pending.url()
    }

    /// Joined path without query string
    pub fn get_path(&self) -> String {
        self.lock().pending.path()
    }

    pub fn method(&self) -> Method {
        self.lock().pending.method
    }

    /// Snapshot of the pending request
    pub fn pending(&self) -> PendingRequest {
        self.lock().pending.clone()
    }

    /// Current value of a query parameter
    pub fn get_param(&self, key: &str) -> Option<ParamValue> {
        self.lock().pending.params.get(key).cloned()
    }

    /// Current value of a header override
    pub fn get_header(&self, name: &str) -> Option<String> {
        self.lock()
            .pending
            .headers
            .get(&name.to_ascii_lowercase())
            .cloned()
    }

    pub fn get_body(&self) -> String {
        self.lock().pending.body.clone()
    }

    /// The request sent by the most recent `call()`
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.lock().last_request.clone()
    }

    /// The response received by the most recent `call()`
    pub fn last_response(&self) -> Option<HttpResponse> {
        self.lock().last_response.clone()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Execute the request
    ///
    /// A queued mock response is consumed instead of using the transport.
    /// Transport failures surface as `Error::NetworkFailure` and are never
    /// retried.
    pub async fn call(&self) -> Result<HttpResponse> {
        let pending = self.pending();
        let request = self.build_request(&pending).await?;

        {
            let mut state = self.lock();
            state.last_request = Some(request.clone());
            state.last_response = None;
        }

        if let Some(mock) = self.context.mocks.pop() {
            debug!("Mocked {} {}", request.method, request.url);
            self.lock().last_response = Some(mock.response.clone());

            if let Some(callback) = &mock.callback {
                callback(&request, &mock.response);
            }
            if let Some(err) = mock.error {
                return Err(Error::network(err.message));
            }
            return Ok(mock.response);
        }

        debug!("Dispatching {} {}", request.method, request.url);
        let response = self
            .context
            .transport
            .send(request)
            .await
            .map_err(|e| Error::network(e.message))?;

        self.lock().last_response = Some(response.clone());
        Ok(response)
    }

    async fn build_request(&self, pending: &PendingRequest) -> Result<HttpRequest> {
        let mut request = HttpRequest::new(pending.method, self.resolve_url(&pending.url()));

        for (name, value) in pending.headers.iter() {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::invalid_header(name, e.to_string()))?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| Error::invalid_header(name, e.to_string()))?;
            request.headers.insert(header_name, header_value);
        }

        if !pending.files.is_empty() {
            let mut multipart = MultipartBody::new();
            for (key, value) in pending.form_params.iter() {
                if let Some(v) = value.render() {
                    multipart.add_field(key, &v);
                }
            }
            for (field, path) in pending.files.iter() {
                let contents = read_upload(path).await?;
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| field.to_string());
                multipart.add_file(field, &filename, &contents);
            }
            set_content_type(&mut request.headers, &multipart.content_type())?;
            request.body = multipart.finish();
        } else if !pending.form_params.is_empty() {
            set_content_type(&mut request.headers, CONTENT_TYPE_FORM)?;
            request.body = Bytes::from(build_form(&pending.form_params));
        } else {
            request.body = Bytes::from(pending.body.clone());
        }

        if let Some(telemetry) = &self.context.telemetry {
            let value = HeaderValue::from_str(&telemetry.header_value())
                .map_err(|e| Error::invalid_header(TELEMETRY_HEADER, e.to_string()))?;
            request.headers.insert(TELEMETRY_HEADER, value);
        }

        Ok(request)
    }

    fn resolve_url(&self, relative: &str) -> String {
        let base = self.context.base_url.trim_end_matches('/');
        if relative.is_empty() {
            base.to_string()
        } else if relative.starts_with('?') {
            format!("{base}{relative}")
        } else {
            format!("{base}/{relative}")
        }
    }

    fn lock(&self) -> MutexGuard<'_, BuilderState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for RequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("RequestBuilder")
            .field("method", &state.pending.method)
            .field("url", &state.pending.url())
            .field("base_url", &self.context.base_url)
            .finish_non_exhaustive()
    }
}

fn set_content_type(headers: &mut HeaderMap, value: &str) -> Result<()> {
    let value =
        HeaderValue::from_str(value).map_err(|e| Error::invalid_header("content-type", e.to_string()))?;
    headers.insert(CONTENT_TYPE, value);
    Ok(())
}

async fn read_upload(path: &Path) -> Result<Vec<u8>> {
    match tokio::fs::read(path).await {
        Ok(contents) => Ok(contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::FileNotFound {
            path: path.display().to_string(),
        }),
        Err(e) => Err(Error::Io(e)),
    }
}
