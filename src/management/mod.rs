//! Management API endpoints
//!
//! Thin resource wrappers over `HttpClient`: each method builds one request
//! and returns the raw response. List endpoints can be walked in full with
//! `Management::paginator()` right after the call.
//!
//! ```rust,ignore
//! let api = Management::new(&ClientConfig::builder("tenant.example.com").bearer_token(token).build())?;
//! api.logs().get_all(None, Some(&RequestOptions::new().with_checkpoint(CheckpointPaginatedRequest::new(100)))).await?;
//! let mut logs = api.paginator()?;
//! while let Some(entry) = logs.next_item().await {
//!     println!("{entry}");
//! }
//! ```

mod logs;
mod organizations;
mod roles;
mod users;

pub use logs::Logs;
pub use organizations::Organizations;
pub use roles::Roles;
pub use users::Users;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestBuilder, Transport};
use crate::options::RequestOptions;
use crate::pagination::ResponsePaginator;
use crate::types::{JsonObject, ParamValue};
use std::sync::Arc;

/// Entry point for the management endpoints
#[derive(Debug, Clone)]
pub struct Management {
    client: HttpClient,
}

impl Management {
    /// Create a client using the default transport
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            client: HttpClient::new(config)?,
        })
    }

    /// Create a client on top of an injected transport
    pub fn with_transport(config: &ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self {
            client: HttpClient::with_transport(config, transport)?,
        })
    }

    /// Wrap an existing client
    pub fn from_client(client: HttpClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Paginate the result of the most recent list call
    pub fn paginator(&self) -> Result<ResponsePaginator> {
        ResponsePaginator::new(&self.client)
    }

    pub fn users(&self) -> Users<'_> {
        Users::new(&self.client)
    }

    pub fn logs(&self) -> Logs<'_> {
        Logs::new(&self.client)
    }

    pub fn organizations(&self) -> Organizations<'_> {
        Organizations::new(&self.client)
    }

    pub fn roles(&self) -> Roles<'_> {
        Roles::new(&self.client)
    }
}

/// Reject empty or blank required string arguments
pub(crate) fn require<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_argument(name, "cannot be empty"));
    }
    Ok(trimmed)
}

/// Apply free-form filters and options to a list request
pub(crate) fn list_request(
    request: RequestBuilder,
    params: Option<&JsonObject>,
    options: Option<&RequestOptions>,
) -> RequestBuilder {
    let mut request = request;
    if let Some(params) = params {
        request = request.with_params(params.iter().map(|(k, v)| (k.clone(), ParamValue::from(v))));
    }
    if let Some(options) = options {
        request = request.with_options(options);
    }
    request
}

#[cfg(test)]
mod tests;
