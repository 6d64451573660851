//! HTTP request construction and execution
//!
//! Provides the request builder, the client factory that manufactures
//! builders, and the pieces they share.
//!
//! # Features
//!
//! - **Fluent Builders**: path, headers, query/form parameters, files, body
//! - **Injected Transport**: any `Transport` implementation, reqwest by default
//! - **Scripted Responses**: FIFO mock queue shared by all builders of a client
//! - **Request Recording**: every builder keeps the last request and response

mod client;
mod encoding;
mod mock;
mod request;
pub mod response;
mod telemetry;
mod transport;

pub use client::HttpClient;
pub use encoding::{build_form, build_query, encode_component, MultipartBody};
pub use mock::{MockCallback, MockQueue, MockResponse};
pub use request::{PendingRequest, RequestBuilder, CONTENT_TYPE_FORM, CONTENT_TYPE_JSON};
pub use telemetry::{Telemetry, TELEMETRY_HEADER};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};
