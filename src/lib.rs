// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # idm-client
//!
//! Client core for an identity-management REST API: a fluent request
//! builder, a response accessor and a lazy paginator that walks offset
//! and checkpoint paged list endpoints one item at a time.
//!
//! ## Features
//!
//! - **Fluent Requests**: Path segments, query/form params, JSON, raw and multipart bodies
//! - **Mockable**: Queue canned responses that bypass the network
//! - **Lazy Pagination**: Offset (`page`/`per_page`) and checkpoint (`from`/`take`) modes
//! - **Telemetry**: Optional base64-encoded client identification header
//! - **Management Endpoints**: Users, logs, organizations and roles
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use idm_client::{ClientConfig, HttpClient, ResponsePaginator, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ClientConfig::builder("tenant.example.com")
//!         .bearer_token("eyJ...")
//!         .build();
//!     let client = HttpClient::new(&config)?;
//!
//!     client
//!         .get()
//!         .add_path("users")
//!         .with_param("page", 0)
//!         .with_param("per_page", 50)
//!         .with_param("include_totals", true)
//!         .call()
//!         .await?;
//!
//!     let mut users = ResponsePaginator::new(&client)?;
//!     while let Some(user) = users.next_item().await {
//!         println!("{user}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │              Management (users, logs, orgs, roles)           │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴──────┬──────────────┬──────────┐
//! │  HttpClient  │   RequestBuilder    │  Paginator   │ Response │
//! ├──────────────┼─────────────────────┼──────────────┼──────────┤
//! │ Base URL     │ Path / params       │ Offset       │ Status   │
//! │ Headers      │ JSON / form / files │ Checkpoint   │ Headers  │
//! │ Mock queue   │ last request/resp   │ Count        │ Content  │
//! └──────────────┴─────────────────────┴──────────────┴──────────┘
//!                               │
//!                      Transport (reqwest)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// HTTP client, request builder and transport
pub mod http;

/// Per-call request options (field filters, paging)
pub mod options;

/// Lazy response pagination
pub mod pagination;

/// Management API endpoints
pub mod management;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{ClientConfig, ClientConfigBuilder};
pub use http::{HttpClient, HttpRequest, HttpResponse, MockResponse, RequestBuilder, Transport};
pub use management::Management;
pub use options::{CheckpointPaginatedRequest, FilteredRequest, PaginatedRequest, RequestOptions};
pub use pagination::{PaginationMode, ResponsePaginator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
