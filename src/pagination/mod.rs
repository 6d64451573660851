//! Pagination module
//!
//! Supports: Offset (`page`/`per_page` with totals), Checkpoint (`from`/`take`)
//!
//! # Overview
//!
//! A `ResponsePaginator` wraps the last request a client executed and turns
//! the list it returned into a lazily fetched sequence. The mode is decided
//! once, from the seed request: checkpoint parameters select checkpoint mode
//! (allow-listed endpoints only), anything else is offset mode.

mod paginator;
mod types;

pub use paginator::ResponsePaginator;
pub use types::{supports_checkpoint, PaginationMode, PaginationState, CHECKPOINT_PARAMS};
