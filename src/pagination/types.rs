//! Pagination types
//!
//! Modes, per-query state and the table of endpoints that accept
//! checkpoint (`from`/`take`) pagination.

use crate::types::JsonValue;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Query parameters that mark a checkpoint-paginated request
pub const CHECKPOINT_PARAMS: [&str; 2] = ["from", "take"];

/// How further pages are requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode {
    /// `page=N` against a reported `start`/`limit`/`total`
    Offset,
    /// `from=<cursor>` until the API stops returning `next`
    Checkpoint,
}

/// One entry in the checkpoint allow-list
#[derive(Debug)]
enum EndpointPattern {
    Exact(&'static str),
    Pattern(Regex),
}

impl EndpointPattern {
    fn matches(&self, path: &str) -> bool {
        match self {
            EndpointPattern::Exact(expected) => *expected == path,
            EndpointPattern::Pattern(re) => re.is_match(path),
        }
    }
}

/// Endpoints known to support checkpoint pagination
static CHECKPOINT_ENDPOINTS: LazyLock<Vec<EndpointPattern>> = LazyLock::new(|| {
    vec![
        EndpointPattern::Exact("logs"),
        EndpointPattern::Exact("organizations"),
        EndpointPattern::Pattern(Regex::new(r"^organizations/[^/]+/members$").unwrap()),
        EndpointPattern::Pattern(Regex::new(r"^roles/[^/]+/users$").unwrap()),
        EndpointPattern::Pattern(Regex::new(r"^users/[^/]+/logs$").unwrap()),
    ]
});

/// Check whether an endpoint path accepts checkpoint pagination
pub fn supports_checkpoint(path: &str) -> bool {
    let path = path.trim_matches('/');
    CHECKPOINT_ENDPOINTS.iter().any(|p| p.matches(path))
}

/// Cursor and cache for one logical paginated query
#[derive(Debug, Clone)]
pub struct PaginationState {
    /// Fixed when the paginator is seeded
    pub mode: PaginationMode,
    /// Zero-based cursor into the logical result set
    pub position: usize,
    /// Items fetched so far, by logical index
    pub cache: BTreeMap<usize, JsonValue>,
    /// Page size last reported by the API (offset mode)
    pub request_limit: usize,
    /// Total count last reported by the API (offset mode)
    pub request_total: usize,
    /// Cursor for the next page, `None` once exhausted (checkpoint mode)
    pub next_checkpoint: Option<String>,
    /// Page fetches issued after the seed response
    pub network_requests: usize,
    /// Set when a page fetch fails or comes back empty
    pub exhausted: bool,
}

impl PaginationState {
    pub fn new(mode: PaginationMode) -> Self {
        Self {
            mode,
            position: 0,
            cache: BTreeMap::new(),
            request_limit: 0,
            request_total: 0,
            next_checkpoint: None,
            network_requests: 0,
            exhausted: false,
        }
    }

    /// Store an item at a fixed index, reporting whether it was new
    pub fn insert_at(&mut self, index: usize, item: JsonValue) -> bool {
        self.cache.insert(index, item).is_none()
    }

    /// Store an item after the last cached one
    pub fn append(&mut self, item: JsonValue) {
        let index = self.cache.keys().next_back().map_or(0, |last| last + 1);
        self.cache.insert(index, item);
    }

    /// Page number that covers the current position
    pub fn next_page(&self) -> Option<usize> {
        if self.request_limit == 0 {
            return None;
        }
        Some(self.position.div_ceil(self.request_limit))
    }

    pub fn mark_exhausted(&mut self) {
        self.exhausted = true;
    }
}
