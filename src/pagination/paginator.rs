//! Lazy paginator over list endpoints
//!
//! Seeded from the client's last (already executed) request, a
//! `ResponsePaginator` exposes the whole result set as a forward-only
//! sequence and fetches further pages on demand, re-using the same request
//! builder so headers and filters carry over.

use super::types::{supports_checkpoint, PaginationMode, PaginationState, CHECKPOINT_PARAMS};
use crate::error::{Error, Result};
use crate::http::response::{decode_content, was_successful, DEFAULT_SUCCESS_STATUS};
use crate::http::{HttpClient, HttpResponse, RequestBuilder};
use crate::types::{JsonObject, JsonValue, Method};
use futures::stream::{self, Stream};
use tracing::{debug, warn};

/// Response keys that describe the page rather than carry results
const OFFSET_META_KEYS: [&str; 4] = ["start", "limit", "total", "length"];
const CHECKPOINT_META_KEYS: [&str; 1] = ["next"];

/// Forward-only, lazily fetched view over a paginated result set
#[derive(Debug)]
pub struct ResponsePaginator {
    request: RequestBuilder,
    state: PaginationState,
}

impl ResponsePaginator {
    /// Seed a paginator from the client's most recent request
    ///
    /// The request must be a `GET` that already returned `200`. Checkpoint
    /// parameters are only accepted on allow-listed endpoints.
    pub fn new(client: &HttpClient) -> Result<Self> {
        let request = client.last_request().ok_or(Error::PaginatorBadResponse)?;
        Self::from_request(request)
    }

    /// Seed a paginator from an executed request builder
    pub fn from_request(request: RequestBuilder) -> Result<Self> {
        let response = request.last_response().ok_or(Error::PaginatorBadResponse)?;
        if !was_successful(&response, DEFAULT_SUCCESS_STATUS) {
            return Err(Error::PaginatorBadResponse);
        }

        let method = request.method();
        if method != Method::GET {
            return Err(Error::PaginatorUnsupportedMethod {
                method: method.as_str().to_uppercase(),
            });
        }

        let mode = if uses_checkpoint_params(&request) {
            let path = request.get_path();
            if !supports_checkpoint(&path) {
                return Err(Error::unsupported_endpoint(path));
            }
            PaginationMode::Checkpoint
        } else {
            PaginationMode::Offset
        };

        debug!("Paginating {} in {:?} mode", request.get_path(), mode);

        let mut paginator = Self {
            request,
            state: PaginationState::new(mode),
        };
        paginator.process_response(&response)?;
        Ok(paginator)
    }

    // ========================================================================
    // Iterator protocol
    // ========================================================================

    /// Item at the current position, if cached
    pub fn current(&self) -> Option<&JsonValue> {
        self.state.cache.get(&self.state.position)
    }

    /// Current position, when an item exists there
    pub fn key(&self) -> Option<usize> {
        self.current().map(|_| self.state.position)
    }

    /// Advance the position; never performs I/O
    pub fn next(&mut self) {
        self.state.position += 1;
    }

    /// Whether an item is available at the current position
    ///
    /// Fetches pages while the position is past the cache and the API
    /// indicated more results, so a position skipped ahead with `next()` is
    /// reached in one call. Fetch failures end iteration quietly.
    pub async fn valid(&mut self) -> bool {
        loop {
            if self.state.cache.contains_key(&self.state.position) {
                return true;
            }
            if self.state.exhausted || !self.has_more() {
                return false;
            }
            if !self.fetch_next_page().await {
                self.state.mark_exhausted();
                return false;
            }
        }
    }

    /// Move back to the first item without discarding the cache
    pub fn rewind(&mut self) {
        self.state.position = 0;
    }

    /// Total number of results reported by the API
    ///
    /// Checkpoint pagination never reports a total.
    pub fn count(&self) -> Result<usize> {
        match self.state.mode {
            PaginationMode::Offset => Ok(self.state.request_total),
            PaginationMode::Checkpoint => Err(Error::PaginatorCannotCount),
        }
    }

    /// Page fetches issued after the seed response
    pub fn count_network_requests(&self) -> usize {
        self.state.network_requests
    }

    // ========================================================================
    // Conveniences
    // ========================================================================

    /// Return the current item and advance, fetching as needed
    pub async fn next_item(&mut self) -> Option<JsonValue> {
        if !self.valid().await {
            return None;
        }
        let item = self.current().cloned();
        self.next();
        item
    }

    /// Consume the paginator as a stream of items from the current position
    pub fn into_stream(self) -> impl Stream<Item = JsonValue> {
        stream::unfold(self, |mut paginator| async move {
            let item = paginator.next_item().await?;
            Some((item, paginator))
        })
    }

    /// Collect every remaining item
    pub async fn collect_all(&mut self) -> Vec<JsonValue> {
        let mut items = Vec::new();
        while let Some(item) = self.next_item().await {
            items.push(item);
        }
        items
    }

    pub fn mode(&self) -> PaginationMode {
        self.state.mode
    }

    pub fn position(&self) -> usize {
        self.state.position
    }

    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    // ========================================================================
    // Fetching
    // ========================================================================

    fn has_more(&self) -> bool {
        match self.state.mode {
            PaginationMode::Checkpoint => self.state.next_checkpoint.is_some(),
            PaginationMode::Offset => self.state.position < self.state.request_total,
        }
    }

    async fn fetch_next_page(&mut self) -> bool {
        match self.state.mode {
            PaginationMode::Checkpoint => {
                let Some(checkpoint) = self.state.next_checkpoint.clone() else {
                    return false;
                };
                self.request.set_param("from", checkpoint);
            }
            PaginationMode::Offset => {
                let Some(page) = self.state.next_page() else {
                    return false;
                };
                self.request.set_param("page", page);
            }
        }

        self.state.network_requests += 1;
        debug!(
            "Fetching page {} of {}",
            self.state.network_requests,
            self.request.get_url()
        );

        let response = match self.request.call().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Page fetch failed, ending pagination: {e}");
                return false;
            }
        };

        match self.process_response(&response) {
            Ok(added) => added,
            Err(e) => {
                warn!("Unusable page response, ending pagination: {e}");
                false
            }
        }
    }

    /// Cache the items of one page; returns whether anything new was cached
    fn process_response(&mut self, response: &HttpResponse) -> Result<bool> {
        if !was_successful(response, DEFAULT_SUCCESS_STATUS) {
            return Err(Error::PaginatorBadResponse);
        }
        let payload = decode_content(response).map_err(|_| Error::PaginatorBadResponse)?;

        match self.state.mode {
            PaginationMode::Offset => self.process_offset_page(payload),
            PaginationMode::Checkpoint => Ok(self.process_checkpoint_page(payload)),
        }
    }

    fn process_offset_page(&mut self, payload: JsonValue) -> Result<bool> {
        let page = match payload {
            JsonValue::Object(page) => page,
            // Without include_totals the API answers with a bare list.
            JsonValue::Array(items) => {
                let count = items.len();
                let mut added = false;
                for (index, item) in items.into_iter().enumerate() {
                    added |= self.state.insert_at(index, item);
                }
                self.state.request_limit = count;
                self.state.request_total = count;
                return Ok(added);
            }
            _ => return Err(Error::PaginatorBadResponse),
        };

        let start = read_count(&page, "start").ok_or(Error::PaginatorBadResponse)?;
        if let Some(limit) = read_count(&page, "limit") {
            self.state.request_limit = limit;
        }
        if let Some(total) = read_count(&page, "total") {
            self.state.request_total = total;
        }

        let mut added = false;
        for (key, value) in page {
            if OFFSET_META_KEYS.contains(&key.as_str()) {
                continue;
            }
            if let JsonValue::Array(items) = value {
                for (offset, item) in items.into_iter().enumerate() {
                    let index = start
                        .checked_add(offset)
                        .ok_or(Error::PaginatorBadResponse)?;
                    added |= self.state.insert_at(index, item);
                }
            }
        }
        Ok(added)
    }

    fn process_checkpoint_page(&mut self, payload: JsonValue) -> bool {
        let page = match payload {
            JsonValue::Object(page) => page,
            JsonValue::Array(items) => {
                self.state.next_checkpoint = None;
                let added = !items.is_empty();
                items.into_iter().for_each(|item| self.state.append(item));
                return added;
            }
            _ => {
                self.state.next_checkpoint = None;
                return false;
            }
        };

        self.state.next_checkpoint = page
            .get("next")
            .and_then(JsonValue::as_str)
            .filter(|next| !next.is_empty())
            .map(str::to_string);

        let mut added = false;
        for (key, value) in page {
            if CHECKPOINT_META_KEYS.contains(&key.as_str()) {
                continue;
            }
            if let JsonValue::Array(items) = value {
                for item in items {
                    self.state.append(item);
                    added = true;
                }
            }
        }
        added
    }
}

fn uses_checkpoint_params(request: &RequestBuilder) -> bool {
    let Some(sent) = request.last_request() else {
        return false;
    };
    let Ok(url) = url::Url::parse(&sent.url) else {
        return false;
    };
    url.query_pairs()
        .any(|(key, _)| CHECKPOINT_PARAMS.contains(&key.as_ref()))
}

fn read_count(page: &JsonObject, key: &str) -> Option<usize> {
    page
        .get(key)
        .and_then(JsonValue::as_u64)
        .and_then(|n| usize::try_from(n).ok())
}
