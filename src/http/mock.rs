//! Scripted responses for tests
//!
//! A `MockQueue` is shared by a client and every builder it creates. Each
//! `call()` dequeues one entry (FIFO) and, while the queue is non-empty,
//! never touches the real transport.

use super::transport::{HttpRequest, HttpResponse, TransportError};
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Invoked with the constructed request and the mocked response
pub type MockCallback = Arc<dyn Fn(&HttpRequest, &HttpResponse) + Send + Sync>;

/// One scripted exchange
#[derive(Clone)]
pub struct MockResponse {
    pub response: HttpResponse,
    pub callback: Option<MockCallback>,
    pub error: Option<TransportError>,
}

impl MockResponse {
    pub fn new(response: HttpResponse) -> Self {
        Self {
            response,
            callback: None,
            error: None,
        }
    }

    /// Inspect the outgoing request when this entry is consumed
    #[must_use]
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&HttpRequest, &HttpResponse) + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Fail the call with this error instead of returning the response
    #[must_use]
    pub fn with_error(mut self, error: TransportError) -> Self {
        self.error = Some(error);
        self
    }
}

impl From<HttpResponse> for MockResponse {
    fn from(response: HttpResponse) -> Self {
        Self::new(response)
    }
}

impl fmt::Debug for MockResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockResponse")
            .field("status", &self.response.status)
            .field("has_callback", &self.callback.is_some())
            .field("error", &self.error)
            .finish()
    }
}

/// FIFO of scripted exchanges, shared by reference
#[derive(Clone, Default, Debug)]
pub struct MockQueue {
    entries: Arc<Mutex<VecDeque<MockResponse>>>,
}

impl MockQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: MockResponse) {
        self.lock().push_back(entry);
    }

    pub fn extend(&self, entries: impl IntoIterator<Item = MockResponse>) {
        self.lock().extend(entries);
    }

    /// Take the next scripted exchange, if any
    pub fn pop(&self) -> Option<MockResponse> {
        self.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<MockResponse>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
