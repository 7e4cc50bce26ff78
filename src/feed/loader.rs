use crate::feed::types::{FeedItem, RawPost};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

/// Per-request timeout. Bounds how long the loading flag can stay set when a
/// request hangs.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Error Types
// ============================================================================

/// Errors from fetching the post feed.
///
/// All of these are transient from the UI's perspective: the loader returns
/// to idle and the failure is logged (and optionally shown), never retried
/// automatically.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the 30-second timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body was not the expected JSON shape
    #[error("Decode error: {0}")]
    Decode(String),
}

// ============================================================================
// Loader State
// ============================================================================

/// Outcome of a load operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fetch ran; this many items were added to (or now make up) the feed.
    Loaded(usize),
    /// Another fetch was already in flight; the call was a no-op.
    InFlight,
}

/// Point-in-time view of the feed for rendering.
///
/// `loading` and `refreshing` are independent so the pull-to-refresh
/// indicator and the initial/footer spinner can be distinguished.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub items: Arc<Vec<FeedItem>>,
    pub loading: bool,
    pub refreshing: bool,
}

struct FeedInner {
    /// Append-only except on refresh, where it is swapped wholesale.
    items: Arc<Vec<FeedItem>>,
    /// Next page to request. Explicit cursor so repeated `load_more` calls
    /// always make forward progress instead of re-fetching a fixed page.
    next_page: u32,
    refreshing: bool,
}

/// Fetches pages of posts and owns the in-memory feed.
///
/// Cloning shares state, so the loader can be handed to spawned tasks while
/// the UI keeps a handle for snapshots. The in-flight guard enforces at most
/// one outstanding fetch: calls arriving while one is pending are no-ops, so
/// rapid scroll events serialize naturally instead of racing.
#[derive(Clone)]
pub struct FeedLoader {
    client: reqwest::Client,
    base_url: String,
    thumbnail_base: String,
    page_size: u32,
    in_flight: Arc<AtomicBool>,
    inner: Arc<Mutex<FeedInner>>,
}

impl FeedLoader {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        thumbnail_base: impl Into<String>,
        page_size: u32,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let thumbnail_base = thumbnail_base.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            thumbnail_base,
            page_size,
            in_flight: Arc::new(AtomicBool::new(false)),
            inner: Arc::new(Mutex::new(FeedInner {
                items: Arc::new(Vec::new()),
                next_page: 1,
                refreshing: false,
            })),
        }
    }

    /// Snapshot the feed and its flags for rendering.
    pub fn snapshot(&self) -> FeedSnapshot {
        let inner = self.inner.lock().expect("feed state poisoned");
        FeedSnapshot {
            items: Arc::clone(&inner.items),
            loading: self.in_flight.load(Ordering::Acquire),
            refreshing: inner.refreshing,
        }
    }

    /// Fetch the first page and replace the feed with it.
    ///
    /// No-op when a fetch is already pending. On failure the feed is left
    /// untouched and the loader returns to idle.
    pub async fn load_initial(&self) -> Result<LoadOutcome, FeedError> {
        if !self.try_begin() {
            tracing::debug!("load_initial skipped: fetch already in flight");
            return Ok(LoadOutcome::InFlight);
        }

        let result = self.fetch_page(1).await;
        let outcome = match result {
            Ok(items) => {
                let count = items.len();
                let mut inner = self.inner.lock().expect("feed state poisoned");
                inner.items = Arc::new(items);
                inner.next_page = 2;
                Ok(LoadOutcome::Loaded(count))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Initial feed load failed");
                Err(e)
            }
        };
        self.in_flight.store(false, Ordering::Release);
        outcome
    }

    /// Fetch the next page and append it to the feed.
    ///
    /// No-op when a fetch is already pending. Items whose `id` already
    /// appears in the feed are appended anyway (overlapping server pages are
    /// the service's business, not ours). The cursor only advances on
    /// success, so a failed page is attempted again on the next call.
    pub async fn load_more(&self) -> Result<LoadOutcome, FeedError> {
        if !self.try_begin() {
            tracing::debug!("load_more skipped: fetch already in flight");
            return Ok(LoadOutcome::InFlight);
        }

        let page = {
            let inner = self.inner.lock().expect("feed state poisoned");
            inner.next_page
        };

        let result = self.fetch_page(page).await;
        let outcome = match result {
            Ok(items) => {
                let count = items.len();
                let mut inner = self.inner.lock().expect("feed state poisoned");
                let mut merged = Vec::with_capacity(inner.items.len() + count);
                merged.extend(inner.items.iter().cloned());
                merged.extend(items);
                inner.items = Arc::new(merged);
                inner.next_page = page + 1;
                Ok(LoadOutcome::Loaded(count))
            }
            Err(e) => {
                tracing::warn!(page = page, error = %e, "Feed page load failed");
                Err(e)
            }
        };
        self.in_flight.store(false, Ordering::Release);
        outcome
    }

    /// Re-fetch the first page, replacing the feed atomically.
    ///
    /// Sets the distinct refreshing indicator for the duration and clears it
    /// whether the fetch succeeds or fails. Observers only ever see the old
    /// feed or the complete new page, never a mix.
    pub async fn refresh(&self) -> Result<LoadOutcome, FeedError> {
        if !self.try_begin() {
            tracing::debug!("refresh skipped: fetch already in flight");
            return Ok(LoadOutcome::InFlight);
        }

        self.inner.lock().expect("feed state poisoned").refreshing = true;

        let result = self.fetch_page(1).await;
        let outcome = {
            let mut inner = self.inner.lock().expect("feed state poisoned");
            inner.refreshing = false;
            match result {
                Ok(items) => {
                    let count = items.len();
                    inner.items = Arc::new(items);
                    inner.next_page = 2;
                    Ok(LoadOutcome::Loaded(count))
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Feed refresh failed");
                    Err(e)
                }
            }
        };
        self.in_flight.store(false, Ordering::Release);
        outcome
    }

    /// Fetch a single post by id for the details screen.
    ///
    /// Stateless: does not touch the feed or the in-flight guard.
    pub async fn fetch_post(&self, id: i64) -> Result<FeedItem, FeedError> {
        let url = format!("{}/posts/{}", self.base_url, id);
        let response = tokio::time::timeout(REQUEST_TIMEOUT, self.client.get(&url).send())
            .await
            .map_err(|_| FeedError::Timeout)?
            .map_err(FeedError::Network)?;

        if !response.status().is_success() {
            return Err(FeedError::HttpStatus(response.status().as_u16()));
        }

        let raw: RawPost = response
            .json()
            .await
            .map_err(|e| FeedError::Decode(e.to_string()))?;

        let fetched_at = Utc::now().timestamp_millis();
        Ok(raw.into_item(&self.thumbnail_base, fetched_at))
    }

    /// Acquire the in-flight guard. Returns false when a fetch is pending.
    fn try_begin(&self) -> bool {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    async fn fetch_page(&self, page: u32) -> Result<Vec<FeedItem>, FeedError> {
        let url = format!(
            "{}/posts?_limit={}&_page={}",
            self.base_url, self.page_size, page
        );

        let response = tokio::time::timeout(REQUEST_TIMEOUT, self.client.get(&url).send())
            .await
            .map_err(|_| FeedError::Timeout)?
            .map_err(FeedError::Network)?;

        if !response.status().is_success() {
            return Err(FeedError::HttpStatus(response.status().as_u16()));
        }

        let raw: Vec<RawPost> = response
            .json()
            .await
            .map_err(|e| FeedError::Decode(e.to_string()))?;

        let fetched_at = Utc::now().timestamp_millis();
        let items: Vec<FeedItem> = raw
            .into_iter()
            .map(|p| p.into_item(&self.thumbnail_base, fetched_at))
            .collect();

        tracing::debug!(page = page, count = items.len(), "Fetched feed page");
        Ok(items)
    }
}
