//! Tag-indexed cache of query responses.
//!
//! Queries file their successful responses under the tags their endpoint
//! provides; mutations mark every entry whose tags they match as stale. A stale
//! entry is never served, so the next fetch of that query goes to the network.
//! Entries also expire `keep_for` after they were stored, which bounds how
//! long untagged queries such as `getCourseById` can be served.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::http::{HttpRequest, HttpResponse};
use crate::registry::OperationKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// The signed-in user's profile.
    User,
    CreatorCourse,
    Lecture,
    CourseProgress,
    Purchases,
}

/// A label grouping cached query results, optionally narrowed to one id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheTag {
    pub kind: TagKind,
    pub id: Option<String>,
}

impl CacheTag {
    pub fn all(kind: TagKind) -> Self {
        Self { kind, id: None }
    }

    pub fn with_id(kind: TagKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: Some(id.into()),
        }
    }

    /// Whether invalidating `self` hits an entry that provided `provided`.
    ///
    /// An id-less tag matches every tag of its kind; an id'd tag matches
    /// only the same kind and id.
    pub fn matches(&self, provided: &CacheTag) -> bool {
        self.kind == provided.kind
            && match &self.id {
                None => true,
                Some(id) => provided.id.as_ref() == Some(id),
            }
    }
}

/// How long a stored response is served before it must be fetched again.
pub const DEFAULT_KEEP_FOR: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CacheEntry {
    response: HttpResponse,
    tags: Vec<CacheTag>,
    stale: bool,
    stored_at: Instant,
}

/// In-memory store of query responses keyed by `HttpRequest::cache_key`.
#[derive(Debug)]
pub struct QueryCache {
    entries: HashMap<String, CacheEntry>,
    keep_for: Duration,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::with_keep_for(DEFAULT_KEEP_FOR)
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keep_for(keep_for: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            keep_for,
        }
    }

    /// Returns the cached response for `request` if present, not stale and
    /// not expired.
    pub fn lookup(&self, request: &HttpRequest) -> Option<&HttpResponse> {
        let entry = self.entries.get(&request.cache_key())?;
        if entry.stale || entry.stored_at.elapsed() >= self.keep_for {
            return None;
        }
        debug!(endpoint = request.endpoint.name(), "serving cached response");
        Some(&entry.response)
    }

    /// Files a query response. Non-2xx responses and mutations are ignored.
    pub fn store(&mut self, request: &HttpRequest, response: &HttpResponse) {
        if request.endpoint.kind() != OperationKind::Query || !response.is_success() {
            return;
        }
        let key = request.cache_key();
        debug!(%key, "caching response");
        self.entries.insert(
            key,
            CacheEntry {
                response: response.clone(),
                tags: request.endpoint.provides(),
                stale: false,
                stored_at: Instant::now(),
            },
        );
    }

    /// Marks every entry matching any of `tags` stale and returns their keys.
    pub fn invalidate(&mut self, tags: &[CacheTag]) -> Vec<String> {
        let mut keys = Vec::new();
        for (key, entry) in &mut self.entries {
            let hit = tags
                .iter()
                .any(|tag| entry.tags.iter().any(|provided| tag.matches(provided)));
            if hit && !entry.stale {
                entry.stale = true;
                keys.push(key.clone());
            }
        }
        keys.sort();
        if !keys.is_empty() {
            info!(count = keys.len(), "invalidated cached queries");
        }
        keys
    }

    /// Records the outcome of a completed round-trip: queries are stored,
    /// mutations invalidate their tags regardless of status.
    pub fn apply(&mut self, request: &HttpRequest, response: &HttpResponse) -> Vec<String> {
        match request.endpoint.kind() {
            OperationKind::Query => {
                self.store(request, response);
                Vec::new()
            }
            OperationKind::Mutation => self.invalidate(&request.endpoint.invalidates()),
        }
    }

    /// Drops entries older than `keep_for` and returns how many went.
    pub fn purge_expired(&mut self) -> usize {
        let before = self.entries.len();
        let keep_for = self.keep_for;
        self.entries.retain(|_, entry| entry.stored_at.elapsed() < keep_for);
        let purged = before - self.entries.len();
        if purged > 0 {
            debug!(purged, "dropped expired cache entries");
        }
        purged
    }

    pub fn is_stale(&self, request: &HttpRequest) -> bool {
        self.entries
            .get(&request.cache_key())
            .is_some_and(|entry| entry.stale)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
