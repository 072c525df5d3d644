//! Auto-pagination over `$top`/`$skip` list endpoints.
//!
//! # Design
//! `Paginator` is an iterator of pages driven by a fetch callback, so the
//! same loop serves real transports and tests. Each request asks for
//! `min(remaining, max_top)` items and the offset advances by the number of
//! items actually received. Iteration ends when the server omits
//! `nextPageLink`, when the limit is reached, or on an empty page (which
//! would otherwise repeat forever). `paginate` collects every page and
//! returns nothing at all if any request fails.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ApiError;

/// Page size cap of most EveryAction list endpoints.
pub const DEFAULT_MAX_TOP: u32 = 200;

/// One page of a list response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
    #[serde(default)]
    pub next_page_link: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl Page {
    pub fn has_more(&self) -> bool {
        self.next_page_link.as_deref().is_some_and(|link| !link.is_empty())
    }
}

/// Pagination parameters of one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Items to return overall; 0 means no limit.
    pub limit: u32,
    pub skip: u32,
    /// Largest `$top` the server accepts.
    pub max_top: u32,
}

pub struct Paginator<F> {
    fetch: F,
    remaining: Option<u32>,
    skip: u32,
    max_top: u32,
    done: bool,
}

impl<F> Paginator<F>
where
    F: FnMut(u32, u32) -> Result<Page, ApiError>,
{
    /// `fetch(top, skip)` performs one page request.
    pub fn new(request: PageRequest, fetch: F) -> Self {
        let max_top = if request.max_top == 0 {
            DEFAULT_MAX_TOP
        } else {
            request.max_top
        };
        Self {
            fetch,
            remaining: (request.limit > 0).then_some(request.limit),
            skip: request.skip,
            max_top,
            done: false,
        }
    }
}

impl<F> Iterator for Paginator<F>
where
    F: FnMut(u32, u32) -> Result<Page, ApiError>,
{
    type Item = Result<Vec<serde_json::Value>, ApiError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let top = match self.remaining {
            Some(remaining) => remaining.min(self.max_top),
            None => self.max_top,
        };
        debug!(top, skip = self.skip, "fetching page.");
        let page = match (self.fetch)(top, self.skip) {
            Ok(page) => page,
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        let more = page.has_more();
        let mut items = page.items;
        if let Some(remaining) = self.remaining {
            items.truncate(remaining as usize);
        }
        let received = u32::try_from(items.len()).unwrap_or(u32::MAX);
        self.skip = self.skip.saturating_add(received);
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= received;
        }

        debug!(received, more, "page received.");
        if items.is_empty() && more {
            warn!(skip = self.skip, "server reported more pages but sent none; stopping.");
        }
        self.done = !more || items.is_empty() || self.remaining == Some(0);
        Some(Ok(items))
    }
}

/// Fetch every page of a call and concatenate the items in server order.
pub fn paginate<F>(request: PageRequest, fetch: F) -> Result<Vec<serde_json::Value>, ApiError>
where
    F: FnMut(u32, u32) -> Result<Page, ApiError>,
{
    let mut all = Vec::new();
    for page in Paginator::new(request, fetch) {
        all.extend(page?);
    }
    Ok(all)
}
