//! Mapping of client pages onto the upstream's fixed-size batches.

use std::num::NonZeroUsize;

pub const DEFAULT_PAGE: usize = 0;
pub const DEFAULT_LIMIT: usize = 10;

/// Which upstream batch to fetch, and which slice of it the client asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    pub upstream_page_index: usize,
    pub slice_start: usize,
    pub slice_end: usize,
}

impl PagePlan {
    /// Plan a request from raw `page` and `limit` query values.
    ///
    /// Absent, unparsable, zero or negative values fall back to page 0 and
    /// limit 10. Only one batch is ever fetched, so a window that runs past
    /// the end of the batch comes back short.
    pub fn new(page: Option<&str>, limit: Option<&str>, batch_size: NonZeroUsize) -> Self {
        let page = page.and_then(parse_positive).unwrap_or(DEFAULT_PAGE);
        let limit = limit.and_then(parse_positive).unwrap_or(DEFAULT_LIMIT);
        Self::from_parts(page, limit, batch_size)
    }

    pub fn from_parts(page: usize, limit: usize, batch_size: NonZeroUsize) -> Self {
        let total_offset = page.saturating_mul(limit);
        let slice_start = total_offset % batch_size;

        Self {
            upstream_page_index: total_offset / batch_size,
            slice_start,
            slice_end: slice_start.saturating_add(limit),
        }
    }

    /// Whether the requested window extends beyond the fetched batch.
    pub fn is_truncated(&self, batch_size: NonZeroUsize) -> bool {
        self.slice_end > batch_size.get()
    }
}

/// Leading-integer parse: surrounding whitespace and trailing junk are
/// tolerated (`" 12px"` is 12); anything not strictly positive is `None`.
fn parse_positive(raw: &str) -> Option<usize> {
    let s = raw.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let digits = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());

    match s[..digits].parse::<usize>() {
        Ok(0) | Err(_) => None,
        Ok(n) => Some(n),
    }
}
