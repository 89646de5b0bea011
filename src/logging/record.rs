use std::time::Instant;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Error, paging::PagePlan};

/// A record of a request for logging purposes.
#[derive(Debug, Clone)]
pub struct RequestLogRecord {
    pub request_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub resource: String,
    pub lookup: String,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub upstream_page: Option<usize>,
    pub slice: Option<(usize, usize)>,
    pub response_status: u16,
    pub response_time_ms: i64,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    started: Instant,
}

impl RequestLogRecord {
    pub fn new(endpoint: &str, resource: &str, lookup: &str) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            endpoint: endpoint.to_string(),
            resource: resource.to_string(),
            lookup: lookup.to_string(),
            page: None,
            limit: None,
            upstream_page: None,
            slice: None,
            response_status: 0,
            response_time_ms: 0,
            error_code: None,
            error_message: None,
            started: Instant::now(),
        }
    }

    pub fn with_paging(mut self, page: Option<&str>, limit: Option<&str>) -> Self {
        self.page = page.map(String::from);
        self.limit = limit.map(String::from);
        self
    }

    pub fn with_plan(mut self, plan: &PagePlan) -> Self {
        self.upstream_page = Some(plan.upstream_page_index);
        self.slice = Some((plan.slice_start, plan.slice_end));
        self
    }

    pub fn with_response(mut self, status: u16) -> Self {
        self.response_status = status;
        self.response_time_ms = self.started.elapsed().as_millis() as i64;
        self
    }

    pub fn with_error(mut self, error: &Error) -> Self {
        self.error_code = Some(error.error_code().to_string());
        self.error_message = Some(error.to_string());
        self.with_response(error.status_code().as_u16())
    }

    /// Write the record to the `request` log target.
    pub fn emit(&self) {
        match &self.error_code {
            None => tracing::info!(
                target: "kanade::request",
                request_id = %self.request_id,
                timestamp = %self.timestamp.to_rfc3339(),
                endpoint = %self.endpoint,
                resource = %self.resource,
                lookup = %self.lookup,
                page = ?self.page,
                limit = ?self.limit,
                upstream_page = ?self.upstream_page,
                slice = ?self.slice,
                status = self.response_status,
                elapsed_ms = self.response_time_ms,
                "request completed"
            ),
            Some(code) => tracing::warn!(
                target: "kanade::request",
                request_id = %self.request_id,
                timestamp = %self.timestamp.to_rfc3339(),
                endpoint = %self.endpoint,
                resource = %self.resource,
                lookup = %self.lookup,
                status = self.response_status,
                elapsed_ms = self.response_time_ms,
                error_code = %code,
                error = ?self.error_message,
                "request failed"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;

    #[test]
    fn test_plan_is_recorded() {
        let plan = PagePlan::from_parts(3, 10, NonZeroUsize::new(20).unwrap());
        let record = RequestLogRecord::new("/artist/tracks", "artist_tracks", "arijit")
            .with_paging(Some("3"), Some("10"))
            .with_plan(&plan)
            .with_response(200);

        assert_eq!(record.upstream_page, Some(1));
        assert_eq!(record.slice, Some((10, 20)));
        assert_eq!(record.response_status, 200);
        assert!(record.error_code.is_none());
    }

    #[test]
    fn test_error_sets_status_and_code() {
        let record = RequestLogRecord::new("/song", "song", "x")
            .with_error(&Error::UpstreamTimeout("https://gaana.com/apiv2".to_string()));

        assert_eq!(record.response_status, 504);
        assert_eq!(record.error_code.as_deref(), Some("UPSTREAM_TIMEOUT"));
    }
}
