pub mod client;
pub mod query;

use std::future::Future;

use serde_json::Value;

use crate::Result;

pub use client::UpstreamClient;
pub use query::UpstreamQuery;

/// Something that can answer an upstream query with a JSON document.
pub trait UpstreamGateway: Send + Sync {
    fn fetch(&self, query: &UpstreamQuery) -> impl Future<Output = Result<Value>> + Send;
}
