use serde_json::Value;

use crate::{
    Result,
    decrypt::PayloadDecryptor,
    paging::{ListShape, PagePlan, ResultWindower},
    resource::{BatchSizes, EntityKind, ResourceKind},
    upstream::{UpstreamGateway, UpstreamQuery},
};

/// A client's listing request, with `page`/`limit` still as raw query strings.
#[derive(Debug, Clone)]
pub struct ListingRequest {
    pub kind: ResourceKind,
    /// Seokey, or the keyword for search.
    pub lookup: String,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub country: Option<String>,
}

impl ListingRequest {
    pub fn new(kind: ResourceKind, lookup: impl Into<String>) -> Self {
        Self {
            kind,
            lookup: lookup.into(),
            page: None,
            limit: None,
            sort: None,
            country: None,
        }
    }

    pub fn with_paging(mut self, page: Option<String>, limit: Option<String>) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    pub fn with_sort(mut self, sort: Option<String>) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_country(mut self, country: Option<String>) -> Self {
        self.country = country;
        self
    }
}

/// A windowed listing along with the plan that produced it.
#[derive(Debug)]
pub struct Listing {
    pub plan: PagePlan,
    pub body: Value,
}

/// Fetches from the upstream, repairs stream links and re-windows listings.
pub struct Relay<G> {
    gateway: G,
    decryptor: PayloadDecryptor,
    batch_sizes: BatchSizes,
    grouped_windower: ResultWindower,
    flat_windower: ResultWindower,
}

impl<G: UpstreamGateway> Relay<G> {
    pub fn new(gateway: G, decryptor: PayloadDecryptor, batch_sizes: BatchSizes) -> Self {
        Self {
            gateway,
            decryptor,
            batch_sizes,
            grouped_windower: ResultWindower::new(vec![ListShape::Grouped]),
            flat_windower: ResultWindower::new(vec![ListShape::Flat]),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    fn windower(&self, shape: ListShape) -> &ResultWindower {
        match shape {
            ListShape::Grouped => &self.grouped_windower,
            ListShape::Flat => &self.flat_windower,
        }
    }

    /// Fetch a single song or album with its stream links decoded.
    pub async fn entity(&self, kind: EntityKind, seokey: &str) -> Result<Value> {
        let query = UpstreamQuery::entity(kind, seokey);
        let mut body = self.gateway.fetch(&query).await?;

        let decoded = self.decryptor.decrypt(&mut body);
        tracing::debug!("Decoded {} stream links for {} {}", decoded, kind.as_str(), seokey);

        Ok(body)
    }

    /// Fetch the one upstream batch holding the requested page and cut it down
    /// to the requested window.
    pub async fn listing(&self, request: &ListingRequest) -> Result<Listing> {
        let batch_size = self.batch_sizes.get(request.kind);
        let plan = PagePlan::new(request.page.as_deref(), request.limit.as_deref(), batch_size);

        if plan.is_truncated(batch_size) {
            // Items past the batch end live in the next batch, which is not fetched.
            tracing::debug!(
                "Window {}..{} exceeds {} batch size {}, result will be short",
                plan.slice_start,
                plan.slice_end,
                request.kind.as_str(),
                batch_size
            );
        }

        let query = UpstreamQuery::listing(request.kind, &request.lookup, plan.upstream_page_index)
            .with_sort(request.sort.as_deref())
            .with_country(request.country.as_deref());
        let mut body = self.gateway.fetch(&query).await?;

        self.decryptor.decrypt(&mut body);
        self.windower(request.kind.list_shape()).apply_plan(&mut body, &plan);

        Ok(Listing { plan, body })
    }
}
