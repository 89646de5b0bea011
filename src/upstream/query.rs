use crate::resource::{EntityKind, ResourceKind};

/// Query parameters for one upstream call, in the order they are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamQuery {
    pairs: Vec<(&'static str, String)>,
}

impl UpstreamQuery {
    /// Detail lookup for a single song or album.
    pub fn entity(kind: EntityKind, seokey: &str) -> Self {
        Self {
            pairs: vec![
                ("type", kind.type_tag().to_string()),
                ("seokey", seokey.to_string()),
            ],
        }
    }

    /// One upstream batch of a listing.
    ///
    /// Search takes the lookup value as `keyword`; other listings as `seokey`.
    pub fn listing(kind: ResourceKind, lookup: &str, upstream_page: usize) -> Self {
        let lookup_param = match kind {
            ResourceKind::Search => "keyword",
            _ => "seokey",
        };
        Self {
            pairs: vec![
                ("type", kind.type_tag().to_string()),
                (lookup_param, lookup.to_string()),
                ("page", upstream_page.to_string()),
            ],
        }
    }

    pub fn with_sort(self, sort: Option<&str>) -> Self {
        self.with_optional("sortBy", sort)
    }

    pub fn with_country(self, country: Option<&str>) -> Self {
        self.with_optional("country", country)
    }

    fn with_optional(mut self, name: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.pairs.push((name, value.to_string()));
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// Append the parameters to `base`'s query string.
    pub fn to_url(&self, base: &url::Url) -> url::Url {
        let mut url = base.clone();
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in &self.pairs {
                query.append_pair(key, value);
            }
        }
        url
    }
}
