use serde::Deserialize;

use crate::{Error, Result};

/// Query parameters for the /song and /album endpoints.
#[derive(Debug, Deserialize)]
pub struct EntityParams {
    /// Seokey of the song or album.
    #[serde(default)]
    pub seokey: Option<String>,
}

/// Query parameters for the /search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search keyword.
    #[serde(default)]
    pub q: Option<String>,

    /// Zero-based page number, kept raw so malformed values fall back to defaults.
    #[serde(default)]
    pub page: Option<String>,

    /// Page size.
    #[serde(default)]
    pub limit: Option<String>,

    /// Country code passed through to the upstream.
    #[serde(default)]
    pub country: Option<String>,
}

/// Query parameters for the artist and label listing endpoints.
#[derive(Debug, Deserialize)]
pub struct ListingParams {
    /// Seokey of the artist or label.
    #[serde(default)]
    pub seokey: Option<String>,

    #[serde(default)]
    pub page: Option<String>,

    #[serde(default)]
    pub limit: Option<String>,

    /// Upstream sort key, e.g. `popularity`.
    #[serde(default)]
    pub sort: Option<String>,
}

/// Return the trimmed value, or `MissingParameter` if it is absent or blank.
pub fn required<'a>(value: Option<&'a str>, name: &'static str) -> Result<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(Error::MissingParameter(name))
}
