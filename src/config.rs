use std::time::Duration;

use url::Url;

use crate::{decrypt::link::HLS_CDN_ORIGIN, resource::BatchSizes};

const DEFAULT_UPSTREAM_BASE_URL: &str = "https://gaana.com/apiv2";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 5;

/// Server configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origin: String,
    pub upstream_base_url: Url,
    pub upstream_timeout: Duration,
    pub hls_cdn_origin: String,
    pub batch_sizes: BatchSizes,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid PORT {:?}: {}", raw, e))?,
            None => 8080,
        };

        let cors_allowed_origin =
            lookup("CORS_ALLOWED_ORIGIN").unwrap_or_else(|| "*".to_string());

        let upstream_base_url = Url::parse(
            &lookup("UPSTREAM_BASE_URL").unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.to_string()),
        )?;

        let upstream_timeout = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(
                        "Ignoring invalid UPSTREAM_TIMEOUT_SECS={:?}, using {}s",
                        raw,
                        DEFAULT_UPSTREAM_TIMEOUT_SECS
                    );
                    Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS)
                }
            },
            None => Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        };

        let mut hls_cdn_origin =
            lookup("HLS_CDN_ORIGIN").unwrap_or_else(|| HLS_CDN_ORIGIN.to_string());
        if !hls_cdn_origin.ends_with('/') {
            hls_cdn_origin.push('/');
        }

        Ok(Self {
            host,
            port,
            cors_allowed_origin,
            upstream_base_url,
            upstream_timeout,
            hls_cdn_origin,
            batch_sizes: BatchSizes::from_lookup(&lookup),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ResourceKind;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| env.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.cors_allowed_origin, "*");
        assert_eq!(config.upstream_base_url.as_str(), "https://gaana.com/apiv2");
        assert_eq!(config.upstream_timeout, Duration::from_secs(5));
        assert_eq!(config.hls_cdn_origin, HLS_CDN_ORIGIN);
        assert_eq!(config.batch_sizes, BatchSizes::default());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PORT", "9000"),
            ("UPSTREAM_TIMEOUT_SECS", "12"),
            ("HLS_CDN_ORIGIN", "https://cdn.test"),
            ("BATCH_SIZE_ARTIST_ALBUMS", "50"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.upstream_timeout, Duration::from_secs(12));
        assert_eq!(config.hls_cdn_origin, "https://cdn.test/");
        assert_eq!(config.batch_sizes.get(ResourceKind::ArtistAlbums).get(), 50);
    }

    #[test]
    fn test_bad_timeout_falls_back() {
        let config = config(&[("UPSTREAM_TIMEOUT_SECS", "0")]).unwrap();
        assert_eq!(config.upstream_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_bad_port_is_an_error() {
        assert!(config(&[("PORT", "http")]).is_err());
    }

    #[test]
    fn test_bad_upstream_url_is_a_startup_error() {
        let err = config(&[("UPSTREAM_BASE_URL", "not a url")]).unwrap_err();
        assert!(err.downcast_ref::<url::ParseError>().is_some());
    }
}
