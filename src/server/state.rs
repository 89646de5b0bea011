use std::sync::Arc;

use crate::{
    Result,
    config::Config,
    decrypt::{LinkDecoder, PayloadDecryptor, shapes},
    relay::Relay,
    upstream::UpstreamClient,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay<UpstreamClient>>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let client =
            UpstreamClient::new(config.upstream_base_url.clone(), config.upstream_timeout)?;
        let decryptor = PayloadDecryptor::new(
            LinkDecoder::with_cdn_origin(config.hls_cdn_origin.clone()),
            shapes::default_shapes(),
        );

        Ok(Self {
            relay: Arc::new(Relay::new(client, decryptor, config.batch_sizes.clone())),
        })
    }
}
