pub mod quality_urls;
pub mod stream_record;

use serde_json::{Map, Value};

use super::LinkDecoder;

pub use quality_urls::QualityUrlsShape;
pub use stream_record::StreamRecordShape;

/// Quality tiers a link carrier may hold, highest priority first.
pub const QUALITY_TIERS: [&str; 4] = ["auto", "high", "medium", "low"];

/// A recognizer for one kind of link-carrying object.
pub trait LinkShape: Send + Sync {
    /// Check whether this object carries links in this shape.
    fn matches(&self, node: &Map<String, Value>) -> bool;

    /// Decode the links in place, returning how many were rewritten.
    fn transform(&self, node: &mut Map<String, Value>, decoder: &LinkDecoder) -> usize;
}

/// Create default set of link shapes.
pub fn default_shapes() -> Vec<Box<dyn LinkShape>> {
    vec![Box::new(QualityUrlsShape), Box::new(StreamRecordShape)]
}

/// Decode every tier's `message` in a quality map.
pub(crate) fn decode_tiers(tiers: &mut Map<String, Value>, decoder: &LinkDecoder) -> usize {
    let mut decoded = 0;

    for tier in QUALITY_TIERS {
        let Some(Value::Object(variant)) = tiers.get_mut(tier) else {
            continue;
        };
        let Some(Value::String(message)) = variant.get_mut("message") else {
            continue;
        };
        if message.is_empty() {
            continue;
        }

        *message = decoder.decode(message);
        decoded += 1;
    }

    decoded
}
