use serde_json::{Map, Value};

use super::{LinkDecoder, LinkShape, decode_tiers};

const DISCRIMINATOR_FIELD: &str = "key";
const STREAM_URL_TAG: &str = "stream_url";
const VALUE_FIELD: &str = "value";

/// Key/value records tagged `"key": "stream_url"` whose `value` is a quality map.
///
/// These show up inside `entity_info` arrays on song details.
pub struct StreamRecordShape;

impl LinkShape for StreamRecordShape {
    fn matches(&self, node: &Map<String, Value>) -> bool {
        node.get(DISCRIMINATOR_FIELD).and_then(Value::as_str) == Some(STREAM_URL_TAG)
            && matches!(node.get(VALUE_FIELD), Some(Value::Object(_)))
    }

    fn transform(&self, node: &mut Map<String, Value>, decoder: &LinkDecoder) -> usize {
        match node.get_mut(VALUE_FIELD) {
            Some(Value::Object(tiers)) => decode_tiers(tiers, decoder),
            _ => 0,
        }
    }
}
