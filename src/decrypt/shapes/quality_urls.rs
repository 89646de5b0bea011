use serde_json::{Map, Value};

use super::{LinkDecoder, LinkShape, decode_tiers};

const URLS_FIELD: &str = "urls";

/// Objects carrying an `urls` map of quality tier to `{ message }`.
pub struct QualityUrlsShape;

impl LinkShape for QualityUrlsShape {
    fn matches(&self, node: &Map<String, Value>) -> bool {
        matches!(node.get(URLS_FIELD), Some(Value::Object(_)))
    }

    fn transform(&self, node: &mut Map<String, Value>, decoder: &LinkDecoder) -> usize {
        match node.get_mut(URLS_FIELD) {
            Some(Value::Object(tiers)) => decode_tiers(tiers, decoder),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decrypt::link::tests::encrypt_token;
    use serde_json::json;

    #[test]
    fn test_matches_urls_object() {
        let node = json!({ "track_id": 1, "urls": { "auto": { "message": "x" } } });
        assert!(QualityUrlsShape.matches(node.as_object().unwrap()));
    }

    #[test]
    fn test_does_not_match_urls_array() {
        let node = json!({ "urls": ["https://a", "https://b"] });
        assert!(!QualityUrlsShape.matches(node.as_object().unwrap()));
    }

    #[test]
    fn test_transform_decodes_every_tier() {
        let decoder = LinkDecoder::default();
        let mut node = json!({
            "urls": {
                "auto": { "message": encrypt_token("hls/auto.m3u8", 1) },
                "high": { "message": encrypt_token("hls/high.m3u8", 2) },
                "medium": { "message": encrypt_token("hls/medium.m3u8", 3) },
                "low": { "message": encrypt_token("hls/low.m3u8", 9) }
            }
        });

        let count = QualityUrlsShape.transform(node.as_object_mut().unwrap(), &decoder);

        assert_eq!(count, 4);
        for tier in ["auto", "high", "medium", "low"] {
            assert_eq!(
                node["urls"][tier]["message"],
                format!("https://vodhlsgaana-ebw.akamaized.net/hls/{tier}.m3u8")
            );
        }
    }
}
