use serde_json::Value;

use super::{
    LinkDecoder,
    shapes::{self, LinkShape},
};

/// Walks an upstream payload and decodes every recognized stream link in place.
pub struct PayloadDecryptor {
    decoder: LinkDecoder,
    shapes: Vec<Box<dyn LinkShape>>,
}

impl PayloadDecryptor {
    pub fn new(decoder: LinkDecoder, shapes: Vec<Box<dyn LinkShape>>) -> Self {
        Self { decoder, shapes }
    }

    /// Decrypt all link carriers reachable from `payload`.
    ///
    /// Returns the number of tier links rewritten. Scalars and unknown
    /// structures are left untouched.
    pub fn decrypt(&self, payload: &mut Value) -> usize {
        match payload {
            Value::Object(node) => {
                let mut decoded = 0;
                for shape in &self.shapes {
                    if shape.matches(node) {
                        decoded += shape.transform(node, &self.decoder);
                    }
                }
                // Decoded messages are strings now, so re-visiting is harmless.
                for child in node.values_mut() {
                    decoded += self.decrypt(child);
                }
                decoded
            }
            Value::Array(items) => items.iter_mut().map(|item| self.decrypt(item)).sum(),
            _ => 0,
        }
    }
}

impl Default for PayloadDecryptor {
    fn default() -> Self {
        Self::new(LinkDecoder::default(), shapes::default_shapes())
    }
}
