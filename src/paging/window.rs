use serde_json::Value;

use super::PagePlan;

const GROUPS_FIELD: &str = "gr";
const GROUP_ITEMS_FIELD: &str = "gd";
const ENTITIES_FIELD: &str = "entities";

/// Where the listed items sit in an upstream response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListShape {
    /// `gr: [{ gd: [...] }, ...]`, as returned by search.
    Grouped,
    /// `entities: [...]`, as returned by listings.
    Flat,
}

impl ListShape {
    /// Slice this shape's list(s) to `[start, end)`. Returns whether the shape was present.
    fn apply(&self, payload: &mut Value, start: usize, end: usize) -> bool {
        match self {
            Self::Grouped => {
                let Some(Value::Array(groups)) = payload.get_mut(GROUPS_FIELD) else {
                    return false;
                };
                for group in groups {
                    if let Some(Value::Array(items)) = group.get_mut(GROUP_ITEMS_FIELD) {
                        slice_in_place(items, start, end);
                    }
                }
                true
            }
            Self::Flat => {
                let Some(Value::Array(items)) = payload.get_mut(ENTITIES_FIELD) else {
                    return false;
                };
                slice_in_place(items, start, end);
                true
            }
        }
    }
}

/// Cuts upstream batches down to the window the client requested.
#[derive(Debug, Clone)]
pub struct ResultWindower {
    shapes: Vec<ListShape>,
}

impl ResultWindower {
    pub fn new(shapes: Vec<ListShape>) -> Self {
        Self { shapes }
    }

    /// Window every configured shape present in `payload`.
    pub fn window(&self, payload: &mut Value, start: usize, end: usize) {
        let mut applied = false;
        for shape in &self.shapes {
            applied |= shape.apply(payload, start, end);
        }
        if !applied {
            tracing::debug!("No windowable list in payload, returning as-is");
        }
    }

    pub fn apply_plan(&self, payload: &mut Value, plan: &PagePlan) {
        self.window(payload, plan.slice_start, plan.slice_end);
    }
}

impl Default for ResultWindower {
    fn default() -> Self {
        Self::new(vec![ListShape::Grouped, ListShape::Flat])
    }
}

/// Keep `items[start..end]`, clamped to the list's bounds.
fn slice_in_place(items: &mut Vec<Value>, start: usize, end: usize) {
    let end = end.min(items.len());
    let start = start.min(end);
    items.truncate(end);
    items.drain(..start);
}
