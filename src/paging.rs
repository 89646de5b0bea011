pub mod planner;
pub mod window;

pub use planner::{DEFAULT_LIMIT, DEFAULT_PAGE, PagePlan};
pub use window::{ListShape, ResultWindower};
