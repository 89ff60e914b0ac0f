// Widget implementations

mod select;

pub use select::{CustomSelect, FocusTarget, KeyOutcome, VisibleItem, RESYNC_DELAY};
