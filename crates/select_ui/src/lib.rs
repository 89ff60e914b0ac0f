//! select_ui - A headless, searchable dropdown selector
//!
//! This crate provides the full behavioral core of a select widget bound
//! to a data collection through a comprehension-style binding expression
//! (`value (as label)? (group by g)? for (item | (key, item)) in collection
//! (track by t)?`): expression parsing, projection of items into
//! value/display pairs, local substring filtering or debounced remote
//! search, and keyboard navigation between the search input and the menu.
//!
//! No rendering or event loop is included. The host feeds events into a
//! [`CustomSelect`], pumps [`CustomSelect::poll`] with the current time,
//! and reads render state back out; handlers configured in
//! [`SelectOptions`] map widget activity to host messages.

mod binding;
mod callback;
mod engine;
mod error;
mod event;
mod expr;
mod keynav;
mod options;
mod search;
mod widgets;

pub use binding::BindingDescriptor;
pub use callback::{Callback, Callback0};
pub use engine::{display_string, BindingEngine, Entry, Projection};
pub use error::SelectError;
pub use event::{Key, Modifiers};
pub use expr::{Expr, Scope};
pub use keynav::{Focus, KeyboardNavigator, NavAction};
pub use options::SelectOptions;
pub use search::{SearchController, SearchMode};
pub use widgets::{CustomSelect, FocusTarget, KeyOutcome, VisibleItem, RESYNC_DELAY};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::SelectError;
    pub use crate::event::{Key, Modifiers};
    pub use crate::options::SelectOptions;
    pub use crate::widgets::{CustomSelect, FocusTarget, KeyOutcome, VisibleItem};
}
