//! Widget configuration: texts, search delay, and host message handlers.

use std::time::Duration;

use serde_json::Value;

use crate::callback::{Callback, Callback0};

/// Configuration for a select widget.
///
/// Unspecified keys keep their defaults; builder setters override
/// key-by-key. The presence of `on_search` switches the widget to remote
/// search, and the presence of `on_add` enables the add affordance.
#[derive(Debug)]
pub struct SelectOptions<M> {
    /// Fallback label shown when no value is selected
    pub(crate) display_text: String,
    /// Shown when the collection is empty and no search term is set
    pub(crate) empty_list_text: String,
    /// Shown when filtering yields nothing; `$0` is replaced with the term
    pub(crate) empty_search_result_text: String,
    /// Label for the add action
    pub(crate) add_text: String,
    /// Debounce delay for remote search
    pub(crate) search_delay: Duration,
    /// Invoked after a commit, with the raw collection item
    pub(crate) on_select: Callback<Value, M>,
    /// Invoked with the debounced search term; presence selects remote mode
    pub(crate) on_search: Callback<String, M>,
    /// Invoked when the add action is activated; presence enables it
    pub(crate) on_add: Callback0<M>,
}

impl<M> Default for SelectOptions<M> {
    fn default() -> Self {
        Self {
            display_text: "Select...".to_string(),
            empty_list_text: "There are no items to display".to_string(),
            empty_search_result_text: "No results match \"$0\"".to_string(),
            add_text: "Add".to_string(),
            search_delay: Duration::from_millis(1000),
            on_select: Callback::none(),
            on_search: Callback::none(),
            on_add: Callback::none(),
        }
    }
}

impl<M> SelectOptions<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback label shown when no value is selected.
    pub fn display_text(mut self, text: impl Into<String>) -> Self {
        self.display_text = text.into();
        self
    }

    /// Set the empty-collection text.
    pub fn empty_list_text(mut self, text: impl Into<String>) -> Self {
        self.empty_list_text = text.into();
        self
    }

    /// Set the empty-search-result template; `$0` is replaced with the
    /// current term.
    pub fn empty_search_result_text(mut self, text: impl Into<String>) -> Self {
        self.empty_search_result_text = text.into();
        self
    }

    /// Set the add action label.
    pub fn add_text(mut self, text: impl Into<String>) -> Self {
        self.add_text = text.into();
        self
    }

    /// Set the remote-search debounce delay.
    pub fn search_delay(mut self, delay: Duration) -> Self {
        self.search_delay = delay;
        self
    }

    /// Set the selection handler, called with the raw collection item.
    pub fn on_select<F>(mut self, callback: F) -> Self
    where
        F: Fn(Value) -> M + 'static,
    {
        self.on_select = Callback::new(callback);
        self
    }

    /// Set the remote-search handler. Setting one switches filtering from
    /// local substring matching to debounced remote dispatch.
    pub fn on_search<F>(mut self, callback: F) -> Self
    where
        F: Fn(String) -> M + 'static,
    {
        self.on_search = Callback::new(callback);
        self
    }

    /// Set the add handler. The host completes its add flow and then calls
    /// `select_item` on the widget with the new item.
    pub fn on_add<F>(mut self, callback: F) -> Self
    where
        F: Fn() -> M + 'static,
    {
        self.on_add = Callback::new(move |()| callback());
        self
    }

    /// The configured add label, for host rendering.
    pub fn add_label(&self) -> &str {
        &self.add_text
    }

    /// Substitute the current term into the empty-result template.
    pub(crate) fn format_empty_result(&self, term: &str) -> String {
        self.empty_search_result_text.replace("$0", term)
    }
}
