//! The searchable dropdown selector widget.
//!
//! Headless orchestrator over the binding engine, search controller and
//! keyboard navigator. The host routes events in through the `on_*` and
//! `set_*` methods, pumps [`CustomSelect::poll`], and reads render state
//! back out through the query methods. Handlers configured in
//! [`SelectOptions`] map widget activity to host messages.

use std::time::Duration;
use web_time::Instant;

use serde_json::Value;

use crate::binding::BindingDescriptor;
use crate::engine::{display_string, BindingEngine, Entry};
use crate::error::SelectError;
use crate::event::{Key, Modifiers};
use crate::keynav::{Focus, KeyboardNavigator, NavAction};
use crate::options::SelectOptions;
use crate::search::{SearchController, SearchMode};

/// Delay before recomputing display text after an external value write,
/// giving a dependent host render step time to settle. A workaround, not a
/// guarantee; hosts that can observe the render step should call
/// [`CustomSelect::render_settled`] instead.
pub const RESYNC_DELAY: Duration = Duration::from_millis(50);

/// Where the host should place real input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// The closed widget's trigger element
    Trigger,
    /// The search input inside the open dropdown
    Input,
    /// Menu item `i` of the visible list
    Item(usize),
}

/// One renderable menu entry, in collection order.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleItem {
    /// Collection key the entry was iterated under (array index or object key)
    pub key: Value,
    /// Projected display text (empty when the display expression was
    /// undefined for this item)
    pub display: String,
}

/// Result of routing a key event into the widget.
#[derive(Debug)]
pub struct KeyOutcome<M> {
    /// Whether the key was intercepted; the host suppresses default
    /// behavior and propagation exactly when this is set.
    pub consumed: bool,
    /// Host message produced by the key, if any
    pub message: Option<M>,
}

impl<M> KeyOutcome<M> {
    fn ignored() -> Self {
        Self {
            consumed: false,
            message: None,
        }
    }

    fn consumed(message: Option<M>) -> Self {
        Self {
            consumed: true,
            message,
        }
    }
}

/// A searchable, keyboard-navigable dropdown selector bound to a data
/// collection through a binding expression.
#[derive(Debug)]
pub struct CustomSelect<M> {
    engine: BindingEngine,
    options: SelectOptions<M>,
    search: SearchController,
    nav: KeyboardNavigator,
    collection: Value,
    value: Value,
    display_text: String,
    open: bool,
    disabled: bool,
    resync_at: Option<Instant>,
}

impl<M> CustomSelect<M> {
    /// Parse the binding expression and build the widget.
    ///
    /// A malformed or missing expression is fatal: the widget is not built
    /// and the error surfaces synchronously to the caller.
    pub fn new(expression: &str, options: SelectOptions<M>) -> Result<Self, SelectError> {
        let descriptor = BindingDescriptor::parse(expression)?;
        let mode = if options.on_search.is_some() {
            SearchMode::Remote
        } else {
            SearchMode::Local
        };
        let search = SearchController::new(mode, options.search_delay);
        let display_text = options.display_text.clone();
        log::debug!("select: constructed for '{}' ({:?})", expression, mode);

        Ok(Self {
            engine: BindingEngine::new(descriptor),
            options,
            search,
            nav: KeyboardNavigator::new(),
            collection: Value::Null,
            value: Value::Null,
            display_text,
            open: false,
            disabled: false,
            resync_at: None,
        })
    }

    // ------------------------------------------------------------------
    // Host inputs
    // ------------------------------------------------------------------

    /// Click or key activation on the trigger. Toggles the dropdown, except
    /// that Alt/Ctrl held on a closed trigger suppresses auto-open, and a
    /// disabled widget ignores activation entirely.
    pub fn activate_trigger(&mut self, modifiers: Modifiers) {
        if self.disabled {
            log::trace!("select: trigger activation while disabled");
            return;
        }
        if self.open {
            self.close();
        } else if !modifiers.suppresses_auto_open() {
            self.open_dropdown();
        }
    }

    /// Replace the bound collection (explicit notify, in place of ambient
    /// change-detection). Stale item focus is clamped.
    pub fn set_collection(&mut self, collection: Value) {
        self.collection = collection;
        let visible = self.visible_entries().len();
        self.nav.sync_len(visible);
    }

    /// The search input's text changed. Local mode re-filters immediately;
    /// remote mode (re)schedules the debounced submission.
    pub fn set_search_text(&mut self, text: &str, now: Instant) {
        self.search.set_term(text, now);
        let visible = self.visible_entries().len();
        self.nav.sync_len(visible);
    }

    /// Key pressed while the search input is focused.
    pub fn on_input_key(&mut self, key: Key) -> KeyOutcome<M> {
        if !self.open {
            return KeyOutcome::ignored();
        }
        let visible = self.visible_entries().len();
        match self.nav.on_input_key(key, visible) {
            NavAction::SelectFirst => {
                let message = self.select(0);
                KeyOutcome::consumed(message)
            }
            NavAction::Close => {
                self.close();
                KeyOutcome::consumed(None)
            }
            NavAction::FocusChanged | NavAction::Consumed => KeyOutcome::consumed(None),
            NavAction::Ignored => KeyOutcome::ignored(),
        }
    }

    /// Key pressed while a menu item is focused.
    pub fn on_menu_key(&mut self, key: Key) -> KeyOutcome<M> {
        if !self.open {
            return KeyOutcome::ignored();
        }
        let visible = self.visible_entries().len();
        match self.nav.on_item_key(key, visible) {
            NavAction::Ignored => KeyOutcome::ignored(),
            NavAction::Close => {
                self.close();
                KeyOutcome::consumed(None)
            }
            NavAction::SelectFirst => {
                let message = self.select(0);
                KeyOutcome::consumed(message)
            }
            NavAction::FocusChanged | NavAction::Consumed => KeyOutcome::consumed(None),
        }
    }

    /// Commit the item at `visible_index` of the current visible list.
    /// Out-of-range indices are ignored.
    pub fn select(&mut self, visible_index: usize) -> Option<M> {
        let entry = self.visible_entries().into_iter().nth(visible_index)?;
        self.commit(&entry)
    }

    /// Commit a raw collection item directly, e.g. at the end of a host add
    /// flow. Runs the same commit path as [`CustomSelect::select`].
    pub fn select_item(&mut self, item: Value) -> Option<M> {
        let entry = Entry {
            key: Value::Null,
            item,
        };
        self.commit(&entry)
    }

    /// Activate the add affordance; emits the `on_add` message.
    pub fn add(&mut self) -> Option<M> {
        self.options.on_add.emit()
    }

    /// The bound value changed outside the widget (programmatic model
    /// assignment). Display text is recomputed after [`RESYNC_DELAY`] by
    /// [`CustomSelect::poll`], or immediately by
    /// [`CustomSelect::render_settled`].
    pub fn set_value(&mut self, value: Value, now: Instant) {
        log::trace!("select: external value change");
        self.value = value;
        self.resync_at = Some(now + RESYNC_DELAY);
    }

    /// The host's dependent render step completed; resync display text now
    /// instead of waiting out the deferred delay.
    pub fn render_settled(&mut self) {
        if self.resync_at.take().is_some() {
            self.resync_display();
        }
    }

    /// Pump deferred work: a due display resync, then a due debounced
    /// remote-search submission (emitting the `on_search` message).
    pub fn poll(&mut self, now: Instant) -> Option<M> {
        if self.resync_at.is_some_and(|at| at <= now) {
            self.resync_at = None;
            self.resync_display();
        }
        let term = self.search.poll(now)?;
        self.options.on_search.call(term)
    }

    /// Track the external disabled signal; while set, trigger activation is
    /// a no-op.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Close the dropdown without changing the selection.
    pub fn close(&mut self) {
        self.open = false;
    }

    // ------------------------------------------------------------------
    // Render queries
    // ------------------------------------------------------------------

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_remote(&self) -> bool {
        self.search.is_remote()
    }

    /// Whether the add affordance is configured.
    pub fn wants_add(&self) -> bool {
        self.options.on_add.is_some()
    }

    /// The trigger's current label.
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// The committed value (`Null` when nothing is selected).
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The search input's current text.
    pub fn search_text(&self) -> &str {
        self.search.term()
    }

    /// Configuration access, e.g. for the add label.
    pub fn options(&self) -> &SelectOptions<M> {
        &self.options
    }

    /// Where the host should place real input focus right now.
    pub fn focus(&self) -> FocusTarget {
        if !self.open {
            return FocusTarget::Trigger;
        }
        match self.nav.focus() {
            Focus::Input => FocusTarget::Input,
            Focus::Item(i) => FocusTarget::Item(i),
        }
    }

    /// The menu entries to render, in collection order, filtered by the
    /// current term in local mode.
    pub fn visible_items(&self) -> Vec<VisibleItem> {
        self.visible_entries()
            .iter()
            .map(|entry| VisibleItem {
                key: entry.key.clone(),
                display: self
                    .engine
                    .project(entry)
                    .display
                    .unwrap_or_default(),
            })
            .collect()
    }

    /// Placeholder text for an empty menu: the empty-list text when no term
    /// is set, otherwise the empty-result template with the term
    /// substituted. `None` while there are items to show.
    pub fn empty_text(&self) -> Option<String> {
        if !self.visible_entries().is_empty() {
            return None;
        }
        if self.search.term().is_empty() {
            Some(self.options.empty_list_text.clone())
        } else {
            Some(self.options.format_empty_result(self.search.term()))
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn open_dropdown(&mut self) {
        self.open = true;
        self.nav.reset();
        // Local mode starts each open with a clean filter; remote mode
        // keeps the term and the host's last results.
        self.search.open_reset();
        log::debug!("select: opened");
    }

    fn commit(&mut self, entry: &Entry) -> Option<M> {
        let projection = self.engine.project(entry);
        self.value = projection.value;
        // Internally-driven change: set display immediately and drop any
        // pending external resync, the commit is authoritative.
        self.display_text = projection
            .display
            .unwrap_or_else(|| self.options.display_text.clone());
        self.resync_at = None;
        self.search.commit_reset();
        self.close();
        log::debug!("select: committed '{}'", self.display_text);
        self.options.on_select.call(entry.item.clone())
    }

    fn resync_display(&mut self) {
        self.display_text = self
            .engine
            .resolve_display(&self.value, &self.collection)
            .unwrap_or_else(|| self.options.display_text.clone());
        log::trace!("select: display resynced to '{}'", self.display_text);
    }

    fn visible_entries(&self) -> Vec<Entry> {
        let entries = self.engine.entries(&self.collection);
        let term = self.search.term();
        if self.search.is_remote() || term.is_empty() {
            return entries;
        }
        entries
            .into_iter()
            .filter(|entry| self.matches_term(entry, term))
            .collect()
    }

    /// Case-insensitive substring match against the item property named by
    /// the descriptor's search path, or the projected display text.
    fn matches_term(&self, entry: &Entry, term: &str) -> bool {
        let haystack = match self.engine.descriptor().search_path.as_deref() {
            Some(path) => lookup_path(&entry.item, path).and_then(display_string),
            None => self.engine.project(entry).display,
        };
        match haystack {
            Some(text) => text.to_lowercase().contains(&term.to_lowercase()),
            None => false,
        }
    }
}

fn lookup_path(item: &Value, path: &[String]) -> Option<Value> {
    let mut current = item;
    for segment in path {
        current = current.get(segment)?;
    }
    Some(current.clone())
}
