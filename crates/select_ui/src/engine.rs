//! Evaluation of a [`BindingDescriptor`] against live collection data.

use serde_json::Value;

use crate::binding::BindingDescriptor;
use crate::expr::Scope;

/// One selectable entry of the bound collection.
///
/// `key` is the array index or object key the entry was iterated under;
/// it backs the `(key, item)` pair form and stable item identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: Value,
    pub item: Value,
}

/// The value/display pair a selection commits.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// The value written to the bound model
    pub value: Value,
    /// Display text, `None` when the display expression was undefined or
    /// null (the widget then falls back to its configured label)
    pub display: Option<String>,
}

/// Evaluates descriptor projections against a data context.
#[derive(Debug)]
pub struct BindingEngine {
    descriptor: BindingDescriptor,
}

impl BindingEngine {
    pub fn new(descriptor: BindingDescriptor) -> Self {
        Self { descriptor }
    }

    pub fn descriptor(&self) -> &BindingDescriptor {
        &self.descriptor
    }

    /// Enumerate the collection in order. A missing, null, or non-iterable
    /// collection yields zero entries rather than an error.
    pub fn entries(&self, collection: &Value) -> Vec<Entry> {
        match collection {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| Entry {
                    key: Value::from(i),
                    item: item.clone(),
                })
                .collect(),
            Value::Object(map) => map
                .iter()
                .map(|(k, v)| Entry {
                    key: Value::String(k.clone()),
                    item: v.clone(),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Bind the iteration variable(s) to an entry and evaluate the value and
    /// display expressions.
    pub fn project(&self, entry: &Entry) -> Projection {
        let scope = self.scope_for(entry);
        let value = self
            .descriptor
            .value
            .eval(&scope)
            .unwrap_or(Value::Null);
        let display = self
            .descriptor
            .display
            .eval(&scope)
            .and_then(display_string);
        Projection { value, display }
    }

    /// Find the display text for a committed value by scanning the live
    /// collection. `None` when no entry projects to that value; the widget
    /// then shows its fallback label.
    ///
    /// With a `track by` expression, identity is compared through it (the
    /// committed value stands in for the item), otherwise by value equality.
    pub fn resolve_display(&self, value: &Value, collection: &Value) -> Option<String> {
        if value.is_null() {
            return None;
        }
        for entry in self.entries(collection) {
            let matched = match &self.descriptor.track_by {
                Some(track) => {
                    let entry_id = track.eval(&self.scope_for(&entry));
                    let value_id = track.eval(&self.item_scope(value.clone()));
                    entry_id.is_some() && entry_id == value_id
                }
                None => self.project(&entry).value == *value,
            };
            if matched {
                return self.project(&entry).display;
            }
        }
        None
    }

    fn scope_for(&self, entry: &Entry) -> Scope {
        let mut scope = self.item_scope(entry.item.clone());
        if let Some(key_var) = &self.descriptor.key_var {
            scope.insert(key_var.clone(), entry.key.clone());
        }
        scope
    }

    fn item_scope(&self, item: Value) -> Scope {
        let mut scope = Scope::new();
        scope.insert(self.descriptor.item_var.clone(), item);
        scope
    }
}

/// Default string projection of a value: strings verbatim, other non-null
/// values via their JSON rendering.
pub fn display_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
