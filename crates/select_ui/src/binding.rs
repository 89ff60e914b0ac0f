//! Binding expression grammar and the immutable descriptor it produces.
//!
//! The grammar is the single textual contract consumers author against:
//!
//! ```text
//! <select> (" as " <label>)? (" group by " <group>)?
//!     " for " (<item> | "(" <key> "," <item> ")")
//!     " in " <collection> (" track by " <track>)?
//! ```
//!
//! Parsing runs exactly once, at widget construction, and is pure.

use crate::error::SelectError;
use crate::expr::{is_identifier, Expr};

/// Parsed, immutable structured form of a binding expression.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingDescriptor {
    /// Expression projecting an item to its display text
    pub display: Expr,
    /// Expression projecting an item to the committed value
    pub value: Expr,
    /// Expression resolving the collection in the outer scope
    pub collection: Expr,
    /// The iteration variable bound to each item
    pub item_var: String,
    /// The key variable of the `(key, value)` pair form, if used
    pub key_var: Option<String>,
    /// Optional stable-identity expression (`track by`)
    pub track_by: Option<Expr>,
    /// Optional grouping expression (`group by`); captured, not rendered
    pub group_by: Option<Expr>,
    /// Item property path the search term matches against, derived from a
    /// label of the form `<item_var>.<path>`. `None` means the term matches
    /// the projected display text.
    pub search_path: Option<Vec<String>>,
}

impl BindingDescriptor {
    /// Parse a binding expression.
    ///
    /// Fails when the string does not match the grammar or an iteration
    /// variable is not a valid identifier. Never partially succeeds.
    pub fn parse(expression: &str) -> Result<Self, SelectError> {
        let trimmed = expression.trim();
        if trimmed.is_empty() {
            return Err(SelectError::MissingExpression);
        }

        let tokens: Vec<&str> = trimmed.split_whitespace().collect();
        let syntax = || SelectError::syntax(trimmed);

        // Strip the trailing `track by <expr>` clause first.
        let (tokens, track_by) = match rfind_pair(&tokens, "track", "by") {
            Some(i) => {
                let track_src = tokens[i + 2..].join(" ");
                let expr = Expr::parse(&track_src, "track by")?;
                (&tokens[..i], Some(expr))
            }
            None => (&tokens[..], None),
        };

        // `... in <collection>` anchors the right side.
        let in_idx = rfind_token(tokens, "in").ok_or_else(syntax)?;
        let collection_src = tokens[in_idx + 1..].join(" ");
        if collection_src.is_empty() {
            return Err(syntax());
        }
        let collection = Expr::parse(&collection_src, "in")?;

        // `... for <item>` or `... for (<key>, <item>)`.
        let for_idx = rfind_token(&tokens[..in_idx], "for").ok_or_else(syntax)?;
        let (key_var, item_var) = parse_iter_vars(&tokens[for_idx + 1..in_idx])?;

        // Left side: `<select> (as <label>)? (group by <group>)?`.
        let lhs = &tokens[..for_idx];
        let (lhs, group_by) = match rfind_pair(lhs, "group", "by") {
            Some(i) => {
                let group_src = lhs[i + 2..].join(" ");
                let expr = Expr::parse(&group_src, "group by")?;
                (&lhs[..i], Some(expr))
            }
            None => (lhs, None),
        };

        let (select_src, label_src) = match lhs.iter().position(|t| *t == "as") {
            Some(i) => (lhs[..i].join(" "), Some(lhs[i + 1..].join(" "))),
            None => (lhs.join(" "), None),
        };
        if select_src.is_empty() {
            return Err(syntax());
        }
        let select = Expr::parse(&select_src, "select")?;

        // With a label, the select expression is the committed value and the
        // label is the display; without one, the select expression is the
        // display and the item itself is the value.
        let (display, value, search_path) = match label_src {
            Some(src) => {
                if src.is_empty() {
                    return Err(syntax());
                }
                let label = Expr::parse(&src, "as")?;
                let search_path = match (&label, label.root()) {
                    (Expr::Path(_), Some(root)) if root == item_var => label
                        .tail()
                        .filter(|tail| !tail.is_empty())
                        .map(<[String]>::to_vec),
                    _ => None,
                };
                (label, select, search_path)
            }
            None => (
                select,
                Expr::Path(vec![item_var.clone()]),
                None,
            ),
        };

        Ok(Self {
            display,
            value,
            collection,
            item_var,
            key_var,
            track_by,
            group_by,
            search_path,
        })
    }
}

/// Last index of a standalone token.
fn rfind_token(tokens: &[&str], needle: &str) -> Option<usize> {
    tokens.iter().rposition(|t| *t == needle)
}

/// Last index where two adjacent tokens match `a b`.
fn rfind_pair(tokens: &[&str], a: &str, b: &str) -> Option<usize> {
    (0..tokens.len().saturating_sub(1)).rev().find(|&i| tokens[i] == a && tokens[i + 1] == b)
}

/// Parse the iteration variable part: `item` or `(key, item)`.
fn parse_iter_vars(tokens: &[&str]) -> Result<(Option<String>, String), SelectError> {
    let joined: String = tokens.concat();
    if joined.is_empty() {
        return Err(SelectError::syntax(tokens.join(" ")));
    }

    if let Some(inner) = joined.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        let mut parts = inner.split(',');
        let (key, item) = match (parts.next(), parts.next(), parts.next()) {
            (Some(k), Some(v), None) => (k.trim(), v.trim()),
            _ => return Err(SelectError::syntax(&joined)),
        };
        if !is_identifier(key) {
            return Err(SelectError::invalid_identifier(key));
        }
        if !is_identifier(item) {
            return Err(SelectError::invalid_identifier(item));
        }
        Ok((Some(key.to_string()), item.to_string()))
    } else {
        // Bare form is exactly one token; joining across whitespace is only
        // for the pair form's spacing tolerance.
        if tokens.len() != 1 {
            return Err(SelectError::syntax(tokens.join(" ")));
        }
        if !is_identifier(&joined) {
            return Err(SelectError::invalid_identifier(joined));
        }
        Ok((None, joined))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[&str]) -> Expr {
        Expr::Path(segments.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_identity_form() {
        let d = BindingDescriptor::parse("u for u in users").unwrap();
        assert_eq!(d.display, path(&["u"]));
        assert_eq!(d.value, path(&["u"]));
        assert_eq!(d.collection, path(&["users"]));
        assert_eq!(d.item_var, "u");
        assert_eq!(d.key_var, None);
        assert_eq!(d.search_path, None);
    }

    #[test]
    fn test_display_form() {
        let d = BindingDescriptor::parse("u.name for u in users").unwrap();
        assert_eq!(d.display, path(&["u", "name"]));
        // Without a label the item itself is the committed value.
        assert_eq!(d.value, path(&["u"]));
        assert_eq!(d.search_path, None);
    }

    #[test]
    fn test_label_form() {
        let d = BindingDescriptor::parse("u as u.name for u in users").unwrap();
        assert_eq!(d.display, path(&["u", "name"]));
        assert_eq!(d.value, path(&["u"]));
        assert_eq!(d.search_path, Some(vec!["name".to_string()]));
    }

    #[test]
    fn test_label_not_rooted_at_item_var() {
        let d = BindingDescriptor::parse("u.id as labels.main for u in users").unwrap();
        assert_eq!(d.display, path(&["labels", "main"]));
        assert_eq!(d.value, path(&["u", "id"]));
        assert_eq!(d.search_path, None);
    }

    #[test]
    fn test_pair_form() {
        let d = BindingDescriptor::parse("v.name for (k, v) in lookup").unwrap();
        assert_eq!(d.item_var, "v");
        assert_eq!(d.key_var, Some("k".to_string()));
        assert_eq!(d.collection, path(&["lookup"]));

        // Tight and loose spacing parse the same.
        let tight = BindingDescriptor::parse("v.name for (k,v) in lookup").unwrap();
        assert_eq!(d, tight);
        let loose = BindingDescriptor::parse("v.name for ( k , v ) in lookup").unwrap();
        assert_eq!(d, loose);
    }

    #[test]
    fn test_multiple_iteration_variables_rejected() {
        // Exactly one item variable or one (key, item) pair; stray tokens
        // must not merge into a single identifier.
        assert!(BindingDescriptor::parse("u for a b in users").is_err());
        assert!(BindingDescriptor::parse("u for a b c in users").is_err());
    }

    #[test]
    fn test_group_by_and_track_by() {
        let d = BindingDescriptor::parse(
            "v.id as v.label group by v.category for v in items track by v.id",
        )
        .unwrap();
        assert_eq!(d.group_by, Some(path(&["v", "category"])));
        assert_eq!(d.track_by, Some(path(&["v", "id"])));
        assert_eq!(d.display, path(&["v", "label"]));
        assert_eq!(d.value, path(&["v", "id"]));
        assert_eq!(d.search_path, Some(vec!["label".to_string()]));
    }

    #[test]
    fn test_nested_search_path() {
        let d = BindingDescriptor::parse("u as u.profile.name for u in users").unwrap();
        assert_eq!(
            d.search_path,
            Some(vec!["profile".to_string(), "name".to_string()])
        );
    }

    #[test]
    fn test_parse_is_deterministic() {
        let src = "u.id as u.name group by u.team for u in users track by u.id";
        let a = BindingDescriptor::parse(src).unwrap();
        let b = BindingDescriptor::parse(src).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_missing_expression() {
        assert_eq!(
            BindingDescriptor::parse("   "),
            Err(SelectError::MissingExpression)
        );
    }

    #[test]
    fn test_malformed_expressions() {
        for src in [
            "users",
            "u in users",
            "for u in users",
            "u for u users",
            "u for u in",
            "u as for u in users",
            "u for a b in users",
            "u for (a,) in users",
            "u for (a, b, c) in users",
            "u for 9x in users",
        ] {
            assert!(
                BindingDescriptor::parse(src).is_err(),
                "expected parse failure for {src:?}"
            );
        }
    }
}
