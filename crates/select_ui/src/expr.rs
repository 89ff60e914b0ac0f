//! Typed sub-expression AST and evaluator.
//!
//! Binding expressions are decomposed into small sub-expressions (display,
//! value, collection, track-by, group-by). Each one is parsed into an
//! operation tree evaluated against an explicit variable-binding map, so no
//! host-language code is ever executed.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::SelectError;

/// Variable bindings a sub-expression is evaluated against.
///
/// Holds the collection root plus, transiently, the bound iteration
/// variable(s) for the entry being projected.
pub type Scope = HashMap<String, Value>;

/// A parsed sub-expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Dotted property access rooted at an identifier: `u`, `u.name`, `a.b.c`
    Path(Vec<String>),
    /// String literal: `'x'` or `"x"`
    Str(String),
    /// Numeric literal
    Num(f64),
    /// Boolean literal
    Bool(bool),
    /// Null literal
    Null,
}

/// Check whether `s` is a valid identifier: `[A-Za-z_$][A-Za-z0-9_$]*`.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// A numeric literal starts with a digit, optionally preceded by a sign
/// and/or a leading decimal point.
fn is_numeric_literal(src: &str) -> bool {
    let body = src.strip_prefix('-').unwrap_or(src);
    let body = body.strip_prefix('.').unwrap_or(body);
    body.starts_with(|c: char| c.is_ascii_digit())
}

impl Expr {
    /// Parse a sub-expression. `clause` names the grammar clause for errors.
    pub fn parse(src: &str, clause: &'static str) -> Result<Self, SelectError> {
        let src = src.trim();
        if src.is_empty() {
            return Err(SelectError::invalid_clause(clause, src));
        }

        // Quoted string literal
        if (src.starts_with('\'') && src.ends_with('\'') && src.len() >= 2)
            || (src.starts_with('"') && src.ends_with('"') && src.len() >= 2)
        {
            return Ok(Expr::Str(src[1..src.len() - 1].to_string()));
        }

        match src {
            "true" => return Ok(Expr::Bool(true)),
            "false" => return Ok(Expr::Bool(false)),
            "null" => return Ok(Expr::Null),
            _ => {}
        }

        // Guarded by shape, not parse success alone: f64 parsing also
        // accepts "inf"/"nan" spellings, which are valid identifiers here.
        if is_numeric_literal(src) {
            if let Ok(n) = src.parse::<f64>() {
                return Ok(Expr::Num(n));
            }
        }

        let segments: Vec<String> = src.split('.').map(str::to_string).collect();
        if segments.iter().all(|s| is_identifier(s)) {
            Ok(Expr::Path(segments))
        } else {
            Err(SelectError::invalid_clause(clause, src))
        }
    }

    /// Evaluate against a scope. `None` means undefined (unbound root or
    /// missing property), which callers treat as a display fallback, never
    /// as an error.
    pub fn eval(&self, scope: &Scope) -> Option<Value> {
        match self {
            Expr::Path(segments) => {
                let mut current = scope.get(segments[0].as_str())?;
                for segment in &segments[1..] {
                    current = current.get(segment)?;
                }
                Some(current.clone())
            }
            Expr::Str(s) => Some(Value::String(s.clone())),
            Expr::Num(n) => serde_json::Number::from_f64(*n).map(Value::Number),
            Expr::Bool(b) => Some(Value::Bool(*b)),
            Expr::Null => Some(Value::Null),
        }
    }

    /// The root identifier, for path expressions.
    pub fn root(&self) -> Option<&str> {
        match self {
            Expr::Path(segments) => segments.first().map(String::as_str),
            _ => None,
        }
    }

    /// Property segments after the root, for path expressions.
    pub fn tail(&self) -> Option<&[String]> {
        match self {
            Expr::Path(segments) => Some(&segments[1..]),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scope(pairs: &[(&str, Value)]) -> Scope {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("u"));
        assert!(is_identifier("$item"));
        assert!(is_identifier("_x9"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("9u"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier("a b"));
    }

    #[test]
    fn test_parse_path() {
        assert_eq!(
            Expr::parse("u.name", "label").unwrap(),
            Expr::Path(vec!["u".into(), "name".into()])
        );
        assert_eq!(
            Expr::parse("users", "collection").unwrap(),
            Expr::Path(vec!["users".into()])
        );
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(Expr::parse("'hi'", "label").unwrap(), Expr::Str("hi".into()));
        assert_eq!(Expr::parse("\"hi\"", "label").unwrap(), Expr::Str("hi".into()));
        assert_eq!(Expr::parse("42", "label").unwrap(), Expr::Num(42.0));
        assert_eq!(Expr::parse("-1", "label").unwrap(), Expr::Num(-1.0));
        assert_eq!(Expr::parse(".5", "label").unwrap(), Expr::Num(0.5));
        assert_eq!(Expr::parse("true", "label").unwrap(), Expr::Bool(true));
        assert_eq!(Expr::parse("null", "label").unwrap(), Expr::Null);
    }

    #[test]
    fn test_float_spellings_stay_identifiers() {
        // f64 parsing would accept these as non-finite numbers; they are
        // ordinary names in this grammar.
        for name in ["inf", "Inf", "infinity", "nan", "NaN"] {
            assert_eq!(
                Expr::parse(name, "in").unwrap(),
                Expr::Path(vec![name.to_string()]),
            );
        }

        // And they evaluate as bindings, not as always-undefined numbers.
        let s = scope(&[("inf", json!([1, 2]))]);
        let expr = Expr::parse("inf", "in").unwrap();
        assert_eq!(expr.eval(&s), Some(json!([1, 2])));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Expr::parse("", "label").is_err());
        assert!(Expr::parse("a..b", "label").is_err());
        assert!(Expr::parse("a[0]", "label").is_err());
        assert!(Expr::parse("a + b", "label").is_err());
    }

    #[test]
    fn test_eval_path() {
        let s = scope(&[("u", json!({"name": "Al", "id": 1}))]);
        let expr = Expr::parse("u.name", "label").unwrap();
        assert_eq!(expr.eval(&s), Some(json!("Al")));

        let expr = Expr::parse("u", "select").unwrap();
        assert_eq!(expr.eval(&s), Some(json!({"name": "Al", "id": 1})));
    }

    #[test]
    fn test_eval_missing_is_undefined() {
        let s = scope(&[("u", json!({"name": "Al"}))]);
        assert_eq!(Expr::parse("u.age", "label").unwrap().eval(&s), None);
        assert_eq!(Expr::parse("v.name", "label").unwrap().eval(&s), None);
    }

    #[test]
    fn test_eval_nested() {
        let s = scope(&[("u", json!({"address": {"city": "Oslo"}}))]);
        let expr = Expr::parse("u.address.city", "label").unwrap();
        assert_eq!(expr.eval(&s), Some(json!("Oslo")));
    }
}
