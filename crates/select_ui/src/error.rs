//! Error types for binding-expression parsing and widget construction.

use thiserror::Error;

/// Errors that can occur while constructing a select widget.
///
/// All of these are construction-time contract violations: once a widget is
/// built, runtime conditions (missing collections, unresolvable expressions)
/// degrade to fallback behavior instead of erroring.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    /// The binding expression does not match the grammar
    #[error(
        "expected expression in form of \
         '_select_ (as _label_)? for (_key_,)?_value_ in _collection_' \
         but got '{expression}'"
    )]
    Syntax {
        /// The offending expression string
        expression: String,
    },

    /// No binding expression was supplied
    #[error("expected a binding expression")]
    MissingExpression,

    /// An iteration variable is not a valid identifier
    #[error("invalid identifier '{name}' in binding expression")]
    InvalidIdentifier {
        /// The invalid identifier text
        name: String,
    },

    /// A clause was present but its sub-expression was empty or unparsable
    #[error("invalid sub-expression '{text}' in '{clause}' clause")]
    InvalidClause {
        /// Which grammar clause the sub-expression belongs to
        clause: &'static str,
        /// The offending sub-expression text
        text: String,
    },
}

impl SelectError {
    /// Create a syntax error for a whole expression that failed to match.
    pub fn syntax(expression: impl Into<String>) -> Self {
        Self::Syntax {
            expression: expression.into(),
        }
    }

    /// Create an invalid identifier error.
    pub fn invalid_identifier(name: impl Into<String>) -> Self {
        Self::InvalidIdentifier { name: name.into() }
    }

    /// Create an invalid clause error.
    pub fn invalid_clause(clause: &'static str, text: impl Into<String>) -> Self {
        Self::InvalidClause {
            clause,
            text: text.into(),
        }
    }
}
