//! Error types.

use thiserror::Error;

/// Result of parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Failure to turn text into an expression.
///
/// Every variant carries enough context to point the user at the problem:
/// the offending fragment and, where available, the normalized string the
/// parser was working on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty expression")]
    Empty,

    #[error("Unbalanced parentheses at position {position} in `{processed}`")]
    UnbalancedParentheses { position: usize, processed: String },

    #[error("Operator `{operator}` is missing an operand near `{fragment}` in `{processed}`")]
    MissingOperand {
        operator: char,
        fragment: String,
        processed: String,
    },

    #[error("Disallowed literal `{literal}` in `{input}`")]
    DisallowedLiteral { literal: String, input: String },

    #[error("Unrecognized command `\\{command}` in `{input}`")]
    UnrecognizedCommand { command: String, input: String },

    #[error("Unexpected `{token}` at position {position} in `{processed}`")]
    IllegalToken {
        token: String,
        position: usize,
        processed: String,
    },

    #[error("Unexpected end of input in `{processed}`")]
    UnexpectedEnd { processed: String },
}

/// Failure to evaluate an expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("Malformed {kind} node: missing {missing}")]
    MalformedExpression { kind: String, missing: &'static str },

    /// Enumerating all `2^count` assignments is over the limit.
    #[error("Cannot enumerate assignments of {count} variables, limit is {limit}")]
    TooManyVariables { count: usize, limit: usize },
}

/// Failure of a minimization step.
///
/// Never surfaced by [`Engine::minimize`][crate::engine::Engine::minimize]:
/// the minimizer falls back to the pre-minimization expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MinimizeError {
    #[error("Expression has {count} variables, limit is {limit}")]
    TooManyVariables { count: usize, limit: usize },

    #[error("Karnaugh maps support 2 to 6 variables, got {0}")]
    UnsupportedMapSize(usize),

    #[error("Minimized form `{minimized}` is not equivalent to `{original}`")]
    NotEquivalent { original: String, minimized: String },

    #[error(transparent)]
    Eval(#[from] EvalError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let err = ParseError::MissingOperand {
            operator: '*',
            fragment: "A*".to_string(),
            processed: "A*".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Operator `*` is missing an operand near `A*` in `A*`"
        );

        let err = EvalError::MalformedExpression {
            kind: "AND".to_string(),
            missing: "right",
        };
        assert_eq!(err.to_string(), "Malformed AND node: missing right");

        let err = MinimizeError::from(EvalError::TooManyVariables { count: 40, limit: 16 });
        assert_eq!(err.to_string(), "Cannot enumerate assignments of 40 variables, limit is 16");

        let err = MinimizeError::UnsupportedMapSize(7);
        assert_eq!(err.to_string(), "Karnaugh maps support 2 to 6 variables, got 7");
    }
}
