//! Error types for the path and filter parsers.

use std::fmt;
use std::ops::Deref;

use thiserror::Error;

/// A specialized Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Errors that can occur while parsing a path or filter expression.
///
/// Offsets are zero-based character offsets into the (trimmed) expression
/// that was being read when the error occurred.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A character that is not legal at this position.
    #[error("unexpected character '{character}' at position {offset}")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Where the character was found.
        offset: usize,
    },

    /// The input ended in the middle of a token or path.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    /// An attribute name was required but none was found.
    #[error("expected attribute name at position {offset}")]
    ExpectedAttributeName {
        /// Start of the token where the name was expected.
        offset: usize,
    },

    /// `not` was not followed by an opening parenthesis.
    #[error("expected '(' at position {offset}")]
    ExpectedParenthesis {
        /// Start of the token following `not`.
        offset: usize,
    },

    /// A closing parenthesis without a matching opening one.
    #[error("mismatched parenthesis at position {offset}")]
    MismatchedParenthesis {
        /// Position of the closing parenthesis.
        offset: usize,
    },

    /// An attribute path inside a filter (or a value filter inside a path)
    /// could not be parsed.
    #[error("invalid attribute path at position {offset}: {cause}")]
    InvalidAttributePath {
        /// Start of the token holding the path.
        offset: usize,
        /// The underlying path or value filter error.
        #[source]
        cause: NestedError,
    },

    /// The value of a comparison could not be read.
    #[error("invalid comparison value at position {offset}: {cause}")]
    InvalidComparisonValue {
        /// Where the value was expected to start.
        offset: usize,
        /// Message reported by the scalar reader.
        cause: String,
    },

    /// The token after an attribute path is not a known operator.
    #[error("unrecognized operator '{token}' at position {offset}")]
    UnrecognizedOperator {
        /// The operator token as written.
        token: String,
        /// Start of the operator token.
        offset: usize,
    },

    /// A token that cannot appear at this point of a filter.
    #[error("unexpected token '{token}' at position {offset}")]
    UnexpectedToken {
        /// The token as written.
        token: String,
        /// Start of the token.
        offset: usize,
    },

    /// The filter ended before a complete expression was read.
    #[error("unexpected end of filter")]
    UnexpectedEndOfFilter,
}

impl ParseError {
    /// Creates an unexpected character error.
    pub fn unexpected_character(character: char, offset: usize) -> Self {
        ParseError::UnexpectedCharacter { character, offset }
    }

    /// Creates an invalid attribute path error wrapping `cause`.
    pub fn invalid_attribute_path(offset: usize, cause: ParseError) -> Self {
        ParseError::InvalidAttributePath {
            offset,
            cause: NestedError(Box::new(cause)),
        }
    }

    /// Creates an invalid comparison value error.
    pub fn invalid_comparison_value(offset: usize, cause: impl Into<String>) -> Self {
        ParseError::InvalidComparisonValue {
            offset,
            cause: cause.into(),
        }
    }

    /// Creates an unrecognized operator error.
    pub fn unrecognized_operator(token: impl Into<String>, offset: usize) -> Self {
        ParseError::UnrecognizedOperator {
            token: token.into(),
            offset,
        }
    }

    /// Creates an unexpected token error.
    pub fn unexpected_token(token: impl Into<String>, offset: usize) -> Self {
        ParseError::UnexpectedToken {
            token: token.into(),
            offset,
        }
    }

    /// Returns the position this error refers to, if it carries one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::UnexpectedCharacter { offset, .. }
            | ParseError::ExpectedAttributeName { offset }
            | ParseError::ExpectedParenthesis { offset }
            | ParseError::MismatchedParenthesis { offset }
            | ParseError::InvalidAttributePath { offset, .. }
            | ParseError::InvalidComparisonValue { offset, .. }
            | ParseError::UnrecognizedOperator { offset, .. }
            | ParseError::UnexpectedToken { offset, .. } => Some(*offset),
            ParseError::UnexpectedEndOfInput | ParseError::UnexpectedEndOfFilter => None,
        }
    }
}

/// The error nested in [`ParseError::InvalidAttributePath`].
///
/// Dereferences to the inner [`ParseError`]; `source()` of the outer error
/// yields that inner error, so it can be downcast to `ParseError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedError(Box<ParseError>);

impl NestedError {
    /// Unwraps the inner error.
    pub fn into_inner(self) -> ParseError {
        *self.0
    }
}

impl Deref for NestedError {
    type Target = ParseError;

    fn deref(&self) -> &ParseError {
        &self.0
    }
}

impl fmt::Display for NestedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_unexpected_character_message() {
        let err = ParseError::unexpected_character(' ', 3);
        assert_eq!(err.to_string(), "unexpected character ' ' at position 3");
        assert_eq!(err.offset(), Some(3));
    }

    #[test]
    fn test_invalid_attribute_path_exposes_cause() {
        let inner = ParseError::unexpected_character('!', 2);
        let err = ParseError::invalid_attribute_path(5, inner.clone());

        assert_eq!(
            err.to_string(),
            "invalid attribute path at position 5: unexpected character '!' at position 2"
        );
        let source = err.source().expect("cause should be the source");
        assert_eq!(source.to_string(), inner.to_string());
        assert_eq!(source.downcast_ref::<ParseError>(), Some(&inner));
    }

    #[test]
    fn test_nested_error_unwraps() {
        let inner = ParseError::UnexpectedEndOfInput;
        let ParseError::InvalidAttributePath { cause, .. } =
            ParseError::invalid_attribute_path(0, inner.clone())
        else {
            panic!("Expected InvalidAttributePath");
        };
        assert_eq!(*cause, inner);
        assert_eq!(cause.offset(), None);
        assert_eq!(cause.into_inner(), inner);
    }

    #[test]
    fn test_end_of_input_errors_have_no_offset() {
        assert_eq!(ParseError::UnexpectedEndOfInput.offset(), None);
        assert_eq!(ParseError::UnexpectedEndOfFilter.offset(), None);
    }
}
