//! Parser for SCIM attribute paths and filter expressions.
//!
//! This crate turns the textual paths and filters used by SCIM queries into
//! an abstract syntax tree. Evaluating filters against resources is left to
//! the caller.
//!
//! # Supported Syntax
//!
//! ## Paths
//! - `userName` - A single attribute
//! - `name.givenName` - A sub-attribute
//! - `emails[type eq "work"].value` - A sub-attribute of the selected values
//! - `urn:ietf:params:scim:schemas:core:2.0:User:userName` - A namespaced attribute
//! - `urn:ietf:params:scim:schemas:extension:enterprise:2.0:User:` - A whole namespace
//!
//! ## Comparisons
//! - `eq`, `ne`, `co`, `sw`, `ew`, `gt`, `ge`, `lt`, `le` - Compare with a JSON scalar
//! - `pr` - Attribute has a value
//!
//! ## Boolean Operators
//! - `and` - AND (binds tighter than `or`)
//! - `or` - OR
//! - `not (...)` - NOT
//! - `()` - Grouping
//! - `emails[type eq "work" and primary eq true]` - Complex attribute filter
//!
//! Keywords and operators are case-insensitive.
//!
//! # Example
//!
//! ```
//! use scim_query_rs::{parse_filter, Filter, ParserConfig, Path};
//! use serde_json::json;
//!
//! let config = ParserConfig::default();
//! let filter = parse_filter("title pr and userType eq \"Employee\"", &config).unwrap();
//!
//! assert_eq!(
//!     filter,
//!     Filter::and([
//!         Filter::pr(Path::root().attribute("title")),
//!         Filter::eq(Path::root().attribute("userType"), json!("Employee")),
//!     ])
//! );
//! ```

mod ast;
mod config;
mod cursor;
mod error;
mod lexer;
mod parser;
mod path;
mod value;

pub use ast::{ComparisonOperator, Filter};
pub use config::ParserConfig;
pub use cursor::Cursor;
pub use error::{NestedError, ParseError, ParseResult};
pub use parser::Parser;
pub use path::{is_namespace, Path, PathElement};
pub use value::{JsonScalarReader, ScalarReader};

/// Parses an attribute path.
///
/// Shorthand for `Parser::new(config).parse_path(expression)`.
pub fn parse_path(expression: &str, config: &ParserConfig) -> ParseResult<Path> {
    Parser::new(config).parse_path(expression)
}

/// Parses a filter expression.
///
/// Shorthand for `Parser::new(config).parse_filter(expression)`.
pub fn parse_filter(expression: &str, config: &ParserConfig) -> ParseResult<Filter> {
    Parser::new(config).parse_filter(expression)
}
