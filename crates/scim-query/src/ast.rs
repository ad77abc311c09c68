//! Abstract Syntax Tree (AST) for filter expressions.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::config::ParserConfig;
use crate::error::ParseError;
use crate::path::Path;

/// Attribute comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonOperator {
    /// Equal.
    Eq,
    /// Not equal. The parser never stores this operator; `ne` is read as
    /// `not (eq)`.
    Ne,
    /// Contains.
    Co,
    /// Starts with.
    Sw,
    /// Ends with.
    Ew,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Ge,
    /// Less than.
    Lt,
    /// Less than or equal.
    Le,
}

impl ComparisonOperator {
    /// Looks up an operator by keyword, ignoring ASCII case.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        const ALL: [ComparisonOperator; 9] = [
            ComparisonOperator::Eq,
            ComparisonOperator::Ne,
            ComparisonOperator::Co,
            ComparisonOperator::Sw,
            ComparisonOperator::Ew,
            ComparisonOperator::Gt,
            ComparisonOperator::Ge,
            ComparisonOperator::Lt,
            ComparisonOperator::Le,
        ];
        ALL.into_iter()
            .find(|op| op.keyword().eq_ignore_ascii_case(keyword))
    }

    /// The lowercase keyword for this operator.
    pub fn keyword(self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "eq",
            ComparisonOperator::Ne => "ne",
            ComparisonOperator::Co => "co",
            ComparisonOperator::Sw => "sw",
            ComparisonOperator::Ew => "ew",
            ComparisonOperator::Gt => "gt",
            ComparisonOperator::Ge => "ge",
            ComparisonOperator::Lt => "lt",
            ComparisonOperator::Le => "le",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Represents a parsed filter expression.
///
/// `And` and `Or` nodes produced by the parser always hold at least two
/// operands; a run of the same operator at one nesting level becomes a
/// single node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Filter {
    /// Compares the attribute at `path` with a scalar value.
    Comparison {
        /// The comparison operator.
        operator: ComparisonOperator,
        /// The attribute being compared.
        path: Path,
        /// A JSON scalar or null.
        value: Value,
    },

    /// Matches when the attribute at `path` has a value (`pr`).
    Presence {
        /// The attribute tested for presence.
        path: Path,
    },

    /// Logical NOT.
    Not {
        /// The negated filter.
        operand: Box<Filter>,
    },

    /// Logical AND.
    And {
        /// The filters that must all match, in source order.
        operands: Vec<Filter>,
    },

    /// Logical OR.
    Or {
        /// The filters of which one must match, in source order.
        operands: Vec<Filter>,
    },

    /// Applies `value_filter` to each value of the multi-valued complex
    /// attribute at `path`.
    Complex {
        /// The multi-valued attribute.
        path: Path,
        /// The filter evaluated per value.
        value_filter: Box<Filter>,
    },
}

impl Filter {
    /// Creates a comparison, reading `ne` as `not (eq)`.
    ///
    /// # Example
    ///
    /// ```
    /// use scim_query_rs::{ComparisonOperator, Filter, Path};
    /// use serde_json::json;
    ///
    /// let path = Path::root().attribute("title");
    /// let filter = Filter::comparison(ComparisonOperator::Ne, path.clone(), json!("x"));
    /// assert_eq!(filter, Filter::not(Filter::eq(path, json!("x"))));
    /// ```
    pub fn comparison(operator: ComparisonOperator, path: Path, value: Value) -> Self {
        match operator {
            ComparisonOperator::Ne => Filter::not(Filter::eq(path, value)),
            operator => Filter::Comparison {
                operator,
                path,
                value,
            },
        }
    }

    /// `path eq value`.
    pub fn eq(path: Path, value: Value) -> Self {
        Filter::comparison(ComparisonOperator::Eq, path, value)
    }

    /// `path ne value`, stored as `not (path eq value)`.
    pub fn ne(path: Path, value: Value) -> Self {
        Filter::comparison(ComparisonOperator::Ne, path, value)
    }

    /// `path co value`.
    pub fn co(path: Path, value: Value) -> Self {
        Filter::comparison(ComparisonOperator::Co, path, value)
    }

    /// `path sw value`.
    pub fn sw(path: Path, value: Value) -> Self {
        Filter::comparison(ComparisonOperator::Sw, path, value)
    }

    /// `path ew value`.
    pub fn ew(path: Path, value: Value) -> Self {
        Filter::comparison(ComparisonOperator::Ew, path, value)
    }

    /// `path gt value`.
    pub fn gt(path: Path, value: Value) -> Self {
        Filter::comparison(ComparisonOperator::Gt, path, value)
    }

    /// `path ge value`.
    pub fn ge(path: Path, value: Value) -> Self {
        Filter::comparison(ComparisonOperator::Ge, path, value)
    }

    /// `path lt value`.
    pub fn lt(path: Path, value: Value) -> Self {
        Filter::comparison(ComparisonOperator::Lt, path, value)
    }

    /// `path le value`.
    pub fn le(path: Path, value: Value) -> Self {
        Filter::comparison(ComparisonOperator::Le, path, value)
    }

    /// `path pr`.
    pub fn pr(path: Path) -> Self {
        Filter::Presence { path }
    }

    /// Creates a NOT filter.
    pub fn not(operand: Filter) -> Self {
        Filter::Not {
            operand: Box::new(operand),
        }
    }

    /// Creates an AND filter.
    pub fn and(operands: impl IntoIterator<Item = Filter>) -> Self {
        Filter::And {
            operands: operands.into_iter().collect(),
        }
    }

    /// Creates an OR filter.
    pub fn or(operands: impl IntoIterator<Item = Filter>) -> Self {
        Filter::Or {
            operands: operands.into_iter().collect(),
        }
    }

    /// Creates a complex attribute filter.
    pub fn complex(path: Path, value_filter: Filter) -> Self {
        Filter::Complex {
            path,
            value_filter: Box::new(value_filter),
        }
    }

    /// The attribute path of a comparison, presence or complex filter.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Filter::Comparison { path, .. }
            | Filter::Presence { path }
            | Filter::Complex { path, .. } => Some(path),
            Filter::Not { .. } | Filter::And { .. } | Filter::Or { .. } => None,
        }
    }

    /// The operands of an `and` or `or` filter; empty for other nodes.
    pub fn operands(&self) -> &[Filter] {
        match self {
            Filter::And { operands } | Filter::Or { operands } => operands,
            _ => &[],
        }
    }
}

impl FromStr for Filter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse_filter(s, &ParserConfig::default())
    }
}
