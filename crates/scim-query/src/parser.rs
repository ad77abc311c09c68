//! Operator-precedence parser for attribute paths and filter expressions.

use serde_json::Value;
use tracing::{debug, trace};

use crate::ast::{ComparisonOperator, Filter};
use crate::config::ParserConfig;
use crate::cursor::Cursor;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Lexer, Token};
use crate::path::{is_namespace, Path, PathElement};
use crate::value::{JsonScalarReader, ScalarReader};

/// Parser for SCIM attribute paths and filter expressions.
///
/// Filters are read in a single pass with an operator stack and an output
/// stack. `and` binds tighter than `or`; `not` must be followed by a
/// parenthesized group. Runs of the same operator at one nesting level are
/// folded into one node.
///
/// # Grammar
///
/// ```text
/// path       ::= [ namespace ":" ] segment { "." segment }
/// segment    ::= name [ "[" filter "]" ]
/// filter     ::= term { ("and" | "or") term }
/// term       ::= "not" "(" filter ")" | "(" filter ")" | comparison | complex
/// complex    ::= path "[" filter "]"
/// comparison ::= path ( "pr" | op value )
/// op         ::= "eq" | "ne" | "co" | "sw" | "ew" | "gt" | "ge" | "lt" | "le"
/// ```
///
/// # Example
///
/// ```
/// use scim_query_rs::{Filter, Parser, ParserConfig, Path};
/// use serde_json::json;
///
/// let config = ParserConfig::default();
/// let parser = Parser::new(&config);
///
/// let filter = parser.parse_filter("userName eq \"bjensen\"").unwrap();
/// assert_eq!(filter, Filter::eq(Path::root().attribute("userName"), json!("bjensen")));
/// ```
pub struct Parser<'a> {
    config: &'a ParserConfig,
    reader: &'a dyn ScalarReader,
}

/// Entries of the operator stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    /// `(`
    Open,
    /// `not (`
    Not,
    And,
    Or,
}

impl Operator {
    /// Folds `operands` with a boolean operator. Returns `None` for group
    /// markers.
    fn combine(self, operands: Vec<Filter>) -> Option<Filter> {
        match self {
            Operator::And => Some(Filter::and(operands)),
            Operator::Or => Some(Filter::or(operands)),
            Operator::Open | Operator::Not => None,
        }
    }
}

/// What the previous token did, which decides whether the next token must
/// start a new term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Previous {
    Nothing,
    Open,
    Not,
    And,
    Or,
    Operand,
}

impl Previous {
    fn expects_new_term(self) -> bool {
        !matches!(self, Previous::Operand)
    }
}

impl<'a> Parser<'a> {
    /// Creates a parser reading comparison values as JSON.
    pub fn new(config: &'a ParserConfig) -> Self {
        Self {
            config,
            reader: &JsonScalarReader,
        }
    }

    /// Creates a parser with a custom comparison value reader.
    pub fn with_reader(config: &'a ParserConfig, reader: &'a dyn ScalarReader) -> Self {
        Self { config, reader }
    }

    /// Parses an attribute path such as `name.givenName`,
    /// `emails[type eq "work"].value` or
    /// `urn:ietf:params:scim:schemas:core:2.0:User:userName`.
    ///
    /// An empty expression yields the root path. An expression consisting of
    /// a namespace followed by `:` yields a path to the whole namespace.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::UnexpectedCharacter` for characters not allowed in
    /// attribute names, `ParseError::ExpectedAttributeName` for empty
    /// segments, and `ParseError::InvalidAttributePath` when a value filter
    /// fails to parse.
    pub fn parse_path(&self, expression: &str) -> ParseResult<Path> {
        let trimmed = expression.trim();
        debug!(expression = trimmed, "parsing path");

        if trimmed.is_empty() {
            return Ok(Path::root());
        }

        let (path, start) = match split_namespace(trimmed) {
            Some((namespace, "")) => return Ok(Path::with_namespace(namespace)),
            Some((namespace, rest)) => {
                let start = trimmed.chars().count() - rest.chars().count();
                (Path::with_namespace(namespace), start)
            }
            None => (Path::root(), 0),
        };

        let mut lexer = Lexer::with_cursor(Cursor::at(trimmed, start), self.config);
        let path = self.read_path(&mut lexer, path)?;
        debug!(elements = path.len(), "parsed path");
        Ok(path)
    }

    /// Parses a filter expression such as
    /// `title pr and (userType eq "Employee" or userType eq "Intern")`.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` describing the first problem found; no partial
    /// result is produced.
    pub fn parse_filter(&self, expression: &str) -> ParseResult<Filter> {
        let trimmed = expression.trim();
        debug!(expression = trimmed, "parsing filter");

        let mut lexer = Lexer::new(trimmed, self.config);
        let filter = self.read_filter(&mut lexer, false)?;
        debug!(?filter, "parsed filter");
        Ok(filter)
    }

    /// Reads path segments until the input is exhausted.
    fn read_path(&self, lexer: &mut Lexer<'_>, mut path: Path) -> ParseResult<Path> {
        while let Some(token) = lexer.next_path_token()? {
            if token.text.is_empty() {
                // Only legal between a closing `]` and the next `.`.
                if !path.last().is_some_and(|e| e.value_filter().is_some()) {
                    return Err(ParseError::ExpectedAttributeName {
                        offset: token.position,
                    });
                }
                continue;
            }

            let element = match token.strip_bracket() {
                Some("") => {
                    return Err(ParseError::ExpectedAttributeName {
                        offset: token.position,
                    });
                }
                Some(name) => {
                    let value_filter = self
                        .read_filter(lexer, true)
                        .map_err(|e| ParseError::invalid_attribute_path(token.position, e))?;
                    PathElement::with_filter(name, value_filter)
                }
                None => PathElement::new(token.text),
            };
            path = path.push(element);
        }
        Ok(path)
    }

    /// Reads a filter. In value filter mode, reading stops after the `]`
    /// that closes the filter.
    fn read_filter(&self, lexer: &mut Lexer<'_>, value_filter: bool) -> ParseResult<Filter> {
        let mut output: Vec<Filter> = Vec::new();
        let mut operators: Vec<Operator> = Vec::new();
        let mut previous = Previous::Nothing;
        let mut closed = false;

        while let Some(token) = lexer.next_filter_token(value_filter)? {
            let expect_new = previous.expects_new_term();

            previous = if expect_new && token.text == "(" {
                operators.push(Operator::Open);
                Previous::Open
            } else if expect_new && token.is_keyword("not") {
                match lexer.next_filter_token(value_filter)? {
                    Some(next) if next.text == "(" => operators.push(Operator::Not),
                    Some(next) => {
                        return Err(ParseError::ExpectedParenthesis {
                            offset: next.position,
                        });
                    }
                    None => return Err(ParseError::UnexpectedEndOfFilter),
                }
                Previous::Not
            } else if !expect_new && token.text == ")" {
                match close_group(&mut operators, &mut output)? {
                    Some(Operator::Not) => {
                        let operand = output.pop().ok_or(ParseError::UnexpectedEndOfFilter)?;
                        output.push(Filter::not(operand));
                    }
                    Some(_) => {}
                    None => {
                        return Err(ParseError::MismatchedParenthesis {
                            offset: token.position,
                        });
                    }
                }
                Previous::Operand
            } else if !expect_new && token.is_keyword("and") {
                operators.push(Operator::And);
                Previous::And
            } else if !expect_new && token.is_keyword("or") {
                fold_and_run(&mut operators, &mut output)?;
                operators.push(Operator::Or);
                Previous::Or
            } else if expect_new && token.text.ends_with('[') {
                let name = &token.text[..token.text.len() - 1];
                let path = self.attribute_path(name, token.position)?;
                let inner = self.read_filter(lexer, true)?;
                output.push(Filter::complex(path, inner));
                Previous::Operand
            } else if value_filter && !expect_new && token.text == "]" {
                closed = true;
                break;
            } else if expect_new {
                let filter = self.read_comparison(lexer, &token, value_filter)?;
                output.push(filter);
                Previous::Operand
            } else {
                return Err(ParseError::unexpected_token(token.text, token.position));
            };
        }

        if value_filter && !closed {
            return Err(ParseError::UnexpectedEndOfInput);
        }

        if close_group(&mut operators, &mut output)?.is_some() {
            return Err(ParseError::UnexpectedEndOfFilter);
        }

        match (output.pop(), output.is_empty()) {
            (Some(filter), true) => Ok(filter),
            _ => Err(ParseError::UnexpectedEndOfFilter),
        }
    }

    /// Reads the operator and value following the attribute path `token`.
    fn read_comparison(
        &self,
        lexer: &mut Lexer<'_>,
        token: &Token,
        value_filter: bool,
    ) -> ParseResult<Filter> {
        let path = self.attribute_path(&token.text, token.position)?;

        let op = lexer
            .next_filter_token(value_filter)?
            .ok_or(ParseError::UnexpectedEndOfFilter)?;

        if op.is_keyword("pr") {
            return Ok(Filter::pr(path));
        }

        let operator = ComparisonOperator::from_keyword(&op.text)
            .ok_or_else(|| ParseError::unrecognized_operator(op.text.clone(), op.position))?;
        let value = self.read_value(lexer)?;
        trace!(%operator, %value, "read comparison");
        Ok(Filter::comparison(operator, path, value))
    }

    /// Hands the rest of the input to the scalar reader, then moves the
    /// cursor past exactly what the reader consumed.
    fn read_value(&self, lexer: &mut Lexer<'_>) -> ParseResult<Value> {
        let cursor = lexer.cursor();
        cursor.mark();
        let offset = cursor.position();

        let read = self
            .reader
            .read_scalar(&cursor.remaining())
            .map_err(|cause| ParseError::invalid_comparison_value(offset, cause))?;

        cursor.reset();
        let Some((value, consumed)) = read else {
            return Err(ParseError::UnexpectedEndOfFilter);
        };
        cursor.skip(consumed);

        if value.is_array() || value.is_object() {
            return Err(ParseError::invalid_comparison_value(
                offset,
                "comparison value must be a scalar",
            ));
        }
        Ok(value)
    }

    /// Parses the attribute path written in a filter token.
    fn attribute_path(&self, text: &str, position: usize) -> ParseResult<Path> {
        let path = self
            .parse_path(text)
            .map_err(|e| ParseError::invalid_attribute_path(position, e))?;
        if path.is_root() {
            return Err(ParseError::ExpectedAttributeName { offset: position });
        }
        Ok(path)
    }
}

/// Splits `urn:...:attr` into the namespace and the remainder after the
/// last `:` that precedes any `[`.
fn split_namespace(expression: &str) -> Option<(&str, &str)> {
    if !is_namespace(expression) {
        return None;
    }
    let head = match expression.find('[') {
        Some(bracket) => &expression[..bracket],
        None => expression,
    };
    let colon = head.rfind(':')?;
    Some((&expression[..colon], &expression[colon + 1..]))
}

/// Pops operators down to the innermost `(` or `not`, folding each run of
/// one boolean operator into a single node on the output stack.
///
/// Returns the group marker that ended the reduction, or `None` if the
/// operator stack ran empty.
fn close_group(
    operators: &mut Vec<Operator>,
    output: &mut Vec<Filter>,
) -> ParseResult<Option<Operator>> {
    let mut run: Option<Operator> = None;
    // Right-most operand first.
    let mut operands: Vec<Filter> = Vec::new();

    while let Some(operator) = operators.pop() {
        if matches!(operator, Operator::Open | Operator::Not) {
            if let Some(current) = run {
                fold(current, &mut operands, output)?;
            }
            return Ok(Some(operator));
        }

        if let Some(current) = run.filter(|current| *current != operator) {
            fold(current, &mut operands, output)?;
        }
        run = Some(operator);
        operands.push(output.pop().ok_or(ParseError::UnexpectedEndOfFilter)?);
    }

    if let Some(current) = run {
        fold(current, &mut operands, output)?;
    }
    Ok(None)
}

/// Completes a run: the left-most operand is still on the output stack.
fn fold(
    operator: Operator,
    operands: &mut Vec<Filter>,
    output: &mut Vec<Filter>,
) -> ParseResult<()> {
    operands.push(output.pop().ok_or(ParseError::UnexpectedEndOfFilter)?);
    operands.reverse();
    trace!(?operator, operands = operands.len(), "folding operator run");
    if let Some(filter) = operator.combine(std::mem::take(operands)) {
        output.push(filter);
    }
    Ok(())
}

/// Before an `or` is pushed, folds the `and` run on top of the operator
/// stack so that `and` binds tighter.
fn fold_and_run(operators: &mut Vec<Operator>, output: &mut Vec<Filter>) -> ParseResult<()> {
    let mut count = 0;
    while operators.last() == Some(&Operator::And) {
        operators.pop();
        count += 1;
    }
    if count == 0 {
        return Ok(());
    }
    if output.len() <= count {
        return Err(ParseError::UnexpectedEndOfFilter);
    }
    let operands = output.split_off(output.len() - count - 1);
    trace!(operands = operands.len(), "folding and run before or");
    output.push(Filter::and(operands));
    Ok(())
}
