//! Reading comparison values.
//!
//! Comparison values are JSON scalars. The filter parser hands the rest of
//! the expression to a [`ScalarReader`] and then rewinds its cursor to the
//! exact number of characters the reader consumed.

use serde_json::Value;

/// Reads a single scalar value from the start of a string.
pub trait ScalarReader {
    /// Reads one scalar (string, number, boolean or null) at the start of
    /// `input`, skipping leading whitespace.
    ///
    /// Returns the value together with the number of characters consumed,
    /// including the skipped whitespace, or `None` when `input` holds no
    /// value at all.
    ///
    /// # Errors
    ///
    /// Returns a message describing why the text is not a valid scalar.
    fn read_scalar(&self, input: &str) -> Result<Option<(Value, usize)>, String>;
}

/// [`ScalarReader`] for JSON literals, backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonScalarReader;

impl JsonScalarReader {
    /// Characters that end a bare literal such as a number or `true`.
    fn ends_literal(c: char) -> bool {
        c.is_whitespace() || matches!(c, '(' | ')' | '[' | ']')
    }
}

impl ScalarReader for JsonScalarReader {
    fn read_scalar(&self, input: &str) -> Result<Option<(Value, usize)>, String> {
        let body = input.trim_start();
        let leading = input.chars().count() - body.chars().count();

        let Some(first) = body.chars().next() else {
            return Ok(None);
        };

        match first {
            '"' => {
                // Strings delimit themselves, so the stream reader stops at
                // the closing quote and tells us how far it got.
                let mut stream = serde_json::Deserializer::from_str(body).into_iter::<Value>();
                match stream.next() {
                    Some(Ok(value)) => {
                        let consumed = body[..stream.byte_offset()].chars().count();
                        Ok(Some((value, leading + consumed)))
                    }
                    Some(Err(e)) => Err(e.to_string()),
                    None => Ok(None),
                }
            }
            '[' | '{' => Err("comparison value must be a scalar".to_string()),
            _ => {
                let literal: String = body
                    .chars()
                    .take_while(|c| !Self::ends_literal(*c))
                    .collect();
                let value: Value = serde_json::from_str(&literal).map_err(|e| e.to_string())?;
                Ok(Some((value, leading + literal.chars().count())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read(input: &str) -> Result<Option<(Value, usize)>, String> {
        JsonScalarReader.read_scalar(input)
    }

    #[test]
    fn test_read_string() {
        assert_eq!(read("\"work\"]").unwrap(), Some((json!("work"), 6)));
    }

    #[test]
    fn test_read_string_with_escapes_and_delimiters() {
        assert_eq!(
            read(r#""a \"(b)\" c" and x pr"#).unwrap(),
            Some((json!("a \"(b)\" c"), 13))
        );
    }

    #[test]
    fn test_read_string_counts_characters() {
        assert_eq!(read("\"größe\")").unwrap(), Some((json!("größe"), 7)));
    }

    #[test]
    fn test_read_number_before_paren() {
        assert_eq!(read("1)").unwrap(), Some((json!(1), 1)));
        assert_eq!(read("-2.5e3 or").unwrap(), Some((json!(-2500.0), 6)));
    }

    #[test]
    fn test_read_literals() {
        assert_eq!(read("true").unwrap(), Some((json!(true), 4)));
        assert_eq!(read("false]").unwrap(), Some((json!(false), 5)));
        assert_eq!(read("null and").unwrap(), Some((Value::Null, 4)));
    }

    #[test]
    fn test_leading_whitespace_is_consumed() {
        assert_eq!(read("  7").unwrap(), Some((json!(7), 3)));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(read("").unwrap(), None);
        assert_eq!(read("   ").unwrap(), None);
    }

    #[test]
    fn test_rejects_non_scalars() {
        assert!(read("[1]").is_err());
        assert!(read("{\"a\": 1}").is_err());
    }

    #[test]
    fn test_rejects_bare_words() {
        assert!(read("work").is_err());
        assert!(read("\"unterminated").is_err());
    }
}
