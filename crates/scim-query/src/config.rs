//! Parser configuration.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Options controlling which characters are legal inside attribute names.
///
/// Attribute names always accept letters, digits, `-`, `_` and `$`. Some
/// servers use nonstandard names (for example with semicolons); those extra
/// characters are enabled here. A `ParserConfig` is passed by reference to
/// every parse call and is never modified by the parser.
///
/// # Example
///
/// ```
/// use scim_query_rs::{parse_path, ParserConfig};
///
/// let config = ParserConfig::default().allow(';');
/// let path = parse_path("name;lang", &config).unwrap();
/// assert_eq!(path.element(0).unwrap().attribute(), "name;lang");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Extra characters permitted in attribute names.
    #[serde(default)]
    extended: BTreeSet<char>,
}

impl ParserConfig {
    /// Creates a configuration that only allows standard naming characters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a character to the extended naming set.
    pub fn allow(mut self, c: char) -> Self {
        self.extended.insert(c);
        self
    }

    /// Adds several characters to the extended naming set.
    pub fn allow_all(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.extended.extend(chars);
        self
    }

    /// Removes every extended character.
    pub fn clear(mut self) -> Self {
        self.extended.clear();
        self
    }

    /// Returns true if `c` is in the extended naming set.
    pub fn is_extended(&self, c: char) -> bool {
        self.extended.contains(&c)
    }

    /// The extended naming set.
    pub fn extended(&self) -> &BTreeSet<char> {
        &self.extended
    }

    /// Returns true if `c` may appear in an attribute name.
    pub(crate) fn is_name_char(&self, c: char) -> bool {
        c == '-' || c == '_' || c == '$' || c.is_alphanumeric() || self.is_extended(c)
    }
}
