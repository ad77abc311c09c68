//! Output formatting utilities for the scimq CLI.
//!
//! - [`tree`] - Indented tree output for paths and filters

pub mod tree;

use serde::Serialize;

pub use tree::{format_filter_tree, format_path_tree};

/// Formats any serializable value as pretty JSON.
pub fn format_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
