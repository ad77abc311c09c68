//! Attribute paths.

use std::str::FromStr;

use serde::Serialize;

use crate::ast::Filter;
use crate::config::ParserConfig;
use crate::error::ParseError;

/// Returns true if `s` looks like a schema namespace URN.
///
/// ```
/// use scim_query_rs::is_namespace;
///
/// assert!(is_namespace("urn:ietf:params:scim:schemas:core:2.0:User"));
/// assert!(!is_namespace("urn:"));
/// assert!(!is_namespace("userName"));
/// ```
pub fn is_namespace(s: &str) -> bool {
    s.len() > 4 && s.get(..4).is_some_and(|prefix| prefix.eq_ignore_ascii_case("urn:"))
}

/// Compares two names the way SCIM compares attribute names.
fn names_equal(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// One segment of a [`Path`]: an attribute name with an optional value
/// filter selecting entries of a multi-valued attribute.
#[derive(Debug, Clone, Serialize)]
pub struct PathElement {
    attribute: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value_filter: Option<Filter>,
}

impl PathElement {
    /// Creates an element without a value filter.
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            value_filter: None,
        }
    }

    /// Creates an element narrowed by `value_filter`.
    pub fn with_filter(attribute: impl Into<String>, value_filter: Filter) -> Self {
        Self {
            attribute: attribute.into(),
            value_filter: Some(value_filter),
        }
    }

    /// The attribute name.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// The value filter, if any.
    pub fn value_filter(&self) -> Option<&Filter> {
        self.value_filter.as_ref()
    }
}

impl PartialEq for PathElement {
    fn eq(&self, other: &Self) -> bool {
        names_equal(&self.attribute, &other.attribute) && self.value_filter == other.value_filter
    }
}

/// A dotted attribute reference, optionally prefixed by a schema namespace.
///
/// A path with a namespace and no elements denotes the whole namespace. A
/// path with neither is the resource root.
///
/// Paths are immutable; the builder methods return new paths.
///
/// # Example
///
/// ```
/// use scim_query_rs::Path;
///
/// let path = Path::root().attribute("name").attribute("givenName");
/// assert_eq!(path.len(), 2);
/// assert_eq!(path, "NAME.givenname".parse::<Path>().unwrap());
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct Path {
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    elements: Vec<PathElement>,
}

impl Path {
    /// The root path: no namespace and no elements.
    pub fn root() -> Self {
        Self::default()
    }

    /// A path denoting a whole namespace.
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            elements: Vec::new(),
        }
    }

    /// Returns true if the path has no elements.
    pub fn is_root(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Same as [`Path::is_root`].
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The namespace, if any.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The element at `index`.
    pub fn element(&self, index: usize) -> Option<&PathElement> {
        self.elements.get(index)
    }

    /// The last element.
    pub fn last(&self) -> Option<&PathElement> {
        self.elements.last()
    }

    /// All elements in order.
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// Iterates over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, PathElement> {
        self.elements.iter()
    }

    /// Returns this path extended by `attribute`.
    pub fn attribute(self, attribute: impl Into<String>) -> Self {
        self.push(PathElement::new(attribute))
    }

    /// Returns this path extended by `attribute` narrowed by `filter`.
    pub fn attribute_with_filter(self, attribute: impl Into<String>, filter: Filter) -> Self {
        self.push(PathElement::with_filter(attribute, filter))
    }

    /// Returns this path extended by the elements of `other`.
    ///
    /// The namespace of `other` is ignored.
    pub fn append(mut self, other: &Path) -> Self {
        self.elements.extend(other.elements.iter().cloned());
        self
    }

    /// Returns the prefix made of the first `len` elements.
    pub fn sub(&self, len: usize) -> Self {
        Self {
            namespace: self.namespace.clone(),
            elements: self.elements[..len.min(self.elements.len())].to_vec(),
        }
    }

    /// Returns a copy with the attribute name at `index` replaced.
    ///
    /// Returns `None` if `index` is out of range.
    pub fn replace_attribute(&self, index: usize, attribute: impl Into<String>) -> Option<Self> {
        let mut path = self.clone();
        path.elements.get_mut(index)?.attribute = attribute.into();
        Some(path)
    }

    /// Returns a copy with the value filter at `index` replaced.
    ///
    /// Returns `None` if `index` is out of range.
    pub fn replace_filter(&self, index: usize, filter: Option<Filter>) -> Option<Self> {
        let mut path = self.clone();
        path.elements.get_mut(index)?.value_filter = filter;
        Some(path)
    }

    /// Returns a copy with every value filter removed.
    pub fn without_filters(&self) -> Self {
        Self {
            namespace: self.namespace.clone(),
            elements: self
                .elements
                .iter()
                .map(|e| PathElement::new(e.attribute.clone()))
                .collect(),
        }
    }

    pub(crate) fn push(mut self, element: PathElement) -> Self {
        self.elements.push(element);
        self
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        let namespaces_equal = match (&self.namespace, &other.namespace) {
            (Some(a), Some(b)) => names_equal(a, b),
            (None, None) => true,
            _ => false,
        };
        namespaces_equal && self.elements == other.elements
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathElement;
    type IntoIter = std::slice::Iter<'a, PathElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl FromStr for Path {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse_path(s, &ParserConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_namespace() {
        assert!(is_namespace("urn:x"));
        assert!(is_namespace("URN:example:schema"));
        assert!(!is_namespace("urn:"));
        assert!(!is_namespace("urn"));
        assert!(!is_namespace("name"));
        assert!(!is_namespace("ü"));
    }

    #[test]
    fn test_builder() {
        let path = Path::with_namespace("urn:example")
            .attribute("emails")
            .attribute("value");

        assert_eq!(path.namespace(), Some("urn:example"));
        assert_eq!(path.len(), 2);
        assert_eq!(path.element(0).unwrap().attribute(), "emails");
        assert_eq!(path.last().unwrap().attribute(), "value");
        assert!(path.element(2).is_none());
    }

    #[test]
    fn test_root() {
        let path = Path::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.namespace(), None);
    }

    #[test]
    fn test_equality_ignores_case_of_names() {
        let a = Path::with_namespace("urn:Example").attribute("userName");
        let b = Path::with_namespace("URN:example").attribute("USERNAME");
        assert_eq!(a, b);

        let c = Path::root().attribute("userName");
        assert_ne!(a, c);
    }

    #[test]
    fn test_equality_respects_filters() {
        let filter = Filter::eq(Path::root().attribute("type"), json!("work"));
        let a = Path::root().attribute_with_filter("emails", filter.clone());
        let b = Path::root().attribute("emails");
        assert_ne!(a, b);
        assert_eq!(a.without_filters(), b);
        assert_eq!(a.replace_filter(0, None), Some(b.clone()));
        assert_eq!(b.replace_filter(0, Some(filter)), Some(a));
    }

    #[test]
    fn test_sub_and_append() {
        let path = Path::root().attribute("a").attribute("b").attribute("c");
        assert_eq!(path.sub(2), Path::root().attribute("a").attribute("b"));
        assert_eq!(path.sub(10), path);

        let tail = Path::with_namespace("urn:other").attribute("d");
        let joined = path.sub(1).append(&tail);
        assert_eq!(joined, Path::root().attribute("a").attribute("d"));
    }

    #[test]
    fn test_replace_attribute() {
        let path = Path::root().attribute("a").attribute("b");
        assert_eq!(
            path.replace_attribute(1, "z"),
            Some(Path::root().attribute("a").attribute("z"))
        );
        assert_eq!(path.replace_attribute(2, "z"), None);
    }

    #[test]
    fn test_iteration_order() {
        let path = Path::root().attribute("x").attribute("y");
        let names: Vec<&str> = (&path).into_iter().map(PathElement::attribute).collect();
        assert_eq!(names, vec!["x", "y"]);
        assert_eq!(path.iter().count(), 2);
    }

    #[test]
    fn test_serialize() {
        let path = Path::with_namespace("urn:x").attribute("name");
        let value = serde_json::to_value(&path).unwrap();
        assert_eq!(
            value,
            json!({"namespace": "urn:x", "elements": [{"attribute": "name"}]})
        );
    }
}
