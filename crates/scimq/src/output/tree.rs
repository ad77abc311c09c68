//! Indented tree rendering of parsed paths and filters.

use owo_colors::OwoColorize;
use scim_query_rs::{Filter, Path, PathElement};

/// A labelled node with ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    /// A node without children.
    pub fn leaf(label: impl Into<String>) -> Self {
        Self::new(label, Vec::new())
    }

    /// A node with children.
    pub fn new(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    /// Renders the tree, one node per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.label);
        out.push('\n');
        self.render_children("", &mut out);
        out
    }

    fn render_children(&self, prefix: &str, out: &mut String) {
        let count = self.children.len();
        for (i, child) in self.children.iter().enumerate() {
            let last = i + 1 == count;
            out.push_str(prefix);
            out.push_str(if last { "└── " } else { "├── " });
            out.push_str(&child.label);
            out.push('\n');

            let prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
            child.render_children(&prefix, out);
        }
    }
}

/// Formats a path as a tree.
pub fn format_path_tree(path: &Path, use_colors: bool) -> String {
    path_node(path, use_colors).render()
}

/// Formats a filter as a tree.
pub fn format_filter_tree(filter: &Filter, use_colors: bool) -> String {
    filter_node(filter, use_colors).render()
}

fn path_node(path: &Path, use_colors: bool) -> TreeNode {
    let mut children = Vec::new();
    if let Some(namespace) = path.namespace() {
        children.push(TreeNode::leaf(format!(
            "namespace {}",
            namespace_text(namespace, use_colors)
        )));
    }
    children.extend(path.iter().map(|element| element_node(element, use_colors)));

    let label = if path.is_root() && path.namespace().is_none() {
        "path (root)"
    } else {
        "path"
    };
    TreeNode::new(keyword(label, use_colors), children)
}

fn element_node(element: &PathElement, use_colors: bool) -> TreeNode {
    match element.value_filter() {
        Some(filter) => TreeNode::new(
            format!("{}[]", attribute(element.attribute(), use_colors)),
            vec![filter_node(filter, use_colors)],
        ),
        None => TreeNode::leaf(attribute(element.attribute(), use_colors)),
    }
}

fn filter_node(filter: &Filter, use_colors: bool) -> TreeNode {
    match filter {
        Filter::Comparison {
            operator,
            path,
            value,
        } => TreeNode::leaf(format!(
            "{} {} {}",
            path_label(path, use_colors),
            paint_operator(operator.keyword(), use_colors),
            literal(&value.to_string(), use_colors)
        )),
        Filter::Presence { path } => TreeNode::leaf(format!(
            "{} {}",
            path_label(path, use_colors),
            paint_operator("pr", use_colors)
        )),
        Filter::Not { operand } => {
            TreeNode::new(keyword("not", use_colors), vec![filter_node(operand, use_colors)])
        }
        Filter::And { operands } => TreeNode::new(
            keyword("and", use_colors),
            operands.iter().map(|f| filter_node(f, use_colors)).collect(),
        ),
        Filter::Or { operands } => TreeNode::new(
            keyword("or", use_colors),
            operands.iter().map(|f| filter_node(f, use_colors)).collect(),
        ),
        Filter::Complex { path, value_filter } => TreeNode::new(
            format!("{}[]", path_label(path, use_colors)),
            vec![filter_node(value_filter, use_colors)],
        ),
    }
}

/// One-line label for an attribute path inside a filter.
fn path_label(path: &Path, use_colors: bool) -> String {
    let names: Vec<&str> = path.iter().map(PathElement::attribute).collect();
    let dotted = attribute(&names.join("."), use_colors);
    match path.namespace() {
        Some(namespace) => format!("{}:{}", namespace_text(namespace, use_colors), dotted),
        None => dotted,
    }
}

fn keyword(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.blue().bold().to_string()
    } else {
        text.to_string()
    }
}

fn attribute(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.cyan().to_string()
    } else {
        text.to_string()
    }
}

fn paint_operator(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.yellow().to_string()
    } else {
        text.to_string()
    }
}

fn literal(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.green().to_string()
    } else {
        text.to_string()
    }
}

fn namespace_text(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_filter(input: &str) -> Filter {
        input.parse().unwrap()
    }

    #[test]
    fn test_render_nested_tree() {
        let tree = TreeNode::new(
            "a",
            vec![
                TreeNode::new("b", vec![TreeNode::leaf("c")]),
                TreeNode::leaf("d"),
            ],
        );
        assert_eq!(tree.render(), "a\n├── b\n│   └── c\n└── d\n");
    }

    #[test]
    fn test_filter_tree() {
        let filter = parse_filter("title pr and (userType eq \"Employee\" or not (age lt 18))");
        assert_eq!(
            format_filter_tree(&filter, false),
            "and\n\
             ├── title pr\n\
             └── or\n    \
                 ├── userType eq \"Employee\"\n    \
                 └── not\n        \
                     └── age lt 18\n"
        );
    }

    #[test]
    fn test_complex_filter_tree() {
        let filter = parse_filter("emails[type eq \"work\"]");
        assert_eq!(
            format_filter_tree(&filter, false),
            "emails[]\n└── type eq \"work\"\n"
        );
    }

    #[test]
    fn test_namespaced_label() {
        let filter = parse_filter("urn:example:name.givenName pr");
        assert_eq!(
            format_filter_tree(&filter, false),
            "urn:example:name.givenName pr\n"
        );
    }

    #[test]
    fn test_path_tree() {
        let path: Path = "urn:example:emails[primary eq true].value".parse().unwrap();
        assert_eq!(
            format_path_tree(&path, false),
            "path\n\
             ├── namespace urn:example\n\
             ├── emails[]\n\
             │   └── primary eq true\n\
             └── value\n"
        );
    }

    #[test]
    fn test_root_path_tree() {
        assert_eq!(format_path_tree(&Path::root(), false), "path (root)\n");
    }

    #[test]
    fn test_colors_add_escape_codes() {
        let filter = parse_filter("title pr");
        let colored = format_filter_tree(&filter, true);
        assert!(colored.contains("\x1b["));
        assert!(colored.contains("title"));
    }
}
