//! Serialization of trees to the text and native forms.
//!
//! Both writers are deterministic and their output reads back through
//! [`parse_text`](crate::parse_text) / [`parse_native`](crate::parse_native)
//! to a structurally equal tree.
//!
//! # Text form
//!
//! The root's own brackets are omitted and its elements are laid out the way
//! bach prints an llll:
//!
//! - a list of depth 2 or more puts each element on its own line, indented
//!   by two spaces per level
//! - a shallower list stays on one line: `[ 2 3 ]`
//! - strings are quoted only when a bare word would read back differently
//!
//! # Native form
//!
//! One line, outer brackets kept, every string quoted.
//!
//! # Examples
//!
//! ```
//! use llll::{llll, to_native, to_text};
//!
//! let l = llll![1, llll![2, 3], llll![llll![4, 5], 6]];
//!
//! assert_eq!(to_text(&l), "1\n[ 2 3 ]\n[\n  [ 4 5 ]\n  6\n]");
//! assert_eq!(to_native(&l), "[ 1 [ 2 3 ] [ [ 4 5 ] 6 ] ]");
//! ```

use crate::{lexer::is_literal_like, node::Node, value::Value};

/// Lists at least this deep are written one element per line.
const INDENTED_DEPTH: usize = 2;

pub struct LlllPrinter {
    native: bool,
}

impl LlllPrinter {
    pub fn new(native: bool) -> Self {
        LlllPrinter { native }
    }

    pub fn print(&self, node: &Node) -> String {
        if self.native {
            return self.print_compact(node);
        }
        match node {
            Node::Atom(v) => self.print_value(v),
            Node::List(items) => {
                let separator = if node.depth() >= INDENTED_DEPTH { "\n" } else { " " };
                items
                    .iter()
                    .map(|item| self.print_indented(item, 0))
                    .collect::<Vec<_>>()
                    .join(separator)
            }
        }
    }

    fn print_value(&self, value: &Value) -> String {
        match value {
            Value::String(s) if self.native || needs_quotes(s) => {
                format!("\"{}\"", self.escape_string(s))
            }
            other => other.to_string(),
        }
    }

    fn print_compact(&self, node: &Node) -> String {
        match node {
            Node::Atom(v) => self.print_value(v),
            Node::List(items) if items.is_empty() => "[]".to_string(),
            Node::List(items) => {
                let items: Vec<String> = items.iter().map(|n| self.print_compact(n)).collect();
                format!("[ {} ]", items.join(" "))
            }
        }
    }

    fn print_indented(&self, node: &Node, indent: usize) -> String {
        match node {
            Node::List(items) if node.depth() >= INDENTED_DEPTH => {
                let mut result = "[".to_string();
                for item in items {
                    result.push('\n');
                    result.push_str(&self.indent(indent + 1));
                    result.push_str(&self.print_indented(item, indent + 1));
                }
                result.push('\n');
                result.push_str(&self.indent(indent));
                result.push(']');
                result
            }
            _ => self.print_compact(node),
        }
    }

    fn indent(&self, level: usize) -> String {
        "  ".repeat(level)
    }

    fn escape_string(&self, s: &str) -> String {
        s.chars()
            .flat_map(|c| match c {
                '"' => vec!['\\', '"'],
                '\\' => vec!['\\', '\\'],
                '\n' => vec!['\\', 'n'],
                '\r' => vec!['\\', 'r'],
                '\t' => vec!['\\', 't'],
                // other control characters use the lexer's `\u{hex}` form, not JSON's `\uXXXX`
                c if c.is_control() => format!("\\u{{{:x}}}", c as u32).chars().collect(),
                c => vec![c],
            })
            .collect()
    }
}

/// Whether a string must be quoted to survive a text-form round trip.
fn needs_quotes(s: &str) -> bool {
    s.is_empty()
        || s.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '[' | ']' | '"' | '\'' | '\\')
        })
        || is_literal_like(s)
}

/// Writes the text (`.txt`) form.
///
/// An atomic root is written as the one-element list holding it.
pub fn to_text(node: &Node) -> String {
    LlllPrinter::new(false).print(node)
}

/// Writes the native (`.llll`) form on a single line.
pub fn to_native(node: &Node) -> String {
    LlllPrinter::new(true).print(node)
}
