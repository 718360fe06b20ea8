//! The recursive tree: an atom or an ordered list of child nodes.
//!
//! Each list exclusively owns its children, so a tree can never contain a
//! cycle or share a subtree with another tree. Cloning is a full structural
//! copy, and every non-mutating operation in this crate builds a fresh tree.

use std::fmt;

use num_bigint::BigInt;
use rust_decimal::Decimal;

use crate::{
    error::{LlllError, Result},
    output,
    rational::Rational,
    value::{Value, type_name},
};

/// A node of an llll tree.
///
/// # Examples
///
/// ```
/// use llll::{llll, Node};
///
/// let mut l = llll![1, llll![2, 3]];
/// assert_eq!(l.depth(), 2);
/// assert_eq!(l.length(), 2);
///
/// l.append(llll![4, 5]).unwrap();
/// assert_eq!(l.to_string(), "1\n[ 2 3 ]\n[ 4 5 ]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    /// A leaf holding exactly one scalar
    Atom(Value),

    /// Ordered children; the empty list is "null"
    List(Vec<Node>),
}

impl Default for Node {
    fn default() -> Self {
        Node::null()
    }
}

impl Node {
    /// The empty list.
    pub fn null() -> Self {
        Node::List(Vec::new())
    }

    pub fn atom(value: impl Into<Value>) -> Self {
        Node::Atom(value.into())
    }

    /// Builds a list from anything convertible into nodes.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Node>,
    {
        Node::List(items.into_iter().map(Into::into).collect())
    }

    pub fn is_atomic(&self) -> bool {
        matches!(self, Node::Atom(_))
    }

    /// True only for the empty list (an atom is never null).
    pub fn is_null(&self) -> bool {
        matches!(self, Node::List(items) if items.is_empty())
    }

    /// The scalar of an atom.
    pub fn value(&self) -> Result<&Value> {
        match self {
            Node::Atom(v) => Ok(v),
            Node::List(_) => Err(LlllError::Type(
                "Cannot get value of non-atomic llll".to_string(),
            )),
        }
    }

    /// Direct children; empty for an atom.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Atom(_) => &[],
            Node::List(items) => items,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.children().iter()
    }

    /// Atoms and the empty list have depth 0; any other list is one deeper
    /// than its deepest child.
    pub fn depth(&self) -> usize {
        match self {
            Node::Atom(_) => 0,
            Node::List(items) if items.is_empty() => 0,
            Node::List(items) => 1 + items.iter().map(Node::depth).max().unwrap_or(0),
        }
    }

    /// Number of direct children. A bare atom counts as a single element.
    pub fn length(&self) -> usize {
        match self {
            Node::Atom(_) => 1,
            Node::List(items) => items.len(),
        }
    }

    /// Appends one element in place.
    ///
    /// An empty target gains its first element (appending is never a no-op
    /// on null). Appending null itself adds nothing; wrap it
    /// (`Node::null().wrap(1)`) to append an empty sublist.
    pub fn append(&mut self, item: impl Into<Node>) -> Result<()> {
        let item = item.into();
        match self {
            Node::Atom(v) => Err(LlllError::Type(format!(
                "Cannot append to atomic llll ({})",
                type_name(v)
            ))),
            Node::List(_) if item.is_null() => Ok(()),
            Node::List(items) => {
                items.push(item);
                Ok(())
            }
        }
    }

    /// Appends every element of `items` in order.
    pub fn extend<I, T>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<Node>,
    {
        if let Node::Atom(v) = self {
            return Err(LlllError::Type(format!(
                "Cannot extend atomic llll ({})",
                type_name(v)
            )));
        }
        for item in items {
            self.append(item)?;
        }
        Ok(())
    }

    /// Structural equality: same shape, and atoms equal in kind and value.
    ///
    /// Unlike the `==` operator of [`BinOp`](crate::BinOp), `Integer(2)` is
    /// not structurally equal to the rational `2/1`.
    pub fn equals(&self, other: &Node) -> bool {
        self == other
    }

    /// Wraps the node in `levels` additional lists.
    pub fn wrap(self, levels: usize) -> Node {
        (0..levels).fold(self, |node, _| Node::List(vec![node]))
    }

    /// All atoms in pre-order, as one flat list.
    pub fn flatten(&self) -> Node {
        fn collect(node: &Node, out: &mut Vec<Node>) {
            match node {
                Node::Atom(_) => out.push(node.clone()),
                Node::List(items) => items.iter().for_each(|item| collect(item, out)),
            }
        }

        let mut atoms = Vec::new();
        collect(self, &mut atoms);
        Node::List(atoms)
    }
}

impl fmt::Display for Node {
    /// Human-readable text form (the `.txt` layout).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&output::to_text(self))
    }
}

impl IntoIterator for Node {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    /// The children of a list, or the atom itself as a single element.
    fn into_iter(self) -> Self::IntoIter {
        match self {
            Node::Atom(_) => vec![self].into_iter(),
            Node::List(items) => items.into_iter(),
        }
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Node> for Node {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Node::List(iter.into_iter().collect())
    }
}

impl From<Value> for Node {
    fn from(v: Value) -> Self {
        Node::Atom(v)
    }
}

impl From<&Node> for Node {
    fn from(n: &Node) -> Self {
        n.clone()
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(items: Vec<T>) -> Self {
        Node::list(items)
    }
}

macro_rules! atom_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Node {
                fn from(v: $t) -> Self {
                    Node::Atom(Value::from(v))
                }
            }
        )*
    };
}

atom_from!(i64, i32, BigInt, Rational, Decimal, &str, String, bool);

/// Builds a list node from its elements.
///
/// Each element goes through `Node::from`, so integers, strings, booleans,
/// rationals and nested `llll!` lists can be mixed freely.
///
/// ```
/// use llll::llll;
///
/// let l = llll![10, "foo", llll![1, 2], llll![]];
/// assert_eq!(l.length(), 4);
/// assert!(l.children()[3].is_null());
/// ```
#[macro_export]
macro_rules! llll {
    () => {
        $crate::Node::null()
    };
    ($($item:expr),+ $(,)?) => {
        $crate::Node::List(vec![$($crate::Node::from($item)),+])
    };
}
