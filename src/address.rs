use std::{
    fmt,
    ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeToInclusive},
};

use tracing::trace;

use crate::{
    error::{LlllError, Result},
    node::Node,
    value::Value,
};

/// One step of an address, consumed at one level of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// 1-based position
    ///
    /// # Examples
    /// - `Index(1)` → first child
    /// - `Index(-1)` → last child
    /// - `Index(0)` → the empty list (never an error)
    Index(i64),

    /// Contiguous run of children, 1-based and inclusive on both ends
    ///
    /// Negative bounds count from the end like indices; a missing bound
    /// means the first/last child. Bounds are clamped to the list.
    ///
    /// # Examples
    /// - `Slice { start: Some(2), end: Some(3) }` → second and third children
    /// - `Slice { start: Some(-2), end: None }` → the last two children
    Slice { start: Option<i64>, end: Option<i64> },

    /// Key lookup among `[key value...]` pairs
    ///
    /// Selects the first child that is a list headed by this string, and
    /// yields the elements after the key.
    Key(String),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Index(i) => write!(f, "{}", i),
            Step::Slice { start, end } => {
                if let Some(s) = start {
                    write!(f, "{}", s)?;
                }
                f.write_str("..=")?;
                if let Some(e) = end {
                    write!(f, "{}", e)?;
                }
                Ok(())
            }
            Step::Key(k) => write!(f, "{:?}", k),
        }
    }
}

impl From<i64> for Step {
    fn from(i: i64) -> Self {
        Step::Index(i)
    }
}

impl From<i32> for Step {
    fn from(i: i32) -> Self {
        Step::Index(i as i64)
    }
}

impl From<&str> for Step {
    fn from(k: &str) -> Self {
        Step::Key(k.to_string())
    }
}

impl From<String> for Step {
    fn from(k: String) -> Self {
        Step::Key(k)
    }
}

impl From<RangeInclusive<i64>> for Step {
    fn from(r: RangeInclusive<i64>) -> Self {
        Step::Slice {
            start: Some(*r.start()),
            end: Some(*r.end()),
        }
    }
}

impl From<RangeFrom<i64>> for Step {
    fn from(r: RangeFrom<i64>) -> Self {
        Step::Slice {
            start: Some(r.start),
            end: None,
        }
    }
}

impl From<RangeToInclusive<i64>> for Step {
    fn from(r: RangeToInclusive<i64>) -> Self {
        Step::Slice {
            start: None,
            end: Some(r.end),
        }
    }
}

impl From<RangeFull> for Step {
    fn from(_: RangeFull) -> Self {
        Step::Slice {
            start: None,
            end: None,
        }
    }
}

/// An immutable sequence of steps, resolved left to right, one tree level
/// per step.
///
/// # Examples
///
/// ```
/// use llll::{address, llll, Address};
///
/// let l = llll![
///     llll!["foo", llll!["one", 2, 3], llll!["two", 5, 6]],
///     llll!["bar", llll!["one", 8, 9], llll!["two", 11, 12]],
/// ];
/// assert_eq!(l.get(("bar", 2, 3)).unwrap(), l.get(("bar", "two", 2)).unwrap());
/// assert_eq!(l.get(address!["foo", "one"]).unwrap(), llll![2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Address(Vec<Step>);

impl Address {
    pub fn new(steps: Vec<Step>) -> Self {
        Address(steps)
    }

    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", step)?;
        }
        f.write_str(")")
    }
}

impl From<Vec<Step>> for Address {
    fn from(steps: Vec<Step>) -> Self {
        Address(steps)
    }
}

impl From<&[usize]> for Address {
    /// Addresses reported by the mapper are plain 1-based positions.
    fn from(positions: &[usize]) -> Self {
        Address(positions.iter().map(|&p| Step::Index(p as i64)).collect())
    }
}

impl From<&Address> for Address {
    fn from(a: &Address) -> Self {
        a.clone()
    }
}

macro_rules! address_from_step {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Address {
                fn from(step: $t) -> Self {
                    Address(vec![Step::from(step)])
                }
            }
        )*
    };
}

address_from_step!(
    Step,
    i64,
    i32,
    &str,
    String,
    RangeInclusive<i64>,
    RangeFrom<i64>,
    RangeToInclusive<i64>,
    RangeFull
);

macro_rules! address_from_tuple {
    ($($name:ident $var:ident),+) => {
        impl<$($name: Into<Step>),+> From<($($name,)+)> for Address {
            fn from(($($var,)+): ($($name,)+)) -> Self {
                Address(vec![$($var.into()),+])
            }
        }
    };
}

address_from_tuple!(A a, B b);
address_from_tuple!(A a, B b, C c);
address_from_tuple!(A a, B b, C c, D d);
address_from_tuple!(A a, B b, C c, D d, E e);
address_from_tuple!(A a, B b, C c, D d, E e, F f);

/// Builds an [`Address`] from steps of mixed kinds.
///
/// ```
/// use llll::{address, Step};
///
/// let a = address![3, "two", 1..=2];
/// assert_eq!(a.steps()[1], Step::Key("two".to_string()));
/// ```
#[macro_export]
macro_rules! address {
    ($($step:expr),* $(,)?) => {
        $crate::Address::new(vec![$($crate::Step::from($step)),*])
    };
}

/// What one step picks out of a run of children. Indices are relative to
/// that run.
#[derive(Debug, Clone, PartialEq)]
enum Selection {
    /// Index 0
    Empty,
    Child(usize),
    Run(Range<usize>),
    /// The pair at this index; the step yields its tail
    Pair(usize),
}

/// The single step-resolution rule shared by lookup and assignment.
fn select(items: &[Node], step: &Step) -> Result<Selection> {
    let len = items.len();
    match step {
        Step::Index(0) => Ok(Selection::Empty),
        Step::Index(i) => {
            let index = if *i > 0 {
                (*i - 1) as usize
            } else if i.unsigned_abs() as usize <= len {
                len - i.unsigned_abs() as usize
            } else {
                len
            };
            if index < len {
                Ok(Selection::Child(index))
            } else {
                Err(LlllError::Address(format!(
                    "Index {} out of range for llll of length {}",
                    i, len
                )))
            }
        }
        Step::Slice { start, end } => {
            // 1-based inclusive positions; negatives count from the end
            let position = |bound: i64| {
                if bound < 0 {
                    len as i64 + 1 + bound
                } else {
                    bound
                }
            };
            let first = start.map(position).unwrap_or(1).max(1);
            let last = end.map(position).unwrap_or(len as i64).min(len as i64);
            if first > last {
                Ok(Selection::Run(0..0))
            } else {
                Ok(Selection::Run((first - 1) as usize..last as usize))
            }
        }
        Step::Key(key) => items
            .iter()
            .position(|item| match item.children().first() {
                Some(Node::Atom(Value::String(head))) => head == key,
                _ => false,
            })
            .map(Selection::Pair)
            .ok_or_else(|| LlllError::Address(format!("Key '{}' not found", key))),
    }
}

/// A resolved location during lookup.
#[derive(Clone, Copy)]
enum Located<'a> {
    Empty,
    Node(&'a Node),
    Run(&'a [Node]),
    Tail(&'a [Node]),
}

impl<'a> Located<'a> {
    fn items(self, step: &Step) -> Result<&'a [Node]> {
        match self {
            Located::Empty => Ok(&[]),
            Located::Node(Node::List(items)) => Ok(items),
            Located::Node(Node::Atom(v)) => Err(LlllError::Address(format!(
                "Cannot resolve step {} inside atom {}",
                step, v
            ))),
            Located::Run(items) | Located::Tail(items) => Ok(items),
        }
    }

    fn into_node(self) -> Node {
        match self {
            Located::Empty => Node::null(),
            Located::Node(node) => node.clone(),
            Located::Run(items) => Node::List(items.to_vec()),
            // a single value after the key stands for itself
            Located::Tail([single]) => single.clone(),
            Located::Tail(items) => Node::List(items.to_vec()),
        }
    }
}

/// A resolved location during assignment: either a whole node, or a run
/// `range` inside `items` (a slice, or the tail of a key pair).
enum LocatedMut<'a> {
    Empty,
    Node(&'a mut Node),
    Run {
        items: &'a mut Vec<Node>,
        range: Range<usize>,
    },
    Tail {
        items: &'a mut Vec<Node>,
        range: Range<usize>,
    },
}

impl<'a> LocatedMut<'a> {
    fn descend(self, step: &Step) -> Result<LocatedMut<'a>> {
        let (items, range) = match self {
            LocatedMut::Empty => {
                return Err(LlllError::Address(format!(
                    "Cannot resolve step {} inside index 0",
                    step
                )));
            }
            LocatedMut::Node(Node::Atom(v)) => {
                return Err(LlllError::Address(format!(
                    "Cannot resolve step {} inside atom {}",
                    step, v
                )));
            }
            LocatedMut::Node(Node::List(items)) => {
                let len = items.len();
                (items, 0..len)
            }
            LocatedMut::Run { items, range } | LocatedMut::Tail { items, range } => (items, range),
        };

        let offset = range.start;
        match select(&items[range], step)? {
            Selection::Empty => Ok(LocatedMut::Empty),
            Selection::Child(i) => Ok(LocatedMut::Node(&mut items[offset + i])),
            Selection::Run(r) => Ok(LocatedMut::Run {
                items,
                range: offset + r.start..offset + r.end,
            }),
            Selection::Pair(i) => match &mut items[offset + i] {
                Node::List(pair) => {
                    let len = pair.len();
                    Ok(LocatedMut::Tail {
                        items: pair,
                        range: 1..len,
                    })
                }
                Node::Atom(v) => Err(LlllError::Address(format!(
                    "Key step {} matched atom {}",
                    step, v
                ))),
            },
        }
    }
}

impl Node {
    /// Looks up `address`, cloning out the located node.
    ///
    /// Slices and multi-element key tails come back as a new list; index 0
    /// comes back as the empty list.
    pub fn get(&self, address: impl Into<Address>) -> Result<Node> {
        let address = address.into();
        let mut located = Located::Node(self);
        for step in address.steps() {
            let items = located.items(step)?;
            trace!(%step, len = items.len(), "resolving address step");
            located = match select(items, step)? {
                Selection::Empty => Located::Empty,
                Selection::Child(i) => Located::Node(&items[i]),
                Selection::Run(r) => Located::Run(&items[r]),
                Selection::Pair(i) => Located::Tail(&items[i].children()[1..]),
            };
        }
        Ok(located.into_node())
    }

    /// Value of the atom at `address`.
    pub fn get_value(&self, address: impl Into<Address>) -> Result<Value> {
        match self.get(address)? {
            Node::Atom(v) => Ok(v),
            Node::List(_) => Err(LlllError::Type(
                "Cannot get value of non-atomic llll".to_string(),
            )),
        }
    }

    /// Replaces the node at `address` in place.
    ///
    /// A slice or key target is spliced with the elements of `value` (a
    /// single atom counts as one element). A key whose tail is a single
    /// element has that element replaced by `value`, since `get` yields
    /// the element itself. The empty address replaces the whole tree.
    ///
    /// ```
    /// use llll::llll;
    ///
    /// let mut l = llll![llll!["coords", llll![1, 2]], llll!["tempo", 120]];
    /// l.set("coords", llll![3, 4]).unwrap();
    /// assert_eq!(l, llll![llll!["coords", llll![3, 4]], llll!["tempo", 120]]);
    /// ```
    pub fn set(&mut self, address: impl Into<Address>, value: impl Into<Node>) -> Result<()> {
        let address = address.into();
        let value = value.into();
        let mut located = LocatedMut::Node(self);
        for step in address.steps() {
            trace!(%step, "resolving address step for assignment");
            located = located.descend(step)?;
        }

        match located {
            LocatedMut::Empty => Err(LlllError::Address(
                "Cannot assign to index 0".to_string(),
            )),
            LocatedMut::Node(node) => {
                *node = value;
                Ok(())
            }
            LocatedMut::Tail { items, range } if range.len() == 1 => {
                items[range.start] = value;
                Ok(())
            }
            LocatedMut::Run { items, range } | LocatedMut::Tail { items, range } => {
                items.splice(range, value);
                Ok(())
            }
        }
    }

    /// Reads the node at `address`, transforms it, and writes it back.
    ///
    /// ```
    /// use llll::{llll, Node};
    ///
    /// let mut l = llll![llll!["foo", llll!["one", 2, 3], llll!["two", 5, 6]]];
    /// l.update(("foo", "two", 1), |n| n.mul(100)).unwrap();
    /// assert_eq!(l.get(("foo", "two", 1)).unwrap(), Node::from(500));
    /// ```
    pub fn update<F>(&mut self, address: impl Into<Address>, f: F) -> Result<()>
    where
        F: FnOnce(Node) -> Result<Node>,
    {
        let address = address.into();
        let current = self.get(&address)?;
        self.set(address, f(current)?)
    }
}
