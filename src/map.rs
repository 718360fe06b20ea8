use std::convert::Infallible;

use crate::{error::Result, node::Node, value::Value};

/// Inclusive depth window for [`Node::map_within`].
///
/// Depth counts levels from the root: the root list's own elements are at
/// depth 1, the elements of its sublists at depth 2, and so on. An atomic
/// root is at depth 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthBounds {
    pub min: usize,
    pub max: usize,
}

impl Default for DepthBounds {
    fn default() -> Self {
        DepthBounds {
            min: 1,
            max: usize::MAX,
        }
    }
}

impl DepthBounds {
    pub fn new(min: usize, max: usize) -> Self {
        DepthBounds { min, max }
    }

    /// Only atoms at exactly this depth.
    pub fn exactly(depth: usize) -> Self {
        DepthBounds::new(depth, depth)
    }

    pub fn at_least(min: usize) -> Self {
        DepthBounds {
            min,
            ..Default::default()
        }
    }

    pub fn contains(&self, depth: usize) -> bool {
        (self.min..=self.max).contains(&depth)
    }
}

struct Mapper<F> {
    bounds: DepthBounds,
    transform: F,
    address: Vec<usize>,
}

impl<F, E> Mapper<F>
where
    F: FnMut(&Value, &[usize]) -> std::result::Result<Value, E>,
{
    fn visit(&mut self, node: &Node, depth: usize) -> std::result::Result<Node, E> {
        match node {
            Node::Atom(v) if self.bounds.contains(depth) => {
                Ok(Node::Atom((self.transform)(v, &self.address)?))
            }
            Node::Atom(_) => Ok(node.clone()),
            Node::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    self.address.push(i + 1);
                    let mapped = self.visit(item, depth + 1);
                    self.address.pop();
                    out.push(mapped?);
                }
                Ok(Node::List(out))
            }
        }
    }
}

fn run<F, E>(tree: &Node, bounds: DepthBounds, transform: F) -> std::result::Result<Node, E>
where
    F: FnMut(&Value, &[usize]) -> std::result::Result<Value, E>,
{
    let mut mapper = Mapper {
        bounds,
        transform,
        address: Vec::new(),
    };
    match tree {
        Node::Atom(_) => mapper.visit(tree, 1),
        Node::List(_) => mapper.visit(tree, 0),
    }
}

impl Node {
    /// Applies `f` to every atom, building a new tree of the same shape.
    ///
    /// `f` receives the atom's value and its 1-based address.
    ///
    /// ```
    /// use llll::{llll, BinOp, Value};
    ///
    /// let l = llll![1, llll![2, 3], llll![llll![4, 5], 6]];
    /// let big = l.map(|v, _| v.apply(BinOp::GreaterThan, &Value::from(2)).unwrap());
    /// assert_eq!(big, llll![false, llll![false, true], llll![llll![true, true], true]]);
    /// ```
    pub fn map<F>(&self, mut f: F) -> Node
    where
        F: FnMut(&Value, &[usize]) -> Value,
    {
        self.map_within(DepthBounds::default(), &mut f)
    }

    /// Like [`Node::map`], but only atoms whose depth lies in `bounds` are
    /// transformed; the rest are copied unchanged.
    ///
    /// ```
    /// use llll::{llll, DepthBounds, BinOp, Value};
    ///
    /// let l = llll![1, llll![2, 3], llll![llll![4, 5], 6]];
    /// let out = l.map_within(DepthBounds::exactly(2), |v, _| {
    ///     v.apply(BinOp::Multiply, &Value::from(10)).unwrap()
    /// });
    /// assert_eq!(out, llll![1, llll![20, 30], llll![llll![4, 5], 60]]);
    /// ```
    pub fn map_within<F>(&self, bounds: DepthBounds, mut f: F) -> Node
    where
        F: FnMut(&Value, &[usize]) -> Value,
    {
        let result: std::result::Result<Node, Infallible> =
            run(self, bounds, |v: &Value, address: &[usize]| Ok(f(v, address)));
        match result {
            Ok(node) => node,
            Err(never) => match never {},
        }
    }

    /// Fallible variant of [`Node::map_within`]; the first error from `f`
    /// aborts the traversal.
    pub fn try_map_within<F>(&self, bounds: DepthBounds, f: F) -> Result<Node>
    where
        F: FnMut(&Value, &[usize]) -> Result<Value>,
    {
        run(self, bounds, f)
    }
}
