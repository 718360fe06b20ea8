//! Element-wise operators over trees of possibly different shapes.
//!
//! # Pairing rules
//!
//! Applied recursively at every level:
//!
//! - **atom ⊗ atom** → the operator applied to the two values
//! - **atom ⊗ list** (either order) → the atom is paired with every element
//! - **list ⊗ list** of equal length → paired by position
//! - **list ⊗ singleton list** → the singleton's element is paired with
//!   every element of the other list
//! - any other length mismatch → [`LlllError::Shape`]
//!
//! Arithmetic, `==` and `!=` rebuild the shape with one result per pair. The
//! ordering operators (`<`, `<=`, `>`, `>=`) instead reduce the whole tree to
//! one boolean that is true only when the relation holds for every pair.
//!
//! # Examples
//!
//! ```
//! use llll::{combine, llll, BinOp};
//!
//! let sum = combine(&llll![1, 2, 3], &llll![10], BinOp::Add).unwrap();
//! assert_eq!(sum, llll![11, 12, 13]);
//!
//! let all_less = combine(&llll![1, 2, 3], &llll![2, 3, 4], BinOp::LessThan).unwrap();
//! assert_eq!(all_less, llll::Node::from(true));
//! ```

use tracing::trace;

use crate::{
    error::{LlllError, Result},
    node::Node,
    operators::BinOp,
    value::Value,
};

/// How two list operands line up.
enum Pairing<'a> {
    Zip(&'a [Node], &'a [Node]),
    LeftSingleton(&'a Node, &'a [Node]),
    RightSingleton(&'a [Node], &'a Node),
}

fn pair_lists<'a>(left: &'a [Node], right: &'a [Node]) -> Result<Pairing<'a>> {
    match (left, right) {
        (l, r) if l.len() == r.len() => Ok(Pairing::Zip(l, r)),
        (l, [single]) => Ok(Pairing::RightSingleton(l, single)),
        ([single], r) => Ok(Pairing::LeftSingleton(single, r)),
        (l, r) => {
            trace!(left = l.len(), right = r.len(), "no broadcast pairing");
            Err(LlllError::Shape {
                left: l.len(),
                right: r.len(),
            })
        }
    }
}

/// Applies `op` to two trees following the broadcasting rules.
pub fn combine(lhs: &Node, rhs: &Node, op: BinOp) -> Result<Node> {
    if op.is_ordering() {
        return holds_everywhere(lhs, rhs, op).map(|b| Node::Atom(Value::Boolean(b)));
    }
    elementwise(lhs, rhs, op)
}

fn elementwise(lhs: &Node, rhs: &Node, op: BinOp) -> Result<Node> {
    match (lhs, rhs) {
        (Node::Atom(a), Node::Atom(b)) => Ok(Node::Atom(a.apply(op, b)?)),
        (Node::Atom(_), Node::List(items)) => items
            .iter()
            .map(|item| elementwise(lhs, item, op))
            .collect(),
        (Node::List(items), Node::Atom(_)) => items
            .iter()
            .map(|item| elementwise(item, rhs, op))
            .collect(),
        (Node::List(left), Node::List(right)) => match pair_lists(left, right)? {
            Pairing::Zip(l, r) => l
                .iter()
                .zip(r)
                .map(|(a, b)| elementwise(a, b, op))
                .collect(),
            Pairing::LeftSingleton(single, r) => {
                r.iter().map(|b| elementwise(single, b, op)).collect()
            }
            Pairing::RightSingleton(l, single) => {
                l.iter().map(|a| elementwise(a, single, op)).collect()
            }
        },
    }
}

/// AND-reduction for the ordering operators. Pairs are matched exactly as in
/// `elementwise`, but nothing is rebuilt.
fn holds_everywhere(lhs: &Node, rhs: &Node, op: BinOp) -> Result<bool> {
    match (lhs, rhs) {
        (Node::Atom(a), Node::Atom(b)) => match a.apply(op, b)? {
            Value::Boolean(holds) => Ok(holds),
            other => Err(LlllError::Type(format!(
                "Operator {} produced a non-boolean {}",
                op, other
            ))),
        },
        (Node::Atom(_), Node::List(items)) => all(items.iter().map(|b| holds_everywhere(lhs, b, op))),
        (Node::List(items), Node::Atom(_)) => all(items.iter().map(|a| holds_everywhere(a, rhs, op))),
        (Node::List(left), Node::List(right)) => match pair_lists(left, right)? {
            Pairing::Zip(l, r) => all(l.iter().zip(r).map(|(a, b)| holds_everywhere(a, b, op))),
            Pairing::LeftSingleton(single, r) => {
                all(r.iter().map(|b| holds_everywhere(single, b, op)))
            }
            Pairing::RightSingleton(l, single) => {
                all(l.iter().map(|a| holds_everywhere(a, single, op)))
            }
        },
    }
}

// every pair is visited so that shape and kind errors are never masked by
// an earlier false
fn all(mut results: impl Iterator<Item = Result<bool>>) -> Result<bool> {
    results.try_fold(true, |acc, r| Ok(acc & r?))
}

impl Node {
    /// `combine(self, rhs, op)`
    pub fn combine(&self, rhs: impl Into<Node>, op: BinOp) -> Result<Node> {
        combine(self, &rhs.into(), op)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, rhs: impl Into<Node>) -> Result<Node> {
        self.combine(rhs, BinOp::Add)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn sub(&self, rhs: impl Into<Node>) -> Result<Node> {
        self.combine(rhs, BinOp::Subtract)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn mul(&self, rhs: impl Into<Node>) -> Result<Node> {
        self.combine(rhs, BinOp::Multiply)
    }

    /// Exact division; integers that do not divide evenly give rationals.
    #[allow(clippy::should_implement_trait)]
    pub fn div(&self, rhs: impl Into<Node>) -> Result<Node> {
        self.combine(rhs, BinOp::Divide)
    }

    pub fn pow(&self, rhs: impl Into<Node>) -> Result<Node> {
        self.combine(rhs, BinOp::Power)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn rem(&self, rhs: impl Into<Node>) -> Result<Node> {
        self.combine(rhs, BinOp::Modulo)
    }

    /// Element-wise `==`, yielding a tree of booleans.
    pub fn elementwise_eq(&self, rhs: impl Into<Node>) -> Result<Node> {
        self.combine(rhs, BinOp::Equal)
    }

    /// Element-wise `!=`, yielding a tree of booleans.
    pub fn elementwise_ne(&self, rhs: impl Into<Node>) -> Result<Node> {
        self.combine(rhs, BinOp::NotEqual)
    }

    pub fn less_than(&self, rhs: impl Into<Node>) -> Result<bool> {
        holds_everywhere(self, &rhs.into(), BinOp::LessThan)
    }

    pub fn less_equal(&self, rhs: impl Into<Node>) -> Result<bool> {
        holds_everywhere(self, &rhs.into(), BinOp::LessEqual)
    }

    pub fn greater_than(&self, rhs: impl Into<Node>) -> Result<bool> {
        holds_everywhere(self, &rhs.into(), BinOp::GreaterThan)
    }

    pub fn greater_equal(&self, rhs: impl Into<Node>) -> Result<bool> {
        holds_everywhere(self, &rhs.into(), BinOp::GreaterEqual)
    }
}
