//! Conversion between trees and plain JSON-shaped data.
//!
//! | Node                | `serde_json::Value`                          |
//! |---------------------|----------------------------------------------|
//! | List                | array                                        |
//! | Integer             | number (arbitrary precision)                 |
//! | Rational            | `{"numerator": n, "denominator": d}`         |
//! | String              | string                                       |
//! | Boolean             | bool                                         |
//!
//! `from_flat` also accepts decimal numbers, which are converted exactly.

use std::str::FromStr;

use num_bigint::BigInt;
use serde_json::{Map, Number, Value as Json};

use crate::{
    error::{LlllError, Result},
    node::Node,
    rational::Rational,
    value::Value,
};

const NUMERATOR: &str = "numerator";
const DENOMINATOR: &str = "denominator";

fn big_to_json(n: &BigInt) -> Result<Json> {
    Number::from_str(&n.to_string())
        .map(Json::Number)
        .map_err(|e| LlllError::Type(format!("Cannot represent {} as a JSON number: {}", n, e)))
}

pub fn to_flat(node: &Node) -> Result<Json> {
    match node {
        Node::List(items) => items.iter().map(to_flat).collect::<Result<Vec<_>>>().map(Json::Array),
        Node::Atom(Value::Integer(n)) => big_to_json(n),
        Node::Atom(Value::Rational(r)) => {
            let mut obj = Map::new();
            obj.insert(NUMERATOR.to_string(), big_to_json(r.numer())?);
            obj.insert(DENOMINATOR.to_string(), big_to_json(r.denom())?);
            Ok(Json::Object(obj))
        }
        Node::Atom(Value::String(s)) => Ok(Json::String(s.clone())),
        Node::Atom(Value::Boolean(b)) => Ok(Json::Bool(*b)),
    }
}

/// Exact value of a JSON number literal, of any length. Whole numbers
/// become integers.
pub(crate) fn number_to_value(n: &Number) -> Result<Value> {
    let text = n.to_string();
    if let Ok(i) = BigInt::from_str(&text) {
        return Ok(Value::Integer(i));
    }
    Rational::from_decimal_str(&text).map(Value::normalized)
}

fn json_integer(obj: &Map<String, Json>, key: &str) -> Result<BigInt> {
    match obj.get(key) {
        Some(Json::Number(n)) => BigInt::from_str(&n.to_string())
            .map_err(|_| LlllError::Type(format!("Rational {} must be an integer, got {}", key, n))),
        Some(other) => Err(LlllError::Type(format!(
            "Rational {} must be an integer, got {}",
            key, other
        ))),
        None => Err(LlllError::Type(format!("Rational object is missing '{}'", key))),
    }
}

pub fn from_flat(json: &Json) -> Result<Node> {
    match json {
        Json::Array(items) => items.iter().map(from_flat).collect(),
        Json::Number(n) => number_to_value(n).map(Node::Atom),
        Json::String(s) => Ok(Node::atom(s.as_str())),
        Json::Bool(b) => Ok(Node::atom(*b)),
        Json::Object(obj) if obj.len() == 2 => {
            let numer = json_integer(obj, NUMERATOR)?;
            let denom = json_integer(obj, DENOMINATOR)?;
            Ok(Node::atom(Rational::new(numer, denom)?))
        }
        Json::Object(_) => Err(LlllError::Type(
            "Only {\"numerator\", \"denominator\"} objects can be converted".to_string(),
        )),
        Json::Null => Err(LlllError::Type(
            "null has no llll counterpart (use an empty array)".to_string(),
        )),
    }
}

impl Node {
    /// Mirror of the tree as plain JSON data.
    pub fn to_flat(&self) -> Result<Json> {
        to_flat(self)
    }

    pub fn from_flat(json: &Json) -> Result<Node> {
        from_flat(json)
    }
}
