//! Import of bach's own `.llll` container.
//!
//! bach stores an llll as a JSON object whose `data_count` holds the number
//! of chunks, followed by chunks `data_0000000000`, `data_0000000001`, ...
//! Concatenated, the chunks form a flat token stream of the root's
//! elements: `"["` and `"]"` open and close sublists, and the marker
//! `"_x_x_x_x_bach_float64_x_x_x_x_"` is followed by the low and high 32-bit
//! halves of a double.

use std::collections::BTreeMap;

use serde_json::Value as Json;
use tracing::{debug, warn};

use crate::{
    error::{LlllError, Result},
    flat::number_to_value,
    lexer::Position,
    node::Node,
    rational::Rational,
    value::Value,
};

const FLOAT64_MARKER: &str = "_x_x_x_x_bach_float64_x_x_x_x_";

fn container_error(message: impl Into<String>) -> LlllError {
    LlllError::format(Position::start(), message)
}

fn word(json: Option<&Json>) -> Result<u64> {
    match json.and_then(Json::as_u64) {
        Some(w) if w <= u64::from(u32::MAX) => Ok(w),
        _ => Err(container_error(
            "float64 marker must be followed by two 32-bit words",
        )),
    }
}

struct Stream<'a> {
    tokens: Vec<&'a Json>,
    position: usize,
}

impl<'a> Stream<'a> {
    fn next(&mut self) -> Option<&'a Json> {
        let token = self.tokens.get(self.position).copied();
        self.position += 1;
        token
    }

    fn read_float(&mut self) -> Result<Value> {
        let low = word(self.next())?;
        let high = word(self.next())?;
        let f = f64::from_bits((high << 32) | low);
        Rational::from_f64(f)
            .map(Value::normalized)
            .ok_or_else(|| container_error(format!("Non-finite float64 {} has no exact value", f)))
    }

    /// Elements until the matching `"]"` (or the end of the stream for the root).
    fn read_list(&mut self, nested: bool) -> Result<Node> {
        let mut items = Vec::new();
        loop {
            let item = match self.next() {
                None if nested => return Err(container_error("Unclosed '[' in container")),
                None => return Ok(Node::List(items)),
                Some(Json::String(s)) if s == "]" => {
                    if nested {
                        return Ok(Node::List(items));
                    }
                    return Err(container_error("Unexpected ']' in container"));
                }
                Some(Json::String(s)) if s == "[" => self.read_list(true)?,
                Some(Json::String(s)) if s == FLOAT64_MARKER => Node::Atom(self.read_float()?),
                Some(Json::String(s)) => Node::atom(s.as_str()),
                Some(Json::Number(n)) => Node::Atom(
                    number_to_value(n).map_err(|e| container_error(e.to_string()))?,
                ),
                Some(Json::Bool(b)) => Node::atom(*b),
                Some(other) => {
                    return Err(container_error(format!(
                        "Unexpected {} in container data",
                        other
                    )));
                }
            };
            items.push(item);
        }
    }
}

/// Reads a bach JSON container into a tree.
pub fn import(input: &str) -> Result<Node> {
    let obj: Json = serde_json::from_str(input).map_err(|e| {
        LlllError::format(
            Position {
                line: e.line().max(1),
                column: e.column().max(1),
            },
            format!("Invalid container JSON: {}", e),
        )
    })?;

    let count = obj
        .get("data_count")
        .and_then(|c| c.get(0))
        .and_then(Json::as_u64)
        .ok_or_else(|| container_error("Container has no data_count"))?;

    // chunks come from the keys present; data_count only bounds their indices
    let chunks: BTreeMap<u64, &Vec<Json>> = obj
        .as_object()
        .into_iter()
        .flatten()
        .filter_map(|(key, chunk)| {
            let index = key.strip_prefix("data_").filter(|digits| digits.len() == 10)?;
            let index = index.parse::<u64>().ok().filter(|i| *i < count)?;
            Some((index, chunk.as_array()?))
        })
        .collect();

    let found = chunks.len() as u64;
    if found < count {
        warn!(declared = count, missing = count - found, "bach container is missing data chunks");
    }
    let tokens: Vec<&Json> = chunks.values().flat_map(|chunk| chunk.iter()).collect();
    debug!(chunks = found, tokens = tokens.len(), "importing bach container");

    Stream {
        tokens,
        position: 0,
    }
    .read_list(false)
}
