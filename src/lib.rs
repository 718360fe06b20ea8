pub mod address;
pub mod broadcast;
pub mod error;
pub mod file;
pub mod flat;
pub mod lexer;
pub mod map;
pub mod native;
pub mod node;
pub mod operators;
pub mod output;
pub mod parser;
pub mod rational;
pub mod token;
pub mod value;

pub use address::{Address, Step};
pub use broadcast::combine;
pub use error::{LlllError, Result};
pub use file::Format;
pub use flat::{from_flat, to_flat};
pub use lexer::{Lexer, Position};
pub use map::DepthBounds;
pub use node::Node;
pub use operators::BinOp;
pub use output::{to_native, to_text};
pub use parser::{parse_native, parse_text};
pub use rational::Rational;
pub use token::Token;
pub use value::Value;
