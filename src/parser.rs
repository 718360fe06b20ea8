use std::mem;

use crate::{
    error::{LlllError, Result},
    lexer::{Lexer, Position},
    native,
    node::Node,
    token::Token,
    value::Value,
};

/// Which serialization a [`Parser`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    Text,
    Native,
}

struct Parser {
    lexer: Lexer,
    current_token: Token,
    current_position: Position,
    form: Form,
}

impl Parser {
    fn new(input: &str, form: Form) -> Result<Self> {
        let mut lexer = Lexer::new(input);
        let current_token = lexer.next_token()?;
        let current_position = lexer.position();
        Ok(Parser {
            lexer,
            current_token,
            current_position,
            form,
        })
    }

    fn advance(&mut self) -> Result<Token> {
        let next = self.lexer.next_token()?;
        self.current_position = self.lexer.position();
        Ok(mem::replace(&mut self.current_token, next))
    }

    fn error(&self, message: impl Into<String>) -> LlllError {
        LlllError::format(self.current_position, message)
    }

    fn parse_atom(&mut self) -> Result<Node> {
        let position = self.current_position;
        let value = match self.advance()? {
            Token::Integer(n) => Value::Integer(n),
            Token::Rational(r) => Value::Rational(r),
            Token::Boolean(b) => Value::Boolean(b),
            Token::String(s) => Value::String(s),
            Token::Symbol(s) if self.form == Form::Text => Value::String(s),
            Token::Decimal(r) if self.form == Form::Text => Value::normalized(r),
            other => {
                return Err(LlllError::format(
                    position,
                    format!("Unexpected {} in native llll", other.describe()),
                ));
            }
        };
        Ok(Node::Atom(value))
    }

    /// Elements up to the `]` closing the list opened at `open`.
    fn parse_list(&mut self, open: Position) -> Result<Node> {
        let mut items = Vec::new();
        loop {
            match self.current_token {
                Token::RBracket => {
                    self.advance()?;
                    return Ok(Node::List(items));
                }
                Token::Eof => {
                    return Err(LlllError::format(open, "Unclosed '['"));
                }
                _ => items.push(self.parse_node()?),
            }
        }
    }

    fn parse_node(&mut self) -> Result<Node> {
        match self.current_token {
            Token::LBracket => {
                let open = self.current_position;
                self.advance()?;
                self.parse_list(open)
            }
            Token::RBracket => Err(self.error("Unexpected ']' without matching '['")),
            Token::Eof => Err(self.error("Unexpected end of input")),
            _ => self.parse_atom(),
        }
    }

    /// Text documents are the root's elements without outer brackets.
    fn parse_document(&mut self) -> Result<Node> {
        let mut items = Vec::new();
        while self.current_token != Token::Eof {
            items.push(self.parse_node()?);
        }
        Ok(Node::List(items))
    }

    /// Native documents hold exactly one node.
    fn parse_single(&mut self) -> Result<Node> {
        if self.current_token == Token::Eof {
            return Ok(Node::null());
        }
        let node = self.parse_node()?;
        if self.current_token != Token::Eof {
            return Err(self.error(format!(
                "Unexpected {} after the end of the llll",
                self.current_token.describe()
            )));
        }
        Ok(node)
    }
}

/// Reads the text form. The result is always a list: the document's
/// top-level elements become the root's children.
///
/// ```
/// use llll::{llll, parse_text};
///
/// let l = parse_text("1 foo [ 2 3/4 ] 'tic toc'").unwrap();
/// assert_eq!(
///     l,
///     llll![1, "foo", llll![2, llll::Rational::new(3, 4).unwrap()], "tic toc"]
/// );
/// ```
pub fn parse_text(input: &str) -> Result<Node> {
    Parser::new(input, Form::Text)?.parse_document()
}

/// Reads the native form: a single bracketed node (or atom) with every
/// string quoted, or bach's JSON container.
pub fn parse_native(input: &str) -> Result<Node> {
    if input.trim_start().starts_with('{') {
        return native::import(input);
    }
    Parser::new(input, Form::Native)?.parse_single()
}
