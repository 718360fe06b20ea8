use std::{fmt, str::FromStr, sync::LazyLock};

use num_bigint::BigInt;
use regex::Regex;

use crate::{
    error::{LlllError, Result},
    rational::Rational,
    token::Token,
};

static INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("valid integer pattern"));

static RATIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?[0-9]+)/([+-]?[0-9]+)$").expect("valid rational pattern")
});

static DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?[0-9]+(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?$")
        .expect("valid decimal pattern")
});

/// 1-based line and column of a character in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn start() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Whether a bare word would be read back as something other than a string.
pub(crate) fn is_literal_like(word: &str) -> bool {
    word == "true"
        || word == "false"
        || INTEGER.is_match(word)
        || RATIONAL.is_match(word)
        || DECIMAL.is_match(word)
}

fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || ch == '[' || ch == ']'
}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    token_start: Position,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            token_start: Position::start(),
        }
    }

    /// Where the most recently returned token started.
    pub fn position(&self) -> Position {
        self.token_start
    }

    fn here(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        if self.current_char() == Some('\n') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_string(&mut self, quote: char) -> Result<String> {
        let start = self.here();
        let mut result = String::new();
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                c if c == quote => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    let escape_at = self.here();
                    self.advance(); // Consume backslash
                    match self.current_char() {
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some('"') => result.push('"'),
                        Some('\'') => result.push('\''),
                        Some('\\') => result.push('\\'),
                        Some('u') => {
                            self.advance();
                            result.push(self.read_unicode_escape(escape_at)?);
                            continue;
                        }
                        Some(ch) => {
                            return Err(LlllError::format(
                                escape_at,
                                format!("Invalid escape sequence: \\{}", ch),
                            ));
                        }
                        None => {
                            return Err(LlllError::format(
                                start,
                                "Unterminated string: unexpected end of input after backslash",
                            ));
                        }
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LlllError::format(
            start,
            "Unterminated string: missing closing quote",
        ))
    }

    // `\u{XXXX}`, positioned just after the `u`
    fn read_unicode_escape(&mut self, escape_at: Position) -> Result<char> {
        let invalid = || LlllError::format(escape_at, "Invalid unicode escape (expected \\u{HEX})");
        if self.current_char() != Some('{') {
            return Err(invalid());
        }
        self.advance();
        let mut hex = String::new();
        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == '}' {
                return u32::from_str_radix(&hex, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(invalid);
            }
            hex.push(ch);
        }
        Err(invalid())
    }

    fn read_bare(&mut self) -> String {
        let mut word = String::new();
        while let Some(ch) = self.current_char() {
            if is_delimiter(ch) {
                break;
            }
            word.push(ch);
            self.advance();
        }
        word
    }

    fn classify(&self, word: String) -> Result<Token> {
        let at = self.token_start;
        let digits = |s: &str| s.strip_prefix('+').unwrap_or(s).to_string();

        if word == "true" {
            return Ok(Token::Boolean(true));
        }
        if word == "false" {
            return Ok(Token::Boolean(false));
        }
        if INTEGER.is_match(&word) {
            let n = BigInt::from_str(&digits(&word))
                .map_err(|_| LlllError::format(at, format!("Invalid integer '{}'", word)))?;
            return Ok(Token::Integer(n));
        }
        if let Some(caps) = RATIONAL.captures(&word) {
            let numer = BigInt::from_str(&digits(&caps[1]));
            let denom = BigInt::from_str(&digits(&caps[2]));
            return match (numer, denom) {
                (Ok(n), Ok(d)) => Rational::new(n, d).map(Token::Rational).map_err(|_| {
                    LlllError::format(at, format!("Zero denominator in rational '{}'", word))
                }),
                _ => Err(LlllError::format(at, format!("Invalid rational '{}'", word))),
            };
        }
        if DECIMAL.is_match(&word) {
            return Rational::from_decimal_str(&word)
                .map(Token::Decimal)
                .map_err(|e| LlllError::format(at, format!("Unreadable decimal '{}': {}", word, e)));
        }
        Ok(Token::Symbol(word))
    }

    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace();
        self.token_start = self.here();

        match self.current_char() {
            None => Ok(Token::Eof),
            Some('[') => {
                self.advance();
                Ok(Token::LBracket)
            }
            Some(']') => {
                self.advance();
                Ok(Token::RBracket)
            }
            Some('"') => self.read_string('"').map(Token::String),
            Some('\'') => self.read_string('\'').map(Token::String),
            Some(_) => {
                let word = self.read_bare();
                self.classify(word)
            }
        }
    }
}

#[test]
fn test_literals() {
    let mut lexer = Lexer::new("12 -11/7 true foo 2.5");
    assert_eq!(lexer.next_token().unwrap(), Token::Integer(BigInt::from(12)));
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Rational(Rational::new(-11, 7).unwrap())
    );
    assert_eq!(lexer.next_token().unwrap(), Token::Boolean(true));
    assert_eq!(lexer.next_token().unwrap(), Token::Symbol("foo".to_string()));
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Decimal(Rational::new(5, 2).unwrap())
    );
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_brackets_split_words() {
    let mut lexer = Lexer::new("[a]");
    assert_eq!(lexer.next_token().unwrap(), Token::LBracket);
    assert_eq!(lexer.next_token().unwrap(), Token::Symbol("a".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::RBracket);
}

#[test]
fn test_positions_track_lines() {
    let mut lexer = Lexer::new("1\n  [ 2");
    lexer.next_token().unwrap();
    assert_eq!(lexer.position(), Position { line: 1, column: 1 });
    lexer.next_token().unwrap();
    assert_eq!(lexer.position(), Position { line: 2, column: 3 });
    lexer.next_token().unwrap();
    assert_eq!(lexer.position(), Position { line: 2, column: 5 });
}
