use num_bigint::BigInt;

use crate::rational::Rational;

/// Lexical tokens shared by the text and native forms.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Integer literal
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -10
    /// 123456789012345678901234567890
    /// ```
    Integer(BigInt),

    /// Rational literal, `num/den`
    ///
    /// # Examples
    /// ```text
    /// 1/3
    /// -11/7
    /// 4/2
    /// ```
    Rational(Rational),

    /// Decimal literal of any length, read exactly (text form only)
    ///
    /// # Examples
    /// ```text
    /// 2.312
    /// -0.5
    /// 1e-3
    /// ```
    Decimal(Rational),

    /// Boolean values
    ///
    /// # Examples
    /// ```text
    /// true
    /// false
    /// ```
    Boolean(bool),

    /// Quoted string
    ///
    /// # Examples
    /// ```text
    /// "tic toc"
    /// 'single quoted'
    /// "say \"hi\""
    /// ```
    String(String),

    /// Bare word, read as a string (text form only)
    ///
    /// # Examples
    /// ```text
    /// foo
    /// C#4
    /// ```
    Symbol(String),

    /// Opens a sublist
    LBracket,

    /// Closes a sublist
    RBracket,

    /// End of input
    Eof,
}

impl Token {
    /// Short description used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Integer(n) => format!("integer {}", n),
            Token::Rational(r) => format!("rational {}", r),
            Token::Decimal(d) => format!("decimal {}", d),
            Token::Boolean(b) => format!("boolean {}", b),
            Token::String(s) => format!("string {:?}", s),
            Token::Symbol(s) => format!("bare word '{}'", s),
            Token::LBracket => "'['".to_string(),
            Token::RBracket => "']'".to_string(),
            Token::Eof => "end of input".to_string(),
        }
    }
}
