use std::{cmp::Ordering, fmt};

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use rust_decimal::Decimal;

use crate::{
    error::{LlllError, Result},
    operators::BinOp,
    rational::Rational,
};

/// The scalar held by an atom.
///
/// # Numeric kinds
///
/// Integers and rationals are both exact:
/// - Integer division that does not divide evenly produces a `Rational`
/// - Any arithmetic result that is a whole number comes back as an `Integer`
/// - A `Rational` with denominator 1 built explicitly stays a `Rational` in
///   storage, but compares numerically equal to the matching `Integer`
///
/// # Examples
///
/// ```
/// use llll::{BinOp, Rational, Value};
///
/// let third = Value::from(1).apply(BinOp::Divide, &Value::from(3)).unwrap();
/// assert_eq!(third, Value::Rational(Rational::new(1, 3).unwrap()));
///
/// let whole = Value::from(4).apply(BinOp::Divide, &Value::from(2)).unwrap();
/// assert_eq!(whole, Value::from(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Arbitrary-precision integer
    Integer(BigInt),

    /// Exact fraction, always reduced
    Rational(Rational),

    /// UTF-8 string
    String(String),

    /// Boolean (true/false)
    Boolean(bool),
}

/// Returns a human-readable kind name for a Value
pub(crate) fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Integer(_) => "integer",
        Value::Rational(_) => "rational",
        Value::String(_) => "string",
        Value::Boolean(_) => "boolean",
    }
}

impl Value {
    /// Integer-valued rationals become integers.
    pub fn normalized(r: Rational) -> Value {
        match r.to_integer() {
            Some(n) => Value::Integer(n),
            None => Value::Rational(r),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Rational(_))
    }

    /// Get as rational, for either numeric kind
    pub fn as_rational(&self) -> Option<Rational> {
        match self {
            Value::Integer(n) => Some(Rational::from_integer(n.clone())),
            Value::Rational(r) => Some(r.clone()),
            _ => None,
        }
    }

    /// Get as integer, for integers and integer-valued rationals
    pub fn as_integer(&self) -> Option<BigInt> {
        match self {
            Value::Integer(n) => Some(n.clone()),
            Value::Rational(r) => r.to_integer(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Applies a binary operator to two scalars.
    ///
    /// Comparison operators return `Value::Boolean`.
    pub fn apply(&self, op: BinOp, other: &Value) -> Result<Value> {
        match op {
            BinOp::Add => match (self, other) {
                (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a + b)),
                (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{}{}", a, b))),
                (a, b) => match (a.as_rational(), b.as_rational()) {
                    (Some(x), Some(y)) => Ok(Value::normalized(x.add(&y))),
                    _ => Err(LlllError::Type(format!(
                        "Cannot add {} and {}",
                        type_name(a),
                        type_name(b)
                    ))),
                },
            },
            BinOp::Subtract => match (self, other) {
                (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a - b)),
                (a, b) => match (a.as_rational(), b.as_rational()) {
                    (Some(x), Some(y)) => Ok(Value::normalized(x.sub(&y))),
                    _ => Err(LlllError::Type(format!(
                        "Cannot subtract {} from {}",
                        type_name(b),
                        type_name(a)
                    ))),
                },
            },
            BinOp::Multiply => match (self, other) {
                (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a * b)),
                (a, b) => match (a.as_rational(), b.as_rational()) {
                    (Some(x), Some(y)) => Ok(Value::normalized(x.mul(&y))),
                    _ => Err(LlllError::Type(format!(
                        "Cannot multiply {} by {}",
                        type_name(a),
                        type_name(b)
                    ))),
                },
            },
            BinOp::Divide => match (self.as_rational(), other.as_rational()) {
                // exact: 1/3 stays 1/3, 4/2 comes back as 2
                (Some(x), Some(y)) => Ok(Value::normalized(x.div(&y)?)),
                _ => Err(LlllError::Type(format!(
                    "Cannot divide {} by {}",
                    type_name(self),
                    type_name(other)
                ))),
            },
            BinOp::Modulo => match (self, other) {
                (Value::Integer(_), Value::Integer(b)) if b.is_zero() => {
                    Err(LlllError::DivisionByZero)
                }
                (Value::Integer(a), Value::Integer(b)) => {
                    let r = a % b;
                    // floored: the remainder takes the divisor's sign
                    if !r.is_zero() && (r.is_negative() != b.is_negative()) {
                        Ok(Value::Integer(r + b))
                    } else {
                        Ok(Value::Integer(r))
                    }
                }
                (a, b) => match (a.as_rational(), b.as_rational()) {
                    (Some(x), Some(y)) => Ok(Value::normalized(x.rem_floor(&y)?)),
                    _ => Err(LlllError::Type(format!(
                        "Cannot compute modulo of {} by {}",
                        type_name(a),
                        type_name(b)
                    ))),
                },
            },
            BinOp::Power => match (self.as_rational(), other) {
                (Some(base), exponent) if exponent.is_numeric() => {
                    let e = exponent.as_integer().ok_or_else(|| {
                        LlllError::Type(format!(
                            "Cannot raise to non-integer power {} (result is not exact)",
                            exponent
                        ))
                    })?;
                    Ok(Value::normalized(base.pow(&e)?))
                }
                _ => Err(LlllError::Type(format!(
                    "Cannot raise {} to {} power",
                    type_name(self),
                    type_name(other)
                ))),
            },
            BinOp::Equal => Ok(Value::Boolean(self.loosely_equals(other))),
            BinOp::NotEqual => Ok(Value::Boolean(!self.loosely_equals(other))),
            BinOp::LessThan | BinOp::LessEqual | BinOp::GreaterThan | BinOp::GreaterEqual => {
                let ordering = self.compare(other).ok_or_else(|| {
                    LlllError::Type(format!(
                        "Cannot compare {} {} {} (comparison requires matching kinds)",
                        type_name(self),
                        op,
                        type_name(other)
                    ))
                })?;
                Ok(Value::Boolean(op.holds(ordering)))
            }
        }
    }

    /// Numeric values compare by value across kinds; everything else must
    /// match in kind and value.
    fn loosely_equals(&self, other: &Value) -> bool {
        match (self.as_rational(), other.as_rational()) {
            (Some(x), Some(y)) => x == y,
            _ => self == other,
        }
    }

    /// Ordering between two values of comparable kinds.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            (a, b) => match (a.as_rational(), b.as_rational()) {
                (Some(x), Some(y)) => Some(x.cmp(&y)),
                _ => None,
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Rational(r) => write!(f, "{}", r),
            Value::String(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(BigInt::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(BigInt::from(n))
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::Integer(n)
    }
}

impl From<Rational> for Value {
    fn from(r: Rational) -> Self {
        Value::Rational(r)
    }
}

/// Decimals are exact; whole numbers become integers.
impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::normalized(Rational::from_decimal(d))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}
