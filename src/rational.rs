//! Exact rational numbers over arbitrary-precision integers.

use std::{cmp::Ordering, fmt, str::FromStr};

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use rust_decimal::Decimal;

use crate::error::{LlllError, Result};

/// A reduced fraction `numer/denom` with `denom > 0`.
///
/// Every constructor normalizes, so two equal rationals always have the same
/// numerator and denominator and the derived `Eq`/`Hash` are structural.
///
/// # Examples
///
/// ```
/// use llll::Rational;
///
/// let r = Rational::new(6, -4).unwrap();
/// assert_eq!(r.to_string(), "-3/2");
/// assert!(!r.is_integer());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    numer: BigInt,
    denom: BigInt,
}

/// Largest power of ten a decimal literal may scale by.
pub const MAX_DECIMAL_EXPONENT: u64 = 1_000_000;

/// Largest numerator or denominator, in bits, that [`Rational::pow`] builds.
pub const MAX_POWER_BITS: u64 = 1 << 24;

fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    let mut a = a.abs();
    let mut b = b.abs();
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

impl Rational {
    /// Builds `numer/denom` in lowest terms. A zero denominator is a division by zero.
    pub fn new(numer: impl Into<BigInt>, denom: impl Into<BigInt>) -> Result<Self> {
        let denom = denom.into();
        if denom.is_zero() {
            return Err(LlllError::DivisionByZero);
        }
        Ok(Self::reduced(numer.into(), denom))
    }

    // denom must be non-zero
    fn reduced(mut numer: BigInt, mut denom: BigInt) -> Self {
        if denom.is_negative() {
            numer = -numer;
            denom = -denom;
        }
        let g = gcd(&numer, &denom);
        if !g.is_one() {
            numer /= &g;
            denom /= &g;
        }
        Rational { numer, denom }
    }

    /// `n/1`
    pub fn from_integer(n: impl Into<BigInt>) -> Self {
        Rational {
            numer: n.into(),
            denom: BigInt::one(),
        }
    }

    /// Exact value of a decimal (`mantissa / 10^scale`).
    pub fn from_decimal(d: Decimal) -> Self {
        let denom = BigInt::from(10u32).pow(d.scale());
        Self::reduced(BigInt::from(d.mantissa()), denom)
    }

    /// Exact value of a decimal literal `[+-]digits[.digits][(e|E)[+-]digits]`,
    /// of any length.
    ///
    /// ```
    /// use llll::Rational;
    ///
    /// let r = Rational::from_decimal_str("-2.50e-1").unwrap();
    /// assert_eq!(r, Rational::new(-1, 4).unwrap());
    ///
    /// let tiny = Rational::from_decimal_str("1e-40").unwrap();
    /// assert_eq!(tiny.denom().to_string(), format!("1{}", "0".repeat(40)));
    /// ```
    pub fn from_decimal_str(text: &str) -> Result<Self> {
        let invalid = || LlllError::Type(format!("invalid decimal literal '{}'", text));
        let (mantissa, exponent) = match text.split_once(['e', 'E']) {
            Some((m, e)) => {
                let e = e.strip_prefix('+').unwrap_or(e);
                (m, e.parse::<i64>().map_err(|_| invalid())?)
            }
            None => (text, 0),
        };
        let mantissa = mantissa.strip_prefix('+').unwrap_or(mantissa);
        let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        if !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let digits = BigInt::from_str(&format!("{}{}", whole, fraction)).map_err(|_| invalid())?;

        let scale = exponent
            .checked_sub(fraction.len() as i64)
            .filter(|s| s.unsigned_abs() <= MAX_DECIMAL_EXPONENT)
            .ok_or_else(|| {
                LlllError::Type(format!(
                    "decimal literal '{}' scales beyond 10^{}",
                    text, MAX_DECIMAL_EXPONENT
                ))
            })?;
        let power = BigInt::from(10u32).pow(scale.unsigned_abs() as u32);
        if scale >= 0 {
            Ok(Self::from_integer(digits * power))
        } else {
            Ok(Self::reduced(digits, power))
        }
    }

    /// Exact value of a finite `f64`. Every finite double is a dyadic
    /// rational, so nothing is rounded. Returns `None` for NaN and infinities.
    pub fn from_f64(f: f64) -> Option<Self> {
        if !f.is_finite() {
            return None;
        }
        let bits = f.to_bits();
        let negative = bits >> 63 == 1;
        let exponent = ((bits >> 52) & 0x7ff) as i64;
        let fraction = bits & ((1u64 << 52) - 1);

        let (mantissa, shift) = if exponent == 0 {
            (fraction, -1074)
        } else {
            (fraction | (1u64 << 52), exponent - 1075)
        };

        let mut numer = BigInt::from(mantissa);
        if negative {
            numer = -numer;
        }
        if shift >= 0 {
            Some(Self::from_integer(numer << shift as usize))
        } else {
            Some(Self::reduced(numer, BigInt::one() << (-shift) as usize))
        }
    }

    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    pub fn denom(&self) -> &BigInt {
        &self.denom
    }

    /// True when the denominator is 1.
    pub fn is_integer(&self) -> bool {
        self.denom.is_one()
    }

    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    /// The numerator, when the value is a whole number.
    pub fn to_integer(&self) -> Option<BigInt> {
        self.is_integer().then(|| self.numer.clone())
    }

    /// Largest integer not greater than the value.
    pub fn floor(&self) -> BigInt {
        let quotient = &self.numer / &self.denom;
        if self.numer.is_negative() && !(&self.numer % &self.denom).is_zero() {
            quotient - 1
        } else {
            quotient
        }
    }

    pub fn recip(&self) -> Result<Self> {
        Rational::new(self.denom.clone(), self.numer.clone())
    }

    pub fn add(&self, other: &Rational) -> Rational {
        Self::reduced(
            &self.numer * &other.denom + &other.numer * &self.denom,
            &self.denom * &other.denom,
        )
    }

    pub fn sub(&self, other: &Rational) -> Rational {
        Self::reduced(
            &self.numer * &other.denom - &other.numer * &self.denom,
            &self.denom * &other.denom,
        )
    }

    pub fn mul(&self, other: &Rational) -> Rational {
        Self::reduced(&self.numer * &other.numer, &self.denom * &other.denom)
    }

    pub fn div(&self, other: &Rational) -> Result<Rational> {
        if other.is_zero() {
            return Err(LlllError::DivisionByZero);
        }
        Ok(Self::reduced(
            &self.numer * &other.denom,
            &self.denom * &other.numer,
        ))
    }

    /// Floored remainder: `self - other * floor(self / other)`, which takes
    /// the sign of `other`.
    pub fn rem_floor(&self, other: &Rational) -> Result<Rational> {
        let quotient = Rational::from_integer(self.div(other)?.floor());
        Ok(self.sub(&other.mul(&quotient)))
    }

    /// Integer power. Negative exponents raise the reciprocal.
    ///
    /// Bases 0, 1 and -1 accept any exponent; otherwise a result whose
    /// numerator or denominator would exceed [`MAX_POWER_BITS`] is a type error.
    pub fn pow(&self, exponent: &BigInt) -> Result<Rational> {
        if exponent.is_zero() {
            return Ok(Rational::from_integer(1));
        }
        let base = if exponent.is_negative() {
            self.recip()?
        } else {
            self.clone()
        };
        if base.is_zero() {
            return Ok(base);
        }
        if base.denom.is_one() && base.numer.abs().is_one() {
            let odd = exponent.bit(0);
            return Ok(Rational::from_integer(if base.numer.is_negative() && odd { -1 } else { 1 }));
        }

        let too_large = || {
            LlllError::Type(format!(
                "{} ** {} exceeds {} bits",
                self, exponent, MAX_POWER_BITS
            ))
        };
        let bits = base.numer.bits().max(base.denom.bits());
        let e = u64::try_from(exponent.abs()).map_err(|_| too_large())?;
        if bits.saturating_mul(e) > MAX_POWER_BITS {
            return Err(too_large());
        }
        let e = u32::try_from(e).map_err(|_| too_large())?;
        // powers of a reduced fraction stay reduced
        Ok(Rational {
            numer: base.numer.pow(e),
            denom: base.denom.pow(e),
        })
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.numer * &other.denom).cmp(&(&other.numer * &self.denom))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numer, self.denom)
    }
}

impl FromStr for Rational {
    type Err = LlllError;

    /// Parses `num/den`; a bare integer is read as `n/1`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || LlllError::Type(format!("invalid rational literal '{}'", s));
        match s.split_once('/') {
            Some((n, d)) => {
                let numer = n.parse::<BigInt>().map_err(|_| invalid())?;
                let denom = d.parse::<BigInt>().map_err(|_| invalid())?;
                Rational::new(numer, denom)
            }
            None => Ok(Rational::from_integer(
                s.parse::<BigInt>().map_err(|_| invalid())?,
            )),
        }
    }
}

impl From<BigInt> for Rational {
    fn from(n: BigInt) -> Self {
        Rational::from_integer(n)
    }
}

impl From<Decimal> for Rational {
    fn from(d: Decimal) -> Self {
        Rational::from_decimal(d)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Rational::from_integer(n)
    }
}
