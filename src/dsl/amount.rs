//! Arbitrary-precision amounts.
//!
//! Lovelace and native-asset quantities routinely exceed the 53-bit safe
//! range, so every amount is carried as a `BigUint` from the moment it is
//! parsed. Floating point is never used for value amounts.

use num_bigint::BigUint;
use num_traits::Zero;
use serde::Serialize;
use serde_json::Value;

/// An exact, non-negative on-chain quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Coin(BigUint);

impl Coin {
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }
}

impl From<u64> for Coin {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a JSON value could not be read as an amount.
#[derive(Debug, PartialEq, Eq)]
pub enum AmountError {
    Negative,
    NotAnInteger,
    WrongType,
}

impl AmountError {
    pub fn message(&self) -> &'static str {
        match self {
            AmountError::Negative => "must not be negative",
            AmountError::NotAnInteger => "must be a whole number of base units",
            AmountError::WrongType => "must be an integer or a decimal string",
        }
    }
}

fn parse_decimal(text: &str) -> Result<Coin, AmountError> {
    let text = text.trim();
    if let Some(rest) = text.strip_prefix('-') {
        // "-0" is still zero, but a minus sign on anything else is a
        // negative amount, not a syntax error.
        return if rest.bytes().all(|b| b == b'0') && !rest.is_empty() {
            Ok(Coin(BigUint::zero()))
        } else {
            Err(AmountError::Negative)
        };
    }
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::NotAnInteger);
    }
    text.parse::<BigUint>()
        .map(Coin)
        .map_err(|_| AmountError::NotAnInteger)
}

/// Coerce a JSON value (string, integer, or big integer literal) to a `Coin`.
pub fn parse_amount(value: &Value) -> Result<Coin, AmountError> {
    match value {
        Value::String(s) => parse_decimal(s),
        // serde_json keeps the exact literal (arbitrary_precision), so
        // formatting it back loses nothing even past 2^64.
        Value::Number(n) => parse_decimal(&n.to_string()),
        _ => Err(AmountError::WrongType),
    }
}

/// Parse a slot number (fits in u64, unlike value amounts).
pub fn parse_slot(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => s.trim().parse::<u64>().ok(),
        Value::Number(n) => n.to_string().parse::<u64>().ok(),
        _ => None,
    }
}
