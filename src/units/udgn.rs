use std::{fmt, num::ParseIntError, str::FromStr};

use serde::Serialize;
use thiserror::Error;

use super::UDGN_PER_DGN;

/// An amount of DGN in base units as recorded by the snapshot. Snapshot amounts are decimal
/// strings, u128 fits anything the bank module can hold without truncating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct UdgnNewtype(pub u128);

impl UdgnNewtype {
    pub const UDGN_PER_DGN: u128 = UDGN_PER_DGN;
}

impl fmt::Display for UdgnNewtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let UdgnNewtype(amount) = self;
        write!(f, "{amount}")
    }
}

impl From<UdgnNewtype> for String {
    fn from(UdgnNewtype(amount): UdgnNewtype) -> Self {
        amount.to_string()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseUdgnError {
    #[error("amount {0} is negative")]
    Negative(String),
    #[error("amount {value} is not an unsigned integer: {source}")]
    NotAnInteger {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl FromStr for UdgnNewtype {
    type Err = ParseUdgnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<u128>() {
            Ok(amount) => Ok(UdgnNewtype(amount)),
            Err(source) => match s.strip_prefix('-') {
                Some(digits)
                    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) =>
                {
                    // "-0"
                    if digits.bytes().all(|b| b == b'0') {
                        Ok(UdgnNewtype(0))
                    } else {
                        Err(ParseUdgnError::Negative(s.to_string()))
                    }
                }
                _ => Err(ParseUdgnError::NotAnInteger {
                    value: s.to_string(),
                    source,
                }),
            },
        }
    }
}
