use std::fmt;

use super::{format_thousands, UdgnNewtype, DGN_SYMBOL};

/// Whole DGN. Converting from base units truncates, anything below one DGN is dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DgnNewtype(pub u128);

impl From<UdgnNewtype> for DgnNewtype {
    fn from(UdgnNewtype(amount): UdgnNewtype) -> Self {
        DgnNewtype(amount / UdgnNewtype::UDGN_PER_DGN)
    }
}

/// Displays as e.g. "1,234 DGN".
impl fmt::Display for DgnNewtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let DgnNewtype(amount) = self;
        write!(f, "{} {}", format_thousands(*amount), DGN_SYMBOL)
    }
}
