mod dgn;
mod udgn;

pub use dgn::DgnNewtype;
pub use udgn::ParseUdgnError;
pub use udgn::UdgnNewtype;

/// Denomination the genesis snapshot records DGN balances in.
pub const UDGN_DENOM: &str = "udgn";

pub const UDGN_PER_DGN: u128 = 1_000_000;

pub const DGN_SYMBOL: &str = "DGN";

/// Renders an integer with a comma between every group of three digits, e.g. 1234567 becomes
/// "1,234,567".
pub fn format_thousands(amount: u128) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, digit) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }

    out
}
