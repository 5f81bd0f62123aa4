pub mod address;
pub mod env;
mod health;
pub mod log;
pub mod lookup;
pub mod serve;
pub mod snapshot;
pub mod units;

pub use address::{AddressResolver, CanonicalAddress};
pub use lookup::{BalanceLookupService, LookupError, ResolvedAllocation};
pub use serve::{start_server, ServeConfig};
pub use snapshot::BalanceTable;
