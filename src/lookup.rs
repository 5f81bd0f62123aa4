//! Resolves a raw address to the allocation the genesis snapshot granted it.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    address::{AddressError, AddressResolver, CanonicalAddress, InvalidAddressKind},
    snapshot::BalanceTable,
    units::{DgnNewtype, ParseUdgnError, UdgnNewtype, UDGN_DENOM},
};

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("invalid address: {0}")]
    InvalidAddress(InvalidAddressKind),
    #[error("failed to encode account with prefix {prefix}: {source}")]
    EncodingError {
        prefix: String,
        #[source]
        source: bech32::Error,
    },
    #[error("snapshot holds a bad amount for {address}: {source}")]
    CorruptSnapshotData {
        address: CanonicalAddress,
        #[source]
        source: ParseUdgnError,
    },
}

impl From<AddressError> for LookupError {
    fn from(error: AddressError) -> Self {
        match error {
            AddressError::InvalidAddress(kind) => LookupError::InvalidAddress(kind),
            AddressError::EncodingError { prefix, source } => {
                LookupError::EncodingError { prefix, source }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedAllocation {
    Allocation {
        address: CanonicalAddress,
        amount: UdgnNewtype,
    },
    NoAllocation {
        address: CanonicalAddress,
    },
}

impl ResolvedAllocation {
    pub fn address(&self) -> &CanonicalAddress {
        match self {
            ResolvedAllocation::Allocation { address, .. } => address,
            ResolvedAllocation::NoAllocation { address } => address,
        }
    }

    /// Whole DGN, e.g. "1,234 DGN". None when there is no allocation.
    pub fn display_amount(&self) -> Option<String> {
        match self {
            ResolvedAllocation::Allocation { amount, .. } => {
                Some(DgnNewtype::from(*amount).to_string())
            }
            ResolvedAllocation::NoAllocation { .. } => None,
        }
    }
}

pub struct BalanceLookupService {
    table: Arc<BalanceTable>,
    resolver: AddressResolver,
}

impl BalanceLookupService {
    pub fn new(table: Arc<BalanceTable>, resolver: AddressResolver) -> Self {
        Self { table, resolver }
    }

    pub fn resolver(&self) -> &AddressResolver {
        &self.resolver
    }

    pub fn table(&self) -> &BalanceTable {
        &self.table
    }

    pub fn resolve(&self, raw_address: &str) -> Result<ResolvedAllocation, LookupError> {
        let address = self.resolver.resolve(raw_address)?;

        debug!(%address, "looking up allocation");

        // Only the first coin counts, the airdrop grants a single denomination.
        let first_coin = self
            .table
            .get(address.as_str())
            .and_then(|coins| coins.first());

        match first_coin {
            None => Ok(ResolvedAllocation::NoAllocation { address }),
            Some(coin) => {
                if coin.denom != UDGN_DENOM {
                    warn!(%address, denom = %coin.denom, "first snapshot coin is not udgn");
                }

                match coin.amount.parse::<UdgnNewtype>() {
                    Ok(amount) => Ok(ResolvedAllocation::Allocation { address, amount }),
                    Err(source) => Err(LookupError::CorruptSnapshotData { address, source }),
                }
            }
        }
    }
}
