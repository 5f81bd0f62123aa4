//! Bech32 account address normalization.
//!
//! Every network in the allow-list formats the same account bytes, only the human readable
//! prefix differs. Decoding an address and encoding its bytes again under the native prefix
//! gives the key the snapshot uses.

use std::fmt;

use bech32::{FromBase32, ToBase32, Variant};
use thiserror::Error;

pub const NATIVE_PREFIX: &str = "dungeon";

pub const DEFAULT_PARTNER_PREFIXES: [&str; 4] = ["cosmos", "osmo", "juno", "noble"];

/// Bech32 strings are limited to 90 characters.
pub const MAX_ADDRESS_LENGTH: usize = 90;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CanonicalAddress(String);

impl CanonicalAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum InvalidAddressKind {
    #[error("address is {0} characters long, at most 90 are allowed")]
    TooLong(usize),
    #[error("not a bech32 address: {0}")]
    Decode(bech32::Error),
    #[error("bech32m addresses are not account addresses")]
    Bech32m,
    #[error("prefix {0} is not accepted")]
    UnsupportedPrefix(String),
    #[error("bad payload: {0}")]
    Payload(bech32::Error),
    #[error("address has no payload")]
    EmptyPayload,
}

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] InvalidAddressKind),
    #[error("failed to encode account with prefix {prefix}: {source}")]
    EncodingError {
        prefix: String,
        #[source]
        source: bech32::Error,
    },
}

/// Turns any allow-listed address into its native-prefix form.
#[derive(Clone, Debug)]
pub struct AddressResolver {
    native_prefix: String,
    accepted_prefixes: Vec<String>,
}

impl Default for AddressResolver {
    fn default() -> Self {
        Self::new(NATIVE_PREFIX, DEFAULT_PARTNER_PREFIXES)
    }
}

impl AddressResolver {
    /// The native prefix is always accepted, partner prefixes are accepted in addition.
    pub fn new<I, S>(native_prefix: &str, partner_prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let native_prefix = native_prefix.to_lowercase();
        let mut accepted_prefixes = vec![native_prefix.clone()];

        for prefix in partner_prefixes {
            let prefix = prefix.as_ref().trim().to_lowercase();
            if !prefix.is_empty() && !accepted_prefixes.contains(&prefix) {
                accepted_prefixes.push(prefix);
            }
        }

        Self {
            native_prefix,
            accepted_prefixes,
        }
    }

    pub fn accepted_prefixes(&self) -> &[String] {
        &self.accepted_prefixes
    }

    fn is_accepted(&self, prefix: &str) -> bool {
        self.accepted_prefixes.iter().any(|accepted| accepted == prefix)
    }

    /// Payloads must be whole bytes. Empty payloads and payloads with non-zero padding bits are
    /// rejected as invalid, even though a plain bech32 round trip of the 5-bit groups would
    /// accept them.
    pub fn resolve(&self, raw_address: &str) -> Result<CanonicalAddress, AddressError> {
        if raw_address.len() > MAX_ADDRESS_LENGTH {
            return Err(InvalidAddressKind::TooLong(raw_address.len()).into());
        }

        // The decoded prefix comes back lowercased.
        let (prefix, data, variant) =
            bech32::decode(raw_address).map_err(InvalidAddressKind::Decode)?;

        if variant != Variant::Bech32 {
            return Err(InvalidAddressKind::Bech32m.into());
        }

        if !self.is_accepted(&prefix) {
            return Err(InvalidAddressKind::UnsupportedPrefix(prefix).into());
        }

        let account = Vec::<u8>::from_base32(&data).map_err(InvalidAddressKind::Payload)?;

        if account.is_empty() {
            return Err(InvalidAddressKind::EmptyPayload.into());
        }

        bech32::encode(&self.native_prefix, account.to_base32(), Variant::Bech32)
            .map(CanonicalAddress)
            .map_err(|source| AddressError::EncodingError {
                prefix: self.native_prefix.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUNGEON: &str = "dungeon1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc533ncv8";
    const COSMOS: &str = "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5lzv7xu";
    const OSMO: &str = "osmo1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5helwsw";
    const JUNO: &str = "juno1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5fs09pq";
    const NOBLE: &str = "noble1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5hpek7j";
    const TERRA: &str = "terra1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc5exk7yu";
    const COSMOS_BECH32M: &str = "cosmos1qypqxpq9qcrsszg2pvxq6rs0zqg3yyc527ujr7";

    fn assert_invalid(result: Result<CanonicalAddress, AddressError>) {
        assert!(
            matches!(result, Err(AddressError::InvalidAddress(_))),
            "expected invalid address, got {result:?}"
        );
    }

    #[test]
    fn native_address_is_its_own_canonical_form_test() {
        let resolver = AddressResolver::default();
        assert_eq!(resolver.resolve(DUNGEON).unwrap().as_str(), DUNGEON);
    }

    #[test]
    fn partner_addresses_resolve_to_same_account_test() {
        let resolver = AddressResolver::default();
        for address in [COSMOS, OSMO, JUNO, NOBLE] {
            assert_eq!(resolver.resolve(address).unwrap().as_str(), DUNGEON);
        }
    }

    #[test]
    fn uppercase_address_resolves_test() {
        let resolver = AddressResolver::default();
        let upper = COSMOS.to_uppercase();
        assert_eq!(resolver.resolve(&upper).unwrap().as_str(), DUNGEON);
    }

    #[test]
    fn mixed_case_is_invalid_test() {
        let resolver = AddressResolver::default();
        let mixed = format!("COSMOS{}", &COSMOS[6..]);
        assert_invalid(resolver.resolve(&mixed));
    }

    #[test]
    fn flipped_character_fails_checksum_test() {
        let resolver = AddressResolver::default();
        // q -> p in the data part.
        let corrupted = COSMOS.replacen("1qyp", "1pyp", 1);
        assert_ne!(corrupted, COSMOS);
        assert_invalid(resolver.resolve(&corrupted));
    }

    #[test]
    fn unknown_prefix_is_invalid_test() {
        let resolver = AddressResolver::default();
        let result = resolver.resolve(TERRA);
        assert!(matches!(
            result,
            Err(AddressError::InvalidAddress(InvalidAddressKind::UnsupportedPrefix(ref prefix)))
                if prefix == "terra"
        ));
    }

    #[test]
    fn bech32m_is_invalid_test() {
        let resolver = AddressResolver::default();
        assert!(matches!(
            resolver.resolve(COSMOS_BECH32M),
            Err(AddressError::InvalidAddress(InvalidAddressKind::Bech32m))
        ));
    }

    #[test]
    fn garbage_is_invalid_test() {
        let resolver = AddressResolver::default();
        assert_invalid(resolver.resolve(""));
        assert_invalid(resolver.resolve("hello"));
        assert_invalid(resolver.resolve("dungeon1xyz"));
        assert_invalid(resolver.resolve("favicon.ico"));
    }

    #[test]
    fn too_long_is_invalid_test() {
        let resolver = AddressResolver::default();
        let long = format!("cosmos1{}", "q".repeat(MAX_ADDRESS_LENGTH));
        assert!(matches!(
            resolver.resolve(&long),
            Err(AddressError::InvalidAddress(InvalidAddressKind::TooLong(_)))
        ));
    }

    #[test]
    fn empty_payload_is_invalid_test() {
        let resolver = AddressResolver::default();
        let empty = bech32::encode("cosmos", Vec::<bech32::u5>::new(), Variant::Bech32).unwrap();
        assert!(matches!(
            resolver.resolve(&empty),
            Err(AddressError::InvalidAddress(InvalidAddressKind::EmptyPayload))
        ));
    }

    #[test]
    fn bad_padding_is_invalid_test() {
        let resolver = AddressResolver::default();
        assert!(matches!(
            resolver.resolve("cosmos1pp5hzral"),
            Err(AddressError::InvalidAddress(InvalidAddressKind::Payload(_)))
        ));
    }

    #[test]
    fn configured_allow_list_test() {
        let resolver = AddressResolver::new("dungeon", ["Osmosis", " terra ", "", "dungeon"]);
        assert_eq!(
            resolver.accepted_prefixes(),
            &["dungeon".to_string(), "osmosis".to_string(), "terra".to_string()]
        );

        assert_eq!(resolver.resolve(TERRA).unwrap().as_str(), DUNGEON);
        assert_invalid(resolver.resolve(COSMOS));
        assert_invalid(resolver.resolve(OSMO));
    }

    #[test]
    fn long_account_payload_test() {
        let resolver = AddressResolver::default();
        let account = [7u8; 32];
        let cosmos = bech32::encode("cosmos", account.to_base32(), Variant::Bech32).unwrap();
        let dungeon = bech32::encode("dungeon", account.to_base32(), Variant::Bech32).unwrap();
        assert_eq!(resolver.resolve(&cosmos).unwrap().as_str(), dungeon);
    }

    #[test]
    fn bad_native_prefix_is_encoding_error_test() {
        let resolver = AddressResolver::new("Dun geon", ["cosmos"]);
        assert!(matches!(
            resolver.resolve(COSMOS),
            Err(AddressError::EncodingError { .. })
        ));
    }
}
