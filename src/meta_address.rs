//! Canonical textual encoding/decoding of the recipient's long-lived
//! public meta-address.
//!
//! Canonical form: the literal prefix `st:sol:` followed by Base58
//! (Bitcoin alphabet) of the 64-byte concatenation
//! `viewingPubkey || spendingPubkey`. Decoding does not verify point
//! validity - that is the caller's responsibility once the pubkeys are
//! used for derivation (see `bridge::decompress_validated`).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Textual prefix for a stealth meta-address, matching the chain this
/// scheme targets.
pub const PREFIX: &str = "st:sol:";

/// A recipient's public meta-address: a pair of Ed25519 public keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaAddress {
    pub viewing_pubkey: [u8; 32],
    pub spending_pubkey: [u8; 32],
}

impl MetaAddress {
    pub fn new(viewing_pubkey: [u8; 32], spending_pubkey: [u8; 32]) -> Self {
        Self {
            viewing_pubkey,
            spending_pubkey,
        }
    }

    /// Encode as `st:sol:<base58>`. Deterministic.
    pub fn encode(&self) -> String {
        let mut combined = [0u8; 64];
        combined[..32].copy_from_slice(&self.viewing_pubkey);
        combined[32..].copy_from_slice(&self.spending_pubkey);
        format!("{PREFIX}{}", bs58::encode(combined).into_string())
    }

    /// Decode from `st:sol:<base58>`.
    ///
    /// Rejects a missing prefix, non-Base58 body, or a decoded length other
    /// than 64 bytes. Does not check that either half decompresses to a
    /// valid curve point.
    pub fn decode(input: &str) -> Result<Self> {
        let body = input
            .strip_prefix(PREFIX)
            .ok_or_else(|| Error::InvalidEncoding("missing st:sol: prefix".into()))?;

        let bytes = bs58::decode(body)
            .into_vec()
            .map_err(|e| Error::InvalidEncoding(format!("invalid base58: {e}")))?;

        if bytes.len() != 64 {
            return Err(Error::InvalidEncoding(format!(
                "expected 64 decoded bytes, got {}",
                bytes.len()
            )));
        }

        let mut viewing_pubkey = [0u8; 32];
        let mut spending_pubkey = [0u8; 32];
        viewing_pubkey.copy_from_slice(&bytes[..32]);
        spending_pubkey.copy_from_slice(&bytes[32..]);

        Ok(Self {
            viewing_pubkey,
            spending_pubkey,
        })
    }
}

impl std::str::FromStr for MetaAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

impl std::fmt::Display for MetaAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let meta = MetaAddress::new([7u8; 32], [9u8; 32]);
        let encoded = meta.encode();
        assert!(encoded.starts_with(PREFIX));
        assert_eq!(MetaAddress::decode(&encoded).unwrap(), meta);
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(matches!(
            MetaAddress::decode("invalid"),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[test]
    fn rejects_empty_body() {
        assert!(matches!(
            MetaAddress::decode("st:sol:"),
            Err(Error::InvalidEncoding(_))
        ));
    }

    #[test]
    fn rejects_wrong_chain_tag() {
        assert!(matches!(
            MetaAddress::decode("st:eth:ABC"),
            Err(Error::InvalidEncoding(_))
        ));
    }
}
