//! `Payment` is the sender-side counterpart to `Account`.
//!
//! Constructed from a recipient meta-address, it eagerly computes the
//! stealth address, ephemeral public key, and view tag, and retains them
//! for the sender to hand to the external transaction-assembly layer and to
//! publish as an announcement. Transaction assembly and chain submission
//! are out of scope for this crate.

use std::str::FromStr;

use crate::announcement::Announcement;
use crate::bridge::decompress_validated;
use crate::error::Result;
use crate::keys::compute_stealth_address;
use crate::meta_address::MetaAddress;

/// A computed stealth payment, ready to be announced.
pub struct Payment {
    pub stealth_address: [u8; 32],
    pub ephemeral_pubkey: [u8; 32],
    pub view_tag: u8,
}

impl Payment {
    /// Compute a payment for the given recipient meta-address using the
    /// host CSPRNG for the ephemeral key.
    pub fn for_meta_address(meta: &MetaAddress) -> Result<Self> {
        decompress_validated(&meta.viewing_pubkey)?;
        decompress_validated(&meta.spending_pubkey)?;

        let (stealth_address, ephemeral_pubkey, view_tag) = compute_stealth_address(meta)?;
        Ok(Self {
            stealth_address,
            ephemeral_pubkey,
            view_tag,
        })
    }

    /// Parse a meta-address string (`st:sol:...`) and compute a payment
    /// for it in one step.
    pub fn for_meta_address_str(meta: &str) -> Result<Self> {
        Self::for_meta_address(&MetaAddress::from_str(meta)?)
    }

    /// The public announcement a sender publishes for this payment.
    pub fn announcement(&self) -> Announcement {
        Announcement::new(self.ephemeral_pubkey, self.view_tag, self.stealth_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::StealthKeys;

    #[test]
    fn eagerly_computes_and_retains_all_three_fields() {
        let recipient = StealthKeys::generate();
        let payment = Payment::for_meta_address(&recipient.meta_address()).unwrap();

        let announcement = payment.announcement();
        assert_eq!(announcement.ephemeral_pubkey, payment.ephemeral_pubkey);
        assert_eq!(announcement.view_tag, payment.view_tag);
        assert_eq!(announcement.stealth_address, payment.stealth_address);
    }

    #[test]
    fn string_constructor_matches_object_constructor_semantics() {
        let recipient = StealthKeys::generate();
        let meta_string = recipient.meta_address().encode();

        // Can't compare exact output (fresh ephemeral key each time) but
        // both constructors must succeed identically.
        assert!(Payment::for_meta_address_str(&meta_string).is_ok());
        assert!(Payment::for_meta_address(&recipient.meta_address()).is_ok());
    }

    #[test]
    fn rejects_malformed_meta_address_string() {
        assert!(Payment::for_meta_address_str("invalid").is_err());
        assert!(Payment::for_meta_address_str("st:sol:").is_err());
    }
}
