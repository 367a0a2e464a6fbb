//! `Account` composes the curve bridge, key derivation, view-tag filter,
//! and codecs around a recipient's own `StealthKeys`.
//!
//! Adds no cryptographic logic of its own; it wraps a loaded `StealthKeys`
//! with the read-only operations a recipient performs against incoming
//! announcements.

use crate::announcement::Announcement;
use crate::bridge::decompress_validated;
use crate::error::{Error, Result};
use crate::keys::{compute_stealth_address, derive_stealth_keypair, StealthKeys, StealthSigningKey};
use crate::meta_address::MetaAddress;
use crate::view_tag::check_view_tag;

/// A recipient's account: its private stealth keys plus the read-only
/// operations a recipient performs against incoming announcements.
pub struct Account {
    keys: StealthKeys,
}

impl Account {
    /// Generate a fresh account from the host CSPRNG.
    pub fn generate() -> Self {
        Self {
            keys: StealthKeys::generate(),
        }
    }

    /// Wrap previously generated or loaded stealth keys.
    pub fn from_stealth_keys(keys: StealthKeys) -> Self {
        Self { keys }
    }

    /// This account's public meta-address.
    pub fn meta_address(&self) -> MetaAddress {
        self.keys.meta_address()
    }

    /// This account's meta-address in its canonical `st:sol:` text form.
    pub fn meta_address_string(&self) -> String {
        self.meta_address().encode()
    }

    /// Cheap view-tag pre-filter over an announcement. A `true` result MUST
    /// still be followed by [`Account::compute_expected_address`] before
    /// treating the payment as real.
    pub fn check_view_tag(&self, announcement: &Announcement) -> Result<bool> {
        check_view_tag(&self.keys, &announcement.ephemeral_pubkey, announcement.view_tag)
    }

    /// Recompute the stealth address this account expects for a given
    /// ephemeral public key. Equal to the sender's `stealthAddress` for any
    /// announcement genuinely addressed to this account.
    pub fn compute_expected_address(&self, ephemeral_pubkey: &[u8; 32]) -> Result<[u8; 32]> {
        Ok(derive_stealth_keypair(&self.keys, ephemeral_pubkey)?.public_key)
    }

    /// Derive the scalar-form signing key for a payment at `ephemeral_pubkey`.
    pub fn derive_keypair(&self, ephemeral_pubkey: &[u8; 32]) -> Result<StealthSigningKey> {
        derive_stealth_keypair(&self.keys, ephemeral_pubkey)
    }

    /// Access to the underlying key material, e.g. for persistence.
    pub fn keys(&self) -> &StealthKeys {
        &self.keys
    }

    /// Trivial domain calculation kept from the withdrawal-planning surface:
    /// checks that `amount + fee_reserve` does not exceed `balance`.
    /// Transaction assembly itself is out of scope for this crate.
    pub fn plan_withdrawal(balance: u64, amount: u64, fee_reserve: u64) -> Result<u64> {
        let required = amount
            .checked_add(fee_reserve)
            .ok_or(Error::InsufficientBalance {
                requested: amount,
                available: balance,
            })?;
        if required > balance {
            return Err(Error::InsufficientBalance {
                requested: required,
                available: balance,
            });
        }
        Ok(balance - required)
    }
}

/// Sender-side: compute a stealth payment for the given recipient
/// meta-address without going through the [`crate::payment::Payment`]
/// wrapper. Exposed for callers that only need the raw tuple.
pub fn compute_payment(meta: &MetaAddress) -> Result<([u8; 32], [u8; 32], u8)> {
    // Validate the meta-address's own points eagerly so a bad meta-address
    // fails here rather than deep inside derivation.
    decompress_validated(&meta.viewing_pubkey)?;
    decompress_validated(&meta.spending_pubkey)?;
    compute_stealth_address(meta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::Payment;

    #[test]
    fn single_payment_round_trip_s1() {
        let account = Account::generate();
        let payment = Payment::for_meta_address(&account.meta_address()).unwrap();

        assert!(account
            .check_view_tag(&payment.announcement())
            .unwrap());
        assert_eq!(
            account
                .compute_expected_address(&payment.ephemeral_pubkey)
                .unwrap(),
            payment.stealth_address
        );
        assert_eq!(
            account
                .derive_keypair(&payment.ephemeral_pubkey)
                .unwrap()
                .public_key,
            payment.stealth_address
        );
    }

    #[test]
    fn cross_recipient_isolation_s2() {
        let a = Account::generate();
        let b = Account::generate();
        let payment = Payment::for_meta_address(&b.meta_address()).unwrap();

        // Even on the rare view-tag collision, the full address check must
        // still fail.
        if a.check_view_tag(&payment.announcement()).unwrap() {
            assert_ne!(
                a.compute_expected_address(&payment.ephemeral_pubkey).unwrap(),
                payment.stealth_address
            );
        }
    }

    #[test]
    fn three_payments_three_addresses_s3() {
        let account = Account::generate();
        let meta = account.meta_address();
        let p1 = Payment::for_meta_address(&meta).unwrap();
        let p2 = Payment::for_meta_address(&meta).unwrap();
        let p3 = Payment::for_meta_address(&meta).unwrap();

        assert_ne!(p1.stealth_address, p2.stealth_address);
        assert_ne!(p2.stealth_address, p3.stealth_address);
        assert_ne!(p1.stealth_address, p3.stealth_address);

        for p in [&p1, &p2, &p3] {
            assert_eq!(
                account.derive_keypair(&p.ephemeral_pubkey).unwrap().public_key,
                p.stealth_address
            );
        }
    }

    #[test]
    fn wrong_view_tag_s5() {
        let account = Account::generate();
        let payment = Payment::for_meta_address(&account.meta_address()).unwrap();
        let wrong = Announcement::new(
            payment.ephemeral_pubkey,
            payment.view_tag.wrapping_add(1),
            payment.stealth_address,
        );
        assert!(!account.check_view_tag(&wrong).unwrap());
    }

    #[test]
    fn plan_withdrawal_rejects_insufficient_balance() {
        assert!(Account::plan_withdrawal(100, 50, 10).is_ok());
        assert!(matches!(
            Account::plan_withdrawal(100, 95, 10),
            Err(Error::InsufficientBalance { .. })
        ));
    }
}
