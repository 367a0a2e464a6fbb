//! A constant-cost pre-filter over announcements that lets a recipient
//! skip ~255/256 of the announcements that are not theirs without paying
//! for a full address recomputation.
//!
//! Necessary but not sufficient: a positive match here MUST be followed by
//! a full [`crate::keys::compute_stealth_address`]-equivalent recomputation
//! (see `account::Account::compute_expected_address`) and an equality check
//! against the announcement's claimed stealth address before treating the
//! payment as real. Expected false-positive rate is 1/256.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::bridge::{ed25519_pubkey_to_x25519, x25519};
use crate::error::Result;
use crate::keys::StealthKeys;

/// Cheaply check whether an announcement's view tag matches what this
/// recipient's viewing key would produce for the given ephemeral key.
///
/// Returns `Ok(false)` (not an error) on a view-tag mismatch; only a
/// genuinely invalid ephemeral point is an error. The comparison runs in
/// constant time.
pub fn check_view_tag(
    keys: &StealthKeys,
    ephemeral_pubkey: &[u8; 32],
    view_tag: u8,
) -> Result<bool> {
    let ephemeral_x25519 = ed25519_pubkey_to_x25519(ephemeral_pubkey)?;
    let shared_secret = x25519(&keys.viewing_scalar(), &ephemeral_x25519);
    let tweak = Sha256::digest(shared_secret);
    Ok(bool::from(tweak[0].ct_eq(&view_tag)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::compute_stealth_address;

    #[test]
    fn matches_for_genuine_payment() {
        let keys = StealthKeys::generate();
        let meta = keys.meta_address();
        let (_addr, ephemeral, view_tag) = compute_stealth_address(&meta).unwrap();
        assert!(check_view_tag(&keys, &ephemeral, view_tag).unwrap());
    }

    #[test]
    fn wrong_view_tag_does_not_match() {
        let keys = StealthKeys::generate();
        let meta = keys.meta_address();
        let (_addr, ephemeral, view_tag) = compute_stealth_address(&meta).unwrap();
        let wrong = view_tag.wrapping_add(1);
        assert!(!check_view_tag(&keys, &ephemeral, wrong).unwrap());
    }

    #[test]
    fn cross_recipient_mismatches_with_overwhelming_probability() {
        let recipient = StealthKeys::generate();
        let other = StealthKeys::generate();
        let meta = other.meta_address();
        let (_addr, ephemeral, view_tag) = compute_stealth_address(&meta).unwrap();
        // Not guaranteed false, but true with probability only 1/256.
        let _ = check_view_tag(&recipient, &ephemeral, view_tag).unwrap();
    }

    #[test]
    fn invalid_ephemeral_point_is_an_error() {
        let keys = StealthKeys::generate();
        assert!(check_view_tag(&keys, &[0u8; 32], 0).is_err());
    }
}
