//! `Scanner` applies an `Account` over an iterable of announcements, with
//! the on-chain account fetch and balance lookup replaced by an injected
//! callback so the core stays free of any chain-RPC dependency.
//!
//! For each announcement: view-tag filter, then a full expected-address
//! equality check, then derivation of the spending key. A positive
//! view-tag match that fails the address check is a silent negative
//! caused by an unrelated announcement with a colliding view tag - it is
//! never surfaced as an error.

use subtle::ConstantTimeEq;

use crate::account::Account;
use crate::announcement::Announcement;
use crate::keys::StealthSigningKey;

/// A payment this account has discovered while scanning, carrying the
/// signing capability needed to spend it.
pub struct DiscoveredPayment {
    pub ephemeral_pubkey: [u8; 32],
    pub stealth_address: [u8; 32],
    pub balance: u64,
    pub signing_key: StealthSigningKey,
}

/// Scan `announcements` against `account`, returning every payment that
/// survives the view-tag filter and the full address-equality check.
/// Malformed announcements and announcements for other recipients are
/// silently skipped, never surfaced as errors.
///
/// Trivially parallelizable by the caller across announcements - there is
/// no shared state between iterations.
pub fn scan<I>(account: &Account, announcements: I) -> Vec<DiscoveredPayment>
where
    I: IntoIterator<Item = Announcement>,
{
    scan_with_balance(account, announcements, |_stealth_address| 0)
}

/// As [`scan`], but querying `balance_of` (an external, injected balance
/// oracle) for each discovered payment's stealth address instead of
/// defaulting to zero.
pub fn scan_with_balance<I, B>(
    account: &Account,
    announcements: I,
    mut balance_of: B,
) -> Vec<DiscoveredPayment>
where
    I: IntoIterator<Item = Announcement>,
    B: FnMut(&[u8; 32]) -> u64,
{
    announcements
        .into_iter()
        .filter_map(|announcement| {
            let tag_matches = account.check_view_tag(&announcement).unwrap_or(false);
            if !tag_matches {
                return None;
            }

            let expected = account
                .compute_expected_address(&announcement.ephemeral_pubkey)
                .ok()?;
            if !bool::from(expected.ct_eq(&announcement.stealth_address)) {
                return None;
            }

            let signing_key = account
                .derive_keypair(&announcement.ephemeral_pubkey)
                .ok()?;
            let balance = balance_of(&announcement.stealth_address);

            Some(DiscoveredPayment {
                ephemeral_pubkey: announcement.ephemeral_pubkey,
                stealth_address: announcement.stealth_address,
                balance,
                signing_key,
            })
        })
        .collect()
}
