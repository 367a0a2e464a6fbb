//! Error kinds for the stealth-address core.
//!
//! Cryptographic primitive failures surface to the caller unchanged. View-tag
//! mismatches and announcement non-matches are silent negatives (`Option`/
//! `bool`), never errors - see `view_tag` and `scanner`.

use thiserror::Error;

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Meta-address string missing the `st:sol:` prefix, wrong decoded
    /// length, or invalid Base58 body.
    #[error("invalid meta-address encoding: {0}")]
    InvalidEncoding(String),

    /// 32 bytes do not decompress to a valid, non-identity,
    /// non-small-order Ed25519 point.
    #[error("invalid curve point")]
    InvalidPoint,

    /// Announcement payload is malformed or tagged as a non-stealth
    /// message. Reported as a soft failure so mixed-memo streams can be
    /// scanned; callers should treat this as "not a stealth announcement"
    /// rather than fatal.
    #[error("not a stealth announcement: {0}")]
    InvalidAnnouncement(String),

    /// Withdrawal requested exceeds available funds after fee reserve.
    /// Façade-only; the core derivation never raises this.
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: u64, available: u64 },

    /// The RNG refused to deliver bytes. Fatal, propagated unchanged.
    #[error("RNG failure: {0}")]
    RngFailure(String),
}
