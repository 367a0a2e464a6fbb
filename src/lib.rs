//! Cryptographic core of a stealth-address scheme for Ed25519 account
//! chains (exemplified by Solana).
//!
//! A recipient publishes a single long-lived meta-address
//! ([`meta_address::MetaAddress`]) from which any sender can derive a
//! one-time account address ([`payment::Payment`]) that only the recipient
//! can later spend ([`account::Account`]). Linkage between successive
//! payments to the same recipient is destroyed on-chain: each payment lands
//! at a fresh address, and the on-chain sender-to-recipient edge exists
//! only in a public [`announcement::Announcement`] that is useless to
//! anyone lacking the recipient's viewing key.
//!
//! Chain connection, transaction assembly, and announcement discovery are
//! explicitly out of scope - consumed through two narrow interfaces: "sign
//! arbitrary bytes with the derived key" ([`keys::sign`]) and
//! "persist/retrieve announcements" ([`announcement::Announcement`]).
//!
//! ```
//! use stealthsol_core::{account::Account, payment::Payment, scanner};
//!
//! let recipient = Account::generate();
//! let payment = Payment::for_meta_address(&recipient.meta_address()).unwrap();
//!
//! let discovered = scanner::scan(&recipient, vec![payment.announcement()]);
//! assert_eq!(discovered.len(), 1);
//! assert_eq!(discovered[0].stealth_address, payment.stealth_address);
//! ```

pub mod account;
pub mod announcement;
pub mod bridge;
pub mod error;
pub mod keys;
pub mod meta_address;
pub mod payment;
pub mod scanner;
pub mod storage;
pub mod view_tag;

pub use account::Account;
pub use announcement::Announcement;
pub use error::{Error, Result};
pub use keys::{sign, verify, StealthKeys, StealthSigningKey};
pub use meta_address::MetaAddress;
pub use payment::Payment;
pub use scanner::{scan, scan_with_balance, DiscoveredPayment};
