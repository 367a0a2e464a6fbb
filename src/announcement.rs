//! Canonical serialization of `(ephemeralPubkey, viewTag, stealthAddress)`
//! as a small JSON memo payload.
//!
//! Wire form: `{"v":1,"t":"STEALTH","e":<base58>,"vt":<0..255>,"s":<base58>}`.
//! Unknown additional fields are ignored on decode. Decoding reports
//! malformed input as a soft failure (`Error::InvalidAnnouncement`) rather
//! than a fatal error, so a mixed-memo stream can simply skip non-stealth
//! entries while scanning.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const TAG: &str = "STEALTH";
const CURRENT_VERSION: u8 = 1;

/// A public record enabling recipient discovery of a stealth payment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Announcement {
    pub ephemeral_pubkey: [u8; 32],
    pub view_tag: u8,
    pub stealth_address: [u8; 32],
}

/// Wire-format mirror of [`Announcement`]. Kept separate from the public
/// struct so the JSON field names (`v`, `t`, `e`, `vt`, `s`) stay a pure
/// serialization detail.
#[derive(Serialize, Deserialize)]
struct Wire {
    v: u8,
    t: String,
    e: String,
    vt: u16,
    s: String,
    /// Swallow and ignore any additional fields future versions may add,
    /// without losing them from round-trip re-encoding of someone else's
    /// payload. Not currently surfaced to callers.
    #[serde(flatten)]
    _extra: serde_json::Map<String, serde_json::Value>,
}

impl Announcement {
    pub fn new(ephemeral_pubkey: [u8; 32], view_tag: u8, stealth_address: [u8; 32]) -> Self {
        Self {
            ephemeral_pubkey,
            view_tag,
            stealth_address,
        }
    }

    /// Serialize to the canonical JSON wire form.
    pub fn encode(&self) -> String {
        let wire = Wire {
            v: CURRENT_VERSION,
            t: TAG.to_string(),
            e: bs58::encode(self.ephemeral_pubkey).into_string(),
            vt: self.view_tag as u16,
            s: bs58::encode(self.stealth_address).into_string(),
            _extra: serde_json::Map::new(),
        };
        serde_json::to_string(&wire).expect("Wire serializes infallibly")
    }

    /// Decode from the JSON wire form.
    ///
    /// Returns `Error::InvalidAnnouncement` for non-JSON input, a `t` tag
    /// other than `"STEALTH"`, malformed Base58 fields, or a `vt` outside
    /// `0..=255`. Implementations accept any `v` greater than or equal to 1
    /// that still carries the four named fields; higher versions are not
    /// otherwise rejected here.
    pub fn decode(payload: &str) -> Result<Self> {
        let wire: Wire = serde_json::from_str(payload)
            .map_err(|e| Error::InvalidAnnouncement(format!("malformed JSON: {e}")))?;

        if wire.t != TAG {
            return Err(Error::InvalidAnnouncement(format!(
                "unexpected tag: {}",
                wire.t
            )));
        }

        if wire.vt > 255 {
            return Err(Error::InvalidAnnouncement("view tag out of range".into()));
        }

        let ephemeral_pubkey = decode_base58_32(&wire.e)?;
        let stealth_address = decode_base58_32(&wire.s)?;

        Ok(Self {
            ephemeral_pubkey,
            view_tag: wire.vt as u8,
            stealth_address,
        })
    }
}

fn decode_base58_32(field: &str) -> Result<[u8; 32]> {
    let bytes = bs58::decode(field)
        .into_vec()
        .map_err(|e| Error::InvalidAnnouncement(format!("invalid base58: {e}")))?;

    if bytes.len() != 32 {
        return Err(Error::InvalidAnnouncement(format!(
            "expected 32 decoded bytes, got {}",
            bytes.len()
        )));
    }

    let mut array = [0u8; 32];
    array.copy_from_slice(&bytes);
    Ok(array)
}
