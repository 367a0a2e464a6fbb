//! Ed25519 <-> X25519 conversions, scalar conventions, and the
//! constant-time X25519 scalar multiplication used for ECDH.
//!
//! This module centralizes the two endianness conventions the rest of the
//! crate depends on: the *tweak* scalar is read big-endian (matching the
//! EIP-5564 derivation style), while every other Ed25519 scalar is read
//! little-endian per the standard clamping rules. Mixing them breaks
//! cross-verification between sender and receiver.

use curve25519_dalek::{
    edwards::{CompressedEdwardsY, EdwardsPoint},
    montgomery::MontgomeryPoint,
    scalar::Scalar,
    traits::IsIdentity,
};
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

use crate::error::{Error, Result};

/// Order of the Ed25519 prime-order subgroup: L = 2^252 + 27742317777372353535851937790883648493
pub const L_HEX: &str = "1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed";

/// Decompress and validate a compressed Ed25519 point.
///
/// Rejects points that fail to decompress, the identity point, and points
/// in the small-order torsion subgroup (the 8 low-order points on the
/// Curve25519 curve equation). Any other canonical non-identity point is
/// accepted. This check is the caller's responsibility whenever 32 bytes
/// arriving from outside the process are about to be used as an Ed25519
/// public key (meta-address fields, ephemeral keys in announcements).
pub fn decompress_validated(bytes: &[u8; 32]) -> Result<EdwardsPoint> {
    let point = CompressedEdwardsY(*bytes)
        .decompress()
        .ok_or(Error::InvalidPoint)?;

    if point.is_identity() {
        return Err(Error::InvalidPoint);
    }

    // Small-order points vanish under multiplication by the cofactor (8).
    if point.mul_by_cofactor().is_identity() {
        return Err(Error::InvalidPoint);
    }

    Ok(point)
}

/// Compress an Edwards point to its canonical 32-byte form.
pub fn compress(point: &EdwardsPoint) -> [u8; 32] {
    point.compress().to_bytes()
}

/// Convert a decompressed Ed25519 point to its X25519 (Montgomery `u`)
/// representation.
///
/// `u = (1 + y) * (1 - y)^-1 (mod p)`, emitted as 32 little-endian bytes.
/// Field inversion here runs on a public `y` coordinate and may be
/// variable-time.
pub fn edwards_to_montgomery(point: &EdwardsPoint) -> [u8; 32] {
    point.to_montgomery().to_bytes()
}

/// Convert a compressed Ed25519 public key directly to its X25519 public
/// form, validating the point first.
pub fn ed25519_pubkey_to_x25519(bytes: &[u8; 32]) -> Result<[u8; 32]> {
    let point = decompress_validated(bytes)?;
    Ok(edwards_to_montgomery(&point))
}

/// Derive the clamped Curve25519 scalar for a 32-byte seed.
///
/// `h = SHA-512(seed)`, `s = clamp(h[0..32])`, read little-endian. This is
/// the same derivation Ed25519 uses to turn a seed into its signing scalar,
/// so it serves double duty: as the X25519 private scalar for ECDH, and as
/// the `s_spend` scalar used in stealth key derivation. Both sender and
/// receiver must use this exact path for their ECDH computations to agree.
pub fn clamped_scalar_from_seed(seed: &[u8; 32]) -> Scalar {
    let digest = Sha512::digest(seed);
    let mut hash = [0u8; 64];
    hash.copy_from_slice(&digest);
    let mut clamped = [0u8; 32];
    clamped.copy_from_slice(&hash[..32]);
    clamped[0] &= 248;
    clamped[31] &= 127;
    clamped[31] |= 64;
    hash.zeroize();
    let scalar = Scalar::from_bits(clamped);
    clamped.zeroize();
    scalar
}

/// Interpret a 32-byte tweak (the SHA-256 digest of a shared secret) as a
/// big-endian integer, reduced modulo L.
///
/// This is the one place in the crate that reads a scalar big-endian;
/// every other scalar (seeds, nonce prefixes) is little-endian.
pub fn tweak_scalar_be(tweak: &[u8; 32]) -> Scalar {
    let mut le = *tweak;
    le.reverse();
    Scalar::from_bytes_mod_order(le)
}

/// Perform the X25519 Diffie-Hellman function: `scalar * point` on the
/// Montgomery curve, via the constant-time ladder curve25519-dalek performs
/// internally for `MontgomeryPoint` scalar multiplication.
///
/// `scalar` must already be clamped (see [`clamped_scalar_from_seed`]);
/// this function does not clamp on the caller's behalf.
pub fn x25519(scalar: &Scalar, public: &[u8; 32]) -> [u8; 32] {
    let point = MontgomeryPoint(*public);
    (scalar * point).to_bytes()
}
