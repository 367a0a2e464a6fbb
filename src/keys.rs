//! Generate, derive, and verify stealth keypairs from a meta-address and
//! an ephemeral key, plus the scalar-form signer needed because
//! `s_stealth` is not the SHA-512 image of any known seed.

use curve25519_dalek::{constants::ED25519_BASEPOINT_POINT, scalar::Scalar};
use ed25519_dalek::{
    ExpandedSecretKey, PublicKey as DalekPublicKey, Signature as DalekSignature, Verifier,
};
use rand_core::{CryptoRng, RngCore};
use sha2::{Digest, Sha256, Sha512};
use zeroize::Zeroize;

use crate::bridge::{
    clamped_scalar_from_seed, compress, decompress_validated, ed25519_pubkey_to_x25519, x25519,
};
use crate::error::{Error, Result};
use crate::meta_address::MetaAddress;

/// A 32-byte seed that zeroizes on drop.
#[derive(Clone)]
struct Seed([u8; 32]);

impl Drop for Seed {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// The recipient's long-lived private key material: two independent seeds
/// and their derived meta-address. Exclusively held by the recipient; the
/// viewing seed may be delegated to a scanning service without conferring
/// spending capability.
///
/// Does not implement `Clone`/`Copy`/`Debug` to avoid accidental secret
/// duplication or leakage into logs.
pub struct StealthKeys {
    viewing_secret: Seed,
    spending_secret: Seed,
    pub viewing_pubkey: [u8; 32],
    pub spending_pubkey: [u8; 32],
}

impl StealthKeys {
    /// Draw two independent seeds from the host CSPRNG and derive their
    /// Ed25519 public keys.
    pub fn generate() -> Self {
        Self::generate_with_rng(&mut rand::rngs::OsRng)
    }

    /// Draw two independent seeds from the given RNG. Exposed so tests and
    /// embedding applications can supply a deterministic CSPRNG.
    pub fn generate_with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut viewing_bytes = [0u8; 32];
        let mut spending_bytes = [0u8; 32];
        rng.fill_bytes(&mut viewing_bytes);
        rng.fill_bytes(&mut spending_bytes);
        let keys = Self::from_secrets(&viewing_bytes, &spending_bytes);
        viewing_bytes.zeroize();
        spending_bytes.zeroize();
        keys
    }

    /// Reconstruct keys from two previously generated seeds (e.g. loaded
    /// from storage).
    pub fn from_secrets(viewing_seed: &[u8; 32], spending_seed: &[u8; 32]) -> Self {
        let viewing_pubkey = compress(&(&clamped_scalar_from_seed(viewing_seed) * &ED25519_BASEPOINT_POINT));
        let spending_pubkey = compress(&(&clamped_scalar_from_seed(spending_seed) * &ED25519_BASEPOINT_POINT));

        Self {
            viewing_secret: Seed(*viewing_seed),
            spending_secret: Seed(*spending_seed),
            viewing_pubkey,
            spending_pubkey,
        }
    }

    /// This recipient's public meta-address.
    pub fn meta_address(&self) -> MetaAddress {
        MetaAddress {
            viewing_pubkey: self.viewing_pubkey,
            spending_pubkey: self.spending_pubkey,
        }
    }

    /// Export the two raw seeds, e.g. for encrypted storage. Callers must
    /// handle the returned bytes with the same care as the originals.
    pub fn export_secrets(&self) -> ([u8; 32], [u8; 32]) {
        (self.viewing_secret.0, self.spending_secret.0)
    }

    /// The clamped viewing scalar, for internal use by the view-tag filter
    /// and key derivation.
    pub(crate) fn viewing_scalar(&self) -> Scalar {
        clamped_scalar_from_seed(&self.viewing_secret.0)
    }

    /// The clamped spending scalar, for internal use by key derivation.
    pub(crate) fn spending_scalar(&self) -> Scalar {
        clamped_scalar_from_seed(&self.spending_secret.0)
    }
}

/// Sender-side: compute a fresh stealth address, the ephemeral public key to
/// publish, and the one-byte view tag, for a payment to `meta`.
pub fn compute_stealth_address(meta: &MetaAddress) -> Result<([u8; 32], [u8; 32], u8)> {
    compute_stealth_address_with_rng(meta, &mut rand::rngs::OsRng)
}

/// As [`compute_stealth_address`], but drawing the ephemeral seed from the
/// given RNG. The sender must not reuse the ephemeral seed across payments.
pub fn compute_stealth_address_with_rng<R: RngCore + CryptoRng>(
    meta: &MetaAddress,
    rng: &mut R,
) -> Result<([u8; 32], [u8; 32], u8)> {
    let mut ephemeral_seed = [0u8; 32];
    rng.fill_bytes(&mut ephemeral_seed);

    let ephemeral_scalar = clamped_scalar_from_seed(&ephemeral_seed);
    ephemeral_seed.zeroize();
    let ephemeral_pubkey = compress(&(&ephemeral_scalar * &ED25519_BASEPOINT_POINT));

    let viewing_x25519 = ed25519_pubkey_to_x25519(&meta.viewing_pubkey)?;
    let shared_secret = x25519(&ephemeral_scalar, &viewing_x25519);

    let tweak = Sha256::digest(shared_secret);
    let view_tag = tweak[0];
    let mut tweak_bytes = [0u8; 32];
    tweak_bytes.copy_from_slice(&tweak);
    let t = crate::bridge::tweak_scalar_be(&tweak_bytes);

    let spend_point = decompress_validated(&meta.spending_pubkey)?;
    let stealth_point = &spend_point + &(&t * &ED25519_BASEPOINT_POINT);

    Ok((compress(&stealth_point), ephemeral_pubkey, view_tag))
}

/// Receiver-side: given the recipient's own viewing and spending seeds and
/// an ephemeral public key taken from an announcement, derive the
/// scalar-form stealth signing key and its public key.
///
/// Infallible except when `ephemeral_pubkey` does not decompress to a
/// valid point.
pub fn derive_stealth_keypair(
    keys: &StealthKeys,
    ephemeral_pubkey: &[u8; 32],
) -> Result<StealthSigningKey> {
    let ephemeral_x25519 = ed25519_pubkey_to_x25519(ephemeral_pubkey)?;
    let shared_secret = x25519(&keys.viewing_scalar(), &ephemeral_x25519);

    let tweak = Sha256::digest(shared_secret);
    let mut tweak_bytes = [0u8; 32];
    tweak_bytes.copy_from_slice(&tweak);
    let t = crate::bridge::tweak_scalar_be(&tweak_bytes);

    let s_stealth = keys.spending_scalar() + t;
    let public_key = compress(&(&s_stealth * &ED25519_BASEPOINT_POINT));

    Ok(StealthSigningKey {
        scalar: s_stealth,
        public_key,
    })
}

/// A scalar-form Ed25519 private key produced by stealth derivation.
///
/// No 32-byte seed exists whose standard seed-to-scalar pipeline would
/// yield this scalar, so standard "seed-in, signature-out" Ed25519 APIs
/// cannot sign with it. [`sign`] builds an `ExpandedSecretKey` directly from
/// the scalar plus a deterministic nonce prefix instead.
pub struct StealthSigningKey {
    scalar: Scalar,
    pub public_key: [u8; 32],
}

impl Drop for StealthSigningKey {
    fn drop(&mut self) {
        self.scalar = Scalar::zero();
    }
}

impl StealthSigningKey {
    /// Build a signing key directly from a scalar (e.g. one already
    /// reconstructed from storage). The public key is recomputed as
    /// `scalar * B`.
    pub fn from_scalar(scalar: Scalar) -> Self {
        let public_key = compress(&(&scalar * &ED25519_BASEPOINT_POINT));
        Self { scalar, public_key }
    }
}

/// Sign `message` with a scalar-form stealth key, producing a signature
/// that verifies under the ordinary Ed25519 rule keyed by `key.public_key`.
///
/// The nonce is derived deterministically as
/// `r = SHA-512(prefix || message) mod L` where
/// `prefix = SHA-512(le_bytes(scalar))[32..64]`, matching the recommended
/// scheme in the EIP-5564-style derivation: it never depends on an unknown
/// seed, and distinct messages get distinct nonces without needing fresh
/// randomness at signing time. `ExpandedSecretKey::sign` performs the
/// `SHA-512(prefix || message) mod L` step itself once handed `scalar ||
/// prefix`, so this function's only job is assembling that 64-byte pair.
pub fn sign(message: &[u8], key: &StealthSigningKey) -> [u8; 64] {
    let mut scalar_bytes = key.scalar.to_bytes();
    let digest = Sha512::digest(scalar_bytes);
    let mut scalar_hash = [0u8; 64];
    scalar_hash.copy_from_slice(&digest);

    let mut expanded_bytes = [0u8; 64];
    expanded_bytes[..32].copy_from_slice(&scalar_bytes);
    expanded_bytes[32..].copy_from_slice(&scalar_hash[32..64]);

    let expanded = ExpandedSecretKey::from_bytes(&expanded_bytes)
        .expect("32 || 32 is always a valid ExpandedSecretKey encoding");
    let dalek_pubkey = DalekPublicKey::from_bytes(&key.public_key)
        .expect("public_key was derived as scalar * B, always a valid Ed25519 point");

    let signature: DalekSignature = expanded.sign(message, &dalek_pubkey);

    scalar_bytes.zeroize();
    scalar_hash.zeroize();
    expanded_bytes.zeroize();

    signature.to_bytes()
}

/// Verify a signature produced by [`sign`] (or any standard Ed25519
/// signature) under the ordinary Ed25519 verification rule.
pub fn verify(message: &[u8], signature: &[u8; 64], public_key: &[u8; 32]) -> Result<()> {
    let dalek_pubkey = DalekPublicKey::from_bytes(public_key).map_err(|_| Error::InvalidPoint)?;
    let sig = DalekSignature::from_bytes(signature).map_err(|_| Error::InvalidPoint)?;
    dalek_pubkey
        .verify(message, &sig)
        .map_err(|_| Error::InvalidPoint)
}
