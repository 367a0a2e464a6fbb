//! Persisted account storage.
//!
//! Not a wire format - an implementation convenience the facade may freely
//! replace. Two tiers:
//!
//! - [`StoredAccount`] - plaintext-at-rest JSON with the account's field
//!   names, each Base58-encoded.
//! - [`EncryptedAccountFile`] - an Argon2id-derived AES-256-GCM envelope
//!   around the same key material, for anything touching a real disk.
//!
//! This crate relies on AES-GCM's built-in authentication tag and does not
//! add a second detached integrity layer over the encrypted envelope (see
//! DESIGN.md).

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use argon2::{password_hash::SaltString, Argon2};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::keys::StealthKeys;

const ARGON2_M_COST: u32 = 65536;
const ARGON2_T_COST: u32 = 3;
const ARGON2_P_COST: u32 = 4;

/// Plaintext-at-rest account record, Base58-encoded.
#[derive(Serialize, Deserialize)]
pub struct StoredAccount {
    #[serde(rename = "viewingPrivkey")]
    pub viewing_privkey: String,
    #[serde(rename = "spendingPrivkey")]
    pub spending_privkey: String,
    #[serde(rename = "viewingPubkey")]
    pub viewing_pubkey: String,
    #[serde(rename = "spendingPubkey")]
    pub spending_pubkey: String,
}

impl Drop for StoredAccount {
    fn drop(&mut self) {
        self.viewing_privkey.zeroize();
        self.spending_privkey.zeroize();
    }
}

impl StoredAccount {
    pub fn from_keys(keys: &StealthKeys) -> Self {
        let (viewing_seed, spending_seed) = keys.export_secrets();
        Self {
            viewing_privkey: bs58::encode(viewing_seed).into_string(),
            spending_privkey: bs58::encode(spending_seed).into_string(),
            viewing_pubkey: bs58::encode(keys.viewing_pubkey).into_string(),
            spending_pubkey: bs58::encode(keys.spending_pubkey).into_string(),
        }
    }

    pub fn to_keys(&self) -> Result<StealthKeys> {
        let viewing_seed = decode_base58_32(&self.viewing_privkey)?;
        let spending_seed = decode_base58_32(&self.spending_privkey)?;
        Ok(StealthKeys::from_secrets(&viewing_seed, &spending_seed))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

fn decode_base58_32(field: &str) -> Result<[u8; 32]> {
    let bytes = bs58::decode(field)
        .into_vec()
        .map_err(|e| Error::InvalidEncoding(format!("invalid base58: {e}")))?;
    if bytes.len() != 32 {
        return Err(Error::InvalidEncoding(format!(
            "expected 32 decoded bytes, got {}",
            bytes.len()
        )));
    }
    let mut array = [0u8; 32];
    array.copy_from_slice(&bytes);
    Ok(array)
}

/// Raw key material, held only transiently while encrypting/decrypting.
#[derive(Serialize, Deserialize, Zeroize)]
#[zeroize(drop)]
struct KeyData {
    viewing_seed: [u8; 32],
    spending_seed: [u8; 32],
}

/// An Argon2id + AES-256-GCM encrypted envelope around an account's seeds.
#[derive(Serialize, Deserialize)]
pub struct EncryptedAccountFile {
    pub version: u8,
    salt: String,
    nonce: String,
    ciphertext: String,
    /// RFC 3339 creation timestamp, informational only - not checked on
    /// decrypt.
    pub created_at: String,
}

impl EncryptedAccountFile {
    pub fn encrypt(keys: &StealthKeys, password: &str) -> Result<Self> {
        let (viewing_seed, spending_seed) = keys.export_secrets();
        let data = KeyData {
            viewing_seed,
            spending_seed,
        };

        let salt = SaltString::generate(&mut rand::rngs::OsRng);
        let argon2 = Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            argon2::Params::new(ARGON2_M_COST, ARGON2_T_COST, ARGON2_P_COST, Some(32))
                .map_err(|e| Error::RngFailure(format!("argon2 params: {e}")))?,
        );

        let mut key_bytes = [0u8; 32];
        argon2
            .hash_password_into(password.as_bytes(), salt.as_str().as_bytes(), &mut key_bytes)
            .map_err(|e| Error::RngFailure(format!("key derivation failed: {e}")))?;

        let cipher = Aes256Gcm::new_from_slice(&key_bytes)
            .map_err(|e| Error::RngFailure(format!("cipher init failed: {e}")))?;
        key_bytes.zeroize();

        let mut nonce_bytes = [0u8; 12];
        rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from(nonce_bytes);

        let plaintext = serde_json::to_vec(&data)
            .map_err(|e| Error::RngFailure(format!("serialize failed: {e}")))?;

        let ciphertext = cipher
            .encrypt(&nonce, plaintext.as_ref())
            .map_err(|_| Error::RngFailure("encryption failed".into()))?;

        Ok(Self {
            version: 1,
            salt: salt.as_str().to_string(),
            nonce: base64_encode(&nonce_bytes),
            ciphertext: base64_encode(&ciphertext),
            created_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    pub fn decrypt(&self, password: &str) -> Result<StealthKeys> {
        let argon2 = Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            argon2::Params::new(ARGON2_M_COST, ARGON2_T_COST, ARGON2_P_COST, Some(32))
                .map_err(|e| Error::RngFailure(format!("argon2 params: {e}")))?,
        );

        let mut key_bytes = [0u8; 32];
        argon2
            .hash_password_into(password.as_bytes(), self.salt.as_bytes(), &mut key_bytes)
            .map_err(|e| Error::RngFailure(format!("key derivation failed: {e}")))?;

        let cipher = Aes256Gcm::new_from_slice(&key_bytes)
            .map_err(|e| Error::RngFailure(format!("cipher init failed: {e}")))?;
        key_bytes.zeroize();

        let nonce_bytes = base64_decode(&self.nonce)
            .map_err(|e| Error::InvalidEncoding(format!("invalid nonce encoding: {e}")))?;
        let ciphertext = base64_decode(&self.ciphertext)
            .map_err(|e| Error::InvalidEncoding(format!("invalid ciphertext encoding: {e}")))?;

        if nonce_bytes.len() != 12 {
            return Err(Error::InvalidEncoding("invalid nonce length".into()));
        }
        let mut nonce_array = [0u8; 12];
        nonce_array.copy_from_slice(&nonce_bytes);
        let nonce = Nonce::from(nonce_array);

        let plaintext = cipher
            .decrypt(&nonce, ciphertext.as_ref())
            .map_err(|_| Error::InvalidEncoding("wrong password or corrupted data".into()))?;

        let data: KeyData = serde_json::from_slice(&plaintext)
            .map_err(|e| Error::InvalidEncoding(format!("corrupted plaintext: {e}")))?;

        Ok(StealthKeys::from_secrets(&data.viewing_seed, &data.spending_seed))
    }

    /// Verify a candidate password without fully decoding the key material,
    /// useful for password-change flows. Delegates to `decrypt` and
    /// discards the result.
    pub fn verify_password(&self, password: &str) -> bool {
        self.decrypt(password).is_ok()
    }
}

fn base64_encode(data: &[u8]) -> String {
    use base64::{engine::general_purpose::STANDARD, Engine};
    STANDARD.encode(data)
}

fn base64_decode(s: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    use base64::{engine::general_purpose::STANDARD, Engine};
    STANDARD.decode(s)
}

/// Default location for a persisted account file, `~/.stealthsol/account.enc.json`.
/// Callers are free to pass an explicit path instead; this exists only to
/// give a CLI a sane default for its keypair file.
pub fn default_account_path() -> Option<std::path::PathBuf> {
    dirs::home_dir().map(|home| home.join(".stealthsol").join("account.enc.json"))
}
