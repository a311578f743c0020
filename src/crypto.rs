//! AES-256-GCM encryption for portal passwords at rest.
//!
//! Stored format: `ENC:` prefix + base64(nonce || ciphertext || tag), with a
//! 12-byte nonce. Values without the prefix are treated as plaintext so that
//! rows written before encryption was enabled keep working.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use thiserror::Error;

const KEY_LENGTH: usize = 32;
const NONCE_LENGTH: usize = 12;

/// Marks a stored value as encrypted.
pub const ENCRYPTED_PREFIX: &str = "ENC:";

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("value is not encrypted")]
    NotEncrypted,
    #[error("malformed ciphertext: {0}")]
    Malformed(String),
    #[error("encryption failed")]
    EncryptionFailed,
    #[error("decryption failed")]
    DecryptionFailed,
}

/// Derives the AES-256 key as the SHA-256 digest of the configured secret.
pub fn derive_key(secret: &str) -> [u8; KEY_LENGTH] {
    let digest = Sha256::digest(secret.as_bytes());
    let mut key = [0u8; KEY_LENGTH];
    key.copy_from_slice(&digest);
    key
}

pub fn encrypt(plaintext: &str, key: &[u8; KEY_LENGTH]) -> Result<String, CryptoError> {
    let mut nonce_bytes = [0u8; NONCE_LENGTH];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CryptoError::EncryptionFailed)?;
    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|_| CryptoError::EncryptionFailed)?;

    let mut combined = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
    combined.extend_from_slice(&nonce_bytes);
    combined.extend_from_slice(&ciphertext);

    Ok(format!("{ENCRYPTED_PREFIX}{}", BASE64.encode(&combined)))
}

pub fn decrypt(value: &str, key: &[u8; KEY_LENGTH]) -> Result<String, CryptoError> {
    let encoded = value
        .strip_prefix(ENCRYPTED_PREFIX)
        .ok_or(CryptoError::NotEncrypted)?;

    let combined = BASE64
        .decode(encoded)
        .map_err(|e| CryptoError::Malformed(e.to_string()))?;
    if combined.len() <= NONCE_LENGTH {
        return Err(CryptoError::Malformed("ciphertext too short".to_string()));
    }

    let (nonce_bytes, ciphertext) = combined.split_at(NONCE_LENGTH);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CryptoError::DecryptionFailed)?;
    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed)?;

    String::from_utf8(plaintext).map_err(|e| CryptoError::Malformed(e.to_string()))
}

pub fn is_encrypted(value: &str) -> bool {
    value.starts_with(ENCRYPTED_PREFIX)
}

/// Decrypts when the value carries the prefix, passes plaintext through
/// otherwise.
pub fn decrypt_if_encrypted(value: &str, key: &[u8; KEY_LENGTH]) -> Result<String, CryptoError> {
    if is_encrypted(value) {
        decrypt(value, key)
    } else {
        Ok(value.to_string())
    }
}
