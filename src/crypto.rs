//! Encryption at rest for project files.
//!
//! The key is derived with PBKDF2-HMAC-SHA256 from a passphrase and salt compiled into the
//! binary, so every installation shares it. This is obfuscation against casual inspection
//! of the files, not confidentiality against anyone who has the application.
//!
//! Blob layout: `MAGIC(4) | VERSION(1) | nonce(12) | AES-256-GCM ciphertext+tag`.

use crate::errors::{DecryptFailure, DiaError};
use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use sha2::Sha256;
use std::sync::LazyLock;
use zeroize::Zeroizing;

const MAGIC: &[u8; 4] = b"DIAX"; // DiaDrop encrypted eXchange
const VERSION: u8 = 1;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;
const HEADER_LEN: usize = MAGIC.len() + 1 + NONCE_LEN;

pub const KDF_ITERATIONS: u32 = 100_000;
const PASSPHRASE: &[u8] = b"dia_drop_secret_key_2024";
const SALT: &[u8] = b"dia_drop_salt_2024";

static APP_KEY: LazyLock<Zeroizing<[u8; 32]>> = LazyLock::new(derive_key);

/// Derive the application key from the embedded passphrase and salt.
///
/// Deterministic: every call, on every installation, yields the same key.
#[must_use]
pub fn derive_key() -> Zeroizing<[u8; 32]> {
    let mut key = Zeroizing::new([0u8; 32]);
    pbkdf2::pbkdf2_hmac::<Sha256>(PASSPHRASE, SALT, KDF_ITERATIONS, &mut *key);
    key
}

/// Cheap check: does `bytes` start like a blob written by this module?
#[must_use]
pub fn is_dia_blob(bytes: &[u8]) -> bool {
    bytes.len() >= HEADER_LEN && &bytes[..MAGIC.len()] == MAGIC
}

#[derive(Clone)]
pub struct DiaCipher {
    key: Zeroizing<[u8; 32]>,
}

impl std::fmt::Debug for DiaCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiaCipher").field("key", &"<redacted>").finish()
    }
}

impl Default for DiaCipher {
    fn default() -> Self {
        Self::new()
    }
}

impl DiaCipher {
    /// Cipher over the shared application key (derived once per process).
    #[must_use]
    pub fn new() -> Self {
        Self { key: Zeroizing::new(**APP_KEY) }
    }

    /// Cipher over explicit key material.
    #[must_use]
    pub fn from_key(key: [u8; 32]) -> Self {
        Self { key: Zeroizing::new(key) }
    }

    fn aead(&self) -> Result<Aes256Gcm, DiaError> {
        Aes256Gcm::new_from_slice(&*self.key).map_err(|e| DiaError::Encrypt(format!("aes key: {e}")))
    }

    /// Encrypt text under a fresh random nonce. Repeated calls give different bytes.
    pub fn encrypt(&self, plaintext: &str) -> Result<Vec<u8>, DiaError> {
        let cipher = self.aead()?;
        let mut nonce_bytes = [0u8; NONCE_LEN];
        getrandom::fill(&mut nonce_bytes).map_err(|e| DiaError::Encrypt(format!("nonce: {e}")))?;
        let ct = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
            .map_err(|e| DiaError::Encrypt(format!("encrypt: {e}")))?;
        let mut blob = Vec::with_capacity(HEADER_LEN + ct.len());
        blob.extend_from_slice(MAGIC);
        blob.push(VERSION);
        blob.extend_from_slice(&nonce_bytes);
        blob.extend_from_slice(&ct);
        Ok(blob)
    }

    /// Recover the plaintext, or say why it cannot be recovered.
    pub fn decrypt(&self, blob: &[u8]) -> Result<String, DecryptFailure> {
        if blob.len() < HEADER_LEN + TAG_LEN {
            return Err(if blob.len() >= MAGIC.len() && &blob[..MAGIC.len()] != MAGIC {
                DecryptFailure::BadMagic
            } else {
                DecryptFailure::Truncated
            });
        }
        let (magic, rest) = blob.split_at(MAGIC.len());
        if magic != MAGIC {
            return Err(DecryptFailure::BadMagic);
        }
        if rest[0] != VERSION {
            return Err(DecryptFailure::BadVersion(rest[0]));
        }
        let (nonce_bytes, ct) = rest[1..].split_at(NONCE_LEN);
        let cipher = self.aead().map_err(|_| DecryptFailure::Authentication)?;
        let pt = cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ct)
            .map_err(|_| DecryptFailure::Authentication)?;
        String::from_utf8(pt).map_err(|_| DecryptFailure::NotUtf8)
    }
}
