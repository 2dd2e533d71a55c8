//! AES-256-GCM payload encryption for the encrypted listener.
//!
//! Sealed payload layout: `nonce (12) || ciphertext || tag (16)`. Every
//! payload carries its own random nonce, so no state is shared between
//! datagrams.

use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM, NONCE_LEN};
use ring::rand::{SecureRandom, SystemRandom};
use sinkhole_domain::DomainError;
use std::fmt;
use std::path::Path;
use tracing::info;

pub const KEY_LEN: usize = 32;
pub const TAG_LEN: usize = 16;

/// Raw symmetric key material.
#[derive(Clone)]
pub struct EncryptionKey {
    bytes: [u8; KEY_LEN],
}

impl EncryptionKey {
    pub fn generate() -> Result<Self, DomainError> {
        let mut bytes = [0u8; KEY_LEN];
        SystemRandom::new()
            .fill(&mut bytes)
            .map_err(|_| DomainError::EncryptionFailed)?;
        Ok(Self { bytes })
    }

    pub fn from_bytes(raw: &[u8]) -> Result<Self, DomainError> {
        let bytes: [u8; KEY_LEN] = raw.try_into().map_err(|_| DomainError::InvalidKey {
            expected: KEY_LEN,
            actual: raw.len(),
        })?;
        Ok(Self { bytes })
    }

    pub fn import(path: &Path) -> Result<Self, DomainError> {
        let raw = std::fs::read(path).map_err(|e| DomainError::KeyFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let key = Self::from_bytes(&raw)?;
        info!(path = %path.display(), "Encryption key imported");
        Ok(key)
    }

    /// Writes the raw key bytes, owner-only on unix.
    pub fn export(&self, path: &Path) -> Result<(), DomainError> {
        let key_file_error = |e: std::io::Error| DomainError::KeyFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        std::fs::write(path, self.bytes).map_err(key_file_error)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .map_err(key_file_error)?;
        }

        info!(path = %path.display(), "Encryption key exported");
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionKey(..)")
    }
}

/// Seals and opens datagrams with one key.
pub struct PayloadCipher {
    key: LessSafeKey,
    rng: SystemRandom,
}

impl PayloadCipher {
    pub fn new(key: &EncryptionKey) -> Result<Self, DomainError> {
        let unbound = UnboundKey::new(&AES_256_GCM, key.as_bytes()).map_err(|_| {
            DomainError::InvalidKey {
                expected: KEY_LEN,
                actual: key.as_bytes().len(),
            }
        })?;
        Ok(Self {
            key: LessSafeKey::new(unbound),
            rng: SystemRandom::new(),
        })
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, DomainError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        self.rng
            .fill(&mut nonce_bytes)
            .map_err(|_| DomainError::EncryptionFailed)?;
        let nonce = Nonce::assume_unique_for_key(nonce_bytes);

        let mut sealed = Vec::with_capacity(NONCE_LEN + plaintext.len() + TAG_LEN);
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(plaintext);

        let tag = self
            .key
            .seal_in_place_separate_tag(nonce, Aad::empty(), &mut sealed[NONCE_LEN..])
            .map_err(|_| DomainError::EncryptionFailed)?;
        sealed.extend_from_slice(tag.as_ref());

        Ok(sealed)
    }

    pub fn decrypt(&self, sealed: &[u8]) -> Result<Vec<u8>, DomainError> {
        if sealed.len() < NONCE_LEN + TAG_LEN {
            return Err(DomainError::DecryptionFailed);
        }

        let (nonce_bytes, body) = sealed.split_at(NONCE_LEN);
        let nonce = Nonce::try_assume_unique_for_key(nonce_bytes)
            .map_err(|_| DomainError::DecryptionFailed)?;

        let mut buffer = body.to_vec();
        let plaintext_len = self
            .key
            .open_in_place(nonce, Aad::empty(), &mut buffer)
            .map_err(|_| DomainError::DecryptionFailed)?
            .len();
        buffer.truncate(plaintext_len);

        Ok(buffer)
    }
}

pub fn encrypt(plaintext: &[u8], key: &EncryptionKey) -> Result<Vec<u8>, DomainError> {
    PayloadCipher::new(key)?.encrypt(plaintext)
}

pub fn decrypt(sealed: &[u8], key: &EncryptionKey) -> Result<Vec<u8>, DomainError> {
    PayloadCipher::new(key)?.decrypt(sealed)
}
