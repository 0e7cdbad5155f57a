/*
 *  Copyright 2025-2026 Colliery Software
 *
 *  Licensed under the Apache License, Version 2.0 (the "License");
 *  you may not use this file except in compliance with the License.
 *  You may obtain a copy of the License at
 *
 *      http://www.apache.org/licenses/LICENSE-2.0
 *
 *  Unless required by applicable law or agreed to in writing, software
 *  distributed under the License is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  See the License for the specific language governing permissions and
 *  limitations under the License.
 */

//! Passphrase-based encryption for private keys at rest.
//!
//! The encrypted form is a compact JSON envelope that records everything
//! needed to decrypt it except the passphrase:
//!
//! ```json
//! {"kdf":{"name":"scrypt","params":{"N":32768,"r":8,"p":1},"salt":"..."},
//!  "cipher":{"name":"nacl/secretbox","nonce":"..."},
//!  "ciphertext":"..."}
//! ```
//!
//! - Key derivation: scrypt with a 32-byte random salt, producing a 32-byte key
//! - Encryption: XSalsa20-Poly1305 (NaCl secretbox) with a 24-byte random nonce;
//!   the ciphertext field is `tag (16 bytes) || ciphertext`
//! - Binary fields are standard base64 with padding
//!
//! The scrypt parameters travel with the data, so decryption honours whatever
//! work factor the envelope was written with. Each parameter is bounded
//! ([`MAX_LOG_N`], [`MAX_R`], [`MAX_P`]) and so is the memory they imply
//! ([`MAX_MEMORY`]), since the envelope may come from an untrusted file.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use crypto_secretbox::aead::{generic_array::GenericArray, Aead, KeyInit};
use crypto_secretbox::XSalsa20Poly1305;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroizing;

/// Errors that can occur during key encryption/decryption.
#[derive(Debug, Error)]
pub enum KeyEncryptionError {
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Wrong passphrase and tampered ciphertext are reported identically.
    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("Invalid encrypted data: {0}")]
    InvalidEncryptedData(String),

    #[error("Unsupported key derivation function: {0}")]
    UnsupportedKdf(String),

    #[error("Unsupported cipher: {0}")]
    UnsupportedCipher(String),

    #[error("Invalid scrypt parameters: {0}")]
    InvalidKdfParams(String),
}

/// Name of the key derivation function recorded in the envelope.
pub const KDF_NAME: &str = "scrypt";

/// Name of the cipher recorded in the envelope.
pub const CIPHER_NAME: &str = "nacl/secretbox";

/// Size of the scrypt salt in bytes.
pub const SALT_SIZE: usize = 32;

/// Size of the XSalsa20 nonce in bytes.
pub const NONCE_SIZE: usize = 24;

/// Size of the Poly1305 tag in bytes.
const TAG_SIZE: usize = 16;

/// Size of the derived secretbox key in bytes.
const KEY_SIZE: usize = 32;

/// Largest scrypt cost (`log2(N)`) accepted.
pub const MAX_LOG_N: u8 = 20;

/// Largest scrypt block size `r` accepted.
pub const MAX_R: u32 = 32;

/// Largest scrypt parallelism `p` accepted.
pub const MAX_P: u32 = 16;

/// Largest scrypt working array (`128 * r * N` bytes) accepted, 1 GiB.
pub const MAX_MEMORY: u64 = 1 << 30;

/// scrypt cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScryptParams {
    /// `log2(N)`
    pub log_n: u8,
    pub r: u32,
    pub p: u32,
}

impl ScryptParams {
    /// The parameters every new key is encrypted with: N = 32768, r = 8, p = 1.
    pub const STANDARD: Self = Self {
        log_n: 15,
        r: 8,
        p: 1,
    };

    /// The CPU/memory cost `N`.
    pub fn n(&self) -> u64 {
        1u64.checked_shl(u32::from(self.log_n)).unwrap_or(u64::MAX)
    }

    /// Bytes of the scrypt working array, `128 * r * N`.
    pub fn memory_cost(&self) -> u64 {
        128u64
            .saturating_mul(u64::from(self.r))
            .saturating_mul(self.n())
    }

    fn to_scrypt(self) -> Result<scrypt::Params, KeyEncryptionError> {
        if self.log_n == 0 || self.log_n > MAX_LOG_N {
            return Err(KeyEncryptionError::InvalidKdfParams(format!(
                "log2(N) must be between 1 and {}, got {}",
                MAX_LOG_N, self.log_n
            )));
        }
        if self.r == 0 || self.r > MAX_R {
            return Err(KeyEncryptionError::InvalidKdfParams(format!(
                "r must be between 1 and {}, got {}",
                MAX_R, self.r
            )));
        }
        if self.p == 0 || self.p > MAX_P {
            return Err(KeyEncryptionError::InvalidKdfParams(format!(
                "p must be between 1 and {}, got {}",
                MAX_P, self.p
            )));
        }
        if self.memory_cost() > MAX_MEMORY {
            return Err(KeyEncryptionError::InvalidKdfParams(format!(
                "scrypt memory of {} bytes exceeds the maximum of {}",
                self.memory_cost(),
                MAX_MEMORY
            )));
        }
        scrypt::Params::new(self.log_n, self.r, self.p, KEY_SIZE)
            .map_err(|e| KeyEncryptionError::InvalidKdfParams(e.to_string()))
    }
}

impl Default for ScryptParams {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl ScryptParams {
    fn from_envelope(params: &KdfParams) -> Result<Self, KeyEncryptionError> {
        if params.n < 2 || !params.n.is_power_of_two() {
            return Err(KeyEncryptionError::InvalidKdfParams(format!(
                "N must be a power of two greater than 1, got {}",
                params.n
            )));
        }
        let log_n = params.n.trailing_zeros();
        if log_n > u32::from(MAX_LOG_N) {
            return Err(KeyEncryptionError::InvalidKdfParams(format!(
                "N = {} exceeds the maximum of 2^{}",
                params.n, MAX_LOG_N
            )));
        }
        Ok(Self {
            log_n: log_n as u8,
            r: params.r,
            p: params.p,
        })
    }
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    kdf: Kdf,
    cipher: Cipher,
    #[serde(with = "base64_bytes")]
    ciphertext: Vec<u8>,
}

#[derive(Serialize, Deserialize)]
struct Kdf {
    name: String,
    params: KdfParams,
    #[serde(with = "base64_bytes")]
    salt: Vec<u8>,
}

#[derive(Serialize, Deserialize)]
struct KdfParams {
    #[serde(rename = "N")]
    n: u64,
    r: u32,
    p: u32,
}

impl From<ScryptParams> for KdfParams {
    fn from(params: ScryptParams) -> Self {
        Self {
            n: params.n(),
            r: params.r,
            p: params.p,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Cipher {
    name: String,
    #[serde(with = "base64_bytes")]
    nonce: Vec<u8>,
}

mod base64_bytes {
    use super::BASE64;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

fn derive_key(
    passphrase: &[u8],
    salt: &[u8],
    params: ScryptParams,
) -> Result<Zeroizing<[u8; KEY_SIZE]>, KeyEncryptionError> {
    let params = params.to_scrypt()?;
    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    scrypt::scrypt(passphrase, salt, &params, &mut key[..])
        .map_err(|e| KeyEncryptionError::InvalidKdfParams(e.to_string()))?;
    Ok(key)
}

/// Encrypts `plaintext` under `passphrase` with [`ScryptParams::STANDARD`].
///
/// # Returns
///
/// The serialized JSON envelope.
pub fn encrypt(plaintext: &[u8], passphrase: &[u8]) -> Result<Vec<u8>, KeyEncryptionError> {
    encrypt_with_params(plaintext, passphrase, ScryptParams::STANDARD)
}

/// Encrypts `plaintext` under `passphrase` with explicit scrypt parameters.
///
/// A fresh salt and nonce are drawn from the OS random source on every call.
pub fn encrypt_with_params(
    plaintext: &[u8],
    passphrase: &[u8],
    params: ScryptParams,
) -> Result<Vec<u8>, KeyEncryptionError> {
    let mut salt = [0u8; SALT_SIZE];
    let mut nonce = [0u8; NONCE_SIZE];
    OsRng
        .try_fill_bytes(&mut salt)
        .and_then(|_| OsRng.try_fill_bytes(&mut nonce))
        .map_err(|e| KeyEncryptionError::EncryptionFailed(e.to_string()))?;

    let key = derive_key(passphrase, &salt, params)?;
    let cipher = XSalsa20Poly1305::new_from_slice(&key[..])
        .map_err(|e| KeyEncryptionError::EncryptionFailed(e.to_string()))?;

    let ciphertext = cipher
        .encrypt(GenericArray::from_slice(&nonce), plaintext)
        .map_err(|e| KeyEncryptionError::EncryptionFailed(e.to_string()))?;

    let envelope = Envelope {
        kdf: Kdf {
            name: KDF_NAME.to_string(),
            params: params.into(),
            salt: salt.to_vec(),
        },
        cipher: Cipher {
            name: CIPHER_NAME.to_string(),
            nonce: nonce.to_vec(),
        },
        ciphertext,
    };

    serde_json::to_vec(&envelope).map_err(|e| KeyEncryptionError::EncryptionFailed(e.to_string()))
}

/// Decrypts a JSON envelope produced by [`encrypt`] or [`encrypt_with_params`].
///
/// # Errors
///
/// Returns [`KeyEncryptionError::DecryptionFailed`] for a wrong passphrase or
/// tampered ciphertext, and a more specific variant when the envelope itself
/// is malformed or names an algorithm this module does not implement.
pub fn decrypt(data: &[u8], passphrase: &[u8]) -> Result<Zeroizing<Vec<u8>>, KeyEncryptionError> {
    let envelope: Envelope = serde_json::from_slice(data)
        .map_err(|e| KeyEncryptionError::InvalidEncryptedData(e.to_string()))?;

    if envelope.kdf.name != KDF_NAME {
        return Err(KeyEncryptionError::UnsupportedKdf(envelope.kdf.name));
    }
    if envelope.cipher.name != CIPHER_NAME {
        return Err(KeyEncryptionError::UnsupportedCipher(envelope.cipher.name));
    }
    if envelope.cipher.nonce.len() != NONCE_SIZE {
        return Err(KeyEncryptionError::InvalidEncryptedData(format!(
            "nonce must be {} bytes, got {}",
            NONCE_SIZE,
            envelope.cipher.nonce.len()
        )));
    }
    if envelope.ciphertext.len() < TAG_SIZE {
        return Err(KeyEncryptionError::InvalidEncryptedData(
            "ciphertext shorter than authentication tag".to_string(),
        ));
    }

    let params = ScryptParams::from_envelope(&envelope.kdf.params)?;
    let key = derive_key(passphrase, &envelope.kdf.salt, params)?;
    let cipher = XSalsa20Poly1305::new_from_slice(&key[..])
        .map_err(|_| KeyEncryptionError::DecryptionFailed)?;

    cipher
        .decrypt(
            GenericArray::from_slice(&envelope.cipher.nonce),
            envelope.ciphertext.as_slice(),
        )
        .map(Zeroizing::new)
        .map_err(|_| KeyEncryptionError::DecryptionFailed)
}
