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

//! Error type for the key-pair lifecycle.

use crate::crypto::KeyEncryptionError;
use crate::keys::{KeyAlgorithm, PassphraseError};
use thiserror::Error;

/// Errors that can occur while generating, encoding, importing or loading keys.
#[derive(Debug, Error)]
pub enum KeyError {
    /// No PEM block could be decoded from the input.
    #[error("Invalid PEM block: {0}")]
    InvalidPem(String),

    /// A PEM block was found but its type tag is not accepted here.
    #[error("Unsupported PEM type: {found}")]
    UnsupportedPemType { found: String },

    /// The key material under a recognised tag is malformed.
    #[error("Failed to parse private key: {0}")]
    Parse(String),

    #[error("Failed to encode key: {0}")]
    Serialization(String),

    #[error("Failed to encrypt private key: {0}")]
    Encryption(#[source] KeyEncryptionError),

    /// Covers both a wrong passphrase and corrupted or tampered data.
    #[error("Failed to decrypt private key")]
    Decryption(#[source] KeyEncryptionError),

    /// The key parsed, but it is of an algorithm or curve that cannot sign here.
    #[error("Unsupported key algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Expected {expected} private key, found {found}")]
    AlgorithmMismatch {
        expected: KeyAlgorithm,
        found: KeyAlgorithm,
    },

    #[error("Failed to generate key: {0}")]
    Generation(String),

    /// Error returned unchanged from the passphrase callback.
    #[error("Failed to read passphrase: {0}")]
    Passphrase(#[source] PassphraseError),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
