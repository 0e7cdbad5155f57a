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

//! Cryptographic primitives for cosign key pairs.
//!
//! This module provides:
//! - scrypt + NaCl secretbox encryption for private keys at rest
//! - Digest selection for digest-then-sign
//! - ECDSA and RSA signer/verifiers

mod digest;
mod encrypted;
mod signer;

pub use digest::{DigestAlgorithm, SIGNING_DIGEST};
pub use encrypted::{
    decrypt, encrypt, encrypt_with_params, KeyEncryptionError, ScryptParams, CIPHER_NAME,
    KDF_NAME, MAX_LOG_N, MAX_MEMORY, MAX_P, MAX_R, NONCE_SIZE, SALT_SIZE,
};
pub use signer::{
    signer_verifier_for, EcdsaSignerVerifier, RsaPkcs1v15SignerVerifier, SignerVerifier,
    SigningError,
};
