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

//! Loading encrypted private keys into signer/verifiers.
//!
//! A load moves through the stages of [`LoadStage`] in order. Failure at any
//! stage ends the call; the stage reached is recorded in the
//! `key.load_failed` audit event.

use std::fmt;

use super::{KeyAlgorithm, PrivateKey, PRIVATE_KEY_PEM_TYPE};
use crate::audit;
use crate::crypto::{
    self, signer_verifier_for, EcdsaSignerVerifier, RsaPkcs1v15SignerVerifier, SignerVerifier,
    SIGNING_DIGEST,
};
use crate::error::KeyError;

/// Progress of a private key load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadStage {
    /// Nothing has been checked yet.
    RawBytes,
    /// A PEM block with the encrypted private key tag was found.
    FramingValidated,
    /// The envelope was decrypted with the passphrase.
    Decrypted,
    /// The plaintext was decoded as a PKCS#8 private key.
    Parsed,
    /// The key's algorithm matched what the caller asked for.
    AlgorithmResolved,
    /// A signer/verifier has been constructed.
    SignerReady,
}

impl fmt::Display for LoadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RawBytes => "raw_bytes",
            Self::FramingValidated => "framing_validated",
            Self::Decrypted => "decrypted",
            Self::Parsed => "parsed",
            Self::AlgorithmResolved => "algorithm_resolved",
            Self::SignerReady => "signer_ready",
        };
        f.write_str(name)
    }
}

/// Tracks the stage of one load and audits its outcome.
struct Load {
    stage: LoadStage,
}

impl Load {
    fn new() -> Self {
        Self {
            stage: LoadStage::RawBytes,
        }
    }

    fn fail(&self, err: KeyError) -> KeyError {
        audit::log_key_load_failed(self.stage, &err.to_string());
        err
    }

    /// Runs the framing, decryption and parsing stages.
    fn decode(&mut self, key: &[u8], pass: &[u8]) -> Result<PrivateKey, KeyError> {
        let block = pem::parse(key).map_err(|e| self.fail(KeyError::InvalidPem(e.to_string())))?;
        if block.tag() != PRIVATE_KEY_PEM_TYPE {
            return Err(self.fail(KeyError::UnsupportedPemType {
                found: block.tag().to_string(),
            }));
        }
        self.stage = LoadStage::FramingValidated;

        let der = crypto::decrypt(block.contents(), pass)
            .map_err(|e| self.fail(KeyError::Decryption(e)))?;
        self.stage = LoadStage::Decrypted;

        let private_key = PrivateKey::from_pkcs8_der(&der).map_err(|e| self.fail(e))?;
        self.stage = LoadStage::Parsed;

        Ok(private_key)
    }

    fn mismatch(&self, expected: KeyAlgorithm, found: KeyAlgorithm) -> KeyError {
        self.fail(KeyError::AlgorithmMismatch { expected, found })
    }

    fn ready<S: SignerVerifier + ?Sized>(mut self, signer: &S) {
        self.stage = LoadStage::SignerReady;
        tracing::trace!(stage = %self.stage, "signer constructed");
        audit::log_key_loaded(&signer.public_key());
    }
}

/// Decrypts an `ENCRYPTED COSIGN PRIVATE KEY` PEM and returns a signer/verifier
/// for whichever algorithm it holds, bound to [`SIGNING_DIGEST`].
///
/// # Errors
///
/// - [`KeyError::InvalidPem`] if no PEM block can be decoded
/// - [`KeyError::UnsupportedPemType`] if the block has any other tag
/// - [`KeyError::Decryption`] for a wrong passphrase or tampered data
/// - [`KeyError::Parse`] if the plaintext is not a PKCS#8 private key
/// - [`KeyError::UnsupportedAlgorithm`] for keys that are neither RSA nor
///   ECDSA over P-256, P-384 or P-521
pub fn load_private_key(key: &[u8], pass: &[u8]) -> Result<Box<dyn SignerVerifier>, KeyError> {
    let mut load = Load::new();
    let private_key = load.decode(key, pass)?;
    load.stage = LoadStage::AlgorithmResolved;

    let signer = signer_verifier_for(private_key, SIGNING_DIGEST);
    load.ready(signer.as_ref());
    Ok(signer)
}

/// Like [`load_private_key`], but the key must be ECDSA.
///
/// An RSA key fails with [`KeyError::AlgorithmMismatch`].
pub fn load_ecdsa_private_key(key: &[u8], pass: &[u8]) -> Result<EcdsaSignerVerifier, KeyError> {
    let mut load = Load::new();
    let secret = match load.decode(key, pass)? {
        PrivateKey::Ecdsa(secret) => secret,
        other => return Err(load.mismatch(KeyAlgorithm::Ecdsa, other.algorithm())),
    };
    load.stage = LoadStage::AlgorithmResolved;

    let signer = EcdsaSignerVerifier::new(&secret, SIGNING_DIGEST);
    load.ready(&signer);
    Ok(signer)
}

/// Like [`load_private_key`], but the key must be RSA.
///
/// An ECDSA key fails with [`KeyError::AlgorithmMismatch`].
pub fn load_rsa_private_key(
    key: &[u8],
    pass: &[u8],
) -> Result<RsaPkcs1v15SignerVerifier, KeyError> {
    let mut load = Load::new();
    let private_key = match load.decode(key, pass)? {
        PrivateKey::Rsa(private_key) => private_key,
        other => return Err(load.mismatch(KeyAlgorithm::Rsa, other.algorithm())),
    };
    load.stage = LoadStage::AlgorithmResolved;

    let signer = RsaPkcs1v15SignerVerifier::new(private_key, SIGNING_DIGEST);
    load.ready(&signer);
    Ok(signer)
}
