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

//! Signer/verifier capabilities over loaded private keys.
//!
//! Provides:
//! - ECDSA signing over P-256, P-384 and P-521 with ASN.1 DER signatures
//! - RSA PKCS#1 v1.5 signing
//! - Digest-then-verify against the derived public key

use ecdsa::signature::hazmat::PrehashSigner;
use p521::NistP521;
use rand::rngs::OsRng;
use rsa::RsaPrivateKey;
use std::fmt;
use thiserror::Error;

use super::DigestAlgorithm;
use crate::keys::{EcdsaCurve, EcdsaPrivateKey, KeyAlgorithm, PrivateKey, PublicKey};

/// Errors that can occur during signing or verification.
#[derive(Debug, Error)]
pub enum SigningError {
    #[error("Failed to create signature: {0}")]
    SignatureFailed(String),

    #[error("Malformed signature: {0}")]
    MalformedSignature(String),

    #[error("Signature verification failed")]
    VerificationFailed,
}

/// A private key bound to a digest algorithm, able to sign messages and to
/// verify signatures against its own public key.
pub trait SignerVerifier: Send + Sync {
    /// Hashes `message` with the bound digest and signs the result.
    fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, SigningError>;

    /// Checks `signature` over `message` against this signer's public key.
    fn verify_signature(&self, signature: &[u8], message: &[u8]) -> Result<(), SigningError>;

    fn public_key(&self) -> PublicKey;

    fn digest_algorithm(&self) -> DigestAlgorithm;

    fn algorithm(&self) -> KeyAlgorithm {
        self.public_key().algorithm()
    }
}

enum EcdsaSigningKey {
    P256(p256::ecdsa::SigningKey),
    P384(p384::ecdsa::SigningKey),
    P521(p521::ecdsa::SigningKey),
}

impl EcdsaSigningKey {
    fn new(secret: &EcdsaPrivateKey) -> Self {
        match secret {
            EcdsaPrivateKey::P256(key) => Self::P256(key.into()),
            EcdsaPrivateKey::P384(key) => Self::P384(key.into()),
            EcdsaPrivateKey::P521(key) => Self::P521(ecdsa::SigningKey::<NistP521>::from(key).into()),
        }
    }

    fn curve(&self) -> EcdsaCurve {
        match self {
            Self::P256(_) => EcdsaCurve::P256,
            Self::P384(_) => EcdsaCurve::P384,
            Self::P521(_) => EcdsaCurve::P521,
        }
    }

    /// Signs a hashed message, returning the DER signature.
    fn sign_prehash_der(&self, hashed: &[u8]) -> Result<Vec<u8>, ecdsa::Error> {
        let prehash = self.curve().prehash(hashed);
        let der = match self {
            Self::P256(key) => {
                let signature: p256::ecdsa::Signature = key.sign_prehash(&prehash)?;
                signature.to_der().as_bytes().to_vec()
            }
            Self::P384(key) => {
                let signature: p384::ecdsa::Signature = key.sign_prehash(&prehash)?;
                signature.to_der().as_bytes().to_vec()
            }
            Self::P521(key) => {
                let signature: ecdsa::Signature<NistP521> = key.sign_prehash(&prehash)?;
                signature.to_der().as_bytes().to_vec()
            }
        };
        Ok(der)
    }
}

/// ECDSA signer/verifier over any of the supported curves.
pub struct EcdsaSignerVerifier {
    signing_key: EcdsaSigningKey,
    public_key: PublicKey,
    digest: DigestAlgorithm,
}

impl EcdsaSignerVerifier {
    pub fn new(secret: &EcdsaPrivateKey, digest: DigestAlgorithm) -> Self {
        Self {
            signing_key: EcdsaSigningKey::new(secret),
            public_key: PublicKey::Ecdsa(secret.public_key()),
            digest,
        }
    }

    pub fn curve(&self) -> EcdsaCurve {
        self.signing_key.curve()
    }
}

impl SignerVerifier for EcdsaSignerVerifier {
    fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, SigningError> {
        let hashed = self.digest.digest(message);
        self.signing_key
            .sign_prehash_der(&hashed)
            .map_err(|e| SigningError::SignatureFailed(e.to_string()))
    }

    fn verify_signature(&self, signature: &[u8], message: &[u8]) -> Result<(), SigningError> {
        self.public_key.verify(self.digest, message, signature)
    }

    fn public_key(&self) -> PublicKey {
        self.public_key.clone()
    }

    fn digest_algorithm(&self) -> DigestAlgorithm {
        self.digest
    }
}

impl fmt::Debug for EcdsaSignerVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaSignerVerifier")
            .field("curve", &self.curve())
            .field("digest", &self.digest)
            .finish_non_exhaustive()
    }
}

/// RSA PKCS#1 v1.5 signer/verifier.
pub struct RsaPkcs1v15SignerVerifier {
    private_key: RsaPrivateKey,
    public_key: PublicKey,
    digest: DigestAlgorithm,
}

impl RsaPkcs1v15SignerVerifier {
    pub fn new(private_key: RsaPrivateKey, digest: DigestAlgorithm) -> Self {
        let public_key = PublicKey::Rsa(private_key.to_public_key());
        Self {
            private_key,
            public_key,
            digest,
        }
    }
}

impl SignerVerifier for RsaPkcs1v15SignerVerifier {
    fn sign_message(&self, message: &[u8]) -> Result<Vec<u8>, SigningError> {
        let hashed = self.digest.digest(message);
        self.private_key
            .sign_with_rng(&mut OsRng, self.digest.pkcs1v15(), &hashed)
            .map_err(|e| SigningError::SignatureFailed(e.to_string()))
    }

    fn verify_signature(&self, signature: &[u8], message: &[u8]) -> Result<(), SigningError> {
        self.public_key.verify(self.digest, message, signature)
    }

    fn public_key(&self) -> PublicKey {
        self.public_key.clone()
    }

    fn digest_algorithm(&self) -> DigestAlgorithm {
        self.digest
    }
}

impl fmt::Debug for RsaPkcs1v15SignerVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPkcs1v15SignerVerifier")
            .field("digest", &self.digest)
            .field("bits", &self.public_key.rsa_bits())
            .finish_non_exhaustive()
    }
}

/// Wraps a private key in the signer/verifier for its algorithm.
pub fn signer_verifier_for(key: PrivateKey, digest: DigestAlgorithm) -> Box<dyn SignerVerifier> {
    match key {
        PrivateKey::Ecdsa(secret) => Box::new(EcdsaSignerVerifier::new(&secret, digest)),
        PrivateKey::Rsa(private_key) => {
            Box::new(RsaPkcs1v15SignerVerifier::new(private_key, digest))
        }
    }
}
