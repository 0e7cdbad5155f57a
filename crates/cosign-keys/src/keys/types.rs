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

//! Private and public key types.
//!
//! Both are closed sum types over the supported algorithms. The PKCS#8 and
//! SubjectPublicKeyInfo decoders resolve the algorithm from the encoded
//! algorithm identifier, so every caller further down matches exhaustively
//! instead of probing concrete key types.

use const_oid::db::rfc5912::{
    ID_EC_PUBLIC_KEY, RSA_ENCRYPTION, SECP_256_R_1, SECP_384_R_1, SECP_521_R_1,
};
use const_oid::ObjectIdentifier;
use ecdsa::signature::hazmat::PrehashVerifier;
use p521::NistP521;
use pkcs8::spki::{AlgorithmIdentifierRef, SubjectPublicKeyInfoRef};
use pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use pkcs8::{PrivateKeyInfo, SecretDocument};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::crypto::{DigestAlgorithm, SigningError};
use crate::error::KeyError;

/// Signature algorithm family of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    /// ECDSA over one of the NIST curves in [`EcdsaCurve`].
    Ecdsa,
    /// RSA with PKCS#1 v1.5 signatures.
    Rsa,
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ecdsa => f.write_str("ecdsa"),
            Self::Rsa => f.write_str("rsa"),
        }
    }
}

/// NIST curves accepted for ECDSA keys.
///
/// Generation always uses P-256; the others are accepted on import and load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcdsaCurve {
    P256,
    P384,
    P521,
}

impl EcdsaCurve {
    pub fn name(&self) -> &'static str {
        match self {
            Self::P256 => "P-256",
            Self::P384 => "P-384",
            Self::P521 => "P-521",
        }
    }

    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            Self::P256 => SECP_256_R_1,
            Self::P384 => SECP_384_R_1,
            Self::P521 => SECP_521_R_1,
        }
    }

    /// Size of a serialized field element in bytes.
    pub fn field_size(&self) -> usize {
        match self {
            Self::P256 => 32,
            Self::P384 => 48,
            Self::P521 => 66,
        }
    }

    fn from_oid(curve: ObjectIdentifier) -> Result<Self, KeyError> {
        [Self::P256, Self::P384, Self::P521]
            .into_iter()
            .find(|c| c.oid() == curve)
            .ok_or_else(|| KeyError::UnsupportedAlgorithm(format!("EC curve OID {curve}")))
    }

    /// Left-pads a digest shorter than the field to the field size.
    ///
    /// The prehash signers reject digests under half the field size, which a
    /// SHA-256 digest is on P-521. Leading zeros leave the integer value
    /// unchanged, so the signature is the same one a signer reducing the
    /// unpadded digest would produce.
    pub(crate) fn prehash(&self, hashed: &[u8]) -> Vec<u8> {
        let size = self.field_size();
        if hashed.len() >= size {
            return hashed.to_vec();
        }
        let mut padded = vec![0u8; size - hashed.len()];
        padded.extend_from_slice(hashed);
        padded
    }
}

impl fmt::Display for EcdsaCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Algorithm named by an encoded algorithm identifier, with the curve for EC keys.
enum ResolvedAlgorithm {
    Ecdsa(EcdsaCurve),
    Rsa,
}

fn resolve_algorithm(algorithm: &AlgorithmIdentifierRef<'_>) -> Result<ResolvedAlgorithm, KeyError> {
    let oid = algorithm.oid;

    if oid == RSA_ENCRYPTION {
        return Ok(ResolvedAlgorithm::Rsa);
    }

    if oid == ID_EC_PUBLIC_KEY {
        let curve = algorithm
            .parameters_oid()
            .map_err(|e| KeyError::Parse(format!("EC key is missing curve parameters: {e}")))?;
        return EcdsaCurve::from_oid(curve).map(ResolvedAlgorithm::Ecdsa);
    }

    Err(KeyError::UnsupportedAlgorithm(format!("algorithm OID {oid}")))
}

/// An ECDSA private key on one of the supported curves.
#[derive(Clone)]
pub enum EcdsaPrivateKey {
    P256(p256::SecretKey),
    P384(p384::SecretKey),
    P521(p521::SecretKey),
}

impl EcdsaPrivateKey {
    pub fn curve(&self) -> EcdsaCurve {
        match self {
            Self::P256(_) => EcdsaCurve::P256,
            Self::P384(_) => EcdsaCurve::P384,
            Self::P521(_) => EcdsaCurve::P521,
        }
    }

    pub fn public_key(&self) -> EcdsaPublicKey {
        match self {
            Self::P256(key) => EcdsaPublicKey::P256(key.public_key()),
            Self::P384(key) => EcdsaPublicKey::P384(key.public_key()),
            Self::P521(key) => EcdsaPublicKey::P521(key.public_key()),
        }
    }

    fn to_pkcs8_der(&self) -> pkcs8::Result<SecretDocument> {
        match self {
            Self::P256(key) => key.to_pkcs8_der(),
            Self::P384(key) => key.to_pkcs8_der(),
            Self::P521(key) => key.to_pkcs8_der(),
        }
    }

    fn from_pkcs8_der(curve: EcdsaCurve, der: &[u8]) -> Result<Self, KeyError> {
        let decoded = match curve {
            EcdsaCurve::P256 => p256::SecretKey::from_pkcs8_der(der).map(Self::P256),
            EcdsaCurve::P384 => p384::SecretKey::from_pkcs8_der(der).map(Self::P384),
            EcdsaCurve::P521 => p521::SecretKey::from_pkcs8_der(der).map(Self::P521),
        };
        decoded.map_err(|e| KeyError::Parse(format!("PKCS#8 EC private key: {e}")))
    }

    fn from_sec1_der(curve: EcdsaCurve, der: &[u8]) -> Result<Self, KeyError> {
        let decoded = match curve {
            EcdsaCurve::P256 => p256::SecretKey::from_sec1_der(der).map(Self::P256),
            EcdsaCurve::P384 => p384::SecretKey::from_sec1_der(der).map(Self::P384),
            EcdsaCurve::P521 => p521::SecretKey::from_sec1_der(der).map(Self::P521),
        };
        decoded.map_err(|e| KeyError::Parse(format!("SEC1 EC private key: {e}")))
    }
}

impl fmt::Debug for EcdsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdsaPrivateKey")
            .field("curve", &self.curve())
            .finish_non_exhaustive()
    }
}

/// An ECDSA public key on one of the supported curves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EcdsaPublicKey {
    P256(p256::PublicKey),
    P384(p384::PublicKey),
    P521(p521::PublicKey),
}

impl EcdsaPublicKey {
    pub fn curve(&self) -> EcdsaCurve {
        match self {
            Self::P256(_) => EcdsaCurve::P256,
            Self::P384(_) => EcdsaCurve::P384,
            Self::P521(_) => EcdsaCurve::P521,
        }
    }

    fn to_public_key_der(&self) -> pkcs8::spki::Result<pkcs8::Document> {
        match self {
            Self::P256(key) => key.to_public_key_der(),
            Self::P384(key) => key.to_public_key_der(),
            Self::P521(key) => key.to_public_key_der(),
        }
    }

    fn from_public_key_der(curve: EcdsaCurve, der: &[u8]) -> Result<Self, KeyError> {
        let decoded = match curve {
            EcdsaCurve::P256 => p256::PublicKey::from_public_key_der(der).map(Self::P256),
            EcdsaCurve::P384 => p384::PublicKey::from_public_key_der(der).map(Self::P384),
            EcdsaCurve::P521 => p521::PublicKey::from_public_key_der(der).map(Self::P521),
        };
        decoded.map_err(|e| KeyError::InvalidPublicKey(e.to_string()))
    }

    /// Verifies a DER signature over an already hashed message.
    fn verify_prehash(&self, hashed: &[u8], signature: &[u8]) -> Result<(), SigningError> {
        let prehash = self.curve().prehash(hashed);
        let malformed = |e: ecdsa::Error| SigningError::MalformedSignature(e.to_string());

        let verified = match self {
            Self::P256(key) => {
                let signature = p256::ecdsa::Signature::from_der(signature).map_err(malformed)?;
                p256::ecdsa::VerifyingKey::from(key).verify_prehash(&prehash, &signature)
            }
            Self::P384(key) => {
                let signature = p384::ecdsa::Signature::from_der(signature).map_err(malformed)?;
                p384::ecdsa::VerifyingKey::from(key).verify_prehash(&prehash, &signature)
            }
            Self::P521(key) => {
                let signature =
                    ecdsa::Signature::<NistP521>::from_der(signature).map_err(malformed)?;
                ecdsa::VerifyingKey::<NistP521>::from(key).verify_prehash(&prehash, &signature)
            }
        };
        verified.map_err(|_| SigningError::VerificationFailed)
    }
}

/// An asymmetric private key.
#[derive(Clone)]
pub enum PrivateKey {
    Ecdsa(EcdsaPrivateKey),
    Rsa(RsaPrivateKey),
}

impl PrivateKey {
    /// The algorithm this key signs with.
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::Ecdsa(_) => KeyAlgorithm::Ecdsa,
            Self::Rsa(_) => KeyAlgorithm::Rsa,
        }
    }

    /// The curve of an ECDSA key, `None` for RSA.
    pub fn curve(&self) -> Option<EcdsaCurve> {
        match self {
            Self::Ecdsa(key) => Some(key.curve()),
            Self::Rsa(_) => None,
        }
    }

    /// Derives the matching public key.
    pub fn public_key(&self) -> PublicKey {
        match self {
            Self::Ecdsa(key) => PublicKey::Ecdsa(key.public_key()),
            Self::Rsa(key) => PublicKey::Rsa(key.to_public_key()),
        }
    }

    /// Encodes the key as PKCS#8 DER.
    ///
    /// The returned document is zeroized when dropped.
    pub fn to_pkcs8_der(&self) -> Result<SecretDocument, KeyError> {
        let document = match self {
            Self::Ecdsa(key) => key.to_pkcs8_der(),
            Self::Rsa(key) => key.to_pkcs8_der(),
        };
        document.map_err(|e| KeyError::Serialization(format!("PKCS#8 private key: {e}")))
    }

    /// Decodes a PKCS#8 DER private key of any supported algorithm.
    ///
    /// # Errors
    ///
    /// - [`KeyError::Parse`] if the DER is malformed
    /// - [`KeyError::UnsupportedAlgorithm`] if it is a well-formed key of an
    ///   algorithm or curve this crate cannot sign with
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self, KeyError> {
        let info = PrivateKeyInfo::try_from(der)
            .map_err(|e| KeyError::Parse(format!("PKCS#8 private key: {e}")))?;

        match resolve_algorithm(&info.algorithm)? {
            ResolvedAlgorithm::Ecdsa(curve) => {
                EcdsaPrivateKey::from_pkcs8_der(curve, der).map(Self::Ecdsa)
            }
            ResolvedAlgorithm::Rsa => RsaPrivateKey::from_pkcs8_der(der)
                .map(Self::Rsa)
                .map_err(|e| KeyError::Parse(format!("PKCS#8 RSA private key: {e}"))),
        }
    }

    /// Decodes a PKCS#1 DER RSA private key.
    pub fn from_pkcs1_der(der: &[u8]) -> Result<Self, KeyError> {
        RsaPrivateKey::from_pkcs1_der(der)
            .map(Self::Rsa)
            .map_err(|e| KeyError::Parse(format!("PKCS#1 RSA private key: {e}")))
    }

    /// Decodes a SEC1 DER EC private key.
    ///
    /// The curve is taken from the key's named-curve parameters, which must be
    /// present. Curves other than P-256, P-384 and P-521 are rejected with
    /// [`KeyError::UnsupportedAlgorithm`].
    pub fn from_sec1_der(der: &[u8]) -> Result<Self, KeyError> {
        let parsed = sec1::EcPrivateKey::try_from(der)
            .map_err(|e| KeyError::Parse(format!("SEC1 EC private key: {e}")))?;

        let curve = parsed
            .parameters
            .and_then(|p| p.named_curve())
            .ok_or_else(|| KeyError::Parse("SEC1 EC private key has no named curve".into()))?;

        EcdsaPrivateKey::from_sec1_der(EcdsaCurve::from_oid(curve)?, der).map(Self::Ecdsa)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("algorithm", &self.algorithm())
            .field("curve", &self.curve())
            .finish_non_exhaustive()
    }
}

impl From<EcdsaPrivateKey> for PrivateKey {
    fn from(key: EcdsaPrivateKey) -> Self {
        Self::Ecdsa(key)
    }
}

impl From<p256::SecretKey> for PrivateKey {
    fn from(key: p256::SecretKey) -> Self {
        Self::Ecdsa(EcdsaPrivateKey::P256(key))
    }
}

impl From<p384::SecretKey> for PrivateKey {
    fn from(key: p384::SecretKey) -> Self {
        Self::Ecdsa(EcdsaPrivateKey::P384(key))
    }
}

impl From<p521::SecretKey> for PrivateKey {
    fn from(key: p521::SecretKey) -> Self {
        Self::Ecdsa(EcdsaPrivateKey::P521(key))
    }
}

impl From<RsaPrivateKey> for PrivateKey {
    fn from(key: RsaPrivateKey) -> Self {
        Self::Rsa(key)
    }
}

/// An asymmetric public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    Ecdsa(EcdsaPublicKey),
    Rsa(RsaPublicKey),
}

impl PublicKey {
    /// The algorithm this key verifies.
    pub fn algorithm(&self) -> KeyAlgorithm {
        match self {
            Self::Ecdsa(_) => KeyAlgorithm::Ecdsa,
            Self::Rsa(_) => KeyAlgorithm::Rsa,
        }
    }

    /// The curve of an ECDSA key, `None` for RSA.
    pub fn curve(&self) -> Option<EcdsaCurve> {
        match self {
            Self::Ecdsa(key) => Some(key.curve()),
            Self::Rsa(_) => None,
        }
    }

    /// Encodes the key as SubjectPublicKeyInfo DER.
    pub fn to_public_key_der(&self) -> Result<Vec<u8>, KeyError> {
        let document = match self {
            Self::Ecdsa(key) => key.to_public_key_der(),
            Self::Rsa(key) => key.to_public_key_der(),
        };
        document
            .map(|doc| doc.as_bytes().to_vec())
            .map_err(|e| KeyError::Serialization(format!("public key: {e}")))
    }

    /// Decodes a SubjectPublicKeyInfo DER public key of any supported algorithm.
    pub fn from_public_key_der(der: &[u8]) -> Result<Self, KeyError> {
        let info = SubjectPublicKeyInfoRef::try_from(der)
            .map_err(|e| KeyError::InvalidPublicKey(e.to_string()))?;

        match resolve_algorithm(&info.algorithm)? {
            ResolvedAlgorithm::Ecdsa(curve) => {
                EcdsaPublicKey::from_public_key_der(curve, der).map(Self::Ecdsa)
            }
            ResolvedAlgorithm::Rsa => RsaPublicKey::from_public_key_der(der)
                .map(Self::Rsa)
                .map_err(|e| KeyError::InvalidPublicKey(e.to_string())),
        }
    }

    /// Computes the SHA256 hex fingerprint of the SubjectPublicKeyInfo DER.
    pub fn fingerprint(&self) -> Result<String, KeyError> {
        let der = self.to_public_key_der()?;
        Ok(hex::encode(Sha256::digest(&der)))
    }

    /// Modulus size for RSA keys, `None` for EC keys.
    pub fn rsa_bits(&self) -> Option<usize> {
        match self {
            Self::Ecdsa(_) => None,
            Self::Rsa(key) => Some(key.size() * 8),
        }
    }

    /// Verifies `signature` over `message` using digest-then-verify.
    ///
    /// ECDSA signatures are expected in ASN.1 DER form; RSA signatures are
    /// PKCS#1 v1.5.
    pub fn verify(
        &self,
        digest: DigestAlgorithm,
        message: &[u8],
        signature: &[u8],
    ) -> Result<(), SigningError> {
        let hashed = digest.digest(message);
        match self {
            Self::Ecdsa(key) => key.verify_prehash(&hashed, signature),
            Self::Rsa(key) => key
                .verify(digest.pkcs1v15(), &hashed, signature)
                .map_err(|_| SigningError::VerificationFailed),
        }
    }
}

/// A private key together with the public key derived from it.
///
/// Only constructible from the private half, so the two always correspond.
#[derive(Debug, Clone)]
pub struct KeyPair {
    private: PrivateKey,
    public: PublicKey,
}

impl KeyPair {
    pub fn new(private: PrivateKey) -> Self {
        let public = private.public_key();
        Self { private, public }
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    pub fn algorithm(&self) -> KeyAlgorithm {
        self.private.algorithm()
    }
}

impl From<PrivateKey> for KeyPair {
    fn from(private: PrivateKey) -> Self {
        Self::new(private)
    }
}
