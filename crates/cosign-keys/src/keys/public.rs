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

//! `PUBLIC KEY` PEM encoding and decoding.

use super::{encode_pem, EcdsaPublicKey, KeyAlgorithm, PublicKey, PUBLIC_KEY_PEM_TYPE};
use crate::error::KeyError;

/// Encodes `public_key` as a SubjectPublicKeyInfo `PUBLIC KEY` PEM.
pub fn marshal_public_key_to_pem(public_key: &PublicKey) -> Result<Vec<u8>, KeyError> {
    let der = public_key.to_public_key_der()?;
    Ok(encode_pem(PUBLIC_KEY_PEM_TYPE, der))
}

/// Decodes a `PUBLIC KEY` PEM of any supported algorithm.
///
/// # Errors
///
/// - [`KeyError::InvalidPem`] if no PEM block can be decoded
/// - [`KeyError::UnsupportedPemType`] if the block is not a `PUBLIC KEY`
/// - [`KeyError::InvalidPublicKey`] if the SubjectPublicKeyInfo is malformed
/// - [`KeyError::UnsupportedAlgorithm`] for other key algorithms or curves
pub fn unmarshal_pem_to_public_key(pem_bytes: &[u8]) -> Result<PublicKey, KeyError> {
    let block = pem::parse(pem_bytes).map_err(|e| KeyError::InvalidPem(e.to_string()))?;
    if block.tag() != PUBLIC_KEY_PEM_TYPE {
        return Err(KeyError::UnsupportedPemType {
            found: block.tag().to_string(),
        });
    }
    PublicKey::from_public_key_der(block.contents())
}

/// Decodes a `PUBLIC KEY` PEM that must hold an ECDSA key on a supported curve.
pub fn pem_to_ecdsa_key(pem_bytes: &[u8]) -> Result<EcdsaPublicKey, KeyError> {
    match unmarshal_pem_to_public_key(pem_bytes)? {
        PublicKey::Ecdsa(key) => Ok(key),
        other => Err(KeyError::InvalidPublicKey(format!(
            "expected {} public key, found {}",
            KeyAlgorithm::Ecdsa,
            other.algorithm()
        ))),
    }
}
