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

//! Import of existing unencrypted PKCS#1 and SEC1 private keys.

use std::path::Path;
use zeroize::Zeroizing;

use super::{marshal_key_pair, KeyPair, Keys, PassFunc, PrivateKey};
use super::{EC_PRIVATE_KEY_PEM_TYPE, RSA_PRIVATE_KEY_PEM_TYPE};
use crate::audit;
use crate::error::KeyError;

/// Imports an `RSA PRIVATE KEY` (PKCS#1) or `EC PRIVATE KEY` (SEC1) PEM and
/// re-encodes it as an encrypted key pair.
///
/// The key material is not validated beyond parsing: an RSA key of any size is
/// accepted. `pf` is called once, with `confirm = true`.
///
/// # Errors
///
/// - [`KeyError::InvalidPem`] if no PEM block can be decoded
/// - [`KeyError::UnsupportedPemType`] naming any other tag
/// - [`KeyError::Parse`] if the key under a recognised tag is malformed
/// - [`KeyError::UnsupportedAlgorithm`] for an EC key on a curve other than
///   P-256, P-384 or P-521
/// - any error of [`marshal_key_pair`]
pub fn import_key_pair<P>(pem_bytes: &[u8], pf: &P) -> Result<Keys, KeyError>
where
    P: PassFunc + ?Sized,
{
    let block = match pem::parse(pem_bytes) {
        Ok(block) => block,
        Err(e) => {
            let err = KeyError::InvalidPem(e.to_string());
            audit::log_key_import_failed(None, &err.to_string());
            return Err(err);
        }
    };

    let tag = block.tag().to_string();
    let der = Zeroizing::new(block.into_contents());

    let decoded = match tag.as_str() {
        RSA_PRIVATE_KEY_PEM_TYPE => PrivateKey::from_pkcs1_der(&der),
        EC_PRIVATE_KEY_PEM_TYPE => PrivateKey::from_sec1_der(&der),
        _ => Err(KeyError::UnsupportedPemType { found: tag.clone() }),
    };
    let private_key = decoded.map_err(|err| {
        audit::log_key_import_failed(Some(&tag), &err.to_string());
        err
    })?;

    let key_pair = KeyPair::new(private_key);
    audit::log_key_imported(&tag, key_pair.public_key());

    marshal_key_pair(key_pair, pf)
}

/// Reads a PEM file and imports it with [`import_key_pair`].
pub fn import_key_pair_from_path<P>(path: impl AsRef<Path>, pf: &P) -> Result<Keys, KeyError>
where
    P: PassFunc + ?Sized,
{
    let pem_bytes = Zeroizing::new(std::fs::read(path)?);
    import_key_pair(&pem_bytes, pf)
}
