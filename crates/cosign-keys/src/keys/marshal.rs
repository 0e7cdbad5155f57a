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

//! Encrypted PEM encoding of key pairs.

use std::fmt;

use super::{encode_pem, marshal_public_key_to_pem, KeyPair, PassFunc, Passphrase};
use super::PRIVATE_KEY_PEM_TYPE;
use crate::audit;
use crate::crypto::{self, ScryptParams};
use crate::error::KeyError;

/// An encoded key pair ready to be written out.
#[derive(Clone)]
pub struct Keys {
    /// `ENCRYPTED COSIGN PRIVATE KEY` PEM.
    pub private_bytes: Vec<u8>,
    /// `PUBLIC KEY` PEM.
    pub public_bytes: Vec<u8>,
    password: Passphrase,
}

impl Keys {
    /// The passphrase the private key was encrypted with.
    ///
    /// This is secret. It is handed back so callers that obtained it
    /// interactively can reuse it without prompting again; do not log or
    /// persist it alongside the key.
    pub fn password(&self) -> &Passphrase {
        &self.password
    }
}

impl fmt::Debug for Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keys")
            .field("private_bytes", &String::from_utf8_lossy(&self.private_bytes))
            .field("public_bytes", &String::from_utf8_lossy(&self.public_bytes))
            .field("password", &self.password)
            .finish()
    }
}

/// Encrypts the private half of `key_pair` and PEM-encodes both halves.
///
/// `pf` is called exactly once, with `confirm = true`.
///
/// # Errors
///
/// - [`KeyError::Serialization`] if either key cannot be DER-encoded
/// - [`KeyError::Passphrase`] carrying the callback's error unchanged
/// - [`KeyError::Encryption`] if key derivation or encryption fails
pub fn marshal_key_pair<P>(key_pair: KeyPair, pf: &P) -> Result<Keys, KeyError>
where
    P: PassFunc + ?Sized,
{
    marshal_key_pair_with_params(key_pair, pf, ScryptParams::STANDARD)
}

/// Like [`marshal_key_pair`], with explicit scrypt cost parameters.
pub fn marshal_key_pair_with_params<P>(
    key_pair: KeyPair,
    pf: &P,
    params: ScryptParams,
) -> Result<Keys, KeyError>
where
    P: PassFunc + ?Sized,
{
    let der = key_pair.private_key().to_pkcs8_der()?;

    let password = pf.passphrase(true).map_err(KeyError::Passphrase)?;

    let envelope = crypto::encrypt_with_params(der.as_bytes(), password.as_bytes(), params)
        .map_err(KeyError::Encryption)?;
    let private_bytes = encode_pem(PRIVATE_KEY_PEM_TYPE, envelope);

    let public_bytes = marshal_public_key_to_pem(key_pair.public_key())?;

    audit::log_key_encrypted(key_pair.public_key());

    Ok(Keys {
        private_bytes,
        public_bytes,
        password,
    })
}
