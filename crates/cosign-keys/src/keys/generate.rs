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

//! Fresh key generation.

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use super::{marshal_key_pair, KeyPair, Keys, PassFunc, PrivateKey};
use crate::audit;
use crate::error::KeyError;

/// Generates a new ECDSA P-256 private key from the operating system's CSPRNG.
///
/// # Errors
///
/// Returns [`KeyError::Generation`] if the random source fails.
pub fn generate_private_key() -> Result<PrivateKey, KeyError> {
    let secret = p256_secret_from(|bytes| OsRng.try_fill_bytes(bytes))?;
    let key = PrivateKey::from(secret);

    audit::log_key_generated(&key.public_key());
    Ok(key)
}

/// Draws candidate scalars from `fill` until one lies in `[1, n)`.
///
/// A uniform draw is out of range with probability below 2^-32.
fn p256_secret_from<F>(mut fill: F) -> Result<p256::SecretKey, KeyError>
where
    F: FnMut(&mut [u8]) -> Result<(), rand::Error>,
{
    let mut scalar = Zeroizing::new([0u8; 32]);
    loop {
        fill(scalar.as_mut())
            .map_err(|e| KeyError::Generation(format!("random source failed: {e}")))?;

        if let Ok(secret) = p256::SecretKey::from_slice(scalar.as_ref()) {
            return Ok(secret);
        }
    }
}

/// Generates a new key pair and encodes it with a passphrase from `pf`.
pub fn generate_key_pair<P>(pf: &P) -> Result<Keys, KeyError>
where
    P: PassFunc + ?Sized,
{
    let key_pair = KeyPair::new(generate_private_key()?);
    marshal_key_pair(key_pair, pf)
}
