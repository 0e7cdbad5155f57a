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

//! Passphrase handling.

use std::fmt;
use zeroize::Zeroizing;

/// Error produced by a passphrase callback, e.g. the user cancelled a prompt.
pub type PassphraseError = Box<dyn std::error::Error + Send + Sync>;

/// Passphrase bytes, zeroized on drop.
///
/// `Debug` never prints the contents.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Passphrase(Zeroizing<Vec<u8>>);

impl Passphrase {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passphrase(<redacted>)")
    }
}

impl From<Vec<u8>> for Passphrase {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for Passphrase {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes.to_vec())
    }
}

impl From<&str> for Passphrase {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes().to_vec())
    }
}

impl From<String> for Passphrase {
    fn from(s: String) -> Self {
        Self::new(s.into_bytes())
    }
}

impl AsRef<[u8]> for Passphrase {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Source of passphrases for encrypting private keys.
///
/// `confirm` is `true` when a new passphrase is being chosen, in which case an
/// interactive implementation should prompt twice and check that both entries
/// agree. Closures of the form `Fn(bool) -> Result<Passphrase, PassphraseError>`
/// implement this trait.
pub trait PassFunc {
    fn passphrase(&self, confirm: bool) -> Result<Passphrase, PassphraseError>;
}

impl<F> PassFunc for F
where
    F: Fn(bool) -> Result<Passphrase, PassphraseError>,
{
    fn passphrase(&self, confirm: bool) -> Result<Passphrase, PassphraseError> {
        self(confirm)
    }
}

/// A [`PassFunc`] that always returns the same passphrase.
#[derive(Debug, Clone)]
pub struct StaticPassphrase(Passphrase);

impl StaticPassphrase {
    pub fn new(passphrase: impl Into<Passphrase>) -> Self {
        Self(passphrase.into())
    }
}

impl PassFunc for StaticPassphrase {
    fn passphrase(&self, _confirm: bool) -> Result<Passphrase, PassphraseError> {
        Ok(self.0.clone())
    }
}
