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

//! Structured audit logging for key lifecycle operations.
//!
//! Every event carries a dot-notation `event_type` field and is emitted
//! through `tracing`. Only algorithm names, PEM tags, load stages and public
//! key fingerprints are recorded. Private key material and passphrases never
//! reach these functions.

use std::fmt;

use crate::keys::{LoadStage, PublicKey};

/// Event types for key operations.
pub mod events {
    /// New private key generated.
    pub const KEY_GENERATED: &str = "key.generated";
    /// Existing private key imported from PEM.
    pub const KEY_IMPORTED: &str = "key.imported";
    /// Import rejected.
    pub const KEY_IMPORT_FAILED: &str = "key.import_failed";
    /// Key pair encrypted and PEM-encoded.
    pub const KEY_ENCRYPTED: &str = "key.encrypted";
    /// Encrypted private key loaded into a signer.
    pub const KEY_LOADED: &str = "key.loaded";
    /// Encrypted private key could not be loaded.
    pub const KEY_LOAD_FAILED: &str = "key.load_failed";
}

/// Public key fingerprint as an event field.
///
/// The SPKI encoding and hash run only when a subscriber formats the field,
/// so disabled events cost nothing beyond the level check.
struct KeyFingerprint<'a>(&'a PublicKey);

impl fmt::Display for KeyFingerprint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.fingerprint() {
            Ok(fingerprint) => f.write_str(&fingerprint),
            Err(_) => f.write_str("<unavailable>"),
        }
    }
}

/// Log a key generation event.
pub fn log_key_generated(public_key: &PublicKey) {
    tracing::info!(
        event_type = events::KEY_GENERATED,
        algorithm = %public_key.algorithm(),
        curve = public_key.curve().map(|c| c.name()),
        key_fingerprint = %KeyFingerprint(public_key),
        "Private key generated"
    );
}

/// Log a key import event.
pub fn log_key_imported(pem_type: &str, public_key: &PublicKey) {
    tracing::info!(
        event_type = events::KEY_IMPORTED,
        pem_type = %pem_type,
        algorithm = %public_key.algorithm(),
        curve = public_key.curve().map(|c| c.name()),
        key_fingerprint = %KeyFingerprint(public_key),
        "Private key imported"
    );
}

/// Log a rejected import.
pub fn log_key_import_failed(pem_type: Option<&str>, error: &str) {
    tracing::warn!(
        event_type = events::KEY_IMPORT_FAILED,
        pem_type = pem_type.unwrap_or("<none>"),
        error = %error,
        "Private key import failed"
    );
}

/// Log a key pair encryption event.
pub fn log_key_encrypted(public_key: &PublicKey) {
    tracing::debug!(
        event_type = events::KEY_ENCRYPTED,
        algorithm = %public_key.algorithm(),
        curve = public_key.curve().map(|c| c.name()),
        key_fingerprint = %KeyFingerprint(public_key),
        "Key pair encrypted"
    );
}

/// Log a successful load.
pub fn log_key_loaded(public_key: &PublicKey) {
    tracing::info!(
        event_type = events::KEY_LOADED,
        algorithm = %public_key.algorithm(),
        curve = public_key.curve().map(|c| c.name()),
        key_fingerprint = %KeyFingerprint(public_key),
        "Private key loaded"
    );
}

/// Log a failed load. `stage` is the last stage the load reached.
pub fn log_key_load_failed(stage: LoadStage, failure_reason: &str) {
    tracing::warn!(
        event_type = events::KEY_LOAD_FAILED,
        stage = %stage,
        failure_reason = %failure_reason,
        "Private key load failed"
    );
}
