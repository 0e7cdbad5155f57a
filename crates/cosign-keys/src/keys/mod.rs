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

//! Key-pair lifecycle: generation, import, encrypted encoding and loading.
//!
//! Persisted keys are PEM blocks. The private half is tagged
//! [`PRIVATE_KEY_PEM_TYPE`] and carries a password-encrypted PKCS#8 document;
//! the public half is a plain SubjectPublicKeyInfo under [`PUBLIC_KEY_PEM_TYPE`].

mod generate;
mod import;
mod load;
mod marshal;
mod passphrase;
mod public;
mod types;

pub use generate::{generate_key_pair, generate_private_key};
pub use import::{import_key_pair, import_key_pair_from_path};
pub use load::{load_ecdsa_private_key, load_private_key, load_rsa_private_key, LoadStage};
pub use marshal::{marshal_key_pair, marshal_key_pair_with_params, Keys};
pub use passphrase::{PassFunc, Passphrase, PassphraseError, StaticPassphrase};
pub use public::{marshal_public_key_to_pem, pem_to_ecdsa_key, unmarshal_pem_to_public_key};
pub use types::{
    EcdsaCurve, EcdsaPrivateKey, EcdsaPublicKey, KeyAlgorithm, KeyPair, PrivateKey, PublicKey,
};

/// PEM tag of an encrypted private key.
pub const PRIVATE_KEY_PEM_TYPE: &str = "ENCRYPTED COSIGN PRIVATE KEY";

/// PEM tag of a PKCS#1 RSA private key accepted by the importer.
pub const RSA_PRIVATE_KEY_PEM_TYPE: &str = "RSA PRIVATE KEY";

/// PEM tag of a SEC1 EC private key accepted by the importer.
pub const EC_PRIVATE_KEY_PEM_TYPE: &str = "EC PRIVATE KEY";

/// PEM tag of a SubjectPublicKeyInfo public key.
pub const PUBLIC_KEY_PEM_TYPE: &str = "PUBLIC KEY";

/// Encodes a PEM block with LF line endings and 64-column wrapping.
pub(crate) fn encode_pem(tag: &str, contents: Vec<u8>) -> Vec<u8> {
    let block = pem::Pem::new(tag, contents);
    let config = pem::EncodeConfig::new().set_line_ending(pem::LineEnding::LF);
    pem::encode_config(&block, config).into_bytes()
}
