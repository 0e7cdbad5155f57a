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

//! Generation, passphrase encryption and loading of cosign signing key pairs.
//!
//! This crate provides:
//! - ECDSA P-256 key generation ([`generate_private_key`], [`generate_key_pair`])
//! - Import of PKCS#1 RSA and SEC1 EC (P-256, P-384, P-521) private keys
//!   ([`import_key_pair`])
//! - Encrypted PEM encoding of key pairs ([`marshal_key_pair`])
//! - Loading encrypted keys into signer/verifiers ([`load_private_key`])
//! - Structured audit logging of every lifecycle event
//!
//! # Example
//!
//! ```no_run
//! use cosign_keys::{generate_key_pair, load_private_key, StaticPassphrase};
//!
//! # fn main() -> Result<(), cosign_keys::KeyError> {
//! let keys = generate_key_pair(&StaticPassphrase::new("correct-horse"))?;
//!
//! let signer = load_private_key(&keys.private_bytes, b"correct-horse")?;
//! let signature = signer.sign_message(b"hello").expect("signing");
//! assert!(signer.verify_signature(&signature, b"hello").is_ok());
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod crypto;
mod error;
pub mod keys;

pub use crypto::{DigestAlgorithm, SignerVerifier, SigningError, SIGNING_DIGEST};
pub use error::KeyError;
pub use keys::{
    generate_key_pair, generate_private_key, import_key_pair, import_key_pair_from_path,
    load_ecdsa_private_key, load_private_key, load_rsa_private_key, marshal_key_pair,
    marshal_public_key_to_pem, pem_to_ecdsa_key, unmarshal_pem_to_public_key, EcdsaCurve,
    EcdsaPrivateKey, EcdsaPublicKey, KeyAlgorithm, KeyPair, Keys, LoadStage, PassFunc, Passphrase,
    PassphraseError, PrivateKey, PublicKey, StaticPassphrase, PRIVATE_KEY_PEM_TYPE,
    PUBLIC_KEY_PEM_TYPE,
};
