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

//! Loading keys written by other implementations of the encrypted key format.
//!
//! The fixtures were produced outside this crate: PKCS#8 from OpenSSL, scrypt
//! (N = 32768, r = 8, p = 1) and NaCl secretbox, laid out in the go-tuf JSON
//! envelope that cosign writes. Password `fixture-password`.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use cosign_keys::{
    generate_key_pair, load_ecdsa_private_key, load_private_key, load_rsa_private_key,
    unmarshal_pem_to_public_key, EcdsaCurve, KeyAlgorithm, KeyError, SignerVerifier,
    SIGNING_DIGEST,
};
use serde_json::Value;

use crate::common::pass_func;

const FIXTURE_PASSWORD: &[u8] = b"fixture-password";

const P256_KEY: &[u8] = include_bytes!("../fixtures/cosign-p256.key");
const P256_PUB: &[u8] = include_bytes!("../fixtures/cosign-p256.pub");
const RSA_KEY: &[u8] = include_bytes!("../fixtures/cosign-rsa.key");
const RSA_PUB: &[u8] = include_bytes!("../fixtures/cosign-rsa.pub");

fn envelope_json(private_pem: &[u8]) -> Value {
    let block = pem::parse(private_pem).unwrap();
    serde_json::from_slice(block.contents()).unwrap()
}

/// Object keys at every level, as JSON pointers.
fn field_paths(value: &Value, prefix: &str, out: &mut Vec<String>) {
    if let Value::Object(map) = value {
        for (key, child) in map {
            let path = format!("{prefix}/{key}");
            field_paths(child, &path, out);
            out.push(path);
        }
    }
}

#[test]
fn test_load_p256_fixture() {
    let signer = load_private_key(P256_KEY, FIXTURE_PASSWORD).unwrap();
    let expected = unmarshal_pem_to_public_key(P256_PUB).unwrap();

    assert_eq!(signer.algorithm(), KeyAlgorithm::Ecdsa);
    assert_eq!(signer.public_key(), expected);

    let signature = signer.sign_message(b"hello").unwrap();
    expected.verify(SIGNING_DIGEST, b"hello", &signature).unwrap();
}

#[test]
fn test_load_p256_fixture_with_narrow_loader() {
    let signer = load_ecdsa_private_key(P256_KEY, FIXTURE_PASSWORD).unwrap();
    assert_eq!(signer.curve(), EcdsaCurve::P256);
    assert_eq!(signer.public_key(), unmarshal_pem_to_public_key(P256_PUB).unwrap());
}

#[test]
fn test_load_rsa_fixture() {
    let signer = load_rsa_private_key(RSA_KEY, FIXTURE_PASSWORD).unwrap();
    let expected = unmarshal_pem_to_public_key(RSA_PUB).unwrap();

    assert_eq!(signer.public_key(), expected);
    assert_eq!(expected.rsa_bits(), Some(2048));

    let signature = signer.sign_message(b"hello").unwrap();
    expected.verify(SIGNING_DIGEST, b"hello", &signature).unwrap();
}

#[test]
fn test_fixture_with_wrong_password_fails() {
    let result = load_private_key(P256_KEY, b"not-the-fixture-password");
    assert!(matches!(result, Err(KeyError::Decryption(_))));
}

#[test]
fn test_fixture_envelope_parameters() {
    let envelope = envelope_json(P256_KEY);

    assert_eq!(envelope["kdf"]["name"], "scrypt");
    assert_eq!(envelope["kdf"]["params"]["N"], 32768);
    assert_eq!(envelope["cipher"]["name"], "nacl/secretbox");

    let salt = BASE64
        .decode(envelope["kdf"]["salt"].as_str().unwrap())
        .unwrap();
    assert_eq!(salt.len(), 32);
}

#[test]
fn test_generated_envelope_has_fixture_layout() {
    let keys = generate_key_pair(&pass_func()).unwrap();

    let mut fixture_paths = Vec::new();
    field_paths(&envelope_json(P256_KEY), "", &mut fixture_paths);
    fixture_paths.sort();

    let mut generated_paths = Vec::new();
    field_paths(&envelope_json(&keys.private_bytes), "", &mut generated_paths);
    generated_paths.sort();

    assert_eq!(generated_paths, fixture_paths);
}
