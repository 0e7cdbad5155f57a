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

//! Importing existing PKCS#1 and SEC1 keys.

use cosign_keys::{
    import_key_pair, import_key_pair_from_path, load_ecdsa_private_key, load_private_key,
    load_rsa_private_key, unmarshal_pem_to_public_key, EcdsaCurve, KeyAlgorithm, KeyError,
    SignerVerifier,
};
use std::io::Write;
use tempfile::NamedTempFile;

use crate::common::{
    ec_private_key_pem, ec_private_key_pem_on, failing_pass_func, pass_func, pem_block,
    rsa_private_key_pem, PASSWORD,
};

#[test]
fn test_import_rsa_key() {
    let keys = import_key_pair(&rsa_private_key_pem(2048), &pass_func()).unwrap();

    let signer = load_private_key(&keys.private_bytes, PASSWORD.as_bytes()).unwrap();
    assert_eq!(signer.algorithm(), KeyAlgorithm::Rsa);

    let signature = signer.sign_message(b"hello").unwrap();
    assert!(signer.verify_signature(&signature, b"hello").is_ok());
}

#[test]
fn test_import_ec_key() {
    let keys = import_key_pair(&ec_private_key_pem(), &pass_func()).unwrap();

    let signer = load_private_key(&keys.private_bytes, PASSWORD.as_bytes()).unwrap();
    assert_eq!(signer.algorithm(), KeyAlgorithm::Ecdsa);
    assert_eq!(signer.public_key().curve(), Some(EcdsaCurve::P256));

    let signature = signer.sign_message(b"hello").unwrap();
    assert!(signer.verify_signature(&signature, b"hello").is_ok());
}

#[test]
fn test_import_ec_key_on_each_curve() {
    for curve in [EcdsaCurve::P256, EcdsaCurve::P384, EcdsaCurve::P521] {
        let keys = import_key_pair(&ec_private_key_pem_on(curve), &pass_func()).unwrap();

        let signer = load_ecdsa_private_key(&keys.private_bytes, PASSWORD.as_bytes()).unwrap();
        assert_eq!(signer.curve(), curve);
        assert_eq!(
            signer.public_key(),
            unmarshal_pem_to_public_key(&keys.public_bytes).unwrap()
        );

        let signature = signer.sign_message(b"hello").unwrap();
        assert!(signer.verify_signature(&signature, b"hello").is_ok());
        assert!(signer
            .public_key()
            .verify(signer.digest_algorithm(), b"hello", &signature)
            .is_ok());
        assert!(signer.verify_signature(&signature, b"goodbye").is_err());
    }
}

/// Key size is not policed on import.
#[test]
fn test_import_small_rsa_key() {
    let keys = import_key_pair(&rsa_private_key_pem(1024), &pass_func()).unwrap();

    let signer = load_rsa_private_key(&keys.private_bytes, PASSWORD.as_bytes()).unwrap();
    assert_eq!(signer.public_key().rsa_bits(), Some(1024));
}

#[test]
fn test_narrow_loaders_reject_other_algorithm() {
    let rsa = import_key_pair(&rsa_private_key_pem(2048), &pass_func()).unwrap();
    let ec = import_key_pair(&ec_private_key_pem(), &pass_func()).unwrap();

    assert!(load_rsa_private_key(&rsa.private_bytes, PASSWORD.as_bytes()).is_ok());
    assert!(load_ecdsa_private_key(&ec.private_bytes, PASSWORD.as_bytes()).is_ok());

    match load_ecdsa_private_key(&rsa.private_bytes, PASSWORD.as_bytes()) {
        Err(KeyError::AlgorithmMismatch { expected, found }) => {
            assert_eq!(expected, KeyAlgorithm::Ecdsa);
            assert_eq!(found, KeyAlgorithm::Rsa);
        }
        other => panic!("Expected AlgorithmMismatch, got {:?}", other.map(|_| ())),
    }

    match load_rsa_private_key(&ec.private_bytes, PASSWORD.as_bytes()) {
        Err(KeyError::AlgorithmMismatch { expected, found }) => {
            assert_eq!(expected, KeyAlgorithm::Rsa);
            assert_eq!(found, KeyAlgorithm::Ecdsa);
        }
        other => panic!("Expected AlgorithmMismatch, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_import_from_path() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&ec_private_key_pem()).unwrap();

    let keys = import_key_pair_from_path(file.path(), &pass_func()).unwrap();
    assert!(load_private_key(&keys.private_bytes, PASSWORD.as_bytes()).is_ok());
}

#[test]
fn test_import_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = import_key_pair_from_path(dir.path().join("missing.pem"), &pass_func());
    assert!(matches!(result, Err(KeyError::Io(_))));
}

/// Unencrypted PKCS#8 is not one of the accepted import tags.
#[test]
fn test_import_rejects_other_pem_types() {
    for tag in ["PRIVATE KEY", "PUBLIC KEY", "ENCRYPTED COSIGN PRIVATE KEY"] {
        let pem_bytes = pem_block(tag, &[0x30, 0x00]);
        match import_key_pair(&pem_bytes, &pass_func()) {
            Err(KeyError::UnsupportedPemType { found }) => assert_eq!(found, tag),
            other => panic!("Expected UnsupportedPemType, got {:?}", other),
        }
    }
}

#[test]
fn test_import_rejects_non_pem() {
    let result = import_key_pair(b"this is not a key", &pass_func());
    assert!(matches!(result, Err(KeyError::InvalidPem(_))));
}

#[test]
fn test_import_rejects_malformed_key_material() {
    for tag in ["RSA PRIVATE KEY", "EC PRIVATE KEY"] {
        let pem_bytes = pem_block(tag, b"garbage key material");
        let result = import_key_pair(&pem_bytes, &pass_func());
        assert!(matches!(result, Err(KeyError::Parse(_))), "tag {tag}");
    }
}

/// The callback is not consulted until the key has parsed, and its error is
/// returned unchanged.
#[test]
fn test_import_passphrase_error_passes_through() {
    let result = import_key_pair(&ec_private_key_pem(), &failing_pass_func);
    match result {
        Err(KeyError::Passphrase(source)) => assert_eq!(source.to_string(), "prompt cancelled"),
        other => panic!("Expected Passphrase error, got {:?}", other),
    }

    let result = import_key_pair(b"not pem", &failing_pass_func);
    assert!(matches!(result, Err(KeyError::InvalidPem(_))));
}
