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

//! Public key PEM helpers.

use cosign_keys::{
    generate_key_pair, import_key_pair, load_private_key, marshal_public_key_to_pem,
    pem_to_ecdsa_key, unmarshal_pem_to_public_key, KeyError, PublicKey, SignerVerifier,
};

use crate::common::{pass_func, rsa_private_key_pem, PASSWORD};

#[test]
fn test_public_pem_reencodes_identically() {
    let keys = generate_key_pair(&pass_func()).unwrap();

    let public = unmarshal_pem_to_public_key(&keys.public_bytes).unwrap();
    assert_eq!(marshal_public_key_to_pem(&public).unwrap(), keys.public_bytes);
}

#[test]
fn test_fingerprint_matches_loaded_signer() {
    let keys = generate_key_pair(&pass_func()).unwrap();
    let signer = load_private_key(&keys.private_bytes, PASSWORD.as_bytes()).unwrap();

    let public = unmarshal_pem_to_public_key(&keys.public_bytes).unwrap();
    assert_eq!(
        public.fingerprint().unwrap(),
        signer.public_key().fingerprint().unwrap()
    );
}

#[test]
fn test_pem_to_ecdsa_key() {
    let keys = generate_key_pair(&pass_func()).unwrap();
    let ec_key = pem_to_ecdsa_key(&keys.public_bytes).unwrap();

    assert_eq!(
        PublicKey::Ecdsa(ec_key),
        unmarshal_pem_to_public_key(&keys.public_bytes).unwrap()
    );
}

#[test]
fn test_pem_to_ecdsa_key_rejects_rsa() {
    let keys = import_key_pair(&rsa_private_key_pem(2048), &pass_func()).unwrap();

    assert!(matches!(
        unmarshal_pem_to_public_key(&keys.public_bytes),
        Ok(PublicKey::Rsa(_))
    ));
    assert!(matches!(
        pem_to_ecdsa_key(&keys.public_bytes),
        Err(KeyError::InvalidPublicKey(_))
    ));
}
