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

//! Implementation of the `public-key` command.

use anyhow::{Context, Result};
use cosign_keys::{load_private_key, marshal_public_key_to_pem, PassFunc};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Run the public-key command.
///
/// Loads the encrypted private key and prints the matching `PUBLIC KEY` PEM
/// to stdout, or writes it to `outfile`.
pub fn run<P: PassFunc>(key: &Path, outfile: Option<&Path>, pf: &P) -> Result<()> {
    let public_pem = derive_public_pem(key, pf)?;

    match outfile {
        Some(path) => {
            std::fs::write(path, &public_pem)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Public key written to {}", path.display());
        }
        None => std::io::stdout()
            .write_all(&public_pem)
            .context("Failed to write public key")?,
    }
    Ok(())
}

fn derive_public_pem<P: PassFunc>(key: &Path, pf: &P) -> Result<Vec<u8>> {
    let private_pem =
        std::fs::read(key).with_context(|| format!("Failed to read {}", key.display()))?;

    let passphrase = pf
        .passphrase(false)
        .map_err(|e| anyhow::anyhow!("Failed to read password: {e}"))?;

    let signer = load_private_key(&private_pem, passphrase.as_bytes())
        .with_context(|| format!("Failed to load {}", key.display()))?;

    Ok(marshal_public_key_to_pem(&signer.public_key())?)
}
