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

//! Implementation of the `generate-key-pair` command.

use anyhow::{Context, Result};
use cosign_keys::{generate_key_pair, PassFunc};

use super::KeyPaths;

/// Run the generate-key-pair command.
///
/// # Arguments
///
/// * `prefix` - Output path prefix; `.key` and `.pub` are appended
/// * `force` - Overwrite existing files
/// * `pf` - Passphrase source for the new private key
pub fn run<P: PassFunc>(prefix: &str, force: bool, pf: &P) -> Result<()> {
    let paths = KeyPaths::for_prefix(prefix);
    paths.ensure_writable(force)?;

    let keys = generate_key_pair(pf).context("Failed to generate key pair")?;
    paths.write(&keys)
}
