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

//! Command implementations for the cosign-keys CLI.

pub mod generate;
pub mod import;
pub mod passphrase;
pub mod public_key;

use anyhow::{bail, Context, Result};
use cosign_keys::Keys;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Paths a key pair is written to for a given prefix.
pub(crate) struct KeyPaths {
    pub private: PathBuf,
    pub public: PathBuf,
}

impl KeyPaths {
    pub fn for_prefix(prefix: &str) -> Self {
        Self {
            private: PathBuf::from(format!("{prefix}.key")),
            public: PathBuf::from(format!("{prefix}.pub")),
        }
    }

    /// Fails if either file exists and `force` is not set.
    pub fn ensure_writable(&self, force: bool) -> Result<()> {
        if force {
            return Ok(());
        }
        for path in [&self.private, &self.public] {
            if path.exists() {
                bail!(
                    "{} already exists; pass --force to overwrite it",
                    path.display()
                );
            }
        }
        Ok(())
    }

    /// Writes both halves of `keys`. The private key file is readable only by
    /// its owner on unix.
    pub fn write(&self, keys: &Keys) -> Result<()> {
        write_file(&self.private, &keys.private_bytes, 0o600)?;
        info!("Private key written to {}", self.private.display());

        write_file(&self.public, &keys.public_bytes, 0o644)?;
        info!("Public key written to {}", self.public.display());
        Ok(())
    }
}

fn write_file(path: &Path, contents: &[u8], mode: u32) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    let mut file = options
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    // The open mode only applies to newly created files; an overwritten file
    // keeps its old permissions unless they are reset before writing.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(mode))
            .with_context(|| format!("Failed to set permissions on {}", path.display()))?;
    }

    file.write_all(contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
