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

//! cosign-keys CLI - generate, import and inspect encrypted cosign key pairs.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::passphrase::CliPassphrase;

/// cosign-keys - Manage passphrase-encrypted signing key pairs
#[derive(Parser)]
#[command(name = "cosign-keys")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Passphrase for the private key (read from stdin if unset)
    #[arg(long, env = "COSIGN_PASSWORD", hide = true, hide_env_values = true, global = true)]
    password: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new ECDSA P-256 key pair
    GenerateKeyPair {
        /// Write the key pair to <PREFIX>.key and <PREFIX>.pub
        #[arg(long, default_value = "cosign")]
        output_key_prefix: String,

        /// Overwrite existing key files
        #[arg(short, long)]
        force: bool,
    },

    /// Import an existing PKCS#1 RSA or SEC1 EC private key
    ImportKeyPair {
        /// Path to the unencrypted private key PEM
        #[arg(short, long)]
        key: PathBuf,

        /// Write the key pair to <PREFIX>.key and <PREFIX>.pub
        #[arg(long, default_value = "import-cosign")]
        output_key_prefix: String,

        /// Overwrite existing key files
        #[arg(short, long)]
        force: bool,
    },

    /// Print the public key of an encrypted private key
    PublicKey {
        /// Path to the encrypted private key
        #[arg(long)]
        key: PathBuf,

        /// Write the public key to this file instead of stdout
        #[arg(long)]
        outfile: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let pass_func = CliPassphrase::new(cli.password);

    match cli.command {
        Commands::GenerateKeyPair {
            output_key_prefix,
            force,
        } => commands::generate::run(&output_key_prefix, force, &pass_func)?,
        Commands::ImportKeyPair {
            key,
            output_key_prefix,
            force,
        } => commands::import::run(&key, &output_key_prefix, force, &pass_func)?,
        Commands::PublicKey { key, outfile } => {
            commands::public_key::run(&key, outfile.as_deref(), &pass_func)?
        }
    }

    Ok(())
}
