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

//! Passphrase source for the CLI: `COSIGN_PASSWORD` or stdin.

use cosign_keys::{PassFunc, Passphrase, PassphraseError};
use std::io::{self, BufRead, Write};

/// Supplies the passphrase from the environment when set, otherwise reads it
/// from stdin, prompting on stderr.
pub struct CliPassphrase {
    from_env: Option<Passphrase>,
}

impl CliPassphrase {
    pub fn new(from_env: Option<String>) -> Self {
        Self {
            from_env: from_env.map(Passphrase::from),
        }
    }
}

impl PassFunc for CliPassphrase {
    fn passphrase(&self, confirm: bool) -> Result<Passphrase, PassphraseError> {
        if let Some(passphrase) = &self.from_env {
            return Ok(passphrase.clone());
        }
        let stdin = io::stdin();
        read_passphrase(&mut stdin.lock(), &mut io::stderr(), confirm)
    }
}

/// Reads one passphrase line, or two matching lines when `confirm` is set.
pub(crate) fn read_passphrase<R, W>(
    input: &mut R,
    prompt: &mut W,
    confirm: bool,
) -> Result<Passphrase, PassphraseError>
where
    R: BufRead,
    W: Write,
{
    write!(prompt, "Enter password for private key: ")?;
    prompt.flush()?;
    let first = read_line(input)?;

    if confirm {
        write!(prompt, "\nEnter password for private key again: ")?;
        prompt.flush()?;
        let second = read_line(input)?;
        if first != second {
            return Err("passwords do not match".into());
        }
    }
    writeln!(prompt)?;

    Ok(first)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Passphrase, PassphraseError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err("no password provided on stdin".into());
    }
    let len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(len);
    Ok(Passphrase::from(line))
}
