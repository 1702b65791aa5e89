// Copyright 2026 The devssh Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for the reconciliation cycle.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::sshconfig::ParseError;

/// Fatal errors that abort a reconciliation cycle.
///
/// Every variant names the failing step and carries enough context (path,
/// underlying cause) to recover manually. Any failure after the backup step
/// leaves the on-disk file at the last successful write; the backup path is
/// included where one exists.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The Workspace Directory could not list active workspaces. Nothing
    /// on disk has been touched.
    #[error("failed to list active workspaces")]
    DirectoryFetch(#[source] anyhow::Error),

    /// The Credential Store could not supply private key material.
    #[error("failed to fetch private key material")]
    Credential(#[source] anyhow::Error),

    /// Writing the managed private key failed.
    #[error("failed to install private key at {}", path.display())]
    KeyInstall {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the SSH config file failed.
    #[error("failed to read SSH config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The SSH config file did not parse. Aborts before any write.
    #[error("malformed SSH config at {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// The pre-cycle backup could not be persisted. Aborts before any
    /// destructive write.
    #[error("failed to back up {} to {}", path.display(), backup.display())]
    Backup {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A config write failed mid-cycle. The backup taken at the start of
    /// the cycle is the recovery point.
    #[error("failed to write SSH config at {} (backup at {})", path.display(), backup.display())]
    Write {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No free port at or above the base port.
    #[error("no free port at or above {base}")]
    PortsExhausted { base: u16 },
}

impl ReconcileError {
    /// The backup path to restore from, where the failure happened after
    /// one was taken.
    pub fn backup_path(&self) -> Option<&PathBuf> {
        match self {
            ReconcileError::Write { backup, .. } => Some(backup),
            _ => None,
        }
    }
}
