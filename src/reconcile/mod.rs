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

//! The reconciliation cycle.
//!
//! One cycle is a clean load/mutate/persist transaction:
//!
//! 1. install the private key from the Credential Store
//! 2. fetch active workspace identifiers; load (or create) the SSH config
//! 3. back up the current file
//! 4. append an entry for every active workspace without one; checkpoint
//!    the file to disk
//! 5. re-parse the file from disk (disk is ground truth for pruning)
//! 6. prune owned entries with no active workspace
//! 7. write the final config
//!
//! Fatal failures abort the cycle with a [`ReconcileError`] naming the
//! failing step; after the backup step the backup is the recovery point.
//! A workspace whose name cannot be rendered is skipped and reported, not
//! fatal.

pub mod error;
pub mod ownership;
pub mod ports;
pub mod prune;
pub mod render;

pub use error::ReconcileError;
pub use ports::{PortSet, DEFAULT_BASE_PORT};
pub use render::RenderError;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::paths::ManagedPaths;
use crate::sshconfig::{self, ManagedConfig};
use crate::utils::fs::FileAccess;
use crate::workspace::{CredentialStore, WorkspaceDirectory};

/// Cycle states, in order. Used for tracing; errors already identify the
/// failing step by variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    KeyInstalled,
    Loaded,
    BackedUp,
    EntriesAdded,
    Written,
    Reloaded,
    Pruned,
    FinalWritten,
    Done,
}

/// Outcome of a successful cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Where the pre-cycle copy of the config went.
    pub backup_path: PathBuf,
    /// `(host, port)` entries synthesized this cycle.
    pub added: Vec<(String, u16)>,
    /// Owned hosts removed because their workspace is no longer active.
    pub pruned: Vec<String>,
    /// Workspaces skipped because their name cannot be rendered. These do
    /// not fail the cycle.
    pub skipped: Vec<(String, RenderError)>,
}

/// Reconciles the SSH config file with the active workspace set.
///
/// Holds no state between cycles; everything is re-read from its source
/// each run. All file access goes through the injected [`FileAccess`]
/// capability.
pub struct Reconciler<'a> {
    directory: &'a dyn WorkspaceDirectory,
    credentials: &'a dyn CredentialStore,
    fs: &'a dyn FileAccess,
    paths: ManagedPaths,
    base_port: u16,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        directory: &'a dyn WorkspaceDirectory,
        credentials: &'a dyn CredentialStore,
        fs: &'a dyn FileAccess,
        paths: ManagedPaths,
    ) -> Self {
        Self {
            directory,
            credentials,
            fs,
            paths,
            base_port: DEFAULT_BASE_PORT,
        }
    }

    pub fn with_base_port(mut self, base_port: u16) -> Self {
        self.base_port = base_port;
        self
    }

    /// Run one reconciliation cycle to completion.
    pub fn reconcile(&self) -> Result<ReconcileReport, ReconcileError> {
        self.install_key()?;
        self.phase(Phase::KeyInstalled);

        let active = self
            .directory
            .list_active_identifiers()
            .map_err(ReconcileError::DirectoryFetch)?;
        let text = self.load_config_text()?;
        let config = self.decode(&text)?;
        self.phase(Phase::Loaded);

        let backup_path = self.write_backup(&text)?;
        self.phase(Phase::BackedUp);
        info!(backup = %backup_path.display(), "editing SSH config");

        let (checkpoint, added, skipped) = self.add_missing_entries(&config, text, &active)?;
        self.phase(Phase::EntriesAdded);

        self.write_config(&checkpoint, &backup_path)?;
        self.phase(Phase::Written);

        // Disk is ground truth for the prune: re-read what we just wrote
        // rather than trusting the in-memory pipeline.
        let reloaded_text = self
            .fs
            .read_to_string(&self.paths.ssh_config)
            .map_err(|source| ReconcileError::Read {
                path: self.paths.ssh_config.clone(),
                source,
            })?;
        let reloaded = self.decode(&reloaded_text)?;
        self.phase(Phase::Reloaded);

        let (pruned_config, pruned) = prune::prune(reloaded, &active, &self.paths.private_key);
        self.phase(Phase::Pruned);

        self.write_config(&pruned_config.serialize(), &backup_path)?;
        self.phase(Phase::FinalWritten);

        for host in &pruned {
            debug!(host = %host, "pruned stale entry");
        }
        for (name, err) in &skipped {
            warn!(workspace = %name, error = %err, "skipped workspace");
        }
        self.phase(Phase::Done);

        Ok(ReconcileReport {
            backup_path,
            added,
            pruned,
            skipped,
        })
    }

    fn phase(&self, phase: Phase) {
        debug!(?phase, "reconcile");
    }

    fn install_key(&self) -> Result<(), ReconcileError> {
        let material = self
            .credentials
            .private_key_material()
            .map_err(ReconcileError::Credential)?;
        self.fs
            .write_secret(&self.paths.private_key, &material)
            .map_err(|source| ReconcileError::KeyInstall {
                path: self.paths.private_key.clone(),
                source,
            })
    }

    /// Read the SSH config, creating an empty file if absent.
    fn load_config_text(&self) -> Result<String, ReconcileError> {
        let path = &self.paths.ssh_config;
        if !self.fs.exists(path) {
            debug!(path = %path.display(), "SSH config absent, creating empty file");
            self.fs.write(path, "").map_err(|source| ReconcileError::Read {
                path: path.clone(),
                source,
            })?;
            return Ok(String::new());
        }
        self.fs
            .read_to_string(path)
            .map_err(|source| ReconcileError::Read {
                path: path.clone(),
                source,
            })
    }

    fn decode(&self, text: &str) -> Result<ManagedConfig, ReconcileError> {
        sshconfig::parse(text).map_err(|source| ReconcileError::Decode {
            path: self.paths.ssh_config.clone(),
            source,
        })
    }

    fn write_backup(&self, text: &str) -> Result<PathBuf, ReconcileError> {
        let backup = self.paths.new_backup_path(self.fs);
        self.fs
            .write(&backup, text)
            .map_err(|source| ReconcileError::Backup {
                path: self.paths.ssh_config.clone(),
                backup: backup.clone(),
                source,
            })?;
        Ok(backup)
    }

    /// Append a rendered entry for every active workspace that has no
    /// owned entry yet. Returns the new file text, the additions, and the
    /// workspaces skipped for bad names.
    #[allow(clippy::type_complexity)]
    fn add_missing_entries(
        &self,
        config: &ManagedConfig,
        text: String,
        active: &[String],
    ) -> Result<(String, Vec<(String, u16)>, Vec<(String, RenderError)>), ReconcileError> {
        let key_path = &self.paths.private_key;
        let owned = config.owned_hosts(key_path);
        let mut ports = PortSet::new(config.owned_ports(key_path));

        let mut out = text;
        let mut added = Vec::new();
        let mut skipped = Vec::new();

        for name in active {
            if owned.iter().any(|h| h == name) {
                continue;
            }
            // Skipped workspaces must not consume a port, so validate
            // before allocating.
            if let Err(err) = render::validate_host_name(name) {
                skipped.push((name.clone(), err));
                continue;
            }
            let port = ports.allocate(self.base_port)?;
            let entry = render::format_entry(name, port, key_path);
            out.push_str(separator_for(&out));
            out.push_str(&entry);
            info!(host = %name, port, "adding SSH entry");
            added.push((name.clone(), port));
        }

        Ok((out, added, skipped))
    }

    fn write_config(&self, text: &str, backup: &Path) -> Result<(), ReconcileError> {
        self.fs
            .write(&self.paths.ssh_config, text)
            .map_err(|source| ReconcileError::Write {
                path: self.paths.ssh_config.clone(),
                backup: backup.to_path_buf(),
                source,
            })
    }
}

/// Separator to place before an appended entry so blocks stay divided by
/// a blank line without accumulating extra ones across cycles.
fn separator_for(text: &str) -> &'static str {
    if text.is_empty() || text.ends_with("\n\n") {
        ""
    } else if text.ends_with('\n') {
        "\n"
    } else {
        "\n\n"
    }
}
