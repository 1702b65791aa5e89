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

//! The tool's fixed per-user paths.
//!
//! Everything devssh writes lives under `~/.devssh/` except the SSH config
//! itself, which is the user's own `~/.ssh/config`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::utils::fs::FileAccess;

const MANAGED_DIR_NAME: &str = ".devssh";
const PRIVATE_KEY_FILE: &str = "devssh.pem";
const BACKUP_DIR_NAME: &str = "backups";

/// Resolved locations for one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedPaths {
    /// The user's SSH client config (`~/.ssh/config`).
    pub ssh_config: PathBuf,
    /// The managed private key (`~/.devssh/devssh.pem`). Also the
    /// ownership marker: entries whose IdentityFile equals this path are
    /// ours.
    pub private_key: PathBuf,
    /// Where pre-cycle backups accumulate (`~/.devssh/backups/`).
    pub backup_dir: PathBuf,
}

impl ManagedPaths {
    /// Resolve the standard per-user layout.
    pub fn resolve() -> Result<Self> {
        let home = dirs::home_dir().context("Unable to determine home directory")?;
        Ok(Self::under(&home))
    }

    /// The standard layout rooted at an arbitrary directory. Tests use
    /// this with a temp dir.
    pub fn under(home: &Path) -> Self {
        let managed_dir = home.join(MANAGED_DIR_NAME);
        Self {
            ssh_config: home.join(".ssh").join("config"),
            private_key: managed_dir.join(PRIVATE_KEY_FILE),
            backup_dir: managed_dir.join(BACKUP_DIR_NAME),
        }
    }

    /// A fresh backup path for this cycle: timestamped, suffixed with a
    /// counter when the timestamp collides. Backups are append-only
    /// history and never overwritten.
    pub fn new_backup_path(&self, fs: &dyn FileAccess) -> PathBuf {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let base = self.backup_dir.join(format!("config.{stamp}.bak"));
        if !fs.exists(&base) {
            return base;
        }
        let mut n = 1;
        loop {
            let candidate = self.backup_dir.join(format!("config.{stamp}-{n}.bak"));
            if !fs.exists(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fs::OsFs;
    use tempfile::tempdir;

    #[test]
    fn test_standard_layout() {
        let paths = ManagedPaths::under(Path::new("/home/u"));
        assert_eq!(paths.ssh_config, PathBuf::from("/home/u/.ssh/config"));
        assert_eq!(paths.private_key, PathBuf::from("/home/u/.devssh/devssh.pem"));
        assert_eq!(paths.backup_dir, PathBuf::from("/home/u/.devssh/backups"));
    }

    #[test]
    fn test_backup_paths_never_collide() {
        let dir = tempdir().unwrap();
        let paths = ManagedPaths::under(dir.path());

        let first = paths.new_backup_path(&OsFs);
        OsFs.write(&first, "one").unwrap();
        let second = paths.new_backup_path(&OsFs);

        assert_ne!(first, second);
        assert!(second.to_string_lossy().ends_with(".bak"));
    }

    #[test]
    fn test_expand_tilde_passthrough_for_absolute() {
        let path = Path::new("/etc/ssh/ssh_config");
        assert_eq!(expand_tilde(path), path);
    }
}
