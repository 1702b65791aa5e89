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

//! File-access capability.
//!
//! The reconciler never touches `std::fs` directly; it goes through this
//! path-keyed interface, injected at construction. Tests swap in a
//! temp-dir-rooted [`OsFs`] or a failing implementation without any global
//! state.

use std::io;
use std::path::Path;

/// Path-keyed read/write capability used by the reconciler.
pub trait FileAccess {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write file contents, creating parent directories as needed.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Write a secret with owner-only (0600) permissions.
    fn write_secret(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl OsFs {
    fn ensure_parent(path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl FileAccess for OsFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        Self::ensure_parent(path)?;
        std::fs::write(path, contents)
    }

    #[cfg(unix)]
    fn write_secret(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        use std::fs::OpenOptions;
        use std::io::Write;
        use std::os::unix::fs::OpenOptionsExt;

        Self::ensure_parent(path)?;
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600) // -rw------- (owner read/write only)
            .open(path)?;
        file.write_all(contents)
    }

    #[cfg(not(unix))]
    fn write_secret(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        Self::ensure_parent(path)?;
        std::fs::write(path, contents)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
