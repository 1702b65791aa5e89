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

//! Ownership classification for host blocks.

use std::path::Path;

use crate::sshconfig::HostBlock;

/// A block is owned by this tool iff one of its `IdentityFile` directives
/// is string-equal to the managed private key path.
///
/// This is a literal comparison: no tilde expansion, no canonicalization.
/// A symlinked or renamed key path makes the entry foreign, and foreign
/// entries are never touched.
pub fn is_owned(block: &HostBlock, key_path: &Path) -> bool {
    let key_path = key_path.to_string_lossy();
    block
        .directives
        .iter()
        .any(|d| d.key == "identityfile" && d.value == key_path)
}
