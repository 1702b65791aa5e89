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

//! Local port allocation for owned host entries.

use std::collections::BTreeSet;

use crate::reconcile::error::ReconcileError;

/// Default base for tunnel port allocation.
pub const DEFAULT_BASE_PORT: u16 = 2222;

/// The set of ports claimed by owned entries, recomputed from the parsed
/// config each cycle. Allocation claims the returned port immediately, so
/// a cycle that creates many entries never hands out a duplicate.
#[derive(Debug, Clone, Default)]
pub struct PortSet {
    claimed: BTreeSet<u16>,
}

impl PortSet {
    pub fn new(claimed: BTreeSet<u16>) -> Self {
        Self { claimed }
    }

    /// Smallest port >= `base` not already claimed. The returned port is
    /// added to the set before returning.
    pub fn allocate(&mut self, base: u16) -> Result<u16, ReconcileError> {
        let mut candidate = base as u32;
        while candidate <= u16::MAX as u32 {
            let port = candidate as u16;
            if self.claimed.insert(port) {
                return Ok(port);
            }
            candidate += 1;
        }
        Err(ReconcileError::PortsExhausted { base })
    }

    pub fn contains(&self, port: u16) -> bool {
        self.claimed.contains(&port)
    }
}
