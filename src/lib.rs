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

pub mod cli;
pub mod paths;
pub mod reconcile;
pub mod sshconfig;
pub mod utils;
pub mod workspace;

pub use cli::Cli;
pub use paths::ManagedPaths;
pub use reconcile::{ReconcileReport, Reconciler};
pub use sshconfig::ManagedConfig;
pub use workspace::{CredentialStore, Workspace, WorkspaceDirectory};
