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

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "devssh",
    version,
    about = "Keep your SSH client config in sync with your active remote dev workspaces",
    long_about = "devssh reconciles ~/.ssh/config with the set of currently active remote dev\nworkspaces: every active workspace gets exactly one managed Host entry with a\ndedicated local tunnel port, stale managed entries are pruned, and entries the\ntool does not own are preserved byte-for-byte. A backup of the config is taken\nbefore every rewrite.",
    after_help = "EXAMPLES:\n  Sync from a workspace manifest:  devssh sync -w workspaces.yaml -k key.pem\n  List managed entries:            devssh list\n  Show a workspace's tunnel port:  devssh port ws-api.example.com"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        short = 'v',
        long,
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase verbosity (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    #[arg(
        long,
        global = true,
        help = "SSH config file to manage [default: ~/.ssh/config]"
    )]
    pub ssh_config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Run one reconciliation cycle",
        long_about = "Installs the workspace private key, adds a managed Host entry for every\nactive workspace that lacks one, prunes managed entries whose workspace is\ngone, and leaves everything else in the config untouched. The pre-cycle file\nis backed up under ~/.devssh/backups/ before any rewrite."
    )]
    Sync {
        #[arg(
            short = 'w',
            long,
            help = "Workspace manifest (YAML) listing workspaces and their status"
        )]
        workspaces: PathBuf,

        #[arg(short = 'k', long, help = "Private key file to install as the workspace identity")]
        key: PathBuf,

        #[arg(
            long,
            default_value = "2222",
            help = "Lowest local port to allocate for tunnel entries"
        )]
        base_port: u16,
    },

    #[command(about = "List managed Host entries in the SSH config")]
    List,

    #[command(about = "Print the configured tunnel port for a workspace host")]
    Port {
        #[arg(help = "Workspace host name (the Host value of its entry)")]
        host: String,
    },
}
