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

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;

use devssh::{
    cli::{Cli, Commands},
    paths::ManagedPaths,
    reconcile::Reconciler,
    sshconfig,
    utils::{fs::OsFs, init_logging},
    workspace::{FileCredentialStore, FileWorkspaceDirectory},
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut paths = ManagedPaths::resolve()?;
    if let Some(ssh_config) = &cli.ssh_config {
        paths.ssh_config = devssh::paths::expand_tilde(ssh_config);
    }

    match cli.command {
        Commands::Sync {
            workspaces,
            key,
            base_port,
        } => sync(paths, &workspaces, &key, base_port),
        Commands::List => list(paths),
        Commands::Port { host } => port(paths, &host),
    }
}

fn sync(
    paths: ManagedPaths,
    workspaces: &std::path::Path,
    key: &std::path::Path,
    base_port: u16,
) -> Result<()> {
    let directory = FileWorkspaceDirectory::new(workspaces);
    let credentials = FileCredentialStore::new(key);
    let fs = OsFs;

    let reconciler =
        Reconciler::new(&directory, &credentials, &fs, paths).with_base_port(base_port);
    let report = reconciler.reconcile()?;

    println!(
        "Backed up SSH config to {}",
        report.backup_path.display().to_string().cyan()
    );
    for (host, port) in &report.added {
        println!("  {} {host} (port {port})", "+".green());
    }
    for host in &report.pruned {
        println!("  {} {host}", "-".red());
    }
    for (name, err) in &report.skipped {
        println!("  {} {name}: {err}", "!".yellow());
    }
    if report.added.is_empty() && report.pruned.is_empty() && report.skipped.is_empty() {
        println!("Already in sync.");
    }
    Ok(())
}

fn list(paths: ManagedPaths) -> Result<()> {
    let config = load_config(&paths)?;
    let entries = config.owned_entries(&paths.private_key);
    if entries.is_empty() {
        println!("No managed entries in {}", paths.ssh_config.display());
        return Ok(());
    }
    for (host, port) in entries {
        match port {
            Some(port) => println!("{}  port {port}", host.bold()),
            None => println!("{}  (no port)", host.bold()),
        }
    }
    Ok(())
}

fn port(paths: ManagedPaths, host: &str) -> Result<()> {
    let config = load_config(&paths)?;
    let port = config
        .port_for(host)
        .with_context(|| format!("No entry for '{host}' in {}", paths.ssh_config.display()))?;
    println!("{port}");
    Ok(())
}

fn load_config(paths: &ManagedPaths) -> Result<devssh::ManagedConfig> {
    let text = std::fs::read_to_string(&paths.ssh_config)
        .with_context(|| format!("Failed to read SSH config at {}", paths.ssh_config.display()))?;
    sshconfig::parse(&text)
        .with_context(|| format!("Failed to parse SSH config at {}", paths.ssh_config.display()))
}
