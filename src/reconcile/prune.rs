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

//! Pruning of owned entries for workspaces that are no longer active.

use std::path::Path;

use crate::reconcile::ownership::is_owned;
use crate::sshconfig::{ConfigNode, ManagedConfig};

/// Drop owned blocks whose patterns match no active workspace name.
///
/// Pure function over the node sequence: verbatim nodes and foreign blocks
/// are kept unconditionally, surviving nodes keep their relative order.
/// Returns the pruned config and the `Host` values that were removed.
pub fn prune(
    config: ManagedConfig,
    active_names: &[String],
    key_path: &Path,
) -> (ManagedConfig, Vec<String>) {
    let mut pruned = Vec::new();
    let nodes = config
        .nodes
        .into_iter()
        .filter(|node| match node {
            ConfigNode::Verbatim(_) => true,
            ConfigNode::Host(block) => {
                if !is_owned(block, key_path) {
                    return true;
                }
                let keep = active_names.iter().any(|name| block.matches(name));
                if !keep {
                    if let Some(host) = block.patterns.first() {
                        pruned.push(host.clone());
                    }
                }
                keep
            }
        })
        .collect();

    (ManagedConfig { nodes }, pruned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sshconfig::parse;
    use std::path::PathBuf;

    const KEY: &str = "/home/u/.devssh/devssh.pem";

    fn owned(host: &str, port: u16) -> String {
        format!("Host {host}\n    Hostname 0.0.0.0\n    IdentityFile {KEY}\n    User devssh\n    Port {port}\n")
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_inactive_owned_block_is_dropped() {
        let text = format!("{}{}", owned("ws-abc", 2222), owned("ws-old", 2223));
        let config = parse(&text).unwrap();
        let (pruned, removed) = prune(config, &names(&["ws-abc"]), &PathBuf::from(KEY));

        assert_eq!(removed, vec!["ws-old"]);
        assert_eq!(pruned.serialize(), owned("ws-abc", 2222));
    }

    #[test]
    fn test_foreign_blocks_survive_unconditionally() {
        let text = format!(
            "# personal hosts\nHost github.com\n    User git\n\n{}",
            owned("ws-old", 2222)
        );
        let config = parse(&text).unwrap();
        let (pruned, removed) = prune(config, &[], &PathBuf::from(KEY));

        assert_eq!(removed, vec!["ws-old"]);
        assert_eq!(
            pruned.serialize(),
            "# personal hosts\nHost github.com\n    User git\n\n"
        );
    }

    #[test]
    fn test_order_preserved() {
        let text = format!(
            "Host a\n    User x\n{}Host b\n    User y\n{}",
            owned("ws-1", 2222),
            owned("ws-2", 2223)
        );
        let config = parse(&text).unwrap();
        let (pruned, _) = prune(config, &names(&["ws-1", "ws-2"]), &PathBuf::from(KEY));
        assert_eq!(pruned.serialize(), text);
    }

    #[test]
    fn test_pattern_match_keeps_block() {
        let text = format!("Host ws-*\n    IdentityFile {KEY}\n    Port 2222\n");
        let config = parse(&text).unwrap();
        let (pruned, removed) = prune(config, &names(&["ws-abc"]), &PathBuf::from(KEY));
        assert!(removed.is_empty());
        assert_eq!(pruned.serialize(), text);
    }

    #[test]
    fn test_empty_active_set_drops_all_owned() {
        let text = format!("{}{}", owned("ws-1", 2222), owned("ws-2", 2223));
        let config = parse(&text).unwrap();
        let (pruned, removed) = prune(config, &[], &PathBuf::from(KEY));
        assert_eq!(removed, vec!["ws-1", "ws-2"]);
        assert_eq!(pruned.serialize(), "");
    }
}
