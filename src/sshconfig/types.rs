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

//! Data model for a parsed SSH client config.
//!
//! The model is deliberately lossless: every node owns the exact source
//! text it was parsed from (newlines included), and serialization is plain
//! concatenation. Anything the reconciler does not touch round-trips
//! byte-for-byte.

use std::collections::BTreeSet;
use std::path::Path;

use crate::sshconfig::pattern::matches_host_pattern;

/// A single `Key Value` directive inside a host block.
///
/// The key is stored lowercased for case-insensitive lookup; the value is
/// the remainder of the line with surrounding whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub key: String,
    pub value: String,
}

/// One `Host` block: its patterns, its parsed directives, and its exact
/// source text from the `Host` line through the last line before the next
/// `Host` line (trailing comments and blank lines included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostBlock {
    pub patterns: Vec<String>,
    pub directives: Vec<Directive>,
    pub text: String,
}

impl HostBlock {
    /// Look up the first directive with the given (lowercase) key.
    pub fn directive(&self, key: &str) -> Option<&str> {
        self.directives
            .iter()
            .find(|d| d.key == key)
            .map(|d| d.value.as_str())
    }

    /// The block's `Port` directive parsed as a TCP port, if present and
    /// numeric.
    pub fn port(&self) -> Option<u16> {
        self.directive("port").and_then(|v| v.parse().ok())
    }

    /// Whether any of the block's patterns matches the given host name.
    pub fn matches(&self, host: &str) -> bool {
        matches_host_pattern(host, &self.patterns)
    }
}

/// One node of the config file: either a host block or a run of text the
/// tool treats as opaque (comments, blank lines, and global directives
/// outside any block).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigNode {
    Host(HostBlock),
    Verbatim(String),
}

impl ConfigNode {
    fn text(&self) -> &str {
        match self {
            ConfigNode::Host(block) => &block.text,
            ConfigNode::Verbatim(text) => text,
        }
    }
}

/// An ordered, lossless view of a whole SSH config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManagedConfig {
    pub nodes: Vec<ConfigNode>,
}

impl ManagedConfig {
    /// Serialize back to text. For an unmodified config this is
    /// byte-identical to the parsed input.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            out.push_str(node.text());
        }
        out
    }

    /// Iterate over the host blocks in file order.
    pub fn host_blocks(&self) -> impl Iterator<Item = &HostBlock> {
        self.nodes.iter().filter_map(|node| match node {
            ConfigNode::Host(block) => Some(block),
            ConfigNode::Verbatim(_) => None,
        })
    }

    /// Host values (first pattern) of every block owned by the managed key.
    pub fn owned_hosts(&self, key_path: &Path) -> Vec<String> {
        self.host_blocks()
            .filter(|b| crate::reconcile::ownership::is_owned(b, key_path))
            .filter_map(|b| b.patterns.first().cloned())
            .collect()
    }

    /// Ports claimed by owned blocks. Non-numeric `Port` values are not
    /// ports and do not constrain allocation.
    pub fn owned_ports(&self, key_path: &Path) -> BTreeSet<u16> {
        self.host_blocks()
            .filter(|b| crate::reconcile::ownership::is_owned(b, key_path))
            .filter_map(|b| b.port())
            .collect()
    }

    /// `(host, port)` for every owned block, in file order.
    pub fn owned_entries(&self, key_path: &Path) -> Vec<(String, Option<u16>)> {
        self.host_blocks()
            .filter(|b| crate::reconcile::ownership::is_owned(b, key_path))
            .filter_map(|b| b.patterns.first().map(|h| (h.clone(), b.port())))
            .collect()
    }

    /// Resolve the configured port for a host name: the `Port` directive of
    /// the first block whose patterns match it.
    pub fn port_for(&self, host: &str) -> Option<u16> {
        self.host_blocks()
            .find(|b| b.matches(host))
            .and_then(|b| b.port())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(patterns: &[&str], directives: &[(&str, &str)], text: &str) -> HostBlock {
        HostBlock {
            patterns: patterns.iter().map(|s| s.to_string()).collect(),
            directives: directives
                .iter()
                .map(|(k, v)| Directive {
                    key: k.to_string(),
                    value: v.to_string(),
                })
                .collect(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_directive_lookup() {
        let b = block(
            &["ws-abc"],
            &[("hostname", "0.0.0.0"), ("port", "2222")],
            "Host ws-abc\n",
        );
        assert_eq!(b.directive("hostname"), Some("0.0.0.0"));
        assert_eq!(b.directive("user"), None);
        assert_eq!(b.port(), Some(2222));
    }

    #[test]
    fn test_port_non_numeric() {
        let b = block(&["ws-abc"], &[("port", "not-a-port")], "Host ws-abc\n");
        assert_eq!(b.port(), None);
    }

    #[test]
    fn test_port_for_uses_pattern_match() {
        let config = ManagedConfig {
            nodes: vec![
                ConfigNode::Verbatim("# comment\n".to_string()),
                ConfigNode::Host(block(
                    &["ws-*.example.com"],
                    &[("port", "2223")],
                    "Host ws-*.example.com\n    Port 2223\n",
                )),
            ],
        };
        assert_eq!(config.port_for("ws-abc.example.com"), Some(2223));
        assert_eq!(config.port_for("db.example.com"), None);
    }

    #[test]
    fn test_serialize_concatenates_node_text() {
        let config = ManagedConfig {
            nodes: vec![
                ConfigNode::Verbatim("# head\n\n".to_string()),
                ConfigNode::Host(block(&["a"], &[], "Host a\n    Port 22\n")),
                ConfigNode::Verbatim("# tail".to_string()),
            ],
        };
        assert_eq!(config.serialize(), "# head\n\nHost a\n    Port 22\n# tail");
    }
}
