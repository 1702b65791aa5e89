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

//! Lossless parser for the SSH client config grammar.
//!
//! A `Host` line opens a block; every following line up to the next `Host`
//! line belongs to that block, trailing comments and blank lines included.
//! Text outside any block (leading comments, global directives) becomes
//! verbatim nodes. Each node keeps its exact source slice, so
//! `serialize(parse(x)) == x` for every input that parses.

use crate::sshconfig::error::ParseError;
use crate::sshconfig::types::{ConfigNode, Directive, HostBlock, ManagedConfig};

const MAX_LINE_LENGTH: usize = 8192;

/// Parse SSH config text into an ordered node sequence.
pub fn parse(content: &str) -> Result<ManagedConfig, ParseError> {
    let mut nodes: Vec<ConfigNode> = Vec::new();
    let mut verbatim = String::new();
    let mut current: Option<HostBlock> = None;
    let mut line_number = 0;

    // split_inclusive keeps each line's newline, so node text concatenates
    // back to the exact input, trailing-newline state included.
    for raw in content.split_inclusive('\n') {
        line_number += 1;
        let line = raw.trim_end_matches(['\n', '\r']);

        if line.len() > MAX_LINE_LENGTH {
            return Err(ParseError::LineTooLong {
                line: line_number,
                limit: MAX_LINE_LENGTH,
            });
        }

        let trimmed = line.trim();

        if is_host_line(trimmed) {
            if let Some(block) = current.take() {
                nodes.push(ConfigNode::Host(block));
            }
            if !verbatim.is_empty() {
                nodes.push(ConfigNode::Verbatim(std::mem::take(&mut verbatim)));
            }

            let patterns = parse_host_patterns(trimmed, line_number)?;
            current = Some(HostBlock {
                patterns,
                directives: Vec::new(),
                text: raw.to_string(),
            });
            continue;
        }

        match current.as_mut() {
            Some(block) => {
                block.text.push_str(raw);
                if !trimmed.is_empty() && !trimmed.starts_with('#') {
                    block.directives.push(parse_directive(trimmed, line_number)?);
                }
            }
            // Leading comments, blank lines, and global directives are
            // opaque to the reconciler and preserved as-is.
            None => verbatim.push_str(raw),
        }
    }

    if let Some(block) = current.take() {
        nodes.push(ConfigNode::Host(block));
    }
    if !verbatim.is_empty() {
        nodes.push(ConfigNode::Verbatim(verbatim));
    }

    Ok(ManagedConfig { nodes })
}

/// Whether a trimmed line is a `Host` directive (not `Hostname` etc.).
/// Supports both `Host pattern` and `Host=pattern` syntax.
fn is_host_line(trimmed: &str) -> bool {
    let lower = trimmed.to_lowercase();
    lower == "host"
        || lower.starts_with("host ")
        || lower.starts_with("host\t")
        || lower.starts_with("host=")
}

fn parse_host_patterns(trimmed: &str, line: usize) -> Result<Vec<String>, ParseError> {
    let rest = if let Some(eq) = trimmed.find('=') {
        &trimmed[eq + 1..]
    } else {
        &trimmed[4..] // past "host"
    };

    let patterns: Vec<String> = rest.split_whitespace().map(|s| s.to_string()).collect();
    if patterns.is_empty() {
        return Err(ParseError::EmptyHostPatterns { line });
    }
    Ok(patterns)
}

fn parse_directive(trimmed: &str, line: usize) -> Result<Directive, ParseError> {
    // Both `Key Value` and `Key=Value` appear in the wild. Equals syntax
    // only applies when the text before '=' is a single keyword, so values
    // like `SetEnv FOO=bar` are not mis-split.
    let eq = trimmed
        .find('=')
        .filter(|&pos| !trimmed[..pos].trim().contains(char::is_whitespace));
    let (key, value) = if let Some(pos) = eq {
        (trimmed[..pos].trim(), trimmed[pos + 1..].trim())
    } else {
        match trimmed.split_once(char::is_whitespace) {
            Some((key, value)) => (key, value.trim()),
            None => (trimmed, ""),
        }
    };

    if key.is_empty() || value.is_empty() {
        return Err(ParseError::MissingValue {
            line,
            text: trimmed.to_string(),
        });
    }

    Ok(Directive {
        key: key.to_lowercase(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# global comment
Host github.com
    Hostname github.com
    User git

Host ws-abc
    Hostname 0.0.0.0
    IdentityFile /home/u/.devssh/devssh.pem
    User devssh
    Port 2222
";

    #[test]
    fn test_round_trip_is_exact() {
        let config = parse(SAMPLE).unwrap();
        assert_eq!(config.serialize(), SAMPLE);
    }

    #[test]
    fn test_round_trip_without_trailing_newline() {
        let text = "Host a\n    Port 22";
        let config = parse(text).unwrap();
        assert_eq!(config.serialize(), text);
    }

    #[test]
    fn test_round_trip_empty() {
        let config = parse("").unwrap();
        assert!(config.nodes.is_empty());
        assert_eq!(config.serialize(), "");
    }

    #[test]
    fn test_blocks_and_verbatim_split() {
        let config = parse(SAMPLE).unwrap();
        assert_eq!(config.nodes.len(), 3);
        assert!(matches!(config.nodes[0], ConfigNode::Verbatim(_)));
        assert!(matches!(config.nodes[1], ConfigNode::Host(_)));
        assert!(matches!(config.nodes[2], ConfigNode::Host(_)));

        let blocks: Vec<_> = config.host_blocks().collect();
        assert_eq!(blocks[0].patterns, vec!["github.com"]);
        assert_eq!(blocks[1].patterns, vec!["ws-abc"]);
        assert_eq!(
            blocks[1].directive("identityfile"),
            Some("/home/u/.devssh/devssh.pem")
        );
        assert_eq!(blocks[1].port(), Some(2222));
    }

    #[test]
    fn test_trailing_blank_lines_attach_to_block() {
        let config = parse(SAMPLE).unwrap();
        let blocks: Vec<_> = config.host_blocks().collect();
        assert!(blocks[0].text.ends_with("User git\n\n"));
    }

    #[test]
    fn test_hostname_is_not_a_host_line() {
        let config = parse("Host a\n    Hostname b\n").unwrap();
        assert_eq!(config.host_blocks().count(), 1);
    }

    #[test]
    fn test_equals_syntax() {
        let config = parse("Host=a\n    Port=2222\n").unwrap();
        let blocks: Vec<_> = config.host_blocks().collect();
        assert_eq!(blocks[0].patterns, vec!["a"]);
        assert_eq!(blocks[0].port(), Some(2222));
    }

    #[test]
    fn test_multiple_patterns() {
        let config = parse("Host a b c\n").unwrap();
        let blocks: Vec<_> = config.host_blocks().collect();
        assert_eq!(blocks[0].patterns, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_global_directive_preserved_verbatim() {
        let text = "StrictHostKeyChecking no\n\nHost a\n    Port 22\n";
        let config = parse(text).unwrap();
        assert!(matches!(&config.nodes[0], ConfigNode::Verbatim(v) if v.starts_with("Strict")));
        assert_eq!(config.serialize(), text);
    }

    #[test]
    fn test_bare_host_is_an_error() {
        let err = parse("Host\n").unwrap_err();
        assert_eq!(err, ParseError::EmptyHostPatterns { line: 1 });
    }

    #[test]
    fn test_directive_without_value_is_an_error() {
        let err = parse("Host a\n    IdentityFile\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingValue {
                line: 2,
                text: "IdentityFile".to_string(),
            }
        );
    }

    #[test]
    fn test_comments_inside_block_are_kept_but_not_directives() {
        let text = "Host a\n    # pinned\n    Port 22\n";
        let config = parse(text).unwrap();
        let blocks: Vec<_> = config.host_blocks().collect();
        assert_eq!(blocks[0].directives.len(), 1);
        assert_eq!(config.serialize(), text);
    }

    #[test]
    fn test_equals_inside_value_is_not_equals_syntax() {
        let config = parse("Host a\n    SetEnv FOO=bar\n").unwrap();
        let blocks: Vec<_> = config.host_blocks().collect();
        assert_eq!(blocks[0].directive("setenv"), Some("FOO=bar"));
    }

    #[test]
    fn test_crlf_round_trip() {
        let text = "Host a\r\n    Port 22\r\n";
        let config = parse(text).unwrap();
        assert_eq!(config.serialize(), text);
        assert_eq!(config.host_blocks().next().unwrap().port(), Some(22));
    }
}
