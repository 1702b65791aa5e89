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

//! Rendering of managed host entries.
//!
//! Every owned entry has the same fixed shape: the workspace DNS name as
//! the `Host` value, a loopback tunnel address, the managed identity file,
//! the fixed service user, and an allocated local port.

use std::path::Path;

use thiserror::Error;

/// Tunnel endpoint the SSH client connects to; the actual workspace is
/// reached through a local forward on the allocated port.
pub const TUNNEL_ADDRESS: &str = "0.0.0.0";

/// Remote user every managed entry connects as.
pub const SERVICE_USER: &str = "devssh";

const MAX_HOST_NAME_LENGTH: usize = 253;

/// A workspace name that cannot become a valid `Host` entry.
///
/// Recoverable: the reconciler skips the workspace and reports it, so one
/// bad name never blocks the rest of the cycle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("workspace name is empty")]
    EmptyName,

    #[error("workspace name '{name}' exceeds {limit} bytes")]
    NameTooLong { name: String, limit: usize },

    #[error("workspace name '{name}' contains invalid character {ch:?}")]
    InvalidCharacter { name: String, ch: char },

    #[error("workspace name '{name}' has an empty or hyphen-edged label")]
    MalformedLabel { name: String },
}

/// Validate a workspace DNS name for use as a `Host` value.
///
/// Accepts ASCII alphanumerics, `-` and `.`; rejects anything that could
/// change the config grammar (whitespace, `=`, `#`) or pattern semantics
/// (`*`, `?`, `!`).
pub fn validate_host_name(name: &str) -> Result<(), RenderError> {
    if name.is_empty() {
        return Err(RenderError::EmptyName);
    }
    if name.len() > MAX_HOST_NAME_LENGTH {
        return Err(RenderError::NameTooLong {
            name: name.to_string(),
            limit: MAX_HOST_NAME_LENGTH,
        });
    }
    if let Some(ch) = name
        .chars()
        .find(|&c| !(c.is_ascii_alphanumeric() || c == '-' || c == '.'))
    {
        return Err(RenderError::InvalidCharacter {
            name: name.to_string(),
            ch,
        });
    }
    for label in name.split('.') {
        if label.is_empty() || label.starts_with('-') || label.ends_with('-') {
            return Err(RenderError::MalformedLabel {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

/// Render the host block for a workspace, without any leading separator.
/// The output ends with a newline and re-parses to an identical block.
pub fn render_entry(name: &str, port: u16, key_path: &Path) -> Result<String, RenderError> {
    validate_host_name(name)?;
    Ok(format_entry(name, port, key_path))
}

/// The fixed-shape block for an already-validated name.
pub(crate) fn format_entry(name: &str, port: u16, key_path: &Path) -> String {
    format!(
        "Host {name}\n    Hostname {TUNNEL_ADDRESS}\n    IdentityFile {key}\n    User {SERVICE_USER}\n    Port {port}\n",
        key = key_path.display(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::ownership::is_owned;
    use crate::sshconfig::parse;
    use std::path::PathBuf;

    fn key_path() -> PathBuf {
        PathBuf::from("/home/u/.devssh/devssh.pem")
    }

    #[test]
    fn test_rendered_entry_shape() {
        let entry = render_entry("ws-abc", 2222, &key_path()).unwrap();
        assert_eq!(
            entry,
            "Host ws-abc\n    Hostname 0.0.0.0\n    IdentityFile /home/u/.devssh/devssh.pem\n    User devssh\n    Port 2222\n"
        );
    }

    #[test]
    fn test_rendered_entry_parses_as_owned() {
        let entry = render_entry("ws-abc.example.com", 2223, &key_path()).unwrap();
        let config = parse(&entry).unwrap();
        let block = config.host_blocks().next().unwrap();
        assert!(is_owned(block, &key_path()));
        assert_eq!(block.port(), Some(2223));
        assert_eq!(config.serialize(), entry);
    }

    #[test]
    fn test_valid_names() {
        assert!(validate_host_name("ws-abc").is_ok());
        assert!(validate_host_name("ws-abc-123.devspace.example.com").is_ok());
        assert!(validate_host_name("a").is_ok());
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(validate_host_name(""), Err(RenderError::EmptyName));
    }

    #[test]
    fn test_invalid_characters() {
        for bad in ["ws abc", "ws*", "ws?", "!ws", "ws#1", "ws=1", "ws_abc"] {
            assert!(
                matches!(
                    validate_host_name(bad),
                    Err(RenderError::InvalidCharacter { .. })
                ),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_malformed_labels() {
        for bad in ["ws..abc", "-ws", "ws-", "ws.-abc", ".ws"] {
            assert!(
                matches!(
                    validate_host_name(bad),
                    Err(RenderError::MalformedLabel { .. })
                ),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_name_too_long() {
        let name = "a".repeat(254);
        assert!(matches!(
            validate_host_name(&name),
            Err(RenderError::NameTooLong { limit: 253, .. })
        ));
    }
}
