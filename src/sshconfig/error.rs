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

//! Error types for SSH config decoding

use thiserror::Error;

/// Errors that can occur while decoding an SSH client config file.
///
/// Decoding is all-or-nothing: a single malformed line aborts the whole
/// parse so the reconciler never rewrites a file it did not fully
/// understand.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// `Host` directive with no pattern (e.g. a bare `Host` line)
    #[error("Host directive without a pattern at line {line}")]
    EmptyHostPatterns { line: usize },

    /// A directive inside a host block with a keyword but no value
    #[error("directive '{text}' at line {line} has no value")]
    MissingValue { line: usize, text: String },

    /// Line exceeds the maximum accepted length
    #[error("line {line} exceeds maximum length of {limit} bytes")]
    LineTooLong { line: usize, limit: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::EmptyHostPatterns { line: 4 };
        assert_eq!(err.to_string(), "Host directive without a pattern at line 4");

        let err = ParseError::MissingValue {
            line: 7,
            text: "IdentityFile".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "directive 'IdentityFile' at line 7 has no value"
        );
    }
}
