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

//! OpenSSH-style host pattern matching (`*`, `?`, and `!` negation).
//!
//! The pruner keeps an owned block only if one of its patterns matches an
//! active workspace name, with the same semantics `ssh` itself applies to
//! `Host` lines.

/// Check if a host name matches any of a block's patterns.
///
/// A negated pattern (`!`) that matches excludes the host even if another
/// pattern matched, per ssh_config(5).
pub fn matches_host_pattern(host: &str, patterns: &[String]) -> bool {
    let mut matched = false;
    for pattern in patterns {
        if let Some(negated) = pattern.strip_prefix('!') {
            if matches_pattern(host, negated) {
                return false;
            }
        } else if matches_pattern(host, pattern) {
            matched = true;
        }
    }
    matched
}

/// Check if a host name matches a single pattern (wildcards allowed).
pub fn matches_pattern(host: &str, pattern: &str) -> bool {
    if pattern.contains('*') || pattern.contains('?') {
        wildcard_match(host, pattern)
    } else {
        host.eq_ignore_ascii_case(pattern)
    }
}

fn wildcard_match(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    match_recursive(&text, &pattern, 0, 0)
}

fn match_recursive(text: &[char], pattern: &[char], ti: usize, pi: usize) -> bool {
    if pi >= pattern.len() {
        return ti >= text.len();
    }
    if ti >= text.len() {
        return pattern[pi..].iter().all(|&c| c == '*');
    }

    match pattern[pi] {
        '*' => {
            // Zero characters, then one-or-more.
            match_recursive(text, pattern, ti, pi + 1) || match_recursive(text, pattern, ti + 1, pi)
        }
        '?' => match_recursive(text, pattern, ti + 1, pi + 1),
        c => text[ti].eq_ignore_ascii_case(&c) && match_recursive(text, pattern, ti + 1, pi + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_case_insensitive() {
        assert!(matches_pattern("ws-abc", "ws-abc"));
        assert!(matches_pattern("WS-ABC", "ws-abc"));
        assert!(!matches_pattern("ws-abcd", "ws-abc"));
    }

    #[test]
    fn test_wildcards() {
        assert!(matches_pattern("ws-1.example.com", "ws-*.example.com"));
        assert!(matches_pattern("anything", "*"));
        assert!(matches_pattern("ws-1", "ws-?"));
        assert!(!matches_pattern("ws-12", "ws-?"));
        assert!(!matches_pattern("db-1.example.com", "ws-*.example.com"));
    }

    #[test]
    fn test_negation_excludes() {
        let patterns = vec!["ws-*".to_string(), "!ws-old".to_string()];
        assert!(matches_host_pattern("ws-abc", &patterns));
        assert!(!matches_host_pattern("ws-old", &patterns));
    }

    #[test]
    fn test_no_positive_match() {
        let patterns = vec!["!db-*".to_string()];
        assert!(!matches_host_pattern("ws-abc", &patterns));
    }
}
