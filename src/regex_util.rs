// Copyright (C) 2025 The Telnum Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use regex::{Captures, Regex};

/// Matching helpers the rest of the crate uses instead of raw
/// `Regex::find`/`Regex::captures` calls. Metadata patterns are written
/// without anchors, so "matches the whole string" and "matches at the
/// start" have to be checked on the match span.
pub(crate) trait RegexExt {
    /// True when the pattern matches the entire input.
    fn full_match(&self, s: &str) -> bool;

    /// True when the pattern matches a prefix of the input.
    fn match_start(&self, s: &str) -> bool;

    /// When the pattern matches a prefix of the input, returns the rest of
    /// the input after that match.
    fn consume_start<'a>(&self, s: &'a str) -> Option<&'a str>;

    /// Like [`RegexExt::consume_start`], additionally handing back the
    /// capture groups of the consumed prefix.
    fn consume_start_captures<'a>(&self, s: &'a str) -> Option<(&'a str, Captures<'a>)>;
}

impl RegexExt for Regex {
    fn full_match(&self, s: &str) -> bool {
        self.find(s)
            .is_some_and(|m| m.start() == 0 && m.end() == s.len())
    }

    fn match_start(&self, s: &str) -> bool {
        self.find(s).is_some_and(|m| m.start() == 0)
    }

    fn consume_start<'a>(&self, s: &'a str) -> Option<&'a str> {
        let m = self.find(s)?;
        if m.start() != 0 {
            return None;
        }
        Some(&s[m.end()..])
    }

    fn consume_start_captures<'a>(&self, s: &'a str) -> Option<(&'a str, Captures<'a>)> {
        let captures = self.captures(s)?;
        let whole = captures.get(0)?;
        if whole.start() != 0 {
            return None;
        }
        Some((&s[whole.end()..], captures))
    }
}

#[cfg(test)]
mod tests {
    use super::RegexExt;
    use regex::Regex;

    #[test]
    fn full_match_requires_whole_string() {
        let re = Regex::new(r"\d{3}").unwrap();
        assert!(re.full_match("650"));
        assert!(!re.full_match("6502"));
        assert!(!re.full_match("x650"));
    }

    #[test]
    fn consume_start_returns_tail() {
        let re = Regex::new("00(?:11)?").unwrap();
        assert_eq!(re.consume_start("0011 54 9"), Some(" 54 9"));
        assert_eq!(re.consume_start("9 0011"), None);
    }
}
