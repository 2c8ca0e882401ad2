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

use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;

#[derive(Debug, PartialEq, Error)]
#[error("failed to compile pattern `{pattern}`: {source}")]
pub struct InvalidRegexError {
    pattern: String,
    source: regex::Error,
}

/// Memoizes compiled regexes keyed by their pattern source. Metadata ships
/// thousands of small patterns and the same ones come up on every parse and
/// format call, so each is compiled at most once per process.
pub(crate) struct RegexCache {
    cache: DashMap<String, Arc<regex::Regex>>,
}

impl RegexCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: DashMap::with_capacity(capacity),
        }
    }

    pub fn get_regex(&self, pattern: &str) -> Result<Arc<regex::Regex>, InvalidRegexError> {
        if let Some(regex) = self.cache.get(pattern) {
            return Ok(regex.value().clone());
        }
        let entry = self
            .cache
            .entry(pattern.to_string())
            .or_try_insert_with(|| regex::Regex::new(pattern).map(Arc::new))
            .map_err(|source| InvalidRegexError {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(entry.value().clone())
    }
}
