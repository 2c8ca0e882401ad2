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

use crate::metadata::NumberDescriptor;

/// Seam isolating how national numbers are matched against descriptors so
/// the underlying implementation can be swapped.
pub(crate) trait MatcherApi: Send + Sync {
    /// Whether the given national number (decimal digits only) belongs to
    /// the category the descriptor defines.
    fn match_national_number(&self, number: &str, number_desc: &NumberDescriptor) -> bool;
}

/// Matcher over the descriptor's precompiled patterns: a number belongs to
/// a category when it matches both the possible-number pattern and the
/// national-number pattern entirely. Absent patterns never match, so
/// categories a region does not have reject everything.
pub(crate) struct RegexBasedMatcher;

impl MatcherApi for RegexBasedMatcher {
    fn match_national_number(&self, number: &str, number_desc: &NumberDescriptor) -> bool {
        number_desc.matches_possible_number(number) && number_desc.matches_national_number(number)
    }
}
