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

use regex::Regex;

use crate::regex_util::RegexExt;

/// A descriptor pattern compiled once at metadata-load time. The original
/// pattern source is kept so descriptors can be compared textually (the
/// fixed-line/mobile shared-pattern flag).
#[derive(Debug, Clone)]
pub(crate) struct DescriptorPattern {
    source: String,
    regex: Regex,
}

impl DescriptorPattern {
    pub(crate) fn new(source: String, regex: Regex) -> Self {
        Self { source, regex }
    }

    pub(crate) fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn full_match(&self, s: &str) -> bool {
        self.regex.full_match(s)
    }

    pub(crate) fn match_start(&self, s: &str) -> bool {
        self.regex.match_start(s)
    }
}

/// Describes one category of numbers within a region: the pattern a valid
/// national number of that category matches, the looser pattern a possible
/// number matches, and an example. A `None` pattern never matches anything
/// (the document marks such categories `"NA"`, and malformed patterns are
/// coerced to the same state).
#[derive(Debug, Clone, Default)]
pub struct NumberDescriptor {
    pub(crate) national_number_pattern: Option<DescriptorPattern>,
    pub(crate) possible_number_pattern: Option<DescriptorPattern>,
    pub(crate) example_number: Option<String>,
}

impl NumberDescriptor {
    pub fn national_number_pattern(&self) -> Option<&str> {
        self.national_number_pattern.as_ref().map(|p| p.source())
    }

    pub fn possible_number_pattern(&self) -> Option<&str> {
        self.possible_number_pattern.as_ref().map(|p| p.source())
    }

    pub fn example_number(&self) -> Option<&str> {
        self.example_number.as_deref()
    }

    pub fn has_national_number_pattern(&self) -> bool {
        self.national_number_pattern.is_some()
    }

    /// True when the national number matches this descriptor's national
    /// pattern entirely.
    pub(crate) fn matches_national_number(&self, national_number: &str) -> bool {
        self.national_number_pattern
            .as_ref()
            .is_some_and(|pattern| pattern.full_match(national_number))
    }

    pub(crate) fn matches_possible_number(&self, national_number: &str) -> bool {
        self.possible_number_pattern
            .as_ref()
            .is_some_and(|pattern| pattern.full_match(national_number))
    }
}

/// One formatting pattern of a region: a regex over the national
/// significant number, a `$1..$n` replacement template, and the rules for
/// folding the national prefix or a carrier code into the first group.
#[derive(Debug, Clone, Default)]
pub struct NumberFormat {
    pub(crate) pattern: String,
    pub(crate) format: String,
    pub(crate) leading_digits_pattern: Vec<String>,
    pub(crate) national_prefix_formatting_rule: String,
    pub(crate) national_prefix_optional_when_formatting: bool,
    pub(crate) domestic_carrier_code_formatting_rule: String,
}

impl NumberFormat {
    pub fn new(pattern: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            format: format.into(),
            ..Self::default()
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    /// Ordered list of leading-digits patterns; the last entry is the most
    /// discriminating and is the one consulted when choosing a format.
    pub fn leading_digits_pattern(&self) -> &[String] {
        &self.leading_digits_pattern
    }

    pub fn national_prefix_formatting_rule(&self) -> &str {
        &self.national_prefix_formatting_rule
    }

    pub fn set_national_prefix_formatting_rule(&mut self, rule: String) {
        self.national_prefix_formatting_rule = rule;
    }

    pub fn clear_national_prefix_formatting_rule(&mut self) {
        self.national_prefix_formatting_rule.clear();
    }

    pub fn national_prefix_optional_when_formatting(&self) -> bool {
        self.national_prefix_optional_when_formatting
    }

    pub fn domestic_carrier_code_formatting_rule(&self) -> &str {
        &self.domestic_carrier_code_formatting_rule
    }
}

/// Dialing rules and number descriptors of one region, or of one
/// non-geographic entity (`id == "001"`). Built by the loader, owned by
/// its cache; parser, validator and formatter borrow entries per call.
#[derive(Debug, Clone, Default)]
pub struct RegionMetadata {
    pub(crate) id: String,
    pub(crate) country_code: i32,
    pub(crate) international_prefix: String,
    pub(crate) preferred_international_prefix: Option<String>,
    pub(crate) national_prefix: String,
    pub(crate) national_prefix_for_parsing: String,
    pub(crate) national_prefix_transform_rule: Option<String>,
    pub(crate) preferred_extn_prefix: Option<String>,
    pub(crate) leading_digits: Option<String>,
    pub(crate) main_country_for_code: bool,
    pub(crate) leading_zero_possible: bool,
    pub(crate) mobile_number_portable_region: bool,
    pub(crate) same_mobile_and_fixed_line_pattern: bool,
    pub(crate) general_desc: NumberDescriptor,
    pub(crate) fixed_line: NumberDescriptor,
    pub(crate) mobile: NumberDescriptor,
    pub(crate) toll_free: NumberDescriptor,
    pub(crate) premium_rate: NumberDescriptor,
    pub(crate) shared_cost: NumberDescriptor,
    pub(crate) voip: NumberDescriptor,
    pub(crate) personal_number: NumberDescriptor,
    pub(crate) pager: NumberDescriptor,
    pub(crate) uan: NumberDescriptor,
    pub(crate) voicemail: NumberDescriptor,
    pub(crate) no_international_dialling: NumberDescriptor,
    pub(crate) emergency: NumberDescriptor,
    pub(crate) standard_rate: NumberDescriptor,
    pub(crate) short_code: NumberDescriptor,
    pub(crate) carrier_specific: NumberDescriptor,
    pub(crate) number_formats: Vec<NumberFormat>,
    pub(crate) intl_number_formats: Vec<NumberFormat>,
}

impl RegionMetadata {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn country_code(&self) -> i32 {
        self.country_code
    }

    pub fn international_prefix(&self) -> &str {
        &self.international_prefix
    }

    pub fn preferred_international_prefix(&self) -> Option<&str> {
        self.preferred_international_prefix.as_deref()
    }

    pub fn has_national_prefix(&self) -> bool {
        !self.national_prefix.is_empty()
    }

    pub fn national_prefix(&self) -> &str {
        &self.national_prefix
    }

    /// Pattern stripped from the front of a national number while parsing.
    /// Falls back to the plain national prefix when the document does not
    /// declare a dedicated parsing pattern.
    pub fn national_prefix_for_parsing(&self) -> &str {
        &self.national_prefix_for_parsing
    }

    pub fn national_prefix_transform_rule(&self) -> Option<&str> {
        self.national_prefix_transform_rule.as_deref()
    }

    pub fn preferred_extn_prefix(&self) -> Option<&str> {
        self.preferred_extn_prefix.as_deref()
    }

    pub fn leading_digits(&self) -> Option<&str> {
        self.leading_digits.as_deref()
    }

    pub fn main_country_for_code(&self) -> bool {
        self.main_country_for_code
    }

    pub fn leading_zero_possible(&self) -> bool {
        self.leading_zero_possible
    }

    pub fn mobile_number_portable_region(&self) -> bool {
        self.mobile_number_portable_region
    }

    pub fn same_mobile_and_fixed_line_pattern(&self) -> bool {
        self.same_mobile_and_fixed_line_pattern
    }

    pub fn general_desc(&self) -> &NumberDescriptor {
        &self.general_desc
    }

    pub fn fixed_line(&self) -> &NumberDescriptor {
        &self.fixed_line
    }

    pub fn mobile(&self) -> &NumberDescriptor {
        &self.mobile
    }

    pub fn toll_free(&self) -> &NumberDescriptor {
        &self.toll_free
    }

    pub fn premium_rate(&self) -> &NumberDescriptor {
        &self.premium_rate
    }

    pub fn shared_cost(&self) -> &NumberDescriptor {
        &self.shared_cost
    }

    pub fn voip(&self) -> &NumberDescriptor {
        &self.voip
    }

    pub fn personal_number(&self) -> &NumberDescriptor {
        &self.personal_number
    }

    pub fn pager(&self) -> &NumberDescriptor {
        &self.pager
    }

    pub fn uan(&self) -> &NumberDescriptor {
        &self.uan
    }

    pub fn voicemail(&self) -> &NumberDescriptor {
        &self.voicemail
    }

    pub fn no_international_dialling(&self) -> &NumberDescriptor {
        &self.no_international_dialling
    }

    pub fn emergency(&self) -> &NumberDescriptor {
        &self.emergency
    }

    pub fn standard_rate(&self) -> &NumberDescriptor {
        &self.standard_rate
    }

    pub fn short_code(&self) -> &NumberDescriptor {
        &self.short_code
    }

    pub fn carrier_specific(&self) -> &NumberDescriptor {
        &self.carrier_specific
    }

    pub fn number_formats(&self) -> &[NumberFormat] {
        &self.number_formats
    }

    pub fn intl_number_formats(&self) -> &[NumberFormat] {
        &self.intl_number_formats
    }
}
