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

use std::collections::HashMap;

use regex::Regex;

use super::constants::{
    MIN_LENGTH_FOR_NSN, PLUS_CHARS, RFC3966_EXTN_PREFIX, SECOND_NUMBER_START,
    SINGLE_INTERNATIONAL_PREFIX, STAR_SIGN, VALID_ALPHA, VALID_ALPHA_INCL_UPPERCASE, VALID_DIGITS,
    VALID_PUNCTUATION,
};
use crate::regexp_cache::RegexCache;

/// The precompiled patterns and normalization tables everything else runs
/// on. Built once per [`crate::PhoneNumberUtil`]; immutable afterwards and
/// safe to share across threads.
pub(crate) struct PhoneNumberRegExps {
    /// Cache for the per-region patterns that arrive via metadata and are
    /// only known at runtime.
    pub regexp_cache: RegexCache,

    /// Digit variants (fullwidth, Arabic-Indic, Eastern-Arabic) and ASCII
    /// digits, each mapped to its ASCII value.
    pub digit_mappings: HashMap<char, char>,

    /// The digit table combined with the ITU E.161 keypad letters, for
    /// normalizing vanity numbers.
    pub alpha_phone_mappings: HashMap<char, char>,

    /// A character that may begin a phone number: a digit or a plus sign.
    /// Everything before the first such character carries no information.
    pub valid_start_char_pattern: Regex,

    /// Trailing run of characters that cannot be part of a number. `#` is
    /// retained since it may terminate an extension.
    pub unwanted_end_char_pattern: Regex,

    /// Marker of a second number glued onto the first (`.../x2303`).
    pub second_number_start_pattern: Regex,

    /// One or more plus characters (ASCII or fullwidth).
    pub plus_chars_pattern: Regex,

    /// A run of valid punctuation, used as the separator unit when
    /// rewriting RFC 3966 output.
    pub separator_pattern: Regex,

    /// Captures a single (possibly non-ASCII) digit.
    pub capturing_digit_pattern: Regex,

    /// At least three letters: the input spells out part of the number.
    pub valid_alpha_phone_pattern: Regex,

    /// All the ways an extension can be written, anchored at the end of
    /// the number, case-insensitive.
    pub extn_pattern: Regex,

    /// Viability test: either a bare two-digit short number, or three or
    /// more digits with allowed punctuation and an optional extension tail.
    pub valid_phone_number_pattern: Regex,

    /// The `$1`-style slot a formatting rule is substituted into. `\d`
    /// rather than a literal `1` because some regions never use the first
    /// group in their patterns.
    pub first_group_capturing_pattern: Regex,

    /// The `$CC` placeholder of carrier-code formatting rules.
    pub carrier_code_pattern: Regex,

    /// An international prefix that is a plain digit sequence (with an
    /// optional wait-for-tone tilde) rather than a multi-choice regex.
    pub single_international_prefix: Regex,
}

impl PhoneNumberRegExps {
    pub fn new() -> Self {
        let extn_patterns_for_parsing = create_extn_pattern();
        // The long alternative comes first so that full numbers win over
        // the bare two-digit short form.
        let valid_phone_number = format!(
            "[{PLUS_CHARS}]*(?:[{VALID_PUNCTUATION}{STAR_SIGN}]*[{VALID_DIGITS}]){{3,}}\
             [{VALID_PUNCTUATION}{STAR_SIGN}{VALID_ALPHA}{VALID_DIGITS}]*"
        );
        Self {
            regexp_cache: RegexCache::with_capacity(128),
            digit_mappings: digit_mappings(),
            alpha_phone_mappings: alpha_phone_mappings(),
            valid_start_char_pattern: Regex::new(&format!("[{PLUS_CHARS}{VALID_DIGITS}]"))
                .unwrap(),
            unwanted_end_char_pattern: Regex::new(&format!(
                "[^{VALID_DIGITS}{VALID_ALPHA_INCL_UPPERCASE}#]+$"
            ))
            .unwrap(),
            second_number_start_pattern: Regex::new(SECOND_NUMBER_START).unwrap(),
            plus_chars_pattern: Regex::new(&format!("[{PLUS_CHARS}]+")).unwrap(),
            separator_pattern: Regex::new(&format!("[{VALID_PUNCTUATION}]+")).unwrap(),
            capturing_digit_pattern: Regex::new(&format!("([{VALID_DIGITS}])")).unwrap(),
            valid_alpha_phone_pattern: Regex::new("(?:.*?[A-Za-z]){3}.*").unwrap(),
            extn_pattern: Regex::new(&format!("(?i)(?:{extn_patterns_for_parsing})$")).unwrap(),
            valid_phone_number_pattern: Regex::new(&format!(
                "(?i)^[{VALID_DIGITS}]{{{MIN_LENGTH_FOR_NSN}}}$|\
                 ^(?:{valid_phone_number})(?:{extn_patterns_for_parsing})?$"
            ))
            .unwrap(),
            first_group_capturing_pattern: Regex::new(r"(\$\d)").unwrap(),
            carrier_code_pattern: Regex::new(r"\$CC").unwrap(),
            single_international_prefix: Regex::new(SINGLE_INTERNATIONAL_PREFIX).unwrap(),
        }
    }
}

/// Builds the pattern recognizing extensions at the end of a number:
/// the RFC 3966 `;ext=` form, explicitly or ambiguously labelled
/// extensions (`ext.`, `x`, `#`, `~`, `int`, `anexo`, fullwidth
/// spellings), and the American bare `- 1234#` style. Labelled forms
/// capture up to seven digits, the bare style only five to avoid
/// swallowing a second number.
fn create_extn_pattern() -> String {
    let capturing_extn_digits = format!("([{VALID_DIGITS}]{{1,7}})");
    format!(
        "{RFC3966_EXTN_PREFIX}{capturing_extn_digits}|\
         [ \u{00A0}\\t,]*\
         (?:e?xt(?:ensi(?:o\u{0301}?|\u{00F3}))?n?|\
         \u{FF45}?\u{FF58}\u{FF54}\u{FF4E}?|\
         [x\u{FF58}#\u{FF03}~\u{FF5E}]|int|\u{FF49}\u{FF4E}\u{FF54}|anexo)\
         [:\\.\u{FF0E}]?[ \u{00A0}\\t,-]*{capturing_extn_digits}#?|\
         [- ]+([{VALID_DIGITS}]{{1,5}})#"
    )
}

fn digit_mappings() -> HashMap<char, char> {
    let mut mappings = HashMap::with_capacity(40);
    for (index, ascii) in ('0'..='9').enumerate() {
        let offset = index as u32;
        mappings.insert(ascii, ascii);
        // Fullwidth, Arabic-Indic and Eastern-Arabic variants.
        mappings.insert(char::from_u32(0xFF10 + offset).unwrap(), ascii);
        mappings.insert(char::from_u32(0x0660 + offset).unwrap(), ascii);
        mappings.insert(char::from_u32(0x06F0 + offset).unwrap(), ascii);
    }
    mappings
}

fn alpha_phone_mappings() -> HashMap<char, char> {
    let mut mappings = digit_mappings();
    for (letters, digit) in [
        ("ABC", '2'),
        ("DEF", '3'),
        ("GHI", '4'),
        ("JKL", '5'),
        ("MNO", '6'),
        ("PQRS", '7'),
        ("TUV", '8'),
        ("WXYZ", '9'),
    ] {
        for letter in letters.chars() {
            mappings.insert(letter, digit);
        }
    }
    mappings
}

#[cfg(test)]
mod tests {
    use super::PhoneNumberRegExps;

    #[test]
    fn check_regexps_are_compiling() {
        PhoneNumberRegExps::new();
    }

    #[test]
    fn digit_variants_map_to_ascii() {
        let reg_exps = PhoneNumberRegExps::new();
        assert_eq!(Some(&'5'), reg_exps.digit_mappings.get(&'\u{06F5}'));
        assert_eq!(Some(&'0'), reg_exps.digit_mappings.get(&'\u{FF10}'));
        assert_eq!(Some(&'9'), reg_exps.alpha_phone_mappings.get(&'Y'));
        assert_eq!(None, reg_exps.digit_mappings.get(&'Y'));
    }
}
