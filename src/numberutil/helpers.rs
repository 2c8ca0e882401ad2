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

use crate::metadata::{DescriptorPattern, NumberDescriptor, RegionMetadata};
use crate::phonenumber::PhoneNumber;

use super::constants::{PLUS_SIGN, RFC3966_PREFIX};
use super::enums::{PhoneNumberFormat, PhoneNumberType};

/// Rewrites a number by replacing every character found in the mapping
/// table with its value there. Lookups go through the uppercased character
/// so vanity letters match regardless of case. Unmapped characters are
/// stripped when `remove_non_matches` is set and kept verbatim otherwise.
pub(super) fn normalize_helper(
    normalization_replacements: &HashMap<char, char>,
    remove_non_matches: bool,
    number: &str,
) -> String {
    let mut normalized_number = String::with_capacity(number.len());
    for c in number.chars() {
        if let Some(replacement) = normalization_replacements.get(&c.to_ascii_uppercase()) {
            normalized_number.push(*replacement);
        } else if !remove_non_matches {
            normalized_number.push(c);
        }
        // Anything else is dropped.
    }
    normalized_number
}

/// Prepends the country calling code in the way the target presentation
/// demands. NATIONAL output carries no calling code and is left alone.
pub(super) fn prefix_number_with_country_calling_code(
    country_calling_code: i32,
    number_format: PhoneNumberFormat,
    formatted_number: &mut String,
) {
    let mut buffer = itoa::Buffer::new();
    let country_calling_code_str = buffer.format(country_calling_code);
    match number_format {
        PhoneNumberFormat::E164 => {
            *formatted_number = fast_cat::concat_str!(
                PLUS_SIGN,
                country_calling_code_str,
                formatted_number.as_str()
            );
        }
        PhoneNumberFormat::International => {
            *formatted_number = fast_cat::concat_str!(
                PLUS_SIGN,
                country_calling_code_str,
                " ",
                formatted_number.as_str()
            );
        }
        PhoneNumberFormat::Rfc3966 => {
            *formatted_number = fast_cat::concat_str!(
                RFC3966_PREFIX,
                PLUS_SIGN,
                country_calling_code_str,
                "-",
                formatted_number.as_str()
            );
        }
        PhoneNumberFormat::National => {}
    }
}

/// Records leading zeros of the textual national number on the parsed
/// value. Counting stops one short of the length so an all-zero number
/// keeps a final zero in its integer form; a single leading zero stays
/// implicit in the flag.
pub(super) fn set_italian_leading_zeros_for_phone_number(
    national_number: &str,
    phone_number: &mut PhoneNumber,
) {
    if national_number.len() > 1 && national_number.starts_with('0') {
        phone_number.set_italian_leading_zero(true);
        let mut number_of_leading_zeros = 1;
        while number_of_leading_zeros < national_number.len() - 1
            && national_number.as_bytes()[number_of_leading_zeros] == b'0'
        {
            number_of_leading_zeros += 1;
        }
        if number_of_leading_zeros != 1 {
            phone_number.set_number_of_leading_zeros(number_of_leading_zeros as i32);
        }
    }
}

/// How a number's length relates to a possible-number pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PatternLength {
    Possible,
    TooLong,
    TooShort,
}

/// Probes a number against a possible-number pattern: an entire match is
/// possible, a match covering only a prefix means the number is too long,
/// anything else too short. An absent pattern rejects as too short.
pub(super) fn test_number_length_against_pattern(
    pattern: Option<&DescriptorPattern>,
    number: &str,
) -> PatternLength {
    let Some(pattern) = pattern else {
        return PatternLength::TooShort;
    };
    if pattern.full_match(number) {
        return PatternLength::Possible;
    }
    if pattern.match_start(number) {
        PatternLength::TooLong
    } else {
        PatternLength::TooShort
    }
}

/// The descriptor a phone-number type is matched against.
pub(super) fn desc_by_type(
    metadata: &RegionMetadata,
    number_type: PhoneNumberType,
) -> &NumberDescriptor {
    match number_type {
        PhoneNumberType::PremiumRate => metadata.premium_rate(),
        PhoneNumberType::TollFree => metadata.toll_free(),
        PhoneNumberType::Mobile => metadata.mobile(),
        PhoneNumberType::FixedLine | PhoneNumberType::FixedLineOrMobile => metadata.fixed_line(),
        PhoneNumberType::SharedCost => metadata.shared_cost(),
        PhoneNumberType::VoIp => metadata.voip(),
        PhoneNumberType::PersonalNumber => metadata.personal_number(),
        PhoneNumberType::Pager => metadata.pager(),
        PhoneNumberType::Uan => metadata.uan(),
        PhoneNumberType::Voicemail => metadata.voicemail(),
        PhoneNumberType::Unknown => metadata.general_desc(),
    }
}

/// Whether any numbers of this category exist in a region at all.
pub(super) fn desc_has_data(desc: &NumberDescriptor) -> bool {
    desc.has_national_number_pattern() || desc.example_number().is_some()
}
