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

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::{error, trace, warn};
use regex::Regex;
use strum::IntoEnumIterator;

use crate::metadata::{MetadataError, MetadataLoader, NumberFormat, RegionMetadata};
use crate::phonenumber::{CountryCodeSource, PhoneNumber};
use crate::regex_util::RegexExt;

use super::constants::{
    DEFAULT_EXTN_PREFIX, MAX_INPUT_STRING_LENGTH, MAX_LENGTH_COUNTRY_CODE, MAX_LENGTH_FOR_NSN,
    MIN_LENGTH_FOR_NSN, NANPA_COUNTRY_CODE, PLUS_SIGN, REGION_CODE_FOR_NON_GEO_ENTITY,
    RFC3966_EXTN_PREFIX, RFC3966_ISDN_SUBADDRESS, RFC3966_PHONE_CONTEXT, RFC3966_PREFIX,
    UNKNOWN_REGION, UNMATCHABLE_IDD_PREFIX,
};
use super::enums::{PhoneNumberFormat, PhoneNumberType};
use super::errors::ParseError;
use super::helpers::{
    desc_by_type, desc_has_data, normalize_helper, prefix_number_with_country_calling_code,
    set_italian_leading_zeros_for_phone_number, test_number_length_against_pattern, PatternLength,
};
use super::matcher::{MatcherApi, RegexBasedMatcher};
use super::regexps::PhoneNumberRegExps;

/// Parses, validates, classifies and formats international telephone
/// numbers against per-region metadata.
///
/// Construction takes the raw bytes of a region-metadata document and the
/// static country-calling-code → region-codes map (first entry of each
/// list is the main region for that code). Region metadata itself is
/// materialized lazily on first use and memoized for the lifetime of this
/// value. One instance is intended to serve the whole process; all methods
/// take `&self` and the caches are safe to share across threads.
pub struct PhoneNumberUtil {
    /// An API for checking numbers against descriptors.
    matcher_api: Box<dyn MatcherApi>,

    /// Precompiled regular expressions and character mappings.
    reg_exps: PhoneNumberRegExps,

    /// Lazily built per-region metadata.
    metadata: MetadataLoader,

    /// Country calling code → region codes sharing it, sorted by code for
    /// binary search. Regions under NANPA all map to calling code 1 with
    /// "US" first; Russia and Kazakhstan share 7 with "RU" first.
    country_calling_code_to_region_code_map: Vec<(i32, Vec<String>)>,

    /// The regions sharing country calling code 1.
    nanpa_regions: HashSet<String>,
}

impl PhoneNumberUtil {
    pub fn new(
        metadata_document: &[u8],
        country_code_to_regions: HashMap<i32, Vec<String>>,
    ) -> Result<Self, MetadataError> {
        let metadata = MetadataLoader::from_document_bytes(metadata_document)?;
        let mut country_calling_code_to_region_code_map: Vec<(i32, Vec<String>)> =
            country_code_to_regions.into_iter().collect();
        country_calling_code_to_region_code_map.sort_by_key(|(code, _)| *code);
        let nanpa_regions = country_calling_code_to_region_code_map
            .binary_search_by_key(&NANPA_COUNTRY_CODE, |(code, _)| *code)
            .ok()
            .map(|index| {
                country_calling_code_to_region_code_map[index]
                    .1
                    .iter()
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self {
            matcher_api: Box::new(RegexBasedMatcher),
            reg_exps: PhoneNumberRegExps::new(),
            metadata,
            country_calling_code_to_region_code_map,
            nanpa_regions,
        })
    }

    // ---------------------------------------------------------------
    // Region and metadata plumbing
    // ---------------------------------------------------------------

    fn region_codes_for_country_calling_code(
        &self,
        country_calling_code: i32,
    ) -> Option<&[String]> {
        self.country_calling_code_to_region_code_map
            .binary_search_by_key(&country_calling_code, |(code, _)| *code)
            .ok()
            .map(|index| self.country_calling_code_to_region_code_map[index].1.as_slice())
    }

    fn has_valid_country_calling_code(&self, country_calling_code: i32) -> bool {
        self.region_codes_for_country_calling_code(country_calling_code)
            .is_some()
    }

    /// Returns the main region for a country calling code, or `"ZZ"` when
    /// the code is not known.
    pub fn get_region_code_for_country_code(&self, country_calling_code: i32) -> &str {
        self.region_codes_for_country_calling_code(country_calling_code)
            .and_then(|region_codes| region_codes.first())
            .map(String::as_str)
            .unwrap_or(UNKNOWN_REGION)
    }

    /// Returns the country calling code of a region, or 0 when the region
    /// is unknown.
    pub fn get_country_code_for_region(&self, region_code: &str) -> i32 {
        match self.metadata_for_region(region_code) {
            Some(metadata) => metadata.country_code(),
            None => {
                warn!("Invalid or unknown region code ({region_code}) provided");
                0
            }
        }
    }

    pub(crate) fn metadata_for_region(&self, region_code: &str) -> Option<Arc<RegionMetadata>> {
        self.metadata.for_region(region_code)
    }

    fn metadata_for_region_or_calling_code(
        &self,
        country_calling_code: i32,
        region_code: &str,
    ) -> Option<Arc<RegionMetadata>> {
        if region_code == REGION_CODE_FOR_NON_GEO_ENTITY {
            self.metadata
                .for_non_geographical_entity(country_calling_code)
        } else {
            self.metadata_for_region(region_code)
        }
    }

    pub fn is_nanpa_country(&self, region_code: &str) -> bool {
        self.nanpa_regions.contains(region_code)
    }

    /// Whether national significant numbers under this calling code may
    /// begin with a meaningful zero.
    pub fn is_leading_zero_possible(&self, country_calling_code: i32) -> bool {
        let main_region = self.get_region_code_for_country_code(country_calling_code);
        self.metadata_for_region_or_calling_code(country_calling_code, main_region)
            .map(|metadata| metadata.leading_zero_possible())
            .unwrap_or(false)
    }

    /// The national dialing prefix of a region, e.g. `"0"` for the UK or
    /// `"1"` for the US. `strip_non_digits` removes the wait-for-tone
    /// tilde some prefixes carry.
    pub fn get_ndd_prefix_for_region(
        &self,
        region_code: &str,
        strip_non_digits: bool,
    ) -> Option<String> {
        let Some(metadata) = self.metadata_for_region(region_code) else {
            warn!("Invalid or unknown region code ({region_code}) provided");
            return None;
        };
        let mut prefix = metadata.national_prefix().to_owned();
        if strip_non_digits {
            prefix = prefix.replace('~', "");
        }
        Some(prefix)
    }

    /// The phone-number types a region has patterns for.
    pub fn get_supported_types_for_region(
        &self,
        region_code: &str,
    ) -> Option<HashSet<PhoneNumberType>> {
        let Some(metadata) = self.metadata_for_region(region_code) else {
            warn!("Invalid or unknown region code provided: {region_code}");
            return None;
        };
        let mut types = HashSet::new();
        for number_type in PhoneNumberType::iter() {
            // FIXED_LINE_OR_MOBILE is a convenience answer and UNKNOWN the
            // non-answer; neither is a supported type of its own.
            if matches!(
                number_type,
                PhoneNumberType::FixedLineOrMobile | PhoneNumberType::Unknown
            ) {
                continue;
            }
            if desc_has_data(desc_by_type(&metadata, number_type)) {
                types.insert(number_type);
            }
        }
        Some(types)
    }

    // ---------------------------------------------------------------
    // Normalization and viability
    // ---------------------------------------------------------------

    /// Normalizes the input to bare digits. When the input spells part of
    /// the number with at least three letters, keypad letters are
    /// converted; otherwise only digit variants are kept.
    pub fn normalize(&self, number: &str) -> String {
        if self.reg_exps.valid_alpha_phone_pattern.full_match(number) {
            normalize_helper(&self.reg_exps.alpha_phone_mappings, true, number)
        } else {
            self.normalize_digits_only(number)
        }
    }

    /// Normalizes keeping digits only; letters are dropped.
    pub fn normalize_digits_only(&self, number: &str) -> String {
        normalize_helper(&self.reg_exps.digit_mappings, true, number)
    }

    /// Light viability check: two bare digits, or at least three digits
    /// with nothing but acceptable punctuation, letters and an optional
    /// extension around them.
    pub fn is_viable_phone_number(&self, number: &str) -> bool {
        if number.chars().count() < MIN_LENGTH_FOR_NSN {
            return false;
        }
        self.reg_exps.valid_phone_number_pattern.is_match(number)
    }

    /// Whether the number contains enough letters to be a vanity number,
    /// ignoring any extension.
    pub fn is_alpha_number(&self, number: &str) -> bool {
        if !self.is_viable_phone_number(number) {
            return false;
        }
        let mut stripped = number.to_string();
        self.maybe_strip_extension(&mut stripped);
        self.reg_exps.valid_alpha_phone_pattern.full_match(&stripped)
    }

    /// Strips leading characters that cannot start a phone number, a
    /// trailing run that cannot end one, and anything after a marker that
    /// starts a second number.
    pub(crate) fn extract_possible_number<'a>(&self, number: &'a str) -> &'a str {
        let Some(start) = self.reg_exps.valid_start_char_pattern.find(number) else {
            return "";
        };
        let mut possible_number = &number[start.start()..];
        if let Some(trailing) = self.reg_exps.unwanted_end_char_pattern.find(possible_number) {
            possible_number = &possible_number[..trailing.start()];
        }
        if let Some(second_number) = self
            .reg_exps
            .second_number_start_pattern
            .find(possible_number)
        {
            possible_number = &possible_number[..second_number.start()];
        }
        possible_number
    }

    // ---------------------------------------------------------------
    // Parser
    // ---------------------------------------------------------------

    /// Parses a free-form number against a default region. The region is
    /// only consulted when the number carries no international marker.
    pub fn parse(&self, number_to_parse: &str, default_region: &str) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse, default_region, false, true)
    }

    /// Like [`PhoneNumberUtil::parse`], additionally recording the raw
    /// input, where the country code came from, and any domestic carrier
    /// code stripped along the way.
    pub fn parse_and_keep_raw_input(
        &self,
        number_to_parse: &str,
        default_region: &str,
    ) -> Result<PhoneNumber, ParseError> {
        self.parse_helper(number_to_parse, default_region, true, true)
    }

    fn parse_helper(
        &self,
        number_to_parse: &str,
        default_region: &str,
        keep_raw_input: bool,
        check_region: bool,
    ) -> Result<PhoneNumber, ParseError> {
        if number_to_parse.is_empty() {
            return Err(ParseError::NotANumber);
        }
        if number_to_parse.chars().count() > MAX_INPUT_STRING_LENGTH {
            return Err(ParseError::TooLong);
        }

        let mut national_number = self.build_national_number_for_parsing(number_to_parse);
        if !self.is_viable_phone_number(&national_number) {
            trace!("input {number_to_parse:?} failed the viability check");
            return Err(ParseError::NotANumber);
        }
        if check_region && !self.check_region_for_parsing(&national_number, default_region) {
            trace!("no default region and no plus sign in {number_to_parse:?}");
            return Err(ParseError::InvalidCountryCode);
        }

        let mut phone_number = PhoneNumber::new();
        if keep_raw_input {
            phone_number.set_raw_input(number_to_parse.to_string());
        }
        if let Some(extension) = self.maybe_strip_extension(&mut national_number) {
            phone_number.set_extension(extension);
        }

        let mut region_metadata = self.metadata_for_region(default_region);
        let extraction = self.maybe_extract_country_code(
            &national_number,
            region_metadata.as_deref(),
            keep_raw_input,
            &mut phone_number,
        );
        let (country_code, mut normalized_national_number) = match extraction {
            Ok(result) => result,
            Err(ParseError::InvalidCountryCode) => {
                // The only recovery path: drop a leading plus-character run
                // and retry the extraction exactly once.
                let Some(rest) = self.reg_exps.plus_chars_pattern.consume_start(&national_number)
                else {
                    return Err(ParseError::InvalidCountryCode);
                };
                let result = self.maybe_extract_country_code(
                    rest,
                    region_metadata.as_deref(),
                    keep_raw_input,
                    &mut phone_number,
                )?;
                if result.0 == 0 {
                    return Err(ParseError::InvalidCountryCode);
                }
                result
            }
            Err(err) => return Err(err),
        };

        if country_code != 0 {
            let number_region = self.get_region_code_for_country_code(country_code);
            if number_region != default_region {
                region_metadata =
                    self.metadata_for_region_or_calling_code(country_code, number_region);
            }
        } else {
            // No '+' or IDD was recognized: the national number is the
            // normalized input and the calling code comes from the default
            // region.
            normalized_national_number = self.normalize(&national_number);
            let Some(metadata) = region_metadata.as_deref() else {
                return Err(ParseError::InvalidCountryCode);
            };
            phone_number.set_country_code(metadata.country_code());
        }

        if normalized_national_number.len() < MIN_LENGTH_FOR_NSN {
            return Err(ParseError::TooShortNsn);
        }
        if let Some(metadata) = region_metadata.as_deref() {
            let carrier_code = self
                .maybe_strip_national_prefix_and_carrier_code(
                    &mut normalized_national_number,
                    metadata,
                );
            if keep_raw_input {
                phone_number.set_preferred_domestic_carrier_code(carrier_code.unwrap_or_default());
            }
        }
        let length_of_national_number = normalized_national_number.len();
        if length_of_national_number < MIN_LENGTH_FOR_NSN {
            return Err(ParseError::TooShortNsn);
        }
        if length_of_national_number > MAX_LENGTH_FOR_NSN {
            return Err(ParseError::TooLong);
        }

        set_italian_leading_zeros_for_phone_number(&normalized_national_number, &mut phone_number);
        let national_number_value = normalized_national_number
            .parse::<u64>()
            .map_err(|_| ParseError::NotANumber)?;
        phone_number.set_national_number(national_number_value);
        Ok(phone_number)
    }

    /// Any non-empty region is accepted here; regions without metadata
    /// fail later when that metadata is actually needed.
    fn check_region_for_parsing(&self, number_to_parse: &str, default_region: &str) -> bool {
        !default_region.is_empty()
            || self.reg_exps.plus_chars_pattern.match_start(number_to_parse)
    }

    /// Converts the raw input into the substring worth parsing: RFC 3966
    /// inputs are reassembled from their phone-context, anything else is
    /// trimmed to the plausible number, and an ISDN subaddress is cut off.
    fn build_national_number_for_parsing(&self, number_to_parse: &str) -> String {
        let mut national_number = String::with_capacity(number_to_parse.len());
        if let Some(index_of_phone_context) = number_to_parse.find(RFC3966_PHONE_CONTEXT) {
            let phone_context_start = index_of_phone_context + RFC3966_PHONE_CONTEXT.len();
            // A phone-context holding a number prefix is part of the
            // number; a domain name is not.
            if number_to_parse[phone_context_start..].starts_with(PLUS_SIGN) {
                let phone_context_end = number_to_parse[phone_context_start..]
                    .find(';')
                    .map(|offset| phone_context_start + offset)
                    .unwrap_or(number_to_parse.len());
                national_number.push_str(&number_to_parse[phone_context_start..phone_context_end]);
            }
            // Now append everything between the "tel:" prefix and the
            // phone-context.
            let index_of_national_number = number_to_parse
                .find(RFC3966_PREFIX)
                .map(|index| index + RFC3966_PREFIX.len())
                .unwrap_or(0);
            national_number
                .push_str(&number_to_parse[index_of_national_number..index_of_phone_context]);
        } else {
            national_number.push_str(self.extract_possible_number(number_to_parse));
        }
        if let Some(index_of_isub) = national_number.find(RFC3966_ISDN_SUBADDRESS) {
            national_number.truncate(index_of_isub);
        }
        national_number
    }

    /// Strips a recognized extension from the end of the number and
    /// returns its digits, provided what precedes it is still viable.
    pub(crate) fn maybe_strip_extension(&self, number: &mut String) -> Option<String> {
        let captures = self.reg_exps.extn_pattern.captures(number)?;
        let match_start = captures.get(0)?.start();
        if !self.is_viable_phone_number(&number[..match_start]) {
            return None;
        }
        // Whichever alternative matched, exactly one digit group holds the
        // extension.
        let extension = captures
            .iter()
            .skip(1)
            .flatten()
            .map(|group| group.as_str())
            .find(|digits| !digits.is_empty())
            .map(str::to_owned)?;
        number.truncate(match_start);
        Some(extension)
    }

    /// Strips a leading plus sign or the region's IDD from the number and
    /// normalizes it, reporting where a country code would come from.
    pub(crate) fn maybe_strip_international_prefix_and_normalize(
        &self,
        number: &str,
        possible_idd_prefix: &str,
    ) -> (String, CountryCodeSource) {
        if number.is_empty() {
            return (String::new(), CountryCodeSource::FromDefaultCountry);
        }
        if let Some(rest) = self.reg_exps.plus_chars_pattern.consume_start(number) {
            return (
                self.normalize_digits_only(rest),
                CountryCodeSource::FromNumberWithPlusSign,
            );
        }
        let normalized = self.normalize(number);
        let idd_pattern = match self.reg_exps.regexp_cache.get_regex(possible_idd_prefix) {
            Ok(pattern) => pattern,
            Err(err) => {
                error!("invalid international-prefix pattern in metadata: {err}");
                return (normalized, CountryCodeSource::FromDefaultCountry);
            }
        };
        match self.parse_prefix_as_idd(&idd_pattern, &normalized) {
            Some(stripped) => (stripped, CountryCodeSource::FromNumberWithIdd),
            None => (normalized, CountryCodeSource::FromDefaultCountry),
        }
    }

    /// Strips the IDD when it is followed by something that can start a
    /// national significant number. A captured `0` right after the IDD
    /// cancels recognition, since a national number may begin there.
    fn parse_prefix_as_idd(&self, idd_pattern: &Regex, number: &str) -> Option<String> {
        let rest = idd_pattern.consume_start(number)?;
        if let Some(captures) = self.reg_exps.capturing_digit_pattern.captures(rest) {
            if let Some(digit) = captures.get(1) {
                if self.normalize_digits_only(digit.as_str()) == "0" {
                    trace!("first digit after IDD is 0, not treating as IDD");
                    return None;
                }
            }
        }
        Some(rest.to_string())
    }

    /// Extracts a country calling code from the start of the (possibly
    /// international) number. Returns the code together with the national
    /// number string; 0 when the number stays national. The number is
    /// carried as a string throughout so leading zeros survive until the
    /// caller decides about them.
    pub(crate) fn maybe_extract_country_code(
        &self,
        number: &str,
        metadata: Option<&RegionMetadata>,
        keep_raw_input: bool,
        phone_number: &mut PhoneNumber,
    ) -> Result<(i32, String), ParseError> {
        if number.is_empty() {
            return Ok((0, String::new()));
        }
        let possible_idd_prefix = metadata
            .map(|m| m.international_prefix())
            .filter(|prefix| !prefix.is_empty())
            .unwrap_or(UNMATCHABLE_IDD_PREFIX);
        let (full_number, country_code_source) =
            self.maybe_strip_international_prefix_and_normalize(number, possible_idd_prefix);
        if keep_raw_input {
            phone_number.set_country_code_source(country_code_source);
        }
        if country_code_source != CountryCodeSource::FromDefaultCountry {
            if full_number.len() <= MIN_LENGTH_FOR_NSN {
                return Err(ParseError::TooShortAfterIdd);
            }
            if let Some((country_code, national_number)) = self.extract_country_code(&full_number) {
                phone_number.set_country_code(country_code);
                return Ok((country_code, national_number.to_string()));
            }
            // An international marker was present, so the digits must begin
            // with a known calling code.
            return Err(ParseError::InvalidCountryCode);
        }
        if let Some(metadata) = metadata {
            // The number may still carry the default region's calling code
            // without any international marker. Strip it tentatively.
            let default_country_code = metadata.country_code();
            let mut buffer = itoa::Buffer::new();
            let default_country_code_str = buffer.format(default_country_code);
            if let Some(potential_national_number) =
                full_number.strip_prefix(default_country_code_str)
            {
                let general_desc = metadata.general_desc();
                let mut candidate = potential_national_number.to_string();
                self.maybe_strip_national_prefix_and_carrier_code(&mut candidate, metadata);
                // Keep the strip when it turned an invalid number into a
                // valid one, or when the full number is too long to be
                // possible at all.
                let full_number_valid = general_desc.matches_national_number(&full_number);
                if (!full_number_valid && general_desc.matches_national_number(&candidate))
                    || test_number_length_against_pattern(
                        general_desc.possible_number_pattern.as_ref(),
                        &full_number,
                    ) == PatternLength::TooLong
                {
                    if keep_raw_input {
                        phone_number
                            .set_country_code_source(CountryCodeSource::FromNumberWithoutPlusSign);
                    }
                    phone_number.set_country_code(default_country_code);
                    return Ok((default_country_code, candidate));
                }
            }
        }
        phone_number.set_country_code(0);
        Ok((0, full_number))
    }

    /// Scans prefixes of one to three digits for a known country calling
    /// code. Calling codes never begin with zero.
    fn extract_country_code<'a>(&self, full_number: &'a str) -> Option<(i32, &'a str)> {
        if full_number.is_empty() || full_number.starts_with('0') {
            return None;
        }
        for length in 1..=MAX_LENGTH_COUNTRY_CODE.min(full_number.len()) {
            let potential_country_code = full_number[..length].parse::<i32>().ok()?;
            if self.has_valid_country_calling_code(potential_country_code) {
                return Some((potential_country_code, &full_number[length..]));
            }
        }
        None
    }

    /// Strips the national prefix (applying the region's transform rule if
    /// one exists) and returns the captured domestic carrier code, if any.
    /// A strip that would turn a valid number invalid is abandoned.
    pub(crate) fn maybe_strip_national_prefix_and_carrier_code(
        &self,
        number: &mut String,
        metadata: &RegionMetadata,
    ) -> Option<String> {
        let possible_national_prefix = metadata.national_prefix_for_parsing();
        if number.is_empty() || possible_national_prefix.is_empty() {
            return None;
        }
        let prefix_pattern = match self
            .reg_exps
            .regexp_cache
            .get_regex(&fast_cat::concat_str!("^(?:", possible_national_prefix, ")"))
        {
            Ok(pattern) => pattern,
            Err(err) => {
                error!("invalid national-prefix pattern in metadata: {err}");
                return None;
            }
        };
        let captures = prefix_pattern.captures(number)?;
        let prefix_end = captures.get(0)?.end();

        let general_desc = metadata.general_desc();
        let is_viable_original_number = general_desc.matches_national_number(number);
        let num_of_groups = captures.len() - 1;
        let last_group = captures.get(num_of_groups);
        let transform_rule = metadata.national_prefix_transform_rule();

        if transform_rule.is_none_or(str::is_empty)
            || last_group.is_none_or(|group| group.as_str().is_empty())
        {
            // No transform applies: just cut the prefix off, provided a
            // valid number stays valid.
            let stripped = number[prefix_end..].to_string();
            if is_viable_original_number && !general_desc.matches_national_number(&stripped) {
                return None;
            }
            let carrier_code = (num_of_groups > 0 && last_group.is_some())
                .then(|| captures.get(1))
                .flatten()
                .map(|group| group.as_str().to_owned());
            *number = stripped;
            carrier_code
        } else {
            let transformed = prefix_pattern
                .replace(number, transform_rule.unwrap_or_default())
                .into_owned();
            if is_viable_original_number && !general_desc.matches_national_number(&transformed) {
                return None;
            }
            let carrier_code = (num_of_groups > 0)
                .then(|| captures.get(1))
                .flatten()
                .map(|group| group.as_str().to_owned());
            *number = transformed;
            carrier_code
        }
    }

    // ---------------------------------------------------------------
    // Validator / classifier
    // ---------------------------------------------------------------

    /// The national significant number as a string, with any meaningful
    /// leading zeros restored.
    pub fn get_national_significant_number(number: &PhoneNumber) -> String {
        // A negative count from malicious input yields no zeros rather
        // than a panic.
        let leading_zeros = if number.italian_leading_zero() {
            "0".repeat(number.number_of_leading_zeros().max(0) as usize)
        } else {
            String::new()
        };
        let mut buffer = itoa::Buffer::new();
        let national_number = buffer.format(number.national_number());
        fast_cat::concat_str!(&leading_zeros, national_number)
    }

    /// The region a number belongs to: the only region under its calling
    /// code, or the first sharing region whose leading digits match or
    /// which classifies the number.
    pub fn get_region_code_for_number(&self, number: &PhoneNumber) -> Option<&str> {
        let country_code = number.country_code();
        let Some(region_codes) = self.region_codes_for_country_calling_code(country_code) else {
            trace!("missing or invalid country calling code ({country_code})");
            return None;
        };
        if region_codes.len() == 1 {
            return Some(region_codes[0].as_str());
        }
        self.region_code_for_number_from_region_list(number, region_codes)
    }

    fn region_code_for_number_from_region_list<'a>(
        &'a self,
        number: &PhoneNumber,
        region_codes: &'a [String],
    ) -> Option<&'a str> {
        let national_number = Self::get_national_significant_number(number);
        for region_code in region_codes {
            // Metadata should exist, since the region codes come from the
            // country calling code map.
            let Some(metadata) = self.metadata_for_region(region_code) else {
                continue;
            };
            if let Some(leading_digits) = metadata.leading_digits() {
                match self.reg_exps.regexp_cache.get_regex(leading_digits) {
                    Ok(pattern) => {
                        if pattern.match_start(&national_number) {
                            return Some(region_code);
                        }
                    }
                    Err(err) => error!("invalid leading-digits pattern in metadata: {err}"),
                }
            } else if self.get_number_type_helper(&national_number, &metadata)
                != PhoneNumberType::Unknown
            {
                return Some(region_code);
            }
        }
        None
    }

    pub fn is_valid_number(&self, number: &PhoneNumber) -> bool {
        let Some(region_code) = self.get_region_code_for_number(number) else {
            return false;
        };
        self.is_valid_number_for_region(number, region_code)
    }

    pub fn is_valid_number_for_region(&self, number: &PhoneNumber, region_code: &str) -> bool {
        let country_code = number.country_code();
        let Some(metadata) = self.metadata_for_region_or_calling_code(country_code, region_code)
        else {
            return false;
        };
        if region_code != REGION_CODE_FOR_NON_GEO_ENTITY && metadata.country_code() != country_code
        {
            return false;
        }
        let national_significant_number = Self::get_national_significant_number(number);
        self.get_number_type_helper(&national_significant_number, &metadata)
            != PhoneNumberType::Unknown
    }

    pub fn get_number_type(&self, number: &PhoneNumber) -> PhoneNumberType {
        let Some(region_code) = self.get_region_code_for_number(number) else {
            return PhoneNumberType::Unknown;
        };
        let Some(metadata) =
            self.metadata_for_region_or_calling_code(number.country_code(), region_code)
        else {
            return PhoneNumberType::Unknown;
        };
        let national_significant_number = Self::get_national_significant_number(number);
        self.get_number_type_helper(&national_significant_number, &metadata)
    }

    fn get_number_type_helper(
        &self,
        national_number: &str,
        metadata: &RegionMetadata,
    ) -> PhoneNumberType {
        if !metadata.general_desc().matches_national_number(national_number) {
            trace!("number {national_number} fails the general national number pattern");
            return PhoneNumberType::Unknown;
        }
        if self.is_number_matching_desc(national_number, metadata.premium_rate()) {
            trace!("number {national_number} is a premium-rate number");
            return PhoneNumberType::PremiumRate;
        }
        if self.is_number_matching_desc(national_number, metadata.toll_free()) {
            trace!("number {national_number} is a toll-free number");
            return PhoneNumberType::TollFree;
        }
        if self.is_number_matching_desc(national_number, metadata.shared_cost()) {
            trace!("number {national_number} is a shared-cost number");
            return PhoneNumberType::SharedCost;
        }
        if self.is_number_matching_desc(national_number, metadata.voip()) {
            trace!("number {national_number} is a VoIP number");
            return PhoneNumberType::VoIp;
        }
        if self.is_number_matching_desc(national_number, metadata.personal_number()) {
            trace!("number {national_number} is a personal number");
            return PhoneNumberType::PersonalNumber;
        }
        if self.is_number_matching_desc(national_number, metadata.pager()) {
            trace!("number {national_number} is a pager number");
            return PhoneNumberType::Pager;
        }
        if self.is_number_matching_desc(national_number, metadata.uan()) {
            trace!("number {national_number} is a UAN");
            return PhoneNumberType::Uan;
        }
        if self.is_number_matching_desc(national_number, metadata.voicemail()) {
            trace!("number {national_number} is a voicemail number");
            return PhoneNumberType::Voicemail;
        }
        if self.is_number_matching_desc(national_number, metadata.fixed_line()) {
            if metadata.same_mobile_and_fixed_line_pattern()
                || self.is_number_matching_desc(national_number, metadata.mobile())
            {
                trace!("number {national_number} is fixed-line or mobile");
                return PhoneNumberType::FixedLineOrMobile;
            }
            trace!("number {national_number} is a fixed-line number");
            return PhoneNumberType::FixedLine;
        }
        if !metadata.same_mobile_and_fixed_line_pattern()
            && self.is_number_matching_desc(national_number, metadata.mobile())
        {
            trace!("number {national_number} is a mobile number");
            return PhoneNumberType::Mobile;
        }
        trace!("number {national_number} matches no specific type pattern");
        PhoneNumberType::Unknown
    }

    fn is_number_matching_desc(
        &self,
        national_number: &str,
        number_desc: &crate::metadata::NumberDescriptor,
    ) -> bool {
        self.matcher_api
            .match_national_number(national_number, number_desc)
    }

    /// Parses the example number of a region's fixed-line descriptor.
    pub fn get_example_number(&self, region_code: &str) -> Option<PhoneNumber> {
        self.get_example_number_for_type(region_code, PhoneNumberType::FixedLine)
    }

    pub fn get_example_number_for_type(
        &self,
        region_code: &str,
        number_type: PhoneNumberType,
    ) -> Option<PhoneNumber> {
        let metadata = self.metadata_for_region(region_code)?;
        let example_number = desc_by_type(&metadata, number_type).example_number()?;
        match self.parse(example_number, region_code) {
            Ok(number) => Some(number),
            Err(err) => {
                warn!("example number {example_number} of region {region_code} does not parse: {err}");
                None
            }
        }
    }

    // ---------------------------------------------------------------
    // Formatter
    // ---------------------------------------------------------------

    /// Formats a parsed number into the requested presentation. Never
    /// fails: numbers without a known calling code come back as their bare
    /// national significant number, and a kept raw input is echoed for
    /// numbers that never parsed.
    pub fn format(&self, number: &PhoneNumber, number_format: PhoneNumberFormat) -> String {
        if number.country_code() == 0 && !number.raw_input().is_empty() {
            // Unparseable numbers that kept their raw input just use that.
            return number.raw_input().to_string();
        }
        let country_calling_code = number.country_code();
        let national_significant_number = Self::get_national_significant_number(number);
        if !self.has_valid_country_calling_code(country_calling_code) {
            return national_significant_number;
        }
        // Formatting rules for regions sharing a country calling code live
        // in the metadata of the code's main region, e.g. all of NANPA is
        // covered by the US entry.
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) =
            self.metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return national_significant_number;
        };
        let mut formatted_number = if number_format == PhoneNumberFormat::E164 {
            // E.164 keeps the national significant number undecorated.
            national_significant_number
        } else {
            self.format_nsn(&national_significant_number, &metadata, number_format)
                .into_owned()
        };
        if let Some(extension) = Self::get_formatted_extension(number, &metadata, number_format) {
            formatted_number.push_str(&extension);
        }
        prefix_number_with_country_calling_code(
            country_calling_code,
            number_format,
            &mut formatted_number,
        );
        formatted_number
    }

    /// Formats a number for dialing from `calling_from`: national format
    /// within the same region (or calling-code-prefixed within NANPA),
    /// otherwise the caller's international prefix followed by the country
    /// code, falling back to INTERNATIONAL when no prefix is usable.
    pub fn format_out_of_country_calling_number(
        &self,
        number: &PhoneNumber,
        calling_from: &str,
    ) -> String {
        let Some(metadata_calling_from) = self.metadata_for_region(calling_from) else {
            warn!(
                "region {calling_from} is invalid or unknown, formatting internationally instead"
            );
            return self.format(number, PhoneNumberFormat::International);
        };
        let country_calling_code = number.country_code();
        let national_significant_number = Self::get_national_significant_number(number);
        if !self.has_valid_country_calling_code(country_calling_code) {
            return national_significant_number;
        }
        if country_calling_code == NANPA_COUNTRY_CODE {
            if self.is_nanpa_country(calling_from) {
                // Within NANPA the country calling code is dialled in front
                // of the national format.
                let mut buffer = itoa::Buffer::new();
                return fast_cat::concat_str!(
                    buffer.format(country_calling_code),
                    " ",
                    &self.format(number, PhoneNumberFormat::National)
                );
            }
        } else if country_calling_code == metadata_calling_from.country_code() {
            // Regions sharing a calling code dial each other in national
            // format.
            return self.format(number, PhoneNumberFormat::National);
        }
        let international_prefix = metadata_calling_from.international_prefix();
        // A region with several possible international prefixes cannot
        // choose one automatically unless it declares a preference.
        let international_prefix_for_formatting = if self
            .reg_exps
            .single_international_prefix
            .full_match(international_prefix)
        {
            international_prefix
        } else {
            metadata_calling_from
                .preferred_international_prefix()
                .unwrap_or("")
        };
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata_for_region) =
            self.metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return national_significant_number;
        };
        let mut formatted_number = self
            .format_nsn(
                &national_significant_number,
                &metadata_for_region,
                PhoneNumberFormat::International,
            )
            .into_owned();
        if let Some(extension) = Self::get_formatted_extension(
            number,
            &metadata_for_region,
            PhoneNumberFormat::International,
        ) {
            formatted_number.push_str(&extension);
        }
        if !international_prefix_for_formatting.is_empty() {
            let mut buffer = itoa::Buffer::new();
            formatted_number = fast_cat::concat_str!(
                international_prefix_for_formatting,
                " ",
                buffer.format(country_calling_code),
                " ",
                &formatted_number
            );
        } else {
            prefix_number_with_country_calling_code(
                country_calling_code,
                PhoneNumberFormat::International,
                &mut formatted_number,
            );
        }
        formatted_number
    }

    /// Formats using caller-supplied patterns instead of the region's own,
    /// resolving `$NP`/`$FG` placeholders against the region's national
    /// prefix.
    pub fn format_by_pattern(
        &self,
        number: &PhoneNumber,
        number_format: PhoneNumberFormat,
        user_defined_formats: &[NumberFormat],
    ) -> String {
        let country_calling_code = number.country_code();
        let national_significant_number = Self::get_national_significant_number(number);
        if !self.has_valid_country_calling_code(country_calling_code) {
            return national_significant_number;
        }
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) =
            self.metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return national_significant_number;
        };
        let chosen =
            self.choose_formatting_pattern_for_number(user_defined_formats, &national_significant_number);
        let mut formatted_number = match chosen {
            Some(formatting_pattern) => {
                // Work on a copy so the caller's rule keeps its
                // placeholders for the next number.
                let mut format_copy = formatting_pattern.clone();
                let national_prefix_formatting_rule =
                    formatting_pattern.national_prefix_formatting_rule();
                if !national_prefix_formatting_rule.is_empty() {
                    let national_prefix = metadata.national_prefix();
                    if !national_prefix.is_empty() {
                        let rule = national_prefix_formatting_rule
                            .replace("$NP", national_prefix)
                            .replace("$FG", "$1");
                        format_copy.set_national_prefix_formatting_rule(rule);
                    } else {
                        // No national prefix, no rule for formatting it.
                        format_copy.clear_national_prefix_formatting_rule();
                    }
                }
                self.format_nsn_using_pattern_with_carrier(
                    &national_significant_number,
                    &format_copy,
                    number_format,
                    "",
                )
                .into_owned()
            }
            None => national_significant_number,
        };
        if let Some(extension) = Self::get_formatted_extension(number, &metadata, number_format) {
            formatted_number.push_str(&extension);
        }
        prefix_number_with_country_calling_code(
            country_calling_code,
            number_format,
            &mut formatted_number,
        );
        formatted_number
    }

    /// National format with a carrier code substituted into the chosen
    /// pattern's `$CC` rule.
    pub fn format_national_number_with_carrier_code(
        &self,
        number: &PhoneNumber,
        carrier_code: &str,
    ) -> String {
        let country_calling_code = number.country_code();
        let national_significant_number = Self::get_national_significant_number(number);
        if !self.has_valid_country_calling_code(country_calling_code) {
            return national_significant_number;
        }
        let region_code = self.get_region_code_for_country_code(country_calling_code);
        let Some(metadata) =
            self.metadata_for_region_or_calling_code(country_calling_code, region_code)
        else {
            return national_significant_number;
        };
        let mut formatted_number = self
            .format_nsn_with_carrier(
                &national_significant_number,
                &metadata,
                PhoneNumberFormat::National,
                carrier_code,
            )
            .into_owned();
        if let Some(extension) =
            Self::get_formatted_extension(number, &metadata, PhoneNumberFormat::National)
        {
            formatted_number.push_str(&extension);
        }
        formatted_number
    }

    /// Like [`PhoneNumberUtil::format_national_number_with_carrier_code`],
    /// preferring the carrier code captured at parse time over the
    /// caller's fallback.
    pub fn format_national_number_with_preferred_carrier_code(
        &self,
        number: &PhoneNumber,
        fallback_carrier_code: &str,
    ) -> String {
        let carrier_code = if !number.preferred_domestic_carrier_code().is_empty() {
            number.preferred_domestic_carrier_code()
        } else {
            fallback_carrier_code
        };
        self.format_national_number_with_carrier_code(number, carrier_code)
    }

    fn format_nsn<'b>(
        &self,
        number: &'b str,
        metadata: &RegionMetadata,
        number_format: PhoneNumberFormat,
    ) -> Cow<'b, str> {
        self.format_nsn_with_carrier(number, metadata, number_format, "")
    }

    fn format_nsn_with_carrier<'b>(
        &self,
        number: &'b str,
        metadata: &RegionMetadata,
        number_format: PhoneNumberFormat,
        carrier_code: &str,
    ) -> Cow<'b, str> {
        // When international formats exist they drive everything except
        // NATIONAL output; an empty list falls back to the national ones.
        let available_formats = if metadata.intl_number_formats().is_empty()
            || number_format == PhoneNumberFormat::National
        {
            metadata.number_formats()
        } else {
            metadata.intl_number_formats()
        };
        match self.choose_formatting_pattern_for_number(available_formats, number) {
            Some(formatting_pattern) => self.format_nsn_using_pattern_with_carrier(
                number,
                formatting_pattern,
                number_format,
                carrier_code,
            ),
            None => Cow::Borrowed(number),
        }
    }

    fn choose_formatting_pattern_for_number<'b>(
        &self,
        available_formats: &'b [NumberFormat],
        national_number: &str,
    ) -> Option<&'b NumberFormat> {
        for format in available_formats {
            // Only the last leading-digits pattern is consulted; it is the
            // most discriminating one.
            if let Some(leading_digits) = format.leading_digits_pattern().last() {
                match self.reg_exps.regexp_cache.get_regex(leading_digits) {
                    Ok(pattern) => {
                        if !pattern.match_start(national_number) {
                            continue;
                        }
                    }
                    Err(err) => {
                        error!("invalid leading-digits pattern in metadata: {err}");
                        continue;
                    }
                }
            }
            match self.reg_exps.regexp_cache.get_regex(format.pattern()) {
                Ok(pattern) => {
                    if pattern.full_match(national_number) {
                        return Some(format);
                    }
                }
                Err(err) => error!("invalid format pattern in metadata: {err}"),
            }
        }
        None
    }

    fn format_nsn_using_pattern_with_carrier<'b>(
        &self,
        national_number: &'b str,
        formatting_pattern: &NumberFormat,
        number_format: PhoneNumberFormat,
        carrier_code: &str,
    ) -> Cow<'b, str> {
        let mut number_format_rule = formatting_pattern.format().to_string();
        if number_format == PhoneNumberFormat::National
            && !carrier_code.is_empty()
            && !formatting_pattern
                .domestic_carrier_code_formatting_rule()
                .is_empty()
        {
            // Put the carrier code into the $CC slot, then the whole rule
            // into the first-group slot.
            let carrier_code_formatting_rule = self
                .reg_exps
                .carrier_code_pattern
                .replace(
                    formatting_pattern.domestic_carrier_code_formatting_rule(),
                    carrier_code,
                )
                .into_owned();
            number_format_rule = self
                .reg_exps
                .first_group_capturing_pattern
                .replace(&number_format_rule, carrier_code_formatting_rule.as_str())
                .into_owned();
        } else {
            let national_prefix_formatting_rule =
                formatting_pattern.national_prefix_formatting_rule();
            if number_format == PhoneNumberFormat::National
                && !national_prefix_formatting_rule.is_empty()
            {
                number_format_rule = self
                    .reg_exps
                    .first_group_capturing_pattern
                    .replace(&number_format_rule, national_prefix_formatting_rule)
                    .into_owned();
            }
        }

        let pattern_to_match = match self
            .reg_exps
            .regexp_cache
            .get_regex(formatting_pattern.pattern())
        {
            Ok(pattern) => pattern,
            Err(err) => {
                error!("invalid format pattern in metadata: {err}");
                return Cow::Borrowed(national_number);
            }
        };
        let formatted_number = pattern_to_match.replace(national_number, number_format_rule.as_str());

        if number_format == PhoneNumberFormat::Rfc3966 {
            // Leading punctuation goes, every remaining run becomes "-".
            let trimmed = match self.reg_exps.separator_pattern.consume_start(&formatted_number) {
                Some(rest) => rest.to_string(),
                None => formatted_number.into_owned(),
            };
            return Cow::Owned(
                self.reg_exps
                    .separator_pattern
                    .replace_all(&trimmed, "-")
                    .into_owned(),
            );
        }
        formatted_number
    }

    /// The formatted extension of a number, or `None` when it has none.
    fn get_formatted_extension(
        number: &PhoneNumber,
        metadata: &RegionMetadata,
        number_format: PhoneNumberFormat,
    ) -> Option<String> {
        if !number.has_extension() || number.extension().is_empty() {
            return None;
        }
        let prefix = if number_format == PhoneNumberFormat::Rfc3966 {
            RFC3966_EXTN_PREFIX
        } else {
            metadata.preferred_extn_prefix().unwrap_or(DEFAULT_EXTN_PREFIX)
        };
        Some(fast_cat::concat_str!(prefix, number.extension()))
    }
}
