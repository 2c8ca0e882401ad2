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

/// Where the country calling code of a parsed number was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CountryCodeSource {
    /// The number began with a `+` (or fullwidth `＋`) sign.
    #[default]
    FromNumberWithPlusSign,
    /// The number began with an international direct-dialing prefix which
    /// was recognized and stripped.
    FromNumberWithIdd,
    /// The number carried its country calling code without any
    /// international marker.
    FromNumberWithoutPlusSign,
    /// The country calling code was taken from the default region supplied
    /// by the caller.
    FromDefaultCountry,
}

/// Structured representation of a telephone number.
///
/// Instances are produced by [`crate::PhoneNumberUtil::parse`] and treated
/// as immutable values afterwards. Optional fields follow set/unset
/// semantics: two numbers only compare equal when the same fields are set
/// to the same values.
///
/// The national number is stored as an integer and therefore cannot carry
/// leading zeros; [`PhoneNumber::italian_leading_zero`] together with
/// [`PhoneNumber::number_of_leading_zeros`] preserves them (a single
/// leading zero is implicit in the flag alone).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PhoneNumber {
    country_code: i32,
    national_number: u64,
    extension: Option<String>,
    italian_leading_zero: bool,
    number_of_leading_zeros: Option<i32>,
    raw_input: Option<String>,
    country_code_source: Option<CountryCodeSource>,
    preferred_domestic_carrier_code: Option<String>,
}

impl PhoneNumber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn country_code(&self) -> i32 {
        self.country_code
    }

    pub fn set_country_code(&mut self, country_code: i32) {
        self.country_code = country_code;
    }

    pub fn national_number(&self) -> u64 {
        self.national_number
    }

    pub fn set_national_number(&mut self, national_number: u64) {
        self.national_number = national_number;
    }

    pub fn has_extension(&self) -> bool {
        self.extension.is_some()
    }

    pub fn extension(&self) -> &str {
        self.extension.as_deref().unwrap_or("")
    }

    pub fn set_extension(&mut self, extension: String) {
        self.extension = Some(extension);
    }

    pub fn clear_extension(&mut self) {
        self.extension = None;
    }

    pub fn italian_leading_zero(&self) -> bool {
        self.italian_leading_zero
    }

    pub fn set_italian_leading_zero(&mut self, italian_leading_zero: bool) {
        self.italian_leading_zero = italian_leading_zero;
    }

    /// Count of leading zeros in the textual national number; meaningful
    /// only while [`PhoneNumber::italian_leading_zero`] is set. Defaults to
    /// one when never set explicitly.
    pub fn number_of_leading_zeros(&self) -> i32 {
        self.number_of_leading_zeros.unwrap_or(1)
    }

    pub fn has_number_of_leading_zeros(&self) -> bool {
        self.number_of_leading_zeros.is_some()
    }

    pub fn set_number_of_leading_zeros(&mut self, number_of_leading_zeros: i32) {
        self.number_of_leading_zeros = Some(number_of_leading_zeros);
    }

    pub fn has_raw_input(&self) -> bool {
        self.raw_input.is_some()
    }

    pub fn raw_input(&self) -> &str {
        self.raw_input.as_deref().unwrap_or("")
    }

    pub fn set_raw_input(&mut self, raw_input: String) {
        self.raw_input = Some(raw_input);
    }

    pub fn has_country_code_source(&self) -> bool {
        self.country_code_source.is_some()
    }

    pub fn country_code_source(&self) -> CountryCodeSource {
        self.country_code_source.unwrap_or_default()
    }

    pub fn set_country_code_source(&mut self, source: CountryCodeSource) {
        self.country_code_source = Some(source);
    }

    pub fn clear_country_code_source(&mut self) {
        self.country_code_source = None;
    }

    pub fn has_preferred_domestic_carrier_code(&self) -> bool {
        self.preferred_domestic_carrier_code.is_some()
    }

    pub fn preferred_domestic_carrier_code(&self) -> &str {
        self.preferred_domestic_carrier_code.as_deref().unwrap_or("")
    }

    pub fn set_preferred_domestic_carrier_code(&mut self, carrier_code: String) {
        self.preferred_domestic_carrier_code = Some(carrier_code);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::{CountryCodeSource, PhoneNumber};

    #[test]
    fn unset_fields_have_defaults() {
        let number = PhoneNumber::new();
        assert_eq!(0, number.country_code());
        assert_eq!("", number.extension());
        assert!(!number.italian_leading_zero());
        assert_eq!(1, number.number_of_leading_zeros());
        assert!(!number.has_country_code_source());
        assert_eq!(
            CountryCodeSource::FromNumberWithPlusSign,
            number.country_code_source()
        );
    }

    #[test]
    fn set_and_unset_fields_are_distinguished() {
        let mut with_source = PhoneNumber::new();
        with_source.set_country_code(39);
        with_source.set_national_number(236618300);

        let mut without_source = with_source.clone();
        assert_eq!(with_source, without_source);

        with_source.set_country_code_source(CountryCodeSource::FromNumberWithPlusSign);
        assert_ne!(with_source, without_source);

        without_source.set_country_code_source(CountryCodeSource::FromNumberWithPlusSign);
        assert_eq!(with_source, without_source);
    }
}
