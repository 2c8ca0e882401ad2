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

use thiserror::Error;

/// Why an input string could not be parsed into a [`crate::PhoneNumber`].
///
/// Only the parser fails; the validator answers `false`/`Unknown` and the
/// formatter returns its input unchanged when given something it cannot
/// work with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseError {
    /// The input was empty, or survived none of the viability checks.
    #[error("the string supplied did not seem to be a phone number")]
    NotANumber,
    /// The input exceeded the length bound before parsing, or the national
    /// significant number came out longer than any real number.
    #[error("the string supplied was too long to be a phone number")]
    TooLong,
    /// The national significant number came out shorter than any real
    /// number.
    #[error("the national significant number was too short")]
    TooShortNsn,
    /// An international dialing prefix was recognized and stripped, but
    /// what remained cannot be a viable number.
    #[error("too few digits remained after the international dialing prefix")]
    TooShortAfterIdd,
    /// No country calling code could be derived: the default region was
    /// missing or unknown and the number carried no `+`, or the digits
    /// after a `+` matched no known calling code.
    #[error("could not interpret a valid country calling code")]
    InvalidCountryCode,
}
