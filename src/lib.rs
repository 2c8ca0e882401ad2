//! Parsing, validation, classification and formatting of international
//! telephone numbers, driven by a per-region metadata document.
//!
//! The entry point is [`PhoneNumberUtil`], constructed from the raw bytes of
//! a region-metadata document plus a country-calling-code → region-codes
//! map. Parsed numbers are [`PhoneNumber`] values that can be validated,
//! classified and formatted back into any of the canonical presentations.

mod metadata;
mod numberutil;
mod phonenumber;
pub(crate) mod regex_util;
pub(crate) mod regexp_cache;

#[cfg(test)]
mod tests;

pub use metadata::{MetadataError, NumberDescriptor, NumberFormat, RegionMetadata};
pub use numberutil::constants;
pub use numberutil::{ParseError, PhoneNumberFormat, PhoneNumberType, PhoneNumberUtil};
pub use phonenumber::{CountryCodeSource, PhoneNumber};
