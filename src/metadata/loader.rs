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
use log::warn;
use regex::Regex;
use thiserror::Error;

use super::document::{DescElement, MetadataDocument, TerritoryElement};
use super::model::{DescriptorPattern, NumberDescriptor, NumberFormat, RegionMetadata};
use crate::numberutil::REGION_CODE_FOR_NON_GEO_ENTITY;

/// Sentinel the document uses for "no numbers of this category exist".
const NA_PATTERN: &str = "NA";

/// Reference to the first captured group in resolved formatting rules.
const FIRST_GROUP: &str = "$1";

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("malformed metadata document: {0}")]
    Document(#[from] serde_json::Error),
}

/// Walks the parsed metadata document and materializes [`RegionMetadata`]
/// entries on demand. Entries are memoized per region code (and per
/// calling code for non-geographic entities); the maps only ever grow and
/// stay below a few hundred entries, so nothing is evicted.
pub(crate) struct MetadataLoader {
    territories: Vec<TerritoryElement>,
    regions: DashMap<String, Arc<RegionMetadata>>,
    non_geo_entities: DashMap<i32, Arc<RegionMetadata>>,
}

impl MetadataLoader {
    pub fn from_document_bytes(bytes: &[u8]) -> Result<Self, MetadataError> {
        let document: MetadataDocument = serde_json::from_slice(bytes)?;
        Ok(Self {
            territories: document.phone_number_metadata.territories.territory,
            regions: DashMap::new(),
            non_geo_entities: DashMap::new(),
        })
    }

    /// Metadata for a geographic region, built on first access.
    pub fn for_region(&self, region_code: &str) -> Option<Arc<RegionMetadata>> {
        if let Some(metadata) = self.regions.get(region_code) {
            return Some(metadata.value().clone());
        }
        let territory = self
            .territories
            .iter()
            .find(|t| t.id == region_code && t.id != REGION_CODE_FOR_NON_GEO_ENTITY)?;
        let metadata = self
            .regions
            .entry(region_code.to_string())
            .or_insert_with(|| Arc::new(build_region_metadata(territory)));
        Some(metadata.value().clone())
    }

    /// Metadata for a non-geographic entity (`id == "001"`), looked up by
    /// its country calling code.
    pub fn for_non_geographical_entity(
        &self,
        country_calling_code: i32,
    ) -> Option<Arc<RegionMetadata>> {
        if let Some(metadata) = self.non_geo_entities.get(&country_calling_code) {
            return Some(metadata.value().clone());
        }
        let territory = self.territories.iter().find(|t| {
            t.country_code == country_calling_code && t.id == REGION_CODE_FOR_NON_GEO_ENTITY
        })?;
        let metadata = self
            .non_geo_entities
            .entry(country_calling_code)
            .or_insert_with(|| Arc::new(build_region_metadata(territory)));
        Some(metadata.value().clone())
    }
}

fn build_region_metadata(territory: &TerritoryElement) -> RegionMetadata {
    let national_prefix = territory.national_prefix.clone().unwrap_or_default();
    let national_prefix_for_parsing = territory
        .national_prefix_for_parsing
        .as_deref()
        .and_then(|pattern| validate_pattern(pattern, &territory.id))
        .unwrap_or_else(|| national_prefix.clone());

    let general_desc = build_descriptor(territory.general_desc.as_ref(), None, &territory.id);
    let descriptor = |element: &Option<DescElement>| {
        build_descriptor(element.as_ref(), Some(&general_desc), &territory.id)
    };

    let fixed_line = descriptor(&territory.fixed_line);
    let mobile = descriptor(&territory.mobile);
    let toll_free = descriptor(&territory.toll_free);
    let premium_rate = descriptor(&territory.premium_rate);
    let shared_cost = descriptor(&territory.shared_cost);
    let voip = descriptor(&territory.voip);
    let personal_number = descriptor(&territory.personal_number);
    let pager = descriptor(&territory.pager);
    let uan = descriptor(&territory.uan);
    let voicemail = descriptor(&territory.voicemail);
    let no_international_dialling = descriptor(&territory.no_international_dialling);
    let emergency = descriptor(&territory.emergency);
    let standard_rate = descriptor(&territory.standard_rate);
    let short_code = descriptor(&territory.short_code);
    let carrier_specific = descriptor(&territory.carrier_specific);
    let same_mobile_and_fixed_line_pattern =
        fixed_line.national_number_pattern() == mobile.national_number_pattern();

    let mut number_formats = Vec::new();
    let mut intl_number_formats = Vec::new();
    if let Some(available_formats) = &territory.available_formats {
        for element in &available_formats.number_format {
            let national_prefix_formatting_rule = element
                .national_prefix_formatting_rule
                .as_deref()
                .or(territory.national_prefix_formatting_rule.as_deref())
                .map(|rule| resolve_formatting_rule(rule, &national_prefix))
                .unwrap_or_default();
            let domestic_carrier_code_formatting_rule = element
                .carrier_code_formatting_rule
                .as_deref()
                .or(territory.carrier_code_formatting_rule.as_deref())
                .map(|rule| resolve_formatting_rule(rule, &national_prefix))
                .unwrap_or_default();
            let format = NumberFormat {
                pattern: collapse_whitespace(&element.pattern),
                format: element.format.clone(),
                leading_digits_pattern: element
                    .leading_digits
                    .iter()
                    .filter_map(|pattern| validate_pattern(pattern, &territory.id))
                    .collect(),
                national_prefix_formatting_rule,
                national_prefix_optional_when_formatting: element
                    .national_prefix_optional_when_formatting,
                domestic_carrier_code_formatting_rule,
            };
            // Only explicitly different international formats are retained;
            // an absent intlFormat copies the national one without
            // contributing to the list, and "NA" suppresses it outright.
            // An empty list makes international formatting fall back to the
            // national formats.
            match element.intl_format.as_deref() {
                None | Some(NA_PATTERN) => {}
                Some(intl_format) => {
                    let mut intl = format.clone();
                    intl.format = intl_format.to_string();
                    intl_number_formats.push(intl);
                }
            }
            number_formats.push(format);
        }
    }

    RegionMetadata {
        id: territory.id.clone(),
        country_code: territory.country_code,
        international_prefix: territory
            .international_prefix
            .as_deref()
            .and_then(|pattern| validate_pattern(pattern, &territory.id))
            .unwrap_or_default(),
        preferred_international_prefix: territory.preferred_international_prefix.clone(),
        national_prefix,
        national_prefix_for_parsing,
        national_prefix_transform_rule: territory.national_prefix_transform_rule.clone(),
        preferred_extn_prefix: territory.preferred_extn_prefix.clone(),
        leading_digits: territory
            .leading_digits
            .as_deref()
            .and_then(|pattern| validate_pattern(pattern, &territory.id)),
        main_country_for_code: territory.main_country_for_code,
        leading_zero_possible: territory.leading_zero_possible,
        mobile_number_portable_region: territory.mobile_number_portable_region,
        same_mobile_and_fixed_line_pattern,
        general_desc,
        fixed_line,
        mobile,
        toll_free,
        premium_rate,
        shared_cost,
        voip,
        personal_number,
        pager,
        uan,
        voicemail,
        no_international_dialling,
        emergency,
        standard_rate,
        short_code,
        carrier_specific,
        number_formats,
        intl_number_formats,
    }
}

/// Builds one number descriptor. An absent element collapses to the
/// non-matching descriptor; a present element inherits missing sub-fields
/// from the general descriptor.
fn build_descriptor(
    element: Option<&DescElement>,
    general_desc: Option<&NumberDescriptor>,
    region: &str,
) -> NumberDescriptor {
    let Some(element) = element else {
        return NumberDescriptor::default();
    };
    let inherited = |own: Option<&String>, general: fn(&NumberDescriptor) -> Option<&str>| {
        own.map(|s| s.as_str())
            .or_else(|| general_desc.and_then(general))
            .map(str::to_owned)
    };
    let national_number_pattern = inherited(
        element.national_number_pattern.as_ref(),
        NumberDescriptor::national_number_pattern,
    );
    let possible_number_pattern = inherited(
        element.possible_number_pattern.as_ref(),
        NumberDescriptor::possible_number_pattern,
    );
    let example_number = element
        .example_number
        .clone()
        .or_else(|| general_desc.and_then(|d| d.example_number().map(str::to_owned)));

    NumberDescriptor {
        national_number_pattern: national_number_pattern
            .as_deref()
            .and_then(|pattern| compile_descriptor_pattern(pattern, region)),
        possible_number_pattern: possible_number_pattern
            .as_deref()
            .and_then(|pattern| compile_descriptor_pattern(pattern, region)),
        example_number,
    }
}

fn compile_descriptor_pattern(pattern: &str, region: &str) -> Option<DescriptorPattern> {
    let source = validate_pattern(pattern, region)?;
    match Regex::new(&source) {
        Ok(regex) => Some(DescriptorPattern::new(source, regex)),
        Err(err) => {
            warn!("dropping uncompilable pattern for region {region}: {err}");
            None
        }
    }
}

/// Normalizes a pattern taken from the document: embedded whitespace is
/// collapsed away, the `"NA"` sentinel and patterns showing the `|)`
/// malformation are rejected. Rejected patterns behave as never-matching.
fn validate_pattern(pattern: &str, region: &str) -> Option<String> {
    let collapsed = collapse_whitespace(pattern);
    if collapsed.is_empty() || collapsed == NA_PATTERN {
        return None;
    }
    if collapsed.contains("|)") {
        warn!("malformed pattern in metadata for region {region}: {collapsed}");
        return None;
    }
    Some(collapsed)
}

fn collapse_whitespace(pattern: &str) -> String {
    pattern.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Expands the placeholders of a formatting rule: `$NP` becomes the
/// region's national prefix and `$FG` the first-group reference.
fn resolve_formatting_rule(rule: &str, national_prefix: &str) -> String {
    rule.replace("$NP", national_prefix)
        .replace("$FG", FIRST_GROUP)
}

#[cfg(test)]
mod tests {
    use super::{resolve_formatting_rule, validate_pattern};

    #[test]
    fn validate_pattern_collapses_whitespace() {
        assert_eq!(
            Some(r"\d{4,5}".to_string()),
            validate_pattern("\\d{4,\n      5}", "XX")
        );
    }

    #[test]
    fn validate_pattern_rejects_malformed_alternation() {
        assert_eq!(None, validate_pattern(r"(\d{4}|)", "XX"));
        assert_eq!(None, validate_pattern("NA", "XX"));
    }

    #[test]
    fn formatting_rule_placeholders_are_resolved() {
        assert_eq!("(0$1)", resolve_formatting_rule("($NP$FG)", "0"));
        assert_eq!("8 ($1)", resolve_formatting_rule("$NP ($FG)", "8"));
    }
}
