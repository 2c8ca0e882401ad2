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

//! Typed view of the region-metadata document. The document is a nested
//! keyed tree whose outer path is `phoneNumberMetadata.territories.
//! territory[]`; each territory element carries the dialing rules and
//! number descriptors of one region (or of one non-geographic entity,
//! `id == "001"`).

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MetadataDocument {
    pub phone_number_metadata: PhoneNumberMetadataElement,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PhoneNumberMetadataElement {
    pub territories: TerritoriesElement,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TerritoriesElement {
    pub territory: Vec<TerritoryElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TerritoryElement {
    pub id: String,
    pub country_code: i32,
    pub international_prefix: Option<String>,
    pub preferred_international_prefix: Option<String>,
    pub national_prefix: Option<String>,
    pub national_prefix_for_parsing: Option<String>,
    pub national_prefix_transform_rule: Option<String>,
    /// Parent-level formatting rules; number-format elements without their
    /// own rule inherit these.
    pub national_prefix_formatting_rule: Option<String>,
    pub carrier_code_formatting_rule: Option<String>,
    pub preferred_extn_prefix: Option<String>,
    pub leading_digits: Option<String>,
    #[serde(default)]
    pub main_country_for_code: bool,
    #[serde(default)]
    pub leading_zero_possible: bool,
    #[serde(default)]
    pub mobile_number_portable_region: bool,
    pub general_desc: Option<DescElement>,
    pub fixed_line: Option<DescElement>,
    pub mobile: Option<DescElement>,
    pub toll_free: Option<DescElement>,
    pub premium_rate: Option<DescElement>,
    pub shared_cost: Option<DescElement>,
    pub voip: Option<DescElement>,
    pub personal_number: Option<DescElement>,
    pub pager: Option<DescElement>,
    pub uan: Option<DescElement>,
    pub voicemail: Option<DescElement>,
    pub no_international_dialling: Option<DescElement>,
    pub emergency: Option<DescElement>,
    pub standard_rate: Option<DescElement>,
    pub short_code: Option<DescElement>,
    pub carrier_specific: Option<DescElement>,
    pub available_formats: Option<AvailableFormatsElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DescElement {
    pub national_number_pattern: Option<String>,
    pub possible_number_pattern: Option<String>,
    pub example_number: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AvailableFormatsElement {
    pub number_format: Vec<NumberFormatElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NumberFormatElement {
    pub pattern: String,
    pub format: String,
    #[serde(default)]
    pub leading_digits: Vec<String>,
    pub national_prefix_formatting_rule: Option<String>,
    #[serde(default)]
    pub national_prefix_optional_when_formatting: bool,
    pub carrier_code_formatting_rule: Option<String>,
    pub intl_format: Option<String>,
}
