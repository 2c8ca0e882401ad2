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

use crate::metadata::MetadataLoader;
use crate::PhoneNumberUtil;

use super::region_code::RegionCode;
use super::{get_phone_util, test_country_code_to_regions, TEST_METADATA};

#[test]
fn load_us_metadata() {
    let phone_util = get_phone_util();
    let metadata = phone_util
        .metadata_for_region(RegionCode::us())
        .expect("US metadata should exist");
    assert_eq!(RegionCode::us(), metadata.id());
    assert_eq!(1, metadata.country_code());
    assert_eq!("011", metadata.international_prefix());
    assert!(metadata.has_national_prefix());
    assert_eq!("1", metadata.national_prefix());
    assert_eq!("1", metadata.national_prefix_for_parsing());
    assert!(metadata.main_country_for_code());
    assert!(!metadata.leading_zero_possible());

    assert_eq!(2, metadata.number_formats().len());
    assert_eq!(
        r"(\d{3})(\d{3})(\d{4})",
        metadata.number_formats()[1].pattern()
    );
    assert_eq!("($1) $2-$3", metadata.number_formats()[1].format());
    assert_eq!(
        Some(r"[13-689]\d{9}|2[0-35-9]\d{8}"),
        metadata.general_desc().national_number_pattern()
    );
    assert_eq!(
        Some(r"[13-689]\d{9}|2[0-35-9]\d{8}"),
        metadata.fixed_line().national_number_pattern()
    );
    assert_eq!(Some(r"900\d{7}"), metadata.premium_rate().national_number_pattern());
    // Fixed-line and mobile share their pattern.
    assert!(metadata.same_mobile_and_fixed_line_pattern());
    // Absent categories stay non-matching.
    assert!(!metadata.shared_cost().has_national_number_pattern());
    assert_eq!(None, metadata.shared_cost().example_number());
}

#[test]
fn load_de_metadata() {
    let phone_util = get_phone_util();
    let metadata = phone_util
        .metadata_for_region(RegionCode::de())
        .expect("DE metadata should exist");
    assert_eq!(49, metadata.country_code());
    assert_eq!("00", metadata.international_prefix());
    assert_eq!("0", metadata.national_prefix());
    assert_eq!(3, metadata.number_formats().len());
    assert_eq!(
        vec!["3[02]|40|[68]9".to_string()],
        metadata.number_formats()[0].leading_digits_pattern()
    );
    assert_eq!(r"(\d{2})(\d{3,11})", metadata.number_formats()[0].pattern());
    // The parent formatting rule has its placeholders resolved.
    assert_eq!(
        "0$1",
        metadata.number_formats()[0].national_prefix_formatting_rule()
    );
    assert!(!metadata.same_mobile_and_fixed_line_pattern());
}

#[test]
fn formatting_rules_are_resolved_per_element() {
    let phone_util = get_phone_util();
    let gb = phone_util
        .metadata_for_region(RegionCode::gb())
        .expect("GB metadata should exist");
    assert_eq!("(0$1)", gb.number_formats()[0].national_prefix_formatting_rule());

    let br = phone_util
        .metadata_for_region(RegionCode::br())
        .expect("BR metadata should exist");
    assert_eq!("($1)", br.number_formats()[0].national_prefix_formatting_rule());
    assert_eq!(
        "0 $CC ($1)",
        br.number_formats()[0].domestic_carrier_code_formatting_rule()
    );
}

#[test]
fn intl_formats_keep_only_explicit_entries() {
    let phone_util = get_phone_util();

    let us = phone_util
        .metadata_for_region(RegionCode::us())
        .expect("US metadata should exist");
    assert_eq!(1, us.intl_number_formats().len());
    assert_eq!("$1-$2-$3", us.intl_number_formats()[0].format());

    // No explicit international format leaves the list empty.
    let au = phone_util
        .metadata_for_region(RegionCode::au())
        .expect("AU metadata should exist");
    assert!(au.intl_number_formats().is_empty());
}

#[test]
fn descriptor_inheritance_from_general_desc() {
    let phone_util = get_phone_util();
    let us = phone_util
        .metadata_for_region(RegionCode::us())
        .expect("US metadata should exist");
    // tollFree declares no possible pattern of its own.
    assert_eq!(
        us.general_desc().possible_number_pattern(),
        us.toll_free().possible_number_pattern()
    );
    assert_eq!(Some("8002345678"), us.toll_free().example_number());
}

#[test]
fn non_geographical_entities_are_looked_up_by_calling_code() {
    let phone_util = get_phone_util();
    // The "001" territories are reachable by calling code only.
    assert!(phone_util.metadata_for_region(RegionCode::un001()).is_none());

    let loader = MetadataLoader::from_document_bytes(TEST_METADATA).unwrap();
    let toll_free = loader
        .for_non_geographical_entity(800)
        .expect("800 entity should exist");
    assert_eq!(RegionCode::un001(), toll_free.id());
    assert!(toll_free.leading_zero_possible());
    let premium = loader
        .for_non_geographical_entity(979)
        .expect("979 entity should exist");
    assert_eq!(979, premium.country_code());
    assert!(loader.for_non_geographical_entity(888).is_none());
}

#[test]
fn region_metadata_is_memoized() {
    let phone_util = get_phone_util();
    let first = phone_util.metadata_for_region(RegionCode::us()).unwrap();
    let second = phone_util.metadata_for_region(RegionCode::us()).unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));
}

#[test]
fn malformed_patterns_collapse_to_non_matching() {
    let document = br#"{
      "phoneNumberMetadata": {
        "territories": {
          "territory": [
            {
              "id": "XX",
              "countryCode": 998,
              "internationalPrefix": "00",
              "generalDesc": {
                "nationalNumberPattern": "\\d{4,   8}",
                "possibleNumberPattern": "(\\d{4}|)"
              },
              "fixedLine": {
                "nationalNumberPattern": "NA"
              }
            }
          ]
        }
      }
    }"#;
    let loader = MetadataLoader::from_document_bytes(document).unwrap();
    let metadata = loader.for_region("XX").expect("XX should load");
    // Whitespace inside a pattern is collapsed away.
    assert_eq!(
        Some(r"\d{4,8}"),
        metadata.general_desc().national_number_pattern()
    );
    // The `|)` malformation and the NA sentinel both become non-matching.
    assert_eq!(None, metadata.general_desc().possible_number_pattern());
    assert!(!metadata.fixed_line().has_national_number_pattern());
}

#[test]
fn malformed_document_is_rejected() {
    assert!(MetadataLoader::from_document_bytes(b"not a document").is_err());
    assert!(PhoneNumberUtil::new(b"{}", test_country_code_to_regions()).is_err());
}
