use std::collections::HashMap;
use std::sync::Once;

use crate::PhoneNumberUtil;

mod metadata_tests;
mod region_code;

pub(crate) const TEST_METADATA: &[u8] = include_bytes!("../../resources/test_metadata.json");

static INIT_LOGGER: Once = Once::new();

pub(crate) fn get_phone_util() -> PhoneNumberUtil {
    INIT_LOGGER.call_once(|| {
        colog::default_builder()
            .filter_level(log::LevelFilter::Trace)
            .init();
    });
    PhoneNumberUtil::new(TEST_METADATA, test_country_code_to_regions())
        .expect("test metadata should be valid")
}

pub(crate) fn test_country_code_to_regions() -> HashMap<i32, Vec<String>> {
    HashMap::from([
        (1, vec!["US".to_string(), "BS".to_string()]),
        (39, vec!["IT".to_string()]),
        (44, vec!["GB".to_string()]),
        (49, vec!["DE".to_string()]),
        (54, vec!["AR".to_string()]),
        (55, vec!["BR".to_string()]),
        (61, vec!["AU".to_string()]),
        (64, vec!["NZ".to_string()]),
        (800, vec!["001".to_string()]),
        (979, vec!["001".to_string()]),
    ])
}
