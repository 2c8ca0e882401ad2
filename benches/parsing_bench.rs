use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use telnum::PhoneNumberUtil;

const TEST_METADATA: &[u8] = include_bytes!("../resources/test_metadata.json");

fn country_code_to_regions() -> HashMap<i32, Vec<String>> {
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

/// A mixed corpus: national, international, IDD-prefixed, vanity and
/// extension-carrying inputs give a more honest picture than one number.
fn parsing_corpus() -> Vec<(&'static str, &'static str)> {
    vec![
        ("0011 54 9 11 8765 4321 ext. 1234", "AU"),
        ("(650) 253-0000", "US"),
        ("+44 20 8765 4321", "GB"),
        ("020 8765 4321", "GB"),
        ("0343 15 555 1212", "AR"),
        ("02 36618300", "IT"),
        ("1-800-FLOWERS", "US"),
        ("tel:253-0000;phone-context=www.google.com", "US"),
        ("011 800 1234 5678", "US"),
    ]
}

fn parsing_benchmark(c: &mut Criterion) {
    let phone_util = PhoneNumberUtil::new(TEST_METADATA, country_code_to_regions())
        .expect("benchmark metadata should be valid");
    let corpus = parsing_corpus();

    let mut group = c.benchmark_group("parsing");
    group.bench_function("parse", |b| {
        b.iter(|| {
            for (number, region) in &corpus {
                let _ = phone_util.parse(black_box(number), black_box(region));
            }
        })
    });
    group.bench_function("parse_and_keep_raw_input", |b| {
        b.iter(|| {
            for (number, region) in &corpus {
                let _ = phone_util.parse_and_keep_raw_input(black_box(number), black_box(region));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, parsing_benchmark);
criterion_main!(benches);
