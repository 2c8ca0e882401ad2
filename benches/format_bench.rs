use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use telnum::{PhoneNumber, PhoneNumberFormat, PhoneNumberUtil};

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

fn formatting_corpus() -> Vec<PhoneNumber> {
    let mut us = PhoneNumber::new();
    us.set_country_code(1);
    us.set_national_number(6502530000);

    let mut gb = PhoneNumber::new();
    gb.set_country_code(44);
    gb.set_national_number(2087389353);

    let mut it = PhoneNumber::new();
    it.set_country_code(39);
    it.set_national_number(236618300);
    it.set_italian_leading_zero(true);

    let mut nz = PhoneNumber::new();
    nz.set_country_code(64);
    nz.set_national_number(33316005);
    nz.set_extension("1234".to_string());

    let mut toll_free = PhoneNumber::new();
    toll_free.set_country_code(800);
    toll_free.set_national_number(12345678);

    vec![us, gb, it, nz, toll_free]
}

fn format_benchmark(c: &mut Criterion) {
    let phone_util = PhoneNumberUtil::new(TEST_METADATA, country_code_to_regions())
        .expect("benchmark metadata should be valid");
    let corpus = formatting_corpus();

    let mut group = c.benchmark_group("formatting");
    for format in [
        PhoneNumberFormat::E164,
        PhoneNumberFormat::International,
        PhoneNumberFormat::National,
        PhoneNumberFormat::Rfc3966,
    ] {
        group.bench_function(format!("format {format:?}"), |b| {
            b.iter(|| {
                for number in &corpus {
                    let _ = phone_util.format(black_box(number), black_box(format));
                }
            })
        });
    }
    group.bench_function("format_out_of_country", |b| {
        b.iter(|| {
            for number in &corpus {
                let _ = phone_util
                    .format_out_of_country_calling_number(black_box(number), black_box("US"));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, format_benchmark);
criterion_main!(benches);
