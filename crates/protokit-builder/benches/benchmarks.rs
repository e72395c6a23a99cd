//! Protokit Performance Benchmarks
//!
//! Generation is expected to be effectively instantaneous. These cover the
//! hot path a host hits per session:
//! - full generate() for each preset
//! - input fingerprinting across history lengths
//! - document validation

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use protokit_builder::{Preset, ProtocolGenerator};
use protokit_common::{ChildProfile, InputFingerprint, SessionHistory, SessionRecord};

fn sessions(count: usize) -> Vec<SessionRecord> {
    let start = Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let mut record = SessionRecord::new(start - ChronoDuration::days(i as i64));
            record.completed = i > 0;
            record.completed_consent_frame = i > 0;
            record
        })
        .collect()
}

fn child() -> ChildProfile {
    ChildProfile::new("Bench")
        .with_language("en")
        .with_condition("multiple_birth")
}

// ============ GENERATION BENCHMARKS ============

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.measurement_time(Duration::from_secs(5));

    let profile = child();
    let history = sessions(3);

    for preset in [Preset::Empty, Preset::LookingTime] {
        let generator = ProtocolGenerator::from_boxed(preset.builder().unwrap());
        group.bench_with_input(BenchmarkId::new("preset", preset), &preset, |b, _| {
            b.iter(|| {
                generator
                    .generate(Some(black_box(&profile)), black_box(&history))
                    .unwrap()
            })
        });
    }

    group.finish();
}

// ============ FINGERPRINT BENCHMARKS ============

fn bench_fingerprint(c: &mut Criterion) {
    let mut group = c.benchmark_group("fingerprint");
    let profile = child();

    for len in [1usize, 5, 25].iter() {
        let history = SessionHistory::new(sessions(*len)).unwrap();
        group.bench_with_input(BenchmarkId::new("history", len), len, |b, _| {
            b.iter(|| InputFingerprint::compute(black_box(&profile), black_box(&history)).unwrap())
        });
    }

    group.finish();
}

// ============ VALIDATION BENCHMARKS ============

fn bench_validate(c: &mut Criterion) {
    let protocol = protokit_builder::presets::looking_time().unwrap();
    let document = protocol.document().clone();

    c.bench_function("validate/looking-time", |b| {
        b.iter(|| black_box(&document).validate().unwrap())
    });
}

criterion_group!(benches, bench_generate, bench_fingerprint, bench_validate);
criterion_main!(benches);
