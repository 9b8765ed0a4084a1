//! Codec Benchmarks
//!
//! Parse and serialize costs for EXIF blocks and ICC profiles.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use oxmeta_core::exif::{ExifIfd, ExifProfile, ExifTag, Rational};
use oxmeta_core::icc::ColorProfile;

/// EXIF block with `n` extra unknown tags in the Exif sub-IFD
fn build_exif(n: u16) -> Vec<u8> {
    let mut profile = ExifProfile::new();
    let _ = profile.set_value(ExifTag::MAKE, "Benchmark Camera Co.");
    let _ = profile.set_value(ExifTag::MODEL, "BC-1");
    let _ = profile.set_value(ExifTag::X_RESOLUTION, Rational::new(300, 1));
    let _ = profile.set_value(ExifTag::Y_RESOLUTION, Rational::new(300, 1));
    let _ = profile.set_value(ExifTag::EXPOSURE_TIME, Rational::new(1, 250));
    for i in 0..n {
        let _ = profile.set_value_in(ExifIfd::Exif, ExifTag(0xC000 + i), u32::from(i) * 7);
    }
    profile.to_byte_array()
}

// ============================================================================
// EXIF
// ============================================================================

fn bench_exif_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("exif_parse");

    for n in [0u16, 32, 256] {
        let data = build_exif(n);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &data, |b, data| {
            b.iter(|| ExifProfile::from_bytes(black_box(data)))
        });
    }

    group.finish();
}

fn bench_exif_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("exif_write");

    for n in [0u16, 32, 256] {
        let mut profile = ExifProfile::from_bytes(&build_exif(n)).unwrap();
        let _ = profile.set_value(ExifTag::SOFTWARE, "oxmeta");
        group.bench_with_input(BenchmarkId::from_parameter(n), &profile, |b, profile| {
            b.iter(|| black_box(profile).to_byte_array())
        });
    }

    group.finish();
}

// ============================================================================
// ICC
// ============================================================================

fn bench_icc(c: &mut Criterion) {
    let mut group = c.benchmark_group("icc");
    let data = ColorProfile::srgb().to_byte_array();
    group.throughput(Throughput::Bytes(data.len() as u64));

    group.bench_function("parse_srgb", |b| {
        b.iter(|| ColorProfile::from_bytes(black_box(&data)))
    });

    let mut edited = ColorProfile::from_bytes(&data).unwrap();
    edited.set_copyright("Benchmark");
    group.bench_function("write_modified_srgb", |b| {
        b.iter(|| black_box(&edited).to_byte_array())
    });

    group.finish();
}

criterion_group!(benches, bench_exif_parse, bench_exif_write, bench_icc);
criterion_main!(benches);
