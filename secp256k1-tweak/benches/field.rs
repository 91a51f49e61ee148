//! secp256k1 field element benchmarks

use criterion::{
    BenchmarkGroup, Criterion, criterion_group, criterion_main, measurement::Measurement,
};
use hex_literal::hex;
use secp256k1_tweak::FieldElement;
use std::hint::black_box;

fn test_field_element_x() -> FieldElement {
    let bytes = hex!("bb488aef416a41d7680d1cf01d70f59b60d7f5f77e30e78b8bf9d2d882f156a6");
    FieldElement::from_bytes(&bytes.into()).unwrap()
}

fn test_field_element_y() -> FieldElement {
    let bytes = hex!("67e2f68071ed8281e8aed6bcf1c5207c5e633722d920afd6ae22d06eeb8035e3");
    FieldElement::from_bytes(&bytes.into()).unwrap()
}

fn bench_field_element_mul<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let x = test_field_element_x();
    let y = test_field_element_y();
    group.bench_function("mul", |b| b.iter(|| &black_box(x) * &black_box(y)));
}

fn bench_field_element_square<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let x = test_field_element_x();
    group.bench_function("square", |b| b.iter(|| black_box(x).square()));
}

fn bench_field_element_sqrt<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let x = test_field_element_x();
    group.bench_function("sqrt", |b| b.iter(|| black_box(x).sqrt()));
}

fn bench_field_element_invert<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let x = test_field_element_x();
    group.bench_function("invert", |b| b.iter(|| black_box(x).invert()));
}

fn bench_field_element(c: &mut Criterion) {
    let mut group = c.benchmark_group("field element operations");
    bench_field_element_mul(&mut group);
    bench_field_element_square(&mut group);
    bench_field_element_invert(&mut group);
    bench_field_element_sqrt(&mut group);
    group.finish();
}

criterion_group!(benches, bench_field_element);
criterion_main!(benches);
