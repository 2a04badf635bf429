// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use criterion::{criterion_group, criterion_main, Criterion};
use flake52::{radix64, FlakeId};

fn bench_next_id(c: &mut Criterion) {
    let flake = FlakeId::builder()
        .datacenter_id(1)
        .worker_id(1)
        .finalize()
        .expect("Could not create FlakeId");
    c.bench_function("next_id", |b| {
        b.iter(|| flake.next_id());
    });
}

fn bench_decode(c: &mut Criterion) {
    let flake = FlakeId::builder()
        .datacenter_id(1)
        .worker_id(1)
        .finalize()
        .expect("Could not create FlakeId");
    let id = flake.next_id().expect("Could not generate id").value();
    c.bench_function("decode", |b| {
        b.iter(|| flake.decode(id));
    });
}

fn bench_radix64_encode(c: &mut Criterion) {
    c.bench_function("radix64_encode", |b| {
        b.iter(|| radix64::encode(5_468_160));
    });
}

criterion_group!(flake_perf, bench_next_id, bench_decode, bench_radix64_encode);
criterion_main!(flake_perf);
