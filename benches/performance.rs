// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use conway_hart::canon::{canonicalize, CanonicalizeParams};
use conway_hart::conway::{apply_notation, ConwayOp, OperatorParams};
use conway_hart::PlatonicSolid;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("operators");
    let params = OperatorParams::default();
    let icosa = PlatonicSolid::Icosahedron.to_mesh();

    for op in ConwayOp::ALL {
        group.bench_with_input(BenchmarkId::new(op.name(), "icosa"), &icosa, |b, mesh| {
            b.iter(|| op.apply(black_box(mesh), &params).unwrap());
        });
    }

    // Larger input: truncated icosahedron, 60 vertices and 32 faces
    let soccer = apply_notation(&icosa, "dk", &params).unwrap();
    for op in [ConwayOp::Dual, ConwayOp::Whirl] {
        group.bench_with_input(BenchmarkId::new(op.name(), "dk-icosa"), &soccer, |b, mesh| {
            b.iter(|| op.apply(black_box(mesh), &params).unwrap());
        });
    }

    group.finish();
}

fn bench_canonicalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonicalize");
    let params = OperatorParams::default();
    let gyro_cube = apply_notation(&PlatonicSolid::Cube.to_mesh(), "g", &params).unwrap();

    for iterations in [20, 200] {
        let canon = CanonicalizeParams::new()
            .with_iterations(iterations)
            .with_scale_factor(0.2)
            .with_tolerance(0.0);
        group.bench_with_input(
            BenchmarkId::new("gyro_cube", iterations),
            &canon,
            |b, canon| {
                b.iter(|| canonicalize(black_box(&gyro_cube), canon).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_operators, bench_canonicalize);
criterion_main!(benches);
