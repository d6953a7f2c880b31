// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Canonicalization convergence tests

use anyhow::Result;
use conway_hart::canon::{canonicalize, CanonicalizeParams};
use conway_hart::conway::{self, ConwayOp, OperatorParams};
use conway_hart::{analyze, Mesh, MeshError, PlatonicSolid};
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn assert_canonical(mesh: &Mesh, tolerance: f64, label: &str) {
    let stats = analyze(mesh).expect("mesh should analyze");
    println!(
        "{}: tangent radius {:.9}..{:.9}, planarity {:.3e}",
        label, stats.min_tangent_radius, stats.max_tangent_radius, stats.max_planarity_error
    );
    assert!(
        stats.max_tangent_error() < tolerance,
        "{}: tangent error {:.3e}",
        label,
        stats.max_tangent_error()
    );
    assert!(
        stats.max_planarity_error < tolerance,
        "{}: planarity error {:.3e}",
        label,
        stats.max_planarity_error
    );
}

#[test]
fn test_cube_converges_to_midsphere() -> Result<()> {
    // ±1 cube: edges start at distance √2 and must shrink onto the unit sphere
    let cube = PlatonicSolid::Cube.to_mesh();
    let params = CanonicalizeParams::new().with_iterations(500);
    let result = canonicalize(&cube, &params)?;

    println!(
        "cube: {} passes, max change {:.3e}",
        result.iterations_run, result.max_change
    );
    assert!(result.converged);
    assert!(result.iterations_run < 500);
    assert!(result.max_change < params.tolerance);
    assert_eq!(result.mesh.faces, cube.faces);
    assert_canonical(&result.mesh, 1e-6, "cube");
    Ok(())
}

#[test]
fn test_cube_default_budget_stops_short() -> Result<()> {
    // 20 passes at step 0.1: every edge is still about 0.036 outside the sphere
    let cube = PlatonicSolid::Cube.to_mesh();
    let params = CanonicalizeParams::default();
    assert_eq!(params.iterations, 20);
    assert_eq!(params.scale_factor, 0.1);

    let result = canonicalize(&cube, &params)?;
    let stats = analyze(&result.mesh)?;
    println!(
        "cube, default budget: radius {:.9}..{:.9}, max change {:.3e}",
        stats.min_tangent_radius, stats.max_tangent_radius, result.max_change
    );

    assert!(!result.converged);
    assert_eq!(result.iterations_run, 20);
    assert!(result.max_change > params.tolerance);
    assert!((stats.min_tangent_radius - 1.0356058).abs() < 1e-6);
    assert!((stats.max_tangent_radius - 1.0356058).abs() < 1e-6);
    assert!(stats.max_tangent_error() > 1e-2);
    Ok(())
}

#[test]
fn test_every_solid_canonicalizes() -> Result<()> {
    let params = CanonicalizeParams::new()
        .with_iterations(2000)
        .with_scale_factor(0.2);
    for solid in PlatonicSolid::ALL {
        let result = canonicalize(&solid.to_mesh(), &params)?;
        assert!(result.converged, "{} did not converge", solid);
        assert_canonical(&result.mesh, 1e-6, solid.name());
    }
    Ok(())
}

#[test]
fn test_canonical_input_is_a_fixed_point() -> Result<()> {
    // The ±1 tetrahedron already has its edge midpoints on the unit sphere
    let tetra = PlatonicSolid::Tetrahedron.to_mesh();
    let result = canonicalize(&tetra, &CanonicalizeParams::default())?;
    assert!(result.converged);
    assert_eq!(result.iterations_run, 1);
    for (a, b) in result.mesh.vertices.iter().zip(&tetra.vertices) {
        assert!((a - b).norm() < 1e-12);
    }
    Ok(())
}

#[test]
fn test_canonicalize_is_idempotent() -> Result<()> {
    let params = CanonicalizeParams::new()
        .with_iterations(2000)
        .with_scale_factor(0.2);
    let first = canonicalize(&PlatonicSolid::Icosahedron.to_mesh(), &params)?;
    let second = canonicalize(&first.mesh, &params)?;
    assert!(second.converged);
    assert!(second.iterations_run <= 3);
    Ok(())
}

#[test]
fn test_operator_results_canonicalize() -> Result<()> {
    let cube = PlatonicSolid::Cube.to_mesh();
    let op_params = OperatorParams::default();
    let params = CanonicalizeParams::new()
        .with_iterations(3000)
        .with_scale_factor(0.2);

    for op in [ConwayOp::Ambo, ConwayOp::Kis, ConwayOp::Dual, ConwayOp::Gyro] {
        let mesh = op.apply(&cube, &op_params)?;
        let result = canonicalize(&mesh, &params)?;
        println!("{}C: {} passes", op.symbol(), result.iterations_run);
        assert!(result.converged, "{} of cube did not converge", op);
        assert_eq!(result.mesh.faces, mesh.faces);
        assert_canonical(&result.mesh, 1e-5, op.name());
    }
    Ok(())
}

#[test]
fn test_perturbed_dodecahedron_recovers() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut mesh = PlatonicSolid::Dodecahedron.to_mesh();
    for v in &mut mesh.vertices {
        *v += Vector3::new(
            rng.gen_range(-0.05..0.05),
            rng.gen_range(-0.05..0.05),
            rng.gen_range(-0.05..0.05),
        );
    }

    let params = CanonicalizeParams::new()
        .with_iterations(3000)
        .with_scale_factor(0.2);
    let result = canonicalize(&mesh, &params)?;
    assert!(result.converged);
    assert_canonical(&result.mesh, 1e-6, "perturbed dodeca");
    Ok(())
}

#[test]
fn test_canonicalize_is_deterministic() -> Result<()> {
    let mesh = conway::whirl(&PlatonicSolid::Tetrahedron.to_mesh())?;
    let params = CanonicalizeParams::new().with_iterations(50);
    let a = canonicalize(&mesh, &params)?;
    let b = canonicalize(&mesh, &params)?;
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn test_zero_scale_changes_nothing() -> Result<()> {
    let cube = PlatonicSolid::Cube.to_mesh();
    let params = CanonicalizeParams::new().with_scale_factor(0.0);
    let result = canonicalize(&cube, &params)?;
    // Recenter still runs, but the cube is already centred
    assert!(result.converged);
    assert_eq!(result.iterations_run, 1);
    assert_eq!(result.mesh, cube);
    Ok(())
}

#[test]
fn test_invalid_parameters() {
    let cube = PlatonicSolid::Cube.to_mesh();
    let params = CanonicalizeParams::new().with_scale_factor(f64::NAN);
    assert!(matches!(
        canonicalize(&cube, &params),
        Err(MeshError::InvalidParameter {
            name: "scale_factor",
            ..
        })
    ));
}
