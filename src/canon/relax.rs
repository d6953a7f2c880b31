// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Relaxation passes.
//!
//! Every pass reads one snapshot of the vertex positions, gathers all
//! per-vertex displacements, and only then builds the new positions.

use super::params::CanonicalizeParams;
use super::result::CanonicalizeResult;
use crate::error::MeshResult;
use crate::geometry::face_edge::{face_center, face_normal, tangent_point};
use crate::geometry::{Face, Mesh};
use nalgebra::{Point3, Vector3};
use tracing::{debug, info, warn};

/// Pull every edge towards tangency with the unit sphere.
///
/// For each undirected edge with tangent point `t`, both endpoints move by
/// `scale * 0.5 * (1 - |t|) * t`. Returns the new positions.
///
/// # Errors
///
/// Fails on malformed faces.
pub fn tangentify(mesh: &Mesh, scale: f64) -> MeshResult<Vec<Point3<f64>>> {
    mesh.check_faces()?;
    Ok(tangentify_edges(&mesh.vertices, &mesh.edges(), scale))
}

/// Translate the mesh so the mean of its edge tangent points is the origin.
///
/// A mesh without faces has no edges and is returned unchanged.
///
/// # Errors
///
/// Fails on malformed faces.
pub fn recenter(mesh: &Mesh) -> MeshResult<Vec<Point3<f64>>> {
    if mesh.faces.is_empty() {
        return Ok(mesh.vertices.clone());
    }
    mesh.check_faces()?;
    Ok(recenter_edges(&mesh.vertices, &mesh.edges()))
}

/// Move every vertex towards the plane of each face it belongs to.
///
/// The plane is the face centroid and Newell normal taken from the input
/// positions; each face contributes `scale * (n . (c - v)) * n`.
///
/// # Errors
///
/// Fails on malformed faces.
pub fn planarize(mesh: &Mesh, scale: f64) -> MeshResult<Vec<Point3<f64>>> {
    mesh.check_faces()?;
    Ok(planarize_faces(&mesh.vertices, &mesh.faces, scale))
}

/// Relax a mesh towards canonical form.
///
/// Runs tangentify, recenter and planarize in turn until no vertex moves by
/// `tolerance` or more in a pass, or `iterations` passes have been made.
/// Face connectivity is untouched.
///
/// # Errors
///
/// Fails on invalid parameters or malformed faces.
pub fn canonicalize(mesh: &Mesh, params: &CanonicalizeParams) -> MeshResult<CanonicalizeResult> {
    params.validate()?;
    mesh.check_faces()?;

    let edges = mesh.edges();
    let mut vertices = mesh.vertices.clone();
    let mut max_change = 0.0;
    let mut iterations_run = 0;
    let mut converged = false;

    for iteration in 0..params.iterations {
        let next = tangentify_edges(&vertices, &edges, params.scale_factor);
        let next = recenter_edges(&next, &edges);
        let next = planarize_faces(&next, &mesh.faces, params.scale_factor);

        max_change = max_displacement(&vertices, &next);
        vertices = next;
        iterations_run = iteration + 1;
        debug!("canonicalize pass {}: max change {:.3e}", iterations_run, max_change);

        if max_change < params.tolerance {
            converged = true;
            break;
        }
    }

    if converged {
        info!(
            "Canonicalization converged after {} passes (max change {:.3e})",
            iterations_run, max_change
        );
    } else {
        warn!(
            "Canonicalization stopped after {} passes without converging (max change {:.3e})",
            iterations_run, max_change
        );
    }

    Ok(CanonicalizeResult {
        mesh: Mesh::from_parts(vertices, mesh.faces.clone()),
        iterations_run,
        max_change,
        converged,
    })
}

fn tangentify_edges(
    vertices: &[Point3<f64>],
    edges: &[(usize, usize)],
    scale: f64,
) -> Vec<Point3<f64>> {
    let mut shift = vec![Vector3::zeros(); vertices.len()];
    for &(a, b) in edges {
        let t = tangent_point(&vertices[a], &vertices[b]).coords;
        let c = t * (scale * 0.5 * (1.0 - t.norm()));
        shift[a] += c;
        shift[b] += c;
    }
    commit(vertices, &shift)
}

fn recenter_edges(vertices: &[Point3<f64>], edges: &[(usize, usize)]) -> Vec<Point3<f64>> {
    if edges.is_empty() {
        return vertices.to_vec();
    }
    let sum = edges.iter().fold(Vector3::zeros(), |acc, &(a, b)| {
        acc + tangent_point(&vertices[a], &vertices[b]).coords
    });
    let center = sum / edges.len() as f64;
    vertices.iter().map(|v| v - center).collect()
}

fn planarize_faces(vertices: &[Point3<f64>], faces: &[Face], scale: f64) -> Vec<Point3<f64>> {
    let mut shift = vec![Vector3::zeros(); vertices.len()];
    for face in faces {
        let center = face_center(vertices, face, 0.0);
        let normal = face_normal(vertices, face);
        for &v in face {
            shift[v] += normal * (scale * normal.dot(&(center - vertices[v])));
        }
    }
    commit(vertices, &shift)
}

fn commit(vertices: &[Point3<f64>], shift: &[Vector3<f64>]) -> Vec<Point3<f64>> {
    vertices.iter().zip(shift).map(|(v, d)| v + d).collect()
}

fn max_displacement(old: &[Point3<f64>], new: &[Point3<f64>]) -> f64 {
    old.iter()
        .zip(new)
        .map(|(a, b)| (b - a).norm())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshError;
    use crate::geometry::analytics::{max_planarity_error, tangent_radius_range};
    use crate::geometry::PlatonicSolid;
    use approx::assert_relative_eq;

    fn canonical_cube() -> Mesh {
        let mut cube = PlatonicSolid::Cube.to_mesh();
        cube.scale(std::f64::consts::FRAC_1_SQRT_2);
        cube
    }

    #[test]
    fn test_tangentify_fixed_point() {
        let cube = canonical_cube();
        for (before, after) in cube.vertices.iter().zip(tangentify(&cube, 0.5).unwrap()) {
            assert_relative_eq!(*before, after, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_tangentify_shrinks_large_cube() {
        let cube = PlatonicSolid::Cube.to_mesh();
        let moved = tangentify(&cube, 0.1).unwrap();
        // Edge tangent points sit at distance sqrt(2) > 1, so vertices move in
        for (before, after) in cube.vertices.iter().zip(&moved) {
            assert!(after.coords.norm() < before.coords.norm());
        }
        // Zero scale is the identity
        assert_eq!(tangentify(&cube, 0.0).unwrap(), cube.vertices);
    }

    #[test]
    fn test_recenter_symmetric_cube_is_identity() {
        let cube = PlatonicSolid::Cube.to_mesh();
        for (a, b) in recenter(&cube).unwrap().iter().zip(&cube.vertices) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_recenter_is_a_rigid_translation() {
        let mut cube = PlatonicSolid::Cube.to_mesh();
        cube.translate(&Vector3::new(0.5, -2.0, 1.0));
        let centered = recenter(&cube).unwrap();
        let offset = centered[0] - cube.vertices[0];
        assert!(offset.norm() > 0.1);
        for (a, b) in centered.iter().zip(&cube.vertices) {
            assert_relative_eq!(*a - *b, offset, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_recenter_without_edges_is_identity() {
        let mesh = Mesh::from_parts(vec![Point3::new(1.0, 2.0, 3.0)], vec![]);
        assert_eq!(recenter(&mesh).unwrap(), mesh.vertices);
    }

    #[test]
    fn test_passes_reject_out_of_range_index() {
        let mut cube = PlatonicSolid::Cube.to_mesh();
        cube.faces[0][0] = 42;
        let expected = MeshError::IndexOutOfRange {
            face: 0,
            index: 42,
            vertex_count: 8,
        };
        assert_eq!(tangentify(&cube, 0.1), Err(expected.clone()));
        assert_eq!(recenter(&cube), Err(expected.clone()));
        assert_eq!(planarize(&cube, 0.1), Err(expected.clone()));
        assert_eq!(
            canonicalize(&cube, &CanonicalizeParams::default()),
            Err(expected)
        );
    }

    #[test]
    fn test_planarize_flattens_warped_face() {
        let mut cube = PlatonicSolid::Cube.to_mesh();
        cube.vertices[7].z = 1.3;
        let before = max_planarity_error(&cube);
        let mut relaxed = cube.clone();
        for _ in 0..50 {
            relaxed.vertices = planarize(&relaxed, 0.2).unwrap();
        }
        assert!(max_planarity_error(&relaxed) < before * 0.01);
        assert_eq!(relaxed.faces, cube.faces);
    }

    #[test]
    fn test_canonical_cube_converges_immediately() {
        let result = canonicalize(&canonical_cube(), &CanonicalizeParams::default()).unwrap();
        assert!(result.converged);
        assert_eq!(result.iterations_run, 1);
        assert!(result.max_change < 1e-12);
    }

    #[test]
    fn test_cube_converges_with_full_step() {
        let params = CanonicalizeParams::new().with_scale_factor(1.0);
        let result = canonicalize(&PlatonicSolid::Cube.to_mesh(), &params).unwrap();
        assert!(result.converged);
        assert!(result.iterations_run <= 20);
        let (min, max) = tangent_radius_range(&result.mesh);
        assert_relative_eq!(min, 1.0, epsilon = 1e-6);
        assert_relative_eq!(max, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_zero_iterations_returns_input() {
        let cube = PlatonicSolid::Cube.to_mesh();
        let params = CanonicalizeParams::new().with_iterations(0);
        let result = canonicalize(&cube, &params).unwrap();
        assert_eq!(result.iterations_run, 0);
        assert!(!result.converged);
        assert_eq!(result.mesh, cube);
    }

    #[test]
    fn test_budget_exhausted_is_not_converged() {
        let params = CanonicalizeParams::new().with_iterations(3);
        let result = canonicalize(&PlatonicSolid::Cube.to_mesh(), &params).unwrap();
        assert_eq!(result.iterations_run, 3);
        assert!(!result.converged);
        assert!(result.max_change > params.tolerance);
    }
}
