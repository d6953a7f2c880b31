// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polyhedron analytics and statistics

use super::face_edge::{face_center, face_normal, tangent_point};
use super::Mesh;
use crate::error::MeshResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Topological and canonical-form statistics of a mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshStats {
    /// Number of vertices
    pub vertex_count: usize,
    /// Number of undirected edges
    pub edge_count: usize,
    /// Number of faces
    pub face_count: usize,
    /// V - E + F
    pub euler_characteristic: i64,
    /// Does every edge border exactly two consistently wound faces?
    pub is_closed_manifold: bool,
    /// Face degree (vertex count) to number of faces with that degree
    pub face_degrees: BTreeMap<usize, usize>,
    /// Smallest distance from the origin to an edge line
    pub min_tangent_radius: f64,
    /// Largest distance from the origin to an edge line
    pub max_tangent_radius: f64,
    /// Largest distance of a vertex from its face's mean plane
    pub max_planarity_error: f64,
}

impl MeshStats {
    /// Create empty stats
    pub fn empty() -> Self {
        Self {
            vertex_count: 0,
            edge_count: 0,
            face_count: 0,
            euler_characteristic: 0,
            is_closed_manifold: false,
            face_degrees: BTreeMap::new(),
            min_tangent_radius: 0.0,
            max_tangent_radius: 0.0,
            max_planarity_error: 0.0,
        }
    }

    /// Largest deviation of any edge from tangency to the unit sphere
    pub fn max_tangent_error(&self) -> f64 {
        (self.max_tangent_radius - 1.0)
            .abs()
            .max((self.min_tangent_radius - 1.0).abs())
    }

    /// Pretty print statistics
    pub fn print(&self) {
        print!("{}", self);
    }
}

impl fmt::Display for MeshStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "╔══════════════════════════════════════════════════════════╗")?;
        writeln!(f, "║              POLYHEDRON ANALYTICS                        ║")?;
        writeln!(f, "╠══════════════════════════════════════════════════════════╣")?;
        writeln!(
            f,
            "║ Vertices:        {:>10}                              ║",
            self.vertex_count
        )?;
        writeln!(
            f,
            "║ Edges:           {:>10}                              ║",
            self.edge_count
        )?;
        writeln!(
            f,
            "║ Faces:           {:>10}                              ║",
            self.face_count
        )?;
        writeln!(
            f,
            "║ Euler (V-E+F):   {:>10}                              ║",
            self.euler_characteristic
        )?;
        writeln!(
            f,
            "║ Closed manifold: {:>10}                              ║",
            if self.is_closed_manifold { "Yes" } else { "No" }
        )?;
        writeln!(f, "║                                                          ║")?;
        writeln!(f, "║ Face degrees:                                            ║")?;
        for (degree, count) in &self.face_degrees {
            writeln!(
                f,
                "║   {:>2}-gons:       {:>10}                              ║",
                degree, count
            )?;
        }
        writeln!(f, "║                                                          ║")?;
        writeln!(
            f,
            "║ Tangent radius:  {:>10.6} .. {:<10.6}                ║",
            self.min_tangent_radius, self.max_tangent_radius
        )?;
        writeln!(
            f,
            "║ Planarity error: {:>10.3e}                              ║",
            self.max_planarity_error
        )?;
        writeln!(f, "╚══════════════════════════════════════════════════════════╝")
    }
}

/// Analyze a mesh and compute statistics
///
/// A mesh with no vertices or no faces gives [`MeshStats::empty`]. Otherwise
/// the faces must pass [`Mesh::check_faces`].
pub fn analyze(mesh: &Mesh) -> MeshResult<MeshStats> {
    if mesh.vertices.is_empty() || mesh.faces.is_empty() {
        return Ok(MeshStats::empty());
    }
    mesh.check_faces()?;

    let mut face_degrees = BTreeMap::new();
    for face in &mesh.faces {
        *face_degrees.entry(face.len()).or_insert(0) += 1;
    }

    let (min_tangent_radius, max_tangent_radius) = tangent_radius_range(mesh);

    Ok(MeshStats {
        vertex_count: mesh.vertex_count(),
        edge_count: mesh.edge_count(),
        face_count: mesh.face_count(),
        euler_characteristic: mesh.euler_characteristic(),
        is_closed_manifold: mesh.validate().is_ok(),
        face_degrees,
        min_tangent_radius,
        max_tangent_radius,
        max_planarity_error: max_planarity_error(mesh),
    })
}

/// Range of edge-line distances from the origin
pub(crate) fn tangent_radius_range(mesh: &Mesh) -> (f64, f64) {
    let mut min = f64::MAX;
    let mut max = 0.0_f64;
    for (a, b) in mesh.edges() {
        let radius = tangent_point(&mesh.vertices[a], &mesh.vertices[b])
            .coords
            .norm();
        min = min.min(radius);
        max = max.max(radius);
    }
    if min > max {
        (0.0, 0.0)
    } else {
        (min, max)
    }
}

/// Largest |n · (v - c)| over all faces and their vertices
pub(crate) fn max_planarity_error(mesh: &Mesh) -> f64 {
    let mut worst = 0.0_f64;
    for face in &mesh.faces {
        let center = face_center(&mesh.vertices, face, 0.0);
        let normal = face_normal(&mesh.vertices, face);
        for &i in face {
            worst = worst.max(normal.dot(&(mesh.vertices[i] - center)).abs());
        }
    }
    worst
}
