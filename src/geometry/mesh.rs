// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Polygon mesh representation and validation

use crate::error::{MeshError, MeshResult};
use ahash::{AHashMap, AHashSet};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Ordered, counter-clockwise list of vertex indices
pub type Face = Vec<usize>;

/// Vertex, edge and face totals of a mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeshCounts {
    pub vertices: usize,
    pub edges: usize,
    pub faces: usize,
}

impl MeshCounts {
    pub const fn new(vertices: usize, edges: usize, faces: usize) -> Self {
        Self {
            vertices,
            edges,
            faces,
        }
    }

    /// V - E + F
    pub fn euler_characteristic(&self) -> i64 {
        self.vertices as i64 - self.edges as i64 + self.faces as i64
    }
}

/// Polyhedral mesh with arbitrary polygon faces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    pub fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, position: Point3<f64>) -> usize {
        let index = self.vertices.len();
        self.vertices.push(position);
        index
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of undirected edges, assuming every edge borders two faces
    pub fn edge_count(&self) -> usize {
        self.faces.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn counts(&self) -> MeshCounts {
        MeshCounts::new(self.vertex_count(), self.edge_count(), self.face_count())
    }

    pub fn euler_characteristic(&self) -> i64 {
        self.counts().euler_characteristic()
    }

    /// Undirected edges, each listed once with the lower index first.
    ///
    /// On a closed orientable mesh every edge appears as `a -> b` with
    /// `a < b` in exactly one face, so no deduplication is needed.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.faces
            .iter()
            .flat_map(|face| face_edges(face))
            .filter(|&(a, b)| a < b)
            .collect()
    }

    /// Check face arity and index range, and that no face repeats a vertex
    pub fn check_faces(&self) -> MeshResult<()> {
        if self.vertices.is_empty() || self.faces.is_empty() {
            return Err(MeshError::EmptyMesh {
                vertices: self.vertices.len(),
                faces: self.faces.len(),
            });
        }

        let vertex_count = self.vertices.len();
        for (face_idx, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(MeshError::DegenerateFace {
                    face: face_idx,
                    len: face.len(),
                });
            }
            let mut seen = AHashSet::with_capacity(face.len());
            for &index in face {
                if index >= vertex_count {
                    return Err(MeshError::IndexOutOfRange {
                        face: face_idx,
                        index,
                        vertex_count,
                    });
                }
                if !seen.insert(index) {
                    return Err(MeshError::RepeatedVertex {
                        face: face_idx,
                        vertex: index,
                    });
                }
            }
        }
        Ok(())
    }

    /// Full structural validation: closed, orientable 2-manifold.
    ///
    /// Every directed edge must occur once and be matched by its reverse,
    /// every vertex must belong to a face, and no two faces may be the same
    /// cycle.
    pub fn validate(&self) -> MeshResult<()> {
        self.check_faces()?;

        let mut half_edges: AHashMap<(usize, usize), usize> = AHashMap::new();
        for (face_idx, face) in self.faces.iter().enumerate() {
            for (from, to) in face_edges(face) {
                if half_edges.insert((from, to), face_idx).is_some() {
                    return Err(MeshError::NonManifoldEdge { from, to });
                }
            }
        }
        for &(from, to) in half_edges.keys() {
            if !half_edges.contains_key(&(to, from)) {
                return Err(MeshError::OpenEdge { from, to });
            }
        }

        let mut used = vec![false; self.vertices.len()];
        for &index in self.faces.iter().flatten() {
            used[index] = true;
        }
        if let Some(isolated) = used.iter().position(|&u| !u) {
            return Err(MeshError::IsolatedVertex(isolated));
        }

        let mut cycles: AHashMap<Face, usize> = AHashMap::with_capacity(self.faces.len());
        for (face_idx, face) in self.faces.iter().enumerate() {
            if let Some(first) = cycles.insert(canonical_rotation(face), face_idx) {
                return Err(MeshError::DuplicateFace {
                    first,
                    second: face_idx,
                });
            }
        }

        Ok(())
    }

    /// Uniformly scale about the origin
    pub fn scale(&mut self, factor: f64) {
        for vertex in &mut self.vertices {
            *vertex = Point3::from(vertex.coords * factor);
        }
    }

    pub fn translate(&mut self, offset: &Vector3<f64>) {
        for vertex in &mut self.vertices {
            *vertex += offset;
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Consecutive vertex pairs of a face, wrapping from last to first
pub fn face_edges<T: Copy>(face: &[T]) -> impl Iterator<Item = (T, T)> + '_ {
    let n = face.len();
    (0..n).map(move |i| (face[i], face[(i + 1) % n]))
}

/// Consecutive vertex triples of a face, wrapping around
pub fn face_corners<T: Copy>(face: &[T]) -> impl Iterator<Item = (T, T, T)> + '_ {
    let n = face.len();
    (0..n).map(move |i| (face[i], face[(i + 1) % n], face[(i + 2) % n]))
}

/// Rotate a face so its smallest index comes first, keeping the winding
pub fn canonical_rotation(face: &[usize]) -> Face {
    let start = face
        .iter()
        .enumerate()
        .min_by_key(|&(_, &v)| v)
        .map(|(i, _)| i)
        .unwrap_or(0);
    face[start..].iter().chain(&face[..start]).copied().collect()
}
