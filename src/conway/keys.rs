// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Structural vertex keys, face tags and the key-to-index vertex table

use crate::error::{MeshError, MeshResult};
use ahash::AHashMap;
use nalgebra::Point3;
use std::fmt;

/// Identity of a vertex in an operator's output, derived from the input
/// element it was built from.
///
/// Keys compare and hash structurally, so two logical vertices share a key
/// only if they are the same vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VertexKey {
    /// Vertex carried over from the input mesh
    Original(usize),
    /// Centroid of an input face
    FaceCentroid(usize),
    /// Midpoint of an undirected edge; endpoints stored sorted
    EdgeMidpoint(usize, usize),
    /// Point one third along a directed edge, nearer `from`
    EdgeThird { from: usize, to: usize },
    /// Point inside `face` derived from its corner at `vertex`
    FaceInset { face: usize, vertex: usize },
}

impl VertexKey {
    /// Midpoint key; argument order does not matter
    pub fn edge_midpoint(a: usize, b: usize) -> Self {
        Self::EdgeMidpoint(a.min(b), a.max(b))
    }

    /// Third-point key; argument order does matter
    pub fn edge_third(from: usize, to: usize) -> Self {
        Self::EdgeThird { from, to }
    }

    pub fn face_inset(face: usize, vertex: usize) -> Self {
        Self::FaceInset { face, vertex }
    }
}

impl fmt::Display for VertexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original(v) => write!(f, "v{}", v),
            Self::FaceCentroid(face) => write!(f, "vf{}", face),
            Self::EdgeMidpoint(a, b) => write!(f, "v{}:{}", a, b),
            Self::EdgeThird { from, to } => write!(f, "v{}>{}", from, to),
            Self::FaceInset { face, vertex } => write!(f, "vf{}:{}", face, vertex),
        }
    }
}

/// Identity of a face in an operator's output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FaceTag {
    /// Face derived from an input face
    Face(usize),
    /// Face derived from an input vertex
    Vertex(usize),
    /// Face derived from an undirected input edge; endpoints stored sorted
    Edge(usize, usize),
    /// Face derived from the corner of `face` at `vertex`
    Corner { face: usize, vertex: usize },
}

impl FaceTag {
    pub fn edge(a: usize, b: usize) -> Self {
        Self::Edge(a.min(b), a.max(b))
    }

    pub fn corner(face: usize, vertex: usize) -> Self {
        Self::Corner { face, vertex }
    }
}

impl fmt::Display for FaceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Face(face) => write!(f, "f{}", face),
            Self::Vertex(v) => write!(f, "fv{}", v),
            Self::Edge(a, b) => write!(f, "fe{}:{}", a, b),
            Self::Corner { face, vertex } => write!(f, "f{}:{}", face, vertex),
        }
    }
}

/// Lookup from vertex key to output vertex index
pub type KeyIndex = AHashMap<VertexKey, usize>;

/// Output vertex positions together with their keys.
///
/// Vertices are indexed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct VertexTable {
    positions: Vec<Point3<f64>>,
    index: KeyIndex,
}

impl VertexTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            index: KeyIndex::with_capacity(capacity),
        }
    }

    /// Table seeded with the input vertices as `Original(i) -> i`
    pub fn with_originals(vertices: &[Point3<f64>], extra: usize) -> Self {
        let mut table = Self::with_capacity(vertices.len() + extra);
        for (i, position) in vertices.iter().enumerate() {
            table.index.insert(VertexKey::Original(i), i);
            table.positions.push(*position);
        }
        table
    }

    /// Register a new vertex. A key may only be registered once.
    pub fn insert(&mut self, key: VertexKey, position: Point3<f64>) -> MeshResult<usize> {
        if self.index.contains_key(&key) {
            return Err(MeshError::DuplicateVertexKey(key.to_string()));
        }
        let index = self.positions.len();
        self.index.insert(key, index);
        self.positions.push(position);
        Ok(index)
    }

    /// Return the index for `key`, creating the vertex on first use
    pub fn get_or_insert_with(
        &mut self,
        key: VertexKey,
        position: impl FnOnce() -> Point3<f64>,
    ) -> usize {
        if let Some(&index) = self.index.get(&key) {
            return index;
        }
        let index = self.positions.len();
        self.positions.push(position());
        self.index.insert(key, index);
        index
    }

    pub fn get(&self, key: &VertexKey) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn keys(&self) -> &KeyIndex {
        &self.index
    }

    pub fn into_positions(self) -> Vec<Point3<f64>> {
        self.positions
    }
}
