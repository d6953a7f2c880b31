// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for mesh rewriting and canonicalization

use thiserror::Error;

/// Errors raised by malformed input meshes, flag decoding and bad parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// Mesh has no vertices or no faces.
    #[error("Mesh is empty ({vertices} vertices, {faces} faces)")]
    EmptyMesh { vertices: usize, faces: usize },

    /// A face references a vertex that does not exist.
    #[error("Face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: usize,
        vertex_count: usize,
    },

    /// A face has fewer than three vertices.
    #[error("Face {face} has {len} vertices (need at least 3)")]
    DegenerateFace { face: usize, len: usize },

    /// A face lists the same vertex twice.
    #[error("Face {face} repeats vertex {vertex}")]
    RepeatedVertex { face: usize, vertex: usize },

    /// A directed edge is used by more than one face.
    #[error("Directed edge {from} -> {to} appears in more than one face")]
    NonManifoldEdge { from: usize, to: usize },

    /// A directed edge has no face on the other side.
    #[error("Edge {from} -> {to} has no opposite half-edge (mesh is not closed)")]
    OpenEdge { from: usize, to: usize },

    /// A vertex is not used by any face.
    #[error("Vertex {0} is not referenced by any face")]
    IsolatedVertex(usize),

    /// Two faces are the same cycle up to rotation.
    #[error("Faces {first} and {second} are identical up to rotation")]
    DuplicateFace { first: usize, second: usize },

    /// A flag was declared twice for the same face and origin.
    #[error("Duplicate flag for face {face} at vertex {vertex}")]
    DuplicateFlag { face: String, vertex: String },

    /// A structural vertex key was registered twice.
    #[error("Vertex key {0} registered twice")]
    DuplicateVertexKey(String),

    /// Decoding could not find the successor of a vertex in a face.
    #[error("No flag for face {face} after vertex {vertex}")]
    MissingFlag { face: String, vertex: String },

    /// Decoding met a vertex key that has no index.
    #[error("Vertex key {0} has no vertex index")]
    UnknownVertexKey(String),

    /// A decoded face cycle did not close at its expected length.
    #[error("Face {face} cycle closed after {found} vertices, expected {expected}")]
    CycleMismatch {
        face: String,
        expected: usize,
        found: usize,
    },

    /// A decoded face cycle did not return to its seed vertex.
    #[error("Face {face} cycle does not close after {expected} vertices")]
    OpenCycle { face: String, expected: usize },

    /// A Conway notation string contains an unknown operator.
    #[error("Unknown Conway operator '{0}'")]
    UnknownOperator(String),

    /// A numeric parameter is out of range.
    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Result type for mesh operations.
pub type MeshResult<T> = std::result::Result<T, MeshError>;
