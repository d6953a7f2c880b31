// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - polyhedral mesh, face/edge helpers, solids and analytics

pub mod analytics;
pub mod face_edge;
mod mesh;
mod solids;

pub use analytics::{analyze, MeshStats};
pub use mesh::{canonical_rotation, face_corners, face_edges, Face, Mesh, MeshCounts};
pub use solids::PlatonicSolid;
