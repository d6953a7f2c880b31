// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Conway-Hart polyhedron operators
//!
//! Builds new polyhedra from old ones with the Conway-Hart operators
//! (kis, dual, ambo, chamfer, gyro, propellor, whirl) and relaxes the result
//! towards canonical form: planar faces, edges tangent to the unit sphere.

pub mod canon;
pub mod config;
pub mod conway;
pub mod error;
pub mod geometry;

pub use canon::{canonicalize, CanonicalizeParams, CanonicalizeResult};
pub use config::EngineConfig;
pub use conway::{apply_notation, ConwayOp, OperatorParams};
pub use error::{MeshError, MeshResult};
pub use geometry::{analyze, Mesh, MeshCounts, MeshStats, PlatonicSolid};

/// Build a seed solid, apply a Conway notation string, and optionally
/// canonicalize the result
pub fn build(
    seed: PlatonicSolid,
    notation: &str,
    config: &EngineConfig,
    canonical: bool,
) -> MeshResult<Mesh> {
    let mesh = apply_notation(&seed.to_mesh(), notation, &config.operators)?;
    if canonical {
        Ok(canonicalize(&mesh, &config.canonicalize)?.mesh)
    } else {
        Ok(mesh)
    }
}
