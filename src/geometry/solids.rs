// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Platonic solid generator.
//!
//! Every solid is centered on the origin with faces wound counter-clockwise
//! when seen from outside.

use super::{Mesh, MeshCounts};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const PHI: f64 = 1.618_033_988_749_895;

/// The five Platonic solids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatonicSolid {
    Tetrahedron,
    Cube,
    Octahedron,
    Dodecahedron,
    Icosahedron,
}

impl PlatonicSolid {
    pub const ALL: [PlatonicSolid; 5] = [
        Self::Tetrahedron,
        Self::Cube,
        Self::Octahedron,
        Self::Dodecahedron,
        Self::Icosahedron,
    ];

    /// Short identifier used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tetrahedron => "tetra",
            Self::Cube => "cube",
            Self::Octahedron => "octa",
            Self::Dodecahedron => "dodeca",
            Self::Icosahedron => "icosa",
        }
    }

    /// Vertex, edge and face counts of the solid
    pub fn expected_counts(&self) -> MeshCounts {
        match self {
            Self::Tetrahedron => MeshCounts::new(4, 6, 4),
            Self::Cube => MeshCounts::new(8, 12, 6),
            Self::Octahedron => MeshCounts::new(6, 12, 8),
            Self::Dodecahedron => MeshCounts::new(20, 30, 12),
            Self::Icosahedron => MeshCounts::new(12, 30, 20),
        }
    }

    pub fn to_mesh(&self) -> Mesh {
        match self {
            Self::Tetrahedron => generate_tetrahedron(),
            Self::Cube => generate_cube(),
            Self::Octahedron => generate_octahedron(),
            Self::Dodecahedron => generate_dodecahedron(),
            Self::Icosahedron => generate_icosahedron(),
        }
    }
}

impl fmt::Display for PlatonicSolid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlatonicSolid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tetra" | "tetrahedron" | "t" => Ok(Self::Tetrahedron),
            "cube" | "hexahedron" | "c" => Ok(Self::Cube),
            "octa" | "octahedron" | "o" => Ok(Self::Octahedron),
            "dodeca" | "dodecahedron" | "d" => Ok(Self::Dodecahedron),
            "icosa" | "icosahedron" | "i" => Ok(Self::Icosahedron),
            other => Err(format!(
                "Unknown solid '{}' (expected tetra, cube, octa, dodeca or icosa)",
                other
            )),
        }
    }
}

fn build(positions: &[[f64; 3]], faces: &[&[usize]]) -> Mesh {
    Mesh::from_parts(
        positions
            .iter()
            .map(|&[x, y, z]| Point3::new(x, y, z))
            .collect(),
        faces.iter().map(|face| face.to_vec()).collect(),
    )
}

fn generate_tetrahedron() -> Mesh {
    build(
        &[
            [1.0, 1.0, 1.0],
            [1.0, -1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, 1.0],
        ],
        &[&[0, 1, 2], &[0, 3, 1], &[0, 2, 3], &[1, 3, 2]],
    )
}

fn generate_cube() -> Mesh {
    // Index bits: 4 = +x, 2 = +y, 1 = +z
    let mut positions = Vec::with_capacity(8);
    for x in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for z in [-1.0, 1.0] {
                positions.push([x, y, z]);
            }
        }
    }
    build(
        &positions,
        &[
            &[0, 1, 3, 2], // -x
            &[4, 6, 7, 5], // +x
            &[0, 4, 5, 1], // -y
            &[2, 3, 7, 6], // +y
            &[0, 2, 6, 4], // -z
            &[1, 5, 7, 3], // +z
        ],
    )
}

fn generate_octahedron() -> Mesh {
    build(
        &[
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ],
        &[
            &[0, 2, 4],
            &[0, 5, 2],
            &[0, 4, 3],
            &[0, 3, 5],
            &[1, 4, 2],
            &[1, 2, 5],
            &[1, 3, 4],
            &[1, 5, 3],
        ],
    )
}

fn generate_icosahedron() -> Mesh {
    let p = PHI;
    build(
        &[
            [0.0, -1.0, -p],
            [0.0, -1.0, p],
            [0.0, 1.0, -p],
            [0.0, 1.0, p],
            [-1.0, -p, 0.0],
            [-1.0, p, 0.0],
            [1.0, -p, 0.0],
            [1.0, p, 0.0],
            [-p, 0.0, -1.0],
            [-p, 0.0, 1.0],
            [p, 0.0, -1.0],
            [p, 0.0, 1.0],
        ],
        &[
            &[8, 2, 0],
            &[0, 2, 10],
            &[6, 4, 0],
            &[0, 4, 8],
            &[10, 6, 0],
            &[1, 3, 9],
            &[11, 3, 1],
            &[1, 4, 6],
            &[9, 4, 1],
            &[1, 6, 11],
            &[2, 5, 7],
            &[8, 5, 2],
            &[2, 7, 10],
            &[7, 5, 3],
            &[3, 5, 9],
            &[11, 7, 3],
            &[9, 8, 4],
            &[5, 8, 9],
            &[6, 10, 11],
            &[11, 10, 7],
        ],
    )
}

fn generate_dodecahedron() -> Mesh {
    let p = PHI;
    let r = 1.0 / PHI;
    build(
        &[
            [-1.0, -1.0, -1.0],
            [-1.0, -1.0, 1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, 1.0, 1.0],
            [1.0, -1.0, -1.0],
            [1.0, -1.0, 1.0],
            [1.0, 1.0, -1.0],
            [1.0, 1.0, 1.0],
            [0.0, -r, -p],
            [0.0, -r, p],
            [0.0, r, -p],
            [0.0, r, p],
            [-r, -p, 0.0],
            [-r, p, 0.0],
            [r, -p, 0.0],
            [r, p, 0.0],
            [-p, 0.0, -r],
            [p, 0.0, -r],
            [-p, 0.0, r],
            [p, 0.0, r],
        ],
        &[
            &[3, 11, 7, 15, 13],
            &[7, 19, 17, 6, 15],
            &[17, 4, 8, 10, 6],
            &[8, 0, 16, 2, 10],
            &[0, 12, 1, 18, 16],
            &[6, 10, 2, 13, 15],
            &[2, 16, 18, 3, 13],
            &[18, 1, 9, 11, 3],
            &[4, 14, 12, 0, 8],
            &[11, 9, 5, 19, 7],
            &[19, 5, 14, 4, 17],
            &[1, 12, 14, 5, 9],
        ],
    )
}
