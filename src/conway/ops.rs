// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Operator dispatch and Conway notation

use super::operators;
use super::params::OperatorParams;
use crate::error::{MeshError, MeshResult};
use crate::geometry::{Mesh, MeshCounts};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// One of the supported Conway-Hart operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConwayOp {
    Kis,
    Dual,
    Ambo,
    Chamfer,
    Gyro,
    Propellor,
    Whirl,
}

impl ConwayOp {
    pub const ALL: [ConwayOp; 7] = [
        ConwayOp::Kis,
        ConwayOp::Dual,
        ConwayOp::Ambo,
        ConwayOp::Chamfer,
        ConwayOp::Gyro,
        ConwayOp::Propellor,
        ConwayOp::Whirl,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ConwayOp::Kis => "kis",
            ConwayOp::Dual => "dual",
            ConwayOp::Ambo => "ambo",
            ConwayOp::Chamfer => "chamfer",
            ConwayOp::Gyro => "gyro",
            ConwayOp::Propellor => "propellor",
            ConwayOp::Whirl => "whirl",
        }
    }

    /// Single-letter symbol used in Conway notation
    pub fn symbol(&self) -> char {
        match self {
            ConwayOp::Kis => 'k',
            ConwayOp::Dual => 'd',
            ConwayOp::Ambo => 'a',
            ConwayOp::Chamfer => 'c',
            ConwayOp::Gyro => 'g',
            ConwayOp::Propellor => 'p',
            ConwayOp::Whirl => 'w',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Apply the operator, taking any geometric parameters from `params`
    pub fn apply(&self, mesh: &Mesh, params: &OperatorParams) -> MeshResult<Mesh> {
        match self {
            ConwayOp::Kis => operators::kis(mesh, params.kis_height),
            ConwayOp::Dual => operators::dual(mesh),
            ConwayOp::Ambo => operators::ambo(mesh),
            ConwayOp::Chamfer => {
                operators::chamfer(mesh, params.chamfer_thickness, params.chamfer_height)
            }
            ConwayOp::Gyro => operators::gyro(mesh),
            ConwayOp::Propellor => operators::propellor(mesh),
            ConwayOp::Whirl => operators::whirl(mesh),
        }
    }

    /// Vertex, edge and face counts of the operator's output on a closed
    /// polyhedron with the given counts
    pub fn expected_counts(&self, counts: MeshCounts) -> MeshCounts {
        let MeshCounts {
            vertices: v,
            edges: e,
            faces: f,
        } = counts;
        match self {
            ConwayOp::Kis => MeshCounts::new(v + f, 3 * e, 2 * e),
            ConwayOp::Dual => MeshCounts::new(f, e, v),
            ConwayOp::Ambo => MeshCounts::new(e, 2 * e, v + f),
            ConwayOp::Chamfer => MeshCounts::new(v + 2 * e, 4 * e, e + f),
            ConwayOp::Gyro => MeshCounts::new(v + 2 * e + f, 5 * e, 2 * e),
            ConwayOp::Propellor => MeshCounts::new(v + 2 * e, 5 * e, 2 * e + f),
            ConwayOp::Whirl => MeshCounts::new(v + 4 * e, 7 * e, 2 * e + f),
        }
    }
}

impl fmt::Display for ConwayOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConwayOp {
    type Err = MeshError;

    /// Accepts the full name or the notation symbol, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let mut chars = lower.chars();
        if let (Some(symbol), None) = (chars.next(), chars.next()) {
            if let Some(op) = Self::from_symbol(symbol) {
                return Ok(op);
            }
        }
        match lower.as_str() {
            "propeller" => Ok(ConwayOp::Propellor),
            name => Self::ALL
                .into_iter()
                .find(|op| op.name() == name)
                .ok_or_else(|| MeshError::UnknownOperator(s.to_string())),
        }
    }
}

/// Parse Conway notation such as `"dk"` into operators in application order.
///
/// Notation reads right to left: `"dk"` is kis followed by dual. Whitespace
/// is ignored.
pub fn parse_notation(notation: &str) -> MeshResult<Vec<ConwayOp>> {
    notation
        .chars()
        .rev()
        .filter(|c| !c.is_whitespace())
        .map(|c| ConwayOp::from_symbol(c).ok_or_else(|| MeshError::UnknownOperator(c.to_string())))
        .collect()
}

/// Apply a Conway notation string to a mesh
pub fn apply_notation(mesh: &Mesh, notation: &str, params: &OperatorParams) -> MeshResult<Mesh> {
    let ops = parse_notation(notation)?;
    apply_sequence(mesh, &ops, params)
}

/// Apply operators in order, first to last
pub fn apply_sequence(mesh: &Mesh, ops: &[ConwayOp], params: &OperatorParams) -> MeshResult<Mesh> {
    params.validate()?;
    let mut current = mesh.clone();
    for op in ops {
        current = op.apply(&current, params)?;
        debug!("applied {}: {:?}", op, current.counts());
    }
    Ok(current)
}
