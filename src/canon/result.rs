// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Canonicalization result.

use crate::geometry::Mesh;
use serde::{Deserialize, Serialize};

/// Result of a canonicalization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalizeResult {
    /// The relaxed mesh. Topology is identical to the input.
    pub mesh: Mesh,

    /// Number of passes performed.
    pub iterations_run: usize,

    /// Largest vertex displacement in the last pass.
    pub max_change: f64,

    /// Whether the run stopped because `max_change` fell below the tolerance.
    pub converged: bool,
}
