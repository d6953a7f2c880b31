// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Canonicalization parameters.

use crate::error::{MeshError, MeshResult};
use serde::{Deserialize, Serialize};

/// Parameters for [`canonicalize`](super::canonicalize).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalizeParams {
    /// Maximum number of relaxation passes.
    pub iterations: usize,

    /// Step size applied to every correction. Zero leaves the mesh unchanged.
    pub scale_factor: f64,

    /// Stop once no vertex moves further than this in a pass.
    pub tolerance: f64,
}

impl Default for CanonicalizeParams {
    fn default() -> Self {
        Self {
            iterations: 20,
            scale_factor: 0.1,
            tolerance: 1e-8,
        }
    }
}

impl CanonicalizeParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of passes.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the step size.
    #[must_use]
    pub const fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the convergence tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Both the step size and the tolerance must be finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidParameter`] naming the offending field.
    pub fn validate(&self) -> MeshResult<()> {
        for (name, value) in [
            ("scale_factor", self.scale_factor),
            ("tolerance", self.tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MeshError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}
