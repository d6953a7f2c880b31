// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Operator parameters.

use crate::error::{MeshError, MeshResult};
use serde::{Deserialize, Serialize};

/// Geometric parameters of the operators that take any.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorParams {
    /// Offset of kis apex vertices along the face normal.
    pub kis_height: f64,

    /// Fraction of the way each chamfer vertex moves towards its face centroid.
    pub chamfer_thickness: f64,

    /// Offset of chamfer vertices along the face normal.
    pub chamfer_height: f64,
}

impl Default for OperatorParams {
    fn default() -> Self {
        Self {
            kis_height: 0.0,
            chamfer_thickness: 0.1,
            chamfer_height: 0.1,
        }
    }
}

impl OperatorParams {
    /// Create new parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the kis apex height.
    #[must_use]
    pub const fn with_kis_height(mut self, height: f64) -> Self {
        self.kis_height = height;
        self
    }

    /// Set the chamfer inset fraction.
    #[must_use]
    pub const fn with_chamfer_thickness(mut self, thickness: f64) -> Self {
        self.chamfer_thickness = thickness;
        self
    }

    /// Set the chamfer normal offset.
    #[must_use]
    pub const fn with_chamfer_height(mut self, height: f64) -> Self {
        self.chamfer_height = height;
        self
    }

    /// Reject non-finite values.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidParameter`] naming the first bad field.
    pub fn validate(&self) -> MeshResult<()> {
        require_finite("kis_height", self.kis_height)?;
        require_finite("chamfer_thickness", self.chamfer_thickness)?;
        require_finite("chamfer_height", self.chamfer_height)
    }
}

pub(crate) fn require_finite(name: &'static str, value: f64) -> MeshResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MeshError::InvalidParameter { name, value })
    }
}
