// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Canonicalization: iterative relaxation towards canonical form.
//!
//! A canonical polyhedron has planar faces, every edge tangent to the unit
//! sphere, and the mean of the edge tangent points at the origin.

mod params;
mod relax;
mod result;

pub use params::CanonicalizeParams;
pub use relax::{canonicalize, planarize, recenter, tangentify};
pub use result::CanonicalizeResult;
