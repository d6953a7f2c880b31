// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Conway-Hart operators built on flag algebra.
//!
//! An operator never edits its input. It names every output vertex by a
//! structural [`VertexKey`], describes every output face as a set of flags
//! `(face, from) -> to` in a [`FlagSet`], and decodes the flags into a new
//! [`Mesh`](crate::geometry::Mesh).

pub mod flags;
pub mod keys;
mod operators;
mod ops;
mod params;

pub use flags::{encode, DecodedFace, EdgeFlags, FlagSet};
pub use keys::{FaceTag, KeyIndex, VertexKey, VertexTable};
pub use operators::{ambo, chamfer, dual, gyro, kis, propellor, whirl};
pub use ops::{apply_notation, apply_sequence, parse_notation, ConwayOp};
pub use params::OperatorParams;
