// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Face and edge geometry shared by the operators and canonicalization.
//!
//! All functions take positions by index into a vertex slice. Inputs are
//! assumed to come from a validated mesh; degenerate faces (collinear
//! vertices) yield a zero normal rather than NaN.

use nalgebra::{Point3, Vector3};

/// Arithmetic mean of a face's vertices, lifted `height` along the face normal
pub fn face_center(vertices: &[Point3<f64>], face: &[usize], height: f64) -> Point3<f64> {
    let sum = face
        .iter()
        .fold(Vector3::zeros(), |acc, &i| acc + vertices[i].coords);
    let center = Point3::from(sum / face.len() as f64);
    if height != 0.0 {
        center + face_normal(vertices, face) * height
    } else {
        center
    }
}

/// Unit polygon normal by Newell's method.
///
/// Works for non-planar faces; returns zero when the polygon has no area.
pub fn face_normal(vertices: &[Point3<f64>], face: &[usize]) -> Vector3<f64> {
    newell_normal(face.iter().map(|&i| &vertices[i]))
}

/// Newell normal over an ordered point loop
pub fn newell_normal<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Vector3<f64> {
    let points: Vec<&Point3<f64>> = points.into_iter().collect();
    let n = points.len();
    let mut normal = Vector3::zeros();
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal.try_normalize(f64::MIN_POSITIVE).unwrap_or_else(Vector3::zeros)
}

/// Midpoint of an edge; the same point for either direction
pub fn edge_midpoint(v1: &Point3<f64>, v2: &Point3<f64>) -> Point3<f64> {
    Point3::from((v1.coords + v2.coords) * 0.5)
}

/// Point one third of the way from `v1` towards `v2`.
///
/// Direction matters: `edge_third(a, b) != edge_third(b, a)`. The gyro,
/// propellor and whirl operators rely on this bias for their chirality.
pub fn edge_third(v1: &Point3<f64>, v2: &Point3<f64>) -> Point3<f64> {
    v1 + (v2 - v1) / 3.0
}

/// Point on the line through `v1` and `v2` closest to the origin
pub fn tangent_point(v1: &Point3<f64>, v2: &Point3<f64>) -> Point3<f64> {
    let direction = v2 - v1;
    let length_sq = direction.norm_squared();
    if length_sq == 0.0 {
        return *v1;
    }
    let t = -v1.coords.dot(&direction) / length_sq;
    v1 + direction * t
}

/// Move `point` a fraction of the way towards `target`
pub fn lerp_point(point: &Point3<f64>, target: &Point3<f64>, t: f64) -> Point3<f64> {
    point + (target - point) * t
}
