// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Conway-Hart operators.
//!
//! Each operator builds its new vertices under structural [`VertexKey`]s,
//! declares the new faces as flags and decodes them into a fresh mesh. The
//! input must be a closed, orientable polyhedron; the output is one too, with
//! vertex, edge and face counts fixed by the operator (see
//! [`ConwayOp::expected_counts`](super::ConwayOp::expected_counts)).
//!
//! Output vertices are numbered in creation order, original vertices first
//! when they are kept.

use super::flags::{EdgeFlags, FlagSet};
use super::keys::{FaceTag, VertexKey, VertexTable};
use super::params::require_finite;
use crate::error::{MeshError, MeshResult};
use crate::geometry::face_edge::{
    edge_midpoint, edge_third, face_center, face_normal, lerp_point,
};
use crate::geometry::{face_corners, face_edges, Face, Mesh};
use tracing::debug;

use super::keys::VertexKey::{FaceCentroid, Original};

/// Decode the flags against the table and pair the faces with the positions
fn assemble(table: VertexTable, flags: &FlagSet) -> MeshResult<Mesh> {
    let faces = flags
        .decode(table.keys())?
        .into_iter()
        .map(|decoded| decoded.vertices)
        .collect();
    Ok(Mesh::from_parts(table.into_positions(), faces))
}

fn log_result(op: &str, input: &Mesh, output: &Mesh) {
    debug!(
        "{}: {} vertices, {} faces -> {} vertices, {} faces",
        op,
        input.vertex_count(),
        input.face_count(),
        output.vertex_count(),
        output.face_count()
    );
}

/// Kis: raise a vertex over every face and fan-triangulate the face from it.
///
/// The apex sits at the face centroid, lifted `height` along the face normal.
/// V' = V + F, E' = 3E, F' = 2E.
pub fn kis(mesh: &Mesh, height: f64) -> MeshResult<Mesh> {
    mesh.check_faces()?;
    require_finite("kis_height", height)?;

    let mut table = VertexTable::with_originals(&mesh.vertices, mesh.face_count());
    let mut flags = FlagSet::with_capacity(6 * mesh.edge_count());

    for (face_idx, face) in mesh.faces.iter().enumerate() {
        let apex = FaceCentroid(face_idx);
        table.insert(apex, face_center(&mesh.vertices, face, height))?;
        for (v1, v2) in face_edges(face) {
            flags.add_face(FaceTag::corner(face_idx, v1), &[Original(v1), Original(v2), apex])?;
        }
    }

    let result = assemble(table, &flags)?;
    log_result("kis", mesh, &result);
    Ok(result)
}

/// Dual: faces become vertices and vertices become faces.
///
/// Each output vertex is the centroid of an input face. Face `i` of the
/// output is the dual of input vertex `i`: its boundary is the centroids of
/// the faces around that vertex, in CCW order. V' = F, E' = E, F' = V.
///
/// # Errors
///
/// Besides malformed faces, fails with [`MeshError::OpenEdge`] if an edge has
/// no face on its other side and [`MeshError::IsolatedVertex`] if a vertex
/// belongs to no face.
pub fn dual(mesh: &Mesh) -> MeshResult<Mesh> {
    mesh.check_faces()?;
    let edges = EdgeFlags::from_faces(&mesh.faces)?;

    let mut table = VertexTable::with_capacity(mesh.face_count());
    for (face_idx, face) in mesh.faces.iter().enumerate() {
        table.insert(FaceCentroid(face_idx), face_center(&mesh.vertices, face, 0.0))?;
    }

    // One flag per input half-edge: around v1, the face across (v1, v2)
    // is followed by the face owning (v1, v2)
    let mut flags = FlagSet::with_capacity(edges.len());
    for (face_idx, face) in mesh.faces.iter().enumerate() {
        for (v1, v2) in face_edges(face) {
            let across = edges.face_across(v1, v2)?;
            flags.insert(FaceTag::Vertex(v1), FaceCentroid(across), FaceCentroid(face_idx))?;
        }
    }

    let mut by_vertex: Vec<Option<Face>> = vec![None; mesh.vertex_count()];
    for decoded in flags.decode(table.keys())? {
        if let FaceTag::Vertex(v) = decoded.tag {
            by_vertex[v] = Some(decoded.vertices);
        }
    }
    let faces = by_vertex
        .into_iter()
        .enumerate()
        .map(|(v, face)| face.ok_or(MeshError::IsolatedVertex(v)))
        .collect::<MeshResult<Vec<Face>>>()?;

    let result = Mesh::from_parts(table.into_positions(), faces);
    log_result("dual", mesh, &result);
    Ok(result)
}

/// Ambo: truncate every vertex down to the edge midpoints.
///
/// One vertex per undirected edge. Each input face shrinks to the loop of its
/// edge midpoints and each input vertex becomes the loop of the midpoints of
/// its edges. V' = E, E' = 2E, F' = V + F.
pub fn ambo(mesh: &Mesh) -> MeshResult<Mesh> {
    mesh.check_faces()?;

    let mut table = VertexTable::with_capacity(mesh.edge_count());
    let mut flags = FlagSet::with_capacity(4 * mesh.edge_count());

    for (face_idx, face) in mesh.faces.iter().enumerate() {
        for (v1, v2, v3) in face_corners(face) {
            let before = VertexKey::edge_midpoint(v1, v2);
            let after = VertexKey::edge_midpoint(v2, v3);
            table.get_or_insert_with(before, || {
                edge_midpoint(&mesh.vertices[v1], &mesh.vertices[v2])
            });
            flags.insert(FaceTag::Face(face_idx), before, after)?;
            flags.insert(FaceTag::Vertex(v2), after, before)?;
        }
    }

    let result = assemble(table, &flags)?;
    log_result("ambo", mesh, &result);
    Ok(result)
}

/// Chamfer: replace every edge with a hexagon.
///
/// Each face gets an inset copy whose corners move `thickness` of the way
/// towards the face centroid and `height` along the face normal. The
/// hexagon for edge (a, b) joins a, b and the inset corners of both
/// neighbouring faces. V' = V + 2E, E' = 4E, F' = E + F.
pub fn chamfer(mesh: &Mesh, thickness: f64, height: f64) -> MeshResult<Mesh> {
    mesh.check_faces()?;
    require_finite("chamfer_thickness", thickness)?;
    require_finite("chamfer_height", height)?;

    let mut table = VertexTable::with_originals(&mesh.vertices, 2 * mesh.edge_count());
    let mut flags = FlagSet::with_capacity(8 * mesh.edge_count());

    for (face_idx, face) in mesh.faces.iter().enumerate() {
        let center = face_center(&mesh.vertices, face, 0.0);
        let normal = face_normal(&mesh.vertices, face);
        for (v1, v2) in face_edges(face) {
            let corner = mesh.vertices[v2];
            let inner2 = VertexKey::face_inset(face_idx, v2);
            table.insert(inner2, corner + (center - corner) * thickness + normal * height)?;

            let inner1 = VertexKey::face_inset(face_idx, v1);
            let hexagon = FaceTag::edge(v1, v2);
            flags.insert(hexagon, Original(v2), inner2)?;
            flags.insert(hexagon, inner2, inner1)?;
            flags.insert(hexagon, inner1, Original(v1))?;
            flags.insert(FaceTag::Face(face_idx), inner1, inner2)?;
        }
    }

    let result = assemble(table, &flags)?;
    log_result("chamfer", mesh, &result);
    Ok(result)
}

/// Gyro: split every face into pentagons around its centroid.
///
/// Adds the face centroids and two points per edge, one third in from each
/// end. Every directed edge (v1, v2) of a face yields the pentagon
/// `third(v1,v2), third(v2,v1), v2, third(v2,v3), centroid`.
/// V' = V + 2E + F, E' = 5E, F' = 2E.
pub fn gyro(mesh: &Mesh) -> MeshResult<Mesh> {
    mesh.check_faces()?;

    let mut table = VertexTable::with_originals(
        &mesh.vertices,
        2 * mesh.edge_count() + mesh.face_count(),
    );
    let mut flags = FlagSet::with_capacity(10 * mesh.edge_count());

    for (face_idx, face) in mesh.faces.iter().enumerate() {
        let centroid = FaceCentroid(face_idx);
        table.insert(centroid, face_center(&mesh.vertices, face, 0.0))?;
        for (v1, v2, v3) in face_corners(face) {
            table.insert(
                VertexKey::edge_third(v1, v2),
                edge_third(&mesh.vertices[v1], &mesh.vertices[v2]),
            )?;
            flags.add_face(
                FaceTag::corner(face_idx, v2),
                &[
                    VertexKey::edge_third(v1, v2),
                    VertexKey::edge_third(v2, v1),
                    Original(v2),
                    VertexKey::edge_third(v2, v3),
                    centroid,
                ],
            )?;
        }
    }

    let result = assemble(table, &flags)?;
    log_result("gyro", mesh, &result);
    Ok(result)
}

/// Propellor: twist each face into a smaller copy ringed by quadrilaterals.
///
/// Like gyro without centroids: the third-points of a face form its rotated
/// inner copy, and each directed edge (v1, v2) yields the skew quad
/// `third(v1,v2), third(v2,v1), v2, third(v2,v3)`.
/// V' = V + 2E, E' = 5E, F' = 2E + F.
pub fn propellor(mesh: &Mesh) -> MeshResult<Mesh> {
    mesh.check_faces()?;

    let mut table = VertexTable::with_originals(&mesh.vertices, 2 * mesh.edge_count());
    let mut flags = FlagSet::with_capacity(10 * mesh.edge_count());

    for (face_idx, face) in mesh.faces.iter().enumerate() {
        for (v1, v2, v3) in face_corners(face) {
            let near = VertexKey::edge_third(v1, v2);
            let next = VertexKey::edge_third(v2, v3);
            table.insert(near, edge_third(&mesh.vertices[v1], &mesh.vertices[v2]))?;

            flags.insert(FaceTag::Face(face_idx), near, next)?;
            flags.add_face(
                FaceTag::corner(face_idx, v2),
                &[near, VertexKey::edge_third(v2, v1), Original(v2), next],
            )?;
        }
    }

    let result = assemble(table, &flags)?;
    log_result("propellor", mesh, &result);
    Ok(result)
}

/// Whirl: gyro followed by truncating the centroids.
///
/// Each face keeps a shrunken copy whose corners sit halfway between the
/// original corners and the centroid; every directed edge yields a hexagon
/// joining that copy to the edge's third-points.
/// V' = V + 4E, E' = 7E, F' = 2E + F.
pub fn whirl(mesh: &Mesh) -> MeshResult<Mesh> {
    mesh.check_faces()?;

    let mut table = VertexTable::with_originals(&mesh.vertices, 4 * mesh.edge_count());
    let mut flags = FlagSet::with_capacity(14 * mesh.edge_count());

    for (face_idx, face) in mesh.faces.iter().enumerate() {
        let center = face_center(&mesh.vertices, face, 0.0);
        for (v1, v2, v3) in face_corners(face) {
            let inner1 = VertexKey::face_inset(face_idx, v1);
            let inner2 = VertexKey::face_inset(face_idx, v2);
            let near = VertexKey::edge_third(v1, v2);
            table.insert(inner1, lerp_point(&mesh.vertices[v1], &center, 0.5))?;
            table.insert(near, edge_third(&mesh.vertices[v1], &mesh.vertices[v2]))?;

            flags.add_face(
                FaceTag::corner(face_idx, v2),
                &[
                    inner1,
                    near,
                    VertexKey::edge_third(v2, v1),
                    Original(v2),
                    VertexKey::edge_third(v2, v3),
                    inner2,
                ],
            )?;
            flags.insert(FaceTag::Face(face_idx), inner1, inner2)?;
        }
    }

    let result = assemble(table, &flags)?;
    log_result("whirl", mesh, &result);
    Ok(result)
}
