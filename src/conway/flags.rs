// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Flag algebra: directed half-edge records used to declare and rebuild faces.
//!
//! A flag says "in face F, vertex A is followed by vertex B". Operators emit
//! flags for the faces they want and [`FlagSet::decode`] walks them back into
//! ordered index loops. Face order in the output follows the order in which
//! faces first received a flag, so decoding is deterministic.

use super::keys::{FaceTag, KeyIndex, VertexKey};
use crate::error::{MeshError, MeshResult};
use crate::geometry::{face_edges, Face};
use ahash::{AHashMap, AHashSet};

#[derive(Debug, Clone, Copy)]
struct FaceEntry {
    /// First origin recorded for the face; decoding starts here
    seed: VertexKey,
    /// Number of flags, which is the face's vertex count
    len: usize,
}

/// A face rebuilt from flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFace {
    pub tag: FaceTag,
    pub vertices: Face,
}

/// Flags keyed by (face, origin vertex)
#[derive(Debug, Clone, Default)]
pub struct FlagSet {
    next: AHashMap<(FaceTag, VertexKey), VertexKey>,
    faces: AHashMap<FaceTag, FaceEntry>,
    order: Vec<FaceTag>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(flags: usize) -> Self {
        Self {
            next: AHashMap::with_capacity(flags),
            faces: AHashMap::new(),
            order: Vec::new(),
        }
    }

    /// Record that `to` follows `from` in `face`.
    ///
    /// Each (face, origin) pair may be declared once; a second declaration
    /// means two logical vertices were given the same key.
    pub fn insert(&mut self, face: FaceTag, from: VertexKey, to: VertexKey) -> MeshResult<()> {
        if self.next.contains_key(&(face, from)) {
            return Err(MeshError::DuplicateFlag {
                face: face.to_string(),
                vertex: from.to_string(),
            });
        }
        self.next.insert((face, from), to);
        match self.faces.get_mut(&face) {
            Some(entry) => entry.len += 1,
            None => {
                self.faces.insert(face, FaceEntry { seed: from, len: 1 });
                self.order.push(face);
            }
        }
        Ok(())
    }

    /// Emit the flags of one complete face given its vertices in CCW order
    pub fn add_face(&mut self, face: FaceTag, vertices: &[VertexKey]) -> MeshResult<()> {
        for (from, to) in face_edges(vertices) {
            self.insert(face, from, to)?;
        }
        Ok(())
    }

    /// Vertex following `from` in `face`
    pub fn next(&self, face: FaceTag, from: VertexKey) -> Option<VertexKey> {
        self.next.get(&(face, from)).copied()
    }

    /// Number of flags
    pub fn len(&self) -> usize {
        self.next.len()
    }

    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }

    /// Number of distinct faces
    pub fn face_count(&self) -> usize {
        self.order.len()
    }

    /// Rebuild every face as a CCW loop of vertex indices.
    ///
    /// Each walk is bounded by the face's flag count and must return to its
    /// seed after exactly that many steps.
    pub fn decode(&self, index: &KeyIndex) -> MeshResult<Vec<DecodedFace>> {
        let mut decoded = Vec::with_capacity(self.order.len());
        for &tag in &self.order {
            let entry = self.faces[&tag];
            let keys = self.walk(tag, entry)?;
            let vertices = keys
                .iter()
                .map(|key| {
                    index
                        .get(key)
                        .copied()
                        .ok_or_else(|| MeshError::UnknownVertexKey(key.to_string()))
                })
                .collect::<MeshResult<Face>>()?;
            decoded.push(DecodedFace { tag, vertices });
        }
        Ok(decoded)
    }

    fn walk(&self, tag: FaceTag, entry: FaceEntry) -> MeshResult<Vec<VertexKey>> {
        let mut cycle = Vec::with_capacity(entry.len);
        let mut seen = AHashSet::with_capacity(entry.len);
        let mut current = entry.seed;
        for _ in 0..entry.len {
            if !seen.insert(current) {
                return Err(MeshError::CycleMismatch {
                    face: tag.to_string(),
                    expected: entry.len,
                    found: cycle.len(),
                });
            }
            cycle.push(current);
            let from = current;
            current = self.next(tag, from).ok_or_else(|| MeshError::MissingFlag {
                face: tag.to_string(),
                vertex: from.to_string(),
            })?;
        }
        if current != entry.seed {
            return Err(MeshError::OpenCycle {
                face: tag.to_string(),
                expected: entry.len,
            });
        }
        Ok(cycle)
    }
}

/// Encode faces of an existing mesh as flags.
///
/// Face `i` is tagged `face_tags[i]` when given, otherwise `FaceTag::Face(i)`.
/// Vertex `v` becomes `VertexKey::Original(v)`; the returned table maps it
/// back to `v`. Exactly one flag is emitted per consecutive vertex pair.
///
/// This is the face-keyed form. For the edge-keyed form `(from, to) -> face`,
/// see [`EdgeFlags::from_faces`].
pub fn encode(faces: &[Face], face_tags: Option<&[FaceTag]>) -> MeshResult<(FlagSet, KeyIndex)> {
    let total = faces.iter().map(Vec::len).sum();
    let mut flags = FlagSet::with_capacity(total);
    let mut index = KeyIndex::with_capacity(total);
    for (face_idx, face) in faces.iter().enumerate() {
        let tag = face_tags
            .and_then(|tags| tags.get(face_idx))
            .copied()
            .unwrap_or(FaceTag::Face(face_idx));
        for (from, to) in face_edges(face) {
            flags.insert(tag, VertexKey::Original(from), VertexKey::Original(to))?;
            index.insert(VertexKey::Original(from), from);
        }
    }
    Ok((flags, index))
}

/// Edge-keyed flags: directed edge (origin, destination) to owning face.
///
/// Used to find the face on the other side of an edge.
#[derive(Debug, Clone, Default)]
pub struct EdgeFlags {
    owner: AHashMap<(usize, usize), usize>,
}

impl EdgeFlags {
    /// Build from faces; a directed edge used twice is a non-manifold error
    pub fn from_faces(faces: &[Face]) -> MeshResult<Self> {
        let mut owner = AHashMap::with_capacity(faces.iter().map(Vec::len).sum());
        for (face_idx, face) in faces.iter().enumerate() {
            for (from, to) in face_edges(face) {
                if owner.insert((from, to), face_idx).is_some() {
                    return Err(MeshError::NonManifoldEdge { from, to });
                }
            }
        }
        Ok(Self { owner })
    }

    /// Face containing the directed edge `from -> to`
    pub fn owner(&self, from: usize, to: usize) -> Option<usize> {
        self.owner.get(&(from, to)).copied()
    }

    /// Face on the other side of `from -> to`, i.e. the owner of `to -> from`
    pub fn face_across(&self, from: usize, to: usize) -> MeshResult<usize> {
        self.owner(to, from)
            .ok_or(MeshError::OpenEdge { from, to })
    }

    pub fn len(&self) -> usize {
        self.owner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{canonical_rotation, PlatonicSolid};

    fn sorted_faces(faces: impl IntoIterator<Item = Face>) -> Vec<Face> {
        let mut faces: Vec<Face> = faces.into_iter().map(|f| canonical_rotation(&f)).collect();
        faces.sort();
        faces
    }

    #[test]
    fn test_encode_decode_round_trip() {
        for solid in PlatonicSolid::ALL {
            let mesh = solid.to_mesh();
            let (flags, index) = encode(&mesh.faces, None).unwrap();
            assert_eq!(flags.len(), 2 * mesh.edge_count());
            assert_eq!(flags.face_count(), mesh.face_count());

            let decoded = flags.decode(&index).unwrap();
            assert_eq!(
                sorted_faces(decoded.into_iter().map(|d| d.vertices)),
                sorted_faces(mesh.faces.clone()),
                "{}",
                solid
            );
        }
    }

    #[test]
    fn test_decode_keeps_first_seen_face_order() {
        let faces = vec![vec![0, 1, 2], vec![0, 2, 3], vec![0, 3, 1], vec![1, 3, 2]];
        let tags = [
            FaceTag::Vertex(9),
            FaceTag::Vertex(4),
            FaceTag::Vertex(7),
            FaceTag::Vertex(1),
        ];
        let (flags, index) = encode(&faces, Some(&tags)).unwrap();
        let decoded = flags.decode(&index).unwrap();
        let order: Vec<_> = decoded.iter().map(|d| d.tag).collect();
        assert_eq!(order, tags.to_vec());
        assert_eq!(decoded[1].vertices, vec![0, 2, 3]);
    }

    #[test]
    fn test_add_face_builds_cycle() {
        let keys = [
            VertexKey::Original(0),
            VertexKey::edge_third(0, 1),
            VertexKey::FaceCentroid(3),
        ];
        let mut flags = FlagSet::new();
        flags.add_face(FaceTag::corner(3, 0), &keys).unwrap();
        assert_eq!(
            flags.next(FaceTag::corner(3, 0), keys[2]),
            Some(VertexKey::Original(0))
        );

        let index: KeyIndex = keys.iter().enumerate().map(|(i, &k)| (k, i + 10)).collect();
        let decoded = flags.decode(&index).unwrap();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].vertices, vec![10, 11, 12]);
    }

    #[test]
    fn test_duplicate_flag_is_rejected() {
        let mut flags = FlagSet::new();
        let face = FaceTag::Face(0);
        flags
            .insert(face, VertexKey::Original(0), VertexKey::Original(1))
            .unwrap();
        let err = flags
            .insert(face, VertexKey::Original(0), VertexKey::Original(2))
            .unwrap_err();
        assert!(matches!(err, MeshError::DuplicateFlag { .. }));
    }

    #[test]
    fn test_decode_missing_successor() {
        let mut flags = FlagSet::new();
        let face = FaceTag::Face(0);
        let (a, b, c) = (
            VertexKey::Original(0),
            VertexKey::Original(1),
            VertexKey::Original(2),
        );
        flags.insert(face, a, b).unwrap();
        flags.insert(face, c, a).unwrap();
        let index: KeyIndex = [(a, 0), (b, 1), (c, 2)].into_iter().collect();
        assert_eq!(
            flags.decode(&index),
            Err(MeshError::MissingFlag {
                face: "f0".into(),
                vertex: "v1".into()
            })
        );
    }

    #[test]
    fn test_decode_cycle_that_never_closes() {
        let mut flags = FlagSet::new();
        let face = FaceTag::Face(0);
        let keys: Vec<_> = (0..3).map(VertexKey::Original).collect();
        flags.insert(face, keys[0], keys[1]).unwrap();
        flags.insert(face, keys[1], keys[2]).unwrap();
        let index: KeyIndex = keys.iter().enumerate().map(|(i, &k)| (k, i)).collect();
        assert_eq!(
            flags.decode(&index),
            Err(MeshError::OpenCycle {
                face: "f0".into(),
                expected: 2
            })
        );
    }

    #[test]
    fn test_decode_short_cycle() {
        // Two disjoint loops under one tag: a->b->a and c->d->c
        let mut flags = FlagSet::new();
        let face = FaceTag::Face(0);
        let keys: Vec<_> = (0..4).map(VertexKey::Original).collect();
        flags.insert(face, keys[0], keys[1]).unwrap();
        flags.insert(face, keys[1], keys[0]).unwrap();
        flags.insert(face, keys[2], keys[3]).unwrap();
        flags.insert(face, keys[3], keys[2]).unwrap();
        let index: KeyIndex = keys.iter().enumerate().map(|(i, &k)| (k, i)).collect();
        assert_eq!(
            flags.decode(&index),
            Err(MeshError::CycleMismatch {
                face: "f0".into(),
                expected: 4,
                found: 2
            })
        );
    }

    #[test]
    fn test_decode_unknown_key() {
        let mut flags = FlagSet::new();
        flags
            .add_face(
                FaceTag::Face(0),
                &[
                    VertexKey::Original(0),
                    VertexKey::Original(1),
                    VertexKey::FaceCentroid(5),
                ],
            )
            .unwrap();
        let index: KeyIndex = [(VertexKey::Original(0), 0), (VertexKey::Original(1), 1)]
            .into_iter()
            .collect();
        assert_eq!(
            flags.decode(&index),
            Err(MeshError::UnknownVertexKey("vf5".into()))
        );
    }

    #[test]
    fn test_edge_flags_face_across() {
        let mesh = PlatonicSolid::Tetrahedron.to_mesh();
        let edges = EdgeFlags::from_faces(&mesh.faces).unwrap();
        assert_eq!(edges.len(), 12);
        for (face_idx, face) in mesh.faces.iter().enumerate() {
            for (a, b) in face_edges(face) {
                assert_eq!(edges.owner(a, b), Some(face_idx));
                let across = edges.face_across(a, b).unwrap();
                assert_ne!(across, face_idx);
                assert!(mesh.faces[across].contains(&a));
                assert!(mesh.faces[across].contains(&b));
            }
        }
    }

    #[test]
    fn test_edge_flags_reject_reused_edge() {
        let faces = vec![vec![0, 1, 2], vec![0, 1, 3]];
        assert_eq!(
            EdgeFlags::from_faces(&faces).unwrap_err(),
            MeshError::NonManifoldEdge { from: 0, to: 1 }
        );
        let edges = EdgeFlags::from_faces(&faces[..1]).unwrap();
        assert_eq!(
            edges.face_across(0, 1),
            Err(MeshError::OpenEdge { from: 0, to: 1 })
        );
    }
}
