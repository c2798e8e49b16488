//! Cap detection and cap surgery.
//!
//! A cap is a pyramid, fastigium (digonal cupola), cupola, or rotunda
//! sitting on a planar boundary ring. Caps are what augmentation glues
//! on, diminishing cuts off, and gyration twists in place.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::builder::{remove_extraneous_vertices, MeshBuilder};
use crate::mesh::{Mesh, Ring, RingLike};

/// The shape of a cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapKind {
    /// A single apex vertex surrounded by triangles.
    Pyramid,
    /// A ridge edge flanked by two squares and two triangles.
    Fastigium,
    /// A top polygon ringed by alternating squares and triangles.
    Cupola,
    /// A pentagon ringed by alternating pentagons and triangles.
    Rotunda,
}

/// How a cupola sits against the faces across its boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gyration {
    /// Squares meet squares across the boundary.
    Ortho,
    /// Squares meet triangles across the boundary.
    Gyro,
}

/// A detected cap: its faces, interior vertices, and boundary ring.
///
/// The boundary is ordered by following the directed edges of the cap
/// faces, so its ring normal points out of the solid on the cap side.
#[derive(Debug, Clone)]
pub struct Cap<'a> {
    mesh: &'a Mesh,
    kind: CapKind,
    inner: Vec<usize>,
    faces: Vec<usize>,
    boundary: Vec<usize>,
}

impl<'a> Cap<'a> {
    /// Detect caps of every kind.
    pub fn find_all(mesh: &'a Mesh) -> Vec<Cap<'a>> {
        [
            CapKind::Pyramid,
            CapKind::Fastigium,
            CapKind::Cupola,
            CapKind::Rotunda,
        ]
        .into_iter()
        .flat_map(|kind| Self::find(mesh, kind))
        .collect()
    }

    /// Detect all caps of one kind.
    pub fn find(mesh: &'a Mesh, kind: CapKind) -> Vec<Cap<'a>> {
        let candidates: Vec<Vec<usize>> = match kind {
            CapKind::Pyramid => (0..mesh.num_vertices()).map(|v| vec![v]).collect(),
            CapKind::Fastigium => mesh.edges().map(|e| vec![e.v1, e.v2]).collect(),
            CapKind::Cupola => mesh
                .faces()
                .filter(|f| (3..=5).contains(&f.num_sides()))
                .map(|f| f.vertex_indices().to_vec())
                .collect(),
            CapKind::Rotunda => mesh
                .faces()
                .filter(|f| f.num_sides() == 5)
                .map(|f| {
                    let mut inner: Vec<usize> = f.vertex_indices().to_vec();
                    for v in f.vertices() {
                        for w in v.adjacent_vertices() {
                            if !inner.contains(&w.index) {
                                inner.push(w.index);
                            }
                        }
                    }
                    inner
                })
                .collect(),
        };
        candidates
            .into_iter()
            .filter_map(|inner| Self::validate(mesh, kind, inner))
            .collect()
    }

    fn validate(mesh: &'a Mesh, kind: CapKind, inner: Vec<usize>) -> Option<Cap<'a>> {
        for &v in &inner {
            if !config_matches(kind, inner.len(), &mesh.vertex(v).configuration()) {
                return None;
            }
        }
        let inner_set: HashSet<usize> = inner.iter().copied().collect();
        let mut faces: Vec<usize> = Vec::new();
        for &v in &inner {
            for f in mesh.vertex(v).adjacent_faces() {
                if !faces.contains(&f.index) {
                    faces.push(f.index);
                }
            }
        }
        if faces.len() >= mesh.num_faces() {
            return None;
        }
        if !faces.iter().all(|&f| mesh.face(f).is_valid()) {
            return None;
        }
        let boundary = walk_boundary(mesh, &faces)?;
        if boundary.iter().any(|v| inner_set.contains(v)) {
            return None;
        }
        let ring = Ring::new(mesh, boundary.clone());
        if !ring.is_planar() {
            return None;
        }
        Some(Cap {
            mesh,
            kind,
            inner,
            faces,
            boundary,
        })
    }

    /// The cap's kind.
    pub fn kind(&self) -> CapKind {
        self.kind
    }

    /// Indices of the cap's faces.
    pub fn face_indices(&self) -> &[usize] {
        &self.faces
    }

    /// Indices of the vertices strictly inside the cap.
    pub fn inner_indices(&self) -> &[usize] {
        &self.inner
    }

    /// The ordered boundary ring.
    pub fn boundary(&self) -> Ring<'a> {
        Ring::new(self.mesh, self.boundary.clone())
    }

    /// Whether the given face belongs to this cap.
    pub fn contains_face(&self, face: usize) -> bool {
        self.faces.contains(&face)
    }

    /// Classify how this cap's squares meet the faces across its
    /// boundary. `None` for caps without squares.
    pub fn gyration(&self) -> Option<Gyration> {
        if !matches!(self.kind, CapKind::Cupola | CapKind::Fastigium) {
            return None;
        }
        let ortho = self.boundary().edges().iter().all(|edge| {
            match (edge.face(), edge.twin_face()) {
                (Some(inside), Some(outside)) => {
                    (inside.num_sides() == 4) == (outside.num_sides() == 4)
                }
                _ => false,
            }
        });
        Some(if ortho { Gyration::Ortho } else { Gyration::Gyro })
    }
}

fn config_matches(
    kind: CapKind,
    num_inner: usize,
    config: &BTreeMap<usize, usize>,
) -> bool {
    match kind {
        // Every incident face is a triangle.
        CapKind::Pyramid => config.keys().all(|&n| n == 3),
        CapKind::Fastigium => config == &BTreeMap::from([(3, 1), (4, 2)]),
        CapKind::Cupola => {
            let mut expected = BTreeMap::from([(4, 2), (3, 1)]);
            *expected.entry(num_inner).or_insert(0) += 1;
            config == &expected
        }
        CapKind::Rotunda => config == &BTreeMap::from([(3, 2), (5, 2)]),
    }
}

/// Order the directed edges that lie in exactly one face of `faces` into
/// a single cycle, following the interior winding.
fn walk_boundary(mesh: &Mesh, faces: &[usize]) -> Option<Vec<usize>> {
    let face_set: HashSet<usize> = faces.iter().copied().collect();
    let mut successor: HashMap<usize, usize> = HashMap::new();
    let mut count = 0;
    for &fi in faces {
        for edge in mesh.face(fi).edges() {
            let outside = match edge.twin_face() {
                Some(f) => !face_set.contains(&f.index),
                None => true,
            };
            if outside {
                if successor.insert(edge.v1, edge.v2).is_some() {
                    return None;
                }
                count += 1;
            }
        }
    }
    let &start = successor.keys().next()?;
    let mut cycle = vec![start];
    let mut current = *successor.get(&start)?;
    while current != start {
        cycle.push(current);
        current = *successor.get(&current)?;
        if cycle.len() > count {
            return None;
        }
    }
    if cycle.len() != count {
        return None;
    }
    Some(cycle)
}

/// Cut a cap off, sealing the hole with its boundary ring as a new face.
pub fn remove_cap(mesh: &Mesh, cap: &Cap<'_>) -> Mesh {
    let mut builder = MeshBuilder::from_mesh(mesh).without_faces(cap.face_indices());
    builder.add_face(cap.boundary().ring_indices().to_vec());
    remove_extraneous_vertices(&builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::SolidData;
    use std::collections::BTreeMap;

    fn octahedron() -> Mesh {
        let data = SolidData {
            vertices: vec![
                [1.0, 0.0, 0.0],
                [-1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, -1.0, 0.0],
                [0.0, 0.0, 1.0],
                [0.0, 0.0, -1.0],
            ],
            faces: vec![
                vec![0, 2, 4],
                vec![2, 1, 4],
                vec![1, 3, 4],
                vec![3, 0, 4],
                vec![2, 0, 5],
                vec![1, 2, 5],
                vec![3, 1, 5],
                vec![0, 3, 5],
            ],
        };
        Mesh::from_data(&data).unwrap()
    }

    fn cube() -> Mesh {
        let data = SolidData {
            vertices: vec![
                [-0.5, -0.5, -0.5],
                [0.5, -0.5, -0.5],
                [0.5, 0.5, -0.5],
                [-0.5, 0.5, -0.5],
                [-0.5, -0.5, 0.5],
                [0.5, -0.5, 0.5],
                [0.5, 0.5, 0.5],
                [-0.5, 0.5, 0.5],
            ],
            faces: vec![
                vec![3, 2, 1, 0],
                vec![4, 5, 6, 7],
                vec![0, 1, 5, 4],
                vec![1, 2, 6, 5],
                vec![2, 3, 7, 6],
                vec![3, 0, 4, 7],
            ],
        };
        Mesh::from_data(&data).unwrap()
    }

    #[test]
    fn test_octahedron_pyramid_caps() {
        let mesh = octahedron();
        let caps = Cap::find(&mesh, CapKind::Pyramid);
        // One cap per vertex.
        assert_eq!(caps.len(), 6);
        for cap in &caps {
            assert_eq!(cap.face_indices().len(), 4);
            assert_eq!(cap.boundary().num_sides(), 4);
            assert!(cap.boundary().is_planar());
        }
    }

    #[test]
    fn test_cube_has_no_caps() {
        let mesh = cube();
        assert!(Cap::find_all(&mesh).is_empty());
    }

    #[test]
    fn test_boundary_winding_faces_outward() {
        let mesh = octahedron();
        let caps = Cap::find(&mesh, CapKind::Pyramid);
        let cap = caps
            .iter()
            .find(|c| c.inner_indices() == [4])
            .unwrap();
        // Apex at +z: boundary ring normal points up.
        assert!(cap.boundary().normal().z > 0.9);
    }

    #[test]
    fn test_remove_cap_yields_square_pyramid() {
        let mesh = octahedron();
        let caps = Cap::find(&mesh, CapKind::Pyramid);
        let cap = caps.iter().find(|c| c.inner_indices() == [4]).unwrap();
        let cut = remove_cap(&mesh, cap);
        assert_eq!(cut.num_vertices(), 5);
        assert_eq!(cut.num_faces(), 5);
        // Still a closed surface.
        assert!(Mesh::from_data(&cut.to_data()).is_ok());
        assert_eq!(cut.num_faces_by_sides(), BTreeMap::from([(3, 4), (4, 1)]));
    }

}
