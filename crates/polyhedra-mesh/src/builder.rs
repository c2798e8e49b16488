//! Structural mesh edits.
//!
//! All edits are copy-on-write: a [`MeshBuilder`] is seeded from an
//! existing mesh (or empty), mutated, and built into a fresh mesh. The
//! build step is permissive on purpose; operation surgery goes through
//! torn intermediate states before vertex welding restores closure.

use std::collections::HashSet;

use polyhedra_math::{points_equal, Point3, Transform};

use crate::mesh::Mesh;

/// An in-progress structural edit.
#[derive(Debug, Clone, Default)]
pub struct MeshBuilder {
    vertices: Vec<Point3>,
    faces: Vec<Vec<usize>>,
}

impl MeshBuilder {
    /// Start from an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the builder with an existing mesh's vertices and faces.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            vertices: mesh.positions().to_vec(),
            faces: mesh.face_loops().to_vec(),
        }
    }

    /// Current vertex count.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Append one vertex, returning its index.
    pub fn add_vertex(&mut self, p: Point3) -> usize {
        self.vertices.push(p);
        self.vertices.len() - 1
    }

    /// Append vertices, returning the index of the first.
    pub fn add_vertices(&mut self, points: impl IntoIterator<Item = Point3>) -> usize {
        let offset = self.vertices.len();
        self.vertices.extend(points);
        offset
    }

    /// Move one vertex.
    pub fn set_vertex(&mut self, index: usize, p: Point3) {
        self.vertices[index] = p;
    }

    /// Replace every vertex position, keeping topology.
    pub fn with_vertex_positions(mut self, positions: Vec<Point3>) -> Self {
        self.vertices = positions;
        self
    }

    /// Append one face loop.
    pub fn add_face(&mut self, face: Vec<usize>) {
        self.faces.push(face);
    }

    /// Append several face loops.
    pub fn add_faces(&mut self, faces: impl IntoIterator<Item = Vec<usize>>) {
        self.faces.extend(faces);
    }

    /// Drop the faces whose indices appear in `indices`, keeping the
    /// relative order of the rest.
    pub fn without_faces(mut self, indices: &[usize]) -> Self {
        let drop: HashSet<usize> = indices.iter().copied().collect();
        self.faces = self
            .faces
            .into_iter()
            .enumerate()
            .filter(|(i, _)| !drop.contains(i))
            .map(|(_, f)| f)
            .collect();
        self
    }

    /// Rewrite every face loop through `f`.
    pub fn map_face_loops(mut self, mut f: impl FnMut(usize, &[usize]) -> Vec<usize>) -> Self {
        self.faces = self
            .faces
            .iter()
            .enumerate()
            .map(|(i, loop_)| f(i, loop_))
            .collect();
        self
    }

    /// Splice in another mesh's vertices and faces, returning the vertex
    /// index offset applied to the added mesh.
    pub fn add_mesh(&mut self, other: &Mesh) -> usize {
        let offset = self.add_vertices(other.positions().iter().copied());
        self.add_faces(
            other
                .face_loops()
                .iter()
                .map(|loop_| loop_.iter().map(|&v| v + offset).collect()),
        );
        offset
    }

    /// Finish the edit. No closure validation is performed.
    pub fn build(self) -> Mesh {
        Mesh::from_parts(self.vertices, self.faces)
    }
}

/// Weld vertices that occupy the same position.
///
/// Face loops are rewritten to canonical vertex indices, loops that
/// collapse below three distinct vertices are dropped, and unused
/// vertices are pruned. This is the final step of every cut-and-paste
/// surgery.
pub fn deduplicate_vertices(mesh: &Mesh) -> Mesh {
    let positions = mesh.positions();
    let mut canonical = vec![0usize; positions.len()];
    let mut kept: Vec<usize> = Vec::new();
    for (i, p) in positions.iter().enumerate() {
        match kept.iter().find(|&&k| points_equal(&positions[k], p)) {
            Some(&k) => canonical[i] = k,
            None => {
                canonical[i] = i;
                kept.push(i);
            }
        }
    }
    let merged = mesh.num_vertices() - kept.len();
    if merged > 0 {
        log::trace!("deduplicate: welded {merged} vertices");
    }
    let mut builder = MeshBuilder::new();
    builder.add_vertices(positions.iter().copied());
    for loop_ in mesh.face_loops() {
        let mut next: Vec<usize> = Vec::with_capacity(loop_.len());
        for &v in loop_ {
            let c = canonical[v];
            if next.last() != Some(&c) && next.first() != Some(&c) {
                next.push(c);
            }
        }
        if next.len() >= 3 {
            builder.add_face(next);
        }
    }
    remove_extraneous_vertices(&builder.build())
}

/// Drop vertices not referenced by any face, compacting indices.
pub fn remove_extraneous_vertices(mesh: &Mesh) -> Mesh {
    let mut used = vec![false; mesh.num_vertices()];
    for loop_ in mesh.face_loops() {
        for &v in loop_ {
            used[v] = true;
        }
    }
    let mut remap = vec![usize::MAX; mesh.num_vertices()];
    let mut builder = MeshBuilder::new();
    for (i, p) in mesh.positions().iter().enumerate() {
        if used[i] {
            remap[i] = builder.add_vertex(*p);
        }
    }
    builder.add_faces(
        mesh.face_loops()
            .iter()
            .map(|loop_| loop_.iter().map(|&v| remap[v]).collect()),
    );
    builder.build()
}

/// The mirror image of a mesh: reflect through the `x = 0` plane and
/// reverse every face loop to keep normals outward.
///
/// Realizes the right-handed member of a chiral pair from the left.
pub fn mirror(mesh: &Mesh) -> Mesh {
    let reflected = mesh.transformed(&Transform::reflection_x());
    MeshBuilder::from_mesh(&reflected)
        .map_face_loops(|_, loop_| loop_.iter().rev().copied().collect())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{RingLike, SolidData};
    use approx::assert_relative_eq;

    fn square_pyramid() -> Mesh {
        let h = 1.0 / 2.0_f64.sqrt();
        let data = SolidData {
            vertices: vec![
                [-0.5, -0.5, 0.0],
                [0.5, -0.5, 0.0],
                [0.5, 0.5, 0.0],
                [-0.5, 0.5, 0.0],
                [0.0, 0.0, h],
            ],
            faces: vec![
                vec![3, 2, 1, 0],
                vec![0, 1, 4],
                vec![1, 2, 4],
                vec![2, 3, 4],
                vec![3, 0, 4],
            ],
        };
        Mesh::from_data(&data).unwrap()
    }

    #[test]
    fn test_without_faces() {
        let mesh = square_pyramid();
        let cut = MeshBuilder::from_mesh(&mesh).without_faces(&[0]).build();
        assert_eq!(cut.num_faces(), 4);
        // The base edges lost their twins.
        assert!(cut.edge(0, 1).twin().is_none());
    }

    #[test]
    fn test_deduplicate_welds_coincident_vertices() {
        // Two pyramids sharing a base plane, bases removed: an octahedron
        // shape with duplicated equator vertices.
        let top = square_pyramid();
        let bottom = mirror(&top.transformed(
            &Transform::rotation_about_axis(
                &polyhedra_math::Dir3::new_normalize(polyhedra_math::Vec3::x()),
                std::f64::consts::PI,
            ),
        ));
        let mut builder = MeshBuilder::from_mesh(&top).without_faces(&[0]);
        let bottom_cut = MeshBuilder::from_mesh(&bottom).without_faces(&[0]).build();
        builder.add_mesh(&bottom_cut);
        let torn = builder.build();
        assert_eq!(torn.num_vertices(), 10);
        let welded = deduplicate_vertices(&torn);
        assert_eq!(welded.num_vertices(), 6);
        assert_eq!(welded.num_faces(), 8);
        assert_eq!(
            welded.num_vertices() + welded.num_faces(),
            welded.num_edges() + 2
        );
    }

    #[test]
    fn test_remove_extraneous_vertices() {
        let mesh = square_pyramid();
        // Drop the four triangles, leaving the apex unused.
        let cut = MeshBuilder::from_mesh(&mesh)
            .without_faces(&[1, 2, 3, 4])
            .build();
        let pruned = remove_extraneous_vertices(&cut);
        assert_eq!(pruned.num_vertices(), 4);
        assert_eq!(pruned.num_faces(), 1);
    }

    #[test]
    fn test_mirror_preserves_outward_normals() {
        let mesh = square_pyramid();
        let m = mirror(&mesh);
        assert_relative_eq!(m.volume(), mesh.volume(), epsilon = 1e-12);
        let c = m.centroid();
        for face in m.faces() {
            assert!(face.normal().dot(&(face.centroid() - c)) > 0.0);
        }
    }
}
