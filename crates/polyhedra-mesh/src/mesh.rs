//! The mesh arena and its borrowed topology views.

use std::collections::{BTreeMap, HashMap};

use polyhedra_math::{centroid, Point3, Transform, Vec3, PRECISION};
use serde::{Deserialize, Serialize};

use crate::error::{MeshError, Result};

// ============================================================
// Raw solid data
// ============================================================

/// Raw, serializable solid geometry: vertex positions and face loops.
///
/// This is the exchange format; [`Mesh`] is the validated working form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolidData {
    /// Vertex positions as `[x, y, z]` triples.
    pub vertices: Vec<[f64; 3]>,
    /// Faces as counterclockwise loops of vertex indices.
    pub faces: Vec<Vec<usize>>,
}

// ============================================================
// Mesh
// ============================================================

/// A polyhedron surface: vertex positions, counterclockwise face loops,
/// and a directed-edge-to-face map.
///
/// The arena is immutable; structural edits go through
/// [`MeshBuilder`](crate::MeshBuilder) and produce a new mesh.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Point3>,
    faces: Vec<Vec<usize>>,
    edge_face: HashMap<(usize, usize), usize>,
    neighbors: Vec<Vec<usize>>,
}

impl Mesh {
    /// Build a mesh without validating closure invariants.
    ///
    /// Structural edits produce intermediate meshes whose boundary
    /// vertices are split, so some directed edges have no twin. Those
    /// meshes still support the view API (twin lookups return `None`).
    pub(crate) fn from_parts(vertices: Vec<Point3>, faces: Vec<Vec<usize>>) -> Self {
        let mut edge_face = HashMap::new();
        let mut neighbors = vec![Vec::new(); vertices.len()];
        for (fi, face) in faces.iter().enumerate() {
            for (i, &a) in face.iter().enumerate() {
                let b = face[(i + 1) % face.len()];
                edge_face.insert((a, b), fi);
                if a < neighbors.len() && !neighbors[a].contains(&b) {
                    neighbors[a].push(b);
                }
            }
        }
        Self {
            vertices,
            faces,
            edge_face,
            neighbors,
        }
    }

    /// Build a validated mesh from raw data.
    ///
    /// Checks that every face is a simple loop of at least three in-range
    /// vertices, that each directed edge appears in exactly one face and
    /// is paired with its reversal, and that no vertex is isolated.
    pub fn from_data(data: &SolidData) -> Result<Self> {
        let vertices: Vec<Point3> = data
            .vertices
            .iter()
            .map(|&[x, y, z]| Point3::new(x, y, z))
            .collect();
        let mut edge_face: HashMap<(usize, usize), usize> = HashMap::new();
        let mut used = vec![false; vertices.len()];
        for (fi, face) in data.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(MeshError::DegenerateFace {
                    face: fi,
                    reason: format!("only {} vertices", face.len()),
                });
            }
            for (i, &a) in face.iter().enumerate() {
                if a >= vertices.len() {
                    return Err(MeshError::VertexOutOfBounds {
                        face: fi,
                        vertex: a,
                        num_vertices: vertices.len(),
                    });
                }
                used[a] = true;
                let b = face[(i + 1) % face.len()];
                if a == b {
                    return Err(MeshError::DegenerateFace {
                        face: fi,
                        reason: format!("repeated vertex {a}"),
                    });
                }
                if edge_face.insert((a, b), fi).is_some() {
                    return Err(MeshError::DuplicateEdge(a, b));
                }
            }
        }
        for &(a, b) in edge_face.keys() {
            if !edge_face.contains_key(&(b, a)) {
                return Err(MeshError::MissingTwin(a, b));
            }
        }
        if let Some(v) = used.iter().position(|u| !u) {
            return Err(MeshError::IsolatedVertex(v));
        }
        Ok(Self::from_parts(vertices, data.faces.clone()))
    }

    /// Convert back to raw serializable data.
    pub fn to_data(&self) -> SolidData {
        SolidData {
            vertices: self.vertices.iter().map(|p| [p.x, p.y, p.z]).collect(),
            faces: self.faces.clone(),
        }
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Number of undirected edges.
    pub fn num_edges(&self) -> usize {
        self.edge_face.len() / 2
    }

    /// All vertex positions, indexed by vertex.
    pub fn positions(&self) -> &[Point3] {
        &self.vertices
    }

    /// Raw face loops, indexed by face.
    pub fn face_loops(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// View of vertex `index`.
    pub fn vertex(&self, index: usize) -> Vertex<'_> {
        Vertex { mesh: self, index }
    }

    /// Iterate over all vertices.
    pub fn vertices(&self) -> impl Iterator<Item = Vertex<'_>> {
        (0..self.vertices.len()).map(move |index| Vertex { mesh: self, index })
    }

    /// View of face `index`.
    pub fn face(&self, index: usize) -> Face<'_> {
        Face { mesh: self, index }
    }

    /// Iterate over all faces.
    pub fn faces(&self) -> impl Iterator<Item = Face<'_>> {
        (0..self.faces.len()).map(move |index| Face { mesh: self, index })
    }

    /// View of the directed edge from `v1` to `v2`.
    pub fn edge(&self, v1: usize, v2: usize) -> Edge<'_> {
        Edge {
            mesh: self,
            v1,
            v2,
        }
    }

    /// Iterate over one representative of each undirected edge.
    pub fn edges(&self) -> impl Iterator<Item = Edge<'_>> + '_ {
        self.edge_face
            .keys()
            .filter(|&&(a, b)| a < b || !self.edge_face.contains_key(&(b, a)))
            .map(move |&(v1, v2)| Edge {
                mesh: self,
                v1,
                v2,
            })
    }

    pub(crate) fn face_containing(&self, v1: usize, v2: usize) -> Option<usize> {
        self.edge_face.get(&(v1, v2)).copied()
    }

    /// Centroid of the vertex positions.
    pub fn centroid(&self) -> Point3 {
        centroid(&self.vertices)
    }

    /// Length of a representative edge.
    ///
    /// Catalog solids have uniform edge length, so any edge serves.
    pub fn edge_length(&self) -> f64 {
        self.faces
            .first()
            .map(|f| (self.vertices[f[1]] - self.vertices[f[0]]).norm())
            .unwrap_or(0.0)
    }

    /// Faces with exactly `n` sides.
    pub fn faces_with_num_sides(&self, n: usize) -> Vec<Face<'_>> {
        self.faces().filter(|f| f.num_sides() == n).collect()
    }

    /// Face count keyed by side count.
    pub fn num_faces_by_sides(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for face in &self.faces {
            *counts.entry(face.len()).or_insert(0) += 1;
        }
        counts
    }

    /// A face with the largest side count (first by index on ties).
    pub fn largest_face(&self) -> Face<'_> {
        self.extreme_face(|a, b| a > b)
    }

    /// A face with the smallest side count (first by index on ties).
    pub fn smallest_face(&self) -> Face<'_> {
        self.extreme_face(|a, b| a < b)
    }

    fn extreme_face(&self, better: impl Fn(usize, usize) -> bool) -> Face<'_> {
        let mut best = 0;
        for (i, f) in self.faces.iter().enumerate() {
            if better(f.len(), self.faces[best].len()) {
                best = i;
            }
        }
        self.face(best)
    }

    /// The face whose supporting plane passes closest to `point`.
    ///
    /// Used for hit testing pointer rays that have already been
    /// intersected with the solid's surface.
    pub fn hit_face(&self, point: &Point3) -> Face<'_> {
        let mut best = 0;
        let mut best_dist = f64::INFINITY;
        for face in self.faces() {
            let d = face.plane_distance(point).abs();
            if d < best_dist {
                best_dist = d;
                best = face.index;
            }
        }
        self.face(best)
    }

    /// Total surface area.
    pub fn surface_area(&self) -> f64 {
        self.faces().map(|f| f.area()).sum()
    }

    /// Enclosed volume, by fanning tetrahedra from the coordinate origin.
    pub fn volume(&self) -> f64 {
        let mut vol = 0.0;
        for face in &self.faces {
            let p0 = self.vertices[face[0]].coords;
            for w in face[1..].windows(2) {
                let p1 = self.vertices[w[0]].coords;
                let p2 = self.vertices[w[1]].coords;
                vol += p0.dot(&p1.cross(&p2)) / 6.0;
            }
        }
        vol.abs()
    }

    /// Apply an affine transform to every vertex, preserving topology.
    pub fn transformed(&self, t: &Transform) -> Mesh {
        let vertices = self.vertices.iter().map(|p| t.apply_point(p)).collect();
        Mesh::from_parts(vertices, self.faces.clone())
    }
}

// ============================================================
// Ring abstraction
// ============================================================

/// Shared geometry for ordered vertex loops: faces and cap boundaries.
pub trait RingLike {
    /// The mesh this ring lives in.
    fn ring_mesh(&self) -> &Mesh;
    /// The vertex loop, in counterclockwise order viewed from outside.
    fn ring_indices(&self) -> &[usize];

    /// Number of vertices in the loop.
    fn num_sides(&self) -> usize {
        self.ring_indices().len()
    }

    /// Positions of the loop vertices.
    fn points(&self) -> Vec<Point3> {
        self.ring_indices()
            .iter()
            .map(|&i| self.ring_mesh().positions()[i])
            .collect()
    }

    /// Centroid of the loop.
    fn centroid(&self) -> Point3 {
        centroid(&self.points())
    }

    /// Outward unit normal, by Newell's method.
    fn normal(&self) -> Vec3 {
        let points = self.points();
        let mut n = Vec3::zeros();
        for (i, p) in points.iter().enumerate() {
            let q = &points[(i + 1) % points.len()];
            n += p.coords.cross(&q.coords);
        }
        n.normalize()
    }

    /// Length of the first loop edge.
    fn side_length(&self) -> f64 {
        let ring = self.ring_indices();
        let positions = self.ring_mesh().positions();
        (positions[ring[1]] - positions[ring[0]]).norm()
    }

    /// Distance from loop centroid to an edge midpoint, assuming a
    /// regular polygon.
    fn apothem(&self) -> f64 {
        let n = self.num_sides() as f64;
        self.side_length() / (2.0 * (std::f64::consts::PI / n).tan())
    }

    /// Distance from the mesh centroid to the loop centroid.
    fn distance_to_center(&self) -> f64 {
        (self.centroid() - self.ring_mesh().centroid()).norm()
    }

    /// Signed distance from `point` to the loop's supporting plane.
    fn plane_distance(&self, point: &Point3) -> f64 {
        self.normal().dot(&(point - self.centroid()))
    }

    /// Whether every loop vertex lies on the supporting plane.
    fn is_planar(&self) -> bool {
        self.points()
            .iter()
            .all(|p| self.plane_distance(p).abs() < PRECISION)
    }

    /// Whether every loop edge has nonzero length.
    fn is_valid(&self) -> bool {
        let points = self.points();
        points
            .iter()
            .enumerate()
            .all(|(i, p)| (points[(i + 1) % points.len()] - p).norm() > PRECISION)
    }

    /// Vector from the loop centroid to the midpoint of the edge starting
    /// at loop position `i`.
    fn edge_ray(&self, i: usize) -> Vec3 {
        let points = self.points();
        let mid = Point3::from((points[i].coords + points[(i + 1) % points.len()].coords) / 2.0);
        mid - self.centroid()
    }
}

/// An owned vertex loop that is not necessarily a face, such as a cap
/// boundary.
#[derive(Debug, Clone)]
pub struct Ring<'a> {
    mesh: &'a Mesh,
    indices: Vec<usize>,
}

impl<'a> Ring<'a> {
    /// Wrap an ordered loop of vertex indices.
    pub fn new(mesh: &'a Mesh, indices: Vec<usize>) -> Self {
        Self { mesh, indices }
    }

    /// The loop's vertex views.
    pub fn vertices(&self) -> Vec<Vertex<'a>> {
        self.indices
            .iter()
            .map(|&index| Vertex {
                mesh: self.mesh,
                index,
            })
            .collect()
    }

    /// The loop's directed edges.
    pub fn edges(&self) -> Vec<Edge<'a>> {
        self.indices
            .iter()
            .enumerate()
            .map(|(i, &v1)| Edge {
                mesh: self.mesh,
                v1,
                v2: self.indices[(i + 1) % self.indices.len()],
            })
            .collect()
    }
}

impl RingLike for Ring<'_> {
    fn ring_mesh(&self) -> &Mesh {
        self.mesh
    }
    fn ring_indices(&self) -> &[usize] {
        &self.indices
    }
}

// ============================================================
// Vertex view
// ============================================================

/// A borrowed view of one vertex.
#[derive(Debug, Clone, Copy)]
pub struct Vertex<'a> {
    pub(crate) mesh: &'a Mesh,
    /// Index into the vertex arena.
    pub index: usize,
}

impl<'a> Vertex<'a> {
    /// Position of this vertex.
    pub fn pos(&self) -> Point3 {
        self.mesh.vertices[self.index]
    }

    /// Outgoing edges in cyclic order around the vertex.
    ///
    /// Falls back to arbitrary order on torn meshes where a twin walk
    /// cannot complete.
    pub fn adjacent_edges(&self) -> Vec<Edge<'a>> {
        let neighbors = &self.mesh.neighbors[self.index];
        let Some(&start) = neighbors.first() else {
            return Vec::new();
        };
        let mut ordered = Vec::with_capacity(neighbors.len());
        let mut w = start;
        loop {
            ordered.push(Edge {
                mesh: self.mesh,
                v1: self.index,
                v2: w,
            });
            // Step to the previous vertex in the incident face loop;
            // its reversal is the next outgoing edge around the vertex.
            let Some(fi) = self.mesh.face_containing(self.index, w) else {
                break;
            };
            let face = &self.mesh.faces[fi];
            let Some(pos) = face.iter().position(|&v| v == self.index) else {
                break;
            };
            let prev = face[(pos + face.len() - 1) % face.len()];
            if prev == start || ordered.len() == neighbors.len() {
                if prev == start {
                    return ordered;
                }
                break;
            }
            w = prev;
        }
        // Torn mesh: cyclic order is unavailable.
        neighbors
            .iter()
            .map(|&v2| Edge {
                mesh: self.mesh,
                v1: self.index,
                v2,
            })
            .collect()
    }

    /// Neighboring vertices, in cyclic order where available.
    pub fn adjacent_vertices(&self) -> Vec<Vertex<'a>> {
        self.adjacent_edges()
            .into_iter()
            .map(|e| Vertex {
                mesh: self.mesh,
                index: e.v2,
            })
            .collect()
    }

    /// Incident faces, in cyclic order where available.
    pub fn adjacent_faces(&self) -> Vec<Face<'a>> {
        self.adjacent_edges()
            .into_iter()
            .filter_map(|e| e.face())
            .collect()
    }

    /// Vertex configuration: incident face count keyed by side count.
    pub fn configuration(&self) -> BTreeMap<usize, usize> {
        let mut counts = BTreeMap::new();
        for face in self.adjacent_faces() {
            *counts.entry(face.num_sides()).or_insert(0) += 1;
        }
        counts
    }
}

// ============================================================
// Edge view
// ============================================================

/// A borrowed view of one directed edge.
#[derive(Debug, Clone, Copy)]
pub struct Edge<'a> {
    pub(crate) mesh: &'a Mesh,
    /// Source vertex index.
    pub v1: usize,
    /// Target vertex index.
    pub v2: usize,
}

impl<'a> Edge<'a> {
    /// The face whose loop contains this directed edge.
    pub fn face(&self) -> Option<Face<'a>> {
        self.mesh.face_containing(self.v1, self.v2).map(|index| Face {
            mesh: self.mesh,
            index,
        })
    }

    /// The oppositely-directed edge, if the surface is closed here.
    pub fn twin(&self) -> Option<Edge<'a>> {
        self.mesh.face_containing(self.v2, self.v1).map(|_| Edge {
            mesh: self.mesh,
            v1: self.v2,
            v2: self.v1,
        })
    }

    /// The face on the other side of this edge.
    pub fn twin_face(&self) -> Option<Face<'a>> {
        self.mesh.face_containing(self.v2, self.v1).map(|index| Face {
            mesh: self.mesh,
            index,
        })
    }

    /// The next directed edge around this edge's face.
    pub fn next(&self) -> Option<Edge<'a>> {
        let face = self.face()?;
        let loop_ = face.vertex_indices();
        let pos = loop_.iter().position(|&v| v == self.v2)?;
        Some(Edge {
            mesh: self.mesh,
            v1: self.v2,
            v2: loop_[(pos + 1) % loop_.len()],
        })
    }

    /// The previous directed edge around this edge's face.
    pub fn prev(&self) -> Option<Edge<'a>> {
        let face = self.face()?;
        let loop_ = face.vertex_indices();
        let pos = loop_.iter().position(|&v| v == self.v1)?;
        Some(Edge {
            mesh: self.mesh,
            v1: loop_[(pos + loop_.len() - 1) % loop_.len()],
            v2: self.v1,
        })
    }

    /// Source vertex view.
    pub fn source(&self) -> Vertex<'a> {
        Vertex {
            mesh: self.mesh,
            index: self.v1,
        }
    }

    /// Target vertex view.
    pub fn target(&self) -> Vertex<'a> {
        Vertex {
            mesh: self.mesh,
            index: self.v2,
        }
    }

    /// Midpoint of the edge.
    pub fn midpoint(&self) -> Point3 {
        let p1 = self.mesh.vertices[self.v1];
        let p2 = self.mesh.vertices[self.v2];
        Point3::from((p1.coords + p2.coords) / 2.0)
    }

    /// Length of the edge.
    pub fn length(&self) -> f64 {
        (self.mesh.vertices[self.v2] - self.mesh.vertices[self.v1]).norm()
    }

    /// Direction from source to target.
    pub fn direction(&self) -> Vec3 {
        self.mesh.vertices[self.v2] - self.mesh.vertices[self.v1]
    }

    /// Interior dihedral angle between the two incident faces.
    ///
    /// Equals pi for coplanar faces and less than pi on a convex solid.
    pub fn dihedral_angle(&self) -> Option<f64> {
        let n1 = self.face()?.normal();
        let n2 = self.twin_face()?.normal();
        Some(std::f64::consts::PI - polyhedra_math::angle_between(&n1, &n2))
    }
}

// ============================================================
// Face view
// ============================================================

/// A borrowed view of one face.
#[derive(Debug, Clone, Copy)]
pub struct Face<'a> {
    pub(crate) mesh: &'a Mesh,
    /// Index into the face arena.
    pub index: usize,
}

impl<'a> Face<'a> {
    /// The face's vertex loop.
    pub fn vertex_indices(&self) -> &'a [usize] {
        &self.mesh.faces[self.index]
    }

    /// The face's vertex views, in loop order.
    pub fn vertices(&self) -> Vec<Vertex<'a>> {
        self.vertex_indices()
            .iter()
            .map(|&index| Vertex {
                mesh: self.mesh,
                index,
            })
            .collect()
    }

    /// The face's directed edges, in loop order.
    pub fn edges(&self) -> Vec<Edge<'a>> {
        let loop_ = self.vertex_indices();
        loop_
            .iter()
            .enumerate()
            .map(|(i, &v1)| Edge {
                mesh: self.mesh,
                v1,
                v2: loop_[(i + 1) % loop_.len()],
            })
            .collect()
    }

    /// Whether `vertex` is part of this face's loop.
    pub fn contains_vertex(&self, vertex: usize) -> bool {
        self.vertex_indices().contains(&vertex)
    }

    /// Faces sharing an edge with this one.
    pub fn adjacent_faces(&self) -> Vec<Face<'a>> {
        self.edges()
            .into_iter()
            .filter_map(|e| e.twin_face())
            .collect()
    }

    /// Area of the face polygon.
    pub fn area(&self) -> f64 {
        let points = self.points();
        let mut n = Vec3::zeros();
        for (i, p) in points.iter().enumerate() {
            let q = &points[(i + 1) % points.len()];
            n += p.coords.cross(&q.coords);
        }
        n.norm() / 2.0
    }
}

impl RingLike for Face<'_> {
    fn ring_mesh(&self) -> &Mesh {
        self.mesh
    }
    fn ring_indices(&self) -> &[usize] {
        &self.mesh.faces[self.index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Unit cube centered at the origin, faces counterclockwise from
    /// outside.
    pub(crate) fn cube_data() -> SolidData {
        SolidData {
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
        }
    }

    #[test]
    fn test_cube_validates() {
        let mesh = Mesh::from_data(&cube_data()).unwrap();
        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.num_edges(), 12);
        assert_eq!(mesh.num_faces(), 6);
    }

    #[test]
    fn test_missing_twin_rejected() {
        let mut data = cube_data();
        data.faces.pop();
        let err = Mesh::from_data(&data).unwrap_err();
        assert!(matches!(err, MeshError::MissingTwin(_, _)));
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut data = cube_data();
        data.faces[0][0] = 99;
        let err = Mesh::from_data(&data).unwrap_err();
        assert!(matches!(err, MeshError::VertexOutOfBounds { .. }));
    }

    #[test]
    fn test_isolated_vertex_rejected() {
        let mut data = cube_data();
        data.vertices.push([3.0, 3.0, 3.0]);
        let err = Mesh::from_data(&data).unwrap_err();
        assert!(matches!(err, MeshError::IsolatedVertex(8)));
    }

    #[test]
    fn test_face_normals_point_outward() {
        let mesh = Mesh::from_data(&cube_data()).unwrap();
        for face in mesh.faces() {
            let out = face.centroid() - mesh.centroid();
            assert!(face.normal().dot(&out) > 0.0);
        }
    }

    #[test]
    fn test_twin_and_dihedral() {
        let mesh = Mesh::from_data(&cube_data()).unwrap();
        let edge = mesh.edge(0, 1);
        let twin = edge.twin().unwrap();
        assert_eq!((twin.v1, twin.v2), (1, 0));
        assert_relative_eq!(
            edge.dihedral_angle().unwrap(),
            std::f64::consts::PI / 2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_vertex_walk_is_cyclic() {
        let mesh = Mesh::from_data(&cube_data()).unwrap();
        let edges = mesh.vertex(0).adjacent_edges();
        assert_eq!(edges.len(), 3);
        // Consecutive edges share a face.
        for (i, e) in edges.iter().enumerate() {
            let next = &edges[(i + 1) % edges.len()];
            let shared = e
                .face()
                .map(|f| f.contains_vertex(next.v2))
                .unwrap_or(false)
                || next
                    .face()
                    .map(|f| f.contains_vertex(e.v2))
                    .unwrap_or(false);
            assert!(shared);
        }
    }

    #[test]
    fn test_configuration() {
        let mesh = Mesh::from_data(&cube_data()).unwrap();
        let config = mesh.vertex(0).configuration();
        assert_eq!(config.get(&4), Some(&3));
    }

    #[test]
    fn test_volume_and_area() {
        let mesh = Mesh::from_data(&cube_data()).unwrap();
        assert_relative_eq!(mesh.volume(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(mesh.surface_area(), 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_hit_face() {
        let mesh = Mesh::from_data(&cube_data()).unwrap();
        let hit = mesh.hit_face(&Point3::new(0.1, 0.2, 0.5));
        assert_relative_eq!(hit.centroid().z, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_solid_data_round_trips_through_json() {
        let data = cube_data();
        let json = serde_json::to_string(&data).unwrap();
        let back: SolidData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.faces, data.faces);
    }
}
