//! Facet-face classification for classical solids.
//!
//! Every classical solid's faces partition into face-facet faces,
//! vertex-facet faces, and edge faces. For most solids side count is
//! enough to tell them apart; the tetrahedral family needs adjacency
//! walks because both facets realize as triangles (or hexagons).

use polyhedra_mesh::{Edge, Face, RingLike};
use polyhedra_specs::{Classical, ClassicalOperation, Facet, Twist};

use crate::base::Forme;
use crate::error::{FormeError, Result};

/// The face across `edge` from its own face, skipping the face between.
///
/// With a twist the jump crosses a triangle pair leaning left or right;
/// without one it crosses a square.
pub fn opposite_face<'a>(edge: &Edge<'a>, twist: Option<Twist>) -> Option<Face<'a>> {
    match twist {
        Some(Twist::Left) => edge.twin()?.next()?.twin()?.prev()?.twin_face(),
        Some(Twist::Right) => edge.twin()?.prev()?.twin()?.next()?.twin_face(),
        None => edge.twin()?.next()?.next()?.twin_face(),
    }
}

impl Forme {
    fn classical(&self) -> Result<&Classical> {
        self.spec
            .as_classical()
            .ok_or_else(|| FormeError::missing(&self.spec, "classical facets"))
    }

    /// Side count of the faces realizing `facet`.
    pub fn facet_sides(&self, facet: Facet) -> Result<usize> {
        let c = self.classical()?;
        let base = c.facet_sides(facet);
        Ok(match c.operation {
            ClassicalOperation::Truncate | ClassicalOperation::Bevel => 2 * base,
            _ => base,
        })
    }

    /// Indices of the faces realizing `facet`.
    pub fn facet_faces(&self, facet: Facet) -> Result<Vec<usize>> {
        let c = *self.classical()?;
        if c.is_tetrahedral() {
            return self.tetrahedral_facet_faces(&c, facet);
        }
        let sides = self.facet_sides(facet)?;
        let matches: Vec<usize> = self
            .mesh
            .faces()
            .filter(|f| self.is_plain_facet_face(&c, f, facet, sides))
            .map(|f| f.index)
            .collect();
        if matches.is_empty() {
            return Err(FormeError::missing(&self.spec, "facet faces"));
        }
        Ok(matches)
    }

    /// The first face realizing `facet`.
    pub fn facet_face(&self, facet: Facet) -> Result<usize> {
        Ok(self.facet_faces(facet)?[0])
    }

    /// The faces of the spec's own facet.
    pub fn main_facet_faces(&self) -> Result<Vec<usize>> {
        let facet = self.classical()?.facet_or_default();
        self.facet_faces(facet)
    }

    /// Distance from the mesh centroid to the plane of a facet face.
    pub fn inradius(&self, facet: Facet) -> Result<f64> {
        let face = self.mesh.face(self.facet_face(facet)?);
        Ok(face.distance_to_center())
    }

    /// A facet face together with the nearest other face of the same
    /// facet, for pinning down orientation about the first one's normal.
    pub fn adjacent_facet_faces(&self, facet: Facet) -> Result<(usize, usize)> {
        let faces = self.facet_faces(facet)?;
        let f0 = self.mesh.face(faces[0]);
        let n0 = f0.normal();
        let f1 = faces[1..]
            .iter()
            .copied()
            .min_by(|&a, &b| {
                let ang = |i: usize| polyhedra_math::angle_between(&n0, &self.mesh.face(i).normal());
                ang(a).partial_cmp(&ang(b)).unwrap_or(std::cmp::Ordering::Equal)
            })
            .ok_or_else(|| FormeError::missing(&self.spec, "adjacent facet faces"))?;
        Ok((faces[0], f1))
    }

    /// Which facet the given face realizes, if any.
    pub fn face_facet(&self, face: usize) -> Option<Facet> {
        for facet in [Facet::Face, Facet::Vertex] {
            if let Ok(faces) = self.facet_faces(facet) {
                if faces.contains(&face) {
                    return Some(facet);
                }
            }
        }
        None
    }

    /// A face belonging to neither facet: an edge square of a
    /// cantellated solid or an edge square of a bevelled one.
    pub fn edge_face(&self) -> Result<usize> {
        self.mesh
            .faces()
            .map(|f| f.index)
            .find(|&i| self.face_facet(i).is_none())
            .ok_or_else(|| FormeError::missing(&self.spec, "edge faces"))
    }

    fn is_plain_facet_face(
        &self,
        c: &Classical,
        face: &Face<'_>,
        facet: Facet,
        sides: usize,
    ) -> bool {
        if face.num_sides() != sides {
            return false;
        }
        match c.operation {
            ClassicalOperation::Regular => c.facet_or_default() == facet,
            // On a truncated solid the big faces are the spec's facet.
            ClassicalOperation::Truncate => true,
            ClassicalOperation::Rectify | ClassicalOperation::Bevel => true,
            // Cantellation leaves edge squares with the same side count
            // as an octahedral face facet.
            ClassicalOperation::Cantellate => {
                face.adjacent_faces().iter().all(|f| f.num_sides() == 4)
            }
            ClassicalOperation::Snub => {
                facet == Facet::Face
                    || face.adjacent_faces().iter().all(|f| f.num_sides() == 3)
            }
        }
    }

    /// Tetrahedral solids realize both facets with the same polygon, so
    /// membership comes from adjacency walks instead of side counts.
    fn tetrahedral_facet_faces(&self, c: &Classical, facet: Facet) -> Result<Vec<usize>> {
        let mesh = &self.mesh;
        let err = || FormeError::missing(&self.spec, "facet faces");
        match c.operation {
            // All four faces belong to either facet of the tetrahedron.
            ClassicalOperation::Regular | ClassicalOperation::Truncate => Ok(mesh
                .faces()
                .filter(|f| f.num_sides() == self.facet_sides(facet).unwrap_or(3))
                .map(|f| f.index)
                .collect()),
            // The octahedron's facet classes are the two tetrahedral
            // orbits: a checkerboard over face adjacency.
            ClassicalOperation::Rectify => {
                let mut class = vec![None::<bool>; mesh.num_faces()];
                let mut queue = vec![(0usize, true)];
                while let Some((i, side)) = queue.pop() {
                    if class[i].is_some() {
                        continue;
                    }
                    class[i] = Some(side);
                    for f in mesh.face(i).adjacent_faces() {
                        queue.push((f.index, !side));
                    }
                }
                let want = facet == Facet::Face;
                Ok((0..mesh.num_faces())
                    .filter(|&i| class[i] == Some(want))
                    .collect())
            }
            // Hexagons of one orbit are reached from each other across
            // the squares.
            ClassicalOperation::Bevel => {
                let f0 = mesh
                    .faces()
                    .find(|f| f.num_sides() == 6)
                    .ok_or_else(err)?;
                let orbit = self.square_jump_orbit(f0.index);
                Ok(match facet {
                    Facet::Face => orbit,
                    Facet::Vertex => mesh
                        .faces()
                        .filter(|f| f.num_sides() == 6 && !orbit.contains(&f.index))
                        .map(|f| f.index)
                        .collect(),
                })
            }
            // Cuboctahedron: one triangle orbit, with the vertex orbit
            // starting across a seed edge.
            ClassicalOperation::Cantellate => {
                let f0 = mesh
                    .faces()
                    .find(|f| f.num_sides() == 3)
                    .ok_or_else(err)?;
                let seed = match facet {
                    Facet::Face => f0,
                    Facet::Vertex => f0.edges()[0]
                        .twin()
                        .and_then(|e| e.next())
                        .and_then(|e| e.twin_face())
                        .ok_or_else(err)?,
                };
                let mut orbit = vec![seed.index];
                for e in seed.edges() {
                    orbit.push(opposite_face(&e, None).ok_or_else(err)?.index);
                }
                Ok(orbit)
            }
            // Icosahedron as the tetrahedral snub: the orbit leans with
            // the facet.
            ClassicalOperation::Snub => {
                let f0 = mesh
                    .faces()
                    .find(|f| f.num_sides() == 3)
                    .ok_or_else(err)?;
                let twist = match facet {
                    Facet::Face => Twist::Right,
                    Facet::Vertex => Twist::Left,
                };
                let mut orbit = vec![f0.index];
                for e in f0.edges() {
                    orbit.push(opposite_face(&e, Some(twist)).ok_or_else(err)?.index);
                }
                Ok(orbit)
            }
        }
    }

    /// The hexagon orbit reachable by jumping across squares.
    fn square_jump_orbit(&self, start: usize) -> Vec<usize> {
        let mesh = &self.mesh;
        let mut orbit = vec![start];
        let mut queue = vec![start];
        while let Some(i) = queue.pop() {
            for e in mesh.face(i).edges() {
                if e.twin_face().map(|f| f.num_sides()) != Some(4) {
                    continue;
                }
                if let Some(f) = opposite_face(&e, None) {
                    if !orbit.contains(&f.index) {
                        orbit.push(f.index);
                        queue.push(f.index);
                    }
                }
            }
        }
        orbit
    }
}
