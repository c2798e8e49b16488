//! Face recovery for convex unit-edge solids.
//!
//! Every catalog solid is strictly convex with all edges the same length,
//! so its surface is fully determined by its vertex set. Builders place
//! points and this module finds the faces: edges are the minimum-distance
//! pairs, and faces are the supporting planes spanned by adjacent edge
//! pairs.

use std::collections::HashSet;

use polyhedra_math::{centroid, Point3};
use polyhedra_mesh::{Mesh, SolidData};

use crate::error::Result;

// Vertex placements are exact or solved well past this tolerance.
const EPS: f64 = 1e-7;

/// Builds the convex solid on `vertices`, rescaled to unit edge length.
///
/// Fails with a mesh validation error when the point set does not describe
/// a closed convex unit-edge surface, which registration searches use to
/// reject bad candidates.
pub fn solid_from_vertices(vertices: &[Point3]) -> Result<Mesh> {
    let dmin = min_distance(vertices);
    let scale = 1.0 / dmin;
    let points: Vec<Point3> = vertices.iter().map(|p| Point3::from(p.coords * scale)).collect();

    let neighbors = unit_neighbors(&points);
    let center = centroid(&points);

    let mut seen: HashSet<Vec<usize>> = HashSet::new();
    let mut faces: Vec<Vec<usize>> = Vec::new();
    for (b, adj) in neighbors.iter().enumerate() {
        for (i, &a) in adj.iter().enumerate() {
            for &c in &adj[i + 1..] {
                let mut normal = (points[a] - points[b]).cross(&(points[c] - points[b]));
                if normal.norm() < EPS {
                    continue;
                }
                normal.normalize_mut();
                if normal.dot(&(points[b] - center)) < 0.0 {
                    normal = -normal;
                }
                let plane = normal.dot(&points[b].coords);
                let Some(on_plane) = supporting_set(&points, &normal, plane) else {
                    continue;
                };
                let mut key = on_plane.clone();
                key.sort_unstable();
                if seen.insert(key) {
                    faces.push(order_loop(&points, on_plane, &normal));
                }
            }
        }
    }

    let data = SolidData {
        vertices: points.iter().map(|p| [p.x, p.y, p.z]).collect(),
        faces,
    };
    Ok(Mesh::from_data(&data)?)
}

/// Whether every edge is unit length and every dihedral is strictly convex.
pub(crate) fn is_unit_convex(mesh: &Mesh) -> bool {
    mesh.edges().all(|edge| {
        (edge.length() - 1.0).abs() < EPS.sqrt()
            && edge
                .dihedral_angle()
                .is_some_and(|a| a < std::f64::consts::PI - 1e-4)
    })
}

fn min_distance(points: &[Point3]) -> f64 {
    let mut best = f64::INFINITY;
    for (i, p) in points.iter().enumerate() {
        for q in &points[i + 1..] {
            best = best.min((q - p).norm());
        }
    }
    best
}

fn unit_neighbors(points: &[Point3]) -> Vec<Vec<usize>> {
    let mut neighbors = vec![Vec::new(); points.len()];
    for i in 0..points.len() {
        for j in i + 1..points.len() {
            if ((points[j] - points[i]).norm() - 1.0).abs() < EPS {
                neighbors[i].push(j);
                neighbors[j].push(i);
            }
        }
    }
    neighbors
}

/// The vertices lying on the plane, or `None` when the plane cuts the solid.
fn supporting_set(
    points: &[Point3],
    normal: &polyhedra_math::Vec3,
    plane: f64,
) -> Option<Vec<usize>> {
    let mut on_plane = Vec::new();
    for (i, p) in points.iter().enumerate() {
        let d = normal.dot(&p.coords) - plane;
        if d > EPS {
            return None;
        }
        if d > -EPS {
            on_plane.push(i);
        }
    }
    (on_plane.len() >= 3).then_some(on_plane)
}

/// Orders coplanar vertices counterclockwise about the outward normal.
fn order_loop(points: &[Point3], mut indices: Vec<usize>, normal: &polyhedra_math::Vec3) -> Vec<usize> {
    let face_points: Vec<Point3> = indices.iter().map(|&i| points[i]).collect();
    let center = centroid(&face_points);
    let u = (points[indices[0]] - center).normalize();
    let w = normal.cross(&u);
    indices.sort_by(|&a, &b| {
        let angle = |i: usize| {
            let r = points[i] - center;
            r.dot(&w).atan2(r.dot(&u))
        };
        angle(a).partial_cmp(&angle(b)).unwrap_or(std::cmp::Ordering::Equal)
    });
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyhedra_mesh::RingLike;

    #[test]
    fn recovers_the_octahedron_from_its_vertices() {
        let points: Vec<Point3> = [
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ]
        .iter()
        .map(|&[x, y, z]| Point3::new(x, y, z))
        .collect();
        let mesh = solid_from_vertices(&points).unwrap();
        assert_eq!(mesh.num_vertices(), 6);
        assert_eq!(mesh.num_faces(), 8);
        // Rescaled so the original sqrt(2) edges become unit.
        for edge in mesh.edges() {
            assert!((edge.length() - 1.0).abs() < 1e-12);
        }
        for face in mesh.faces() {
            let out = face.centroid() - mesh.centroid();
            assert!(face.normal().dot(&out) > 0.0, "face {} winds inward", face.index);
        }
    }

    #[test]
    fn recovers_square_faces_as_single_loops() {
        let points: Vec<Point3> = (0..8)
            .map(|i| {
                Point3::new(
                    if i & 1 == 0 { -0.5 } else { 0.5 },
                    if i & 2 == 0 { -0.5 } else { 0.5 },
                    if i & 4 == 0 { -0.5 } else { 0.5 },
                )
            })
            .collect();
        let mesh = solid_from_vertices(&points).unwrap();
        assert_eq!(mesh.num_faces(), 6);
        assert!(mesh.faces().all(|f| f.num_sides() == 4));
        assert!(is_unit_convex(&mesh));
    }
}
