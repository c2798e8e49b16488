//! Coordinates for the elementary Johnson solids.
//!
//! None of these nine has a closed coordinate form, so each starts from a
//! hand-placed sketch of its vertex layout together with its face loops.
//! A damped least-squares pass then drives every edge to unit length and
//! every face diagonal to its regular value, which pins the exact shape;
//! the face loops themselves are only consumed as distance constraints,
//! since the solid builder recovers faces from the settled points.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use nalgebra::{DMatrix, DVector};
use polyhedra_math::Point3;
use polyhedra_mesh::Mesh;
use polyhedra_specs::Elementary;

use crate::classical::golden;
use crate::error::{GeomError, Result};
use crate::faces::solid_from_vertices;

pub(crate) fn elementary_mesh(e: &Elementary) -> Result<Mesh> {
    let (points, faces) = match e {
        Elementary::SnubDisphenoid => snub_disphenoid(),
        Elementary::SnubSquareAntiprism => snub_square_antiprism(),
        Elementary::Sphenocorona => sphenocorona(),
        Elementary::AugmentedSphenocorona => augmented_sphenocorona(),
        Elementary::Sphenomegacorona => sphenomegacorona(),
        Elementary::Hebesphenomegacorona => hebesphenomegacorona(),
        Elementary::Disphenocingulum => disphenocingulum(),
        Elementary::Bilunabirotunda => bilunabirotunda(),
        Elementary::TriangularHebesphenorotunda => triangular_hebesphenorotunda(),
    };
    let points = settle(points, &faces, e.name())?;
    solid_from_vertices(&points)
}

// ============================================================
// Sketch relaxation
// ============================================================

type Sketch = (Vec<Point3>, Vec<Vec<usize>>);

/// Distance every pair of face-loop vertices must reach in a solid with
/// unit edges and regular faces: adjacent vertices are edges, the rest
/// are the diagonals of the square, pentagon, or hexagon holding them.
fn distance_targets(faces: &[Vec<usize>]) -> Vec<(usize, usize, f64)> {
    let mut targets = BTreeMap::new();
    let mut put = |a: usize, b: usize, d: f64| {
        targets.insert((a.min(b), a.max(b)), d);
    };
    for face in faces {
        let n = face.len();
        for i in 0..n {
            put(face[i], face[(i + 1) % n], 1.0);
        }
        match n {
            4 => {
                put(face[0], face[2], 2.0_f64.sqrt());
                put(face[1], face[3], 2.0_f64.sqrt());
            }
            5 => {
                for i in 0..5 {
                    put(face[i], face[(i + 2) % 5], golden());
                }
            }
            6 => {
                for i in 0..6 {
                    put(face[i], face[(i + 2) % 6], 3.0_f64.sqrt());
                }
                for i in 0..3 {
                    put(face[i], face[i + 3], 2.0);
                }
            }
            _ => {}
        }
    }
    targets
        .into_iter()
        .map(|((a, b), d)| (a, b, d))
        .collect()
}

/// Levenberg-Marquardt over all coordinates at once. The damping term
/// absorbs the rigid-motion null space of the distance system, so the
/// sketch settles onto the unique solid on its side of flexing.
fn settle(
    points: Vec<Point3>,
    faces: &[Vec<usize>],
    what: &'static str,
) -> Result<Vec<Point3>> {
    let targets = distance_targets(faces);
    let unknowns = points.len() * 3;
    let mut x = DVector::<f64>::zeros(unknowns);
    for (i, p) in points.iter().enumerate() {
        x[3 * i] = p.x;
        x[3 * i + 1] = p.y;
        x[3 * i + 2] = p.z;
    }
    let residuals = |x: &DVector<f64>| -> DVector<f64> {
        DVector::from_iterator(
            targets.len(),
            targets.iter().map(|&(a, b, d)| {
                let dx = x[3 * a] - x[3 * b];
                let dy = x[3 * a + 1] - x[3 * b + 1];
                let dz = x[3 * a + 2] - x[3 * b + 2];
                (dx * dx + dy * dy + dz * dz).sqrt() - d
            }),
        )
    };

    let mut lambda = 1e-3;
    for _ in 0..200 {
        let f = residuals(&x);
        if f.amax() < 1e-12 {
            let out = (0..points.len())
                .map(|i| Point3::new(x[3 * i], x[3 * i + 1], x[3 * i + 2]))
                .collect();
            return Ok(out);
        }
        let mut jac = DMatrix::<f64>::zeros(targets.len(), unknowns);
        for (row, &(a, b, _)) in targets.iter().enumerate() {
            let dx = x[3 * a] - x[3 * b];
            let dy = x[3 * a + 1] - x[3 * b + 1];
            let dz = x[3 * a + 2] - x[3 * b + 2];
            let len = (dx * dx + dy * dy + dz * dz).sqrt();
            if len < 1e-12 {
                return Err(GeomError::SolveFailed(what));
            }
            for (col, g) in [(3 * a, dx), (3 * a + 1, dy), (3 * a + 2, dz)] {
                jac[(row, col)] = g / len;
            }
            for (col, g) in [(3 * b, dx), (3 * b + 1, dy), (3 * b + 2, dz)] {
                jac[(row, col)] = -g / len;
            }
        }
        let normal = jac.tr_mul(&jac);
        let gradient = jac.tr_mul(&f);
        // Grow the damping until a step actually reduces the residual.
        loop {
            if lambda > 1e8 {
                return Err(GeomError::SolveFailed(what));
            }
            let mut damped = normal.clone();
            for k in 0..unknowns {
                damped[(k, k)] += lambda;
            }
            let step = match damped.lu().solve(&(-&gradient)) {
                Some(step) => step,
                None => {
                    lambda *= 10.0;
                    continue;
                }
            };
            let trial = &x + &step;
            if residuals(&trial).norm() < f.norm() {
                x = trial;
                lambda /= 3.0;
                break;
            }
            lambda *= 10.0;
        }
    }
    Err(GeomError::SolveFailed(what))
}

// ============================================================
// Vertex sketches
// ============================================================

fn snub_disphenoid() -> Sketch {
    let points = vec![
        Point3::new(0.35, 0.0, 0.72),
        Point3::new(-0.35, 0.0, 0.72),
        Point3::new(0.0, 0.707, 0.42),
        Point3::new(0.0, -0.707, 0.42),
        Point3::new(0.3, 0.3, -0.72),
        Point3::new(-0.5, 0.5, -0.42),
        Point3::new(-0.3, -0.3, -0.72),
        Point3::new(0.5, -0.5, -0.42),
    ];
    // Two orthogonal ridges (0-1 up top, 4-6 below) joined by a band of
    // eight triangles.
    let faces = loops(&[
        &[0, 2, 1],
        &[1, 3, 0],
        &[4, 5, 6],
        &[6, 7, 4],
        &[0, 2, 4],
        &[2, 5, 4],
        &[2, 1, 5],
        &[5, 6, 1],
        &[1, 3, 6],
        &[6, 7, 3],
        &[3, 0, 7],
        &[7, 4, 0],
    ]);
    (points, faces)
}

fn snub_square_antiprism() -> Sketch {
    let mut points = Vec::with_capacity(16);
    for k in 0..4 {
        let a = 0.5 * PI * k as f64;
        points.push(Point3::new(0.7071 * a.cos(), 0.7071 * a.sin(), 0.80));
    }
    for j in 0..8 {
        let a = 0.25 * PI * j as f64;
        let z = if j % 2 == 1 { 0.20 } else { -0.20 };
        points.push(Point3::new(1.10 * a.cos(), 1.10 * a.sin(), z));
    }
    for k in 0..4 {
        let a = 0.5 * PI * k as f64 + 0.25 * PI;
        points.push(Point3::new(0.7071 * a.cos(), 0.7071 * a.sin(), -0.80));
    }
    let m = |j: i32| 4 + j.rem_euclid(8) as usize;
    let mut faces = vec![vec![0, 1, 2, 3], vec![12, 13, 14, 15]];
    for k in 0..4i32 {
        let (t, t1) = (k as usize, ((k + 1) % 4) as usize);
        let q = 12 + k as usize;
        let q1 = 12 + ((k + 1) % 4) as usize;
        faces.push(vec![t, m(2 * k - 1), m(2 * k)]);
        faces.push(vec![t, m(2 * k), m(2 * k + 1)]);
        faces.push(vec![t, m(2 * k + 1), t1]);
        faces.push(vec![q, m(2 * k), m(2 * k + 1)]);
        faces.push(vec![q, m(2 * k + 1), m(2 * k + 2)]);
        faces.push(vec![q, m(2 * k + 2), q1]);
    }
    (points, faces)
}

/// The wedge of two squares over a ridge, rimmed by a corona of twelve
/// triangles. Shared by the sphenocorona pair.
fn sphenocorona_sketch() -> Sketch {
    let points = vec![
        Point3::new(-0.5, 0.0, 0.9),
        Point3::new(0.5, 0.0, 0.9),
        Point3::new(-0.5, 0.766, 0.257),
        Point3::new(0.5, 0.766, 0.257),
        Point3::new(-0.5, -0.766, 0.257),
        Point3::new(0.5, -0.766, 0.257),
        Point3::new(-1.05, 0.0, 0.35),
        Point3::new(1.05, 0.0, 0.35),
        Point3::new(0.0, 0.55, -0.35),
        Point3::new(0.0, -0.55, -0.35),
    ];
    let faces = loops(&[
        &[2, 3, 1, 0],
        &[4, 5, 1, 0],
        &[2, 0, 6],
        &[4, 0, 6],
        &[3, 1, 7],
        &[5, 1, 7],
        &[2, 3, 8],
        &[4, 5, 9],
        &[3, 7, 8],
        &[5, 7, 9],
        &[2, 6, 8],
        &[4, 6, 9],
        &[7, 8, 9],
        &[6, 8, 9],
    ]);
    (points, faces)
}

fn sphenocorona() -> Sketch {
    sphenocorona_sketch()
}

fn augmented_sphenocorona() -> Sketch {
    let (mut points, mut faces) = sphenocorona_sketch();
    // A square pyramid replaces the first square.
    points.push(Point3::new(0.0, 0.83, 1.12));
    faces.remove(0);
    faces.push(vec![2, 3, 10]);
    faces.push(vec![3, 1, 10]);
    faces.push(vec![1, 0, 10]);
    faces.push(vec![0, 2, 10]);
    (points, faces)
}

fn sphenomegacorona() -> Sketch {
    let points = vec![
        Point3::new(-0.5, 0.0, 1.0),
        Point3::new(0.5, 0.0, 1.0),
        Point3::new(-0.5, 0.766, 0.36),
        Point3::new(0.5, 0.766, 0.36),
        Point3::new(-0.5, -0.766, 0.36),
        Point3::new(0.5, -0.766, 0.36),
        Point3::new(-1.15, 0.0, 0.5),
        Point3::new(1.15, 0.0, 0.5),
        Point3::new(0.0, 0.55, -0.45),
        Point3::new(0.0, -0.55, -0.45),
        Point3::new(-0.85, 0.0, -0.35),
        Point3::new(0.85, 0.0, -0.35),
    ];
    let faces = loops(&[
        &[2, 3, 1, 0],
        &[4, 5, 1, 0],
        &[2, 0, 6],
        &[4, 0, 6],
        &[3, 1, 7],
        &[5, 1, 7],
        &[2, 3, 8],
        &[4, 5, 9],
        &[3, 7, 11],
        &[5, 7, 11],
        &[2, 6, 10],
        &[4, 6, 10],
        &[3, 8, 11],
        &[2, 8, 10],
        &[5, 9, 11],
        &[4, 9, 10],
        &[8, 11, 9],
        &[8, 10, 9],
    ]);
    (points, faces)
}

fn hebesphenomegacorona() -> Sketch {
    let points = vec![
        Point3::new(-0.5, 0.5, 0.9),
        Point3::new(0.5, 0.5, 0.9),
        Point3::new(-0.5, -0.5, 0.9),
        Point3::new(0.5, -0.5, 0.9),
        Point3::new(-0.5, 1.07, 0.08),
        Point3::new(0.5, 1.07, 0.08),
        Point3::new(-0.5, -1.07, 0.08),
        Point3::new(0.5, -1.07, 0.08),
        Point3::new(-1.15, 0.0, 0.45),
        Point3::new(1.15, 0.0, 0.45),
        Point3::new(0.0, 0.75, -0.6),
        Point3::new(0.0, -0.75, -0.6),
        Point3::new(-0.8, 0.0, -0.5),
        Point3::new(0.8, 0.0, -0.5),
    ];
    // Three squares in a row over the crown, a fan of three triangles at
    // each end, and a megacorona of twelve below.
    let faces = loops(&[
        &[4, 5, 1, 0],
        &[0, 1, 3, 2],
        &[2, 3, 7, 6],
        &[4, 0, 8],
        &[0, 2, 8],
        &[2, 6, 8],
        &[5, 1, 9],
        &[1, 3, 9],
        &[3, 7, 9],
        &[4, 5, 10],
        &[6, 7, 11],
        &[5, 9, 13],
        &[9, 7, 13],
        &[4, 8, 12],
        &[8, 6, 12],
        &[5, 10, 13],
        &[4, 10, 12],
        &[7, 11, 13],
        &[6, 11, 12],
        &[10, 13, 11],
        &[10, 12, 11],
    ]);
    (points, faces)
}

fn disphenocingulum() -> Sketch {
    let points = vec![
        Point3::new(-0.5, 0.0, 1.15),
        Point3::new(0.5, 0.0, 1.15),
        Point3::new(-0.5, 0.77, 0.5),
        Point3::new(0.5, 0.77, 0.5),
        Point3::new(-0.5, -0.77, 0.5),
        Point3::new(0.5, -0.77, 0.5),
        Point3::new(-1.1, 0.0, 0.6),
        Point3::new(1.1, 0.0, 0.6),
        Point3::new(0.0, 0.5, -1.15),
        Point3::new(0.0, -0.5, -1.15),
        Point3::new(0.77, 0.5, -0.5),
        Point3::new(0.77, -0.5, -0.5),
        Point3::new(-0.77, 0.5, -0.5),
        Point3::new(-0.77, -0.5, -0.5),
        Point3::new(0.0, 1.1, -0.6),
        Point3::new(0.0, -1.1, -0.6),
    ];
    // Two sphenocorona-style wedges, the lower one a quarter turn round,
    // joined by a cingulum of twelve triangles.
    let faces = loops(&[
        &[2, 3, 1, 0],
        &[4, 5, 1, 0],
        &[2, 0, 6],
        &[4, 0, 6],
        &[3, 1, 7],
        &[5, 1, 7],
        &[10, 11, 9, 8],
        &[12, 13, 9, 8],
        &[10, 8, 14],
        &[12, 8, 14],
        &[11, 9, 15],
        &[13, 9, 15],
        &[7, 10, 3],
        &[10, 3, 14],
        &[3, 14, 2],
        &[14, 2, 12],
        &[2, 12, 6],
        &[12, 6, 13],
        &[6, 13, 4],
        &[13, 4, 15],
        &[4, 15, 5],
        &[15, 5, 11],
        &[5, 11, 7],
        &[11, 7, 10],
    ]);
    (points, faces)
}

fn bilunabirotunda() -> Sketch {
    let points = vec![
        Point3::new(-1.15, 0.0, 0.0),
        Point3::new(1.15, 0.0, 0.0),
        Point3::new(0.0, 0.95, 0.5),
        Point3::new(0.0, 0.95, -0.5),
        Point3::new(0.0, -0.95, 0.5),
        Point3::new(0.0, -0.95, -0.5),
        Point3::new(-0.5, 0.5, 0.8),
        Point3::new(0.5, 0.5, 0.8),
        Point3::new(0.5, -0.5, 0.8),
        Point3::new(-0.5, -0.5, 0.8),
        Point3::new(-0.5, 0.5, -0.8),
        Point3::new(0.5, 0.5, -0.8),
        Point3::new(0.5, -0.5, -0.8),
        Point3::new(-0.5, -0.5, -0.8),
    ];
    let faces = loops(&[
        &[0, 6, 2, 3, 10],
        &[1, 7, 2, 3, 11],
        &[0, 9, 4, 5, 13],
        &[1, 8, 4, 5, 12],
        &[6, 7, 8, 9],
        &[10, 11, 12, 13],
        &[0, 6, 9],
        &[0, 10, 13],
        &[1, 7, 8],
        &[1, 11, 12],
        &[2, 6, 7],
        &[3, 10, 11],
        &[4, 9, 8],
        &[5, 13, 12],
    ]);
    (points, faces)
}

fn triangular_hebesphenorotunda() -> Sketch {
    let ring = |r: f64, offset_deg: f64, z: f64, n: usize, step_deg: f64| {
        (0..n)
            .map(move |i| {
                let a = (offset_deg + step_deg * i as f64) * PI / 180.0;
                Point3::new(r * a.cos(), r * a.sin(), z)
            })
            .collect::<Vec<_>>()
    };
    let mut points = Vec::with_capacity(18);
    points.extend(ring(0.58, 30.0, 1.40, 3, 120.0));
    points.extend(ring(0.95, 55.0, 0.78, 3, 120.0));
    points.extend(ring(0.95, 5.0, 0.78, 3, 120.0));
    points.extend(ring(1.05, 90.0, 0.45, 3, 120.0));
    points.extend(ring(1.0, 0.0, 0.0, 6, 60.0));
    let mut faces = vec![vec![0, 1, 2], vec![12, 13, 14, 15, 16, 17]];
    for i in 0..3 {
        let (t, t1) = (i, (i + 1) % 3);
        let (a, b, b1, w) = (3 + i, 6 + i, 6 + (i + 1) % 3, 9 + i);
        let (h0, h1, h2) = (12 + 2 * i, 12 + 2 * i + 1, 12 + (2 * i + 2) % 6);
        faces.push(vec![t, a, w, b1, t1]);
        faces.push(vec![t, b, a]);
        faces.push(vec![b, a, h1, h0]);
        faces.push(vec![a, w, h1]);
        faces.push(vec![w, h2, h1]);
        faces.push(vec![w, b1, h2]);
    }
    (points, faces)
}

fn loops(faces: &[&[usize]]) -> Vec<Vec<usize>> {
    faces.iter().map(|f| f.to_vec()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(e: Elementary) -> (usize, usize, usize) {
        let mesh = elementary_mesh(&e).unwrap();
        (mesh.num_vertices(), mesh.num_edges(), mesh.num_faces())
    }

    #[test]
    fn test_settled_counts() {
        assert_eq!(counts(Elementary::SnubDisphenoid), (8, 18, 12));
        assert_eq!(counts(Elementary::SnubSquareAntiprism), (16, 40, 26));
        assert_eq!(counts(Elementary::Sphenocorona), (10, 22, 14));
        assert_eq!(counts(Elementary::AugmentedSphenocorona), (11, 26, 17));
        assert_eq!(counts(Elementary::Sphenomegacorona), (12, 28, 18));
        assert_eq!(counts(Elementary::Hebesphenomegacorona), (14, 33, 21));
        assert_eq!(counts(Elementary::Disphenocingulum), (16, 38, 24));
        assert_eq!(counts(Elementary::Bilunabirotunda), (14, 26, 14));
        assert_eq!(counts(Elementary::TriangularHebesphenorotunda), (18, 36, 20));
    }

    #[test]
    fn test_targets_cover_every_face_diagonal() {
        let (_, faces) = bilunabirotunda();
        let targets = distance_targets(&faces);
        // 26 edges, 4 diagonals across the two squares, 5 per pentagon.
        assert_eq!(targets.len(), 26 + 4 + 20);
        assert!(targets
            .iter()
            .any(|&(_, _, d)| (d - golden()).abs() < 1e-12));
    }

    #[test]
    fn test_settle_rejects_a_degenerate_sketch() {
        let points = vec![Point3::origin(), Point3::origin()];
        let faces = vec![vec![0, 1]];
        assert!(settle(points, &faces, "degenerate").is_err());
    }
}
