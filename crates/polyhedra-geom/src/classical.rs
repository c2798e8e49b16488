//! Coordinates for the Platonic and Archimedean solids.
//!
//! The achiral solids come from exact coordinate tables expanded by sign
//! and rotation symmetry. The snub cube has a closed form in the
//! tribonacci constant; the snub dodecahedron is solved numerically by
//! placing a pentagon orbit under the icosahedral rotation group and
//! driving the free edge lengths to one.

use std::f64::consts::PI;

use nalgebra::{Matrix3, Rotation3, Unit, Vector3};
use polyhedra_math::Point3;
use polyhedra_mesh::{mirror, Mesh};
use polyhedra_specs::{Classical, Twist};

use crate::chirality::snub_twist;
use crate::error::{GeomError, Result};
use crate::faces::solid_from_vertices;

pub(crate) fn classical_mesh(c: &Classical) -> Result<Mesh> {
    let name = c.name();
    let points = match name.as_str() {
        "tetrahedron" => vec![
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(1.0, -1.0, -1.0),
            Point3::new(-1.0, 1.0, -1.0),
            Point3::new(-1.0, -1.0, 1.0),
        ],
        "cube" => expand(&[[1.0, 1.0, 1.0]], Symmetry::Cyclic),
        "octahedron" => expand(&[[1.0, 0.0, 0.0]], Symmetry::Cyclic),
        "dodecahedron" => {
            let phi = golden();
            expand(
                &[[1.0, 1.0, 1.0], [0.0, 1.0 / phi, phi]],
                Symmetry::Cyclic,
            )
        }
        "icosahedron" => expand(&[[0.0, 1.0, golden()]], Symmetry::Cyclic),
        "truncated tetrahedron" => expand(&[[3.0, 1.0, 1.0]], Symmetry::Tetrahedral),
        "cuboctahedron" => expand(&[[1.0, 1.0, 0.0]], Symmetry::Cyclic),
        "truncated cube" => {
            let xi = 2.0_f64.sqrt() - 1.0;
            expand(&[[xi, 1.0, 1.0]], Symmetry::Cyclic)
        }
        "truncated octahedron" => expand(&[[0.0, 1.0, 2.0]], Symmetry::Full),
        "rhombicuboctahedron" => {
            expand(&[[1.0, 1.0, 1.0 + 2.0_f64.sqrt()]], Symmetry::Cyclic)
        }
        "truncated cuboctahedron" => {
            let r = 2.0_f64.sqrt();
            expand(&[[1.0, 1.0 + r, 1.0 + 2.0 * r]], Symmetry::Full)
        }
        "icosidodecahedron" => {
            let phi = golden();
            expand(
                &[
                    [0.0, 0.0, phi],
                    [0.5, phi / 2.0, phi * phi / 2.0],
                ],
                Symmetry::Cyclic,
            )
        }
        "truncated dodecahedron" => {
            let phi = golden();
            expand(
                &[
                    [0.0, 1.0 / phi, 2.0 + phi],
                    [1.0 / phi, phi, 2.0 * phi],
                    [phi, 2.0, phi + 1.0],
                ],
                Symmetry::Cyclic,
            )
        }
        "truncated icosahedron" => {
            let phi = golden();
            expand(
                &[
                    [0.0, 1.0, 3.0 * phi],
                    [1.0, 2.0 + phi, 2.0 * phi],
                    [phi, 2.0, 2.0 * phi + 1.0],
                ],
                Symmetry::Cyclic,
            )
        }
        "rhombicosidodecahedron" => {
            let phi = golden();
            expand(
                &[
                    [1.0, 1.0, phi * phi * phi],
                    [phi * phi, phi, 2.0 * phi],
                    [2.0 + phi, 0.0, phi * phi],
                ],
                Symmetry::Cyclic,
            )
        }
        "truncated icosidodecahedron" => {
            let phi = golden();
            expand(
                &[
                    [1.0 / phi, 1.0 / phi, 3.0 + phi],
                    [2.0 / phi, phi, 1.0 + 2.0 * phi],
                    [1.0 / phi, phi * phi, 3.0 * phi - 1.0],
                    [2.0 * phi - 1.0, 2.0, 2.0 + phi],
                    [phi, 3.0, 2.0 * phi],
                ],
                Symmetry::Cyclic,
            )
        }
        "snub cube" => snub_cube_points(),
        "snub dodecahedron" => snub_dodecahedron_points()?,
        _ => return Err(GeomError::UnknownSpec(name)),
    };
    let mesh = solid_from_vertices(&points)?;
    if c.is_chiral() {
        let want = c.twist.unwrap_or(Twist::Left);
        if snub_twist(&mesh) != want {
            return Ok(mirror(&mesh));
        }
    }
    Ok(mesh)
}

pub(crate) fn golden() -> f64 {
    (1.0 + 5.0_f64.sqrt()) / 2.0
}

/// How a seed triple expands into a full vertex set.
enum Symmetry {
    /// All sign combinations and cyclic coordinate rotations.
    Cyclic,
    /// All sign combinations and all coordinate permutations.
    Full,
    /// Cyclic rotations with an even number of minus signs.
    Tetrahedral,
}

fn expand(triples: &[[f64; 3]], symmetry: Symmetry) -> Vec<Point3> {
    let mut points: Vec<Point3> = Vec::new();
    for &triple in triples {
        for perm in permutations(triple, &symmetry) {
            for signs in sign_patterns(&symmetry) {
                let p = Point3::new(perm[0] * signs[0], perm[1] * signs[1], perm[2] * signs[2]);
                if !points.iter().any(|q| (q - p).norm() < 1e-9) {
                    points.push(p);
                }
            }
        }
    }
    points
}

fn permutations(t: [f64; 3], symmetry: &Symmetry) -> Vec<[f64; 3]> {
    let cyclic = vec![t, [t[1], t[2], t[0]], [t[2], t[0], t[1]]];
    match symmetry {
        Symmetry::Cyclic | Symmetry::Tetrahedral => cyclic,
        Symmetry::Full => {
            let mut all = cyclic;
            all.extend([
                [t[0], t[2], t[1]],
                [t[1], t[0], t[2]],
                [t[2], t[1], t[0]],
            ]);
            all
        }
    }
}

fn sign_patterns(symmetry: &Symmetry) -> Vec<[f64; 3]> {
    match symmetry {
        Symmetry::Tetrahedral => vec![
            [1.0, 1.0, 1.0],
            [1.0, -1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, 1.0],
        ],
        _ => {
            let mut patterns = Vec::with_capacity(8);
            for i in 0..8 {
                patterns.push([
                    if i & 1 == 0 { 1.0 } else { -1.0 },
                    if i & 2 == 0 { 1.0 } else { -1.0 },
                    if i & 4 == 0 { 1.0 } else { -1.0 },
                ]);
            }
            patterns
        }
    }
}

// ============================================================
// Snub solids
// ============================================================

/// One enantiomorph of the snub cube, in the tribonacci constant.
fn snub_cube_points() -> Vec<Point3> {
    let t = tribonacci();
    let triple = [1.0, 1.0 / t, t];
    let even_signs = [
        [1.0, 1.0, 1.0],
        [1.0, -1.0, -1.0],
        [-1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
    ];
    let odd_signs = [
        [-1.0, 1.0, 1.0],
        [1.0, -1.0, 1.0],
        [1.0, 1.0, -1.0],
        [-1.0, -1.0, -1.0],
    ];
    let even_perms = [
        triple,
        [triple[1], triple[2], triple[0]],
        [triple[2], triple[0], triple[1]],
    ];
    let odd_perms = [
        [triple[0], triple[2], triple[1]],
        [triple[1], triple[0], triple[2]],
        [triple[2], triple[1], triple[0]],
    ];
    let mut points = Vec::with_capacity(24);
    for perm in even_perms {
        for s in even_signs {
            points.push(Point3::new(perm[0] * s[0], perm[1] * s[1], perm[2] * s[2]));
        }
    }
    for perm in odd_perms {
        for s in odd_signs {
            points.push(Point3::new(perm[0] * s[0], perm[1] * s[1], perm[2] * s[2]));
        }
    }
    points
}

fn tribonacci() -> f64 {
    let c = (33.0_f64).sqrt();
    (1.0 + (19.0 + 3.0 * c).cbrt() + (19.0 - 3.0 * c).cbrt()) / 3.0
}

/// One enantiomorph of the snub dodecahedron.
///
/// A unit-edge pentagon sits on a five-fold axis at distance `d` from the
/// origin, twisted by `theta`, and is replicated under the 60 icosahedral
/// rotations. The two free edge classes between neighboring pentagons
/// pin down `(d, theta)`; Gauss-Newton drives them to unit length.
fn snub_dodecahedron_points() -> Result<Vec<Point3>> {
    let group = icosahedral_rotations();
    let radius = 0.5 / (PI / 5.0).sin();
    let axis = Unit::new_normalize(Vector3::new(0.0, 1.0, golden()));
    let u = Unit::new_normalize(axis.cross(&Vector3::z()));
    let w = axis.cross(&u);

    let pentagon = |d: f64, theta: f64| -> Vec<Point3> {
        (0..5)
            .map(|k| {
                let a = theta + 2.0 * PI * k as f64 / 5.0;
                Point3::from(
                    axis.into_inner() * d + (u.into_inner() * a.cos() + w * a.sin()) * radius,
                )
            })
            .collect()
    };

    // Each orbit point appears once per coset of the pentagon's stabilizer,
    // so the representative labeling is stable across parameter values.
    let d0 = 1.98;
    let reps = {
        let base = pentagon(d0, 0.17);
        let mut taken: Vec<Point3> = Vec::new();
        let mut reps: Vec<(usize, usize)> = Vec::new();
        for (gi, g) in group.iter().enumerate() {
            for (k, p) in base.iter().enumerate() {
                let q = Point3::from(g * p.coords);
                if !taken.iter().any(|t| (t - q).norm() < 1e-6) {
                    taken.push(q);
                    reps.push((gi, k));
                }
            }
        }
        reps
    };

    let place = |d: f64, theta: f64| -> Vec<Point3> {
        let base = pentagon(d, theta);
        reps.iter()
            .map(|&(gi, k)| Point3::from(group[gi] * base[k].coords))
            .collect()
    };

    for theta0 in [0.17, -0.17, 0.45, -0.45, 0.8, -0.8] {
        if let Some(points) = solve_snub(&place, d0, theta0) {
            return Ok(points);
        }
    }
    Err(GeomError::SolveFailed("snub dodecahedron"))
}

/// Gauss-Newton on the three shortest non-pentagon distances from the
/// base vertex. Returns the placed vertex set when they all reach one.
fn solve_snub(
    place: &impl Fn(f64, f64) -> Vec<Point3>,
    d0: f64,
    theta0: f64,
) -> Option<Vec<Point3>> {
    // Indices 1 and 4 are the base vertex's own pentagon neighbors.
    let targets: Vec<usize> = {
        let points = place(d0, theta0);
        let mut by_dist: Vec<usize> = (1..points.len()).filter(|&j| j != 1 && j != 4).collect();
        by_dist.sort_by(|&a, &b| {
            let da = (points[a] - points[0]).norm();
            let db = (points[b] - points[0]).norm();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });
        by_dist.truncate(3);
        by_dist
    };
    let residuals = |d: f64, theta: f64| -> [f64; 3] {
        let points = place(d, theta);
        let mut f = [0.0; 3];
        for (i, &j) in targets.iter().enumerate() {
            f[i] = (points[j] - points[0]).norm() - 1.0;
        }
        f
    };

    let (mut d, mut theta) = (d0, theta0);
    let h = 1e-7;
    for _ in 0..100 {
        let f = residuals(d, theta);
        let err = f.iter().map(|x| x * x).sum::<f64>().sqrt();
        if err < 1e-12 {
            return Some(place(d, theta));
        }
        let fd = residuals(d + h, theta);
        let ft = residuals(d, theta + h);
        let mut jd = [0.0; 3];
        let mut jt = [0.0; 3];
        for i in 0..3 {
            jd[i] = (fd[i] - f[i]) / h;
            jt[i] = (ft[i] - f[i]) / h;
        }
        // Normal equations for the 3x2 system.
        let (mut a, mut b, mut c) = (0.0, 0.0, 0.0);
        let (mut r1, mut r2) = (0.0, 0.0);
        for i in 0..3 {
            a += jd[i] * jd[i];
            b += jd[i] * jt[i];
            c += jt[i] * jt[i];
            r1 -= jd[i] * f[i];
            r2 -= jt[i] * f[i];
        }
        let det = a * c - b * b;
        if det.abs() < 1e-18 || !det.is_finite() {
            return None;
        }
        d += (c * r1 - b * r2) / det;
        theta += (a * r2 - b * r1) / det;
        if !d.is_finite() || !theta.is_finite() {
            return None;
        }
    }
    None
}

/// The 60 rotations of the icosahedral group, generated by closure from a
/// cyclic coordinate rotation and a five-fold turn.
fn icosahedral_rotations() -> Vec<Matrix3<f64>> {
    let cyclic = Matrix3::new(0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0);
    let five = Rotation3::from_axis_angle(
        &Unit::new_normalize(Vector3::new(0.0, 1.0, golden())),
        2.0 * PI / 5.0,
    )
    .into_inner();
    let mut group = vec![Matrix3::identity()];
    let mut changed = true;
    while changed {
        changed = false;
        let mut next = Vec::new();
        for m in &group {
            for g in [&cyclic, &five] {
                let prod = g * m;
                let known = group
                    .iter()
                    .chain(next.iter())
                    .any(|k: &Matrix3<f64>| (k - prod).abs().max() < 1e-8);
                if !known {
                    next.push(prod);
                    changed = true;
                }
            }
        }
        group.extend(next);
    }
    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyhedra_specs::Spec;

    fn mesh_for(name: &str) -> Mesh {
        let Spec::Classical(c) = Spec::with_name(name).unwrap() else {
            panic!("{name} is not classical");
        };
        classical_mesh(&c).unwrap()
    }

    #[test]
    fn rotation_group_has_sixty_elements() {
        assert_eq!(icosahedral_rotations().len(), 60);
    }

    #[test]
    fn archimedean_face_mixes() {
        let counts = |name: &str| mesh_for(name).num_faces_by_sides();
        assert_eq!(
            counts("truncated tetrahedron"),
            [(3, 4), (6, 4)].into_iter().collect()
        );
        assert_eq!(
            counts("cuboctahedron"),
            [(3, 8), (4, 6)].into_iter().collect()
        );
        assert_eq!(
            counts("truncated cuboctahedron"),
            [(4, 12), (6, 8), (8, 6)].into_iter().collect()
        );
        assert_eq!(
            counts("rhombicosidodecahedron"),
            [(3, 20), (4, 30), (5, 12)].into_iter().collect()
        );
        assert_eq!(
            counts("truncated icosidodecahedron"),
            [(4, 30), (6, 20), (10, 12)].into_iter().collect()
        );
        assert_eq!(
            counts("snub dodecahedron"),
            [(3, 80), (5, 12)].into_iter().collect()
        );
    }

    #[test]
    fn snub_cube_twist_matches_the_spec() {
        for twist in [Twist::Left, Twist::Right] {
            let c = Classical {
                family: polyhedra_specs::Family::Octahedral,
                operation: polyhedra_specs::ClassicalOperation::Snub,
                facet: None,
                twist: Some(twist),
            };
            let mesh = classical_mesh(&c).unwrap();
            assert_eq!(snub_twist(&mesh), twist);
        }
    }

    #[test]
    fn vertices_lie_on_a_common_sphere() {
        for name in ["truncated octahedron", "icosidodecahedron", "snub cube"] {
            let mesh = mesh_for(name);
            let center = mesh.centroid();
            let r0 = (mesh.positions()[0] - center).norm();
            for p in mesh.positions() {
                assert!(((p - center).norm() - r0).abs() < 1e-9, "{name}");
            }
        }
    }
}
