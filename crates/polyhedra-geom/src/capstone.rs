//! Ring-stack construction for capstone solids.
//!
//! A capstone solid is a stack of regular rings around the z axis: the
//! core ring, an optional second ring for the prismatic segment, and the
//! interior rings or apexes of up to two caps. Placing those points is
//! enough; faces come back from supporting-plane recovery.
//!
//! Cap azimuths are phased so that a cap's wide face (square for a
//! cupola, pentagon for a rotunda) sits over the core edge starting at
//! ring index `phase`. Equal phases across the core give the ortho
//! arrangement, differing phases the gyro one.

use std::f64::consts::PI;

use polyhedra_math::Point3;
use polyhedra_mesh::{mirror, Cap, CapKind, Mesh, RingLike};
use polyhedra_specs::{Capstone, Classical, ClassicalOperation, Family, Gyrate, Twist};

use crate::chirality::capstone_twist;
use crate::error::{GeomError, Result};
use crate::faces::solid_from_vertices;

pub(crate) fn capstone_mesh(c: &Capstone) -> Result<Mesh> {
    let m = c.base_ring_sides();
    let r = circumradius(m);
    let mut points = ring_points(m, r, 0.0, 0.0);

    if c.count >= 1 {
        points.extend(cap_points(top_cap_kind(c), c.base, 0.0, 0.0, 1.0, 0)?);
    }

    // The lower ring: the far prism face, or the seat of the second cap.
    let (lower_z, lower_offset) = match c.elongation {
        polyhedra_specs::Elongation::None => (0.0, 0.0),
        polyhedra_specs::Elongation::Prism => (-1.0, 0.0),
        polyhedra_specs::Elongation::Antiprism => (-antiprism_height(m), PI / m as f64),
    };
    if lower_z != 0.0 || c.is_prismatic() {
        points.extend(ring_points(m, r, lower_z, lower_offset));
    }

    if c.count == 2 {
        let phase = match c.gyrate {
            Some(Gyrate::Gyro) => 1,
            _ => 0,
        };
        points.extend(cap_points(
            bottom_cap_kind(c),
            c.base,
            lower_z,
            lower_offset,
            -1.0,
            phase,
        )?);
    }

    let mesh = solid_from_vertices(&points)?;
    if c.is_chiral() {
        let want = c.twist.unwrap_or(Twist::Left);
        if capstone_twist(&mesh) != Some(want) {
            return Ok(mirror(&mesh));
        }
    }
    Ok(mesh)
}

fn top_cap_kind(c: &Capstone) -> CapKind {
    if c.is_primary() {
        CapKind::Pyramid
    } else if c.rotunda_count == c.count {
        CapKind::Rotunda
    } else if c.base == 2 {
        CapKind::Fastigium
    } else {
        CapKind::Cupola
    }
}

fn bottom_cap_kind(c: &Capstone) -> CapKind {
    if c.is_primary() {
        CapKind::Pyramid
    } else if c.rotunda_count >= 1 {
        CapKind::Rotunda
    } else if c.base == 2 {
        CapKind::Fastigium
    } else {
        CapKind::Cupola
    }
}

/// Circumradius of a unit-edge regular `m`-gon.
pub(crate) fn circumradius(m: usize) -> f64 {
    0.5 / (PI / m as f64).sin()
}

/// Height of a unit-edge antiprism on `m`-gonal rings.
pub(crate) fn antiprism_height(m: usize) -> f64 {
    let sec = 1.0 / (PI / (2.0 * m as f64)).cos();
    (1.0 - sec * sec / 4.0).sqrt()
}

/// Apex height of a unit-edge pyramid over an `n`-gon.
pub(crate) fn pyramid_height(n: usize) -> f64 {
    let r = circumradius(n);
    (1.0 - r * r).sqrt()
}

/// Height of a unit-edge cupola from its `2n`-gon down to its `n`-gon.
pub(crate) fn cupola_height(n: usize) -> f64 {
    let r2n = circumradius(2 * n);
    let rn = circumradius(n);
    let chord2 = r2n * r2n + rn * rn - 2.0 * r2n * rn * (PI / (2.0 * n as f64)).cos();
    (1.0 - chord2).sqrt()
}

/// Points of a regular ring: azimuths `offset + 2 pi k / m` at height `z`.
pub(crate) fn ring_points(m: usize, radius: f64, z: f64, offset: f64) -> Vec<Point3> {
    (0..m)
        .map(|k| {
            let a = offset + 2.0 * PI * k as f64 / m as f64;
            Point3::new(radius * a.cos(), radius * a.sin(), z)
        })
        .collect()
}

/// Interior points of a cap seated on the ring at height `z` with azimuth
/// `offset`, opening in direction `dir` (+1 up, -1 down).
///
/// The seat ring itself is not emitted. `phase` shifts the cap by one
/// ring notch, moving its wide faces from the even seat edges to the odd
/// ones.
pub(crate) fn cap_points(
    kind: CapKind,
    base: u8,
    z: f64,
    offset: f64,
    dir: f64,
    phase: usize,
) -> Result<Vec<Point3>> {
    let n = base as usize;
    let shift = phase as f64 * PI / n as f64;
    match kind {
        CapKind::Pyramid => Ok(vec![Point3::new(0.0, 0.0, z + dir * pyramid_height(n))]),
        CapKind::Cupola | CapKind::Fastigium => Ok(ring_points(
            n,
            circumradius(n),
            z + dir * cupola_height(n),
            offset + shift - PI / (2.0 * n as f64),
        )),
        CapKind::Rotunda => {
            let profile = rotunda_profile()?;
            // Azimuths are measured from the midpoint of a seat edge
            // covered by a side pentagon.
            let reference = offset + shift + PI / 10.0;
            let mut points = ring_points(
                5,
                profile.mid.radius,
                z + dir * profile.mid.height,
                reference + profile.mid.azimuth,
            );
            points.extend(ring_points(
                5,
                profile.top.radius,
                z + dir * profile.top.height,
                reference + profile.top.azimuth,
            ));
            Ok(points)
        }
    }
}

/// Cylindrical placement of one rotunda ring relative to the seat.
#[derive(Debug, Clone, Copy)]
struct RingPlacement {
    radius: f64,
    height: f64,
    azimuth: f64,
}

#[derive(Debug, Clone, Copy)]
struct RotundaProfile {
    mid: RingPlacement,
    top: RingPlacement,
}

/// Measures the rotunda's interior rings off an icosidodecahedron cap.
///
/// There is no closed form as convenient as the cupola's, but the
/// icosidodecahedron contains the pentagonal rotunda exactly.
fn rotunda_profile() -> Result<RotundaProfile> {
    let source = Classical::new(Family::Icosahedral, ClassicalOperation::Rectify, None);
    let mesh = crate::classical::classical_mesh(&source)?;
    let caps = Cap::find(&mesh, CapKind::Rotunda);
    let cap = caps
        .first()
        .ok_or_else(|| GeomError::MissingCap("rotunda", source.name()))?;

    let boundary = cap.boundary();
    let normal = boundary.normal();
    let center = boundary.centroid();
    let covered = boundary
        .edges()
        .into_iter()
        .find(|e| e.face().is_some_and(|f| f.num_sides() == 5))
        .ok_or_else(|| GeomError::MissingCap("rotunda", source.name()))?;
    let u = {
        let v = covered.midpoint() - center;
        (v - normal * v.dot(&normal)).normalize()
    };
    let w = normal.cross(&u);

    // Split the ten interior vertices into the middle and top rings.
    let mut inner: Vec<Point3> = cap
        .inner_indices()
        .iter()
        .map(|&i| mesh.positions()[i])
        .collect();
    inner.sort_by(|a, b| {
        let ha = (a - center).dot(&normal);
        let hb = (b - center).dot(&normal);
        ha.partial_cmp(&hb).unwrap_or(std::cmp::Ordering::Equal)
    });
    let (mid, top) = inner.split_at(5);

    let placement = |ring: &[Point3]| {
        let p = ring[0];
        let v = p - center;
        let height = v.dot(&normal);
        let radial = v - normal * height;
        RingPlacement {
            radius: radial.norm(),
            height,
            azimuth: radial
                .dot(&w)
                .atan2(radial.dot(&u))
                .rem_euclid(2.0 * PI / 5.0),
        }
    };
    Ok(RotundaProfile {
        mid: placement(mid),
        top: placement(top),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use polyhedra_specs::Spec;

    fn mesh_for(name: &str) -> Mesh {
        let Spec::Capstone(c) = Spec::with_name(name).unwrap() else {
            panic!("{name} is not a capstone");
        };
        capstone_mesh(&c).unwrap()
    }

    #[test]
    fn analytic_heights() {
        assert_relative_eq!(pyramid_height(4), 0.5_f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(cupola_height(3), (2.0 / 3.0_f64).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(antiprism_height(4), 0.8409_f64, epsilon = 1e-4);
    }

    #[test]
    fn prisms_and_antiprisms() {
        let prism = mesh_for("pentagonal prism");
        assert_eq!(
            prism.num_faces_by_sides(),
            [(4, 5), (5, 2)].into_iter().collect()
        );
        let anti = mesh_for("square antiprism");
        assert_eq!(
            anti.num_faces_by_sides(),
            [(3, 8), (4, 2)].into_iter().collect()
        );
    }

    #[test]
    fn rotunda_matches_the_icosidodecahedron_cap() {
        let rotunda = mesh_for("pentagonal rotunda");
        assert_eq!(
            rotunda.num_faces_by_sides(),
            [(3, 10), (5, 6), (10, 1)].into_iter().collect()
        );
    }

    #[test]
    fn gyrate_controls_the_wide_face_matchup() {
        let ortho = mesh_for("square orthobicupola");
        let gyro = mesh_for("square gyrobicupola");
        // Same face mix, different arrangement.
        assert_eq!(ortho.num_faces_by_sides(), gyro.num_faces_by_sides());
        let caps = Cap::find(&ortho, CapKind::Cupola);
        assert_eq!(caps.len(), 2);
        assert_eq!(
            caps[0].gyration(),
            Some(polyhedra_mesh::Gyration::Ortho)
        );
        let caps = Cap::find(&gyro, CapKind::Cupola);
        assert_eq!(
            caps[0].gyration(),
            Some(polyhedra_mesh::Gyration::Gyro)
        );
    }

    #[test]
    fn gyrobifastigium_counts() {
        let mesh = mesh_for("gyrobifastigium");
        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(
            mesh.num_faces_by_sides(),
            [(3, 4), (4, 4)].into_iter().collect()
        );
    }

    #[test]
    fn gyroelongated_twist_matches_the_spec() {
        for twist in [Twist::Left, Twist::Right] {
            let c = Capstone {
                base: 5,
                cap_type: polyhedra_specs::CapType::Secondary,
                elongation: polyhedra_specs::Elongation::Antiprism,
                count: 2,
                rotunda_count: 1,
                gyrate: None,
                twist: Some(twist),
            };
            let mesh = capstone_mesh(&c).unwrap();
            assert_eq!(capstone_twist(&mesh), Some(twist));
        }
    }
}
