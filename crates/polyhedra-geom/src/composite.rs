//! Construction of composite solids by modifying a source solid.
//!
//! Augmented prisms and dodecahedra get pyramid apexes over selected
//! faces; augmented truncated solids get cupola rings; diminished
//! icosahedra lose vertices; gyrate rhombicosidodecahedra have a cupola
//! ring rotated in place. Everything reduces to editing the vertex set
//! and re-running face recovery.

use std::f64::consts::PI;

use polyhedra_math::{Dir3, Point3, Transform, Vec3};
use polyhedra_mesh::{Cap, CapKind, Mesh, RingLike};
use polyhedra_specs::{Align, Composite, CompositeSource, Family};

use crate::capstone::{circumradius, cupola_height, pyramid_height, ring_points};
use crate::error::{GeomError, Result};
use crate::faces::{is_unit_convex, solid_from_vertices};

pub(crate) fn composite_mesh(c: &Composite) -> Result<Mesh> {
    match c.source {
        CompositeSource::Prism(n) => augmented_prism(n, c),
        CompositeSource::Classical(_) if c.is_diminished_icosahedron() => {
            modified_icosahedron(c)
        }
        CompositeSource::Classical(_) if c.is_gyrate_rhombicosidodecahedron() => {
            modified_rhombicosidodecahedron(c)
        }
        CompositeSource::Classical(source) => augmented_classical(source, c),
    }
}

// ============================================================
// Augmented prisms
// ============================================================

fn augmented_prism(n: u8, c: &Composite) -> Result<Mesh> {
    let n = n as usize;
    let r = circumradius(n);
    let mut points = ring_points(n, r, 0.5, 0.0);
    points.extend(ring_points(n, r, -0.5, 0.0));

    let sites: &[usize] = match (n, c.augmented, c.align) {
        (_, 1, _) => &[0],
        (3, 2, _) => &[0, 1],
        (3, 3, _) => &[0, 1, 2],
        (5, 2, _) => &[0, 2],
        (6, 2, Some(Align::Para)) => &[0, 3],
        (6, 2, Some(Align::Meta)) => &[0, 2],
        (6, 3, _) => &[0, 2, 4],
        _ => return Err(GeomError::Sites(c.augmented as usize)),
    };
    // Square pyramid apexes sit out from the square face centers.
    let apothem = 0.5 / (PI / n as f64).tan();
    let reach = apothem + pyramid_height(4);
    for &k in sites {
        let a = (2.0 * k as f64 + 1.0) * PI / n as f64;
        points.push(Point3::new(reach * a.cos(), reach * a.sin(), 0.0));
    }
    solid_from_vertices(&points)
}

// ============================================================
// Diminished (and once augmented) icosahedra
// ============================================================

fn modified_icosahedron(c: &Composite) -> Result<Mesh> {
    let source = source_mesh(c)?;
    let dirs: Vec<Vec3> = source
        .positions()
        .iter()
        .map(|p| (p - source.centroid()).normalize())
        .collect();
    let sites = select_sites(&dirs, c.diminished as usize, c.align)?;

    let points: Vec<Point3> = source
        .positions()
        .iter()
        .enumerate()
        .filter(|(i, _)| !sites.contains(i))
        .map(|(_, p)| *p)
        .collect();
    let mesh = solid_from_vertices(&points)?;
    if c.augmented == 0 {
        return Ok(mesh);
    }

    // The only augmentable face of the tridiminished icosahedron is the
    // triangle surrounded by pentagons.
    let face = mesh
        .faces()
        .find(|f| {
            f.num_sides() == 3 && f.adjacent_faces().iter().all(|g| g.num_sides() == 5)
        })
        .ok_or(GeomError::Sites(1))?;
    let apex = face.centroid() + face.normal() * pyramid_height(3);
    let mut points = mesh.positions().to_vec();
    points.push(apex);
    solid_from_vertices(&points)
}

// ============================================================
// Gyrate and diminished rhombicosidodecahedra
// ============================================================

fn modified_rhombicosidodecahedron(c: &Composite) -> Result<Mesh> {
    let source = source_mesh(c)?;
    let caps = Cap::find(&source, CapKind::Cupola);
    let center = source.centroid();
    let axes: Vec<Vec3> = caps
        .iter()
        .map(|cap| (cap.boundary().centroid() - center).normalize())
        .collect();
    let total = (c.gyrate + c.diminished) as usize;
    let sites = select_sites(&axes, total, c.align)?;

    let mut removed: Vec<usize> = Vec::new();
    let mut replacements: Vec<Point3> = Vec::new();
    for (rank, &site) in sites.iter().enumerate() {
        let cap = &caps[site];
        removed.extend_from_slice(cap.inner_indices());
        if rank < c.gyrate as usize {
            // Gyration re-seats the cupola one decagon notch around.
            let turn = Transform::rotation_about_axis(&Dir3::new_normalize(axes[site]), PI / 5.0);
            for &i in cap.inner_indices() {
                replacements.push(turn.apply_point(&source.positions()[i]));
            }
        }
    }

    let mut points: Vec<Point3> = source
        .positions()
        .iter()
        .enumerate()
        .filter(|(i, _)| !removed.contains(i))
        .map(|(_, p)| *p)
        .collect();
    points.extend(replacements);
    solid_from_vertices(&points)
}

// ============================================================
// Augmented dodecahedra and truncated solids
// ============================================================

fn augmented_classical(
    source_spec: polyhedra_specs::Classical,
    c: &Composite,
) -> Result<Mesh> {
    let source = source_mesh(c)?;
    // Augmentation sites are the faces matching the source's big polygon.
    let sides = if c.is_augmented_truncated() {
        2 * source_spec.family.polygon()
    } else {
        source_spec.family.polygon()
    };
    let faces = source.faces_with_num_sides(sides);
    let normals: Vec<Vec3> = faces.iter().map(|f| f.normal()).collect();
    let sites = select_sites(&normals, c.augmented as usize, c.align)?;

    let mut points = source.positions().to_vec();
    if !c.is_augmented_truncated() {
        for &site in &sites {
            let f = &faces[site];
            points.push(f.centroid() + f.normal() * pyramid_height(sides));
        }
        return solid_from_vertices(&points);
    }

    // Cupola augmentation: each 2n-gon takes an n-gon ring above it, in
    // whichever of the two seatings yields a convex unit-edge solid.
    let n = source_spec.family.polygon();
    for &site in &sites {
        let f = &faces[site];
        let ring = cupola_seating(&source, f, n)?;
        points.extend(ring);
    }
    solid_from_vertices(&points)
}

/// The top ring of a cupola over face `f`, phased to the convex seating.
fn cupola_seating(
    source: &Mesh,
    f: &polyhedra_mesh::Face<'_>,
    n: usize,
) -> Result<Vec<Point3>> {
    let center = f.centroid();
    let normal = f.normal();
    let u = (f.vertices()[0].pos() - center).normalize();
    let w = normal.cross(&u);
    for phase in 0..2 {
        let offset = -PI / (2.0 * n as f64) + phase as f64 * PI / n as f64;
        let ring: Vec<Point3> = (0..n)
            .map(|j| {
                let a = offset + 2.0 * PI * j as f64 / n as f64;
                center
                    + (u * a.cos() + w * a.sin()) * circumradius(n)
                    + normal * cupola_height(n)
            })
            .collect();
        let mut candidate = source.positions().to_vec();
        candidate.extend(ring.iter().copied());
        if let Ok(mesh) = solid_from_vertices(&candidate) {
            if is_unit_convex(&mesh) && mesh.num_vertices() == candidate.len() {
                return Ok(ring);
            }
        }
    }
    Err(GeomError::Sites(1))
}

// ============================================================
// Shared helpers
// ============================================================

fn source_mesh(c: &Composite) -> Result<Mesh> {
    match c.source {
        CompositeSource::Prism(_) => unreachable!("prisms are built directly"),
        CompositeSource::Classical(spec) => crate::classical::classical_mesh(&spec),
    }
}

/// Picks `count` pairwise-compatible site indices from unit directions.
///
/// On the icosahedral sources the pairwise cosines fall in the classes
/// 0.447 (adjacent), -0.447 (meta), and -1 (para); two sites default to
/// para and three sites are mutually meta.
fn select_sites(dirs: &[Vec3], count: usize, align: Option<Align>) -> Result<Vec<usize>> {
    let meta = |a: &Vec3, b: &Vec3| {
        let d = a.dot(b);
        (-0.8..-0.2).contains(&d)
    };
    match count {
        0 => Ok(Vec::new()),
        1 => Ok(vec![0]),
        2 => {
            let want_para = align.unwrap_or(Align::Para) == Align::Para;
            let second = dirs
                .iter()
                .enumerate()
                .skip(1)
                .find(|(_, d)| {
                    if want_para {
                        dirs[0].dot(d) < -0.99
                    } else {
                        meta(&dirs[0], d)
                    }
                })
                .map(|(i, _)| i)
                .ok_or(GeomError::Sites(count))?;
            Ok(vec![0, second])
        }
        3 => {
            for j in 1..dirs.len() {
                if !meta(&dirs[0], &dirs[j]) {
                    continue;
                }
                for k in j + 1..dirs.len() {
                    if meta(&dirs[0], &dirs[k]) && meta(&dirs[j], &dirs[k]) {
                        return Ok(vec![0, j, k]);
                    }
                }
            }
            Err(GeomError::Sites(count))
        }
        _ => Err(GeomError::Sites(count)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyhedra_specs::Spec;

    fn mesh_for(name: &str) -> Mesh {
        let Spec::Composite(c) = Spec::with_name(name).unwrap() else {
            panic!("{name} is not composite");
        };
        composite_mesh(&c).unwrap()
    }

    #[test]
    fn augmented_hexagonal_prism_alignment() {
        let para = mesh_for("parabiaugmented hexagonal prism");
        let meta = mesh_for("metabiaugmented hexagonal prism");
        assert_eq!(para.num_vertices(), 14);
        assert_eq!(meta.num_vertices(), 14);
        assert_eq!(para.num_faces_by_sides(), meta.num_faces_by_sides());
        // Para apexes are antipodal through the prism axis.
        let apex_dirs: Vec<Vec3> = para
            .positions()
            .iter()
            .filter(|p| p.z.abs() < 1e-9)
            .map(|p| p.coords.normalize())
            .collect();
        assert_eq!(apex_dirs.len(), 2);
        assert!(apex_dirs[0].dot(&apex_dirs[1]) < -0.99);
    }

    #[test]
    fn augmented_dodecahedron_counts() {
        let mesh = mesh_for("augmented dodecahedron");
        assert_eq!(mesh.num_vertices(), 21);
        assert_eq!(
            mesh.num_faces_by_sides(),
            [(3, 5), (5, 11)].into_iter().collect()
        );
    }

    #[test]
    fn augmented_truncated_tetrahedron_counts() {
        let mesh = mesh_for("augmented truncated tetrahedron");
        assert_eq!(mesh.num_vertices(), 15);
        assert_eq!(
            mesh.num_faces_by_sides(),
            [(3, 8), (4, 3), (6, 3)].into_iter().collect()
        );
    }

    #[test]
    fn tridiminished_icosahedron_has_one_augmentable_triangle() {
        let mesh = mesh_for("tridiminished icosahedron");
        assert_eq!(mesh.num_vertices(), 9);
        let crowns: Vec<_> = mesh
            .faces()
            .filter(|f| {
                f.num_sides() == 3 && f.adjacent_faces().iter().all(|g| g.num_sides() == 5)
            })
            .collect();
        assert_eq!(crowns.len(), 1);
    }

    #[test]
    fn gyrate_keeps_counts_and_changes_shape() {
        let pristine_name = "rhombicosidodecahedron";
        let pristine = {
            let Spec::Classical(c) = Spec::with_name(pristine_name).unwrap() else {
                panic!();
            };
            crate::classical::classical_mesh(&c).unwrap()
        };
        let gyrate = mesh_for("gyrate rhombicosidodecahedron");
        assert_eq!(gyrate.num_vertices(), pristine.num_vertices());
        assert_eq!(gyrate.num_faces_by_sides(), pristine.num_faces_by_sides());
        // A gyrated solid has a pair of edge-sharing squares somewhere.
        let has_square_pair = gyrate.edges().any(|e| {
            e.face().is_some_and(|f| f.num_sides() == 4)
                && e.twin_face().is_some_and(|f| f.num_sides() == 4)
        });
        assert!(has_square_pair);
    }

    #[test]
    fn parabidiminished_matches_the_antiprism() {
        // This spec's canonical name collapses to "pentagonal antiprism",
        // so build it structurally.
        let c = Composite {
            source: CompositeSource::icosahedron(),
            augmented: 0,
            diminished: 2,
            gyrate: 0,
            align: Some(Align::Para),
        };
        let mesh = composite_mesh(&c).unwrap();
        assert_eq!(mesh.num_vertices(), 10);
        assert_eq!(
            mesh.num_faces_by_sides(),
            [(3, 10), (5, 2)].into_iter().collect()
        );
    }
}
