//! End-to-end checks that chain operations across the catalog and verify
//! that every result stays a convex solid with regular, planar faces.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use polyhedra::{
    all_operations, is_codirectional, is_inverse, operation, Cap, CapKind, Forme, Gyration, Mesh,
    Operation, Options, RingLike, Spec, Twist, Vec3, PRECISION,
};

fn forme(name: &str) -> Forme {
    Forme::realize(&Spec::with_name(name).unwrap()).unwrap()
}

fn by_name(name: &str) -> Operation {
    operation(name).unwrap()
}

/// Asserts that `mesh` is a closed, strictly convex solid whose faces are
/// planar regular polygons sharing a single edge length.
fn assert_valid(mesh: &Mesh, context: &str) {
    let euler =
        mesh.num_vertices() as i64 - mesh.num_edges() as i64 + mesh.num_faces() as i64;
    assert_eq!(euler, 2, "bad Euler characteristic for {context}");
    let unit = mesh.edge_length();
    for edge in mesh.edges() {
        assert!(edge.twin().is_some(), "unpaired edge in {context}");
        assert_abs_diff_eq!(edge.length(), unit, epsilon = PRECISION * unit);
        let angle = edge
            .dihedral_angle()
            .unwrap_or_else(|| panic!("open edge in {context}"));
        assert!(angle < PI - PRECISION, "reflex edge in {context}");
    }
    for face in mesh.faces() {
        assert!(face.is_planar(), "non-planar face in {context}");
        assert!(face.is_valid(), "degenerate face in {context}");
    }
}

/// A mesh signature that is stable under vertex reordering.
fn signature(mesh: &Mesh) -> (usize, BTreeMap<usize, usize>) {
    (mesh.num_vertices(), mesh.num_faces_by_sides())
}

/// Index into the cupola caps of a gyrate rhombicosidodecahedron variant,
/// picking a gyro cap whose axis is meta to every ortho cap axis.
fn meta_cap_index(mesh: &Mesh) -> usize {
    let caps = Cap::find(mesh, CapKind::Cupola);
    let ortho_axes: Vec<Vec3> = caps
        .iter()
        .filter(|cap| cap.gyration() == Some(Gyration::Ortho))
        .map(|cap| cap.boundary().normal())
        .collect();
    caps.iter()
        .position(|cap| {
            if cap.gyration() == Some(Gyration::Ortho) {
                return false;
            }
            let axis = cap.boundary().normal();
            ortho_axes
                .iter()
                .all(|other| !is_inverse(other, &axis) && !is_codirectional(other, &axis))
        })
        .unwrap()
}

#[test]
fn test_augment_square_pyramid_into_octahedron() {
    let pyramid = forme("square pyramid");
    let square = pyramid.mesh.faces_with_num_sides(4)[0].index;
    let result = by_name("augment")
        .apply(&pyramid, &Options::face(square))
        .unwrap();
    assert_eq!(result.result.spec.name(), "octahedron");
    assert_valid(&result.result.mesh, "octahedron");
}

#[test]
fn test_truncate_then_dual() {
    let truncated = by_name("truncate")
        .apply(&forme("tetrahedron"), &Options::default())
        .unwrap();
    assert_eq!(truncated.result.spec.name(), "truncated tetrahedron");
    assert_valid(&truncated.result.mesh, "truncated tetrahedron");

    let octahedron = by_name("dual")
        .apply(&forme("cube"), &Options::default())
        .unwrap();
    assert_eq!(octahedron.result.spec.name(), "octahedron");
    assert_valid(&octahedron.result.mesh, "octahedron");
}

#[test]
fn test_expand_then_diminish() {
    let expanded = by_name("expand")
        .apply(&forme("dodecahedron"), &Options::default())
        .unwrap();
    assert_eq!(expanded.result.spec.name(), "rhombicosidodecahedron");
    assert_valid(&expanded.result.mesh, "rhombicosidodecahedron");

    let diminished = by_name("diminish")
        .apply(&expanded.result, &Options::default())
        .unwrap();
    assert_eq!(
        diminished.result.spec.name(),
        "diminished rhombicosidodecahedron"
    );
    assert_valid(&diminished.result.mesh, "diminished rhombicosidodecahedron");
}

#[test]
fn test_gyrate_chain_to_trigyrate() {
    let gyrate = by_name("gyrate");
    let once = gyrate
        .apply(&forme("rhombicosidodecahedron"), &Options::default())
        .unwrap();
    assert_eq!(once.result.spec.name(), "gyrate rhombicosidodecahedron");
    assert_valid(&once.result.mesh, "gyrate rhombicosidodecahedron");

    let cap = meta_cap_index(&once.result.mesh);
    let twice = gyrate.apply(&once.result, &Options::cap(cap)).unwrap();
    assert_eq!(
        twice.result.spec.name(),
        "metabigyrate rhombicosidodecahedron"
    );
    assert_valid(&twice.result.mesh, "metabigyrate rhombicosidodecahedron");

    let cap = meta_cap_index(&twice.result.mesh);
    let thrice = gyrate.apply(&twice.result, &Options::cap(cap)).unwrap();
    assert_eq!(thrice.result.spec.name(), "trigyrate rhombicosidodecahedron");
    assert_valid(&thrice.result.mesh, "trigyrate rhombicosidodecahedron");
}

#[test]
fn test_truncate_sharpen_round_trip() {
    let original = forme("tetrahedron");
    let truncated = by_name("truncate")
        .apply(&original, &Options::default())
        .unwrap();
    let back = by_name("sharpen")
        .apply(&truncated.result, &Options::default())
        .unwrap();
    assert_eq!(back.result.spec.name(), "tetrahedron");
    assert_eq!(signature(&back.result.mesh), signature(&original.mesh));
}

#[test]
fn test_dual_is_an_involution() {
    let dual = by_name("dual");
    let original = forme("cube");
    let once = dual.apply(&original, &Options::default()).unwrap();
    let twice = dual.apply(&once.result, &Options::default()).unwrap();
    assert_eq!(twice.result.spec.name(), "cube");
    assert_eq!(signature(&twice.result.mesh), signature(&original.mesh));
}

#[test]
fn test_twist_inverts_itself() {
    let twist = by_name("twist");
    let original = forme("rhombicosidodecahedron");
    let snubbed = twist.apply(&original, &Options::twist(Twist::Left)).unwrap();
    assert_eq!(snubbed.result.spec.name(), "snub dodecahedron");
    let back = twist.apply(&snubbed.result, &Options::default()).unwrap();
    assert_eq!(back.result.spec.name(), "rhombicosidodecahedron");
    assert_eq!(signature(&back.result.mesh), signature(&original.mesh));
}

#[test]
fn test_augment_diminish_round_trip() {
    let pyramid = forme("square pyramid");
    let augmented = by_name("augment")
        .apply(&pyramid, &Options::default())
        .unwrap();
    assert_eq!(augmented.result.spec.name(), "octahedron");
    let back = by_name("diminish")
        .apply(&augmented.result, &Options::default())
        .unwrap();
    assert_eq!(back.result.spec.name(), "square pyramid");
    assert_eq!(signature(&back.result.mesh), signature(&pyramid.mesh));
}

#[test]
fn test_operations_are_deterministic() {
    let cube = forme("cube");
    let truncate = by_name("truncate");
    let first = truncate.apply(&cube, &Options::default()).unwrap();
    let second = truncate.apply(&cube, &Options::default()).unwrap();
    assert_eq!(
        first.result.mesh.positions(),
        second.result.mesh.positions()
    );
}

// Sweeps the whole catalog: every operation applied with every option
// combination it reports must land back inside the catalog as a convex
// regular-faced solid.
#[test]
fn test_catalog_sweep_stays_convex_regular_faced() {
    for spec in Spec::all() {
        let source =
            Forme::realize(&spec).unwrap_or_else(|err| panic!("{}: {err}", spec.name()));
        assert_valid(&source.mesh, &spec.name());
        for op in all_operations() {
            if !op.can_apply_to(&spec) {
                continue;
            }
            let mut combos = op.all_option_combos(&source).unwrap();
            if combos.is_empty() {
                combos.push(Options::default());
            }
            for options in combos {
                let context = format!("{}({})", op.name(), spec.name());
                let result = op
                    .apply(&source, &options)
                    .unwrap_or_else(|err| panic!("{context} failed: {err}"));
                assert_valid(&result.result.mesh, &context);
                assert_eq!(
                    result.animation.start.num_vertices(),
                    result.animation.end_vertices.len(),
                    "animation frames disagree for {context}"
                );
            }
        }
    }
}

#[test]
fn test_every_solid_outside_the_elementary_leftovers_has_an_operation() {
    for spec in Spec::all() {
        let has_op = all_operations().iter().any(|op| op.can_apply_to(&spec));
        if has_op {
            continue;
        }
        // Most elementary solids sit alone in the catalog; the
        // sphenocorona pair is the one augmentation among them.
        assert!(
            matches!(spec, Spec::Elementary(_)),
            "no operation applies to {}",
            spec.name()
        );
        assert_ne!(spec.name(), "sphenocorona");
        assert_ne!(spec.name(), "augmented sphenocorona");
    }
}
