//! Truncation-family operations: truncate, sharpen, rectify, unrectify.
//!
//! Two graphs cover the family. The regular trio links each regular
//! solid to its truncation and its rectification; the ambo trio links
//! each rectified solid to its bevelling and its cantellation. The
//! sharpening direction runs the same graphs backwards.

use std::sync::Arc;

use polyhedra_forme::Forme;
use polyhedra_specs::{Classical, ClassicalOperation, Facet, Spec};

use crate::error::Result;
use crate::morph::{FacetTarget, MorphDef};
use crate::operation::{HitBehavior, OpKind, Operation};
use crate::options::Options;
use crate::pair::{GraphEntry, GraphOpts, Intermediate, OpPair, Side};
use crate::poses::{ambo_pose, classical_facet, regular_pose};

pub(crate) fn operations() -> Vec<Operation> {
    let (reg_truncate, reg_rectify) = regular_trio();
    let (ambo_truncate, ambo_rectify) = ambo_trio();
    vec![
        Operation::new(
            "truncate",
            OpKind::Pairs(vec![
                (Side::Left, reg_truncate.clone()),
                (Side::Left, ambo_truncate.clone()),
            ]),
            HitBehavior::None,
        ),
        Operation::new(
            "sharpen",
            OpKind::Pairs(vec![
                (Side::Right, reg_truncate),
                (Side::Right, ambo_truncate),
            ]),
            HitBehavior::Facet { opposite: true },
        ),
        Operation::new(
            "rectify",
            OpKind::Pairs(vec![
                (Side::Left, reg_rectify.clone()),
                (Side::Left, ambo_rectify.clone()),
            ]),
            HitBehavior::None,
        ),
        Operation::new(
            "unrectify",
            OpKind::Pairs(vec![
                (Side::Right, reg_rectify),
                (Side::Right, ambo_rectify),
            ]),
            HitBehavior::Facet { opposite: true },
        ),
    ]
}

/// Truncation and rectification graphs over the regular solids.
fn regular_trio() -> (Arc<OpPair>, Arc<OpPair>) {
    let mut truncate_graph = Vec::new();
    let mut rectify_graph = Vec::new();
    for c in Classical::all() {
        if c.operation != ClassicalOperation::Truncate {
            continue;
        }
        let left = Spec::Classical(c.with_operation(ClassicalOperation::Regular));
        let middle = Spec::Classical(c);
        let right = Spec::Classical(c.with_operation(ClassicalOperation::Rectify));
        truncate_graph.push(GraphEntry::new(left, middle));
        // Leaving the rectified solid needs a facet choice; the other
        // columns are unambiguous.
        rectify_graph.push(GraphEntry {
            left,
            right,
            opts: GraphOpts {
                left: Options::default(),
                right: facet_opts(Some(c.facet_or_default())),
            },
        });
    }
    let truncate = Arc::new(OpPair {
        graph: truncate_graph,
        intermediate: Intermediate::Side(Side::Right),
        get_pose: regular_pose,
        to_left: Some(vertex_morph()),
        to_right: None,
    });
    // Rectification morphs through the truncated solid, which covers
    // both the regular solid's vertices and the rectified solid's new
    // facet faces.
    let rectify = Arc::new(OpPair {
        graph: rectify_graph,
        intermediate: Intermediate::Custom(truncated_intermediate),
        get_pose: regular_pose,
        to_left: Some(vertex_morph()),
        to_right: Some(MorphDef {
            side_facets: Some(opposite_facet_targets),
            ..MorphDef::aligned()
        }),
    });
    (truncate, rectify)
}

/// Bevelling and cantellation graphs over the rectified solids.
fn ambo_trio() -> (Arc<OpPair>, Arc<OpPair>) {
    let mut truncate_graph = Vec::new();
    let mut rectify_graph = Vec::new();
    for c in Classical::all() {
        if c.operation != ClassicalOperation::Bevel {
            continue;
        }
        let left = Spec::Classical(c.with_operation(ClassicalOperation::Rectify));
        let middle = Spec::Classical(c);
        let right = Spec::Classical(c.with_operation(ClassicalOperation::Cantellate));
        truncate_graph.push(GraphEntry::new(left, middle));
        rectify_graph.push(GraphEntry::new(left, right));
    }
    let truncate = Arc::new(OpPair {
        graph: truncate_graph,
        intermediate: Intermediate::Side(Side::Right),
        get_pose: ambo_pose,
        to_left: Some(vertex_morph()),
        to_right: None,
    });
    let rectify = Arc::new(OpPair {
        graph: rectify_graph,
        intermediate: Intermediate::Custom(bevelled_intermediate),
        get_pose: ambo_pose,
        to_left: Some(vertex_morph()),
        to_right: Some(MorphDef {
            side_facets: Some(edge_face_targets),
            ..MorphDef::aligned()
        }),
    });
    (truncate, rectify)
}

fn facet_opts(facet: Option<Facet>) -> Options {
    Options {
        facet,
        ..Options::default()
    }
}

fn vertex_morph() -> MorphDef {
    MorphDef {
        side_facets: Some(vertex_targets),
        ..MorphDef::aligned()
    }
}

/// Truncation undoes by collapsing each truncation face onto the
/// vertex it cut away; pairing against all vertices expresses that.
fn vertex_targets(side: &Forme, _intermediate: &Forme) -> Result<Vec<FacetTarget>> {
    Ok((0..side.mesh.num_vertices())
        .map(FacetTarget::Vertex)
        .collect())
}

/// The rectified solid's faces of the class the truncation did not
/// keep; its other faces have no partner on the truncated side.
fn opposite_facet_targets(side: &Forme, intermediate: &Forme) -> Result<Vec<FacetTarget>> {
    let facet = classical_facet(intermediate).opposite();
    Ok(side
        .facet_faces(facet)?
        .into_iter()
        .map(FacetTarget::Face)
        .collect())
}

/// The cantellated solid's edge faces: everything outside both facet
/// classes, one square per source edge.
fn edge_face_targets(side: &Forme, _intermediate: &Forme) -> Result<Vec<FacetTarget>> {
    let mut facet_faces: Vec<usize> = side.facet_faces(Facet::Face)?;
    facet_faces.extend(side.facet_faces(Facet::Vertex)?);
    Ok((0..side.mesh.num_faces())
        .filter(|f| !facet_faces.contains(f))
        .map(FacetTarget::Face)
        .collect())
}

fn truncated_intermediate(entry: &GraphEntry) -> Spec {
    match entry.left {
        Spec::Classical(c) => Spec::Classical(c.with_operation(ClassicalOperation::Truncate)),
        _ => entry.left,
    }
}

fn bevelled_intermediate(entry: &GraphEntry) -> Spec {
    match entry.left {
        Spec::Classical(c) => Spec::Classical(c.with_operation(ClassicalOperation::Bevel)),
        _ => entry.left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyhedra_specs::Spec;

    fn realize(name: &str) -> Forme {
        Forme::realize(&Spec::with_name(name).unwrap()).unwrap()
    }

    fn by_name(name: &str) -> Operation {
        operations()
            .into_iter()
            .find(|op| op.name() == name)
            .unwrap()
    }

    #[test]
    fn test_truncate_applies_to_regulars_and_rectifieds() {
        let truncate = by_name("truncate");
        for name in ["tetrahedron", "cube", "icosahedron", "cuboctahedron"] {
            assert!(
                truncate.can_apply_to(&Spec::with_name(name).unwrap()),
                "{name}"
            );
        }
        assert!(!truncate.can_apply_to(&Spec::with_name("truncated cube").unwrap()));
    }

    #[test]
    fn test_truncate_tetrahedron() {
        let result = by_name("truncate")
            .apply(&realize("tetrahedron"), &Options::default())
            .unwrap();
        assert_eq!(result.result.spec.name(), "truncated tetrahedron");
        assert_eq!(result.result.mesh.num_faces(), 8);
        assert_eq!(result.result.mesh.num_vertices(), 12);
        // The animation starts from the truncated topology collapsed
        // onto the tetrahedron.
        assert_eq!(result.animation.start.num_vertices(), 12);
        assert_eq!(result.animation.end_vertices.len(), 12);
    }

    #[test]
    fn test_sharpen_inverts_truncation() {
        let sharpen = by_name("sharpen");
        let truncated = realize("truncated tetrahedron");
        let back = sharpen.apply(&truncated, &Options::default()).unwrap();
        assert_eq!(back.result.spec.name(), "tetrahedron");
        // Bevelled solids sharpen back to the rectified solid.
        let bevelled = realize("truncated cuboctahedron");
        let to_rectified = sharpen.apply(&bevelled, &Options::default()).unwrap();
        assert_eq!(to_rectified.result.spec.name(), "cuboctahedron");
    }

    #[test]
    fn test_unrectify_facet_chooses_the_result() {
        let unrectify = by_name("unrectify");
        let forme = realize("cuboctahedron");
        assert!(unrectify.has_options(&forme.spec));
        let cube = unrectify
            .apply(&forme, &Options::facet(polyhedra_specs::Facet::Face))
            .unwrap();
        assert_eq!(cube.result.spec.name(), "cube");
        let octahedron = unrectify
            .apply(&forme, &Options::facet(polyhedra_specs::Facet::Vertex))
            .unwrap();
        assert_eq!(octahedron.result.spec.name(), "octahedron");
    }

    #[test]
    fn test_rectify_cube_and_back() {
        let rectified = by_name("rectify")
            .apply(&realize("cube"), &Options::default())
            .unwrap();
        assert_eq!(rectified.result.spec.name(), "cuboctahedron");
        let back = by_name("unrectify")
            .apply(&rectified.result, &Options::facet(polyhedra_specs::Facet::Face))
            .unwrap();
        assert_eq!(back.result.spec.name(), "cube");
    }
}
