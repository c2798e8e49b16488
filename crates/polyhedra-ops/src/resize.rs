//! Resize-family operations: dual, expand, snub, contract, twist.
//!
//! Expansion pushes a regular solid's faces outward into its
//! cantellation, snub does the same with a twist, and contract runs
//! either backwards. Dual morphs through the shared cantellation, and
//! twist rotates between a cantellated solid and its snub.

use std::sync::Arc;

use polyhedra_forme::Forme;
use polyhedra_specs::{Classical, ClassicalOperation, Facet, Spec, Twist};

use crate::error::Result;
use crate::morph::{FacetTarget, MorphDef};
use crate::operation::{HitBehavior, OpKind, Operation};
use crate::options::Options;
use crate::pair::{GraphEntry, GraphOpts, Intermediate, OpPair, Side};
use crate::poses::{classical_facet, classical_pose, dual_pose, twist_pose};

pub(crate) fn operations() -> Vec<Operation> {
    let expand = expand_pair();
    let snub = snub_pair();
    let semi_expand = semi_expand_pair();
    let twist = twist_pair();
    let dual = dual_pair();
    vec![
        Operation::new(
            "dual",
            OpKind::Pairs(vec![(Side::Left, dual.clone()), (Side::Right, dual)]),
            HitBehavior::None,
        ),
        Operation::new(
            "expand",
            OpKind::Pairs(vec![
                (Side::Left, semi_expand.clone()),
                (Side::Left, expand.clone()),
            ]),
            HitBehavior::None,
        ),
        Operation::new(
            "snub",
            OpKind::Pairs(vec![(Side::Left, snub.clone())]),
            HitBehavior::None,
        ),
        Operation::new(
            "twist",
            OpKind::Pairs(vec![(Side::Left, twist.clone()), (Side::Right, twist)]),
            HitBehavior::None,
        ),
        Operation::new(
            "contract",
            OpKind::Pairs(vec![
                (Side::Right, expand),
                (Side::Right, snub),
                (Side::Right, semi_expand),
            ]),
            HitBehavior::Facet { opposite: false },
        ),
    ]
}

fn regulars() -> impl Iterator<Item = Classical> {
    Classical::all()
        .into_iter()
        .filter(|c| c.operation == ClassicalOperation::Regular)
}

/// Regular solid to its cantellation.
fn expand_pair() -> Arc<OpPair> {
    let graph = regulars()
        .map(|c| GraphEntry {
            left: Spec::Classical(c),
            right: Spec::Classical(c.with_operation(ClassicalOperation::Cantellate)),
            opts: GraphOpts {
                left: Options::default(),
                right: Options::facet(c.facet_or_default()),
            },
        })
        .collect();
    Arc::new(OpPair {
        graph,
        intermediate: Intermediate::Side(Side::Right),
        get_pose: classical_pose,
        to_left: Some(MorphDef::aligned()),
        to_right: None,
    })
}

/// Regular solid to its snub, one entry per chirality.
fn snub_pair() -> Arc<OpPair> {
    let mut graph = Vec::new();
    for c in regulars() {
        for twist in [Twist::Left, Twist::Right] {
            // The chiral label flips between the vertex facet and the
            // face facet of the same snub solid.
            let chirality = if c.facet == Some(Facet::Vertex) {
                twist.flip()
            } else {
                twist
            };
            graph.push(GraphEntry {
                left: Spec::Classical(c),
                right: Spec::Classical(c.snub(chirality)),
                opts: GraphOpts {
                    left: Options::twist(twist),
                    right: Options::facet(c.facet_or_default()),
                },
            });
        }
    }
    Arc::new(OpPair {
        graph,
        intermediate: Intermediate::Side(Side::Right),
        get_pose: classical_pose,
        to_left: Some(MorphDef::nearest()),
        to_right: None,
    })
}

/// Truncated solid to its bevelling.
fn semi_expand_pair() -> Arc<OpPair> {
    let graph = Classical::all()
        .into_iter()
        .filter(|c| c.operation == ClassicalOperation::Truncate)
        .map(|c| GraphEntry {
            left: Spec::Classical(c),
            right: Spec::Classical(c.with_operation(ClassicalOperation::Bevel)),
            opts: GraphOpts {
                left: Options::default(),
                right: Options::facet(c.facet_or_default()),
            },
        })
        .collect();
    Arc::new(OpPair {
        graph,
        intermediate: Intermediate::Side(Side::Right),
        get_pose: classical_pose,
        to_left: Some(MorphDef {
            side_facets: Some(own_facet_targets),
            ..MorphDef::aligned()
        }),
        to_right: None,
    })
}

/// Cantellated solid to its snub, one entry per chirality.
fn twist_pair() -> Arc<OpPair> {
    let mut graph = Vec::new();
    for c in Classical::all() {
        if c.operation != ClassicalOperation::Cantellate {
            continue;
        }
        for twist in [Twist::Left, Twist::Right] {
            graph.push(GraphEntry {
                left: Spec::Classical(c),
                right: Spec::Classical(c.snub(twist)),
                opts: GraphOpts {
                    left: Options::twist(twist),
                    right: Options::default(),
                },
            });
        }
    }
    Arc::new(OpPair {
        graph,
        intermediate: Intermediate::Side(Side::Right),
        get_pose: twist_pose,
        to_left: Some(MorphDef {
            side_facets: Some(both_facet_targets),
            ..MorphDef::nearest()
        }),
        to_right: None,
    })
}

/// Face-faceted regular solid to its vertex-faceted partner, morphing
/// through the shared cantellation.
fn dual_pair() -> Arc<OpPair> {
    let graph = regulars()
        .filter(|c| c.facet != Some(Facet::Vertex))
        .map(|c| {
            let partner = Classical {
                facet: Some(Facet::Vertex),
                ..c
            };
            GraphEntry::new(Spec::Classical(c), Spec::Classical(partner))
        })
        .collect();
    Arc::new(OpPair {
        graph,
        intermediate: Intermediate::Custom(cantellated_intermediate),
        get_pose: dual_pose,
        to_left: Some(MorphDef::aligned()),
        to_right: Some(MorphDef::aligned()),
    })
}

fn cantellated_intermediate(entry: &GraphEntry) -> Spec {
    match entry.left {
        Spec::Classical(c) => Spec::Classical(c.with_operation(ClassicalOperation::Cantellate)),
        _ => entry.left,
    }
}

/// A bevelled solid contracts onto the truncated solid's own facet
/// faces; the other class shrinks back to vertices implicitly.
fn own_facet_targets(side: &Forme, _intermediate: &Forme) -> Result<Vec<FacetTarget>> {
    let facet = classical_facet(side);
    Ok(side
        .facet_faces(facet)?
        .into_iter()
        .map(FacetTarget::Face)
        .collect())
}

/// Both facet classes; the edge faces twist away between them.
fn both_facet_targets(side: &Forme, _intermediate: &Forme) -> Result<Vec<FacetTarget>> {
    let mut targets: Vec<FacetTarget> = side
        .facet_faces(Facet::Face)?
        .into_iter()
        .map(FacetTarget::Face)
        .collect();
    targets.extend(
        side.facet_faces(Facet::Vertex)?
            .into_iter()
            .map(FacetTarget::Face),
    );
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_expand_dodecahedron() {
        let result = by_name("expand")
            .apply(&realize("dodecahedron"), &Options::default())
            .unwrap();
        assert_eq!(result.result.spec.name(), "rhombicosidodecahedron");
        assert_eq!(result.result.mesh.num_faces(), 62);
    }

    #[test]
    fn test_snub_is_chiral() {
        let snub = by_name("snub");
        let cube = realize("cube");
        let left = snub.apply(&cube, &Options::twist(Twist::Left)).unwrap();
        let right = snub.apply(&cube, &Options::twist(Twist::Right)).unwrap();
        assert_eq!(left.result.spec.name(), "snub cube");
        assert!(left.result.spec.is_chiral());
        assert_ne!(left.result.spec, right.result.spec);
    }

    #[test]
    fn test_dual_runs_both_ways() {
        let dual = by_name("dual");
        let octahedron = dual
            .apply(&realize("cube"), &Options::default())
            .unwrap();
        assert_eq!(octahedron.result.spec.name(), "octahedron");
        let cube = dual.apply(&octahedron.result, &Options::default()).unwrap();
        assert_eq!(cube.result.spec.name(), "cube");
        // The self-dual tetrahedron round-trips through itself.
        let tetrahedron = dual
            .apply(&realize("tetrahedron"), &Options::default())
            .unwrap();
        assert_eq!(tetrahedron.result.spec.name(), "tetrahedron");
    }

    #[test]
    fn test_contract_by_facet() {
        let contract = by_name("contract");
        let forme = realize("rhombicuboctahedron");
        let cube = contract
            .apply(&forme, &Options::facet(Facet::Face))
            .unwrap();
        assert_eq!(cube.result.spec.name(), "cube");
        let octahedron = contract
            .apply(&forme, &Options::facet(Facet::Vertex))
            .unwrap();
        assert_eq!(octahedron.result.spec.name(), "octahedron");
    }

    #[test]
    fn test_twist_round_trip() {
        let twist = by_name("twist");
        let forme = realize("rhombicuboctahedron");
        let snubbed = twist.apply(&forme, &Options::twist(Twist::Left)).unwrap();
        assert_eq!(snubbed.result.spec.name(), "snub cube");
        let back = twist.apply(&snubbed.result, &Options::default()).unwrap();
        assert_eq!(back.result.spec.name(), "rhombicuboctahedron");
    }
}
