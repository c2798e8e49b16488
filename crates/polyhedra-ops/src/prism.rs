//! Prism-family operations: elongate, gyroelongate, shorten, turn.
//!
//! Each graph links capstones differing only in elongation. Bicupolae
//! get their own graphs because inserting an antiprism shifts the
//! ortho/gyro relationship into a chirality choice.

use std::sync::Arc;

use polyhedra_forme::{End, Forme};
use polyhedra_specs::{CapType, Capstone, Elongation, Gyrate, Spec, Twist};

use crate::error::{OpError, Result};
use crate::morph::{FacetTarget, MorphDef};
use crate::operation::{HitBehavior, OpKind, Operation};
use crate::options::Options;
use crate::pair::{GraphEntry, GraphOpts, Intermediate, OpPair, Side};
use crate::poses::{antiprism_pose, bicupola_pose, prism_pose};

pub(crate) fn operations() -> Vec<Operation> {
    let elongate = simple_pair(
        |s| !s.is_digonal() && !s.is_prismatic(),
        Elongation::None,
        Elongation::Prism,
        prism_pose,
    );
    let gyro_pyramid = simple_pair(
        |s| s.is_primary() && !s.is_prismatic(),
        Elongation::None,
        Elongation::Antiprism,
        antiprism_pose,
    );
    let gyro_cupola = simple_pair(
        |s| s.cap_type == CapType::Secondary && !s.is_digonal() && s.is_mono(),
        Elongation::None,
        Elongation::Antiprism,
        antiprism_pose,
    );
    let gyro_bicupola = bicupola_pair(Elongation::None);
    let turn_prismatic = simple_pair(
        |s| s.is_prismatic() && !s.is_digonal(),
        Elongation::Prism,
        Elongation::Antiprism,
        antiprism_pose,
    );
    let turn_pyramid = simple_pair(
        |s| s.is_primary() && !s.is_prismatic(),
        Elongation::Prism,
        Elongation::Antiprism,
        antiprism_pose,
    );
    let turn_cupola = simple_pair(
        |s| s.cap_type == CapType::Secondary && !s.is_digonal() && s.is_mono(),
        Elongation::Prism,
        Elongation::Antiprism,
        antiprism_pose,
    );
    let turn_bicupola = bicupola_pair(Elongation::Prism);

    vec![
        Operation::new(
            "elongate",
            OpKind::Pairs(vec![(Side::Left, elongate.clone())]),
            HitBehavior::None,
        ),
        Operation::new(
            "gyroelongate",
            OpKind::Pairs(vec![
                (Side::Left, gyro_pyramid.clone()),
                (Side::Left, gyro_cupola.clone()),
                (Side::Left, gyro_bicupola.clone()),
            ]),
            HitBehavior::None,
        ),
        Operation::new(
            "shorten",
            OpKind::Pairs(vec![
                (Side::Right, elongate),
                (Side::Right, gyro_pyramid),
                (Side::Right, gyro_cupola),
                (Side::Right, gyro_bicupola),
            ]),
            HitBehavior::None,
        ),
        Operation::new(
            "turn",
            OpKind::Pairs(vec![
                (Side::Left, turn_prismatic.clone()),
                (Side::Left, turn_pyramid.clone()),
                (Side::Left, turn_cupola.clone()),
                (Side::Left, turn_bicupola.clone()),
                (Side::Right, turn_prismatic),
                (Side::Right, turn_pyramid),
                (Side::Right, turn_cupola),
                (Side::Right, turn_bicupola),
            ]),
            HitBehavior::None,
        ),
    ]
}

/// A graph keyed by the more-elongated column; the left column drops
/// down to `left_elongation`.
fn simple_pair(
    filter: fn(&Capstone) -> bool,
    left_elongation: Elongation,
    right_elongation: Elongation,
    get_pose: crate::pair::PoseFn,
) -> Arc<OpPair> {
    let graph = Capstone::all()
        .into_iter()
        .filter(|s| filter(s) && s.elongation == right_elongation && s.twist.is_none())
        .map(|s| {
            GraphEntry::new(
                Spec::Capstone(s.with_elongation(left_elongation, None)),
                Spec::Capstone(s),
            )
        })
        .collect();
    Arc::new(OpPair {
        graph,
        intermediate: Intermediate::Side(Side::Right),
        get_pose,
        to_left: Some(end_faces_morph()),
        to_right: None,
    })
}

/// Bicupolae chirality graph: inserting the antiprism under an ortho
/// pair or a gyro pair reaches the same gyroelongated solid with
/// opposite twists.
fn bicupola_pair(left_elongation: Elongation) -> Arc<OpPair> {
    let mut graph = Vec::new();
    for s in Capstone::all() {
        if s.cap_type != CapType::Secondary
            || s.is_digonal()
            || !s.is_bi()
            || s.elongation != left_elongation
        {
            continue;
        }
        for twist in [Twist::Left, Twist::Right] {
            let chirality = if s.gyrate == Some(Gyrate::Gyro) {
                twist
            } else {
                twist.flip()
            };
            graph.push(GraphEntry {
                left: Spec::Capstone(s),
                right: Spec::Capstone(s.with_elongation(Elongation::Antiprism, Some(chirality))),
                opts: GraphOpts {
                    left: Options::twist(twist),
                    right: Options::twist(twist.flip()),
                },
            });
        }
    }
    Arc::new(OpPair {
        graph,
        intermediate: Intermediate::Side(Side::Right),
        get_pose: bicupola_pose,
        to_left: Some(end_faces_morph()),
        to_right: None,
    })
}

fn end_faces_morph() -> MorphDef {
    MorphDef {
        exact: false,
        side_facets: Some(capstone_end_targets),
        intermediate_faces: None,
    }
}

/// The faces the shortened solid keeps: its two ends. A fully
/// shortened non-prismatic solid keeps everything.
fn capstone_end_targets(side: &Forme, _intermediate: &Forme) -> Result<Vec<FacetTarget>> {
    let c = side
        .spec
        .as_capstone()
        .copied()
        .ok_or(OpError::Correspondence("a capstone spec"))?;
    if !c.is_prismatic() && c.is_shortened() {
        return Ok((0..side.mesh.num_faces()).map(FacetTarget::Face).collect());
    }
    let mut targets = Vec::new();
    for end in side.ends()? {
        match end {
            End::Face(face) => targets.push(FacetTarget::Face(face.index)),
            End::Cap(cap) => {
                targets.extend(cap.face_indices().iter().copied().map(FacetTarget::Face))
            }
        }
    }
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
    fn test_elongate_square_pyramid() {
        let result = by_name("elongate")
            .apply(&realize("square pyramid"), &Options::default())
            .unwrap();
        assert_eq!(result.result.spec.name(), "elongated square pyramid");
        // 4 cap triangles, 4 prism squares, 1 base square.
        assert_eq!(result.result.mesh.num_faces(), 9);
    }

    #[test]
    fn test_shorten_undoes_elongation() {
        let elongated = realize("elongated pentagonal cupola");
        let result = by_name("shorten")
            .apply(&elongated, &Options::default())
            .unwrap();
        assert_eq!(result.result.spec.name(), "pentagonal cupola");
    }

    #[test]
    fn test_gyroelongate_carries_a_twist_for_bicupolae() {
        let forme = realize("square orthobicupola");
        let op = by_name("gyroelongate");
        assert!(op.has_options(&forme.spec));
        let result = op.apply(&forme, &Options::twist(Twist::Left)).unwrap();
        assert_eq!(
            result.result.spec.name(),
            "gyroelongated square bicupola"
        );
        assert!(result.result.spec.is_chiral());
    }

    #[test]
    fn test_turn_prism_into_antiprism() {
        let result = by_name("turn")
            .apply(&realize("pentagonal prism"), &Options::default())
            .unwrap();
        assert_eq!(result.result.spec.name(), "pentagonal antiprism");
    }

    #[test]
    fn test_digonal_capstones_do_not_elongate() {
        let gyrobifastigium = Spec::with_name("gyrobifastigium").unwrap();
        assert!(!by_name("elongate").can_apply_to(&gyrobifastigium));
    }
}
