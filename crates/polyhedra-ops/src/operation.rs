//! The user-facing operation type.
//!
//! An [`Operation`] bundles the graphs that drive it with the behaviors
//! a caller needs around application: checking applicability, listing
//! and defaulting options, resolving a pointer hit to an option choice,
//! and classifying faces for highlighting.

use std::sync::Arc;

use polyhedra_forme::Forme;
use polyhedra_math::Point3;
use polyhedra_mesh::Mesh;
use polyhedra_specs::Spec;

use crate::cut_paste;
use crate::error::{OpError, Result};
use crate::options::{Options, SelectionState};
use crate::pair::{specs_match, GraphEntry, OpPair, Side};

/// A morphing animation: a start mesh and per-vertex destinations.
#[derive(Debug, Clone)]
pub struct AnimationData {
    /// The mesh the animation starts from.
    pub start: Mesh,
    /// Destination of each start vertex, in the same order.
    pub end_vertices: Vec<Point3>,
}

/// The outcome of applying an operation.
#[derive(Debug, Clone)]
pub struct OpResult {
    /// The produced solid, aligned with the input.
    pub result: Forme,
    /// The transition from input to result.
    pub animation: AnimationData,
}

/// What drives an operation.
pub(crate) enum OpKind {
    /// One or more two-sided graphs, applied from the given side.
    Pairs(Vec<(Side, Arc<OpPair>)>),
    /// Cap attachment over the augmentation graph.
    Augment(Arc<Vec<GraphEntry>>),
    /// Cap removal over the augmentation graph.
    Diminish(Arc<Vec<GraphEntry>>),
    /// Cap rotation over the gyration graph.
    Gyrate(Vec<GraphEntry>),
}

/// How a pointer hit on a face picks options.
pub(crate) enum HitBehavior {
    /// Hits carry no information.
    None,
    /// The hit face's facet class, or its opposite.
    Facet {
        /// Select the class the hit face does not belong to.
        opposite: bool,
    },
    /// The nearest modifiable cap containing the hit face.
    Cap,
    /// The hit face itself, when augmentable.
    Face,
}

/// A named, applicable polyhedron operation.
pub struct Operation {
    name: &'static str,
    kind: OpKind,
    hit: HitBehavior,
}

impl Operation {
    pub(crate) fn new(name: &'static str, kind: OpKind, hit: HitBehavior) -> Operation {
        Operation { name, kind, hit }
    }

    /// The operation's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether any graph entry starts from `spec`.
    pub fn can_apply_to(&self, spec: &Spec) -> bool {
        match &self.kind {
            OpKind::Pairs(defs) => defs.iter().any(|(side, pair)| {
                pair.graph
                    .iter()
                    .any(|entry| specs_match(entry.spec(*side), spec))
            }),
            OpKind::Augment(graph) => graph.iter().any(|entry| specs_match(&entry.left, spec)),
            OpKind::Diminish(graph) => graph.iter().any(|entry| specs_match(&entry.right, spec)),
            OpKind::Gyrate(graph) => graph
                .iter()
                .any(|entry| specs_match(&entry.left, spec) || specs_match(&entry.right, spec)),
        }
    }

    /// Applies the operation to `forme` under `options`.
    pub fn apply(&self, forme: &Forme, options: &Options) -> Result<OpResult> {
        if !self.can_apply_to(&forme.spec) {
            return Err(OpError::Unsupported {
                op: self.name,
                spec: forme.spec.name(),
            });
        }
        match &self.kind {
            OpKind::Pairs(defs) => {
                // Exact spec matches take priority over name-level
                // coincidences, and within each tier the graphs are
                // tried in order.
                for exact in [true, false] {
                    for (side, pair) in defs {
                        if pair
                            .find_entry(*side, &forme.spec, options, exact)
                            .is_some()
                        {
                            return pair.apply(*side, forme, options, exact);
                        }
                    }
                }
                Err(OpError::InvalidOptions {
                    spec: forme.spec.name(),
                })
            }
            OpKind::Augment(graph) => cut_paste::apply_augment(graph, forme, options),
            OpKind::Diminish(graph) => cut_paste::apply_diminish(graph, forme, options),
            OpKind::Gyrate(graph) => cut_paste::apply_gyrate(graph, forme, options),
        }
    }

    /// Whether more than one option choice is available for `spec`.
    pub fn has_options(&self, spec: &Spec) -> bool {
        match &self.kind {
            OpKind::Pairs(defs) => {
                let matching: usize = defs
                    .iter()
                    .map(|(side, pair)| {
                        pair.graph
                            .iter()
                            .filter(|entry| specs_match(entry.spec(*side), spec))
                            .count()
                    })
                    .sum();
                matching > 1
            }
            _ => true,
        }
    }

    /// Every option bag that selects a distinct outcome on `forme`.
    pub fn all_option_combos(&self, forme: &Forme) -> Result<Vec<Options>> {
        match &self.kind {
            OpKind::Pairs(defs) => {
                let mut combos = Vec::new();
                for (side, pair) in defs {
                    for entry in &pair.graph {
                        if specs_match(entry.spec(*side), &forme.spec) {
                            combos.push(*entry.options(*side));
                        }
                    }
                }
                Ok(combos)
            }
            OpKind::Augment(graph) => cut_paste::augment_option_combos(graph, forme),
            OpKind::Diminish(graph) => cut_paste::diminish_option_combos(graph, forme),
            OpKind::Gyrate(graph) => cut_paste::gyrate_option_combos(graph, forme),
        }
    }

    /// A sensible starting option bag for `spec`.
    pub fn default_options(&self, spec: &Spec) -> Options {
        match &self.kind {
            OpKind::Augment(graph) => cut_paste::augment_defaults(graph, spec),
            _ => Options::default(),
        }
    }

    /// Interprets a pointer hit as an option choice.
    pub fn hit_option(&self, forme: &Forme, point: &Point3) -> Options {
        match &self.hit {
            HitBehavior::None => Options::default(),
            HitBehavior::Facet { opposite } => {
                let face = forme.mesh.hit_face(point).index;
                match forme.face_facet(face) {
                    Some(facet) => Options::facet(if *opposite {
                        facet.opposite()
                    } else {
                        facet
                    }),
                    None => Options::default(),
                }
            }
            HitBehavior::Cap => cut_paste::hit_cap_option(forme, point),
            HitBehavior::Face => match &self.kind {
                OpKind::Augment(graph) => cut_paste::hit_face_option(graph, forme, point),
                _ => Options::default(),
            },
        }
    }

    /// Classifies `face` against the pending `options`, for
    /// highlighting.
    pub fn selection_state(
        &self,
        forme: &Forme,
        face: usize,
        options: &Options,
    ) -> Option<SelectionState> {
        match &self.hit {
            HitBehavior::None => None,
            HitBehavior::Facet { opposite } => {
                let facet = forme.face_facet(face)?;
                let chosen = options.facet?;
                let target = if *opposite { chosen.opposite() } else { chosen };
                if facet == target {
                    Some(SelectionState::Selected)
                } else {
                    Some(SelectionState::Selectable)
                }
            }
            HitBehavior::Cap => {
                let caps = cut_paste::modifiable_caps(forme).ok()?;
                if let Some(index) = options.cap {
                    if caps.get(index).map_or(false, |cap| cap.contains_face(face)) {
                        return Some(SelectionState::Selected);
                    }
                }
                if caps.iter().any(|cap| cap.contains_face(face)) {
                    return Some(SelectionState::Selectable);
                }
                None
            }
            HitBehavior::Face => {
                if options.face == Some(face) {
                    return Some(SelectionState::Selected);
                }
                if let OpKind::Augment(graph) = &self.kind {
                    if cut_paste::augmentable_faces(graph, forme)
                        .unwrap_or_default()
                        .contains(&face)
                    {
                        return Some(SelectionState::Selectable);
                    }
                }
                None
            }
        }
    }
}
