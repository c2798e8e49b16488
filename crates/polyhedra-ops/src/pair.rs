//! The two-sided operation graph and its application engine.
//!
//! An [`OpPair`] links two columns of solids entry by entry: truncation
//! links each regular solid to its truncation, elongation links each
//! shortened capstone to its elongated form. Applying the pair from
//! either side realizes the opposite solid in the caller's frame and
//! derives an animation by morphing a chosen intermediate toward both
//! ends.

use polyhedra_forme::Forme;
use polyhedra_math::Pose;
use polyhedra_mesh::MeshBuilder;
use polyhedra_specs::Spec;

use crate::error::{OpError, Result};
use crate::morph::{morph, MorphDef};
use crate::operation::{AnimationData, OpResult};
use crate::options::Options;

/// Which column of the graph a solid sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    /// The column the forward operation starts from.
    Left,
    /// The column the forward operation produces.
    Right,
}

impl Side {
    pub(crate) fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Whether two specs name the same solid.
///
/// Exact equality first; otherwise the canonical names are compared so
/// that coincidences across catalogs line up (the square bipyramid is
/// the octahedron, the cantellated tetrahedron is the cuboctahedron).
pub(crate) fn specs_match(a: &Spec, b: &Spec) -> bool {
    a == b || a.name() == b.name()
}

/// Option values each side of an entry answers to.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct GraphOpts {
    pub left: Options,
    pub right: Options,
}

/// One row of an operation graph.
#[derive(Debug, Clone)]
pub(crate) struct GraphEntry {
    pub left: Spec,
    pub right: Spec,
    pub opts: GraphOpts,
}

impl GraphEntry {
    pub(crate) fn new(left: Spec, right: Spec) -> GraphEntry {
        GraphEntry {
            left,
            right,
            opts: GraphOpts::default(),
        }
    }

    pub(crate) fn spec(&self, side: Side) -> &Spec {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub(crate) fn options(&self, side: Side) -> &Options {
        match side {
            Side::Left => &self.opts.left,
            Side::Right => &self.opts.right,
        }
    }
}

/// Computes the alignment frame of a solid for one graph.
///
/// Both ends of an entry are posed with the same function so that
/// mapping one pose onto the other superimposes the shared structure.
pub(crate) type PoseFn = fn(&Forme, &GraphOpts) -> Result<Pose>;

/// Derives the intermediate spec for entries that morph through a third
/// solid.
pub(crate) type IntermediateFn = fn(&GraphEntry) -> Spec;

/// Which solid both ends morph through.
pub(crate) enum Intermediate {
    /// One of the entry's own sides.
    Side(Side),
    /// A derived solid covering both ends, such as the bevelled form
    /// between a rectified solid and its cantellation.
    Custom(IntermediateFn),
}

/// A two-sided operation over a column-aligned graph.
pub(crate) struct OpPair {
    pub graph: Vec<GraphEntry>,
    pub intermediate: Intermediate,
    pub get_pose: PoseFn,
    /// Pairing of the intermediate with the left column; identity on
    /// vertex positions when unset.
    pub to_left: Option<MorphDef>,
    /// Pairing of the intermediate with the right column.
    pub to_right: Option<MorphDef>,
}

impl OpPair {
    /// The entry whose `side` column holds `spec` and accepts `request`.
    pub(crate) fn find_entry(
        &self,
        side: Side,
        spec: &Spec,
        request: &Options,
        exact_specs: bool,
    ) -> Option<&GraphEntry> {
        self.graph.iter().find(|entry| {
            let own = entry.spec(side);
            let matches = if exact_specs {
                own == spec
            } else {
                specs_match(own, spec)
            };
            matches && entry.options(side).satisfies(request)
        })
    }

    /// Applies the pair from `side`, producing the opposite solid.
    pub(crate) fn apply(
        &self,
        side: Side,
        forme: &Forme,
        options: &Options,
        exact_specs: bool,
    ) -> Result<OpResult> {
        let entry = self
            .find_entry(side, &forme.spec, options, exact_specs)
            .ok_or_else(|| OpError::InvalidOptions {
                spec: forme.spec.name(),
            })?;

        // Reinterpret the input under the entry's own spec. Name-level
        // coincidences need the entry's facet structure, not the
        // caller's: the octahedron pairs as a rectified tetrahedron
        // here, and its facet checkerboard decides the frame.
        let start = Forme::from_parts(*entry.spec(side), forme.mesh.clone());
        let start_pose = (self.get_pose)(&start, &entry.opts)?;

        let end_spec = *entry.spec(side.opposite());
        let end_reference = Forme::realize(&end_spec)?;
        let end_pose = (self.get_pose)(&end_reference, &entry.opts)?;
        let end = Forme::from_parts(
            end_spec,
            end_reference.mesh.transformed(&end_pose.map_onto(&start_pose)),
        );

        let intermediate = match self.intermediate {
            Intermediate::Side(s) if s == side => start.clone(),
            Intermediate::Side(_) => end.clone(),
            Intermediate::Custom(derive) => {
                let spec = derive(entry);
                let reference = Forme::realize(&spec)?;
                let pose = (self.get_pose)(&reference, &entry.opts)?;
                Forme::from_parts(
                    spec,
                    reference.mesh.transformed(&pose.map_onto(&start_pose)),
                )
            }
        };

        let (to_start, to_end) = match side {
            Side::Left => (&self.to_left, &self.to_right),
            Side::Right => (&self.to_right, &self.to_left),
        };
        let start_positions = match to_start {
            Some(def) => morph(&intermediate, &start, def)?,
            None => intermediate.mesh.positions().to_vec(),
        };
        let end_positions = match to_end {
            Some(def) => morph(&intermediate, &end, def)?,
            None => intermediate.mesh.positions().to_vec(),
        };

        let animation_start = MeshBuilder::from_mesh(&intermediate.mesh)
            .with_vertex_positions(start_positions)
            .build();
        Ok(OpResult {
            result: end,
            animation: AnimationData {
                start: animation_start,
                end_vertices: end_positions,
            },
        })
    }
}
