#![warn(missing_docs)]

//! Abstract structural descriptors for the convex regular-faced polyhedra.
//!
//! A [`Spec`] names a solid by structure rather than by coordinates: a
//! [`Classical`] solid is a symmetry family plus a Wythoff-style
//! operation, a [`Capstone`] is caps on a prismatic core, a [`Composite`]
//! is a source solid with caps added, cut off, or twisted, and an
//! [`Elementary`] solid is one of the irreducible leftovers.
//!
//! Specs are plain data: cheap to copy, comparable, hashable, and
//! serializable. The operation graphs in the engine are written entirely
//! in terms of spec arithmetic; geometry enters only when a spec is
//! realized.

mod capstone;
mod classical;
mod composite;
mod elementary;
mod spec;

pub use capstone::{CapType, Capstone, Elongation, Gyrate};
pub use classical::{Classical, ClassicalOperation, Facet, Family};
pub use composite::{Align, Composite, CompositeSource};
pub use elementary::Elementary;
pub use spec::{Spec, SpecError};

/// Chirality tag for snub and gyroelongated solids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Twist {
    /// Left-handed member of the pair.
    Left,
    /// Right-handed member of the pair.
    Right,
}

impl Twist {
    /// The opposite handedness.
    pub fn flip(self) -> Twist {
        match self {
            Twist::Left => Twist::Right,
            Twist::Right => Twist::Left,
        }
    }
}
