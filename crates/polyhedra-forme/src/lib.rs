//! Spec-aware views over realized geometry.
//!
//! A [`Forme`] pairs a spec with its mesh and answers the structural
//! questions operations ask: which faces realize a classical facet, where
//! a capstone's ends are, which caps a composite carries. The mesh alone
//! cannot answer these (a cuboctahedron's triangles split into two facet
//! classes only the spec distinguishes).

#![warn(missing_docs)]

mod base;
mod capstone;
mod classical;
mod composite;
mod error;

pub use base::{standard_pose, Forme};
pub use capstone::End;
pub use classical::opposite_face;
pub use error::{FormeError, Result};
