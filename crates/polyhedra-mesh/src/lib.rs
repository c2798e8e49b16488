#![warn(missing_docs)]

//! Half-edge boundary representation for convex regular-faced polyhedra.
//!
//! The central type is [`Mesh`]: an index-based arena of vertex positions
//! and counterclockwise face loops, with a directed-edge-to-face map built
//! eagerly at construction. Borrowed view types ([`Vertex`], [`Edge`],
//! [`Face`]) navigate the topology without owning it.
//!
//! Construction comes in two flavors. [`Mesh::from_data`] validates the
//! closed-manifold invariants (every directed edge paired with its twin,
//! no stray vertices) and fails with [`MeshError`] diagnostics; it is the
//! entry point for catalog solids. [`MeshBuilder::build`] is permissive
//! and also accepts the torn intermediate meshes produced by structural
//! edits, where boundary vertices have been split and twins are
//! temporarily missing.

mod builder;
mod caps;
mod error;
mod mesh;

pub use builder::{deduplicate_vertices, mirror, remove_extraneous_vertices, MeshBuilder};
pub use caps::{remove_cap, Cap, CapKind, Gyration};
pub use error::{MeshError, Result};
pub use mesh::{Edge, Face, Mesh, Ring, RingLike, SolidData, Vertex};
