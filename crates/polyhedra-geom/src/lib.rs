//! Reference geometry for the polyhedron catalog.
//!
//! Every spec in the catalog maps to a concrete [`Mesh`] with unit edge
//! length.
//! Uniform solids come from exact coordinate tables, capstone solids are
//! assembled from ring profiles, composite solids are produced by cap
//! surgery on their source solids, and the elementary solids are settled
//! from vertex sketches by least squares. Faces are recovered from vertex
//! sets by supporting-plane search, so most builders only have to place
//! points.

#![warn(missing_docs)]

mod capstone;
mod chirality;
mod classical;
mod composite;
mod elementary;
mod error;
mod faces;

pub use chirality::{capstone_twist, snub_twist};
pub use error::{GeomError, Result};
pub use faces::solid_from_vertices;

use polyhedra_mesh::Mesh;
use polyhedra_specs::Spec;

/// Realizes a spec as a mesh with unit edge length.
pub fn geometry(spec: &Spec) -> Result<Mesh> {
    let mesh = match spec {
        Spec::Classical(c) => classical::classical_mesh(c)?,
        Spec::Capstone(c) => capstone::capstone_mesh(c)?,
        Spec::Composite(c) => composite::composite_mesh(c)?,
        Spec::Elementary(e) => elementary::elementary_mesh(e)?,
    };
    log::debug!(
        "realized \"{}\": {} vertices, {} faces",
        spec.name(),
        mesh.num_vertices(),
        mesh.num_faces()
    );
    Ok(mesh)
}
