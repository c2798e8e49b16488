//! Errors raised while resolving and applying operations.

use thiserror::Error;

/// An operation failed to resolve or apply.
#[derive(Debug, Error)]
pub enum OpError {
    /// The operation has no graph entry starting from this solid.
    #[error("\"{op}\" does not apply to the {spec}")]
    Unsupported {
        /// Operation name.
        op: &'static str,
        /// Name of the solid it was applied to.
        spec: String,
    },

    /// The solid is in the graph but no entry satisfies the options.
    #[error("no graph entry for the {spec} satisfies the given options")]
    InvalidOptions {
        /// Name of the solid the operation was applied to.
        spec: String,
    },

    /// Feature pairing between two solids failed.
    #[error("could not pair {0} between the solids")]
    Correspondence(&'static str),

    /// A structural query on a forme failed.
    #[error(transparent)]
    Forme(#[from] polyhedra_forme::FormeError),

    /// A mesh-level edit failed.
    #[error(transparent)]
    Mesh(#[from] polyhedra_mesh::MeshError),
}

/// Convenience alias for operation results.
pub type Result<T> = std::result::Result<T, OpError>;
