use polyhedra_mesh::MeshError;
use thiserror::Error;

/// Errors raised while realizing a spec as geometry.
#[derive(Debug, Error)]
pub enum GeomError {
    /// The catalog has no coordinate data for this spec.
    #[error("no coordinate data for \"{0}\"")]
    UnknownSpec(String),

    /// An iterative solve failed to converge.
    #[error("numeric solve for {0} did not converge")]
    SolveFailed(&'static str),

    /// A recovered face set did not stitch into a closed surface.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// Cap surgery on a source solid found no cap to operate on.
    #[error("no {0} cap found on \"{1}\"")]
    MissingCap(&'static str, String),

    /// No compatible arrangement of modification sites exists.
    #[error("could not arrange {0} modification sites")]
    Sites(usize),
}

/// Convenience alias for geometry results.
pub type Result<T> = std::result::Result<T, GeomError>;
