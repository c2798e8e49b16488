use polyhedra_geom::GeomError;
use polyhedra_mesh::MeshError;
use thiserror::Error;

/// Errors raised while interrogating a forme.
#[derive(Debug, Error)]
pub enum FormeError {
    /// The spec could not be realized as geometry.
    #[error(transparent)]
    Geom(#[from] GeomError),

    /// The mesh failed validation.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// The forme's spec kind does not carry the requested feature.
    #[error("\"{spec}\" has no {feature}")]
    MissingFeature {
        /// Canonical name of the spec.
        spec: String,
        /// The feature that was asked for.
        feature: &'static str,
    },
}

impl FormeError {
    pub(crate) fn missing(spec: &polyhedra_specs::Spec, feature: &'static str) -> Self {
        FormeError::MissingFeature {
            spec: spec.name(),
            feature,
        }
    }
}

/// Convenience alias for forme results.
pub type Result<T> = std::result::Result<T, FormeError>;
