//! Error types for mesh construction and surgery.

use thiserror::Error;

/// Errors raised while validating or editing a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    /// A face loop references a vertex index outside the vertex arena.
    #[error("face {face} references vertex {vertex}, but only {num_vertices} vertices exist")]
    VertexOutOfBounds {
        /// Index of the offending face.
        face: usize,
        /// The out-of-range vertex index.
        vertex: usize,
        /// Size of the vertex arena.
        num_vertices: usize,
    },

    /// A face loop has fewer than three vertices or repeats a vertex.
    #[error("face {face} is degenerate: {reason}")]
    DegenerateFace {
        /// Index of the offending face.
        face: usize,
        /// What made the loop degenerate.
        reason: String,
    },

    /// The same directed edge appears in more than one face loop.
    #[error("directed edge ({0}, {1}) appears in more than one face")]
    DuplicateEdge(usize, usize),

    /// A directed edge has no oppositely-directed partner, so the surface
    /// is not closed.
    #[error("directed edge ({0}, {1}) has no twin; the surface is not closed")]
    MissingTwin(usize, usize),

    /// A vertex is not referenced by any face.
    #[error("vertex {0} is not used by any face")]
    IsolatedVertex(usize),
}

/// Convenience alias for mesh results.
pub type Result<T> = std::result::Result<T, MeshError>;
