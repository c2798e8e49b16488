#![warn(missing_docs)]

//! A kernel for the convex regular-faced solids.
//!
//! The catalog of Platonic, Archimedean, prismatic, and Johnson solids
//! as structural [`Spec`]s, realized into half-edge [`Mesh`]es, and
//! transformed by the named [`Operation`]s (truncate, expand, augment,
//! gyrate, and the rest of the families).
//!
//! # Example
//!
//! ```rust
//! use polyhedra::{operation, Forme, Options, Spec};
//!
//! let cube = Forme::realize(&Spec::with_name("cube").unwrap()).unwrap();
//! let truncate = operation("truncate").unwrap();
//! let out = truncate.apply(&cube, &Options::default()).unwrap();
//! assert_eq!(out.result.spec.name(), "truncated cube");
//! ```

pub use polyhedra_forme::{standard_pose, End, Forme, FormeError};
pub use polyhedra_geom::{geometry, GeomError};
pub use polyhedra_math::{
    is_codirectional, is_inverse, points_equal, Dir3, Point3, Pose, Transform, Vec3, PRECISION,
};
pub use polyhedra_mesh::{
    deduplicate_vertices, mirror, remove_extraneous_vertices, Cap, CapKind, Edge, Face, Gyration,
    Mesh, MeshBuilder, MeshError, Ring, RingLike, SolidData, Vertex,
};
pub use polyhedra_ops::{
    all_operations, operation, AnimationData, OpError, OpResult, Operation, Options,
    SelectionState,
};
pub use polyhedra_specs::{
    Align, CapType, Capstone, Classical, ClassicalOperation, Composite, CompositeSource,
    Elementary, Elongation, Facet, Family, Gyrate, Spec, SpecError, Twist,
};
