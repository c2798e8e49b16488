//! Alignment frames for the operation graphs.
//!
//! Every graph poses both columns with one function so that mapping one
//! pose onto the other superimposes the structure the operation
//! preserves: facet planes for the truncation family, edge scale for
//! the resize family, the top boundary ring for capstones.

use std::f64::consts::PI;

use polyhedra_forme::Forme;
use polyhedra_math::{Dir3, Pose, Transform, Vec3};
use polyhedra_mesh::RingLike;
use polyhedra_specs::{ClassicalOperation, Facet, Twist};

use crate::error::{OpError, Result};
use crate::pair::GraphOpts;

/// The facet class a classical forme is organized around.
pub(crate) fn classical_facet(forme: &Forme) -> Facet {
    forme
        .spec
        .as_classical()
        .map(|c| c.facet_or_default())
        .unwrap_or(Facet::Face)
}

/// Normals of two adjacent facet faces, enough to pin rotation.
pub(crate) fn classical_orientation(forme: &Forme, facet: Facet) -> Result<(Vec3, Vec3)> {
    let (a, b) = forme.adjacent_facet_faces(facet)?;
    Ok((forme.mesh.face(a).normal(), forme.mesh.face(b).normal()))
}

/// Frame for the regular-truncation graph: facet inradius as scale.
pub(crate) fn regular_pose(forme: &Forme, opts: &GraphOpts) -> Result<Pose> {
    let facet = opts.right.facet.unwrap_or_else(|| classical_facet(forme));
    Ok(Pose {
        origin: forme.mesh.centroid(),
        scale: forme.inradius(facet)?,
        orientation: classical_orientation(forme, facet)?,
    })
}

/// Frame for the rectified-truncation graph.
///
/// A rectified solid has no preferred facet, so the scale averages the
/// two facet inradii; both stay fixed through bevelling.
pub(crate) fn ambo_pose(forme: &Forme, _opts: &GraphOpts) -> Result<Pose> {
    let scale = (forme.inradius(Facet::Face)? + forme.inradius(Facet::Vertex)?) / 2.0;
    Ok(Pose {
        origin: forme.mesh.centroid(),
        scale,
        orientation: classical_orientation(forme, Facet::Face)?,
    })
}

/// Frame for the resize graphs: edge length as scale.
pub(crate) fn classical_pose(forme: &Forme, opts: &GraphOpts) -> Result<Pose> {
    let facet = opts.right.facet.unwrap_or_else(|| classical_facet(forme));
    Ok(Pose {
        origin: forme.mesh.centroid(),
        scale: forme.mesh.edge_length(),
        orientation: classical_orientation(forme, facet)?,
    })
}

/// Frame for twisting between a cantellated solid and its snub.
pub(crate) fn twist_pose(forme: &Forme, _opts: &GraphOpts) -> Result<Pose> {
    Ok(Pose {
        origin: forme.mesh.centroid(),
        scale: forme.mesh.edge_length(),
        orientation: classical_orientation(forme, Facet::Face)?,
    })
}

/// Frame for the dual graph.
///
/// The face-faceted solid and the vertex-faceted solid of a family
/// share their midsphere; the intermediate cantellation is scaled by
/// its edge-face distance, which plays the same role there.
pub(crate) fn dual_pose(forme: &Forme, _opts: &GraphOpts) -> Result<Pose> {
    let origin = forme.mesh.centroid();
    let c = forme
        .spec
        .as_classical()
        .copied()
        .ok_or(OpError::Correspondence("a classical spec"))?;
    if c.operation == ClassicalOperation::Cantellate {
        let face = forme.mesh.face(forme.edge_face()?);
        return Ok(Pose {
            origin,
            scale: face.distance_to_center(),
            orientation: classical_orientation(forme, Facet::Face)?,
        });
    }
    if c.facet != Some(Facet::Vertex) {
        return Ok(Pose {
            origin,
            scale: forme.midradius(),
            orientation: classical_orientation(forme, Facet::Face)?,
        });
    }
    // Vertex-faceted side: orient by a vertex and one of its neighbors,
    // the directions the partner's face normals land on.
    let vertex = forme.mesh.vertex(0);
    let neighbor = vertex
        .adjacent_vertices()
        .into_iter()
        .next()
        .ok_or(OpError::Correspondence("an adjacent vertex"))?;
    Ok(Pose {
        origin,
        scale: forme.midradius(),
        orientation: (vertex.pos() - origin, neighbor.pos() - origin),
    })
}

/// Frame for the capstone graphs: the top boundary ring and one of its
/// edges, with a twist-dependent offset for gyroelongated solids so
/// that both chiralities unwind from the same start.
pub(crate) fn capstone_pose(forme: &Forme, twist: Option<Twist>) -> Result<Pose> {
    let c = forme
        .spec
        .as_capstone()
        .copied()
        .ok_or(OpError::Correspondence("a capstone spec"))?;
    let [top, _] = forme.ends()?;
    let boundary = top.boundary();
    let edges = boundary.edges();
    let edge = if c.is_prismatic() {
        edges.first().copied()
    } else {
        // Key the azimuth to a triangular cap flank; rotundas and
        // cupolas alternate face sizes around the ring.
        edges
            .iter()
            .copied()
            .find(|e| e.face().map_or(false, |f| f.num_sides() == 3))
    }
    .ok_or(OpError::Correspondence("a boundary edge"))?;

    let normal = boundary.normal();
    let mult = match twist {
        Some(Twist::Left) => 1.0,
        Some(Twist::Right) => -1.0,
        None => 0.0,
    };
    let angle = if c.is_gyroelongated() {
        mult * PI / (2.0 * boundary.num_sides() as f64)
    } else {
        0.0
    };
    let cross = edge.midpoint() - boundary.centroid();
    let cross = Transform::rotation_about_axis(&Dir3::new_normalize(normal), angle)
        .apply_vec(&cross);
    Ok(Pose {
        origin: forme.mesh.centroid(),
        scale: forme.mesh.edge_length(),
        orientation: (normal, cross),
    })
}

pub(crate) fn prism_pose(forme: &Forme, _opts: &GraphOpts) -> Result<Pose> {
    capstone_pose(forme, None)
}

pub(crate) fn antiprism_pose(forme: &Forme, _opts: &GraphOpts) -> Result<Pose> {
    capstone_pose(forme, Some(Twist::Left))
}

pub(crate) fn bicupola_pose(forme: &Forme, opts: &GraphOpts) -> Result<Pose> {
    capstone_pose(forme, opts.right.twist)
}
