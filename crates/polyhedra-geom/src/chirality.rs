//! Twist detection for chiral solids.
//!
//! The catalog builds one enantiomorph and mirrors it when the spec asks
//! for the other, so construction only needs a consistent way to tell
//! which handedness a realized mesh ended up with.

use polyhedra_mesh::{Cap, Mesh, RingLike};
use polyhedra_specs::Twist;

/// Handedness of a snub classical solid.
///
/// Looks at how the triangle across a primary-facet edge leans along that
/// edge. Only meaningful on snub cube and snub dodecahedron geometry.
pub fn snub_twist(mesh: &Mesh) -> Twist {
    let face = mesh.largest_face();
    let normal = face.normal();
    let center = face.centroid();
    let edge = face.edges()[0];
    let mid = edge.midpoint();
    // Apex of the triangle across the edge, projected into the face plane.
    let apex = edge
        .twin_face()
        .and_then(|t| {
            t.vertex_indices()
                .iter()
                .find(|&&v| v != edge.v1 && v != edge.v2)
                .copied()
        })
        .map(|v| mesh.positions()[v])
        .unwrap_or(center);
    let offset = apex - mid;
    let in_plane = offset - normal * offset.dot(&normal);
    if in_plane.dot(&edge.direction().normalize()) > 0.0 {
        Twist::Left
    } else {
        Twist::Right
    }
}

/// Handedness of a gyroelongated bicupola, cupolarotunda, or birotunda.
///
/// Walks from a wide face on one cap's boundary across the antiprism band
/// and reads which face kind lands on the right. Returns `None` when the
/// mesh does not carry two caps joined by a band.
pub fn capstone_twist(mesh: &Mesh) -> Option<Twist> {
    let caps = Cap::find_all(mesh);
    let [cap1, cap2] = caps.as_slice() else {
        return None;
    };
    let cupola_rotunda = cap1.kind() != cap2.kind();

    let boundary = cap1.boundary();
    let wide = boundary
        .edges()
        .into_iter()
        .find(|e| e.face().is_some_and(|f| f.num_sides() != 3))?;
    let across = wide.twin()?.prev()?.twin()?.next()?.twin_face()?;
    let right = across.num_sides() != 3;
    // A cupolarotunda's band reads in the opposite sense.
    Some(match (right, cupola_rotunda) {
        (true, false) | (false, true) => Twist::Left,
        (true, true) | (false, false) => Twist::Right,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyhedra_mesh::mirror;

    #[test]
    fn mirroring_flips_detected_snub_twist() {
        let spec = polyhedra_specs::Spec::with_name("snub cube").unwrap();
        let mesh = crate::geometry(&spec).unwrap();
        let twist = snub_twist(&mesh);
        assert_eq!(snub_twist(&mirror(&mesh)), twist.flip());
    }

    #[test]
    fn mirroring_flips_detected_capstone_twist() {
        let spec = polyhedra_specs::Spec::with_name("gyroelongated square bicupola").unwrap();
        let mesh = crate::geometry(&spec).unwrap();
        let twist = capstone_twist(&mesh).unwrap();
        assert_eq!(capstone_twist(&mirror(&mesh)), Some(twist.flip()));
    }
}
