//! Vertex correspondence between an intermediate solid and one end of an
//! operation pair.
//!
//! Both solids are assumed to be posed in the same frame before pairing.
//! Each feature of the end solid (a face, or a vertex that a whole face
//! of the intermediate collapses onto) is matched with an intermediate
//! face by comparing outward directions, and the matched face loops are
//! walked in lockstep to assign every intermediate vertex a destination.

use polyhedra_forme::Forme;
use polyhedra_math::{angle_between, is_codirectional, Point3, Vec3};
use polyhedra_mesh::{Face, Mesh, RingLike};

use crate::error::{OpError, Result};

/// A feature of the end solid that intermediate faces morph toward.
#[derive(Debug, Clone, Copy)]
pub(crate) enum FacetTarget {
    /// A face; the matched intermediate face maps onto its loop.
    Face(usize),
    /// A vertex; the matched intermediate face collapses onto it.
    Vertex(usize),
}

/// Selects the end-solid features to pair. Arguments are the end forme
/// and the intermediate forme.
pub(crate) type SideFacetsFn = fn(&Forme, &Forme) -> Result<Vec<FacetTarget>>;

/// Restricts which intermediate faces may be matched.
pub(crate) type IntermediateFacesFn = fn(&Forme) -> Result<Vec<usize>>;

/// How to pair one end of an operation with the intermediate.
#[derive(Clone, Copy)]
pub(crate) struct MorphDef {
    /// Exact pairing demands codirectional matches and fails loudly;
    /// inexact pairing takes the nearest candidate by angle. Chiral
    /// results and tilted prismatic flanks need the inexact form.
    pub exact: bool,
    /// End features to pair; all faces when unset.
    pub side_facets: Option<SideFacetsFn>,
    /// Candidate intermediate faces; all faces when unset.
    pub intermediate_faces: Option<IntermediateFacesFn>,
}

impl MorphDef {
    /// Exact pairing over all faces.
    pub(crate) fn aligned() -> MorphDef {
        MorphDef {
            exact: true,
            side_facets: None,
            intermediate_faces: None,
        }
    }

    /// Nearest-angle pairing over all faces.
    pub(crate) fn nearest() -> MorphDef {
        MorphDef {
            exact: false,
            side_facets: None,
            intermediate_faces: None,
        }
    }
}

/// Computes, for every vertex of `intermediate`, the position it morphs
/// to on `side`.
pub(crate) fn morph(intermediate: &Forme, side: &Forme, def: &MorphDef) -> Result<Vec<Point3>> {
    let inter_mesh = &intermediate.mesh;
    let side_mesh = &side.mesh;
    let targets = match def.side_facets {
        Some(f) => f(side, intermediate)?,
        None => (0..side_mesh.num_faces()).map(FacetTarget::Face).collect(),
    };
    let candidates = match def.intermediate_faces {
        Some(f) => f(intermediate)?,
        None => (0..inter_mesh.num_faces()).collect(),
    };
    let side_centroid = side_mesh.centroid();

    let mut mapped: Vec<Option<Point3>> = vec![None; inter_mesh.num_vertices()];
    for target in &targets {
        let dir = match target {
            FacetTarget::Face(f) => side_mesh.face(*f).normal(),
            FacetTarget::Vertex(v) => side_mesh.positions()[*v] - side_centroid,
        };
        let partner = inter_mesh.face(find_partner(inter_mesh, &candidates, &dir, def.exact)?);
        let partner_loop = partner.vertex_indices();
        match target {
            FacetTarget::Vertex(v) => {
                let p = side_mesh.positions()[*v];
                for &vi in partner_loop {
                    mapped[vi] = Some(p);
                }
            }
            FacetTarget::Face(f) => {
                let end_face = side_mesh.face(*f);
                let end_loop = end_face.vertex_indices();
                let offset = cyclic_offset(&partner, &end_face, def.exact)?;
                // Walking past the end of a shorter loop doubles up
                // destinations, collapsing the extra edge.
                for (i, &vi) in partner_loop.iter().enumerate() {
                    let p = side_mesh.positions()[end_loop[(i + offset) % end_loop.len()]];
                    mapped[vi] = Some(p);
                }
            }
        }
    }
    mapped
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or(OpError::Correspondence("a destination for every vertex"))
}

fn find_partner(mesh: &Mesh, candidates: &[usize], dir: &Vec3, exact: bool) -> Result<usize> {
    if exact {
        return candidates
            .iter()
            .copied()
            .find(|&f| is_codirectional(&mesh.face(f).normal(), dir))
            .ok_or(OpError::Correspondence("a codirectional face"));
    }
    let mut best: Option<(f64, usize)> = None;
    for &f in candidates {
        let angle = angle_between(&mesh.face(f).normal(), dir);
        if best.map_or(true, |(b, _)| angle < b) {
            best = Some((angle, f));
        }
    }
    best.map(|(_, f)| f)
        .ok_or(OpError::Correspondence("a nearest face"))
}

/// Index into `end`'s loop of the vertex aligned with `start`'s first.
fn cyclic_offset(start: &Face<'_>, end: &Face<'_>, exact: bool) -> Result<usize> {
    let start_dir = start.points()[0] - start.centroid();
    let end_centroid = end.centroid();
    let points = end.points();
    if exact {
        for (k, p) in points.iter().enumerate() {
            if is_codirectional(&start_dir, &(p - end_centroid)) {
                return Ok(k);
            }
        }
        return Err(OpError::Correspondence("an aligned loop vertex"));
    }
    let mut best = (f64::INFINITY, 0);
    for (k, p) in points.iter().enumerate() {
        let angle = angle_between(&start_dir, &(p - end_centroid));
        if angle < best.0 {
            best = (angle, k);
        }
    }
    Ok(best.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use polyhedra_specs::Spec;

    fn realize(name: &str) -> Forme {
        let spec = Spec::with_name(name).unwrap();
        Forme::realize(&spec).unwrap()
    }

    #[test]
    fn test_identity_morph() {
        // Pairing a solid against itself maps every vertex to itself.
        let cube = realize("cube");
        let mapped = morph(&cube, &cube, &MorphDef::aligned()).unwrap();
        for (p, q) in cube.mesh.positions().iter().zip(&mapped) {
            assert_relative_eq!(p, q, epsilon = 1e-9);
        }
    }

    fn octahedron_vertices(side: &Forme, _intermediate: &Forme) -> Result<Vec<FacetTarget>> {
        Ok((0..side.mesh.num_vertices())
            .map(FacetTarget::Vertex)
            .collect())
    }

    #[test]
    fn test_vertex_targets_collapse_faces() {
        // Each cube face collapses onto the octahedron vertex it points at.
        let cube = realize("cube");
        let octahedron = realize("octahedron");
        let def = MorphDef {
            side_facets: Some(octahedron_vertices),
            ..MorphDef::aligned()
        };
        let mapped = morph(&cube, &octahedron, &def).unwrap();
        assert_eq!(mapped.len(), cube.mesh.num_vertices());
        for p in &mapped {
            assert!(octahedron
                .mesh
                .positions()
                .iter()
                .any(|q| polyhedra_math::points_equal(p, q)));
        }
    }
}
