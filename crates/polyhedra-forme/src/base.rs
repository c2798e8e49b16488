use polyhedra_math::{Point3, Pose, Vec3};
use polyhedra_mesh::Mesh;
use polyhedra_specs::Spec;

use crate::error::Result;

/// A spec paired with its realized mesh.
#[derive(Debug, Clone)]
pub struct Forme {
    /// The structural description.
    pub spec: Spec,
    /// The realized geometry.
    pub mesh: Mesh,
}

impl Forme {
    /// Realizes the spec through the geometry catalog.
    pub fn realize(spec: &Spec) -> Result<Forme> {
        let mesh = polyhedra_geom::geometry(spec)?;
        log::trace!(
            "realized {} with {} vertices",
            spec.name(),
            mesh.num_vertices()
        );
        Ok(Forme {
            spec: spec.clone(),
            mesh,
        })
    }

    /// Wraps an already-built mesh, as operations do with their results.
    pub fn from_parts(spec: Spec, mesh: Mesh) -> Forme {
        Forme { spec, mesh }
    }

    /// The forme's own pose: centroid origin, mean edge distance as
    /// scale, and the first two vertices as orientation.
    pub fn pose(&self) -> Pose {
        let centroid = self.mesh.centroid();
        let edges: Vec<_> = self.mesh.edges().collect();
        let scale = if edges.is_empty() {
            1.0
        } else {
            edges
                .iter()
                .map(|e| (e.midpoint() - centroid).norm())
                .sum::<f64>()
                / edges.len() as f64
        };
        let positions = self.mesh.positions();
        Pose {
            origin: centroid,
            scale,
            orientation: (
                positions[0] - centroid,
                positions[1] - centroid,
            ),
        }
    }

    /// Mean distance from the centroid to an edge midpoint.
    ///
    /// For a catalog solid every edge midpoint is equidistant from the
    /// center, so this is the midradius proper.
    pub fn midradius(&self) -> f64 {
        self.pose().scale
    }

    /// The mesh aligned to the standard pose.
    pub fn orient(&self) -> Mesh {
        let transform = self.pose().map_onto(&standard_pose());
        self.mesh.transformed(&transform)
    }
}

/// The reference pose solids are aligned to for display and comparison.
pub fn standard_pose() -> Pose {
    Pose {
        origin: Point3::origin(),
        scale: 1.0,
        orientation: (Vec3::y(), Vec3::z()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn orient_centers_the_mesh() {
        let spec = Spec::with_name("augmented dodecahedron").unwrap();
        let forme = Forme::realize(&spec).unwrap();
        let oriented = forme.orient();
        let c = oriented.centroid();
        assert_relative_eq!(c.coords.norm(), 0.0, epsilon = 1e-9);
    }
}
