//! Cap bookkeeping for composite solids.
//!
//! A composite forme knows which of its caps are modifications of the
//! source (an augment to cut back off, a cupola to gyrate) and which
//! faces still belong to the source itself.

use polyhedra_mesh::{Cap, CapKind};
use polyhedra_specs::{ClassicalOperation, Composite, CompositeSource, Family};

use crate::base::Forme;
use crate::error::{FormeError, Result};

impl Forme {
    fn composite(&self) -> Result<&Composite> {
        self.spec
            .as_composite()
            .ok_or_else(|| FormeError::missing(&self.spec, "composite caps"))
    }

    /// The caps that count as modifications of the source.
    ///
    /// For augmented solids these are the augments; for gyrate or
    /// diminished rhombicosidodecahedra the remaining cupola segments;
    /// for diminished icosahedra the remaining pyramid sites.
    pub fn modification_caps(&self) -> Result<Vec<Cap<'_>>> {
        let c = *self.composite()?;
        let caps = Cap::find(&self.mesh, modification_kind(&c));
        // The truncated tetrahedron is itself a triangular cupola, so
        // its augment and its own body both read as caps. Keep one.
        if c.is_augmented_truncated() && tetrahedral_source(&c) {
            return Ok(caps.into_iter().take(1).collect());
        }
        Ok(caps)
    }

    /// Indices of the faces that belong to the unmodified source.
    pub fn source_face_indices(&self) -> Result<Vec<usize>> {
        let caps = self.modification_caps()?;
        Ok(self
            .mesh
            .faces()
            .filter(|f| !caps.iter().any(|cap| cap.contains_face(f.index)))
            .map(|f| f.index)
            .collect())
    }
}

/// The cap kind a composite's modifications have.
fn modification_kind(c: &Composite) -> CapKind {
    match c.source {
        CompositeSource::Prism(_) => CapKind::Pyramid,
        CompositeSource::Classical(cl) => match cl.operation {
            ClassicalOperation::Truncate | ClassicalOperation::Cantellate => CapKind::Cupola,
            _ => CapKind::Pyramid,
        },
    }
}

fn tetrahedral_source(c: &Composite) -> bool {
    matches!(
        c.source,
        CompositeSource::Classical(cl) if cl.family == Family::Tetrahedral
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyhedra_mesh::Gyration;
    use polyhedra_specs::Spec;

    fn forme(name: &str) -> Forme {
        Forme::realize(&Spec::with_name(name).unwrap()).unwrap()
    }

    #[test]
    fn augmented_dodecahedron_has_one_modification() {
        let f = forme("augmented dodecahedron");
        let caps = f.modification_caps().unwrap();
        assert_eq!(caps.len(), 1);
        assert_eq!(caps[0].kind(), CapKind::Pyramid);
        assert_eq!(caps[0].boundary().vertices().len(), 5);
        // Eleven source pentagons survive.
        assert_eq!(f.source_face_indices().unwrap().len(), 11);
    }

    #[test]
    fn augmented_truncated_tetrahedron_counts_one_cap() {
        let f = forme("augmented truncated tetrahedron");
        assert_eq!(f.modification_caps().unwrap().len(), 1);
    }

    #[test]
    fn gyrate_rhombicosidodecahedron_keeps_twelve_cupolas() {
        let f = forme("gyrate rhombicosidodecahedron");
        let caps = f.modification_caps().unwrap();
        assert_eq!(caps.len(), 12);
        // A rotated cupola meets the body square-to-square; the other
        // eleven keep the solid's square-to-triangle seams.
        let gyrated = caps
            .iter()
            .filter(|cap| cap.gyration() == Some(Gyration::Ortho))
            .count();
        assert_eq!(gyrated, 1);
    }

    #[test]
    fn metabidiminished_icosahedron_keeps_its_open_sites() {
        let f = forme("metabidiminished icosahedron");
        let caps = f.modification_caps().unwrap();
        // Every remaining pyramid site is a candidate for the third
        // diminishing.
        assert!(!caps.is_empty());
        assert!(caps.iter().all(|cap| cap.kind() == CapKind::Pyramid));
    }
}
