//! The closed sum type over all spec families.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Capstone, Classical, Composite, Elementary};

/// Errors raised when resolving spec descriptions.
#[derive(Debug, Error)]
pub enum SpecError {
    /// No catalog member matches the given name.
    #[error("no polyhedron is named \"{0}\"")]
    UnknownName(String),
}

/// A structural description of one convex regular-faced polyhedron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spec {
    /// Platonic or Archimedean.
    Classical(Classical),
    /// Caps on a prismatic core.
    Capstone(Capstone),
    /// A modified source solid.
    Composite(Composite),
    /// Irreducible.
    Elementary(Elementary),
}

impl Spec {
    /// Every spec, across all four families.
    ///
    /// Iteration is deterministic; chiral and facet variants appear as
    /// separate entries, and alternate descriptions of the same solid
    /// (the square prism and the cube, say) each appear under their own
    /// family.
    pub fn all() -> Vec<Spec> {
        let mut specs: Vec<Spec> = Vec::new();
        specs.extend(Classical::all().into_iter().map(Spec::Classical));
        specs.extend(Capstone::all().into_iter().map(Spec::Capstone));
        specs.extend(Composite::all().into_iter().map(Spec::Composite));
        specs.extend(Elementary::all().into_iter().map(Spec::Elementary));
        specs
    }

    /// Canonical solid name.
    pub fn name(&self) -> String {
        match self {
            Spec::Classical(c) => c.name(),
            Spec::Capstone(c) => c.name(),
            Spec::Composite(c) => c.name(),
            Spec::Elementary(e) => e.name().to_string(),
        }
    }

    /// Look a spec up by canonical name.
    ///
    /// When several structural descriptions share a name, the first in
    /// enumeration order wins (classical before capstone before
    /// composite).
    pub fn with_name(name: &str) -> Result<Spec, SpecError> {
        Spec::all()
            .into_iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| SpecError::UnknownName(name.to_string()))
    }

    /// Whether the solid is chiral.
    pub fn is_chiral(&self) -> bool {
        match self {
            Spec::Classical(c) => c.is_chiral(),
            Spec::Capstone(c) => c.is_chiral(),
            _ => false,
        }
    }

    /// The classical payload, if any.
    pub fn as_classical(&self) -> Option<&Classical> {
        match self {
            Spec::Classical(c) => Some(c),
            _ => None,
        }
    }

    /// The capstone payload, if any.
    pub fn as_capstone(&self) -> Option<&Capstone> {
        match self {
            Spec::Capstone(c) => Some(c),
            _ => None,
        }
    }

    /// The composite payload, if any.
    pub fn as_composite(&self) -> Option<&Composite> {
        match self {
            Spec::Composite(c) => Some(c),
            _ => None,
        }
    }
}

impl From<Classical> for Spec {
    fn from(c: Classical) -> Spec {
        Spec::Classical(c)
    }
}

impl From<Capstone> for Spec {
    fn from(c: Capstone) -> Spec {
        Spec::Capstone(c)
    }
}

impl From<Composite> for Spec {
    fn from(c: Composite) -> Spec {
        Spec::Composite(c)
    }
}

impl From<Elementary> for Spec {
    fn from(e: Elementary) -> Spec {
        Spec::Elementary(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_deterministic_and_nonempty() {
        let a = Spec::all();
        let b = Spec::all();
        assert_eq!(a, b);
        assert!(a.len() > 100);
    }

    #[test]
    fn test_lookup_by_name() {
        let cube = Spec::with_name("cube").unwrap();
        assert!(matches!(cube, Spec::Classical(_)));
        let j26 = Spec::with_name("gyrobifastigium").unwrap();
        assert!(matches!(j26, Spec::Capstone(_)));
        let j77 = Spec::with_name("paragyrate diminished rhombicosidodecahedron").unwrap();
        let j78 = Spec::with_name("metagyrate diminished rhombicosidodecahedron").unwrap();
        assert_ne!(j77, j78);
        assert!(Spec::with_name("hypercube").is_err());
    }

    #[test]
    fn test_spec_serializes() {
        let spec = Spec::with_name("snub cube").unwrap();
        let json = serde_json::to_string(&spec).unwrap();
        let back: Spec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, back);
    }
}
