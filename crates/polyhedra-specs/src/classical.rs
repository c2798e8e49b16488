//! Classical (Platonic and Archimedean) solids, described as a symmetry
//! family and a Wythoff-style operation.

use serde::{Deserialize, Serialize};

use crate::Twist;

/// The polyhedral symmetry family, named by the side count of the
/// primary facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Family {
    /// Tetrahedral symmetry (3).
    Tetrahedral,
    /// Octahedral symmetry (4).
    Octahedral,
    /// Icosahedral symmetry (5).
    Icosahedral,
}

impl Family {
    /// All three families.
    pub fn all() -> [Family; 3] {
        [Family::Tetrahedral, Family::Octahedral, Family::Icosahedral]
    }

    /// The side count of the primary (face-facet) polygon.
    pub fn polygon(self) -> usize {
        match self {
            Family::Tetrahedral => 3,
            Family::Octahedral => 4,
            Family::Icosahedral => 5,
        }
    }
}

/// The seven operation classes generating the classical solids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassicalOperation {
    /// The regular solid itself.
    Regular,
    /// Corners cut, leaving the original faces as larger polygons.
    Truncate,
    /// Corners cut to edge midpoints.
    Rectify,
    /// Truncated rectification (omnitruncation).
    Bevel,
    /// Edges shaved into squares (cantellation).
    Cantellate,
    /// Cantellation twisted into triangles.
    Snub,
}

impl ClassicalOperation {
    /// Every operation class.
    pub fn all() -> [ClassicalOperation; 6] {
        [
            ClassicalOperation::Regular,
            ClassicalOperation::Truncate,
            ClassicalOperation::Rectify,
            ClassicalOperation::Bevel,
            ClassicalOperation::Cantellate,
            ClassicalOperation::Snub,
        ]
    }

    /// Whether solids of this operation come in a face and a vertex
    /// variant (outside the self-dual tetrahedral family).
    pub fn has_facet(self) -> bool {
        matches!(
            self,
            ClassicalOperation::Regular | ClassicalOperation::Truncate
        )
    }
}

/// Which dual facet a regular or truncated solid is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    /// The primary facet (cube side of the octahedral family).
    Face,
    /// The dual facet (octahedron side of the octahedral family).
    Vertex,
}

impl Facet {
    /// Both facets.
    pub fn all() -> [Facet; 2] {
        [Facet::Face, Facet::Vertex]
    }

    /// The other facet.
    pub fn opposite(self) -> Facet {
        match self {
            Facet::Face => Facet::Vertex,
            Facet::Vertex => Facet::Face,
        }
    }
}

/// A classical solid: family, operation, and where applicable the facet
/// or chirality variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Classical {
    /// Symmetry family.
    pub family: Family,
    /// Generating operation.
    pub operation: ClassicalOperation,
    /// Facet variant; present exactly when the operation has one and the
    /// family is not self-dual.
    pub facet: Option<Facet>,
    /// Chirality; present exactly for snub solids.
    pub twist: Option<Twist>,
}

impl Classical {
    /// A regular or facet-bearing solid.
    pub fn new(family: Family, operation: ClassicalOperation, facet: Option<Facet>) -> Self {
        Self {
            family,
            operation,
            facet,
            twist: None,
        }
    }

    /// Every classical spec, including both facet and twist variants.
    pub fn all() -> Vec<Classical> {
        let mut specs = Vec::new();
        for family in Family::all() {
            for operation in ClassicalOperation::all() {
                if operation == ClassicalOperation::Snub {
                    for twist in [Twist::Left, Twist::Right] {
                        specs.push(Classical {
                            family,
                            operation,
                            facet: None,
                            twist: Some(twist),
                        });
                    }
                } else if operation.has_facet() && family != Family::Tetrahedral {
                    for facet in Facet::all() {
                        specs.push(Classical::new(family, operation, Some(facet)));
                    }
                } else {
                    specs.push(Classical::new(family, operation, None));
                }
            }
        }
        specs
    }

    /// Whether this is in the self-dual tetrahedral family.
    pub fn is_tetrahedral(self) -> bool {
        self.family == Family::Tetrahedral
    }

    /// Whether this is one of the five regular solids.
    pub fn is_regular(self) -> bool {
        self.operation == ClassicalOperation::Regular
    }

    /// Whether this solid is chiral.
    pub fn is_chiral(self) -> bool {
        self.operation == ClassicalOperation::Snub && !self.is_tetrahedral()
    }

    /// The facet, defaulting to [`Facet::Face`] for self-dual and
    /// facet-less solids.
    pub fn facet_or_default(self) -> Facet {
        self.facet.unwrap_or(Facet::Face)
    }

    /// The same family under a different operation.
    ///
    /// The facet carries over when the target operation distinguishes
    /// facets, and is dropped otherwise.
    pub fn with_operation(self, operation: ClassicalOperation) -> Classical {
        let facet = if operation.has_facet() && self.family != Family::Tetrahedral {
            Some(self.facet_or_default())
        } else {
            None
        };
        Classical {
            family: self.family,
            operation,
            facet,
            twist: None,
        }
    }

    /// The snub solid of this family with the given handedness.
    pub fn snub(self, twist: Twist) -> Classical {
        Classical {
            family: self.family,
            operation: ClassicalOperation::Snub,
            facet: None,
            twist: Some(twist),
        }
    }

    /// Side count of the polygon associated with `facet` in this family.
    pub fn facet_sides(self, facet: Facet) -> usize {
        match facet {
            Facet::Face => self.family.polygon(),
            Facet::Vertex => 3,
        }
    }

    /// Canonical solid name.
    pub fn name(self) -> String {
        use ClassicalOperation::*;
        use Family::*;
        let regular_name = |facet: Facet| match (self.family, facet) {
            (Tetrahedral, _) => "tetrahedron",
            (Octahedral, Facet::Face) => "cube",
            (Octahedral, Facet::Vertex) => "octahedron",
            (Icosahedral, Facet::Face) => "dodecahedron",
            (Icosahedral, Facet::Vertex) => "icosahedron",
        };
        match self.operation {
            Regular => regular_name(self.facet_or_default()).to_string(),
            Truncate => format!("truncated {}", regular_name(self.facet_or_default())),
            Rectify => match self.family {
                Tetrahedral => "octahedron".to_string(),
                Octahedral => "cuboctahedron".to_string(),
                Icosahedral => "icosidodecahedron".to_string(),
            },
            Bevel => match self.family {
                Tetrahedral => "truncated octahedron".to_string(),
                Octahedral => "truncated cuboctahedron".to_string(),
                Icosahedral => "truncated icosidodecahedron".to_string(),
            },
            Cantellate => match self.family {
                Tetrahedral => "cuboctahedron".to_string(),
                Octahedral => "rhombicuboctahedron".to_string(),
                Icosahedral => "rhombicosidodecahedron".to_string(),
            },
            Snub => match self.family {
                Tetrahedral => "icosahedron".to_string(),
                Octahedral => "snub cube".to_string(),
                Icosahedral => "snub dodecahedron".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumeration_counts() {
        let all = Classical::all();
        // Per family: regular + truncate contribute 2 each (1 for the
        // self-dual family), rectify/bevel/cantellate 1 each, snub 2.
        assert_eq!(all.len(), 7 + 9 + 9);
        let names: Vec<String> = all.iter().map(|c| c.name()).collect();
        assert!(names.contains(&"snub dodecahedron".to_string()));
        assert!(names.contains(&"tetrahedron".to_string()));
    }

    #[test]
    fn test_tetrahedral_aliases() {
        let rectified = Classical::new(
            Family::Tetrahedral,
            ClassicalOperation::Rectify,
            None,
        );
        assert_eq!(rectified.name(), "octahedron");
        let snub = Classical::new(Family::Tetrahedral, ClassicalOperation::Regular, None)
            .snub(Twist::Left);
        assert_eq!(snub.name(), "icosahedron");
        assert!(!snub.is_chiral());
    }

    #[test]
    fn test_with_operation_preserves_facet() {
        let cube = Classical::new(
            Family::Octahedral,
            ClassicalOperation::Regular,
            Some(Facet::Face),
        );
        let truncated = cube.with_operation(ClassicalOperation::Truncate);
        assert_eq!(truncated.facet, Some(Facet::Face));
        assert_eq!(truncated.name(), "truncated cube");
        let rectified = cube.with_operation(ClassicalOperation::Rectify);
        assert_eq!(rectified.facet, None);
    }
}
