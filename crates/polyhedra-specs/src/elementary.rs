//! The irreducible Johnson solids: no cap structure, no classical
//! relative.

use serde::{Deserialize, Serialize};

/// An elementary solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Elementary {
    /// J84.
    SnubDisphenoid,
    /// J85.
    SnubSquareAntiprism,
    /// J86.
    Sphenocorona,
    /// J87, the sphenocorona with a square face augmented.
    AugmentedSphenocorona,
    /// J88.
    Sphenomegacorona,
    /// J89.
    Hebesphenomegacorona,
    /// J90.
    Disphenocingulum,
    /// J91.
    Bilunabirotunda,
    /// J92.
    TriangularHebesphenorotunda,
}

impl Elementary {
    /// Every elementary solid.
    pub fn all() -> [Elementary; 9] {
        [
            Elementary::SnubDisphenoid,
            Elementary::SnubSquareAntiprism,
            Elementary::Sphenocorona,
            Elementary::AugmentedSphenocorona,
            Elementary::Sphenomegacorona,
            Elementary::Hebesphenomegacorona,
            Elementary::Disphenocingulum,
            Elementary::Bilunabirotunda,
            Elementary::TriangularHebesphenorotunda,
        ]
    }

    /// Canonical solid name.
    pub fn name(self) -> &'static str {
        match self {
            Elementary::SnubDisphenoid => "snub disphenoid",
            Elementary::SnubSquareAntiprism => "snub square antiprism",
            Elementary::Sphenocorona => "sphenocorona",
            Elementary::AugmentedSphenocorona => "augmented sphenocorona",
            Elementary::Sphenomegacorona => "sphenomegacorona",
            Elementary::Hebesphenomegacorona => "hebesphenomegacorona",
            Elementary::Disphenocingulum => "disphenocingulum",
            Elementary::Bilunabirotunda => "bilunabirotunda",
            Elementary::TriangularHebesphenorotunda => "triangular hebesphenorotunda",
        }
    }
}
