//! Capstone solids: pyramids, cupolae, and rotundas on prismatic cores.
//!
//! The family covers the prisms and antiprisms themselves (zero caps),
//! the mono and bi capped variants with optional prism or antiprism
//! elongation, and the ortho/gyro and left/right distinctions for the
//! doubly-capped members.

use serde::{Deserialize, Serialize};

use crate::Twist;

/// Whether the caps are pyramids (primary) or cupolae/rotundas
/// (secondary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapType {
    /// Pyramid caps on an n-gonal core.
    Primary,
    /// Cupola or rotunda caps on a 2n-gonal core.
    Secondary,
}

/// The prismatic segment between the caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Elongation {
    /// No segment; the caps meet the core ring directly.
    None,
    /// A prism segment.
    Prism,
    /// An antiprism segment.
    Antiprism,
}

/// How two cupola-like caps are rotated against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gyrate {
    /// Matching faces aligned across the core.
    Ortho,
    /// Matching faces offset across the core.
    Gyro,
}

impl Gyrate {
    /// The other rotation.
    pub fn flip(self) -> Gyrate {
        match self {
            Gyrate::Ortho => Gyrate::Gyro,
            Gyrate::Gyro => Gyrate::Ortho,
        }
    }
}

/// A capstone solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capstone {
    /// Base polygon count: 2 (fastigium), 3, 4, or 5.
    pub base: u8,
    /// Primary (pyramid) or secondary (cupola/rotunda) caps.
    pub cap_type: CapType,
    /// Prismatic segment between cap and core.
    pub elongation: Elongation,
    /// Number of caps: 0 (prism or antiprism), 1, or 2.
    pub count: u8,
    /// How many of the caps are rotundas (base 5, secondary only).
    pub rotunda_count: u8,
    /// Relative cap rotation, for doubly-capped secondary solids that
    /// are not gyroelongated.
    pub gyrate: Option<Gyrate>,
    /// Chirality, for gyroelongated doubly-capped secondary solids.
    pub twist: Option<Twist>,
}

impl Capstone {
    /// A prism or antiprism.
    pub fn prismatic(base: u8, elongation: Elongation) -> Capstone {
        Capstone {
            base,
            cap_type: CapType::Primary,
            elongation,
            count: 0,
            rotunda_count: 0,
            gyrate: None,
            twist: None,
        }
    }

    /// A single-capped solid.
    pub fn mono(base: u8, cap_type: CapType, elongation: Elongation, rotunda: bool) -> Capstone {
        Capstone {
            base,
            cap_type,
            elongation,
            count: 1,
            rotunda_count: rotunda as u8,
            gyrate: None,
            twist: None,
        }
    }

    /// Every capstone spec, excluding the degenerate digonal combinations
    /// and the triangular-pyramid gyroelongations whose faces merge.
    pub fn all() -> Vec<Capstone> {
        let mut specs = Vec::new();
        // Prisms and antiprisms.
        for base in 3..=5 {
            for elongation in [Elongation::Prism, Elongation::Antiprism] {
                specs.push(Capstone::prismatic(base, elongation));
            }
        }
        for base in 2..=5u8 {
            for cap_type in [CapType::Primary, CapType::Secondary] {
                if base == 2 && cap_type == CapType::Primary {
                    continue;
                }
                for count in 1..=2u8 {
                    let rotunda_counts: Vec<u8> =
                        if cap_type == CapType::Secondary && base == 5 {
                            (0..=count).collect()
                        } else {
                            vec![0]
                        };
                    for rotunda_count in rotunda_counts {
                        for elongation in
                            [Elongation::None, Elongation::Prism, Elongation::Antiprism]
                        {
                            if base == 2 && elongation != Elongation::None {
                                continue;
                            }
                            // A gyroelongated triangular pyramid collapses
                            // its faces into rhombi.
                            if cap_type == CapType::Primary
                                && base == 3
                                && elongation == Elongation::Antiprism
                            {
                                continue;
                            }
                            let base_spec = Capstone {
                                base,
                                cap_type,
                                elongation,
                                count,
                                rotunda_count,
                                gyrate: None,
                                twist: None,
                            };
                            if count == 2 && cap_type == CapType::Secondary {
                                if elongation == Elongation::Antiprism {
                                    for twist in [Twist::Left, Twist::Right] {
                                        specs.push(Capstone {
                                            twist: Some(twist),
                                            ..base_spec
                                        });
                                    }
                                } else {
                                    for gyrate in [Gyrate::Ortho, Gyrate::Gyro] {
                                        if base == 2 && gyrate == Gyrate::Ortho {
                                            continue;
                                        }
                                        specs.push(Capstone {
                                            gyrate: Some(gyrate),
                                            ..base_spec
                                        });
                                    }
                                }
                            } else {
                                specs.push(base_spec);
                            }
                        }
                    }
                }
            }
        }
        specs
    }

    /// Whether this is a bare prism or antiprism.
    pub fn is_prismatic(self) -> bool {
        self.count == 0
    }

    /// Whether this has exactly one cap.
    pub fn is_mono(self) -> bool {
        self.count == 1
    }

    /// Whether this has two caps.
    pub fn is_bi(self) -> bool {
        self.count == 2
    }

    /// Whether there is no prismatic segment.
    pub fn is_shortened(self) -> bool {
        self.elongation == Elongation::None && !self.is_prismatic()
    }

    /// Whether a prism segment is present.
    pub fn is_elongated(self) -> bool {
        self.elongation == Elongation::Prism
    }

    /// Whether an antiprism segment is present.
    pub fn is_gyroelongated(self) -> bool {
        self.elongation == Elongation::Antiprism
    }

    /// Whether the caps are pyramids.
    pub fn is_primary(self) -> bool {
        self.cap_type == CapType::Primary
    }

    /// Whether the solid is chiral.
    pub fn is_chiral(self) -> bool {
        self.twist.is_some()
    }

    /// Whether this is the digonal (fastigium) family.
    pub fn is_digonal(self) -> bool {
        self.base == 2
    }

    /// Side count of the core ring the caps sit on.
    pub fn base_ring_sides(self) -> usize {
        match self.cap_type {
            CapType::Primary => self.base as usize,
            CapType::Secondary => 2 * self.base as usize,
        }
    }

    /// The spec with one cap removed.
    ///
    /// `rotunda` selects which cap comes off a cupolarotunda.
    pub fn with_cap_removed(self, rotunda: bool) -> Capstone {
        Capstone {
            count: self.count - 1,
            rotunda_count: self.rotunda_count - rotunda as u8,
            gyrate: None,
            twist: None,
            ..self
        }
    }

    /// The same solid with a different prismatic segment.
    ///
    /// Gyration survives elongation by a prism; an antiprism replaces it
    /// with chirality supplied by the caller.
    pub fn with_elongation(self, elongation: Elongation, twist: Option<Twist>) -> Capstone {
        let chiral = elongation == Elongation::Antiprism
            && self.count == 2
            && self.cap_type == CapType::Secondary;
        Capstone {
            elongation,
            gyrate: if elongation == Elongation::Antiprism {
                None
            } else {
                self.gyrate
            },
            twist: if chiral { twist } else { None },
            ..self
        }
    }

    /// The same solid with its gyration toggled.
    pub fn with_gyrate_flipped(self) -> Capstone {
        Capstone {
            gyrate: self.gyrate.map(Gyrate::flip),
            ..self
        }
    }

    fn base_word(self) -> &'static str {
        match self.base {
            2 => "digonal",
            3 => "triangular",
            4 => "square",
            _ => "pentagonal",
        }
    }

    /// Canonical solid name.
    ///
    /// Capstone specs that coincide with a classical solid (the square
    /// prism, the square bipyramid, ...) take the classical name.
    pub fn name(self) -> String {
        // Classical coincidences first.
        match (
            self.base,
            self.cap_type,
            self.elongation,
            self.count,
            self.rotunda_count,
        ) {
            (4, CapType::Primary, Elongation::Prism, 0, _) => return "cube".to_string(),
            (3, CapType::Primary, Elongation::Antiprism, 0, _) => {
                return "octahedron".to_string()
            }
            (3, CapType::Primary, Elongation::None, 1, _) => return "tetrahedron".to_string(),
            (4, CapType::Primary, Elongation::None, 2, _) => return "octahedron".to_string(),
            (5, CapType::Primary, Elongation::Antiprism, 2, _) => {
                return "icosahedron".to_string()
            }
            (2, CapType::Secondary, Elongation::None, 1, _) => {
                return "triangular prism".to_string()
            }
            (2, CapType::Secondary, Elongation::None, 2, _) => {
                return "gyrobifastigium".to_string()
            }
            (3, CapType::Secondary, Elongation::None, 2, 0)
                if self.gyrate == Some(Gyrate::Gyro) =>
            {
                return "cuboctahedron".to_string()
            }
            (4, CapType::Secondary, Elongation::Prism, 2, 0)
                if self.gyrate == Some(Gyrate::Ortho) =>
            {
                return "rhombicuboctahedron".to_string()
            }
            (5, CapType::Secondary, Elongation::None, 2, 2)
                if self.gyrate == Some(Gyrate::Gyro) =>
            {
                return "icosidodecahedron".to_string()
            }
            _ => {}
        }
        if self.is_prismatic() {
            let segment = if self.elongation == Elongation::Prism {
                "prism"
            } else {
                "antiprism"
            };
            return format!("{} {}", self.base_word(), segment);
        }
        let cap = match (self.cap_type, self.count, self.rotunda_count) {
            (CapType::Primary, 1, _) => "pyramid".to_string(),
            (CapType::Primary, _, _) => "bipyramid".to_string(),
            (CapType::Secondary, 1, 0) => "cupola".to_string(),
            (CapType::Secondary, 1, _) => "rotunda".to_string(),
            (CapType::Secondary, _, 0) => "bicupola".to_string(),
            (CapType::Secondary, _, 1) => "cupolarotunda".to_string(),
            (CapType::Secondary, _, _) => "birotunda".to_string(),
        };
        let cap = match self.gyrate {
            Some(Gyrate::Ortho) => format!("ortho{cap}"),
            Some(Gyrate::Gyro) => format!("gyro{cap}"),
            None => cap,
        };
        let prefix = match self.elongation {
            Elongation::None => "",
            Elongation::Prism => "elongated ",
            Elongation::Antiprism => "gyroelongated ",
        };
        format!("{}{} {}", prefix, self.base_word(), cap)
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names() {
        let j1 = Capstone::mono(4, CapType::Primary, Elongation::None, false);
        assert_eq!(j1.name(), "square pyramid");
        let j38 = Capstone {
            base: 5,
            cap_type: CapType::Secondary,
            elongation: Elongation::Prism,
            count: 2,
            rotunda_count: 0,
            gyrate: Some(Gyrate::Ortho),
            twist: None,
        };
        assert_eq!(j38.name(), "elongated pentagonal orthobicupola");
        let icosa = Capstone {
            base: 5,
            cap_type: CapType::Primary,
            elongation: Elongation::Antiprism,
            count: 2,
            rotunda_count: 0,
            gyrate: None,
            twist: None,
        };
        assert_eq!(icosa.name(), "icosahedron");
    }

    #[test]
    fn test_enumeration_excludes_degenerates() {
        let all = Capstone::all();
        assert!(all.iter().all(|c| {
            !(c.is_primary() && c.base == 3 && c.is_gyroelongated())
        }));
        assert!(all
            .iter()
            .all(|c| !(c.is_digonal() && c.gyrate == Some(Gyrate::Ortho))));
        // Chiral entries come in mirror pairs.
        let chiral: Vec<_> = all.iter().filter(|c| c.is_chiral()).collect();
        assert!(!chiral.is_empty());
        assert_eq!(chiral.len() % 2, 0);
    }

    #[test]
    fn test_cap_removal() {
        let cupolarotunda = Capstone {
            base: 5,
            cap_type: CapType::Secondary,
            elongation: Elongation::None,
            count: 2,
            rotunda_count: 1,
            gyrate: Some(Gyrate::Gyro),
            twist: None,
        };
        let minus_rotunda = cupolarotunda.with_cap_removed(true);
        assert_eq!(minus_rotunda.name(), "pentagonal cupola");
        let minus_cupola = cupolarotunda.with_cap_removed(false);
        assert_eq!(minus_cupola.name(), "pentagonal rotunda");
    }
}
