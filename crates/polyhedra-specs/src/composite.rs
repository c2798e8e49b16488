//! Composite solids: a source solid with caps augmented, diminished, or
//! gyrated.

use serde::{Deserialize, Serialize};

use crate::{Classical, ClassicalOperation, Facet, Family};

/// Relative placement of two modified sites on a source solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// The sites are as far apart as possible (antipodal).
    Para,
    /// The sites are neither adjacent nor antipodal.
    Meta,
}

/// The solid a composite is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompositeSource {
    /// An n-gonal prism (n = 3, 5, or 6).
    Prism(u8),
    /// A classical solid.
    Classical(Classical),
}

impl CompositeSource {
    /// The dodecahedron source.
    pub fn dodecahedron() -> Self {
        CompositeSource::Classical(Classical::new(
            Family::Icosahedral,
            ClassicalOperation::Regular,
            Some(Facet::Face),
        ))
    }

    /// The icosahedron source.
    pub fn icosahedron() -> Self {
        CompositeSource::Classical(Classical::new(
            Family::Icosahedral,
            ClassicalOperation::Regular,
            Some(Facet::Vertex),
        ))
    }

    /// The rhombicosidodecahedron source.
    pub fn rhombicosidodecahedron() -> Self {
        CompositeSource::Classical(Classical::new(
            Family::Icosahedral,
            ClassicalOperation::Cantellate,
            None,
        ))
    }

    /// A truncated regular source in the given family.
    pub fn truncated(family: Family) -> Self {
        let facet = if family == Family::Tetrahedral {
            None
        } else {
            Some(Facet::Face)
        };
        CompositeSource::Classical(Classical::new(family, ClassicalOperation::Truncate, facet))
    }

    /// Canonical name of the source solid.
    pub fn name(self) -> String {
        match self {
            CompositeSource::Prism(n) => format!("{} prism", polygon_word(n)),
            CompositeSource::Classical(c) => c.name(),
        }
    }
}

fn polygon_word(n: u8) -> &'static str {
    match n {
        3 => "triangular",
        4 => "square",
        5 => "pentagonal",
        6 => "hexagonal",
        _ => "polygonal",
    }
}

/// A composite solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Composite {
    /// The solid being modified.
    pub source: CompositeSource,
    /// Number of augmented sites.
    pub augmented: u8,
    /// Number of diminished sites.
    pub diminished: u8,
    /// Number of gyrated sites.
    pub gyrate: u8,
    /// Placement of the modified sites when two arrangements exist.
    pub align: Option<Align>,
}

impl Composite {
    /// A plain modification of `source` with no alignment.
    pub fn new(source: CompositeSource, augmented: u8, diminished: u8, gyrate: u8) -> Self {
        Self {
            source,
            augmented,
            diminished,
            gyrate,
            align: None,
        }
    }

    /// Total number of modified sites.
    pub fn total(self) -> u8 {
        self.augmented + self.diminished + self.gyrate
    }

    /// Whether two arrangements (para and meta) exist for this source at
    /// this site count.
    pub fn has_alignment(source: CompositeSource, total: u8) -> bool {
        if total != 2 {
            return false;
        }
        match source {
            CompositeSource::Prism(n) => n == 6,
            CompositeSource::Classical(c) => {
                // Pentagon-faced icosahedral sources have both antipodal
                // and skew pairs; the truncated cube's octagons only pair
                // antipodally, and the truncated tetrahedron has a single
                // augmentable face.
                matches!(
                    (c.family, c.operation),
                    (Family::Icosahedral, ClassicalOperation::Regular)
                        | (Family::Icosahedral, ClassicalOperation::Truncate)
                        | (Family::Icosahedral, ClassicalOperation::Cantellate)
                )
            }
        }
    }

    fn push_arrangements(specs: &mut Vec<Composite>, base: Composite) {
        if Composite::has_alignment(base.source, base.total()) {
            for align in [Align::Para, Align::Meta] {
                specs.push(Composite {
                    align: Some(align),
                    ..base
                });
            }
        } else {
            specs.push(base);
        }
    }

    /// Every composite spec.
    pub fn all() -> Vec<Composite> {
        let mut specs = Vec::new();
        // Augmented prisms.
        for (n, max) in [(3u8, 3u8), (5, 2), (6, 3)] {
            for augmented in 1..=max {
                Self::push_arrangements(
                    &mut specs,
                    Composite::new(CompositeSource::Prism(n), augmented, 0, 0),
                );
            }
        }
        // Augmented classicals: the dodecahedron and the truncated
        // regulars, capacity growing with the family.
        let classicals = [
            (CompositeSource::dodecahedron(), 3u8),
            (CompositeSource::truncated(Family::Tetrahedral), 1),
            (CompositeSource::truncated(Family::Octahedral), 2),
            (CompositeSource::truncated(Family::Icosahedral), 3),
        ];
        for (source, max) in classicals {
            for augmented in 1..=max {
                Self::push_arrangements(&mut specs, Composite::new(source, augmented, 0, 0));
            }
        }
        // Diminished icosahedra, plus the augmented tridiminished one.
        for diminished in 1..=3u8 {
            Self::push_arrangements(
                &mut specs,
                Composite::new(CompositeSource::icosahedron(), 0, diminished, 0),
            );
        }
        specs.push(Composite::new(CompositeSource::icosahedron(), 1, 3, 0));
        // Gyrate and diminished rhombicosidodecahedra.
        for gyrate in 0..=3u8 {
            for diminished in 0..=(3 - gyrate) {
                if gyrate + diminished == 0 {
                    continue;
                }
                Self::push_arrangements(
                    &mut specs,
                    Composite::new(
                        CompositeSource::rhombicosidodecahedron(),
                        0,
                        diminished,
                        gyrate,
                    ),
                );
            }
        }
        specs
    }

    /// Whether the source is a prism.
    pub fn is_augmented_prism(self) -> bool {
        matches!(self.source, CompositeSource::Prism(_))
    }

    /// Whether the source is the icosahedron.
    pub fn is_diminished_icosahedron(self) -> bool {
        self.source == CompositeSource::icosahedron() && self.diminished > 0
    }

    /// Whether the source is the rhombicosidodecahedron.
    pub fn is_gyrate_rhombicosidodecahedron(self) -> bool {
        self.source == CompositeSource::rhombicosidodecahedron()
    }

    /// Whether the source is a truncated classical solid.
    pub fn is_augmented_truncated(self) -> bool {
        matches!(
            self.source,
            CompositeSource::Classical(c) if c.operation == ClassicalOperation::Truncate
        )
    }

    /// Canonical solid name.
    pub fn name(self) -> String {
        // Coincidences with simpler solids.
        if self.source == CompositeSource::icosahedron() && self.augmented == 0 {
            match (self.diminished, self.align) {
                (1, _) => return "gyroelongated pentagonal pyramid".to_string(),
                (2, Some(Align::Para)) => return "pentagonal antiprism".to_string(),
                _ => {}
            }
        }
        let mut words: Vec<String> = Vec::new();
        if self.augmented > 0 {
            words.push(count_word("augmented", self.augmented, self.align));
        }
        if self.gyrate > 0 {
            words.push(count_word("gyrate", self.gyrate, self.align));
        }
        if self.diminished > 0 {
            // Alignment reads on the first modification word only.
            let align = if self.gyrate > 0 { None } else { self.align };
            words.push(count_word("diminished", self.diminished, align));
        }
        words.push(self.source.name());
        words.join(" ")
    }
}

fn count_word(word: &str, count: u8, align: Option<Align>) -> String {
    let counted = match count {
        1 => word.to_string(),
        2 => format!("bi{word}"),
        _ => format!("tri{word}"),
    };
    match align {
        Some(Align::Para) => format!("para{counted}"),
        Some(Align::Meta) => format!("meta{counted}"),
        None => counted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        let j55 = Composite {
            source: CompositeSource::Prism(6),
            augmented: 2,
            diminished: 0,
            gyrate: 0,
            align: Some(Align::Para),
        };
        assert_eq!(j55.name(), "parabiaugmented hexagonal prism");
        let j64 = Composite::new(CompositeSource::icosahedron(), 1, 3, 0);
        assert_eq!(j64.name(), "augmented tridiminished icosahedron");
        let j82 = Composite::new(CompositeSource::rhombicosidodecahedron(), 0, 2, 1);
        assert_eq!(j82.name(), "gyrate bidiminished rhombicosidodecahedron");
        let j73 = Composite {
            source: CompositeSource::rhombicosidodecahedron(),
            augmented: 0,
            diminished: 0,
            gyrate: 2,
            align: Some(Align::Para),
        };
        assert_eq!(j73.name(), "parabigyrate rhombicosidodecahedron");
        // The alignment prefix reads on the first modification word even
        // when that word counts a single site.
        let j77 = Composite {
            source: CompositeSource::rhombicosidodecahedron(),
            augmented: 0,
            diminished: 1,
            gyrate: 1,
            align: Some(Align::Para),
        };
        assert_eq!(j77.name(), "paragyrate diminished rhombicosidodecahedron");
        let j78 = Composite {
            align: Some(Align::Meta),
            ..j77
        };
        assert_eq!(j78.name(), "metagyrate diminished rhombicosidodecahedron");
    }

    #[test]
    fn test_names_are_distinct() {
        let mut names: Vec<String> = Composite::all().iter().map(|c| c.name()).collect();
        names.sort();
        let count = names.len();
        names.dedup();
        assert_eq!(names.len(), count);
    }

    #[test]
    fn test_enumeration() {
        let all = Composite::all();
        // Every entry modifies at least one site.
        assert!(all.iter().all(|c| c.total() > 0));
        // The pair arrangements are enumerated separately.
        assert!(all
            .iter()
            .filter(|c| c.source == CompositeSource::dodecahedron() && c.augmented == 2)
            .count()
            == 2);
        // No alignment tag outside two-site arrangements that have one.
        assert!(all
            .iter()
            .all(|c| c.align.is_none() || Composite::has_alignment(c.source, c.total())));
    }
}
