//! The option bag passed to [`Operation::apply`](crate::Operation::apply).

use polyhedra_mesh::CapKind;
use polyhedra_specs::{Align, Facet, Gyrate, Twist};

/// Options narrowing an operation to one graph entry and one site.
///
/// A single bag covers every operation; each operation reads only the
/// fields that are meaningful for it and ignores the rest. Graph entries
/// carry the same type to describe which option values they answer to.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Options {
    /// Chirality choice for snub and gyroelongated results.
    pub twist: Option<Twist>,
    /// Facet choice for contracting and sharpening operations.
    pub facet: Option<Facet>,
    /// Relative placement of the second modified site.
    pub align: Option<Align>,
    /// Whether an attached cap sits orthogonally or gyrated.
    pub gyrate: Option<Gyrate>,
    /// Which kind of cap to attach or fill with.
    pub using: Option<CapKind>,
    /// Face index to augment.
    pub face: Option<usize>,
    /// Index into the solid's modifiable caps.
    pub cap: Option<usize>,
    /// Number of sides of the face a graph entry augments.
    pub face_type: Option<usize>,
}

impl Options {
    /// Options selecting a twist.
    pub fn twist(twist: Twist) -> Options {
        Options {
            twist: Some(twist),
            ..Options::default()
        }
    }

    /// Options selecting a facet.
    pub fn facet(facet: Facet) -> Options {
        Options {
            facet: Some(facet),
            ..Options::default()
        }
    }

    /// Options selecting a face to augment.
    pub fn face(face: usize) -> Options {
        Options {
            face: Some(face),
            ..Options::default()
        }
    }

    /// Options selecting a cap to remove or rotate.
    pub fn cap(cap: usize) -> Options {
        Options {
            cap: Some(cap),
            ..Options::default()
        }
    }

    /// Whether this entry's options answer to `request`.
    ///
    /// An unset field on either side matches anything; entries only
    /// reject a request that names a different value for a field they
    /// pin down. Site indices (`face`, `cap`) are resolved per solid,
    /// not per entry, and are not compared here.
    pub(crate) fn satisfies(&self, request: &Options) -> bool {
        fn field<T: PartialEq + Copy>(entry: Option<T>, request: Option<T>) -> bool {
            match (entry, request) {
                (Some(e), Some(r)) => e == r,
                _ => true,
            }
        }
        field(self.twist, request.twist)
            && field(self.facet, request.facet)
            && field(self.align, request.align)
            && field(self.gyrate, request.gyrate)
            && field(self.using, request.using)
            && field(self.face_type, request.face_type)
    }
}

/// How a face relates to an operation's pending options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// The face belongs to the site the current options name.
    Selected,
    /// The face belongs to some site the operation could act on.
    Selectable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satisfies() {
        let entry = Options {
            twist: Some(Twist::Left),
            facet: Some(Facet::Face),
            ..Options::default()
        };
        assert!(entry.satisfies(&Options::default()));
        assert!(entry.satisfies(&Options::twist(Twist::Left)));
        assert!(!entry.satisfies(&Options::twist(Twist::Right)));
        assert!(entry.satisfies(&Options::facet(Facet::Face)));
        assert!(!entry.satisfies(&Options::facet(Facet::Vertex)));
        // An entry that pins nothing down accepts any request.
        assert!(Options::default().satisfies(&Options::facet(Facet::Vertex)));
    }
}
