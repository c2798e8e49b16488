//! End detection for capstone solids.
//!
//! A capstone solid has two "ends" on its prismatic axis: each is
//! either a flat base face or a cap. Operations that elongate, shorten,
//! or twist a capstone work relative to these ends.

use polyhedra_math::{angle_between, Point3, Vec3};
use polyhedra_mesh::{Cap, CapKind, Face, Ring, RingLike};
use polyhedra_specs::{CapType, Capstone};

use crate::base::Forme;
use crate::error::{FormeError, Result};

/// One end of a capstone solid.
#[derive(Debug, Clone)]
pub enum End<'a> {
    /// A flat base face.
    Face(Face<'a>),
    /// A pyramid, fastigium, cupola, or rotunda cap.
    Cap(Cap<'a>),
}

impl<'a> End<'a> {
    /// The ring this end meets the prismatic segment with.
    ///
    /// For a face end this is the face's own loop; for a cap it is the
    /// cap boundary. Either way the ring normal points out of the solid
    /// on this end's side.
    pub fn boundary(&self) -> Ring<'_> {
        match self {
            End::Face(face) => Ring::new(face.ring_mesh(), face.vertex_indices().to_vec()),
            End::Cap(cap) => cap.boundary(),
        }
    }

    /// Outward axis direction at this end.
    pub fn normal(&self) -> Vec3 {
        self.boundary().normal()
    }

    /// Centroid of the end's boundary ring.
    pub fn centroid(&self) -> Point3 {
        self.boundary().centroid()
    }

    /// The cap, if this end is capped.
    pub fn as_cap(&self) -> Option<&Cap<'a>> {
        match self {
            End::Cap(cap) => Some(cap),
            End::Face(_) => None,
        }
    }

    /// The base face, if this end is flat.
    pub fn as_face(&self) -> Option<&Face<'a>> {
        match self {
            End::Face(face) => Some(face),
            End::Cap(_) => None,
        }
    }
}

impl Forme {
    fn capstone(&self) -> Result<&Capstone> {
        self.spec
            .as_capstone()
            .ok_or_else(|| FormeError::missing(&self.spec, "capstone ends"))
    }

    /// The two ends, top first.
    ///
    /// A mono-capped solid puts its cap on top and its base face below.
    /// A cupolarotunda puts the cupola on top. Other bi-capped and
    /// prismatic solids order their ends arbitrarily.
    pub fn ends(&self) -> Result<[End<'_>; 2]> {
        let c = *self.capstone()?;
        let sides = c.base_ring_sides();
        let err = || FormeError::missing(&self.spec, "capstone ends");
        if c.is_prismatic() {
            let top = self
                .mesh
                .faces()
                .find(|f| f.num_sides() == sides)
                .ok_or_else(err)?;
            let axis = top.normal();
            let bottom = self
                .mesh
                .faces()
                .filter(|f| f.index != top.index && f.num_sides() == sides)
                .max_by(|a, b| {
                    cmp(
                        angle_between(&axis, &a.normal()),
                        angle_between(&axis, &b.normal()),
                    )
                })
                .ok_or_else(err)?;
            return Ok([End::Face(top), End::Face(bottom)]);
        }
        let caps = self.end_caps(&c);
        if c.is_mono() {
            let cap = caps.into_iter().next().ok_or_else(err)?;
            let axis = cap.boundary().normal();
            let base = self
                .mesh
                .faces()
                .filter(|f| f.num_sides() == sides && !cap.contains_face(f.index))
                .max_by(|a, b| {
                    cmp(
                        angle_between(&axis, &a.normal()),
                        angle_between(&axis, &b.normal()),
                    )
                })
                .ok_or_else(err)?;
            return Ok([End::Cap(cap), End::Face(base)]);
        }
        // Bi-capped: the most opposed pair of caps, a cupola on top of
        // a cupolarotunda.
        let mut best: Option<(f64, usize, usize)> = None;
        for i in 0..caps.len() {
            for j in (i + 1)..caps.len() {
                if !kinds_match(&c, caps[i].kind(), caps[j].kind()) {
                    continue;
                }
                let angle = angle_between(
                    &caps[i].boundary().normal(),
                    &caps[j].boundary().normal(),
                );
                if best.map_or(true, |(a, _, _)| angle > a) {
                    best = Some((angle, i, j));
                }
            }
        }
        let (_, i, j) = best.ok_or_else(err)?;
        let (top, bottom) = if caps[j].kind() == CapKind::Cupola && caps[i].kind() != CapKind::Cupola
        {
            (j, i)
        } else {
            (i, j)
        };
        Ok([End::Cap(caps[top].clone()), End::Cap(caps[bottom].clone())])
    }

    /// Distance between the two end boundaries along the axis.
    ///
    /// Zero for a shortened mono-capped solid, whose cap sits directly
    /// on its base face.
    pub fn prismatic_height(&self) -> Result<f64> {
        let [top, bottom] = self.ends()?;
        Ok((top.centroid() - bottom.centroid()).norm())
    }

    /// Caps eligible to be ends: the right kind, on a boundary ring of
    /// the core's side count.
    fn end_caps(&self, c: &Capstone) -> Vec<Cap<'_>> {
        let sides = c.base_ring_sides();
        Cap::find_all(&self.mesh)
            .into_iter()
            .filter(|cap| end_kinds(c).contains(&cap.kind()))
            .filter(|cap| cap.boundary().num_sides() == sides)
            .collect()
    }
}

fn cmp(a: f64, b: f64) -> std::cmp::Ordering {
    a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal)
}

/// The cap kinds a spec's ends can have.
fn end_kinds(c: &Capstone) -> Vec<CapKind> {
    match c.cap_type {
        CapType::Primary => vec![CapKind::Pyramid],
        CapType::Secondary if c.is_digonal() => vec![CapKind::Fastigium],
        CapType::Secondary => match c.rotunda_count {
            0 => vec![CapKind::Cupola],
            r if r == c.count => vec![CapKind::Rotunda],
            _ => vec![CapKind::Cupola, CapKind::Rotunda],
        },
    }
}

/// Whether a pair of cap kinds realizes the spec's two ends.
fn kinds_match(c: &Capstone, a: CapKind, b: CapKind) -> bool {
    let rotundas = (a == CapKind::Rotunda) as u8 + (b == CapKind::Rotunda) as u8;
    rotundas == c.rotunda_count
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use polyhedra_specs::Spec;

    fn forme(name: &str) -> Forme {
        Forme::realize(&Spec::with_name(name).unwrap()).unwrap()
    }

    #[test]
    fn prism_ends_are_opposed_squares() {
        let f = forme("pentagonal prism");
        let [top, bottom] = f.ends().unwrap();
        assert!(top.as_face().is_some());
        assert!(bottom.as_face().is_some());
        let angle = angle_between(&top.normal(), &bottom.normal());
        assert_relative_eq!(angle, std::f64::consts::PI, epsilon = 1e-9);
        assert_relative_eq!(f.prismatic_height().unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn mono_cap_sits_over_its_base() {
        let f = forme("elongated square pyramid");
        let [top, bottom] = f.ends().unwrap();
        assert_eq!(top.as_cap().unwrap().kind(), CapKind::Pyramid);
        assert!(bottom.as_face().is_some());
        assert_relative_eq!(f.prismatic_height().unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn shortened_mono_has_zero_height() {
        let f = forme("square cupola");
        assert_relative_eq!(f.prismatic_height().unwrap(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn cupolarotunda_puts_the_cupola_on_top() {
        let f = forme("pentagonal orthocupolarotunda");
        let [top, bottom] = f.ends().unwrap();
        assert_eq!(top.as_cap().unwrap().kind(), CapKind::Cupola);
        assert_eq!(bottom.as_cap().unwrap().kind(), CapKind::Rotunda);
    }

    #[test]
    fn gyrobifastigium_ends_are_ridges() {
        let f = forme("gyrobifastigium");
        let [top, bottom] = f.ends().unwrap();
        for end in [top, bottom] {
            assert_eq!(end.as_cap().unwrap().kind(), CapKind::Fastigium);
            assert_eq!(end.boundary().num_sides(), 4);
        }
    }

    #[test]
    fn elongated_bicupola_height_spans_the_prism() {
        let f = forme("elongated triangular orthobicupola");
        assert_relative_eq!(f.prismatic_height().unwrap(), 1.0, epsilon = 1e-9);
    }
}
