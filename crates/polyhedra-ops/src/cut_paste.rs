//! Cut-and-paste operations: augment, diminish, gyrate.
//!
//! Unlike the morphing operations, these act on a single cap site. A
//! shared augmentation graph links every solid to the solids one cap
//! away from it: augment walks an edge left to right by seating a
//! capstone over a face, diminish walks it right to left by cutting a
//! cap off, and gyrate rotates a cap in place over its own boundary
//! ring. Graph entries carry the cap kind they attach, the number of
//! sides of the face they attach it to, and where applicable the
//! gyration the seated cap ends up with.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;
use std::sync::Arc;

use polyhedra_forme::Forme;
use polyhedra_math::{is_codirectional, is_inverse, Dir3, Point3, Pose, Transform, Vec3, PRECISION};
use polyhedra_mesh::{
    deduplicate_vertices, remove_cap, remove_extraneous_vertices, Cap, CapKind, Edge, Face,
    Gyration, Mesh, MeshBuilder, RingLike,
};
use polyhedra_specs::{
    Align, CapType, Capstone, ClassicalOperation, Composite, CompositeSource, Elementary,
    Elongation, Gyrate, Spec,
};

use crate::error::{OpError, Result};
use crate::operation::{AnimationData, HitBehavior, OpKind, OpResult, Operation};
use crate::options::Options;
use crate::pair::{specs_match, GraphEntry, GraphOpts};

pub(crate) fn operations() -> Vec<Operation> {
    let graph = Arc::new(augment_graph());
    vec![
        Operation::new("augment", OpKind::Augment(graph.clone()), HitBehavior::Face),
        Operation::new("diminish", OpKind::Diminish(graph), HitBehavior::Cap),
        Operation::new("gyrate", OpKind::Gyrate(gyrate_graph()), HitBehavior::Cap),
    ]
}

// ============================================================================
// Graphs
// ============================================================================

/// An entry seating a cap of `using` on a face of `face_type` sides.
///
/// Each side's `align` names the alignment of the solid that applying
/// from that side produces, so diminish reads the left spec's alignment
/// and augment the right's.
fn cap_entry(
    left: Spec,
    right: Spec,
    using: CapKind,
    face_type: usize,
    gyrate: Option<Gyrate>,
) -> GraphEntry {
    let mut entry = GraphEntry::new(left, right);
    entry.opts = GraphOpts {
        left: Options {
            using: Some(using),
            face_type: Some(face_type),
            gyrate,
            align: right.as_composite().and_then(|c| c.align),
            ..Options::default()
        },
        right: Options {
            using: Some(using),
            gyrate,
            align: left.as_composite().and_then(|c| c.align),
            ..Options::default()
        },
    };
    entry
}

/// The full augmentation graph, diminish being its reverse reading.
fn augment_graph() -> Vec<GraphEntry> {
    let mut entries = composite_entries();
    entries.extend(capstone_entries());
    entries.push(cap_entry(
        Spec::Elementary(Elementary::Sphenocorona),
        Spec::Elementary(Elementary::AugmentedSphenocorona),
        CapKind::Pyramid,
        4,
        None,
    ));
    entries
}

/// Which cap kinds a capstone solid's caps can be.
fn cap_kinds(s: Capstone) -> Vec<CapKind> {
    if s.is_primary() {
        return vec![CapKind::Pyramid];
    }
    if s.is_digonal() {
        return vec![CapKind::Fastigium];
    }
    if s.base == 5 {
        if s.rotunda_count == 0 {
            vec![CapKind::Cupola]
        } else if s.rotunda_count == s.count {
            vec![CapKind::Rotunda]
        } else {
            vec![CapKind::Cupola, CapKind::Rotunda]
        }
    } else {
        vec![CapKind::Cupola]
    }
}

/// Entries within the capstone table: prism to mono, mono to bi.
///
/// Entries whose left side would be a secondary prismatic solid are
/// left out; the catalogued prisms stop at pentagonal bases, so no
/// prism is wide enough to take a cupola or rotunda.
fn capstone_entries() -> Vec<GraphEntry> {
    let mut entries = Vec::new();
    for s in Capstone::all() {
        if s.is_prismatic() || !(s.is_bi() || !s.is_shortened()) {
            continue;
        }
        for kind in cap_kinds(s) {
            let left = s.with_cap_removed(kind == CapKind::Rotunda);
            if left.is_prismatic() && left.cap_type == CapType::Secondary {
                continue;
            }
            entries.push(cap_entry(
                Spec::Capstone(left),
                Spec::Capstone(s),
                kind,
                s.base_ring_sides(),
                s.gyrate,
            ));
        }
    }
    entries
}

/// Entries over the composite table, one per cut-paste relation.
fn composite_entries() -> Vec<GraphEntry> {
    let mut entries = Vec::new();
    for c in Composite::all() {
        if c.source == CompositeSource::rhombicosidodecahedron() {
            if c.diminished == 0 {
                continue;
            }
            // Filling a hole gyro restores the source's seams; filling
            // it ortho counts as one more gyration.
            let gyro = Composite {
                diminished: c.diminished - 1,
                align: if c.total() == 3 { Some(Align::Meta) } else { None },
                ..c
            };
            entries.push(cap_entry(
                Spec::Composite(c),
                Spec::Composite(gyro),
                CapKind::Cupola,
                10,
                Some(Gyrate::Gyro),
            ));
            let ortho = Composite {
                diminished: c.diminished - 1,
                gyrate: c.gyrate + 1,
                ..c
            };
            entries.push(cap_entry(
                Spec::Composite(c),
                Spec::Composite(ortho),
                CapKind::Cupola,
                10,
                Some(Gyrate::Ortho),
            ));
        } else if c.source == CompositeSource::icosahedron() {
            if c.augmented > 0 {
                continue;
            }
            if c.diminished > 0 {
                let filled = Composite {
                    diminished: c.diminished - 1,
                    align: if c.diminished == 3 { Some(Align::Meta) } else { None },
                    ..c
                };
                entries.push(cap_entry(
                    Spec::Composite(c),
                    Spec::Composite(filled),
                    CapKind::Pyramid,
                    5,
                    None,
                ));
            }
            if c.diminished == 3 {
                let augmented = Composite { augmented: 1, ..c };
                entries.push(cap_entry(
                    Spec::Composite(c),
                    Spec::Composite(augmented),
                    CapKind::Pyramid,
                    3,
                    None,
                ));
            }
        } else if c.augmented > 0 {
            // A triaugmented solid is only reachable from the meta pair.
            let align = if c.augmented == 3 && Composite::has_alignment(c.source, 2) {
                Some(Align::Meta)
            } else {
                None
            };
            let left = Composite {
                augmented: c.augmented - 1,
                align,
                ..c
            };
            let (using, face_type) = match c.source {
                CompositeSource::Prism(_) => (CapKind::Pyramid, 4),
                CompositeSource::Classical(cl) => {
                    let n = cl.family.polygon() as usize;
                    if cl.operation == ClassicalOperation::Truncate {
                        (CapKind::Cupola, 2 * n)
                    } else {
                        (CapKind::Pyramid, n)
                    }
                }
            };
            entries.push(cap_entry(
                Spec::Composite(left),
                Spec::Composite(c),
                using,
                face_type,
                None,
            ));
        }
    }
    entries
}

/// The gyration graph. Composite entries run from the less gyrated
/// solid to the more gyrated one; bicupola entries from the gyro
/// solid to the ortho one. Gyroelongated bicupolae map to themselves.
fn gyrate_graph() -> Vec<GraphEntry> {
    let mut entries = Vec::new();
    for c in Composite::all() {
        if c.source != CompositeSource::rhombicosidodecahedron() || c.gyrate == 0 {
            continue;
        }
        let back = Composite {
            gyrate: c.gyrate - 1,
            align: if c.total() == 3 { Some(Align::Meta) } else { None },
            ..c
        };
        let mut entry = GraphEntry::new(Spec::Composite(back), Spec::Composite(c));
        entry.opts.left.align = c.align;
        entry.opts.right.align = back.align;
        entries.push(entry);
    }
    for s in Capstone::all() {
        if !s.is_bi() || s.is_primary() || s.is_digonal() || s.gyrate == Some(Gyrate::Gyro) {
            continue;
        }
        if s.is_gyroelongated() {
            entries.push(GraphEntry::new(Spec::Capstone(s), Spec::Capstone(s)));
        } else {
            entries.push(GraphEntry::new(
                Spec::Capstone(s.with_gyrate_flipped()),
                Spec::Capstone(s),
            ));
        }
    }
    entries
}

// ============================================================================
// Site queries
// ============================================================================

/// The caps diminish and gyrate may act on, in a stable order.
pub(crate) fn modifiable_caps(forme: &Forme) -> Result<Vec<Cap<'_>>> {
    match &forme.spec {
        Spec::Capstone(_) => {
            let mut caps = Vec::new();
            for end in forme.ends()? {
                if let Some(cap) = end.as_cap() {
                    caps.push(cap.clone());
                }
            }
            Ok(caps)
        }
        Spec::Composite(_) => Ok(forme.modification_caps()?),
        Spec::Classical(_) => Ok(Cap::find_all(&forme.mesh)),
        Spec::Elementary(_) => Ok(Cap::find(&forme.mesh, CapKind::Pyramid)),
    }
}

/// Face indices augment may seat a cap on, across every graph entry
/// starting from this solid.
pub(crate) fn augmentable_faces(graph: &[GraphEntry], forme: &Forme) -> Result<Vec<usize>> {
    let mut faces = Vec::new();
    for entry in graph.iter().filter(|e| specs_match(&e.left, &forme.spec)) {
        let sides = match entry.opts.left.face_type {
            Some(n) => n,
            None => continue,
        };
        match &entry.left {
            Spec::Capstone(_) => {
                let rewrapped = Forme::from_parts(entry.left, forme.mesh.clone());
                for end in rewrapped.ends()? {
                    if let Some(f) = end.as_face() {
                        if f.num_sides() == sides {
                            faces.push(f.index);
                        }
                    }
                }
            }
            Spec::Composite(c) => {
                faces.extend(composite_augmentable(entry, *c, forme, sides)?);
            }
            _ => {
                for f in forme.mesh.faces() {
                    if f.num_sides() == sides {
                        faces.push(f.index);
                    }
                }
            }
        }
    }
    faces.sort_unstable();
    faces.dedup();
    Ok(faces)
}

fn composite_augmentable(
    entry: &GraphEntry,
    left: Composite,
    forme: &Forme,
    sides: usize,
) -> Result<Vec<usize>> {
    let right = match entry.right.as_composite() {
        Some(r) => *r,
        None => return Ok(Vec::new()),
    };
    if right.augmented != left.augmented + 1 {
        // Filling a hole: the candidate faces are exactly the holes.
        return Ok(forme
            .mesh
            .faces_with_num_sides(sides)
            .into_iter()
            .map(|f| f.index)
            .collect());
    }
    if left.source == CompositeSource::icosahedron() {
        // The only augmentable triangle of the tridiminished solid is
        // the one ringed by all three holes.
        return Ok(forme
            .mesh
            .faces_with_num_sides(3)
            .into_iter()
            .filter(|f| {
                f.adjacent_faces()
                    .iter()
                    .all(|adj| adj.num_sides() == 5)
            })
            .map(|f| f.index)
            .collect());
    }
    let rewrapped = Forme::from_parts(entry.left, forme.mesh.clone());
    let kind = match entry.opts.left.using {
        Some(kind) => kind,
        None => return Ok(Vec::new()),
    };
    let underside = underside_angles(kind, sides)?;
    Ok(rewrapped
        .source_face_indices()?
        .into_iter()
        .filter(|&i| {
            let f = forme.mesh.face(i);
            f.num_sides() == sides && seats_convexly(&f, &underside)
        })
        .collect())
}

/// Dihedral angles around the underside of a freshly realized cap
/// solid, in boundary order.
fn underside_angles(kind: CapKind, sides: usize) -> Result<Vec<f64>> {
    let augmentee = Forme::realize(&Spec::Capstone(cap_solid(kind, sides)))?;
    for end in augmentee.ends()? {
        if let Some(face) = end.as_face() {
            return face
                .edges()
                .iter()
                .map(|e| e.dihedral_angle())
                .collect::<Option<Vec<f64>>>()
                .ok_or(OpError::Correspondence("a closed cap solid"));
        }
    }
    Err(OpError::Correspondence("a cap solid with a base face"))
}

/// Whether seating a cap with the given underside angles over `face`
/// keeps every shared edge convex. Both phase offsets are tried, since
/// cap undersides alternate with period two.
fn seats_convexly(face: &Face<'_>, underside: &[f64]) -> bool {
    let edges = face.edges();
    if edges.len() != underside.len() {
        return false;
    }
    (0..2).any(|offset| {
        edges.iter().enumerate().all(|(i, e)| {
            e.dihedral_angle()
                .map_or(false, |a| a + underside[(i + offset) % underside.len()] < PI - PRECISION)
        })
    })
}

/// Option bags covering every distinct augmentation of this solid.
pub(crate) fn augment_option_combos(graph: &[GraphEntry], forme: &Forme) -> Result<Vec<Options>> {
    let entries: Vec<&GraphEntry> = graph
        .iter()
        .filter(|e| specs_match(&e.left, &forme.spec))
        .collect();
    let mut combos = Vec::new();
    for face in augmentable_faces(graph, forme)? {
        let sides = forme.mesh.face(face).num_sides();
        let fits: Vec<&&GraphEntry> = entries
            .iter()
            .filter(|e| e.opts.left.face_type == Some(sides))
            .collect();
        let mut usings: Vec<CapKind> = Vec::new();
        for e in &fits {
            if let Some(u) = e.opts.left.using {
                if !usings.contains(&u) {
                    usings.push(u);
                }
            }
        }
        for using in usings {
            let mut gyrates: Vec<Gyrate> = Vec::new();
            for e in fits.iter().filter(|e| e.opts.left.using == Some(using)) {
                if let Some(g) = e.opts.left.gyrate {
                    if !gyrates.contains(&g) {
                        gyrates.push(g);
                    }
                }
            }
            if gyrates.is_empty() {
                combos.push(Options {
                    face: Some(face),
                    using: Some(using),
                    ..Options::default()
                });
            } else {
                for gyrate in gyrates {
                    combos.push(Options {
                        face: Some(face),
                        using: Some(using),
                        gyrate: Some(gyrate),
                        ..Options::default()
                    });
                }
            }
        }
    }
    Ok(combos)
}

/// Default augment options for a solid: gyro when a gyration choice
/// exists, and the first cap kind when more than one applies.
pub(crate) fn augment_defaults(graph: &[GraphEntry], spec: &Spec) -> Options {
    let entries: Vec<&GraphEntry> = graph
        .iter()
        .filter(|e| specs_match(&e.left, spec))
        .collect();
    let mut usings: Vec<CapKind> = Vec::new();
    for e in &entries {
        if let Some(u) = e.opts.left.using {
            if !usings.contains(&u) {
                usings.push(u);
            }
        }
    }
    Options {
        using: if usings.len() > 1 {
            Some(usings[0])
        } else {
            None
        },
        gyrate: if entries.iter().any(|e| e.opts.left.gyrate.is_some()) {
            Some(Gyrate::Gyro)
        } else {
            None
        },
        ..Options::default()
    }
}

/// Resolves a pointer hit to the nearest modifiable cap containing it.
pub(crate) fn hit_cap_option(forme: &Forme, point: &Point3) -> Options {
    let hit = forme.mesh.hit_face(point).index;
    let caps = match modifiable_caps(forme) {
        Ok(caps) => caps,
        Err(_) => return Options::default(),
    };
    let mut best: Option<(usize, f64)> = None;
    for (i, cap) in caps.iter().enumerate() {
        if !cap.contains_face(hit) {
            continue;
        }
        let d = (cap.boundary().centroid() - point).norm_squared();
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map_or_else(Options::default, |(i, _)| Options::cap(i))
}

/// Resolves a pointer hit to a face choice, when the face can take a cap.
pub(crate) fn hit_face_option(graph: &[GraphEntry], forme: &Forme, point: &Point3) -> Options {
    let hit = forme.mesh.hit_face(point).index;
    match augmentable_faces(graph, forme) {
        Ok(faces) if faces.contains(&hit) => Options::face(hit),
        _ => Options::default(),
    }
}

// ============================================================================
// Alignment prediction
// ============================================================================

/// Axes of every modified site of a composite solid: cap boundary
/// normals for augments and gyrations, face normals for holes.
fn site_axes(forme: &Forme) -> Result<Vec<Vec3>> {
    let c = match forme.spec.as_composite() {
        Some(c) => *c,
        None => return Ok(Vec::new()),
    };
    let mut axes = Vec::new();
    if c.augmented > 0 {
        for cap in forme.modification_caps()? {
            axes.push(cap.boundary().normal());
        }
    } else if c.gyrate > 0 {
        for cap in forme.modification_caps()? {
            if cap.gyration() == Some(Gyration::Ortho) {
                axes.push(cap.boundary().normal());
            }
        }
    }
    if c.diminished > 0 {
        let hole = match c.source {
            CompositeSource::Classical(cl) if cl.operation == ClassicalOperation::Cantellate => 10,
            _ => 5,
        };
        for f in forme.mesh.faces_with_num_sides(hole) {
            axes.push(f.normal());
        }
    }
    Ok(axes)
}

/// Para when the two site axes oppose each other, meta otherwise.
fn pair_align(axes: &[Vec3]) -> Option<Align> {
    match axes {
        [a, b] => Some(if is_inverse(a, b) {
            Align::Para
        } else {
            Align::Meta
        }),
        _ => None,
    }
}

/// Alignment of the solid an augment at a face with `normal` produces.
fn predicted_augment_align(
    entry: &GraphEntry,
    forme: &Forme,
    normal: &Vec3,
) -> Result<Option<Align>> {
    let (l, r) = match (entry.left.as_composite(), entry.right.as_composite()) {
        (Some(l), Some(r)) => (*l, *r),
        _ => return Ok(None),
    };
    if r.augmented != l.augmented + 1 {
        return Ok(None);
    }
    let rewrapped = Forme::from_parts(entry.left, forme.mesh.clone());
    let mut axes = site_axes(&rewrapped)?;
    axes.push(*normal);
    Ok(pair_align(&axes))
}

/// Alignment of the solid removing `cap` produces.
fn predicted_diminish_align(
    entry: &GraphEntry,
    forme: &Forme,
    cap: &Cap<'_>,
) -> Result<Option<Align>> {
    let (l, r) = match (entry.left.as_composite(), entry.right.as_composite()) {
        (Some(l), Some(r)) => (*l, *r),
        _ => return Ok(None),
    };
    let rewrapped = Forme::from_parts(entry.right, forme.mesh.clone());
    let mut axes = site_axes(&rewrapped)?;
    let normal = cap.boundary().normal();
    if r.augmented == l.augmented + 1 {
        // Cutting an augment back off removes its site.
        axes.retain(|a| !is_codirectional(a, &normal));
    } else if r.gyrate == l.gyrate + 1 {
        // Emptying an ortho cupola leaves a hole on the same axis.
    } else {
        axes.push(normal);
    }
    Ok(pair_align(&axes))
}

// ============================================================================
// Augment
// ============================================================================

/// The free-standing capstone a cap of `kind` is cut from.
fn cap_solid(kind: CapKind, sides: usize) -> Capstone {
    match kind {
        CapKind::Pyramid => Capstone::mono(sides as u8, CapType::Primary, Elongation::None, false),
        CapKind::Fastigium => Capstone::mono(2, CapType::Secondary, Elongation::None, false),
        CapKind::Cupola => {
            Capstone::mono((sides / 2) as u8, CapType::Secondary, Elongation::None, false)
        }
        CapKind::Rotunda => Capstone::mono(5, CapType::Secondary, Elongation::None, true),
    }
}

/// The boundary edge fixing a cap's rotational phase: the one whose
/// cap-side face is the square (cupola) or triangle (rotunda).
fn cap_cross_edge<'a>(cap: &Cap<'a>, kind: CapKind) -> Result<Edge<'a>> {
    let edges = cap.boundary().edges();
    let wanted = match kind {
        CapKind::Pyramid => {
            return edges
                .first()
                .copied()
                .ok_or(OpError::Correspondence("a cap boundary edge"));
        }
        CapKind::Cupola | CapKind::Fastigium => 4,
        CapKind::Rotunda => 3,
    };
    edges
        .into_iter()
        .find(|e| e.face().map_or(false, |f| f.num_sides() == wanted))
        .ok_or(OpError::Correspondence("a cap cross edge"))
}

/// Whether the faces across an edge of the base solid read as an ortho
/// seating for a cap of `kind` above the edge.
fn reads_ortho(across: &Edge<'_>, kind: Option<CapKind>) -> bool {
    match kind {
        Some(CapKind::Cupola) | Some(CapKind::Fastigium) => {
            across.face().map_or(false, |f| f.num_sides() == 4)
        }
        Some(CapKind::Rotunda) => across.face().map_or(false, |f| f.num_sides() == 3),
        _ => true,
    }
}

/// Candidate base-face edges to pair with the cap's cross edge, in
/// preference order.
fn base_cross_candidates<'a>(
    entry: &GraphEntry,
    forme: &'a Forme,
    face: &Face<'a>,
    want_ortho: bool,
) -> Result<Vec<Edge<'a>>> {
    let edges = face.edges();
    let first = edges
        .first()
        .copied()
        .ok_or(OpError::Correspondence("a base face edge"))?;
    if let Some(l) = entry.left.as_capstone() {
        if !l.is_prismatic() && !l.is_primary() && !l.is_gyroelongated() {
            let kind = {
                let rewrapped = Forme::from_parts(entry.left, forme.mesh.clone());
                let ends = rewrapped.ends()?;
                ends[0].as_cap().map(|cap| cap.kind())
            };
            for e in &edges {
                let mut across = e
                    .twin()
                    .ok_or(OpError::Correspondence("a face neighbor"))?;
                if !l.is_shortened() {
                    across = across
                        .next()
                        .and_then(|n| n.next())
                        .and_then(|n| n.twin())
                        .ok_or(OpError::Correspondence("an edge across the prism band"))?;
                }
                if reads_ortho(&across, kind) == want_ortho {
                    return Ok(vec![*e]);
                }
            }
            return Ok(vec![first]);
        }
    }
    if let Some(c) = entry.left.as_composite() {
        if let CompositeSource::Classical(cl) = c.source {
            match cl.operation {
                ClassicalOperation::Cantellate => {
                    // Square-adjacent hole edges seat the cupola ortho.
                    for e in &edges {
                        let square = e.twin_face().map_or(false, |f| f.num_sides() == 4);
                        if square == want_ortho {
                            return Ok(vec![*e]);
                        }
                    }
                    return Ok(vec![first]);
                }
                ClassicalOperation::Truncate => {
                    // Two phases are possible; only one keeps the result
                    // convex, so offer both and let the caller validate.
                    let mut candidates = Vec::new();
                    if let Some(e) = edges
                        .iter()
                        .find(|e| e.twin_face().map_or(false, |f| f.num_sides() == 3))
                    {
                        candidates.push(*e);
                    }
                    if let Some(e) = edges
                        .iter()
                        .find(|e| e.twin_face().map_or(false, |f| f.num_sides() != 3))
                    {
                        candidates.push(*e);
                    }
                    if candidates.is_empty() {
                        candidates.push(first);
                    }
                    return Ok(candidates);
                }
                _ => {}
            }
        }
    }
    Ok(vec![first])
}

/// Every dihedral angle strictly convex.
fn is_convex(mesh: &Mesh) -> bool {
    mesh.edges()
        .all(|e| e.dihedral_angle().map_or(false, |a| a < PI - PRECISION))
}

pub(crate) fn apply_augment(
    graph: &[GraphEntry],
    forme: &Forme,
    options: &Options,
) -> Result<OpResult> {
    let faces = augmentable_faces(graph, forme)?;
    let face_index = match options.face {
        Some(f) if faces.contains(&f) => f,
        Some(_) => return Err(invalid(forme)),
        None => *faces.first().ok_or_else(|| invalid(forme))?,
    };
    let face = forme.mesh.face(face_index);
    let sides = face.num_sides();

    let defaults = augment_defaults(graph, &forme.spec);
    let request = Options {
        using: options.using.or(defaults.using),
        gyrate: options.gyrate.or(defaults.gyrate),
        ..*options
    };
    let mut matching: Vec<&GraphEntry> = graph
        .iter()
        .filter(|e| {
            specs_match(&e.left, &forme.spec)
                && e.opts.left.face_type == Some(sides)
                && e.opts.left.satisfies(&request)
        })
        .collect();
    if matching.len() > 1 && matching.iter().any(|e| e.opts.left.align.is_some()) {
        if let Some(predicted) = predicted_augment_align(matching[0], forme, &face.normal())? {
            matching.retain(|e| e.opts.left.align.map_or(true, |a| a == predicted));
        }
    }
    let entry = *matching.first().ok_or_else(|| invalid(forme))?;

    let kind = entry
        .opts
        .left
        .using
        .unwrap_or(if sides <= 5 { CapKind::Pyramid } else { CapKind::Cupola });
    log::debug!(
        "augment: {} at face {face_index} with {kind:?} -> {}",
        forme.spec.name(),
        entry.right.name()
    );
    let want_ortho = request.gyrate.or(entry.opts.left.gyrate) == Some(Gyrate::Ortho);

    let augmentee = Forme::realize(&Spec::Capstone(cap_solid(kind, sides)))?;
    let ends = augmentee.ends()?;
    let cap = ends[0]
        .as_cap()
        .ok_or(OpError::Correspondence("the capstone's cap"))?;
    let underside = ends[1]
        .as_face()
        .ok_or(OpError::Correspondence("the capstone's underside"))?;
    let boundary = cap.boundary();
    let cap_edge = cap_cross_edge(cap, kind)?;
    let cap_pose = Pose {
        origin: boundary.centroid(),
        scale: boundary.side_length(),
        orientation: (
            boundary.normal(),
            cap_edge.midpoint() - boundary.centroid(),
        ),
    };

    let candidates = base_cross_candidates(entry, forme, &face, want_ortho)?;
    let validate = candidates.len() > 1;
    let mut assembled: Option<(Mesh, Mesh)> = None;
    for base_edge in candidates {
        let base_pose = Pose {
            origin: face.centroid(),
            scale: face.side_length(),
            orientation: (face.normal(), base_edge.midpoint() - face.centroid()),
        };
        let aligned = augmentee.mesh.transformed(&cap_pose.map_onto(&base_pose));
        let capped = MeshBuilder::from_mesh(&aligned)
            .without_faces(&[underside.index])
            .build();
        let mut builder = MeshBuilder::from_mesh(&forme.mesh);
        builder.add_mesh(&capped);
        let combined = builder.build();
        let result = deduplicate_vertices(
            &MeshBuilder::from_mesh(&combined)
                .without_faces(&[face_index])
                .build(),
        );
        let good = !validate || is_convex(&result);
        if assembled.is_none() || good {
            assembled = Some((combined, result));
        }
        if good {
            break;
        }
    }
    let (combined, result_mesh) =
        assembled.ok_or(OpError::Correspondence("a cap seating"))?;

    // The new cap grows out of the face it lands on.
    let added = combined.num_vertices() - forme.mesh.num_vertices();
    let start_positions: Vec<Point3> = forme
        .mesh
        .positions()
        .iter()
        .copied()
        .chain(std::iter::repeat(face.centroid()).take(added))
        .collect();
    let start = MeshBuilder::from_mesh(&combined)
        .with_vertex_positions(start_positions)
        .build();
    let end_vertices = combined.positions().to_vec();

    Ok(OpResult {
        result: Forme::from_parts(entry.right, result_mesh),
        animation: AnimationData { start, end_vertices },
    })
}

// ============================================================================
// Diminish
// ============================================================================

/// Graph entries a diminish of `cap` may resolve to. The gyrate marker
/// only discriminates the rhombicosidodecahedral fills; a bicupola cap
/// reads its gyration against the prism band, not the far cap, so the
/// marker says nothing about it.
fn diminish_entries<'g>(
    graph: &'g [GraphEntry],
    forme: &Forme,
    cap: &Cap<'_>,
    requested: Option<Align>,
) -> Vec<&'g GraphEntry> {
    graph
        .iter()
        .filter(|e| {
            specs_match(&e.right, &forme.spec)
                && e.opts.right.using.map_or(true, |k| k == cap.kind())
                && (e.right.as_composite().is_none()
                    || e.opts.right.gyrate.map_or(true, |g| {
                        (g == Gyrate::Ortho) == (cap.gyration() == Some(Gyration::Ortho))
                    }))
                && e.opts.right.align.map_or(true, |a| {
                    requested.map_or(true, |req| a == req)
                })
        })
        .collect()
}

/// Cap choices for diminish, restricted to caps some graph entry covers.
pub(crate) fn diminish_option_combos(graph: &[GraphEntry], forme: &Forme) -> Result<Vec<Options>> {
    let caps = modifiable_caps(forme)?;
    Ok(caps
        .iter()
        .enumerate()
        .filter(|(_, cap)| !diminish_entries(graph, forme, cap, None).is_empty())
        .map(|(i, _)| Options::cap(i))
        .collect())
}

pub(crate) fn apply_diminish(
    graph: &[GraphEntry],
    forme: &Forme,
    options: &Options,
) -> Result<OpResult> {
    let caps = modifiable_caps(forme)?;
    let cap = caps
        .get(options.cap.unwrap_or(0))
        .ok_or_else(|| invalid(forme))?;

    let mut matching = diminish_entries(graph, forme, cap, options.align);
    if matching.len() > 1 && matching.iter().any(|e| e.opts.right.align.is_some()) {
        if let Some(predicted) = predicted_diminish_align(matching[0], forme, cap)? {
            matching.retain(|e| e.opts.right.align.map_or(true, |a| a == predicted));
        }
    }
    let entry = *matching.first().ok_or_else(|| invalid(forme))?;

    log::debug!(
        "diminish: {} losing a {:?} cap -> {}",
        forme.spec.name(),
        cap.kind(),
        entry.left.name()
    );
    let result_mesh = remove_cap(&forme.mesh, cap);

    // The cap's interior collapses onto its boundary plane.
    let boundary = cap.boundary();
    let normal = boundary.normal();
    let origin = boundary.centroid();
    let inner: HashSet<usize> = cap.inner_indices().iter().copied().collect();
    let end_vertices: Vec<Point3> = forme
        .mesh
        .positions()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if inner.contains(&i) {
                p - normal * (p - origin).dot(&normal)
            } else {
                *p
            }
        })
        .collect();

    Ok(OpResult {
        result: Forme::from_parts(entry.left, result_mesh),
        animation: AnimationData {
            start: forme.mesh.clone(),
            end_vertices,
        },
    })
}

// ============================================================================
// Gyrate
// ============================================================================

/// Graph spec pairs a gyration of `cap` may step along. Each candidate
/// pairs the side the solid matches with the result.
fn gyrate_candidates(graph: &[GraphEntry], forme: &Forme, cap: &Cap<'_>) -> Vec<(Spec, Spec)> {
    let ortho = cap.gyration() == Some(Gyration::Ortho);
    let mut candidates = Vec::new();
    for e in graph {
        if e.left.as_composite().is_some() {
            // An ortho cap was gyrated into place; rotating it goes back.
            if ortho && specs_match(&e.right, &forme.spec) {
                candidates.push((e.right, e.left));
            } else if !ortho && specs_match(&e.left, &forme.spec) {
                candidates.push((e.left, e.right));
            }
        } else if specs_match(&e.left, &forme.spec) {
            candidates.push((e.left, e.right));
        } else if specs_match(&e.right, &forme.spec) {
            candidates.push((e.right, e.left));
        }
    }
    candidates
}

/// Cap choices for gyrate, restricted to caps that step to a
/// catalogued solid. A gyro cap of the parabigyrate solid, say, has
/// nowhere to go.
pub(crate) fn gyrate_option_combos(graph: &[GraphEntry], forme: &Forme) -> Result<Vec<Options>> {
    let caps = modifiable_caps(forme)?;
    Ok(caps
        .iter()
        .enumerate()
        .filter(|(_, cap)| !gyrate_candidates(graph, forme, cap).is_empty())
        .map(|(i, _)| Options::cap(i))
        .collect())
}

pub(crate) fn apply_gyrate(
    graph: &[GraphEntry],
    forme: &Forme,
    options: &Options,
) -> Result<OpResult> {
    let caps = modifiable_caps(forme)?;
    let cap = caps
        .get(options.cap.unwrap_or(0))
        .ok_or_else(|| invalid(forme))?;
    let ortho = cap.gyration() == Some(Gyration::Ortho);

    let mut candidates = gyrate_candidates(graph, forme, cap);
    if let Some(req) = options.align {
        candidates.retain(|(_, r)| {
            r.as_composite()
                .and_then(|c| c.align)
                .map_or(true, |a| a == req)
        });
    }
    if candidates.len() > 1 {
        let rewrapped = Forme::from_parts(candidates[0].0, forme.mesh.clone());
        let mut axes = site_axes(&rewrapped)?;
        let normal = cap.boundary().normal();
        if ortho {
            axes.retain(|a| !is_codirectional(a, &normal));
        } else {
            axes.push(normal);
        }
        if let Some(predicted) = pair_align(&axes) {
            candidates.retain(|(_, r)| {
                r.as_composite()
                    .and_then(|c| c.align)
                    .map_or(true, |a| a == predicted)
            });
        }
    }
    let (_, result_spec) = *candidates.first().ok_or_else(|| invalid(forme))?;

    // Split the cap from the body along its boundary so it can turn
    // freely: the cap keeps the original boundary vertices, every other
    // face gets duplicates.
    let boundary = cap.boundary();
    let ring: Vec<usize> = boundary.ring_indices().to_vec();
    let cap_faces: HashSet<usize> = cap.face_indices().iter().copied().collect();
    let mut builder = MeshBuilder::from_mesh(&forme.mesh);
    let dup_start = builder.add_vertices(boundary.points());
    let duplicate: HashMap<usize, usize> = ring
        .iter()
        .enumerate()
        .map(|(i, &v)| (v, dup_start + i))
        .collect();
    let mock = builder
        .map_face_loops(|i, face_loop| {
            if cap_faces.contains(&i) {
                face_loop.to_vec()
            } else {
                face_loop
                    .iter()
                    .map(|v| duplicate.get(v).copied().unwrap_or(*v))
                    .collect()
            }
        })
        .build();

    let theta = 2.0 * PI / ring.len() as f64;
    let angle = if ortho { -theta } else { theta };
    let axis = Dir3::new_normalize(boundary.normal());
    let rotation =
        Transform::rotation_about_axis(&axis, angle).about_origin(&boundary.centroid());
    let turning: HashSet<usize> = cap
        .inner_indices()
        .iter()
        .copied()
        .chain(ring.iter().copied())
        .collect();
    let end_vertices: Vec<Point3> = mock
        .positions()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if turning.contains(&i) {
                rotation.apply_point(p)
            } else {
                *p
            }
        })
        .collect();

    let result_mesh = remove_extraneous_vertices(&deduplicate_vertices(
        &MeshBuilder::from_mesh(&mock)
            .with_vertex_positions(end_vertices.clone())
            .build(),
    ));

    Ok(OpResult {
        result: Forme::from_parts(result_spec, result_mesh),
        animation: AnimationData {
            start: mock,
            end_vertices,
        },
    })
}

fn invalid(forme: &Forme) -> OpError {
    OpError::InvalidOptions {
        spec: forme.spec.name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polyhedra_specs::Spec;

    fn forme(name: &str) -> Forme {
        Forme::realize(&Spec::with_name(name).unwrap()).unwrap()
    }

    #[test]
    fn test_augment_square_pyramid_closes_into_an_octahedron() {
        let graph = augment_graph();
        let f = forme("square pyramid");
        let faces = augmentable_faces(&graph, &f).unwrap();
        assert_eq!(faces.len(), 1);
        assert_eq!(f.mesh.face(faces[0]).num_sides(), 4);

        let out = apply_augment(&graph, &f, &Options::default()).unwrap();
        assert_eq!(out.result.spec.name(), "octahedron");
        assert_eq!(out.result.mesh.num_vertices(), 6);
        assert_eq!(out.result.mesh.num_faces(), 8);
        assert!(is_convex(&out.result.mesh));
        assert_eq!(
            out.animation.start.num_vertices(),
            out.animation.end_vertices.len()
        );
    }

    #[test]
    fn test_diminish_icosahedron_leaves_a_pentagonal_hole() {
        let graph = augment_graph();
        let f = forme("icosahedron");
        let out = apply_diminish(&graph, &f, &Options::default()).unwrap();
        assert_eq!(out.result.spec.name(), "gyroelongated pentagonal pyramid");
        assert_eq!(out.result.mesh.num_vertices(), 11);
        assert_eq!(out.result.mesh.num_faces(), 16);
        assert_eq!(out.result.mesh.faces_with_num_sides(5).len(), 1);
    }

    #[test]
    fn test_diminish_elongated_square_pyramid_yields_a_cube() {
        let graph = augment_graph();
        let f = forme("elongated square pyramid");
        let out = apply_diminish(&graph, &f, &Options::default()).unwrap();
        assert_eq!(out.result.spec.name(), "cube");
        assert_eq!(out.result.mesh.num_faces(), 6);
    }

    #[test]
    fn test_augment_triangular_prism_offers_pyramid_and_fastigium() {
        let graph = augment_graph();
        let f = forme("triangular prism");
        let combos = augment_option_combos(&graph, &f).unwrap();
        assert!(combos.iter().any(|o| o.using == Some(CapKind::Pyramid)));
        assert!(combos.iter().any(|o| o.using == Some(CapKind::Fastigium)));

        let defaults = augment_defaults(&graph, &f.spec);
        assert_eq!(defaults.using, Some(CapKind::Pyramid));

        let out = apply_augment(&graph, &f, &Options::default()).unwrap();
        assert_eq!(out.result.spec.name(), "augmented triangular prism");

        let fastigium = Options {
            using: Some(CapKind::Fastigium),
            ..Options::default()
        };
        let out = apply_augment(&graph, &f, &fastigium).unwrap();
        assert_eq!(out.result.spec.name(), "gyrobifastigium");
    }

    #[test]
    fn test_augmented_dodecahedron_aligns_by_face_choice() {
        let graph = augment_graph();
        let f = forme("augmented dodecahedron");
        let faces = augmentable_faces(&graph, &f).unwrap();
        // Eleven source pentagons, minus the five touching the augment.
        assert_eq!(faces.len(), 6);

        let caps = modifiable_caps(&f).unwrap();
        assert_eq!(caps.len(), 1);
        let axis = caps[0].boundary().normal();
        let para = faces
            .iter()
            .copied()
            .find(|&i| is_inverse(&f.mesh.face(i).normal(), &axis))
            .unwrap();
        let out = apply_augment(&graph, &f, &Options::face(para)).unwrap();
        assert_eq!(out.result.spec.name(), "parabiaugmented dodecahedron");

        let meta = faces.iter().copied().find(|&i| i != para).unwrap();
        let out = apply_augment(&graph, &f, &Options::face(meta)).unwrap();
        assert_eq!(out.result.spec.name(), "metabiaugmented dodecahedron");
    }

    #[test]
    fn test_diminish_rhombicosidodecahedron_removes_a_cupola() {
        let graph = augment_graph();
        let f = forme("rhombicosidodecahedron");
        let out = apply_diminish(&graph, &f, &Options::default()).unwrap();
        assert_eq!(out.result.spec.name(), "diminished rhombicosidodecahedron");
        assert_eq!(out.result.mesh.num_vertices(), 55);
        assert_eq!(out.result.mesh.num_faces(), 52);
        assert_eq!(out.result.mesh.faces_with_num_sides(10).len(), 1);
    }

    #[test]
    fn test_gyrate_rhombicosidodecahedron_round_trips() {
        let graph = gyrate_graph();
        let f = forme("rhombicosidodecahedron");
        let out = apply_gyrate(&graph, &f, &Options::default()).unwrap();
        assert_eq!(out.result.spec.name(), "gyrate rhombicosidodecahedron");
        assert_eq!(out.result.mesh.num_vertices(), 60);
        assert_eq!(out.result.mesh.num_faces(), 62);

        // Turning the rotated cupola again restores the source.
        let caps = modifiable_caps(&out.result).unwrap();
        let index = caps
            .iter()
            .position(|cap| cap.gyration() == Some(Gyration::Ortho))
            .unwrap();
        let back = apply_gyrate(&graph, &out.result, &Options::cap(index)).unwrap();
        assert_eq!(back.result.spec.name(), "rhombicosidodecahedron");
    }

    #[test]
    fn test_augment_pentagonal_cupola_takes_a_rotunda() {
        let graph = augment_graph();
        let f = forme("pentagonal cupola");
        let defaults = augment_defaults(&graph, &f.spec);
        assert_eq!(defaults.using, Some(CapKind::Cupola));
        assert_eq!(defaults.gyrate, Some(Gyrate::Gyro));

        let rotunda = Options {
            using: Some(CapKind::Rotunda),
            gyrate: Some(Gyrate::Ortho),
            ..Options::default()
        };
        let out = apply_augment(&graph, &f, &rotunda).unwrap();
        assert_eq!(
            out.result.spec.name(),
            "pentagonal orthocupolarotunda"
        );
    }

    #[test]
    fn test_augment_sphenocorona_caps_a_square() {
        let graph = augment_graph();
        let spec = Spec::Elementary(Elementary::Sphenocorona);
        let entry = graph
            .iter()
            .find(|e| specs_match(&e.left, &spec))
            .unwrap();
        assert_eq!(entry.right.name(), "augmented sphenocorona");
        assert_eq!(entry.opts.left.using, Some(CapKind::Pyramid));
        assert_eq!(entry.opts.left.face_type, Some(4));

        let f = forme("sphenocorona");
        let out = apply_augment(&graph, &f, &Options::default()).unwrap();
        assert_eq!(out.result.spec.name(), "augmented sphenocorona");
        assert_eq!(out.result.mesh.num_vertices(), 11);
        assert_eq!(out.result.mesh.faces_with_num_sides(4).len(), 1);

        // Cutting the pyramid back off restores the sphenocorona.
        let back = apply_diminish(&graph, &out.result, &Options::default()).unwrap();
        assert_eq!(back.result.spec.name(), "sphenocorona");
        assert_eq!(back.result.mesh.num_vertices(), 10);
    }
}
