//! Orbit index: BFS spanning tree of the ring under the four generators.
//!
//! The index is built once by breadth-first search from a root residue.
//! Each edge is a single forward application of one generator; at every
//! node the generators are expanded in a fixed order (G1, G2, G3, G4 by
//! default) and the first discovery of a residue fixes its parent. That
//! order determines [`OrbitIndex::path`] but not [`OrbitIndex::distance`],
//! which is the intrinsic shortest-path length from the root.
//!
//! Storage is arena-style: fixed 96-entry arrays addressed by residue.
//!
//! # Canonical index
//!
//! [`OrbitIndex::canonical`] roots the tree at residue
//! [`CANONICAL_ROOT`] (0) with the default generator order. From 0 the
//! distance of `(q, d, c)` is `q + min_steps(d) + c`, where
//! `min_steps = [0, 1, 2]`, so the canonical diameter is 12.
//!
//! # Example
//!
//! ```
//! use uor_factor96::{Generator, OrbitIndex, RingElement};
//!
//! let orbit = OrbitIndex::canonical().unwrap();
//! let x = RingElement::new(16).unwrap();
//! assert_eq!(orbit.distance(x), 2);
//! let path = orbit.path(x);
//! assert_eq!(path[0].generator, Generator::G2);
//! assert_eq!(path[1].target, x);
//! ```

use crate::core::constants::{CANONICAL_ROOT, RING_ORDER};
use crate::core::element::RingElement;
use crate::error::{Error, Result};
use crate::transform::Generator;
use std::collections::VecDeque;
use std::sync::{Arc, OnceLock};

/// Parent link in the BFS tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parent {
    /// Predecessor residue.
    pub from: RingElement,
    /// Generator applied to `from` to reach the child.
    pub generator: Generator,
}

/// One step of a root-to-element path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathStep {
    /// Generator applied at this step.
    pub generator: Generator,
    /// Residue reached by the step.
    pub target: RingElement,
}

/// Per-element orbit record: distance and parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrbitRecord {
    /// BFS distance from the root.
    pub distance: u8,
    /// Parent link, `None` for the root.
    pub parent: Option<Parent>,
}

/// BFS spanning tree of the orbit graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrbitIndex {
    root: RingElement,
    order: [Generator; 4],
    records: [OrbitRecord; RING_ORDER],
    max_distance: u8,
}

impl OrbitIndex {
    /// Builds the index from `root` with the default generator order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StructuralInvariant`] if the generators fail to
    /// reach every residue.
    pub fn build(root: RingElement) -> Result<Self> {
        Self::build_with_order(root, Generator::ALL)
    }

    /// Builds the index with an explicit generator expansion order.
    ///
    /// Distances do not depend on `order`; parents and paths do.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StructuralInvariant`] if the generators fail to
    /// reach every residue.
    pub fn build_with_order(root: RingElement, order: [Generator; 4]) -> Result<Self> {
        let mut distance: [Option<u8>; RING_ORDER] = [None; RING_ORDER];
        let mut parent: [Option<Parent>; RING_ORDER] = [None; RING_ORDER];
        let mut queue = VecDeque::with_capacity(RING_ORDER);

        distance[root.index()] = Some(0);
        queue.push_back(root);

        while let Some(current) = queue.pop_front() {
            let d = distance[current.index()].unwrap_or(0);
            for generator in order {
                let next = generator.apply(current);
                if distance[next.index()].is_none() {
                    distance[next.index()] = Some(d + 1);
                    parent[next.index()] = Some(Parent {
                        from: current,
                        generator,
                    });
                    queue.push_back(next);
                }
            }
        }

        let unreached: Vec<u8> = RingElement::all()
            .filter(|x| distance[x.index()].is_none())
            .map(RingElement::value)
            .collect();
        if !unreached.is_empty() {
            return Err(Error::StructuralInvariant(format!(
                "orbit from {root} misses {} residues: {unreached:?}",
                unreached.len()
            )));
        }

        let records: [OrbitRecord; RING_ORDER] = core::array::from_fn(|i| OrbitRecord {
            distance: distance[i].unwrap_or(0),
            parent: parent[i],
        });
        let max_distance = records.iter().map(|r| r.distance).max().unwrap_or(0);
        if max_distance as usize > PathCode::MAX_STEPS {
            return Err(Error::StructuralInvariant(format!(
                "orbit from {root} has eccentricity {max_distance}, beyond the {}-step path code",
                PathCode::MAX_STEPS
            )));
        }

        tracing::debug!(
            root = root.value(),
            max_distance = max_distance,
            order = ?order,
            "orbit_index_built"
        );

        Ok(Self {
            root,
            order,
            records,
            max_distance,
        })
    }

    /// Shared canonical index (root 0, order G1, G2, G3, G4).
    ///
    /// Built once on first use; concurrent first callers all observe the
    /// same instance. The canonical index is checked by
    /// [`conformance::verify_orbit`](crate::conformance::verify_orbit)
    /// before it is served.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StructuralInvariant`] if construction or
    /// verification failed; the failure is cached.
    pub fn canonical() -> Result<Arc<Self>> {
        static CANONICAL: OnceLock<Result<Arc<OrbitIndex>>> = OnceLock::new();
        CANONICAL
            .get_or_init(|| {
                let built = Self::build(RingElement::reduce(CANONICAL_ROOT as u64))
                    .and_then(|index| crate::conformance::verify_orbit(&index).map(|_| index));
                match built {
                    Ok(index) => Ok(Arc::new(index)),
                    Err(e) => {
                        tracing::error!(error = %e, "canonical_orbit_index_rejected");
                        Err(e)
                    }
                }
            })
            .clone()
    }

    /// Root of the tree.
    #[inline]
    #[must_use]
    pub fn root(&self) -> RingElement {
        self.root
    }

    /// Generator expansion order used to break ties.
    #[inline]
    #[must_use]
    pub fn generator_order(&self) -> [Generator; 4] {
        self.order
    }

    /// Shortest number of generator applications from the root to `x`.
    #[inline]
    #[must_use]
    pub fn distance(&self, x: RingElement) -> u8 {
        self.records[x.index()].distance
    }

    /// Parent link of `x`, `None` for the root.
    #[inline]
    #[must_use]
    pub fn parent(&self, x: RingElement) -> Option<Parent> {
        self.records[x.index()].parent
    }

    /// Full record of `x`.
    #[inline]
    #[must_use]
    pub fn record(&self, x: RingElement) -> OrbitRecord {
        self.records[x.index()]
    }

    /// Generator sequence from the root to `x`, root side first.
    ///
    /// The path has exactly `distance(x)` steps and is empty for the root.
    #[must_use]
    pub fn path(&self, x: RingElement) -> Vec<PathStep> {
        let mut steps = Vec::with_capacity(self.distance(x) as usize);
        let mut cursor = x;
        while let Some(p) = self.parent(cursor) {
            steps.push(PathStep {
                generator: p.generator,
                target: cursor,
            });
            cursor = p.from;
        }
        steps.reverse();
        steps
    }

    /// Compact encoding of `path(x)`.
    ///
    /// Construction rejects trees deeper than [`PathCode::MAX_STEPS`], so
    /// every path of an index fits.
    #[must_use]
    pub fn path_code(&self, x: RingElement) -> PathCode {
        PathCode::pack(self.path(x).iter().map(|s| s.generator))
    }

    /// Largest distance from the root (the root's eccentricity).
    #[inline]
    #[must_use]
    pub fn max_distance(&self) -> u8 {
        self.max_distance
    }

    /// Number of residues at each distance `0..=max_distance`.
    #[must_use]
    pub fn level_sizes(&self) -> Vec<usize> {
        let mut levels = vec![0usize; self.max_distance as usize + 1];
        for r in &self.records {
            levels[r.distance as usize] += 1;
        }
        levels
    }

    /// Iterates over `(element, record)` pairs in residue order.
    pub fn iter(&self) -> impl Iterator<Item = (RingElement, OrbitRecord)> + '_ {
        RingElement::all().map(move |x| (x, self.records[x.index()]))
    }
}

/// Shortest-path distance between two residues.
///
/// # Errors
///
/// Returns [`Error::StructuralInvariant`] if the orbit from `a` is incomplete.
pub fn distance_between(a: RingElement, b: RingElement) -> Result<u8> {
    Ok(OrbitIndex::build(a)?.distance(b))
}

/// Path packed into a `u32`: two bits per generator id, low bits first,
/// with the step count in the top four bits.
///
/// Up to 14 steps fit, which covers every path of a 96-element orbit
/// under these generators (the largest eccentricity is 12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathCode(u32);

impl PathCode {
    /// Maximum number of steps a code can hold.
    pub const MAX_STEPS: usize = 14;

    const LEN_SHIFT: u32 = 28;

    /// Packs a generator sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathTooLong`] if the sequence has more than
    /// [`Self::MAX_STEPS`] steps.
    pub fn encode<I>(generators: I) -> Result<Self>
    where
        I: IntoIterator<Item = Generator>,
    {
        let generators: Vec<Generator> = generators.into_iter().collect();
        if generators.len() > Self::MAX_STEPS {
            return Err(Error::PathTooLong {
                len: generators.len(),
                max: Self::MAX_STEPS,
            });
        }
        Ok(Self::pack(generators))
    }

    /// Packs at most `MAX_STEPS` generators.
    fn pack<I>(generators: I) -> Self
    where
        I: IntoIterator<Item = Generator>,
    {
        let mut bits = 0u32;
        let mut len = 0u32;
        for g in generators {
            debug_assert!((len as usize) < Self::MAX_STEPS);
            bits |= u32::from(g.id()) << (2 * len);
            len += 1;
        }
        Self(bits | (len << Self::LEN_SHIFT))
    }

    /// Unpacks the generator sequence.
    #[must_use]
    pub fn decode(self) -> Vec<Generator> {
        (0..self.len())
            .map(|i| Generator::from_id(((self.0 >> (2 * i)) & 0b11) as u8))
            .collect()
    }

    /// Replays the code from `root`, returning the reached residue.
    #[must_use]
    pub fn replay(self, root: RingElement) -> RingElement {
        self.decode().into_iter().fold(root, |x, g| g.apply(x))
    }

    /// Number of steps.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        (self.0 >> Self::LEN_SHIFT) as usize
    }

    /// True for the root's empty path.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Raw packed value.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::ORBIT_DIAMETER;

    fn r(v: u8) -> RingElement {
        RingElement::new(v).unwrap()
    }

    #[test]
    fn visits_every_residue_once() {
        let idx = OrbitIndex::build(r(0)).unwrap();
        let total: usize = idx.level_sizes().iter().sum();
        assert_eq!(total, RING_ORDER);
        assert_eq!(idx.level_sizes()[0], 1);
    }

    #[test]
    fn tree_validity() {
        let idx = OrbitIndex::build(r(0)).unwrap();
        for (x, rec) in idx.iter() {
            match rec.parent {
                None => assert_eq!(x, idx.root()),
                Some(p) => {
                    assert_eq!(rec.distance, idx.distance(p.from) + 1, "{x}");
                    assert_eq!(p.generator.apply(p.from), x);
                }
            }
        }
    }

    #[test]
    fn canonical_distances_match_coordinates() {
        let idx = OrbitIndex::build(r(0)).unwrap();
        for x in RingElement::all() {
            let c = x.decompose();
            let expected = c.quadrant() + c.modality() + c.context();
            assert_eq!(idx.distance(x), expected, "{x}");
        }
        assert_eq!(idx.max_distance(), ORBIT_DIAMETER);
    }

    #[test]
    fn first_level_follows_generator_order() {
        let idx = OrbitIndex::build(r(0)).unwrap();
        assert_eq!(idx.path(r(24)), vec![PathStep { generator: Generator::G1, target: r(24) }]);
        assert_eq!(idx.path(r(8)), vec![PathStep { generator: Generator::G2, target: r(8) }]);
        assert_eq!(idx.path(r(1)), vec![PathStep { generator: Generator::G3, target: r(1) }]);
        // 16 = (0, 2, 0): G2 from 8 is expanded before G4 from 8.
        assert_eq!(
            idx.path(r(16)),
            vec![
                PathStep { generator: Generator::G2, target: r(8) },
                PathStep { generator: Generator::G2, target: r(16) },
            ]
        );
    }

    #[test]
    fn order_changes_paths_not_distances() {
        let default = OrbitIndex::build(r(0)).unwrap();
        let reversed = OrbitIndex::build_with_order(
            r(0),
            [Generator::G4, Generator::G3, Generator::G2, Generator::G1],
        )
        .unwrap();
        for x in RingElement::all() {
            assert_eq!(default.distance(x), reversed.distance(x));
        }
        // With G4 first, 16 is reached from 8 by the mirror.
        assert_eq!(reversed.path(r(16))[1].generator, Generator::G4);
    }

    #[test]
    fn path_length_equals_distance() {
        for root in [0u8, 37, 95] {
            let idx = OrbitIndex::build(r(root)).unwrap();
            for x in RingElement::all() {
                let path = idx.path(x);
                assert_eq!(path.len(), idx.distance(x) as usize);
                let end = path.iter().fold(idx.root(), |acc, s| {
                    let next = s.generator.apply(acc);
                    assert_eq!(next, s.target);
                    next
                });
                assert_eq!(end, x);
            }
        }
    }

    #[test]
    fn path_code_roundtrip() {
        let idx = OrbitIndex::build(r(0)).unwrap();
        for x in RingElement::all() {
            let code = idx.path_code(x);
            assert_eq!(code.len(), idx.distance(x) as usize);
            assert_eq!(code.replay(idx.root()), x);
        }
        assert!(idx.path_code(r(0)).is_empty());
    }

    #[test]
    fn overlong_paths_are_rejected() {
        let max = vec![Generator::G3; PathCode::MAX_STEPS];
        let code = PathCode::encode(max.clone()).unwrap();
        assert_eq!(code.len(), PathCode::MAX_STEPS);
        assert_eq!(code.decode(), max);

        let over = vec![Generator::G3; PathCode::MAX_STEPS + 1];
        assert_eq!(
            PathCode::encode(over),
            Err(Error::PathTooLong { len: 15, max: 14 })
        );
    }

    #[test]
    fn distance_between_follows_forward_edges() {
        assert_eq!(distance_between(r(5), r(5)).unwrap(), 0);
        assert_eq!(distance_between(r(0), r(95)).unwrap(), 12);
        assert_eq!(distance_between(r(0), r(1)).unwrap(), 1);
        // G3 only moves forward, so 1 → 0 wraps through the whole context cycle.
        assert_eq!(distance_between(r(1), r(0)).unwrap(), 7);
    }

    #[test]
    fn canonical_is_shared() {
        let a = OrbitIndex::canonical().unwrap();
        let b = OrbitIndex::canonical().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.root(), r(CANONICAL_ROOT));
    }
}
