//! Orbit index structure across roots and generator orders.

use proptest::prelude::*;
use uor_factor96::{
    distance_between, Generator, OrbitIndex, PathCode, RingElement, ORBIT_DIAMETER, RING_ORDER,
};

fn element() -> impl Strategy<Value = RingElement> {
    (0u8..96).prop_map(|v| RingElement::reduce(u64::from(v)))
}

fn order_strategy() -> impl Strategy<Value = [Generator; 4]> {
    Just(Generator::ALL.to_vec())
        .prop_shuffle()
        .prop_map(|v| [v[0], v[1], v[2], v[3]])
}

proptest! {
    /// Transform orders return every element to itself.
    #[test]
    fn prop_transform_orders(x in element()) {
        prop_assert_eq!(Generator::G1.apply_steps(4, x), x);
        prop_assert_eq!(Generator::G2.apply_steps(3, x), x);
        prop_assert_eq!(Generator::G3.apply_steps(8, x), x);
        prop_assert_eq!(Generator::G4.apply_steps(2, x), x);
    }

    /// inverse_apply undoes apply.
    #[test]
    fn prop_inverse(x in element()) {
        for g in Generator::ALL {
            prop_assert_eq!(g.inverse_apply(g.apply(x)), x);
        }
    }

    /// Every root reaches the whole ring and forms a valid tree.
    #[test]
    fn prop_single_orbit(root in element(), order in order_strategy()) {
        let idx = OrbitIndex::build_with_order(root, order).unwrap();
        prop_assert_eq!(idx.level_sizes().iter().sum::<usize>(), RING_ORDER);
        for (x, rec) in idx.iter() {
            match rec.parent {
                None => prop_assert_eq!(x, root),
                Some(p) => {
                    prop_assert_eq!(rec.distance, idx.distance(p.from) + 1);
                    prop_assert_eq!(p.generator.apply(p.from), x);
                }
            }
        }
    }

    /// Distances do not depend on the tie-break order.
    #[test]
    fn prop_distance_order_independent(root in element(), order in order_strategy()) {
        let a = OrbitIndex::build(root).unwrap();
        let b = OrbitIndex::build_with_order(root, order).unwrap();
        for x in RingElement::all() {
            prop_assert_eq!(a.distance(x), b.distance(x));
        }
    }

    /// Path codes replay to their target.
    #[test]
    fn prop_path_code_replay(x in element()) {
        let idx = OrbitIndex::canonical().unwrap();
        let code = idx.path_code(x);
        prop_assert_eq!(code.replay(idx.root()), x);
        prop_assert_eq!(
            code.decode(),
            idx.path(x).iter().map(|s| s.generator).collect::<Vec<_>>()
        );
    }

    /// distance_between(a, b) is the distance of b in the index rooted at a.
    #[test]
    fn prop_distance_between(a in element(), b in element()) {
        let d = distance_between(a, b).unwrap();
        prop_assert_eq!(d, OrbitIndex::build(a).unwrap().distance(b));
        prop_assert!(d <= ORBIT_DIAMETER);
    }
}

#[test]
fn canonical_level_sizes() {
    let idx = OrbitIndex::canonical().unwrap();
    // Distance from 0 is q + d + c; count the coordinate triples per sum.
    let mut expected = vec![0usize; ORBIT_DIAMETER as usize + 1];
    for q in 0..4 {
        for d in 0..3 {
            for c in 0..8 {
                expected[q + d + c] += 1;
            }
        }
    }
    assert_eq!(idx.level_sizes(), expected);
    assert_eq!(idx.max_distance(), ORBIT_DIAMETER);
}

#[test]
fn canonical_paths() {
    let idx = OrbitIndex::canonical().unwrap();
    let r = |v: u8| RingElement::new(v).unwrap();
    let gens = |v: u8| idx.path(r(v)).iter().map(|s| s.generator).collect::<Vec<_>>();
    assert_eq!(gens(4), vec![Generator::G3; 4]);
    assert_eq!(
        gens(12),
        vec![Generator::G2, Generator::G3, Generator::G3, Generator::G3, Generator::G3]
    );
    assert_eq!(gens(16), vec![Generator::G2, Generator::G2]);
    assert_eq!(idx.path(r(12)).last().map(|s| s.target), Some(r(12)));
}

#[test]
fn empty_path_code() {
    let code = PathCode::encode(Vec::<Generator>::new()).unwrap();
    assert!(code.is_empty());
    assert_eq!(code.replay(RingElement::MAX), RingElement::MAX);
}

#[test]
fn path_code_refuses_to_truncate() {
    let long = vec![Generator::G1; PathCode::MAX_STEPS + 1];
    let err = PathCode::encode(long).unwrap_err();
    assert!(err.is_precondition());
    assert_eq!(err.to_string(), "path of 15 steps exceeds the 14-step path code");
}

proptest! {
    /// Encoding either keeps every step or fails; it never drops steps.
    #[test]
    fn encode_is_all_or_nothing(ids in proptest::collection::vec(0u8..4, 0..32)) {
        let gens: Vec<Generator> = ids.into_iter().map(Generator::from_id).collect();
        match PathCode::encode(gens.clone()) {
            Ok(code) => {
                prop_assert!(gens.len() <= PathCode::MAX_STEPS);
                prop_assert_eq!(code.decode(), gens);
            }
            Err(_) => prop_assert!(gens.len() > PathCode::MAX_STEPS),
        }
    }
}
