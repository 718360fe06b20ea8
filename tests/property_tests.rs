// tests/property_tests.rs

use llll::{llll, parse_native, parse_text, to_native, to_text, BinOp, DepthBounds, Node, Rational};
use proptest::prelude::*;

fn arb_atom() -> impl Strategy<Value = Node> {
    prop_oneof![
        any::<i64>().prop_map(Node::from),
        (any::<i64>(), any::<i64>().prop_filter("non-zero", |d| *d != 0))
            .prop_map(|(n, d)| Node::from(Rational::new(n, d).unwrap())),
        any::<bool>().prop_map(Node::from),
        "\\PC{0,8}".prop_map(Node::from),
        "[ \"'\\\\a-z0-9/.\\-]{0,6}".prop_map(Node::from),
    ]
}

fn arb_node() -> impl Strategy<Value = Node> {
    arb_atom().prop_recursive(
        6,  // 6 levels deep
        128, // Shoot for maximum size of 128 nodes
        8,  // We put up to 8 items per collection
        |inner| prop::collection::vec(inner, 0..8).prop_map(Node::List),
    )
}

fn arb_list() -> impl Strategy<Value = Node> {
    prop::collection::vec(arb_node(), 0..8).prop_map(Node::List)
}

proptest! {
    #[test]
    fn text_round_trip(l in arb_list()) {
        prop_assert_eq!(parse_text(&to_text(&l)).unwrap(), l);
    }

    #[test]
    fn native_round_trip(node in arb_node()) {
        prop_assert_eq!(parse_native(&to_native(&node)).unwrap(), node);
    }

    #[test]
    fn flat_round_trip(node in arb_node()) {
        let flat = node.to_flat().unwrap();
        prop_assert_eq!(Node::from_flat(&flat).unwrap(), node.clone());
    }

    #[test]
    fn depth_zero_iff_atom_or_null(node in arb_node()) {
        prop_assert_eq!(node.depth() == 0, node.is_atomic() || node.is_null());
    }

    #[test]
    fn negative_index_mirrors_length(items in prop::collection::vec(any::<i64>(), 1..10)) {
        let l = Node::list(items);
        let len = l.length() as i64;
        prop_assert_eq!(l.get(-1).unwrap(), l.get(len).unwrap());
        prop_assert!(l.get(0).unwrap().is_null());
    }

    #[test]
    fn singleton_broadcast_matches_atom(items in prop::collection::vec(-1000i64..1000, 0..10), k in -1000i64..1000) {
        let l = Node::list(items);
        prop_assert_eq!(l.add(llll![k]).unwrap(), l.add(k).unwrap());
    }

    #[test]
    fn map_identity_preserves_tree(node in arb_node(), min in 0usize..4, extra in 0usize..4) {
        let bounds = DepthBounds::new(min, min + extra);
        prop_assert_eq!(node.map_within(bounds, |v, _| v.clone()), node);
    }

    #[test]
    fn division_then_multiplication_is_exact(a in -1000i64..1000, b in 1i64..1000) {
        let q = Node::from(a).combine(b, BinOp::Divide).unwrap();
        prop_assert_eq!(q.mul(b).unwrap(), Node::from(a));
    }
}
