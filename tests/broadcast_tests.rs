// tests/broadcast_tests.rs

use llll::{combine, llll, BinOp, LlllError, Node, Rational, Value};

fn rational(n: i64, d: i64) -> Node {
    Node::from(Rational::new(n, d).unwrap())
}

// ============================================================================
// Pairing Rules
// ============================================================================

#[test]
fn test_singleton_broadcasts() {
    assert_eq!(
        combine(&llll![1, 2, 3], &llll![10], BinOp::Add).unwrap(),
        llll![11, 12, 13]
    );
    assert_eq!(
        combine(&llll![10], &llll![1, 2, 3], BinOp::Subtract).unwrap(),
        llll![9, 8, 7]
    );
}

#[test]
fn test_equal_lengths_pair_by_position() {
    assert_eq!(
        combine(&llll![1, 2, 3], &llll![10, 20, 30], BinOp::Add).unwrap(),
        llll![11, 22, 33]
    );
}

#[test]
fn test_length_mismatch_is_shape_error() {
    let err = combine(&llll![1, 2, 3], &llll![10, 20], BinOp::Add).unwrap_err();
    assert!(err.is_shape_error());
    assert!(matches!(err, LlllError::Shape { left: 3, right: 2 }));
}

#[test]
fn test_atom_broadcasts_through_nesting() {
    let l = llll![1, llll![2, 3], llll![llll![4]]];
    assert_eq!(l.mul(2).unwrap(), llll![2, llll![4, 6], llll![llll![8]]]);
    assert_eq!(Node::from(100).sub(&l).unwrap(), llll![99, llll![98, 97], llll![llll![96]]]);
}

#[test]
fn test_nested_pairing() {
    let a = llll![llll![1, 2], 3];
    let b = llll![llll![10], llll![20, 30]];
    assert_eq!(a.add(&b).unwrap(), llll![llll![11, 12], llll![23, 33]]);
}

#[test]
fn test_nested_shape_error() {
    let a = llll![llll![1, 2, 3], 4];
    let b = llll![llll![1, 2], 4];
    assert!(a.add(&b).unwrap_err().is_shape_error());
}

#[test]
fn test_empty_lists() {
    assert_eq!(Node::null().add(Node::null()).unwrap(), Node::null());
    assert_eq!(Node::null().add(5).unwrap(), Node::null());
}

// ============================================================================
// Exact Arithmetic
// ============================================================================

#[test]
fn test_exact_division() {
    let result = combine(&llll![1, 2], &llll![3, 5], BinOp::Divide).unwrap();
    assert_eq!(result, llll![rational(1, 3), rational(2, 5)]);
}

#[test]
fn test_integer_valued_results_normalize() {
    assert_eq!(llll![4, 9].div(llll![2, 3]).unwrap(), llll![2, 3]);
    assert_eq!(rational(1, 2).add(rational(1, 2)).unwrap(), Node::from(1));
    assert_eq!(rational(2, 3).mul(3).unwrap(), Node::from(2));
}

#[test]
fn test_mixed_kinds() {
    assert_eq!(rational(1, 3).add(1).unwrap(), rational(4, 3));
    assert_eq!(Node::from(1).sub(rational(1, 4)).unwrap(), rational(3, 4));
}

#[test]
fn test_division_by_zero() {
    assert!(matches!(
        Node::from(1).div(0).unwrap_err(),
        LlllError::DivisionByZero
    ));
    assert!(matches!(
        Node::from(1).rem(0).unwrap_err(),
        LlllError::DivisionByZero
    ));
}

#[test]
fn test_floored_modulo() {
    let test_cases = vec![
        (7, 3, 1),
        (-7, 3, 2),
        (7, -3, -2),
        (-7, -3, -1),
    ];

    for (a, b, expected) in test_cases {
        assert_eq!(
            Node::from(a).rem(b).unwrap(),
            Node::from(expected),
            "Failed for {} % {}",
            a,
            b
        );
    }
    assert_eq!(rational(7, 2).rem(1).unwrap(), rational(1, 2));
}

#[test]
fn test_power() {
    assert_eq!(Node::from(2).pow(10).unwrap(), Node::from(1024));
    assert_eq!(Node::from(2).pow(-2).unwrap(), rational(1, 4));
    assert_eq!(rational(2, 3).pow(2).unwrap(), rational(4, 9));
    assert!(Node::from(2).pow(rational(1, 2)).unwrap_err().is_type_error());
}

#[test]
fn test_power_with_huge_exponents() {
    let huge: num_bigint::BigInt = num_bigint::BigInt::from(1) << 40;
    let test_cases = vec![
        (Node::from(1), huge.clone(), Node::from(1)),
        (Node::from(-1), huge.clone(), Node::from(1)),
        (Node::from(-1), huge.clone() + 1, Node::from(-1)),
        (Node::from(0), huge.clone(), Node::from(0)),
        (Node::from(-1), -(huge.clone() + 1i32), Node::from(-1)),
        (llll![1, -1, 0], huge.clone(), llll![1, 1, 0]),
    ];

    for (base, exponent, expected) in test_cases {
        assert_eq!(
            base.pow(exponent.clone()).unwrap(),
            expected,
            "Failed for {} ** {}",
            base,
            exponent
        );
    }

    assert!(Node::from(2).pow(4_000_000_000i64).unwrap_err().is_type_error());
    assert!(matches!(Node::from(0).pow(-huge).unwrap_err(), LlllError::DivisionByZero));
}

#[test]
fn test_string_concatenation() {
    assert_eq!(
        llll!["C", "D"].add("#").unwrap(),
        llll!["C#", "D#"]
    );
}

#[test]
fn test_kind_mismatch_is_type_error() {
    let test_cases = vec![
        (Node::from("a"), Node::from(1), BinOp::Add),
        (Node::from(true), Node::from(1), BinOp::Multiply),
        (Node::from("a"), Node::from("b"), BinOp::Subtract),
        (Node::from("a"), Node::from(1), BinOp::LessThan),
    ];

    for (a, b, op) in test_cases {
        let err = combine(&a, &b, op).unwrap_err();
        assert!(err.is_type_error(), "Expected type error for {:?} {} {:?}", a, op, b);
    }
}

// ============================================================================
// Comparison
// ============================================================================

#[test]
fn test_ordering_reduces_to_single_boolean() {
    assert_eq!(
        combine(&llll![1, 2, 3], &llll![2, 3, 4], BinOp::LessThan).unwrap(),
        Node::from(true)
    );
    assert_eq!(
        combine(&llll![1, 5, 3], &llll![2, 3, 4], BinOp::LessThan).unwrap(),
        Node::from(false)
    );
}

#[test]
fn test_ordering_methods() {
    let l = llll![1, llll![2, 3]];
    assert!(l.less_than(10).unwrap());
    assert!(l.greater_equal(1).unwrap());
    assert!(!l.greater_than(1).unwrap());
    assert!(l.less_equal(llll![1, 3]).unwrap());
    assert!(llll!["a", "b"].less_than("c").unwrap());
    assert!(Node::from(false).less_than(true).unwrap());
    assert!(rational(1, 3).less_than(rational(1, 2)).unwrap());
}

#[test]
fn test_ordering_still_checks_shape() {
    // the first pair is already false, the shape error further in still surfaces
    let a = llll![5, llll![1, 2, 3]];
    let b = llll![1, llll![1, 2]];
    assert!(a.less_than(b).unwrap_err().is_shape_error());
}

#[test]
fn test_elementwise_equality() {
    assert_eq!(
        llll![1, 2, "a"].elementwise_eq(llll![1, 3, "a"]).unwrap(),
        llll![true, false, true]
    );
    assert_eq!(
        llll![1, 2].elementwise_ne(2).unwrap(),
        llll![true, false]
    );
    // numeric across kinds, unequal across other kinds
    assert_eq!(
        Node::from(2).elementwise_eq(Node::from(Rational::from_integer(2))).unwrap(),
        Node::from(true)
    );
    assert_eq!(Node::from(1).elementwise_eq("1").unwrap(), Node::from(false));
}

#[test]
fn test_inputs_are_not_mutated() {
    let a = llll![1, 2];
    let b = llll![3];
    let _ = a.add(&b).unwrap();
    assert_eq!(a, llll![1, 2]);
    assert_eq!(b, llll![3]);
}

#[test]
fn test_combine_with_parsed_operator() {
    for op in BinOp::ALL {
        assert_eq!(op.symbol().parse::<BinOp>().unwrap(), op);
    }
    let op: BinOp = "%".parse().unwrap();
    assert_eq!(
        llll![5, 6].combine(4, op).unwrap(),
        llll![1, 2]
    );
    assert!("<>".parse::<BinOp>().is_err());
    assert_eq!(Value::from(3).apply(op, &Value::from(2)).unwrap(), Value::from(1));
}
