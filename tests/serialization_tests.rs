// tests/serialization_tests.rs

use llll::{llll, parse_native, parse_text, to_native, to_text, Format, Node, Position, Rational};

fn rational(n: i64, d: i64) -> Node {
    Node::from(Rational::new(n, d).unwrap())
}

fn sample() -> Node {
    llll![
        1,
        rational(-11, 7),
        "tic toc",
        llll![true, llll![], "foo"],
        llll![llll![2, "3"], "x"],
    ]
}

// ============================================================================
// Text Form
// ============================================================================

#[test]
fn test_text_flat_list_on_one_line() {
    assert_eq!(to_text(&llll![1, 2, 3]), "1 2 3");
    assert_eq!(to_text(&llll![1, llll![2, 3]]), "1\n[ 2 3 ]");
}

#[test]
fn test_text_indented_layout() {
    let l = llll![1, llll![llll![2, 3], 4], 5];
    assert_eq!(to_text(&l), "1\n[\n  [ 2 3 ]\n  4\n]\n5");

    let deep = llll![llll![llll![llll![1]]]];
    assert_eq!(to_text(&deep), "[\n  [\n    [ 1 ]\n  ]\n]");
}

#[test]
fn test_text_quotes_only_when_needed() {
    let test_cases = vec![
        (llll!["foo"], "foo"),
        (llll!["C#4"], "C#4"),
        (llll!["tic toc"], "\"tic toc\""),
        (llll![""], "\"\""),
        (llll!["12"], "\"12\""),
        (llll!["1/2"], "\"1/2\""),
        (llll!["2.5"], "\"2.5\""),
        (llll!["true"], "\"true\""),
        (llll!["[a]"], "\"[a]\""),
        (llll!["it's"], "\"it's\""),
        (llll!["line\nbreak"], "\"line\\nbreak\""),
    ];

    for (node, expected) in test_cases {
        assert_eq!(to_text(&node), expected, "Failed for {:?}", node);
    }
}

#[test]
fn test_text_atoms() {
    assert_eq!(to_text(&llll![rational(1, 3), false]), "1/3 false");
    assert_eq!(to_text(&Node::from(Rational::from_integer(2))), "2/1");
    assert_eq!(to_text(&llll![llll![]]), "[]");
    assert_eq!(to_text(&Node::null()), "");
}

#[test]
fn test_parse_text() {
    let l = parse_text("1 -11/7 'tic toc'\n[ true [] foo ]\n[\n  [ 2 \"3\" ]\n  x\n]").unwrap();
    assert_eq!(l, sample());
}

#[test]
fn test_parse_text_decimal_is_exact() {
    assert_eq!(parse_text("2.312").unwrap(), llll![rational(2312, 1000)]);
    assert_eq!(parse_text("-0.5 2.0").unwrap(), llll![rational(-1, 2), 2]);
}

#[test]
fn test_parse_text_long_decimals() {
    let ten = num_bigint::BigInt::from(10);
    let l = parse_text("1e30 1e-40 123456789012345678901234567890.5").unwrap();
    assert_eq!(
        l,
        llll![
            ten.pow(30u32),
            Rational::new(1, ten.pow(40u32)).unwrap(),
            Rational::new("246913578024691357802469135781".parse::<num_bigint::BigInt>().unwrap(), 2)
                .unwrap(),
        ]
    );
    assert_eq!(parse_text(&to_text(&l)).unwrap(), l);
}

#[test]
fn test_parse_text_atomic_document_is_list() {
    assert_eq!(parse_text("5").unwrap(), llll![5]);
    assert_eq!(parse_text("").unwrap(), Node::null());
}

#[test]
fn test_text_round_trip() {
    let l = sample();
    assert_eq!(parse_text(&to_text(&l)).unwrap(), l);

    let tricky = llll!["", "a\"b", "back\\slash", "tab\there", "\u{1}", "[", "1e5", "-"];
    assert_eq!(parse_text(&to_text(&tricky)).unwrap(), tricky);
}

#[test]
fn test_control_characters_use_brace_escapes() {
    let l = llll!["bell\u{7}", "\u{1b}[0m"];
    assert_eq!(to_native(&l), r#"[ "bell\u{7}" "\u{1b}[0m" ]"#);
    assert_eq!(parse_native(&to_native(&l)).unwrap(), l);
    assert_eq!(parse_text(&to_text(&l)).unwrap(), l);
}

#[test]
fn test_text_errors_report_position() {
    let test_cases = vec![
        ("1 [ 2", Position { line: 1, column: 3 }),
        ("1\n2 ]", Position { line: 2, column: 3 }),
        ("[ 'open", Position { line: 1, column: 3 }),
        ("4/0", Position { line: 1, column: 1 }),
    ];

    for (input, position) in test_cases {
        let err = parse_text(input).unwrap_err();
        assert!(err.is_format_error(), "Expected format error for {:?}", input);
        assert_eq!(err.position(), Some(position), "Wrong position for {:?}", input);
    }
}

// ============================================================================
// Native Form
// ============================================================================

#[test]
fn test_native_layout() {
    assert_eq!(
        to_native(&sample()),
        "[ 1 -11/7 \"tic toc\" [ true [] \"foo\" ] [ [ 2 \"3\" ] \"x\" ] ]"
    );
    assert_eq!(to_native(&Node::from("a")), "\"a\"");
    assert_eq!(to_native(&Node::null()), "[]");
}

#[test]
fn test_native_round_trip() {
    let test_cases = vec![
        sample(),
        Node::null(),
        Node::from(7),
        Node::from(Rational::from_integer(2)),
        llll![llll![llll![]]],
    ];

    for node in test_cases {
        assert_eq!(parse_native(&to_native(&node)).unwrap(), node, "Failed for {:?}", node);
    }
}

#[test]
fn test_native_keeps_rational_kind() {
    let whole = Node::from(Rational::from_integer(2));
    let back = parse_native(&to_native(&whole)).unwrap();
    assert!(back.equals(&whole));
    assert!(!back.equals(&Node::from(2)));
}

#[test]
fn test_native_is_strict() {
    let test_cases = vec![
        "[ foo ]",
        "[ 2.5 ]",
        "[ 1 ] [ 2 ]",
        "[ 1",
        "]",
    ];

    for input in test_cases {
        assert!(
            parse_native(input).unwrap_err().is_format_error(),
            "Expected format error for {:?}",
            input
        );
    }
}

#[test]
fn test_native_empty_document() {
    assert_eq!(parse_native("  \n").unwrap(), Node::null());
}

#[test]
fn test_bach_container() {
    let quarter = 0.25f64.to_bits();
    let input = format!(
        r#"{{
            "data_count": [1],
            "data_0000000000": [
                "foo", 3, "[", "[", 1, 2, "]", "_x_x_x_x_bach_float64_x_x_x_x_", {}, {}, "]", true
            ]
        }}"#,
        quarter & 0xffff_ffff,
        quarter >> 32
    );
    assert_eq!(
        parse_native(&input).unwrap(),
        llll!["foo", 3, llll![llll![1, 2], rational(1, 4)], true]
    );
}

#[test]
fn test_bach_container_errors() {
    let test_cases = vec![
        r#"{"data_count": [1], "data_0000000000": ["]"]}"#,
        r#"{"data_count": [1], "data_0000000000": ["_x_x_x_x_bach_float64_x_x_x_x_", 1]}"#,
        r#"{"data_0000000000": [1]}"#,
        r#"{"data_count": [1], "data_0000000000": [null]}"#,
        r#"{"data_count": "#,
    ];

    for input in test_cases {
        assert!(
            parse_native(input).unwrap_err().is_format_error(),
            "Expected format error for {}",
            input
        );
    }
}

#[test]
fn test_bach_container_missing_chunk() {
    let input = r#"{"data_count": [2], "data_0000000000": [1, 2]}"#;
    assert_eq!(parse_native(input).unwrap(), llll![1, 2]);
}

#[test]
fn test_bach_container_oversized_count() {
    let test_cases = vec![
        (r#"{"data_count": [1000000000000000000], "data_0000000000": [1]}"#, llll![1]),
        (r#"{"data_count": [18446744073709551615], "data_0000000000": [1, "[", 2, "]"]}"#, llll![1, llll![2]]),
        (r#"{"data_count": [3], "data_0000000002": [5], "data_0000000000": [4]}"#, llll![4, 5]),
        (r#"{"data_count": [1], "data_0000000000": [1], "data_0000000001": [2]}"#, llll![1]),
    ];

    for (input, expected) in test_cases {
        assert_eq!(parse_native(input).unwrap(), expected, "Failed for input: {}", input);
    }
}

// ============================================================================
// Format
// ============================================================================

#[test]
fn test_format_dispatch() {
    let l = sample();
    for format in [Format::Text, Format::Native] {
        assert_eq!(format.parse(&format.render(&l)).unwrap(), l, "Failed for {}", format);
    }
    assert_eq!(Format::Native.extension(), "llll");
}
