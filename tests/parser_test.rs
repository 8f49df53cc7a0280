//! Tests for the byte-level parser state machine

use rstest::rstest;

use nestconf::util::testing;
use nestconf::{
    parse_bytes, parse_reader, parse_str, render, ApplicationError, Node, MAX_NESTING,
};

fn parse_ok(text: &str) -> Node {
    testing::init_test_setup();
    parse_str(text).unwrap_or_else(|e| panic!("parse failed: {e}\n{text}"))
}

#[test]
fn given_indented_flat_document_when_parsing_then_reads_typed_values() {
    // Arrange
    let text = "
\t\tBoolValue T
\t\tFloatValue 3.14
\t\tIntValue 123
\t\tStringValue \"Test String 123\"
\t";

    // Act
    let cfg = parse_ok(text);

    // Assert
    assert_eq!(cfg.boolean("BoolValue"), Some(true));
    assert_eq!(cfg.float("FloatValue"), Some(3.14));
    assert_eq!(cfg.integer("IntValue"), Some(123));
    assert_eq!(cfg.string("StringValue"), Some("Test String 123"));
}

#[test]
fn given_sections_with_values_when_parsing_then_header_value_kept() {
    let cfg = parse_ok(
        "Section One {\n    Port 1\n}\nSection \"Two words\" {\n    Port 2\n}\nSection {\n    Port 3\n}\n",
    );

    let values: Vec<_> = cfg.query_all("Section").iter().map(|n| n.value()).collect();
    assert_eq!(values, vec!["One", "Two words", ""]);
    assert_eq!(cfg.integer("Section:Two words/Port"), Some(2));
    assert!(cfg.query("Section").unwrap().is_section());
}

#[test]
fn given_comments_everywhere_when_parsing_then_ignored() {
    let cfg = parse_ok(
        "# header\nA 1 # trailing\nB # name only\nC \"x\" # quoted\nS { # open\n  # inside\n  D 4\n}\n",
    );

    assert_eq!(cfg.string("A"), Some("1"));
    assert_eq!(cfg.string("B"), Some(""));
    assert_eq!(cfg.string("C"), Some("x"));
    assert_eq!(cfg.integer("S/D"), Some(4));
    assert_eq!(cfg.children().len(), 4);
}

#[test]
fn given_name_only_directive_when_parsing_then_empty_leaf() {
    let cfg = parse_ok("Flag \nOther 1\n");

    let flag = cfg.query("Flag").unwrap();
    assert!(flag.is_leaf());
    assert_eq!(flag.value(), "");
}

#[test]
fn given_crlf_line_endings_when_parsing_then_same_as_lf() {
    let cfg = parse_ok("A 1\r\nS x {\r\n  B \"two\"\r\n}\r\n");

    assert_eq!(cfg.integer("A"), Some(1));
    assert_eq!(cfg.string("S:x/B"), Some("two"));
}

#[test]
fn given_empty_or_blank_input_when_parsing_then_empty_root() {
    for text in ["", "\n\n", "  \t \r\n", "# only a comment\n"] {
        let cfg = parse_ok(text);
        assert!(cfg.children().is_empty(), "{text:?}");
        assert!(cfg.is_section());
    }
}

#[test]
fn given_closing_brace_at_end_of_input_when_parsing_then_succeeds() {
    let cfg = parse_ok("Outer {\n    Inner {\n        Leaf 1\n    }\n}");

    assert_eq!(cfg.integer("Outer/Inner/Leaf"), Some(1));
}

#[test]
fn given_quoted_value_with_escaped_quote_when_parsing_then_unescaped() {
    let cfg = parse_ok("Greeting \"Say \\\"hi\\\"\"\n");

    assert_eq!(cfg.string("Greeting"), Some("Say \"hi\""));
}

#[test]
fn given_quoted_value_spanning_lines_when_parsing_then_newline_kept() {
    let cfg = parse_ok("Text \"a\nb\"\nNext 2\n");

    assert_eq!(cfg.string("Text"), Some("a\nb"));
    assert_eq!(cfg.integer("Next"), Some(2));
}

#[test]
fn given_utf8_in_quotes_when_parsing_then_preserved() {
    let cfg = parse_ok("City \"Zürich\"\n");

    assert_eq!(cfg.string("City"), Some("Zürich"));
}

fn nested(depth: usize) -> String {
    let mut text = "S {\n".repeat(depth);
    text.push_str("Leaf 1\n");
    text.push_str(&"}\n".repeat(depth));
    text
}

#[test]
fn given_nesting_at_limit_when_parsing_then_tree_walkable_and_droppable() {
    // Arrange
    let text = nested(MAX_NESTING);

    // Act
    let cfg = parse_ok(&text);

    // Assert
    assert_eq!(cfg.depth(), MAX_NESTING + 2);
    let leaf_path = format!("{}Leaf", "S/".repeat(MAX_NESTING));
    assert_eq!(cfg.integer(&leaf_path), Some(1));
    let rendered = render(&cfg, 1).unwrap();
    assert_eq!(parse_str(&rendered).unwrap(), cfg);
    drop(cfg);
}

#[test]
fn given_nesting_at_limit_when_rendering_with_wide_indent_then_deepest_line_indented() {
    let cfg = parse_ok(&nested(MAX_NESTING));
    let indent = 130;

    let rendered = render(&cfg, indent).unwrap();

    let leaf = rendered.lines().find(|l| l.ends_with("Leaf 1")).unwrap();
    assert_eq!(leaf.len(), MAX_NESTING * indent + "Leaf 1".len());
}

#[test]
fn given_nesting_far_beyond_limit_when_parsing_then_structural_error() {
    let text = nested(100_000);

    let err = parse_str(&text).unwrap_err();

    match err {
        ApplicationError::NestingTooDeep {
            line,
            column,
            limit,
        } => {
            assert_eq!(limit, MAX_NESTING);
            assert_eq!(line as usize, MAX_NESTING + 1);
            assert_eq!(column, 3);
        }
        other => panic!("expected nesting error, got {other:?}"),
    }
}

#[test]
fn given_nesting_one_past_limit_when_parsing_then_rejected() {
    let err = parse_str(&nested(MAX_NESTING + 1)).unwrap_err();

    assert!(err.is_syntax());
    assert!(matches!(err, ApplicationError::NestingTooDeep { .. }));
}

#[test]
fn given_reader_when_parsing_then_same_tree_as_bytes() {
    let text = b"A 1\nS {\n  B 2\n}\n";

    let from_reader = parse_reader(&text[..]).unwrap();
    let from_bytes = parse_bytes(text).unwrap();

    assert_eq!(from_reader, from_bytes);
}

#[rstest]
#[case::bad_directive_start("1abc 2\n", 1, 1, b'1')]
#[case::dash_in_name("good 1\nbad-name 2\n", 2, 4, b'-')]
#[case::newline_after_name("Name\n", 1, 5, b'\n')]
#[case::brace_after_name("Name{\n}\n", 1, 5, b'{')]
#[case::quote_inside_unquoted_value("A ab\"c\n", 1, 5, b'"')]
#[case::comment_glued_to_value("A 1#x\n", 1, 4, b'#')]
#[case::second_value("A one two\n", 1, 7, b't')]
#[case::bad_value_start("A *\n", 1, 3, b'*')]
#[case::brace_glued_to_value("S x{\n}\n", 1, 4, b'{')]
fn given_unexpected_character_when_parsing_then_syntax_error_with_position(
    #[case] text: &str,
    #[case] line: u32,
    #[case] column: u32,
    #[case] found: u8,
) {
    let err = parse_str(text).unwrap_err();

    match err {
        ApplicationError::Syntax {
            line: l,
            column: c,
            found: f,
            ..
        } => {
            assert_eq!((l, c, f), (line, column, found), "{text:?}");
        }
        other => panic!("expected syntax error for {text:?}, got {other:?}"),
    }
}

#[rstest]
#[case::unterminated_unquoted_value("A 1")]
#[case::unterminated_quoted_value("A \"abc")]
#[case::dangling_escape("A \"abc\\")]
#[case::name_only("Name")]
#[case::after_quoted_value("A \"x\"")]
#[case::comment_without_newline("# tail")]
#[case::unclosed_section("S {\n  A 1\n")]
fn given_truncated_input_when_parsing_then_unexpected_eof(#[case] text: &str) {
    let err = parse_str(text).unwrap_err();

    assert!(
        matches!(err, ApplicationError::UnexpectedEof { .. }),
        "{text:?}: {err:?}"
    );
    assert!(err.is_syntax());
}

#[test]
fn given_unclosed_section_when_parsing_then_reason_names_depth() {
    let err = parse_str("A {\nB {\n}\n").unwrap_err();

    assert_eq!(
        err.to_string(),
        "unexpected end of input on line 4 at column 1: 1 unclosed section(s)"
    );
}

#[test]
fn given_unmatched_close_when_parsing_then_error_instead_of_truncation() {
    let err = parse_str("A 1\n}\nB 2\n").unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::UnmatchedClose { line: 2, column: 1 }
    ));
    assert_eq!(err.position(), Some((2, 1)));
}

#[test]
fn given_syntax_error_when_displayed_then_mentions_line_and_column() {
    let err = parse_str("A 1\n  B ~\n").unwrap_err();

    assert_eq!(
        err.to_string(),
        "unexpected character '~' on line 2 at column 5 in value"
    );
}
