//! Tests for path queries and typed accessors

use rstest::rstest;

use nestconf::{parse_str, BoolTokens, Node, QueryPath};

fn doc() -> Node {
    parse_str(
        "\
Name app
Empty \"\"
Listen {
    Port 80
}
Listen tls {
    Port 443
    Cert \"/etc/ssl/app.pem\"
}
Group a {
    Member x
}
Group b {
    Member y
    Member z
}
Ratio 0.25
Flag T
Wrong notabool
",
    )
    .unwrap()
}

#[rstest]
#[case::plain_name("Name", Some("app"))]
#[case::first_section_wins("Listen/Port", Some("80"))]
#[case::value_condition("Listen:tls/Port", Some("443"))]
#[case::wildcard("Listen:*/Port", Some("80"))]
#[case::empty_condition_matches_empty_value("Listen:/Port", Some("80"))]
#[case::empty_condition_on_leaf("Empty:", Some(""))]
#[case::condition_on_leaf("Name:app", Some("app"))]
#[case::condition_mismatch("Name:other", None)]
#[case::unknown_name("Missing", None)]
#[case::too_deep("Name/Child", None)]
#[case::section_value("Listen:tls", Some("tls"))]
fn given_document_when_querying_string_then_resolves(
    #[case] path: &str,
    #[case] expected: Option<&str>,
) {
    assert_eq!(doc().string(path), expected);
}

#[test]
fn given_first_candidate_lacks_child_when_querying_then_backtracks_to_sibling() {
    let root = doc();

    // `Listen` (no value) has no `Cert`; the second `Listen` does
    assert_eq!(root.string("Listen/Cert"), Some("/etc/ssl/app.pem"));
}

#[test]
fn given_repeated_names_when_query_all_then_document_order_across_sections() {
    let root = doc();

    let members: Vec<_> = root
        .query_all("Group/Member")
        .iter()
        .map(|n| n.value())
        .collect();

    assert_eq!(members, vec!["x", "y", "z"]);
    assert!(root.query_all("Group:c/Member").is_empty());
}

#[test]
fn given_typed_accessors_when_value_parses_then_some() {
    let root = doc();

    assert_eq!(root.integer("Listen:tls/Port"), Some(443));
    assert_eq!(root.float("Ratio"), Some(0.25));
    assert_eq!(root.boolean("Flag"), Some(true));
}

#[test]
fn given_typed_accessors_when_value_does_not_parse_then_none() {
    let root = doc();

    assert_eq!(root.boolean("Wrong"), None);
    assert_eq!(root.integer("Name"), None);
    assert_eq!(root.float("Flag"), None);
    assert_eq!(root.integer("Ratio"), None);
}

#[test]
fn given_or_accessors_when_missing_or_unparsable_then_default() {
    let root = doc();

    assert_eq!(root.string_or("Missing", "fallback"), "fallback");
    assert_eq!(root.string_or("Name", "fallback"), "app");
    assert!(root.boolean_or("Wrong", true));
    assert_eq!(root.integer_or("Name", -1), -1);
    assert_eq!(root.integer_or("Listen/Port", -1), 80);
    assert_eq!(root.float_or("Missing", 1.5), 1.5);
}

#[test]
fn given_custom_bool_tokens_when_querying_then_uses_them() {
    let root = parse_str("Enabled yes\nDisabled off\n").unwrap();
    let tokens = BoolTokens {
        truthy: vec!["yes".into(), "on".into()],
        falsy: vec!["no".into(), "off".into()],
    };

    assert_eq!(root.boolean_with("Enabled", &tokens), Some(true));
    assert_eq!(root.boolean_with("Disabled", &tokens), Some(false));
    assert_eq!(root.boolean("Enabled"), None);
}

#[test]
fn given_path_with_colons_when_parsing_then_splits_at_first_colon_only() {
    let root = parse_str("Host \"db:5432\"\n").unwrap();

    let path = QueryPath::parse("Host:db:5432");

    assert_eq!(path.segments().len(), 1);
    assert_eq!(root.string("Host:db:5432"), Some("db:5432"));
}

#[test]
fn given_empty_tree_when_querying_then_none() {
    let root = parse_str("").unwrap();

    assert!(root.query("Anything").is_none());
    assert!(root.query_all("Anything").is_empty());
}
