//! Integration tests for line keys.

use lineloc::{Line, LineKey, LocaleId, ParseError, PluralCase};

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_parse_simple_key() {
    let key = LineKey::parse("Key:hello").unwrap();
    assert_eq!(key.parameter("Key"), Some("hello"));
    assert_eq!(key.culture(), None);
}

#[test]
fn test_culture_is_moved_first() {
    let key: LineKey = "Type:Inventory:Key:items:Culture:en".parse().unwrap();
    assert_eq!(key.culture(), Some(&LocaleId::new("en")));
    insta::assert_snapshot!(key, @"Culture:en:Type:Inventory:Key:items");
}

#[test]
fn test_empty_key() {
    let key = LineKey::parse("").unwrap();
    assert!(key.is_empty());
    assert_eq!(key.to_string(), "");
}

#[test]
fn test_escaped_separator() {
    let key = LineKey::parse(r"Key:a\:b").unwrap();
    assert_eq!(key.parameter("Key"), Some("a:b"));
    assert_eq!(key.to_string(), r"Key:a\:b");
}

#[test]
fn test_dangling_parameter() {
    assert_eq!(
        LineKey::parse("Culture:en:Key"),
        Err(ParseError::DanglingParameter {
            name: "Key".to_string()
        })
    );
}

#[test]
fn test_empty_name() {
    assert_eq!(
        LineKey::parse("Key:a::b"),
        Err(ParseError::EmptyName { column: 7 })
    );
}

#[test]
fn test_trailing_escape_is_a_syntax_error() {
    let err = LineKey::parse(r"Key:a\").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { column: 6, .. }));
}

#[test]
fn test_root_culture_is_dropped() {
    let key = LineKey::parse("Culture::Key:x").unwrap();
    assert_eq!(key.culture(), None);
    assert_eq!(key.to_string(), "Key:x");
}

// =============================================================================
// Derived keys
// =============================================================================

#[test]
fn test_with_culture() {
    let key = LineKey::parse("Key:x").unwrap();
    assert_eq!(key.with_culture(&LocaleId::new("fi")).to_string(), "Culture:fi:Key:x");
    assert_eq!(key.with_culture(&LocaleId::root()), key);
}

#[test]
fn test_join() {
    let key = LineKey::parse("Culture:en:Key:x").unwrap();
    let joined = key.join(&LineKey::parse("Culture:fi:N:one").unwrap());
    assert_eq!(joined.to_string(), "Culture:fi:Key:x:N:one");
}

#[test]
fn test_plural_qualifiers() {
    let key = LineKey::parse("Culture:en:Key:x").unwrap();
    let one = PluralCase::new("one");
    let few = PluralCase::new("few");
    let qualified = key.with_plural_cases(&[(0, &one), (2, &few)]);
    assert_eq!(qualified.to_string(), "Culture:en:Key:x:N:one:N2:few");
}

#[test]
fn test_id_is_stable_across_parameter_spelling() {
    let a = LineKey::parse("Key:a:Culture:en").unwrap();
    let b = LineKey::parse("Culture:en:Key:a").unwrap();
    assert_eq!(a.id(), b.id());
    assert_ne!(a.id(), LineKey::parse("Culture:en:Key:b").unwrap().id());
}

// =============================================================================
// Lines
// =============================================================================

#[test]
fn test_line_key_from_chain() {
    let line = Line::root()
        .parameter("Type", "Inventory")
        .culture("en")
        .key("items");
    assert_eq!(line.line_key().to_string(), "Culture:en:Type:Inventory:Key:items");
}

#[test]
fn test_nearest_culture_wins() {
    let line = Line::root().culture("en").key("x").culture("fi");
    assert_eq!(line.line_key().culture(), Some(&LocaleId::new("fi")));
}

#[test]
fn test_culture_parameter_becomes_culture_node() {
    let line = Line::root().parameter("Culture", "sv");
    assert_eq!(line.as_culture(), Some(&LocaleId::new("sv")));
    assert_eq!(line.as_parameter(), None);
}

#[test]
fn test_from_key_round_trip() {
    let key = LineKey::parse("Culture:en:Type:A:Key:b").unwrap();
    assert_eq!(Line::from_key(&key).line_key(), key);
}

#[test]
fn test_capability_views() {
    let line = Line::root().key("x");
    assert_eq!(line.as_parameter(), Some(("Key", "x")));
    assert!(line.as_value().is_none());
    let valued = line.value("text");
    assert_eq!(valued.as_value().and_then(|t| t.text()), Some("text"));
    assert_eq!(valued.parent().and_then(Line::as_parameter), Some(("Key", "x")));
}

#[test]
fn test_template_requires_no_later_parameter() {
    let line = Line::root().value("fallback").key("x");
    assert!(line.template().is_none());
    let line = Line::root().key("x").value("own");
    assert_eq!(line.template().and_then(|t| t.text().map(str::to_string)), Some("own".to_string()));
}

#[test]
fn test_ancestry_ends_at_root() {
    let line = Line::root().key("a").key("b");
    assert_eq!(line.ancestry().count(), 3);
    assert_eq!(line.ancestry().last().map(|l| l.part().kind()), Some("root"));
}
