//! Integration tests for template parsing.

use std::sync::Arc;
use std::thread;

use lineloc::parser::parse_template;
use lineloc::types::{MalformedReason, Part};
use lineloc::{Expression, FormatStatus, Template};

fn texts(template: &Template) -> Vec<String> {
    template
        .parts()
        .iter()
        .map(|part| match part {
            Part::Text(t) => format!("T({})", t.text),
            Part::Placeholder(p) => format!("P({})", p.expression),
        })
        .collect()
}

// =============================================================================
// Literal text
// =============================================================================

#[test]
fn test_pure_literal() {
    let t = parse_template(Some("Hello, world!"));
    assert_eq!(texts(&t), vec!["T(Hello, world!)"]);
    assert!(t.placeholders().is_empty());
    assert_eq!(t.status().format(), FormatStatus::Ok);
}

#[test]
fn test_empty_string() {
    let t = parse_template(Some(""));
    assert!(t.parts().is_empty());
    assert!(t.placeholders().is_empty());
    assert_eq!(t.status().format(), FormatStatus::Ok);
}

#[test]
fn test_null_template() {
    let t = parse_template(None);
    assert!(t.is_null());
    assert!(t.parts().is_empty());
    assert_eq!(t.status().format(), FormatStatus::FailedNull);
}

#[test]
fn test_literal_round_trip() {
    for text in ["plain", "multi\nline", "ünïcödé ✓", "a}b"] {
        let t = parse_template(Some(text));
        let rebuilt: String = t
            .parts()
            .iter()
            .filter_map(Part::as_text)
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(rebuilt, text);
        assert_eq!(t.parts().len(), 1);
    }
}

#[test]
fn test_stray_closing_brace_is_literal() {
    let t = parse_template(Some("a}b"));
    assert_eq!(texts(&t), vec!["T(a}b)"]);
    assert_eq!(t.status().format(), FormatStatus::Ok);
}

// =============================================================================
// Escapes
// =============================================================================

#[test]
fn test_escaped_braces() {
    let t = parse_template(Some(r"\{0\}"));
    assert_eq!(texts(&t), vec!["T({0})"]);
    assert!(t.placeholders().is_empty());
    assert_eq!(t.status().format(), FormatStatus::Ok);
}

#[test]
fn test_escaped_backslash() {
    let t = parse_template(Some(r"a\\b"));
    assert_eq!(texts(&t), vec![r"T(a\b)"]);
}

#[test]
fn test_trailing_backslash_is_kept() {
    let t = parse_template(Some(r"end\"));
    assert_eq!(texts(&t), vec![r"T(end\)"]);
}

// =============================================================================
// Placeholders
// =============================================================================

#[test]
fn test_simple_placeholder() {
    let t = parse_template(Some("Hello, {0}!"));
    assert_eq!(texts(&t), vec!["T(Hello, )", "P(#0)", "T(!)"]);
    let placeholder = t.placeholders()[0];
    assert_eq!(placeholder.position, 7);
    assert_eq!(placeholder.length, 3);
    assert_eq!(placeholder.expression, Expression::argument(0));
}

#[test]
fn test_placeholder_order_is_occurrence_order() {
    let t = parse_template(Some("{1} and {0}"));
    let placeholders = t.placeholders();
    assert_eq!(placeholders.len(), 2);
    assert_eq!(placeholders[0].expression.argument_index(), Some(1));
    assert_eq!(placeholders[0].placeholder_index, 0);
    assert_eq!(placeholders[1].expression.argument_index(), Some(0));
    assert_eq!(placeholders[1].placeholder_index, 1);
}

#[test]
fn test_format_spec() {
    let t = parse_template(Some("{0:N0}"));
    insta::assert_snapshot!(t.placeholders()[0].expression, @r#"Format(#0, "N0")"#);
}

#[test]
fn test_alignment() {
    let t = parse_template(Some("{0,-5}"));
    insta::assert_snapshot!(t.placeholders()[0].expression, @"Alignment(#0, -5)");
}

#[test]
fn test_alignment_and_format() {
    let t = parse_template(Some("{0,5:F2}"));
    insta::assert_snapshot!(t.placeholders()[0].expression, @r#"Alignment(Format(#0, "F2"), 5)"#);
}

#[test]
fn test_zero_alignment_is_dropped() {
    let t = parse_template(Some("{0,0}"));
    assert_eq!(t.placeholders()[0].expression, Expression::argument(0));
}

#[test]
fn test_format_spec_keeps_colons() {
    let t = parse_template(Some("{0:HH:mm}"));
    insta::assert_snapshot!(t.placeholders()[0].expression, @r#"Format(#0, "HH:mm")"#);
}

#[test]
fn test_plural_category() {
    let t = parse_template(Some("You have {0:N0} item{plural:0}"));
    assert_eq!(
        texts(&t),
        vec![
            "T(You have )",
            r#"P(Format(#0, "N0"))"#,
            "T( item)",
            "P(#0)",
        ]
    );
    let placeholders = t.placeholders();
    assert_eq!(placeholders[0].plural_category, None);
    assert_eq!(placeholders[1].plural_category.as_deref(), Some("plural"));
    assert!(t.has_plural_placeholders());
}

#[test]
fn test_part_indexes_match_positions() {
    let t = parse_template(Some("a{0}b{1}c"));
    for (i, part) in t.parts().iter().enumerate() {
        assert_eq!(part.part_index(), i);
    }
    assert_eq!(t.parts().len(), 5);
}

#[test]
fn test_no_adjacent_text_parts() {
    let t = parse_template(Some(r"a\{b{x}c{0}d"));
    let parts = t.parts();
    for pair in parts.windows(2) {
        assert!(!(pair[0].as_text().is_some() && pair[1].as_text().is_some()));
    }
}

// =============================================================================
// Malformed placeholders
// =============================================================================

#[test]
fn test_unterminated_category() {
    let t = parse_template(Some("{abc"));
    assert_eq!(t.status().format(), FormatStatus::ErrorMalformed);
    assert_eq!(texts(&t), vec!["T({abc)"]);
    assert_eq!(t.malformed()[0].reason, MalformedReason::Unterminated);
}

#[test]
fn test_unexpected_character_in_index() {
    let t = parse_template(Some("a{0x}b"));
    assert_eq!(texts(&t), vec!["T(a{0x}b)"]);
    assert_eq!(t.status().format(), FormatStatus::ErrorMalformed);
    let malformed = &t.malformed()[0];
    assert_eq!(malformed.position, 1);
    assert_eq!(malformed.reason, MalformedReason::UnexpectedCharacter('x'));
}

#[test]
fn test_empty_placeholder() {
    let t = parse_template(Some("{}"));
    assert_eq!(texts(&t), vec!["T({})"]);
    assert_eq!(t.malformed()[0].reason, MalformedReason::EmptyPlaceholder);
}

#[test]
fn test_bad_alignment() {
    let t = parse_template(Some("{0,x}"));
    assert_eq!(t.status().format(), FormatStatus::ErrorMalformed);
    assert!(t.placeholders().is_empty());
}

#[test]
fn test_malformed_does_not_hide_later_placeholders() {
    let t = parse_template(Some("{a b} {0}"));
    assert_eq!(t.status().format(), FormatStatus::ErrorMalformed);
    assert_eq!(t.placeholders().len(), 1);
    assert_eq!(t.placeholders()[0].placeholder_index, 0);
}

#[test]
fn test_unterminated_placeholder_is_salvaged() {
    let t = parse_template(Some("Total {0"));
    assert_eq!(t.status().format(), FormatStatus::ErrorMalformed);
    assert_eq!(t.placeholders().len(), 1);
    assert_eq!(t.malformed()[0].reason, MalformedReason::Unterminated);
}

#[test]
fn test_malformed_inputs_never_panic() {
    for text in ["{", "}", "{{", "{0", "{0,", "{0:", "{:0}", "{x:}", r"{0\", "{99999999999999999999999}"] {
        let t = parse_template(Some(text));
        assert!(!t.parts().is_empty(), "no parts for {text:?}");
    }
}

// =============================================================================
// Lazy parsing
// =============================================================================

#[test]
fn test_concurrent_first_access_converges() {
    let template = Arc::new(Template::new("x {0} y {plural:1} z"));
    let counts: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let template = Arc::clone(&template);
                scope.spawn(move || template.parts().len())
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("thread panicked"))
            .collect()
    });
    assert!(counts.iter().all(|&c| c == 5));
}
