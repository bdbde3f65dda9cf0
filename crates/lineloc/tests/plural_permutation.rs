//! Integration tests for plural case permutation order.

use lineloc::PluralCase;
use lineloc::interpreter::plural_permutations;

fn candidates(lists: &[&[&str]]) -> Vec<Vec<PluralCase>> {
    lists
        .iter()
        .map(|cases| cases.iter().map(|c| PluralCase::new(*c)).collect())
        .collect()
}

fn render(candidates: &[Vec<PluralCase>]) -> Vec<String> {
    plural_permutations(candidates)
        .iter()
        .map(|permutation| {
            permutation
                .iter()
                .map(|(ordinal, case)| format!("{ordinal}:{case}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

#[test]
fn test_single_placeholder() {
    let c = candidates(&[&["one", "other"]]);
    assert_eq!(render(&c), vec!["0:one", "0:other"]);
}

#[test]
fn test_most_specific_first() {
    let c = candidates(&[&["one"], &["one"]]);
    assert_eq!(render(&c), vec!["0:one 1:one", "0:one", "1:one"]);
}

#[test]
fn test_cross_product_order() {
    let c = candidates(&[&["one", "other"], &["few", "other"]]);
    assert_eq!(
        render(&c),
        vec![
            "0:one 1:few",
            "0:one 1:other",
            "0:other 1:few",
            "0:other 1:other",
            "0:one",
            "0:other",
            "1:few",
            "1:other",
        ]
    );
}

#[test]
fn test_three_placeholders_subset_order() {
    let c = candidates(&[&["a"], &["b"], &["c"]]);
    assert_eq!(
        render(&c),
        vec!["0:a 1:b 2:c", "0:a 1:b", "0:a 2:c", "1:b 2:c", "0:a", "1:b", "2:c"]
    );
}

#[test]
fn test_empty_candidates_skip_their_subsets() {
    let c = candidates(&[&["one"], &[]]);
    assert_eq!(render(&c), vec!["0:one"]);
}

#[test]
fn test_no_placeholders() {
    assert!(plural_permutations(&[]).is_empty());
}
