//! Plural case permutations.
//!
//! Given the candidate cases of each plural placeholder, enumerate the
//! qualifier combinations to query, most specific first: every placeholder
//! fixed, then every subset of one fewer placeholder, down to single
//! placeholders. The unqualified key is not included; it is the fallback.

use crate::types::PluralCase;

/// One qualifier combination: `(plural placeholder ordinal, case)` pairs in
/// ordinal order.
pub type Permutation<'a> = Vec<(usize, &'a PluralCase)>;

/// Enumerate qualifier combinations for `candidates[ordinal]`.
///
/// Subsets are ordered by size (largest first), then lexicographically by
/// ordinal. Within a subset, cases vary in each placeholder's candidate order
/// with the last placeholder varying fastest.
///
/// # Example
///
/// ```
/// use lineloc::interpreter::plural_permutations;
/// use lineloc::PluralCase;
///
/// let candidates = vec![
///     vec![PluralCase::new("one"), PluralCase::new("other")],
///     vec![PluralCase::new("one")],
/// ];
/// let keys: Vec<String> = plural_permutations(&candidates)
///     .iter()
///     .map(|p| p.iter().map(|(i, c)| format!("{i}={c}")).collect::<Vec<_>>().join(","))
///     .collect();
/// assert_eq!(
///     keys,
///     ["0=one,1=one", "0=other,1=one", "0=one", "0=other", "1=one"],
/// );
/// ```
pub fn plural_permutations(candidates: &[Vec<PluralCase>]) -> Vec<Permutation<'_>> {
    let mut permutations = Vec::new();
    for size in (1..=candidates.len()).rev() {
        for subset in combinations(candidates.len(), size) {
            cross_product(candidates, &subset, &mut permutations);
        }
    }
    permutations
}

/// All `k`-element subsets of `0..n` in lexicographic order.
fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut result = Vec::new();
    if k == 0 || k > n {
        return result;
    }
    let mut indices: Vec<usize> = (0..k).collect();
    loop {
        result.push(indices.clone());
        // Rightmost index that can still move forward.
        let Some(i) = (0..k).rev().find(|&i| indices[i] < n - k + i) else {
            return result;
        };
        indices[i] += 1;
        for j in i + 1..k {
            indices[j] = indices[j - 1] + 1;
        }
    }
}

fn cross_product<'a>(
    candidates: &'a [Vec<PluralCase>],
    subset: &[usize],
    out: &mut Vec<Permutation<'a>>,
) {
    if subset.iter().any(|&i| candidates[i].is_empty()) {
        return;
    }
    let mut positions = vec![0_usize; subset.len()];
    loop {
        out.push(
            subset
                .iter()
                .zip(&positions)
                .map(|(&ordinal, &position)| (ordinal, &candidates[ordinal][position]))
                .collect(),
        );
        // Odometer step, last placeholder fastest.
        let mut slot = subset.len();
        loop {
            if slot == 0 {
                return;
            }
            slot -= 1;
            positions[slot] += 1;
            if positions[slot] < candidates[subset[slot]].len() {
                break;
            }
            positions[slot] = 0;
        }
    }
}
