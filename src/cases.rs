//! Test-case generation module
//!
//! Turns the ordered mapping entries into the full case list:
//! - Every entry becomes one positive case
//! - Each pair of consecutive entries may contribute one synthesized
//!   negative case derived from the point where their hostnames diverge

use crate::constants::NEGATIVE_SUFFIX;
use crate::models::{MappingEntry, TestCase};

/// Build the complete test-case list for a run.
///
/// Positive cases come first, in file order, followed by the synthesized
/// negative cases. Dispatch order is not semantically significant.
pub fn build_cases(entries: &[MappingEntry]) -> Vec<TestCase> {
    let mut cases: Vec<TestCase> = entries.iter().map(TestCase::positive).collect();

    for pair in entries.windows(2) {
        if let Some(hostname) = synthesize_negative(&pair[0].hostname, &pair[1].hostname) {
            cases.push(TestCase::negative(hostname));
        }
    }

    cases
}

/// Derive a near-miss hostname from two consecutive entries.
///
/// Both hostnames are lower-cased, then scanned left to right for the first
/// index where they diverge. The synthesized hostname is the shared prefix
/// up to that index with an improbable suffix appended, so it stresses
/// prefix-matching resolver logic without colliding with a real entry.
/// Pairs that never diverge over the shorter length (exact duplicates, or
/// one hostname a prefix of the other) yield no negative case.
fn synthesize_negative(prev: &str, next: &str) -> Option<String> {
    let prev = prev.to_lowercase();
    let next = next.to_lowercase();

    let divergence = prev
        .chars()
        .zip(next.chars())
        .position(|(a, b)| a != b)?;

    let prefix: String = prev.chars().take(divergence).collect();
    Some(format!("{prefix}{NEGATIVE_SUFFIX}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CaseKind;

    fn entry(address: &str, hostname: &str) -> MappingEntry {
        MappingEntry {
            address: address.to_string(),
            hostname: hostname.to_string(),
        }
    }

    #[test]
    fn test_every_entry_becomes_a_positive_case() {
        let entries = vec![
            entry("10.0.0.1", "alpha.example"),
            entry("10.0.0.2", "beta.example"),
        ];
        let cases = build_cases(&entries);
        let positives: Vec<_> = cases
            .iter()
            .filter(|c| c.kind == CaseKind::Positive)
            .collect();
        assert_eq!(positives.len(), 2);
        assert_eq!(positives[0].hostname, "alpha.example");
        assert_eq!(positives[0].expected.as_deref(), Some("10.0.0.1"));
        assert_eq!(positives[1].expected.as_deref(), Some("10.0.0.2"));
    }

    #[test]
    fn test_shared_prefix_pair_synthesizes_expected_hostname() {
        // alpha.example vs alphabeta.example diverge at index 5: '.' vs 'b'
        let entries = vec![
            entry("10.0.0.1", "alpha.example"),
            entry("10.0.0.2", "alphabeta.example"),
        ];
        let cases = build_cases(&entries);
        assert_eq!(cases.len(), 3);
        let negative = &cases[2];
        assert_eq!(negative.kind, CaseKind::Negative);
        assert_eq!(negative.hostname, "alpha-fiaidqwoodqwo");
        assert!(negative.expected.is_none());
    }

    #[test]
    fn test_divergence_at_first_character_keeps_empty_prefix() {
        let cases = build_cases(&[
            entry("10.0.0.1", "alpha.example"),
            entry("10.0.0.2", "beta.example"),
        ]);
        assert_eq!(cases.len(), 3);
        assert_eq!(cases[2].hostname, "-fiaidqwoodqwo");
    }

    #[test]
    fn test_identical_adjacent_hostnames_are_skipped() {
        let cases = build_cases(&[
            entry("10.0.0.1", "foo.example"),
            entry("10.0.0.2", "foo.example"),
        ]);
        assert_eq!(cases.len(), 2);
        assert!(cases.iter().all(|c| c.kind == CaseKind::Positive));
    }

    #[test]
    fn test_prefix_subsumed_pair_is_skipped() {
        // No divergence within the shorter hostname, in either order
        let cases = build_cases(&[
            entry("10.0.0.1", "foo.example"),
            entry("10.0.0.2", "foo.example.org"),
        ]);
        assert_eq!(cases.len(), 2);

        let cases = build_cases(&[
            entry("10.0.0.1", "foo.example.org"),
            entry("10.0.0.2", "foo.example"),
        ]);
        assert_eq!(cases.len(), 2);
    }

    #[test]
    fn test_comparison_is_case_insensitive_and_prefix_is_lowered() {
        // Same hostnames up to case: skipped
        let cases = build_cases(&[
            entry("10.0.0.1", "Foo.Example"),
            entry("10.0.0.2", "foo.example"),
        ]);
        assert_eq!(cases.len(), 2);

        // Diverging pair: shared prefix comes out lower-cased
        let cases = build_cases(&[
            entry("10.0.0.1", "ALPHA.example"),
            entry("10.0.0.2", "alphabeta.example"),
        ]);
        assert_eq!(cases.len(), 3);
        assert_eq!(cases[2].hostname, "alpha-fiaidqwoodqwo");
    }

    #[test]
    fn test_fewer_than_two_entries_yield_no_negatives() {
        assert!(build_cases(&[]).is_empty());
        let cases = build_cases(&[entry("10.0.0.1", "alpha.example")]);
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].kind, CaseKind::Positive);
    }

    #[test]
    fn test_negative_count_matches_diverging_adjacent_pairs() {
        let entries = vec![
            entry("10.0.0.1", "a.example"),
            entry("10.0.0.2", "b.example"),
            entry("10.0.0.3", "b.example"),
            entry("10.0.0.4", "c.example"),
        ];
        // Pairs: (a,b) diverges, (b,b) skipped, (b,c) diverges
        let cases = build_cases(&entries);
        let negatives = cases
            .iter()
            .filter(|c| c.kind == CaseKind::Negative)
            .count();
        assert_eq!(negatives, 2);
        assert_eq!(cases.len(), 6);
    }

    #[test]
    fn test_synthesized_prefix_matches_both_hostnames_up_to_divergence() {
        let prev = "mail.internal.example";
        let next = "mail.intranet.example";
        let hostname = synthesize_negative(prev, next).unwrap();
        // Divergence at index 8: 'e' vs 'r' after the shared "mail.int"
        assert_eq!(hostname, format!("mail.int{}", NEGATIVE_SUFFIX));
        let prefix = hostname.strip_suffix(NEGATIVE_SUFFIX).unwrap();
        assert!(prev.starts_with(prefix));
        assert!(next.starts_with(prefix));
        assert_ne!(next.as_bytes()[prefix.len()], prev.as_bytes()[prefix.len()]);
    }
}
