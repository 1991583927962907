//! Free-text answer scoring.
//!
//! Compares a submitted answer against the stored reference answer using a
//! keyword-overlap heuristic: both strings are lower-cased and split on
//! whitespace, and a reference token counts as matched when any submitted
//! token contains it or is contained by it. An answer is correct when at
//! least half of the reference tokens match.
//!
//! Known weakness, kept deliberately: bidirectional substring containment
//! lets very short submitted tokens match many reference tokens. The matching
//! strength intended by the product is ambiguous, so the behavior is pinned
//! by tests rather than tightened.

use serde::{Deserialize, Serialize};

/// Outcome of scoring one submitted answer against a reference answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnswerComparison {
    /// Fraction of reference tokens matched, in [0, 1].
    pub match_ratio: f64,
    /// Whether the answer is considered correct (ratio >= 0.5, inclusive).
    pub is_correct: bool,
    /// Full point value when correct, zero otherwise.
    pub points_awarded: u32,
}

/// Threshold on the matched-token ratio at which an answer counts as correct.
pub const CORRECT_THRESHOLD: f64 = 0.5;

/// Score a submitted answer against a reference answer.
///
/// Total over its input domain: an empty or whitespace-only submission yields
/// a zero match ratio, and a reference that tokenizes to nothing yields a
/// zero ratio rather than dividing by zero. No I/O, no shared state.
pub fn evaluate(submitted: &str, reference: &str, point_value: u32) -> AnswerComparison {
    let reference_tokens: Vec<String> = reference
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();
    let submitted_tokens: Vec<String> = submitted
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect();

    if reference_tokens.is_empty() {
        return AnswerComparison {
            match_ratio: 0.0,
            is_correct: false,
            points_awarded: 0,
        };
    }

    let matched = reference_tokens
        .iter()
        .filter(|word| {
            submitted_tokens
                .iter()
                .any(|submitted| submitted.contains(word.as_str()) || word.contains(submitted))
        })
        .count();

    let match_ratio = matched as f64 / reference_tokens.len() as f64;
    let is_correct = match_ratio >= CORRECT_THRESHOLD;

    AnswerComparison {
        match_ratio,
        is_correct,
        points_awarded: if is_correct { point_value } else { 0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_submission_never_matches() {
        let result = evaluate("", "the dog ran fast", 10);
        assert_eq!(result.match_ratio, 0.0);
        assert!(!result.is_correct);
        assert_eq!(result.points_awarded, 0);

        let result = evaluate("   \t\n", "the dog ran fast", 10);
        assert_eq!(result.match_ratio, 0.0);
        assert!(!result.is_correct);
    }

    #[test]
    fn identical_answer_full_match() {
        let result = evaluate("The Dog Ran Fast", "the dog ran fast", 10);
        assert_eq!(result.match_ratio, 1.0);
        assert!(result.is_correct);
        assert_eq!(result.points_awarded, 10);
    }

    #[test]
    fn half_match_is_correct_inclusive_boundary() {
        // Reference has 4 tokens; submission matches exactly "dog" and "fast".
        let result = evaluate("dog fast", "the dog ran fast", 15);
        assert_eq!(result.match_ratio, 0.5);
        assert!(result.is_correct);
        assert_eq!(result.points_awarded, 15);
    }

    #[test]
    fn quarter_match_is_incorrect() {
        // "zz" shares no substring relation with any reference token, so only
        // "lion" matches: 1 of 4.
        let result = evaluate("lion zz", "wolf lion bear moose", 20);
        assert_eq!(result.match_ratio, 0.25);
        assert!(!result.is_correct);
        assert_eq!(result.points_awarded, 0);
    }

    #[test]
    fn points_all_or_nothing() {
        for points in [0u32, 5, 20] {
            let correct = evaluate("dog fast", "the dog ran fast", points);
            assert!(correct.is_correct);
            assert_eq!(correct.points_awarded, points);

            let incorrect = evaluate("zzz", "the dog ran fast", points);
            assert!(!incorrect.is_correct);
            assert_eq!(incorrect.points_awarded, 0);
        }
    }

    #[test]
    fn partial_overlap_scenario() {
        // Matched reference tokens: "party" only, 1 of 5. The submission is
        // chosen so no token is an accidental substring of a reference token.
        let result = evaluate("big party by our house", "birthday party at the lake", 10);
        assert!((result.match_ratio - 0.2).abs() < f64::EPSILON);
        assert!(!result.is_correct);
        assert_eq!(result.points_awarded, 0);
    }

    #[test]
    fn stray_article_inflates_ratio() {
        // The lone "a" in the submission substring-matches "birthday", "at",
        // and "lake", lifting an essentially wrong answer past the threshold.
        // Pinned as-is; see the module docs.
        let result = evaluate("we went to a party", "birthday party at the lake", 10);
        assert!((result.match_ratio - 0.8).abs() < f64::EPSILON);
        assert!(result.is_correct);
    }

    #[test]
    fn substring_containment_is_bidirectional() {
        // Submitted "birthdays" contains reference "birthday"; submitted
        // "cake" is contained in reference "cupcakes". Both directions count.
        let result = evaluate("birthdays cake", "birthday cupcakes", 10);
        assert_eq!(result.match_ratio, 1.0);
        assert!(result.is_correct);
    }

    #[test]
    fn one_char_token_overmatches() {
        // Legacy behavior: a single-letter submission is a substring of every
        // reference token containing that letter, inflating the ratio.
        let result = evaluate("a", "canal parade bazaar", 10);
        assert_eq!(result.match_ratio, 1.0);
        assert!(result.is_correct);
    }

    #[test]
    fn punctuation_is_not_stripped() {
        // "lake." keeps its period; equality fails but containment still
        // matches the bare "lake". Tokens are never punctuation-normalized.
        let result = evaluate("lake", "lake.", 10);
        assert_eq!(result.match_ratio, 1.0);

        // The other direction: trailing punctuation on the submission is a
        // superstring of the reference token.
        let result = evaluate("lake.", "lake", 10);
        assert_eq!(result.match_ratio, 1.0);
    }

    #[test]
    fn zero_token_reference_yields_zero_ratio() {
        // Upstream guarantees a non-empty reference, but a whitespace-only
        // one must not divide by zero.
        let result = evaluate("anything", "   ", 10);
        assert_eq!(result.match_ratio, 0.0);
        assert!(!result.is_correct);
    }

    #[test]
    fn duplicate_reference_tokens_counted_individually() {
        // Tokens are not deduplicated; both occurrences of "dog" count.
        let result = evaluate("dog", "dog dog cat fish", 10);
        assert_eq!(result.match_ratio, 0.5);
        assert!(result.is_correct);
    }
}
