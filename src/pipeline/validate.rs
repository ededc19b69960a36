use crate::models::{RawObservation, ValidatedObservation};
use crate::vocabulary::Vocabulary;

/// Keep only candidates whose test name and unit are both members of the
/// vocabulary. Exact, case-sensitive matching; survivors pass through
/// unchanged.
///
/// Rejection here is routine noise filtering, not an error: the loose
/// extraction pattern is expected to over-capture, and this filter is
/// what separates genuine test results from the rest.
pub fn validate_observations(
    vocabulary: &Vocabulary,
    candidates: Vec<RawObservation>,
) -> Vec<ValidatedObservation> {
    candidates
        .into_iter()
        .filter(|c| vocabulary.contains_test(&c.test_name) && vocabulary.contains_unit(&c.unit))
        .map(ValidatedObservation::new)
        .collect()
}
