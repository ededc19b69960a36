use serde::Serialize;

use crate::models::{ClassifiedObservation, RawObservation, ReportRow};
use crate::vocabulary::Vocabulary;

use super::classify::{classify_observation, ClassifyError};
use super::parse::extract_document;
use super::validate::validate_observations;

/// Per-stage counts for one batch, so dropped records are visible to an
/// operator even though individual drops are routine and non-fatal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub documents: usize,
    /// Non-empty lines that did not tokenize as observations.
    pub skipped_lines: usize,
    pub candidates: usize,
    pub validated: usize,
    pub classified: usize,
    /// Records with a non-numeric value or empty/unparseable range.
    pub parse_failures: usize,
    /// Records whose range sign was neither `<` nor `>`.
    pub ambiguous_ranges: usize,
    /// Classified records without a parseable collection date; these
    /// cannot appear in a time series.
    pub undated: usize,
}

/// Everything one batch run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub observations: Vec<ClassifiedObservation>,
    /// Classified observations as flat export rows, in input order.
    pub rows: Vec<ReportRow>,
    pub summary: BatchSummary,
}

/// Run extraction, validation, and classification over a batch of
/// document texts.
///
/// Documents are independent; a document with nothing to extract, or a
/// record that fails validation or classification, never aborts the
/// batch. The pipeline holds no state, so re-running the same input
/// produces the same outcome.
pub fn process_batch(documents: &[String], vocabulary: &Vocabulary) -> BatchOutcome {
    let mut summary = BatchSummary {
        documents: documents.len(),
        ..Default::default()
    };

    let mut candidates: Vec<RawObservation> = Vec::new();
    for text in documents {
        let extraction = extract_document(text);
        if extraction.observations.is_empty() {
            tracing::debug!(
                document_id = %extraction.document_id,
                "document yielded no observation-shaped lines"
            );
        }
        summary.skipped_lines += extraction.skipped_lines;
        candidates.extend(extraction.observations);
    }
    summary.candidates = candidates.len();

    let validated = validate_observations(vocabulary, candidates);
    summary.validated = validated.len();

    let mut observations = Vec::with_capacity(validated.len());
    for record in validated {
        match classify_observation(record) {
            Ok(obs) => observations.push(obs),
            Err(ClassifyError::AmbiguousSign(range)) => {
                summary.ambiguous_ranges += 1;
                tracing::debug!(range = %range, "reference range with ambiguous sign excluded");
            }
            Err(err) => {
                summary.parse_failures += 1;
                tracing::debug!(%err, "observation excluded from classification");
            }
        }
    }
    summary.classified = observations.len();
    summary.undated = observations
        .iter()
        .filter(|o| o.collection_day().is_none())
        .count();

    let excluded = summary.parse_failures + summary.ambiguous_ranges;
    if excluded > 0 {
        tracing::warn!(
            excluded,
            parse_failures = summary.parse_failures,
            ambiguous_ranges = summary.ambiguous_ranges,
            "records excluded during classification"
        );
    }
    tracing::info!(
        documents = summary.documents,
        candidates = summary.candidates,
        validated = summary.validated,
        classified = summary.classified,
        "batch processed"
    );

    let rows = observations.iter().map(ReportRow::from_classified).collect();

    BatchOutcome {
        observations,
        rows,
        summary,
    }
}
