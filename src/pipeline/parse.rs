use std::sync::LazyLock;

use regex::Regex;
use uuid::Uuid;

use crate::models::RawObservation;

/// "Name", optional honorific, two alphabetic words captured as the name.
static PATIENT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Name\s*:\s*(?:Mr\.|Ms\.)?\s*([A-Za-z]+\s+[A-Za-z]+)")
        .expect("invalid patient name pattern")
});

/// Date token as printed on reports: day/month/year.
static COLLECTION_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{1,2}/\d{1,2}/\d{4}\b").expect("invalid date pattern"));

/// Observation-shaped line: label, optional colon, whitespace, numeric
/// token (digits/commas/dot), optional whitespace-free unit token, then a
/// free-form remainder that becomes the reference-range string.
static OBSERVATION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([\w][\w ]*?):?\s+([\d.,]+)[ \t]*(\S*)[ \t]*(.*?)\s*$")
        .expect("invalid observation line pattern")
});

/// Outcome of tokenizing one line. Fields the line did not yield are
/// None, so a partial or failed match is structurally visible instead of
/// silently empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchAttempt {
    pub label: Option<String>,
    pub value: Option<String>,
    pub unit: Option<String>,
    pub reference_range: Option<String>,
}

impl MatchAttempt {
    /// A line counts as an observation once it has a label and a value.
    /// Unit and range may legitimately be absent; the validator and
    /// classifier reject those records downstream.
    pub fn is_observation(&self) -> bool {
        self.label.is_some() && self.value.is_some()
    }
}

/// Tokenize one line of report text into a tagged attempt.
pub fn tokenize_line(line: &str) -> MatchAttempt {
    let Some(caps) = OBSERVATION_LINE.captures(line) else {
        return MatchAttempt::default();
    };

    let non_empty = |m: &str| {
        let trimmed = m.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    };

    MatchAttempt {
        label: non_empty(&caps[1]),
        value: non_empty(&caps[2]),
        unit: non_empty(&caps[3]),
        reference_range: non_empty(&caps[4]),
    }
}

/// Everything extracted from one document's text.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentExtraction {
    pub document_id: Uuid,
    pub patient_name: Option<String>,
    pub collection_date: Option<String>,
    pub observations: Vec<RawObservation>,
    /// Non-empty lines that did not tokenize as observations.
    pub skipped_lines: usize,
}

/// Extract candidate observations from one document's concatenated text.
///
/// The first name and date matches in the text apply to every candidate
/// of the document. A document with no observation-shaped lines yields an
/// empty sequence; that is not an error.
///
/// The document id is derived from the text, so re-extraction of the same
/// document is fully reproducible.
pub fn extract_document(text: &str) -> DocumentExtraction {
    let document_id = Uuid::new_v5(&Uuid::NAMESPACE_OID, text.as_bytes());

    let patient_name = PATIENT_NAME
        .captures(text)
        .map(|caps| caps[1].to_string());
    let collection_date = COLLECTION_DATE
        .find(text)
        .map(|m| m.as_str().to_string());

    let mut observations = Vec::new();
    let mut skipped_lines = 0;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let attempt = tokenize_line(line);
        if attempt.is_observation() {
            observations.push(RawObservation {
                document_id,
                patient_name: patient_name.clone(),
                collection_date: collection_date.clone(),
                test_name: attempt.label.unwrap_or_default(),
                value: attempt.value.unwrap_or_default(),
                unit: attempt.unit.unwrap_or_default(),
                reference_range: attempt.reference_range.unwrap_or_default(),
            });
        } else {
            skipped_lines += 1;
        }
    }

    DocumentExtraction {
        document_id,
        patient_name,
        collection_date,
        observations,
        skipped_lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "\
Acme Diagnostics
Name: Mr. John Smith
Collected on 12/03/2023
Hemoglobin 13.5 g/dL 13.0 - 17.0
TSH 6.1 µIU/mL <4.5
Reviewed by the laboratory director.";

    // --- tokenize_line tests ---

    #[test]
    fn full_observation_line_tokenizes() {
        let attempt = tokenize_line("Hemoglobin 13.5 g/dL 13.0 - 17.0");
        assert_eq!(attempt.label.as_deref(), Some("Hemoglobin"));
        assert_eq!(attempt.value.as_deref(), Some("13.5"));
        assert_eq!(attempt.unit.as_deref(), Some("g/dL"));
        assert_eq!(attempt.reference_range.as_deref(), Some("13.0 - 17.0"));
    }

    #[test]
    fn multi_word_label_tokenizes() {
        let attempt = tokenize_line("GFR Estimated 59 mL/min/1.73m2 >60");
        assert_eq!(attempt.label.as_deref(), Some("GFR Estimated"));
        assert_eq!(attempt.value.as_deref(), Some("59"));
        assert_eq!(attempt.unit.as_deref(), Some("mL/min/1.73m2"));
        assert_eq!(attempt.reference_range.as_deref(), Some(">60"));
    }

    #[test]
    fn label_with_colon_tokenizes() {
        let attempt = tokenize_line("Glucose Fasting: 92 mg/dL 70 - 100");
        assert_eq!(attempt.label.as_deref(), Some("Glucose Fasting"));
        assert_eq!(attempt.value.as_deref(), Some("92"));
    }

    #[test]
    fn missing_unit_and_range_are_absent_not_empty() {
        let attempt = tokenize_line("RandomNoise 42");
        assert!(attempt.is_observation());
        assert_eq!(attempt.unit, None);
        assert_eq!(attempt.reference_range, None);
    }

    #[test]
    fn prose_line_yields_no_fields() {
        let attempt = tokenize_line("Reviewed by the laboratory director.");
        assert_eq!(attempt, MatchAttempt::default());
        assert!(!attempt.is_observation());
    }

    #[test]
    fn bare_date_line_is_not_an_observation() {
        assert!(!tokenize_line("12/03/2023").is_observation());
    }

    // --- extract_document tests ---

    #[test]
    fn extracts_name_date_and_observations() {
        let doc = extract_document(REPORT);
        assert_eq!(doc.patient_name.as_deref(), Some("John Smith"));
        assert_eq!(doc.collection_date.as_deref(), Some("12/03/2023"));
        // The "Collected on" line also tokenizes (label + numeric day);
        // such noise candidates are the validator's job to remove.
        assert_eq!(doc.observations.len(), 3);
        assert_eq!(doc.observations[0].test_name, "Collected on");
        assert_eq!(doc.observations[1].test_name, "Hemoglobin");
        assert_eq!(doc.observations[2].reference_range, "<4.5");
    }

    #[test]
    fn name_and_date_attached_to_every_observation() {
        let doc = extract_document(REPORT);
        for obs in &doc.observations {
            assert_eq!(obs.patient_name.as_deref(), Some("John Smith"));
            assert_eq!(obs.collection_date.as_deref(), Some("12/03/2023"));
            assert_eq!(obs.document_id, doc.document_id);
        }
    }

    #[test]
    fn name_without_honorific() {
        let doc = extract_document("Name: Jane Doe\nSodium 140 mmol/L 136 - 145");
        assert_eq!(doc.patient_name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn missing_name_and_date_yield_none() {
        let doc = extract_document("Hemoglobin 13.5 g/dL 13.0 - 17.0");
        assert_eq!(doc.patient_name, None);
        assert_eq!(doc.collection_date, None);
        assert_eq!(doc.observations.len(), 1);
        assert_eq!(doc.observations[0].patient_name, None);
    }

    #[test]
    fn document_without_observation_lines_is_empty_not_error() {
        let doc = extract_document("Dear patient,\nyour results will follow shortly.");
        assert!(doc.observations.is_empty());
        assert_eq!(doc.skipped_lines, 2);
    }

    #[test]
    fn skipped_lines_counted() {
        let doc = extract_document(REPORT);
        // Header, name line, and the sign-off do not tokenize.
        assert_eq!(doc.skipped_lines, 3);
        assert_eq!(doc.skipped_lines + doc.observations.len(), 6);
    }

    #[test]
    fn document_id_is_stable_per_text() {
        assert_eq!(
            extract_document(REPORT).document_id,
            extract_document(REPORT).document_id
        );
        assert_ne!(
            extract_document(REPORT).document_id,
            extract_document("other text").document_id
        );
    }
}
