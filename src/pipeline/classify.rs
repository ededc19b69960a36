use thiserror::Error;

use crate::models::{
    ClassifiedObservation, RangeOp, ReferenceRange, ValidatedObservation,
};

/// Per-record classification failures. None of these abort a batch; the
/// offending observation is excluded and counted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("Value '{0}' is not numeric")]
    NonNumericValue(String),

    #[error("Reference range is empty")]
    EmptyRange,

    #[error("Reference range '{0}' has a non-numeric threshold")]
    NonNumericThreshold(String),

    /// The range is neither a numeric pair nor a `<`/`>` bound. Ranges
    /// printed with other signs (e.g. "≥") fail explicitly instead of
    /// being read as greater-than.
    #[error("Reference range '{0}' starts with an ambiguous sign")]
    AmbiguousSign(String),
}

/// Parse a reference-range string into its normalized form.
///
/// "low - high" (a dash between exactly two numeric parts) is a bounded
/// range; otherwise the leading character must be `<` or `>` and the
/// rest the threshold.
pub fn parse_reference_range(text: &str) -> Result<ReferenceRange, ClassifyError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ClassifyError::EmptyRange);
    }

    let parts: Vec<&str> = trimmed.split('-').collect();
    if parts.len() == 2 {
        if let (Ok(low), Ok(high)) = (
            parts[0].trim().parse::<f64>(),
            parts[1].trim().parse::<f64>(),
        ) {
            return Ok(ReferenceRange::Bounded { low, high });
        }
    }

    let Some(sign) = trimmed.chars().next() else {
        return Err(ClassifyError::EmptyRange);
    };
    let op = match sign {
        '<' => RangeOp::LessThan,
        '>' => RangeOp::GreaterThan,
        _ => return Err(ClassifyError::AmbiguousSign(trimmed.to_string())),
    };

    let rest = &trimmed[sign.len_utf8()..];
    let threshold = rest
        .trim()
        .parse::<f64>()
        .map_err(|_| ClassifyError::NonNumericThreshold(trimmed.to_string()))?;

    Ok(ReferenceRange::OneSided { op, threshold })
}

/// Parse the extracted value token. The numeric token class admits comma
/// thousands separators, so "1,200" reads as 1200.
fn parse_value(text: &str) -> Result<f64, ClassifyError> {
    text.trim()
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| ClassifyError::NonNumericValue(text.to_string()))
}

/// Classify one validated observation against its stated reference range.
pub fn classify_observation(
    observation: ValidatedObservation,
) -> Result<ClassifiedObservation, ClassifyError> {
    let raw = observation.into_raw();

    let value = parse_value(&raw.value)?;
    let range = parse_reference_range(&raw.reference_range)?;
    let category = range.classify(value);

    Ok(ClassifiedObservation {
        document_id: raw.document_id,
        patient_name: raw.patient_name,
        collection_date: raw.collection_date,
        test_name: raw.test_name,
        value_text: raw.value,
        unit: raw.unit,
        reference_range: raw.reference_range,
        value,
        range,
        category,
    })
}
