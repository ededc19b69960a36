use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::DATE_FORMAT;

use super::enums::Category;
use super::range::ReferenceRange;

/// One candidate observation exactly as matched in the source text.
/// All fields are unvalidated strings; the patient name and collection
/// date are document-level and shared by every candidate of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub document_id: Uuid,
    pub patient_name: Option<String>,
    pub collection_date: Option<String>,
    pub test_name: String,
    pub value: String,
    pub unit: String,
    pub reference_range: String,
}

/// A candidate whose test name and unit both passed the vocabulary
/// filter. Constructed only by `pipeline::validate`, so the membership
/// invariant holds for every instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedObservation(RawObservation);

impl ValidatedObservation {
    pub(crate) fn new(raw: RawObservation) -> Self {
        Self(raw)
    }

    pub fn as_raw(&self) -> &RawObservation {
        &self.0
    }

    pub fn into_raw(self) -> RawObservation {
        self.0
    }
}

impl std::ops::Deref for ValidatedObservation {
    type Target = RawObservation;

    fn deref(&self) -> &RawObservation {
        &self.0
    }
}

/// A validated observation with its numeric value parsed, its reference
/// range normalized, and its category assigned. Immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedObservation {
    pub document_id: Uuid,
    pub patient_name: Option<String>,
    pub collection_date: Option<String>,
    pub test_name: String,
    pub value_text: String,
    pub unit: String,
    pub reference_range: String,
    pub value: f64,
    pub range: ReferenceRange,
    pub category: Category,
}

impl ClassifiedObservation {
    /// Collection date parsed as printed: day/month/year.
    pub fn collection_day(&self) -> Option<NaiveDate> {
        self.collection_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, DATE_FORMAT).ok())
    }
}
