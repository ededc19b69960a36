use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::Category;
use super::observation::{ClassifiedObservation, RawObservation};

/// Column names of the tabular-display and CSV-export contracts, in
/// their stable order.
pub const REPORT_COLUMNS: [&str; 6] = [
    "Name",
    "Date",
    "Test Name",
    "Value",
    "Unit",
    "Reference Range",
];

/// Column names after classification (REPORT_COLUMNS plus "Category").
pub const CLASSIFIED_COLUMNS: [&str; 7] = [
    "Name",
    "Date",
    "Test Name",
    "Value",
    "Unit",
    "Reference Range",
    "Category",
];

/// Flat record matching the tabular-display and CSV-export contracts
/// one-for-one. Serialized field names are exactly the column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Test Name")]
    pub test_name: String,
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Unit")]
    pub unit: String,
    #[serde(rename = "Reference Range")]
    pub reference_range: String,
    #[serde(rename = "Category", skip_serializing_if = "Option::is_none", default)]
    pub category: Option<Category>,
}

impl ReportRow {
    /// Pre-classification row (six columns).
    pub fn from_raw(obs: &RawObservation) -> Self {
        Self {
            name: obs.patient_name.clone(),
            date: obs.collection_date.clone(),
            test_name: obs.test_name.clone(),
            value: obs.value.clone(),
            unit: obs.unit.clone(),
            reference_range: obs.reference_range.clone(),
            category: None,
        }
    }

    /// Post-classification row (seven columns). The value and reference
    /// range keep their original textual forms.
    pub fn from_classified(obs: &ClassifiedObservation) -> Self {
        Self {
            name: obs.patient_name.clone(),
            date: obs.collection_date.clone(),
            test_name: obs.test_name.clone(),
            value: obs.value_text.clone(),
            unit: obs.unit.clone(),
            reference_range: obs.reference_range.clone(),
            category: Some(obs.category.clone()),
        }
    }
}

/// One point of the chart-data contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Chart-data contract exposed to a rendering collaborator: per selected
/// patient and test name, an ordered list of points plus a single
/// (low, high) annotation pair for the reference region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub patient_name: String,
    pub test_name: String,
    pub points: Vec<ChartPoint>,
    pub low: Option<f64>,
    pub high: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReferenceRange;
    use uuid::Uuid;

    fn classified() -> ClassifiedObservation {
        ClassifiedObservation {
            document_id: Uuid::new_v4(),
            patient_name: Some("John Smith".into()),
            collection_date: Some("12/03/2023".into()),
            test_name: "Hemoglobin".into(),
            value_text: "13.5".into(),
            unit: "g/dL".into(),
            reference_range: "13.0 - 17.0".into(),
            value: 13.5,
            range: ReferenceRange::Bounded {
                low: 13.0,
                high: 17.0,
            },
            category: Category::Normal,
        }
    }

    #[test]
    fn classified_row_serializes_exact_column_names() {
        let row = ReportRow::from_classified(&classified());
        let json: serde_json::Value = serde_json::to_value(&row).unwrap();
        let obj = json.as_object().unwrap();
        for column in CLASSIFIED_COLUMNS {
            assert!(obj.contains_key(column), "missing column {column}");
        }
        assert_eq!(obj.len(), CLASSIFIED_COLUMNS.len());
        assert_eq!(obj["Test Name"], "Hemoglobin");
        assert_eq!(obj["Category"], "Normal");
    }

    #[test]
    fn raw_row_omits_category() {
        let raw = RawObservation {
            document_id: Uuid::new_v4(),
            patient_name: None,
            collection_date: None,
            test_name: "Glucose Fasting".into(),
            value: "92".into(),
            unit: "mg/dL".into(),
            reference_range: "70 - 100".into(),
        };
        let json: serde_json::Value =
            serde_json::to_value(ReportRow::from_raw(&raw)).unwrap();
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("Category"));
        assert_eq!(obj.len(), REPORT_COLUMNS.len());
    }

    #[test]
    fn row_keeps_original_value_text() {
        let mut obs = classified();
        obs.value_text = "1,200".into();
        obs.value = 1200.0;
        assert_eq!(ReportRow::from_classified(&obs).value, "1,200");
    }

    #[test]
    fn round_trips_through_json() {
        let row = ReportRow::from_classified(&classified());
        let json = serde_json::to_string(&row).unwrap();
        let back: ReportRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back, row);
    }
}
