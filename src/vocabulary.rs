use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VocabularyError {
    #[error("Failed to read vocabulary file {0}: {1}")]
    Read(String, String),

    #[error("Failed to parse vocabulary file {0}: {1}")]
    Parse(String, String),
}

/// Allow-lists of known test names and units.
///
/// This is the sole mechanism separating genuine test results from other
/// numeric text caught by the loose extraction pattern. Injected into the
/// validator rather than referenced as module globals, so tests can run
/// with alternate vocabularies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    pub test_names: HashSet<String>,
    pub units: HashSet<String>,
}

impl Vocabulary {
    pub fn from_lists<T, U>(test_names: T, units: U) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        U: IntoIterator,
        U::Item: Into<String>,
    {
        Self {
            test_names: test_names.into_iter().map(Into::into).collect(),
            units: units.into_iter().map(Into::into).collect(),
        }
    }

    /// Load a vocabulary from a JSON file with `test_names` and `units`
    /// string arrays.
    pub fn load(path: &Path) -> Result<Self, VocabularyError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            VocabularyError::Read(path.display().to_string(), e.to_string())
        })?;
        serde_json::from_str(&json).map_err(|e| {
            VocabularyError::Parse(path.display().to_string(), e.to_string())
        })
    }

    /// Exact, case-sensitive membership. No normalization.
    pub fn contains_test(&self, test_name: &str) -> bool {
        self.test_names.contains(test_name)
    }

    /// Exact, case-sensitive membership. No normalization.
    pub fn contains_unit(&self, unit: &str) -> bool {
        self.units.contains(unit)
    }
}

impl Default for Vocabulary {
    /// The curated production vocabulary.
    fn default() -> Self {
        Self::from_lists(
            [
                "Creatinine",
                "GFR Estimated",
                "GFR Category G2",
                "Glucose Fasting",
                "Cyanocobalamin",
                "Hemoglobin",
                "RBC",
                "WBC",
                "Platelets",
                "Cholesterol",
                "25 Hydroxy",
                "T3, Total",
                "T4, Total",
                "TSH",
                "Phosphorus",
                "Sodium",
                "Potassium",
                "Chloride",
                "Urea",
                "Urea Nitrogen Blood",
                "Total",
                "Triglycerides",
                "HDL Cholesterol",
                "Calculated",
                "Uric Acid",
                "GGTP",
                "00 RBC Count",
                "HbA1c",
                "MCV",
                "MCH",
                "MCHC",
                "Segmented Neutrophils",
                "Neutrophils",
                "Lymphocytes",
                "Monocytes",
                "Eosinophils",
                "Basophils",
                "Absolute Leucocyte Count",
                "Platelet Count",
                "Bilirubin Direct",
                "Bilirubin Total",
                "Bilirubin Indirect",
                "Total Protein",
                "Albumin",
                "G Ratio",
            ],
            [
                "g/dL",
                "mg/dL",
                "mmol/L",
                "IU/L",
                "%",
                "fl",
                "pg",
                "pg/mL",
                "µL",
                "nmol/L",
                "µIU/mL",
                "mL/min/1.73m2",
                "U/L",
                "thou/mm3",
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_covers_common_tests_and_units() {
        let vocab = Vocabulary::default();
        assert!(vocab.contains_test("Hemoglobin"));
        assert!(vocab.contains_test("TSH"));
        assert!(vocab.contains_unit("g/dL"));
        assert!(vocab.contains_unit("µIU/mL"));
    }

    #[test]
    fn membership_is_case_sensitive() {
        let vocab = Vocabulary::default();
        assert!(!vocab.contains_test("hemoglobin"));
        assert!(!vocab.contains_unit("G/DL"));
    }

    #[test]
    fn from_lists_builds_alternate_vocabulary() {
        let vocab = Vocabulary::from_lists(["Ferritin"], ["ng/mL"]);
        assert!(vocab.contains_test("Ferritin"));
        assert!(!vocab.contains_test("Hemoglobin"));
        assert!(vocab.contains_unit("ng/mL"));
    }

    #[test]
    fn load_reads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"test_names": ["Ferritin"], "units": ["ng/mL"]}}"#
        )
        .unwrap();
        let vocab = Vocabulary::load(file.path()).unwrap();
        assert!(vocab.contains_test("Ferritin"));
        assert!(vocab.contains_unit("ng/mL"));
    }

    #[test]
    fn load_missing_file_is_read_error() {
        let err = Vocabulary::load(Path::new("/nonexistent/vocab.json")).unwrap_err();
        assert!(matches!(err, VocabularyError::Read(..)));
    }

    #[test]
    fn load_malformed_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = Vocabulary::load(file.path()).unwrap_err();
        assert!(matches!(err, VocabularyError::Parse(..)));
    }
}
