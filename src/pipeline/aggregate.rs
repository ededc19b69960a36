use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ChartPoint, ChartSeries, ClassifiedObservation, ReferenceRange};

/// Chronological ordering of points within a series. Ascending is the
/// natural order for a trend chart and the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// One dated observation within a series. Each point carries its own
/// reference range; ranges for the same test can change between reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub range: ReferenceRange,
}

/// Collapsed (low, high) annotation taken from the earliest point, for
/// consumers that want a single pair per chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceBounds {
    pub low: Option<f64>,
    pub high: Option<f64>,
}

/// The ordered history of one test for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub patient_name: String,
    pub test_name: String,
    pub points: Vec<SeriesPoint>,
    pub bounds: ReferenceBounds,
}

impl Series {
    /// Project onto the chart-data contract.
    pub fn chart_series(&self) -> ChartSeries {
        ChartSeries {
            patient_name: self.patient_name.clone(),
            test_name: self.test_name.clone(),
            points: self
                .points
                .iter()
                .map(|p| ChartPoint {
                    date: p.date,
                    value: p.value,
                })
                .collect(),
            low: self.bounds.low,
            high: self.bounds.high,
        }
    }
}

/// Group classified observations of the selected patients into one series
/// per (patient, test name) pair, ordered by collection date.
///
/// Observations without a patient name or without a parseable collection
/// date cannot be keyed or placed on a time axis and are left out; the
/// processor reports those counts. Series are returned sorted by
/// (patient, test name) so output order is deterministic.
pub fn build_series(
    observations: &[ClassifiedObservation],
    selected_patients: &[String],
    direction: SortDirection,
) -> Vec<Series> {
    let mut grouped: BTreeMap<(String, String), Vec<SeriesPoint>> = BTreeMap::new();

    for obs in observations {
        let Some(patient) = obs.patient_name.as_deref() else {
            continue;
        };
        if !selected_patients.iter().any(|s| s == patient) {
            continue;
        }
        let Some(date) = obs.collection_day() else {
            continue;
        };

        grouped
            .entry((patient.to_string(), obs.test_name.clone()))
            .or_default()
            .push(SeriesPoint {
                date,
                value: obs.value,
                range: obs.range.clone(),
            });
    }

    grouped
        .into_iter()
        .map(|((patient_name, test_name), mut points)| {
            points.sort_by(|a, b| a.date.cmp(&b.date));

            // Annotation comes from the earliest point regardless of the
            // requested direction.
            let (low, high) = points[0].range.bounds();

            if direction == SortDirection::Descending {
                points.reverse();
            }

            Series {
                patient_name,
                test_name,
                points,
                bounds: ReferenceBounds { low, high },
            }
        })
        .collect()
}

/// Distinct non-empty patient names across a classified set, sorted.
/// Feeds the patient-selection control of a presentation collaborator.
pub fn patient_roster(observations: &[ClassifiedObservation]) -> Vec<String> {
    let mut names: Vec<String> = observations
        .iter()
        .filter_map(|o| o.patient_name.clone())
        .filter(|n| !n.is_empty())
        .collect();
    names.sort();
    names.dedup();
    names
}
