use std::collections::{HashMap, HashSet};

use super::model::EvEntry;

/// Bucket label for entries without a vehicle type.
pub const UNKNOWN_TYPE: &str = "Unknown";
/// Placeholder for a missing make or model.
pub const NOT_AVAILABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Group-by-type counts
// ---------------------------------------------------------------------------

/// Vehicle-type label → count, in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeCounts {
    buckets: Vec<(String, usize)>,
}

impl TypeCounts {
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.buckets.iter().map(|(label, n)| (label.as_str(), *n))
    }
}

pub fn count_by_type(entries: &[&EvEntry]) -> TypeCounts {
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<(String, usize)> = Vec::new();

    for entry in entries {
        let label = entry.vehicle_type.as_deref().unwrap_or(UNKNOWN_TYPE);
        match position.get(label) {
            Some(&i) => buckets[i].1 += 1,
            None => {
                position.insert(label, buckets.len());
                buckets.push((label.to_string(), 1));
            }
        }
    }

    TypeCounts { buckets }
}

// ---------------------------------------------------------------------------
// CAFV eligibility split
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EligibilitySplit {
    pub eligible: usize,
    pub not_eligible: usize,
}

impl EligibilitySplit {
    pub fn total(&self) -> usize {
        self.eligible + self.not_eligible
    }
}

pub fn eligibility_split(entries: &[&EvEntry]) -> EligibilitySplit {
    let eligible = entries.iter().filter(|e| e.is_cafv_eligible()).count();
    EligibilitySplit {
        eligible,
        not_eligible: entries.len() - eligible,
    }
}

// ---------------------------------------------------------------------------
// Electric range series
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RangePoint {
    /// "<Make> <Model>".
    pub label: String,
    /// Miles; 0 when the entry has no range.
    pub value: f64,
}

pub fn range_series(entries: &[&EvEntry]) -> Vec<RangePoint> {
    entries
        .iter()
        .map(|e| RangePoint {
            label: format!(
                "{} {}",
                e.manufacturer.as_deref().unwrap_or(NOT_AVAILABLE),
                e.model.as_deref().unwrap_or(NOT_AVAILABLE)
            ),
            value: e.electric_range.unwrap_or(0.0),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Summary statistics for the headline cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub manufacturers: usize,
    /// Mean over entries reporting a positive range. The dataset uses 0 for
    /// "not yet researched", so those are left out.
    pub mean_range: Option<f64>,
}

pub fn summarize(entries: &[&EvEntry]) -> Summary {
    let manufacturers = entries
        .iter()
        .filter_map(|e| e.manufacturer.as_deref())
        .collect::<HashSet<_>>()
        .len();

    let (sum, n) = entries
        .iter()
        .filter_map(|e| e.electric_range)
        .filter(|r| *r > 0.0)
        .fold((0.0, 0usize), |(sum, n), r| (sum + r, n + 1));

    Summary {
        total: entries.len(),
        manufacturers,
        mean_range: (n > 0).then(|| sum / n as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(
        make: &str,
        model: Option<&str>,
        ty: Option<&str>,
        range: Option<f64>,
        cafv: &str,
    ) -> EvEntry {
        EvEntry {
            manufacturer: Some(make.to_string()),
            model: model.map(str::to_string),
            vehicle_type: ty.map(str::to_string),
            electric_range: range,
            cafv_eligibility: Some(cafv.to_string()),
            ..Default::default()
        }
    }

    fn sample() -> Vec<EvEntry> {
        vec![
            ev("Tesla", Some("Model 3"), Some("BEV"), Some(250.0), "Eligible"),
            ev(
                "Nissan",
                Some("Leaf"),
                Some("BEV"),
                Some(150.0),
                "Not eligible due to low battery range",
            ),
        ]
    }

    #[test]
    fn two_row_example() {
        let entries = sample();
        let refs: Vec<&EvEntry> = entries.iter().collect();

        let counts = count_by_type(&refs);
        assert_eq!(counts.iter().collect::<Vec<_>>(), vec![("BEV", 2)]);

        let split = eligibility_split(&refs);
        assert_eq!(
            split,
            EligibilitySplit {
                eligible: 1,
                not_eligible: 1
            }
        );
    }

    #[test]
    fn missing_type_is_unknown_and_counts_sum_to_total() {
        let entries = vec![
            ev("Kia", None, Some("PHEV"), None, "x"),
            ev("Kia", None, None, None, "x"),
            ev("Kia", None, Some("BEV"), None, "x"),
            ev("Kia", None, Some("PHEV"), None, "x"),
        ];
        let refs: Vec<&EvEntry> = entries.iter().collect();
        let counts = count_by_type(&refs);

        assert_eq!(
            counts.iter().collect::<Vec<_>>(),
            vec![("PHEV", 2), (UNKNOWN_TYPE, 1), ("BEV", 1)]
        );
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), refs.len());
        assert_eq!(eligibility_split(&refs).total(), refs.len());
    }

    #[test]
    fn range_series_substitutes_placeholders() {
        let entries = vec![
            ev("Tesla", Some("Model Y"), None, Some(291.0), ""),
            ev("BMW", None, None, None, ""),
        ];
        let refs: Vec<&EvEntry> = entries.iter().collect();

        assert_eq!(
            range_series(&refs),
            vec![
                RangePoint {
                    label: "Tesla Model Y".into(),
                    value: 291.0
                },
                RangePoint {
                    label: "BMW N/A".into(),
                    value: 0.0
                },
            ]
        );
    }

    #[test]
    fn summary_skips_unresearched_ranges() {
        let entries = vec![
            ev("Tesla", None, None, Some(300.0), ""),
            ev("Tesla", None, None, Some(0.0), ""),
            ev("Nissan", None, None, Some(100.0), ""),
        ];
        let refs: Vec<&EvEntry> = entries.iter().collect();

        let summary = summarize(&refs);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.manufacturers, 2);
        assert_eq!(summary.mean_range, Some(200.0));
        assert_eq!(summarize(&[]).mean_range, None);
    }
}
