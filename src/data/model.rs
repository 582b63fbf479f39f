use std::collections::{BTreeMap, HashSet};

// ---------------------------------------------------------------------------
// RawRecord – one untyped row of the source file
// ---------------------------------------------------------------------------

/// Column name → cell text, exactly as read from the source.
pub type RawRecord = BTreeMap<String, String>;

/// Header names used by the Washington State EV population dataset.
pub mod columns {
    pub const VIN: &str = "VIN (1-10)";
    pub const COUNTY: &str = "County";
    pub const CITY: &str = "City";
    pub const STATE: &str = "State";
    pub const POSTAL_CODE: &str = "Postal Code";
    pub const MODEL_YEAR: &str = "Model Year";
    pub const MAKE: &str = "Make";
    pub const MODEL: &str = "Model";
    pub const VEHICLE_TYPE: &str = "Electric Vehicle Type";
    pub const CAFV_ELIGIBILITY: &str = "Clean Alternative Fuel Vehicle (CAFV) Eligibility";
    pub const ELECTRIC_RANGE: &str = "Electric Range";
}

/// Status strings that mean a vehicle is CAFV eligible. Anything else,
/// including "Not eligible ..." and "Eligibility unknown ...", is not.
pub const ELIGIBLE_STATUSES: &[&str] = &["Clean Alternative Fuel Vehicle Eligible", "Eligible"];

// ---------------------------------------------------------------------------
// EvEntry – typed projection of a RawRecord
// ---------------------------------------------------------------------------

/// A single registered vehicle. Every attribute is optional: a missing or
/// blank cell is `None`, never an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvEntry {
    pub vin: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub model_year: Option<String>,
    /// e.g. "Battery Electric Vehicle (BEV)".
    pub vehicle_type: Option<String>,
    /// Miles. Non-numeric cells are treated as absent.
    pub electric_range: Option<f64>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub cafv_eligibility: Option<String>,
}

impl EvEntry {
    pub fn from_raw(raw: &RawRecord) -> Self {
        let text = |key: &str| -> Option<String> {
            raw.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        EvEntry {
            vin: text(columns::VIN),
            manufacturer: text(columns::MAKE),
            model: text(columns::MODEL),
            model_year: text(columns::MODEL_YEAR),
            vehicle_type: text(columns::VEHICLE_TYPE),
            electric_range: text(columns::ELECTRIC_RANGE)
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite()),
            city: text(columns::CITY),
            county: text(columns::COUNTY),
            state: text(columns::STATE),
            postal_code: text(columns::POSTAL_CODE),
            cafv_eligibility: text(columns::CAFV_ELIGIBILITY),
        }
    }

    /// Exact match against [`ELIGIBLE_STATUSES`]; substring tests would also
    /// accept "Not eligible due to low battery range".
    pub fn is_cafv_eligible(&self) -> bool {
        self.cafv_eligibility
            .as_deref()
            .is_some_and(|status| ELIGIBLE_STATUSES.contains(&status))
    }
}

// ---------------------------------------------------------------------------
// EvDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// All loaded entries plus the manufacturer universe of the unfiltered set.
#[derive(Debug, Clone, Default)]
pub struct EvDataset {
    pub entries: Vec<EvEntry>,
    /// Distinct manufacturers in first-occurrence order.
    pub manufacturers: Vec<String>,
}

impl EvDataset {
    pub fn from_entries(entries: Vec<EvEntry>) -> Self {
        let mut seen = HashSet::new();
        let manufacturers = entries
            .iter()
            .filter_map(|e| e.manufacturer.as_deref())
            .filter(|m| seen.insert(*m))
            .map(str::to_string)
            .collect();

        EvDataset {
            entries,
            manufacturers,
        }
    }

    pub fn from_raw_records(records: &[RawRecord]) -> Self {
        Self::from_entries(records.iter().map(EvEntry::from_raw).collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn blank_and_missing_cells_are_absent() {
        let entry = EvEntry::from_raw(&raw(&[
            (columns::MAKE, "TESLA"),
            (columns::MODEL, "   "),
            (columns::ELECTRIC_RANGE, "n/a"),
        ]));

        assert_eq!(entry.manufacturer.as_deref(), Some("TESLA"));
        assert_eq!(entry.model, None);
        assert_eq!(entry.electric_range, None);
        assert_eq!(entry.city, None);
    }

    #[test]
    fn electric_range_is_numeric() {
        let entry = EvEntry::from_raw(&raw(&[(columns::ELECTRIC_RANGE, " 215 ")]));
        assert_eq!(entry.electric_range, Some(215.0));
    }

    #[test]
    fn eligibility_is_not_a_substring_test() {
        let status = |s: &str| EvEntry {
            cafv_eligibility: Some(s.to_string()),
            ..Default::default()
        };

        assert!(status("Eligible").is_cafv_eligible());
        assert!(status("Clean Alternative Fuel Vehicle Eligible").is_cafv_eligible());
        assert!(!status("Not eligible due to low battery range").is_cafv_eligible());
        assert!(!status("Eligibility unknown as battery range has not been researched")
            .is_cafv_eligible());
        assert!(!EvEntry::default().is_cafv_eligible());
    }

    #[test]
    fn manufacturer_universe_is_deduplicated_in_first_occurrence_order() {
        let ds = EvDataset::from_raw_records(&[
            raw(&[(columns::MAKE, "NISSAN")]),
            raw(&[(columns::MAKE, "TESLA")]),
            raw(&[]),
            raw(&[(columns::MAKE, "NISSAN")]),
        ]);

        assert_eq!(ds.len(), 4);
        assert_eq!(ds.manufacturers, vec!["NISSAN", "TESLA"]);
    }
}
