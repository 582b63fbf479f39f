//! Presentation contracts: everything the table, charts, cards and the
//! manufacturer picker consume. Nothing here knows about egui.

use serde::Serialize;

use super::aggregate::{EligibilitySplit, RangePoint, Summary, TypeCounts, NOT_AVAILABLE};
use super::model::{EvDataset, EvEntry};
use crate::color::{generate_palette, Rgb};

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// One flattened table row. `id` is the entry's position in the full
/// dataset, so it stays stable across filter changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub id: usize,
    pub vehicle: String,
    pub model_year: String,
    pub city: String,
    pub county: String,
    pub state: String,
    pub electric_range: String,
    pub cafv_eligibility: String,
}

impl DisplayRow {
    pub fn from_entry(id: usize, entry: &EvEntry) -> Self {
        let or_na = |v: &Option<String>| v.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string());

        DisplayRow {
            id,
            vehicle: format!(
                "{} - {}",
                entry.manufacturer.as_deref().unwrap_or(NOT_AVAILABLE),
                entry.model.as_deref().unwrap_or(NOT_AVAILABLE)
            ),
            model_year: or_na(&entry.model_year),
            city: or_na(&entry.city),
            county: or_na(&entry.county),
            state: or_na(&entry.state),
            electric_range: entry
                .electric_range
                .map_or_else(|| NOT_AVAILABLE.to_string(), |r| r.to_string()),
            cafv_eligibility: or_na(&entry.cafv_eligibility),
        }
    }

    /// Cell text for a column key from [`COLUMNS`].
    pub fn cell(&self, field: &str) -> String {
        match field {
            "id" => self.id.to_string(),
            "vehicle" => self.vehicle.clone(),
            "model_year" => self.model_year.clone(),
            "city" => self.city.clone(),
            "county" => self.county.clone(),
            "state" => self.state.clone(),
            "electric_range" => self.electric_range.clone(),
            "cafv_eligibility" => self.cafv_eligibility.clone(),
            _ => NOT_AVAILABLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    pub field: &'static str,
    pub header: &'static str,
    pub width: f32,
}

pub const COLUMNS: &[ColumnDescriptor] = &[
    ColumnDescriptor {
        field: "id",
        header: "ID",
        width: 60.0,
    },
    ColumnDescriptor {
        field: "vehicle",
        header: "Vehicle",
        width: 200.0,
    },
    ColumnDescriptor {
        field: "model_year",
        header: "Year",
        width: 70.0,
    },
    ColumnDescriptor {
        field: "city",
        header: "City",
        width: 120.0,
    },
    ColumnDescriptor {
        field: "county",
        header: "County",
        width: 110.0,
    },
    ColumnDescriptor {
        field: "state",
        header: "State",
        width: 60.0,
    },
    ColumnDescriptor {
        field: "electric_range",
        header: "Range (mi)",
        width: 90.0,
    },
    ColumnDescriptor {
        field: "cafv_eligibility",
        header: "CAFV Eligibility",
        width: 320.0,
    },
];

/// Project the filtered entries (given by index into the full set) to rows.
pub fn display_rows(entries: &[EvEntry], indices: &[usize]) -> Vec<DisplayRow> {
    indices
        .iter()
        .filter_map(|&i| entries.get(i).map(|e| DisplayRow::from_entry(i, e)))
        .collect()
}

/// One page of the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a> {
    pub rows: &'a [DisplayRow],
    /// Zero-based, already clamped.
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
}

/// Slice out `page` of `rows`. Out-of-range pages clamp to the last page;
/// an empty table still has one (empty) page.
pub fn paginate(rows: &[DisplayRow], page: usize, page_size: usize) -> Page<'_> {
    let page_size = page_size.max(1);
    let page_count = rows.len().div_ceil(page_size).max(1);
    let page = page.min(page_count - 1);
    let start = (page * page_size).min(rows.len());
    let end = (start + page_size).min(rows.len());

    Page {
        rows: &rows[start..end],
        page,
        page_count,
        total: rows.len(),
    }
}

// ---------------------------------------------------------------------------
// Manufacturer picker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub label: String,
}

pub fn manufacturer_choices(dataset: &EvDataset) -> Vec<Choice> {
    dataset
        .manufacturers
        .iter()
        .map(|m| Choice { label: m.clone() })
        .collect()
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStyle {
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub values: Vec<f64>,
    pub styling: SeriesStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BarChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Bar chart of the first `limit` points of the range series.
pub fn range_chart(series: &[RangePoint], limit: usize) -> BarChartData {
    let shown = &series[..series.len().min(limit)];
    let color = generate_palette(1, 210.0)[0];

    BarChartData {
        labels: shown.iter().map(|p| p.label.clone()).collect(),
        datasets: vec![Dataset {
            label: "Electric Range (miles)".to_string(),
            values: shown.iter().map(|p| p.value).collect(),
            styling: SeriesStyle { color },
        }],
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChartData {
    pub labels: [String; 2],
    pub values: [usize; 2],
    pub colors: [Rgb; 2],
}

pub fn eligibility_chart(split: EligibilitySplit) -> PieChartData {
    let palette = generate_palette(2, 120.0);
    PieChartData {
        labels: ["CAFV Eligible".to_string(), "Not Eligible".to_string()],
        values: [split.eligible, split.not_eligible],
        colors: [palette[0], palette[1]],
    }
}

// ---------------------------------------------------------------------------
// Summary cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCard {
    pub label: String,
    pub value: String,
}

impl SummaryCard {
    fn new(label: impl Into<String>, value: impl ToString) -> Self {
        SummaryCard {
            label: label.into(),
            value: value.to_string(),
        }
    }
}

pub fn summary_cards(
    summary: &Summary,
    types: &TypeCounts,
    split: EligibilitySplit,
) -> Vec<SummaryCard> {
    let mut cards = vec![
        SummaryCard::new("Total Vehicles", summary.total),
        SummaryCard::new("Manufacturers", summary.manufacturers),
    ];
    cards.extend(types.iter().map(|(label, n)| SummaryCard::new(label, n)));
    cards.push(SummaryCard::new("CAFV Eligible", split.eligible));
    cards.push(SummaryCard::new(
        "Average Range",
        summary
            .mean_range
            .map_or_else(|| NOT_AVAILABLE.to_string(), |r| format!("{r:.0} mi")),
    ));
    cards
}
