/// Data layer: records, loading, filtering, aggregation and view projection.
///
/// Architecture:
/// ```text
///   .csv / .json  (file or URL)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch + parse → Vec<RawRecord> → EvDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  manufacturer selector → filtered indices
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌───────────┐  ┌────────┐
///   │ aggregate  │  │  view   │  rows, pages, chart data, cards, choices
///   └───────────┘  └────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
pub mod view;
