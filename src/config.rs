use anyhow::{bail, Result};

use crate::data::loader::DatasetSource;

/// Environment variable overriding the dataset location (path or URL).
pub const DATASET_ENV: &str = "EV_DATASET";
pub const DEFAULT_DATASET: &str = "Electric_Vehicle_Population_Data.csv";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub dataset: DatasetSource,
    /// Table rows per page.
    pub page_size: usize,
    /// Maximum number of bars in the range chart.
    pub chart_limit: usize,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetSource::parse(DEFAULT_DATASET),
            page_size: 10,
            chart_limit: 50,
            window_size: [1280.0, 900.0],
            min_window_size: [800.0, 600.0],
        }
    }
}

impl DashboardConfig {
    /// Defaults, with the dataset location taken from `EV_DATASET` if set.
    pub fn from_env() -> Result<Self> {
        Self::with_dataset(std::env::var(DATASET_ENV).ok().as_deref())
    }

    fn with_dataset(location: Option<&str>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(location) = location {
            let location = location.trim();
            if location.is_empty() {
                bail!("{DATASET_ENV} is set but empty");
            }
            config.dataset = DatasetSource::parse(location);
        }
        Ok(config)
    }
}
