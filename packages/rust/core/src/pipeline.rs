//! End-to-end view preparation: CSV → raw rows → cleaned rows → filtered rows.
//!
//! Every invocation reads the dataset fresh; nothing is cached between views.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{info, instrument};

use curry_shared::{CleanedOrderRecord, Result, ViewConfig};

use crate::clean::clean;
use crate::filter::OrderFilter;
use crate::ingest::read_orders;

/// The dashboard views, each with its own filter criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Order volume, traffic mix, locations. Filters: date, traffic.
    Company,
    /// Courier ratings and speed. Filters: date, traffic, weather.
    Couriers,
    /// Distance and delivery time. Filters: date, traffic, weather.
    Restaurants,
}

impl View {
    /// The filter this view applies under `config`.
    pub fn filter(self, config: &ViewConfig) -> OrderFilter {
        match self {
            Self::Company => OrderFilter::date_and_traffic(config),
            Self::Couriers | Self::Restaurants => OrderFilter::date_traffic_and_weather(config),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Couriers => "couriers",
            Self::Restaurants => "restaurants",
        }
    }
}

/// Cleaned and filtered rows for one view, with row counts per stage.
#[derive(Debug)]
pub struct PreparedView {
    /// Rows read from the CSV.
    pub raw_count: usize,
    /// Rows left after cleaning.
    pub cleaned_count: usize,
    /// Rows left after filtering.
    pub rows: Vec<CleanedOrderRecord>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when the pipeline completes.
    fn done(&self, view: &PreparedView);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self, _view: &PreparedView) {}
}

/// Read and clean the dataset without filtering.
pub fn load_cleaned(path: &Path, progress: &dyn ProgressReporter) -> Result<PreparedView> {
    prepare(path, &OrderFilter::default(), progress)
}

/// Read, clean, and filter the dataset for `view`.
///
/// 1. Read the CSV named by the config
/// 2. Clean
/// 3. Apply the view's date and category filters
#[instrument(skip_all, fields(view = view.name(), path = %config.dataset_path.display()))]
pub fn prepare_view(
    view: View,
    config: &ViewConfig,
    progress: &dyn ProgressReporter,
) -> Result<PreparedView> {
    prepare(&config.dataset_path, &view.filter(config), progress)
}

fn prepare(
    path: &Path,
    filter: &OrderFilter,
    progress: &dyn ProgressReporter,
) -> Result<PreparedView> {
    let start = Instant::now();

    progress.phase("Reading dataset");
    let raw = read_orders(path)?;
    let raw_count = raw.len();

    progress.phase("Cleaning");
    let cleaned = clean(raw)?;
    let cleaned_count = cleaned.len();

    progress.phase("Filtering");
    let rows = filter.apply(cleaned);

    let prepared = PreparedView {
        raw_count,
        cleaned_count,
        rows,
        elapsed: start.elapsed(),
    };
    info!(
        raw = prepared.raw_count,
        cleaned = prepared.cleaned_count,
        kept = prepared.rows.len(),
        elapsed_ms = prepared.elapsed.as_millis() as u64,
        "view prepared"
    );
    progress.done(&prepared);

    Ok(prepared)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    use chrono::NaiveDate;
    use curry_shared::{AppConfig, DashboardError};
    use uuid::Uuid;

    use super::*;
    use crate::ingest::tests::sample_csv;

    /// Records phase names for assertions.
    #[derive(Default)]
    struct Recorder {
        phases: RefCell<Vec<String>>,
    }

    impl ProgressReporter for Recorder {
        fn phase(&self, name: &str) {
            self.phases.borrow_mut().push(name.to_string());
        }
        fn done(&self, _view: &PreparedView) {
            self.phases.borrow_mut().push("done".into());
        }
    }

    fn write_sample(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("curry-pipeline-{}.csv", Uuid::now_v7()));
        std::fs::write(&path, contents).expect("write sample csv");
        path
    }

    fn view_config(path: PathBuf) -> ViewConfig {
        let mut config = ViewConfig::try_from(&AppConfig::default()).expect("defaults");
        config.dataset_path = path;
        config
    }

    #[test]
    fn load_cleaned_drops_sentinel_rows() {
        let path = write_sample(&sample_csv());
        let recorder = Recorder::default();
        let result = load_cleaned(&path, &recorder);
        let _ = std::fs::remove_file(&path);

        let view = result.expect("pipeline");
        assert_eq!(view.raw_count, 3);
        assert_eq!(view.cleaned_count, 2);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].id, "0x4607");
        assert_eq!(
            *recorder.phases.borrow(),
            vec!["Reading dataset", "Cleaning", "Filtering", "done"]
        );
    }

    #[test]
    fn views_apply_their_own_filters() {
        let path = write_sample(&sample_csv());
        let mut config = view_config(path.clone());
        config.weather = Some(BTreeSet::from(["conditions Sunny".to_string()]));

        let company = prepare_view(View::Company, &config, &SilentProgress);
        let couriers = prepare_view(View::Couriers, &config, &SilentProgress);
        let _ = std::fs::remove_file(&path);

        // company ignores weather; couriers keeps only the sunny order
        assert_eq!(company.expect("company").rows.len(), 2);
        let couriers = couriers.expect("couriers");
        assert_eq!(couriers.rows.len(), 1);
        assert_eq!(couriers.rows[0].weather_conditions, "conditions Sunny");
    }

    #[test]
    fn cutoff_applies_before_reporting() {
        let path = write_sample(&sample_csv());
        let mut config = view_config(path.clone());
        config.cutoff = NaiveDate::from_ymd_opt(2022, 3, 19);
        let result = prepare_view(View::Restaurants, &config, &SilentProgress);
        let _ = std::fs::remove_file(&path);

        let view = result.expect("pipeline");
        assert_eq!(view.cleaned_count, 2);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn malformed_value_aborts_view() {
        let path = write_sample(&sample_csv().replacen(",37,", ",abc,", 1));
        let result = load_cleaned(&path, &SilentProgress);
        let _ = std::fs::remove_file(&path);

        match result.unwrap_err() {
            DashboardError::MalformedNumeric { row, value, .. } => {
                assert_eq!(row, 1);
                assert_eq!(value, "abc");
            }
            other => panic!("expected malformed numeric, got {other:?}"),
        }
    }
}
