use std::path::PathBuf;

use crate::chart::{self, ChartSlots, Slot};
use crate::config::{DashboardConfig, DisplayRange};
use crate::data::dataset::{DashboardData, Summary};
use crate::data::loader::{LoadError, load_dashboard};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Parsed datasets (None until a load succeeds).
    pub data: Option<DashboardData>,

    /// Stats panel figures for `data` (cached).
    pub summary: Option<Summary>,

    /// The chart currently shown in each slot.
    pub charts: ChartSlots,

    /// Row window for the close / SMA chart.
    pub range: DisplayRange,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let range = config.default_range;
        Self {
            config,
            data: None,
            summary: None,
            charts: ChartSlots::default(),
            range,
            status_message: None,
        }
    }

    /// Load every dataset from the configured directory.
    ///
    /// On failure all charts are released and no partial data is kept.
    pub fn reload(&mut self) {
        match load_dashboard(&self.config) {
            Ok(data) => self.set_data(data),
            Err(e) => self.fail(e),
        }
    }

    /// Point the dashboard at another data directory and reload.
    pub fn open_dir(&mut self, dir: PathBuf) {
        log::info!("Switching data directory to {}", dir.display());
        self.config.data_dir = dir;
        self.reload();
    }

    /// Ingest freshly loaded datasets and rebuild every chart.
    pub fn set_data(&mut self, data: DashboardData) {
        self.charts
            .install(Slot::AvgCloseByYear, chart::avg_close_by_year(&data.monthly));
        self.charts
            .install(Slot::VolumeByYear, chart::volume_by_year(&data.monthly));
        self.charts.install(
            Slot::ReturnsHistogram,
            chart::returns_histogram(&data.returns, self.config.histogram_bins),
        );
        self.charts.install(
            Slot::CloseVsSma,
            chart::close_vs_sma(&data.moving_avg, self.range),
        );

        self.summary = Some(data.summary());
        self.data = Some(data);
        self.status_message = None;
    }

    fn fail(&mut self, err: LoadError) {
        let err = anyhow::Error::from(err);
        log::error!("Dashboard failed to load data: {err:#}");
        self.charts.clear();
        self.data = None;
        self.summary = None;
        self.status_message = Some(format!(
            "Dashboard failed to load data from {}: {err:#}",
            self.config.data_dir.display()
        ));
    }

    /// Change the close / SMA window and redraw only that chart.
    pub fn set_range(&mut self, range: DisplayRange) {
        self.range = range;
        if let Some(data) = &self.data {
            self.charts
                .install(Slot::CloseVsSma, chart::close_vs_sma(&data.moving_avg, range));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupied(slots: &ChartSlots) -> usize {
        Slot::ALL.iter().filter(|s| slots.get(**s).is_some()).count()
    }

    fn fixture_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("monthly_summary.csv"),
            "year,avg_close,total_volume\n2023,140,1200\n2024,150,1300\n",
        )
        .unwrap();
        let mut moving = String::from("trade_date,close,sma_30\n");
        for day in 1..=31 {
            moving.push_str(&format!("2024-01-{day:02},{day},{}\n", day as f64 - 0.5));
        }
        std::fs::write(dir.path().join("moving_avg.csv"), moving).unwrap();
        std::fs::write(
            dir.path().join("daily_returns.csv"),
            "trade_date,daily_return\n2024-01-02,0.01\n2024-01-03,0.03\n",
        )
        .unwrap();
        dir
    }

    fn state_for(dir: &tempfile::TempDir) -> AppState {
        AppState::new(DashboardConfig {
            data_dir: dir.path().to_path_buf(),
            default_range: DisplayRange::Last(30),
            ..Default::default()
        })
    }

    #[test]
    fn reload_fills_every_slot() {
        let dir = fixture_dir();
        let mut state = state_for(&dir);
        state.reload();

        assert_eq!(occupied(&state.charts), 4);
        assert_eq!(state.charts.get(Slot::CloseVsSma).unwrap().labels.len(), 30);
        let summary = state.summary.as_ref().unwrap();
        assert_eq!(summary.latest_date.as_deref(), Some("2024-01-31"));
        assert_eq!(summary.moving_avg_rows, 31);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn set_range_redraws_close_chart_only() {
        let dir = fixture_dir();
        let mut state = state_for(&dir);
        state.reload();
        let hist_before = state.charts.get(Slot::ReturnsHistogram).cloned();

        state.set_range(DisplayRange::All);
        assert_eq!(state.charts.get(Slot::CloseVsSma).unwrap().labels.len(), 31);
        assert_eq!(state.charts.get(Slot::ReturnsHistogram).cloned(), hist_before);
    }

    #[test]
    fn failed_reload_releases_all_charts() {
        let dir = fixture_dir();
        let mut state = state_for(&dir);
        state.reload();
        assert_eq!(occupied(&state.charts), 4);

        std::fs::remove_file(dir.path().join("daily_returns.csv")).unwrap();
        state.reload();

        assert_eq!(occupied(&state.charts), 0);
        assert!(state.data.is_none());
        assert!(state.summary.is_none());
        let msg = state.status_message.as_deref().unwrap();
        assert!(msg.contains("daily_returns.csv"));
    }

    #[test]
    fn failed_reload_reports_underlying_io_cause() {
        let dir = fixture_dir();
        let missing = dir.path().join("daily_returns.csv");
        std::fs::remove_file(&missing).unwrap();
        let io_cause = std::fs::read_to_string(&missing).unwrap_err().to_string();

        let mut state = state_for(&dir);
        state.reload();

        let msg = state.status_message.as_deref().unwrap();
        assert!(msg.contains("failed to read daily_returns.csv"));
        assert!(msg.ends_with(&format!(": {io_cause}")), "{msg}");
    }

    #[test]
    fn failed_reload_reports_schema_error() {
        let dir = fixture_dir();
        std::fs::write(dir.path().join("moving_avg.csv"), "trade_date,close
2024-01-02,10
")
            .unwrap();
        let mut state = state_for(&dir);
        state.reload();

        let msg = state.status_message.as_deref().unwrap();
        assert!(msg.contains("moving_avg.csv headers not detected"), "{msg}");
        assert_eq!(occupied(&state.charts), 0);
    }
}
