use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::columns::SchemaError;
use super::csv::parse_csv;
use super::dataset::{DashboardData, MonthlySeries, MovingAverageSeries, ReturnsSeries};
use crate::config::DashboardConfig;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons a dashboard load is aborted. Either one leaves nothing rendered.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {dataset} from {}", .path.display())]
    Retrieval {
        dataset: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read, parse and derive all three datasets named by `config`.
///
/// The files are read concurrently; parsing starts once all three are in
/// memory. The first failure (in monthly, moving-average, returns order)
/// aborts the whole load.
pub fn load_dashboard(config: &DashboardConfig) -> Result<DashboardData, LoadError> {
    let monthly_path = config.monthly_path();
    let moving_path = config.moving_avg_path();
    let returns_path = config.returns_path();

    let (monthly_text, moving_text, returns_text) = std::thread::scope(|s| {
        let monthly = s.spawn(|| read_dataset(&config.monthly_file, &monthly_path));
        let moving = s.spawn(|| read_dataset(&config.moving_avg_file, &moving_path));
        let returns = s.spawn(|| read_dataset(&config.returns_file, &returns_path));
        (
            join_reader(monthly, &config.monthly_file, &monthly_path),
            join_reader(moving, &config.moving_avg_file, &moving_path),
            join_reader(returns, &config.returns_file, &returns_path),
        )
    });
    let (monthly_text, moving_text, returns_text) = (monthly_text?, moving_text?, returns_text?);

    let monthly = MonthlySeries::from_records(&config.monthly_file, &parse_csv(&monthly_text))?;
    let moving_avg =
        MovingAverageSeries::from_records(&config.moving_avg_file, &parse_csv(&moving_text))?;
    let returns = ReturnsSeries::from_records(&config.returns_file, &parse_csv(&returns_text))?;

    log::info!(
        "Loaded dashboard data from {}: {} yearly, {} moving-average, {} return rows",
        config.data_dir.display(),
        monthly.len(),
        moving_avg.len(),
        returns.len()
    );

    Ok(DashboardData {
        monthly,
        moving_avg,
        returns,
    })
}

fn read_dataset(dataset: &str, path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Retrieval {
        dataset: dataset.to_string(),
        path: path.to_path_buf(),
        source,
    })
}

fn join_reader(
    handle: std::thread::ScopedJoinHandle<'_, Result<String, LoadError>>,
    dataset: &str,
    path: &Path,
) -> Result<String, LoadError> {
    handle.join().unwrap_or_else(|_| {
        Err(LoadError::Retrieval {
            dataset: dataset.to_string(),
            path: path.to_path_buf(),
            source: io::Error::other("reader thread panicked"),
        })
    })
}
