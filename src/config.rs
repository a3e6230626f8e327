use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Name of the optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

// ---------------------------------------------------------------------------
// Display range for the close / SMA chart
// ---------------------------------------------------------------------------

/// How many of the most recent rows the close / SMA chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayRange {
    Last(usize),
    All,
}

impl DisplayRange {
    /// Choices offered in the range selector.
    pub const CHOICES: [DisplayRange; 5] = [
        DisplayRange::Last(30),
        DisplayRange::Last(90),
        DisplayRange::Last(180),
        DisplayRange::Last(365),
        DisplayRange::All,
    ];

    /// Keep the last `n` items; `Last(0)` behaves like `All`.
    pub fn take_last<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        match *self {
            DisplayRange::Last(n) if n > 0 => &items[items.len().saturating_sub(n)..],
            _ => items,
        }
    }

    pub fn label(&self) -> String {
        match self {
            DisplayRange::Last(n) => format!("Last {n} days"),
            DisplayRange::All => "All".to_string(),
        }
    }
}

impl Default for DisplayRange {
    fn default() -> Self {
        DisplayRange::Last(180)
    }
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Where the three extracts live and how they are displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub monthly_file: String,
    pub moving_avg_file: String,
    pub returns_file: String,
    pub histogram_bins: usize,
    pub default_range: DisplayRange,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            monthly_file: "monthly_summary.csv".to_string(),
            moving_avg_file: "moving_avg.csv".to_string(),
            returns_file: "daily_returns.csv".to_string(),
            histogram_bins: 24,
            default_range: DisplayRange::default(),
        }
    }
}

impl DashboardConfig {
    /// Read a JSON config file. Unspecified fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, falling back to defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let config = Self::from_file(path)?;
            log::info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            log::warn!("{} not found, using default config", path.display());
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.histogram_bins == 0 {
            bail!("histogram_bins must be at least 1");
        }
        Ok(())
    }

    pub fn monthly_path(&self) -> PathBuf {
        self.data_dir.join(&self.monthly_file)
    }

    pub fn moving_avg_path(&self) -> PathBuf {
        self.data_dir.join(&self.moving_avg_file)
    }

    pub fn returns_path(&self) -> PathBuf {
        self.data_dir.join(&self.returns_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_last_slices_tail() {
        let rows = [1, 2, 3, 4, 5];
        assert_eq!(DisplayRange::Last(2).take_last(&rows), &[4, 5]);
        assert_eq!(DisplayRange::Last(10).take_last(&rows), &rows);
        assert_eq!(DisplayRange::Last(0).take_last(&rows), &rows);
        assert_eq!(DisplayRange::All.take_last(&rows), &rows);
        assert!(DisplayRange::Last(3).take_last::<i32>(&[]).is_empty());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "data_dir": "extracts", "default_range": "all" }"#).unwrap();

        let config = DashboardConfig::from_file(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("extracts"));
        assert_eq!(config.default_range, DisplayRange::All);
        assert_eq!(config.histogram_bins, 24);
        assert_eq!(config.returns_path(), PathBuf::from("extracts/daily_returns.csv"));
    }

    #[test]
    fn range_in_config_uses_tagged_form() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{ "default_range": { "last": 90 } }"#).unwrap();
        assert_eq!(config.default_range, DisplayRange::Last(90));
    }

    #[test]
    fn zero_bins_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "histogram_bins": 0 }"#).unwrap();
        assert!(DashboardConfig::from_file(&path).is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load_or_default(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }
}
