//! Renderer-agnostic chart descriptions.
//!
//! A [`ChartSpec`] is everything the plotting layer needs: a title, ordered
//! x labels, and one or more series of the same length. Absent points are
//! kept as [`Numeric::Absent`] so the renderer can draw gaps.

use crate::config::DisplayRange;
use crate::data::dataset::{MonthlySeries, MovingAverageSeries, ReturnsSeries};
use crate::data::model::Numeric;
use crate::data::stats::Histogram;

/// Returns are stored as fractions and displayed as percentages.
pub const PERCENT_SCALE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<Numeric>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartSpec {
    fn new(title: &str, kind: ChartKind, labels: Vec<String>, series: Vec<Series>) -> Self {
        debug_assert!(series.iter().all(|s| s.values.len() == labels.len()));
        ChartSpec {
            title: title.to_string(),
            kind,
            labels,
            series,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn series(name: &str, values: Vec<Numeric>) -> Series {
    Series {
        name: name.to_string(),
        values,
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn avg_close_by_year(monthly: &MonthlySeries) -> ChartSpec {
    ChartSpec::new(
        "Average Close by Year",
        ChartKind::Line,
        monthly.years.clone(),
        vec![series("Avg Close", monthly.avg_close.clone())],
    )
}

pub fn volume_by_year(monthly: &MonthlySeries) -> ChartSpec {
    ChartSpec::new(
        "Total Volume by Year",
        ChartKind::Bar,
        monthly.years.clone(),
        vec![series("Total Volume", monthly.total_volume.clone())],
    )
}

/// Close and SMA over the last rows selected by `range`.
pub fn close_vs_sma(moving: &MovingAverageSeries, range: DisplayRange) -> ChartSpec {
    ChartSpec::new(
        "Close vs 30-Day Moving Average",
        ChartKind::Line,
        range.take_last(&moving.dates).to_vec(),
        vec![
            series("Close", range.take_last(&moving.close).to_vec()),
            series("SMA 30", range.take_last(&moving.sma_30).to_vec()),
        ],
    )
}

pub fn returns_histogram(returns: &ReturnsSeries, bins: usize) -> ChartSpec {
    let histogram = Histogram::build(&returns.finite_returns(), bins);
    ChartSpec::new(
        "Distribution of Daily Returns",
        ChartKind::Bar,
        histogram.labels(PERCENT_SCALE, 1, "%"),
        vec![series(
            "Count",
            histogram
                .counts()
                .into_iter()
                .map(|c| Numeric::Value(c as f64))
                .collect(),
        )],
    )
}

// ---------------------------------------------------------------------------
// Chart slots
// ---------------------------------------------------------------------------

/// The dashboard's fixed chart positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    AvgCloseByYear,
    VolumeByYear,
    CloseVsSma,
    ReturnsHistogram,
}

impl Slot {
    pub const ALL: [Slot; 4] = [
        Slot::AvgCloseByYear,
        Slot::VolumeByYear,
        Slot::CloseVsSma,
        Slot::ReturnsHistogram,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Slot::AvgCloseByYear => "chart_avg_close_year",
            Slot::VolumeByYear => "chart_volume_year",
            Slot::CloseVsSma => "chart_close_sma",
            Slot::ReturnsHistogram => "chart_returns_hist",
        }
    }
}

/// Owns at most one chart per slot.
///
/// Installing a chart drops whatever occupied the slot before.
#[derive(Debug, Default)]
pub struct ChartSlots {
    avg_close_year: Option<ChartSpec>,
    volume_year: Option<ChartSpec>,
    close_sma: Option<ChartSpec>,
    returns_hist: Option<ChartSpec>,
}

impl ChartSlots {
    fn slot_mut(&mut self, slot: Slot) -> &mut Option<ChartSpec> {
        match slot {
            Slot::AvgCloseByYear => &mut self.avg_close_year,
            Slot::VolumeByYear => &mut self.volume_year,
            Slot::CloseVsSma => &mut self.close_sma,
            Slot::ReturnsHistogram => &mut self.returns_hist,
        }
    }

    pub fn get(&self, slot: Slot) -> Option<&ChartSpec> {
        match slot {
            Slot::AvgCloseByYear => self.avg_close_year.as_ref(),
            Slot::VolumeByYear => self.volume_year.as_ref(),
            Slot::CloseVsSma => self.close_sma.as_ref(),
            Slot::ReturnsHistogram => self.returns_hist.as_ref(),
        }
    }

    /// Replace the chart in `slot`, returning the one it displaced.
    pub fn install(&mut self, slot: Slot, chart: ChartSpec) -> Option<ChartSpec> {
        self.slot_mut(slot).replace(chart)
    }

    pub fn release(&mut self, slot: Slot) -> Option<ChartSpec> {
        self.slot_mut(slot).take()
    }

    pub fn clear(&mut self) {
        for slot in Slot::ALL {
            self.release(slot);
        }
    }
}
