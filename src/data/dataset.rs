use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::coerce::to_numeric;
use super::columns::{self, ColumnSpec, SchemaError};
use super::model::{Numeric, Record};
use super::stats;

// ---------------------------------------------------------------------------
// Typed series derived from parsed records
// ---------------------------------------------------------------------------

/// Yearly aggregates, sorted by year.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthlySeries {
    pub years: Vec<String>,
    pub avg_close: Vec<Numeric>,
    pub total_volume: Vec<Numeric>,
}

/// Daily close and its 30-day simple moving average, sorted by date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovingAverageSeries {
    pub dates: Vec<String>,
    pub close: Vec<Numeric>,
    pub sma_30: Vec<Numeric>,
}

/// Daily fractional returns, sorted by date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReturnsSeries {
    pub dates: Vec<String>,
    pub returns: Vec<Numeric>,
}

impl MonthlySeries {
    pub const COLUMNS: [ColumnSpec; 3] = [columns::YEAR, columns::AVG_CLOSE, columns::TOTAL_VOLUME];

    pub fn from_records(dataset: &str, records: &[Record]) -> Result<Self, SchemaError> {
        let keys = columns::resolve_all(dataset, records.first(), &Self::COLUMNS)?;
        let (year, avg_close, volume) = (keys[0], keys[1], keys[2]);

        let mut rows: Vec<&Record> = records.iter().collect();
        // Unparseable years sort as 0, like an unset year.
        rows.sort_by(|a, b| {
            let ya = cell(a, year).value().unwrap_or(0.0);
            let yb = cell(b, year).value().unwrap_or(0.0);
            ya.total_cmp(&yb)
        });

        Ok(MonthlySeries {
            years: rows.iter().map(|r| r.get(year).unwrap_or_default().to_string()).collect(),
            avg_close: rows.iter().map(|r| cell(r, avg_close)).collect(),
            total_volume: rows.iter().map(|r| cell(r, volume)).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }
}

impl MovingAverageSeries {
    pub const COLUMNS: [ColumnSpec; 3] = [columns::TRADE_DATE, columns::CLOSE, columns::SMA_30];

    pub fn from_records(dataset: &str, records: &[Record]) -> Result<Self, SchemaError> {
        let keys = columns::resolve_all(dataset, records.first(), &Self::COLUMNS)?;
        let (date, close, sma) = (keys[0], keys[1], keys[2]);
        let rows = sort_by_date(dataset, records, date);

        Ok(MovingAverageSeries {
            dates: rows.iter().map(|r| r.get(date).unwrap_or_default().to_string()).collect(),
            close: rows.iter().map(|r| cell(r, close)).collect(),
            sma_30: rows.iter().map(|r| cell(r, sma)).collect(),
        })
    }

    /// Most recent date, if any rows were loaded.
    pub fn latest_date(&self) -> Option<&str> {
        self.dates.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }
}

impl ReturnsSeries {
    pub const COLUMNS: [ColumnSpec; 2] = [columns::TRADE_DATE, columns::DAILY_RETURN];

    pub fn from_records(dataset: &str, records: &[Record]) -> Result<Self, SchemaError> {
        let keys = columns::resolve_all(dataset, records.first(), &Self::COLUMNS)?;
        let (date, ret) = (keys[0], keys[1]);
        let rows = sort_by_date(dataset, records, date);

        Ok(ReturnsSeries {
            dates: rows.iter().map(|r| r.get(date).unwrap_or_default().to_string()).collect(),
            returns: rows.iter().map(|r| cell(r, ret)).collect(),
        })
    }

    /// Present returns only, in date order.
    pub fn finite_returns(&self) -> Vec<f64> {
        self.returns.iter().filter_map(|v| v.value()).collect()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }
}

// ---------------------------------------------------------------------------
// DashboardData – all three datasets, loaded together
// ---------------------------------------------------------------------------

/// The three datasets backing one dashboard render.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardData {
    pub monthly: MonthlySeries,
    pub moving_avg: MovingAverageSeries,
    pub returns: ReturnsSeries,
}

/// Figures shown in the stats panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub monthly_rows: usize,
    pub moving_avg_rows: usize,
    pub returns_rows: usize,
    pub latest_date: Option<String>,
    /// Mean daily return as a fraction.
    pub mean_return: Option<f64>,
    /// Sample standard deviation of daily returns as a fraction.
    pub volatility: Option<f64>,
}

impl DashboardData {
    pub fn summary(&self) -> Summary {
        let returns = self.returns.finite_returns();
        Summary {
            monthly_rows: self.monthly.len(),
            moving_avg_rows: self.moving_avg.len(),
            returns_rows: self.returns.len(),
            latest_date: self.moving_avg.latest_date().map(str::to_string),
            mean_return: stats::mean(&returns),
            volatility: stats::std_dev(&returns),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn cell(record: &Record, key: &str) -> Numeric {
    record.get(key).map_or(Numeric::Absent, to_numeric)
}

/// Parse the date formats seen in exported extracts.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

/// Stable ascending sort by date; rows with unparseable dates go last in
/// their original order.
fn sort_by_date<'a>(dataset: &str, records: &'a [Record], key: &str) -> Vec<&'a Record> {
    let mut keyed: Vec<(Option<NaiveDate>, &Record)> = records
        .iter()
        .map(|r| (r.get(key).and_then(parse_date), r))
        .collect();

    let unparsed = keyed.iter().filter(|(d, _)| d.is_none()).count();
    if unparsed > 0 {
        log::warn!("{dataset}: {unparsed} row(s) with unparseable '{key}' sorted last");
    }

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    keyed.into_iter().map(|(_, r)| r).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::csv::parse_csv;

    #[test]
    fn monthly_sorted_by_year_with_gaps() {
        let recs = parse_csv(
            "Year,Average Close,Sum Volume\n2024,150.2,1000\n2022,n/a,800\n2023,140,\n",
        );
        let m = MonthlySeries::from_records("monthly_summary.csv", &recs).unwrap();
        assert_eq!(m.years, vec!["2022", "2023", "2024"]);
        assert_eq!(m.avg_close, vec![Numeric::Absent, Numeric::Value(140.0), Numeric::Value(150.2)]);
        assert_eq!(m.total_volume[1], Numeric::Absent);
    }

    #[test]
    fn monthly_missing_volume_is_schema_error() {
        let recs = parse_csv("year,avg_close\n2024,1\n");
        let err = MonthlySeries::from_records("monthly_summary.csv", &recs).unwrap_err();
        assert_eq!(err.missing, vec![columns::TOTAL_VOLUME]);
    }

    #[test]
    fn moving_avg_sorted_by_date() {
        let recs = parse_csv(
            "date,close,ma_30\n2024-01-03,12,\n2024-01-01,10,9\nbogus,1,1\n2024-01-02,11,9.5\n",
        );
        let mv = MovingAverageSeries::from_records("moving_avg.csv", &recs).unwrap();
        assert_eq!(mv.dates, vec!["2024-01-01", "2024-01-02", "2024-01-03", "bogus"]);
        assert_eq!(mv.sma_30[2], Numeric::Absent);
        assert_eq!(mv.latest_date(), Some("bogus"));
    }

    #[test]
    fn parse_date_accepts_common_layouts() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5);
        assert_eq!(parse_date("2024-03-05"), d);
        assert_eq!(parse_date("2024/03/05"), d);
        assert_eq!(parse_date("03/05/2024"), d);
        assert_eq!(parse_date("2024-03-05T00:00:00Z"), d);
        assert_eq!(parse_date("2024-03-05 16:00:00"), d);
        assert_eq!(parse_date("March 5"), None);
    }

    #[test]
    fn summary_uses_finite_returns() {
        let data = DashboardData {
            returns: ReturnsSeries::from_records(
                "daily_returns.csv",
                &parse_csv("trade_date,returns\n2024-01-01,0.02\n2024-01-02,x\n2024-01-03,0.04\n2024-01-04,0.06\n"),
            )
            .unwrap(),
            ..Default::default()
        };
        let s = data.summary();
        assert_eq!(s.returns_rows, 4);
        assert!((s.mean_return.unwrap() - 0.04).abs() < 1e-12);
        assert!((s.volatility.unwrap() - 0.02).abs() < 1e-12);
        assert_eq!(s.latest_date, None);
    }
}
