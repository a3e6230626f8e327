use thiserror::Error;

use super::model::Record;

// ---------------------------------------------------------------------------
// Logical columns and their header aliases
// ---------------------------------------------------------------------------

/// A logical column and the header keys accepted for it, in preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

pub const YEAR: ColumnSpec = ColumnSpec {
    name: "year",
    aliases: &["year"],
};
pub const AVG_CLOSE: ColumnSpec = ColumnSpec {
    name: "avg_close",
    aliases: &["avg_close", "average_close", "avgclose"],
};
pub const TOTAL_VOLUME: ColumnSpec = ColumnSpec {
    name: "total_volume",
    aliases: &["total_volume", "volume_total", "sum_volume"],
};
pub const TRADE_DATE: ColumnSpec = ColumnSpec {
    name: "trade_date",
    aliases: &["trade_date", "date"],
};
pub const CLOSE: ColumnSpec = ColumnSpec {
    name: "close",
    aliases: &["close"],
};
pub const SMA_30: ColumnSpec = ColumnSpec {
    name: "sma_30",
    aliases: &["sma_30", "sma30", "moving_average_30", "ma_30"],
};
pub const DAILY_RETURN: ColumnSpec = ColumnSpec {
    name: "daily_return",
    aliases: &["daily_return", "returns", "return", "daily_returns"],
};

/// Return the first alias present in `keys`, if any.
pub fn resolve<'a, S: AsRef<str>>(keys: &[S], aliases: &[&'a str]) -> Option<&'a str> {
    aliases
        .iter()
        .copied()
        .find(|alias| keys.iter().any(|k| k.as_ref() == *alias))
}

// ---------------------------------------------------------------------------
// Dataset-level resolution
// ---------------------------------------------------------------------------

/// Required columns that could not be found in a dataset's first row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{dataset} headers not detected. Expected {}{}", expected(.missing), found_suffix(.found))]
pub struct SchemaError {
    pub dataset: String,
    pub missing: Vec<ColumnSpec>,
    /// Keys that were present, for the error message.
    pub found: Vec<String>,
}

fn expected(missing: &[ColumnSpec]) -> String {
    missing
        .iter()
        .map(|c| format!("{} (any of: {})", c.name, c.aliases.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

fn found_suffix(found: &[String]) -> String {
    if found.is_empty() {
        "; the file has no data rows".to_string()
    } else {
        format!("; found: {}", found.join(", "))
    }
}

/// Resolve every column in `specs` against the first record of a dataset.
///
/// Returns the matched header key per spec, in the same order. An empty
/// dataset has no first row, so every required column is reported missing.
pub fn resolve_all(
    dataset: &str,
    first: Option<&Record>,
    specs: &[ColumnSpec],
) -> Result<Vec<&'static str>, SchemaError> {
    let keys: &[String] = first.map(Record::keys).unwrap_or(&[]);
    let mut resolved = Vec::with_capacity(specs.len());
    let mut missing = Vec::new();

    for spec in specs {
        match resolve(keys, spec.aliases) {
            Some(key) => {
                log::debug!("{dataset}: column {} resolved to '{key}'", spec.name);
                resolved.push(key);
            }
            None => missing.push(*spec),
        }
    }

    if missing.is_empty() {
        Ok(resolved)
    } else {
        Err(SchemaError {
            dataset: dataset.to_string(),
            missing,
            found: keys.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::csv::parse_csv;

    #[test]
    fn resolve_picks_first_present_alias() {
        let keys = ["date", "close"];
        assert_eq!(resolve(&keys, &["trade_date", "date"]), Some("date"));
        assert_eq!(resolve(&["trade_date", "date"], &["trade_date", "date"]), Some("trade_date"));
    }

    #[test]
    fn resolve_reports_not_found() {
        let keys = ["close", "volume"];
        assert_eq!(resolve(&keys, &["trade_date", "date"]), None);
        assert_eq!(resolve::<&str>(&[], &["year"]), None);
    }

    #[test]
    fn resolve_all_maps_aliases() {
        let recs = parse_csv("Date,Close,SMA30\n2024-01-02,10,9.5\n");
        let keys = resolve_all("moving_avg.csv", recs.first(), &[TRADE_DATE, CLOSE, SMA_30])
            .expect("all columns present");
        assert_eq!(keys, vec!["date", "close", "sma30"]);
    }

    #[test]
    fn resolve_all_names_missing_columns() {
        let recs = parse_csv("trade_date,close\n2024-01-02,10\n");
        let err = resolve_all("moving_avg.csv", recs.first(), &[TRADE_DATE, CLOSE, SMA_30])
            .unwrap_err();
        assert_eq!(err.missing, vec![SMA_30]);
        let msg = err.to_string();
        assert!(msg.contains("moving_avg.csv"));
        assert!(msg.contains("sma_30"));
        assert!(msg.contains("moving_average_30"));
    }

    #[test]
    fn resolve_all_on_empty_dataset_fails() {
        let err = resolve_all("daily_returns.csv", None, &[TRADE_DATE, DAILY_RETURN]).unwrap_err();
        assert_eq!(err.missing.len(), 2);
        assert!(err.to_string().contains("no data rows"));
    }

    #[test]
    fn schema_error_message_lists_expected_and_found() {
        let recs = parse_csv("year,close\n2024,10\n");
        let err = resolve_all("monthly_summary.csv", recs.first(), &[YEAR, AVG_CLOSE, TOTAL_VOLUME])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "monthly_summary.csv headers not detected. \
             Expected avg_close (any of: avg_close, average_close, avgclose); \
             total_volume (any of: total_volume, volume_total, sum_volume); \
             found: year, close"
        );
        assert!(std::error::Error::source(&err).is_none());
    }
}
