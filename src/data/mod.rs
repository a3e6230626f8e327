/// Data layer: parsing, coercion, statistics and dataset loading.
///
/// Architecture:
/// ```text
///  monthly_summary.csv / moving_avg.csv / daily_returns.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read the three files (concurrently)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   csv     │  tokenize lines, normalize headers → Vec<Record>
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ columns/coerce│  resolve header aliases, cells → Numeric
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ dataset   │  sorted typed series + summary (stats)
///   └──────────┘
/// ```

pub mod coerce;
pub mod columns;
pub mod csv;
pub mod dataset;
pub mod loader;
pub mod model;
pub mod stats;
