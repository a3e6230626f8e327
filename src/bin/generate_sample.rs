use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

const SMA_WINDOW: usize = 30;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One simulated trading day.
struct Day {
    date: NaiveDate,
    close: f64,
    volume: u64,
    daily_return: Option<f64>,
}

/// Geometric random walk over weekdays from `start` to `end` inclusive.
fn simulate(start: NaiveDate, end: NaiveDate, rng: &mut SimpleRng) -> Vec<Day> {
    let mut days = Vec::new();
    let mut close = 100.0;
    let mut prev: Option<f64> = None;
    let mut date = start;

    while date <= end {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            close *= 1.0 + rng.gauss(0.0004, 0.012);
            let volume = (rng.gauss(2_500_000.0, 600_000.0).max(100_000.0)) as u64;
            days.push(Day {
                date,
                close,
                volume,
                daily_return: prev.map(|p| close / p - 1.0),
            });
            prev = Some(close);
        }
        date += Duration::days(1);
    }
    days
}

fn write_moving_avg(path: &Path, days: &[Day]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["trade_date", "close", "sma_30"])?;
    for (i, day) in days.iter().enumerate() {
        let sma = if i + 1 >= SMA_WINDOW {
            let window = &days[i + 1 - SMA_WINDOW..=i];
            format!("{:.4}", window.iter().map(|d| d.close).sum::<f64>() / SMA_WINDOW as f64)
        } else {
            String::new()
        };
        writer.write_record([day.date.to_string(), format!("{:.4}", day.close), sma])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_returns(path: &Path, days: &[Day]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["trade_date", "daily_return"])?;
    for day in days {
        let ret = day.daily_return.map(|r| format!("{r:.6}")).unwrap_or_default();
        writer.write_record([day.date.to_string(), ret])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_monthly_summary(path: &Path, days: &[Day]) -> Result<()> {
    // year → (sum close, trading days, total volume)
    let mut by_year: BTreeMap<i32, (f64, usize, u64)> = BTreeMap::new();
    for day in days {
        let entry = by_year.entry(day.date.year()).or_default();
        entry.0 += day.close;
        entry.1 += 1;
        entry.2 += day.volume;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["year", "avg_close", "total_volume"])?;
    for (year, (sum, n, volume)) in by_year {
        writer.write_record([
            year.to_string(),
            format!("{:.4}", sum / n as f64),
            volume.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let out_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let start = NaiveDate::from_ymd_opt(2019, 1, 1).context("invalid start date")?;
    let end = NaiveDate::from_ymd_opt(2025, 12, 31).context("invalid end date")?;
    let mut rng = SimpleRng::new(42);
    let days = simulate(start, end, &mut rng);

    write_monthly_summary(&out_dir.join("monthly_summary.csv"), &days)?;
    write_moving_avg(&out_dir.join("moving_avg.csv"), &days)?;
    write_returns(&out_dir.join("daily_returns.csv"), &days)?;

    println!(
        "Wrote {} trading days ({} to {}) to {}",
        days.len(),
        start,
        end,
        out_dir.display()
    );
    Ok(())
}
