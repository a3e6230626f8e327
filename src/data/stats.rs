//! Summary statistics over numeric sequences.
//!
//! Every function ignores non-finite input, so callers can pass raw series
//! containing NaN without pre-filtering.

/// Span used when all values are identical, keeping `bin_size` non-zero.
const DEGENERATE_SPAN: f64 = 1e-9;

fn finite(values: &[f64]) -> impl Iterator<Item = f64> + '_ {
    values.iter().copied().filter(|v| v.is_finite())
}

/// Arithmetic mean of the finite values, `None` when there are none.
pub fn mean(values: &[f64]) -> Option<f64> {
    let (sum, count) = finite(values).fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Sample standard deviation (Bessel-corrected), `None` below two finite values.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let valid: Vec<f64> = finite(values).collect();
    if valid.len() < 2 {
        return None;
    }
    let m = mean(&valid)?;
    let sum_sq: f64 = valid.iter().map(|v| (v - m).powi(2)).sum();
    Some((sum_sq / (valid.len() - 1) as f64).sqrt())
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// One bin covering `[lower, upper)`; the last bin also holds `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram over `[min, max]` of a sequence.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Histogram {
    pub bins: Vec<Bin>,
}

impl Histogram {
    /// Bucket the finite values into `bin_count` equal-width bins.
    ///
    /// No finite values (or `bin_count == 0`) gives an empty histogram.
    pub fn build(values: &[f64], bin_count: usize) -> Self {
        let valid: Vec<f64> = finite(values).collect();
        if valid.is_empty() || bin_count == 0 {
            return Histogram::default();
        }

        let min = valid.iter().copied().fold(f64::INFINITY, f64::min);
        let max = valid.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // Work on halved values: `max - min` can overflow to infinity for
        // finite extremes, `max / 2 - min / 2` cannot. Halving is exact.
        let half_min = min / 2.0;
        let half_span = if max == min {
            DEGENERATE_SPAN / 2.0
        } else {
            max / 2.0 - half_min
        };
        let half_bin = half_span / bin_count as f64;

        let mut counts = vec![0usize; bin_count];
        for v in &valid {
            let idx = ((v / 2.0 - half_min) / half_bin).floor();
            // `max` lands exactly on index `bin_count`; fold it into the last bin.
            let idx = if idx < 0.0 {
                0
            } else {
                (idx as usize).min(bin_count - 1)
            };
            counts[idx] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| Bin {
                lower: 2.0 * (half_min + i as f64 * half_bin),
                upper: 2.0 * (half_min + (i + 1) as f64 * half_bin),
                count,
            })
            .collect();
        Histogram { bins }
    }

    pub fn counts(&self) -> Vec<usize> {
        self.bins.iter().map(|b| b.count).collect()
    }

    /// Range labels such as `-1.2%–0.4%`.
    ///
    /// Bounds are multiplied by `scale` before formatting, so callers decide
    /// the display unit (e.g. `100.0` with suffix `"%"` for fractional returns).
    pub fn labels(&self, scale: f64, decimals: usize, suffix: &str) -> Vec<String> {
        self.bins
            .iter()
            .map(|b| {
                format!(
                    "{:.prec$}{suffix}–{:.prec$}{suffix}",
                    b.lower * scale,
                    b.upper * scale,
                    prec = decimals
                )
            })
            .collect()
    }
}
