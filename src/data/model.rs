use std::sync::Arc;

// ---------------------------------------------------------------------------
// Numeric – a coerced cell
// ---------------------------------------------------------------------------

/// Result of coercing a raw cell into a number.
///
/// `Absent` is never the same thing as zero: it is excluded from statistics
/// and drawn as a gap.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Numeric {
    /// A finite real number.
    Value(f64),
    #[default]
    Absent,
}

impl Numeric {
    /// Wrap `v`, mapping NaN / ±Infinity to `Absent`.
    pub fn from_f64(v: f64) -> Self {
        if v.is_finite() {
            Numeric::Value(v)
        } else {
            Numeric::Absent
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Numeric::Value(v) => Some(v),
            Numeric::Absent => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one parsed data row
// ---------------------------------------------------------------------------

/// One data row keyed by normalized header names.
///
/// Every record produced by a single parse shares the same key list (in
/// header order), so the keys are held behind an `Arc` rather than copied
/// per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    keys: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    /// Pair a shared key list with this row's values.
    ///
    /// `values` is padded with empty strings or truncated to the key count.
    pub fn new(keys: Arc<[String]>, mut values: Vec<String>) -> Self {
        values.resize(keys.len(), String::new());
        Record { keys, values }
    }

    /// Raw (trimmed, unquoted) value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.keys
            .iter()
            .position(|k| k == key)
            .map(|idx| self.values[idx].as_str())
    }

    /// Normalized header keys in header order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}
