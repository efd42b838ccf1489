use crate::error::BacktestError;

/// Simple Moving Average over a ring buffer, O(1) per push.
///
/// Non-finite inputs count as missing: the average is undefined while any
/// missing value sits inside the window, the same way a trailing rolling mean
/// over a column with leading gaps behaves.
///
/// A window holding one repeated value averages to exactly that value, so two
/// smoothings of a constant series compare equal.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    buffer: Vec<f64>,
    head: usize,
    count: usize,
    missing: usize,
    sum: f64,
    last: f64,
    same_run: usize,
}

impl Sma {
    pub fn new(period: usize) -> Result<Self, BacktestError> {
        if period == 0 {
            return Err(BacktestError::invalid("window", period));
        }
        Ok(Self {
            period,
            buffer: vec![f64::NAN; period],
            head: 0,
            count: 0,
            missing: 0,
            sum: 0.0,
            last: f64::NAN,
            same_run: 0,
        })
    }

    /// Push a new value, return the current SMA if the window is full and complete.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        if self.count >= self.period {
            let old = self.buffer[self.head];
            if old.is_finite() {
                self.sum -= old;
            } else {
                self.missing -= 1;
            }
        } else {
            self.count += 1;
        }

        if value.is_finite() {
            self.sum += value;
            if value == self.last {
                self.same_run += 1;
            } else {
                self.last = value;
                self.same_run = 1;
            }
        } else {
            self.missing += 1;
            self.last = f64::NAN;
            self.same_run = 0;
        }
        self.buffer[self.head] = value;
        self.head = (self.head + 1) % self.period;

        self.value()
    }

    /// Push an optional value; `None` is a gap in the input.
    pub fn push_opt(&mut self, value: Option<f64>) -> Option<f64> {
        self.push(value.unwrap_or(f64::NAN))
    }

    pub fn value(&self) -> Option<f64> {
        if !self.is_ready() {
            None
        } else if self.same_run >= self.period {
            Some(self.last)
        } else {
            Some(self.sum / self.period as f64)
        }
    }

    pub fn is_ready(&self) -> bool {
        self.count >= self.period && self.missing == 0
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

/// Trailing mean of every full window in `values`, aligned index-for-index.
pub fn rolling_mean(values: &[Option<f64>], period: usize) -> Result<Vec<Option<f64>>, BacktestError> {
    let mut sma = Sma::new(period)?;
    Ok(values.iter().map(|v| sma.push_opt(*v)).collect())
}
