use crate::error::{ChartError, ChartResult};

/// Continuous `domain -> range` mapping. The range may be inverted
/// (`range_start > range_end`) for y axes that grow downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        let (range_start, range_end) = range;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    /// Builds `[0, max] -> range`, substituting `1.0` when `max` is not a
    /// positive finite number so empty or all-zero data still projects.
    #[must_use]
    pub fn from_zero(max: f64, range: (f64, f64)) -> Self {
        let domain_end = if max.is_finite() && max > 0.0 { max } else { 1.0 };
        let (range_start, range_end) = range;
        Self {
            domain_start: 0.0,
            domain_end,
            range_start: if range_start.is_finite() { range_start } else { 0.0 },
            range_end: if range_end.is_finite() { range_end } else { 0.0 },
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let span = self.range_end - self.range_start;
        if span == 0.0 {
            return self.domain_start;
        }
        let normalized = (pixel - self.range_start) / span;
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Round tick values inside the domain, about `count` of them, using
    /// 1/2/5 multiples of a power of ten.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        let low = self.domain_start.min(self.domain_end);
        let high = self.domain_start.max(self.domain_end);
        if count == 0 || high <= low {
            return Vec::new();
        }
        let step = tick_step(low, high, count);
        if !step.is_finite() || step <= 0.0 {
            return Vec::new();
        }
        let first = (low / step).ceil() as i64;
        let last = (high / step).floor() as i64;
        (first..=last).map(|index| index as f64 * step).collect()
    }
}

fn tick_step(low: f64, high: f64, count: usize) -> f64 {
    let raw = (high - low) / count as f64;
    let power = 10.0_f64.powf(raw.log10().floor());
    let error = raw / power;
    let factor = if error >= 50.0_f64.sqrt() {
        10.0
    } else if error >= 10.0_f64.sqrt() {
        5.0
    } else if error >= 2.0_f64.sqrt() {
        2.0
    } else {
        1.0
    };
    power * factor
}

/// Discrete band scale: `n` equal bands over a range with inner/outer padding
/// expressed as a fraction of the step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    count: usize,
    range_start: f64,
    step: f64,
    bandwidth: f64,
    offset: f64,
}

impl BandScale {
    pub fn new(count: usize, range: (f64, f64), padding: f64) -> ChartResult<Self> {
        if !padding.is_finite() || !(0.0..1.0).contains(&padding) {
            return Err(ChartError::InvalidData(
                "band padding must be finite and in [0, 1)".to_owned(),
            ));
        }
        let (range_start, range_end) = range;
        if !range_start.is_finite() || !range_end.is_finite() || range_end < range_start {
            return Err(ChartError::InvalidData(
                "band range must be finite and ascending".to_owned(),
            ));
        }

        let span = range_end - range_start;
        let denominator = (count as f64 - padding + 2.0 * padding).max(1.0);
        let step = span / denominator;
        let bandwidth = step * (1.0 - padding);
        let offset = (span - step * (count as f64 - padding)) * 0.5;

        Ok(Self {
            count,
            range_start,
            step,
            bandwidth,
            offset,
        })
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }

    #[must_use]
    pub fn bandwidth(self) -> f64 {
        self.bandwidth
    }

    /// Left edge of band `index`, or `None` when out of range.
    #[must_use]
    pub fn band_start(self, index: usize) -> Option<f64> {
        (index < self.count).then(|| self.range_start + self.offset + self.step * index as f64)
    }
}

/// Evenly spaced points over a range, one per ordinal value, ends included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointScale {
    count: usize,
    range_start: f64,
    range_end: f64,
}

impl PointScale {
    #[must_use]
    pub fn new(count: usize, range: (f64, f64)) -> Self {
        Self {
            count,
            range_start: range.0,
            range_end: range.1,
        }
    }

    #[must_use]
    pub fn position(self, index: usize) -> Option<f64> {
        if index >= self.count {
            return None;
        }
        if self.count == 1 {
            return Some((self.range_start + self.range_end) * 0.5);
        }
        let step = (self.range_end - self.range_start) / (self.count - 1) as f64;
        Some(self.range_start + step * index as f64)
    }
}
