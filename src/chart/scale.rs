use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Band scale: hospitals → equal-width horizontal intervals
// ---------------------------------------------------------------------------

/// Maps each category to the left edge of a padded band.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    index: HashMap<String, usize>,
    start: f32,
    step: f32,
    bandwidth: f32,
}

impl BandScale {
    /// Lay out `domain` over `range` with equal inner and outer `padding`
    /// (a fraction of the step), centred in the range. Duplicate categories
    /// keep their first position.
    pub fn new(domain: Vec<String>, range: (f32, f32), padding: f32) -> Self {
        let mut index = HashMap::new();
        let mut unique = Vec::with_capacity(domain.len());
        for key in domain {
            if !index.contains_key(&key) {
                index.insert(key.clone(), unique.len());
                unique.push(key);
            }
        }

        let n = unique.len() as f32;
        let (r0, r1) = range;
        let span = r1 - r0;
        let step = span / (n - padding + padding * 2.0).max(1.0);
        let start = r0 + (span - step * (n - padding)) * 0.5;

        BandScale {
            domain: unique,
            index,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    /// Left edge of the band for `key`, or `None` for unknown keys.
    pub fn position(&self, key: &str) -> Option<f32> {
        self.index
            .get(key)
            .map(|&i| self.start + self.step * i as f32)
    }

    /// Horizontal centre of the band for `key`.
    pub fn center(&self, key: &str) -> Option<f32> {
        self.position(key).map(|x| x + self.bandwidth / 2.0)
    }

    pub fn bandwidth(&self) -> f32 {
        self.bandwidth
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }
}

// ---------------------------------------------------------------------------
// Linear scale: price → vertical pixel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Map a domain value to the range.
    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span != 0.0 { (v - d0) / span } else { 0.5 };
        r0 + (t as f32) * (r1 - r0)
    }

    /// Extend the domain outwards to multiples of the tick increment for
    /// `count` ticks. The domain is left untouched if the increment does
    /// not settle within ten rounds.
    pub fn nice(mut self, count: usize) -> Self {
        let (d0, d1) = self.domain;
        let reversed = d1 < d0;
        let (mut start, mut stop) = if reversed { (d1, d0) } else { (d0, d1) };
        if !(stop > start) {
            return self;
        }

        let mut prestep: Option<f64> = None;
        for _ in 0..10 {
            let step = tick_increment(start, stop, count as f64);
            if prestep == Some(step) {
                self.domain = if reversed { (stop, start) } else { (start, stop) };
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }
            prestep = Some(step);
        }
        self
    }

    /// Round tick values spanning the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count as f64)
    }
}

// ---------------------------------------------------------------------------
// Tick arithmetic (1, 2 and 5 times powers of ten)
// ---------------------------------------------------------------------------

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

fn step_factor(error: f64) -> f64 {
    if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    }
}

/// Rounds half up, towards positive infinity.
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Tick spacing for `count` ticks over `[start, stop]`. A negative result
/// `-k` encodes a fractional spacing of `1 / k`.
pub fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = step_factor(error);
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power)) / factor
    }
}

fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = step_factor(error);

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let k = 10f64.powf(-power) / factor;
        i1 = round_half_up(start * k);
        i2 = round_half_up(stop * k);
        if i1 / k < start {
            i1 += 1.0;
        }
        if i2 / k > stop {
            i2 -= 1.0;
        }
        inc = -k;
    } else {
        let k = 10f64.powf(power) * factor;
        i1 = round_half_up(start / k);
        i2 = round_half_up(stop / k);
        if i1 * k < start {
            i1 += 1.0;
        }
        if i2 * k > stop {
            i2 -= 1.0;
        }
        inc = k;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Evenly spaced round values within `[start, stop]`, in the same direction.
pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if !(count > 0.0) {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reversed = stop < start;
    let (lo, hi) = if reversed { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count);
    if !(i2 >= i1) {
        return Vec::new();
    }

    let n = (i2 - i1 + 1.0) as usize;
    let mut out: Vec<f64> = (0..n)
        .map(|i| {
            let k = i1 + i as f64;
            if inc < 0.0 {
                k / -inc
            } else {
                k * inc
            }
        })
        .collect();
    if reversed {
        out.reverse();
    }
    out
}
