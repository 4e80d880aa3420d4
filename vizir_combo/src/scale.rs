// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales for combo charts.
//!
//! The X axis uses one of a linear, time, or band scale depending on the data; both Y axes are
//! linear. Continuous scales map into a pixel range and can be inverted.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::domain::Extent;
use crate::time;
use crate::value::Value;

/// Default tick count used to "nice" a linear domain.
pub const DEFAULT_TICK_COUNT: usize = 10;

/// Default band padding (inner and outer, in band units).
///
/// Padding is a multiple of the band width, not a fraction of the step: four bands over 400px
/// are 88.9px wide here, where a step-fraction padding of `0.1` would give 87.8px.
pub const DEFAULT_BAND_PADDING: f64 = 0.1;

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

/// Specification for a linear scale (domain + options, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinearSpec {
    /// Domain in data units.
    pub domain: (f64, f64),
    /// Whether to "nice" the domain based on tick generation.
    pub nice: bool,
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Maps a value from range space back into domain space.
    pub fn invert(&self, px: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = r1 - r0;
        if denom == 0.0 {
            return d0;
        }
        let t = (px - r0) / denom;
        d0 + t * (d1 - d0)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Returns the configured range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns the minimum of the configured domain (as authored).
    pub fn domain_min(&self) -> f64 {
        self.domain.0
    }

    /// Returns the maximum of the configured domain (as authored).
    pub fn domain_max(&self) -> f64 {
        self.domain.1
    }

    /// Clamps `x` into the domain.
    pub fn clamp(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        x.clamp(d0.min(d1), d0.max(d1))
    }

    /// Returns “nice-ish” tick values for the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

impl ScaleLinearSpec {
    /// Creates a new linear scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            nice: false,
        }
    }

    /// Enables or disables nice-domain behavior.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Returns the effective domain after applying `nice` (if enabled).
    pub fn resolved_domain(&self, tick_count: usize) -> (f64, f64) {
        if !self.nice {
            return self.domain;
        }
        let ticks = nice_ticks(self.domain.0, self.domain.1, tick_count);
        match (ticks.first(), ticks.last()) {
            (Some(&first), Some(&last)) if ticks.len() >= 2 => (first, last),
            _ => self.domain,
        }
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleLinear {
        ScaleLinear::new(self.domain, range)
    }

    /// Instantiates a concrete scale using the `resolved_domain` (respecting `nice`).
    pub fn instantiate_resolved(&self, range: (f64, f64), tick_count: usize) -> ScaleLinear {
        ScaleLinear::new(self.resolved_domain(tick_count), range)
    }
}

impl From<Extent> for ScaleLinearSpec {
    fn from(value: Extent) -> Self {
        Self::new(value.as_tuple())
    }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step0 = span / count.max(1) as f64;
    let step = nice_step(step0);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A time scale over millisecond timestamps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTime {
    inner: ScaleLinear,
}

impl ScaleTime {
    /// Creates a new time scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            inner: ScaleLinear::new(domain, range),
        }
    }

    /// Maps a timestamp value into range space.
    pub fn map(&self, t: f64) -> f64 {
        self.inner.map(t)
    }

    /// Maps a pixel position back into a timestamp.
    pub fn invert(&self, px: f64) -> f64 {
        self.inner.invert(px)
    }

    /// Returns “nice-ish” tick timestamps for the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        time::nice_time_ticks_millis(self.inner.domain_min(), self.inner.domain_max(), count)
    }

    /// Returns the configured domain.
    pub fn domain(&self) -> (f64, f64) {
        self.inner.domain()
    }
}

/// A discrete band scale for categorical charts.
///
/// Categories keep first-appearance order; repeated keys share one band.
#[derive(Clone, Debug)]
pub struct ScaleBand {
    range: (f64, f64),
    keys: Vec<String>,
    index: HashMap<String, usize>,
    padding_inner: f64,
    padding_outer: f64,
}

impl ScaleBand {
    /// Creates a band scale over `keys` with default padding.
    pub fn new(range: (f64, f64), keys: impl IntoIterator<Item = String>) -> Self {
        let mut out = Self {
            range,
            keys: Vec::new(),
            index: HashMap::new(),
            padding_inner: DEFAULT_BAND_PADDING,
            padding_outer: DEFAULT_BAND_PADDING,
        };
        for key in keys {
            if !out.index.contains_key(&key) {
                out.index.insert(key.clone(), out.keys.len());
                out.keys.push(key);
            }
        }
        out
    }

    /// Sets inner and outer padding in band units.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.max(0.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Returns the computed band width.
    pub fn band_width(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.keys.len() as f64;
        if n <= 0.0 {
            return 0.0;
        }
        let span = (r1 - r0).abs();
        let denom = n + self.padding_inner * (n - 1.0) + 2.0 * self.padding_outer;
        if denom == 0.0 { 0.0 } else { span / denom }
    }

    /// Returns the distance between the starts of adjacent bands.
    pub fn step(&self) -> f64 {
        self.band_width() * (1.0 + self.padding_inner)
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.keys.len()
    }

    /// Returns the category keys in band order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns the band index of `key`.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Returns the start position of the band at `index`.
    pub fn band_start(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let bw = self.band_width();
        let start = if r1 >= r0 { r0 } else { r1 };
        start + bw * self.padding_outer + self.step() * index as f64
    }

    /// Returns the center position of the band at `index`.
    pub fn band_center(&self, index: usize) -> f64 {
        self.band_start(index) + self.band_width() / 2.0
    }
}

/// The kind of a [`Scale`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleKind {
    /// Continuous linear scale.
    Linear,
    /// Continuous time scale.
    Time,
    /// Discrete band scale.
    Band,
}

/// A scale instance registered for one render pass.
#[derive(Clone, Debug)]
pub enum Scale {
    /// Linear scale (numeric X, and every Y axis).
    Linear(ScaleLinear),
    /// Time scale (date X).
    Time(ScaleTime),
    /// Band scale (categorical X).
    Band(ScaleBand),
}

impl Scale {
    /// Returns the scale kind.
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Linear(_) => ScaleKind::Linear,
            Self::Time(_) => ScaleKind::Time,
            Self::Band(_) => ScaleKind::Band,
        }
    }

    /// Returns `true` for linear and time scales.
    pub fn is_continuous(&self) -> bool {
        !matches!(self, Self::Band(_))
    }

    /// Returns the linear scale, if this is one.
    pub fn as_linear(&self) -> Option<&ScaleLinear> {
        match self {
            Self::Linear(s) => Some(s),
            Self::Time(_) | Self::Band(_) => None,
        }
    }

    /// Returns the band scale, if this is one.
    pub fn as_band(&self) -> Option<&ScaleBand> {
        match self {
            Self::Band(s) => Some(s),
            Self::Linear(_) | Self::Time(_) => None,
        }
    }

    /// Maps a cell value to a position.
    ///
    /// Continuous scales coerce the value to a number; band scales return the band center, or
    /// `None` if the category is not in the domain.
    pub fn position(&self, value: Option<&Value>) -> Option<f64> {
        match self {
            Self::Linear(s) => Some(s.map(crate::value::coerce_number(value))),
            Self::Time(s) => Some(s.map(crate::value::coerce_number(value))),
            Self::Band(s) => {
                let key = value.map(Value::category_key).unwrap_or_default();
                s.index_of(&key).map(|i| s.band_center(i))
            }
        }
    }

    /// Maps a numeric value through a continuous scale; band scales return `None`.
    pub fn map(&self, v: f64) -> Option<f64> {
        match self {
            Self::Linear(s) => Some(s.map(v)),
            Self::Time(s) => Some(s.map(v)),
            Self::Band(_) => None,
        }
    }

    /// Maps a pixel position back into domain space; band scales return `None`.
    pub fn invert(&self, px: f64) -> Option<f64> {
        match self {
            Self::Linear(s) => Some(s.invert(px)),
            Self::Time(s) => Some(s.invert(px)),
            Self::Band(_) => None,
        }
    }

    /// Returns tick values: numbers for linear, timestamps for time, band centers for band.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear(s) => s.ticks(count),
            Self::Time(s) => s.ticks(count),
            Self::Band(s) => (0..s.count()).map(|i| s.band_center(i)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| String::from(*s)).collect()
    }

    #[test]
    fn band_positions_are_monotonic_and_deduplicated() {
        let band = ScaleBand::new((0.0, 100.0), keys(&["a", "b", "a", "c"]));
        assert_eq!(band.count(), 3);
        let a = band.band_start(0);
        let b = band.band_start(1);
        let c = band.band_start(2);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(band.index_of("c"), Some(2));
        assert_eq!(band.index_of("z"), None);
    }

    #[test]
    fn band_without_padding_tiles_the_range() {
        let band = ScaleBand::new((10.0, 30.0), keys(&["x", "y"])).with_padding(0.0, 0.0);
        assert_eq!(band.band_width(), 10.0);
        assert_eq!(band.band_start(1), 20.0);
        assert_eq!(band.band_center(0), 15.0);
    }

    #[test]
    fn default_padding_is_measured_in_band_widths() {
        let band = ScaleBand::new((0.0, 400.0), keys(&["a", "b", "c", "d"]));
        // 4 bands + 3 inner + 2 outer paddings of 0.1 band each.
        assert!((band.band_width() - 400.0 / 4.5).abs() < 1e-9);
        assert!((band.band_start(0) - band.band_width() * DEFAULT_BAND_PADDING).abs() < 1e-9);
    }

    #[test]
    fn linear_invert_round_trips_endpoints() {
        let s = ScaleLinear::new((0.0, 50.0), (200.0, 0.0));
        assert_eq!(s.map(0.0), 200.0);
        assert_eq!(s.map(50.0), 0.0);
        assert_eq!(s.invert(100.0), 25.0);
    }

    #[test]
    fn nice_widens_to_tick_boundaries() {
        let spec = ScaleLinearSpec::new((-5.0, 11.0)).with_nice(true);
        assert_eq!(spec.resolved_domain(DEFAULT_TICK_COUNT), (-6.0, 12.0));
        let plain = ScaleLinearSpec::new((-5.0, 11.0));
        assert_eq!(plain.resolved_domain(DEFAULT_TICK_COUNT), (-5.0, 11.0));
    }

    #[test]
    fn band_position_uses_category_keys() {
        let scale = Scale::Band(
            ScaleBand::new((0.0, 20.0), keys(&["1", "2"])).with_padding(0.0, 0.0),
        );
        assert_eq!(scale.position(Some(&Value::from(2))), Some(15.0));
        assert_eq!(scale.position(Some(&Value::from("9"))), None);
        assert_eq!(scale.ticks(5), vec![5.0, 15.0]);
    }
}
