// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time tick generation.
//!
//! Time is modeled as milliseconds since the Unix epoch. Tick steps snap to whole
//! seconds, minutes, hours, days and weeks; longer spans fall back to multiples of 30 days.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

const SECOND: f64 = 1_000.0;
const MINUTE: f64 = 60.0 * SECOND;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const WEEK: f64 = 7.0 * DAY;
const MONTH: f64 = 30.0 * DAY;

/// Returns a vector of "nice-ish" tick values for a time domain expressed in milliseconds.
pub fn nice_time_ticks_millis(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if !min.is_finite() || !max.is_finite() {
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
    let step = nice_time_step_millis(step0);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).ceil() * step;
    let stop = (max / step).floor() * step;
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
        return Vec::new();
    };

    (0..=n).map(|i| start + step * i as f64).collect()
}

fn nice_time_step_millis(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }

    const STEPS: &[f64] = &[
        SECOND,
        5.0 * SECOND,
        15.0 * SECOND,
        30.0 * SECOND,
        MINUTE,
        5.0 * MINUTE,
        15.0 * MINUTE,
        30.0 * MINUTE,
        HOUR,
        3.0 * HOUR,
        6.0 * HOUR,
        12.0 * HOUR,
        DAY,
        2.0 * DAY,
        WEEK,
        MONTH,
        3.0 * MONTH,
    ];

    if step < SECOND {
        // Sub-second spans use decimal steps, never finer than 1ms.
        let base = 10_f64.powf(step.log10().floor());
        let error = step / base;
        let nice = if error > 5.0 {
            10.0
        } else if error > 2.0 {
            5.0
        } else if error > 1.0 {
            2.0
        } else {
            1.0
        };
        return (nice * base).max(1.0);
    }
    for &s in STEPS {
        if s >= step {
            return s;
        }
    }
    (step / (12.0 * MONTH)).ceil().max(1.0) * 12.0 * MONTH
}
