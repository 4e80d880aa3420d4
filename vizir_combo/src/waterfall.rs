// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Waterfall running totals.
//!
//! A waterfall series is a sequence of signed deltas punctuated by absolute totals. Both the
//! domain resolver and the dispatcher replay the same fold over the rows, so a bar is always
//! drawn across exactly the span that the domain was sized for.

extern crate alloc;

use alloc::vec::Vec;

use crate::value::{Row, Value};

/// How a waterfall row moves the running total.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaterfallKind {
    /// Adds the row value to the running total.
    Positive,
    /// Adds the (signed) row value to the running total.
    Negative,
    /// Sets the running total to the row value; drawn from the baseline.
    Total,
    /// Same as [`WaterfallKind::Total`], for intermediate checkpoints.
    Subtotal,
}

impl WaterfallKind {
    /// Reads the step kind from a row's type field.
    ///
    /// Missing or unknown tags fall back to the sign of `delta`.
    pub fn from_value(tag: Option<&Value>, delta: f64) -> Self {
        let by_sign = if delta < 0.0 {
            Self::Negative
        } else {
            Self::Positive
        };
        let Some(Value::Text(tag)) = tag else {
            return by_sign;
        };
        let tag = tag.trim();
        if tag.eq_ignore_ascii_case("total") {
            Self::Total
        } else if tag.eq_ignore_ascii_case("subtotal") {
            Self::Subtotal
        } else if tag.eq_ignore_ascii_case("positive") {
            Self::Positive
        } else if tag.eq_ignore_ascii_case("negative") {
            Self::Negative
        } else {
            by_sign
        }
    }

    /// Returns `true` for totals and subtotals.
    pub fn is_absolute(self) -> bool {
        matches!(self, Self::Total | Self::Subtotal)
    }
}

/// One row of a replayed waterfall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaterfallStep {
    /// Step kind.
    pub kind: WaterfallKind,
    /// Value where the bar starts (pre-value, or `0` for totals).
    pub start: f64,
    /// Value where the bar ends (the running total after this row).
    pub end: f64,
}

impl WaterfallStep {
    /// Both ends of the bar, as domain candidates.
    pub fn candidates(&self) -> [f64; 2] {
        [self.start, self.end]
    }
}

/// Replays the running total of `value_field` over `rows`.
///
/// `type_field` names the per-row step kind; without it every row is a delta.
pub fn waterfall_steps(
    rows: &[Row],
    value_field: &str,
    type_field: Option<&str>,
) -> Vec<WaterfallStep> {
    rows.iter()
        .scan(0.0_f64, |total, row| {
            let value = row.number(value_field);
            let tag = type_field.and_then(|f| row.get(f));
            let kind = WaterfallKind::from_value(tag, value);
            let start = if kind.is_absolute() { 0.0 } else { *total };
            *total = if kind.is_absolute() {
                value
            } else {
                *total + value
            };
            Some(WaterfallStep {
                kind,
                start,
                end: *total,
            })
        })
        .collect()
}
