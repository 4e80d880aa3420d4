// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recoverable conditions reported during a render pass.
//!
//! The pipeline never logs on its own. Callers pass a [`DiagnosticSink`] to observe degraded
//! renders; [`NullSink`] discards everything.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::scale_table::ScaleKey;

/// A recoverable condition encountered while planning a chart.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// No rows were supplied; the plan is empty.
    EmptyRows,
    /// No series were declared; the plan is empty.
    EmptySeries,
    /// A series needs a scale that was never registered; the series is skipped.
    MissingScale {
        /// Declaration index of the skipped series.
        series: usize,
        /// The missing scale.
        scale: ScaleKey,
    },
    /// A series has a chart type this crate does not recognize; it is drawn as points.
    UnrecognizedChartType {
        /// Declaration index of the series.
        series: usize,
        /// The tag as configured, if known.
        tag: Option<String>,
    },
}

impl Diagnostic {
    /// Returns `true` for conditions that drop content from the plan.
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::MissingScale { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRows => f.write_str("no rows to plot"),
            Self::EmptySeries => f.write_str("no series declared"),
            Self::MissingScale { series, scale } => write!(
                f,
                "series {series} skipped: no `{}` scale registered",
                scale.as_str()
            ),
            Self::UnrecognizedChartType { series, tag } => match tag {
                Some(tag) => write!(f, "series {series} has unrecognized chart type `{tag}`"),
                None => write!(f, "series {series} has an unrecognized chart type"),
            },
        }
    }
}

/// Receiver for [`Diagnostic`]s.
pub trait DiagnosticSink {
    /// Records one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// A sink that discards every diagnostic.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Adapts a closure into a [`DiagnosticSink`].
pub struct FnSink<F>(pub F);

impl<F: FnMut(&Diagnostic)> DiagnosticSink for FnSink<F> {
    fn report(&mut self, diagnostic: Diagnostic) {
        (self.0)(&diagnostic);
    }
}

impl<F> fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSink").finish_non_exhaustive()
    }
}

/// Forwards diagnostics to `tracing`: warnings for skipped series, debug events otherwise.
#[cfg(feature = "tracing")]
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

#[cfg(feature = "tracing")]
impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::MissingScale { series, scale } => {
                tracing::warn!(series, scale = scale.as_str(), "{diagnostic}");
            }
            Diagnostic::UnrecognizedChartType { series, tag } => {
                tracing::debug!(series, tag = tag.as_deref(), "{diagnostic}");
            }
            Diagnostic::EmptyRows | Diagnostic::EmptySeries => {
                tracing::debug!("{diagnostic}");
            }
        }
    }
}
