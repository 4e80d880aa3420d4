// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pass scale registry.
//!
//! A [`ScaleTable`] is built once per render pass: scales are registered first, then the table
//! is borrowed immutably by every series. A new pass builds a new table, so scales from a
//! previous data set are never reused.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::domain::Extent;
use crate::scale::{Scale, ScaleLinear};

/// Logical scale name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScaleKey {
    /// The shared X scale.
    X,
    /// The left Y scale.
    LeftY,
    /// The right Y scale.
    RightY,
}

impl ScaleKey {
    /// Returns `"x"`, `"leftY"` or `"rightY"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::LeftY => "leftY",
            Self::RightY => "rightY",
        }
    }

    /// Parses a logical scale name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "x" => Some(Self::X),
            "leftY" => Some(Self::LeftY),
            "rightY" => Some(Self::RightY),
            _ => None,
        }
    }
}

/// Where a registered scale's domain came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DomainSource {
    /// Computed by the domain resolver.
    Resolved,
    /// Supplied by the caller.
    Override,
    /// Derived from row keys (the X scale).
    RowKeys,
}

/// Bookkeeping stored alongside a registered scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleMetadata {
    /// Where the domain came from.
    pub source: DomainSource,
    /// Domain before `nice` rounding (continuous scales only).
    pub raw_domain: Option<Extent>,
    /// Whether `nice` rounding was applied.
    pub nice: bool,
}

impl ScaleMetadata {
    /// Creates metadata for a scale with the given domain source.
    pub fn new(source: DomainSource) -> Self {
        Self {
            source,
            raw_domain: None,
            nice: false,
        }
    }

    /// Records the domain before `nice` rounding.
    pub fn with_raw_domain(mut self, domain: Extent) -> Self {
        self.raw_domain = Some(domain);
        self
    }

    /// Records whether `nice` rounding was applied.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }
}

/// A scale and its metadata.
#[derive(Clone, Debug)]
pub struct RegisteredScale {
    /// Logical name.
    pub key: ScaleKey,
    /// The scale.
    pub scale: Scale,
    /// Metadata recorded at registration.
    pub metadata: ScaleMetadata,
}

/// Arena of scales for one render pass, looked up by [`ScaleKey`].
#[derive(Clone, Debug, Default)]
pub struct ScaleTable {
    scales: Vec<RegisteredScale>,
    index: HashMap<ScaleKey, usize>,
}

impl ScaleTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `scale` under `key`, replacing any previous registration.
    pub fn register(&mut self, key: ScaleKey, scale: Scale, metadata: ScaleMetadata) {
        let entry = RegisteredScale {
            key,
            scale,
            metadata,
        };
        match self.index.get(&key) {
            Some(&i) => self.scales[i] = entry,
            None => {
                self.index.insert(key, self.scales.len());
                self.scales.push(entry);
            }
        }
    }

    /// Returns the scale registered under `key`.
    pub fn get(&self, key: ScaleKey) -> Option<&Scale> {
        self.entry(key).map(|e| &e.scale)
    }

    /// Returns the scale registered under a logical name (`"x"`, `"leftY"`, `"rightY"`).
    pub fn get_by_name(&self, name: &str) -> Option<&Scale> {
        ScaleKey::from_name(name).and_then(|key| self.get(key))
    }

    /// Returns the full registration for `key`.
    pub fn entry(&self, key: ScaleKey) -> Option<&RegisteredScale> {
        self.index.get(&key).map(|&i| &self.scales[i])
    }

    /// Returns the metadata recorded for `key`.
    pub fn metadata(&self, key: ScaleKey) -> Option<&ScaleMetadata> {
        self.entry(key).map(|e| &e.metadata)
    }

    /// Returns the linear scale under `key`, if it is one.
    pub fn linear(&self, key: ScaleKey) -> Option<&ScaleLinear> {
        self.get(key).and_then(Scale::as_linear)
    }

    /// Returns tick values for the scale under `key` (empty if unregistered).
    pub fn ticks(&self, key: ScaleKey, count: usize) -> Vec<f64> {
        self.get(key).map(|s| s.ticks(count)).unwrap_or_default()
    }

    /// Returns `true` if `key` is registered.
    pub fn contains(&self, key: ScaleKey) -> bool {
        self.index.contains_key(&key)
    }

    /// Returns the number of registered scales.
    pub fn len(&self) -> usize {
        self.scales.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.scales.is_empty()
    }

    /// Iterates registrations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredScale> {
        self.scales.iter()
    }
}
