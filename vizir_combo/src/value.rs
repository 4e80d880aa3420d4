// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row values and numeric coercion.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};

use hashbrown::HashMap;

/// A single scalar cell in a [`Row`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Missing or explicit null value.
    Null,
    /// Boolean value. Coerces to `0` or `1`.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Text value. Coerces to a number only if it parses as one.
    Text(String),
    /// A timestamp in milliseconds since the Unix epoch.
    Date(f64),
}

impl Value {
    /// Creates a date value from milliseconds since the Unix epoch.
    pub fn date_millis(millis: f64) -> Self {
        Self::Date(millis)
    }

    /// Returns `true` for [`Value::Date`].
    pub fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Returns `true` for [`Value::Number`].
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns the numeric reading of this value, if it has one.
    ///
    /// Non-finite numbers are treated as having no reading.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            Self::Null => return None,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Number(n) | Self::Date(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        v.is_finite().then_some(v)
    }

    /// Coerces this value to a finite number, defaulting to `0`.
    pub fn to_number(&self) -> f64 {
        self.as_f64().unwrap_or(0.0)
    }

    /// Returns the key used to place this value on a categorical axis.
    pub fn category_key(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) | Self::Date(n) => format!("{n}"),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(String::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Coerces an optional cell to a finite number, defaulting to `0`.
///
/// This is the single point where missing fields, text, and `NaN` cells become numbers.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    value.map_or(0.0, Value::to_number)
}

/// One record of chart input: field name to scalar.
///
/// Row order in the input slice is significant; it defines X order for categorical and
/// temporal axes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    fields: HashMap<String, Value>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `field` and returns the row (builder style).
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Sets `field`, replacing any previous value.
    pub fn insert(&mut self, field: &str, value: impl Into<Value>) {
        self.fields.insert(String::from(field), value.into());
    }

    /// Returns the raw value for `field`.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `field` coerced to a number (`0` when missing or non-numeric).
    pub fn number(&self, field: &str) -> f64 {
        coerce_number(self.get(field))
    }

    /// Returns the number of fields in the row.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
