// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./value_test.rs"]
mod value_test;

use bd_log_primitives::LogFieldValue;
use ordered_float::NotNan;
use serde::Serialize;
use std::sync::Arc;

//
// PropertyValue
//

/// The value stored for a single property in a `PropertyBag`.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
  /// An explicitly empty value. This is distinct from the property not being present at all.
  Null,
  Scalar(LogFieldValue),
  /// A value with internal structure. Whether the structure is expanded when the property is
  /// attached to a log event is controlled by the per-property destructure flag.
  Structured(serde_json::Value),
}

impl PropertyValue {
  /// Captures any serializable value as a structured value.
  pub fn structured<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Self> {
    Ok(Self::Structured(serde_json::to_value(value)?))
  }

  #[must_use]
  pub const fn is_null(&self) -> bool {
    matches!(self, Self::Null)
  }

  #[must_use]
  pub const fn as_scalar(&self) -> Option<&LogFieldValue> {
    match self {
      Self::Scalar(v) => Some(v),
      Self::Null | Self::Structured(_) => None,
    }
  }

  #[must_use]
  pub fn as_str(&self) -> Option<&str> {
    self.as_scalar().and_then(LogFieldValue::as_str)
  }
}

impl From<LogFieldValue> for PropertyValue {
  fn from(value: LogFieldValue) -> Self {
    Self::Scalar(value)
  }
}

impl From<serde_json::Value> for PropertyValue {
  fn from(value: serde_json::Value) -> Self {
    Self::Structured(value)
  }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
  fn from(value: Option<T>) -> Self {
    value.map_or(Self::Null, Into::into)
  }
}

macro_rules! impl_scalar_from {
  ($($t:ty),*) => {
    $(
      impl From<$t> for PropertyValue {
        fn from(v: $t) -> Self {
          Self::Scalar(v.into())
        }
      }
    )*
  };
}

impl_scalar_from!(
  String,
  &str,
  Arc<str>,
  Vec<u8>,
  &[u8],
  bool,
  u8,
  u16,
  u32,
  u64,
  i8,
  i16,
  i32,
  i64,
  NotNan<f64>
);

// NaN has no scalar representation and becomes `Null`.
impl From<f64> for PropertyValue {
  fn from(v: f64) -> Self {
    NotNan::new(v).map_or(Self::Null, Self::from)
  }
}

impl From<f32> for PropertyValue {
  fn from(v: f32) -> Self {
    Self::from(f64::from(v))
  }
}

impl From<&String> for PropertyValue {
  fn from(v: &String) -> Self {
    Self::Scalar(v.as_str().into())
  }
}

impl std::fmt::Display for PropertyValue {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Null => write!(f, "null"),
      Self::Scalar(v) => write!(f, "{v}"),
      Self::Structured(v) => write!(f, "{v}"),
    }
  }
}
