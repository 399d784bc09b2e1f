// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#![deny(
  clippy::expect_used,
  clippy::panic,
  clippy::todo,
  clippy::unimplemented,
  clippy::unreachable,
  clippy::unwrap_used
)]


use ahash::AHashMap;
use ordered_float::NotNan;
use std::borrow::Cow;
use std::sync::Arc;
use time::OffsetDateTime;

/// A scalar log value: either a UTF-8 string, an opaque series of bytes, or one of the supported
/// primitive types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFieldValue {
  String(String),
  SharedString(Arc<str>),
  StaticString(&'static str),
  Bytes(Vec<u8>),
  Boolean(bool),
  U64(u64),
  I64(i64),
  Double(NotNan<f64>),
}

impl LogFieldValue {
  /// Creates a new value from a static string slice. This avoids the heap allocation done by
  /// `String`.
  #[must_use]
  pub const fn from_static_str(s: &'static str) -> Self {
    Self::StaticString(s)
  }

  /// Extracts the underlying str if the value is one of the string variants, None otherwise.
  #[must_use]
  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::String(s) => Some(s),
      Self::SharedString(s) => Some(s),
      Self::StaticString(s) => Some(s),
      Self::Bytes(_) | Self::Boolean(_) | Self::U64(_) | Self::I64(_) | Self::Double(_) => None,
    }
  }

  /// Extracts the underlying bytes if the value is `Bytes`, None otherwise.
  #[must_use]
  pub fn as_bytes(&self) -> Option<&[u8]> {
    match self {
      Self::Bytes(b) => Some(b),
      Self::String(_)
      | Self::SharedString(_)
      | Self::StaticString(_)
      | Self::Boolean(_)
      | Self::U64(_)
      | Self::I64(_)
      | Self::Double(_) => None,
    }
  }
}

impl From<String> for LogFieldValue {
  fn from(s: String) -> Self {
    Self::String(s)
  }
}

impl From<&str> for LogFieldValue {
  fn from(s: &str) -> Self {
    Self::String(s.to_string())
  }
}

impl From<Arc<str>> for LogFieldValue {
  fn from(s: Arc<str>) -> Self {
    Self::SharedString(s)
  }
}

impl From<Vec<u8>> for LogFieldValue {
  fn from(b: Vec<u8>) -> Self {
    Self::Bytes(b)
  }
}

impl From<&[u8]> for LogFieldValue {
  fn from(b: &[u8]) -> Self {
    Self::Bytes(b.to_vec())
  }
}

impl From<bool> for LogFieldValue {
  fn from(b: bool) -> Self {
    Self::Boolean(b)
  }
}

impl From<NotNan<f64>> for LogFieldValue {
  fn from(v: NotNan<f64>) -> Self {
    Self::Double(v)
  }
}

macro_rules! impl_from_unsigned {
  ($($t:ty),*) => {
    $(
      impl From<$t> for LogFieldValue {
        fn from(v: $t) -> Self {
          Self::U64(v.into())
        }
      }
    )*
  };
}

macro_rules! impl_from_signed {
  ($($t:ty),*) => {
    $(
      impl From<$t> for LogFieldValue {
        fn from(v: $t) -> Self {
          Self::I64(v.into())
        }
      }
    )*
  };
}

impl_from_unsigned!(u8, u16, u32, u64);
impl_from_signed!(i8, i16, i32, i64);

impl std::fmt::Display for LogFieldValue {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::String(s) => write!(f, "{s}"),
      Self::SharedString(s) => write!(f, "{s}"),
      Self::StaticString(s) => write!(f, "{s}"),
      Self::Bytes(b) => write!(f, "bytes:{b:?}"),
      Self::Boolean(b) => write!(f, "{b}"),
      Self::U64(v) => write!(f, "{v}"),
      Self::I64(v) => write!(f, "{v}"),
      Self::Double(v) => write!(f, "{v}"),
    }
  }
}

pub type LogLevel = u32;

/// Well known log levels used by the library.
pub mod log_level {
  use crate::LogLevel;

  pub const ERROR: LogLevel = 4;
  pub const WARNING: LogLevel = 3;
  pub const INFO: LogLevel = 2;
  pub const DEBUG: LogLevel = 1;
  pub const TRACE: LogLevel = 0;
}

pub type LogFieldKey = Cow<'static, str>;

//
// EventPropertyValue
//

/// The value of a property attached to a log event. Unlike `LogFieldValue` this may carry
/// structure, which is produced when a value is destructured during property construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPropertyValue {
  Null,
  Scalar(LogFieldValue),
  Sequence(Vec<EventPropertyValue>),
  Structure(Vec<(LogFieldKey, EventPropertyValue)>),
}

impl EventPropertyValue {
  #[must_use]
  pub const fn is_null(&self) -> bool {
    matches!(self, Self::Null)
  }

  /// Returns the scalar value if this is a scalar, None otherwise.
  #[must_use]
  pub const fn as_scalar(&self) -> Option<&LogFieldValue> {
    match self {
      Self::Scalar(v) => Some(v),
      Self::Null | Self::Sequence(_) | Self::Structure(_) => None,
    }
  }

  /// Looks up a member of a structure value by name.
  #[must_use]
  pub fn member(&self, name: &str) -> Option<&Self> {
    match self {
      Self::Structure(members) => members
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value),
      Self::Null | Self::Scalar(_) | Self::Sequence(_) => None,
    }
  }
}

impl From<LogFieldValue> for EventPropertyValue {
  fn from(value: LogFieldValue) -> Self {
    Self::Scalar(value)
  }
}

macro_rules! impl_scalar_from {
  ($($t:ty),*) => {
    $(
      impl From<$t> for EventPropertyValue {
        fn from(v: $t) -> Self {
          Self::Scalar(v.into())
        }
      }
    )*
  };
}

impl_scalar_from!(String, &str, bool, u32, u64, i32, i64);

//
// LogEventProperty
//

/// A named property as installed on a log event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEventProperty {
  pub name: LogFieldKey,
  pub value: EventPropertyValue,
}

impl LogEventProperty {
  #[must_use]
  pub fn new(name: impl Into<LogFieldKey>, value: impl Into<EventPropertyValue>) -> Self {
    Self {
      name: name.into(),
      value: value.into(),
    }
  }
}

/// Properties attached to a log event, keyed by exact name.
pub type LogEventProperties = AHashMap<LogFieldKey, EventPropertyValue>;

//
// LogEvent
//

/// A structured log event. Property names are matched exactly (case sensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
  pub log_level: LogLevel,
  pub message: LogFieldValue,
  pub occurred_at: OffsetDateTime,
  properties: LogEventProperties,
}

impl LogEvent {
  #[must_use]
  pub fn new(log_level: LogLevel, message: impl Into<LogFieldValue>) -> Self {
    Self::new_at(log_level, message, OffsetDateTime::now_utc())
  }

  #[must_use]
  pub fn new_at(
    log_level: LogLevel,
    message: impl Into<LogFieldValue>,
    occurred_at: OffsetDateTime,
  ) -> Self {
    Self {
      log_level,
      message: message.into(),
      occurred_at,
      properties: LogEventProperties::new(),
    }
  }

  #[must_use]
  pub const fn properties(&self) -> &LogEventProperties {
    &self.properties
  }

  #[must_use]
  pub fn property(&self, name: &str) -> Option<&EventPropertyValue> {
    self.properties.get(name)
  }

  /// Installs the property unless a property with the same exact name is already present.
  /// Returns whether the property was installed.
  pub fn add_property_if_absent(&mut self, property: LogEventProperty) -> bool {
    if self.properties.contains_key(&property.name) {
      return false;
    }

    self.properties.insert(property.name, property.value);
    true
  }

  /// Installs the property, replacing any property with the same exact name.
  pub fn add_or_update_property(&mut self, property: LogEventProperty) {
    self.properties.insert(property.name, property.value);
  }

  pub fn remove_property(&mut self, name: &str) -> Option<EventPropertyValue> {
    self.properties.remove(name)
  }
}
