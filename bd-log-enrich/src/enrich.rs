// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./enrich_test.rs"]
mod enrich_test;

use crate::property_bag::{PropertyBag, PropertyRecord};
use crate::validate_property_name;
use crate::value::PropertyValue;
use ahash::AHashMap;
use bd_log_primitives::{EventPropertyValue, LogEvent, LogEventProperty, LogFieldValue};
use ordered_float::NotNan;
use serde_json::Value as JsonValue;
use std::borrow::Cow;

//
// PropertyFactory
//

/// Builds the property that gets attached to a log event from the contents of a bag record.
pub trait PropertyFactory {
  fn create_property(
    &self,
    name: &str,
    value: &PropertyValue,
    destructure_objects: bool,
  ) -> anyhow::Result<LogEventProperty>;
}

//
// DefaultPropertyFactory
//

/// Scalars are passed through as is. Structured values are expanded into a structure or sequence
/// when destructuring is requested, and rendered as their JSON text otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPropertyFactory;

impl DefaultPropertyFactory {
  fn event_value(value: &PropertyValue, destructure_objects: bool) -> EventPropertyValue {
    match value {
      PropertyValue::Null => EventPropertyValue::Null,
      PropertyValue::Scalar(v) => EventPropertyValue::Scalar(v.clone()),
      PropertyValue::Structured(json @ (JsonValue::Array(_) | JsonValue::Object(_)))
        if !destructure_objects =>
      {
        EventPropertyValue::Scalar(LogFieldValue::String(json.to_string()))
      },
      PropertyValue::Structured(json) => Self::destructure(json),
    }
  }

  fn destructure(json: &JsonValue) -> EventPropertyValue {
    match json {
      JsonValue::Null => EventPropertyValue::Null,
      JsonValue::Bool(b) => EventPropertyValue::Scalar(LogFieldValue::Boolean(*b)),
      JsonValue::Number(n) => EventPropertyValue::Scalar(
        if let Some(v) = n.as_u64() {
          LogFieldValue::U64(v)
        } else if let Some(v) = n.as_i64() {
          LogFieldValue::I64(v)
        } else {
          n.as_f64()
            .and_then(|v| NotNan::new(v).ok())
            .map_or_else(|| LogFieldValue::String(n.to_string()), LogFieldValue::Double)
        },
      ),
      JsonValue::String(s) => EventPropertyValue::Scalar(LogFieldValue::String(s.clone())),
      JsonValue::Array(items) => {
        EventPropertyValue::Sequence(items.iter().map(Self::destructure).collect())
      },
      JsonValue::Object(members) => EventPropertyValue::Structure(
        members
          .iter()
          .map(|(key, value)| (Cow::Owned(key.clone()), Self::destructure(value)))
          .collect(),
      ),
    }
  }
}

impl PropertyFactory for DefaultPropertyFactory {
  fn create_property(
    &self,
    name: &str,
    value: &PropertyValue,
    destructure_objects: bool,
  ) -> anyhow::Result<LogEventProperty> {
    validate_property_name("name", name)?;

    Ok(LogEventProperty::new(
      name.to_string(),
      Self::event_value(value, destructure_objects),
    ))
  }
}

//
// LogEventTarget
//

/// A structured log event that properties can be attached to.
pub trait LogEventTarget {
  /// Installs the property unless the target already carries a property with the same name.
  /// Returns whether the property was installed.
  fn add_property_if_absent(&mut self, property: LogEventProperty) -> anyhow::Result<bool>;
}

impl LogEventTarget for LogEvent {
  fn add_property_if_absent(&mut self, property: LogEventProperty) -> anyhow::Result<bool> {
    Ok(Self::add_property_if_absent(self, property))
  }
}

//
// ErrorData
//

/// Auxiliary data attached to an error, keyed by exact name.
pub type ErrorDataStore = AHashMap<String, PropertyValue>;

/// An error type that carries a mutable side channel data store.
pub trait ErrorData {
  fn data_mut(&mut self) -> &mut ErrorDataStore;
}

//
// PropertySink
//

/// Receives the records of a bag when it is applied.
pub trait PropertySink {
  fn install(&mut self, record: &PropertyRecord) -> anyhow::Result<()>;
}

//
// LogEventSink
//

/// Installs records on a log event only if the event does not already carry the property. Which
/// properties are considered already present is decided by the event.
pub struct LogEventSink<'a, T: ?Sized, F: ?Sized> {
  target: &'a mut T,
  factory: &'a F,
}

impl<'a, T: LogEventTarget + ?Sized, F: PropertyFactory + ?Sized> LogEventSink<'a, T, F> {
  pub fn new(target: &'a mut T, factory: &'a F) -> Self {
    Self { target, factory }
  }
}

impl<T: LogEventTarget + ?Sized, F: PropertyFactory + ?Sized> PropertySink
  for LogEventSink<'_, T, F>
{
  fn install(&mut self, record: &PropertyRecord) -> anyhow::Result<()> {
    let property = self.factory.create_property(
      record.name(),
      record.value(),
      record.destructure_objects(),
    )?;

    if !self.target.add_property_if_absent(property)? {
      log::trace!(
        "log event already carries property {:?}, skipping",
        record.name()
      );
    }

    Ok(())
  }
}

//
// ErrorDataSink
//

/// Always installs records, replacing any entry with the same name. Error data stores have no
/// notion of "if absent", so unlike `LogEventSink` the last writer wins.
pub struct ErrorDataSink<'a, E: ?Sized> {
  target: &'a mut E,
}

impl<'a, E: ErrorData + ?Sized> ErrorDataSink<'a, E> {
  pub fn new(target: &'a mut E) -> Self {
    Self { target }
  }

  fn assign(&mut self, record: &PropertyRecord) {
    self
      .target
      .data_mut()
      .insert(record.name().to_string(), record.value().clone());
  }
}

impl<E: ErrorData + ?Sized> PropertySink for ErrorDataSink<'_, E> {
  fn install(&mut self, record: &PropertyRecord) -> anyhow::Result<()> {
    self.assign(record);
    Ok(())
  }
}

//
// PropertyBag application
//

impl PropertyBag {
  /// Hands every record to the sink, in insertion order. Stops at the first failure; records
  /// installed before the failure stay installed.
  pub fn enrich<S: PropertySink + ?Sized>(&self, sink: &mut S) -> anyhow::Result<()> {
    for record in self.records() {
      sink.install(record)?;
    }

    Ok(())
  }

  /// Attaches every property to the log event, skipping properties the event already carries.
  /// Failures from the factory or the target are returned unchanged.
  pub fn apply_to<T: LogEventTarget + ?Sized, F: PropertyFactory + ?Sized>(
    &self,
    target: &mut T,
    factory: &F,
  ) -> anyhow::Result<()> {
    self.enrich(&mut LogEventSink::new(target, factory))
  }

  /// Writes every property into the error's data store, overwriting existing entries with the
  /// same name. The destructure flag does not apply here.
  pub fn populate<'a, E: ErrorData + ?Sized>(&self, target: &'a mut E) -> &'a mut E {
    let mut sink = ErrorDataSink::new(&mut *target);
    for record in self.records() {
      sink.assign(record);
    }

    target
  }
}

//
// ErrorDataExt
//

pub trait ErrorDataExt: ErrorData + Sized {
  /// Populates the data store of this error from the bag and returns the error.
  #[must_use]
  fn populate(mut self, bag: &PropertyBag) -> Self {
    bag.populate(&mut self);
    self
  }
}

impl<E: ErrorData> ErrorDataExt for E {}

//
// EnrichedError
//

/// A general purpose error that carries auxiliary data.
#[derive(Debug)]
pub struct EnrichedError {
  message: String,
  source: Option<anyhow::Error>,
  data: ErrorDataStore,
}

impl EnrichedError {
  #[must_use]
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
      source: None,
      data: ErrorDataStore::new(),
    }
  }

  #[must_use]
  pub fn with_source(message: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
    Self {
      source: Some(source.into()),
      ..Self::new(message)
    }
  }

  #[must_use]
  pub fn message(&self) -> &str {
    &self.message
  }

  #[must_use]
  pub const fn data(&self) -> &ErrorDataStore {
    &self.data
  }
}

impl ErrorData for EnrichedError {
  fn data_mut(&mut self) -> &mut ErrorDataStore {
    &mut self.data
  }
}

impl std::fmt::Display for EnrichedError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.message)
  }
}

impl std::error::Error for EnrichedError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    self
      .source
      .as_deref()
      .map(|e| e as &(dyn std::error::Error + 'static))
  }
}
