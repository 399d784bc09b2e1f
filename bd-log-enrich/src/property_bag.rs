// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./property_bag_test.rs"]
mod property_bag_test;

use crate::naming::SourceMemberNaming;
use crate::value::PropertyValue;
use crate::{Error, Result, validate_property_name};
use ahash::AHashMap;

//
// PropertyRecord
//

/// A single property held by a bag, as it will be handed to a `PropertySink`.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRecord {
  name: String,
  value: PropertyValue,
  destructure_objects: bool,
}

impl PropertyRecord {
  /// The property name, with the casing used when it was first added.
  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }

  #[must_use]
  pub const fn value(&self) -> &PropertyValue {
    &self.value
  }

  /// Whether a log event should expand the internal structure of the value rather than treat it
  /// as an opaque scalar.
  #[must_use]
  pub const fn destructure_objects(&self) -> bool {
    self.destructure_objects
  }
}

//
// PropertyBag
//

/// An ordered collection of properties keyed by case-insensitive name. The first property added
/// for a given name wins; later additions with the same name in any casing are ignored.
///
/// The bag is a plain builder. It is filled through `&mut self` methods which return `&mut Self`
/// so that calls can be chained, and is only read when applied to a target.
#[derive(Debug, Clone, Default)]
pub struct PropertyBag {
  records: Vec<PropertyRecord>,
  // Folded name -> index into `records`.
  index: AHashMap<String, usize>,
}

impl PropertyBag {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a new, empty bag.
  #[must_use]
  pub fn create() -> Self {
    Self::new()
  }

  /// Creates a bag that contains a single source member property, named according to the current
  /// value of `naming`.
  #[must_use]
  pub fn create_for_source_member(
    naming: &SourceMemberNaming,
    source_member: impl Into<PropertyValue>,
  ) -> Self {
    let mut bag = Self::new();
    bag.with_source_member(naming, source_member);
    bag
  }

  /// Creates a bag whose source member property is the `file:line:column` of the caller.
  #[must_use]
  #[track_caller]
  pub fn create_for_caller(naming: &SourceMemberNaming) -> Self {
    Self::create_for_source_member(naming, std::panic::Location::caller().to_string())
  }

  /// Adds a property that is not destructured. See `add_with_destructure`.
  pub fn add(&mut self, name: &str, value: impl Into<PropertyValue>) -> Result<&mut Self> {
    self.add_with_destructure(name, value, false)
  }

  /// Adds a property unless a property with the same case-insensitive name is already present.
  /// Fails if the name is empty or whitespace, in which case the bag is left untouched.
  pub fn add_with_destructure(
    &mut self,
    name: &str,
    value: impl Into<PropertyValue>,
    destructure_objects: bool,
  ) -> Result<&mut Self> {
    validate_property_name("name", name)?;
    self.insert(name, value.into(), destructure_objects);
    Ok(self)
  }

  /// Adds every entry in order, as if calling `add` for each of them. All names are validated
  /// before the bag is modified, so an invalid name anywhere in `entries` leaves the bag
  /// untouched.
  pub fn add_range<I, K, V>(&mut self, entries: I) -> Result<&mut Self>
  where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<PropertyValue>,
  {
    let entries: Vec<(K, V)> = entries.into_iter().collect();
    for (name, _) in &entries {
      validate_property_name("entries", name.as_ref())?;
    }

    for (name, value) in entries {
      self.insert(name.as_ref(), value.into(), false);
    }

    Ok(self)
  }

  /// Adds the source member property. The property name is read from `naming` on every call, so
  /// a rename is picked up by bags that already exist.
  pub fn with_source_member(
    &mut self,
    naming: &SourceMemberNaming,
    source_member: impl Into<PropertyValue>,
  ) -> &mut Self {
    // The naming configuration never holds an invalid name.
    let name = naming.property_name();
    self.insert(&name, source_member.into(), false);
    self
  }

  fn insert(&mut self, name: &str, value: PropertyValue, destructure_objects: bool) {
    let key = fold_name(name);
    if let Some(existing) = self.index.get(&key) {
      log::trace!(
        "ignoring property {name:?}, already present as {:?}",
        self.records[*existing].name
      );
      return;
    }

    self.index.insert(key, self.records.len());
    self.records.push(PropertyRecord {
      name: name.to_string(),
      value,
      destructure_objects,
    });
  }

  pub(crate) fn records(&self) -> &[PropertyRecord] {
    &self.records
  }

  fn record(&self, name: &str) -> Option<&PropertyRecord> {
    self
      .index
      .get(&fold_name(name))
      .map(|index| &self.records[*index])
  }

  //
  // Read only view. Only names and values are exposed.
  //

  #[must_use]
  pub fn contains_key(&self, name: &str) -> bool {
    self.index.contains_key(&fold_name(name))
  }

  #[must_use]
  pub fn get(&self, name: &str) -> Option<&PropertyValue> {
    self.record(name).map(PropertyRecord::value)
  }

  /// Like `get`, but fails with `Error::KeyNotFound` if the property is not present.
  pub fn value(&self, name: &str) -> Result<&PropertyValue> {
    self
      .get(name)
      .ok_or_else(|| Error::KeyNotFound(name.to_string()))
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.records.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
    self.records.iter().map(PropertyRecord::name)
  }

  pub fn values(&self) -> impl ExactSizeIterator<Item = &PropertyValue> {
    self.records.iter().map(PropertyRecord::value)
  }

  /// Iterates over `(name, value)` pairs in insertion order.
  #[must_use]
  pub fn iter(&self) -> Iter<'_> {
    Iter {
      inner: self.records.iter(),
    }
  }
}

impl<'a> IntoIterator for &'a PropertyBag {
  type Item = (&'a str, &'a PropertyValue);
  type IntoIter = Iter<'a>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

//
// Iter
//

pub struct Iter<'a> {
  inner: std::slice::Iter<'a, PropertyRecord>,
}

impl<'a> Iterator for Iter<'a> {
  type Item = (&'a str, &'a PropertyValue);

  fn next(&mut self) -> Option<Self::Item> {
    self
      .inner
      .next()
      .map(|record| (record.name.as_str(), &record.value))
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    self.inner.size_hint()
  }
}

impl ExactSizeIterator for Iter<'_> {}

// Names are compared ignoring case, independent of any locale. Folding is per character:
// `str::to_lowercase` would apply the final sigma rule and split `ΑΣ` from `ασ`.
fn fold_name(name: &str) -> String {
  name.chars().flat_map(char::to_uppercase).collect()
}
