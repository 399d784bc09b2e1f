// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#![allow(clippy::unwrap_used)]

use super::PropertyValue;
use bd_log_primitives::LogFieldValue;
use ordered_float::NotNan;
use pretty_assertions::assert_eq;
use serde::Serialize;

#[derive(Serialize)]
struct Order {
  id: u64,
  items: Vec<&'static str>,
}

#[test]
fn option_maps_to_null() {
  assert_eq!(PropertyValue::from(None::<u64>), PropertyValue::Null);
  assert_eq!(
    PropertyValue::from(Some(5u64)),
    PropertyValue::Scalar(LogFieldValue::U64(5))
  );
  assert!(PropertyValue::from(None::<String>).is_null());
}

#[test]
fn scalar_accessors() {
  let value = PropertyValue::from("acme");
  assert_eq!(value.as_str(), Some("acme"));
  assert_eq!(value.as_scalar(), Some(&LogFieldValue::from("acme")));
  assert_eq!(PropertyValue::from(1).as_str(), None);
  assert_eq!(PropertyValue::Null.as_scalar(), None);
}

#[test]
fn structured_from_serializable() {
  let value = PropertyValue::structured(&Order {
    id: 7,
    items: vec!["a", "b"],
  })
  .unwrap();

  assert_eq!(
    value,
    PropertyValue::Structured(serde_json::json!({ "id": 7, "items": ["a", "b"] }))
  );
  assert_eq!(value.as_scalar(), None);
}

#[test]
fn display() {
  assert_eq!(PropertyValue::Null.to_string(), "null");
  assert_eq!(PropertyValue::from(-1).to_string(), "-1");
  assert_eq!(
    PropertyValue::from(serde_json::json!([1, 2])).to_string(),
    "[1,2]"
  );
}

#[test]
fn floats_map_nan_to_null() {
  assert_eq!(
    PropertyValue::from(1.5f64),
    PropertyValue::Scalar(LogFieldValue::Double(NotNan::new(1.5).unwrap()))
  );
  assert_eq!(
    PropertyValue::from(0.25f32),
    PropertyValue::Scalar(LogFieldValue::Double(NotNan::new(0.25).unwrap()))
  );
  assert_eq!(PropertyValue::from(f64::NAN), PropertyValue::Null);
  assert_eq!(PropertyValue::from(f32::NAN), PropertyValue::Null);
  assert_eq!(PropertyValue::from(Some(f64::NAN)), PropertyValue::Null);
}
