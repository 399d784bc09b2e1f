// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#![allow(clippy::unwrap_used)]

use bd_log_enrich::{
  DefaultPropertyFactory,
  EnrichedError,
  ErrorDataExt,
  PropertyBag,
  PropertyValue,
  SourceMemberNaming,
};
use bd_log_primitives::{EventPropertyValue, LogEventProperty, LogFieldValue};
use bd_test_helpers::fields::{property_names, test_event};
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[ctor::ctor]
fn test_global_init() {
  bd_test_helpers::test_global_init();
}

#[test]
fn user_context_end_to_end() {
  let mut event = test_event();

  PropertyBag::create()
    .add("UserId", 42)
    .unwrap()
    .add("Tenant", "acme")
    .unwrap()
    .apply_to(&mut event, &DefaultPropertyFactory)
    .unwrap();

  assert_eq!(property_names(&event), vec!["Tenant", "UserId"]);
  assert_eq!(
    event.property("UserId"),
    Some(&EventPropertyValue::Scalar(LogFieldValue::I64(42)))
  );
  assert_eq!(
    event.property("Tenant"),
    Some(&EventPropertyValue::Scalar(LogFieldValue::String(
      "acme".to_string()
    )))
  );
}

#[test]
fn layered_defaults() {
  let naming = Arc::new(SourceMemberNaming::new());

  // A request handler tags its context, then a shared helper layers defaults on top without
  // clobbering what the handler already set.
  let mut bag = bd_log_enrich::here!(&naming);
  bag.add("userId", 7).unwrap();
  bag
    .add_range([
      ("UserId", PropertyValue::from(0)),
      ("Region", PropertyValue::from("eu")),
    ])
    .unwrap();

  let mut event = test_event();
  event.add_property_if_absent(LogEventProperty::new("Region", "us"));
  bag.apply_to(&mut event, &DefaultPropertyFactory).unwrap();

  assert_eq!(
    property_names(&event),
    vec!["Region", "SourceMember", "userId"]
  );
  assert_eq!(event.property("Region"), Some(&EventPropertyValue::from("us")));
  assert_eq!(event.property("userId"), Some(&EventPropertyValue::from(7)));
  assert_eq!(
    event.property("SourceMember"),
    Some(&EventPropertyValue::from(
      "enrich_integration::layered_defaults"
    ))
  );

  // The same bag attached to an error overwrites the error's data instead.
  let mut error = EnrichedError::new("request failed");
  bd_log_enrich::ErrorData::data_mut(&mut error)
    .insert("Region".to_string(), PropertyValue::from("us"));
  let error = error.populate(&bag);

  assert_eq!(error.data().get("Region"), Some(&PropertyValue::from("eu")));
  assert_eq!(error.data().len(), 3);
}

#[test]
fn renamed_source_member() {
  let naming = SourceMemberNaming::new();
  let mut bag = PropertyBag::create();

  naming.set_property_name("Origin").unwrap();
  bag.with_source_member(&naming, "worker::run");

  let mut event = test_event();
  bag.apply_to(&mut event, &DefaultPropertyFactory).unwrap();

  assert_eq!(property_names(&event), vec!["Origin"]);
}
