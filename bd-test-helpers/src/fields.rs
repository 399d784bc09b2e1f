// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

use bd_log_primitives::{LogEvent, log_level};
use time::macros::datetime;

/// Creates an event without any properties. Events created by this function compare equal as
/// long as the same properties are attached to them.
#[must_use]
pub fn test_event() -> LogEvent {
  LogEvent::new_at(log_level::INFO, "test message", datetime!(2024-01-01 00:00 UTC))
}

/// Returns the property names of the event, sorted.
#[must_use]
pub fn property_names(event: &LogEvent) -> Vec<String> {
  let mut names: Vec<String> = event
    .properties()
    .keys()
    .map(ToString::to_string)
    .collect();
  names.sort();
  names
}
