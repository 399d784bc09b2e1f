// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#![allow(clippy::unwrap_used)]

use crate::{initialize, is_initialized, set_filter};

// The subscriber is process wide, so the whole lifecycle is covered by a single test.
#[test]
fn initialize_and_set_filter() {
  assert!(!is_initialized());
  assert!(set_filter("debug").is_err());

  initialize().unwrap();
  assert!(is_initialized());

  set_filter("debug").unwrap();
  assert_eq!(log::max_level(), log::LevelFilter::Debug);

  set_filter("warn").unwrap();
  assert_eq!(log::max_level(), log::LevelFilter::Warn);

  assert!(initialize().is_err());
  assert!(is_initialized());
}
