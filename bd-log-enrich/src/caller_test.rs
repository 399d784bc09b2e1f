// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#![allow(clippy::unwrap_used)]

use crate::{DEFAULT_PROPERTY_NAME, SourceMemberNaming};
use pretty_assertions::assert_eq;

fn handle_request() -> &'static str {
  crate::source_member!()
}

#[test]
fn source_member_names_enclosing_function() {
  assert_eq!(
    handle_request(),
    concat!(module_path!(), "::handle_request")
  );
}

#[test]
fn here_uses_current_naming() {
  let naming = SourceMemberNaming::new();
  let bag = crate::here!(&naming);
  assert_eq!(
    bag.get(DEFAULT_PROPERTY_NAME).unwrap().as_str().unwrap(),
    concat!(module_path!(), "::here_uses_current_naming")
  );

  naming.set_property_name("Method").unwrap();
  let bag = crate::here!(&naming);
  assert!(bag.contains_key("method"));
}
