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

//! Property bags that enrich log events and errors. A bag collects named properties (first write
//! wins, names compared case-insensitively) and can then be applied to any number of targets.

pub mod caller;
pub mod enrich;
pub mod naming;
pub mod property_bag;
pub mod value;

pub use enrich::{
  DefaultPropertyFactory,
  EnrichedError,
  ErrorData,
  ErrorDataExt,
  ErrorDataSink,
  ErrorDataStore,
  LogEventSink,
  LogEventTarget,
  PropertyFactory,
  PropertySink,
};
pub use naming::{DEFAULT_PROPERTY_NAME, NamingConfig, SourceMemberNaming};
pub use property_bag::{PropertyBag, PropertyRecord};
pub use value::PropertyValue;

#[cfg(test)]
#[ctor::ctor]
fn test_global_init() {
  bd_test_helpers::test_global_init();
}

//
// Error
//

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("invalid argument `{parameter}`: {reason}")]
  InvalidArgument {
    parameter: &'static str,
    reason: &'static str,
  },

  #[error("property not found: {0}")]
  KeyNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Fails with `Error::InvalidArgument` if the provided property name is empty or only contains
/// whitespace.
pub(crate) fn validate_property_name(parameter: &'static str, name: &str) -> Result<()> {
  if name.trim().is_empty() {
    return Err(Error::InvalidArgument {
      parameter,
      reason: "must not be empty or whitespace",
    });
  }

  Ok(())
}
