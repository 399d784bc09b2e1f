// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./naming_test.rs"]
mod naming_test;

use crate::{Result, validate_property_name};
use arc_swap::ArcSwap;
use serde::Deserialize;
use std::sync::Arc;

/// The property name used for the source member unless configured otherwise.
pub const DEFAULT_PROPERTY_NAME: &str = "SourceMember";

//
// NamingConfig
//

/// Serialized form of the naming configuration.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
  pub source_member_property_name: String,
}

impl Default for NamingConfig {
  fn default() -> Self {
    Self {
      source_member_property_name: DEFAULT_PROPERTY_NAME.to_string(),
    }
  }
}

impl NamingConfig {
  pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
    Ok(serde_yaml::from_str(yaml)?)
  }
}

//
// SourceMemberNaming
//

/// Controls the name of the property that holds the source member. This is meant to be created
/// once and shared (e.g. via `Arc`) by everything that builds property bags. The name is read on
/// every use, so a change made through `set_property_name` applies to all later bag operations,
/// including those on bags created before the change.
#[derive(Debug)]
pub struct SourceMemberNaming {
  property_name: ArcSwap<String>,
}

impl Default for SourceMemberNaming {
  fn default() -> Self {
    Self {
      property_name: ArcSwap::from_pointee(DEFAULT_PROPERTY_NAME.to_string()),
    }
  }
}

impl SourceMemberNaming {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_property_name(property_name: &str) -> Result<Self> {
    validate_property_name("property_name", property_name)?;
    Ok(Self {
      property_name: ArcSwap::from_pointee(property_name.to_string()),
    })
  }

  pub fn from_config(config: &NamingConfig) -> Result<Self> {
    Self::with_property_name(&config.source_member_property_name)
  }

  #[must_use]
  pub fn property_name(&self) -> Arc<String> {
    self.property_name.load_full()
  }

  /// Replaces the property name. Fails if the new name is empty or whitespace, in which case the
  /// current name is kept.
  pub fn set_property_name(&self, property_name: &str) -> Result<()> {
    validate_property_name("property_name", property_name)?;

    let previous = self
      .property_name
      .swap(Arc::new(property_name.to_string()));
    log::debug!("source member property name changed from {previous:?} to {property_name:?}");

    Ok(())
  }
}
