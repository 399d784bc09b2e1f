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

#[cfg(test)]
#[path = "./lib_test.rs"]
mod lib_test;

use parking_lot::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::reload::Handle;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

const DEFAULT_FILTER: &str = "info";

// Set once the process wide subscriber has been installed.
static FILTER_HANDLE: Mutex<Option<Handle<EnvFilter, Registry>>> = Mutex::new(None);

/// Installs a stderr subscriber filtered by `RUST_LOG` (default `info`). Records emitted through
/// the `log` facade end up in the same subscriber. Fails if a global subscriber already exists.
pub fn initialize() -> anyhow::Result<()> {
  let filter = EnvFilter::new(std::env::var("RUST_LOG").as_deref().unwrap_or(DEFAULT_FILTER));
  let (filter, handle) = tracing_subscriber::reload::Layer::new(filter);

  Registry::default()
    .with(filter)
    .with(
      tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::env::var("BD_LOG_ANSI").is_ok())
        .compact(),
    )
    .try_init()?;

  *FILTER_HANDLE.lock() = Some(handle);
  Ok(())
}

#[must_use]
pub fn is_initialized() -> bool {
  FILTER_HANDLE.lock().is_some()
}

/// Replaces the active filter with `directives`, using `RUST_LOG` syntax.
pub fn set_filter(directives: &str) -> anyhow::Result<()> {
  FILTER_HANDLE
    .lock()
    .as_ref()
    .ok_or_else(|| anyhow::anyhow!("logging is not initialized"))?
    .reload(directives)?;

  // The `log` bridge caches its own max level.
  log::set_max_level(tracing_log::AsLog::as_log(
    &tracing_subscriber::filter::LevelFilter::current(),
  ));
  log::debug!("log filter set to {directives:?}");

  Ok(())
}
