// shared-core - bitdrift's common client/server libraries
// Copyright Bitdrift, Inc. All rights reserved.
//
// Use of this source code is governed by a source available license that can be found in the
// LICENSE file or at:
// https://polyformproject.org/wp-content/uploads/2020/06/PolyForm-Shield-1.0.0.txt

#[cfg(test)]
#[path = "./caller_test.rs"]
mod caller_test;

// Helpers for capturing where a log event originates from. The captured text is stored as an
// ordinary property value.

/// Expands to the fully qualified path of the enclosing function, e.g.
/// `my_crate::service::handle_request`.
#[macro_export]
macro_rules! source_member {
  () => {{
    fn __source_member() {}
    fn __type_name_of<T>(_: T) -> &'static str {
      ::std::any::type_name::<T>()
    }
    let name = __type_name_of(__source_member);
    name.strip_suffix("::__source_member").unwrap_or(name)
  }};
}

/// Creates a `PropertyBag` holding the enclosing function as its source member property.
#[macro_export]
macro_rules! here {
  ($naming:expr) => {
    $crate::PropertyBag::create_for_source_member($naming, $crate::source_member!())
  };
}
