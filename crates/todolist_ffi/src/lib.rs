//! Flutter bridge for the todolist core.
//!
//! Functions in [`api`] are exported to Dart through flutter_rust_bridge.

pub mod api;
