//! FFI bindings for the task board core.

pub mod api;
