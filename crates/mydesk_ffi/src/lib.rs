//! Flutter-facing bindings for MyDesk.

pub mod api;
