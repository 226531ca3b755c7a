//! Storage layer: owned in-memory collections and the local storage mirror.
//!
//! # Responsibility
//! - Hold entity state with uniform CRUD semantics.
//! - Isolate key/value persistence details from session logic.
//!
//! # Invariants
//! - Write paths validate before committing; failures change nothing.
//! - Repository APIs return semantic errors (`NotFound`, `Validation`).

pub mod collection;
pub mod folder_items;
pub mod local_storage;
