//! Domain records for the desk.
//!
//! # Responsibility
//! - Define notes, links, tasks, folders, folder items and the user record.
//! - Own per-type validation and patch-merge rules.
//!
//! # Invariants
//! - Every stored record is identified by a timestamp-derived `EntityId`.
//! - Records are plain values; collections own them (see `repo`).

pub mod entity;
pub mod folder;
pub mod folder_item;
pub mod link;
pub mod note;
pub mod task;
pub mod user;
