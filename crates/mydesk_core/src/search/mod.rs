//! Search entry points.
//!
//! # Responsibility
//! - Match user queries against the live entity collections.
//! - Keep result shaping (type tags, ordering) inside core.

pub mod substring;
