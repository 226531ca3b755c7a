//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate collection, session and storage calls into use-case APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod calendar;
pub mod dashboard;
pub mod desk;
pub mod entity_store;
pub mod session_service;
