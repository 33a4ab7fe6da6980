//! Core data models for the events site.
//!
//! Events own their photos; users, vendor inquiries and notifications are
//! plain records. Everything serializes as JSON via `serde` for the HTTP layer.

pub mod event;
pub mod notification;
pub mod photo;
pub mod user;
pub mod vendor;
