//! Foundation types for TINYDESK.
//!
//! Platform-agnostic types shared by every TINYDESK crate: the error enum,
//! screen geometry, and case-folded registry keys.

pub mod error;
pub mod geometry;
pub mod key;
