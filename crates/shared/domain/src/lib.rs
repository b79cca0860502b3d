//! # Domain Models
//!
//! Pure configuration types and shared constants for the CPF validation service.
//! Keep it lean: `serde` is the only dependency; no I/O, networking, or validation logic here.

pub mod config;
pub mod constants;
