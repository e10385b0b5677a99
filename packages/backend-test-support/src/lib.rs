//! Backend test support utilities
//!
//! This crate provides shared initialization for backend test binaries,
//! currently unified logging setup for unit and integration tests.

pub mod logging;
