//! Shell command parsing for auto-approve-safe
//!
//! Splits a command line into the sub-commands it runs and classifies
//! individual segments.

pub mod classify;
pub mod segment;
