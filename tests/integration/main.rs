//! Integration tests for auto-approve-safe

mod bash_tests;
mod file_tests;
