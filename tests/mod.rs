//! Integration tests for pipeplay
//!
//! Tests are organized by component:
//! - stream_test: fetch, spawn, copy, and wait against a mock server
//! - cli_test: argument parsing, config precedence, exit codes
//! - e2e_test: slow multi-megabyte stream through library and CLI

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
