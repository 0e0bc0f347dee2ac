//! Sonda - filesystem smoke tester
//!
//! This library provides the core write-then-read smoke procedure used to
//! validate that a storage backend honors open/write/read/close semantics,
//! plus the CLI surface and report formats of the `sonda` binary.

pub mod cli;
pub mod error;
pub mod json_output;
pub mod smoke;
