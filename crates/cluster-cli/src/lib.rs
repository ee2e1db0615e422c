//! Command-line entry points for the cluster inventory
//!
//! Two binaries share this library:
//!
//! - `cluster-inventory`: the Ansible dynamic-inventory script (`--list`, `--host`)
//! - `cluster-tools`: maintenance helpers (`clean`, `hash-password`)

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

pub use error::{CliError, Result};
