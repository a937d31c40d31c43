//! stockdash CLI library
//!
//! This module exposes the CLI components for testing and reuse.

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod args;
pub mod csv_parser;
pub mod csv_writer;
pub mod error;
pub mod json_writer;
pub mod run;

pub use error::{CliError, Result};
