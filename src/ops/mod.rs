//! High-level operations.
//!
//! This module contains the implementation of pod-xcconfig commands.

pub mod check;
pub mod generate;

pub use check::{check, CheckEntry, CheckReport, FileStatus};
pub use generate::{generate, generate_table, output_path, GenerateOptions, GeneratedFile};
