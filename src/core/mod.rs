//! Core data structures.
//!
//! This module contains the foundational types used throughout pod-xcconfig:
//! - Settings tables and their merge policy
//! - Target facts handed over by the resolver
//! - The facts manifest and the xcconfig text format

pub mod file_accessor;
pub mod manifest;
pub mod platform;
pub mod settings;
pub mod target;
pub mod xcconfig;

pub use file_accessor::FileAccessor;
pub use manifest::{FactsManifest, ManifestError, PodEntry, TargetEntry};
pub use platform::{Platform, RunpathConvention};
pub use settings::{MergePolicy, SettingsTable};
pub use target::{FactsError, NativeTargetKind, Packaging, PodTarget, TargetFacts};
pub use xcconfig::{Xcconfig, XcconfigError};
