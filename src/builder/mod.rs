//! Settings builders.
//!
//! Each builder computes one partial settings table from the target facts;
//! the `Aggregator` merges them in a fixed order.

pub mod aggregate;
pub mod import_visibility;
pub mod link_flags;
pub mod runpath;
pub mod sandbox;
pub mod target_rules;
pub mod vendored;

pub use aggregate::Aggregator;
pub use import_visibility::ImportVisibility;
pub use link_flags::LinkFlags;
pub use runpath::Runpath;
pub use sandbox::{HeadersStore, Sandbox};
pub use target_rules::{DefaultTargetRules, NoTargetRules, TargetSettingsRules};
pub use vendored::VendoredArtifacts;
