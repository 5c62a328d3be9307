//! Ordered build-settings table with explicit merge semantics.
//!
//! A `SettingsTable` maps build-setting names to opaque string values. The
//! insertion order of first-seen keys is preserved so that the generated
//! xcconfig is stable between runs.
//!
//! Merging is policy-driven:
//! - flag-like keys accumulate (`existing incoming`)
//! - scalar keys such as `PODS_ROOT` are overwritten

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Well-known build setting names.
pub mod keys {
    pub const OTHER_LDFLAGS: &str = "OTHER_LDFLAGS";
    pub const OTHER_LIBTOOLFLAGS: &str = "OTHER_LIBTOOLFLAGS";
    pub const OTHER_CFLAGS: &str = "OTHER_CFLAGS";
    pub const OTHER_SWIFT_FLAGS: &str = "OTHER_SWIFT_FLAGS";
    pub const PODS_ROOT: &str = "PODS_ROOT";
    pub const PODS_FRAMEWORK_BUILD_PATH: &str = "PODS_FRAMEWORK_BUILD_PATH";
    pub const GCC_PREPROCESSOR_DEFINITIONS: &str = "GCC_PREPROCESSOR_DEFINITIONS";
    pub const HEADER_SEARCH_PATHS: &str = "HEADER_SEARCH_PATHS";
    pub const FRAMEWORK_SEARCH_PATHS: &str = "FRAMEWORK_SEARCH_PATHS";
    pub const LIBRARY_SEARCH_PATHS: &str = "LIBRARY_SEARCH_PATHS";
    pub const LD_RUNPATH_SEARCH_PATHS: &str = "LD_RUNPATH_SEARCH_PATHS";
    pub const USE_HEADERMAP: &str = "USE_HEADERMAP";
    pub const EMBEDDED_CONTENT_CONTAINS_SWIFT: &str = "EMBEDDED_CONTENT_CONTAINS_SWIFT";
}

/// The placeholder that pulls in values from the enclosing build level.
pub const INHERITED: &str = "$(inherited)";

/// How a key combines with a value already present in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Concatenate with a single separating space.
    Accumulate,
    /// Replace the existing value.
    Overwrite,
}

impl MergePolicy {
    /// Keys holding a single value rather than a list.
    pub const SCALAR_KEYS: &'static [&'static str] = &[
        keys::PODS_ROOT,
        keys::PODS_FRAMEWORK_BUILD_PATH,
        keys::OTHER_LIBTOOLFLAGS,
        keys::EMBEDDED_CONTENT_CONTAINS_SWIFT,
        keys::USE_HEADERMAP,
    ];

    /// Look up the policy for a setting name.
    pub fn for_key(key: &str) -> Self {
        if Self::SCALAR_KEYS.contains(&key) {
            MergePolicy::Overwrite
        } else {
            MergePolicy::Accumulate
        }
    }
}

/// Ordered mapping of build-setting names to values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsTable {
    entries: IndexMap<String, String>,
}

impl SettingsTable {
    /// Create an empty table.
    pub fn new() -> Self {
        SettingsTable::default()
    }

    /// Builder-style insert, used when a partial table is assembled from scratch.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.merge_entry(key.into(), value.into());
        self
    }

    /// Merge every entry of `incoming` into this table, in incoming order.
    pub fn merge(&mut self, incoming: SettingsTable) {
        for (key, value) in incoming.entries {
            self.merge_entry(key, value);
        }
    }

    /// Merge a single entry following the key's policy.
    pub fn merge_entry(&mut self, key: String, value: String) {
        let policy = MergePolicy::for_key(&key);

        match self.entries.get_mut(&key) {
            None => {
                self.entries.insert(key, value);
            }
            Some(existing) => match policy {
                MergePolicy::Overwrite => *existing = value,
                MergePolicy::Accumulate => accumulate(existing, &value),
            },
        }
    }

    /// Delete a key outright, regardless of earlier merges.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Check if a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Split a value into whitespace-separated tokens.
    ///
    /// Quoted tokens are not re-joined; callers compare tokens of values they
    /// produced themselves.
    pub fn tokens(&self, key: &str) -> Vec<&str> {
        self.get(key)
            .map(|v| v.split_whitespace().collect())
            .unwrap_or_default()
    }
}

fn accumulate(existing: &mut String, incoming: &str) {
    let has_inherited = existing.split_whitespace().any(|t| t == INHERITED);

    let addition = if has_inherited {
        strip_inherited(incoming)
    } else {
        incoming.trim().to_string()
    };

    if addition.is_empty() {
        return;
    }

    if existing.is_empty() {
        *existing = addition;
    } else {
        existing.push(' ');
        existing.push_str(&addition);
    }
}

/// Cut standalone `$(inherited)` tokens out of a value, leaving every other
/// byte untouched.
fn strip_inherited(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value.trim();

    while let Some(pos) = rest.find(INHERITED) {
        let end = pos + INHERITED.len();
        let starts_token = rest[..pos].is_empty() || rest[..pos].ends_with(char::is_whitespace);
        let ends_token = rest[end..].is_empty() || rest[end..].starts_with(char::is_whitespace);

        if starts_token && ends_token {
            out.push_str(&rest[..pos]);
            rest = rest[end..].trim_start();
        } else {
            out.push_str(&rest[..end]);
            rest = &rest[end..];
        }
    }
    out.push_str(rest);

    out.trim().to_string()
}

impl<K, V> FromIterator<(K, V)> for SettingsTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = SettingsTable::new();
        for (k, v) in iter {
            table.merge_entry(k.into(), v.into());
        }
        table
    }
}

impl From<IndexMap<String, String>> for SettingsTable {
    fn from(entries: IndexMap<String, String>) -> Self {
        SettingsTable { entries }
    }
}

impl IntoIterator for SettingsTable {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Display for SettingsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.entries {
            writeln!(f, "{} = {}", key, value)?;
        }
        Ok(())
    }
}

/// Quote each string and join with spaces, optionally preceding every entry
/// with `prefix` (e.g. `-isystem "a" -isystem "b"`).
pub fn quote<S: AsRef<str>>(strings: &[S], prefix: Option<&str>) -> String {
    strings
        .iter()
        .map(|s| match prefix {
            Some(p) => format!("{} \"{}\"", p, s.as_ref()),
            None => format!("\"{}\"", s.as_ref()),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Join non-empty parts with single spaces.
pub fn join_flags<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_inserts_absent_keys_in_order() {
        let mut table = SettingsTable::new();
        table.merge(SettingsTable::new().with("B", "1").with("A", "2"));
        table.merge(SettingsTable::new().with("C", "3"));

        let keys: Vec<_> = table.keys().collect();
        assert_eq!(keys, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_merge_accumulates_flag_keys() {
        let mut table = SettingsTable::new().with(keys::OTHER_LDFLAGS, "$(inherited) -ObjC");
        table.merge(SettingsTable::new().with(keys::OTHER_LDFLAGS, "-l \"Foo\""));

        assert_eq!(
            table.get(keys::OTHER_LDFLAGS),
            Some("$(inherited) -ObjC -l \"Foo\"")
        );
    }

    #[test]
    fn test_merge_accumulates_unknown_keys() {
        let mut table = SettingsTable::new().with("CUSTOM_FLAGS", "a");
        table.merge(SettingsTable::new().with("CUSTOM_FLAGS", "b"));

        assert_eq!(table.get("CUSTOM_FLAGS"), Some("a b"));
    }

    #[test]
    fn test_merge_overwrites_scalar_keys() {
        let mut table = SettingsTable::new().with(keys::PODS_ROOT, "${SRCROOT}/Pods");
        table.merge(SettingsTable::new().with(keys::PODS_ROOT, "${SRCROOT}/Other"));

        assert_eq!(table.get(keys::PODS_ROOT), Some("${SRCROOT}/Other"));
    }

    #[test]
    fn test_merge_does_not_repeat_inherited() {
        let mut table = SettingsTable::new().with(keys::OTHER_CFLAGS, "$(inherited) -DA");
        table.merge(SettingsTable::new().with(keys::OTHER_CFLAGS, "$(inherited) -DB"));

        assert_eq!(table.get(keys::OTHER_CFLAGS), Some("$(inherited) -DA -DB"));
    }

    #[test]
    fn test_merge_keeps_inner_whitespace_of_values() {
        let mut table = SettingsTable::new().with(keys::FRAMEWORK_SEARCH_PATHS, "$(inherited) \"A\"");
        table.merge_entry(
            keys::FRAMEWORK_SEARCH_PATHS.to_string(),
            "$(inherited) \"$(PODS_ROOT)/My  Vendor\"".to_string(),
        );

        assert_eq!(
            table.get(keys::FRAMEWORK_SEARCH_PATHS),
            Some("$(inherited) \"A\" \"$(PODS_ROOT)/My  Vendor\"")
        );
    }

    #[test]
    fn test_strip_inherited_only_cuts_whole_tokens() {
        assert_eq!(strip_inherited("  $(inherited)  "), "");
        assert_eq!(strip_inherited("-a  $(inherited) -b\t-c"), "-a  -b\t-c");
        assert_eq!(
            strip_inherited("$(inherited)/sub \"x $(inherited)y\""),
            "$(inherited)/sub \"x $(inherited)y\""
        );
    }

    #[test]
    fn test_merge_empty_value_keeps_existing() {
        let mut table = SettingsTable::new().with(keys::OTHER_LDFLAGS, "$(inherited)");
        table.merge(SettingsTable::new().with(keys::OTHER_LDFLAGS, ""));

        assert_eq!(table.get(keys::OTHER_LDFLAGS), Some("$(inherited)"));
    }

    #[test]
    fn test_merge_empty_value_inserts_absent_key() {
        let mut table = SettingsTable::new();
        table.merge(SettingsTable::new().with(keys::HEADER_SEARCH_PATHS, ""));

        assert_eq!(table.get(keys::HEADER_SEARCH_PATHS), Some(""));
    }

    #[test]
    fn test_remove_deletes_accumulated_key() {
        let mut table = SettingsTable::new().with("A", "1").with("B", "2");
        table.merge(SettingsTable::new().with("A", "3"));

        assert_eq!(table.remove("A"), Some("1 3".to_string()));
        assert!(!table.contains_key("A"));
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["B"]);
    }

    #[test]
    fn test_quote() {
        assert_eq!(quote(&["a", "b"], None), "\"a\" \"b\"");
        assert_eq!(
            quote(&["a", "b"], Some("-isystem")),
            "-isystem \"a\" -isystem \"b\""
        );
        assert_eq!(quote::<&str>(&[], Some("-iquote")), "");
    }

    #[test]
    fn test_join_flags_skips_empty_parts() {
        assert_eq!(join_flags(&["$(inherited)", "", " -ObjC "]), "$(inherited) -ObjC");
    }

    #[test]
    fn test_display_writes_xcconfig_lines() {
        let table = SettingsTable::new().with("A", "1").with("B", "two words");
        assert_eq!(table.to_string(), "A = 1\nB = two words\n");
    }
}
