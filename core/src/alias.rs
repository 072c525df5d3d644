//! Alias tables: every accepted spelling of a property name, mapped to the
//! property it stands for.
//!
//! # Design
//! A table is built once per object type or endpoint and never mutated
//! afterwards. Each property lands in a numbered slot; registering it also
//! registers its snake_case form and its declared aliases. Query parameters
//! whose documented name starts with `$` are registered without the marker,
//! so `expand` and `$expand` look up the same slot, while the canonical name
//! keeps the marker for the wire.
//!
//! Two properties claiming the same spelling is a build error, not a
//! last-one-wins overwrite.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::error::ApiError;

/// Prefix EveryAction uses on OData-style query parameters such as `$expand`.
pub const QUERY_MARKER: char = '$';

/// Convert a camelCase name to snake_case.
///
/// The first character is lowercased; every later run of ASCII capitals is
/// prefixed with `_` and lowercased. Runs are kept together, so `vanId`
/// becomes `van_id` and `ID` becomes `i_d`.
pub fn to_snake(name: &str) -> String {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = String::with_capacity(name.len() + 4);
    out.extend(first.to_lowercase());
    let mut in_run = false;
    for c in chars {
        if c.is_ascii_uppercase() {
            if !in_run {
                out.push('_');
                in_run = true;
            }
            out.push(c.to_ascii_lowercase());
        } else {
            in_run = false;
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Strip a leading `$` marker, if any.
pub fn strip_marker(name: &str) -> &str {
    name.strip_prefix(QUERY_MARKER).unwrap_or(name)
}

/// What a looked-up name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasHit<'a> {
    pub slot: usize,
    pub canonical: &'a str,
    /// The name was the singular alias of a list property.
    pub singular: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    slot: usize,
    singular: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    names: HashMap<String, Entry>,
    canonical: Vec<String>,
    by_canonical: HashMap<String, usize>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a property and return its slot.
    pub fn add<S: AsRef<str>>(
        &mut self,
        canonical: &str,
        aliases: &[S],
        singular: Option<&str>,
    ) -> Result<usize, ApiError> {
        let slot = self.canonical.len();
        if let Some(&existing) = self.by_canonical.get(canonical) {
            return Err(ApiError::AliasConflict {
                alias: canonical.to_string(),
                first: self.canonical[existing].clone(),
                second: canonical.to_string(),
            });
        }
        self.canonical.push(canonical.to_string());
        self.by_canonical.insert(canonical.to_string(), slot);

        let bare = strip_marker(canonical);
        self.insert(bare, slot, false)?;
        self.insert(&to_snake(bare), slot, false)?;
        for alias in aliases {
            self.insert(strip_marker(alias.as_ref()), slot, false)?;
        }
        if let Some(name) = singular {
            self.insert(strip_marker(name), slot, true)?;
        }
        Ok(slot)
    }

    fn insert(&mut self, name: &str, slot: usize, singular: bool) -> Result<(), ApiError> {
        let entry = Entry { slot, singular };
        match self.names.get(name) {
            Some(existing) if *existing == entry => Ok(()),
            Some(existing) => Err(ApiError::AliasConflict {
                alias: name.to_string(),
                first: self.canonical[existing.slot].clone(),
                second: self.canonical[slot].clone(),
            }),
            None => {
                self.names.insert(name.to_string(), entry);
                Ok(())
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<AliasHit<'_>> {
        self.names.get(strip_marker(name)).map(|entry| AliasHit {
            slot: entry.slot,
            canonical: &self.canonical[entry.slot],
            singular: entry.singular,
        })
    }

    /// Canonical name for `name`, or `name` itself when nothing matches.
    pub fn resolve<'a>(&'a self, name: &'a str) -> Cow<'a, str> {
        match self.lookup(name) {
            Some(hit) => Cow::Borrowed(hit.canonical),
            None => Cow::Borrowed(name),
        }
    }

    pub fn is_singular(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(|hit| hit.singular)
    }

    /// Slot whose canonical name is exactly `name`; aliases are not consulted.
    pub fn canonical_slot(&self, name: &str) -> Option<usize> {
        self.by_canonical.get(name).copied()
    }

    pub fn canonical_name(&self, slot: usize) -> Option<&str> {
        self.canonical.get(slot).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }

    /// Every registered spelling, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    #[test]
    fn snake_case_matches_run_rules() {
        assert_eq!(to_snake("firstName"), "first_name");
        assert_eq!(to_snake("vanId"), "van_id");
        assert_eq!(to_snake("VANID"), "v_anid");
        assert_eq!(to_snake("ID"), "i_d");
        assert_eq!(to_snake("addressLine1"), "address_line1");
        assert_eq!(to_snake("already_snake"), "already_snake");
        assert_eq!(to_snake(""), "");
    }

    #[test]
    fn canonical_snake_and_aliases_resolve() {
        let mut table = AliasTable::new();
        table.add("firstName", &["first"], None).unwrap();
        table.add("phones", NONE, Some("phone")).unwrap();

        assert_eq!(table.resolve("firstName"), "firstName");
        assert_eq!(table.resolve("first_name"), "firstName");
        assert_eq!(table.resolve("first"), "firstName");
        assert_eq!(table.resolve("phone"), "phones");
        assert!(table.is_singular("phone"));
        assert!(!table.is_singular("phones"));
    }

    #[test]
    fn unknown_names_pass_through() {
        let table = AliasTable::new();
        assert_eq!(table.resolve("whatever"), "whatever");
        assert!(table.lookup("whatever").is_none());
    }

    #[test]
    fn query_marker_is_optional_on_lookup() {
        let mut table = AliasTable::new();
        table.add("$expand", NONE, None).unwrap();
        assert_eq!(table.resolve("expand"), "$expand");
        assert_eq!(table.resolve("$expand"), "$expand");
        assert_eq!(table.canonical_slot("$expand"), Some(0));
        assert_eq!(table.canonical_slot("expand"), None);
    }

    #[test]
    fn conflicting_alias_is_rejected() {
        let mut table = AliasTable::new();
        table.add("startDate", &["start"], None).unwrap();
        let err = table.add("startTime", &["start"], None).unwrap_err();
        assert_eq!(
            err,
            ApiError::AliasConflict {
                alias: "start".into(),
                first: "startDate".into(),
                second: "startTime".into(),
            }
        );
    }

    #[test]
    fn repeated_alias_for_same_property_is_harmless() {
        let mut table = AliasTable::new();
        table.add("id", &["id"], None).unwrap();
        assert_eq!(table.len(), 1);
    }
}
