//! Property and object type definitions, and the tables built from them.
//!
//! # Design
//! Definitions are `const` data (`PropertyDef`, `TypeDef`) so the whole
//! catalog can live in statics. Building turns a definition into runtime
//! form: owned canonical names, expanded aliases and a validated
//! `AliasTable`. A type with a `prefix` renames its prefixed properties to
//! `prefix + Name` (so `id` becomes `vanId` on a person), keeping the
//! unprefixed name and its snake_case as aliases.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use crate::alias::{to_snake, AliasHit, AliasTable};
use crate::error::ApiError;

macro_rules! object_kinds {
    ($($variant:ident),+ $(,)?) => {
        /// Every object type the client knows about.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ObjectKind {
            $($variant),+
        }

        impl ObjectKind {
            pub const ALL: &'static [ObjectKind] = &[$(ObjectKind::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(ObjectKind::$variant => stringify!($variant)),+
                }
            }
        }
    };
}

object_kinds! {
    ActivistCode,
    ActivistCodeData,
    Address,
    ApiKeyProfile,
    CanvassContext,
    CanvassResponse,
    Code,
    CodeResult,
    CustomFieldValue,
    DisclosureFieldValue,
    Email,
    Employer,
    Error,
    Event,
    EventRole,
    EventShift,
    EventType,
    Identifier,
    KeyValuePair,
    Location,
    Note,
    NoteCategory,
    Person,
    Phone,
    ScriptResponse,
    Signup,
    Status,
    SupporterGroup,
    VoterRegistrationBatch,
}

impl ObjectKind {
    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of the values a property holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Any JSON scalar, passed through untouched.
    Scalar,
    /// A list of scalars.
    ScalarList,
    /// A nested object of the given kind.
    Object(ObjectKind),
    /// A list of nested objects of the given kind.
    ObjectList(ObjectKind),
    /// A comma-joined list of names, as taken by `$expand`.
    Expand,
}

impl ValueKind {
    pub fn is_list(self) -> bool {
        matches!(self, ValueKind::ScalarList | ValueKind::ObjectList(_))
    }
}

/// Static description of a property: its canonical name, aliases and shape.
#[derive(Debug, Clone, Copy)]
pub struct PropertyDef {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub singular: Option<&'static str>,
    pub kind: ValueKind,
}

impl PropertyDef {
    pub const fn scalar(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self {
            name,
            aliases,
            singular: None,
            kind: ValueKind::Scalar,
        }
    }

    pub const fn scalars(
        name: &'static str,
        aliases: &'static [&'static str],
        singular: &'static str,
    ) -> Self {
        Self {
            name,
            aliases,
            singular: Some(singular),
            kind: ValueKind::ScalarList,
        }
    }

    pub const fn object(
        name: &'static str,
        aliases: &'static [&'static str],
        kind: ObjectKind,
    ) -> Self {
        Self {
            name,
            aliases,
            singular: None,
            kind: ValueKind::Object(kind),
        }
    }

    pub const fn list(
        name: &'static str,
        aliases: &'static [&'static str],
        singular: &'static str,
        kind: ObjectKind,
    ) -> Self {
        Self {
            name,
            aliases,
            singular: Some(singular),
            kind: ValueKind::ObjectList(kind),
        }
    }

    pub const fn expand(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self {
            name,
            aliases,
            singular: None,
            kind: ValueKind::Expand,
        }
    }
}

/// Static description of an object type.
///
/// `id` and `name` designate the properties a bare number or a bare string
/// populate when an object is built from a primary value. Names listed in
/// `shared` come from the shared property table; `own` holds definitions
/// specific to this type, which shadow shared ones of the same name.
#[derive(Debug, Clone, Copy)]
pub struct TypeDef {
    pub kind: ObjectKind,
    pub id: Option<&'static str>,
    pub name: Option<&'static str>,
    pub prefix: Option<&'static str>,
    pub prefixed: &'static [&'static str],
    pub shared: &'static [&'static str],
    pub own: &'static [PropertyDef],
}

impl TypeDef {
    pub const fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            id: None,
            name: None,
            prefix: None,
            prefixed: &[],
            shared: &[],
            own: &[],
        }
    }

    /// Designate `id` as the id property and `name` as the name property.
    pub const fn id(mut self, id: &'static str) -> Self {
        self.id = Some(id);
        self
    }

    pub const fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Prefix for the id property and for every name in `prefixed`.
    pub const fn prefix(mut self, prefix: &'static str, prefixed: &'static [&'static str]) -> Self {
        self.prefix = Some(prefix);
        self.prefixed = prefixed;
        self
    }

    pub const fn shared(mut self, shared: &'static [&'static str]) -> Self {
        self.shared = shared;
        self
    }

    pub const fn own(mut self, own: &'static [PropertyDef]) -> Self {
        self.own = own;
        self
    }
}

/// A property in runtime form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub aliases: Vec<String>,
    pub singular: Option<String>,
    pub kind: ValueKind,
}

impl Property {
    pub fn from_def(def: &PropertyDef) -> Self {
        Self {
            name: def.name.to_string(),
            aliases: def.aliases.iter().map(|a| a.to_string()).collect(),
            singular: def.singular.map(str::to_string),
            kind: def.kind,
        }
    }

    /// `def` renamed to `prefix + Name`, keeping the old name as an alias.
    pub fn prefixed(prefix: &str, def: &PropertyDef) -> Self {
        let mut property = Self::from_def(def);
        property.name = prefixed_name(prefix, def.name);
        property.aliases.push(def.name.to_string());
        property.aliases.push(to_snake(def.name));
        property
    }

    /// Same property under a different canonical name.
    pub fn renamed(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }
}

fn prefixed_name(prefix: &str, name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => format!("{prefix}{}{}", first.to_uppercase(), chars.as_str()),
        None => prefix.to_string(),
    }
}

/// An ordered list of properties with the alias table over them.
#[derive(Debug, Clone)]
pub struct PropertySet {
    properties: Vec<Property>,
    table: AliasTable,
}

impl PropertySet {
    pub fn build(properties: Vec<Property>) -> Result<Self, ApiError> {
        let mut table = AliasTable::new();
        for property in &properties {
            table.add(&property.name, &property.aliases, property.singular.as_deref())?;
        }
        Ok(Self { properties, table })
    }

    pub fn lookup(&self, name: &str) -> Option<AliasHit<'_>> {
        self.table.lookup(name)
    }

    pub fn resolve<'a>(&'a self, name: &'a str) -> Cow<'a, str> {
        self.table.resolve(name)
    }

    /// The property in `slot`; slots come from `lookup` and are always in range.
    pub fn property(&self, slot: usize) -> &Property {
        &self.properties[slot]
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn table(&self) -> &AliasTable {
        &self.table
    }

    pub fn canonical_slot(&self, name: &str) -> Option<usize> {
        self.table.canonical_slot(name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// A built object type.
#[derive(Debug, Clone)]
pub struct ObjectType {
    kind: ObjectKind,
    params: PropertySet,
    id_slot: Option<usize>,
    name_slot: Option<usize>,
}

impl ObjectType {
    pub fn build(def: &TypeDef, shared: &HashMap<&str, &PropertyDef>) -> Result<Self, ApiError> {
        let scope = def.kind.as_str();
        let invalid = |reason: String| ApiError::InvalidDefinition {
            scope: scope.to_string(),
            reason,
        };
        let own = |name: &str| def.own.iter().find(|p| p.name == name);
        let base = |name: &str| {
            own(name)
                .or_else(|| shared.get(name).copied())
                .ok_or_else(|| invalid(format!("no property named `{name}`")))
        };

        let mut prefixed: Vec<&str> = Vec::new();
        match def.prefix {
            Some(_) => {
                prefixed.extend(def.id);
                prefixed.extend(def.prefixed.iter().filter(|p| Some(**p) != def.id));
            }
            None if !def.prefixed.is_empty() => {
                return Err(invalid("prefixed properties without a prefix".into()));
            }
            None => {}
        }

        let mut properties = Vec::new();
        if let Some(prefix) = def.prefix {
            for name in prefixed.iter().copied() {
                properties.push(Property::prefixed(prefix, base(name)?));
            }
        }
        for designation in [def.id, def.name].into_iter().flatten() {
            let declared = prefixed.contains(&designation)
                || def.shared.contains(&designation)
                || own(designation).is_some();
            if !declared {
                properties.push(Property::from_def(base(designation)?));
            }
        }
        for name in def.shared.iter().filter(|name| own(**name).is_none()) {
            let property = shared
                .get(name)
                .ok_or_else(|| invalid(format!("no shared property `{name}`")))?;
            properties.push(Property::from_def(property));
        }
        for property in def.own {
            if !prefixed.contains(&property.name) {
                properties.push(Property::from_def(property));
            }
        }

        let params = PropertySet::build(properties)?;
        let designated = |designation: Option<&str>| -> Result<Option<usize>, ApiError> {
            let Some(name) = designation else {
                return Ok(None);
            };
            let canonical = match def.prefix {
                Some(prefix) if prefixed.contains(&name) => prefixed_name(prefix, name),
                _ => name.to_string(),
            };
            params
                .canonical_slot(&canonical)
                .map(Some)
                .ok_or_else(|| invalid(format!("designated property `{canonical}` is missing")))
        };
        let id_slot = designated(def.id)?;
        let name_slot = designated(def.name)?;

        Ok(Self {
            kind: def.kind,
            params,
            id_slot,
            name_slot,
        })
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn params(&self) -> &PropertySet {
        &self.params
    }

    pub fn id_slot(&self) -> Option<usize> {
        self.id_slot
    }

    pub fn name_slot(&self) -> Option<usize> {
        self.name_slot
    }

    /// Canonical name of the id property, such as `vanId` for a person.
    pub fn id_property(&self) -> Option<&str> {
        self.id_slot.map(|slot| self.params.property(slot).name.as_str())
    }

    pub fn name_property(&self) -> Option<&str> {
        self.name_slot.map(|slot| self.params.property(slot).name.as_str())
    }

    pub fn resolve<'a>(&'a self, name: &'a str) -> Cow<'a, str> {
        self.params.resolve(name)
    }
}

/// Built object types indexed by kind.
#[derive(Debug, Clone)]
pub(crate) struct TypeTable {
    types: Vec<ObjectType>,
}

impl TypeTable {
    /// Build one `ObjectType` per `ObjectKind`; every kind must be defined exactly once.
    pub(crate) fn build(defs: &[TypeDef], shared: &HashMap<&str, &PropertyDef>) -> Result<Self, ApiError> {
        let mut types = Vec::with_capacity(ObjectKind::ALL.len());
        for kind in ObjectKind::ALL {
            let mut matching = defs.iter().filter(|def| def.kind == *kind);
            let (Some(def), None) = (matching.next(), matching.next()) else {
                return Err(ApiError::InvalidDefinition {
                    scope: kind.as_str().to_string(),
                    reason: "must be defined exactly once".into(),
                });
            };
            types.push(ObjectType::build(def, shared)?);
        }
        Ok(Self { types })
    }

    pub(crate) fn get(&self, kind: ObjectKind) -> &ObjectType {
        &self.types[kind.index()]
    }
}
