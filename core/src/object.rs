//! Typed EveryAction records with alias-aware access.
//!
//! # Design
//! An `EaObject` is a row of optional slots, one per declared property of
//! its `ObjectType`, plus a map of undeclared keys kept from responses. All
//! name handling goes through the type's alias table, so an alias is only a
//! different way to reach the same slot.
//!
//! Values bound for nested-object properties are coerced by explicit shape:
//! an object of the right kind is kept, a JSON map is keyword-constructed,
//! and a bare number or string becomes the primary value of the target type.
//! Anything else is rejected.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::trace;

use crate::catalog;
use crate::error::ApiError;
use crate::schema::{ObjectKind, ObjectType, Property, PropertySet, ValueKind};
use crate::value::{Primary, Value};

/// Name reported for the positional primary value in argument conflicts.
const PRIMARY_ARG: &str = "<primary>";

#[derive(Debug, Clone)]
pub struct EaObject {
    ty: &'static ObjectType,
    slots: Vec<Option<Value>>,
    extra: BTreeMap<String, Value>,
}

impl PartialEq for EaObject {
    fn eq(&self, other: &Self) -> bool {
        self.ty.kind() == other.ty.kind() && self.slots == other.slots && self.extra == other.extra
    }
}

impl EaObject {
    /// An object of `kind` with nothing set.
    pub fn new(kind: ObjectKind) -> Result<Self, ApiError> {
        Ok(Self::of_type(catalog::object_type(kind)?))
    }

    pub fn of_type(ty: &'static ObjectType) -> Self {
        Self {
            ty,
            slots: vec![None; ty.params().len()],
            extra: BTreeMap::new(),
        }
    }

    /// Build from a single id or name.
    pub fn from_primary(kind: ObjectKind, primary: impl Into<Primary>) -> Result<Self, ApiError> {
        Self::build(kind, Some(primary.into()), std::iter::empty::<(&str, Value)>())
    }

    /// Build from named arguments, which may use any alias.
    pub fn from_keywords<I, K, V>(kind: ObjectKind, keywords: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        Self::build(kind, None, keywords)
    }

    /// Build from an optional primary value plus named arguments.
    ///
    /// The primary value counts as one supplier of its slot, so naming the
    /// same property again is an `AmbiguousArgument`.
    pub fn build<I, K, V>(kind: ObjectKind, primary: Option<Primary>, keywords: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let ty = catalog::object_type(kind)?;
        let mut object = Self::of_type(ty);
        let mut suppliers: Vec<Option<String>> = vec![None; ty.params().len()];

        if let Some(primary) = primary {
            let (slot, value) = primary_slot(ty, primary)?;
            suppliers[slot] = Some(PRIMARY_ARG.to_string());
            object.slots[slot] = Some(value);
        }

        let scope = ty.name();
        assign(ty.params(), &mut object.slots, &mut suppliers, keywords, |name, _| {
            Err(ApiError::UnknownParameter {
                name,
                scope: scope.to_string(),
            })
        })?;
        Ok(object)
    }

    /// Reconstruct an object from a response body.
    ///
    /// Keys must match canonical names exactly; anything else is kept as an
    /// extra under its original name.
    pub fn from_json(kind: ObjectKind, json: serde_json::Value) -> Result<Self, ApiError> {
        let ty = catalog::object_type(kind)?;
        match json {
            serde_json::Value::Object(map) => {
                let mut object = Self::of_type(ty);
                for (key, raw) in map {
                    match ty.params().canonical_slot(&key) {
                        Some(_) if raw.is_null() => {}
                        Some(slot) => {
                            let property = ty.params().property(slot);
                            object.slots[slot] = Some(decode(property, raw)?);
                        }
                        None => {
                            trace!(kind = ty.name(), key = %key, "kept undeclared response key.");
                            object.extra.insert(key, Value::Json(raw));
                        }
                    }
                }
                Ok(object)
            }
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(id) => Self::from_primary(kind, id),
                None => Err(ApiError::Deserialization(format!("{n} is not a valid {kind} id"))),
            },
            serde_json::Value::String(name) => Self::from_primary(kind, name),
            other => Err(ApiError::Deserialization(format!("expected a {kind} object, got {other}"))),
        }
    }

    pub fn kind(&self) -> ObjectKind {
        self.ty.kind()
    }

    pub fn object_type(&self) -> &'static ObjectType {
        self.ty
    }

    /// Read a property by canonical name or alias.
    ///
    /// Returns `Ok(None)` for declared properties that are unset. Undeclared
    /// keys kept from a response are readable under their original name.
    pub fn get(&self, name: &str) -> Result<Option<&Value>, ApiError> {
        match self.ty.params().lookup(name) {
            Some(hit) if hit.singular => Err(ApiError::AmbiguousAccess {
                alias: name.to_string(),
                canonical: hit.canonical.to_string(),
            }),
            Some(hit) => Ok(self.slots[hit.slot].as_ref()),
            None => match self.extra.get(name) {
                Some(value) => Ok(Some(value)),
                None => Err(self.unknown(name)),
            },
        }
    }

    /// Write a property by canonical name or alias, coercing the value.
    ///
    /// A singular alias wraps the value in a one-element list. `null` unsets.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ApiError> {
        let value = value.into();
        let Some(hit) = self.ty.params().lookup(name) else {
            return Err(self.unknown(name));
        };
        let slot = hit.slot;
        if value.is_null() {
            self.slots[slot] = None;
            return Ok(());
        }
        let coerced = coerce(self.ty.params().property(slot), value, hit.singular, name)?;
        self.slots[slot] = Some(coerced);
        Ok(())
    }

    /// Clear a property, returning its previous value.
    pub fn unset(&mut self, name: &str) -> Result<Option<Value>, ApiError> {
        match self.ty.params().lookup(name) {
            Some(hit) => Ok(self.slots[hit.slot].take()),
            None => Err(self.unknown(name)),
        }
    }

    pub fn is_set(&self, name: &str) -> bool {
        match self.ty.params().lookup(name) {
            Some(hit) => self.slots[hit.slot].is_some(),
            None => self.extra.contains_key(name),
        }
    }

    /// Value of the id-designated property, when it holds an integer.
    pub fn id(&self) -> Option<i64> {
        self.ty
            .id_slot()
            .and_then(|slot| self.slots[slot].as_ref())
            .and_then(Value::as_i64)
    }

    /// Value of the name-designated property, when it holds a string.
    pub fn name(&self) -> Option<&str> {
        self.ty
            .name_slot()
            .and_then(|slot| self.slots[slot].as_ref())
            .and_then(Value::as_str)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).ok().flatten().and_then(Value::as_i64)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).ok().flatten().and_then(Value::as_str)
    }

    pub fn get_object(&self, name: &str) -> Option<&EaObject> {
        self.get(name).ok().flatten().and_then(Value::as_object)
    }

    /// Set properties by canonical name, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.ty
            .params()
            .properties()
            .iter()
            .zip(&self.slots)
            .filter_map(|(property, slot)| slot.as_ref().map(|v| (property.name.as_str(), v)))
    }

    /// Undeclared keys kept from a response.
    pub fn extras(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (name, value) in self.iter() {
            map.insert(name.to_string(), value.to_json());
        }
        for (name, value) in &self.extra {
            map.insert(name.clone(), value.to_json());
        }
        serde_json::Value::Object(map)
    }

    fn unknown(&self, name: &str) -> ApiError {
        ApiError::UnknownParameter {
            name: name.to_string(),
            scope: self.ty.name().to_string(),
        }
    }
}

impl Serialize for EaObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, value)?;
        }
        for (name, value) in &self.extra {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

fn primary_slot(ty: &ObjectType, primary: Primary) -> Result<(usize, Value), ApiError> {
    let construction = |reason: &str| ApiError::Construction {
        kind: ty.name(),
        reason: reason.to_string(),
    };
    match primary {
        Primary::Id(id) => ty
            .id_slot()
            .map(|slot| (slot, Value::from(id)))
            .ok_or_else(|| construction("type has no id property")),
        Primary::Name(name) => ty
            .name_slot()
            .map(|slot| (slot, Value::from(name)))
            .ok_or_else(|| construction("type has no name property")),
    }
}

/// Assign named arguments to slots of `params`.
///
/// `suppliers` records which argument filled each slot so a second argument
/// for the same slot is reported as ambiguous. `null` values are skipped.
/// Names that match nothing are handed to `unknown`.
pub(crate) fn assign<I, K, V, F>(
    params: &PropertySet,
    slots: &mut [Option<Value>],
    suppliers: &mut [Option<String>],
    keywords: I,
    mut unknown: F,
) -> Result<(), ApiError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<Value>,
    F: FnMut(String, Value) -> Result<(), ApiError>,
{
    for (name, value) in keywords {
        let name = name.as_ref();
        let value = value.into();
        if value.is_null() {
            continue;
        }
        let Some(hit) = params.lookup(name) else {
            unknown(name.to_string(), value)?;
            continue;
        };
        if let Some(first) = &suppliers[hit.slot] {
            return Err(ApiError::AmbiguousArgument {
                canonical: hit.canonical.to_string(),
                first: first.clone(),
                second: name.to_string(),
            });
        }
        suppliers[hit.slot] = Some(name.to_string());
        slots[hit.slot] = Some(coerce(params.property(hit.slot), value, hit.singular, name)?);
    }
    Ok(())
}

/// Fit `value` to the shape `property` declares.
pub(crate) fn coerce(property: &Property, value: Value, singular: bool, given: &str) -> Result<Value, ApiError> {
    match property.kind {
        ValueKind::Scalar => Ok(value),
        ValueKind::ScalarList if singular => Ok(Value::List(vec![value])),
        ValueKind::ScalarList => expect_list(value, given).map(Value::List),
        ValueKind::Object(kind) => coerce_object(kind, value, given),
        ValueKind::ObjectList(kind) if singular => Ok(Value::List(vec![coerce_object(kind, value, given)?])),
        ValueKind::ObjectList(kind) => expect_list(value, given)?
            .into_iter()
            .map(|item| coerce_object(kind, item, given))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        ValueKind::Expand => join_names(value, given),
    }
}

fn invalid(given: &str, expected: impl Into<String>) -> ApiError {
    ApiError::InvalidValue {
        name: given.to_string(),
        expected: expected.into(),
    }
}

fn expect_list(value: Value, given: &str) -> Result<Vec<Value>, ApiError> {
    match value {
        Value::List(items) => Ok(items),
        Value::Json(serde_json::Value::Array(items)) => Ok(items.into_iter().map(Value::Json).collect()),
        _ => Err(invalid(given, "a list")),
    }
}

fn coerce_object(kind: ObjectKind, value: Value, given: &str) -> Result<Value, ApiError> {
    match value {
        Value::Object(object) if object.kind() == kind => Ok(Value::Object(object)),
        Value::Object(object) => Err(invalid(given, format!("a {kind}, got a {}", object.kind()))),
        Value::Json(serde_json::Value::Object(map)) => EaObject::from_keywords(kind, map).map(Value::Object),
        Value::Json(serde_json::Value::Number(n)) => match n.as_i64() {
            Some(id) => EaObject::from_primary(kind, id).map(Value::Object),
            None => Err(invalid(given, format!("an integer {kind} id"))),
        },
        Value::Json(serde_json::Value::String(name)) => EaObject::from_primary(kind, name).map(Value::Object),
        _ => Err(invalid(given, format!("a {kind}, a map, an id or a name"))),
    }
}

fn join_names(value: Value, given: &str) -> Result<Value, ApiError> {
    match value {
        Value::Json(serde_json::Value::String(joined)) => Ok(Value::from(joined)),
        other => {
            let names = expect_list(other, given)?
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| invalid(given, "a string or a list of strings"))?;
            Ok(Value::from(names.join(",")))
        }
    }
}

fn decode(property: &Property, raw: serde_json::Value) -> Result<Value, ApiError> {
    match (property.kind, raw) {
        (ValueKind::Object(kind), raw) => EaObject::from_json(kind, raw).map(Value::Object),
        (ValueKind::ObjectList(kind), serde_json::Value::Array(items)) => items
            .into_iter()
            .filter(|item| !item.is_null())
            .map(|item| EaObject::from_json(kind, item).map(Value::Object))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        (ValueKind::ScalarList, serde_json::Value::Array(items)) => {
            Ok(Value::List(items.into_iter().map(Value::Json).collect()))
        }
        (ValueKind::ObjectList(_) | ValueKind::ScalarList, other) => Err(ApiError::Deserialization(format!(
            "`{}` should be a list, got {other}",
            property.name
        ))),
        (ValueKind::Scalar | ValueKind::Expand, raw) => Ok(Value::Json(raw)),
    }
}
