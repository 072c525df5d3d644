//! The process-wide catalog of object types and endpoint schemas.
//!
//! # Design
//! Built lazily on first use from the static definitions and never changed
//! afterwards. Building validates everything at once (missing shared
//! properties, alias conflicts within any type or endpoint), and a failure
//! is kept and returned from every later lookup instead of panicking.

use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::debug;

use crate::definitions::{SHARED, TYPES};
use crate::error::ApiError;
use crate::resolve::{EndpointDef, EndpointSchema};
use crate::schema::{ObjectKind, ObjectType, PropertyDef, TypeDef, TypeTable};
use crate::services::ENDPOINTS;

static CATALOG: LazyLock<Result<Catalog, ApiError>> = LazyLock::new(|| Catalog::build(SHARED, TYPES, ENDPOINTS));

/// The shared catalog, built on first call.
pub fn catalog() -> Result<&'static Catalog, ApiError> {
    CATALOG.as_ref().map_err(Clone::clone)
}

pub fn object_type(kind: ObjectKind) -> Result<&'static ObjectType, ApiError> {
    Ok(catalog()?.object_type(kind))
}

#[derive(Debug)]
pub struct Catalog {
    shared: HashMap<&'static str, &'static PropertyDef>,
    types: TypeTable,
    endpoints: HashMap<&'static str, EndpointSchema>,
}

impl Catalog {
    pub fn build(
        shared: &'static [PropertyDef],
        types: &'static [TypeDef],
        endpoints: &[&EndpointDef],
    ) -> Result<Self, ApiError> {
        let mut by_name = HashMap::with_capacity(shared.len());
        for property in shared {
            if by_name.insert(property.name, property).is_some() {
                return Err(ApiError::InvalidDefinition {
                    scope: "shared properties".into(),
                    reason: format!("`{}` is defined twice", property.name),
                });
            }
        }
        let types = TypeTable::build(types, &by_name)?;

        let mut catalog = Self {
            shared: by_name,
            types,
            endpoints: HashMap::with_capacity(endpoints.len()),
        };
        for def in endpoints {
            let schema = EndpointSchema::build(def, &catalog)?;
            if catalog.endpoints.insert(def.id, schema).is_some() {
                return Err(ApiError::InvalidDefinition {
                    scope: def.id.to_string(),
                    reason: "endpoint id is used twice".into(),
                });
            }
        }
        debug!(
            types = ObjectKind::ALL.len(),
            endpoints = catalog.endpoints.len(),
            "catalog built."
        );
        Ok(catalog)
    }

    pub fn object_type(&self, kind: ObjectKind) -> &ObjectType {
        self.types.get(kind)
    }

    pub fn shared(&self, name: &str) -> Option<&PropertyDef> {
        self.shared.get(name).copied()
    }

    /// Schema of a registered endpoint.
    pub fn endpoint(&self, id: &str) -> Option<&EndpointSchema> {
        self.endpoints.get(id)
    }

    pub fn endpoints(&self) -> impl Iterator<Item = &EndpointSchema> {
        self.endpoints.values()
    }
}
