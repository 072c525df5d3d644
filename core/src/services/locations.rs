//! Locations where events take place.

use super::{created_id, many, one, path};
use crate::args::Args;
use crate::client::EaClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, Transport};
use crate::object::EaObject;
use crate::resolve::EndpointDef;
use crate::schema::ObjectKind;

pub const CREATE: EndpointDef =
    EndpointDef::new("locations.create", HttpMethod::Post, "locations").body(ObjectKind::Location);
pub const DELETE: EndpointDef = EndpointDef::new("locations.delete", HttpMethod::Delete, "locations/{locationId}");
pub const FIND_OR_CREATE: EndpointDef =
    EndpointDef::new("locations.find_or_create", HttpMethod::Post, "locations/findOrCreate").body(ObjectKind::Location);
pub const GET: EndpointDef = EndpointDef::new("locations.get", HttpMethod::Get, "locations/{locationId}");
pub const LIST: EndpointDef = EndpointDef::new("locations.list", HttpMethod::Get, "locations")
    .query(&["name", "$expand"])
    .paginated();

pub struct Locations<'a, T> {
    client: &'a EaClient<T>,
}

impl<'a, T: Transport> Locations<'a, T> {
    pub(crate) fn new(client: &'a EaClient<T>) -> Self {
        Self { client }
    }

    /// Create a location and return its id.
    pub fn create(&self, args: Args) -> Result<i64, ApiError> {
        let json = self.client.call(&CREATE, &[], args)?;
        created_id(ObjectKind::Location, json, &CREATE)
    }

    pub fn delete(&self, location_id: i64) -> Result<(), ApiError> {
        self.client.call(&DELETE, &path(&[location_id]), Args::new()).map(drop)
    }

    /// Id of the matching location, creating it if needed.
    pub fn find_or_create(&self, args: Args) -> Result<i64, ApiError> {
        let json = self.client.call(&FIND_OR_CREATE, &[], args)?;
        created_id(ObjectKind::Location, json, &FIND_OR_CREATE)
    }

    pub fn get(&self, location_id: i64) -> Result<EaObject, ApiError> {
        let json = self.client.call(&GET, &path(&[location_id]), Args::new())?;
        one(ObjectKind::Location, json, &GET)
    }

    pub fn list(&self, args: Args) -> Result<Vec<EaObject>, ApiError> {
        many(ObjectKind::Location, self.client.call_list(&LIST, &[], args)?)
    }
}
