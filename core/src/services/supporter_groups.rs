//! Supporter groups and their members.

use super::{many, one, path};
use crate::args::Args;
use crate::client::EaClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, Transport};
use crate::object::EaObject;
use crate::resolve::EndpointDef;
use crate::schema::ObjectKind;

pub const CREATE: EndpointDef =
    EndpointDef::new("supporter_groups.create", HttpMethod::Post, "supporterGroups").body(ObjectKind::SupporterGroup);
pub const DELETE: EndpointDef =
    EndpointDef::new("supporter_groups.delete", HttpMethod::Delete, "supporterGroups/{supporterGroupId}");
pub const GET: EndpointDef =
    EndpointDef::new("supporter_groups.get", HttpMethod::Get, "supporterGroups/{supporterGroupId}");
pub const LIST: EndpointDef =
    EndpointDef::new("supporter_groups.list", HttpMethod::Get, "supporterGroups").paginated();
pub const ADD_PERSON: EndpointDef = EndpointDef::new(
    "supporter_groups.add_person",
    HttpMethod::Put,
    "supporterGroups/{supporterGroupId}/people/{vanId}",
);
pub const REMOVE_PERSON: EndpointDef = EndpointDef::new(
    "supporter_groups.remove_person",
    HttpMethod::Delete,
    "supporterGroups/{supporterGroupId}/people/{vanId}",
);

pub struct SupporterGroups<'a, T> {
    client: &'a EaClient<T>,
}

impl<'a, T: Transport> SupporterGroups<'a, T> {
    pub(crate) fn new(client: &'a EaClient<T>) -> Self {
        Self { client }
    }

    pub fn create(&self, args: Args) -> Result<EaObject, ApiError> {
        let json = self.client.call(&CREATE, &[], args)?;
        one(ObjectKind::SupporterGroup, json, &CREATE)
    }

    pub fn delete(&self, group_id: i64) -> Result<(), ApiError> {
        self.client.call(&DELETE, &path(&[group_id]), Args::new()).map(drop)
    }

    pub fn get(&self, group_id: i64) -> Result<EaObject, ApiError> {
        let json = self.client.call(&GET, &path(&[group_id]), Args::new())?;
        one(ObjectKind::SupporterGroup, json, &GET)
    }

    pub fn list(&self, args: Args) -> Result<Vec<EaObject>, ApiError> {
        many(ObjectKind::SupporterGroup, self.client.call_list(&LIST, &[], args)?)
    }

    pub fn add_person(&self, group_id: i64, van_id: i64) -> Result<(), ApiError> {
        self.client
            .call(&ADD_PERSON, &path(&[group_id, van_id]), Args::new())
            .map(drop)
    }

    pub fn remove_person(&self, group_id: i64, van_id: i64) -> Result<(), ApiError> {
        self.client
            .call(&REMOVE_PERSON, &path(&[group_id, van_id]), Args::new())
            .map(drop)
    }
}
