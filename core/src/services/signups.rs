//! Event signups and their statuses.

use super::{created_id, many, one, path};
use crate::args::Args;
use crate::client::EaClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, Transport};
use crate::object::EaObject;
use crate::resolve::EndpointDef;
use crate::schema::ObjectKind;

pub const CREATE: EndpointDef = EndpointDef::new("signups.create", HttpMethod::Post, "signups").body(ObjectKind::Signup);
pub const DELETE: EndpointDef = EndpointDef::new("signups.delete", HttpMethod::Delete, "signups/{eventSignupId}");
pub const GET: EndpointDef = EndpointDef::new("signups.get", HttpMethod::Get, "signups/{eventSignupId}");
pub const LIST: EndpointDef = EndpointDef::new("signups.list", HttpMethod::Get, "signups")
    .query(&["eventId", "vanId"])
    .paginated();
pub const STATUSES: EndpointDef =
    EndpointDef::new("signups.statuses", HttpMethod::Get, "signups/statuses").query(&["eventId", "eventTypeId"]);
pub const UPDATE: EndpointDef = EndpointDef::new("signups.update", HttpMethod::Put, "signups/{eventSignupId}")
    .body(ObjectKind::Signup)
    .path_to_body(&["eventSignupId"]);

pub struct Signups<'a, T> {
    client: &'a EaClient<T>,
}

impl<'a, T: Transport> Signups<'a, T> {
    pub(crate) fn new(client: &'a EaClient<T>) -> Self {
        Self { client }
    }

    /// Sign a person up for an event shift and return the signup id.
    pub fn create(&self, args: Args) -> Result<i64, ApiError> {
        let json = self.client.call(&CREATE, &[], args)?;
        created_id(ObjectKind::Signup, json, &CREATE)
    }

    pub fn delete(&self, signup_id: i64) -> Result<(), ApiError> {
        self.client.call(&DELETE, &path(&[signup_id]), Args::new()).map(drop)
    }

    pub fn get(&self, signup_id: i64) -> Result<EaObject, ApiError> {
        let json = self.client.call(&GET, &path(&[signup_id]), Args::new())?;
        one(ObjectKind::Signup, json, &GET)
    }

    /// Signups of an event (`event`) or of a person (`van`).
    pub fn list(&self, args: Args) -> Result<Vec<EaObject>, ApiError> {
        many(ObjectKind::Signup, self.client.call_list(&LIST, &[], args)?)
    }

    /// Statuses available to an event (`event`) or event type (`event_type`).
    pub fn statuses(&self, args: Args) -> Result<Vec<EaObject>, ApiError> {
        many(ObjectKind::Status, self.client.call_list(&STATUSES, &[], args)?)
    }

    pub fn update(&self, signup_id: i64, args: Args) -> Result<(), ApiError> {
        self.client.call(&UPDATE, &path(&[signup_id]), args).map(drop)
    }
}
