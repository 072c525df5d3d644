//! Events, their shifts, and event types.

use super::{created_id, many, one, path};
use crate::args::Args;
use crate::client::EaClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, Transport};
use crate::object::EaObject;
use crate::resolve::EndpointDef;
use crate::schema::ObjectKind;

pub const ADD_SHIFT: EndpointDef =
    EndpointDef::new("events.add_shift", HttpMethod::Post, "events/{eventId}/shifts").body(ObjectKind::EventShift);
pub const CREATE: EndpointDef = EndpointDef::new("events.create", HttpMethod::Post, "events").body(ObjectKind::Event);
pub const DELETE: EndpointDef = EndpointDef::new("events.delete", HttpMethod::Delete, "events/{eventId}");
pub const GET: EndpointDef = EndpointDef::new("events.get", HttpMethod::Get, "events/{eventId}").query(&["$expand"]);
pub const LIST: EndpointDef = EndpointDef::new("events.list", HttpMethod::Get, "events")
    .query(&[
        "codeIds",
        "createdByCommitteeId",
        "eventTypeIds",
        "inRepetitionWithEventId",
        "startingAfter",
        "startingBefore",
        "$expand",
    ])
    .max_top(50);
pub const PATCH: EndpointDef = EndpointDef::new("events.patch", HttpMethod::Patch, "events/{eventId}")
    .query(&["recurrenceType"])
    .body_params(&["isActive"])
    .path_to_body(&["eventId"]);
pub const UPDATE: EndpointDef = EndpointDef::new("events.update", HttpMethod::Put, "events/{eventId}")
    .body(ObjectKind::Event)
    .path_to_body(&["eventId"]);

pub const TYPE_GET: EndpointDef = EndpointDef::new("event_types.get", HttpMethod::Get, "events/types/{eventTypeId}");
pub const TYPE_LIST: EndpointDef = EndpointDef::new("event_types.list", HttpMethod::Get, "events/types");

pub struct Events<'a, T> {
    client: &'a EaClient<T>,
}

impl<'a, T: Transport> Events<'a, T> {
    pub(crate) fn new(client: &'a EaClient<T>) -> Self {
        Self { client }
    }

    /// Add a shift to an event and return it with its new id.
    pub fn add_shift(&self, event_id: i64, args: Args) -> Result<EaObject, ApiError> {
        let json = self.client.call(&ADD_SHIFT, &path(&[event_id]), args)?;
        one(ObjectKind::EventShift, json, &ADD_SHIFT)
    }

    /// Create an event and return its id.
    pub fn create(&self, args: Args) -> Result<i64, ApiError> {
        let json = self.client.call(&CREATE, &[], args)?;
        created_id(ObjectKind::Event, json, &CREATE)
    }

    pub fn delete(&self, event_id: i64) -> Result<(), ApiError> {
        self.client.call(&DELETE, &path(&[event_id]), Args::new()).map(drop)
    }

    /// Retrieve an event. `expand` takes any of `locations`, `codes`,
    /// `shifts`, `roles`, `notes` and `onlineforms`.
    pub fn get(&self, event_id: i64, args: Args) -> Result<EaObject, ApiError> {
        let json = self.client.call(&GET, &path(&[event_id]), args)?;
        one(ObjectKind::Event, json, &GET)
    }

    pub fn list(&self, args: Args) -> Result<Vec<EaObject>, ApiError> {
        many(ObjectKind::Event, self.client.call_list(&LIST, &[], args)?)
    }

    /// Change only whether an event is active.
    pub fn patch(&self, event_id: i64, args: Args) -> Result<(), ApiError> {
        self.client.call(&PATCH, &path(&[event_id]), args).map(drop)
    }

    /// Replace an event.
    pub fn update(&self, event_id: i64, args: Args) -> Result<(), ApiError> {
        self.client.call(&UPDATE, &path(&[event_id]), args).map(drop)
    }
}

pub struct EventTypes<'a, T> {
    client: &'a EaClient<T>,
}

impl<'a, T: Transport> EventTypes<'a, T> {
    pub(crate) fn new(client: &'a EaClient<T>) -> Self {
        Self { client }
    }

    pub fn get(&self, event_type_id: i64) -> Result<EaObject, ApiError> {
        let json = self.client.call(&TYPE_GET, &path(&[event_type_id]), Args::new())?;
        one(ObjectKind::EventType, json, &TYPE_GET)
    }

    pub fn list(&self) -> Result<Vec<EaObject>, ApiError> {
        many(ObjectKind::EventType, self.client.call_list(&TYPE_LIST, &[], Args::new())?)
    }
}
