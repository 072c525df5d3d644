//! Per-resource services.
//!
//! Each service borrows the client and exposes one method per endpoint.
//! Endpoints are `const` definitions next to the methods that use them;
//! `ENDPOINTS` registers them all so the catalog can validate every schema
//! up front.

pub mod activist_codes;
pub mod codes;
pub mod events;
pub mod locations;
pub mod people;
pub mod signups;
pub mod supporter_groups;

pub use activist_codes::ActivistCodes;
pub use codes::Codes;
pub use events::{EventTypes, Events};
pub use locations::Locations;
pub use people::People;
pub use signups::Signups;
pub use supporter_groups::SupporterGroups;

use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::object::EaObject;
use crate::resolve::EndpointDef;
use crate::schema::ObjectKind;

pub const API_KEY_PROFILES: EndpointDef =
    EndpointDef::new("client.api_key_profiles", HttpMethod::Get, "apiKeyProfiles").paginated();

static RAW_GET: EndpointDef = EndpointDef::new("client.raw_get", HttpMethod::Get, "{route}").free_form();
static RAW_POST: EndpointDef = EndpointDef::new("client.raw_post", HttpMethod::Post, "{route}").free_form();
static RAW_PUT: EndpointDef = EndpointDef::new("client.raw_put", HttpMethod::Put, "{route}").free_form();
static RAW_PATCH: EndpointDef = EndpointDef::new("client.raw_patch", HttpMethod::Patch, "{route}").free_form();
static RAW_DELETE: EndpointDef = EndpointDef::new("client.raw_delete", HttpMethod::Delete, "{route}").free_form();

/// Free-form endpoint for `method`, whose single path parameter is the whole route.
pub fn raw_endpoint(method: HttpMethod) -> &'static EndpointDef {
    match method {
        HttpMethod::Get => &RAW_GET,
        HttpMethod::Post => &RAW_POST,
        HttpMethod::Put => &RAW_PUT,
        HttpMethod::Patch => &RAW_PATCH,
        HttpMethod::Delete => &RAW_DELETE,
    }
}

/// Every endpoint the client knows.
pub(crate) static ENDPOINTS: &[&EndpointDef] = &[
    &API_KEY_PROFILES,
    &RAW_GET,
    &RAW_POST,
    &RAW_PUT,
    &RAW_PATCH,
    &RAW_DELETE,
    &activist_codes::GET,
    &activist_codes::LIST,
    &codes::CREATE,
    &codes::CREATE_EACH,
    &codes::DELETE,
    &codes::DELETE_EACH,
    &codes::GET,
    &codes::LIST,
    &codes::UPDATE,
    &events::ADD_SHIFT,
    &events::CREATE,
    &events::DELETE,
    &events::GET,
    &events::LIST,
    &events::PATCH,
    &events::UPDATE,
    &events::TYPE_GET,
    &events::TYPE_LIST,
    &locations::CREATE,
    &locations::DELETE,
    &locations::FIND_OR_CREATE,
    &locations::GET,
    &locations::LIST,
    &people::ACTIVIST_CODES,
    &people::ADD_CANVASS_RESPONSES,
    &people::ADD_CODE,
    &people::ADD_NOTES,
    &people::FIND,
    &people::FIND_OR_CREATE,
    &people::GET,
    &people::GET_BY_ID_TYPE,
    &people::LIST,
    &people::NOTES,
    &people::REMOVE_CODE,
    &people::SET_DISCLOSURE_FIELD_VALUES,
    &people::UPDATE,
    &people::UPDATE_NOTE,
    &signups::CREATE,
    &signups::DELETE,
    &signups::GET,
    &signups::LIST,
    &signups::STATUSES,
    &signups::UPDATE,
    &supporter_groups::ADD_PERSON,
    &supporter_groups::CREATE,
    &supporter_groups::DELETE,
    &supporter_groups::GET,
    &supporter_groups::LIST,
    &supporter_groups::REMOVE_PERSON,
];

/// The single object a call must return.
fn one(kind: ObjectKind, json: Option<serde_json::Value>, endpoint: &EndpointDef) -> Result<EaObject, ApiError> {
    match json {
        Some(json) => EaObject::from_json(kind, json),
        None => Err(ApiError::Deserialization(format!(
            "{}: expected a {kind} in the response, got an empty body",
            endpoint.id
        ))),
    }
}

fn optional(kind: ObjectKind, json: Option<serde_json::Value>) -> Result<Option<EaObject>, ApiError> {
    json.map(|json| EaObject::from_json(kind, json)).transpose()
}

fn many(kind: ObjectKind, items: Vec<serde_json::Value>) -> Result<Vec<EaObject>, ApiError> {
    items.into_iter().map(|item| EaObject::from_json(kind, item)).collect()
}

/// Id of a newly created record; the API answers with either the bare id or the record.
fn created_id(kind: ObjectKind, json: Option<serde_json::Value>, endpoint: &EndpointDef) -> Result<i64, ApiError> {
    let object = one(kind, json, endpoint)?;
    object
        .id()
        .ok_or_else(|| ApiError::Deserialization(format!("{}: response carries no {kind} id", endpoint.id)))
}

fn path(values: &[i64]) -> Vec<String> {
    values.iter().map(i64::to_string).collect()
}
