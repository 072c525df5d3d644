//! People: the central EveryAction records.

use serde_json::json;

use super::{many, one, optional, path, ActivistCodes};
use crate::args::Args;
use crate::client::EaClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, Transport};
use crate::object::EaObject;
use crate::resolve::EndpointDef;
use crate::schema::ObjectKind;
use crate::value::Primary;

pub const GET: EndpointDef = EndpointDef::new("people.get", HttpMethod::Get, "people/{vanId}").query(&["$expand"]);
pub const GET_BY_ID_TYPE: EndpointDef =
    EndpointDef::new("people.get_by_id_type", HttpMethod::Get, "people/{personIdType}:{personId}").query(&["$expand"]);
pub const LIST: EndpointDef = EndpointDef::new("people.list", HttpMethod::Get, "people")
    .query(&[
        "city",
        "commonName",
        "contactMode",
        "email",
        "firstName",
        "lastName",
        "middleName",
        "officialName",
        "phoneNumber",
        "stateOrProvince",
        "streetAddress",
        "zipOrPostalCode",
        "$expand",
        "$orderby",
    ])
    .paginated();
pub const FIND: EndpointDef = EndpointDef::new("people.find", HttpMethod::Post, "people/find")
    .body(ObjectKind::Person)
    .none_if_404();
pub const FIND_OR_CREATE: EndpointDef =
    EndpointDef::new("people.find_or_create", HttpMethod::Post, "people/findOrCreate").body(ObjectKind::Person);
pub const UPDATE: EndpointDef = EndpointDef::new("people.update", HttpMethod::Post, "people/{vanId}")
    .body(ObjectKind::Person)
    .none_if_404();
pub const ADD_NOTES: EndpointDef =
    EndpointDef::new("people.add_notes", HttpMethod::Post, "people/{vanId}/notes").body(ObjectKind::Note);
pub const NOTES: EndpointDef = EndpointDef::new("people.notes", HttpMethod::Get, "people/{vanId}/notes").max_top(50);
pub const UPDATE_NOTE: EndpointDef =
    EndpointDef::new("people.update_note", HttpMethod::Put, "people/{vanId}/notes/{noteId}").body(ObjectKind::Note);
pub const ADD_CODE: EndpointDef =
    EndpointDef::new("people.add_code", HttpMethod::Post, "people/{vanId}/codes").body(ObjectKind::Code);
pub const REMOVE_CODE: EndpointDef =
    EndpointDef::new("people.remove_code", HttpMethod::Delete, "people/{vanId}/codes/{codeId}");
pub const ACTIVIST_CODES: EndpointDef =
    EndpointDef::new("people.activist_codes", HttpMethod::Get, "people/{vanId}/activistCodes").paginated();
pub const SET_DISCLOSURE_FIELD_VALUES: EndpointDef = EndpointDef::new(
    "people.set_disclosure_field_values",
    HttpMethod::Post,
    "people/{vanId}/disclosureFieldValues",
)
.body_params(&["disclosureFieldValues"]);
pub const ADD_CANVASS_RESPONSES: EndpointDef =
    EndpointDef::new("people.add_canvass_responses", HttpMethod::Post, "people/{vanId}/canvassResponses")
        .body(ObjectKind::CanvassResponse);

pub struct People<'a, T> {
    client: &'a EaClient<T>,
}

impl<'a, T: Transport> People<'a, T> {
    pub(crate) fn new(client: &'a EaClient<T>) -> Self {
        Self { client }
    }

    /// Retrieve a person by VAN id. Takes `expand`.
    pub fn get(&self, van_id: i64, args: Args) -> Result<EaObject, ApiError> {
        let json = self.client.call(&GET, &path(&[van_id]), args)?;
        one(ObjectKind::Person, json, &GET)
    }

    /// Retrieve a person by an alternate id such as `DWID`.
    pub fn get_by_id_type(&self, id_type: &str, id: &str, args: Args) -> Result<EaObject, ApiError> {
        let json = self
            .client
            .call(&GET_BY_ID_TYPE, &[id_type.to_string(), id.to_string()], args)?;
        one(ObjectKind::Person, json, &GET_BY_ID_TYPE)
    }

    pub fn list(&self, args: Args) -> Result<Vec<EaObject>, ApiError> {
        many(ObjectKind::Person, self.client.call_list(&LIST, &[], args)?)
    }

    /// Match a person by the given properties; `None` when nobody matches.
    pub fn find(&self, args: Args) -> Result<Option<EaObject>, ApiError> {
        optional(ObjectKind::Person, self.client.call(&FIND, &[], args)?)
    }

    /// Match a person, creating one when nobody matches.
    pub fn find_or_create(&self, args: Args) -> Result<EaObject, ApiError> {
        let json = self.client.call(&FIND_OR_CREATE, &[], args)?;
        one(ObjectKind::Person, json, &FIND_OR_CREATE)
    }

    /// Update a person; `None` when the VAN id does not exist.
    pub fn update(&self, van_id: i64, args: Args) -> Result<Option<EaObject>, ApiError> {
        optional(ObjectKind::Person, self.client.call(&UPDATE, &path(&[van_id]), args)?)
    }

    pub fn add_notes(&self, van_id: i64, args: Args) -> Result<(), ApiError> {
        self.client.call(&ADD_NOTES, &path(&[van_id]), args).map(drop)
    }

    pub fn notes(&self, van_id: i64, args: Args) -> Result<Vec<EaObject>, ApiError> {
        many(ObjectKind::Note, self.client.call_list(&NOTES, &path(&[van_id]), args)?)
    }

    pub fn update_note(&self, van_id: i64, note_id: i64, args: Args) -> Result<(), ApiError> {
        self.client
            .call(&UPDATE_NOTE, &path(&[van_id, note_id]), args)
            .map(drop)
    }

    pub fn add_code(&self, van_id: i64, args: Args) -> Result<(), ApiError> {
        self.client.call(&ADD_CODE, &path(&[van_id]), args).map(drop)
    }

    pub fn remove_code(&self, van_id: i64, code_id: i64) -> Result<(), ApiError> {
        self.client
            .call(&REMOVE_CODE, &path(&[van_id, code_id]), Args::new())
            .map(drop)
    }

    /// Activist codes applied to a person.
    pub fn activist_codes(&self, van_id: i64, args: Args) -> Result<Vec<EaObject>, ApiError> {
        let items = self.client.call_list(&ACTIVIST_CODES, &path(&[van_id]), args)?;
        many(ObjectKind::ActivistCodeData, items)
    }

    pub fn set_disclosure_field_values(&self, van_id: i64, args: Args) -> Result<(), ApiError> {
        self.client
            .call(&SET_DISCLOSURE_FIELD_VALUES, &path(&[van_id]), args)
            .map(drop)
    }

    pub fn add_canvass_responses(&self, van_id: i64, args: Args) -> Result<(), ApiError> {
        self.client
            .call(&ADD_CANVASS_RESPONSES, &path(&[van_id]), args)
            .map(drop)
    }

    /// Apply an activist code, given by id or by name, without contact history.
    pub fn apply_activist_code(&self, van_id: i64, activist_code: impl Into<Primary>) -> Result<(), ApiError> {
        self.update_activist_code(van_id, activist_code.into(), "Apply")
    }

    pub fn remove_activist_code(&self, van_id: i64, activist_code: impl Into<Primary>) -> Result<(), ApiError> {
        self.update_activist_code(van_id, activist_code.into(), "Remove")
    }

    fn update_activist_code(&self, van_id: i64, activist_code: Primary, action: &str) -> Result<(), ApiError> {
        let activist_code_id = match activist_code {
            Primary::Id(id) => id,
            Primary::Name(name) => {
                let found = ActivistCodes::new(self.client).find(&name)?;
                found.id().ok_or(ApiError::FindFailed {
                    kind: "ActivistCode",
                    name,
                    reason: "matching record has no id".into(),
                })?
            }
        };
        let args = Args::new()
            .arg("context", json!({"omitActivistCodeContactHistory": true}))
            .arg(
                "response",
                json!({"type": "ActivistCode", "activistCodeId": activist_code_id, "action": action}),
            );
        self.add_canvass_responses(van_id, args)
    }
}
