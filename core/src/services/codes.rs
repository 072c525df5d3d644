//! Codes: tags and source codes attached to people and events.

use serde_json::json;

use super::{created_id, many, one, path};
use crate::args::Args;
use crate::client::EaClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, Transport};
use crate::object::EaObject;
use crate::resolve::EndpointDef;
use crate::schema::ObjectKind;

pub const CREATE: EndpointDef = EndpointDef::new("codes.create", HttpMethod::Post, "codes").body(ObjectKind::Code);
pub const CREATE_EACH: EndpointDef =
    EndpointDef::new("codes.create_each", HttpMethod::Post, "codes/batch").body_params(&["codes"]);
pub const DELETE: EndpointDef = EndpointDef::new("codes.delete", HttpMethod::Delete, "codes/{codeId}");
pub const DELETE_EACH: EndpointDef = EndpointDef::new("codes.delete_each", HttpMethod::Delete, "codes");
pub const GET: EndpointDef = EndpointDef::new("codes.get", HttpMethod::Get, "codes/{codeId}");
pub const LIST: EndpointDef = EndpointDef::new("codes.list", HttpMethod::Get, "codes")
    .query(&["name", "parentCodeId", "codeType", "$orderby"])
    .paginated();
pub const UPDATE: EndpointDef = EndpointDef::new("codes.update", HttpMethod::Put, "codes/{codeId}")
    .body(ObjectKind::Code)
    .path_to_body(&["codeId"]);

pub struct Codes<'a, T> {
    client: &'a EaClient<T>,
}

impl<'a, T: Transport> Codes<'a, T> {
    pub(crate) fn new(client: &'a EaClient<T>) -> Self {
        Self { client }
    }

    /// Create a code and return its id.
    pub fn create(&self, args: Args) -> Result<i64, ApiError> {
        let json = self.client.call(&CREATE, &[], args)?;
        created_id(ObjectKind::Code, json, &CREATE)
    }

    /// Create several codes in one request; takes `codes` (or `code`).
    pub fn create_each(&self, args: Args) -> Result<Vec<EaObject>, ApiError> {
        many(ObjectKind::CodeResult, self.client.call_list(&CREATE_EACH, &[], args)?)
    }

    pub fn delete(&self, code_id: i64) -> Result<(), ApiError> {
        self.client.call(&DELETE, &path(&[code_id]), Args::new()).map(drop)
    }

    /// Delete several codes in one request.
    pub fn delete_each(&self, code_ids: &[i64]) -> Result<Vec<EaObject>, ApiError> {
        let items = self
            .client
            .call_list(&DELETE_EACH, &[], Args::new().data(json!(code_ids)))?;
        many(ObjectKind::CodeResult, items)
    }

    pub fn get(&self, code_id: i64) -> Result<EaObject, ApiError> {
        let json = self.client.call(&GET, &path(&[code_id]), Args::new())?;
        one(ObjectKind::Code, json, &GET)
    }

    pub fn list(&self, args: Args) -> Result<Vec<EaObject>, ApiError> {
        many(ObjectKind::Code, self.client.call_list(&LIST, &[], args)?)
    }

    pub fn update(&self, code_id: i64, args: Args) -> Result<(), ApiError> {
        self.client.call(&UPDATE, &path(&[code_id]), args).map(drop)
    }
}
