//! Activist codes, with lookups by name.

use std::collections::BTreeMap;

use super::{many, one, path};
use crate::args::Args;
use crate::client::EaClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, Transport};
use crate::object::EaObject;
use crate::resolve::EndpointDef;
use crate::schema::ObjectKind;

pub const GET: EndpointDef =
    EndpointDef::new("activist_codes.get", HttpMethod::Get, "activistCodes/{activistCodeId}");
pub const LIST: EndpointDef = EndpointDef::new("activist_codes.list", HttpMethod::Get, "activistCodes")
    .query(&["name", "statuses", "type"])
    .paginated();

pub struct ActivistCodes<'a, T> {
    client: &'a EaClient<T>,
}

impl<'a, T: Transport> ActivistCodes<'a, T> {
    pub(crate) fn new(client: &'a EaClient<T>) -> Self {
        Self { client }
    }

    pub fn get(&self, activist_code_id: i64) -> Result<EaObject, ApiError> {
        let json = self.client.call(&GET, &path(&[activist_code_id]), Args::new())?;
        one(ObjectKind::ActivistCode, json, &GET)
    }

    pub fn list(&self, args: Args) -> Result<Vec<EaObject>, ApiError> {
        many(ObjectKind::ActivistCode, self.client.call_list(&LIST, &[], args)?)
    }

    /// The one activist code whose name matches `name`, ignoring case.
    pub fn find(&self, name: &str) -> Result<EaObject, ApiError> {
        let all = self.list(Args::new().limit(0))?;
        pick(&all, name)
    }

    /// Look up several names with a single listing.
    pub fn find_each<I, S>(&self, names: I) -> Result<BTreeMap<String, EaObject>, ApiError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let all = self.list(Args::new().limit(0))?;
        names
            .into_iter()
            .map(|name| {
                let name = name.as_ref();
                pick(&all, name).map(|code| (name.to_string(), code))
            })
            .collect()
    }
}

fn pick(all: &[EaObject], name: &str) -> Result<EaObject, ApiError> {
    let wanted = name.to_lowercase();
    let mut matches = all
        .iter()
        .filter(|code| code.name().is_some_and(|n| n.to_lowercase() == wanted));
    let failed = |reason: String| ApiError::FindFailed {
        kind: "ActivistCode",
        name: name.to_string(),
        reason,
    };
    match (matches.next(), matches.next()) {
        (Some(code), None) => Ok(code.clone()),
        (None, _) => Err(failed("no activist code has that name".into())),
        (Some(_), Some(_)) => Err(failed(format!("{} activist codes have that name", 2 + matches.count()))),
    }
}
