//! Endpoint definitions and argument resolution.
//!
//! # Design
//! Every endpoint is a `const EndpointDef`: method, path template, the object
//! type its body carries, and the extra body and query parameters it takes.
//! Building an `EndpointDef` yields an `EndpointSchema` whose alias table
//! spans all of those parameters at once, so a conflict between a body
//! property and a query parameter is caught when the catalog is built.
//!
//! Resolution is pure: it renders the path, routes each argument to the
//! query string or the body under its canonical name, and coerces values
//! the same way object construction does. Nothing here performs I/O.

use std::collections::{BTreeMap, HashMap};

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::alias::strip_marker;
use crate::args::Args;
use crate::catalog::Catalog;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::object::assign;
use crate::paginate::{PageRequest, DEFAULT_MAX_TOP};
use crate::schema::{ObjectKind, PropertyDef, Property, PropertySet};
use crate::value::Value;

/// Static description of one API endpoint.
#[derive(Debug, Clone, Copy)]
pub struct EndpointDef {
    /// Stable identifier such as `people.get`, used in errors and logs.
    pub id: &'static str,
    pub method: HttpMethod,
    /// Path relative to the API root; `{name}` marks a path parameter.
    pub path: &'static str,
    /// Object type whose properties the body accepts.
    pub body: Option<ObjectKind>,
    /// Shared properties accepted in the body in addition to `body`'s.
    pub body_params: &'static [&'static str],
    /// Shared properties sent in the query string; a leading `$` is kept.
    pub query_params: &'static [&'static str],
    /// Largest page the server returns, when the endpoint is paginated.
    pub max_top: Option<u32>,
    /// Path parameters also written into the body unless supplied there.
    pub path_to_body: &'static [&'static str],
    /// Unknown arguments go into the body verbatim instead of failing.
    pub free_form: bool,
    /// A 404 answer means "no result" rather than an error.
    pub none_if_404: bool,
}

impl EndpointDef {
    pub const fn new(id: &'static str, method: HttpMethod, path: &'static str) -> Self {
        Self {
            id,
            method,
            path,
            body: None,
            body_params: &[],
            query_params: &[],
            max_top: None,
            path_to_body: &[],
            free_form: false,
            none_if_404: false,
        }
    }

    pub const fn body(mut self, kind: ObjectKind) -> Self {
        self.body = Some(kind);
        self
    }

    pub const fn body_params(mut self, params: &'static [&'static str]) -> Self {
        self.body_params = params;
        self
    }

    pub const fn query(mut self, params: &'static [&'static str]) -> Self {
        self.query_params = params;
        self
    }

    pub const fn paginated(self) -> Self {
        self.max_top(DEFAULT_MAX_TOP)
    }

    pub const fn max_top(mut self, max_top: u32) -> Self {
        self.max_top = Some(max_top);
        self
    }

    pub const fn path_to_body(mut self, names: &'static [&'static str]) -> Self {
        self.path_to_body = names;
        self
    }

    pub const fn free_form(mut self) -> Self {
        self.free_form = true;
        self
    }

    pub const fn none_if_404(mut self) -> Self {
        self.none_if_404 = true;
        self
    }

    pub fn is_paginated(&self) -> bool {
        self.max_top.is_some()
    }
}

/// Names of the `{placeholders}` in a path template, first occurrence order.
/// A placeholder repeated in the template is listed once.
pub fn path_params(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else { break };
        let name = &after[..close];
        if !names.contains(&name) {
            names.push(name);
        }
        rest = &after[close + 1..];
    }
    names
}

/// Characters escaped when a value fills a single path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A built endpoint: its parameters under one alias table.
#[derive(Debug, Clone)]
pub struct EndpointSchema {
    def: EndpointDef,
    params: PropertySet,
    in_query: Vec<bool>,
    path_params: Vec<&'static str>,
}

impl EndpointSchema {
    pub fn build(def: &EndpointDef, catalog: &Catalog) -> Result<Self, ApiError> {
        let invalid = |reason: String| ApiError::InvalidDefinition {
            scope: def.id.to_string(),
            reason,
        };
        let shared = |name: &str| -> Result<&PropertyDef, ApiError> {
            catalog
                .shared(strip_marker(name))
                .ok_or_else(|| invalid(format!("no shared property `{name}`")))
        };

        let path_params = path_params(def.path);
        let mut properties: Vec<Property> = Vec::new();
        let mut in_query = Vec::new();

        if let Some(kind) = def.body {
            properties.extend(catalog.object_type(kind).params().properties().iter().cloned());
        }
        for name in def.body_params {
            properties.push(Property::from_def(shared(name)?));
        }
        for name in def.path_to_body {
            if !path_params.contains(name) {
                return Err(invalid(format!("`{name}` is not a path parameter")));
            }
            if !properties.iter().any(|p| p.name == *name) {
                properties.push(Property::from_def(shared(name)?));
            }
        }
        in_query.resize(properties.len(), false);
        for name in def.query_params {
            properties.push(Property::from_def(shared(name)?).renamed(name));
            in_query.push(true);
        }

        Ok(Self {
            def: *def,
            params: PropertySet::build(properties)?,
            in_query,
            path_params,
        })
    }

    pub fn def(&self) -> &EndpointDef {
        &self.def
    }

    pub fn params(&self) -> &PropertySet {
        &self.params
    }

    pub fn path_params(&self) -> &[&'static str] {
        &self.path_params
    }

    /// Turn call arguments into a `ResolvedCall`.
    ///
    /// `path` holds the path parameter values in template order.
    /// `default_limit` applies when a paginated call gives no `limit`.
    pub fn resolve(&self, path: &[String], args: Args, default_limit: u32) -> Result<ResolvedCall, ApiError> {
        let def = &self.def;
        if path.len() != self.path_params.len() {
            return Err(ApiError::PathArity {
                endpoint: def.id,
                expected: self.path_params.len(),
                got: path.len(),
            });
        }
        let Args {
            mut keywords,
            limit,
            skip,
            data,
        } = args;

        let page = match def.max_top {
            Some(max_top) => Some(PageRequest {
                limit: limit.unwrap_or(default_limit),
                skip: skip.unwrap_or(0),
                max_top,
            }),
            None => {
                let argument = if limit.is_some() {
                    Some("limit")
                } else if skip.is_some() {
                    Some("skip")
                } else {
                    None
                };
                if let Some(argument) = argument {
                    return Err(ApiError::PaginationNotSupported {
                        endpoint: def.id,
                        argument,
                    });
                }
                None
            }
        };

        let path_values: HashMap<&str, &String> = self.path_params.iter().copied().zip(path).collect();
        for name in def.path_to_body {
            let supplied = keywords.iter().any(|(given, value)| {
                !value.is_null() && self.params.lookup(given).is_some_and(|hit| hit.canonical == *name)
            });
            if let Some(value) = path_values.get(name) {
                if !supplied {
                    keywords.push(((*name).to_string(), path_value(value)));
                }
            }
        }

        let mut slots = vec![None; self.params.len()];
        let mut suppliers = vec![None; self.params.len()];
        let mut passthrough = BTreeMap::new();
        assign(&self.params, &mut slots, &mut suppliers, keywords, |name, value| {
            if def.free_form {
                passthrough.insert(name, value);
                Ok(())
            } else {
                Err(ApiError::UnknownParameter {
                    name,
                    scope: def.id.to_string(),
                })
            }
        })?;

        let mut query = BTreeMap::new();
        let mut body = passthrough;
        for (slot, value) in slots.into_iter().enumerate() {
            let Some(value) = value else { continue };
            let name = self.params.property(slot).name.clone();
            if self.in_query[slot] {
                query.insert(name, value);
            } else {
                body.insert(name, value);
            }
        }

        if data.is_some() && !body.is_empty() {
            return Err(ApiError::InvalidValue {
                name: "data".into(),
                expected: "no other body arguments alongside raw data".into(),
            });
        }

        Ok(ResolvedCall {
            method: def.method,
            path: render_path(def.path, &path_values, !def.free_form),
            query,
            body,
            raw_body: data,
            page,
        })
    }
}

fn path_value(raw: &str) -> Value {
    match raw.parse::<i64>() {
        Ok(id) => Value::from(id),
        Err(_) => Value::from(raw),
    }
}

/// Fill the placeholders of `template`. Free-form routes are substituted
/// as given; every other value is escaped to stay within its segment.
fn render_path(template: &str, values: &HashMap<&str, &String>, escape: bool) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            rest = &rest[open..];
            break;
        };
        if let Some(value) = values.get(&after[..close]) {
            if escape {
                out.extend(utf8_percent_encode(value, SEGMENT));
            } else {
                out.push_str(value);
            }
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}

/// Everything needed to issue one call, with every name canonical.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCall {
    pub method: HttpMethod,
    /// Path relative to the API root, placeholders filled in.
    pub path: String,
    pub query: BTreeMap<String, Value>,
    pub body: BTreeMap<String, Value>,
    /// Caller-provided body that replaces the keyword body.
    pub raw_body: Option<serde_json::Value>,
    /// Set for paginated endpoints.
    pub page: Option<PageRequest>,
}

impl ResolvedCall {
    /// Query parameters in wire form.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .iter()
            .map(|(name, value)| (name.clone(), value.to_query_string()))
            .collect()
    }

    /// The JSON body to send, if any.
    pub fn body_json(&self) -> Option<serde_json::Value> {
        if let Some(raw) = &self.raw_body {
            return Some(raw.clone());
        }
        if self.body.is_empty() {
            return None;
        }
        let map = self
            .body
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        Some(serde_json::Value::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::object::EaObject;
    use serde_json::json;

    const GET_PERSON: EndpointDef = EndpointDef::new("test.get", HttpMethod::Get, "people/{vanId}").query(&["$expand"]);
    const FIND_PERSON: EndpointDef = EndpointDef::new("test.find", HttpMethod::Post, "people/find").body(ObjectKind::Person);
    const PATCH_EVENT: EndpointDef = EndpointDef::new("test.patch", HttpMethod::Patch, "events/{eventId}")
        .query(&["recurrenceType"])
        .body_params(&["isActive"])
        .path_to_body(&["eventId"]);
    const LIST_PEOPLE: EndpointDef = EndpointDef::new("test.list", HttpMethod::Get, "people")
        .query(&["firstName", "lastName", "$expand"])
        .paginated();
    const RAW: EndpointDef = EndpointDef::new("test.raw", HttpMethod::Post, "{route}").free_form();

    fn schema(def: &EndpointDef) -> EndpointSchema {
        EndpointSchema::build(def, catalog::catalog().unwrap()).unwrap()
    }

    const BY_ID_TYPE: EndpointDef = EndpointDef::new("test.by_id_type", HttpMethod::Get, "people/{personIdType}:{personId}");
    const REPEATED: EndpointDef = EndpointDef::new("test.repeated", HttpMethod::Get, "people/{personId}/links/{personId}");

    #[test]
    fn path_params_are_listed_in_order() {
        assert_eq!(path_params("people/{personIdType}:{personId}"), vec!["personIdType", "personId"]);
        assert_eq!(path_params("people"), Vec::<&str>::new());
    }

    #[test]
    fn repeated_placeholder_is_listed_once() {
        assert_eq!(path_params("a/{x}/b/{y}/c/{x}"), vec!["x", "y"]);

        let call = schema(&REPEATED).resolve(&["5".into()], Args::new(), 50).unwrap();
        assert_eq!(call.path, "people/5/links/5");
    }

    #[test]
    fn path_values_stay_within_their_segment() {
        let call = schema(&BY_ID_TYPE)
            .resolve(&["DWID".into(), "a/b?c#d e".into()], Args::new(), 50)
            .unwrap();
        assert_eq!(call.path, "people/DWID:a%2Fb%3Fc%23d%20e");
    }

    #[test]
    fn free_form_route_is_not_escaped() {
        let call = schema(&RAW)
            .resolve(&["supporterGroups/4".into()], Args::new(), 50)
            .unwrap();
        assert_eq!(call.path, "supporterGroups/4");
    }

    #[test]
    fn path_is_rendered_and_arity_checked() {
        let s = schema(&GET_PERSON);
        let call = s.resolve(&["12".into()], Args::new(), 50).unwrap();
        assert_eq!(call.path, "people/12");

        let err = s.resolve(&[], Args::new(), 50).unwrap_err();
        assert_eq!(
            err,
            ApiError::PathArity {
                endpoint: "test.get",
                expected: 1,
                got: 0
            }
        );
    }

    #[test]
    fn expand_is_query_and_joined() {
        let call = schema(&GET_PERSON)
            .resolve(&["1".into()], Args::new().arg("expand", vec!["phones", "emails"]), 50)
            .unwrap();
        assert_eq!(call.query_pairs(), vec![("$expand".to_string(), "phones,emails".to_string())]);
        assert!(call.body_json().is_none());
    }

    #[test]
    fn body_arguments_use_canonical_names() {
        let call = schema(&FIND_PERSON)
            .resolve(&[], Args::new().arg("first", "Ada").arg("email", "ada@example.com"), 50)
            .unwrap();
        assert_eq!(
            call.body_json().unwrap(),
            json!({"firstName": "Ada", "emails": [{"email": "ada@example.com"}]})
        );
        assert!(call.page.is_none());
    }

    #[test]
    fn aliased_and_canonical_arguments_resolve_identically() {
        let s = schema(&FIND_PERSON);
        let aliased = s
            .resolve(&[], Args::new().arg("first", "Ada").arg("last_name", "Lovelace").arg("phone", "555"), 50)
            .unwrap();
        let canonical = s
            .resolve(
                &[],
                Args::new()
                    .arg("firstName", "Ada")
                    .arg("lastName", "Lovelace")
                    .arg("phones", json!([{"phoneNumber": "555"}])),
                50,
            )
            .unwrap();
        assert_eq!(aliased, canonical);
    }

    #[test]
    fn unknown_argument_is_rejected() {
        let err = schema(&FIND_PERSON).resolve(&[], Args::new().arg("shoe_size", 9), 50).unwrap_err();
        assert!(matches!(err, ApiError::UnknownParameter { ref scope, .. } if scope == "test.find"));
    }

    #[test]
    fn free_form_passes_unknown_arguments_through() {
        let call = schema(&RAW)
            .resolve(&["people/1/whatever".into()], Args::new().arg("anything", json!({"a": 1})), 50)
            .unwrap();
        assert_eq!(call.path, "people/1/whatever");
        assert_eq!(call.body_json().unwrap(), json!({"anything": {"a": 1}}));
    }

    #[test]
    fn path_value_is_copied_into_body_when_absent() {
        let s = schema(&PATCH_EVENT);
        let call = s
            .resolve(&["44".into()], Args::new().arg("active", false).arg("recurrence", "Single"), 50)
            .unwrap();
        assert_eq!(call.body_json().unwrap(), json!({"eventId": 44, "isActive": false}));
        assert_eq!(call.query_pairs(), vec![("recurrenceType".to_string(), "Single".to_string())]);

        let call = s.resolve(&["44".into()], Args::new().arg("event", 45), 50).unwrap();
        assert_eq!(call.body_json().unwrap(), json!({"eventId": 45}));
    }

    #[test]
    fn pagination_arguments_need_a_paginated_endpoint() {
        let err = schema(&FIND_PERSON).resolve(&[], Args::new().limit(5), 50).unwrap_err();
        assert_eq!(
            err,
            ApiError::PaginationNotSupported {
                endpoint: "test.find",
                argument: "limit"
            }
        );

        let call = schema(&LIST_PEOPLE).resolve(&[], Args::new().skip(10), 25).unwrap();
        assert_eq!(
            call.page,
            Some(PageRequest {
                limit: 25,
                skip: 10,
                max_top: DEFAULT_MAX_TOP
            })
        );
    }

    #[test]
    fn nested_object_arguments_are_coerced() {
        let person = EaObject::from_primary(ObjectKind::Person, 3).unwrap();
        let call = schema(&FIND_PERSON)
            .resolve(&[], Args::new().arg("addresses", vec![json!({"line1": "1 Main St"})]).arg("id", 3), 50)
            .unwrap();
        assert_eq!(call.body.get("vanId"), person.get("vanId").unwrap());
        assert_eq!(call.body_json().unwrap()["addresses"], json!([{"addressLine1": "1 Main St"}]));
    }

    #[test]
    fn raw_data_cannot_be_mixed_with_body_arguments() {
        let s = schema(&FIND_PERSON);
        let call = s.resolve(&[], Args::new().data(json!({"vanId": 1})), 50).unwrap();
        assert_eq!(call.body_json().unwrap(), json!({"vanId": 1}));
        assert!(s.resolve(&[], Args::new().data(json!({})).arg("first", "A"), 50).is_err());
    }
}
