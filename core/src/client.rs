//! The EveryAction client: request building, response parsing and dispatch.
//!
//! # Design
//! `EaClient` keeps the split between building an `HttpRequest` and parsing
//! an `HttpResponse`, and adds `call`, which resolves arguments against an
//! endpoint schema, drives the `Transport` and pages through list results.
//! Configuration is fixed at construction except for the default page limit.
//! A client is meant for one thread at a time; pagination requests are
//! issued strictly in sequence.

use tracing::debug;

use crate::args::Args;
use crate::catalog;
use crate::config::{ClientConfig, Credentials};
use crate::error::{ApiError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::object::EaObject;
use crate::paginate::{paginate, Page, PageRequest};
use crate::resolve::{EndpointDef, EndpointSchema, ResolvedCall};
use crate::schema::ObjectKind;
use crate::services::{
    self, ActivistCodes, Codes, EventTypes, Events, Locations, People, Signups, SupporterGroups,
};
use crate::transport::UreqTransport;

/// Blocking client for the EveryAction 8 VAN API.
#[derive(Debug, Clone)]
pub struct EaClient<T = UreqTransport> {
    base_url: String,
    credentials: Credentials,
    authorization: String,
    default_limit: u32,
    transport: T,
}

impl EaClient<UreqTransport> {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::with_transport(config, UreqTransport::new())
    }

    /// Client configured from `EVERYACTION_APP_NAME` and `EVERYACTION_API_KEY`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(&ClientConfig::from_env()?)
    }
}

impl<T: Transport> EaClient<T> {
    pub fn with_transport(config: &ClientConfig, transport: T) -> Result<Self, ApiError> {
        let credentials = config.credentials()?;
        let authorization = credentials.authorization();
        Ok(Self {
            base_url: config.base_url()?,
            credentials,
            authorization,
            default_limit: config.default_limit,
            transport,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Items a paginated call returns when it gives no `limit`; 0 means all.
    pub fn default_limit(&self) -> u32 {
        self.default_limit
    }

    pub fn set_default_limit(&mut self, limit: u32) {
        self.default_limit = limit;
    }

    pub fn people(&self) -> People<'_, T> {
        People::new(self)
    }

    pub fn activist_codes(&self) -> ActivistCodes<'_, T> {
        ActivistCodes::new(self)
    }

    pub fn codes(&self) -> Codes<'_, T> {
        Codes::new(self)
    }

    pub fn events(&self) -> Events<'_, T> {
        Events::new(self)
    }

    pub fn event_types(&self) -> EventTypes<'_, T> {
        EventTypes::new(self)
    }

    pub fn locations(&self) -> Locations<'_, T> {
        Locations::new(self)
    }

    pub fn signups(&self) -> Signups<'_, T> {
        Signups::new(self)
    }

    pub fn supporter_groups(&self) -> SupporterGroups<'_, T> {
        SupporterGroups::new(self)
    }

    /// Profile of the API key in use.
    pub fn api_key_profile(&self) -> Result<EaObject, ApiError> {
        let items = self.call_list(&services::API_KEY_PROFILES, &[], Args::new().limit(1))?;
        match items.into_iter().next() {
            Some(profile) => EaObject::from_json(ObjectKind::ApiKeyProfile, profile),
            None => Err(ApiError::Deserialization("no API key profile returned".into())),
        }
    }

    /// Free-form call to any route under the API root.
    ///
    /// Arguments are sent in the body under the names given; no aliases
    /// apply. A GET carries no body, so it takes no arguments.
    pub fn raw(&self, method: HttpMethod, route: &str, args: Args) -> Result<Option<serde_json::Value>, ApiError> {
        if method == HttpMethod::Get && !args.is_empty() {
            return Err(ApiError::InvalidValue {
                name: args.keywords()[0].0.clone(),
                expected: "no arguments on a raw GET; put them in the route".into(),
            });
        }
        let route = route.trim_start_matches('/').to_string();
        self.call(services::raw_endpoint(method), &[route], args)
    }

    /// Resolve `args` against `def` without sending anything.
    pub fn resolve(&self, def: &EndpointDef, path: &[String], args: Args) -> Result<ResolvedCall, ApiError> {
        let catalog = catalog::catalog()?;
        let call = match catalog.endpoint(def.id) {
            Some(schema) => schema.resolve(path, args, self.default_limit)?,
            None => EndpointSchema::build(def, catalog)?.resolve(path, args, self.default_limit)?,
        };
        debug!(endpoint = def.id, method = %call.method, path = %call.path, "resolved call.");
        Ok(call)
    }

    /// Resolve and perform a call. Paginated endpoints return every page's
    /// items as one JSON array.
    pub fn call(&self, def: &EndpointDef, path: &[String], args: Args) -> Result<Option<serde_json::Value>, ApiError> {
        let call = self.resolve(def, path, args)?;
        match call.page {
            Some(page) => self.fetch_pages(&call, page).map(|items| Some(serde_json::Value::Array(items))),
            None => self.send(&call, None, def.none_if_404),
        }
    }

    /// Perform a call whose result is a list, paginated or not.
    pub fn call_list(&self, def: &EndpointDef, path: &[String], args: Args) -> Result<Vec<serde_json::Value>, ApiError> {
        let call = self.resolve(def, path, args)?;
        if let Some(page) = call.page {
            return self.fetch_pages(&call, page);
        }
        match self.send(&call, None, def.none_if_404)? {
            Some(serde_json::Value::Array(items)) => Ok(items),
            Some(other) => Err(ApiError::Deserialization(format!("{}: expected a list, got {other}", def.id))),
            None => Ok(Vec::new()),
        }
    }

    fn send(
        &self,
        call: &ResolvedCall,
        page: Option<(u32, u32)>,
        none_if_404: bool,
    ) -> Result<Option<serde_json::Value>, ApiError> {
        let request = self.build_request(call, page)?;
        let response = self.transport.execute(&request)?;
        self.parse_response(response, none_if_404)
    }

    fn fetch_pages(&self, call: &ResolvedCall, request: PageRequest) -> Result<Vec<serde_json::Value>, ApiError> {
        paginate(request, |top, skip| match self.send(call, Some((top, skip)), false)? {
            Some(json) => serde_json::from_value::<Page>(json).map_err(|e| ApiError::Deserialization(e.to_string())),
            None => Ok(Page::default()),
        })
    }

    /// Build the HTTP request for a resolved call; `page` adds `$top` and `$skip`.
    pub fn build_request(&self, call: &ResolvedCall, page: Option<(u32, u32)>) -> Result<HttpRequest, ApiError> {
        let mut query = call.query_pairs();
        if let Some((top, skip)) = page {
            query.push(("$top".to_string(), top.to_string()));
            query.push(("$skip".to_string(), skip.to_string()));
        }
        let body = call
            .body_json()
            .map(|json| serde_json::to_string(&json))
            .transpose()
            .map_err(|e| ApiError::Serialization(e.to_string()))?;

        let mut headers = vec![
            ("authorization".to_string(), self.authorization.clone()),
            ("accept".to_string(), "application/json".to_string()),
        ];
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        Ok(HttpRequest {
            method: call.method,
            path: format!("{}/{}", self.base_url, call.path),
            query,
            headers,
            body,
        })
    }

    /// Interpret a response: `None` for an empty body, or for a 404 when
    /// `none_if_404` is set.
    pub fn parse_response(&self, response: HttpResponse, none_if_404: bool) -> Result<Option<serde_json::Value>, ApiError> {
        check_status(&response, none_if_404)?;
        if response.status == 404 || response.body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&response.body)
            .map(Some)
            .map_err(|e| TransportError::MalformedBody(e.to_string()).into())
    }
}

/// Map non-success status codes to `TransportError::Http`.
fn check_status(response: &HttpResponse, none_if_404: bool) -> Result<(), ApiError> {
    if response.is_success() || (none_if_404 && response.status == 404) {
        return Ok(());
    }
    Err(TransportError::from_response(response.status, &response.body).into())
}
