//! Blocking client for the EveryAction 8 VAN API.
//!
//! # Overview
//! Maps documented endpoints to methods on per-resource services, accepts
//! short snake_case aliases for the API's camelCase property names, and
//! pages through list endpoints automatically.
//!
//! ```no_run
//! use everyaction_core::{Args, ClientConfig, EaClient};
//!
//! # fn main() -> Result<(), everyaction_core::ApiError> {
//! let client = EaClient::new(&ClientConfig::new("my-app", "api-key|1"))?;
//! let person = client.people().find(Args::new().arg("first", "Ada").arg("last", "Lovelace"))?;
//! let groups = client.supporter_groups().list(Args::new().limit(0))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - The catalog of object types and endpoint schemas is static data,
//!   validated once on first use; alias conflicts fail the whole catalog.
//! - `EaObject` stores one slot per declared property. Aliases are views of
//!   a slot, never copies, and undeclared response keys are kept verbatim.
//! - Argument resolution is pure and produces a `ResolvedCall`. Building an
//!   `HttpRequest` from it and parsing the `HttpResponse` are separate steps
//!   around a `Transport`, so everything above the network is deterministic.

pub mod alias;
pub mod args;
pub mod catalog;
pub mod client;
pub mod config;
pub mod definitions;
pub mod error;
pub mod http;
pub mod object;
pub mod paginate;
pub mod resolve;
pub mod schema;
pub mod services;
pub mod transport;
pub mod value;

pub use alias::{to_snake, AliasTable};
pub use args::Args;
pub use client::EaClient;
pub use config::{ClientConfig, Credentials, DatabaseMode};
pub use error::{ApiError, ErrorDetail, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use object::EaObject;
pub use paginate::{paginate, Page, PageRequest, Paginator};
pub use resolve::{EndpointDef, EndpointSchema, ResolvedCall};
pub use schema::{ObjectKind, ObjectType, ValueKind};
pub use transport::UreqTransport;
pub use value::{Primary, Value};
