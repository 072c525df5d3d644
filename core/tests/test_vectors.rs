//! Check resolution, request building, response parsing and pagination
//! against the JSON vectors in `test-vectors/`.
//!
//! Bodies are compared as parsed JSON so key order never matters.

use std::cell::RefCell;

use everyaction_core::{
    catalog, paginate, ApiError, Args, ClientConfig, EaClient, EaObject, HttpMethod, HttpResponse, ObjectKind, Page,
    PageRequest, TransportError, Value,
};
use serde_json::json;

const BASE_URL: &str = "http://localhost:3000/v4";

fn client() -> EaClient {
    EaClient::new(&ClientConfig::new("app", "key|1").with_endpoint(BASE_URL)).unwrap()
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_kind(s: &str) -> ObjectKind {
    *ObjectKind::ALL
        .iter()
        .find(|kind| kind.as_str() == s)
        .unwrap_or_else(|| panic!("unknown kind: {s}"))
}

fn pairs(json: &serde_json::Value) -> Vec<(String, String)> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let pair = pair.as_array().unwrap();
            (pair[0].as_str().unwrap().to_string(), pair[1].as_str().unwrap().to_string())
        })
        .collect()
}

fn error_kind(err: &ApiError) -> &'static str {
    match err {
        ApiError::Construction { .. } => "Construction",
        ApiError::AmbiguousArgument { .. } => "AmbiguousArgument",
        ApiError::AmbiguousAccess { .. } => "AmbiguousAccess",
        ApiError::UnknownParameter { .. } => "UnknownParameter",
        ApiError::InvalidValue { .. } => "InvalidValue",
        ApiError::AliasConflict { .. } => "AliasConflict",
        ApiError::InvalidDefinition { .. } => "InvalidDefinition",
        ApiError::PathArity { .. } => "PathArity",
        ApiError::PaginationNotSupported { .. } => "PaginationNotSupported",
        ApiError::FindFailed { .. } => "FindFailed",
        ApiError::Config(_) => "Config",
        ApiError::Serialization(_) => "Serialization",
        ApiError::Deserialization(_) => "Deserialization",
        ApiError::Transport(TransportError::Network(_)) => "Network",
        ApiError::Transport(TransportError::Http { .. }) => "Http",
        ApiError::Transport(TransportError::MalformedBody(_)) => "MalformedBody",
    }
}

// ---------------------------------------------------------------------------
// Resolution and request building
// ---------------------------------------------------------------------------

#[test]
fn resolve_test_vectors() {
    let raw = include_str!("../../test-vectors/resolve.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    assert_eq!(vectors["base_url"], BASE_URL);

    let c = client();
    let catalog = catalog::catalog().unwrap();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let endpoint = catalog
            .endpoint(case["endpoint"].as_str().unwrap())
            .unwrap_or_else(|| panic!("{name}: unknown endpoint"));
        let path: Vec<String> = case["path"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect();

        let mut args: Args = case["args"]
            .as_array()
            .unwrap()
            .iter()
            .map(|pair| (pair[0].as_str().unwrap().to_string(), Value::from(pair[1].clone())))
            .collect();
        if let Some(limit) = case["limit"].as_u64() {
            args = args.limit(limit as u32);
        }
        if let Some(skip) = case["skip"].as_u64() {
            args = args.skip(skip as u32);
        }

        let resolved = c.resolve(endpoint.def(), &path, args);
        if let Some(expected) = case["expected_error"].as_str() {
            let err = resolved.expect_err(name);
            assert_eq!(error_kind(&err), expected, "{name}: {err}");
            continue;
        }
        let call = resolved.unwrap_or_else(|e| panic!("{name}: {e}"));
        let page = case["page"]
            .as_array()
            .map(|p| (p[0].as_u64().unwrap() as u32, p[1].as_u64().unwrap() as u32));
        assert_eq!(page.is_some(), call.page.is_some(), "{name}: paginated");

        let req = c.build_request(&call, page).unwrap();
        let expected = &case["expected_request"];
        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.path, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");
        assert_eq!(req.query, pairs(&expected["query"]), "{name}: query");
        assert_eq!(req.headers, pairs(&expected["headers"]), "{name}: headers");

        let body: serde_json::Value = match req.body.as_deref() {
            Some(body) => serde_json::from_str(body).unwrap(),
            None => serde_json::Value::Null,
        };
        assert_eq!(body, expected["body"], "{name}: body");
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let kind = parse_kind(case["kind"].as_str().unwrap());
        let status = case["status"].as_u64().unwrap() as u16;
        let none_if_404 = case["none_if_404"].as_bool().unwrap_or(false);
        let response = HttpResponse::new(status, case["body"].as_str().unwrap());

        let parsed = c.parse_response(response, none_if_404);

        if let Some(expected_status) = case["expected_status"].as_u64() {
            let err = parsed.expect_err(name);
            let ApiError::Transport(TransportError::Http { status, errors, .. }) = &err else {
                panic!("{name}: expected an HTTP error, got {err:?}");
            };
            assert_eq!(u64::from(*status), expected_status, "{name}: status");
            let codes: Vec<&str> = errors.iter().filter_map(|e| e.code.as_deref()).collect();
            let expected_codes: Vec<&str> = case["expected_codes"]
                .as_array()
                .unwrap()
                .iter()
                .map(|c| c.as_str().unwrap())
                .collect();
            assert_eq!(codes, expected_codes, "{name}: codes");
            continue;
        }
        if let Some(expected) = case["expected_error"].as_str() {
            let err = parsed.expect_err(name);
            assert_eq!(error_kind(&err), expected, "{name}");
            continue;
        }

        let json = parsed.unwrap_or_else(|e| panic!("{name}: {e}"));
        let expected = &case["expected"];
        if expected.is_null() {
            assert!(json.is_none(), "{name}: expected nothing, got {json:?}");
            continue;
        }
        let object = EaObject::from_json(kind, json.unwrap()).unwrap();
        assert_eq!(object.to_json(), expected["object"], "{name}: object");
        assert_eq!(object.id(), expected["id"].as_i64(), "{name}: id");
        let extras: Vec<&str> = object.extras().keys().map(String::as_str).collect();
        let expected_extras: Vec<&str> = expected["extras"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e.as_str().unwrap())
            .collect();
        assert_eq!(extras, expected_extras, "{name}: extras");
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[test]
fn pagination_test_vectors() {
    let raw = include_str!("../../test-vectors/pagination.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let number = |key: &str| case[key].as_u64().unwrap() as u32;
        let request = PageRequest {
            limit: number("limit"),
            skip: number("skip"),
            max_top: number("max_top"),
        };
        let pages = case["pages"].as_array().unwrap();
        let calls = RefCell::new(Vec::new());

        let items = paginate(request, |top, skip| {
            let served = &pages[calls.borrow().len()];
            calls.borrow_mut().push(json!([top, skip]));
            let count = served["items"].as_u64().unwrap();
            Ok(Page {
                items: (1..=count).map(|i| json!(u64::from(skip) + i)).collect(),
                next_page_link: served["next"].as_bool().unwrap().then(|| "next".to_string()),
                count: None,
            })
        })
        .unwrap();

        assert_eq!(serde_json::Value::Array(calls.into_inner()), case["expected_calls"], "{name}: calls");
        let expected_items = case["expected_items"].as_u64().unwrap();
        assert_eq!(items.len() as u64, expected_items, "{name}: item count");
        let first = u64::from(request.skip) + 1;
        let numbered: Vec<u64> = items.iter().map(|i| i.as_u64().unwrap()).collect();
        assert_eq!(numbered, (first..first + expected_items).collect::<Vec<_>>(), "{name}: order");
    }
}
