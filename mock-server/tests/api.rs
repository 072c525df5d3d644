use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, PAGE_CAP, SEEDED_ACTIVIST_CODES};
use serde_json::{json, Value};
use tower::ServiceExt;

const AUTH: &str = "Basic YXBwOmtleXwx";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::AUTHORIZATION, AUTH)
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, AUTH)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn bare(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, AUTH)
        .body(String::new())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_credentials_return_401_with_errors() {
    let resp = app()
        .oneshot(Request::builder().uri("/v4/apiKeyProfiles").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["errors"][0]["code"], "UNAUTHORIZED");
}

// --- paging ---

#[tokio::test]
async fn activist_codes_first_page_is_capped() {
    let resp = app().oneshot(get("/v4/activistCodes?$top=200")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["items"].as_array().unwrap().len(), PAGE_CAP);
    assert_eq!(body["count"], SEEDED_ACTIVIST_CODES);
    assert!(body["nextPageLink"].is_string());
}

#[tokio::test]
async fn last_page_has_no_next_link() {
    let resp = app()
        .oneshot(get("/v4/activistCodes?$top=10&$skip=20"))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["items"].as_array().unwrap().len(), SEEDED_ACTIVIST_CODES - 20);
    assert!(body["nextPageLink"].is_null());
}

#[tokio::test]
async fn activist_codes_filter_by_name() {
    let resp = app().oneshot(get("/v4/activistCodes?name=Donor")).await.unwrap();

    let body = body_json(resp).await;
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["activistCodeId"], 2);
}

// --- people ---

#[tokio::test]
async fn find_without_match_returns_404() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/v4/people/find",
            json!({"firstName": "Nobody", "lastName": "Here"}),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["errors"][0]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn find_or_create_requires_a_name_or_email() {
    let resp = app()
        .oneshot(json_request("POST", "/v4/people/findOrCreate", json!({"lastName": "Only"})))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_unknown_person_returns_404() {
    let resp = app().oneshot(get("/v4/people/1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn event_without_name_is_rejected() {
    let resp = app()
        .oneshot(json_request("POST", "/v4/events", json!({"description": "x"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn removing_member_of_unknown_group_returns_404() {
    let resp = app()
        .oneshot(bare("DELETE", "/v4/supporterGroups/99/people/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full lifecycle ---

#[tokio::test]
async fn person_and_group_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // create a person
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/v4/people/findOrCreate",
            json!({"firstName": "Ada", "lastName": "Lovelace"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let van_id = body_json(resp).await["vanId"].as_i64().unwrap();

    // same person again is a match
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/v4/people/findOrCreate",
            json!({"firstName": "Ada", "lastName": "Lovelace"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["vanId"], van_id);
    assert_eq!(body["status"], "Matched");

    // apply an activist code
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            &format!("/v4/people/{van_id}/canvassResponses"),
            json!({"responses": [{"type": "ActivistCode", "activistCodeId": 3, "action": "Apply"}]}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/v4/people/{van_id}/activistCodes")))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["items"][0]["activistCodeName"], "Member");

    // create a group and add the person
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/v4/supporterGroups", json!({"name": "Board"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let group_id = body_json(resp).await["id"].as_i64().unwrap();

    let member = format!("/v4/supporterGroups/{group_id}/people/{van_id}");
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(bare("PUT", &member))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(bare("DELETE", &member))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // removing twice is a 404
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(bare("DELETE", &member))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // delete the group
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(bare("DELETE", &format!("/v4/supporterGroups/{group_id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get(&format!("/v4/supporterGroups/{group_id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
