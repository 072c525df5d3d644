//! In-memory stand-in for a slice of the EveryAction VAN API.
//!
//! Serves people, activist codes, supporter groups and events under `/v4`,
//! requires Basic credentials on every request, and pages list endpoints
//! with `$top`/`$skip` and `nextPageLink` the way the real service does.
//! Pages are capped at `PAGE_CAP` items regardless of `$top`.

use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

/// Largest page any list endpoint returns.
pub const PAGE_CAP: usize = 10;

/// Names of the activist codes every fresh server starts with.
pub const SEEDED_ACTIVIST_CODES: usize = 25;

#[derive(Debug, Default)]
pub struct Store {
    next_id: i64,
    people: BTreeMap<i64, Map<String, Value>>,
    notes: BTreeMap<i64, Vec<Value>>,
    applied_codes: BTreeMap<i64, BTreeSet<i64>>,
    activist_codes: Vec<Value>,
    supporter_groups: BTreeMap<i64, Value>,
    members: BTreeMap<i64, BTreeSet<i64>>,
    events: BTreeMap<i64, Map<String, Value>>,
}

impl Store {
    /// A store holding `SEEDED_ACTIVIST_CODES` activist codes and nothing else.
    pub fn seeded() -> Self {
        let named = ["Volunteer", "Donor", "Member"];
        let activist_codes = (1..=SEEDED_ACTIVIST_CODES as i64)
            .map(|id| {
                let name = named
                    .get(id as usize - 1)
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| format!("Code {id}"));
                json!({
                    "activistCodeId": id,
                    "name": name,
                    "type": "Activist",
                    "status": "Active",
                    "mediumName": name,
                    "shortName": name.chars().take(3).collect::<String>(),
                })
            })
            .collect();
        Self {
            next_id: 1000,
            activist_codes,
            ..Self::default()
        }
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    let v4 = Router::new()
        .route("/apiKeyProfiles", get(api_key_profiles))
        .route("/people", get(list_people))
        .route("/people/find", post(find_person))
        .route("/people/findOrCreate", post(find_or_create_person))
        .route("/people/{van_id}", get(get_person).post(update_person))
        .route("/people/{van_id}/notes", get(list_notes).post(add_note))
        .route("/people/{van_id}/canvassResponses", post(add_canvass_responses))
        .route("/people/{van_id}/activistCodes", get(person_activist_codes))
        .route("/activistCodes", get(list_activist_codes))
        .route("/activistCodes/{id}", get(get_activist_code))
        .route("/supporterGroups", get(list_groups).post(create_group))
        .route("/supporterGroups/{id}", get(get_group).delete(delete_group))
        .route(
            "/supporterGroups/{id}/people/{van_id}",
            put(add_member).delete(remove_member),
        )
        .route("/events", get(list_events).post(create_event))
        .route("/events/{id}", get(get_event).delete(delete_event))
        .with_state(db);
    Router::new()
        .nest("/v4", v4)
        .layer(middleware::from_fn(require_basic_auth))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type Params = Query<HashMap<String, String>>;

fn error(status: StatusCode, code: &str, text: &str) -> Response {
    let body = json!({"errors": [{"code": code, "text": text}]});
    (status, Json(body)).into_response()
}

fn not_found(what: &str) -> Response {
    error(StatusCode::NOT_FOUND, "NOT_FOUND", &format!("{what} not found"))
}

async fn require_basic_auth(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("Basic "));
    if !authorized {
        debug!(path = %request.uri().path(), "rejected request without credentials");
        return error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Basic credentials are required");
    }
    next.run(request).await
}

/// One page of `items` per the `$top`/`$skip` parameters.
fn page(items: Vec<Value>, params: &HashMap<String, String>, route: &str) -> Json<Value> {
    let number = |key: &str| params.get(key).and_then(|v| v.parse::<usize>().ok());
    let total = items.len();
    let top = number("$top").unwrap_or(PAGE_CAP).min(PAGE_CAP);
    let skip = number("$skip").unwrap_or(0);
    let slice: Vec<Value> = items.into_iter().skip(skip).take(top).collect();
    let end = skip + slice.len();
    let next = (end < total && !slice.is_empty()).then(|| format!("/v4/{route}?$top={top}&$skip={end}"));
    Json(json!({"items": slice, "count": total, "nextPageLink": next}))
}

async fn api_key_profiles(Query(params): Params) -> Json<Value> {
    let profile = json!({
        "databaseName": "MyCampaign",
        "hasMyVoters": false,
        "hasMyCampaign": true,
        "committeeName": "Test Committee",
        "apiKeyTypeName": "Custom Integration",
        "keyReference": "1234",
        "username": "mock.user",
        "userFirstName": "Mock",
        "userLastName": "User"
    });
    page(vec![profile], &params, "apiKeyProfiles")
}

fn str_field<'a>(person: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    person.get(key).and_then(Value::as_str)
}

fn first_email(person: &Map<String, Value>) -> Option<&str> {
    person
        .get("emails")
        .and_then(Value::as_array)
        .and_then(|emails| emails.first())
        .and_then(|email| email.get("email"))
        .and_then(Value::as_str)
}

/// Match on email when one is given, otherwise on first and last name.
fn matches(candidate: &Map<String, Value>, wanted: &Map<String, Value>) -> bool {
    if let Some(email) = first_email(wanted) {
        return first_email(candidate) == Some(email);
    }
    let first = str_field(wanted, "firstName");
    let last = str_field(wanted, "lastName");
    first.is_some() && last.is_some() && str_field(candidate, "firstName") == first && str_field(candidate, "lastName") == last
}

async fn list_people(State(db): State<Db>, Query(params): Params) -> Json<Value> {
    let store = db.read().await;
    let items = store
        .people
        .values()
        .filter(|person| {
            ["firstName", "lastName"]
                .iter()
                .all(|key| params.get(*key).map_or(true, |wanted| str_field(person, key) == Some(wanted.as_str())))
        })
        .map(|person| Value::Object(person.clone()))
        .collect();
    page(items, &params, "people")
}

async fn find_person(State(db): State<Db>, Json(wanted): Json<Map<String, Value>>) -> Response {
    let store = db.read().await;
    match store.people.values().find(|person| matches(person, &wanted)) {
        Some(person) => Json(Value::Object(person.clone())).into_response(),
        None => not_found("person"),
    }
}

async fn find_or_create_person(State(db): State<Db>, Json(wanted): Json<Map<String, Value>>) -> Response {
    let mut store = db.write().await;
    if let Some((van_id, _)) = store.people.iter().find(|(_, person)| matches(person, &wanted)) {
        return Json(json!({"vanId": van_id, "status": "Matched"})).into_response();
    }
    if str_field(&wanted, "firstName").is_none() && first_email(&wanted).is_none() {
        return error(
            StatusCode::BAD_REQUEST,
            "INVALID_PARAMETER",
            "a first name or an email is required",
        );
    }
    let van_id = store.next_id();
    let mut person = wanted;
    person.insert("vanId".into(), json!(van_id));
    store.people.insert(van_id, person);
    info!(van_id, "stored new person");
    (StatusCode::CREATED, Json(json!({"vanId": van_id, "status": "UnmatchedStored"}))).into_response()
}

async fn get_person(State(db): State<Db>, Path(van_id): Path<i64>) -> Response {
    let store = db.read().await;
    match store.people.get(&van_id) {
        Some(person) => Json(Value::Object(person.clone())).into_response(),
        None => not_found("person"),
    }
}

async fn update_person(
    State(db): State<Db>,
    Path(van_id): Path<i64>,
    Json(changes): Json<Map<String, Value>>,
) -> Response {
    let mut store = db.write().await;
    let Some(person) = store.people.get_mut(&van_id) else {
        return not_found("person");
    };
    for (key, value) in changes {
        if key != "vanId" {
            person.insert(key, value);
        }
    }
    Json(Value::Object(person.clone())).into_response()
}

async fn list_notes(State(db): State<Db>, Path(van_id): Path<i64>, Query(params): Params) -> Response {
    let store = db.read().await;
    if !store.people.contains_key(&van_id) {
        return not_found("person");
    }
    let notes = store.notes.get(&van_id).cloned().unwrap_or_default();
    page(notes, &params, &format!("people/{van_id}/notes")).into_response()
}

async fn add_note(State(db): State<Db>, Path(van_id): Path<i64>, Json(mut note): Json<Map<String, Value>>) -> Response {
    let mut store = db.write().await;
    if !store.people.contains_key(&van_id) {
        return not_found("person");
    }
    if str_field(&note, "text").is_none() {
        return error(StatusCode::BAD_REQUEST, "INVALID_PARAMETER", "'text' is required");
    }
    let note_id = store.next_id();
    note.insert("noteId".into(), json!(note_id));
    store.notes.entry(van_id).or_default().push(Value::Object(note));
    StatusCode::NO_CONTENT.into_response()
}

async fn add_canvass_responses(State(db): State<Db>, Path(van_id): Path<i64>, Json(body): Json<Value>) -> Response {
    let mut store = db.write().await;
    if !store.people.contains_key(&van_id) {
        return not_found("person");
    }
    let responses = body["responses"].as_array().cloned().unwrap_or_default();
    for response in responses {
        if response["type"] != "ActivistCode" {
            continue;
        }
        let Some(code_id) = response["activistCodeId"].as_i64() else {
            return error(StatusCode::BAD_REQUEST, "INVALID_PARAMETER", "'activistCodeId' is required");
        };
        let applied = store.applied_codes.entry(van_id).or_default();
        match response["action"].as_str() {
            Some("Apply") => {
                applied.insert(code_id);
            }
            Some("Remove") => {
                applied.remove(&code_id);
            }
            _ => return error(StatusCode::BAD_REQUEST, "INVALID_PARAMETER", "'action' must be Apply or Remove"),
        }
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn person_activist_codes(State(db): State<Db>, Path(van_id): Path<i64>, Query(params): Params) -> Response {
    let store = db.read().await;
    if !store.people.contains_key(&van_id) {
        return not_found("person");
    }
    let applied = store.applied_codes.get(&van_id).cloned().unwrap_or_default();
    let items = store
        .activist_codes
        .iter()
        .filter(|code| code["activistCodeId"].as_i64().is_some_and(|id| applied.contains(&id)))
        .map(|code| {
            json!({
                "activistCodeId": code["activistCodeId"],
                "activistCodeName": code["name"],
                "dateCreated": "2024-01-01T00:00:00Z"
            })
        })
        .collect();
    page(items, &params, &format!("people/{van_id}/activistCodes")).into_response()
}

async fn list_activist_codes(State(db): State<Db>, Query(params): Params) -> Json<Value> {
    let store = db.read().await;
    let items = store
        .activist_codes
        .iter()
        .filter(|code| params.get("name").map_or(true, |name| code["name"] == name.as_str()))
        .cloned()
        .collect();
    page(items, &params, "activistCodes")
}

async fn get_activist_code(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let store = db.read().await;
    match store.activist_codes.iter().find(|code| code["activistCodeId"] == id) {
        Some(code) => Json(code.clone()).into_response(),
        None => not_found("activist code"),
    }
}

async fn list_groups(State(db): State<Db>, Query(params): Params) -> Json<Value> {
    let store = db.read().await;
    page(store.supporter_groups.values().cloned().collect(), &params, "supporterGroups")
}

async fn create_group(State(db): State<Db>, Json(group): Json<Map<String, Value>>) -> Response {
    let Some(name) = str_field(&group, "name").map(str::to_string) else {
        return error(StatusCode::BAD_REQUEST, "INVALID_PARAMETER", "'name' is required");
    };
    let mut store = db.write().await;
    let id = store.next_id();
    let created = json!({
        "id": id,
        "name": name,
        "description": group.get("description").cloned().unwrap_or(Value::Null),
    });
    store.supporter_groups.insert(id, created.clone());
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn get_group(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let store = db.read().await;
    match store.supporter_groups.get(&id) {
        Some(group) => Json(group.clone()).into_response(),
        None => not_found("supporter group"),
    }
}

async fn delete_group(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    let mut store = db.write().await;
    store.members.remove(&id);
    match store.supporter_groups.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

async fn add_member(State(db): State<Db>, Path((id, van_id)): Path<(i64, i64)>) -> StatusCode {
    let mut store = db.write().await;
    if !store.supporter_groups.contains_key(&id) || !store.people.contains_key(&van_id) {
        return StatusCode::NOT_FOUND;
    }
    store.members.entry(id).or_default().insert(van_id);
    StatusCode::NO_CONTENT
}

async fn remove_member(State(db): State<Db>, Path((id, van_id)): Path<(i64, i64)>) -> StatusCode {
    let mut store = db.write().await;
    let removed = store
        .members
        .get_mut(&id)
        .is_some_and(|members| members.remove(&van_id));
    if removed {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn list_events(State(db): State<Db>, Query(params): Params) -> Json<Value> {
    let store = db.read().await;
    let items = store.events.values().map(|event| Value::Object(event.clone())).collect();
    page(items, &params, "events")
}

async fn create_event(State(db): State<Db>, Json(mut event): Json<Map<String, Value>>) -> Response {
    if str_field(&event, "name").is_none() {
        return error(StatusCode::BAD_REQUEST, "INVALID_PARAMETER", "'name' is required");
    }
    let mut store = db.write().await;
    let id = store.next_id();
    event.insert("eventId".into(), json!(id));
    store.events.insert(id, event);
    (StatusCode::CREATED, Json(json!(id))).into_response()
}

async fn get_event(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let store = db.read().await;
    match store.events.get(&id) {
        Some(event) => Json(Value::Object(event.clone())).into_response(),
        None => not_found("event"),
    }
}

async fn delete_event(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    let mut store = db.write().await;
    match store.events.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}
