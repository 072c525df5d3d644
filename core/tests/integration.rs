//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts its own mock server on a random port and drives the
//! client through `UreqTransport`, so request building, pagination and
//! response parsing are exercised over real HTTP.

use std::net::SocketAddr;

use everyaction_core::{ApiError, Args, ClientConfig, DatabaseMode, EaClient, HttpMethod, TransportError};
use serde_json::json;

fn spawn_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });
    addr
}

fn client() -> EaClient {
    let addr = spawn_server();
    let config = ClientConfig::new("integration", "secret-key")
        .with_mode(DatabaseMode::MyCampaign)
        .with_endpoint(format!("http://{addr}/v4"));
    EaClient::new(&config).unwrap()
}

#[test]
fn api_key_profile_is_read_with_credentials() {
    let client = client();
    let profile = client.api_key_profile().unwrap();
    assert_eq!(profile.get_str("databaseName"), Some("MyCampaign"));
    assert_eq!(profile.get_str("committee_name"), Some("Test Committee"));
}

#[test]
fn activist_codes_page_through_short_server_pages() {
    let client = client();

    let all = client.activist_codes().list(Args::new().limit(0)).unwrap();
    assert_eq!(all.len(), mock_server::SEEDED_ACTIVIST_CODES);
    let ids: Vec<i64> = all.iter().filter_map(|code| code.id()).collect();
    assert_eq!(ids, (1..=mock_server::SEEDED_ACTIVIST_CODES as i64).collect::<Vec<_>>());

    let some = client.activist_codes().list(Args::new().limit(12)).unwrap();
    assert_eq!(some.len(), 12);
    assert_eq!(some[11].id(), Some(12));

    let skipped = client.activist_codes().list(Args::new().limit(3).skip(20)).unwrap();
    assert_eq!(skipped.iter().filter_map(|c| c.id()).collect::<Vec<_>>(), vec![21, 22, 23]);
}

#[test]
fn activist_code_lookup_by_name() {
    let client = client();
    let donor = client.activist_codes().find("donor").unwrap();
    assert_eq!(donor.id(), Some(2));

    let found = client.activist_codes().find_each(["Volunteer", "Member"]).unwrap();
    assert_eq!(found["Volunteer"].id(), Some(1));
    assert_eq!(found["Member"].id(), Some(3));

    let err = client.activist_codes().find("Nonexistent").unwrap_err();
    assert!(matches!(err, ApiError::FindFailed { .. }));
}

#[test]
fn person_lifecycle() {
    let client = client();
    let people = client.people();

    // nobody yet
    let missing = people
        .find(Args::new().arg("first", "Ada").arg("last", "Lovelace"))
        .unwrap();
    assert!(missing.is_none());

    // create
    let created = people
        .find_or_create(Args::new().arg("first", "Ada").arg("last", "Lovelace"))
        .unwrap();
    let van_id = created.id().unwrap();
    assert_eq!(created.get_i64("vanId"), Some(van_id));

    // find by the same aliases
    let found = people
        .find(Args::new().arg("first_name", "Ada").arg("lastName", "Lovelace"))
        .unwrap()
        .unwrap();
    assert_eq!(found.id(), Some(van_id));
    assert_eq!(found.get_str("first"), Some("Ada"));

    // update
    let updated = people
        .update(van_id, Args::new().arg("middle", "King"))
        .unwrap()
        .unwrap();
    assert_eq!(updated.get_str("middleName"), Some("King"));

    let fetched = people.get(van_id, Args::new()).unwrap();
    assert_eq!(fetched.get_str("middle_name"), Some("King"));

    // updating someone who does not exist yields nothing
    assert!(people.update(van_id + 500, Args::new().arg("middle", "X")).unwrap().is_none());

    // notes
    people
        .add_notes(van_id, Args::new().arg("text", "met at the library"))
        .unwrap();
    let notes = people.notes(van_id, Args::new()).unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].get_str("text"), Some("met at the library"));
    assert!(notes[0].id().is_some());
}

#[test]
fn activist_codes_apply_and_remove_by_id_and_name() {
    let client = client();
    let people = client.people();
    let van_id = people
        .find_or_create(Args::new().arg("first", "Grace").arg("last", "Hopper"))
        .unwrap()
        .id()
        .unwrap();

    people.apply_activist_code(van_id, 1).unwrap();
    people.apply_activist_code(van_id, "donor").unwrap();
    let applied = people.activist_codes(van_id, Args::new()).unwrap();
    let names: Vec<&str> = applied.iter().filter_map(|code| code.name()).collect();
    assert_eq!(names, vec!["Volunteer", "Donor"]);

    people.remove_activist_code(van_id, "Volunteer").unwrap();
    let applied = people.activist_codes(van_id, Args::new()).unwrap();
    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].id(), Some(2));
}

#[test]
fn supporter_group_lifecycle() {
    let client = client();
    let groups = client.supporter_groups();

    let group = groups
        .create(Args::new().arg("name", "Board").arg("desc", "Board members"))
        .unwrap();
    let group_id = group.id().unwrap();
    assert_eq!(group.get_str("description"), Some("Board members"));

    let van_id = client
        .people()
        .find_or_create(Args::new().arg("first", "Alan").arg("last", "Turing"))
        .unwrap()
        .id()
        .unwrap();
    groups.add_person(group_id, van_id).unwrap();
    groups.remove_person(group_id, van_id).unwrap();

    let listed = groups.list(Args::new()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name(), Some("Board"));

    groups.delete(group_id).unwrap();
    let err = groups.get(group_id).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn events_create_get_delete() {
    let client = client();
    let events = client.events();

    let event_id = events
        .create(Args::new().arg("name", "Canvass").arg("description", "Weekend canvass"))
        .unwrap();
    let event = events.get(event_id, Args::new()).unwrap();
    assert_eq!(event.id(), Some(event_id));
    assert_eq!(event.name(), Some("Canvass"));

    assert_eq!(events.list(Args::new()).unwrap().len(), 1);
    events.delete(event_id).unwrap();
    assert!(events.get(event_id, Args::new()).unwrap_err().is_not_found());
}

#[test]
fn raw_calls_pass_arguments_through() {
    let client = client();
    let created = client
        .raw(HttpMethod::Post, "/supporterGroups", Args::new().arg("name", "Raw"))
        .unwrap()
        .unwrap();
    assert_eq!(created["name"], json!("Raw"));

    let id = created["id"].as_i64().unwrap();
    let fetched = client
        .raw(HttpMethod::Get, &format!("supporterGroups/{id}"), Args::new())
        .unwrap()
        .unwrap();
    assert_eq!(fetched["id"], json!(id));
}

#[test]
fn server_errors_surface_with_their_details() {
    let client = client();
    let err = client
        .people()
        .find_or_create(Args::new().arg("last", "Only"))
        .unwrap_err();
    match err {
        ApiError::Transport(TransportError::Http { status, ref errors, .. }) => {
            assert_eq!(status, 400);
            assert_eq!(errors[0].code.as_deref(), Some("INVALID_PARAMETER"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
