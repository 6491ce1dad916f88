#![cfg(feature = "native")]

mod common;

use serde_json::json;
use std::time::Duration;

use common::{app, path_of, reply, signed_in_store, standard_routes, FakeBackend};
use studyhub::panels::{groups, matches, resources};
use studyhub::session::{TOKEN_KEY, USERNAME_KEY};
use studyhub::{
    AlertKind, AuthView, GroupForm, KeyValueStore, LoginForm, MatchesState, MemoryStore, Method,
    RawResponse, RegisterForm, ResourceForm, TransportError, View,
};

#[tokio::test]
async fn test_start_without_session_skips_matches() {
    let backend = FakeBackend::standard();
    let mut app = app(&backend, MemoryStore::new());

    app.start().await;
    assert_eq!(app.active_view(), View::Dashboard);
    assert_eq!(app.auth_view(), AuthView::LoggedOut);
    assert_eq!(backend.count(Method::Get, "/subjects/"), 1);
    assert_eq!(backend.count(Method::Get, "/groups/"), 1);
    assert_eq!(backend.count(Method::Get, "/resources/"), 1);

    app.navigate(View::Matches).await;
    assert_eq!(backend.count(Method::Get, "/matches/"), 0);
    assert_eq!(app.matches.state(), &MatchesState::LoginRequired);
    assert_eq!(app.matches.message(), Some(matches::LOGIN_REQUIRED));
}

#[tokio::test]
async fn test_login_persists_and_survives_reload() {
    let backend = FakeBackend::standard();
    let mut app = app(&backend, MemoryStore::new());

    app.login(&LoginForm::new("  ana ", "secret")).await.unwrap();

    let login = &backend.requests()[0];
    assert_eq!(path_of(login), "/login/");
    assert_eq!(login.body.as_deref(), Some(r#"{"username":"ana","password":"secret"}"#));

    assert_eq!(app.auth().username(), Some("ana"));
    assert_eq!(app.client().token(), Some("abc123"));
    assert_eq!(app.active_view(), View::Dashboard);
    assert_eq!(backend.count(Method::Get, "/matches/"), 1);
    assert_eq!(app.matches.cards()[0].username, "ben");

    // Simulated page reload over the same store
    let reloaded = common::app(&backend, app.store().clone());
    assert_eq!(reloaded.auth(), app.auth());
    assert_eq!(reloaded.client().token(), Some("abc123"));
}

#[tokio::test]
async fn test_authenticated_requests_carry_token() {
    let backend = FakeBackend::standard();
    let mut app = app(&backend, signed_in_store());

    app.load_groups().await.unwrap();
    let request = &backend.requests()[0];
    assert_eq!(request.header("Authorization"), Some("Token abc123"));
}

#[tokio::test]
async fn test_login_validation_and_failure_messages() {
    let backend = FakeBackend::new(|request| match path_of(request) {
        "/login/" => reply(400, json!({"detail": "Unable to log in with provided credentials."})),
        _ => standard_routes(request),
    });
    let mut app = app(&backend, MemoryStore::new());

    let err = app.login(&LoginForm::new("ana", "   ")).await.unwrap_err();
    assert!(err.is_validation());
    assert!(backend.requests().is_empty());
    assert_eq!(
        app.alert().unwrap().message,
        "Please fill in username and password."
    );

    app.login(&LoginForm::new("ana", "wrong")).await.unwrap_err();
    let alert = app.alert().unwrap();
    assert_eq!(alert.kind, AlertKind::Error);
    assert_eq!(alert.message, "Unable to log in with provided credentials.");
    assert!(!app.auth().is_logged_in());
}

#[tokio::test]
async fn test_login_failure_without_detail_falls_back() {
    let backend = FakeBackend::new(|request| match path_of(request) {
        "/login/" => reply(500, json!("oops")),
        _ => standard_routes(request),
    });
    let mut app = app(&backend, MemoryStore::new());

    app.login(&LoginForm::new("ana", "secret")).await.unwrap_err();
    assert_eq!(app.alert().unwrap().message, "Invalid credentials.");
}

#[tokio::test]
async fn test_register_shows_auth_view() {
    let backend = FakeBackend::standard();
    let mut app = app(&backend, MemoryStore::new());

    let form = RegisterForm {
        username: "ben".into(),
        email: "ben@example.com".into(),
        password: "pw".into(),
        password2: "pw".into(),
    };
    app.register(&form).await.unwrap();

    assert_eq!(app.active_view(), View::Auth);
    assert_eq!(
        app.alert().unwrap().message,
        "Registration successful. You can now log in."
    );
    assert!(!app.auth().is_logged_in());
}

#[tokio::test]
async fn test_register_failure_shows_raw_payload() {
    let backend = FakeBackend::new(|request| match path_of(request) {
        "/register/" => reply(400, json!({"username": ["taken"]})),
        _ => standard_routes(request),
    });
    let mut app = app(&backend, MemoryStore::new());

    let form = RegisterForm {
        username: "ben".into(),
        email: "ben@example.com".into(),
        password: "pw".into(),
        password2: "pw".into(),
    };
    app.register(&form).await.unwrap_err();
    assert_eq!(app.alert().unwrap().message, r#"{"username":["taken"]}"#);
}

#[tokio::test]
async fn test_logout_clears_state_even_when_call_fails() {
    let backend = FakeBackend::new(|request| match path_of(request) {
        "/logout/" => Err(TransportError("connection reset".into())),
        _ => standard_routes(request),
    });
    let mut app = app(&backend, signed_in_store());
    app.navigate(View::Matches).await;
    assert!(matches!(app.matches.state(), MatchesState::Loaded(_)));

    app.logout().await;

    assert_eq!(backend.count(Method::Post, "/logout/"), 1);
    assert!(!app.auth().is_logged_in());
    assert_eq!(app.client().token(), None);
    assert_eq!(app.store().get(TOKEN_KEY), None);
    assert_eq!(app.store().get(USERNAME_KEY), None);
    assert_eq!(app.matches.state(), &MatchesState::LoginRequired);
    assert_eq!(app.active_view(), View::Dashboard);
    assert_eq!(app.alert().unwrap().message, "Logged out.");
}

#[tokio::test]
async fn test_logout_without_session_skips_call() {
    let backend = FakeBackend::standard();
    let mut app = app(&backend, MemoryStore::new());

    app.logout().await;
    assert_eq!(backend.count(Method::Post, "/logout/"), 0);
}

#[tokio::test]
async fn test_create_group_with_blank_name_sends_nothing() {
    let backend = FakeBackend::standard();
    let mut app = app(&backend, signed_in_store());

    let err = app.create_group(&GroupForm::new("   ", "desc")).await.unwrap_err();
    assert!(err.is_validation());
    assert!(backend.requests().is_empty());
    assert_eq!(app.alert().unwrap().message, "Group name is required.");
}

#[tokio::test]
async fn test_create_group_requires_session() {
    let backend = FakeBackend::standard();
    let mut app = app(&backend, MemoryStore::new());

    app.create_group(&GroupForm::new("Rust", "")).await.unwrap_err();
    assert!(backend.requests().is_empty());
    assert_eq!(app.alert().unwrap().message, groups::CREATE_LOGIN_REQUIRED);
}

#[tokio::test]
async fn test_create_group_resets_form_and_reloads() {
    let backend = FakeBackend::standard();
    let mut app = app(&backend, signed_in_store());

    app.groups.open_form();
    app.groups.form = GroupForm::new(" Rust ", "");
    app.submit_group_form().await.unwrap();

    let create = backend
        .requests()
        .into_iter()
        .find(|r| r.method == Method::Post)
        .unwrap();
    assert_eq!(create.body.as_deref(), Some(r#"{"name":"Rust","description":""}"#));
    assert!(!app.groups.is_form_open());
    assert!(app.groups.form.name.is_empty());
    assert_eq!(backend.count(Method::Get, "/groups/"), 1);
    assert_eq!(app.alert().unwrap().message, groups::CREATED);
}

#[tokio::test]
async fn test_create_succeeds_with_any_2xx_body() {
    let backend = FakeBackend::new(|request| match (request.method, path_of(request)) {
        (Method::Post, "/groups/") => reply(201, json!({"message": "Group created"})),
        (Method::Post, "/resources/") => Ok(RawResponse::new(201, "Created")),
        _ => standard_routes(request),
    });
    let mut app = app(&backend, signed_in_store());

    app.groups.open_form();
    app.groups.form = GroupForm::new("Rust", "");
    app.submit_group_form().await.unwrap();
    assert_eq!(app.alert().unwrap().kind, AlertKind::Success);
    assert!(!app.groups.is_form_open());
    assert_eq!(backend.count(Method::Get, "/groups/"), 1);

    let form = ResourceForm {
        title: "Slides".into(),
        link: "https://slides.test".into(),
        group: Some(5),
    };
    app.share_resource(&form).await.unwrap();
    assert_eq!(app.alert().unwrap().message, resources::SHARED);
    assert_eq!(backend.count(Method::Get, "/resources/"), 1);
}

#[tokio::test]
async fn test_collection_shapes_render_identically() {
    let paginated = FakeBackend::standard();
    let bare = FakeBackend::new(|request| match path_of(request) {
        "/groups/" => reply(
            200,
            json!([common::group_json(5, "Algebra Circle"), common::group_json(6, "Rustaceans")]),
        ),
        _ => standard_routes(request),
    });

    let mut a = app(&paginated, MemoryStore::new());
    let mut b = app(&bare, MemoryStore::new());
    a.load_groups().await.unwrap();
    b.load_groups().await.unwrap();

    assert_eq!(a.groups.cards(false), b.groups.cards(false));
    assert_eq!(a.groups.cards(false).len(), 2);
    assert_eq!(a.resources.group_options(), b.resources.group_options());
}

#[tokio::test]
async fn test_join_refetches_detail_and_list_once() {
    let backend = FakeBackend::standard();
    let mut app = app(&backend, signed_in_store());

    app.load_group_detail(5).await.unwrap();
    backend.clear();

    app.join_group(5).await.unwrap();

    assert_eq!(backend.count(Method::Post, "/groups/5/join/"), 1);
    assert_eq!(backend.count(Method::Get, "/groups/5/"), 1);
    assert_eq!(backend.count(Method::Get, "/groups/"), 1);
    assert_eq!(backend.requests().len(), 3);

    // The refreshed detail survives the list reload
    let detail = app.groups.detail(true).unwrap();
    assert_eq!(detail.id, 5);
    assert_eq!(detail.members, vec!["ana", "user #7"]);
    assert_eq!(app.alert().unwrap().message, "Joined group.");
}

#[tokio::test]
async fn test_membership_requires_session() {
    let backend = FakeBackend::standard();
    let mut app = app(&backend, MemoryStore::new());

    app.leave_group(5).await.unwrap_err();
    assert!(backend.requests().is_empty());
    assert_eq!(
        app.alert().unwrap().message,
        "You must be logged in to leave a group."
    );
}

#[tokio::test]
async fn test_join_failure_uses_server_detail() {
    let backend = FakeBackend::new(|request| match path_of(request) {
        "/groups/5/join/" => reply(400, json!({"error": "Already a member."})),
        _ => standard_routes(request),
    });
    let mut app = app(&backend, signed_in_store());

    app.join_group(5).await.unwrap_err();
    assert_eq!(app.alert().unwrap().message, "Already a member.");
    assert_eq!(backend.count(Method::Get, "/groups/"), 0);
}

#[tokio::test]
async fn test_failed_reload_keeps_previous_cards() {
    let backend = FakeBackend::standard();
    let mut app = app(&backend, MemoryStore::new());
    app.load_resources().await.unwrap();
    assert_eq!(app.resources.cards().len(), 1);

    let failing = FakeBackend::new(|_| Err(TransportError("offline".into())));
    let mut offline = common::app(&failing, MemoryStore::new());
    offline.resources = app.resources.clone();

    offline.load_resources().await.unwrap_err();
    assert_eq!(offline.resources.cards().len(), 1);
    assert_eq!(offline.alert().unwrap().message, resources::LOAD_FAILED);
}

#[tokio::test]
async fn test_share_resource_uses_selected_group() {
    let backend = FakeBackend::standard();
    let mut app = app(&backend, signed_in_store());
    app.load_groups().await.unwrap();
    assert_eq!(app.resources.form.group, Some(5));

    app.resources.form.group = Some(6);
    app.resources.form.title = "Slides".into();
    app.resources.form.link = "https://slides.test".into();
    app.submit_resource_form().await.unwrap();

    let create = backend
        .requests()
        .into_iter()
        .find(|r| r.method == Method::Post)
        .unwrap();
    assert_eq!(
        create.body.as_deref(),
        Some(r#"{"title":"Slides","link":"https://slides.test","group":6}"#)
    );
    assert_eq!(app.alert().unwrap().message, resources::SHARED);
    assert!(app.resources.form.title.is_empty());
}

#[tokio::test]
async fn test_share_resource_rejects_missing_fields() {
    let backend = FakeBackend::standard();
    let mut app = app(&backend, signed_in_store());

    let form = ResourceForm {
        title: "Slides".into(),
        link: String::new(),
        group: Some(5),
    };
    app.share_resource(&form).await.unwrap_err();
    assert!(backend.requests().is_empty());
    assert_eq!(app.alert().unwrap().message, "Please fill in all fields.");
}

#[tokio::test]
async fn test_filters_reach_the_api() {
    let backend = FakeBackend::standard();
    let mut app = app(&backend, MemoryStore::new());

    app.set_subject_filter(Some(2));
    app.navigate(View::Groups).await;
    app.set_group_filter(Some(5));
    app.navigate(View::Resources).await;

    let paths: Vec<String> = backend
        .requests()
        .iter()
        .map(|r| path_of(r).to_string())
        .collect();
    assert_eq!(paths, vec!["/groups/?subjects=2", "/resources/?group=5"]);
}

#[tokio::test]
async fn test_theme_toggle_persists() {
    let backend = FakeBackend::standard();
    let mut app = app(&backend, MemoryStore::new());

    app.toggle_theme();
    assert!(app.theme().is_dark());

    let reloaded = common::app(&backend, app.store().clone());
    assert!(reloaded.theme().is_dark());
}

#[tokio::test(start_paused = true)]
async fn test_earlier_timer_never_hides_later_alert() {
    let backend = FakeBackend::standard();
    let mut app = app(&backend, signed_in_store());

    app.join_group(5).await.unwrap();
    tokio::time::sleep(Duration::from_millis(3000)).await;

    app.create_group(&GroupForm::new("", "")).await.unwrap_err();
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(app.alert().unwrap().message, "Group name is required.");

    tokio::time::sleep(Duration::from_millis(3000)).await;
    assert!(app.alert().is_none());
}
