//! Application State
//!
//! Signal store provided through Leptos context. Handlers run the API call,
//! then apply the result to the signals; nothing else writes them.

use gloo_timers::callback::Timeout;
use leptos::*;

use studyhub::panels::{groups, matches, resources, subjects};
use studyhub::session::{LOGGED_IN, LOGGED_OUT, LOGIN_FAILED, REGISTERED};
use studyhub::view::refresh_all;
use studyhub::{
    AlertKind, AlertSlot, ApiClient, AuthState, ClientError, Collection, Group, GroupForm,
    GroupsPanel, LoginForm, MatchesPanel, Membership, RegisterForm, ResourceForm,
    ResourcesPanel, Router, SubjectsPanel, Theme, View, DEFAULT_ALERT_TIMEOUT_MS,
};

use crate::api::{get_api_base, GlooTransport, LocalStore, SharedTransport};

#[derive(Clone, Copy)]
pub struct UiState {
    client: StoredValue<ApiClient<SharedTransport>>,
    alert_timer: StoredValue<Option<Timeout>>,
    pub auth: RwSignal<AuthState>,
    pub router: RwSignal<Router>,
    pub alert: RwSignal<AlertSlot>,
    pub theme: RwSignal<Theme>,
    pub subjects: RwSignal<SubjectsPanel>,
    pub groups: RwSignal<GroupsPanel>,
    pub resources: RwSignal<ResourcesPanel>,
    pub matches: RwSignal<MatchesPanel>,
}

/// Restore the persisted session and provide state to the component tree
pub fn provide_ui_state() -> UiState {
    let client = ApiClient::new(get_api_base(), SharedTransport::new(GlooTransport));
    let state = UiState::new(client);
    provide_context(state);
    state
}

pub fn use_ui_state() -> UiState {
    use_context::<UiState>().expect("UiState not found")
}

impl UiState {
    /// Signals over the session persisted in `localStorage`
    pub fn new(mut client: ApiClient<SharedTransport>) -> Self {
        let auth = AuthState::restore(&LocalStore);
        client.set_token(auth.token().map(str::to_string));

        Self {
            client: store_value(client),
            alert_timer: store_value(None),
            auth: create_rw_signal(auth),
            router: create_rw_signal(Router::new(View::Dashboard)),
            alert: create_rw_signal(AlertSlot::new()),
            theme: create_rw_signal(Theme::load(&LocalStore)),
            subjects: create_rw_signal(SubjectsPanel::default()),
            groups: create_rw_signal(GroupsPanel::default()),
            resources: create_rw_signal(ResourcesPanel::default()),
            matches: create_rw_signal(MatchesPanel::default()),
        }
    }

    fn client(&self) -> ApiClient<SharedTransport> {
        self.client.get_value()
    }

    pub fn is_logged_in(&self) -> bool {
        self.auth.with_untracked(AuthState::is_logged_in)
    }

    // ============ Alerts ============

    /// Replace the visible alert and restart the auto-hide timer
    pub fn show_alert(&self, kind: AlertKind, message: impl Into<String>) {
        let ticket = self.alert.try_update(|slot| slot.show(kind, message)).flatten();
        let slot = self.alert;

        // Dropping the previous Timeout cancels it
        self.alert_timer.set_value(ticket.map(|ticket| {
            Timeout::new(DEFAULT_ALERT_TIMEOUT_MS as u32, move || {
                slot.try_update(|s| s.expire(ticket));
            })
        }));
    }

    pub fn show_success(&self, message: impl Into<String>) {
        self.show_alert(AlertKind::Success, message);
    }

    pub fn show_error(&self, message: impl Into<String>) {
        self.show_alert(AlertKind::Error, message);
    }

    fn report(&self, message: impl Into<String>, err: &ClientError) {
        let message = message.into();
        web_sys::console::warn_1(&format!("{}: {}", message, err).into());
        self.show_error(message);
    }

    // ============ Navigation ============

    pub fn show(&self, view: View) {
        self.router.update(|r| r.show(view));
    }

    pub fn navigate(self, view: View) {
        if let Some(collection) = self.router.try_update(|r| r.navigate(view)).flatten() {
            spawn_local(self.reload(collection));
        }
    }

    pub async fn reload(self, collection: Collection) {
        match collection {
            Collection::Subjects => self.load_subjects().await,
            Collection::Groups => self.load_groups().await,
            Collection::Resources => self.load_resources().await,
            Collection::Matches => self.load_matches().await,
        }
    }

    pub async fn refresh_all(self) {
        for collection in refresh_all(self.is_logged_in()) {
            self.reload(collection).await;
        }
    }

    pub fn toggle_theme(&self) {
        match self.theme.get_untracked().toggle(&mut LocalStore) {
            Ok(theme) => self.theme.set(theme),
            Err(e) => web_sys::console::warn_1(&e.to_string().into()),
        }
    }

    // ============ Auth ============

    pub async fn login(self, form: LoginForm) {
        let credentials = match form.validate() {
            Ok(credentials) => credentials,
            Err(e) => return self.show_error(e.to_string()),
        };

        match self.client().login(&credentials).await {
            Ok(session) => {
                let token = session.token.clone();
                self.client.update_value(|c| c.set_token(Some(token)));
                self.auth.update(|auth| {
                    if let Err(e) = auth.sign_in(&mut LocalStore, session) {
                        web_sys::console::warn_1(&e.to_string().into());
                    }
                });
                self.show_success(LOGGED_IN);
                self.show(View::Dashboard);
                self.refresh_all().await;
            }
            Err(e) => self.report(e.user_message(LOGIN_FAILED), &e),
        }
    }

    pub async fn register(self, form: RegisterForm) {
        let registration = match form.validate() {
            Ok(registration) => registration,
            Err(e) => return self.show_error(e.to_string()),
        };

        match self.client().register(&registration).await {
            Ok(_) => {
                self.show_success(REGISTERED);
                self.show(View::Auth);
            }
            Err(e) => self.report(e.raw_payload(), &e),
        }
    }

    pub async fn logout(self) {
        if self.is_logged_in() {
            // Server-side failure does not keep the client signed in
            if let Err(e) = self.client().logout().await {
                web_sys::console::debug_1(&format!("Ignoring logout failure: {}", e).into());
            }
        }

        self.client.update_value(|c| c.set_token(None));
        self.auth.update(|auth| {
            if let Err(e) = auth.sign_out(&mut LocalStore) {
                web_sys::console::warn_1(&e.to_string().into());
            }
        });
        self.matches.update(MatchesPanel::require_login);

        self.show_success(LOGGED_OUT);
        self.show(View::Dashboard);
        self.refresh_all().await;
    }

    // ============ Collections ============

    pub async fn load_subjects(self) {
        match self.client().list_subjects().await {
            Ok(list) => self.subjects.update(|p| p.apply(list)),
            Err(e) => self.report(subjects::LOAD_FAILED, &e),
        }
    }

    pub async fn load_groups(self) {
        match self.client().list_groups(None).await {
            Ok(list) => {
                let options = list.iter().map(Group::option).collect();
                self.resources.update(|p| p.set_group_options(options));
                self.groups.update(|p| p.apply_list(list));
            }
            Err(e) => self.report(groups::LOAD_FAILED, &e),
        }
    }

    pub async fn load_group_detail(self, id: u64) {
        match self.client().get_group(id).await {
            Ok(group) => self.groups.update(|p| p.apply_detail(group)),
            Err(e) => self.report(groups::DETAIL_FAILED, &e),
        }
    }

    pub async fn load_resources(self) {
        match self.client().list_resources(None).await {
            Ok(list) => self.resources.update(|p| p.apply(list)),
            Err(e) => self.report(resources::LOAD_FAILED, &e),
        }
    }

    pub async fn load_matches(self) {
        if !self.is_logged_in() {
            self.matches.update(MatchesPanel::require_login);
            return;
        }

        match self.client().list_matches().await {
            Ok(list) => self.matches.update(|p| p.apply(list)),
            Err(e) => self.report(matches::LOAD_FAILED, &e),
        }
    }

    // ============ Group actions ============

    /// List first, then detail: the list reload clears the detail pane
    pub async fn change_membership(self, id: u64, membership: Membership) {
        if !self.is_logged_in() {
            return self.show_error(membership.login_required());
        }

        let client = self.client();
        let result = match membership {
            Membership::Join => client.join_group(id).await,
            Membership::Leave => client.leave_group(id).await,
        };

        match result {
            Ok(_) => {
                self.show_success(membership.succeeded());
                self.load_groups().await;
                self.load_group_detail(id).await;
            }
            Err(e) => self.report(e.user_message(membership.failed()), &e),
        }
    }

    pub async fn create_group(self, form: GroupForm) {
        if !self.is_logged_in() {
            return self.show_error(groups::CREATE_LOGIN_REQUIRED);
        }
        let new_group = match form.validate() {
            Ok(new_group) => new_group,
            Err(e) => return self.show_error(e.to_string()),
        };

        match self.client().create_group(&new_group).await {
            Ok(_) => {
                self.show_success(groups::CREATED);
                self.groups.update(GroupsPanel::reset_form);
                self.load_groups().await;
            }
            Err(e) => self.report(e.raw_payload(), &e),
        }
    }

    pub async fn share_resource(self, form: ResourceForm) {
        if !self.is_logged_in() {
            return self.show_error(resources::SHARE_LOGIN_REQUIRED);
        }
        let new_resource = match form.validate() {
            Ok(new_resource) => new_resource,
            Err(e) => return self.show_error(e.to_string()),
        };

        match self.client().create_resource(&new_resource).await {
            Ok(_) => {
                self.show_success(resources::SHARED);
                self.resources.update(ResourcesPanel::reset_form);
                self.load_resources().await;
            }
            Err(e) => self.report(e.raw_payload(), &e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::rc::Rc;
    use studyhub::session::{TOKEN_KEY, USERNAME_KEY};
    use studyhub::{
        ApiRequest, KeyValueStore, MatchesState, Method, RawResponse, Transport, TransportError,
    };
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const BASE: &str = "http://studyhub.test/api";

    const GROUP: &str = r#"{"id":5,"name":"Algebra Circle","members":["ana"],"subjects":[1]}"#;

    /// `(status, body)` for a request; status 0 means no response
    type Route = fn(Method, &str) -> (u16, &'static str);

    /// Answers from a route table and records every request path
    #[derive(Clone)]
    struct ScriptedBackend {
        log: Rc<RefCell<Vec<(Method, String)>>>,
        route: Route,
    }

    impl ScriptedBackend {
        fn new(route: Route) -> Self {
            Self {
                log: Rc::default(),
                route,
            }
        }

        fn sent(&self) -> Vec<(Method, String)> {
            self.log.borrow().clone()
        }

        fn count(&self, method: Method, path: &str) -> usize {
            self.sent()
                .iter()
                .filter(|(m, p)| *m == method && p == path)
                .count()
        }
    }

    #[async_trait(?Send)]
    impl Transport for ScriptedBackend {
        async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
            let path = request.url.strip_prefix(BASE).unwrap_or(&request.url).to_string();
            let (status, body) = (self.route)(request.method, &path);
            self.log.borrow_mut().push((request.method, path));

            match status {
                0 => Err(TransportError("offline".into())),
                status => Ok(RawResponse::new(status, body)),
            }
        }
    }

    fn standard(method: Method, path: &str) -> (u16, &'static str) {
        match (method, path) {
            (Method::Post, "/login/") => (200, r#"{"token":"abc123","username":"ana"}"#),
            (Method::Post, "/logout/") => (204, ""),
            (Method::Get, "/subjects/") => (200, r#"[{"id":1,"name":"Linear Algebra"}]"#),
            (Method::Get, "/groups/") => (200, r#"{"count":1,"results":[{"id":5,"name":"Algebra Circle"}]}"#),
            (Method::Get, "/groups/5/") => (200, GROUP),
            (Method::Post, "/groups/5/join/") => (200, r#"{"status":"joined"}"#),
            (Method::Post, "/groups/") => (201, r#"{"message":"Group created"}"#),
            (Method::Get, "/resources/") => (200, "[]"),
            (Method::Get, "/matches/") => (200, r#"[{"username":"ben","subjects":[]}]"#),
            _ => (404, r#"{"detail":"Not found."}"#),
        }
    }

    fn logout_offline(method: Method, path: &str) -> (u16, &'static str) {
        match path {
            "/logout/" => (0, ""),
            _ => standard(method, path),
        }
    }

    fn setup(route: Route, signed_in: bool) -> (UiState, ScriptedBackend) {
        let mut store = LocalStore;
        store.remove(TOKEN_KEY).unwrap();
        store.remove(USERNAME_KEY).unwrap();
        if signed_in {
            store.set(TOKEN_KEY, "abc123").unwrap();
            store.set(USERNAME_KEY, "ana").unwrap();
        }

        let backend = ScriptedBackend::new(route);
        let client = ApiClient::new(BASE, SharedTransport::new(backend.clone()));
        (UiState::new(client), backend)
    }

    fn alert_message(state: &UiState) -> Option<String> {
        state
            .alert
            .with_untracked(|slot| slot.current().map(|a| a.message.clone()))
    }

    #[wasm_bindgen_test]
    async fn test_login_persists_session_and_loads_matches() {
        let runtime = create_runtime();
        let (state, backend) = setup(standard, false);

        state.login(LoginForm::new("ana", "secret")).await;

        assert!(state.is_logged_in());
        assert_eq!(LocalStore.get(TOKEN_KEY).as_deref(), Some("abc123"));
        assert_eq!(alert_message(&state).as_deref(), Some(LOGGED_IN));
        assert_eq!(backend.count(Method::Get, "/matches/"), 1);
        assert!(matches!(
            state.matches.get_untracked().state(),
            MatchesState::Loaded(m) if m.len() == 1
        ));
        runtime.dispose();
    }

    #[wasm_bindgen_test]
    async fn test_join_refetches_list_then_detail() {
        let runtime = create_runtime();
        let (state, backend) = setup(standard, true);

        state.change_membership(5, Membership::Join).await;

        let paths: Vec<String> = backend.sent().into_iter().map(|(_, p)| p).collect();
        assert_eq!(paths, vec!["/groups/5/join/", "/groups/", "/groups/5/"]);
        assert_eq!(
            alert_message(&state).as_deref(),
            Some(Membership::Join.succeeded())
        );
        assert_eq!(
            state.groups.with_untracked(|p| p.detail(true).map(|d| d.id)),
            Some(5)
        );
        runtime.dispose();
    }

    #[wasm_bindgen_test]
    async fn test_logout_signs_out_when_server_unreachable() {
        let runtime = create_runtime();
        let (state, backend) = setup(logout_offline, true);

        state.logout().await;

        assert_eq!(backend.count(Method::Post, "/logout/"), 1);
        assert!(!state.is_logged_in());
        assert_eq!(LocalStore.get(TOKEN_KEY), None);
        assert_eq!(backend.count(Method::Get, "/matches/"), 0);
        assert_eq!(
            state.matches.get_untracked().state(),
            &MatchesState::LoginRequired
        );
        assert_eq!(alert_message(&state).as_deref(), Some(LOGGED_OUT));
        runtime.dispose();
    }

    #[wasm_bindgen_test]
    async fn test_create_group_accepts_any_success_body() {
        let runtime = create_runtime();
        let (state, backend) = setup(standard, true);

        state.create_group(GroupForm::new("Rust", "")).await;

        assert_eq!(alert_message(&state).as_deref(), Some(groups::CREATED));
        assert_eq!(backend.count(Method::Get, "/groups/"), 1);
        runtime.dispose();
    }

    #[wasm_bindgen_test]
    async fn test_matches_need_a_session() {
        let runtime = create_runtime();
        let (state, backend) = setup(standard, false);

        state.load_matches().await;

        assert!(backend.sent().is_empty());
        assert_eq!(
            state.matches.get_untracked().state(),
            &MatchesState::LoginRequired
        );
        runtime.dispose();
    }
}
