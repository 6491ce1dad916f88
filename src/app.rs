//! Application Context
//!
//! The native front end's single writer: owns the API client, the persisted
//! store, auth state, router, alert slot and panel state, and maps each UI
//! action onto API calls and state updates. Handlers run one at a time
//! (`&mut self`), so there is no shared mutable state between requests.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::alert::{Alert, AlertKind, AlertSlot};
use crate::api::{ApiClient, ClientError, ClientResult, Transport};
use crate::forms::{GroupForm, LoginForm, RegisterForm, ResourceForm};
use crate::models::Group;
use crate::panels::{groups, matches, resources, subjects};
use crate::panels::{GroupsPanel, MatchesPanel, Membership, ResourcesPanel, SubjectsPanel};
use crate::session::{AuthState, AuthView, Theme};
use crate::session::{LOGGED_IN, LOGGED_OUT, LOGIN_FAILED, REGISTERED};
use crate::store::KeyValueStore;
use crate::view::{self, Collection, Router, View};

/// Alert slot with a cancel-and-restart auto-hide timer
pub struct Alerts {
    slot: Arc<Mutex<AlertSlot>>,
    timeout: Duration,
    timer: Option<JoinHandle<()>>,
}

fn lock(slot: &Mutex<AlertSlot>) -> MutexGuard<'_, AlertSlot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Alerts {
    pub fn new(timeout: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(AlertSlot::new())),
            timeout,
            timer: None,
        }
    }

    /// Must be called inside a Tokio runtime
    pub fn show(&mut self, kind: AlertKind, message: impl Into<String>) {
        let ticket = lock(&self.slot).show(kind, message);

        if let Some(timer) = self.timer.take() {
            timer.abort();
        }

        if let Some(ticket) = ticket {
            let slot = Arc::clone(&self.slot);
            let timeout = self.timeout;
            self.timer = Some(tokio::spawn(async move {
                tokio::time::sleep(timeout).await;
                lock(&slot).expire(ticket);
            }));
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(AlertKind::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(AlertKind::Error, message);
    }

    pub fn current(&self) -> Option<Alert> {
        lock(&self.slot).current().cloned()
    }
}

impl Drop for Alerts {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// Explicit context passed to every handler
pub struct App<T, S> {
    client: ApiClient<T>,
    store: S,
    auth: AuthState,
    router: Router,
    alerts: Alerts,
    theme: Theme,
    subject_filter: Option<u64>,
    group_filter: Option<u64>,
    pub subjects: SubjectsPanel,
    pub groups: GroupsPanel,
    pub resources: ResourcesPanel,
    pub matches: MatchesPanel,
}

impl<T: Transport, S: KeyValueStore> App<T, S> {
    /// Restore the persisted session and point the client at it
    pub fn new(mut client: ApiClient<T>, store: S, alert_timeout: Duration) -> Self {
        let auth = AuthState::restore(&store);
        client.set_token(auth.token().map(str::to_string));
        let theme = Theme::load(&store);

        Self {
            client,
            store,
            auth,
            router: Router::new(View::Dashboard),
            alerts: Alerts::new(alert_timeout),
            theme,
            subject_filter: None,
            group_filter: None,
            subjects: SubjectsPanel::default(),
            groups: GroupsPanel::default(),
            resources: ResourcesPanel::default(),
            matches: MatchesPanel::default(),
        }
    }

    /// Page-load sequence: dashboard, then every collection
    pub async fn start(&mut self) {
        self.router.show(View::Dashboard);
        self.refresh_all().await;
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn auth_view(&self) -> AuthView {
        self.auth.view()
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn active_view(&self) -> View {
        self.router.active()
    }

    pub fn alert(&self) -> Option<Alert> {
        self.alerts.current()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Restrict the groups list to one subject
    pub fn set_subject_filter(&mut self, subject: Option<u64>) {
        self.subject_filter = subject;
    }

    /// Restrict the resources list to one group
    pub fn set_group_filter(&mut self, group: Option<u64>) {
        self.group_filter = group;
    }

    pub fn toggle_theme(&mut self) {
        match self.theme.toggle(&mut self.store) {
            Ok(theme) => self.theme = theme,
            Err(e) => tracing::warn!(error = %e, "Failed to persist theme"),
        }
    }

    fn fail<R>(&mut self, message: impl Into<String>, err: ClientError) -> ClientResult<R> {
        let message = message.into();
        tracing::warn!(error = %err, "{}", message);
        self.alerts.error(message);
        Err(err)
    }

    fn reject<R>(&mut self, message: &str) -> ClientResult<R> {
        self.alerts.error(message);
        Err(ClientError::validation(message))
    }

    // ============ Navigation ============

    /// Nav click: show the view and reload what it displays
    pub async fn navigate(&mut self, view: View) {
        if let Some(collection) = self.router.navigate(view) {
            let _ = self.reload(collection).await;
        }
    }

    pub async fn reload(&mut self, collection: Collection) -> ClientResult<()> {
        match collection {
            Collection::Subjects => self.load_subjects().await,
            Collection::Groups => self.load_groups().await,
            Collection::Resources => self.load_resources().await,
            Collection::Matches => self.load_matches().await,
        }
    }

    /// Failures are already alerted per collection
    pub async fn refresh_all(&mut self) {
        for collection in view::refresh_all(self.auth.is_logged_in()) {
            let _ = self.reload(collection).await;
        }
    }

    // ============ Auth ============

    pub async fn login(&mut self, form: &LoginForm) -> ClientResult<()> {
        let credentials = match form.validate() {
            Ok(credentials) => credentials,
            Err(e) => return self.fail(e.to_string(), e),
        };

        match self.client.login(&credentials).await {
            Ok(session) => {
                self.client.set_token(Some(session.token.clone()));
                if let Err(e) = self.auth.sign_in(&mut self.store, session) {
                    tracing::warn!(error = %e, "Failed to persist session");
                }
                self.alerts.success(LOGGED_IN);
                self.router.show(View::Dashboard);
                self.refresh_all().await;
                Ok(())
            }
            Err(e) => {
                let message = e.user_message(LOGIN_FAILED);
                self.fail(message, e)
            }
        }
    }

    pub async fn register(&mut self, form: &RegisterForm) -> ClientResult<()> {
        let registration = match form.validate() {
            Ok(registration) => registration,
            Err(e) => return self.fail(e.to_string(), e),
        };

        match self.client.register(&registration).await {
            Ok(_) => {
                self.alerts.success(REGISTERED);
                self.router.show(View::Auth);
                Ok(())
            }
            Err(e) => {
                let payload = e.raw_payload();
                self.fail(payload, e)
            }
        }
    }

    /// Always ends logged out, whatever the server says
    pub async fn logout(&mut self) {
        if self.auth.is_logged_in() {
            if let Err(e) = self.client.logout().await {
                tracing::debug!(error = %e, "Ignoring logout failure");
            }
        }

        self.client.set_token(None);
        if let Err(e) = self.auth.sign_out(&mut self.store) {
            tracing::warn!(error = %e, "Failed to clear persisted session");
        }
        self.matches.require_login();

        self.alerts.success(LOGGED_OUT);
        self.router.show(View::Dashboard);
        self.refresh_all().await;
    }

    // ============ Subjects ============

    pub async fn load_subjects(&mut self) -> ClientResult<()> {
        match self.client.list_subjects().await {
            Ok(list) => {
                self.subjects.apply(list);
                Ok(())
            }
            Err(e) => self.fail(subjects::LOAD_FAILED, e),
        }
    }

    // ============ Groups ============

    /// Also repopulates the resource form's group select
    pub async fn load_groups(&mut self) -> ClientResult<()> {
        match self.client.list_groups(self.subject_filter).await {
            Ok(list) => {
                self.resources
                    .set_group_options(list.iter().map(Group::option).collect());
                self.groups.apply_list(list);
                Ok(())
            }
            Err(e) => self.fail(groups::LOAD_FAILED, e),
        }
    }

    pub async fn load_group_detail(&mut self, id: u64) -> ClientResult<()> {
        match self.client.get_group(id).await {
            Ok(group) => {
                self.groups.apply_detail(group);
                Ok(())
            }
            Err(e) => self.fail(groups::DETAIL_FAILED, e),
        }
    }

    pub async fn join_group(&mut self, id: u64) -> ClientResult<()> {
        self.change_membership(id, Membership::Join).await
    }

    pub async fn leave_group(&mut self, id: u64) -> ClientResult<()> {
        self.change_membership(id, Membership::Leave).await
    }

    /// On success, re-fetch the list and then the detail, once each. The
    /// list goes first because re-rendering it clears the detail pane.
    pub async fn change_membership(&mut self, id: u64, membership: Membership) -> ClientResult<()> {
        if !self.auth.is_logged_in() {
            return self.reject(membership.login_required());
        }

        let result = match membership {
            Membership::Join => self.client.join_group(id).await,
            Membership::Leave => self.client.leave_group(id).await,
        };

        match result {
            Ok(_) => {
                self.alerts.success(membership.succeeded());
                let _ = self.load_groups().await;
                let _ = self.load_group_detail(id).await;
                Ok(())
            }
            Err(e) => {
                let message = e.user_message(membership.failed());
                self.fail(message, e)
            }
        }
    }

    pub async fn create_group(&mut self, form: &GroupForm) -> ClientResult<()> {
        if !self.auth.is_logged_in() {
            return self.reject(groups::CREATE_LOGIN_REQUIRED);
        }
        let new_group = match form.validate() {
            Ok(new_group) => new_group,
            Err(e) => return self.fail(e.to_string(), e),
        };

        match self.client.create_group(&new_group).await {
            Ok(body) => {
                tracing::info!(id = ?body.id(), name = %new_group.name, "Created group");
                self.alerts.success(groups::CREATED);
                self.groups.reset_form();
                let _ = self.load_groups().await;
                Ok(())
            }
            Err(e) => {
                let payload = e.raw_payload();
                self.fail(payload, e)
            }
        }
    }

    /// Submit whatever is currently in the groups panel form
    pub async fn submit_group_form(&mut self) -> ClientResult<()> {
        let form = self.groups.form.clone();
        self.create_group(&form).await
    }

    // ============ Resources ============

    pub async fn load_resources(&mut self) -> ClientResult<()> {
        match self.client.list_resources(self.group_filter).await {
            Ok(list) => {
                self.resources.apply(list);
                Ok(())
            }
            Err(e) => self.fail(resources::LOAD_FAILED, e),
        }
    }

    pub async fn share_resource(&mut self, form: &ResourceForm) -> ClientResult<()> {
        if !self.auth.is_logged_in() {
            return self.reject(resources::SHARE_LOGIN_REQUIRED);
        }
        let new_resource = match form.validate() {
            Ok(new_resource) => new_resource,
            Err(e) => return self.fail(e.to_string(), e),
        };

        match self.client.create_resource(&new_resource).await {
            Ok(body) => {
                tracing::info!(id = ?body.id(), group = new_resource.group, "Shared resource");
                self.alerts.success(resources::SHARED);
                self.resources.reset_form();
                let _ = self.load_resources().await;
                Ok(())
            }
            Err(e) => {
                let payload = e.raw_payload();
                self.fail(payload, e)
            }
        }
    }

    /// Submit whatever is currently in the resources panel form
    pub async fn submit_resource_form(&mut self) -> ClientResult<()> {
        let form = self.resources.form.clone();
        self.share_resource(&form).await
    }

    // ============ Matches ============

    /// Without a session this never reaches the API
    pub async fn load_matches(&mut self) -> ClientResult<()> {
        if !self.auth.is_logged_in() {
            self.matches.require_login();
            return Ok(());
        }

        match self.client.list_matches().await {
            Ok(list) => {
                self.matches.apply(list);
                Ok(())
            }
            Err(e) => self.fail(matches::LOAD_FAILED, e),
        }
    }
}
