//! UI state owned by the event loop.
//!
//! Key handling and backend results are folded in here without doing any
//! I/O; whatever needs the network comes back as a [`Command`] for the
//! runtime to execute.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use engine::{
    Action, AuthOutcome, CreateForm, Cycle, DashboardView, Draft, Field, FormError, ItemId,
    ItemKind, MutationOp, MutationReport, SyncState, ThemeMode,
};

use crate::ui::keymap::AppAction;

const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Auth,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Password,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthMessage {
    pub text: String,
    pub is_error: bool,
}

#[derive(Debug)]
pub struct AuthState {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub focus: AuthField,
    pub message: Option<AuthMessage>,
    pub busy: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            mode: AuthMode::Login,
            email: String::new(),
            password: String::new(),
            focus: AuthField::Email,
            message: None,
            busy: false,
        }
    }
}

impl AuthState {
    fn active_field_mut(&mut self) -> &mut String {
        match self.focus {
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }
}

/// Where key input goes on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form(ItemKind, Field),
    List(ItemKind),
}

impl Focus {
    fn cycle() -> Vec<Focus> {
        ItemKind::ALL
            .iter()
            .flat_map(|&kind| {
                Field::ALL
                    .iter()
                    .map(move |&field| Focus::Form(kind, field))
                    .chain(std::iter::once(Focus::List(kind)))
            })
            .collect()
    }

    fn step(self, forward: bool) -> Focus {
        let order = Focus::cycle();
        let len = order.len();
        let pos = order.iter().position(|f| *f == self).unwrap_or(0);
        let next = if forward {
            (pos + 1) % len
        } else {
            (pos + len - 1) % len
        };
        order[next]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    pub shown_at: Instant,
}

/// Work the runtime performs on behalf of the state.
#[derive(Debug)]
pub enum Command {
    Quit,
    Refresh,
    /// Initial load after entering the dashboard: a cycle and the username.
    StartSession,
    Submit(Draft),
    Delete { kind: ItemKind, id: ItemId },
    Login { email: String, password: String },
    Register { email: String, password: String },
    Logout,
    ToggleTheme,
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub auth: AuthState,
    pub sync: SyncState,
    pub view: DashboardView,
    pub forms: Vec<CreateForm>,
    pub focus: Focus,
    selected: [usize; 3],
    pub username: Option<String>,
    pub theme: ThemeMode,
    pub toast: Option<ToastState>,
    pub last_refresh: Option<DateTime<Local>>,
    pub base_url: String,
}

fn slot(kind: ItemKind) -> usize {
    match kind {
        ItemKind::Asset => 0,
        ItemKind::Debt => 1,
        ItemKind::Stock => 2,
    }
}

impl AppState {
    pub fn new(authenticated: bool, theme: ThemeMode, base_url: String) -> Self {
        let sync = SyncState::default();
        let view = DashboardView::derive(sync.state());
        Self {
            screen: if authenticated {
                Screen::Dashboard
            } else {
                Screen::Auth
            },
            auth: AuthState::default(),
            sync,
            view,
            forms: ItemKind::ALL.iter().map(|&kind| CreateForm::new(kind)).collect(),
            focus: Focus::Form(ItemKind::Asset, Field::Text),
            selected: [0; 3],
            username: None,
            theme,
            toast: None,
            last_refresh: None,
            base_url,
        }
    }

    pub fn form(&self, kind: ItemKind) -> &CreateForm {
        &self.forms[slot(kind)]
    }

    fn form_mut(&mut self, kind: ItemKind) -> &mut CreateForm {
        &mut self.forms[slot(kind)]
    }

    pub fn selected(&self, kind: ItemKind) -> usize {
        self.selected[slot(kind)]
    }

    pub fn show_toast(&mut self, message: impl Into<String>, level: ToastLevel) {
        self.toast = Some(ToastState {
            message: message.into(),
            level,
            shown_at: Instant::now(),
        });
    }

    pub fn expire_toast(&mut self, now: Instant) {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| now.duration_since(toast.shown_at) >= TOAST_TTL)
        {
            self.toast = None;
        }
    }

    pub fn handle_action(&mut self, action: AppAction) -> Option<Command> {
        match action {
            AppAction::Quit => Some(Command::Quit),
            AppAction::None => None,
            _ => match self.screen {
                Screen::Auth => self.handle_auth_action(action),
                Screen::Dashboard => self.handle_dashboard_action(action),
            },
        }
    }

    fn handle_auth_action(&mut self, action: AppAction) -> Option<Command> {
        let auth = &mut self.auth;
        match action {
            AppAction::NextField | AppAction::PrevField | AppAction::Up | AppAction::Down => {
                auth.focus = match auth.focus {
                    AuthField::Email => AuthField::Password,
                    AuthField::Password => AuthField::Email,
                };
            }
            AppAction::SwitchAuthMode if !auth.busy => {
                auth.mode = match auth.mode {
                    AuthMode::Login => AuthMode::Register,
                    AuthMode::Register => AuthMode::Login,
                };
                auth.message = None;
            }
            AppAction::Backspace if !auth.busy => {
                auth.active_field_mut().pop();
            }
            AppAction::Input(ch) if !auth.busy => {
                auth.active_field_mut().push(ch);
            }
            AppAction::Submit if !auth.busy => {
                let email = auth.email.trim().to_string();
                if email.is_empty() || auth.password.is_empty() {
                    auth.message = Some(AuthMessage {
                        text: "Email and password are required".to_string(),
                        is_error: true,
                    });
                    return None;
                }
                auth.busy = true;
                auth.message = None;
                let password = auth.password.clone();
                return Some(match auth.mode {
                    AuthMode::Login => Command::Login { email, password },
                    AuthMode::Register => Command::Register { email, password },
                });
            }
            AppAction::ToggleTheme => return Some(Command::ToggleTheme),
            _ => {}
        }
        None
    }

    fn handle_dashboard_action(&mut self, action: AppAction) -> Option<Command> {
        match action {
            AppAction::Refresh => return Some(Command::Refresh),
            AppAction::ToggleTheme => return Some(Command::ToggleTheme),
            AppAction::Logout => return Some(Command::Logout),
            AppAction::NextField => self.focus = self.focus.step(true),
            AppAction::PrevField => self.focus = self.focus.step(false),
            _ => {}
        }

        match self.focus {
            Focus::Form(kind, field) => match action {
                AppAction::Input(ch) => {
                    if let Some(value) = self.form_mut(kind).field_mut(field) {
                        value.push(ch);
                    }
                }
                AppAction::Backspace => {
                    if let Some(value) = self.form_mut(kind).field_mut(field) {
                        value.pop();
                    }
                }
                AppAction::Up | AppAction::Down => {
                    let other = match field {
                        Field::Text => Field::Number,
                        Field::Number => Field::Text,
                    };
                    self.focus = Focus::Form(kind, other);
                }
                AppAction::Submit => match self.form_mut(kind).begin_submit() {
                    Ok(draft) => return Some(Command::Submit(draft)),
                    Err(FormError::Busy) => {}
                    Err(err) => tracing::debug!("{} form rejected: {err}", kind.as_str()),
                },
                _ => {}
            },
            Focus::List(kind) => match action {
                AppAction::Up => {
                    let idx = &mut self.selected[slot(kind)];
                    *idx = idx.saturating_sub(1);
                }
                AppAction::Down => {
                    let len = self.row_count(kind);
                    let idx = &mut self.selected[slot(kind)];
                    if *idx + 1 < len {
                        *idx += 1;
                    }
                }
                AppAction::DeleteRow | AppAction::Input('d') => {
                    if let Some(Action::Delete { kind, id }) =
                        self.view.action_at(kind, self.selected(kind)).cloned()
                    {
                        return Some(Command::Delete { kind, id });
                    }
                }
                _ => {}
            },
        }
        None
    }

    fn row_count(&self, kind: ItemKind) -> usize {
        self.view
            .section(kind)
            .map_or(0, |section| section.rows.len())
    }

    /// Applies a finished cycle. Stale cycles and cycles landing after logout
    /// leave the view untouched.
    pub fn apply_cycle(&mut self, cycle: Cycle) {
        if self.screen != Screen::Dashboard {
            return;
        }
        if !self.sync.apply(cycle) {
            return;
        }
        self.view = DashboardView::derive(self.sync.state());
        self.last_refresh = Some(Local::now());
        for kind in ItemKind::ALL {
            let last = self.row_count(kind).saturating_sub(1);
            let idx = &mut self.selected[slot(kind)];
            *idx = (*idx).min(last);
        }
    }

    /// Applies a settled write. Reports landing after logout are dropped; the
    /// refresh that follows each write arrives separately as a cycle.
    pub fn apply_mutation(&mut self, report: MutationReport) {
        if self.screen != Screen::Dashboard {
            tracing::debug!("dropping {} report after logout", report.kind.as_str());
            return;
        }
        if report.op == MutationOp::Create {
            self.form_mut(report.kind).finish();
        }
        let level = if report.result.is_ok() {
            ToastLevel::Success
        } else {
            ToastLevel::Error
        };
        self.show_toast(report.notice(), level);
    }

    pub fn apply_auth(&mut self, outcome: AuthOutcome) -> Option<Command> {
        self.auth.busy = false;
        match outcome {
            AuthOutcome::LoggedIn => {
                self.auth.password.clear();
                self.auth.message = None;
                self.screen = Screen::Dashboard;
                Some(Command::StartSession)
            }
            AuthOutcome::Registered(text) => {
                self.auth.mode = AuthMode::Login;
                self.auth.password.clear();
                self.auth.focus = AuthField::Password;
                self.auth.message = Some(AuthMessage {
                    text,
                    is_error: false,
                });
                None
            }
            AuthOutcome::Failed(text) => {
                self.auth.message = Some(AuthMessage {
                    text,
                    is_error: true,
                });
                None
            }
        }
    }

    /// Drops everything tied to the session.
    pub fn reset_session(&mut self) {
        self.screen = Screen::Auth;
        self.auth = AuthState::default();
        self.sync.reset();
        self.view = DashboardView::derive(self.sync.state());
        self.forms = ItemKind::ALL.iter().map(|&kind| CreateForm::new(kind)).collect();
        self.focus = Focus::Form(ItemKind::Asset, Field::Text);
        self.selected = [0; 3];
        self.username = None;
        self.last_refresh = None;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use api_types::{
        auth::{Credentials, LoginResponse, Me, RegisterResponse},
        item::{AssetNew, DebtNew, StockNew},
    };
    use async_trait::async_trait;
    use engine::{
        Asset, Backend, Debt, Engine, EngineError, MemorySession, ResultEngine, Stock,
    };

    use super::*;

    struct StubBackend {
        assets: Vec<Asset>,
        fail_writes: bool,
    }

    #[async_trait]
    impl Backend for StubBackend {
        async fn list_assets(&self, _: Option<&str>) -> ResultEngine<Vec<Asset>> {
            Ok(self.assets.clone())
        }

        async fn list_debts(&self, _: Option<&str>) -> ResultEngine<Vec<Debt>> {
            Ok(Vec::new())
        }

        async fn list_stocks(&self, _: Option<&str>) -> ResultEngine<Vec<Stock>> {
            Ok(Vec::new())
        }

        async fn create_asset(&self, _: Option<&str>, _: &AssetNew) -> ResultEngine<()> {
            self.write()
        }

        async fn create_debt(&self, _: Option<&str>, _: &DebtNew) -> ResultEngine<()> {
            self.write()
        }

        async fn create_stock(&self, _: Option<&str>, _: &StockNew) -> ResultEngine<()> {
            self.write()
        }

        async fn delete_item(&self, _: Option<&str>, _: ItemKind, _: &ItemId) -> ResultEngine<()> {
            self.write()
        }

        async fn current_user(&self, _: &str) -> ResultEngine<Option<Me>> {
            Ok(None)
        }

        async fn login(&self, _: &Credentials) -> ResultEngine<LoginResponse> {
            Ok(LoginResponse::default())
        }

        async fn register(&self, _: &Credentials) -> ResultEngine<RegisterResponse> {
            Ok(RegisterResponse::default())
        }
    }

    impl StubBackend {
        fn write(&self) -> ResultEngine<()> {
            if self.fail_writes {
                return Err(EngineError::Transport("refused".to_string()));
            }
            Ok(())
        }
    }

    fn asset(id: &str, value: f64) -> Asset {
        Asset {
            id: ItemId::new(id),
            name: id.to_uppercase(),
            value,
        }
    }

    fn engine(assets: Vec<Asset>, fail_writes: bool) -> Engine {
        Engine::builder()
            .backend(Arc::new(StubBackend {
                assets,
                fail_writes,
            }))
            .session(Arc::new(MemorySession::with_token("t")))
            .build()
            .unwrap()
    }

    fn dashboard() -> AppState {
        AppState::new(true, ThemeMode::Light, "http://test/api".to_string())
    }

    fn type_text(state: &mut AppState, text: &str) {
        for ch in text.chars() {
            state.handle_action(AppAction::Input(ch));
        }
    }

    #[test]
    fn focus_cycles_through_forms_and_lists() {
        let mut state = dashboard();
        let mut seen = Vec::new();
        for _ in 0..9 {
            seen.push(state.focus);
            state.handle_action(AppAction::NextField);
        }
        assert_eq!(state.focus, Focus::Form(ItemKind::Asset, Field::Text));
        assert_eq!(seen[2], Focus::List(ItemKind::Asset));
        assert_eq!(seen[8], Focus::List(ItemKind::Stock));

        state.handle_action(AppAction::PrevField);
        assert_eq!(state.focus, Focus::List(ItemKind::Stock));
    }

    #[test]
    fn invalid_form_stays_editable() {
        let mut state = dashboard();
        type_text(&mut state, "Car");
        state.handle_action(AppAction::Down);
        type_text(&mut state, "abc");

        assert!(state.handle_action(AppAction::Submit).is_none());
        let form = state.form(ItemKind::Asset);
        assert!(!form.is_busy());
        assert_eq!(form.error(), Some("Value must be a number"));
        assert_eq!(form.value(Field::Text), "Car");
    }

    #[tokio::test]
    async fn submit_locks_form_until_report() {
        let mut state = dashboard();
        type_text(&mut state, "Car");
        state.handle_action(AppAction::Down);
        type_text(&mut state, "1200");

        let Some(Command::Submit(draft)) = state.handle_action(AppAction::Submit) else {
            panic!("expected a submit command");
        };
        assert!(state.form(ItemKind::Asset).is_busy());
        assert_eq!(state.form(ItemKind::Asset).submit_label(), "Adding...");
        assert!(state.handle_action(AppAction::Submit).is_none());
        type_text(&mut state, "9");
        assert_eq!(state.form(ItemKind::Asset).value(Field::Number), "1200");

        let failing = engine(vec![asset("a1", 1200.0)], true);
        state.apply_mutation(failing.submit(draft).await);

        let form = state.form(ItemKind::Asset);
        assert!(!form.is_busy());
        assert_eq!(form.value(Field::Text), "");
        let toast = state.toast.as_ref().unwrap();
        assert_eq!(toast.message, "Failed to add asset");
        assert_eq!(toast.level, ToastLevel::Error);
        assert!(state.view.section(ItemKind::Asset).is_none());

        state.apply_cycle(failing.refresh().await);
        assert_eq!(state.view.section(ItemKind::Asset).unwrap().rows.len(), 1);
    }

    #[tokio::test]
    async fn reports_after_logout_are_ignored() {
        let mut state = dashboard();
        type_text(&mut state, "Car");
        state.handle_action(AppAction::Down);
        type_text(&mut state, "10");
        let Some(Command::Submit(draft)) = state.handle_action(AppAction::Submit) else {
            panic!("expected a submit command");
        };

        state.reset_session();
        let report = engine(Vec::new(), false).submit(draft).await;
        state.apply_mutation(report);
        assert!(state.toast.is_none());
        assert_eq!(state.screen, Screen::Auth);
    }

    #[tokio::test]
    async fn delete_targets_selected_row_and_selection_clamps() {
        let full = engine(vec![asset("a1", 1.0), asset("a2", 2.0)], false);
        let mut state = dashboard();
        state.apply_cycle(full.refresh().await);
        assert!(state.last_refresh.is_some());

        state.focus = Focus::List(ItemKind::Asset);
        state.handle_action(AppAction::Down);
        state.handle_action(AppAction::Down);
        assert_eq!(state.selected(ItemKind::Asset), 1);

        let Some(Command::Delete { kind, id }) = state.handle_action(AppAction::Input('d')) else {
            panic!("expected a delete command");
        };
        assert_eq!(kind, ItemKind::Asset);
        assert_eq!(id, ItemId::new("a2"));

        // A fresh engine numbers from one again, so skip past the applied cycle.
        let shrunk = engine(vec![asset("a1", 1.0)], false);
        shrunk.refresh().await;
        state.apply_cycle(shrunk.refresh().await);
        assert_eq!(state.selected(ItemKind::Asset), 0);
    }

    #[tokio::test]
    async fn cycles_after_logout_are_ignored() {
        let late = engine(vec![asset("a1", 1.0)], false);
        let mut state = dashboard();
        state.reset_session();
        state.apply_cycle(late.refresh().await);
        assert_eq!(state.screen, Screen::Auth);
        assert!(state.view.sections.is_empty());
    }

    #[test]
    fn auth_submit_and_outcomes() {
        let mut state = AppState::new(false, ThemeMode::Dark, String::new());
        assert!(state.handle_action(AppAction::Submit).is_none());
        assert!(state.auth.message.as_ref().unwrap().is_error);

        type_text(&mut state, "a@b.c");
        state.handle_action(AppAction::NextField);
        type_text(&mut state, "pw");
        state.handle_action(AppAction::SwitchAuthMode);
        assert_eq!(state.auth.mode, AuthMode::Register);

        let Some(Command::Register { email, password }) = state.handle_action(AppAction::Submit)
        else {
            panic!("expected a register command");
        };
        assert_eq!((email.as_str(), password.as_str()), ("a@b.c", "pw"));
        assert!(state.auth.busy);

        let next = state.apply_auth(AuthOutcome::Registered("Registered".to_string()));
        assert!(next.is_none());
        assert_eq!(state.auth.mode, AuthMode::Login);
        assert_eq!(state.auth.password, "");
        assert!(!state.auth.message.as_ref().unwrap().is_error);

        let next = state.apply_auth(AuthOutcome::LoggedIn);
        assert!(matches!(next, Some(Command::StartSession)));
        assert_eq!(state.screen, Screen::Dashboard);
    }

    #[test]
    fn toast_expires() {
        let mut state = dashboard();
        state.show_toast("Asset added", ToastLevel::Success);
        let shown = state.toast.as_ref().unwrap().shown_at;
        state.expire_toast(shown + Duration::from_secs(1));
        assert!(state.toast.is_some());
        state.expire_toast(shown + TOAST_TTL);
        assert!(state.toast.is_none());
    }
}
