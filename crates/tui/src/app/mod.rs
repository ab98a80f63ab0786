mod state;

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event};
use engine::{AuthOutcome, Cycle, Engine, MutationReport, Preferences};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    client::HttpBackend,
    config::AppConfig,
    error::{AppError, Result},
    local_state::LocalStore,
    ui,
};

pub use state::{AppState, AuthField, AuthMode, Command, Focus, Screen, ToastLevel, ToastState};

/// Results reported back by spawned network tasks.
#[derive(Debug)]
pub enum AppEvent {
    Refreshed(Cycle),
    Mutated(MutationReport),
    Username(Option<String>),
    Auth(AuthOutcome),
}

pub struct App {
    engine: Arc<Engine>,
    prefs: Arc<dyn Preferences>,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let store = Arc::new(LocalStore::open(&config.state_path));
        let http = reqwest::Client::builder().build()?;
        let backend = Arc::new(HttpBackend::new(http, config.base_url.clone()));
        let engine = Engine::builder()
            .backend(backend)
            .session(store.clone())
            .build()?;

        let state = AppState::new(engine.is_authenticated(), store.theme(), config.base_url);
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Ok(Self {
            engine: Arc::new(engine),
            prefs: store,
            events_tx,
            events_rx,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(100);

        if self.state.screen == Screen::Dashboard {
            self.execute(Command::StartSession);
        }

        while !self.should_quit {
            while let Ok(event) = self.events_rx.try_recv() {
                self.handle_event(event);
            }
            self.state.expire_toast(Instant::now());

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    let action = ui::keymap::map_key(key);
                    if let Some(command) = self.state.handle_action(action) {
                        self.execute(command);
                    }
                }
            }
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Refreshed(cycle) => self.state.apply_cycle(cycle),
            AppEvent::Mutated(report) => self.state.apply_mutation(report),
            AppEvent::Username(username) => self.state.username = username,
            AppEvent::Auth(outcome) => {
                if let Some(command) = self.state.apply_auth(outcome) {
                    self.execute(command);
                }
            }
        }
    }

    fn spawn<F, Fut>(&self, task: F)
    where
        F: FnOnce(Arc<Engine>) -> Fut,
        Fut: std::future::Future<Output = AppEvent> + Send + 'static,
    {
        let fut = task(self.engine.clone());
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            if tx.send(fut.await).is_err() {
                tracing::debug!("event loop gone, dropping task result");
            }
        });
    }

    /// Runs a write, reports it as soon as it settles, then always follows
    /// with a refresh cycle.
    fn spawn_write<F, Fut>(&self, task: F)
    where
        F: FnOnce(Arc<Engine>) -> Fut,
        Fut: std::future::Future<Output = MutationReport> + Send + 'static,
    {
        let engine = self.engine.clone();
        let fut = task(engine.clone());
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            if tx.send(AppEvent::Mutated(fut.await)).is_err() {
                tracing::debug!("event loop gone, dropping write report");
            }
            if tx.send(AppEvent::Refreshed(engine.refresh().await)).is_err() {
                tracing::debug!("event loop gone, dropping cycle");
            }
        });
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Quit => self.should_quit = true,
            Command::Refresh => {
                self.spawn(|engine| async move { AppEvent::Refreshed(engine.refresh().await) });
            }
            Command::StartSession => {
                self.spawn(|engine| async move { AppEvent::Refreshed(engine.refresh().await) });
                self.spawn(|engine| async move { AppEvent::Username(engine.current_user().await) });
            }
            Command::Submit(draft) => {
                self.spawn_write(|engine| async move { engine.submit(draft).await });
            }
            Command::Delete { kind, id } => {
                self.spawn_write(move |engine| async move { engine.remove(kind, &id).await });
            }
            Command::Login { email, password } => {
                self.spawn(|engine| async move {
                    AppEvent::Auth(engine.login(&email, &password).await)
                });
            }
            Command::Register { email, password } => {
                self.spawn(|engine| async move {
                    AppEvent::Auth(engine.register(&email, &password).await)
                });
            }
            Command::Logout => {
                if let Err(err) = self.engine.logout() {
                    self.state
                        .show_toast(format!("Logout failed: {err}"), ToastLevel::Error);
                    return;
                }
                self.state.reset_session();
            }
            Command::ToggleTheme => {
                let theme = self.state.theme.toggled();
                self.state.theme = theme;
                if let Err(err) = self.prefs.set_theme(theme) {
                    self.state
                        .show_toast(format!("Theme not saved: {err}"), ToastLevel::Error);
                }
            }
        }
    }
}
