#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use api_types::{
    auth::{Credentials, LoginResponse, Me, RegisterResponse},
    item::{AssetNew, DebtNew, StockNew},
};
use async_trait::async_trait;
use engine::{
    Asset, Backend, Debt, Engine, EngineError, ItemId, ItemKind, MemorySession, ResultEngine,
    SessionProvider, Stock,
};
use tokio::sync::Notify;

/// In-memory stand-in for the REST backend.
#[derive(Default)]
pub struct FakeBackend {
    inner: Mutex<FakeState>,
    /// Signalled when a list call is parked on the gate.
    pub parked: Notify,
}

#[derive(Default)]
struct FakeState {
    next_id: u64,
    assets: Vec<Asset>,
    debts: Vec<Debt>,
    stocks: Vec<Stock>,
    seen_tokens: Vec<Option<String>>,
    fail_debts: bool,
    fail_writes: bool,
    assets_gate: Option<Arc<Notify>>,
    users: Vec<(String, String)>,
}

impl FakeBackend {
    fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.inner.lock().unwrap()
    }

    fn next_id(state: &mut FakeState, prefix: &str) -> ItemId {
        state.next_id += 1;
        ItemId::new(format!("{prefix}{}", state.next_id))
    }

    pub fn seed_asset(&self, name: &str, value: f64) -> ItemId {
        let mut state = self.state();
        let id = Self::next_id(&mut state, "a");
        state.assets.push(Asset {
            id: id.clone(),
            name: name.to_string(),
            value,
        });
        id
    }

    pub fn seed_debt(&self, name: &str, value: f64) -> ItemId {
        let mut state = self.state();
        let id = Self::next_id(&mut state, "d");
        state.debts.push(Debt {
            id: id.clone(),
            name: name.to_string(),
            value,
        });
        id
    }

    pub fn seed_stock(&self, symbol: &str, shares: f64, price: Option<f64>) -> ItemId {
        let mut state = self.state();
        let id = Self::next_id(&mut state, "s");
        state.stocks.push(Stock {
            id: id.clone(),
            symbol: symbol.to_string(),
            shares,
            price,
        });
        id
    }

    pub fn seed_user(&self, email: &str, password: &str) {
        self.state()
            .users
            .push((email.to_string(), password.to_string()));
    }

    pub fn fail_debts(&self, fail: bool) {
        self.state().fail_debts = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.state().fail_writes = fail;
    }

    /// The next assets read waits until `gate` is notified.
    pub fn hold_next_assets(&self, gate: Arc<Notify>) {
        self.state().assets_gate = Some(gate);
    }

    pub fn stocks(&self) -> Vec<Stock> {
        self.state().stocks.clone()
    }

    pub fn seen_tokens(&self) -> Vec<Option<String>> {
        self.state().seen_tokens.clone()
    }

    fn record(&self, token: Option<&str>) {
        self.state().seen_tokens.push(token.map(ToString::to_string));
    }

    fn check_write(&self, token: Option<&str>) -> ResultEngine<()> {
        self.record(token);
        if self.state().fail_writes {
            return Err(EngineError::Transport("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn list_assets(&self, token: Option<&str>) -> ResultEngine<Vec<Asset>> {
        self.record(token);
        let gate = self.state().assets_gate.take();
        if let Some(gate) = gate {
            self.parked.notify_one();
            gate.notified().await;
        }
        Ok(self.state().assets.clone())
    }

    async fn list_debts(&self, token: Option<&str>) -> ResultEngine<Vec<Debt>> {
        self.record(token);
        let state = self.state();
        if state.fail_debts {
            return Err(EngineError::Status {
                status: 500,
                message: "server error".to_string(),
            });
        }
        Ok(state.debts.clone())
    }

    async fn list_stocks(&self, token: Option<&str>) -> ResultEngine<Vec<Stock>> {
        self.record(token);
        Ok(self.state().stocks.clone())
    }

    async fn create_asset(&self, token: Option<&str>, payload: &AssetNew) -> ResultEngine<()> {
        self.check_write(token)?;
        self.seed_asset(&payload.name, payload.value);
        Ok(())
    }

    async fn create_debt(&self, token: Option<&str>, payload: &DebtNew) -> ResultEngine<()> {
        self.check_write(token)?;
        self.seed_debt(&payload.name, payload.value);
        Ok(())
    }

    async fn create_stock(&self, token: Option<&str>, payload: &StockNew) -> ResultEngine<()> {
        self.check_write(token)?;
        self.seed_stock(&payload.symbol, payload.shares, None);
        Ok(())
    }

    async fn delete_item(
        &self,
        token: Option<&str>,
        kind: ItemKind,
        id: &ItemId,
    ) -> ResultEngine<()> {
        self.check_write(token)?;
        let mut state = self.state();
        match kind {
            ItemKind::Asset => state.assets.retain(|a| &a.id != id),
            ItemKind::Debt => state.debts.retain(|d| &d.id != id),
            ItemKind::Stock => state.stocks.retain(|s| &s.id != id),
        }
        Ok(())
    }

    async fn current_user(&self, token: &str) -> ResultEngine<Option<Me>> {
        self.record(Some(token));
        Ok(token.strip_prefix("token-").map(|email| Me {
            username: email.to_string(),
        }))
    }

    async fn login(&self, credentials: &Credentials) -> ResultEngine<LoginResponse> {
        let known = self
            .state()
            .users
            .iter()
            .any(|(email, password)| email == &credentials.email && password == &credentials.password);
        if known {
            return Ok(LoginResponse {
                token: Some(format!("token-{}", credentials.email)),
                error: None,
            });
        }
        Ok(LoginResponse {
            token: None,
            error: Some("Invalid credentials".to_string()),
        })
    }

    async fn register(&self, credentials: &Credentials) -> ResultEngine<RegisterResponse> {
        let exists = self
            .state()
            .users
            .iter()
            .any(|(email, _)| email == &credentials.email);
        if exists {
            return Ok(RegisterResponse {
                message: None,
                error: Some("User already exists".to_string()),
            });
        }
        self.seed_user(&credentials.email, &credentials.password);
        Ok(RegisterResponse {
            message: Some("User registered".to_string()),
            error: None,
        })
    }
}

pub fn engine_with(backend: Arc<FakeBackend>, session: Arc<MemorySession>) -> Arc<Engine> {
    let session: Arc<dyn SessionProvider> = session;
    Arc::new(
        Engine::builder()
            .backend(backend)
            .session(session)
            .build()
            .unwrap(),
    )
}

pub fn logged_in() -> (Arc<Engine>, Arc<FakeBackend>, Arc<MemorySession>) {
    let backend = Arc::new(FakeBackend::default());
    let session = Arc::new(MemorySession::with_token("secret"));
    let engine = engine_with(backend.clone(), session.clone());
    (engine, backend, session)
}
