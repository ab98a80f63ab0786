use api_types::{
    auth::{Credentials, LoginResponse, Me, RegisterResponse},
    item::{Asset, AssetNew, Debt, DebtNew, ItemId, ItemKind, Stock, StockNew},
};
use async_trait::async_trait;

use crate::ResultEngine;

/// The backend REST surface the engine talks to.
///
/// `token` is the session's bearer credential; `None` means the request goes
/// out without an `Authorization` header.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn list_assets(&self, token: Option<&str>) -> ResultEngine<Vec<Asset>>;

    async fn list_debts(&self, token: Option<&str>) -> ResultEngine<Vec<Debt>>;

    async fn list_stocks(&self, token: Option<&str>) -> ResultEngine<Vec<Stock>>;

    async fn create_asset(&self, token: Option<&str>, payload: &AssetNew) -> ResultEngine<()>;

    async fn create_debt(&self, token: Option<&str>, payload: &DebtNew) -> ResultEngine<()>;

    async fn create_stock(&self, token: Option<&str>, payload: &StockNew) -> ResultEngine<()>;

    async fn delete_item(
        &self,
        token: Option<&str>,
        kind: ItemKind,
        id: &ItemId,
    ) -> ResultEngine<()>;

    /// `Ok(None)` when the backend answers with a non-success status.
    async fn current_user(&self, token: &str) -> ResultEngine<Option<Me>>;

    /// The body is returned whatever the status, it carries either a token
    /// or an error.
    async fn login(&self, credentials: &Credentials) -> ResultEngine<LoginResponse>;

    async fn register(&self, credentials: &Credentials) -> ResultEngine<RegisterResponse>;
}
