use api_types::{
    ErrorBody,
    auth::{Credentials, LoginResponse, Me, RegisterResponse},
    item::{Asset, AssetNew, Debt, DebtNew, ItemId, ItemKind, Stock, StockNew},
};
use async_trait::async_trait;
use engine::{Backend, EngineError, ResultEngine};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};

/// [`Backend`] over the REST API.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let req = self.client.request(method, self.url(path));
        match token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> ResultEngine<T> {
        let resp = send(self.request(Method::GET, path, token)).await?;
        if resp.status().is_success() {
            return read_json(resp).await;
        }
        Err(status_error(resp).await)
    }

    async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> ResultEngine<()> {
        let resp = send(self.request(Method::POST, path, token).json(body)).await?;
        if resp.status().is_success() {
            return Ok(());
        }
        Err(status_error(resp).await)
    }

    /// Reads the body whatever the status.
    async fn post_any<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ResultEngine<T> {
        let resp = send(self.request(Method::POST, path, None).json(body)).await?;
        read_json(resp).await
    }
}

async fn send(req: RequestBuilder) -> ResultEngine<Response> {
    req.send()
        .await
        .map_err(|err| EngineError::Transport(err.to_string()))
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> ResultEngine<T> {
    let bytes = resp
        .bytes()
        .await
        .map_err(|err| EngineError::Transport(err.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|err| EngineError::Decode(err.to_string()))
}

async fn status_error(resp: Response) -> EngineError {
    let status = resp.status().as_u16();
    let message = match resp.json::<ErrorBody>().await {
        Ok(err) => err.error,
        Err(_) => "server error".to_string(),
    };
    EngineError::Status { status, message }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_assets(&self, token: Option<&str>) -> ResultEngine<Vec<Asset>> {
        self.get_json(ItemKind::Asset.collection(), token).await
    }

    async fn list_debts(&self, token: Option<&str>) -> ResultEngine<Vec<Debt>> {
        self.get_json(ItemKind::Debt.collection(), token).await
    }

    async fn list_stocks(&self, token: Option<&str>) -> ResultEngine<Vec<Stock>> {
        self.get_json(ItemKind::Stock.collection(), token).await
    }

    async fn create_asset(&self, token: Option<&str>, payload: &AssetNew) -> ResultEngine<()> {
        self.post_unit(ItemKind::Asset.collection(), token, payload)
            .await
    }

    async fn create_debt(&self, token: Option<&str>, payload: &DebtNew) -> ResultEngine<()> {
        self.post_unit(ItemKind::Debt.collection(), token, payload)
            .await
    }

    async fn create_stock(&self, token: Option<&str>, payload: &StockNew) -> ResultEngine<()> {
        self.post_unit(ItemKind::Stock.collection(), token, payload)
            .await
    }

    async fn delete_item(
        &self,
        token: Option<&str>,
        kind: ItemKind,
        id: &ItemId,
    ) -> ResultEngine<()> {
        let path = format!("{}/{}", kind.collection(), id);
        let resp = send(self.request(Method::DELETE, &path, token)).await?;
        if resp.status().is_success() {
            return Ok(());
        }
        Err(status_error(resp).await)
    }

    async fn current_user(&self, token: &str) -> ResultEngine<Option<Me>> {
        let resp = send(self.request(Method::GET, "auth/me", Some(token))).await?;
        if !resp.status().is_success() {
            tracing::debug!("auth/me answered {}", resp.status());
            return Ok(None);
        }
        read_json(resp).await.map(Some)
    }

    async fn login(&self, credentials: &Credentials) -> ResultEngine<LoginResponse> {
        self.post_any("auth/login", credentials).await
    }

    async fn register(&self, credentials: &Credentials) -> ResultEngine<RegisterResponse> {
        self.post_any("auth/register", credentials).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json, Router,
        extract::{Path, State},
        http::{HeaderMap, StatusCode, header::AUTHORIZATION},
        response::IntoResponse,
        routing::{delete, get, post},
    };
    use serde_json::{Value, json};

    use super::*;

    type Seen = Arc<Mutex<Vec<Option<String>>>>;

    fn record(seen: &Seen, headers: &HeaderMap) {
        let auth = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        seen.lock().unwrap().push(auth);
    }

    async fn assets(State(seen): State<Seen>, headers: HeaderMap) -> Json<Value> {
        record(&seen, &headers);
        Json(json!([
            {"_id": "a1", "name": "House", "value": 300000, "user": "u1"},
            {"_id": "a2", "name": "Car", "value": 12500.5, "user": "u1"}
        ]))
    }

    async fn create_asset(
        State(seen): State<Seen>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> impl IntoResponse {
        record(&seen, &headers);
        let mut created = body;
        created["_id"] = json!("a3");
        (StatusCode::CREATED, Json(created))
    }

    async fn debts() -> impl IntoResponse {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "database unavailable"})),
        )
    }

    async fn create_debt() -> impl IntoResponse {
        (StatusCode::BAD_GATEWAY, "upstream exploded")
    }

    async fn stocks() -> impl IntoResponse {
        (StatusCode::OK, "<html>not json</html>")
    }

    async fn delete_asset(Path(id): Path<String>) -> impl IntoResponse {
        if id == "a1" {
            return (StatusCode::OK, Json(json!({"message": "Asset deleted"})));
        }
        (StatusCode::NOT_FOUND, Json(json!({"error": "Asset not found"})))
    }

    async fn me(headers: HeaderMap) -> impl IntoResponse {
        let auth = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
        if auth == Some("Bearer good") {
            return (StatusCode::OK, Json(json!({"username": "alice"})));
        }
        (StatusCode::UNAUTHORIZED, Json(json!({"error": "Invalid token"})))
    }

    async fn login(Json(body): Json<Value>) -> impl IntoResponse {
        if body["password"] == "hunter2" {
            return (StatusCode::OK, Json(json!({"token": "good"})));
        }
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Invalid credentials"})),
        )
    }

    async fn register(Json(body): Json<Value>) -> impl IntoResponse {
        if body["email"] == "taken@example.com" {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "User already exists"})),
            );
        }
        (StatusCode::CREATED, Json(json!({"message": "User registered"})))
    }

    async fn spawn_mock() -> (HttpBackend, Seen) {
        let seen: Seen = Arc::default();
        let router = Router::new()
            .route("/api/assets", get(assets).post(create_asset))
            .route("/api/assets/{id}", delete(delete_asset))
            .route("/api/debts", get(debts).post(create_debt))
            .route("/api/stocks", get(stocks))
            .route("/api/auth/me", get(me))
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let backend = HttpBackend::new(Client::new(), format!("http://{addr}/api/"));
        (backend, seen)
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn url_joins_without_double_slash() {
        let backend = HttpBackend::new(Client::new(), "http://host/api/".to_string());
        assert_eq!(backend.url("/assets"), "http://host/api/assets");
        let backend = HttpBackend::new(Client::new(), "http://host/api".to_string());
        assert_eq!(backend.url("auth/me"), "http://host/api/auth/me");
    }

    #[tokio::test]
    async fn lists_assets_with_bearer_only_when_present() {
        let (backend, seen) = spawn_mock().await;

        let assets = backend.list_assets(Some("good")).await.unwrap();
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[0].id.as_str(), "a1");
        assert_eq!(assets[1].value, 12500.5);

        backend.list_assets(None).await.unwrap();
        let seen = seen.lock().unwrap().clone();
        assert_eq!(seen, vec![Some("Bearer good".to_string()), None]);
    }

    #[tokio::test]
    async fn non_success_status_carries_error_body() {
        let (backend, _) = spawn_mock().await;

        let err = backend.list_debts(None).await.unwrap_err();
        assert_eq!(
            err,
            EngineError::Status {
                status: 500,
                message: "database unavailable".to_string()
            }
        );

        let payload = DebtNew {
            name: "Loan".to_string(),
            value: 10.0,
        };
        let err = backend.create_debt(None, &payload).await.unwrap_err();
        assert_eq!(
            err,
            EngineError::Status {
                status: 502,
                message: "server error".to_string()
            }
        );
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let (backend, _) = spawn_mock().await;
        let err = backend.list_stocks(None).await.unwrap_err();
        assert!(matches!(err, EngineError::Decode(_)));
    }

    #[tokio::test]
    async fn create_and_delete_report_status() {
        let (backend, seen) = spawn_mock().await;

        let payload = AssetNew {
            name: "Boat".to_string(),
            value: 5000.0,
        };
        backend.create_asset(Some("good"), &payload).await.unwrap();
        assert_eq!(
            seen.lock().unwrap().last().cloned().flatten().as_deref(),
            Some("Bearer good")
        );

        backend
            .delete_item(None, ItemKind::Asset, &ItemId::new("a1"))
            .await
            .unwrap();
        let err = backend
            .delete_item(None, ItemKind::Asset, &ItemId::new("zz"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::Status {
                status: 404,
                message: "Asset not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn current_user_is_none_on_rejection() {
        let (backend, _) = spawn_mock().await;
        let me = backend.current_user("good").await.unwrap();
        assert_eq!(me.map(|me| me.username).as_deref(), Some("alice"));
        assert!(backend.current_user("bad").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn login_and_register_read_body_on_any_status() {
        let (backend, _) = spawn_mock().await;

        let ok = backend
            .login(&credentials("alice@example.com", "hunter2"))
            .await
            .unwrap();
        assert_eq!(ok.token.as_deref(), Some("good"));

        let rejected = backend
            .login(&credentials("alice@example.com", "nope"))
            .await
            .unwrap();
        assert_eq!(rejected.token, None);
        assert_eq!(rejected.error.as_deref(), Some("Invalid credentials"));

        let created = backend
            .register(&credentials("new@example.com", "pw"))
            .await
            .unwrap();
        assert_eq!(created.message.as_deref(), Some("User registered"));

        let taken = backend
            .register(&credentials("taken@example.com", "pw"))
            .await
            .unwrap();
        assert_eq!(taken.error.as_deref(), Some("User already exists"));
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = HttpBackend::new(Client::new(), format!("http://{addr}/api"));
        let err = backend.list_assets(None).await.unwrap_err();
        assert!(matches!(err, EngineError::Transport(_)));
    }
}
