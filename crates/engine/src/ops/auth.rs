use api_types::auth::Credentials;

use crate::ResultEngine;

use super::Engine;

const LOGIN_FAILED: &str = "Login failed";
const REGISTER_FAILED: &str = "Registration failed";
const REGISTERED: &str = "Registration successful! Please log in.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    /// A token was stored in the session.
    LoggedIn,
    /// The account exists; carries the confirmation to show.
    Registered(String),
    /// Carries the backend's error text or a generic fallback.
    Failed(String),
}

fn credentials(email: &str, password: &str) -> Credentials {
    Credentials {
        email: email.to_string(),
        password: password.to_string(),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl Engine {
    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        let response = match self.backend.login(&credentials(email, password)).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!("login request failed: {err}");
                return AuthOutcome::Failed(LOGIN_FAILED.to_string());
            }
        };

        match non_empty(response.token) {
            Some(token) => match self.session.store_token(&token) {
                Ok(()) => {
                    tracing::info!("logged in");
                    AuthOutcome::LoggedIn
                }
                Err(err) => {
                    tracing::error!("failed to persist session: {err}");
                    AuthOutcome::Failed(LOGIN_FAILED.to_string())
                }
            },
            None => AuthOutcome::Failed(
                non_empty(response.error).unwrap_or_else(|| LOGIN_FAILED.to_string()),
            ),
        }
    }

    pub async fn register(&self, email: &str, password: &str) -> AuthOutcome {
        let response = match self.backend.register(&credentials(email, password)).await {
            Ok(response) => response,
            Err(err) => {
                tracing::error!("register request failed: {err}");
                return AuthOutcome::Failed(REGISTER_FAILED.to_string());
            }
        };

        if non_empty(response.message).is_some() {
            tracing::info!("registered new account");
            return AuthOutcome::Registered(REGISTERED.to_string());
        }
        AuthOutcome::Failed(non_empty(response.error).unwrap_or_else(|| REGISTER_FAILED.to_string()))
    }

    /// Destroys the session.
    pub fn logout(&self) -> ResultEngine<()> {
        tracing::info!("logging out");
        self.session.clear()
    }

    /// Username of the session owner, `None` without a session or when the
    /// backend does not recognise the token.
    pub async fn current_user(&self) -> Option<String> {
        let token = self.session.token()?;
        match self.backend.current_user(&token).await {
            Ok(me) => me.map(|me| me.username).filter(|name| !name.is_empty()),
            Err(err) => {
                tracing::error!("error fetching username: {err}");
                None
            }
        }
    }
}
