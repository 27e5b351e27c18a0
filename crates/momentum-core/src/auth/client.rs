//! Remote identity client.
//!
//! Speaks the password-grant REST surface of a GoTrue-style identity
//! service: `/auth/v1/signup`, `/auth/v1/token?grant_type=password`,
//! `/auth/v1/logout`, `/auth/v1/user`. The public anon key accompanies
//! every request; user tokens ride in the Authorization header.

use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{IdentityService, Session, User};
use crate::error::AuthError;
use crate::storage::AuthConfig;

/// HTTP client for the identity service.
#[derive(Debug)]
pub struct RemoteIdentity {
    http: Client,
    base_url: Url,
    anon_key: String,
}

/// Error body shape used by the service. Field names vary by endpoint.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    fn message(&self) -> String {
        self.error_description
            .clone()
            .or_else(|| self.msg.clone())
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

/// Signup replies omit the token when email confirmation is pending.
#[derive(Debug, Deserialize)]
struct SignupReply {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    user: Option<User>,
    // Confirmation-pending replies are a bare user object.
    #[serde(default)]
    id: Option<String>,
}

impl RemoteIdentity {
    /// Build a client for an explicit endpoint. Used directly by tests.
    ///
    /// # Errors
    /// Returns an error if `base_url` is not a valid URL.
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self, AuthError> {
        Ok(Self {
            http: Client::new(),
            base_url: Url::parse(base_url)?,
            anon_key: anon_key.to_string(),
        })
    }

    /// Build a client from configuration.
    ///
    /// # Errors
    /// Returns [`AuthError::NotConfigured`] unless the config carries an
    /// https endpoint and an anon key.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        if !config.is_configured() {
            return Err(AuthError::NotConfigured);
        }
        // is_configured guarantees both fields.
        let base_url = config.base_url.as_deref().unwrap_or_default();
        let anon_key = config.anon_key.as_deref().unwrap_or_default();
        Self::new(base_url, anon_key)
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        Ok(self.base_url.join(path)?)
    }

    fn block_on<F: std::future::Future>(fut: F) -> Result<F::Output, AuthError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(AuthError::Runtime)?;
        Ok(rt.block_on(fut))
    }

    async fn reject(resp: reqwest::Response) -> AuthError {
        let status = resp.status().as_u16();
        let body: ErrorBody = resp.json().await.unwrap_or_default();
        let message = body.message();
        let code = body.error_code.unwrap_or_default();
        if code == "email_not_confirmed" || message.contains("email_not_confirmed") {
            AuthError::EmailNotConfirmed
        } else {
            AuthError::Rejected { status, message }
        }
    }

    async fn password_grant(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let mut url = self.endpoint("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let resp = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::reject(resp).await);
        }
        Ok(resp.json::<Session>().await?)
    }

    async fn signup(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let url = self.endpoint("auth/v1/signup")?;
        let resp = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::reject(resp).await);
        }

        let reply: SignupReply = resp.json().await?;
        match (reply.access_token, reply.user, reply.id) {
            (Some(access_token), Some(user), _) => Ok(Session {
                access_token,
                refresh_token: reply.refresh_token,
                user,
            }),
            // Account created but no session issued yet.
            _ => Err(AuthError::EmailNotConfirmed),
        }
    }

    async fn logout(&self, access_token: &str) -> Result<(), AuthError> {
        let url = self.endpoint("auth/v1/logout")?;
        let resp = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::reject(resp).await);
        }
        Ok(())
    }

    async fn fetch_user(&self, access_token: &str) -> Result<User, AuthError> {
        let url = self.endpoint("auth/v1/user")?;
        let resp = self
            .http
            .get(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::reject(resp).await);
        }
        Ok(resp.json::<User>().await?)
    }
}

impl IdentityService for RemoteIdentity {
    fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        Self::block_on(self.signup(email, password))?
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        Self::block_on(self.password_grant(email, password))?
    }

    fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        Self::block_on(self.logout(access_token))?
    }

    fn current_user(&self, access_token: &str) -> Result<User, AuthError> {
        Self::block_on(self.fetch_user(access_token))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_body() -> String {
        serde_json::json!({
            "access_token": "jwt-token",
            "refresh_token": "refresh",
            "user": { "id": "user-1", "email": "a@example.com" }
        })
        .to_string()
    }

    #[test]
    fn sign_in_parses_session() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/auth/v1/token")
            .match_query(mockito::Matcher::UrlEncoded(
                "grant_type".into(),
                "password".into(),
            ))
            .with_status(200)
            .with_body(session_body())
            .create();

        let client = RemoteIdentity::new(&server.url(), "anon").unwrap();
        let session = client.sign_in("a@example.com", "secret").unwrap();

        mock.assert();
        assert_eq!(session.access_token, "jwt-token");
        assert_eq!(session.user.email.as_deref(), Some("a@example.com"));
    }

    #[test]
    fn sign_in_maps_rejections() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/auth/v1/token")
            .match_query(mockito::Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error_description":"Invalid login credentials"}"#)
            .create();

        let client = RemoteIdentity::new(&server.url(), "anon").unwrap();
        let err = client.sign_in("a@example.com", "wrong").unwrap_err();

        match err {
            AuthError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("Invalid login"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unconfirmed_email_has_its_own_variant() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/auth/v1/token")
            .match_query(mockito::Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error_code":"email_not_confirmed","msg":"Email not confirmed"}"#)
            .create();

        let client = RemoteIdentity::new(&server.url(), "anon").unwrap();
        let err = client.sign_in("a@example.com", "secret").unwrap_err();
        assert!(matches!(err, AuthError::EmailNotConfirmed));
    }

    #[test]
    fn sign_up_without_session_reports_pending_confirmation() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/auth/v1/signup")
            .with_status(200)
            .with_body(r#"{"id":"user-1","email":"a@example.com"}"#)
            .create();

        let client = RemoteIdentity::new(&server.url(), "anon").unwrap();
        let err = client.sign_up("a@example.com", "secret").unwrap_err();
        assert!(matches!(err, AuthError::EmailNotConfirmed));
    }

    #[test]
    fn current_user_fetches_profile() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/auth/v1/user")
            .with_status(200)
            .with_body(r#"{"id":"user-1","email":"a@example.com"}"#)
            .create();

        let client = RemoteIdentity::new(&server.url(), "anon").unwrap();
        let user = client.current_user("jwt-token").unwrap();
        assert_eq!(user.id, "user-1");
    }

    #[test]
    fn from_config_requires_configuration() {
        let err = RemoteIdentity::from_config(&AuthConfig::default()).unwrap_err();
        assert!(matches!(err, AuthError::NotConfigured));
    }
}
