//! HTTP client for the account service
//!
//! Posts credentials as JSON to `{base}/login` or `{base}/signup`. A success
//! carries a `message`; any failure is reduced to one displayable string,
//! taken from the response's `error` field when there is one.

use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::config::Config;
use crate::models::{LoginRequest, SignupRequest, UserProfile};

/// Shown when the service gives no usable error message
pub const GENERIC_ERROR: &str = "An error occurred.";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthClientError {
    /// The service answered with a non-success status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a readable response
    #[error("An error occurred.")]
    Transport(String),
}

impl AuthClientError {
    /// The text to put in front of the user
    pub fn display_message(&self) -> String {
        self.to_string()
    }
}

/// Result of a successful login or signup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub message: String,
    /// Present on login
    pub user: Option<UserProfile>,
}

/// Credentials submitted from the auth screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Login(LoginRequest),
    Signup(SignupRequest),
}

impl Credentials {
    pub fn endpoint(&self) -> &'static str {
        match self {
            Credentials::Login(_) => "/login",
            Credentials::Signup(_) => "/signup",
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Credentials::Login(request) => &request.email,
            Credentials::Signup(request) => &request.email,
        }
    }
}

/// Trait for account services the app shell can authenticate against
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait AuthProvider: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthOutcome, AuthClientError>;
}

#[derive(Debug, Deserialize)]
struct SuccessBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    user: Option<UserProfile>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Clone)]
pub struct HttpAuthClient {
    http_client: HttpClient,
    base_url: String,
}

impl HttpAuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Client for the account service at `AUTH_SERVICE_URL`
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.auth_service_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, credentials: &Credentials) -> String {
        format!("{}{}", self.base_url, credentials.endpoint())
    }
}

#[async_trait::async_trait]
impl AuthProvider for HttpAuthClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthOutcome, AuthClientError> {
        let url = self.url(credentials);
        let request = self.http_client.post(&url);
        let request = match credentials {
            Credentials::Login(payload) => request.json(payload),
            Credentials::Signup(payload) => request.json(payload),
        };

        let response = request.send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Account service unreachable");
            AuthClientError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| GENERIC_ERROR.to_string());
            tracing::info!(url = %url, status = %status, message = %message, "Account request rejected");
            return Err(AuthClientError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: SuccessBody = response
            .json()
            .await
            .map_err(|e| AuthClientError::Transport(e.to_string()))?;

        tracing::info!(url = %url, email = %credentials.email(), "Account request accepted");

        Ok(AuthOutcome {
            message: body.message.unwrap_or_default(),
            user: body.user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn login() -> Credentials {
        Credentials::Login(LoginRequest {
            email: "jane@gmail.com".to_string(),
            password: "Secret1234".to_string(),
        })
    }

    #[tokio::test]
    async fn test_login_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .and(body_json(json!({"email": "jane@gmail.com", "password": "Secret1234"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Login successful.",
                "user": {"name": "Jane", "email": "jane@gmail.com", "phone": "1234567890"}
            })))
            .mount(&server)
            .await;

        let client = HttpAuthClient::new(server.uri());
        let outcome = client.authenticate(&login()).await.unwrap();
        assert_eq!(outcome.message, "Login successful.");
        assert_eq!(outcome.user.unwrap().name, "Jane");
    }

    #[tokio::test]
    async fn test_signup_posts_full_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/signup"))
            .and(body_json(json!({
                "name": "Jane",
                "email": "jane@gmail.com",
                "phone": "1234567890",
                "password": "Secret1234"
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"message": "User registered successfully."})),
            )
            .mount(&server)
            .await;

        let client = HttpAuthClient::new(format!("{}/", server.uri()));
        let outcome = client
            .authenticate(&Credentials::Signup(SignupRequest {
                name: "Jane".to_string(),
                email: "jane@gmail.com".to_string(),
                phone: "1234567890".to_string(),
                password: "Secret1234".to_string(),
            }))
            .await
            .unwrap();
        assert_eq!(outcome.message, "User registered successfully.");
        assert!(outcome.user.is_none());
    }

    #[tokio::test]
    async fn test_rejection_surfaces_error_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid password."})))
            .mount(&server)
            .await;

        let error = HttpAuthClient::new(server.uri())
            .authenticate(&login())
            .await
            .unwrap_err();
        assert_eq!(
            error,
            AuthClientError::Rejected {
                status: 401,
                message: "Invalid password.".to_string()
            }
        );
        assert_eq!(error.display_message(), "Invalid password.");
    }

    #[tokio::test]
    async fn test_rejection_without_body_uses_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;

        let error = HttpAuthClient::new(server.uri())
            .authenticate(&login())
            .await
            .unwrap_err();
        assert_eq!(error.display_message(), GENERIC_ERROR);
    }

    #[tokio::test]
    async fn test_empty_error_field_uses_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": ""})))
            .mount(&server)
            .await;

        let error = HttpAuthClient::new(server.uri())
            .authenticate(&login())
            .await
            .unwrap_err();
        assert_eq!(
            error,
            AuthClientError::Rejected {
                status: 400,
                message: GENERIC_ERROR.to_string()
            }
        );
    }

    #[test]
    fn test_from_config_uses_auth_service_url() {
        let config = Config {
            auth_service_url: "http://auth.local:5000/".to_string(),
            ..Config::default()
        };
        let client = HttpAuthClient::from_config(&config);
        assert_eq!(client.base_url(), "http://auth.local:5000");
        assert_eq!(client.url(&login()), "http://auth.local:5000/login");
    }

    #[tokio::test]
    async fn test_unreachable_service_uses_generic_message() {
        // Nothing listens on port 1
        let error = HttpAuthClient::new("http://127.0.0.1:1")
            .authenticate(&login())
            .await
            .unwrap_err();
        assert!(matches!(error, AuthClientError::Transport(_)));
        assert_eq!(error.display_message(), GENERIC_ERROR);
    }
}
