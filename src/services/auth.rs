//! Account registration and login
//!
//! Accounts live in a [`UserStore`]. Only the in-memory store ships; accounts
//! vanish on restart.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use regex::Regex;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{LoginRequest, MessageResponse, SignupRequest, User, UserProfile},
};

pub const INVALID_EMAIL: &str = "Invalid email. Only gmail, hotmail, and yahoo allowed.";
pub const INVALID_PASSWORD_FORMAT: &str =
    "Password must be at least 9 characters with 1 uppercase, 1 lowercase, and 1 number.";
pub const INVALID_PHONE: &str = "Phone must be 10 to 15 digits.";
pub const USER_EXISTS: &str = "User already exists.";
pub const USER_NOT_FOUND: &str = "User not found.";
pub const WRONG_PASSWORD: &str = "Invalid password.";
pub const SIGNUP_OK: &str = "User registered successfully.";
pub const LOGIN_OK: &str = "Login successful.";

const MIN_PASSWORD_LEN: usize = 9;

/// Storage for registered accounts, keyed by email
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Inserts a new account. Returns `false` if the email is taken.
    async fn insert(&self, user: User) -> AppResult<bool>;
}

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn insert(&self, user: User) -> AppResult<bool> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Ok(false);
        }
        users.insert(user.email.clone(), user);
        Ok(true)
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[\w.-]+@(gmail|hotmail|yahoo)\.com$").expect("email pattern is valid")
    })
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{10,15}$").expect("phone pattern is valid"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// At least 9 ASCII letters or digits with one lowercase, one uppercase and
/// one digit
pub fn is_valid_password(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LEN
        && password.chars().all(|c| c.is_ascii_alphanumeric())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

pub fn is_valid_phone(phone: &str) -> bool {
    phone_pattern().is_match(phone)
}

/// Checks a signup payload, reporting the first failing rule
pub fn validate_signup(request: &SignupRequest) -> AppResult<()> {
    if !is_valid_email(&request.email) {
        return Err(AppError::InvalidInput(INVALID_EMAIL.to_string()));
    }
    if !is_valid_password(&request.password) {
        return Err(AppError::InvalidInput(INVALID_PASSWORD_FORMAT.to_string()));
    }
    if !is_valid_phone(&request.phone) {
        return Err(AppError::InvalidInput(INVALID_PHONE.to_string()));
    }
    Ok(())
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

fn verify_password(password: &str, stored_hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::Internal(format!("Stored password hash is invalid: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Registers and authenticates accounts
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryUserStore::new()))
    }

    pub async fn signup(&self, request: SignupRequest) -> AppResult<MessageResponse> {
        validate_signup(&request)?;

        if self.store.find_by_email(&request.email).await?.is_some() {
            tracing::info!(email = %request.email, "Signup rejected, user exists");
            return Err(AppError::InvalidInput(USER_EXISTS.to_string()));
        }

        let user = User {
            name: request.name,
            email: request.email,
            phone: request.phone,
            password_hash: hash_password(&request.password)?,
        };
        let email = user.email.clone();

        // The store decides on races between two signups for the same email
        if !self.store.insert(user).await? {
            return Err(AppError::InvalidInput(USER_EXISTS.to_string()));
        }

        tracing::info!(email = %email, "User registered");

        Ok(MessageResponse {
            message: SIGNUP_OK.to_string(),
        })
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<UserProfile> {
        let user = self
            .store
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            tracing::info!(email = %request.email, "Login rejected, wrong password");
            return Err(AppError::Unauthorized(WRONG_PASSWORD.to_string()));
        }

        tracing::info!(email = %request.email, "User logged in");
        Ok(user.profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup_request() -> SignupRequest {
        SignupRequest {
            name: "Jane Doe".to_string(),
            email: "jane.doe@gmail.com".to_string(),
            phone: "1234567890".to_string(),
            password: "Secret1234".to_string(),
        }
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("jane.doe@gmail.com"));
        assert!(is_valid_email("j-d_1@yahoo.com"));
        assert!(is_valid_email("someone@hotmail.com"));
        assert!(!is_valid_email("someone@outlook.com"));
        assert!(!is_valid_email("someone@gmail.org"));
        assert!(!is_valid_email("@gmail.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_password_validation() {
        assert!(is_valid_password("Secret1234"));
        assert!(!is_valid_password("Secret12"));
        assert!(!is_valid_password("secret1234"));
        assert!(!is_valid_password("SECRET1234"));
        assert!(!is_valid_password("SecretPass"));
        assert!(!is_valid_password("Secret123!"));
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("1234567890"));
        assert!(is_valid_phone("123456789012345"));
        assert!(!is_valid_phone("123456789"));
        assert!(!is_valid_phone("1234567890123456"));
        assert!(!is_valid_phone("+1234567890"));
    }

    #[test]
    fn test_validation_reports_first_failure() {
        let mut request = signup_request();
        request.email = "bad".to_string();
        request.phone = "1".to_string();
        let error = validate_signup(&request).unwrap_err();
        assert_eq!(error.to_string(), INVALID_EMAIL);

        let mut request = signup_request();
        request.phone = "1".to_string();
        assert_eq!(validate_signup(&request).unwrap_err().to_string(), INVALID_PHONE);
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let service = AuthService::in_memory();
        let response = service.signup(signup_request()).await.unwrap();
        assert_eq!(response.message, SIGNUP_OK);

        let profile = service
            .login(LoginRequest {
                email: "jane.doe@gmail.com".to_string(),
                password: "Secret1234".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.phone, "1234567890");
    }

    #[tokio::test]
    async fn test_duplicate_signup_rejected() {
        let service = AuthService::in_memory();
        service.signup(signup_request()).await.unwrap();

        let error = service.signup(signup_request()).await.unwrap_err();
        assert!(matches!(error, AppError::InvalidInput(ref msg) if msg == USER_EXISTS));
    }

    #[tokio::test]
    async fn test_login_failures() {
        let service = AuthService::in_memory();
        service.signup(signup_request()).await.unwrap();

        let error = service
            .login(LoginRequest {
                email: "nobody@gmail.com".to_string(),
                password: "Secret1234".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::NotFound(_)));

        let error = service
            .login(LoginRequest {
                email: "jane.doe@gmail.com".to_string(),
                password: "Wrong12345".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_password_is_stored_hashed() {
        let store = Arc::new(InMemoryUserStore::new());
        let service = AuthService::new(store.clone());
        service.signup(signup_request()).await.unwrap();

        let stored = store
            .find_by_email("jane.doe@gmail.com")
            .await
            .unwrap()
            .unwrap();
        assert_ne!(stored.password_hash, "Secret1234");
        assert!(stored.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_insert_race_reports_existing_user() {
        let mut store = MockUserStore::new();
        store.expect_find_by_email().returning(|_| Ok(None));
        store.expect_insert().times(1).returning(|_| Ok(false));

        let service = AuthService::new(Arc::new(store));
        let error = service.signup(signup_request()).await.unwrap_err();
        assert_eq!(error.to_string(), USER_EXISTS);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut store = MockUserStore::new();
        store
            .expect_find_by_email()
            .returning(|_| Err(AppError::Internal("store offline".to_string())));

        let service = AuthService::new(Arc::new(store));
        let error = service
            .login(LoginRequest {
                email: "jane.doe@gmail.com".to_string(),
                password: "Secret1234".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(error, AppError::Internal(_)));
    }
}
