use std::time::{Duration, Instant};

use crate::config::Config;
use crate::models::{Category, LoginRequest, MovieId, Section, SignupRequest, UserProfile};
use crate::services::{Catalog, GenreGroup, Library, ToggleOutcome};

use super::auth_client::{AuthClientError, AuthProvider, Credentials};
use super::flags::{FlagStore, MemoryFlags, AUTH_MODE, REMEMBERED_EMAIL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Auth,
    /// Authenticated area with the navigation bar
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Wishlist,
    Watched,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    pub fn as_flag(self) -> &'static str {
        match self {
            AuthMode::Login => "login",
            AuthMode::Signup => "signup",
        }
    }

    /// Anything but "signup" opens the login form
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("signup") => AuthMode::Signup,
            _ => AuthMode::Login,
        }
    }
}

/// Fields of the auth form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub remember_me: bool,
}

impl AuthForm {
    fn credentials(&self) -> Credentials {
        match self.mode {
            AuthMode::Login => Credentials::Login(LoginRequest {
                email: self.email.clone(),
                password: self.password.clone(),
            }),
            AuthMode::Signup => Credentials::Signup(SignupRequest {
                name: self.name.clone(),
                email: self.email.clone(),
                phone: self.phone.clone(),
                password: self.password.clone(),
            }),
        }
    }
}

/// Client-side application state: which screen is up, the auth form and the
/// user's browsing library. Every transition is a synchronous method call
/// except [`AppShell::submit`], the one network round trip.
pub struct AppShell<F: FlagStore = MemoryFlags> {
    flags: F,
    catalog: &'static Catalog,
    welcome_banner: Duration,
    screen: Screen,
    page: Page,
    form: AuthForm,
    message: Option<String>,
    user: Option<UserProfile>,
    library: Library,
    banner_since: Option<Instant>,
}

impl<F: FlagStore> AppShell<F> {
    pub fn new(flags: F, config: &Config) -> Self {
        let mut shell = Self {
            flags,
            catalog: Catalog::builtin(),
            welcome_banner: config.welcome_banner(),
            screen: Screen::Welcome,
            page: Page::Home,
            form: AuthForm::default(),
            message: None,
            user: None,
            library: Library::new(),
            banner_since: None,
        };
        shell.reset();
        shell
    }

    fn reset(&mut self) {
        self.screen = Screen::Welcome;
        self.page = Page::Home;
        self.form = AuthForm {
            email: self.flags.get(REMEMBERED_EMAIL).unwrap_or_default(),
            ..AuthForm::default()
        };
        self.message = None;
        self.user = None;
        self.library = Library::new();
        self.banner_since = None;
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn form(&self) -> &AuthForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut AuthForm {
        &mut self.form
    }

    /// Last message from the account service, success or failure
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.screen == Screen::Main
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Leaves the welcome page towards the requested auth form
    pub fn get_started(&mut self, mode: AuthMode) {
        self.flags.set(AUTH_MODE, mode.as_flag());
        self.open_auth();
    }

    /// Shows the auth screen. The requested mode is consumed on the way in.
    pub fn open_auth(&mut self) {
        self.form.mode = AuthMode::from_flag(self.flags.take(AUTH_MODE).as_deref());
        self.screen = Screen::Auth;
    }

    pub fn switch_auth_mode(&mut self) {
        self.form.mode = match self.form.mode {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        };
        self.message = None;
    }

    /// Sends the auth form. On success the main screen opens with the welcome
    /// banner armed at `now`; on failure the screen stays and the error
    /// becomes the displayed message.
    pub async fn submit(
        &mut self,
        provider: &dyn AuthProvider,
        now: Instant,
    ) -> Result<(), AuthClientError> {
        let credentials = self.form.credentials();

        match provider.authenticate(&credentials).await {
            Ok(outcome) => {
                if self.form.mode == AuthMode::Login && self.form.remember_me {
                    self.flags.set(REMEMBERED_EMAIL, &self.form.email);
                }
                self.message = Some(outcome.message);
                self.user = outcome.user;
                self.library = Library::new();
                self.screen = Screen::Main;
                self.page = Page::Home;
                self.banner_since = Some(now);
                tracing::info!(email = %credentials.email(), "Session established");
                Ok(())
            }
            Err(e) => {
                self.message = Some(e.display_message());
                tracing::info!(error = %e, "Authentication failed");
                Err(e)
            }
        }
    }

    /// Whether the welcome banner shows at `now`. Once the delay has passed
    /// the banner is dismissed for good.
    pub fn welcome_banner_visible(&mut self, now: Instant) -> bool {
        let Some(since) = self.banner_since else {
            return false;
        };
        if now.saturating_duration_since(since) >= self.welcome_banner {
            self.banner_since = None;
            return false;
        }
        self.screen == Screen::Main && self.page == Page::Home
    }

    pub fn navigate(&mut self, page: Page) {
        if self.is_authenticated() {
            self.page = page;
        }
    }

    pub fn set_category(&mut self, category: Category) {
        self.library.set_category(category);
    }

    pub fn like(&mut self, movie_id: MovieId) {
        self.library.like(movie_id);
    }

    pub fn dislike(&mut self, movie_id: MovieId) {
        self.library.dislike(movie_id);
    }

    /// `None` when the id is not in the catalog
    pub fn toggle_wishlist(&mut self, movie_id: &MovieId) -> Option<ToggleOutcome> {
        let movie = self.catalog.get(movie_id)?;
        Some(self.library.toggle_wishlist(movie))
    }

    /// `None` when the id is not in the catalog
    pub fn toggle_watched(&mut self, movie_id: &MovieId) -> Option<ToggleOutcome> {
        let movie = self.catalog.get(movie_id)?;
        Some(self.library.toggle_watched(movie))
    }

    pub fn sections(&self) -> Vec<Section> {
        self.library.sections(self.catalog)
    }

    pub fn wishlist_by_genre(&self) -> Vec<GenreGroup> {
        self.library.wishlist_by_genre()
    }

    pub fn watched_by_genre(&self) -> Vec<GenreGroup> {
        self.library.watched_by_genre()
    }

    /// Forgets the remembered email and returns to a freshly started state
    pub fn sign_out(&mut self) {
        self.flags.remove(REMEMBERED_EMAIL);
        tracing::info!("Signed out");
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::auth_client::{AuthOutcome, MockAuthProvider, GENERIC_ERROR};
    use crate::models::SectionKind;

    fn shell() -> AppShell<MemoryFlags> {
        AppShell::new(MemoryFlags::new(), &Config::default())
    }

    fn accepting_provider() -> MockAuthProvider {
        let mut provider = MockAuthProvider::new();
        provider.expect_authenticate().returning(|_| {
            Ok(AuthOutcome {
                message: "Login successful.".to_string(),
                user: Some(UserProfile {
                    name: "Jane".to_string(),
                    email: "jane@gmail.com".to_string(),
                    phone: "1234567890".to_string(),
                }),
            })
        });
        provider
    }

    async fn logged_in(now: Instant) -> AppShell<MemoryFlags> {
        let mut shell = shell();
        shell.get_started(AuthMode::Login);
        shell.form_mut().email = "jane@gmail.com".to_string();
        shell.form_mut().password = "Secret1234".to_string();
        shell.submit(&accepting_provider(), now).await.unwrap();
        shell
    }

    #[test]
    fn test_starts_on_welcome() {
        let shell = shell();
        assert_eq!(shell.screen(), Screen::Welcome);
        assert!(!shell.is_authenticated());
    }

    #[test]
    fn test_auth_mode_flag_is_read_once() {
        let flags = MemoryFlags::new();
        let mut shell = AppShell::new(flags.clone(), &Config::default());

        shell.get_started(AuthMode::Signup);
        assert_eq!(shell.screen(), Screen::Auth);
        assert_eq!(shell.form().mode, AuthMode::Signup);
        assert_eq!(flags.get(AUTH_MODE), None);

        // Without a fresh flag the form falls back to login
        shell.open_auth();
        assert_eq!(shell.form().mode, AuthMode::Login);
    }

    #[tokio::test]
    async fn test_successful_login_opens_home_with_banner() {
        let now = Instant::now();
        let mut shell = logged_in(now).await;

        assert!(shell.is_authenticated());
        assert_eq!(shell.page(), Page::Home);
        assert_eq!(shell.message(), Some("Login successful."));
        assert_eq!(shell.user().unwrap().name, "Jane");

        assert!(shell.welcome_banner_visible(now + Duration::from_millis(2999)));
        assert!(!shell.welcome_banner_visible(now + Duration::from_millis(3000)));
        // Dismissed for good
        assert!(!shell.welcome_banner_visible(now));
    }

    #[tokio::test]
    async fn test_banner_hidden_off_home() {
        let now = Instant::now();
        let mut shell = logged_in(now).await;
        shell.navigate(Page::Wishlist);
        assert!(!shell.welcome_banner_visible(now));
        shell.navigate(Page::Home);
        assert!(shell.welcome_banner_visible(now));
    }

    #[tokio::test]
    async fn test_failed_login_stays_on_auth_and_can_retry() {
        let mut provider = MockAuthProvider::new();
        let mut attempts = 0;
        provider.expect_authenticate().times(2).returning(move |_| {
            attempts += 1;
            if attempts == 1 {
                Err(AuthClientError::Transport("connection refused".to_string()))
            } else {
                Err(AuthClientError::Rejected {
                    status: 401,
                    message: "Invalid password.".to_string(),
                })
            }
        });

        let mut shell = shell();
        shell.open_auth();

        assert!(shell.submit(&provider, Instant::now()).await.is_err());
        assert_eq!(shell.screen(), Screen::Auth);
        assert_eq!(shell.message(), Some(GENERIC_ERROR));

        assert!(shell.submit(&provider, Instant::now()).await.is_err());
        assert_eq!(shell.message(), Some("Invalid password."));
        assert!(!shell.is_authenticated());
    }

    #[tokio::test]
    async fn test_signup_form_sends_signup_credentials() {
        let mut provider = MockAuthProvider::new();
        provider
            .expect_authenticate()
            .withf(|c| matches!(c, Credentials::Signup(r) if r.phone == "1234567890"))
            .times(1)
            .returning(|_| {
                Ok(AuthOutcome {
                    message: "User registered successfully.".to_string(),
                    user: None,
                })
            });

        let mut shell = shell();
        shell.get_started(AuthMode::Signup);
        shell.form_mut().phone = "1234567890".to_string();
        shell.submit(&provider, Instant::now()).await.unwrap();
        assert!(shell.is_authenticated());
        assert!(shell.user().is_none());
    }

    #[test]
    fn test_remember_me_prefills_next_start_and_sign_out_forgets() {
        let flags = MemoryFlags::new();
        let mut shell = AppShell::new(flags.clone(), &Config::default());
        shell.get_started(AuthMode::Login);
        shell.form_mut().email = "jane@gmail.com".to_string();
        shell.form_mut().remember_me = true;
        tokio_test::block_on(shell.submit(&accepting_provider(), Instant::now())).unwrap();

        let restarted = AppShell::new(flags.clone(), &Config::default());
        assert_eq!(restarted.form().email, "jane@gmail.com");

        shell.sign_out();
        assert_eq!(shell.screen(), Screen::Welcome);
        assert_eq!(shell.form().email, "");
        assert_eq!(flags.get(REMEMBERED_EMAIL), None);
    }

    #[tokio::test]
    async fn test_browsing_flow() {
        let mut shell = logged_in(Instant::now()).await;

        let kinds: Vec<SectionKind> = shell.sections().iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::Trending,
                SectionKind::Personalized,
                SectionKind::NewReleases
            ]
        );

        shell.like(MovieId::from("1"));
        let recommended = shell
            .sections()
            .into_iter()
            .find(|s| s.kind == SectionKind::Recommended)
            .unwrap();
        assert!(recommended.movies.iter().any(|m| m.id.as_str() == "2"));

        assert_eq!(
            shell.toggle_wishlist(&MovieId::from("2")),
            Some(ToggleOutcome::Added)
        );
        let wishlist = shell.wishlist_by_genre();
        assert!(!wishlist.is_empty());
        assert!(wishlist.iter().all(|g| g.movies[0].id.as_str() == "2"));
        assert_eq!(shell.toggle_watched(&MovieId::from("99")), None);
        shell.toggle_watched(&MovieId::from("4"));
        assert_eq!(shell.watched_by_genre()[0].genre, "Drama");

        shell.sign_out();
        assert!(shell.library().wishlist.is_empty());
        assert_eq!(shell.library().preferences.liked().count(), 0);
    }

    #[test]
    fn test_navigation_requires_authentication() {
        let mut shell = shell();
        shell.navigate(Page::Profile);
        assert_eq!(shell.page(), Page::Home);
    }

    #[tokio::test]
    async fn test_login_against_configured_account_service() {
        use crate::client::HttpAuthClient;
        use serde_json::json;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "Login successful.",
                "user": {"name": "Jane", "email": "jane@gmail.com", "phone": "1234567890"}
            })))
            .mount(&server)
            .await;

        let config = Config {
            auth_service_url: server.uri(),
            ..Config::default()
        };
        let client = HttpAuthClient::from_config(&config);
        let mut shell = AppShell::new(MemoryFlags::new(), &config);
        shell.open_auth();
        shell.form_mut().email = "jane@gmail.com".to_string();
        shell.form_mut().password = "Secret1234".to_string();

        shell.submit(&client, Instant::now()).await.unwrap();
        assert!(shell.is_authenticated());
        assert_eq!(shell.user().unwrap().email, "jane@gmail.com");
    }
}
