//! Central application state.
//!
//! `App` owns everything the render pass reads: the current route, form
//! buffers, the latest feed snapshot, detail state, and the status line.
//! Async work (auth calls, feed fetches) runs in spawned tasks that report
//! back over the [`AppEvent`] channel; the UI loop applies those events to
//! this state between frames.

use std::borrow::Cow;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::auth::{AuthClient, AuthError, SessionStore, UserCredential};
use crate::feed::{FeedError, FeedItem, FeedLoader, FeedSnapshot};
use crate::i18n::Language;
use crate::theme::{StyleMap, ThemeVariant};

/// How long a status message stays visible.
const STATUS_TTL: Duration = Duration::from_secs(3);

// ============================================================================
// Routes
// ============================================================================

/// The four screens. Register is reached from Login, Details from Listing;
/// `back` undoes exactly those edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Listing,
    Details(i64),
}

// ============================================================================
// Form State
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus_password: bool,
}

impl LoginForm {
    pub fn focus(&self) -> LoginField {
        if self.focus_password {
            LoginField::Password
        } else {
            LoginField::Email
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus_password = !self.focus_password;
    }

    pub fn push_char(&mut self, c: char) {
        match self.focus() {
            LoginField::Email => self.email.push(c),
            LoginField::Password => self.password.push(c),
        }
    }

    pub fn pop_char(&mut self) {
        match self.focus() {
            LoginField::Email => {
                self.email.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
        }
    }

    pub fn clear(&mut self) {
        self.email.clear();
        self.password.clear();
        self.focus_password = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Email,
    Password,
    Confirm,
}

#[derive(Debug, Default)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm: String,
    focus: u8,
}

impl RegisterForm {
    pub fn focus(&self) -> RegisterField {
        match self.focus {
            0 => RegisterField::Email,
            1 => RegisterField::Password,
            _ => RegisterField::Confirm,
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = (self.focus + 1) % 3;
    }

    fn active_buffer(&mut self) -> &mut String {
        match self.focus() {
            RegisterField::Email => &mut self.email,
            RegisterField::Password => &mut self.password,
            RegisterField::Confirm => &mut self.confirm,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.active_buffer().push(c);
    }

    pub fn pop_char(&mut self) {
        self.active_buffer().pop();
    }

    pub fn clear(&mut self) {
        self.email.clear();
        self.password.clear();
        self.confirm.clear();
        self.focus = 0;
    }
}

// ============================================================================
// Detail State
// ============================================================================

/// Lifecycle of the details screen for the currently opened post.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Idle,
    Loading,
    Loaded(FeedItem),
    Failed(String),
}

// ============================================================================
// Events
// ============================================================================

/// Completion notifications from spawned tasks back to the UI loop.
#[derive(Debug)]
pub enum AppEvent {
    SignInComplete(Result<UserCredential, AuthError>),
    SignUpComplete(Result<UserCredential, AuthError>),
    SignOutComplete,
    /// A feed fetch finished (successfully or not); re-snapshot and redraw.
    FeedUpdated(Result<(), FeedError>),
    DetailsLoaded(i64, Result<FeedItem, FeedError>),
}

// ============================================================================
// App
// ============================================================================

pub struct App {
    // Navigation
    pub route: Route,

    // Forms
    pub login: LoginForm,
    pub register: RegisterForm,
    /// A sign-in or sign-up call is running; submits are ignored until it
    /// reports back.
    pub auth_in_flight: bool,

    // Feed
    pub feed: FeedSnapshot,
    pub selected: usize,
    pub detail: DetailState,

    // Language modal
    pub lang_modal_open: bool,
    pub lang_modal_selected: usize,
    pub language: Language,

    // Chrome
    pub theme: ThemeVariant,
    pub styles: StyleMap,
    status: Option<(Cow<'static, str>, Instant)>,
    pub should_quit: bool,
    pub needs_redraw: bool,

    // Service handles, cloned into spawned tasks.
    pub feed_loader: FeedLoader,
    pub auth: AuthClient,
    pub session: SessionStore,
    pub events_tx: mpsc::UnboundedSender<AppEvent>,
}

impl App {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        start_route: Route,
        language: Language,
        theme: ThemeVariant,
        feed_loader: FeedLoader,
        auth: AuthClient,
        session: SessionStore,
        events_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let feed = feed_loader.snapshot();
        Self {
            route: start_route,
            login: LoginForm::default(),
            register: RegisterForm::default(),
            auth_in_flight: false,
            feed,
            selected: 0,
            detail: DetailState::Idle,
            lang_modal_open: false,
            lang_modal_selected: Language::ALL
                .iter()
                .position(|l| *l == language)
                .unwrap_or(0),
            language,
            theme,
            styles: StyleMap::from_palette(&theme.palette()),
            status: None,
            should_quit: false,
            needs_redraw: true,
            feed_loader,
            auth,
            session,
            events_tx,
        }
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(from = ?self.route, to = ?route, "Navigating");
        self.route = route;
        self.needs_redraw = true;
    }

    /// Undo one navigation edge. Register returns to Login, Details to
    /// Listing; Login and Listing are stack roots and stay put.
    pub fn back(&mut self) {
        match self.route {
            Route::Register => self.navigate(Route::Login),
            Route::Details(_) => {
                self.detail = DetailState::Idle;
                self.navigate(Route::Listing);
            }
            Route::Login | Route::Listing => {}
        }
    }

    /// Open details for the post at the current list selection.
    ///
    /// Details are always fetched fresh by id; the list row is only used to
    /// pick which id to open.
    pub fn open_selected(&mut self) -> Option<i64> {
        let id = self.feed.items.get(self.selected)?.id;
        self.detail = DetailState::Loading;
        self.navigate(Route::Details(id));
        Some(id)
    }

    // ------------------------------------------------------------------------
    // List Selection
    // ------------------------------------------------------------------------

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.feed.items.len() {
            self.selected += 1;
            self.needs_redraw = true;
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.needs_redraw = true;
        }
    }

    /// True when the selection sits on the last loaded row, i.e. scrolling
    /// further should fetch the next page.
    pub fn at_list_end(&self) -> bool {
        !self.feed.items.is_empty() && self.selected + 1 == self.feed.items.len()
    }

    /// Re-read the loader's state. Keeps the selection in bounds when a
    /// refresh shrank the list.
    pub fn sync_feed(&mut self) {
        self.feed = self.feed_loader.snapshot();
        if self.selected >= self.feed.items.len() {
            self.selected = self.feed.items.len().saturating_sub(1);
        }
        self.needs_redraw = true;
    }

    // ------------------------------------------------------------------------
    // Language Modal
    // ------------------------------------------------------------------------

    pub fn open_lang_modal(&mut self) {
        self.lang_modal_selected = Language::ALL
            .iter()
            .position(|l| *l == self.language)
            .unwrap_or(0);
        self.lang_modal_open = true;
        self.needs_redraw = true;
    }

    pub fn close_lang_modal(&mut self) {
        self.lang_modal_open = false;
        self.needs_redraw = true;
    }

    pub fn lang_modal_next(&mut self) {
        self.lang_modal_selected = (self.lang_modal_selected + 1) % Language::ALL.len();
        self.needs_redraw = true;
    }

    pub fn lang_modal_prev(&mut self) {
        self.lang_modal_selected =
            (self.lang_modal_selected + Language::ALL.len() - 1) % Language::ALL.len();
        self.needs_redraw = true;
    }

    /// Apply the highlighted language immediately. Persistence runs in the
    /// background; the dictionary swap does not wait for it.
    pub fn apply_selected_language(&mut self) -> Language {
        let language = Language::ALL[self.lang_modal_selected];
        language.activate();
        self.language = language;
        self.close_lang_modal();
        language
    }

    /// Resolve a theme role to its concrete style.
    pub fn style(&self, role: &str) -> ratatui::style::Style {
        self.styles.resolve(role)
    }

    // ------------------------------------------------------------------------
    // Status Line
    // ------------------------------------------------------------------------

    pub fn set_status(&mut self, message: impl Into<Cow<'static, str>>) {
        self.status = Some((message.into(), Instant::now()));
        self.needs_redraw = true;
    }

    /// Current status text, if one is set and not yet expired.
    pub fn status_text(&mut self) -> Option<&str> {
        if matches!(&self.status, Some((_, set_at)) if set_at.elapsed() >= STATUS_TTL) {
            self.status = None;
            self.needs_redraw = true;
            return None;
        }
        self.status.as_ref().map(|(text, _)| text.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;
    use secrecy::SecretString;

    async fn test_app() -> App {
        let client = reqwest::Client::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(
            Route::Login,
            Language::En,
            ThemeVariant::Dark,
            FeedLoader::new(client.clone(), "http://localhost:1", "http://localhost:1", 10),
            AuthClient::new(client, "http://localhost:1", SecretString::from("k".to_string())),
            SessionStore::new(Database::open(":memory:").await.unwrap()),
            tx,
        )
    }

    #[tokio::test]
    async fn test_back_from_register_returns_to_login() {
        let mut app = test_app().await;
        app.navigate(Route::Register);
        app.back();
        assert_eq!(app.route, Route::Login);
    }

    #[tokio::test]
    async fn test_back_from_details_returns_to_listing_and_resets_detail() {
        let mut app = test_app().await;
        app.navigate(Route::Details(7));
        app.detail = DetailState::Loading;
        app.back();
        assert_eq!(app.route, Route::Listing);
        assert_eq!(app.detail, DetailState::Idle);
    }

    #[tokio::test]
    async fn test_back_at_stack_roots_is_noop() {
        let mut app = test_app().await;
        app.back();
        assert_eq!(app.route, Route::Login);

        app.navigate(Route::Listing);
        app.back();
        assert_eq!(app.route, Route::Listing);
    }

    #[tokio::test]
    async fn test_open_selected_with_empty_feed() {
        let mut app = test_app().await;
        app.navigate(Route::Listing);
        assert_eq!(app.open_selected(), None);
        assert_eq!(app.route, Route::Listing);
    }

    #[tokio::test]
    async fn test_selection_stays_in_bounds() {
        let mut app = test_app().await;
        app.select_next();
        assert_eq!(app.selected, 0);
        app.select_prev();
        assert_eq!(app.selected, 0);
    }

    #[tokio::test]
    async fn test_login_form_editing() {
        let mut app = test_app().await;
        app.login.push_char('a');
        app.login.cycle_focus();
        app.login.push_char('p');
        app.login.push_char('w');
        app.login.pop_char();

        assert_eq!(app.login.email, "a");
        assert_eq!(app.login.password, "p");
    }

    #[tokio::test]
    async fn test_register_form_focus_cycles_three_fields() {
        let mut app = test_app().await;
        assert_eq!(app.register.focus(), RegisterField::Email);
        app.register.cycle_focus();
        assert_eq!(app.register.focus(), RegisterField::Password);
        app.register.cycle_focus();
        assert_eq!(app.register.focus(), RegisterField::Confirm);
        app.register.cycle_focus();
        assert_eq!(app.register.focus(), RegisterField::Email);
    }

    #[tokio::test]
    async fn test_lang_modal_wraps() {
        let mut app = test_app().await;
        app.open_lang_modal();
        assert_eq!(app.lang_modal_selected, 0);
        app.lang_modal_prev();
        assert_eq!(app.lang_modal_selected, Language::ALL.len() - 1);
        app.lang_modal_next();
        assert_eq!(app.lang_modal_selected, 0);
    }

    #[tokio::test]
    async fn test_apply_selected_language_updates_and_closes() {
        let mut app = test_app().await;
        app.open_lang_modal();
        app.lang_modal_next();
        let chosen = app.apply_selected_language();
        assert_eq!(chosen, Language::Hi);
        assert_eq!(app.language, Language::Hi);
        assert!(!app.lang_modal_open);
        Language::En.activate();
    }

    #[tokio::test]
    async fn test_status_visible_then_expires() {
        let mut app = test_app().await;
        app.set_status("saved");
        assert_eq!(app.status_text(), Some("saved"));

        // Force expiry by back-dating the timestamp.
        if let Some((_, set_at)) = &mut app.status {
            *set_at = Instant::now() - STATUS_TTL - Duration::from_millis(1);
        }
        assert_eq!(app.status_text(), None);
    }

    #[tokio::test]
    async fn test_at_list_end_empty_feed() {
        let app = test_app().await;
        assert!(!app.at_list_end());
    }
}
