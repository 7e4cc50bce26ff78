//! Keyboard input handling, dispatched per route.
//!
//! Handlers mutate [`App`] state directly and spawn background tasks for
//! anything that touches the network or the database. Task results come back
//! through the [`AppEvent`] channel.

use crossterm::event::{KeyCode, KeyModifiers};
use rust_i18n::t;
use secrecy::SecretString;

use crate::app::{App, AppEvent, Route};
use crate::feed::LoadOutcome;

use super::loop_runner::Action;

pub fn handle_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    // Ctrl+C quits from anywhere (raw mode swallows the signal).
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    // The language modal captures all input while open.
    if app.lang_modal_open {
        handle_lang_modal(app, code);
        return Action::Continue;
    }

    match app.route {
        Route::Login => handle_login(app, code, modifiers),
        Route::Register => handle_register(app, code, modifiers),
        Route::Listing => handle_listing(app, code),
        Route::Details(_) => handle_details(app, code),
    }
}

// ============================================================================
// Per-Route Handlers
// ============================================================================

fn handle_login(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match code {
        KeyCode::Esc => return Action::Quit,
        KeyCode::Tab | KeyCode::Down | KeyCode::Up => app.login.cycle_focus(),
        KeyCode::Enter => spawn_sign_in(app),
        // Ctrl+N: "create new user" link
        KeyCode::Char('n') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.register.clear();
            app.navigate(Route::Register);
        }
        KeyCode::Char('l') if modifiers.contains(KeyModifiers::CONTROL) => app.open_lang_modal(),
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => app.login.push_char(c),
        KeyCode::Backspace => app.login.pop_char(),
        _ => {}
    }
    Action::Continue
}

fn handle_register(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match code {
        KeyCode::Esc => app.back(),
        KeyCode::Tab | KeyCode::Down | KeyCode::Up => app.register.cycle_focus(),
        KeyCode::Enter => spawn_sign_up(app),
        KeyCode::Char('l') if modifiers.contains(KeyModifiers::CONTROL) => app.open_lang_modal(),
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => app.register.push_char(c),
        KeyCode::Backspace => app.register.pop_char(),
        _ => {}
    }
    Action::Continue
}

fn handle_listing(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => {
            // Scrolling past the last loaded row requests the next page.
            if app.at_list_end() {
                spawn_load_more(app);
            } else {
                app.select_next();
            }
        }
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Enter => {
            if let Some(id) = app.open_selected() {
                spawn_fetch_details(app, id);
            }
        }
        KeyCode::Char('r') => spawn_refresh(app),
        KeyCode::Char('l') => app.open_lang_modal(),
        KeyCode::Char('s') => spawn_sign_out(app),
        _ => {}
    }
    Action::Continue
}

fn handle_details(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('b') | KeyCode::Esc | KeyCode::Backspace => app.back(),
        _ => {}
    }
    Action::Continue
}

fn handle_lang_modal(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_lang_modal(),
        KeyCode::Char('j') | KeyCode::Down => app.lang_modal_next(),
        KeyCode::Char('k') | KeyCode::Up => app.lang_modal_prev(),
        KeyCode::Enter => {
            let language = app.apply_selected_language();
            app.set_status(t!("language_saved").to_string());
            // Persist in the background; the dictionary swap already happened.
            let session = app.session.clone();
            tokio::spawn(async move {
                if let Err(e) = session.set_language(language).await {
                    tracing::warn!(error = %e, "Failed to persist language choice");
                }
            });
        }
        _ => {}
    }
}

// ============================================================================
// Background Task Spawns
// ============================================================================

fn spawn_sign_in(app: &mut App) {
    if app.auth_in_flight {
        return;
    }
    if app.login.email.is_empty() || app.login.password.is_empty() {
        app.set_status(t!("signin_headline").to_string());
        return;
    }

    app.auth_in_flight = true;
    app.set_status(t!("loading").to_string());

    let auth = app.auth.clone();
    let tx = app.events_tx.clone();
    let email = app.login.email.clone();
    let password = SecretString::from(app.login.password.clone());

    tokio::spawn(async move {
        let result = auth.sign_in(&email, &password).await;
        let _ = tx.send(AppEvent::SignInComplete(result));
    });
}

fn spawn_sign_up(app: &mut App) {
    if app.auth_in_flight {
        return;
    }
    if app.register.email.is_empty() || app.register.password.is_empty() {
        app.set_status(t!("signup_headline").to_string());
        return;
    }

    app.auth_in_flight = true;
    app.set_status(t!("loading").to_string());

    let auth = app.auth.clone();
    let tx = app.events_tx.clone();
    let email = app.register.email.clone();
    let password = SecretString::from(app.register.password.clone());
    let confirm = SecretString::from(app.register.confirm.clone());

    tokio::spawn(async move {
        let result = auth.sign_up(&email, &password, &confirm).await;
        let _ = tx.send(AppEvent::SignUpComplete(result));
    });
}

fn spawn_sign_out(app: &mut App) {
    let session = app.session.clone();
    let auth = app.auth.clone();
    let tx = app.events_tx.clone();

    tokio::spawn(async move {
        if let Err(e) = session.sign_out(&auth).await {
            tracing::error!(error = %e, "Sign-out failed to clear local session");
        }
        let _ = tx.send(AppEvent::SignOutComplete);
    });
}

pub(super) fn spawn_initial_load(app: &mut App) {
    app.set_status(t!("loading").to_string());
    let loader = app.feed_loader.clone();
    let tx = app.events_tx.clone();
    tokio::spawn(async move {
        let result = loader.load_initial().await.map(|_| ());
        let _ = tx.send(AppEvent::FeedUpdated(result));
    });
}

fn spawn_load_more(app: &mut App) {
    let loader = app.feed_loader.clone();
    let tx = app.events_tx.clone();
    tokio::spawn(async move {
        let result = loader.load_more().await.map(|_| ());
        let _ = tx.send(AppEvent::FeedUpdated(result));
    });
}

fn spawn_refresh(app: &mut App) {
    app.set_status(t!("refreshing").to_string());
    let loader = app.feed_loader.clone();
    let tx = app.events_tx.clone();
    tokio::spawn(async move {
        let result = loader.refresh().await.map(|outcome| {
            if let LoadOutcome::InFlight = outcome {
                tracing::debug!("Refresh coalesced with in-flight fetch");
            }
        });
        let _ = tx.send(AppEvent::FeedUpdated(result));
    });
}

fn spawn_fetch_details(app: &mut App, id: i64) {
    let loader = app.feed_loader.clone();
    let tx = app.events_tx.clone();
    tokio::spawn(async move {
        let result = loader.fetch_post(id).await;
        let _ = tx.send(AppEvent::DetailsLoaded(id, result));
    });
}
