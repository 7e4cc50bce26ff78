//! Background task completion handling.

use rust_i18n::t;

use crate::app::{App, AppEvent, DetailState, Route};
use crate::auth::AuthError;
use crate::ui::input::spawn_initial_load;

/// Localize auth failures we raised ourselves; remote messages pass through
/// verbatim.
fn auth_error_text(err: &AuthError) -> String {
    match err {
        AuthError::PasswordMismatch => t!("password_mismatch").to_string(),
        other => other.to_string(),
    }
}

pub async fn handle_app_event(app: &mut App, event: AppEvent) {
    app.needs_redraw = true;

    match event {
        AppEvent::SignInComplete(result) => {
            app.auth_in_flight = false;
            match result {
                Ok(credential) => {
                    if let Err(e) = app.session.save(&credential).await {
                        tracing::warn!(error = %e, "Session not persisted; sign-in still valid for this run");
                    }
                    app.login.clear();
                    app.set_status(t!("login_success").to_string());
                    app.navigate(Route::Listing);
                    spawn_initial_load(app);
                }
                Err(e) => app.set_status(auth_error_text(&e)),
            }
        }

        AppEvent::SignUpComplete(result) => {
            app.auth_in_flight = false;
            match result {
                Ok(credential) => {
                    if let Err(e) = app.session.save(&credential).await {
                        tracing::warn!(error = %e, "Session not persisted; sign-up still valid for this run");
                    }
                    app.register.clear();
                    app.set_status(t!("registration_success").to_string());
                    app.navigate(Route::Listing);
                    spawn_initial_load(app);
                }
                Err(e) => app.set_status(auth_error_text(&e)),
            }
        }

        AppEvent::SignOutComplete => {
            app.login.clear();
            app.register.clear();
            app.selected = 0;
            app.detail = DetailState::Idle;
            app.set_status(t!("signed_out").to_string());
            app.navigate(Route::Login);
        }

        AppEvent::FeedUpdated(result) => {
            app.sync_feed();
            if let Err(e) = result {
                tracing::warn!(error = %e, "Feed fetch failed");
                app.set_status(e.to_string());
            }
        }

        AppEvent::DetailsLoaded(id, result) => {
            // Ignore stale results after the user navigated away.
            if app.route != Route::Details(id) {
                tracing::debug!(id, "Dropping stale details result");
                return;
            }
            app.detail = match result {
                Ok(item) => DetailState::Loaded(item),
                Err(e) => DetailState::Failed(e.to_string()),
            };
        }
    }
}
