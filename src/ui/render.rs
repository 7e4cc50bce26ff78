//! Route rendering dispatch.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Route};

use super::{details, lang_modal, listing, login, register, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 50;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Render the current route, the status bar, and any active overlay.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    match app.route {
        Route::Login => login::render(f, app, chunks[0]),
        Route::Register => register::render(f, app, chunks[0]),
        Route::Listing => listing::render(f, app, chunks[0]),
        Route::Details(_) => details::render(f, app, chunks[0]),
    }

    status::render(f, app, chunks[1]);

    if app.lang_modal_open {
        lang_modal::render(f, app);
    }
}
