//! Status bar widget.

use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

use crate::app::{App, Route};

/// Render the status bar: an active status message, or static key hints for
/// the current route.
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let style = app.style("status_bar");
    let text: Cow<'_, str> = if let Some(message) = app.status_text() {
        Cow::Owned(message.to_string())
    } else {
        match app.route {
            Route::Login => {
                Cow::Borrowed("[Tab]field [Enter]login [Ctrl+N]register [Ctrl+L]language [Esc]quit")
            }
            Route::Register => Cow::Borrowed("[Tab]field [Enter]signup [Esc]back"),
            Route::Listing => {
                Cow::Borrowed("[j/k]move [Enter]open [r]efresh [l]anguage [s]ign out [q]uit")
            }
            Route::Details(_) => Cow::Borrowed("[b]ack [q]uit"),
        }
    };

    let paragraph = Paragraph::new(text).style(style);
    f.render_widget(paragraph, area);
}
