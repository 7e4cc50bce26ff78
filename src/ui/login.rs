//! Sign-in form screen.

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rust_i18n::t;

use crate::app::{App, LoginField};

use super::helpers::{centered_rect, masked};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let overlay = centered_rect(54, 13, area);
    if overlay.width < 30 || overlay.height < 9 {
        return;
    }

    let email_style = if app.login.focus() == LoginField::Email {
        app.style("form_field_focused")
    } else {
        app.style("form_field")
    };
    let password_style = if app.login.focus() == LoginField::Password {
        app.style("form_field_focused")
    } else {
        app.style("form_field")
    };

    let lines = vec![
        Line::styled(t!("welcome").to_string(), app.style("form_headline")),
        Line::raw(""),
        Line::from(vec![
            Span::styled(format!("{}: ", t!("email")), app.style("form_label")),
            Span::styled(app.login.email.clone(), email_style),
        ]),
        Line::from(vec![
            Span::styled(format!("{}: ", t!("password")), app.style("form_label")),
            Span::styled(masked(app.login.password.chars().count()), password_style),
        ]),
        Line::raw(""),
        Line::styled(
            format!("[Enter] {}", t!("login")),
            app.style("form_label"),
        ),
        Line::styled(format!("  {}  ", t!("or")), app.style("form_label")),
        Line::styled(
            format!("[Ctrl+N] {}", t!("create_new_user")),
            app.style("form_link"),
        ),
        Line::styled(
            format!("[Ctrl+L] {}", t!("select_language")),
            app.style("form_label"),
        ),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(format!(" {} ", t!("signin_headline"))),
        )
        .alignment(Alignment::Left);

    f.render_widget(paragraph, overlay);
}
