//! Account registration form screen.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rust_i18n::t;

use crate::app::{App, RegisterField};

use super::helpers::{centered_rect, masked};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let overlay = centered_rect(54, 14, area);
    if overlay.width < 30 || overlay.height < 10 {
        return;
    }

    let field_style = |field: RegisterField| {
        if app.register.focus() == field {
            app.style("form_field_focused")
        } else {
            app.style("form_field")
        }
    };

    let lines = vec![
        Line::styled(t!("create_account").to_string(), app.style("form_headline")),
        Line::raw(""),
        Line::from(vec![
            Span::styled(format!("{}: ", t!("email")), app.style("form_label")),
            Span::styled(app.register.email.clone(), field_style(RegisterField::Email)),
        ]),
        Line::from(vec![
            Span::styled(format!("{}: ", t!("password")), app.style("form_label")),
            Span::styled(
                masked(app.register.password.chars().count()),
                field_style(RegisterField::Password),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                format!("{}: ", t!("confirm_password")),
                app.style("form_label"),
            ),
            Span::styled(
                masked(app.register.confirm.chars().count()),
                field_style(RegisterField::Confirm),
            ),
        ]),
        Line::raw(""),
        Line::styled(format!("[Enter] {}", t!("signup")), app.style("form_label")),
        Line::styled(
            format!("[Esc] {}", t!("already_user")),
            app.style("form_link"),
        ),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("panel_border_focused"))
            .title(format!(" {} ", t!("signup_headline"))),
    );

    f.render_widget(paragraph, overlay);
}
