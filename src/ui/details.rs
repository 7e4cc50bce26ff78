//! Post details screen.

use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use rust_i18n::t;

use crate::app::{App, DetailState};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border_focused"))
        .title(format!(" {} ", t!("post_details")));

    let lines = match &app.detail {
        DetailState::Idle | DetailState::Loading => {
            vec![Line::styled(t!("loading").to_string(), app.style("spinner"))]
        }
        DetailState::Failed(message) => vec![
            Line::styled(message.clone(), app.style("details_error")),
            Line::raw(""),
            Line::styled(
                format!("[b] {}", t!("back_to_list")),
                app.style("details_meta"),
            ),
        ],
        DetailState::Loaded(item) => {
            let mut lines = vec![
                Line::styled(item.title.clone(), app.style("details_title")),
                Line::styled(item.thumbnail_url.clone(), app.style("details_meta")),
                Line::raw(""),
            ];
            lines.extend(
                item.body
                    .lines()
                    .map(|l| Line::styled(l.to_string(), app.style("details_body"))),
            );
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                format!("[b] {}", t!("back_to_list")),
                app.style("details_meta"),
            ));
            lines
        }
    };

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
