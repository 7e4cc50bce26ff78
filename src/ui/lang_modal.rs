//! Language selection overlay.

use ratatui::{
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use rust_i18n::t;

use crate::app::App;
use crate::i18n::Language;

use super::helpers::centered_rect;

pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();
    let overlay = centered_rect(30, (Language::ALL.len() as u16) + 4, area);
    if overlay.width < 16 || overlay.height < 5 {
        return;
    }

    f.render_widget(Clear, overlay);

    let mut lines: Vec<Line> = Language::ALL
        .iter()
        .enumerate()
        .map(|(i, lang)| {
            let marker = if *lang == app.language { "*" } else { " " };
            let text = format!("{} {}", marker, lang.native_name());
            if i == app.lang_modal_selected {
                Line::styled(format!(">{}", text), app.style("modal_selected"))
            } else {
                Line::raw(format!(" {}", text))
            }
        })
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "(Enter) OK  (Esc) Cancel".to_string(),
        app.style("post_meta"),
    ));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("modal_border"))
            .title(format!(" {} ", t!("select_language"))),
    );

    f.render_widget(paragraph, overlay);
}
