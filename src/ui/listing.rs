//! Post list screen.

use ratatui::{
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use rust_i18n::t;

use crate::app::App;
use crate::util::{preview_line, truncate_to_width};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.feed.refreshing {
        format!(" {} ({}) ", t!("posts"), t!("refreshing"))
    } else if app.feed.loading {
        format!(" {} ({}) ", t!("posts"), t!("loading"))
    } else {
        format!(" {} ({}) ", t!("posts"), app.feed.items.len())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border"))
        .title(title);

    if app.feed.items.is_empty() {
        let text = if app.feed.loading {
            t!("loading")
        } else {
            t!("no_posts")
        };
        let paragraph = Paragraph::new(text.to_string())
            .block(block)
            .alignment(Alignment::Center)
            .style(app.style("post_meta"));
        f.render_widget(paragraph, area);
        return;
    }

    let text_width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = app
        .feed
        .items
        .iter()
        .map(|post| {
            let title_line = Line::styled(
                truncate_to_width(&post.title, text_width).into_owned(),
                app.style("post_title"),
            );
            let preview = Line::styled(
                truncate_to_width(&preview_line(&post.body), text_width).into_owned(),
                app.style("post_body_preview"),
            );
            let meta = Line::styled(
                truncate_to_width(&post.thumbnail_url, text_width).into_owned(),
                app.style("post_meta"),
            );
            ListItem::new(vec![title_line, preview, meta])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(app.style("post_selected"));

    let mut state = ListState::default();
    state.select(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}
