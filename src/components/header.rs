use ratatui::{
    prelude::*,
    widgets::Paragraph,
};
use std::path::Path;

use crate::ui::{header_layout, Theme};

/// Header component with title and current directory
pub struct Header;

impl Header {
    pub fn render(frame: &mut Frame, area: Rect, dir: &Path, error: Option<&str>) {
        let (title_area, info_area) = header_layout(area);

        let title = Paragraph::new(" Call Log Report ")
            .style(Style::default().fg(Theme::BLUE).add_modifier(Modifier::BOLD));
        frame.render_widget(title, title_area);

        // A failed directory change replaces the path until the next move
        let info = match error {
            Some(message) => Span::styled(format!("{} ", message), Style::default().fg(Theme::RED)),
            None => Span::styled(
                format!("{} ", dir.display()),
                Style::default().fg(Theme::FG_DARK),
            ),
        };
        frame.render_widget(Paragraph::new(Line::from(info)).alignment(Alignment::Right), info_area);
    }
}
