use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::{centered_modal, Theme};

const SHORTCUTS: &[(&str, &str)] = &[
    ("  j/↓    ", "Move down"),
    ("  k/↑    ", "Move up"),
    ("  g      ", "Go to top"),
    ("  G      ", "Go to bottom"),
    ("  Enter/l", "Open directory / build report"),
    ("  ⌫/h    ", "Parent directory"),
    ("  Esc/q  ", "Cancel"),
];

/// Errors print their cause chain; the stack trace needs the env var
const BACKTRACE_HINT: &str = "Set RUST_BACKTRACE=1 to print error backtraces";

/// Help modal component
pub struct HelpModal;

impl HelpModal {
    pub fn render(frame: &mut Frame, area: Rect) {
        let help_text = Self::lines();
        let modal_area = centered_modal(area, 60, help_text.len() as u16 + 2);

        // Clear the background
        frame.render_widget(Clear, modal_area);

        let block = Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::MODAL_BORDER))
            .style(Style::default().bg(Theme::MODAL_BG));

        let paragraph = Paragraph::new(help_text).block(block);

        frame.render_widget(paragraph, modal_area);
    }

    fn lines() -> Vec<Line<'static>> {
        let mut help_text = vec![
            Line::styled("Keyboard Shortcuts", Style::default().bold().fg(Theme::LAVENDER)),
            Line::raw(""),
        ];
        help_text.extend(SHORTCUTS.iter().map(|(key, desc)| {
            Line::from(vec![
                Span::styled(*key, Style::default().fg(Theme::YELLOW)),
                Span::raw(*desc),
            ])
        }));
        help_text.push(Line::raw(""));
        help_text.push(Line::styled(BACKTRACE_HINT, Style::default().fg(Theme::OVERLAY)));
        help_text.push(Line::styled("Press Esc to close", Style::default().fg(Theme::OVERLAY)));
        help_text
    }
}
