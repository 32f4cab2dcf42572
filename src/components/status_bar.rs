use ratatui::{
    prelude::*,
    widgets::Paragraph,
};

use crate::ui::{key_span, key_desc_span, Theme};

/// Keybinding definition
pub struct KeyBinding {
    pub key: &'static str,
    pub desc: &'static str,
}

/// Status bar component (bottom of screen) - keybindings only
pub struct StatusBar;

impl StatusBar {
    pub fn picker_keybindings() -> Vec<KeyBinding> {
        vec![
            KeyBinding { key: "↑↓", desc: "nav" },
            KeyBinding { key: "Enter", desc: "open" },
            KeyBinding { key: "⌫", desc: "up" },
            KeyBinding { key: "?", desc: "help" },
            KeyBinding { key: "q", desc: "cancel" },
        ]
    }

    pub fn help_keybindings() -> Vec<KeyBinding> {
        vec![KeyBinding { key: "Esc", desc: "close" }]
    }

    pub fn render(frame: &mut Frame, area: Rect, help_open: bool) {
        let keybindings = if help_open {
            Self::help_keybindings()
        } else {
            Self::picker_keybindings()
        };

        let mut spans: Vec<Span> = Vec::new();
        for kb in keybindings {
            spans.push(key_span(kb.key));
            spans.push(key_desc_span(kb.desc));
        }

        let keys_widget = Paragraph::new(Line::from(spans))
            .style(Style::default().bg(Theme::BG_DARK))
            .alignment(Alignment::Center);
        frame.render_widget(keys_widget, area);
    }
}
