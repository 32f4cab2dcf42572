use ratatui::prelude::*;

use crate::components::file_picker::EntryKind;

/// Catppuccin Mocha color theme
/// https://github.com/catppuccin/catppuccin
pub struct Theme;

impl Theme {
    // Base colors (Catppuccin Mocha - darkened)
    pub const CRUST: Color = Color::Rgb(17, 17, 27);          // #11111b - Crust (darkest)
    pub const BG: Color = Self::CRUST;
    pub const BG_DARK: Color = Color::Rgb(12, 12, 20);        // Even darker for modals
    pub const SURFACE0: Color = Color::Rgb(49, 50, 68);       // #313244 - Surface0
    pub const FG: Color = Color::Rgb(205, 214, 244);          // #cdd6f4 - Text
    pub const FG_DARK: Color = Color::Rgb(147, 153, 178);     // #9399b2 - Subtext1
    pub const OVERLAY: Color = Color::Rgb(127, 132, 156);     // #7f849c - Overlay1

    // Accent colors
    pub const MAUVE: Color = Color::Rgb(203, 166, 247);       // #cba6f7
    pub const RED: Color = Color::Rgb(243, 139, 168);         // #f38ba8
    pub const GREEN: Color = Color::Rgb(166, 227, 161);       // #a6e3a1
    pub const SAPPHIRE: Color = Color::Rgb(116, 199, 236);    // #74c7ec
    pub const BLUE: Color = Color::Rgb(137, 180, 250);        // #89b4fa
    pub const LAVENDER: Color = Color::Rgb(180, 190, 254);    // #b4befe
    pub const YELLOW: Color = Color::Rgb(249, 226, 175);      // #f9e2af

    // UI elements
    pub const BORDER_FOCUSED: Color = Self::MAUVE;
    pub const SELECTION_BG: Color = Self::SURFACE0;
    pub const SELECTION_FG: Color = Self::LAVENDER;

    // Entries
    pub const DIRECTORY: Color = Self::SAPPHIRE;
    pub const SPREADSHEET: Color = Self::GREEN;

    // Modal
    pub const MODAL_BG: Color = Self::BG_DARK;
    pub const MODAL_BORDER: Color = Self::MAUVE;
}

/// Icons for picker entries
pub struct EntryIcons;

impl EntryIcons {
    pub const PARENT: &'static str = "↰";
    pub const DIRECTORY: &'static str = "▸";
    pub const SPREADSHEET: &'static str = "▦";
}

pub fn entry_icon(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Parent => EntryIcons::PARENT,
        EntryKind::Directory => EntryIcons::DIRECTORY,
        EntryKind::Spreadsheet => EntryIcons::SPREADSHEET,
    }
}

pub fn entry_color(kind: EntryKind) -> Color {
    match kind {
        EntryKind::Parent => Theme::OVERLAY,
        EntryKind::Directory => Theme::DIRECTORY,
        EntryKind::Spreadsheet => Theme::SPREADSHEET,
    }
}

/// Create a style for selected items
pub fn selected_style() -> Style {
    Style::default()
        .bg(Theme::SELECTION_BG)
        .fg(Theme::SELECTION_FG)
        .add_modifier(Modifier::BOLD)
}

/// Create a style for the picker border
pub fn border_style() -> Style {
    Style::default().fg(Theme::BORDER_FOCUSED)
}

/// Create a style for panel titles
pub fn title_style() -> Style {
    Style::default().fg(Theme::LAVENDER).add_modifier(Modifier::BOLD)
}

/// Create a keybinding span (highlighted key)
pub fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        format!(" {} ", key),
        Style::default()
            .bg(Theme::MAUVE)
            .fg(Theme::BG_DARK)
            .add_modifier(Modifier::BOLD),
    )
}

/// Create a keybinding description span (with trailing separator)
pub fn key_desc_span(desc: &str) -> Span<'_> {
    Span::styled(
        format!(" {}   ", desc),
        Style::default().fg(Theme::FG_DARK),
    )
}
