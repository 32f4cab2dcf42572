use ratatui::prelude::*;

/// Create the main layout with header, body, and footer
pub fn main_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Header
            Constraint::Min(0),     // Body
            Constraint::Length(1),  // Footer/status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Split header into title and current directory
pub fn header_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24),     // Title
            Constraint::Min(0),         // Directory
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Create a centered modal area
pub fn centered_modal(area: Rect, width_percent: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - height.min(80)) / 2),
            Constraint::Length(height),
            Constraint::Percentage((100 - height.min(80)) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
