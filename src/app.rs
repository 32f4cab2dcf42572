use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::action::Action;
use crate::components::{FilePicker, Header, HelpModal, StatusBar};

/// Active modal state
#[derive(Debug, Clone, PartialEq)]
pub enum ModalState {
    None,
    Help,
}

/// File picker application state
pub struct App {
    pub picker: FilePicker,
    pub modal: ModalState,
    pub should_quit: bool,
    /// Spreadsheet chosen by the user
    pub chosen: Option<PathBuf>,
    /// Last navigation error, shown in the header
    pub error: Option<String>,
}

impl App {
    pub fn new(start_dir: &Path) -> Result<Self> {
        Ok(Self {
            picker: FilePicker::new(start_dir)?,
            modal: ModalState::None,
            should_quit: false,
            chosen: None,
            error: None,
        })
    }

    pub fn handle_action(&mut self, action: Action) -> Result<()> {
        if action != Action::None {
            self.error = None;
        }

        match action {
            Action::Up => self.picker.previous(),
            Action::Down => self.picker.next(),
            Action::Top => self.picker.top(),
            Action::Bottom => self.picker.bottom(),
            Action::Open => match self.picker.open_selected() {
                Ok(Some(path)) => {
                    self.chosen = Some(path);
                    self.should_quit = true;
                }
                Ok(None) => {}
                // Unreadable directories are reported, not fatal
                Err(e) => self.error = Some(e.to_string()),
            },
            Action::Parent => {
                if let Err(e) = self.picker.parent() {
                    self.error = Some(e.to_string());
                }
            }
            Action::ShowHelp => self.modal = ModalState::Help,
            Action::CloseModal => self.modal = ModalState::None,
            Action::Quit => self.should_quit = true,
            Action::None => {}
        }

        Ok(())
    }

    pub fn render(&mut self, frame: &mut ratatui::Frame) {
        use crate::ui::layout::main_layout;
        use crate::ui::Theme;

        let bg_block = ratatui::widgets::Block::default()
            .style(ratatui::prelude::Style::default().bg(Theme::BG));
        frame.render_widget(bg_block, frame.area());

        let (header_area, body, footer) = main_layout(frame.area());

        Header::render(frame, header_area, &self.picker.dir, self.error.as_deref());
        self.picker.render(frame, body);
        StatusBar::render(frame, footer, self.modal == ModalState::Help);

        if self.modal == ModalState::Help {
            HelpModal::render(frame, frame.area());
        }
    }
}
