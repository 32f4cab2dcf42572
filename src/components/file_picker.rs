use anyhow::{Context, Result};
use glob::{glob, Pattern};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState},
};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ui::{border_style, entry_color, entry_icon, selected_style, title_style, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Parent,
    Directory,
    Spreadsheet,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// `.xlsx` files directly inside `dir`, sorted by name
pub fn xlsx_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = Path::new(&Pattern::escape(&dir.to_string_lossy())).join("*.xlsx");
    let pattern_str = pattern.to_string_lossy();

    let mut files: Vec<PathBuf> = glob(&pattern_str)
        .context("Failed to glob pattern")?
        .flatten()
        .filter(|p| p.is_file())
        .collect();
    files.sort();
    Ok(files)
}

/// Parent link, subdirectories, then spreadsheets
pub fn scan_dir(dir: &Path) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();

    if let Some(parent) = dir.parent() {
        entries.push(Entry {
            name: "..".to_string(),
            path: parent.to_path_buf(),
            kind: EntryKind::Parent,
        });
    }

    let mut dirs: Vec<Entry> = fs::read_dir(dir)
        .context(format!("Failed to read directory: {:?}", dir))?
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy().into_owned();
            // Hidden directories stay hidden
            (!name.starts_with('.')).then_some(Entry { name, path, kind: EntryKind::Directory })
        })
        .collect();
    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    entries.extend(dirs);

    for path in xlsx_files(dir)? {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        entries.push(Entry { name, path, kind: EntryKind::Spreadsheet });
    }

    Ok(entries)
}

/// Index of the lexicographically-last spreadsheet, else the first entry
pub fn default_selection(entries: &[Entry]) -> Option<usize> {
    entries
        .iter()
        .rposition(|e| e.kind == EntryKind::Spreadsheet)
        .or(if entries.is_empty() { None } else { Some(0) })
}

/// Spreadsheet chooser (directory browser limited to .xlsx files)
pub struct FilePicker {
    pub dir: PathBuf,
    pub entries: Vec<Entry>,
    pub state: ListState,
}

impl FilePicker {
    pub fn new(dir: &Path) -> Result<Self> {
        let mut picker = Self {
            dir: dir.to_path_buf(),
            entries: Vec::new(),
            state: ListState::default(),
        };
        picker.change_dir(dir)?;
        Ok(picker)
    }

    pub fn change_dir(&mut self, dir: &Path) -> Result<()> {
        let dir = dir
            .canonicalize()
            .context(format!("Failed to resolve directory: {:?}", dir))?;
        self.entries = scan_dir(&dir)?;
        self.dir = dir;
        self.state.select(default_selection(&self.entries));
        Ok(())
    }

    /// Move selection up
    pub fn previous(&mut self) {
        let len = self.entries.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    /// Move selection down
    pub fn next(&mut self) {
        let len = self.entries.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn top(&mut self) {
        if !self.entries.is_empty() {
            self.state.select(Some(0));
        }
    }

    pub fn bottom(&mut self) {
        if !self.entries.is_empty() {
            self.state.select(Some(self.entries.len() - 1));
        }
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.state.selected().and_then(|i| self.entries.get(i))
    }

    /// Enter a directory, or return the chosen spreadsheet
    pub fn open_selected(&mut self) -> Result<Option<PathBuf>> {
        let Some(entry) = self.selected_entry().cloned() else {
            return Ok(None);
        };
        match entry.kind {
            EntryKind::Spreadsheet => Ok(Some(entry.path)),
            EntryKind::Parent | EntryKind::Directory => {
                self.change_dir(&entry.path)?;
                Ok(None)
            }
        }
    }

    pub fn parent(&mut self) -> Result<()> {
        if let Some(parent) = self.dir.parent().map(Path::to_path_buf) {
            self.change_dir(&parent)?;
        }
        Ok(())
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let line = Line::from(vec![
                    Span::styled(
                        format!(" {} ", entry_icon(entry.kind)),
                        Style::default().fg(entry_color(entry.kind)),
                    ),
                    Span::styled(entry.name.clone(), Style::default().fg(Theme::FG)),
                ]);
                ListItem::new(line)
            })
            .collect();

        let spreadsheets = self
            .entries
            .iter()
            .filter(|e| e.kind == EntryKind::Spreadsheet)
            .count();
        let title = format!(" Please choose a file ({}) ", spreadsheets);

        let list = List::new(items)
            .block(
                Block::default()
                    .title(title)
                    .title_style(title_style())
                    .borders(Borders::ALL)
                    .border_style(border_style()),
            )
            .highlight_style(selected_style())
            .highlight_symbol("▶");

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}
