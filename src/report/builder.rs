use chrono::NaiveDateTime;
use std::path::Path;

use crate::calls::{CallLog, Direction, NumberStats, StatsByNumber, Window};

pub const COLUMN_TITLES: [&str; 3] = ["Кол-во", "Первый зв.", "Последний зв."];
pub const TOTAL_LABEL: &str = "Сумма";

/// Columns spanned by the title row
pub const COLUMN_COUNT: u16 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Blank,
    Text(String),
    Number(i64),
}

impl Cell {
    fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    fn count(n: usize) -> Self {
        Cell::Number(n as i64)
    }

    fn time(ts: Option<NaiveDateTime>) -> Self {
        match ts {
            Some(ts) => Cell::Text(ts.format("%H:%M:%S").to_string()),
            None => Cell::Blank,
        }
    }

    /// Keys that parse as integers are written as numbers
    fn key(key: &str) -> Self {
        key.parse::<i64>()
            .map(Cell::Number)
            .unwrap_or_else(|_| Cell::text(key))
    }
}

/// What a row represents; the writer styles by kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Title,
    ColumnTitles,
    Number,
    SplitHeader,
    Detail,
    Total,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRow {
    pub kind: RowKind,
    pub cells: Vec<Cell>,
}

impl RenderRow {
    fn new(kind: RowKind, cells: Vec<Cell>) -> Self {
        Self { kind, cells }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: &'static str,
    pub rows: Vec<RenderRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub sheets: Vec<Sheet>,
}

/// Report date from a file name like `15.01.2024.xlsx` -> `15/01/2024`
pub fn date_label(source: &Path) -> String {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.split('.').take(3).collect::<Vec<_>>().join("/")
}

/// Integer order; non-numeric keys count as 0, ties broken by text
fn sort_key(key: &str) -> (i64, &str) {
    (key.trim().parse::<i64>().unwrap_or(0), key)
}

/// Turns per-number stats into sheet rows
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    date_label: String,
    evening_hour: u32,
}

impl ReportBuilder {
    pub fn new(date_label: impl Into<String>) -> Self {
        Self {
            date_label: date_label.into(),
            evening_hour: 17,
        }
    }

    pub fn with_evening_hour(mut self, hour: u32) -> Self {
        self.evening_hour = hour;
        self
    }

    fn before_label(&self) -> String {
        format!("До {:02}:00", self.evening_hour)
    }

    fn after_label(&self) -> String {
        format!("После {:02}:00", self.evening_hour)
    }

    pub fn for_source(source: &Path) -> Self {
        Self::new(date_label(source))
    }

    fn header_rows(&self) -> Vec<RenderRow> {
        let mut titles = vec![Cell::Blank, Cell::Blank];
        titles.extend(COLUMN_TITLES.iter().map(|t| Cell::text(*t)));

        vec![
            RenderRow::new(RowKind::Title, vec![Cell::text(&self.date_label)]),
            RenderRow::new(RowKind::ColumnTitles, titles),
        ]
    }

    fn window_row(label: &str, window: &Window) -> RenderRow {
        RenderRow::new(
            RowKind::Detail,
            vec![
                Cell::Blank,
                Cell::text(label),
                Cell::count(window.count),
                Cell::time(window.first),
                Cell::time(window.last),
            ],
        )
    }

    fn entry_rows(&self, key: &str, stats: &NumberStats) -> Vec<RenderRow> {
        match stats {
            NumberStats::Main(window) => vec![RenderRow::new(
                RowKind::Number,
                vec![
                    Cell::key(key),
                    Cell::Blank,
                    Cell::count(window.count),
                    Cell::time(window.first),
                    Cell::time(window.last),
                ],
            )],
            NumberStats::Split { before, after } => vec![
                RenderRow::new(RowKind::SplitHeader, vec![Cell::key(key), Cell::Blank]),
                Self::window_row(&self.before_label(), before),
                Self::window_row(&self.after_label(), after),
            ],
        }
    }

    /// Rows for one sheet: header, entries in numeric key order, totals
    pub fn build_sheet(&self, stats: &StatsByNumber) -> Vec<RenderRow> {
        let mut entries: Vec<(&String, &NumberStats)> = stats.iter().collect();
        entries.sort_by(|(a, _), (b, _)| sort_key(a).cmp(&sort_key(b)));

        let mut rows = self.header_rows();
        let mut total = 0usize;

        for (key, entry) in entries {
            total += entry.total_count();
            rows.extend(self.entry_rows(key, entry));
        }

        rows.push(RenderRow::new(
            RowKind::Total,
            vec![Cell::Blank, Cell::text(TOTAL_LABEL), Cell::count(total)],
        ));
        rows
    }

    /// Both sheets, incoming first
    pub fn build_report(&self, log: &CallLog) -> Report {
        let sheets = Direction::ALL
            .iter()
            .map(|direction| Sheet {
                name: direction.sheet_name(),
                rows: self.build_sheet(&log.call_stats(*direction)),
            })
            .collect();
        Report { sheets }
    }
}
