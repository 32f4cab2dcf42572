pub mod builder;
pub mod writer;

pub use builder::{date_label, Cell, Report, ReportBuilder, RenderRow, RowKind, Sheet};
pub use writer::write_report;
