pub mod analyzer;
pub mod models;
pub mod reader;

pub use analyzer::{CallLog, StatsByNumber};
pub use models::{CallRecord, Direction, NumberStats, Window};
pub use reader::load_call_records;
