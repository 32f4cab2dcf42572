use chrono::{NaiveDateTime, Timelike};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Column keys of the call-log sheet, in sheet order
pub const FIELDS: [&str; 7] = ["id", "sip", "datetime", "clid", "number", "state", "duration"];

/// Cell value after coercion (floats are already truncated)
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Empty,
    Int(i64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl RawValue {
    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Render as the string used for keys and plain fields
    pub fn to_text(&self) -> String {
        match self {
            RawValue::Empty => String::new(),
            RawValue::Int(n) => n.to_string(),
            RawValue::Text(s) => s.clone(),
            RawValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// One sheet row, keyed by position in `FIELDS`
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 1-based sheet row number
    pub row: usize,
    pub cells: Vec<RawValue>,
}

impl RawRow {
    /// `None` when the sheet has no column for `field`
    pub fn get(&self, field: &str) -> Option<&RawValue> {
        let idx = FIELDS.iter().position(|f| *f == field)?;
        self.cells.get(idx)
    }
}

/// Normalized call-log entry
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CallRecord {
    pub id: String,
    pub sip: String,
    pub datetime: NaiveDateTime,
    pub clid: String,
    pub number: String,
    pub state: String,
    pub duration: i64,
}

/// Call direction relative to the inner numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Incoming, Direction::Outgoing];

    /// Sheet name in the report
    pub fn sheet_name(&self) -> &'static str {
        match self {
            Direction::Incoming => "Incoming",
            Direction::Outgoing => "Outgoing",
        }
    }
}

/// first/last/count over a set of calls
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Window {
    pub first: Option<NaiveDateTime>,
    pub last: Option<NaiveDateTime>,
    pub count: usize,
}

impl Window {
    /// Build from calls already sorted by datetime
    pub fn from_sorted(calls: &[&CallRecord]) -> Self {
        Self {
            first: calls.first().map(|c| c.datetime),
            last: calls.last().map(|c| c.datetime),
            count: calls.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Per-number statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberStats {
    Main(Window),
    Split { before: Window, after: Window },
}

/// `{"main": ..}` or `{"before_17": .., "after_17": ..}`
impl Serialize for NumberStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NumberStats::Main(window) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("main", window)?;
                map.end()
            }
            NumberStats::Split { before, after } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("before_17", before)?;
                map.serialize_entry("after_17", after)?;
                map.end()
            }
        }
    }
}

impl NumberStats {
    pub fn total_count(&self) -> usize {
        match self {
            NumberStats::Main(window) => window.count,
            NumberStats::Split { before, after } => before.count + after.count,
        }
    }
}

/// Whether a call falls before the evening cutoff hour
pub fn is_before(call: &CallRecord, evening_hour: u32) -> bool {
    call.datetime.hour() < evening_hour
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn stats_serialize_by_shape() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let main = NumberStats::Main(Window { first: Some(ts), last: Some(ts), count: 1 });
        let json = serde_json::to_value(&main).unwrap();
        assert_eq!(json["main"]["count"], 1);
        assert_eq!(json["main"]["first"], "2024-01-15T09:00:00");

        let split = NumberStats::Split { before: Window::default(), after: Window::default() };
        let json = serde_json::to_value(&split).unwrap();
        assert!(json["before_17"]["first"].is_null());
        assert_eq!(json["after_17"]["count"], 0);
    }

    #[test]
    fn raw_row_lookup_by_field() {
        let row = RawRow {
            row: 2,
            cells: vec![RawValue::Int(1), RawValue::Text("101".into())],
        };
        assert_eq!(row.get("sip"), Some(&RawValue::Text("101".into())));
        assert_eq!(row.get("duration"), None);
    }

    #[test]
    fn float_keys_render_as_integers() {
        assert_eq!(RawValue::Int(110).to_text(), "110");
        assert_eq!(RawValue::Empty.to_text(), "");
    }
}
