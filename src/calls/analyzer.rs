use std::collections::BTreeMap;
use std::path::Path;

use super::models::{is_before, CallRecord, Direction, NumberStats, Window};
use super::reader::load_call_records;
use crate::config::Settings;
use crate::error::Result;

/// Stats keyed by classification key (dialed number or extension)
pub type StatsByNumber = BTreeMap<String, NumberStats>;

/// Calls grouped by classification key
pub type CallGroups<'a> = BTreeMap<String, Vec<&'a CallRecord>>;

/// Classification key of a call for the given direction, if it belongs there.
/// Inner numbers are keyed by their integer form, so `0110` and `+110` group as `110`.
pub fn classification_key(
    record: &CallRecord,
    direction: Direction,
    settings: &Settings,
) -> Option<String> {
    let inner = |value: &str| settings.inner_range.extension(value).map(|n| n.to_string());
    match direction {
        Direction::Incoming => inner(&record.number).or_else(|| {
            (record.number == settings.incoming_token).then(|| record.number.clone())
        }),
        Direction::Outgoing => inner(&record.sip),
    }
}

/// Group calls by key; each group ends up sorted by datetime
pub fn group_calls<'a>(
    records: &'a [CallRecord],
    direction: Direction,
    settings: &Settings,
) -> CallGroups<'a> {
    let mut groups: CallGroups<'a> = BTreeMap::new();

    for record in records {
        if let Some(key) = classification_key(record, direction, settings) {
            groups.entry(key).or_default().push(record);
        }
    }

    for calls in groups.values_mut() {
        calls.sort_by(|a, b| a.datetime.cmp(&b.datetime));
    }

    groups
}

/// Split a sorted group at the evening hour
pub fn split_window(calls: &[&CallRecord], evening_hour: u32) -> (Window, Window) {
    let (before, after): (Vec<&CallRecord>, Vec<&CallRecord>) =
        calls.iter().copied().partition(|call| is_before(call, evening_hour));
    (Window::from_sorted(&before), Window::from_sorted(&after))
}

/// Aggregate groups, then override special numbers with the split shape
pub fn aggregate(groups: &CallGroups<'_>, settings: &Settings) -> StatsByNumber {
    let mut stats: StatsByNumber = groups
        .iter()
        .map(|(key, calls)| (key.clone(), NumberStats::Main(Window::from_sorted(calls))))
        .collect();

    for special in &settings.special_numbers {
        let key = special.to_string();
        let calls = groups.get(&key).map(Vec::as_slice).unwrap_or(&[]);
        if calls.is_empty() {
            tracing::warn!(number = %key, "special number has no calls");
        }
        let (before, after) = split_window(calls, settings.evening_hour);
        stats.insert(key, NumberStats::Split { before, after });
    }

    stats
}

/// Normalized call log for one report run
#[derive(Debug, Clone)]
pub struct CallLog {
    records: Vec<CallRecord>,
    settings: Settings,
}

impl CallLog {
    /// Load and normalize the call log at `path`
    pub fn load(path: &Path, settings: &Settings) -> Result<Self> {
        let records = load_call_records(path, settings.min_duration)?;
        Ok(Self::from_records(records, settings.clone()))
    }

    /// Build from records that already passed the duration filter
    pub fn from_records(records: Vec<CallRecord>, settings: Settings) -> Self {
        Self { records, settings }
    }

    pub fn records(&self) -> &[CallRecord] {
        &self.records
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn calls_by_number(&self, direction: Direction) -> CallGroups<'_> {
        group_calls(&self.records, direction, &self.settings)
    }

    pub fn call_stats(&self, direction: Direction) -> StatsByNumber {
        let groups = self.calls_by_number(direction);
        tracing::debug!(?direction, numbers = groups.len(), "grouped calls");
        aggregate(&groups, &self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
    }

    fn call(sip: &str, number: &str, datetime: NaiveDateTime, duration: i64) -> CallRecord {
        CallRecord {
            id: String::new(),
            sip: sip.to_string(),
            datetime,
            clid: String::new(),
            number: number.to_string(),
            state: "ANSWERED".to_string(),
            duration,
        }
    }

    fn log(records: Vec<CallRecord>) -> CallLog {
        CallLog::from_records(records, Settings::default())
    }

    #[test]
    fn incoming_example_from_the_report_rules() {
        let log = log(vec![
            call("79001112233", "incoming", at(18, 30), 15),
            call("79001112233", "incoming", at(9, 0), 20),
            call("79001112233", "110", at(9, 10), 30),
            call("79001112233", "110", at(18, 0), 12),
        ]);

        let stats = log.call_stats(Direction::Incoming);

        assert_eq!(
            stats["incoming"],
            NumberStats::Main(Window {
                first: Some(at(9, 0)),
                last: Some(at(18, 30)),
                count: 2,
            })
        );
        assert_eq!(
            stats["110"],
            NumberStats::Split {
                before: Window { first: Some(at(9, 10)), last: Some(at(9, 10)), count: 1 },
                after: Window { first: Some(at(18, 0)), last: Some(at(18, 0)), count: 1 },
            }
        );
    }

    #[test]
    fn missing_special_number_gets_empty_split() {
        let stats = log(vec![]).call_stats(Direction::Outgoing);
        let empty = NumberStats::Split { before: Window::default(), after: Window::default() };
        assert_eq!(stats.len(), 2);
        assert_eq!(stats["110"], empty);
        assert_eq!(stats["111"], empty);
    }

    #[test]
    fn outgoing_is_keyed_by_sip() {
        let log = log(vec![
            call("101", "79001112233", at(10, 0), 60),
            call("101", "79005556677", at(8, 0), 60),
            call("500", "79001112233", at(10, 0), 60),
            call("abc", "102", at(10, 0), 60),
        ]);

        let stats = log.call_stats(Direction::Outgoing);
        assert_eq!(
            stats["101"],
            NumberStats::Main(Window { first: Some(at(8, 0)), last: Some(at(10, 0)), count: 2 })
        );
        assert!(!stats.contains_key("500"));
        assert!(!stats.contains_key("abc"));
    }

    #[test]
    fn inner_to_inner_call_lands_in_both_sets() {
        let log = log(vec![call("101", "102", at(10, 0), 60)]);
        assert!(log.call_stats(Direction::Incoming).contains_key("102"));
        assert!(log.call_stats(Direction::Outgoing).contains_key("101"));
    }

    #[test]
    fn external_to_external_call_lands_nowhere() {
        let log = log(vec![call("79001112233", "79005556677", at(10, 0), 60)]);
        assert!(log.calls_by_number(Direction::Incoming).is_empty());
        assert!(log.calls_by_number(Direction::Outgoing).is_empty());
    }

    #[test]
    fn range_is_half_open() {
        let log = log(vec![
            call("x", "100", at(10, 0), 60),
            call("x", "399", at(10, 0), 60),
            call("x", "400", at(10, 0), 60),
            call("x", "99", at(10, 0), 60),
        ]);
        let groups = log.calls_by_number(Direction::Incoming);
        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["100", "399"]);
    }

    #[test]
    fn spellings_of_one_number_share_a_group() {
        let log = log(vec![
            call("x", "+110", at(18, 0), 60),
            call("x", "0110", at(9, 0), 60),
            call("x", "110", at(18, 30), 60),
            call("x", "200", at(18, 0), 60),
            call("x", "0200", at(10, 0), 60),
        ]);

        let stats = log.call_stats(Direction::Incoming);
        let keys: Vec<&str> = stats.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["110", "111", "200"]);

        assert_eq!(
            stats["110"],
            NumberStats::Split {
                before: Window { first: Some(at(9, 0)), last: Some(at(9, 0)), count: 1 },
                after: Window { first: Some(at(18, 0)), last: Some(at(18, 30)), count: 2 },
            }
        );
        assert_eq!(
            stats["200"],
            NumberStats::Main(Window { first: Some(at(10, 0)), last: Some(at(18, 0)), count: 2 })
        );
    }

    #[test]
    fn outgoing_extension_spellings_share_a_group() {
        let log = log(vec![
            call("0101", "79001112233", at(10, 0), 60),
            call("101", "79001112233", at(11, 0), 60),
        ]);
        let groups = log.calls_by_number(Direction::Outgoing);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["101"].len(), 2);
    }

    #[test]
    fn split_partition_is_complete() {
        let calls = vec![
            call("x", "111", at(16, 59), 60),
            call("x", "111", at(17, 0), 60),
            call("x", "111", at(23, 10), 60),
            call("x", "111", at(0, 5), 60),
        ];
        let log = log(calls);
        let groups = log.calls_by_number(Direction::Incoming);
        let stats = log.call_stats(Direction::Incoming);

        match &stats["111"] {
            NumberStats::Split { before, after } => {
                assert_eq!(before.count, 2);
                assert_eq!(after.count, 2);
                assert_eq!(before.count + after.count, groups["111"].len());
                assert_eq!(before.first, Some(at(0, 5)));
                assert_eq!(before.last, Some(at(16, 59)));
                assert_eq!(after.first, Some(at(17, 0)));
                assert_eq!(after.last, Some(at(23, 10)));
            }
            other => panic!("expected split stats, got {other:?}"),
        }
    }

    #[test]
    fn first_never_after_last() {
        let log = log(vec![
            call("101", "200", at(15, 0), 60),
            call("101", "200", at(9, 0), 60),
            call("101", "200", at(12, 0), 60),
        ]);
        for stats in log.call_stats(Direction::Incoming).values() {
            if let NumberStats::Main(window) = stats {
                assert!(window.first <= window.last);
            }
        }
    }
}
