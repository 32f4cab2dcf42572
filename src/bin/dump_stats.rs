use std::collections::BTreeMap;
use std::path::PathBuf;

use calllog_report::{CallLog, Direction, Settings};

fn main() -> anyhow::Result<()> {
    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: dump_stats <call-log.xlsx>");
        std::process::exit(2);
    };

    let settings = Settings::discover()?;
    let log = CallLog::load(&path, &settings)?;
    eprintln!("Loaded {} calls from {:?}", log.records().len(), path);

    let stats: BTreeMap<&str, _> = Direction::ALL
        .iter()
        .map(|direction| (direction.sheet_name(), log.call_stats(*direction)))
        .collect();

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
