//! Advisory log output for rows the format does not match.
//!
//! Installs a process-wide logger, so this file holds a single test.

use log::{Level, LevelFilter, Log, Metadata, Record};
use parking_lot::{const_mutex, Mutex};
use rltable::{InMemoryLineProvider, LogFormat, LogModel};
use std::sync::Arc;

static RECORDS: Mutex<Vec<String>> = const_mutex(Vec::new());

struct CapturingLogger;

impl Log for CapturingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            RECORDS.lock().push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger;

fn unmatched_records() -> Vec<String> {
    RECORDS
        .lock()
        .iter()
        .filter(|message| message.contains("does not match"))
        .cloned()
        .collect()
}

#[test]
fn unparsed_row_is_reported_once_when_first_cached() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Warn);

    let provider = Arc::new(InMemoryLineProvider::from_lines([
        "garbage",
        "t1 INFO fine",
    ]));
    let format = LogFormat::new(r"^(?<ts>\S+) (?<level>\S+) (?<msg>.*)$");
    let mut model = LogModel::with_format(provider, Arc::new(format));
    assert!(unmatched_records().is_empty());

    let first = model.cell(0, 1).unwrap();
    let second = model.cell(0, 1).unwrap();
    assert_eq!(first, second);
    assert_eq!(model.row(0).unwrap().len(), 2);
    model.cell(1, 0).unwrap();

    assert_eq!(
        unmatched_records(),
        vec!["Line 1 does not match: garbage".to_string()]
    );

    model.reset();
    model.cell(0, 1).unwrap();
    assert_eq!(unmatched_records().len(), 2);
}
