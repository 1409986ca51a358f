//! Log assertions live in their own test binary because the logger is
//! process-global.

use futures::executor::block_on;
use log::{Level, LevelFilter, Log, Metadata, Record};
use regionpick_core::loader::JsonSource;
use regionpick_core::prelude::*;
use std::sync::{Mutex, Once};

struct CaptureLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};
static INIT: Once = Once::new();

fn take_records() -> Vec<(Level, String)> {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
    std::mem::take(&mut *LOGGER.records.lock().unwrap())
}

// One test function, so records from parallel tests never interleave.
#[test]
fn warnings_and_errors_are_logged() {
    take_records();

    // Premature population: warning, control untouched
    let country = MemorySelect::new();
    let mut picker = RegionPicker::new(country.clone(), MemorySelect::new(), Catalog::new("sk"));
    picker.populate_country_options();
    assert_eq!(country.render_count(), 0);

    let records = take_records();
    assert!(records
        .iter()
        .any(|(level, msg)| *level == Level::Warn && msg.contains("before the dataset was loaded")));
    assert!(!records.iter().any(|(level, _)| *level == Level::Error));

    // Load failure: error logged and propagated, nothing rendered
    let broken = JsonSource::new("broken.json", "{ \"countries\": ");
    let err = block_on(picker.initialize(&broken)).unwrap_err();
    assert!(matches!(err, Error::Json(_)));
    assert!(!picker.is_ready());
    assert_eq!(country.render_count(), 0);

    let records = take_records();
    assert!(records
        .iter()
        .any(|(level, msg)| *level == Level::Error && msg.contains("broken.json")));

    // Later success renders normally
    let good = JsonSource::new(
        "good.json",
        r#"{ "countries": [ { "code": "SK", "nameKey": "country.sk" } ] }"#,
    );
    block_on(picker.initialize(&good)).unwrap();
    assert_eq!(country.values(), ["", "SK"]);
    assert_eq!(picker.selected_country().as_deref(), Some("SK"));
}
