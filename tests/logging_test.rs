use std::sync::{Arc, Mutex};

use polyfir::FirInterpolator;
use polyfir::logging::{Logger, Severity, log_with};

// Installing a global backend can only happen once per process, so this
// file holds a single test.
#[test]
fn test_installed_logger_receives_library_events() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink_seen = Arc::clone(&seen);

    let logger = Logger::new();
    logger.set_level(Severity::Debug);
    logger
        .add_callback(
            move |event, _| {
                sink_seen
                    .lock()
                    .unwrap()
                    .push((event.severity, event.args.to_string()));
            },
            Severity::Debug,
        )
        .unwrap();
    logger.install().unwrap();

    // a second install must fail
    assert!(Logger::new().install().is_err());

    let _interp = FirInterpolator::kaiser(2, 4, 60.0).unwrap();
    log::info!("hello {}", 42);
    log::trace!("below threshold");
    log_with(None, Severity::Fatal, "polyfir", format_args!("fatal via facade"));

    let seen = seen.lock().unwrap();
    assert!(
        seen.iter()
            .any(|(s, msg)| *s == Severity::Debug && msg.contains("kaiser low-pass prototype"))
    );
    assert!(seen.contains(&(Severity::Info, "hello 42".to_string())));
    assert!(!seen.iter().any(|(_, msg)| msg.contains("below threshold")));
    // the log crate has no fatal level
    assert!(seen.contains(&(Severity::Error, "fatal via facade".to_string())));
}
