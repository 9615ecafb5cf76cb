#![allow(clippy::unwrap_used, clippy::expect_used)]

use fieldlog_core_types::schema::{FIELD_FILE, FIELD_FUNCTION, FIELD_ROW, FIELD_SEVERITY};
use fieldlog_logging::test_capture::{CaptureRegistrar, CaptureReporter, CaptureSink};
use fieldlog_logging::{
    CallSite, Fields, Level, LogError, LogErrorKind, LogFacade, Logger, LoggingConfig, Severity,
    StreamSink,
};
use serde_json::json;
use std::sync::Arc;

fn facade_with(config: &LoggingConfig) -> (LogFacade, CaptureSink) {
    let capture = CaptureSink::new();
    let facade = LogFacade::try_init(config, Arc::new(capture.clone()), None).unwrap();
    (facade, capture)
}

fn debug_config() -> LoggingConfig {
    LoggingConfig::default().with_min_level(Level::Debug)
}

fn handle_request(logger: &mut Logger) {
    fieldlog_logging::info!(logger, "handled {}", "request");
}

fn store_failure(logger: &mut Logger) {
    logger.error("store failed");
}

#[test]
fn test_init_configures_sink() {
    let config = LoggingConfig::default().with_min_level(Level::Warning);
    let (facade, capture) = facade_with(&config);

    let settings = capture.settings().expect("sink configured");
    assert_eq!(settings.min_level, Level::Warning);
    assert_eq!(settings.format, fieldlog_logging::OutputFormat::Json);
    assert!(!facade.has_reporting_hook());
}

#[test]
fn test_with_fields_error_record() {
    let (facade, capture) = facade_with(&debug_config());
    let mut input = Fields::new();
    input.insert("a".to_string(), json!(1));

    let mut logger = facade.with_fields(&input);
    logger.error("x");

    let record = capture.last().unwrap();
    assert_eq!(record.message, "x");
    assert_eq!(record.severity, Severity::Error);
    assert_eq!(record.field("a"), Some(&json!(1)));
    assert_eq!(record.field(FIELD_SEVERITY), Some(&json!("ERROR")));

    // The caller's map is untouched by the handle's in-place mutation
    assert_eq!(input.len(), 1);
    assert!(!input.contains_key(FIELD_SEVERITY));
}

#[test]
fn test_handles_from_same_fields_are_independent() {
    let (facade, capture) = facade_with(&debug_config());
    let mut seed = Fields::new();
    seed.insert("k".to_string(), json!("v"));

    let mut first = facade.with_fields(&seed);
    let mut second = facade.with_fields(&seed);
    first.info("x");
    second.info("x");

    first.insert("k", "changed");
    first.insert("extra", true);

    let records = capture.records();
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.field("k"), Some(&json!("v")));
        assert!(record.field("extra").is_none());
    }
    assert_eq!(second.fields().get("k"), Some(&json!("v")));
}

#[test]
fn test_new_logger_starts_empty() {
    let (facade, capture) = facade_with(&debug_config());
    let mut logger = facade.logger();
    assert!(logger.fields().is_empty());

    logger.debug("boot");

    let record = capture.last().unwrap();
    assert_eq!(record.severity_field(), Some("DEBUG"));
    assert_eq!(record.custom_fields().count(), 0);
}

#[test]
fn test_every_method_tags_its_severity() {
    let (facade, capture) = facade_with(&debug_config());
    let mut logger = facade.logger();

    logger.debug("d");
    logger.info("i");
    logger.warning("w");
    logger.error("e");

    let tags: Vec<_> = capture
        .records()
        .iter()
        .map(|r| r.severity_field().unwrap().to_string())
        .collect();
    assert_eq!(tags, vec!["DEBUG", "INFO", "WARNING", "ERROR"]);
}

#[test]
fn test_sink_filters_below_threshold() {
    let (facade, capture) = facade_with(&LoggingConfig::default());
    let mut logger = facade.logger();

    logger.debug("d");
    logger.info("i");
    logger.warning("w");
    logger.error("e");

    assert_eq!(capture.records().len(), 1);
    capture.assert_record_exists(Severity::Error, "e");
    // The handle was still composed for every call
    assert_eq!(logger.fields().get(FIELD_SEVERITY), Some(&json!("ERROR")));
}

#[test]
fn test_panic_records_then_panics() {
    let (facade, capture) = facade_with(&LoggingConfig::default());
    let mut logger = facade.logger();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        logger.panic("boom");
    }));

    let payload = result.expect_err("panic must unwind");
    assert_eq!(payload.downcast_ref::<String>().map(String::as_str), Some("boom"));
    assert_eq!(capture.fatal_count(), 1);
    let record = capture.last().unwrap();
    assert_eq!(record.severity, Severity::Panic);
    assert_eq!(record.severity_field(), Some("PANIC"));
}

#[test]
#[should_panic(expected = "boom")]
fn test_fatal_macro_panics() {
    let (facade, _capture) = facade_with(&LoggingConfig::default());
    let mut logger = facade.logger();
    fieldlog_logging::fatal!(logger, "boom");
}

#[test]
fn test_macro_records_calling_function() {
    let (facade, capture) = facade_with(&debug_config());
    let mut logger = facade.logger();

    handle_request(&mut logger);

    let record = capture.last().unwrap();
    assert_eq!(record.message, "handled request");
    let expected = format!("{}::handle_request", module_path!());
    assert_eq!(record.field_str(FIELD_FUNCTION), Some(expected.as_str()));
    assert_eq!(record.field_str(FIELD_FILE), Some(file!()));
    assert!(record.field(FIELD_ROW).and_then(|v| v.as_u64()).is_some());
}

#[test]
fn test_plain_method_records_caller_location_not_facade() {
    let (facade, capture) = facade_with(&debug_config());
    let mut logger = facade.logger();

    store_failure(&mut logger);

    let record = capture.last().unwrap();
    let site = record.call_site().expect("location recorded");
    assert_eq!(site.file, file!());
    assert!(site.function.is_none());
}

#[test]
fn test_capture_disabled_omits_caller_fields() {
    let config = debug_config().with_capture_caller(false);
    let (facade, capture) = facade_with(&config);
    let mut logger = facade.logger();

    handle_request(&mut logger);

    let record = capture.last().unwrap();
    assert!(record.call_site().is_none());
    assert!(record.field(FIELD_FUNCTION).is_none());
    assert_eq!(record.severity_field(), Some("INFO"));
}

#[test]
fn test_reserved_keys_always_win() {
    let (facade, capture) = facade_with(&debug_config());
    let mut seed = Fields::new();
    seed.insert(FIELD_SEVERITY.to_string(), json!("NOT-A-LEVEL"));
    seed.insert(FIELD_FUNCTION.to_string(), json!("forged::function"));
    seed.insert(FIELD_ROW.to_string(), json!(-1));

    let mut logger = facade.with_fields(&seed);
    logger.log_at(Severity::Warning, CallSite::new("real::site", "src/real.rs", 9), "w");

    let record = capture.last().unwrap();
    assert_eq!(record.severity_field(), Some("WARNING"));
    assert_eq!(record.field_str(FIELD_FUNCTION), Some("real::site"));
    assert_eq!(record.field(FIELD_ROW), Some(&json!(9)));
}

#[test]
fn test_key_without_registrar_is_rejected() {
    let config = LoggingConfig::default().with_reporting_key("0123456789abcdef0123456789abcdef");
    let result = LogFacade::try_init(&config, Arc::new(CaptureSink::new()), None);

    assert_eq!(result.err().map(|e| e.kind()), Some(LogErrorKind::HookUnavailable));
}

#[test]
fn test_empty_key_registers_no_hook() {
    let registrar = CaptureRegistrar::accepting(CaptureReporter::new());
    let config = LoggingConfig::default().with_reporting_key("");

    let facade =
        LogFacade::try_init(&config, Arc::new(CaptureSink::new()), Some(&registrar)).unwrap();

    assert!(!facade.has_reporting_hook());
    assert!(registrar.registered_keys().is_empty());
}

#[test]
fn test_whitespace_key_reaches_registrar() {
    let registrar = CaptureRegistrar::rejecting(LogError::hook_registration("bad key"));
    let config = LoggingConfig::from_lookup(|name: &str| {
        (name == "BUGSNAG_API_KEY").then(|| "   ".to_string())
    });

    let err = LogFacade::try_init(&config, Arc::new(CaptureSink::new()), Some(&registrar))
        .err()
        .unwrap();

    assert_eq!(err.kind(), LogErrorKind::HookRegistration);
    assert_eq!(registrar.registered_keys(), vec!["   ".to_string()]);
}

#[test]
fn test_registrar_receives_key() {
    let registrar = CaptureRegistrar::accepting(CaptureReporter::new());
    let config = LoggingConfig::default().with_reporting_key("k-123");

    let facade =
        LogFacade::try_init(&config, Arc::new(CaptureSink::new()), Some(&registrar)).unwrap();

    assert!(facade.has_reporting_hook());
    assert_eq!(registrar.registered_keys(), vec!["k-123".to_string()]);
}

#[test]
fn test_failed_registration_is_returned() {
    let registrar = CaptureRegistrar::rejecting(LogError::hook_registration("bad key"));
    let config = LoggingConfig::default().with_reporting_key("k-123");

    let err = LogFacade::try_init(&config, Arc::new(CaptureSink::new()), Some(&registrar))
        .err()
        .unwrap();

    assert_eq!(err.code(), "ERR_HOOK_REGISTRATION");
}

#[test]
#[should_panic(expected = "ERR_HOOK_REGISTRATION")]
fn test_init_aborts_on_failed_registration() {
    let registrar = CaptureRegistrar::rejecting(LogError::hook_registration("bad key"));
    let config = LoggingConfig::default().with_reporting_key("k-123");

    LogFacade::init(&config, Arc::new(CaptureSink::new()), Some(&registrar));
}

#[test]
fn test_tagged_messages_through_facade() {
    let config = debug_config().with_tag_messages(true);
    let (facade, capture) = facade_with(&config);

    facade.logger().warning("slow query");

    assert_eq!(capture.last().unwrap().message, "[WARNING] slow query");
}

#[test]
fn test_text_format_from_environment_writes_key_value_lines() {
    let config = LoggingConfig::from_lookup(|name: &str| match name {
        "LOG_LEVEL" => Some("WARNING".to_string()),
        "LOG_FORMAT" => Some("text".to_string()),
        _ => None,
    });
    let sink = Arc::new(StreamSink::new(Vec::new()));
    let facade = LogFacade::try_init(&config, sink.clone(), None).unwrap();

    let mut fields = Fields::new();
    fields.insert("table".to_string(), json!("orders"));
    facade.with_fields(&fields).warning("slow query");
    facade.logger().info("dropped");
    drop(facade);

    let written = Arc::try_unwrap(sink).ok().unwrap().into_inner();
    let output = String::from_utf8(written).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("time="));
    assert!(lines[0].contains(" level=warning msg=\"slow query\""));
    assert!(lines[0].contains(" severity=WARNING"));
    assert!(lines[0].contains(" table=orders"));
}
