use valida_logger::{LevelFilter, Logger};

#[test]
fn console_logger_has_no_file_writer() {
    let logger = Logger::builder()
        .name("valida-console")
        .level(LevelFilter::DEBUG)
        .init()
        .expect("logger should initialize");

    tracing::debug!("console only");
    assert!(!logger.writes_files());
}
