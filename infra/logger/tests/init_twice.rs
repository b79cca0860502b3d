use valida_logger::{LevelFilter, Logger, LoggerError};

#[test]
fn second_init_is_refused() {
    let _logger = Logger::builder()
        .name("valida-first")
        .level(LevelFilter::INFO)
        .init()
        .expect("first init should succeed");

    let err = Logger::builder()
        .name("valida-second")
        .init()
        .expect_err("second init should fail");

    assert!(matches!(err, LoggerError::Subscriber { .. }));
}
