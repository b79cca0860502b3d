use valida_kernel::domain::config::{LoggingConfig, RuntimeProfile, RuntimeSettings};
use valida_server::{init_logger, runtime_config};

#[test]
fn runtime_profiles_map_to_presets() {
    let settings = RuntimeSettings { profile: RuntimeProfile::MemoryEfficient, worker_threads: None };
    assert_eq!(runtime_config(&settings).thread_name, "valida-mem");

    let settings = RuntimeSettings { profile: RuntimeProfile::HighPerformance, worker_threads: None };
    assert_eq!(runtime_config(&settings).thread_name, "valida-hp");
}

#[test]
fn worker_threads_override_the_profile() {
    let settings = RuntimeSettings { profile: RuntimeProfile::Default, worker_threads: Some(3) };
    assert_eq!(runtime_config(&settings).worker_threads, 3);
}

#[test]
fn unknown_log_level_is_refused_before_install() {
    let cfg = LoggingConfig { level: "loud".to_owned(), ..LoggingConfig::default() };
    let err = init_logger("valida-test", &cfg).expect_err("unknown level");
    assert!(err.to_string().contains("Invalid log level 'loud'"));
}
