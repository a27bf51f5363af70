use log::LevelFilter;

pub const LOG_ENV: &str = "SUBTRACK_LOG";

pub fn level_from_setting(value: Option<&str>) -> LevelFilter {
    match value.map(|raw| raw.trim().to_lowercase()).as_deref() {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    }
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
pub fn init() {
    let setting = std::env::var(LOG_ENV).ok();
    let level = level_from_setting(setting.as_deref());

    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .try_init();

    log::debug!("logging initialized at {level}");
}
