use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::env;

pub const HOST: &str = "HOST";
pub const PORT: &str = "PORT";
/// Base URL the clock client talks to.
pub const SERVER_URL: &str = "SERVER_URL";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: &str = "5000";
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

pub const LOG_CONFIG_PATH: &str = "log4rs.yaml";
pub const DATA_FILE: &str = "alarms.json";

/// `host:port` the service binds, from the environment with defaults.
pub fn server_bind_addr() -> String {
    let host = env::var(HOST).unwrap_or(String::from(DEFAULT_HOST));
    let port = env::var(PORT).unwrap_or(String::from(DEFAULT_PORT));
    format!("{host}:{port}")
}

/// Base URL for the clock client, from the environment with a default.
pub fn server_url() -> String {
    env::var(SERVER_URL).unwrap_or(String::from(DEFAULT_SERVER_URL))
}

/// Configure log4rs from `log4rs.yaml`; when the file is absent fall back to
/// a console logger so the binaries work from any directory.
pub fn init_logging() {
    if log4rs::init_file(LOG_CONFIG_PATH, Default::default()).is_ok() {
        return;
    }
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}",
        )))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info));
    if let Ok(config) = config {
        // a second init (e.g. from tests) is fine to ignore
        let _ = log4rs::init_config(config);
    }
}
