use std::error::Error;

use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Config as LogConfig, Root},
    encode::pattern::PatternEncoder,
};

use crate::configure::AppConfig;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}";

pub fn level_filter(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info, // Default to Info
    }
}

pub fn build_log_config(config: &AppConfig) -> Result<LogConfig, Box<dyn Error>> {
    // Console appender writes to stderr so generated ids on stdout stay clean
    let console = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();

    let mut log_config_builder =
        LogConfig::builder().appender(Appender::builder().build("console", Box::new(console)));

    let mut root_builder = Root::builder().appender("console");

    // Conditionally add file appender
    if config.log_to_file {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build(&config.log_file)?;

        log_config_builder =
            log_config_builder.appender(Appender::builder().build("file", Box::new(file)));

        root_builder = root_builder.appender("file");
    }

    Ok(log_config_builder.build(root_builder.build(level_filter(&config.log_level)))?)
}

pub fn setup_logger(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    log4rs::init_config(build_log_config(config)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configure::parse_config;

    #[test]
    fn test_level_filter() {
        assert_eq!(level_filter("DEBUG"), LevelFilter::Debug);
        assert_eq!(level_filter("warn"), LevelFilter::Warn);
        assert_eq!(level_filter("verbose"), LevelFilter::Info);
    }

    #[test]
    fn test_build_console_only() {
        let config = parse_config("log_level: error").unwrap();
        let log_config = build_log_config(&config).unwrap();
        assert_eq!(log_config.appenders().len(), 1);
        assert_eq!(log_config.root().level(), LevelFilter::Error);
    }
}
