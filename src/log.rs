// RustPixel
// copyright zipxing@hotmail.com 2022～2025


//! Log module sets up log4rs for the command line tool, reference
//! https://docs.rs/log4rs
//!
//! Library code only talks to the `log` facade, so embedding packfont
//! in another program never installs a logger behind its back.


use log::LevelFilter;
use log4rs::{
    append::{
        console::{ConsoleAppender, Target},
        file::FileAppender,
    },
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

const CONSOLE_PATTERN: &str = "{h({l:<5})} {m}{n}";
const FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}";

/// init logs system
///
/// Console output goes to stderr. With `file_path` set, the same records
/// are appended to that file as well.
pub fn init_log(
    level: LevelFilter,
    file_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();
    let mut builder = Config::builder().appender(
        Appender::builder()
            .filter(Box::new(ThresholdFilter::new(level)))
            .build("console", Box::new(console)),
    );
    let mut root = Root::builder().appender("console");

    if let Some(path) = file_path {
        let logfile = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
            .build(path)?;
        builder = builder.appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(level)))
                .build("logfile", Box::new(logfile)),
        );
        root = root.appender("logfile");
    }

    let config = builder.build(root.build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}
